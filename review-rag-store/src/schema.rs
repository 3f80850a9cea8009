//! Schema lifecycle (spec §4.8): validates live `arch_items` columns
//! against the declared shape (including the parameterized vector
//! dimension) and applies minimal corrective DDL.
//!
//! Grounded on the declared-schema posture of `rag-store::config::RagConfig`
//! / `VectorSpace` (a typed description of the vector space the store must
//! match), extended to a column-level comparison since the target store is
//! relational.

use sqlx::PgPool;
use tracing::{info, warn};

use crate::errors::StoreError;

pub const TABLE_NAME: &str = "arch_items";

/// A single declared column: name plus the `format_type()` rendering
/// Postgres would report for a column of that shape (e.g. `"text"`,
/// `"integer"`, `"vector(768)"`).
#[derive(Clone, Debug, PartialEq)]
pub struct DeclaredColumn {
    pub name: &'static str,
    pub formatted_type: String,
}

/// The schema declared by spec §6, parameterized on the target embedding
/// dimension `D`.
pub fn declared_schema(embedding_dim: usize) -> Vec<DeclaredColumn> {
    vec![
        DeclaredColumn { name: "id", formatted_type: "integer".into() },
        DeclaredColumn { name: "repo", formatted_type: "text".into() },
        DeclaredColumn { name: "pr", formatted_type: "integer".into() },
        DeclaredColumn { name: "filepath", formatted_type: "text".into() },
        DeclaredColumn { name: "comment", formatted_type: "text".into() },
        DeclaredColumn { name: "diff", formatted_type: "text".into() },
        DeclaredColumn { name: "concerns", formatted_type: "json".into() },
        DeclaredColumn { name: "arch_summary", formatted_type: "text".into() },
        DeclaredColumn { name: "evidence", formatted_type: "text".into() },
        DeclaredColumn {
            name: "embedding",
            formatted_type: format!("vector({embedding_dim})"),
        },
    ]
}

/// A divergence between the declared schema and the live one: either a
/// type mismatch or a missing column.
#[derive(Clone, Debug, PartialEq)]
pub struct Mismatch {
    pub column: &'static str,
    pub declared: String,
    /// `None` if the column is absent entirely.
    pub actual: Option<String>,
}

/// Reads the live column types for `arch_items` via `format_type()`, which
/// renders parameterized types (like `vector(768)`) the same way the
/// declared schema does, so comparison is a plain string diff.
async fn live_columns(pool: &PgPool) -> Result<std::collections::HashMap<String, String>, StoreError> {
    let rows: Vec<(String, String)> = sqlx::query_as(
        "SELECT a.attname, format_type(a.atttypid, a.atttypmod)
         FROM pg_attribute a
         JOIN pg_class c ON a.attrelid = c.oid
         JOIN pg_namespace n ON c.relnamespace = n.oid
         WHERE c.relname = $1 AND a.attnum > 0 AND NOT a.attisdropped
           AND n.nspname = ANY (current_schemas(false))",
    )
    .bind(TABLE_NAME)
    .fetch_all(pool)
    .await?;
    Ok(rows.into_iter().collect())
}

/// Compares live column types against the declared schema (spec §4.8
/// Validator). Returns every mismatch found; an empty result means the
/// store matches the declared shape exactly.
pub async fn validate(pool: &PgPool, embedding_dim: usize) -> Result<Vec<Mismatch>, StoreError> {
    let live = live_columns(pool).await?;
    let declared = declared_schema(embedding_dim);

    let mut mismatches = Vec::new();
    for col in &declared {
        match live.get(col.name) {
            Some(actual) if actual == &col.formatted_type => {}
            Some(actual) => mismatches.push(Mismatch {
                column: col.name,
                declared: col.formatted_type.clone(),
                actual: Some(actual.clone()),
            }),
            None => mismatches.push(Mismatch {
                column: col.name,
                declared: col.formatted_type.clone(),
                actual: None,
            }),
        }
    }

    for mismatch in &mismatches {
        warn!(
            column = mismatch.column,
            declared = %mismatch.declared,
            actual = ?mismatch.actual,
            "schema mismatch"
        );
    }

    Ok(mismatches)
}

/// Creates `arch_items` with its declared columns and the two mandatory
/// indexes from spec §6 (`(repo, pr)` and an inverted index on
/// `concerns`), if the table does not already exist. The approximate-
/// nearest-neighbor index on `embedding` is recommended in spec §6 prose
/// but, per the Open Question in spec §9, never declared here.
pub async fn ensure_table_exists(pool: &PgPool, embedding_dim: usize) -> Result<bool, StoreError> {
    let exists: bool = sqlx::query_scalar(
        "SELECT EXISTS (SELECT 1 FROM pg_class WHERE relname = $1 AND relkind = 'r')",
    )
    .bind(TABLE_NAME)
    .fetch_one(pool)
    .await?;
    if exists {
        return Ok(false);
    }

    info!(table = TABLE_NAME, embedding_dim, "creating arch_items table");
    sqlx::query("CREATE EXTENSION IF NOT EXISTS vector")
        .execute(pool)
        .await?;
    let create = format!(
        "CREATE TABLE {TABLE_NAME} (
            id serial primary key,
            repo text NOT NULL,
            pr integer NOT NULL,
            filepath text NOT NULL DEFAULT '',
            comment text NOT NULL,
            diff text,
            concerns json NOT NULL DEFAULT '[]',
            arch_summary text NOT NULL DEFAULT '',
            evidence text,
            embedding vector({embedding_dim})
         )"
    );
    sqlx::query(&create).execute(pool).await?;
    sqlx::query(&format!(
        "CREATE INDEX {TABLE_NAME}_repo_pr_idx ON {TABLE_NAME} (repo, pr)"
    ))
    .execute(pool)
    .await?;
    sqlx::query(&format!(
        "CREATE INDEX {TABLE_NAME}_concerns_gin_idx ON {TABLE_NAME} USING gin ((concerns::jsonb))"
    ))
    .execute(pool)
    .await?;
    Ok(true)
}

/// Applies the minimal corrective DDL for each mismatch (spec §4.8
/// Migrator). Never drops data implicitly: a vector dimension change
/// widens/narrows the column type with existing values set to `NULL`
/// (Postgres cannot reinterpret vectors of a different dimension), which a
/// subsequent Backfill run is expected to repair (restoring I2/I4).
pub async fn migrate(pool: &PgPool, mismatches: &[Mismatch]) -> Result<(), StoreError> {
    for mismatch in mismatches {
        match mismatch.actual {
            None => {
                let sql = format!(
                    "ALTER TABLE {TABLE_NAME} ADD COLUMN {} {}",
                    mismatch.column, mismatch.declared
                );
                info!(sql = %sql, "adding missing column");
                sqlx::query(&sql).execute(pool).await?;
            }
            Some(_) => {
                let sql = format!(
                    "ALTER TABLE {TABLE_NAME} ALTER COLUMN {} TYPE {} USING NULL::{}",
                    mismatch.column, mismatch.declared, mismatch.declared
                );
                info!(sql = %sql, column = mismatch.column, "altering column type");
                sqlx::query(&sql).execute(pool).await?;
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn declared_schema_embeds_dimension() {
        let schema = declared_schema(768);
        let embedding = schema.iter().find(|c| c.name == "embedding").unwrap();
        assert_eq!(embedding.formatted_type, "vector(768)");
    }

    #[test]
    fn declared_schema_tracks_dimension_changes() {
        let a = declared_schema(384);
        let b = declared_schema(768);
        assert_ne!(a, b);
    }
}
