//! CRUD, dedup anti-join, and distillation queries over `arch_items`.
//!
//! Grounded on `rag-store::ingest`'s batch-oriented insert path, re-targeted
//! at a relational+vector engine: dedup is a single `UNNEST`-populated
//! temp-table anti-join per spec §4.2 ("O(1) round-trips regardless of
//! incoming size"), and each enriched row is committed in its own
//! transaction per spec §4.2's crash-consistency requirement.

use pgvector::Vector;
use review_rag_core::{ArchItem, ReviewRecord};
use sqlx::PgPool;
use tracing::debug;

use crate::errors::StoreError;
use crate::row::{ArchItemRow, concerns_to_json, evidence_to_text};

/// Anti-joins `records` against `arch_items` on the identity tuple (I1),
/// returning only the records not already present. One connection is held
/// for the duration so the temp table survives across statements;
/// `ON COMMIT DROP` cleans it up when the surrounding transaction commits.
pub async fn dedup_new_records(
    pool: &PgPool,
    records: &[ReviewRecord],
) -> Result<Vec<ReviewRecord>, StoreError> {
    if records.is_empty() {
        return Ok(Vec::new());
    }

    let mut tx = pool.begin().await?;

    sqlx::query(
        "CREATE TEMP TABLE incoming_records (
            idx bigint, repo text, pr bigint, filepath text, comment text
         ) ON COMMIT DROP",
    )
    .execute(&mut *tx)
    .await?;

    let idxs: Vec<i64> = (0..records.len() as i64).collect();
    let repos: Vec<&str> = records.iter().map(|r| r.repo.as_str()).collect();
    let prs: Vec<i64> = records.iter().map(|r| r.pr).collect();
    let filepaths: Vec<&str> = records.iter().map(|r| r.file_path.as_str()).collect();
    let comments: Vec<&str> = records.iter().map(|r| r.comment_body.as_str()).collect();

    sqlx::query(
        "INSERT INTO incoming_records (idx, repo, pr, filepath, comment)
         SELECT * FROM UNNEST($1::bigint[], $2::text[], $3::bigint[], $4::text[], $5::text[])",
    )
    .bind(&idxs)
    .bind(&repos)
    .bind(&prs)
    .bind(&filepaths)
    .bind(&comments)
    .execute(&mut *tx)
    .await?;

    let new_idxs: Vec<i64> = sqlx::query_scalar(
        "SELECT ir.idx FROM incoming_records ir
         LEFT JOIN arch_items ai
           ON ai.repo = ir.repo AND ai.pr = ir.pr
          AND ai.filepath = ir.filepath AND ai.comment = ir.comment
         WHERE ai.id IS NULL
         ORDER BY ir.idx",
    )
    .fetch_all(&mut *tx)
    .await?;

    tx.commit().await?;

    debug!(incoming = records.len(), new = new_idxs.len(), "dedup anti-join complete");

    Ok(new_idxs.into_iter().map(|i| records[i as usize].clone()).collect())
}

/// Inserts a single enriched `ArchItem` in its own transaction (spec §4.2:
/// "Each `ArchItem` is committed in its own transaction so partial runs
/// leave a consistent store.").
pub async fn insert_arch_item(pool: &PgPool, item: &ArchItem) -> Result<i64, StoreError> {
    let mut tx = pool.begin().await?;

    let embedding = item.embedding.clone().map(Vector::from);
    let concerns_json = concerns_to_json(&item.concerns);
    let evidence_text = evidence_to_text(&item.evidence);

    let id: i64 = sqlx::query_scalar(
        "INSERT INTO arch_items (repo, pr, filepath, comment, diff, concerns, arch_summary, evidence, embedding)
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
         RETURNING id",
    )
    .bind(&item.repo)
    .bind(item.pr)
    .bind(&item.file_path)
    .bind(&item.comment)
    .bind(&item.diff)
    .bind(&concerns_json)
    .bind(&item.arch_summary)
    .bind(&evidence_text)
    .bind(&embedding)
    .fetch_one(&mut *tx)
    .await?;

    tx.commit().await?;
    Ok(id)
}

/// Rows with a null embedding, for Backfill (spec §4.3).
pub async fn fetch_null_embeddings(pool: &PgPool) -> Result<Vec<ArchItem>, StoreError> {
    let rows: Vec<ArchItemRow> = sqlx::query_as(
        "SELECT id, repo, pr, filepath, comment, diff, concerns, arch_summary, evidence, embedding
         FROM arch_items WHERE embedding IS NULL
         ORDER BY id",
    )
    .fetch_all(pool)
    .await?;
    Ok(rows.into_iter().map(ArchItem::from).collect())
}

/// Sets `embedding` for `id` only if it is currently null (I5: Backfill
/// never overwrites a non-null embedding). Returns whether a row changed.
pub async fn update_embedding_if_null(
    pool: &PgPool,
    id: i64,
    embedding: &[f32],
) -> Result<bool, StoreError> {
    let vector = Vector::from(embedding.to_vec());
    let result = sqlx::query("UPDATE arch_items SET embedding = $1 WHERE id = $2 AND embedding IS NULL")
        .bind(vector)
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}

/// `(concerns, arch_summary, evidence)` for every row, ordered by insertion,
/// for the chunked distillation strategy (spec §4.4).
pub struct DistillRow {
    pub concerns: Vec<String>,
    pub arch_summary: String,
    pub evidence: Option<Vec<String>>,
}

pub async fn fetch_all_for_distill(pool: &PgPool) -> Result<Vec<DistillRow>, StoreError> {
    let rows: Vec<(serde_json::Value, String, Option<String>)> =
        sqlx::query_as("SELECT concerns, arch_summary, evidence FROM arch_items ORDER BY id")
            .fetch_all(pool)
            .await?;

    Ok(rows
        .into_iter()
        .map(|(concerns, arch_summary, evidence)| DistillRow {
            concerns: match concerns {
                serde_json::Value::Array(items) => items
                    .into_iter()
                    .filter_map(|v| v.as_str().map(str::to_string))
                    .collect(),
                _ => Vec::new(),
            },
            arch_summary,
            evidence: evidence.and_then(|raw| serde_json::from_str(&raw).ok()),
        })
        .collect())
}

/// Every row with a non-null embedding, for the clustered distillation
/// strategy (spec §4.5 step 1, "Load all rows that have non-null
/// embeddings").
pub async fn fetch_all_with_embeddings(pool: &PgPool) -> Result<Vec<ArchItem>, StoreError> {
    let rows: Vec<ArchItemRow> = sqlx::query_as(
        "SELECT id, repo, pr, filepath, comment, diff, concerns, arch_summary, evidence, embedding
         FROM arch_items WHERE embedding IS NOT NULL
         ORDER BY id",
    )
    .fetch_all(pool)
    .await?;
    Ok(rows.into_iter().map(ArchItem::from).collect())
}
