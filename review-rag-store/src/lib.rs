//! Hybrid relational+vector store facade for Review-RAG, over PostgreSQL +
//! pgvector via `sqlx`.
//!
//! Grounded on `rag-store::lib::RagStore` (a thin facade wrapping a client
//! + config, async methods delegating to focused modules), re-targeted
//! from Qdrant to `sqlx::PgPool` because spec §6 declares a relational+
//! vector SQL schema directly.

mod arch_items;
mod config;
mod errors;
mod row;
pub mod schema;

pub use arch_items::DistillRow;
pub use config::StoreConfig;
pub use errors::StoreError;
pub use schema::{DeclaredColumn, Mismatch};

use review_rag_core::{ArchItem, ReviewRecord};
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use tracing::info;

/// Entry point recommended for application code: wires configuration and a
/// connection pool, and exposes the store's CRUD/dedup/schema surface.
pub struct Store {
    cfg: StoreConfig,
    pool: PgPool,
}

impl Store {
    /// Connects to the configured database. Connections are scoped to the
    /// stage invocation with guaranteed release on every exit path (spec
    /// §5 Resource acquisition) because `PgPool` closes its sockets when
    /// dropped.
    pub async fn connect(cfg: StoreConfig) -> Result<Self, StoreError> {
        cfg.validate()?;
        info!(database_url_len = cfg.database_url.len(), "connecting to store");
        let pool = PgPoolOptions::new()
            .max_connections(cfg.max_connections)
            .connect(&cfg.database_url)
            .await?;
        Ok(Self { cfg, pool })
    }

    pub fn embedding_dim(&self) -> usize {
        self.cfg.embedding_dim
    }

    /// Anti-joins `records` against `arch_items` on the identity tuple,
    /// returning only the previously-unseen ones (spec §4.2 Deduplication).
    pub async fn dedup_new_records(
        &self,
        records: &[ReviewRecord],
    ) -> Result<Vec<ReviewRecord>, StoreError> {
        arch_items::dedup_new_records(&self.pool, records).await
    }

    /// Inserts one enriched `ArchItem` in its own transaction.
    pub async fn insert_arch_item(&self, item: &ArchItem) -> Result<i64, StoreError> {
        arch_items::insert_arch_item(&self.pool, item).await
    }

    /// Rows awaiting Backfill (spec §4.3).
    pub async fn fetch_null_embeddings(&self) -> Result<Vec<ArchItem>, StoreError> {
        arch_items::fetch_null_embeddings(&self.pool).await
    }

    /// Sets `embedding` for `id`, honoring I5 (never overwrite a non-null
    /// embedding). Returns whether the row was actually updated.
    pub async fn update_embedding_if_null(
        &self,
        id: i64,
        embedding: &[f32],
    ) -> Result<bool, StoreError> {
        arch_items::update_embedding_if_null(&self.pool, id, embedding).await
    }

    /// `(concerns, arch_summary, evidence)` for every row, for the chunked
    /// distillation strategy (spec §4.4).
    pub async fn fetch_all_for_distill(&self) -> Result<Vec<DistillRow>, StoreError> {
        arch_items::fetch_all_for_distill(&self.pool).await
    }

    /// Every row with a non-null embedding, for the clustered distillation
    /// strategy (spec §4.5).
    pub async fn fetch_all_with_embeddings(&self) -> Result<Vec<ArchItem>, StoreError> {
        arch_items::fetch_all_with_embeddings(&self.pool).await
    }

    /// Creates `arch_items` if it does not yet exist. Returns whether it
    /// was created.
    pub async fn ensure_table_exists(&self) -> Result<bool, StoreError> {
        schema::ensure_table_exists(&self.pool, self.cfg.embedding_dim).await
    }

    /// Compares the live schema against the declared one (spec §4.8
    /// Validator).
    pub async fn validate_schema(&self) -> Result<Vec<Mismatch>, StoreError> {
        schema::validate(&self.pool, self.cfg.embedding_dim).await
    }

    /// Applies corrective DDL for the given mismatches (spec §4.8
    /// Migrator).
    pub async fn migrate_schema(&self, mismatches: &[Mismatch]) -> Result<(), StoreError> {
        schema::migrate(&self.pool, mismatches).await
    }
}
