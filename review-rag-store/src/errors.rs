//! Error types for the hybrid relational+vector store.
//!
//! Grounded on `rag-store::errors::RagError`: a flat enum covering
//! configuration, connection, and shape-mismatch failures. Store errors are
//! fatal to the invoking stage (spec §7 taxonomy #5); transactions already
//! committed remain valid.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("config error: {0}")]
    Config(String),

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("embedding vector size mismatch: got={got}, want={want}")]
    VectorSizeMismatch { got: usize, want: usize },

    #[error("schema validation found {0} mismatched column(s); run `schema migrate`")]
    SchemaMismatch(usize),
}
