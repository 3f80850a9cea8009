//! Error types shared by the core data model.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("json extraction failed: {reason} (offending text: {excerpt})")]
    JsonExtraction { reason: String, excerpt: String },

    #[error("json parse failed: {0}")]
    JsonParse(#[from] serde_json::Error),
}
