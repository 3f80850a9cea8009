use thiserror::Error;

#[derive(Debug, Error)]
pub enum EnrichError {
    #[error("record file error: {0}")]
    RecordFile(#[from] std::io::Error),

    #[error(transparent)]
    Store(#[from] review_rag_store::StoreError),

    /// Spec §4.2: "Vector length must equal the schema-declared dimension;
    /// a mismatch is a fatal configuration error for the whole run."
    #[error("embedding dimension mismatch: got={got}, want={want}; aborting run")]
    EmbeddingDimMismatch { got: usize, want: usize },

    #[error("log file error: {0}")]
    LogFile(std::io::Error),
}

pub type Result<T> = std::result::Result<T, EnrichError>;
