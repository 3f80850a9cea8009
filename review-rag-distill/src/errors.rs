use thiserror::Error;

#[derive(Debug, Error)]
pub enum DistillError {
    #[error(transparent)]
    Store(#[from] review_rag_store::StoreError),

    #[error(transparent)]
    Llm(#[from] review_rag_llm::LlmError),

    #[error("guideline file error: {0}")]
    OutputFile(#[from] std::io::Error),

    #[error("guideline serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, DistillError>;
