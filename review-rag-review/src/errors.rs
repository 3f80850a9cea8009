use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReviewError {
    #[error("failed to fetch diff: {0}")]
    Fetch(#[from] review_rag_hostclient::Error),

    #[error("diff file not found: {0}")]
    FileNotFound(std::io::Error),

    #[error("guideline file error: {0}")]
    GuidelineFile(std::io::Error),

    #[error("malformed guideline file: {0}")]
    GuidelineParse(#[from] serde_json::Error),

    #[error(transparent)]
    Llm(#[from] review_rag_llm::LlmError),
}

pub type Result<T> = std::result::Result<T, ReviewError>;
