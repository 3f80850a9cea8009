use thiserror::Error;

#[derive(Debug, Error)]
pub enum CollectError {
    #[error("record file error: {0}")]
    RecordFile(#[from] std::io::Error),

    #[error("record serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, CollectError>;
