use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Config(#[from] review_rag_config::ConfigError),

    #[error(transparent)]
    Llm(#[from] review_rag_llm::LlmError),

    #[error(transparent)]
    Store(#[from] review_rag_store::StoreError),

    #[error(transparent)]
    Host(#[from] review_rag_hostclient::Error),

    #[error(transparent)]
    Collect(#[from] review_rag_collect::CollectError),

    #[error(transparent)]
    Enrich(#[from] review_rag_enrich::EnrichError),

    #[error(transparent)]
    Distill(#[from] review_rag_distill::DistillError),

    #[error(transparent)]
    Review(#[from] review_rag_review::ReviewError),

    #[error("missing required argument: {0}")]
    MissingArg(&'static str),

    #[error("schema validation failed: {0} mismatch(es) against the declared schema")]
    SchemaMismatch(usize),
}

pub type Result<T> = std::result::Result<T, CliError>;
