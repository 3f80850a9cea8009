//! LLM and text-embedding service boundary for Review-RAG.
//!
//! Ported and generalized from `ai-llm-service`: provider configs, Ollama
//! and OpenAI clients, and a fast/slow/embedding profile manager, with the
//! Review-RAG-specific operations (`classify`, `summarize`,
//! `review_markdown`) layered on top.

pub mod config;
mod error;
pub mod ops;
pub mod service_profiles;
pub mod services;
pub mod telemetry;

pub use config::{llm_model_config::LlmModelConfig, llm_provider::LlmProvider};
pub use error::{ConfigError, LlmError, Provider, ProviderError, ProviderErrorKind};
pub use service_profiles::LlmServiceProfiles;
