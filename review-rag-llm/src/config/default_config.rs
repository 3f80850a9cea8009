//! Default LLM configs loaded strictly from environment variables.
//!
//! Convenience constructors for [`LlmModelConfig`], grouped by role:
//!
//! - **fast**      → classification (spec §4.2)
//! - **slow**      → summarization and review generation (spec §4.2, §4.7)
//! - **embedding** → embedding generation (spec §4.2, §4.3)
//!
//! Both `ollama` and `openai` are supported; the provider is selected once,
//! for all three roles, via `REVIEW_RAG_LLM_PROVIDER` (defaults to
//! `ollama`). Ported and generalized from
//! `ai-llm-service::config::default_config`, which is Ollama-only.
//!
//! # Environment variables
//!
//! Common:
//! - `REVIEW_RAG_LLM_PROVIDER` = `ollama` (default) or `openai`
//! - `REVIEW_RAG_LLM_MAX_TOKENS` = optional max tokens
//!
//! Ollama:
//! - `REVIEW_RAG_OLLAMA_URL` or `REVIEW_RAG_OLLAMA_PORT` = endpoint (required)
//! - `REVIEW_RAG_OLLAMA_MODEL` = slow/quality model (required)
//! - `REVIEW_RAG_OLLAMA_MODEL_FAST` = fast/speed model (optional, falls back to slow)
//! - `REVIEW_RAG_EMBEDDING_MODEL` = embedding model (required)
//!
//! OpenAI:
//! - `REVIEW_RAG_OPENAI_API_KEY` = API key (required)
//! - `REVIEW_RAG_OPENAI_ENDPOINT` = API base URL (optional, defaults to `https://api.openai.com/v1`)
//! - `REVIEW_RAG_OPENAI_MODEL` = slow/quality model (required)
//! - `REVIEW_RAG_OPENAI_MODEL_FAST` = fast/speed model (optional, falls back to slow)
//! - `REVIEW_RAG_OPENAI_EMBEDDING_MODEL` = embedding model (required)

use review_rag_config as cfg_env;

use crate::config::{llm_model_config::LlmModelConfig, llm_provider::LlmProvider};
use crate::error::{ConfigError, LlmError};

/// Maps `review-rag-config`'s env error onto this crate's own `ConfigError`.
/// The two types are structurally identical but distinct (no `#[from]`
/// exists between crates that don't depend on each other's error enum).
fn map_err(e: review_rag_config::ConfigError) -> ConfigError {
    match e {
        review_rag_config::ConfigError::MissingVar(name) => ConfigError::MissingVar(name),
        review_rag_config::ConfigError::InvalidNumber { var, reason } => {
            ConfigError::InvalidNumber { var, reason }
        }
        _ => ConfigError::InvalidNumber {
            var: "REVIEW_RAG_CONFIG",
            reason: "unexpected configuration source error",
        },
    }
}

fn provider() -> LlmProvider {
    match cfg_env::env_or("REVIEW_RAG_LLM_PROVIDER", "ollama").as_str() {
        "openai" => LlmProvider::OpenAi,
        _ => LlmProvider::Ollama,
    }
}

fn max_tokens() -> Result<Option<u32>, LlmError> {
    Ok(cfg_env::env_opt_usize("REVIEW_RAG_LLM_MAX_TOKENS")
        .map_err(map_err)?
        .map(|v| v as u32))
}

/// Resolves the Ollama endpoint strictly from environment.
///
/// Precedence: `REVIEW_RAG_OLLAMA_URL` if set, else
/// `REVIEW_RAG_OLLAMA_PORT` → `http://localhost:{port}`.
fn ollama_endpoint() -> Result<String, LlmError> {
    if let Some(url) = cfg_env::env_opt("REVIEW_RAG_OLLAMA_URL") {
        return Ok(url);
    }
    if let Some(port) = cfg_env::env_opt("REVIEW_RAG_OLLAMA_PORT") {
        let _ = port.parse::<u16>().map_err(|_| {
            ConfigError::InvalidNumber {
                var: "REVIEW_RAG_OLLAMA_PORT",
                reason: "expected u16 (1..=65535)",
            }
        })?;
        return Ok(format!("http://localhost:{port}"));
    }
    Err(ConfigError::MissingVar("REVIEW_RAG_OLLAMA_URL or REVIEW_RAG_OLLAMA_PORT").into())
}

fn openai_endpoint() -> String {
    cfg_env::env_or("REVIEW_RAG_OPENAI_ENDPOINT", "https://api.openai.com/v1")
}

/// Constructs the **fast** role config for classification.
pub fn load_fast() -> Result<LlmModelConfig, LlmError> {
    let max_tokens = max_tokens()?;
    match provider() {
        LlmProvider::Ollama => {
            let endpoint = ollama_endpoint()?;
            let model = cfg_env::env_opt("REVIEW_RAG_OLLAMA_MODEL_FAST")
                .or_else(|| cfg_env::env_opt("REVIEW_RAG_OLLAMA_MODEL"))
                .ok_or(ConfigError::MissingVar(
                    "REVIEW_RAG_OLLAMA_MODEL_FAST or REVIEW_RAG_OLLAMA_MODEL",
                ))?;
            Ok(LlmModelConfig {
                provider: LlmProvider::Ollama,
                model,
                endpoint,
                api_key: None,
                max_tokens,
                temperature: Some(0.7),
                top_p: Some(0.9),
                timeout_secs: Some(60),
            })
        }
        LlmProvider::OpenAi => {
            let api_key = cfg_env::must_env("REVIEW_RAG_OPENAI_API_KEY").map_err(map_err)?;
            let model = cfg_env::env_opt("REVIEW_RAG_OPENAI_MODEL_FAST")
                .or_else(|| cfg_env::env_opt("REVIEW_RAG_OPENAI_MODEL"))
                .ok_or(ConfigError::MissingVar(
                    "REVIEW_RAG_OPENAI_MODEL_FAST or REVIEW_RAG_OPENAI_MODEL",
                ))?;
            Ok(LlmModelConfig {
                provider: LlmProvider::OpenAi,
                model,
                endpoint: openai_endpoint(),
                api_key: Some(api_key),
                max_tokens,
                temperature: Some(0.7),
                top_p: Some(0.9),
                timeout_secs: Some(60),
            })
        }
    }
}

/// Constructs the **slow** role config for summarization and review
/// generation, or `None` if no quality model is configured (the caller
/// falls back to the fast profile, per `LlmServiceProfiles::new`).
pub fn load_slow() -> Result<Option<LlmModelConfig>, LlmError> {
    let max_tokens = max_tokens()?;
    match provider() {
        LlmProvider::Ollama => {
            let Some(model) = cfg_env::env_opt("REVIEW_RAG_OLLAMA_MODEL") else {
                return Ok(None);
            };
            let endpoint = ollama_endpoint()?;
            Ok(Some(LlmModelConfig {
                provider: LlmProvider::Ollama,
                model,
                endpoint,
                api_key: None,
                max_tokens,
                temperature: Some(0.2),
                top_p: None,
                timeout_secs: Some(600),
            }))
        }
        LlmProvider::OpenAi => {
            let Some(model) = cfg_env::env_opt("REVIEW_RAG_OPENAI_MODEL") else {
                return Ok(None);
            };
            let api_key = cfg_env::must_env("REVIEW_RAG_OPENAI_API_KEY").map_err(map_err)?;
            Ok(Some(LlmModelConfig {
                provider: LlmProvider::OpenAi,
                model,
                endpoint: openai_endpoint(),
                api_key: Some(api_key),
                max_tokens,
                temperature: Some(0.2),
                top_p: None,
                timeout_secs: Some(600),
            }))
        }
    }
}

/// Constructs the **embedding** role config.
pub fn load_embedding() -> Result<LlmModelConfig, LlmError> {
    match provider() {
        LlmProvider::Ollama => {
            let endpoint = ollama_endpoint()?;
            let model = cfg_env::must_env("REVIEW_RAG_EMBEDDING_MODEL").map_err(map_err)?;
            Ok(LlmModelConfig {
                provider: LlmProvider::Ollama,
                model,
                endpoint,
                api_key: None,
                max_tokens: None,
                temperature: Some(0.0),
                top_p: None,
                timeout_secs: Some(30),
            })
        }
        LlmProvider::OpenAi => {
            let api_key = cfg_env::must_env("REVIEW_RAG_OPENAI_API_KEY").map_err(map_err)?;
            let model =
                cfg_env::must_env("REVIEW_RAG_OPENAI_EMBEDDING_MODEL").map_err(map_err)?;
            Ok(LlmModelConfig {
                provider: LlmProvider::OpenAi,
                model,
                endpoint: openai_endpoint(),
                api_key: Some(api_key),
                max_tokens: None,
                temperature: Some(0.0),
                top_p: None,
                timeout_secs: Some(30),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    static ENV_LOCK: Mutex<()> = Mutex::new(());

    fn clear_ollama_env() {
        for var in [
            "REVIEW_RAG_LLM_PROVIDER",
            "REVIEW_RAG_OLLAMA_URL",
            "REVIEW_RAG_OLLAMA_PORT",
            "REVIEW_RAG_OLLAMA_MODEL",
            "REVIEW_RAG_OLLAMA_MODEL_FAST",
            "REVIEW_RAG_EMBEDDING_MODEL",
            "REVIEW_RAG_LLM_MAX_TOKENS",
        ] {
            unsafe {
                std::env::remove_var(var);
            }
        }
    }

    #[test]
    fn fast_falls_back_to_the_slow_model_name_when_unset() {
        let _guard = ENV_LOCK.lock().unwrap();
        clear_ollama_env();
        unsafe {
            std::env::set_var("REVIEW_RAG_OLLAMA_URL", "http://localhost:11434");
            std::env::set_var("REVIEW_RAG_OLLAMA_MODEL", "llama3");
        }
        let cfg = load_fast().unwrap();
        assert_eq!(cfg.model, "llama3");
        assert_eq!(cfg.provider, LlmProvider::Ollama);
        clear_ollama_env();
    }

    #[test]
    fn slow_is_none_when_no_quality_model_is_configured() {
        let _guard = ENV_LOCK.lock().unwrap();
        clear_ollama_env();
        unsafe {
            std::env::set_var("REVIEW_RAG_OLLAMA_URL", "http://localhost:11434");
        }
        assert!(load_slow().unwrap().is_none());
        clear_ollama_env();
    }

    #[test]
    fn embedding_requires_its_own_model_var() {
        let _guard = ENV_LOCK.lock().unwrap();
        clear_ollama_env();
        unsafe {
            std::env::set_var("REVIEW_RAG_OLLAMA_URL", "http://localhost:11434");
        }
        assert!(load_embedding().is_err());
        clear_ollama_env();
    }
}
