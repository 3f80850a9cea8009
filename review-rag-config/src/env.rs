//! Environment variable resolution (spec §6 Environment): a code-host
//! access token and a database connection string.
//!
//! Mirrors `ai-llm-service::error_handler`'s `must_env`/`env_opt_u32`
//! helpers and `contextor::cfg`'s env-first posture: required values fail
//! fast with a named error, optional values fall back to documented
//! defaults.

use crate::errors::{ConfigError, Result};

/// Fetches a required, non-empty environment variable.
pub fn must_env(name: &'static str) -> Result<String> {
    match std::env::var(name) {
        Ok(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(ConfigError::MissingVar(name)),
    }
}

/// Returns an optional environment variable, `None` if unset or empty.
pub fn env_opt(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

/// Returns an environment variable or a default.
pub fn env_or(name: &str, default: &str) -> String {
    env_opt(name).unwrap_or_else(|| default.to_string())
}

/// Parses an optional `usize` from env.
pub fn env_opt_usize(name: &'static str) -> Result<Option<usize>> {
    match std::env::var(name) {
        Ok(v) if !v.trim().is_empty() => v
            .parse::<usize>()
            .map(Some)
            .map_err(|_| ConfigError::InvalidNumber {
                var: name,
                reason: "expected usize",
            }),
        _ => Ok(None),
    }
}

/// Environment-sourced credentials and connection identifiers that the
/// declarative YAML config (§6) deliberately does not carry. Per-role LLM
/// model configuration (provider/model/endpoint/api key) is resolved
/// separately by `review-rag-llm::config::default_config`, following the
/// same env-first posture.
#[derive(Clone, Debug)]
pub struct EnvConfig {
    /// Code-host access token (GitHub/GitLab personal access token).
    pub host_token: String,
    /// Relational+vector store connection string.
    pub database_url: String,
}

impl EnvConfig {
    /// Loads all required environment values, failing fast on the first
    /// missing one (configuration errors are fatal, spec §7 taxonomy #1).
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            host_token: must_env("REVIEW_RAG_HOST_TOKEN")?,
            database_url: must_env("REVIEW_RAG_DATABASE_URL")?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    static ENV_LOCK: Mutex<()> = Mutex::new(());

    #[test]
    fn missing_var_is_a_named_error() {
        let _guard = ENV_LOCK.lock().unwrap();
        unsafe {
            std::env::remove_var("REVIEW_RAG_TEST_VAR");
        }
        let err = must_env("REVIEW_RAG_TEST_VAR").unwrap_err();
        assert!(matches!(err, ConfigError::MissingVar("REVIEW_RAG_TEST_VAR")));
    }

    #[test]
    fn env_or_falls_back_to_default() {
        let _guard = ENV_LOCK.lock().unwrap();
        unsafe {
            std::env::remove_var("REVIEW_RAG_TEST_VAR2");
        }
        assert_eq!(env_or("REVIEW_RAG_TEST_VAR2", "fallback"), "fallback");
    }
}
