//! Per-stage command handlers. Each wires together the declarative
//! `Settings`, `EnvConfig`, `LlmServiceProfiles`, `Store`, and (where
//! needed) `HostClient`, then dispatches into the corresponding stage
//! crate.

mod backfill;
mod collect;
mod distill;
mod enrich;
mod review;
mod schema;

pub use backfill::run_backfill;
pub use collect::run_collect;
pub use distill::{run_distill_chunked, run_distill_clustered};
pub use enrich::run_enrich;
pub use review::run_review;
pub use schema::{run_schema_migrate, run_schema_validate};

use review_rag_config::{EnvConfig, Settings};
use review_rag_hostclient::{HostClient, HostConfig, HostKind};
use review_rag_llm::config::default_config;
use review_rag_llm::service_profiles::LlmServiceProfiles;
use review_rag_store::{Store, StoreConfig};

use crate::errors::Result;

/// Loads declarative settings and required environment values together,
/// since every stage needs both (spec §6).
pub fn load_settings(config_path: &std::path::Path) -> Result<(Settings, EnvConfig)> {
    let settings = Settings::from_file(config_path)?;
    let env = EnvConfig::from_env()?;
    Ok((settings, env))
}

/// Connects to the store declared by `settings`/`env`.
pub async fn connect_store(settings: &Settings, env: &EnvConfig) -> Result<Store> {
    let cfg = StoreConfig::new(env.database_url.clone(), settings.embedding_dim);
    Ok(Store::connect(cfg).await?)
}

/// Builds the fast/slow/embedding service profiles from environment.
pub fn build_llm() -> Result<LlmServiceProfiles> {
    let fast = default_config::load_fast()?;
    let slow = default_config::load_slow()?;
    let embedding = default_config::load_embedding()?;
    Ok(LlmServiceProfiles::new(fast, slow, embedding))
}

/// Builds a GitHub host client, preferring an explicit token over
/// `env.host_token`.
pub fn build_host(env: &EnvConfig, token_override: Option<String>) -> Result<HostClient> {
    let token = token_override.unwrap_or_else(|| env.host_token.clone());
    let cfg = HostConfig {
        kind: HostKind::GitHub,
        base_api: "https://api.github.com".to_string(),
        token,
        timeout_secs: 30,
    };
    Ok(HostClient::from_config(cfg)?)
}
