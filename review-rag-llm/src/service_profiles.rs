//! Shared LLM service with three active profiles: `fast`, `slow`, and
//! `embedding` (ported and generalized from
//! `ai-llm-service::service_profiles::LlmServiceProfiles`).
//!
//! - `fast` backs classification (spec §4.2).
//! - `slow` backs summarization (spec §4.2) and the architectural review
//!   prompt (spec §4.7); falls back to `fast` if not configured.
//! - `embedding` backs Enrich's and Backfill's embedding calls (spec §4.2,
//!   §4.3).
//!
//! Construct once, wrap in `Arc`, and pass clones to every stage that needs
//! LLM access. Underlying HTTP clients are cached per config.

use std::{
    collections::HashMap,
    hash::{Hash, Hasher},
    sync::Arc,
    time::Instant,
};

use tokio::sync::RwLock;
use tracing::{debug, info};

use crate::config::{llm_model_config::LlmModelConfig, llm_provider::LlmProvider};
use crate::error::LlmError;
use crate::services::{ollama_service::OllamaService, open_ai_service::OpenAiService};

#[derive(Debug)]
pub struct LlmServiceProfiles {
    fast: LlmModelConfig,
    slow: LlmModelConfig,
    embedding: LlmModelConfig,

    ollama: RwLock<HashMap<ClientKey, Arc<OllamaService>>>,
    openai: RwLock<HashMap<ClientKey, Arc<OpenAiService>>>,
}

impl LlmServiceProfiles {
    pub fn new(
        fast: LlmModelConfig,
        slow_opt: Option<LlmModelConfig>,
        embedding: LlmModelConfig,
    ) -> Self {
        let slow = slow_opt.unwrap_or_else(|| fast.clone());

        info!(
            fast.provider = %fast.provider,
            fast.model = %fast.model,
            slow.provider = %slow.provider,
            slow.model = %slow.model,
            embedding.provider = %embedding.provider,
            embedding.model = %embedding.model,
            "LlmServiceProfiles initialized"
        );

        Self {
            fast,
            slow,
            embedding,
            ollama: RwLock::new(HashMap::new()),
            openai: RwLock::new(HashMap::new()),
        }
    }

    pub fn embedding_model(&self) -> &LlmModelConfig {
        &self.embedding
    }

    pub async fn generate_fast(&self, prompt: &str, system: Option<&str>) -> Result<String, LlmError> {
        let started = Instant::now();
        let out = self.generate_with(&self.fast, prompt, system).await;
        if out.is_ok() {
            info!(
                provider = %self.fast.provider,
                model = %self.fast.model,
                latency_ms = started.elapsed().as_millis(),
                "fast generation completed"
            );
        }
        out
    }

    pub async fn generate_slow(&self, prompt: &str, system: Option<&str>) -> Result<String, LlmError> {
        let started = Instant::now();
        let out = self.generate_with(&self.slow, prompt, system).await;
        if out.is_ok() {
            info!(
                provider = %self.slow.provider,
                model = %self.slow.model,
                latency_ms = started.elapsed().as_millis(),
                "slow generation completed"
            );
        }
        out
    }

    pub async fn embed(&self, input: &str) -> Result<Vec<f32>, LlmError> {
        let started = Instant::now();
        let out = match self.embedding.provider {
            LlmProvider::Ollama => self.get_or_init_ollama(&self.embedding).await?.embeddings(input).await,
            LlmProvider::OpenAi => self.get_or_init_openai(&self.embedding).await?.embeddings(input).await,
        };
        if out.is_ok() {
            info!(
                provider = %self.embedding.provider,
                model = %self.embedding.model,
                input_len = input.len(),
                latency_ms = started.elapsed().as_millis(),
                "embeddings completed"
            );
        }
        out
    }

    async fn generate_with(
        &self,
        cfg: &LlmModelConfig,
        prompt: &str,
        system: Option<&str>,
    ) -> Result<String, LlmError> {
        match cfg.provider {
            LlmProvider::Ollama => self.get_or_init_ollama(cfg).await?.generate(prompt, system).await,
            LlmProvider::OpenAi => self.get_or_init_openai(cfg).await?.generate(prompt, system).await,
        }
    }

    async fn get_or_init_ollama(&self, cfg: &LlmModelConfig) -> Result<Arc<OllamaService>, LlmError> {
        let key = ClientKey::from(cfg);
        if let Some(cli) = self.ollama.read().await.get(&key).cloned() {
            debug!(model = %cfg.model, "ollama client cache hit");
            return Ok(cli);
        }
        let mut w = self.ollama.write().await;
        if let Some(cli) = w.get(&key).cloned() {
            return Ok(cli);
        }
        let cli = Arc::new(OllamaService::new(cfg.clone())?);
        w.insert(key, cli.clone());
        debug!(model = %cfg.model, "ollama client initialized");
        Ok(cli)
    }

    async fn get_or_init_openai(&self, cfg: &LlmModelConfig) -> Result<Arc<OpenAiService>, LlmError> {
        let key = ClientKey::from(cfg);
        if let Some(cli) = self.openai.read().await.get(&key).cloned() {
            debug!(model = %cfg.model, "openai client cache hit");
            return Ok(cli);
        }
        let mut w = self.openai.write().await;
        if let Some(cli) = w.get(&key).cloned() {
            return Ok(cli);
        }
        let cli = Arc::new(OpenAiService::new(cfg.clone())?);
        w.insert(key, cli.clone());
        debug!(model = %cfg.model, "openai client initialized");
        Ok(cli)
    }
}

/// Cache key identifying a unique client configuration. Only the fields
/// that affect client construction participate; `temperature`/`top_p`/
/// `max_tokens` do not (and aren't `Hash`/`Eq` anyway).
#[derive(Clone, Eq, Debug)]
struct ClientKey {
    provider: LlmProvider,
    endpoint: String,
    model: String,
    api_key: Option<String>,
    timeout: Option<u64>,
}

impl From<&LlmModelConfig> for ClientKey {
    fn from(cfg: &LlmModelConfig) -> Self {
        Self {
            provider: cfg.provider,
            endpoint: cfg.endpoint.clone(),
            model: cfg.model.clone(),
            api_key: cfg.api_key.clone(),
            timeout: cfg.timeout_secs,
        }
    }
}

impl PartialEq for ClientKey {
    fn eq(&self, other: &Self) -> bool {
        self.provider == other.provider
            && self.endpoint == other.endpoint
            && self.model == other.model
            && self.api_key == other.api_key
            && self.timeout == other.timeout
    }
}

impl Hash for ClientKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.provider.hash(state);
        self.endpoint.hash(state);
        self.model.hash(state);
        self.api_key.hash(state);
        self.timeout.hash(state);
    }
}
