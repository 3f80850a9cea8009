//! Declarative YAML configuration (spec §6 Configuration).
//!
//! The YAML file itself is loaded by an external static loader (spec §1
//! scope note); this module owns the typed shape that loader populates,
//! following `contextor::cfg::ContextorConfig`'s "typed config with
//! defaults" posture.

use std::collections::BTreeMap;
use std::path::Path;

use serde::Deserialize;

use crate::errors::{ConfigError, Result};

/// Reserved for future online retrieval (spec §6); parsed but unused by the
/// current core stages.
#[derive(Clone, Debug, Deserialize, Default)]
#[serde(default)]
pub struct RetrievalSettings {
    pub top_k: Option<u32>,
    pub min_chars: Option<u32>,
    pub max_chars: Option<u32>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct BatchSettings {
    /// Hard cap on `ReviewRecord`s enriched per Enrich invocation.
    pub comments_limit: u32,
}

impl Default for BatchSettings {
    fn default() -> Self {
        Self {
            comments_limit: 500,
        }
    }
}

/// The full declarative configuration surface of spec §6.
#[derive(Clone, Debug, Deserialize)]
pub struct Settings {
    /// Ordered list defining the controlled vocabulary for classification.
    pub architectural_concerns: Vec<String>,

    /// Mapping from concern to list of substrings; drives Collect's
    /// relevance filter and PR search grouping.
    pub keywords: BTreeMap<String, Vec<String>>,

    #[serde(default)]
    pub retrieval: RetrievalSettings,

    #[serde(default)]
    pub batch: BatchSettings,

    /// Target embedding dimension declared by the schema (spec §3, §6).
    #[serde(default = "default_embedding_dim")]
    pub embedding_dim: usize,

    /// Chunk size for the chunked distillation strategy (spec §4.4).
    #[serde(default = "default_chunk_size")]
    pub distill_chunk_size: usize,
}

fn default_embedding_dim() -> usize {
    768
}

fn default_chunk_size() -> usize {
    5
}

impl Settings {
    pub fn from_yaml_str(text: &str) -> Result<Self> {
        serde_yaml::from_str(text).map_err(|source| ConfigError::Parse {
            path: "<string>".to_string(),
            source,
        })
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        serde_yaml::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.display().to_string(),
            source,
        })
    }

    /// All keyword substrings across every concern, case-folded once, used
    /// by Collect's keyword-search mode (spec §4.1) to OR-group queries.
    pub fn all_keywords_lowercase(&self) -> Vec<String> {
        self.keywords
            .values()
            .flatten()
            .map(|k| k.to_lowercase())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"
architectural_concerns:
  - upgrade-safety
  - correctness
  - extensibility
keywords:
  upgrade-safety:
    - backward compat
    - migration
  correctness:
    - race condition
batch:
  comments_limit: 250
"#;

    #[test]
    fn parses_minimal_config_with_defaults() {
        let settings = Settings::from_yaml_str(SAMPLE).unwrap();
        assert_eq!(settings.architectural_concerns.len(), 3);
        assert_eq!(settings.batch.comments_limit, 250);
        assert_eq!(settings.embedding_dim, 768);
        assert_eq!(settings.distill_chunk_size, 5);
        assert!(settings.retrieval.top_k.is_none());
    }

    #[test]
    fn collects_all_keywords_lowercase() {
        let settings = Settings::from_yaml_str(SAMPLE).unwrap();
        let mut kws = settings.all_keywords_lowercase();
        kws.sort();
        assert_eq!(
            kws,
            vec!["backward compat".to_string(), "migration".to_string(), "race condition".to_string()]
        );
    }
}
