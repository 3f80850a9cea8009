//! Classification (spec §4.2): ask the fast profile for a JSON array of
//! architectural-concern tags, then keep only tags in the controlled
//! vocabulary.

use review_rag_core::{Vocabulary, extract_json_array};
use tracing::warn;

use crate::error::LlmError;
use crate::service_profiles::LlmServiceProfiles;

const SYSTEM_PROMPT: &str = "\
You are an expert code reviewer. Given a single review comment, identify \
which architectural concerns it touches. Respond with ONLY a JSON array \
of strings drawn from the provided vocabulary; do not invent new tags. If \
none apply, respond with an empty array `[]`.";

/// Calls the fast profile to classify `reduced_comment`, returning the
/// subset of `vocab` the LLM named.
///
/// On a parse failure the empty set is returned rather than propagating an
/// error (spec §4.2: "On parse failure return the empty set (do not fail
/// the record).").
pub async fn classify(
    llm: &LlmServiceProfiles,
    vocab: &Vocabulary,
    reduced_comment: &str,
) -> Result<Vec<String>, LlmError> {
    let prompt = format!(
        "Vocabulary: {}\n\nComment:\n{}",
        vocab.as_slice().join(", "),
        reduced_comment
    );

    let raw = llm.generate_fast(&prompt, Some(SYSTEM_PROMPT)).await?;

    let tags = match extract_json_array(&raw) {
        Ok(serde_json::Value::Array(items)) => items
            .into_iter()
            .filter_map(|v| v.as_str().map(str::to_string))
            .collect::<Vec<_>>(),
        Ok(_) | Err(_) => {
            warn!(response = %raw, "classification response was not a JSON array; using empty set");
            Vec::new()
        }
    };

    Ok(vocab.filter_known(tags))
}
