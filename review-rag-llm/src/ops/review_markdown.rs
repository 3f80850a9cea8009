//! Review prompt assembly (spec §4.7): the entire guideline corpus plus the
//! diff, in one prompt — no retrieval, no ranking.

use review_rag_core::Guideline;

use crate::error::LlmError;
use crate::service_profiles::LlmServiceProfiles;

const SYSTEM_PROMPT: &str = "\
You are an architectural reviewer. You are given a corpus of distilled \
review guidelines (as JSON) and a unified diff. Write a Markdown \
architectural review of the diff, citing the concerns from the guideline \
corpus that apply. Do not comment on style or formatting; focus on \
architecture. Reference guidelines by their `concern` field where relevant.";

pub async fn review_markdown(
    llm: &LlmServiceProfiles,
    guidelines: &[Guideline],
    diff: &str,
) -> Result<String, LlmError> {
    let guideline_json = serde_json::to_string_pretty(guidelines).unwrap_or_default();
    let prompt = format!("Guidelines:\n{guideline_json}\n\nDiff:\n{diff}");
    llm.generate_slow(&prompt, Some(SYSTEM_PROMPT)).await
}
