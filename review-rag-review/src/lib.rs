//! Review stage (spec §4.7): resolve the diff, load the guideline corpus,
//! and emit a Markdown architectural review to stdout.

mod diff_source;
mod errors;

pub use diff_source::resolve_diff;
pub use errors::{ReviewError, Result};

use std::path::Path;

use review_rag_core::Guideline;
use review_rag_hostclient::HostClient;
use review_rag_llm::ops::review_markdown;
use review_rag_llm::service_profiles::LlmServiceProfiles;

pub fn load_guidelines(path: &Path) -> Result<Vec<Guideline>> {
    let text = std::fs::read_to_string(path).map_err(ReviewError::GuidelineFile)?;
    Ok(serde_json::from_str(&text)?)
}

/// Runs Review end to end: resolves `diff_arg` (PR URL or local file),
/// loads the guideline corpus, and returns the Markdown review text.
pub async fn review(
    llm: &LlmServiceProfiles,
    host: Option<&HostClient>,
    guidelines_path: &Path,
    diff_arg: &str,
) -> Result<String> {
    let diff = diff_source::resolve_diff(host, diff_arg).await?;
    let guidelines = load_guidelines(guidelines_path)?;
    Ok(review_markdown(llm, &guidelines, &diff).await?)
}
