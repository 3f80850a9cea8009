//! Shared JSON-array parsing for distilled `Guideline`s (both strategies
//! issue the same shape of LLM call) and the final single-file writer.

use std::path::Path;

use review_rag_core::{Guideline, extract_json_array};
use tracing::warn;

use crate::errors::Result;

/// Parses an LLM response into `Guideline`s via the shared bracket-depth
/// extractor (spec §4.6). Returns an empty vec on any failure, logging the
/// offending text — a malformed chunk/cluster is dropped, not fatal.
pub fn parse_guidelines(raw: &str) -> Vec<Guideline> {
    match extract_json_array(raw) {
        Ok(value) => match serde_json::from_value::<Vec<Guideline>>(value) {
            Ok(guidelines) => guidelines,
            Err(e) => {
                warn!(error = %e, response = %raw, "guideline response did not match the expected shape");
                Vec::new()
            }
        },
        Err(e) => {
            warn!(error = %e, response = %raw, "failed to extract a JSON array from guideline response");
            Vec::new()
        }
    }
}

/// Writes the accumulated guideline corpus as a single JSON array (spec
/// §4.4/§4.5: "Write the accumulator as a single JSON array.").
pub fn write_guidelines(path: &Path, guidelines: &[Guideline]) -> Result<()> {
    let text = serde_json::to_string_pretty(guidelines)?;
    std::fs::write(path, text)?;
    Ok(())
}
