//! Reads the append-only record file Collect produces: one JSON-encoded
//! `ReviewRecord` per line. A corrupt line is logged and skipped, never
//! fatal to the batch, matching the writer's "each line independently
//! parseable" contract.

use std::path::Path;

use review_rag_core::ReviewRecord;
use tracing::warn;

use crate::errors::Result;

pub fn read_records(path: &Path) -> Result<Vec<ReviewRecord>> {
    let text = std::fs::read_to_string(path)?;
    let mut records = Vec::new();
    for (lineno, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        match serde_json::from_str::<ReviewRecord>(line) {
            Ok(record) => records.push(record),
            Err(e) => warn!(line = lineno + 1, error = %e, "skipping malformed record line"),
        }
    }
    Ok(records)
}
