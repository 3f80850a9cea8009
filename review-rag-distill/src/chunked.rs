//! Chunked distillation strategy (spec §4.4): partition all rows into
//! fixed-size chunks, one LLM call per chunk, no cross-chunk dedup.
//! Grounded on the batch-chunking style of `rag-store::ingest::ingest_file`
//! (`chunks(batch_size)`).

use review_rag_core::Guideline;
use review_rag_llm::service_profiles::LlmServiceProfiles;
use review_rag_store::{DistillRow, Store};
use tracing::info;

use crate::errors::Result;
use crate::guideline_io::parse_guidelines;

const SYSTEM_PROMPT: &str = "\
You distill a batch of architectural review comments into reusable \
guidelines. Respond with ONLY a JSON array of objects of the shape \
{\"concern\": string, \"guideline\": string, \"rationale\": string, \
\"examples\": string}. Merge obviously duplicate guidelines within this \
batch; do not fabricate concerns outside what the comments discuss.";

pub async fn distill_chunked(store: &Store, llm: &LlmServiceProfiles, chunk_size: usize) -> Result<Vec<Guideline>> {
    let rows = store.fetch_all_for_distill().await?;
    let chunk_size = chunk_size.max(1);

    let mut guidelines = Vec::new();
    for (idx, chunk) in rows.chunks(chunk_size).enumerate() {
        let prompt = build_prompt(chunk);
        let raw = llm.generate_slow(&prompt, Some(SYSTEM_PROMPT)).await?;
        let mut chunk_guidelines = parse_guidelines(&raw);
        info!(chunk = idx, rows = chunk.len(), emitted = chunk_guidelines.len(), "chunk distilled");
        guidelines.append(&mut chunk_guidelines);
    }

    Ok(guidelines)
}

fn build_prompt(chunk: &[DistillRow]) -> String {
    let mut prompt = String::from("Review comments in this batch:\n\n");
    for row in chunk {
        prompt.push_str("- concerns: ");
        prompt.push_str(&row.concerns.join(", "));
        prompt.push_str("\n  summary: ");
        prompt.push_str(&row.arch_summary);
        if let Some(evidence) = &row.evidence {
            if !evidence.is_empty() {
                prompt.push_str("\n  evidence: ");
                prompt.push_str(&evidence.join(" | "));
            }
        }
        prompt.push('\n');
    }
    prompt
}
