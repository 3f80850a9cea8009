//! Enrich pipeline (spec §4.2): dedup, reduce, classify, summarize, embed,
//! and persist each previously-unseen `ReviewRecord` in its own transaction.
//! Grounded on `mr-reviewer::lib::run_review`'s staged-timing orchestration
//! (`Instant`-based per-stage logging), applied to per-record enrichment
//! instead of per-MR review.

use std::path::Path;
use std::time::Instant;

use review_rag_core::{ArchItem, ReviewRecord, Vocabulary, reduce_comment};
use review_rag_llm::ops::{classify, summarize};
use review_rag_llm::service_profiles::LlmServiceProfiles;
use review_rag_store::Store;
use tracing::{info, warn};

use crate::errors::Result;
use crate::log::{RecordTiming, TimingLog};
use crate::record_file;

#[derive(Debug, Default)]
pub struct EnrichStats {
    pub incoming: usize,
    pub deduped_new: usize,
    pub capped: usize,
    pub inserted: usize,
    pub skipped: usize,
}

/// Runs Enrich end to end for one record file against `store`.
///
/// `comments_limit` caps how many of the deduped new records this
/// invocation processes (spec §6 `batch.comments_limit`); the remainder is
/// left for a subsequent invocation, since dedup makes re-running a no-op
/// for anything already persisted.
pub async fn enrich_file(
    store: &Store,
    llm: &LlmServiceProfiles,
    vocab: &Vocabulary,
    record_file_path: &Path,
    log_dir: &Path,
    comments_limit: usize,
) -> Result<EnrichStats> {
    let records = record_file::read_records(record_file_path)?;
    let mut stats = EnrichStats {
        incoming: records.len(),
        ..Default::default()
    };

    let dedup_started = Instant::now();
    let mut new_records = store.dedup_new_records(&records).await?;
    let dedup_ms = dedup_started.elapsed().as_millis();
    stats.deduped_new = new_records.len();

    if new_records.len() > comments_limit {
        stats.capped = new_records.len() - comments_limit;
        new_records.truncate(comments_limit);
    }

    let mut timing_log = TimingLog::open(log_dir).map_err(crate::errors::EnrichError::LogFile)?;
    let expected_dim = store.embedding_dim();

    for record in &new_records {
        match enrich_one(store, llm, vocab, record, expected_dim, dedup_ms, &mut timing_log).await? {
            true => stats.inserted += 1,
            false => stats.skipped += 1,
        }
    }

    info!(
        incoming = stats.incoming,
        deduped_new = stats.deduped_new,
        capped = stats.capped,
        inserted = stats.inserted,
        skipped = stats.skipped,
        "enrich run complete"
    );
    Ok(stats)
}

/// Enriches and persists a single record. Returns `Ok(true)` if inserted,
/// `Ok(false)` if the record was skipped after a recoverable LLM failure.
/// An embedding-dimension mismatch is the one failure that aborts the whole
/// run (spec §4.2), surfaced as `Err`.
async fn enrich_one(
    store: &Store,
    llm: &LlmServiceProfiles,
    vocab: &Vocabulary,
    record: &ReviewRecord,
    expected_dim: usize,
    dedup_ms: u128,
    timing_log: &mut TimingLog,
) -> Result<bool> {
    let total_started = Instant::now();
    let reduced = reduce_comment(&record.comment_body);

    let classify_started = Instant::now();
    let concerns = match classify(llm, vocab, &reduced).await {
        Ok(c) => c,
        Err(e) => {
            warn!(repo = %record.repo, pr = record.pr, error = %e, "classification failed, skipping record");
            log_outcome(timing_log, record, dedup_ms, classify_started.elapsed().as_millis(), 0, 0, total_started, "classify_failed");
            return Ok(false);
        }
    };
    let classify_ms = classify_started.elapsed().as_millis();

    let summarize_started = Instant::now();
    let summary = match summarize(llm, &reduced, record.diff_context.as_deref(), &concerns).await {
        Ok(s) => s,
        Err(e) => {
            warn!(repo = %record.repo, pr = record.pr, error = %e, "summarization failed, skipping record");
            log_outcome(timing_log, record, dedup_ms, classify_ms, summarize_started.elapsed().as_millis(), 0, total_started, "summarize_failed");
            return Ok(false);
        }
    };
    let summarize_ms = summarize_started.elapsed().as_millis();

    let embed_started = Instant::now();
    let embedding = match llm.embed(&summary.text).await {
        Ok(e) => e,
        Err(e) => {
            warn!(repo = %record.repo, pr = record.pr, error = %e, "embedding failed, skipping record");
            log_outcome(timing_log, record, dedup_ms, classify_ms, summarize_ms, embed_started.elapsed().as_millis(), total_started, "embed_failed");
            return Ok(false);
        }
    };
    let embed_ms = embed_started.elapsed().as_millis();

    if embedding.len() != expected_dim {
        return Err(crate::errors::EnrichError::EmbeddingDimMismatch {
            got: embedding.len(),
            want: expected_dim,
        });
    }

    let item = ArchItem {
        id: None,
        repo: record.repo.clone(),
        pr: record.pr,
        file_path: record.file_path.clone(),
        comment: record.comment_body.clone(),
        diff: record.diff_context.clone(),
        concerns,
        arch_summary: summary.text,
        evidence: summary.evidence,
        embedding: Some(embedding),
    };

    let insert_started = Instant::now();
    store.insert_arch_item(&item).await?;
    let insert_ms = insert_started.elapsed().as_millis();

    timing_log.record(&RecordTiming {
        repo: record.repo.clone(),
        pr: record.pr,
        file_path: record.file_path.clone(),
        dedup_ms,
        classify_ms,
        summarize_ms,
        embed_ms,
        insert_ms,
        total_ms: total_started.elapsed().as_millis(),
        outcome: "inserted".to_string(),
    });
    Ok(true)
}

#[allow(clippy::too_many_arguments)]
fn log_outcome(
    timing_log: &mut TimingLog,
    record: &ReviewRecord,
    dedup_ms: u128,
    classify_ms: u128,
    summarize_ms: u128,
    embed_ms: u128,
    total_started: Instant,
    outcome: &str,
) {
    timing_log.record(&RecordTiming {
        repo: record.repo.clone(),
        pr: record.pr,
        file_path: record.file_path.clone(),
        dedup_ms,
        classify_ms,
        summarize_ms,
        embed_ms,
        insert_ms: 0,
        total_ms: total_started.elapsed().as_millis(),
        outcome: outcome.to_string(),
    });
}
