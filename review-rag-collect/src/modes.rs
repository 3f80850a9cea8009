//! Collect modes (spec §4.1): `single_pr`, `all_merged`, `keyword_search`.
//! Host/network failures are logged and skip the affected PR; the run
//! continues, since each output line is independently valid.

use review_rag_core::ReviewRecord;
use review_rag_hostclient::HostClient;
use tracing::warn;

use crate::errors::Result;
use crate::relevance::any_keyword_matches;
use crate::writer::RecordWriter;

#[derive(Debug, Clone)]
pub enum Mode {
    SinglePr(i64),
    AllMerged,
    KeywordSearch,
}

/// Runs Collect for `mode`, appending every relevant comment to `writer`.
/// Returns the number of records written.
pub async fn collect(
    client: &HostClient,
    repo: &str,
    mode: Mode,
    keywords: &[String],
    writer: &mut RecordWriter,
) -> Result<usize> {
    let pr_numbers = match mode {
        Mode::SinglePr(n) => vec![n],
        Mode::AllMerged => match client.list_merged_prs(repo).await {
            Ok(prs) => prs.into_iter().map(|p| p.number).collect(),
            Err(e) => {
                warn!(repo, error = %e, "failed to enumerate merged PRs");
                Vec::new()
            }
        },
        // Deduplicates the resulting PR set (HostClient::search_prs already
        // returns a sorted, deduplicated set across OR-grouped queries).
        Mode::KeywordSearch => match client.search_prs(repo, keywords).await {
            Ok(numbers) => numbers,
            Err(e) => {
                warn!(repo, error = %e, "failed to search PRs");
                Vec::new()
            }
        },
    };

    let mut written = 0usize;
    for number in pr_numbers {
        written += collect_one_pr(client, repo, number, keywords, writer).await?;
    }
    Ok(written)
}

async fn collect_one_pr(
    client: &HostClient,
    repo: &str,
    number: i64,
    keywords: &[String],
    writer: &mut RecordWriter,
) -> Result<usize> {
    let pr = match client.get_pr(repo, number).await {
        Ok(pr) => pr,
        Err(e) => {
            warn!(repo, number, error = %e, "failed to fetch PR metadata, skipping");
            return Ok(0);
        }
    };
    let comments = match client.list_review_comments(repo, number).await {
        Ok(c) => c,
        Err(e) => {
            warn!(repo, number, error = %e, "failed to fetch review comments, skipping");
            return Ok(0);
        }
    };

    let pr_text = format!("{} {}", pr.title, pr.body.as_deref().unwrap_or_default());
    let pr_level_match = any_keyword_matches(&pr_text, keywords);

    let mut written = 0usize;
    for comment in comments {
        if !pr_level_match && !any_keyword_matches(&comment.body, keywords) {
            continue;
        }
        let record = ReviewRecord {
            repo: repo.to_string(),
            pr: number,
            file_path: comment.file_path,
            line_start: comment.line_start,
            line_end: comment.line_end,
            diff_context: comment.diff_hunk,
            comment_body: comment.body,
            thread_json: Some(comment.raw),
        };
        writer.append(&record)?;
        written += 1;
    }
    Ok(written)
}
