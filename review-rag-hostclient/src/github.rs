//! GitHub REST v3 client (primary host). Grounded on
//! `mr-reviewer::git_providers::gitlab::GitLabClient` — the teacher's own
//! `github.rs` is an unimplemented skeleton (`Err(ProviderError::Unsupported)`
//! on every method), so this is built fresh in GitLab's idiom, translated to
//! the GitHub endpoint surface:
//! - GET /repos/{repo}/pulls/{number}
//! - GET /repos/{repo}/pulls/{number}/comments
//! - GET /repos/{repo}/pulls?state=closed  (paginated, filtered to merged_at.is_some())
//! - GET /search/issues?q=...              (paginated, OR-grouped keyword terms)
//! - GET /repos/{repo}/pulls/{number}       with Accept: application/vnd.github.v3.diff

use reqwest::Client;
use serde::Deserialize;

use crate::errors::{Error, Result};
use crate::types::{PullRequest, ReviewComment};

/// GitHub search accepts a bounded number of qualifiers per query; grouping
/// keywords beyond this would silently drop terms from the match, so search
/// issues queries at most this many OR-joined keywords at a time.
pub const MAX_OR_TERMS_PER_QUERY: usize = 5;

const PER_PAGE: u32 = 100;

#[derive(Debug, Clone)]
pub struct GitHubClient {
    http: Client,
    base_api: String,
    token: String,
}

impl GitHubClient {
    pub fn new(http: Client, base_api: String, token: String) -> Self {
        Self { http, base_api, token }
    }

    fn auth(&self, builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        builder
            .header("Authorization", format!("Bearer {}", self.token))
            .header("User-Agent", "review-rag")
            .header("Accept", "application/vnd.github+json")
            .header("X-GitHub-Api-Version", "2022-11-28")
    }

    /// Fetches PR metadata, including the host-reported merge state.
    pub async fn get_pr(&self, repo: &str, number: i64) -> Result<PullRequest> {
        let url = format!("{}/repos/{}/pulls/{}", self.base_api, repo, number);
        let resp: GhPull = self
            .auth(self.http.get(url))
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        Ok(resp.into_pull_request())
    }

    /// Fetches every review comment left on the PR's diff. Each comment's
    /// raw JSON object is preserved verbatim into `ReviewComment::raw` (spec
    /// §3 `thread_json`).
    pub async fn list_review_comments(&self, repo: &str, number: i64) -> Result<Vec<ReviewComment>> {
        let mut out = Vec::new();
        let mut page = 1u32;
        loop {
            let url = format!(
                "{}/repos/{}/pulls/{}/comments?per_page={PER_PAGE}&page={page}",
                self.base_api, repo, number
            );
            let batch: Vec<serde_json::Value> = self
                .auth(self.http.get(url))
                .send()
                .await?
                .error_for_status()?
                .json()
                .await?;
            let n = batch.len();
            out.extend(batch.into_iter().filter_map(|raw| {
                let parsed: GhReviewComment = serde_json::from_value(raw.clone()).ok()?;
                Some(parsed.into_comment(raw))
            }));
            if n < PER_PAGE as usize {
                break;
            }
            page += 1;
        }
        Ok(out)
    }

    /// Lists every merged PR in `repo` (spec §4.1 `all_merged` mode),
    /// paging through the closed-PR listing and filtering to `merged_at`.
    pub async fn list_merged_prs(&self, repo: &str) -> Result<Vec<PullRequest>> {
        let mut out = Vec::new();
        let mut page = 1u32;
        loop {
            let url = format!(
                "{}/repos/{}/pulls?state=closed&per_page={PER_PAGE}&page={page}&sort=updated&direction=desc",
                self.base_api, repo
            );
            let batch: Vec<GhPull> = self
                .auth(self.http.get(url))
                .send()
                .await?
                .error_for_status()?
                .json()
                .await?;
            let n = batch.len();
            out.extend(batch.into_iter().filter(|p| p.merged_at.is_some()).map(GhPull::into_pull_request));
            if n < PER_PAGE as usize {
                break;
            }
            page += 1;
        }
        Ok(out)
    }

    /// Searches merged PRs matching any of `keywords` (spec §4.1
    /// `keyword_search` mode). Terms are grouped in batches of
    /// [`MAX_OR_TERMS_PER_QUERY`] and the resulting PR numbers deduplicated.
    pub async fn search_prs(&self, repo: &str, keywords: &[String]) -> Result<Vec<i64>> {
        let mut numbers = std::collections::BTreeSet::new();
        for group in keywords.chunks(MAX_OR_TERMS_PER_QUERY) {
            if group.is_empty() {
                continue;
            }
            let terms = group.join(" OR ");
            let q = format!("repo:{repo} type:pr is:merged {terms}");
            let url = format!("{}/search/issues?q={}&per_page={PER_PAGE}", self.base_api, urlencoding::encode(&q));
            let resp: GhSearchResult = self
                .auth(self.http.get(url))
                .send()
                .await?
                .error_for_status()?
                .json()
                .await?;
            numbers.extend(resp.items.into_iter().map(|i| i.number));
        }
        Ok(numbers.into_iter().collect())
    }

    /// Fetches the unified diff for a PR via the `vnd.github.v3.diff` media
    /// type, used by the Review stage's diff resolution (spec §4.7).
    pub async fn fetch_diff(&self, repo: &str, number: i64) -> Result<String> {
        let url = format!("{}/repos/{}/pulls/{}", self.base_api, repo, number);
        let text = self
            .auth(self.http.get(url))
            .header("Accept", "application/vnd.github.v3.diff")
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;
        Ok(text)
    }

    /// Resolves a PR web URL of the form `https://github.com/{owner}/{repo}/pull/{n}`
    /// into its unified diff, for Review's URL-vs-local-path dispatch.
    pub async fn fetch_diff_by_url(&self, url: &str) -> Result<String> {
        let (repo, number) = parse_pr_url(url).ok_or_else(|| Error::UnrecognizedDiffUrl(url.to_string()))?;
        self.fetch_diff(&repo, number).await
    }
}

/// Parses `.../<owner>/<repo>/pull/<number>` out of a PR web URL.
pub fn parse_pr_url(url: &str) -> Option<(String, i64)> {
    let trimmed = url.trim_end_matches('/');
    let parts: Vec<&str> = trimmed.rsplitn(4, '/').collect();
    // rsplitn(4, '/') on ".../owner/repo/pull/123" yields ["123", "pull", "repo", "owner/..."]
    if parts.len() < 4 || parts[1] != "pull" {
        return None;
    }
    let number: i64 = parts[0].parse().ok()?;
    let repo = format!("{}/{}", parts[3].rsplit('/').next()?, parts[2]);
    Some((repo, number))
}

#[derive(Debug, Deserialize)]
struct GhPull {
    number: i64,
    title: String,
    body: Option<String>,
    html_url: String,
    #[serde(default)]
    merged_at: Option<String>,
}

impl GhPull {
    fn into_pull_request(self) -> PullRequest {
        PullRequest {
            number: self.number,
            title: self.title,
            body: self.body,
            merged: self.merged_at.is_some(),
            web_url: self.html_url,
        }
    }
}

#[derive(Debug, Deserialize)]
struct GhReviewComment {
    path: String,
    #[serde(default)]
    diff_hunk: Option<String>,
    body: String,
    /// The line the comment applies to (end of the range for multi-line
    /// comments). `None` for comments left on deleted/outdated lines.
    #[serde(default)]
    line: Option<i64>,
    /// First line of a multi-line comment's range; absent for single-line
    /// comments, in which case `line` covers both ends.
    #[serde(default)]
    start_line: Option<i64>,
}

impl GhReviewComment {
    fn into_comment(self, raw: serde_json::Value) -> ReviewComment {
        ReviewComment {
            file_path: self.path,
            diff_hunk: self.diff_hunk.filter(|s| !s.is_empty()),
            body: self.body,
            line_start: self.start_line.or(self.line),
            line_end: self.line,
            raw,
        }
    }
}

#[derive(Debug, Deserialize)]
struct GhSearchResult {
    items: Vec<GhSearchItem>,
}

#[derive(Debug, Deserialize)]
struct GhSearchItem {
    number: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_pr_url() {
        assert_eq!(
            parse_pr_url("https://github.com/acme/widgets/pull/42"),
            Some(("acme/widgets".to_string(), 42))
        );
        assert_eq!(
            parse_pr_url("https://github.com/acme/widgets/pull/42/"),
            Some(("acme/widgets".to_string(), 42))
        );
    }

    #[test]
    fn rejects_non_pr_urls() {
        assert_eq!(parse_pr_url("https://github.com/acme/widgets/issues/42"), None);
        assert_eq!(parse_pr_url("not a url"), None);
    }
}
