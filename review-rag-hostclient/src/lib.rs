//! Code host clients for the Collect and Review stages.
//!
//! Grounded on `mr-reviewer::git_providers` — an enum-dispatch facade over
//! concrete per-provider clients (no `async_trait`, no boxed futures).
//! GitHub is primary (spec §9 resolves the host choice in its favor); GitLab
//! is kept for parity since the original pack ships a complete client for it.

mod errors;
pub mod github;
pub mod gitlab;
pub mod types;

pub use errors::{Error, HostError, Result};
pub use github::GitHubClient;
pub use gitlab::GitLabClient;
pub use types::{PrId, PullRequest, ReviewComment};

use std::time::Duration;

/// Which host `HostClient` talks to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostKind {
    GitHub,
    GitLab,
}

/// Runtime configuration for a host client: base API URL and auth token.
#[derive(Debug, Clone)]
pub struct HostConfig {
    pub kind: HostKind,
    pub base_api: String,
    pub token: String,
    pub timeout_secs: u64,
}

/// Enum-dispatch facade so callers (Collect, Review) stay host-agnostic.
#[derive(Debug, Clone)]
pub enum HostClient {
    GitHub(GitHubClient),
    GitLab(GitLabClient),
}

impl HostClient {
    pub fn from_config(cfg: HostConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .user_agent("review-rag")
            .timeout(Duration::from_secs(cfg.timeout_secs))
            .build()
            .map_err(Error::from)?;
        Ok(match cfg.kind {
            HostKind::GitHub => Self::GitHub(GitHubClient::new(http, cfg.base_api, cfg.token)),
            HostKind::GitLab => Self::GitLab(GitLabClient::new(http, cfg.base_api, cfg.token)),
        })
    }

    pub async fn get_pr(&self, repo: &str, number: i64) -> Result<PullRequest> {
        match self {
            Self::GitHub(c) => c.get_pr(repo, number).await,
            Self::GitLab(c) => c.get_pr(repo, number).await,
        }
    }

    pub async fn list_review_comments(&self, repo: &str, number: i64) -> Result<Vec<ReviewComment>> {
        match self {
            Self::GitHub(c) => c.list_review_comments(repo, number).await,
            Self::GitLab(c) => c.list_review_comments(repo, number).await,
        }
    }

    pub async fn list_merged_prs(&self, repo: &str) -> Result<Vec<PullRequest>> {
        match self {
            Self::GitHub(c) => c.list_merged_prs(repo).await,
            Self::GitLab(c) => c.list_merged_prs(repo).await,
        }
    }

    pub async fn search_prs(&self, repo: &str, keywords: &[String]) -> Result<Vec<i64>> {
        match self {
            Self::GitHub(c) => c.search_prs(repo, keywords).await,
            Self::GitLab(c) => c.search_prs(repo, keywords).await,
        }
    }

    /// Fetches the unified diff for a PR/MR by repo + number.
    pub async fn fetch_diff(&self, repo: &str, number: i64) -> Result<String> {
        match self {
            Self::GitHub(c) => c.fetch_diff(repo, number).await,
            Self::GitLab(c) => c.fetch_diff(repo, number).await,
        }
    }

    /// Resolves a PR web URL (Review's URL-vs-local-path dispatch, spec
    /// §4.7); only implemented for GitHub since that's the host the Review
    /// stage's URL pattern targets.
    pub async fn fetch_diff_by_url(&self, url: &str) -> Result<String> {
        match self {
            Self::GitHub(c) => c.fetch_diff_by_url(url).await,
            Self::GitLab(_) => Err(Error::UnrecognizedDiffUrl(url.to_string())),
        }
    }
}
