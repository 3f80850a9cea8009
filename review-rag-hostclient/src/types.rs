//! Provider-agnostic data model consumed by the Collect and Review stages.
//!
//! Deliberately slimmer than `mr-reviewer::git_providers::types`: Review-RAG
//! never resolves inline comment positions or parses hunks into typed lines,
//! it only needs raw comment text, the unified diff snippet it was anchored
//! to, and enough PR metadata to group/search by.

use serde::{Deserialize, Serialize};

/// Uniquely identifies a pull/merge request within a repository.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PrId {
    /// `"owner/repo"` on GitHub, `"group/project"` on GitLab.
    pub repo: String,
    pub number: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PullRequest {
    pub number: i64,
    pub title: String,
    pub body: Option<String>,
    pub merged: bool,
    pub web_url: String,
}

/// A single review comment anchored to a file and (optionally) a diff hunk.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ReviewComment {
    pub file_path: String,
    /// Unified-diff snippet the comment was anchored to, when the host
    /// reports one (GitHub's `diff_hunk`, GitLab's discussion `position`).
    pub diff_hunk: Option<String>,
    pub body: String,
    /// Line range the comment is anchored to, when the host reports one
    /// (spec §3 `line_start`/`line_end`).
    #[serde(default)]
    pub line_start: Option<i64>,
    #[serde(default)]
    pub line_end: Option<i64>,
    /// The full upstream comment object, preserved verbatim for audit (spec
    /// §3 `thread_json`).
    #[serde(default)]
    pub raw: serde_json::Value,
}
