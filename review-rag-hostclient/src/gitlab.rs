//! GitLab REST v4 client, kept for host parity. Ported from
//! `mr-reviewer::git_providers::gitlab::GitLabClient`, trimmed to the
//! metadata/comments/search/diff surface Collect and Review actually need
//! (no hunk-level diff parsing: Review-RAG stores raw unified diff text).

use reqwest::Client;
use serde::Deserialize;

use crate::errors::Result;
use crate::types::{PullRequest, ReviewComment};

const PER_PAGE: u32 = 100;

#[derive(Debug, Clone)]
pub struct GitLabClient {
    http: Client,
    base_api: String,
    token: String,
}

impl GitLabClient {
    pub fn new(http: Client, base_api: String, token: String) -> Self {
        Self { http, base_api, token }
    }

    fn auth(&self, builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        builder.header("PRIVATE-TOKEN", &self.token)
    }

    pub async fn get_pr(&self, project: &str, iid: i64) -> Result<PullRequest> {
        let url = format!(
            "{}/projects/{}/merge_requests/{}",
            self.base_api,
            urlencoding::encode(project),
            iid
        );
        let resp: GlMr = self
            .auth(self.http.get(url))
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        Ok(resp.into_pull_request())
    }

    pub async fn list_review_comments(&self, project: &str, iid: i64) -> Result<Vec<ReviewComment>> {
        let url = format!(
            "{}/projects/{}/merge_requests/{}/discussions?per_page={PER_PAGE}",
            self.base_api,
            urlencoding::encode(project),
            iid
        );
        let discussions: Vec<serde_json::Value> = self
            .auth(self.http.get(url))
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        let notes: Vec<serde_json::Value> = discussions
            .into_iter()
            .flat_map(|d| match d.get("notes").cloned() {
                Some(serde_json::Value::Array(notes)) => notes,
                _ => Vec::new(),
            })
            .collect();
        Ok(notes
            .into_iter()
            .filter_map(|raw| {
                let parsed: GlNote = serde_json::from_value(raw.clone()).ok()?;
                if parsed.system {
                    return None;
                }
                Some(parsed.into_comment(raw))
            })
            .collect())
    }

    pub async fn list_merged_prs(&self, project: &str) -> Result<Vec<PullRequest>> {
        let mut out = Vec::new();
        let mut page = 1u32;
        loop {
            let url = format!(
                "{}/projects/{}/merge_requests?state=merged&per_page={PER_PAGE}&page={page}",
                self.base_api,
                urlencoding::encode(project)
            );
            let batch: Vec<GlMr> = self
                .auth(self.http.get(url))
                .send()
                .await?
                .error_for_status()?
                .json()
                .await?;
            let n = batch.len();
            out.extend(batch.into_iter().map(GlMr::into_pull_request));
            if n < PER_PAGE as usize {
                break;
            }
            page += 1;
        }
        Ok(out)
    }

    pub async fn search_prs(&self, project: &str, keywords: &[String]) -> Result<Vec<i64>> {
        let mut numbers = std::collections::BTreeSet::new();
        for term in keywords {
            let url = format!(
                "{}/projects/{}/merge_requests?state=merged&search={}&per_page={PER_PAGE}",
                self.base_api,
                urlencoding::encode(project),
                urlencoding::encode(term)
            );
            let batch: Vec<GlMr> = self
                .auth(self.http.get(url))
                .send()
                .await?
                .error_for_status()?
                .json()
                .await?;
            numbers.extend(batch.into_iter().map(|m| m.iid));
        }
        Ok(numbers.into_iter().collect())
    }

    pub async fn fetch_diff(&self, project: &str, iid: i64) -> Result<String> {
        let url = format!(
            "{}/projects/{}/merge_requests/{}/raw_diffs",
            self.base_api,
            urlencoding::encode(project),
            iid
        );
        let text = self.auth(self.http.get(url)).send().await?.error_for_status()?.text().await?;
        Ok(text)
    }
}

#[derive(Debug, Deserialize)]
struct GlMr {
    iid: i64,
    title: String,
    description: Option<String>,
    web_url: String,
    state: String,
}

impl GlMr {
    fn into_pull_request(self) -> PullRequest {
        PullRequest {
            number: self.iid,
            title: self.title,
            body: self.description,
            merged: self.state == "merged",
            web_url: self.web_url,
        }
    }
}

#[derive(Debug, Deserialize)]
struct GlNote {
    body: String,
    system: bool,
    #[serde(default)]
    position: Option<GlPosition>,
}

impl GlNote {
    fn into_comment(self, raw: serde_json::Value) -> ReviewComment {
        let file_path = self
            .position
            .as_ref()
            .and_then(|p| p.new_path.clone().or_else(|| p.old_path.clone()))
            .unwrap_or_default();
        let line = self.position.as_ref().and_then(|p| p.new_line.or(p.old_line));
        ReviewComment {
            file_path,
            diff_hunk: None,
            body: self.body,
            line_start: line,
            line_end: line,
            raw,
        }
    }
}

#[derive(Debug, Deserialize)]
struct GlPosition {
    #[serde(default)]
    new_path: Option<String>,
    #[serde(default)]
    old_path: Option<String>,
    #[serde(default)]
    new_line: Option<i64>,
    #[serde(default)]
    old_line: Option<i64>,
}
