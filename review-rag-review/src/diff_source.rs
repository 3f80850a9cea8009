//! Input resolution (spec §4.7): a PR URL is fetched from the host via the
//! diff-content accept header; anything else is read as a local file.
//! Both failure modes are fatal to the invocation.

use review_rag_hostclient::HostClient;
use review_rag_hostclient::github::parse_pr_url;

use crate::errors::{ReviewError, Result};

pub async fn resolve_diff(client: Option<&HostClient>, arg: &str) -> Result<String> {
    if parse_pr_url(arg).is_some() {
        let client = client.ok_or_else(|| {
            ReviewError::FileNotFound(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                "a PR URL was given but no host client is configured",
            ))
        })?;
        return Ok(client.fetch_diff_by_url(arg).await?);
    }
    std::fs::read_to_string(arg).map_err(ReviewError::FileNotFound)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn reads_a_local_file_when_not_a_pr_url() {
        let dir = std::env::temp_dir().join(format!("review-rag-test-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("sample.diff");
        std::fs::write(&path, "diff --git a/x b/x\n").unwrap();

        let diff = resolve_diff(None, path.to_str().unwrap()).await.unwrap();
        assert!(diff.starts_with("diff --git"));

        std::fs::remove_file(&path).ok();
    }

    #[tokio::test]
    async fn missing_file_is_a_fatal_error() {
        let result = resolve_diff(None, "/no/such/path.diff").await;
        assert!(result.is_err());
    }
}
