//! Canonical data model: `ReviewRecord` (append-only staging) and `ArchItem`
//! (store record). See spec §3.

use serde::{Deserialize, Serialize};

/// A single review comment pulled from a code host, before enrichment.
///
/// Identity is the tuple `(repo, pr, file_path, comment_body)`; duplicates
/// are collapsed at ingestion (Enrich), not here.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct ReviewRecord {
    /// Fully qualified repository identifier (`owner/name`).
    pub repo: String,
    /// Pull-request number.
    pub pr: i64,
    /// Path within the repo being reviewed; empty for PR-level comments.
    #[serde(default)]
    pub file_path: String,
    #[serde(default)]
    pub line_start: Option<i64>,
    #[serde(default)]
    pub line_end: Option<i64>,
    #[serde(default)]
    pub diff_context: Option<String>,
    pub comment_body: String,
    /// Opaque payload preserving the full upstream comment object for audit.
    #[serde(default)]
    pub thread_json: Option<serde_json::Value>,
}

impl ReviewRecord {
    /// The identity tuple used for dedup (I1), borrowed to avoid cloning.
    pub fn identity(&self) -> (&str, i64, &str, &str) {
        (&self.repo, self.pr, &self.file_path, &self.comment_body)
    }
}

/// An enriched review comment persisted in the hybrid store.
///
/// `id` is the surrogate key assigned by the store; it is `None` for an
/// `ArchItem` that has not yet been inserted.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct ArchItem {
    #[serde(default)]
    pub id: Option<i64>,
    pub repo: String,
    pub pr: i64,
    pub file_path: String,
    /// Raw reviewer text.
    pub comment: String,
    /// Code context surrounding the comment.
    pub diff: Option<String>,
    /// Subset of the configured controlled vocabulary (I3). Order not significant.
    pub concerns: Vec<String>,
    /// 4-6 sentence distilled rationale produced by the LLM.
    pub arch_summary: String,
    /// Optional supporting quotes; may be empty or absent (spec §9 open question).
    pub evidence: Option<Vec<String>>,
    /// Fixed-dimension embedding of `arch_summary`. `None` only in a
    /// transitional state awaiting Backfill (I4).
    pub embedding: Option<Vec<f32>>,
}

impl ArchItem {
    /// `true` once classification, summary, and embedding are all populated (I2).
    pub fn is_fully_enriched(&self) -> bool {
        !self.concerns.is_empty() || !self.arch_summary.is_empty()
    }

    /// Canonical textual rendering used by Backfill to (re)compute an
    /// embedding from an already-persisted row (spec §4.3).
    pub fn canonical_text(&self) -> String {
        let mut out = String::new();
        out.push_str("repo: ");
        out.push_str(&self.repo);
        out.push_str("\npr: ");
        out.push_str(&self.pr.to_string());
        out.push_str("\nfile: ");
        out.push_str(&self.file_path);
        out.push_str("\ncomment: ");
        out.push_str(&self.comment);
        if let Some(diff) = &self.diff {
            out.push_str("\ndiff: ");
            out.push_str(diff);
        }
        out.push_str("\nsummary: ");
        out.push_str(&self.arch_summary);
        if let Some(evidence) = &self.evidence {
            if !evidence.is_empty() {
                out.push_str("\nevidence: ");
                out.push_str(&evidence.join(" | "));
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_uses_the_four_configured_fields() {
        let r = ReviewRecord {
            repo: "acme/widgets".into(),
            pr: 42,
            file_path: "src/lib.rs".into(),
            line_start: Some(1),
            line_end: Some(2),
            diff_context: None,
            comment_body: "please add a test".into(),
            thread_json: None,
        };
        assert_eq!(
            r.identity(),
            ("acme/widgets", 42, "src/lib.rs", "please add a test")
        );
    }

    #[test]
    fn canonical_text_includes_field_labels() {
        let item = ArchItem {
            id: None,
            repo: "acme/widgets".into(),
            pr: 42,
            file_path: "src/lib.rs".into(),
            comment: "consider extracting this".into(),
            diff: Some("+ fn foo() {}".into()),
            concerns: vec!["extensibility".into()],
            arch_summary: "The reviewer suggests extracting shared logic.".into(),
            evidence: Some(vec!["consider extracting".into()]),
            embedding: None,
        };
        let text = item.canonical_text();
        assert!(text.contains("repo: acme/widgets"));
        assert!(text.contains("summary: The reviewer"));
        assert!(text.contains("evidence: consider extracting"));
    }
}
