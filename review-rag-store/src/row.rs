//! Row mapping between the SQL `arch_items` shape (spec §6) and
//! `review_rag_core::ArchItem`.

use pgvector::Vector;
use review_rag_core::ArchItem;
use sqlx::FromRow;

#[derive(Debug, FromRow)]
pub(crate) struct ArchItemRow {
    pub id: i64,
    pub repo: String,
    pub pr: i64,
    pub filepath: String,
    pub comment: String,
    pub diff: Option<String>,
    pub concerns: serde_json::Value,
    pub arch_summary: String,
    pub evidence: Option<String>,
    pub embedding: Option<Vector>,
}

impl From<ArchItemRow> for ArchItem {
    fn from(row: ArchItemRow) -> Self {
        let concerns = match row.concerns {
            serde_json::Value::Array(items) => items
                .into_iter()
                .filter_map(|v| v.as_str().map(str::to_string))
                .collect(),
            _ => Vec::new(),
        };
        let evidence = row
            .evidence
            .and_then(|raw| serde_json::from_str::<Vec<String>>(&raw).ok());

        ArchItem {
            id: Some(row.id),
            repo: row.repo,
            pr: row.pr,
            file_path: row.filepath,
            comment: row.comment,
            diff: row.diff,
            concerns,
            arch_summary: row.arch_summary,
            evidence,
            embedding: row.embedding.map(|v| v.to_vec()),
        }
    }
}

pub(crate) fn evidence_to_text(evidence: &Option<Vec<String>>) -> Option<String> {
    evidence
        .as_ref()
        .map(|e| serde_json::to_string(e).unwrap_or_default())
}

pub(crate) fn concerns_to_json(concerns: &[String]) -> serde_json::Value {
    serde_json::Value::Array(concerns.iter().cloned().map(serde_json::Value::String).collect())
}
