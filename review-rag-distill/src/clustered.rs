//! Clustered distillation strategy (spec §4.5): dimension reconciliation,
//! dynamic cluster-count selection, deterministic k-means, and per-cluster
//! distillation with `cluster_id` tagging.

use std::collections::HashMap;

use review_rag_core::{ArchItem, Guideline};
use review_rag_llm::service_profiles::LlmServiceProfiles;
use review_rag_store::Store;
use tracing::{info, warn};

use crate::errors::Result;
use crate::guideline_io::parse_guidelines;
use crate::kmeans::{choose_k, kmeans};

/// Per-cluster context budget (spec §4.5 step 5: "truncate to the first 40
/// members").
const MAX_MEMBERS_PER_CLUSTER: usize = 40;

/// Fixed seed for k-means determinism (spec §4.5 step 4).
const KMEANS_SEED: u64 = 1337;

const SYSTEM_PROMPT: &str = "\
You distill a cluster of semantically related architectural review \
comments into guidelines. Bind your output to the themes actually present \
in this cluster; merge duplicates. Respond with ONLY a JSON array of \
objects of the shape {\"concern\": string, \"guideline\": string, \
\"rationale\": string, \"examples\": string}.";

pub async fn distill_clustered(store: &Store, llm: &LlmServiceProfiles) -> Result<Vec<Guideline>> {
    let rows = store.fetch_all_with_embeddings().await?;

    let Some(modal_dim) = modal_dimension(&rows) else {
        return Ok(Vec::new());
    };

    let mut dropped = 0usize;
    let reconciled: Vec<ArchItem> = rows
        .into_iter()
        .filter(|r| {
            let keep = r.embedding.as_ref().is_some_and(|e| e.len() == modal_dim);
            if !keep {
                dropped += 1;
            }
            keep
        })
        .collect();
    if dropped > 0 {
        warn!(dropped, modal_dim, "dropped rows with a non-modal embedding dimension");
    }

    let n = reconciled.len();
    if n == 0 {
        return Ok(Vec::new());
    }
    let k = choose_k(n);

    let points: Vec<Vec<f32>> = reconciled.iter().map(|r| r.embedding.clone().unwrap()).collect();
    let assignments = kmeans(&points, k, KMEANS_SEED);

    let mut clusters: HashMap<usize, Vec<&ArchItem>> = HashMap::new();
    for (item, cluster) in reconciled.iter().zip(assignments.iter()) {
        clusters.entry(*cluster).or_default().push(item);
    }

    let mut ordered_clusters: Vec<usize> = clusters.keys().copied().collect();
    ordered_clusters.sort_unstable();

    let mut guidelines = Vec::new();
    for cluster_id in ordered_clusters {
        let members = &clusters[&cluster_id];
        if members.is_empty() {
            continue;
        }
        let truncated = &members[..members.len().min(MAX_MEMBERS_PER_CLUSTER)];
        let prompt = build_prompt(truncated);
        let raw = llm.generate_slow(&prompt, Some(SYSTEM_PROMPT)).await?;
        let mut emitted = parse_guidelines(&raw);
        for g in &mut emitted {
            g.cluster_id = Some(cluster_id as u32);
        }
        info!(cluster_id, members = members.len(), emitted = emitted.len(), "cluster distilled");
        guidelines.append(&mut emitted);
    }

    Ok(guidelines)
}

fn modal_dimension(rows: &[ArchItem]) -> Option<usize> {
    let mut counts: HashMap<usize, usize> = HashMap::new();
    for row in rows {
        if let Some(embedding) = &row.embedding {
            *counts.entry(embedding.len()).or_insert(0) += 1;
        }
    }
    counts.into_iter().max_by_key(|&(_, count)| count).map(|(dim, _)| dim)
}

fn build_prompt(members: &[&ArchItem]) -> String {
    let mut prompt = String::from("Review comments in this cluster:\n\n");
    for item in members {
        prompt.push_str("- concerns: ");
        prompt.push_str(&item.concerns.join(", "));
        prompt.push_str("\n  summary: ");
        prompt.push_str(&item.arch_summary);
        prompt.push('\n');
    }
    prompt
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(embedding: Option<Vec<f32>>) -> ArchItem {
        ArchItem {
            id: Some(1),
            repo: "acme/widgets".into(),
            pr: 1,
            file_path: String::new(),
            comment: String::new(),
            diff: None,
            concerns: vec![],
            arch_summary: String::new(),
            evidence: None,
            embedding,
        }
    }

    #[test]
    fn modal_dimension_picks_the_majority_length() {
        let rows = vec![
            item(Some(vec![0.0; 768])),
            item(Some(vec![0.0; 768])),
            item(Some(vec![0.0; 384])),
        ];
        assert_eq!(modal_dimension(&rows), Some(768));
    }
}
