//! Backfill (spec §4.3): for every `ArchItem` with a null embedding,
//! compute one from the row's canonical textual rendering and update in
//! place. Idempotent by I5 (the store never overwrites a non-null
//! embedding).

use review_rag_llm::service_profiles::LlmServiceProfiles;
use review_rag_store::Store;
use tracing::warn;

use crate::errors::Result;

#[derive(Debug, Default)]
pub struct BackfillStats {
    pub candidates: usize,
    pub updated: usize,
    pub skipped: usize,
}

pub async fn backfill(store: &Store, llm: &LlmServiceProfiles) -> Result<BackfillStats> {
    let rows = store.fetch_null_embeddings().await?;
    let mut stats = BackfillStats {
        candidates: rows.len(),
        ..Default::default()
    };

    for row in rows {
        let id = match row.id {
            Some(id) => id,
            None => continue,
        };
        let text = row.canonical_text();
        match llm.embed(&text).await {
            Ok(embedding) => match store.update_embedding_if_null(id, &embedding).await? {
                true => stats.updated += 1,
                false => stats.skipped += 1,
            },
            Err(e) => {
                warn!(id, error = %e, "backfill embedding failed, skipping row");
                stats.skipped += 1;
            }
        }
    }

    Ok(stats)
}
