use std::path::Path;
use std::time::Instant;

use crate::commands::{build_llm, connect_store, load_settings};
use crate::errors::Result;

pub async fn run_backfill(config_path: &Path) -> Result<()> {
    let started = Instant::now();
    let (settings, env) = load_settings(config_path)?;
    let store = connect_store(&settings, &env).await?;
    let llm = build_llm()?;

    let stats = review_rag_enrich::backfill(&store, &llm).await?;

    println!(
        "backfill: candidates={} updated={} skipped={} in {:.2}s",
        stats.candidates,
        stats.updated,
        stats.skipped,
        started.elapsed().as_secs_f64()
    );
    Ok(())
}
