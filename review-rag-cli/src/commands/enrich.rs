use std::path::{Path, PathBuf};
use std::time::Instant;

use review_rag_core::Vocabulary;

use crate::commands::{build_llm, connect_store, load_settings};
use crate::errors::Result;

pub async fn run_enrich(config_path: &Path, record_file: PathBuf, log_dir: PathBuf) -> Result<()> {
    let started = Instant::now();
    let (settings, env) = load_settings(config_path)?;
    let store = connect_store(&settings, &env).await?;
    let llm = build_llm()?;
    let vocab = Vocabulary::new(settings.architectural_concerns.clone());

    let stats = review_rag_enrich::enrich_file(
        &store,
        &llm,
        &vocab,
        &record_file,
        &log_dir,
        settings.batch.comments_limit as usize,
    )
    .await?;

    println!(
        "enrich: incoming={} deduped_new={} capped={} inserted={} skipped={} in {:.2}s",
        stats.incoming,
        stats.deduped_new,
        stats.capped,
        stats.inserted,
        stats.skipped,
        started.elapsed().as_secs_f64()
    );
    Ok(())
}
