use std::path::{Path, PathBuf};
use std::time::Instant;

use crate::commands::{build_llm, connect_store, load_settings};
use crate::errors::Result;

pub async fn run_distill_chunked(config_path: &Path, out: PathBuf) -> Result<()> {
    let started = Instant::now();
    let (settings, env) = load_settings(config_path)?;
    let store = connect_store(&settings, &env).await?;
    let llm = build_llm()?;

    let guidelines = review_rag_distill::distill_chunked(&store, &llm, settings.distill_chunk_size).await?;
    let count = guidelines.len();
    review_rag_distill::write_guidelines(&out, &guidelines)?;

    println!(
        "distill chunked: {count} guideline(s) written to {} in {:.2}s",
        out.display(),
        started.elapsed().as_secs_f64()
    );
    Ok(())
}

pub async fn run_distill_clustered(config_path: &Path, out: PathBuf) -> Result<()> {
    let started = Instant::now();
    let (settings, env) = load_settings(config_path)?;
    let store = connect_store(&settings, &env).await?;
    let llm = build_llm()?;

    let guidelines = review_rag_distill::distill_clustered(&store, &llm).await?;
    let count = guidelines.len();
    review_rag_distill::write_guidelines(&out, &guidelines)?;

    println!(
        "distill clustered: {count} guideline(s) written to {} in {:.2}s",
        out.display(),
        started.elapsed().as_secs_f64()
    );
    Ok(())
}
