use std::path::{Path, PathBuf};

use crate::commands::{build_host, build_llm, load_settings};
use crate::errors::Result;

pub async fn run_review(config_path: &Path, diff: String, guidelines: PathBuf) -> Result<()> {
    let (_settings, env) = load_settings(config_path)?;
    let llm = build_llm()?;
    let host = build_host(&env, None)?;

    let markdown = review_rag_review::review(&llm, Some(&host), &guidelines, &diff).await?;
    println!("{markdown}");
    Ok(())
}
