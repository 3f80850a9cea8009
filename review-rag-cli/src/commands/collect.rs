use std::path::{Path, PathBuf};
use std::time::Instant;

use review_rag_collect::{Mode, RecordWriter};

use crate::commands::{build_host, load_settings};
use crate::errors::{CliError, Result};

#[allow(clippy::too_many_arguments)]
pub async fn run_collect(
    config_path: &Path,
    repo: String,
    pr: Option<i64>,
    all_merged: bool,
    search_arch_prs: bool,
    token: Option<String>,
    out: PathBuf,
) -> Result<()> {
    let started = Instant::now();
    let (settings, env) = load_settings(config_path)?;
    let client = build_host(&env, token)?;

    let mode = match (pr, all_merged, search_arch_prs) {
        (Some(n), false, false) => Mode::SinglePr(n),
        (None, true, false) => Mode::AllMerged,
        (None, false, true) => Mode::KeywordSearch,
        _ => return Err(CliError::MissingArg("--pr | --all-merged | --search-arch-prs")),
    };

    let keywords = settings.all_keywords_lowercase();
    let mut writer = RecordWriter::open(&out)?;
    let written = review_rag_collect::collect(&client, &repo, mode, &keywords, &mut writer).await?;

    println!(
        "collect: {written} record(s) written to {} in {:.2}s",
        out.display(),
        started.elapsed().as_secs_f64()
    );
    Ok(())
}
