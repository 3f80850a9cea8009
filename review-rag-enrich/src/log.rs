//! Per-record timing log (spec §4.2: "Detailed per-record timings ...
//! written to a timestamped log file"). Grounded on
//! `mr-reviewer::review::preq::log::write_json`'s posture: a best-effort
//! write, a `warn!` on failure, never an error that aborts the stage.

use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::Utc;
use serde::Serialize;
use tracing::warn;

#[derive(Debug, Serialize)]
pub struct RecordTiming {
    pub repo: String,
    pub pr: i64,
    pub file_path: String,
    pub dedup_ms: u128,
    pub classify_ms: u128,
    pub summarize_ms: u128,
    pub embed_ms: u128,
    pub insert_ms: u128,
    pub total_ms: u128,
    pub outcome: String,
}

pub struct TimingLog {
    file: File,
}

impl TimingLog {
    /// Opens a new timestamped log file under `dir`.
    pub fn open(dir: &Path) -> std::io::Result<Self> {
        std::fs::create_dir_all(dir)?;
        let name = format!("enrich-{}.log", Utc::now().format("%Y%m%dT%H%M%SZ"));
        let path: PathBuf = dir.join(name);
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self { file })
    }

    pub fn record(&mut self, timing: &RecordTiming) {
        match serde_json::to_string(timing) {
            Ok(line) => {
                if let Err(e) = writeln!(self.file, "{line}") {
                    warn!(error = %e, "failed to write enrich timing log line");
                }
            }
            Err(e) => warn!(error = %e, "failed to serialize enrich timing entry"),
        }
    }
}
