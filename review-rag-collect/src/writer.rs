//! Append-only record file writer: one JSON-encoded `ReviewRecord` per
//! line, each independently parseable (spec §4.1). Grounded on
//! `mr-reviewer::review::preq::log`'s plain `std::fs` write helpers, made
//! append-mode and line-oriented instead of one-file-per-artifact.

use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::Path;

use review_rag_core::ReviewRecord;

use crate::errors::Result;

pub struct RecordWriter {
    file: File,
}

impl RecordWriter {
    pub fn open(path: &Path) -> Result<Self> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self { file })
    }

    /// Appends one record as a single JSON line, flushing immediately so a
    /// crash mid-run loses at most the in-flight record.
    pub fn append(&mut self, record: &ReviewRecord) -> Result<()> {
        let line = serde_json::to_string(record)?;
        self.file.write_all(line.as_bytes())?;
        self.file.write_all(b"\n")?;
        self.file.flush()?;
        Ok(())
    }
}
