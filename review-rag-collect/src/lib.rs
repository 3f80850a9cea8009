//! Collect stage (spec §4.1): pulls review comments from a code host,
//! keyword-filters for architectural relevance, and appends surviving
//! records to the append-only record file.

mod errors;
mod modes;
mod relevance;
mod writer;

pub use errors::{CollectError, Result};
pub use modes::{Mode, collect};
pub use relevance::any_keyword_matches;
pub use writer::RecordWriter;
