//! Command-line surface (spec §6 Command surface): one subcommand per
//! stage, plus `schema validate`/`schema migrate`. Grounded on
//! `llmspell-cli::cli::Cli`'s global-flags + `Subcommand` structure, scaled
//! down to Review-RAG's five stages.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

/// Trace level for the process-wide `tracing` subscriber.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum TraceLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<TraceLevel> for tracing::Level {
    fn from(level: TraceLevel) -> Self {
        match level {
            TraceLevel::Error => tracing::Level::ERROR,
            TraceLevel::Warn => tracing::Level::WARN,
            TraceLevel::Info => tracing::Level::INFO,
            TraceLevel::Debug => tracing::Level::DEBUG,
            TraceLevel::Trace => tracing::Level::TRACE,
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "review-rag")]
#[command(version)]
#[command(about = "Distill historical code-review comments into architectural guidelines, and apply them to new diffs.")]
#[command(propagate_version = true)]
pub struct Cli {
    /// Declarative YAML configuration file (spec §6 Configuration).
    #[arg(short = 'c', long, global = true, env = "REVIEW_RAG_CONFIG")]
    pub config: PathBuf,

    /// Trace level for stderr logging.
    #[arg(long, global = true, value_enum, default_value = "info")]
    pub trace: TraceLevel,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Pull review comments from a code host and append relevant ones to a record file (spec §4.1).
    Collect {
        /// Fully qualified repository identifier (`owner/name`).
        #[arg(long)]
        repo: String,

        /// Collect a single PR by number.
        #[arg(long, conflicts_with_all = ["all_merged", "search_arch_prs"])]
        pr: Option<i64>,

        /// Enumerate every merged PR.
        #[arg(long, conflicts_with_all = ["pr", "search_arch_prs"])]
        all_merged: bool,

        /// Search merged PRs by the configured architectural keyword vocabulary.
        #[arg(long, conflicts_with_all = ["pr", "all_merged"])]
        search_arch_prs: bool,

        /// Code-host access token (falls back to `REVIEW_RAG_HOST_TOKEN`).
        #[arg(long)]
        token: Option<String>,

        /// Record file to append to.
        #[arg(long, default_value = "records.ndjson")]
        out: PathBuf,
    },

    /// Dedup, reduce, classify, summarize, embed, and persist a record file (spec §4.2).
    Enrich {
        /// Record file written by `collect`.
        record_file: PathBuf,

        /// Directory for the per-record timing log.
        #[arg(long, default_value = ".")]
        log_dir: PathBuf,
    },

    /// Repair `ArchItem`s with a null embedding (spec §4.3).
    Backfill,

    /// Synthesize a guideline corpus from the store (spec §4.4/§4.5).
    Distill {
        #[command(subcommand)]
        strategy: DistillCommands,
    },

    /// Apply the guideline corpus to a new diff and print a Markdown review (spec §4.7).
    Review {
        /// Pull-request URL or local diff file path.
        diff: String,

        /// Guideline corpus file produced by `distill`.
        #[arg(long, default_value = "guidelines.json")]
        guidelines: PathBuf,
    },

    /// Schema validation and migration (spec §4.8).
    Schema {
        #[command(subcommand)]
        command: SchemaCommands,
    },
}

#[derive(Subcommand, Debug)]
pub enum DistillCommands {
    /// Fixed-size chunking with no cross-chunk dedup.
    Chunked {
        /// Output guideline file.
        #[arg(long, default_value = "guidelines.json")]
        out: PathBuf,
    },
    /// Embedding-clustering with dynamic cluster sizing and dimension reconciliation.
    Clustered {
        /// Output guideline file.
        #[arg(long, default_value = "guidelines.json")]
        out: PathBuf,
    },
}

#[derive(Subcommand, Debug)]
pub enum SchemaCommands {
    /// Compare live column types against the declared schema; exits non-zero on any divergence.
    Validate,
    /// Apply minimal corrective DDL for every mismatch reported by `validate`.
    Migrate,
}
