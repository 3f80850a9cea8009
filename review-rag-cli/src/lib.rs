//! Command-line entry point for Review-RAG: one subcommand per stage (spec
//! §6 Command surface). Grounded on `llmspell-cli`'s `Cli`/`Commands`
//! split, with the handler logic kept in `commands` rather than inline in
//! `main`.

mod cli;
mod commands;
mod errors;

pub use cli::{Cli, Commands, DistillCommands, SchemaCommands, TraceLevel};
pub use errors::{CliError, Result};

/// Parses argv and dispatches to the selected stage. Returns the process
/// exit code: `0` on success, non-zero on any fatal error (spec §6).
pub async fn run() -> i32 {
    use clap::Parser;
    let cli = Cli::parse();
    init_tracing(cli.trace);

    match dispatch(&cli).await {
        Ok(()) => 0,
        Err(e) => {
            eprintln!("error: {e}");
            1
        }
    }
}

async fn dispatch(cli: &Cli) -> Result<()> {
    match &cli.command {
        Commands::Collect { repo, pr, all_merged, search_arch_prs, token, out } => {
            commands::run_collect(
                &cli.config,
                repo.clone(),
                *pr,
                *all_merged,
                *search_arch_prs,
                token.clone(),
                out.clone(),
            )
            .await
        }
        Commands::Enrich { record_file, log_dir } => {
            commands::run_enrich(&cli.config, record_file.clone(), log_dir.clone()).await
        }
        Commands::Backfill => commands::run_backfill(&cli.config).await,
        Commands::Distill { strategy } => match strategy {
            DistillCommands::Chunked { out } => commands::run_distill_chunked(&cli.config, out.clone()).await,
            DistillCommands::Clustered { out } => commands::run_distill_clustered(&cli.config, out.clone()).await,
        },
        Commands::Review { diff, guidelines } => {
            commands::run_review(&cli.config, diff.clone(), guidelines.clone()).await
        }
        Commands::Schema { command } => match command {
            SchemaCommands::Validate => commands::run_schema_validate(&cli.config).await,
            SchemaCommands::Migrate => commands::run_schema_migrate(&cli.config).await,
        },
    }
}

/// Initializes the process-wide `tracing` subscriber at the requested
/// trace level, layered with `review-rag-llm`'s library-scoped layer so LLM
/// telemetry renders consistently regardless of which stage is running.
pub fn init_tracing(trace: TraceLevel) {
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;

    let level: tracing::Level = trace.into();
    let fmt_layer = tracing_subscriber::fmt::layer().with_target(true);
    let filter = tracing_subscriber::filter::LevelFilter::from_level(level);

    tracing_subscriber::registry()
        .with(fmt_layer.with_filter(filter))
        .with(review_rag_llm::telemetry::layer())
        .init();
}
