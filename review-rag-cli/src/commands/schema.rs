use std::path::Path;

use crate::commands::{connect_store, load_settings};
use crate::errors::{CliError, Result};

/// Compares live columns against the declared schema; exits non-zero (via
/// `CliError::SchemaMismatch`) on any divergence (spec §4.8 Validator).
pub async fn run_schema_validate(config_path: &Path) -> Result<()> {
    let (settings, env) = load_settings(config_path)?;
    let store = connect_store(&settings, &env).await?;

    let mismatches = store.validate_schema().await?;
    if mismatches.is_empty() {
        println!("schema validate: live schema matches the declared shape");
        return Ok(());
    }

    for m in &mismatches {
        println!(
            "schema validate: column `{}` declared `{}`, found {}",
            m.column,
            m.declared,
            m.actual.as_deref().unwrap_or("<missing>")
        );
    }
    Err(CliError::SchemaMismatch(mismatches.len()))
}

/// Applies the minimal corrective DDL for every mismatch (spec §4.8 Migrator).
pub async fn run_schema_migrate(config_path: &Path) -> Result<()> {
    let (settings, env) = load_settings(config_path)?;
    let store = connect_store(&settings, &env).await?;

    let mismatches = store.validate_schema().await?;
    if mismatches.is_empty() {
        println!("schema migrate: nothing to do, live schema already matches");
        return Ok(());
    }

    store.migrate_schema(&mismatches).await?;
    println!(
        "schema migrate: applied corrective DDL for {} mismatch(es); run Backfill to repopulate any invalidated embeddings",
        mismatches.len()
    );
    Ok(())
}
