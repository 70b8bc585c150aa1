use std::path::PathBuf;

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use crate::CliError;

use super::open_catalog;

/// Load category names from `categories.yaml`. Existing names are kept.
pub(crate) fn run_seed(
    db_path: Option<PathBuf>,
    catalog_dir: Option<PathBuf>,
) -> Result<(), CliError> {
    let (conn, settings) = open_catalog(db_path)?;
    let dir = catalog_dir.unwrap_or(settings.catalog_dir);

    let stats = coffee_db::seed_from_catalog(&conn, &dir)
        .map_err(|e| CliError::database(format!("Failed to seed from {}: {}", dir.display(), e)))?;

    log::info!(
        "{}",
        "Seeding complete.".if_supports_color(Stdout, |t| t.bold()),
    );
    log::info!("  Source:      {}", dir.display());
    log::info!("  Kinds:       {:>6}", stats.kinds);
    log::info!("  Roastings:   {:>6}", stats.roastings);
    log::info!("  Conditions:  {:>6}", stats.conditions);
    log::info!("  Unchanged:   {:>6}", stats.existing);
    if stats.created() == 0 && stats.existing == 0 {
        log::warn!("No category names found in {}", dir.display());
    }
    Ok(())
}
