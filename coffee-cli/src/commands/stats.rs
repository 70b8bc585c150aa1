use std::path::PathBuf;

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use crate::CliError;

use super::open_catalog;

pub(crate) fn run_stats(db_path: Option<PathBuf>) -> Result<(), CliError> {
    let (conn, settings) = open_catalog(db_path)?;

    let stats = coffee_db::catalog_stats(&conn)
        .map_err(|e| CliError::database(format!("Failed to query catalog stats: {}", e)))?;

    log::info!(
        "{}",
        "Catalog Statistics".if_supports_color(Stdout, |t| t.bold()),
    );
    log::info!("  Database: {}", settings.database_path.display());
    crate::log_blank();
    log::info!("  Kinds:       {:>8}", stats.kinds);
    log::info!("  Roastings:   {:>8}", stats.roastings);
    log::info!("  Conditions:  {:>8}", stats.conditions);
    log::info!("  Cups:        {:>8}", stats.cups);

    Ok(())
}
