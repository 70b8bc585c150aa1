use std::path::PathBuf;

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use crate::CliError;

use super::load_settings;

/// Create the catalog database, seeding it when configured to.
pub(crate) fn run_init(db_path: Option<PathBuf>) -> Result<(), CliError> {
    let settings = load_settings(db_path);
    let existed = settings.database_path.exists();
    let conn = coffee_lib::open_store(&settings)?;

    let settings_path = coffee_lib::settings::settings_path();
    if !settings_path.exists() {
        match coffee_lib::settings::save_settings(&settings) {
            Ok(()) => log::info!("Wrote default settings to {}", settings_path.display()),
            Err(e) => log::warn!("Failed to write {}: {}", settings_path.display(), e),
        }
    }

    if existed {
        log::info!(
            "Catalog already exists at {}",
            settings.database_path.display()
        );
        return Ok(());
    }

    let stats = coffee_db::catalog_stats(&conn)
        .map_err(|e| CliError::database(format!("Failed to query catalog stats: {}", e)))?;
    log::info!(
        "{}",
        "Catalog created.".if_supports_color(Stdout, |t| t.bold()),
    );
    log::info!("  Path: {}", settings.database_path.display());
    log::info!(
        "  Categories: {} kinds, {} roastings, {} conditions",
        stats.kinds,
        stats.roastings,
        stats.conditions,
    );
    if stats.kinds + stats.roastings + stats.conditions == 0 {
        crate::log_blank();
        log::info!("Run 'coffee seed' or 'coffee categories add' to add categories.");
    }
    Ok(())
}
