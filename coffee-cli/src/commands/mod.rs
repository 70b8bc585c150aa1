pub(crate) mod categories;
pub(crate) mod init;
pub(crate) mod search;
pub(crate) mod seed;
pub(crate) mod stats;

use std::path::PathBuf;

use coffee_lib::AppSettings;
use rusqlite::Connection;

use crate::CliError;

/// Load settings, applying a `--db` override.
pub(crate) fn load_settings(db_path: Option<PathBuf>) -> AppSettings {
    let mut settings = coffee_lib::settings::load_settings();
    if let Some(path) = db_path {
        settings.database_path = path;
    }
    settings
}

/// Open (or create) the catalog database.
pub(crate) fn open_catalog(db_path: Option<PathBuf>) -> Result<(Connection, AppSettings), CliError> {
    let settings = load_settings(db_path);
    let conn = coffee_lib::open_store(&settings)?;
    Ok((conn, settings))
}

/// Truncate a string to a maximum width in characters, appending "..." if needed.
pub(crate) fn truncate_str(s: &str, max: usize) -> String {
    let count = s.chars().count();
    if count <= max {
        s.to_string()
    } else if max > 3 {
        format!("{}...", s.chars().take(max - 3).collect::<String>())
    } else {
        s.chars().take(max).collect()
    }
}
