//! Opening the catalog store, with first-run seeding.

use std::path::Path;

use coffee_catalog::CategorySeeds;
use coffee_db::{OperationError, SchemaError, SeedStats};
use rusqlite::Connection;
use thiserror::Error;

use crate::settings::AppSettings;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Failed to open catalog database: {0}")]
    Schema(#[from] SchemaError),
    #[error("Failed to seed catalog database: {0}")]
    Seed(#[from] OperationError),
}

/// Open the store configured in `settings`.
pub fn open_store(settings: &AppSettings) -> Result<Connection, StoreError> {
    let seed_dir = settings
        .seed_on_first_run
        .then_some(settings.catalog_dir.as_path());
    open_store_at(&settings.database_path, seed_dir)
}

/// Open or create the store at `path`.
///
/// A missing file is a first run, not an error: the schema is created and,
/// if `seed_dir` is given, categories are seeded from it. A first run that
/// fails leaves no file behind, so the next open is a first run again.
pub fn open_store_at(path: &Path, seed_dir: Option<&Path>) -> Result<Connection, StoreError> {
    if path.exists() {
        return Ok(coffee_db::open_database(path)?);
    }

    // Parse seeds before anything touches the disk.
    let seeds = match seed_dir {
        Some(dir) => Some(coffee_catalog::load_seeds(dir).map_err(OperationError::from)?),
        None => None,
    };

    let result = create_store(path, seeds.as_ref());
    if result.is_err() {
        remove_store_files(path);
    }
    let (conn, stats) = result?;

    log::info!("No catalog found, created {}", path.display());
    if let (Some(stats), Some(dir)) = (stats, seed_dir) {
        log::info!(
            "Seeded {} kinds, {} roastings, {} conditions from {}",
            stats.kinds,
            stats.roastings,
            stats.conditions,
            dir.display()
        );
    }
    Ok(conn)
}

/// Create the schema and seed it in one transaction.
fn create_store(
    path: &Path,
    seeds: Option<&CategorySeeds>,
) -> Result<(Connection, Option<SeedStats>), StoreError> {
    let conn = coffee_db::open_database(path)?;
    let Some(seeds) = seeds else {
        return Ok((conn, None));
    };
    let tx = conn.unchecked_transaction().map_err(OperationError::from)?;
    let stats = coffee_db::seed_categories(&tx, seeds)?;
    tx.commit().map_err(OperationError::from)?;
    Ok((conn, Some(stats)))
}

/// Best-effort removal of a half-created store and its SQLite side files.
fn remove_store_files(path: &Path) {
    for suffix in ["", "-wal", "-shm", "-journal"] {
        let mut name = path.as_os_str().to_os_string();
        name.push(suffix);
        let file = Path::new(&name);
        if file.exists()
            && let Err(e) = std::fs::remove_file(file)
        {
            log::warn!("Failed to remove {}: {}", file.display(), e);
        }
    }
}
