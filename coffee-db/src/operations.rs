//! CRUD operations for categories and cups.

use coffee_catalog::{Category, CategoryKind, CategorySeeds, CupFields};
use rusqlite::{params, Connection};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum OperationError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("Catalog data error: {0}")]
    Catalog(#[from] coffee_catalog::YamlError),
    #[error("Entity not found: {entity_type} with id '{id}'")]
    NotFound { entity_type: String, id: String },
    #[error("Category name must not be blank")]
    BlankCategoryName,
}

/// Resolves category names to rows.
///
/// This is the only store access cell validation needs, so it can run
/// against any implementation.
pub trait CategoryLookup {
    /// Find the category of `kind` whose name is exactly `name`.
    fn find_category(
        &self,
        kind: CategoryKind,
        name: &str,
    ) -> Result<Option<Category>, OperationError>;
}

impl CategoryLookup for Connection {
    fn find_category(
        &self,
        kind: CategoryKind,
        name: &str,
    ) -> Result<Option<Category>, OperationError> {
        find_category_by_name(self, kind, name)
    }
}

// ── Category Operations ─────────────────────────────────────────────────────

/// Insert a new category. Returns the generated ID.
///
/// Fails with a constraint error if the name already exists.
pub fn insert_category(
    conn: &Connection,
    kind: CategoryKind,
    name: &str,
) -> Result<i64, OperationError> {
    if name.trim().is_empty() {
        return Err(OperationError::BlankCategoryName);
    }
    conn.execute(
        &format!("INSERT INTO {} (name) VALUES (?1)", kind.as_str()),
        params![name],
    )?;
    Ok(conn.last_insert_rowid())
}

/// Insert a category unless one with the same name exists.
/// Returns true if a row was created.
pub fn ensure_category(
    conn: &Connection,
    kind: CategoryKind,
    name: &str,
) -> Result<bool, OperationError> {
    if name.trim().is_empty() {
        return Err(OperationError::BlankCategoryName);
    }
    let changed = conn.execute(
        &format!("INSERT OR IGNORE INTO {} (name) VALUES (?1)", kind.as_str()),
        params![name],
    )?;
    Ok(changed > 0)
}

/// Find a category by name (exact match).
pub fn find_category_by_name(
    conn: &Connection,
    kind: CategoryKind,
    name: &str,
) -> Result<Option<Category>, OperationError> {
    let mut stmt = conn.prepare(&format!(
        "SELECT id, name FROM {} WHERE name = ?1 LIMIT 1",
        kind.as_str()
    ))?;
    let result = stmt.query_row(params![name], |row| {
        Ok(Category {
            id: row.get(0)?,
            name: row.get(1)?,
        })
    });
    match result {
        Ok(c) => Ok(Some(c)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

// ── Cup Operations ──────────────────────────────────────────────────────────

/// Insert a new cup. Returns the generated ID.
pub fn insert_cup(conn: &Connection, cup: &CupFields) -> Result<i64, OperationError> {
    conn.execute(
        "INSERT INTO coffee_cup (kind_id, roasting_id, condition_id, taste_description, price, size)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        params![
            cup.kind_id,
            cup.roasting_id,
            cup.condition_id,
            cup.taste_description,
            cup.price,
            cup.size,
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

/// Overwrite every writable column of an existing cup.
pub fn update_cup(conn: &Connection, id: i64, cup: &CupFields) -> Result<(), OperationError> {
    let changed = conn.execute(
        "UPDATE coffee_cup SET
             kind_id = ?2,
             roasting_id = ?3,
             condition_id = ?4,
             taste_description = ?5,
             price = ?6,
             size = ?7
         WHERE id = ?1",
        params![
            id,
            cup.kind_id,
            cup.roasting_id,
            cup.condition_id,
            cup.taste_description,
            cup.price,
            cup.size,
        ],
    )?;
    if changed == 0 {
        return Err(OperationError::NotFound {
            entity_type: "coffee_cup".to_string(),
            id: id.to_string(),
        });
    }
    Ok(())
}

// ── Seed Loading ────────────────────────────────────────────────────────────

/// Insert seed category names, normalized the way cell edits are.
///
/// Safe to call repeatedly: existing names are left alone.
pub fn seed_categories(
    conn: &Connection,
    seeds: &CategorySeeds,
) -> Result<SeedStats, OperationError> {
    let mut stats = SeedStats::default();
    for kind in CategoryKind::ALL {
        for name in seeds.normalized(kind) {
            if ensure_category(conn, kind, &name)? {
                *stats.slot(kind) += 1;
            } else {
                stats.existing += 1;
            }
        }
    }
    Ok(stats)
}

/// Load `categories.yaml` from a catalog directory into the database.
pub fn seed_from_catalog(
    conn: &Connection,
    catalog_dir: &std::path::Path,
) -> Result<SeedStats, OperationError> {
    let seeds = coffee_catalog::load_seeds(catalog_dir)?;
    seed_categories(conn, &seeds)
}

/// Statistics from seeding the database.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct SeedStats {
    pub kinds: usize,
    pub roastings: usize,
    pub conditions: usize,
    /// Names that were already present.
    pub existing: usize,
}

impl SeedStats {
    pub fn created(&self) -> usize {
        self.kinds + self.roastings + self.conditions
    }

    fn slot(&mut self, kind: CategoryKind) -> &mut usize {
        match kind {
            CategoryKind::Kind => &mut self.kinds,
            CategoryKind::Roasting => &mut self.roastings,
            CategoryKind::Condition => &mut self.conditions,
        }
    }
}
