//! SQLite persistence layer for the coffee catalog.
//!
//! Provides schema creation, CRUD operations, query APIs, and a unit of
//! work that stages cup edits until an explicit commit. Backed by SQLite
//! (via rusqlite with bundled feature).

pub mod operations;
pub mod queries;
pub mod schema;
pub mod session;

pub use operations::{
    ensure_category, find_category_by_name, insert_category, insert_cup, seed_categories,
    seed_from_catalog, update_cup, CategoryLookup, OperationError, SeedStats,
};
pub use queries::{
    all_cups, catalog_stats, category_names, cups_for_category, find_cup, list_categories,
    search_cups, CatalogStats, CupFilter,
};
pub use schema::{open_database, open_memory, SchemaError};
pub use session::{CommitStats, Session};
