//! Coffee catalog data model types, cell-text normalization, and YAML seeds.
//!
//! This crate defines the persistent data model for the coffee catalog without
//! any database dependencies. Consumers can use these types directly for
//! display, validation, or passing to `coffee-db` for persistence.

pub mod normalize;
pub mod types;
pub mod yaml;

pub use normalize::{normalize_category_name, parse_integer};
pub use types::*;
pub use yaml::{load_seeds, CategorySeeds, YamlError};
