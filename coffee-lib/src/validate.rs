//! Conversion of raw cell text into typed cup values.
//!
//! Validation only needs category lookups, so it runs against any
//! [`CategoryLookup`] and can be tested without a UI or a database.

use coffee_catalog::{normalize_category_name, parse_integer, Category, CategoryKind, Column, FieldKind};
use coffee_db::CategoryLookup;
use thiserror::Error;

/// A successfully validated cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CellValue {
    Integer(i64),
    Text(String),
    Category(Category),
}

impl CellValue {
    /// Canonical text for the cell once the value is accepted.
    pub fn display_text(&self) -> String {
        match self {
            Self::Integer(v) => v.to_string(),
            Self::Text(s) => s.clone(),
            Self::Category(c) => c.name.clone(),
        }
    }
}

/// Why a cell edit was refused.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Rejection {
    #[error("the column cannot be edited")]
    Locked,
    #[error("a value is required")]
    Blank,
    #[error("{text:?} is not a whole number")]
    NotAnInteger { text: String },
    #[error("{value} is negative")]
    Negative { value: i64 },
    #[error("there is no {kind} named {name:?}")]
    UnknownCategory { kind: CategoryKind, name: String },
    #[error("category lookup failed: {0}")]
    Lookup(String),
}

/// Validate `text` typed into `column`.
///
/// Integers tolerate surrounding whitespace but not a minus sign. Taste
/// text is taken verbatim, and category names are normalized before an
/// exact lookup. Categories are never created here.
pub fn validate_cell<L>(column: Column, text: &str, lookup: &L) -> Result<CellValue, Rejection>
where
    L: CategoryLookup + ?Sized,
{
    match column.field_kind() {
        FieldKind::Identity => Err(Rejection::Locked),
        FieldKind::Integer => {
            if text.trim().is_empty() {
                return Err(Rejection::Blank);
            }
            match parse_integer(text) {
                Some(value) if value < 0 => Err(Rejection::Negative { value }),
                Some(value) => Ok(CellValue::Integer(value)),
                None => Err(Rejection::NotAnInteger {
                    text: text.to_string(),
                }),
            }
        }
        FieldKind::Text => Ok(CellValue::Text(text.to_string())),
        FieldKind::Category(kind) => {
            let name = normalize_category_name(text);
            if name.is_empty() {
                return Err(Rejection::Blank);
            }
            match lookup.find_category(kind, &name) {
                Ok(Some(category)) => Ok(CellValue::Category(category)),
                Ok(None) => Err(Rejection::UnknownCategory { kind, name }),
                Err(e) => Err(Rejection::Lookup(e.to_string())),
            }
        }
    }
}

#[cfg(test)]
#[path = "tests/validate_tests.rs"]
mod tests;
