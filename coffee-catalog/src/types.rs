//! Data model types for the coffee catalog.
//!
//! These types represent the persistent catalog schema: cups and the three
//! categorical entities they reference (kind, roasting, condition), plus the
//! column layout shared by the search and edit grids.

use serde::{Deserialize, Serialize};

// ── Categories ──────────────────────────────────────────────────────────────

/// One of the three categorical tables a cup references.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CategoryKind {
    /// Coffee variety (Arabica, Robusta, ...).
    Kind,
    /// Roast degree. Row ids follow roast intensity.
    Roasting,
    /// Physical state (beans, ground, ...).
    Condition,
}

impl CategoryKind {
    /// All category kinds in grid column order.
    pub const ALL: [CategoryKind; 3] = [Self::Kind, Self::Roasting, Self::Condition];

    /// SQL table name (also the YAML seed key).
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Kind => "kind",
            Self::Roasting => "roasting",
            Self::Condition => "condition",
        }
    }

    /// The grid column that displays this category.
    pub fn column(&self) -> Column {
        match self {
            Self::Kind => Column::Kind,
            Self::Roasting => Column::Roasting,
            Self::Condition => Column::Condition,
        }
    }

    /// Parse a user-supplied kind name ("kind", "roast", "Condition", ...).
    pub fn from_str_loose(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "kind" | "kinds" | "sort" | "variety" => Some(Self::Kind),
            "roasting" | "roastings" | "roast" => Some(Self::Roasting),
            "condition" | "conditions" | "state" => Some(Self::Condition),
            _ => None,
        }
    }
}

impl std::fmt::Display for CategoryKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A row of one of the categorical tables.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Category {
    pub id: i64,
    pub name: String,
}

// ── Cup ─────────────────────────────────────────────────────────────────────

/// A persisted cup with its categories resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cup {
    pub id: i64,
    /// Price in roubles.
    pub price: i64,
    pub size: i64,
    pub kind: Category,
    pub roasting: Category,
    pub condition: Category,
    pub taste_description: String,
}

impl Cup {
    /// The text shown in each grid column for this cup.
    pub fn cell_texts(&self) -> [String; COLUMN_COUNT] {
        [
            self.id.to_string(),
            self.price.to_string(),
            self.size.to_string(),
            self.kind.name.clone(),
            self.roasting.name.clone(),
            self.condition.name.clone(),
            self.taste_description.clone(),
        ]
    }

    /// The writable fields of this cup, as stored.
    pub fn fields(&self) -> CupFields {
        CupFields {
            price: self.price,
            size: self.size,
            kind_id: self.kind.id,
            roasting_id: self.roasting.id,
            condition_id: self.condition.id,
            taste_description: self.taste_description.clone(),
        }
    }
}

/// Every writable column of a `coffee_cup` row. Used for inserts and updates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CupFields {
    pub price: i64,
    pub size: i64,
    pub kind_id: i64,
    pub roasting_id: i64,
    pub condition_id: i64,
    pub taste_description: String,
}

// ── Columns ─────────────────────────────────────────────────────────────────

/// Number of columns in the cup grid.
pub const COLUMN_COUNT: usize = 7;

/// A column of the cup grid, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Column {
    Id,
    Price,
    Size,
    Kind,
    Roasting,
    Condition,
    Taste,
}

/// How a column's cell text is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Surrogate key, never editable.
    Identity,
    Integer,
    /// Free text, stored verbatim.
    Text,
    /// Foreign key resolved by category name.
    Category(CategoryKind),
}

impl Column {
    pub const ALL: [Column; COLUMN_COUNT] = [
        Self::Id,
        Self::Price,
        Self::Size,
        Self::Kind,
        Self::Roasting,
        Self::Condition,
        Self::Taste,
    ];

    /// Columns a user may type into.
    pub const EDITABLE: [Column; COLUMN_COUNT - 1] = [
        Self::Price,
        Self::Size,
        Self::Kind,
        Self::Roasting,
        Self::Condition,
        Self::Taste,
    ];

    pub fn index(&self) -> usize {
        *self as usize
    }

    pub fn field_kind(&self) -> FieldKind {
        match self {
            Self::Id => FieldKind::Identity,
            Self::Price | Self::Size => FieldKind::Integer,
            Self::Kind => FieldKind::Category(CategoryKind::Kind),
            Self::Roasting => FieldKind::Category(CategoryKind::Roasting),
            Self::Condition => FieldKind::Category(CategoryKind::Condition),
            Self::Taste => FieldKind::Text,
        }
    }

    /// Header label. The size unit is supplied separately by the frontend.
    pub fn header(&self) -> &'static str {
        match self {
            Self::Id => "ID",
            Self::Price => "Price (rub.)",
            Self::Size => "Size",
            Self::Kind => "Kind",
            Self::Roasting => "Roasting",
            Self::Condition => "Condition",
            Self::Taste => "Taste",
        }
    }
}

impl std::fmt::Display for Column {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.header())
    }
}
