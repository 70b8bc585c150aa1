//! Read queries for the catalog database.
//!
//! Provides category listings, query-by-example over cups, back-reference
//! lookups, and table statistics.

use coffee_catalog::{Category, CategoryKind, Cup};
use rusqlite::{params, params_from_iter, Connection};

use crate::operations::OperationError;

/// Joined projection used by every cup query. Column order matches `row_to_cup`.
const CUP_SELECT: &str = "SELECT c.id, c.price, c.size,
                k.id, k.name, r.id, r.name, d.id, d.name,
                c.taste_description
         FROM coffee_cup c
         JOIN kind k ON k.id = c.kind_id
         JOIN roasting r ON r.id = c.roasting_id
         JOIN condition d ON d.id = c.condition_id";

// ── Category Queries ────────────────────────────────────────────────────────

/// List all categories of one kind in insertion order.
pub fn list_categories(
    conn: &Connection,
    kind: CategoryKind,
) -> Result<Vec<Category>, OperationError> {
    let mut stmt = conn.prepare(&format!(
        "SELECT id, name FROM {} ORDER BY id",
        kind.as_str()
    ))?;
    let rows = stmt.query_map([], |row| {
        Ok(Category {
            id: row.get(0)?,
            name: row.get(1)?,
        })
    })?;
    rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
}

/// Category names of one kind in insertion order.
pub fn category_names(
    conn: &Connection,
    kind: CategoryKind,
) -> Result<Vec<String>, OperationError> {
    Ok(list_categories(conn, kind)?
        .into_iter()
        .map(|c| c.name)
        .collect())
}

// ── Cup Queries ─────────────────────────────────────────────────────────────

/// Exact-match filter over cups. `None` fields are unconstrained.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CupFilter {
    pub id: Option<i64>,
    pub price: Option<i64>,
    pub size: Option<i64>,
    pub kind_id: Option<i64>,
    pub roasting_id: Option<i64>,
    pub condition_id: Option<i64>,
}

impl CupFilter {
    pub fn is_empty(&self) -> bool {
        self.constraints().is_empty()
    }

    /// Set the foreign key constraint for one category kind.
    pub fn set_category(&mut self, kind: CategoryKind, category_id: Option<i64>) {
        match kind {
            CategoryKind::Kind => self.kind_id = category_id,
            CategoryKind::Roasting => self.roasting_id = category_id,
            CategoryKind::Condition => self.condition_id = category_id,
        }
    }

    fn constraints(&self) -> Vec<(&'static str, i64)> {
        [
            ("c.id", self.id),
            ("c.price", self.price),
            ("c.size", self.size),
            ("c.kind_id", self.kind_id),
            ("c.roasting_id", self.roasting_id),
            ("c.condition_id", self.condition_id),
        ]
        .into_iter()
        .filter_map(|(col, value)| value.map(|v| (col, v)))
        .collect()
    }
}

/// List every cup in insertion order.
pub fn all_cups(conn: &Connection) -> Result<Vec<Cup>, OperationError> {
    search_cups(conn, &CupFilter::default())
}

/// Find cups matching every constraint of `filter`, in insertion order.
pub fn search_cups(conn: &Connection, filter: &CupFilter) -> Result<Vec<Cup>, OperationError> {
    let constraints = filter.constraints();
    let mut sql = CUP_SELECT.to_string();
    if !constraints.is_empty() {
        let clauses: Vec<String> = constraints
            .iter()
            .enumerate()
            .map(|(i, (col, _))| format!("{} = ?{}", col, i + 1))
            .collect();
        sql.push_str(" WHERE ");
        sql.push_str(&clauses.join(" AND "));
    }
    sql.push_str(" ORDER BY c.id");

    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map(
        params_from_iter(constraints.iter().map(|(_, v)| *v)),
        row_to_cup,
    )?;
    rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
}

/// Find a single cup by id.
pub fn find_cup(conn: &Connection, id: i64) -> Result<Option<Cup>, OperationError> {
    let mut stmt = conn.prepare(&format!("{CUP_SELECT} WHERE c.id = ?1"))?;
    let result = stmt.query_row(params![id], row_to_cup);
    match result {
        Ok(c) => Ok(Some(c)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

/// Cups referencing a given category (the category's back-reference).
pub fn cups_for_category(
    conn: &Connection,
    kind: CategoryKind,
    category_id: i64,
) -> Result<Vec<Cup>, OperationError> {
    let mut filter = CupFilter::default();
    filter.set_category(kind, Some(category_id));
    search_cups(conn, &filter)
}

// ── Statistics ──────────────────────────────────────────────────────────────

/// Get row counts for every catalog table.
pub fn catalog_stats(conn: &Connection) -> Result<CatalogStats, OperationError> {
    let kinds: i64 = conn.query_row("SELECT COUNT(*) FROM kind", [], |r| r.get(0))?;
    let roastings: i64 = conn.query_row("SELECT COUNT(*) FROM roasting", [], |r| r.get(0))?;
    let conditions: i64 = conn.query_row("SELECT COUNT(*) FROM condition", [], |r| r.get(0))?;
    let cups: i64 = conn.query_row("SELECT COUNT(*) FROM coffee_cup", [], |r| r.get(0))?;

    Ok(CatalogStats {
        kinds,
        roastings,
        conditions,
        cups,
    })
}

/// Summary statistics for the catalog.
#[derive(Debug, PartialEq, Eq)]
pub struct CatalogStats {
    pub kinds: i64,
    pub roastings: i64,
    pub conditions: i64,
    pub cups: i64,
}

// ── Row Mapping Helpers ─────────────────────────────────────────────────────

fn row_to_cup(row: &rusqlite::Row<'_>) -> rusqlite::Result<Cup> {
    Ok(Cup {
        id: row.get(0)?,
        price: row.get(1)?,
        size: row.get(2)?,
        kind: Category {
            id: row.get(3)?,
            name: row.get(4)?,
        },
        roasting: Category {
            id: row.get(5)?,
            name: row.get(6)?,
        },
        condition: Category {
            id: row.get(7)?,
            name: row.get(8)?,
        },
        taste_description: row.get(9)?,
    })
}
