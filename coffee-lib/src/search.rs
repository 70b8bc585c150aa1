//! The search form: filter controls and query-by-example over cups.

use std::collections::BTreeMap;

use coffee_catalog::{CategoryKind, Column, Cup};
use coffee_db::{CategoryLookup, CupFilter, OperationError};
use rusqlite::Connection;

/// Sentinel option meaning "no constraint" in a category dropdown.
pub const ANY_FILTER: &str = "Any";

/// A scalar field with a numeric filter control. Zero means unconstrained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum NumericField {
    Id,
    Price,
    Size,
}

impl NumericField {
    pub const ALL: [NumericField; 3] = [Self::Id, Self::Price, Self::Size];

    pub fn column(&self) -> Column {
        match self {
            Self::Id => Column::Id,
            Self::Price => Column::Price,
            Self::Size => Column::Size,
        }
    }
}

/// One active constraint built from the form controls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Filter {
    Numeric(NumericField, i64),
    Category(CategoryKind, String),
}

/// A dropdown listing [`ANY_FILTER`] followed by every category name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryControl {
    options: Vec<String>,
    /// Currently selected text.
    pub selected: String,
}

impl Default for CategoryControl {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl CategoryControl {
    pub fn new(names: Vec<String>) -> Self {
        let mut options = Vec::with_capacity(names.len() + 1);
        options.push(ANY_FILTER.to_string());
        options.extend(names);
        Self {
            options,
            selected: ANY_FILTER.to_string(),
        }
    }

    pub fn options(&self) -> &[String] {
        &self.options
    }

    /// The selected name, or `None` when the control is unconstrained.
    pub fn constraint(&self) -> Option<&str> {
        let selected = self.selected.as_str();
        (!selected.is_empty() && selected != ANY_FILTER).then_some(selected)
    }
}

/// Filter controls for the search view.
///
/// The controls are keyed by field once, at construction; callers address
/// them by [`NumericField`] or [`CategoryKind`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchForm {
    numeric: BTreeMap<NumericField, i64>,
    categories: BTreeMap<CategoryKind, CategoryControl>,
}

impl Default for SearchForm {
    fn default() -> Self {
        Self {
            numeric: NumericField::ALL.iter().map(|f| (*f, 0)).collect(),
            categories: CategoryKind::ALL
                .iter()
                .map(|k| (*k, CategoryControl::default()))
                .collect(),
        }
    }
}

impl SearchForm {
    /// Build the form with every category name from the store.
    pub fn open(conn: &Connection) -> Result<Self, OperationError> {
        let mut form = Self::default();
        for kind in CategoryKind::ALL {
            let names = coffee_db::category_names(conn, kind)?;
            form.categories.insert(kind, CategoryControl::new(names));
        }
        Ok(form)
    }

    pub fn numeric(&self, field: NumericField) -> i64 {
        self.numeric.get(&field).copied().unwrap_or(0)
    }

    pub fn numeric_mut(&mut self, field: NumericField) -> &mut i64 {
        self.numeric.entry(field).or_insert(0)
    }

    pub fn set_numeric(&mut self, field: NumericField, value: i64) {
        *self.numeric_mut(field) = value;
    }

    pub fn control(&self, kind: CategoryKind) -> Option<&CategoryControl> {
        self.categories.get(&kind)
    }

    pub fn control_mut(&mut self, kind: CategoryKind) -> &mut CategoryControl {
        self.categories.entry(kind).or_default()
    }

    /// Select a name in a category dropdown. Any text is accepted here;
    /// names that do not resolve are dropped when searching.
    pub fn select(&mut self, kind: CategoryKind, name: impl Into<String>) {
        self.control_mut(kind).selected = name.into();
    }

    /// Return every control to its unconstrained default.
    pub fn reset(&mut self) {
        for value in self.numeric.values_mut() {
            *value = 0;
        }
        for control in self.categories.values_mut() {
            control.selected = ANY_FILTER.to_string();
        }
    }

    /// Constraints from every control that is not at its default.
    pub fn filters(&self) -> Vec<Filter> {
        let numeric = self
            .numeric
            .iter()
            .filter(|(_, value)| **value != 0)
            .map(|(field, value)| Filter::Numeric(*field, *value));
        let categories = self.categories.iter().filter_map(|(kind, control)| {
            control
                .constraint()
                .map(|name| Filter::Category(*kind, name.to_string()))
        });
        numeric.chain(categories).collect()
    }

    /// Turn the active filters into a query, resolving category names.
    ///
    /// A name that matches no category is dropped, leaving that field
    /// unconstrained.
    pub fn resolve<L>(&self, lookup: &L) -> Result<CupFilter, OperationError>
    where
        L: CategoryLookup + ?Sized,
    {
        let mut query = CupFilter::default();
        for filter in self.filters() {
            match filter {
                Filter::Numeric(NumericField::Id, v) => query.id = Some(v),
                Filter::Numeric(NumericField::Price, v) => query.price = Some(v),
                Filter::Numeric(NumericField::Size, v) => query.size = Some(v),
                Filter::Category(kind, name) => match lookup.find_category(kind, &name)? {
                    Some(category) => query.set_category(kind, Some(category.id)),
                    None => log::debug!("Dropping {} filter: no category named {:?}", kind, name),
                },
            }
        }
        Ok(query)
    }

    /// Run the search against the store.
    pub fn search(&self, conn: &Connection) -> Result<Vec<Cup>, OperationError> {
        let query = self.resolve(conn)?;
        let cups = coffee_db::search_cups(conn, &query)?;
        log::debug!("Search matched {} cups", cups.len());
        Ok(cups)
    }
}

#[cfg(test)]
#[path = "tests/search_tests.rs"]
mod tests;
