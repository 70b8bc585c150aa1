//! The editable cup grid.
//!
//! [`EditView`] holds one row per cup, with the text shown in each cell and
//! the last text that validated. Valid edits update an in-memory draft and
//! are staged in a [`Session`]; nothing reaches the store until
//! [`EditView::commit`]. Dropping or closing the view discards the session.
//!
//! Frontends drive the view through [`EditAction`]s and render
//! [`EditOutcome`]s and [`EditError`]s. The view never talks to a UI.

use coffee_catalog::{Category, Column, Cup, CupFields, COLUMN_COUNT};
use coffee_db::{CategoryLookup, OperationError, Session};
use rusqlite::Connection;
use thiserror::Error;

use crate::hints::{accepted_samples, SampleLine, EDIT_HINT};
use crate::validate::{validate_cell, CellValue, Rejection};

/// Whether cell-change events are applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaptureState {
    /// Edits are validated and applied.
    Enabled,
    /// Edits are ignored while the view rewrites cells itself.
    Suppressed,
    /// A created row is not committed yet. Edits are applied, but another
    /// row cannot be created until a commit succeeds.
    AwaitingNewRow,
}

#[derive(Debug, Error)]
pub enum EditError {
    #[error("Invalid value in column {column}: {reason}")]
    InvalidCell {
        row: usize,
        column: Column,
        reason: Rejection,
    },
    #[error("The new cup in row {display_number} is not finished: column {column}: {reason}")]
    IncompleteCreation {
        display_number: usize,
        column: Column,
        reason: Rejection,
    },
    #[error("Finish adding the last new cup before creating another")]
    CreationPending,
    #[error("No row {row} in the table")]
    NoSuchRow { row: usize },
    #[error("Database error: {0}")]
    Store(#[from] OperationError),
}

impl EditError {
    /// The column a cell error refers to, for highlighting.
    pub fn column(&self) -> Option<Column> {
        match self {
            Self::InvalidCell { column, .. } | Self::IncompleteCreation { column, .. } => {
                Some(*column)
            }
            _ => None,
        }
    }
}

/// A user action on the edit view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditAction {
    CreateCup,
    CellChanged {
        row: usize,
        column: Column,
        text: String,
    },
    Commit,
    ShowHint,
    ShowSamples,
}

/// Result of a cell-change event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellOutcome {
    Accepted,
    /// Capture was suppressed; nothing changed.
    Ignored,
}

/// What a successful commit did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitReport {
    pub inserted: usize,
    pub updated: usize,
    pub committed_at: chrono::DateTime<chrono::Local>,
}

impl CommitReport {
    pub fn summary(&self) -> String {
        format!(
            "All changes applied ({} new, {} updated)",
            self.inserted, self.updated
        )
    }
}

/// Successful result of [`EditView::handle`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditOutcome {
    Created { row: usize },
    Cell(CellOutcome),
    Committed(CommitReport),
    Hint(&'static str),
    Samples(Vec<SampleLine>),
}

/// Field values of a row being edited. Blank cells are `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CupDraft {
    pub price: Option<i64>,
    pub size: Option<i64>,
    pub kind: Option<Category>,
    pub roasting: Option<Category>,
    pub condition: Option<Category>,
    pub taste_description: Option<String>,
}

impl CupDraft {
    pub fn from_cup(cup: &Cup) -> Self {
        Self {
            price: Some(cup.price),
            size: Some(cup.size),
            kind: Some(cup.kind.clone()),
            roasting: Some(cup.roasting.clone()),
            condition: Some(cup.condition.clone()),
            taste_description: Some(cup.taste_description.clone()),
        }
    }

    /// Store a validated value. Returns false if the value does not fit
    /// the column.
    pub fn apply(&mut self, column: Column, value: CellValue) -> bool {
        match (column, value) {
            (Column::Price, CellValue::Integer(v)) => self.price = Some(v),
            (Column::Size, CellValue::Integer(v)) => self.size = Some(v),
            (Column::Taste, CellValue::Text(s)) => self.taste_description = Some(s),
            (Column::Kind, CellValue::Category(c)) => self.kind = Some(c),
            (Column::Roasting, CellValue::Category(c)) => self.roasting = Some(c),
            (Column::Condition, CellValue::Category(c)) => self.condition = Some(c),
            _ => return false,
        }
        true
    }

    /// First required column that is still blank. Taste may stay empty.
    pub fn first_missing(&self) -> Option<Column> {
        [
            (Column::Price, self.price.is_none()),
            (Column::Size, self.size.is_none()),
            (Column::Kind, self.kind.is_none()),
            (Column::Roasting, self.roasting.is_none()),
            (Column::Condition, self.condition.is_none()),
        ]
        .into_iter()
        .find_map(|(column, missing)| missing.then_some(column))
    }

    /// The row as storable fields, if every required column is filled.
    pub fn to_fields(&self) -> Option<CupFields> {
        Some(CupFields {
            price: self.price?,
            size: self.size?,
            kind_id: self.kind.as_ref()?.id,
            roasting_id: self.roasting.as_ref()?.id,
            condition_id: self.condition.as_ref()?.id,
            taste_description: self.taste_description.clone().unwrap_or_default(),
        })
    }
}

#[derive(Debug, Clone)]
enum RowOrigin {
    /// Loaded from the store, with the values it was loaded with.
    Persisted { id: i64, baseline: CupFields },
    /// Created in this view and not committed.
    Created,
}

#[derive(Debug, Clone)]
struct GridRow {
    displayed: [String; COLUMN_COUNT],
    known_good: [String; COLUMN_COUNT],
    draft: CupDraft,
    origin: RowOrigin,
}

impl GridRow {
    fn persisted(cup: &Cup) -> Self {
        let cells = cup.cell_texts();
        Self {
            displayed: cells.clone(),
            known_good: cells,
            draft: CupDraft::from_cup(cup),
            origin: RowOrigin::Persisted {
                id: cup.id,
                baseline: cup.fields(),
            },
        }
    }

    fn blank(display_number: usize) -> Self {
        let mut cells: [String; COLUMN_COUNT] = Default::default();
        cells[Column::Id.index()] = display_number.to_string();
        Self {
            displayed: cells.clone(),
            known_good: cells,
            draft: CupDraft::default(),
            origin: RowOrigin::Created,
        }
    }
}

/// The edit view's grid, session and capture state.
#[derive(Debug)]
pub struct EditView {
    rows: Vec<GridRow>,
    session: Session,
    capture: CaptureState,
}

impl EditView {
    /// Load every cup from the store into a fresh grid.
    pub fn open(conn: &Connection) -> Result<Self, OperationError> {
        let mut view = Self {
            rows: Vec::new(),
            session: Session::begin(),
            capture: CaptureState::Suppressed,
        };
        view.reload(conn)?;
        view.capture = CaptureState::Enabled;
        Ok(view)
    }

    /// Dispatch a user action.
    pub fn handle(
        &mut self,
        conn: &mut Connection,
        action: EditAction,
    ) -> Result<EditOutcome, EditError> {
        match action {
            EditAction::CreateCup => self.create_cup().map(|row| EditOutcome::Created { row }),
            EditAction::CellChanged { row, column, text } => self
                .on_cell_changed(&*conn, row, column, &text)
                .map(EditOutcome::Cell),
            EditAction::Commit => self.commit(conn).map(EditOutcome::Committed),
            EditAction::ShowHint => Ok(EditOutcome::Hint(EDIT_HINT)),
            EditAction::ShowSamples => Ok(EditOutcome::Samples(accepted_samples(conn)?)),
        }
    }

    /// Append a blank row for a new cup. Returns its row index.
    pub fn create_cup(&mut self) -> Result<usize, EditError> {
        if self.capture == CaptureState::AwaitingNewRow {
            return Err(EditError::CreationPending);
        }
        let row = self.with_capture_suppressed(|view| {
            let row = view.rows.len();
            view.rows.push(GridRow::blank(row + 1));
            row
        });
        self.capture = CaptureState::AwaitingNewRow;
        log::debug!("Created blank row {}", row + 1);
        Ok(row)
    }

    /// Handle a cell-change event.
    ///
    /// Accepted text updates the row's draft and becomes the cell's
    /// known-good value. Rejected text is reverted to the known-good value
    /// and reported with the column.
    pub fn on_cell_changed<L>(
        &mut self,
        lookup: &L,
        row: usize,
        column: Column,
        text: &str,
    ) -> Result<CellOutcome, EditError>
    where
        L: CategoryLookup + ?Sized,
    {
        if self.capture == CaptureState::Suppressed {
            return Ok(CellOutcome::Ignored);
        }
        let idx = column.index();
        let grid_row = self.rows.get_mut(row).ok_or(EditError::NoSuchRow { row })?;
        grid_row.displayed[idx] = text.to_string();

        match validate_cell(column, text, lookup) {
            Ok(value) => {
                let canonical = value.display_text();
                grid_row.draft.apply(column, value);
                grid_row.displayed[idx] = canonical.clone();
                grid_row.known_good[idx] = canonical;
                self.stage_row(row);
                Ok(CellOutcome::Accepted)
            }
            Err(reason) => {
                log::debug!("Rejected {:?} in row {}, column {}: {}", text, row + 1, column, reason);
                self.revert_cell(row, column);
                Err(EditError::InvalidCell {
                    row,
                    column,
                    reason,
                })
            }
        }
    }

    /// Persist every staged change in one transaction and reload the grid.
    ///
    /// With a creation pending, every editable cell of the newest row must
    /// validate first; the first failure blocks the whole commit.
    pub fn commit(&mut self, conn: &mut Connection) -> Result<CommitReport, EditError> {
        if self.capture == CaptureState::AwaitingNewRow
            && let Some(row) = self.rows.len().checked_sub(1)
        {
            let fields = self.validate_new_row(&*conn, row)?;
            self.session.stage_insert(fields);
        }

        let stats = match self.session.commit(conn) {
            Ok(stats) => stats,
            Err(e) => {
                self.session.discard_inserts();
                return Err(e.into());
            }
        };

        self.settle_committed(&stats.inserted);
        self.capture = CaptureState::Suppressed;
        let reloaded = self.reload(conn);
        self.capture = CaptureState::Enabled;
        reloaded?;

        Ok(CommitReport {
            inserted: stats.inserted.len(),
            updated: stats.updated,
            committed_at: chrono::Local::now(),
        })
    }

    /// Discard every uncommitted change. Returns how many rows had changes.
    pub fn close(mut self) -> usize {
        let created = usize::from(self.capture == CaptureState::AwaitingNewRow);
        let discarded = self.session.rollback() + created;
        if discarded > 0 {
            log::info!("Discarded uncommitted changes to {} cups", discarded);
        }
        discarded
    }

    /// Run `f` with cell-change events ignored, then restore the previous state.
    pub fn with_capture_suppressed<T>(&mut self, f: impl FnOnce(&mut Self) -> T) -> T {
        let previous = std::mem::replace(&mut self.capture, CaptureState::Suppressed);
        let out = f(self);
        self.capture = previous;
        out
    }

    pub fn capture_state(&self) -> CaptureState {
        self.capture
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Text currently shown in a cell.
    pub fn cell_text(&self, row: usize, column: Column) -> Option<&str> {
        self.rows
            .get(row)
            .map(|r| r.displayed[column.index()].as_str())
    }

    /// Text of every row, for rendering.
    pub fn display_rows(&self) -> Vec<[String; COLUMN_COUNT]> {
        self.rows.iter().map(|r| r.displayed.clone()).collect()
    }

    /// Whether a row was created in this view and is not committed.
    pub fn is_new_row(&self, row: usize) -> bool {
        self.rows
            .get(row)
            .is_some_and(|r| matches!(r.origin, RowOrigin::Created))
    }

    /// Whether closing now would lose anything.
    pub fn has_pending_changes(&self) -> bool {
        !self.session.is_empty() || self.capture == CaptureState::AwaitingNewRow
    }

    /// Mark every row as matching what the store now holds. The created
    /// row takes the id it was inserted under. The grid stays consistent
    /// even when the reload after a commit fails.
    fn settle_committed(&mut self, inserted: &[i64]) {
        let id_idx = Column::Id.index();
        let mut new_ids = inserted.iter().copied();
        for row in &mut self.rows {
            let Some(fields) = row.draft.to_fields() else {
                continue;
            };
            if let RowOrigin::Persisted { baseline, .. } = &mut row.origin {
                *baseline = fields;
            } else if let Some(id) = new_ids.next() {
                row.displayed[id_idx] = id.to_string();
                row.known_good[id_idx] = id.to_string();
                row.origin = RowOrigin::Persisted {
                    id,
                    baseline: fields,
                };
            }
        }
    }

    fn reload(&mut self, conn: &Connection) -> Result<(), OperationError> {
        let cups = coffee_db::all_cups(conn)?;
        self.rows = cups.iter().map(GridRow::persisted).collect();
        log::debug!("Loaded {} cups into the edit grid", self.rows.len());
        Ok(())
    }

    /// Keep the session in step with a persisted row's draft.
    fn stage_row(&mut self, row: usize) {
        let Some(grid_row) = self.rows.get(row) else {
            return;
        };
        if let RowOrigin::Persisted { id, baseline } = &grid_row.origin
            && let Some(fields) = grid_row.draft.to_fields()
        {
            if fields == *baseline {
                self.session.unstage_update(*id);
            } else {
                self.session.stage_update(*id, fields);
            }
        }
    }

    fn revert_cell(&mut self, row: usize, column: Column) {
        self.with_capture_suppressed(|view| {
            if let Some(r) = view.rows.get_mut(row) {
                let idx = column.index();
                r.displayed[idx] = r.known_good[idx].clone();
            }
        });
    }

    /// Validate every editable cell of a created row, as displayed.
    fn validate_new_row(&mut self, lookup: &Connection, row: usize) -> Result<CupFields, EditError> {
        let display_number = row + 1;
        let mut draft = CupDraft::default();
        if let Some(grid_row) = self.rows.get(row) {
            for column in Column::EDITABLE {
                let text = &grid_row.displayed[column.index()];
                let value = validate_cell(column, text, lookup).map_err(|reason| {
                    EditError::IncompleteCreation {
                        display_number,
                        column,
                        reason,
                    }
                })?;
                draft.apply(column, value);
            }
        }

        let Some(fields) = draft.to_fields() else {
            return Err(EditError::IncompleteCreation {
                display_number,
                column: draft.first_missing().unwrap_or(Column::Price),
                reason: Rejection::Blank,
            });
        };
        if let Some(grid_row) = self.rows.get_mut(row) {
            grid_row.draft = draft;
        }
        Ok(fields)
    }
}

#[cfg(test)]
#[path = "tests/edit_tests.rs"]
mod tests;
