//! View models for the coffee catalog frontends.
//!
//! Everything here is independent of any UI toolkit: the search form, the
//! editable cup grid with its capture state machine, cell validation,
//! settings, and store opening. The GUI and CLI are thin layers on top.

pub mod edit;
pub mod hints;
pub mod search;
pub mod settings;
pub mod store;
pub mod validate;

pub use edit::{
    CaptureState, CellOutcome, CommitReport, CupDraft, EditAction, EditError, EditOutcome,
    EditView,
};
pub use hints::{accepted_samples, SampleLine, EDIT_HINT};
pub use search::{CategoryControl, Filter, NumericField, SearchForm, ANY_FILTER};
pub use settings::AppSettings;
pub use store::{open_store, open_store_at, StoreError};
pub use validate::{validate_cell, CellValue, Rejection};
