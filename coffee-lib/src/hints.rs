//! Help text for the edit view.

use std::fmt;

use coffee_catalog::{CategoryKind, Column};
use coffee_db::OperationError;
use rusqlite::Connection;

/// Usage hint shown by the edit view's "Show hint" action.
pub const EDIT_HINT: &str = "To change a cup, edit its cell following the accepted \
value samples and the error messages, then press 'Commit changes'.\n\
To add a cup, press 'Create cup': a new row appears at the bottom of the table. \
Fill in every column, then press 'Commit changes'. This saves the new cup \
together with any other edits.\n\
If you close this window before committing, the catalog is left unchanged.";

/// Accepted names for one categorical column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SampleLine {
    pub column: Column,
    pub names: Vec<String>,
}

impl fmt::Display for SampleLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let quoted: Vec<String> = self.names.iter().map(|n| format!("{n:?}")).collect();
        if quoted.is_empty() {
            write!(f, "Column {:?} has no accepted values yet", self.column.header())
        } else {
            write!(
                f,
                "Column {:?} must be filled as one of:\n{}",
                self.column.header(),
                quoted.join(", ")
            )
        }
    }
}

/// Accepted names for every categorical column, in column order.
pub fn accepted_samples(conn: &Connection) -> Result<Vec<SampleLine>, OperationError> {
    CategoryKind::ALL
        .iter()
        .map(|kind| {
            Ok(SampleLine {
                column: kind.column(),
                names: coffee_db::category_names(conn, *kind)?,
            })
        })
        .collect()
}

/// Render sample lines as one message body.
pub fn format_samples(samples: &[SampleLine]) -> String {
    samples
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("\n\n")
}
