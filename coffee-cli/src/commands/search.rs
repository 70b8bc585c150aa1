use std::path::PathBuf;

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use coffee_catalog::{CategoryKind, Column};
use coffee_lib::{NumericField, SearchForm};

use crate::CliError;

use super::{open_catalog, truncate_str};

/// Filter values from the command line. Zero and `None` are unconstrained.
pub(crate) struct SearchArgs {
    pub id: i64,
    pub price: i64,
    pub size: i64,
    pub kind: Option<String>,
    pub roasting: Option<String>,
    pub condition: Option<String>,
}

impl SearchArgs {
    fn into_form(self) -> SearchForm {
        let mut form = SearchForm::default();
        form.set_numeric(NumericField::Id, self.id);
        form.set_numeric(NumericField::Price, self.price);
        form.set_numeric(NumericField::Size, self.size);
        for (kind, name) in [
            (CategoryKind::Kind, self.kind),
            (CategoryKind::Roasting, self.roasting),
            (CategoryKind::Condition, self.condition),
        ] {
            if let Some(name) = name {
                form.select(kind, coffee_catalog::normalize_category_name(&name));
            }
        }
        form
    }
}

const WIDTHS: [usize; 7] = [5, 12, 10, 14, 14, 14, 30];

pub(crate) fn run_search(db_path: Option<PathBuf>, args: SearchArgs) -> Result<(), CliError> {
    let (conn, settings) = open_catalog(db_path)?;
    let form = args.into_form();

    for filter in form.filters() {
        log::debug!("Filter: {:?}", filter);
    }
    let cups = form
        .search(&conn)
        .map_err(|e| CliError::database(format!("Search failed: {}", e)))?;

    if cups.is_empty() {
        log::info!("No cups match these filters.");
        return Ok(());
    }

    let header = Column::ALL
        .iter()
        .zip(WIDTHS)
        .map(|(column, width)| {
            format!(
                "{:<width$}",
                truncate_str(&settings.column_header(*column), width),
                width = width
            )
        })
        .collect::<Vec<_>>()
        .join(" ");
    log::info!("{}", header.if_supports_color(Stdout, |t| t.bold()));

    for cup in &cups {
        let line = cup
            .cell_texts()
            .iter()
            .zip(WIDTHS)
            .map(|(text, width)| format!("{:<width$}", truncate_str(text, width), width = width))
            .collect::<Vec<_>>()
            .join(" ");
        log::info!("{}", line.trim_end());
    }
    crate::log_blank();
    log::info!("{} cups found", cups.len());
    Ok(())
}
