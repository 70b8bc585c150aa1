use std::path::PathBuf;

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use coffee_catalog::{normalize_category_name, CategoryKind};

use crate::CliError;

use super::open_catalog;

/// List category names with their ids.
pub(crate) fn run_list(db_path: Option<PathBuf>, kind: Option<CategoryKind>) -> Result<(), CliError> {
    let (conn, _) = open_catalog(db_path)?;
    let kinds: Vec<CategoryKind> = match kind {
        Some(k) => vec![k],
        None => CategoryKind::ALL.to_vec(),
    };

    for (i, kind) in kinds.iter().enumerate() {
        if i > 0 {
            crate::log_blank();
        }
        let categories = coffee_db::list_categories(&conn, *kind)
            .map_err(|e| CliError::database(format!("Failed to list {} names: {}", kind, e)))?;
        log::info!(
            "{} ({}):",
            kind.column().header().if_supports_color(Stdout, |t| t.bold()),
            categories.len(),
        );
        if categories.is_empty() {
            log::info!("  (none)");
        }
        for category in categories {
            log::info!(
                "  {:>4}  {}",
                category.id.if_supports_color(Stdout, |t| t.dimmed()),
                category.name,
            );
        }
    }
    Ok(())
}

/// Add a category name. The name is normalized the way cell edits are, so
/// the stored spelling is the one edits will match.
pub(crate) fn run_add(db_path: Option<PathBuf>, kind: CategoryKind, name: &str) -> Result<(), CliError> {
    let normalized = normalize_category_name(name);
    if normalized.is_empty() {
        return Err(CliError::invalid("Category name must not be blank"));
    }

    let (conn, _) = open_catalog(db_path)?;
    let created = coffee_db::ensure_category(&conn, kind, &normalized)
        .map_err(|e| CliError::database(format!("Failed to add {}: {}", kind, e)))?;

    if created {
        log::info!(
            "Added {} {}",
            kind,
            format!("{:?}", normalized).if_supports_color(Stdout, |t| t.green()),
        );
    } else {
        log::warn!("{} {:?} already exists", kind, normalized);
    }
    Ok(())
}
