//! YAML loading for human-curated category names.
//!
//! Loads the names that seed the `kind`, `roasting` and `condition` tables
//! from `categories.yaml` in the catalog directory.

use crate::normalize::normalize_category_name;
use crate::types::CategoryKind;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// File name of the seed list inside a catalog directory.
pub const SEEDS_FILE: &str = "categories.yaml";

#[derive(Debug, Error)]
pub enum YamlError {
    #[error("I/O error reading {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("YAML parse error in {path}: {source}")]
    Parse {
        path: String,
        source: serde_yml::Error,
    },
    #[error("Not a directory: {0}")]
    DirNotFound(String),
}

/// Category names to seed, keyed by table.
///
/// ```yaml
/// kind: [Arabica, Robusta]
/// roasting: [Light, Medium, Dark]
/// condition: [Beans, Ground]
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CategorySeeds {
    #[serde(default)]
    pub kind: Vec<String>,
    /// Listed from lightest to darkest; insertion order becomes the row id.
    #[serde(default)]
    pub roasting: Vec<String>,
    #[serde(default)]
    pub condition: Vec<String>,
}

impl CategorySeeds {
    pub fn names(&self, kind: CategoryKind) -> &[String] {
        match kind {
            CategoryKind::Kind => &self.kind,
            CategoryKind::Roasting => &self.roasting,
            CategoryKind::Condition => &self.condition,
        }
    }

    /// Names in the form cell edits are matched against, with blanks and
    /// duplicates removed (first occurrence wins).
    pub fn normalized(&self, kind: CategoryKind) -> Vec<String> {
        let mut out: Vec<String> = Vec::new();
        for name in self.names(kind) {
            let name = normalize_category_name(name);
            if !name.is_empty() && !out.contains(&name) {
                out.push(name);
            }
        }
        out
    }

    pub fn is_empty(&self) -> bool {
        CategoryKind::ALL.iter().all(|k| self.names(*k).is_empty())
    }
}

/// Load category seeds from `catalog_dir/categories.yaml`.
///
/// A missing directory or file yields empty seeds.
pub fn load_seeds(catalog_dir: &Path) -> Result<CategorySeeds, YamlError> {
    if !catalog_dir.exists() {
        return Ok(CategorySeeds::default());
    }
    if !catalog_dir.is_dir() {
        return Err(YamlError::DirNotFound(catalog_dir.display().to_string()));
    }

    let path = catalog_dir.join(SEEDS_FILE);
    if !path.exists() {
        return Ok(CategorySeeds::default());
    }
    let contents = std::fs::read_to_string(&path).map_err(|e| YamlError::Io {
        path: path.display().to_string(),
        source: e,
    })?;
    // An empty file deserializes to null rather than an empty mapping.
    if contents.trim().is_empty() {
        return Ok(CategorySeeds::default());
    }
    serde_yml::from_str(&contents).map_err(|e| YamlError::Parse {
        path: path.display().to_string(),
        source: e,
    })
}
