//! Shared application settings.
//!
//! Both CLI and GUI read `~/.config/coffee-catalog/settings.toml` so the
//! database location and display options are consistent across frontends.

use serde::{Deserialize, Serialize};
use std::io;
use std::path::{Path, PathBuf};

use coffee_catalog::Column;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppSettings {
    #[serde(default = "default_database_path")]
    pub database_path: PathBuf,
    /// Directory holding `categories.yaml`.
    #[serde(default = "default_catalog_dir")]
    pub catalog_dir: PathBuf,
    /// Label appended to the size column header. No conversion is applied.
    #[serde(default = "default_size_unit")]
    pub size_unit: String,
    /// Seed categories from `catalog_dir` when a fresh store is created.
    #[serde(default = "default_true")]
    pub seed_on_first_run: bool,
}

fn default_true() -> bool {
    true
}

fn default_size_unit() -> String {
    "mm³".to_string()
}

fn default_catalog_dir() -> PathBuf {
    PathBuf::from("catalog")
}

/// `<data_dir>/coffee-catalog/coffee.sqlite`, or `data/coffee.sqlite` when
/// the platform has no data directory.
pub fn default_database_path() -> PathBuf {
    dirs::data_dir()
        .map(|d| d.join("coffee-catalog").join("coffee.sqlite"))
        .unwrap_or_else(|| PathBuf::from("data").join("coffee.sqlite"))
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            database_path: default_database_path(),
            catalog_dir: default_catalog_dir(),
            size_unit: default_size_unit(),
            seed_on_first_run: true,
        }
    }
}

impl AppSettings {
    /// Header text for a grid column, with the size unit applied.
    pub fn column_header(&self, column: Column) -> String {
        if column == Column::Size && !self.size_unit.is_empty() {
            format!("{} ({})", column.header(), self.size_unit)
        } else {
            column.header().to_string()
        }
    }

    /// Headers for every grid column in display order.
    pub fn column_headers(&self) -> Vec<String> {
        Column::ALL.iter().map(|c| self.column_header(*c)).collect()
    }
}

/// Returns `~/.config/coffee-catalog/settings.toml`.
pub fn settings_path() -> PathBuf {
    let config = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
    config.join("coffee-catalog").join("settings.toml")
}

/// Load settings from disk, returning defaults if missing or corrupt.
pub fn load_settings() -> AppSettings {
    load_settings_from(&settings_path())
}

/// Load settings from a specific file, returning defaults if missing or corrupt.
pub fn load_settings_from(path: &Path) -> AppSettings {
    match std::fs::read_to_string(path) {
        Ok(contents) => toml::from_str(&contents).unwrap_or_else(|e| {
            log::warn!("Failed to parse settings at {}: {}", path.display(), e);
            AppSettings::default()
        }),
        Err(_) => AppSettings::default(),
    }
}

/// Save settings to the standard location.
pub fn save_settings(settings: &AppSettings) -> io::Result<()> {
    save_settings_to(settings, &settings_path())
}

/// Save settings atomically (write to temp, then rename).
pub fn save_settings_to(settings: &AppSettings, path: &Path) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let contents = toml::to_string_pretty(settings).map_err(io::Error::other)?;
    let tmp = path.with_extension("toml.tmp");
    std::fs::write(&tmp, contents)?;
    std::fs::rename(&tmp, path)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn missing_file_gives_defaults() {
        let tmp = TempDir::new().unwrap();
        let settings = load_settings_from(&tmp.path().join("settings.toml"));
        assert_eq!(settings, AppSettings::default());
    }

    #[test]
    fn partial_file_fills_in_defaults() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("settings.toml");
        std::fs::write(&path, "size_unit = \"cm³\"\n").unwrap();

        let settings = load_settings_from(&path);
        assert_eq!(settings.size_unit, "cm³");
        assert_eq!(settings.catalog_dir, PathBuf::from("catalog"));
        assert!(settings.seed_on_first_run);
    }

    #[test]
    fn corrupt_file_gives_defaults() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("settings.toml");
        std::fs::write(&path, "size_unit = [").unwrap();
        assert_eq!(load_settings_from(&path), AppSettings::default());
    }

    #[test]
    fn save_then_load() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("nested").join("settings.toml");
        let settings = AppSettings {
            database_path: tmp.path().join("coffee.sqlite"),
            catalog_dir: tmp.path().join("catalog"),
            size_unit: "ml".to_string(),
            seed_on_first_run: false,
        };
        save_settings_to(&settings, &path).unwrap();
        assert_eq!(load_settings_from(&path), settings);
    }

    #[test]
    fn size_header_carries_unit() {
        let mut settings = AppSettings::default();
        settings.size_unit = "cm³".to_string();
        assert_eq!(settings.column_header(Column::Size), "Size (cm³)");
        assert_eq!(settings.column_header(Column::Price), "Price (rub.)");

        settings.size_unit.clear();
        assert_eq!(settings.column_header(Column::Size), "Size");
        assert_eq!(settings.column_headers().len(), Column::ALL.len());
    }
}
