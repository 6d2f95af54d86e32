use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::data::database::DriverRegistry;

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Viewer settings, loadable from a JSON file. Every field has a default.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct ViewerConfig {
    pub window: WindowConfig,
    pub csv: CsvConfig,
    pub database: DatabaseConfig,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct WindowConfig {
    pub width: f32,
    pub height: f32,
    pub min_width: f32,
    pub min_height: f32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 1200.0,
            height: 800.0,
            min_width: 600.0,
            min_height: 400.0,
        }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct CsvConfig {
    pub delimiter: char,
    pub trim: bool,
}

impl Default for CsvConfig {
    fn default() -> Self {
        Self {
            delimiter: ',',
            trim: true,
        }
    }
}

impl CsvConfig {
    /// The delimiter as the single byte the csv reader expects, `,` if not ASCII.
    pub fn delimiter_byte(&self) -> u8 {
        if self.delimiter.is_ascii() {
            self.delimiter as u8
        } else {
            log::warn!("Non-ASCII CSV delimiter {:?} ignored, using ','", self.delimiter);
            b','
        }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct DatabaseConfig {
    pub mysql_port: u16,
    pub postgres_port: u16,
    pub connect_timeout_secs: u64,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            mysql_port: 3306,
            postgres_port: 5432,
            connect_timeout_secs: 10,
        }
    }
}

impl ViewerConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading config file {}", path.display()))?;
        serde_json::from_str(&text)
            .with_context(|| format!("parsing config file {}", path.display()))
    }
}

// ---------------------------------------------------------------------------
// AppContext – created once in main, passed to selector and loader
// ---------------------------------------------------------------------------

pub struct AppContext {
    pub config: ViewerConfig,
    pub drivers: DriverRegistry,
}

impl AppContext {
    /// Context backed by the real database drivers.
    pub fn new(config: ViewerConfig) -> Self {
        let drivers = DriverRegistry::native(&config.database);
        Self { config, drivers }
    }

    pub fn with_drivers(config: ViewerConfig, drivers: DriverRegistry) -> Self {
        Self { config, drivers }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_defaults() {
        let cfg = ViewerConfig::default();
        assert_eq!(cfg.window.width, 1200.0);
        assert_eq!(cfg.csv.delimiter_byte(), b',');
        assert_eq!(cfg.database.mysql_port, 3306);
        assert_eq!(cfg.database.postgres_port, 5432);
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, r#"{{ "csv": {{ "delimiter": ";" }}, "database": {{ "postgres_port": 6543 }} }}"#)
            .unwrap();

        let cfg = ViewerConfig::from_file(file.path()).unwrap();
        assert_eq!(cfg.csv.delimiter_byte(), b';');
        assert!(cfg.csv.trim);
        assert_eq!(cfg.database.postgres_port, 6543);
        assert_eq!(cfg.database.mysql_port, 3306);
        assert_eq!(cfg.window, WindowConfig::default());
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, r#"{{ "colour": "blue" }}"#).unwrap();
        assert!(ViewerConfig::from_file(file.path()).is_err());
        assert!(ViewerConfig::from_file(Path::new("/nonexistent/tablescope.json")).is_err());
    }

    #[test]
    fn test_non_ascii_delimiter_falls_back() {
        let cfg = CsvConfig {
            delimiter: '§',
            trim: true,
        };
        assert_eq!(cfg.delimiter_byte(), b',');
    }
}
