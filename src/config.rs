use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;
use tracing::level_filters::LevelFilter;

use crate::error::{Error, Result};
use crate::export::DEFAULT_EXPORT_FILENAME;
use crate::form::FieldSpec;

/// Add-record form layout. An empty field list means one required text
/// field per table column.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct FormConfig {
    pub fields: Vec<FieldSpec>,
}

/// Viewer configuration, read from TOML
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    pub search_debounce_ms: u64,
    pub resize_debounce_ms: u64,
    pub notification_ttl_ms: u64,
    pub counter_duration_ms: u64,
    /// Header of the column carrying the category tag
    pub category_column: Option<String>,
    /// Header of the column carrying the status tag
    pub status_column: Option<String>,
    pub export_filename: String,
    pub log_level: String,
    pub theme: String,
    pub max_col_width: usize,
    pub form: FormConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            search_debounce_ms: 300,
            resize_debounce_ms: 250,
            notification_ttl_ms: 5000,
            counter_duration_ms: 2000,
            category_column: None,
            status_column: None,
            export_filename: DEFAULT_EXPORT_FILENAME.to_string(),
            log_level: "warn".to_string(),
            theme: "light".to_string(),
            max_col_width: 30,
            form: FormConfig::default(),
        }
    }
}

/// `$HOME/.config/fieldbook/config.toml`
pub fn default_config_path() -> PathBuf {
    if let Some(home) = std::env::var_os("HOME") {
        PathBuf::from(home).join(".config/fieldbook/config.toml")
    } else {
        PathBuf::from(".config/fieldbook/config.toml")
    }
}

impl Config {
    /// Load from TOML file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| Error::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&content).map_err(|source| Error::ConfigParse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn from_toml(content: &str) -> std::result::Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// An explicit path must exist; otherwise the default location is used
    /// if present, falling back to built-in defaults.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        match explicit {
            Some(path) => Self::from_file(path),
            None => {
                let path = default_config_path();
                if path.exists() {
                    Self::from_file(&path)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    pub fn search_debounce(&self) -> Duration {
        Duration::from_millis(self.search_debounce_ms)
    }

    pub fn resize_debounce(&self) -> Duration {
        Duration::from_millis(self.resize_debounce_ms)
    }

    pub fn notification_ttl(&self) -> Duration {
        Duration::from_millis(self.notification_ttl_ms)
    }

    pub fn counter_duration(&self) -> Duration {
        Duration::from_millis(self.counter_duration_ms)
    }

    /// Unrecognized levels fall back to `warn`
    pub fn log_filter(&self) -> LevelFilter {
        self.log_level.parse().unwrap_or(LevelFilter::WARN)
    }
}
