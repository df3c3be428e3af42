//! YAML configuration file loading.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use serde_json::Value;

use crate::IndexingError;

/// Environment variable overriding the config file path.
pub const CONFIG_PATH_ENV: &str = "CSV_INDEXER_CONFIG";

/// Default config file path, relative to the working directory.
pub const DEFAULT_CONFIG_PATH: &str = "config.yml";

/// Top-level configuration loaded from the YAML config file.
///
/// There are no command-line flags; all configuration comes from this
/// file, whose path can be overridden with `CSV_INDEXER_CONFIG`.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Search engine connection settings.
    pub connection: ConnectionConfig,
    /// Target index settings.
    pub index: IndexConfig,
    /// Delete the index before ingestion if it exists.
    pub delete_index: bool,
    /// Directory containing the CSV files to import.
    pub csv_directory: PathBuf,
}

/// Search engine endpoint descriptor.
#[derive(Debug, Clone, Deserialize)]
pub struct ConnectionConfig {
    /// The server URL (e.g., "http://localhost:9200").
    pub url: String,
}

/// Target index settings.
#[derive(Debug, Clone, Deserialize)]
pub struct IndexConfig {
    /// The index name.
    pub name: String,
    /// Path to the JSON field-mapping document.
    pub mapping_file: PathBuf,
    /// Opaque settings object passed through to index creation.
    #[serde(default = "default_settings")]
    pub settings: Value,
}

fn default_settings() -> Value {
    Value::Object(serde_json::Map::new())
}

impl Config {
    /// Load the config from the default path or the env override.
    pub fn load() -> Result<Self, IndexingError> {
        let path =
            env::var(CONFIG_PATH_ENV).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
        Self::from_path(&path)
    }

    /// Load the config from an explicit path.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, IndexingError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            IndexingError::config(format!("Failed to read {}: {}", path.display(), e))
        })?;
        let config: Config = serde_yaml::from_str(&content)?;
        Ok(config)
    }
}
