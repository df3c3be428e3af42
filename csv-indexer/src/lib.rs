//! # CSV Indexer
//!
//! Main library for the CSV indexer.
//!
//! This crate provides the entry point and configuration for running
//! the CSV import pipeline.

pub mod config;

pub use config::{Config, Dependencies};

use thiserror::Error;

/// Errors that can occur during importer initialization or execution.
#[derive(Error, Debug)]
pub enum IndexingError {
    /// Configuration error.
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// The config file is not valid YAML.
    #[error("Config parse error: {0}")]
    ConfigParseError(#[from] serde_yaml::Error),

    /// Field mapping error.
    #[error("Mapping error: {0}")]
    MappingError(#[from] csv_indexer_shared::MappingError),

    /// Pipeline error.
    #[error("Pipeline error: {0}")]
    PipelineError(#[from] csv_indexer_pipeline::PipelineError),

    /// Search index error.
    #[error("Search index error: {0}")]
    SearchIndexError(#[from] csv_indexer_repository::SearchIndexError),

    /// IO error.
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl IndexingError {
    /// Create a configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::ConfigError(msg.into())
    }
}
