//! Configuration loading and dependency wiring for the CSV indexer.

mod dependencies;
mod settings;

pub use dependencies::Dependencies;
pub use settings::{Config, ConnectionConfig, IndexConfig};
