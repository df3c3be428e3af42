//! Trait definitions for the CSV indexer repository.

mod search_index_provider;

pub use search_index_provider::{DocumentResult, SearchIndexProvider};
