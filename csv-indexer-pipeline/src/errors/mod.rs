//! Error types for the CSV indexer pipeline.

use csv_indexer_repository::SearchIndexError;
use thiserror::Error;

/// Errors that can occur in the CSV indexer pipeline.
///
/// All of these are fatal to the run; per-document rejections are tallied
/// by the loader instead of surfacing here.
#[derive(Error, Debug)]
pub enum PipelineError {
    /// Error reading the CSV directory or a file within it.
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// Malformed CSV content.
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),

    /// Error from the search index.
    #[error("Search index error: {0}")]
    SearchIndexError(#[from] SearchIndexError),
}
