//! Loader module for the CSV indexer pipeline.
//!
//! Batches documents and submits them to the search index, tallying
//! per-document success and failure.

use std::io::Write;
use std::sync::Arc;

use tracing::{debug, warn};

use crate::errors::PipelineError;
use csv_indexer_repository::SearchIndexProvider;
use csv_indexer_shared::BulkDocument;

/// Configuration for the bulk loader.
#[derive(Debug, Clone)]
pub struct LoaderConfig {
    /// Number of documents to batch before flushing.
    pub batch_size: usize,
    /// Whether to print the in-place progress line on stdout.
    pub progress: bool,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            batch_size: 500,
            progress: false,
        }
    }
}

/// Running tally of per-document outcomes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IngestSummary {
    /// Documents accepted by the index.
    pub succeeded: usize,
    /// Documents rejected by the index.
    pub failed: usize,
}

impl IngestSummary {
    /// Total number of documents submitted.
    pub fn total(&self) -> usize {
        self.succeeded + self.failed
    }
}

/// Loader that submits documents to the search index in batches.
///
/// Documents are buffered until the batch size is reached, then sent as
/// a single bulk request. Each document's outcome is recorded in the
/// summary; a rejected document does not halt the stream. Only a failure
/// of the bulk request as a whole is fatal.
pub struct BulkLoader {
    client: Arc<dyn SearchIndexProvider>,
    config: LoaderConfig,
    pending: Vec<BulkDocument>,
    summary: IngestSummary,
}

impl BulkLoader {
    /// Create a new loader with default configuration.
    pub fn new(client: Arc<dyn SearchIndexProvider>) -> Self {
        Self::with_config(client, LoaderConfig::default())
    }

    /// Create a new loader with custom configuration.
    pub fn with_config(client: Arc<dyn SearchIndexProvider>, config: LoaderConfig) -> Self {
        let batch_size = config.batch_size;
        Self {
            client,
            config,
            pending: Vec::with_capacity(batch_size),
            summary: IngestSummary::default(),
        }
    }

    /// Queue a document, flushing if the batch is full.
    pub async fn load(&mut self, document: BulkDocument) -> Result<(), PipelineError> {
        self.pending.push(document);

        if self.pending.len() >= self.config.batch_size {
            self.flush().await?;
        }

        Ok(())
    }

    /// Submit all pending documents and update the tally.
    pub async fn flush(&mut self) -> Result<(), PipelineError> {
        if self.pending.is_empty() {
            return Ok(());
        }

        let documents: Vec<BulkDocument> = self.pending.drain(..).collect();
        let count = documents.len();

        debug!(count = count, "Flushing documents to search index");

        let results = self.client.bulk_create(&documents).await?;

        for result in results {
            if result.success {
                self.summary.succeeded += 1;
            } else {
                self.summary.failed += 1;
                warn!(
                    id = result.id,
                    detail = result.detail.as_deref().unwrap_or("unknown"),
                    "Document rejected by index"
                );
            }
        }

        if self.config.progress {
            print!(
                "Succeed: {} | Failed: {}\r",
                self.summary.succeeded, self.summary.failed
            );
            let _ = std::io::stdout().flush();
        }

        Ok(())
    }

    /// The tally so far.
    pub fn summary(&self) -> IngestSummary {
        self.summary
    }
}
