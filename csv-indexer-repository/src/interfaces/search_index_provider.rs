//! Search index provider trait definition.
//!
//! This module defines the abstract interface for index lifecycle and bulk
//! ingestion operations, allowing for different backend implementations
//! (OpenSearch, mock, etc.).

use async_trait::async_trait;
use serde_json::Value;

use crate::errors::SearchIndexError;
use csv_indexer_shared::BulkDocument;

/// Outcome of a single document within a bulk request.
///
/// Results are returned in the same order as the submitted documents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentResult {
    /// The document identifier.
    pub id: u64,
    /// Whether the operation was accepted by the index.
    pub success: bool,
    /// Error detail reported by the index for rejected documents.
    pub detail: Option<String>,
}

/// Abstract interface for search index operations.
///
/// This trait defines the operations the importer needs: index lifecycle
/// management and bulk document creation. Implementations can be swapped
/// for different backends enabling easy testing.
///
/// # Thread Safety
///
/// All implementations must be `Send + Sync` to allow use across async tasks.
#[async_trait]
pub trait SearchIndexProvider: Send + Sync {
    /// Check whether the given index exists.
    ///
    /// # Returns
    ///
    /// * `Ok(true)` - The index exists
    /// * `Ok(false)` - The index does not exist
    /// * `Err(SearchIndexError)` - If the check fails
    async fn index_exists(&self, index: &str) -> Result<bool, SearchIndexError>;

    /// Delete the given index.
    ///
    /// Deleting an index that does not exist is not an error.
    async fn delete_index(&self, index: &str) -> Result<(), SearchIndexError>;

    /// Create the given index with the provided field mapping and settings.
    ///
    /// # Arguments
    ///
    /// * `index` - The index name
    /// * `mapping` - The `properties` object describing field types
    /// * `settings` - Opaque index settings passed through verbatim
    async fn create_index(
        &self,
        index: &str,
        mapping: &Value,
        settings: &Value,
    ) -> Result<(), SearchIndexError>;

    /// Submit a batch of documents in a single bulk request.
    ///
    /// Returns one result per document, in submission order. A rejected
    /// document is reported in its result and does not fail the batch;
    /// only request-level failures return an error.
    async fn bulk_create(
        &self,
        documents: &[BulkDocument],
    ) -> Result<Vec<DocumentResult>, SearchIndexError>;

    /// Check if the search engine is healthy and reachable.
    ///
    /// # Returns
    ///
    /// * `Ok(true)` - If the search engine is healthy
    /// * `Ok(false)` - If the search engine is unhealthy
    /// * `Err(SearchIndexError)` - If the health check fails to execute
    async fn health_check(&self) -> Result<bool, SearchIndexError>;
}
