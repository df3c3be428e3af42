//! Orchestrator module for the CSV indexer pipeline.
//!
//! Runs the index lifecycle and drives the extractor, converter,
//! generator, and loader strictly sequentially.

use std::sync::Arc;

use serde_json::Value;
use tracing::{info, instrument};

use crate::errors::PipelineError;
use crate::extractor::CsvExtractor;
use crate::generator::DocumentGenerator;
use crate::loader::{BulkLoader, IngestSummary};
use csv_indexer_repository::SearchIndexProvider;

/// Index lifecycle settings applied before ingestion.
#[derive(Debug, Clone)]
pub struct IndexLifecycle {
    /// The target index name.
    pub index: String,
    /// Delete the index first if it exists.
    pub delete_existing: bool,
    /// The `properties` mapping object for index creation.
    pub mapping: Value,
    /// Opaque index settings passed through to index creation.
    pub settings: Value,
}

impl IndexLifecycle {
    /// Apply the lifecycle: optionally delete, then create if missing.
    async fn ensure(&self, client: &dyn SearchIndexProvider) -> Result<(), PipelineError> {
        if self.delete_existing && client.index_exists(&self.index).await? {
            client.delete_index(&self.index).await?;
        }

        if !client.index_exists(&self.index).await? {
            info!(index = %self.index, "Creating index");
            client
                .create_index(&self.index, &self.mapping, &self.settings)
                .await?;
        }

        Ok(())
    }
}

/// Orchestrator that coordinates the pipeline components.
///
/// The orchestrator:
/// - Applies the index lifecycle (delete/create) before ingestion
/// - Streams rows one at a time through the generator into the loader
/// - Flushes the final partial batch and reports the ingest summary
///
/// The whole run is a single cooperative lazy pipeline: memory use is
/// bounded by one batch, not by the dataset size.
pub struct Orchestrator {
    client: Arc<dyn SearchIndexProvider>,
    extractor: CsvExtractor,
    generator: DocumentGenerator,
    loader: BulkLoader,
    lifecycle: IndexLifecycle,
}

impl Orchestrator {
    /// Create a new orchestrator with the given components.
    pub fn new(
        client: Arc<dyn SearchIndexProvider>,
        extractor: CsvExtractor,
        generator: DocumentGenerator,
        loader: BulkLoader,
        lifecycle: IndexLifecycle,
    ) -> Self {
        Self {
            client,
            extractor,
            generator,
            loader,
            lifecycle,
        }
    }

    /// Run the import to completion.
    ///
    /// Any extraction or request-level error aborts the run; per-document
    /// rejections are tallied in the returned summary instead.
    #[instrument(skip(self), fields(index = %self.lifecycle.index))]
    pub async fn run(&mut self) -> Result<IngestSummary, PipelineError> {
        self.lifecycle.ensure(self.client.as_ref()).await?;

        info!("Extracting CSV data");

        for row in self.extractor.rows()? {
            let document = self.generator.generate(row?);
            self.loader.load(document).await?;
        }

        self.loader.flush().await?;

        let summary = self.loader.summary();
        info!(
            succeeded = summary.succeeded,
            failed = summary.failed,
            "Import complete"
        );

        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::DocumentSequence;
    use async_trait::async_trait;
    use csv_indexer_repository::{DocumentResult, SearchIndexError};
    use csv_indexer_shared::{BulkDocument, FieldMapping};
    use serde_json::json;
    use std::fs;
    use std::io::Write;
    use std::path::Path;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
    use tokio::sync::Mutex;

    /// Mock provider recording lifecycle calls and indexed documents.
    struct MockProvider {
        exists: AtomicBool,
        deleted: AtomicUsize,
        created: AtomicUsize,
        documents: Mutex<Vec<BulkDocument>>,
    }

    impl MockProvider {
        fn new(exists: bool) -> Self {
            Self {
                exists: AtomicBool::new(exists),
                deleted: AtomicUsize::new(0),
                created: AtomicUsize::new(0),
                documents: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl SearchIndexProvider for MockProvider {
        async fn index_exists(&self, _index: &str) -> Result<bool, SearchIndexError> {
            Ok(self.exists.load(Ordering::SeqCst))
        }

        async fn delete_index(&self, _index: &str) -> Result<(), SearchIndexError> {
            self.deleted.fetch_add(1, Ordering::SeqCst);
            self.exists.store(false, Ordering::SeqCst);
            Ok(())
        }

        async fn create_index(
            &self,
            _index: &str,
            _mapping: &serde_json::Value,
            _settings: &serde_json::Value,
        ) -> Result<(), SearchIndexError> {
            self.created.fetch_add(1, Ordering::SeqCst);
            self.exists.store(true, Ordering::SeqCst);
            Ok(())
        }

        async fn bulk_create(
            &self,
            documents: &[BulkDocument],
        ) -> Result<Vec<DocumentResult>, SearchIndexError> {
            let mut stored = self.documents.lock().await;
            let mut results = Vec::new();
            for doc in documents {
                stored.push(doc.clone());
                results.push(DocumentResult {
                    id: doc.id,
                    success: true,
                    detail: None,
                });
            }
            Ok(results)
        }

        async fn health_check(&self) -> Result<bool, SearchIndexError> {
            Ok(true)
        }
    }

    fn write_file(dir: &Path, name: &str, content: &str) {
        let mut file = fs::File::create(dir.join(name)).unwrap();
        write!(file, "{}", content).unwrap();
    }

    fn orchestrator(
        provider: Arc<MockProvider>,
        directory: &Path,
        mapping: FieldMapping,
        delete_existing: bool,
    ) -> Orchestrator {
        let lifecycle = IndexLifecycle {
            index: "people".to_string(),
            delete_existing,
            mapping: mapping.properties().clone(),
            settings: json!({"number_of_shards": 1}),
        };
        let client: Arc<dyn SearchIndexProvider> = provider;

        Orchestrator::new(
            client.clone(),
            CsvExtractor::new(directory),
            DocumentGenerator::new(mapping, "people", DocumentSequence::new()),
            BulkLoader::new(client),
            lifecycle,
        )
    }

    #[tokio::test]
    async fn test_run_converts_and_ids_documents() {
        let dir = tempfile::tempdir().unwrap();
        write_file(dir.path(), "data.csv", "id;count\n1;\"3,5\"\n");

        let provider = Arc::new(MockProvider::new(false));
        let mapping = FieldMapping::from_value(json!({"count": {"type": "integer"}})).unwrap();
        let mut orchestrator = orchestrator(provider.clone(), dir.path(), mapping, false);

        let summary = orchestrator.run().await.unwrap();

        assert_eq!(summary, IngestSummary { succeeded: 1, failed: 0 });
        let documents = provider.documents.lock().await;
        assert_eq!(documents.len(), 1);
        assert_eq!(documents[0].id, 1);
        assert_eq!(documents[0].source["count"], json!(3));
    }

    #[tokio::test]
    async fn test_run_null_literal_yields_null_payload() {
        let dir = tempfile::tempdir().unwrap();
        write_file(dir.path(), "data.csv", "id;count\n1;null\n");

        let provider = Arc::new(MockProvider::new(false));
        let mapping = FieldMapping::from_value(json!({"count": {"type": "integer"}})).unwrap();
        let mut orchestrator = orchestrator(provider.clone(), dir.path(), mapping, false);

        orchestrator.run().await.unwrap();

        let documents = provider.documents.lock().await;
        assert_eq!(documents[0].source["count"], serde_json::Value::Null);
    }

    #[tokio::test]
    async fn test_run_ids_span_files() {
        let dir = tempfile::tempdir().unwrap();
        write_file(dir.path(), "a.csv", "id\n1\n2\n");
        write_file(dir.path(), "b.csv", "id\n3\n4\n5\n");

        let provider = Arc::new(MockProvider::new(false));
        let mapping = FieldMapping::from_value(json!({})).unwrap();
        let mut orchestrator = orchestrator(provider.clone(), dir.path(), mapping, false);

        let summary = orchestrator.run().await.unwrap();

        assert_eq!(summary.total(), 5);
        let mut ids: Vec<u64> = provider
            .documents
            .lock()
            .await
            .iter()
            .map(|d| d.id)
            .collect();
        ids.sort_unstable();
        assert_eq!(ids, vec![1, 2, 3, 4, 5]);
    }

    #[tokio::test]
    async fn test_lifecycle_deletes_then_recreates() {
        let dir = tempfile::tempdir().unwrap();
        write_file(dir.path(), "data.csv", "id\n1\n");

        let provider = Arc::new(MockProvider::new(true));
        let mapping = FieldMapping::from_value(json!({})).unwrap();
        let mut orchestrator = orchestrator(provider.clone(), dir.path(), mapping, true);

        orchestrator.run().await.unwrap();

        assert_eq!(provider.deleted.load(Ordering::SeqCst), 1);
        assert_eq!(provider.created.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_lifecycle_keeps_existing_index_without_delete_flag() {
        let dir = tempfile::tempdir().unwrap();
        write_file(dir.path(), "data.csv", "id\n1\n");

        let provider = Arc::new(MockProvider::new(true));
        let mapping = FieldMapping::from_value(json!({})).unwrap();
        let mut orchestrator = orchestrator(provider.clone(), dir.path(), mapping, false);

        orchestrator.run().await.unwrap();

        assert_eq!(provider.deleted.load(Ordering::SeqCst), 0);
        assert_eq!(provider.created.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_missing_directory_is_fatal() {
        let provider = Arc::new(MockProvider::new(false));
        let mapping = FieldMapping::from_value(json!({})).unwrap();
        let mut orchestrator = orchestrator(
            provider,
            Path::new("/nonexistent/csv/dir"),
            mapping,
            false,
        );

        assert!(orchestrator.run().await.is_err());
    }
}
