//! Dependency initialization and wiring for the CSV indexer.

use std::sync::Arc;

use tracing::info;

use crate::config::Config;
use crate::IndexingError;
use csv_indexer_pipeline::{
    extractor::CsvExtractor,
    generator::{DocumentGenerator, DocumentSequence},
    loader::{BulkLoader, LoaderConfig},
    orchestrator::{IndexLifecycle, Orchestrator},
};
use csv_indexer_repository::{OpenSearchClient, SearchIndexProvider};
use csv_indexer_shared::FieldMapping;

/// Documents per bulk request.
const BATCH_SIZE: usize = 500;

/// Container for all initialized dependencies.
pub struct Dependencies {
    /// The configured orchestrator ready to run.
    pub orchestrator: Orchestrator,
}

impl Dependencies {
    /// Initialize all dependencies from the loaded configuration.
    ///
    /// Verifies that the search engine is reachable and loads the field
    /// mapping before any ingestion starts, so configuration problems
    /// fail the run up front.
    ///
    /// # Returns
    ///
    /// * `Ok(Dependencies)` - Initialized dependencies
    /// * `Err(IndexingError)` - If initialization fails
    pub async fn new(config: Config) -> Result<Self, IndexingError> {
        info!(
            url = %config.connection.url,
            index = %config.index.name,
            csv_directory = %config.csv_directory.display(),
            "Initializing dependencies"
        );

        let client = OpenSearchClient::new(&config.connection.url)
            .await
            .map_err(|e| {
                IndexingError::config(format!("Failed to create OpenSearch client: {}", e))
            })?;

        let healthy = client.health_check().await.map_err(|e| {
            IndexingError::config(format!("OpenSearch health check failed: {}", e))
        })?;

        if !healthy {
            return Err(IndexingError::config("OpenSearch cluster is unhealthy"));
        }

        info!("OpenSearch connection verified");

        let mapping = FieldMapping::from_file(&config.index.mapping_file)?;

        let lifecycle = IndexLifecycle {
            index: config.index.name.clone(),
            delete_existing: config.delete_index,
            mapping: mapping.properties().clone(),
            settings: config.index.settings.clone(),
        };

        let client: Arc<dyn SearchIndexProvider> = Arc::new(client);

        let extractor = CsvExtractor::new(&config.csv_directory);
        let generator =
            DocumentGenerator::new(mapping, &config.index.name, DocumentSequence::new());
        let loader = BulkLoader::with_config(
            client.clone(),
            LoaderConfig {
                batch_size: BATCH_SIZE,
                progress: true,
            },
        );

        let orchestrator = Orchestrator::new(client, extractor, generator, loader, lifecycle);

        Ok(Self { orchestrator })
    }
}
