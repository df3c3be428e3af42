//! OpenSearch client implementation.
//!
//! This module provides the concrete implementation of `SearchIndexProvider`
//! using the OpenSearch Rust client.

use async_trait::async_trait;
use opensearch::{
    cluster::ClusterHealthParts,
    http::request::JsonBody,
    http::transport::{SingleNodeConnectionPool, TransportBuilder},
    indices::{IndicesCreateParts, IndicesDeleteParts, IndicesExistsParts},
    BulkParts, OpenSearch,
};
use serde_json::{json, Map, Value};
use tracing::{debug, error, info};
use url::Url;

use crate::errors::SearchIndexError;
use crate::interfaces::{DocumentResult, SearchIndexProvider};
use csv_indexer_shared::BulkDocument;

/// OpenSearch client implementation.
///
/// Provides index lifecycle and bulk ingestion against an OpenSearch node.
///
/// # Example
///
/// ```ignore
/// let client = OpenSearchClient::new("http://localhost:9200").await?;
///
/// if !client.index_exists("people").await? {
///     client.create_index("people", &mapping, &settings).await?;
/// }
/// let results = client.bulk_create(&documents).await?;
/// ```
pub struct OpenSearchClient {
    client: OpenSearch,
}

impl OpenSearchClient {
    /// Create a new OpenSearch client connected to the specified URL.
    ///
    /// # Arguments
    ///
    /// * `url` - The OpenSearch server URL (e.g., "http://localhost:9200")
    ///
    /// # Returns
    ///
    /// * `Ok(OpenSearchClient)` - A new client instance
    /// * `Err(SearchIndexError)` - If connection setup fails
    pub async fn new(url: &str) -> Result<Self, SearchIndexError> {
        let parsed_url =
            Url::parse(url).map_err(|e| SearchIndexError::connection(e.to_string()))?;

        let conn_pool = SingleNodeConnectionPool::new(parsed_url);
        let transport = TransportBuilder::new(conn_pool)
            .disable_proxy()
            .build()
            .map_err(|e| SearchIndexError::connection(e.to_string()))?;

        let client = OpenSearch::new(transport);

        info!(url = %url, "Created OpenSearch client");

        Ok(Self { client })
    }

    /// Build the alternating action/source lines for a bulk request.
    fn bulk_lines(documents: &[BulkDocument]) -> Vec<Value> {
        let mut lines = Vec::with_capacity(documents.len() * 2);

        for doc in documents {
            let mut action = Map::new();
            action.insert(
                doc.op.as_str().to_string(),
                json!({"_index": doc.index, "_id": doc.id}),
            );
            lines.push(Value::Object(action));
            lines.push(Value::Object(doc.source.clone()));
        }

        lines
    }

    /// Map a bulk response body onto per-document results.
    ///
    /// The bulk API returns one item per submitted operation, in order; a
    /// length mismatch means the response cannot be trusted.
    fn parse_bulk_response(
        documents: &[BulkDocument],
        body: &Value,
    ) -> Result<Vec<DocumentResult>, SearchIndexError> {
        let items = body
            .get("items")
            .and_then(Value::as_array)
            .ok_or_else(|| SearchIndexError::parse("bulk response has no items array"))?;

        if items.len() != documents.len() {
            return Err(SearchIndexError::parse(format!(
                "bulk response has {} items for {} documents",
                items.len(),
                documents.len()
            )));
        }

        let mut results = Vec::with_capacity(documents.len());
        for (doc, item) in documents.iter().zip(items) {
            let outcome = item
                .get(doc.op.as_str())
                .ok_or_else(|| SearchIndexError::parse("bulk item missing operation key"))?;

            let status = outcome
                .get("status")
                .and_then(Value::as_u64)
                .unwrap_or(0);
            let detail = outcome.get("error").map(|e| {
                e.get("reason")
                    .and_then(Value::as_str)
                    .map(String::from)
                    .unwrap_or_else(|| e.to_string())
            });

            results.push(DocumentResult {
                id: doc.id,
                success: detail.is_none() && (200..300).contains(&status),
                detail,
            });
        }

        Ok(results)
    }
}

#[async_trait]
impl SearchIndexProvider for OpenSearchClient {
    async fn index_exists(&self, index: &str) -> Result<bool, SearchIndexError> {
        let response = self
            .client
            .indices()
            .exists(IndicesExistsParts::Index(&[index]))
            .send()
            .await
            .map_err(|e| SearchIndexError::connection(e.to_string()))?;

        let status = response.status_code();
        if status.is_success() {
            Ok(true)
        } else if status.as_u16() == 404 {
            Ok(false)
        } else {
            Err(SearchIndexError::index(format!(
                "Exists check failed with status {}",
                status
            )))
        }
    }

    async fn delete_index(&self, index: &str) -> Result<(), SearchIndexError> {
        let response = self
            .client
            .indices()
            .delete(IndicesDeleteParts::Index(&[index]))
            .send()
            .await
            .map_err(|e| SearchIndexError::connection(e.to_string()))?;

        let status = response.status_code();

        // 404 is acceptable - index may not exist
        if !status.is_success() && status.as_u16() != 404 {
            let error_body = response.text().await.unwrap_or_default();
            error!(status = %status, body = %error_body, "Delete index request failed");
            return Err(SearchIndexError::index_deletion(format!(
                "Delete failed with status {}: {}",
                status, error_body
            )));
        }

        info!(index = %index, "Index deleted");
        Ok(())
    }

    async fn create_index(
        &self,
        index: &str,
        mapping: &Value,
        settings: &Value,
    ) -> Result<(), SearchIndexError> {
        let body = json!({
            "mappings": {"properties": mapping},
            "settings": settings,
        });

        let response = self
            .client
            .indices()
            .create(IndicesCreateParts::Index(index))
            .body(body)
            .send()
            .await
            .map_err(|e| SearchIndexError::connection(e.to_string()))?;

        let status = response.status_code();
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            error!(status = %status, body = %error_body, "Create index request failed");
            return Err(SearchIndexError::index_creation(format!(
                "Create failed with status {}: {}",
                status, error_body
            )));
        }

        info!(index = %index, "Index created");
        Ok(())
    }

    async fn bulk_create(
        &self,
        documents: &[BulkDocument],
    ) -> Result<Vec<DocumentResult>, SearchIndexError> {
        if documents.is_empty() {
            return Ok(Vec::new());
        }

        let body: Vec<JsonBody<Value>> = Self::bulk_lines(documents)
            .into_iter()
            .map(Into::into)
            .collect();

        let response = self
            .client
            .bulk(BulkParts::None)
            .body(body)
            .send()
            .await
            .map_err(|e| SearchIndexError::bulk(e.to_string()))?;

        let status = response.status_code();
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            error!(status = %status, body = %error_body, "Bulk request failed");
            return Err(SearchIndexError::bulk(format!(
                "Bulk request failed with status {}: {}",
                status, error_body
            )));
        }

        let response_body: Value = response
            .json()
            .await
            .map_err(|e| SearchIndexError::parse(e.to_string()))?;

        let results = Self::parse_bulk_response(documents, &response_body)?;

        debug!(
            count = results.len(),
            failed = results.iter().filter(|r| !r.success).count(),
            "Bulk request completed"
        );

        Ok(results)
    }

    async fn health_check(&self) -> Result<bool, SearchIndexError> {
        let response = self
            .client
            .cluster()
            .health(ClusterHealthParts::None)
            .send()
            .await
            .map_err(|e| SearchIndexError::connection(e.to_string()))?;

        if !response.status_code().is_success() {
            return Ok(false);
        }

        let body: Value = response
            .json()
            .await
            .map_err(|e| SearchIndexError::parse(e.to_string()))?;

        Ok(body
            .get("status")
            .and_then(Value::as_str)
            .map(|s| s != "red")
            .unwrap_or(false))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use csv_indexer_shared::OperationKind;

    fn test_document(id: u64) -> BulkDocument {
        let mut source = Map::new();
        source.insert("name".to_string(), json!("test"));
        BulkDocument::new(id, "people", source)
    }

    #[test]
    fn test_bulk_lines_alternate_action_and_source() {
        let docs = vec![test_document(1), test_document(2)];

        let lines = OpenSearchClient::bulk_lines(&docs);

        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0], json!({"create": {"_index": "people", "_id": 1}}));
        assert_eq!(lines[1], json!({"name": "test"}));
        assert_eq!(lines[2], json!({"create": {"_index": "people", "_id": 2}}));
    }

    #[test]
    fn test_bulk_lines_operation_kind() {
        let doc = test_document(7);
        assert_eq!(doc.op, OperationKind::Create);

        let lines = OpenSearchClient::bulk_lines(&[doc]);
        assert!(lines[0].get("create").is_some());
    }

    #[test]
    fn test_parse_bulk_response_success() {
        let docs = vec![test_document(1), test_document(2)];
        let body = json!({
            "errors": false,
            "items": [
                {"create": {"_index": "people", "_id": "1", "status": 201}},
                {"create": {"_index": "people", "_id": "2", "status": 201}}
            ]
        });

        let results = OpenSearchClient::parse_bulk_response(&docs, &body).unwrap();

        assert_eq!(results.len(), 2);
        assert!(results.iter().all(|r| r.success));
        assert_eq!(results[0].id, 1);
        assert_eq!(results[1].id, 2);
    }

    #[test]
    fn test_parse_bulk_response_partial_failure() {
        let docs = vec![test_document(1), test_document(2)];
        let body = json!({
            "errors": true,
            "items": [
                {"create": {"_index": "people", "_id": "1", "status": 201}},
                {"create": {
                    "_index": "people",
                    "_id": "2",
                    "status": 409,
                    "error": {"type": "version_conflict_engine_exception", "reason": "document already exists"}
                }}
            ]
        });

        let results = OpenSearchClient::parse_bulk_response(&docs, &body).unwrap();

        assert!(results[0].success);
        assert!(!results[1].success);
        assert_eq!(
            results[1].detail.as_deref(),
            Some("document already exists")
        );
    }

    #[test]
    fn test_parse_bulk_response_length_mismatch() {
        let docs = vec![test_document(1), test_document(2)];
        let body = json!({"errors": false, "items": [{"create": {"status": 201}}]});

        let result = OpenSearchClient::parse_bulk_response(&docs, &body);
        assert!(matches!(result, Err(SearchIndexError::ParseError(_))));
    }

    #[test]
    fn test_parse_bulk_response_missing_items() {
        let docs = vec![test_document(1)];
        let body = json!({"took": 3});

        let result = OpenSearchClient::parse_bulk_response(&docs, &body);
        assert!(matches!(result, Err(SearchIndexError::ParseError(_))));
    }
}
