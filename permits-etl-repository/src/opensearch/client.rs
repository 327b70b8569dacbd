//! OpenSearch client implementation.
//!
//! Concrete implementation of [`SearchIndexProvider`] using the
//! OpenSearch Rust client. The index is rebuilt destructively on each
//! run: delete-if-exists, create with explicit mappings, bulk load.

use async_trait::async_trait;
use opensearch::{
    cluster::ClusterHealthParts,
    http::request::JsonBody,
    http::transport::{SingleNodeConnectionPool, TransportBuilder},
    indices::{IndicesCreateParts, IndicesDeleteParts, IndicesExistsParts},
    BulkParts, CountParts, OpenSearch,
};
use serde_json::{json, Value};
use tracing::{debug, error, info};
use url::Url;

use crate::errors::SearchError;
use crate::interfaces::SearchIndexProvider;
use crate::opensearch::index_config::get_index_settings;
use permits_etl_shared::SearchDocument;

/// OpenSearch-backed search index.
pub struct OpenSearchIndex {
    client: OpenSearch,
    index_name: String,
}

impl OpenSearchIndex {
    /// Create a new client connected to the specified URL.
    ///
    /// # Arguments
    ///
    /// * `url` - The OpenSearch server URL (e.g., "http://localhost:9200")
    /// * `index_name` - Target index for all operations
    pub async fn new(url: &str, index_name: &str) -> Result<Self, SearchError> {
        let parsed_url = Url::parse(url).map_err(|e| SearchError::connection(e.to_string()))?;

        let conn_pool = SingleNodeConnectionPool::new(parsed_url);
        let transport = TransportBuilder::new(conn_pool)
            .disable_proxy()
            .build()
            .map_err(|e| SearchError::connection(e.to_string()))?;

        let client = OpenSearch::new(transport);

        info!(url = %url, index = %index_name, "Created OpenSearch client");

        Ok(Self {
            client,
            index_name: index_name.to_string(),
        })
    }

    async fn index_exists(&self) -> Result<bool, SearchError> {
        let response = self
            .client
            .indices()
            .exists(IndicesExistsParts::Index(&[&self.index_name]))
            .send()
            .await
            .map_err(|e| SearchError::connection(e.to_string()))?;

        Ok(response.status_code().is_success())
    }
}

#[async_trait]
impl SearchIndexProvider for OpenSearchIndex {
    async fn health_check(&self) -> Result<bool, SearchError> {
        let response = self
            .client
            .cluster()
            .health(ClusterHealthParts::None)
            .send()
            .await
            .map_err(|e| SearchError::connection(e.to_string()))?;

        let health: Value = response
            .json()
            .await
            .map_err(|e| SearchError::parse(e.to_string()))?;

        let status = health
            .get("status")
            .and_then(|s| s.as_str())
            .unwrap_or("unknown");

        info!(status = %status, "OpenSearch cluster status");
        Ok(status == "green" || status == "yellow")
    }

    async fn recreate_index(&self) -> Result<(), SearchError> {
        if self.index_exists().await? {
            info!(index = %self.index_name, "Index already exists, deleting it first");

            let response = self
                .client
                .indices()
                .delete(IndicesDeleteParts::Index(&[&self.index_name]))
                .send()
                .await
                .map_err(|e| SearchError::index_creation(e.to_string()))?;

            if !response.status_code().is_success() {
                let body = response.text().await.unwrap_or_default();
                return Err(SearchError::index_creation(format!(
                    "failed to delete index '{}': {}",
                    self.index_name, body
                )));
            }
        }

        let response = self
            .client
            .indices()
            .create(IndicesCreateParts::Index(&self.index_name))
            .body(get_index_settings())
            .send()
            .await
            .map_err(|e| SearchError::index_creation(e.to_string()))?;

        if !response.status_code().is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SearchError::index_creation(format!(
                "failed to create index '{}': {}",
                self.index_name, body
            )));
        }

        info!(index = %self.index_name, "Index created");
        Ok(())
    }

    async fn bulk_index(&self, documents: &[SearchDocument]) -> Result<(), SearchError> {
        if documents.is_empty() {
            debug!(index = %self.index_name, "No documents to bulk index");
            return Ok(());
        }

        let mut body: Vec<JsonBody<Value>> = Vec::with_capacity(documents.len() * 2);
        for document in documents {
            // Keyed by permit id so a re-run replaces instead of duplicating.
            body.push(
                json!({"index": {"_index": self.index_name, "_id": document.row.permit_id}})
                    .into(),
            );
            let source = serde_json::to_value(document)
                .map_err(|e| SearchError::SerializationError(e.to_string()))?;
            body.push(source.into());
        }

        let response = self
            .client
            .bulk(BulkParts::Index(&self.index_name))
            .body(body)
            .send()
            .await
            .map_err(|e| SearchError::bulk_index(e.to_string()))?;

        let response_body: Value = response
            .json()
            .await
            .map_err(|e| SearchError::parse(e.to_string()))?;

        if response_body
            .get("errors")
            .and_then(|e| e.as_bool())
            .unwrap_or(false)
        {
            let failed = response_body
                .get("items")
                .and_then(|i| i.as_array())
                .map(|items| {
                    items
                        .iter()
                        .filter(|item| item.get("index").and_then(|i| i.get("error")).is_some())
                        .count()
                })
                .unwrap_or(0);

            error!(index = %self.index_name, failed = failed, "Bulk index had failures");
            return Err(SearchError::bulk_index(format!(
                "{} documents failed to index",
                failed
            )));
        }

        info!(
            index = %self.index_name,
            count = documents.len(),
            "Bulk indexed documents"
        );
        Ok(())
    }

    async fn document_count(&self) -> Result<u64, SearchError> {
        let response = self
            .client
            .count(CountParts::Index(&[&self.index_name]))
            .send()
            .await
            .map_err(|e| SearchError::connection(e.to_string()))?;

        let body: Value = response
            .json()
            .await
            .map_err(|e| SearchError::parse(e.to_string()))?;

        body.get("count")
            .and_then(|c| c.as_u64())
            .ok_or_else(|| SearchError::parse("count missing from response".to_string()))
    }
}
