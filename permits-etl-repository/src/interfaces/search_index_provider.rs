//! Search engine interface.

use async_trait::async_trait;

use crate::errors::SearchError;
use permits_etl_shared::SearchDocument;

/// Search engine operations for the index zone.
///
/// Implementations can be swapped for different backends (OpenSearch,
/// mock, etc.) enabling easy testing.
#[async_trait]
pub trait SearchIndexProvider: Send + Sync {
    /// Check if the search engine is healthy and reachable.
    ///
    /// # Returns
    ///
    /// * `Ok(true)` - the engine is healthy
    /// * `Ok(false)` - the engine responded but is unhealthy
    /// * `Err(SearchError)` - the health check failed to execute
    async fn health_check(&self) -> Result<bool, SearchError>;

    /// Destructively recreate the index: delete it if it exists, then
    /// create it with the explicit field-type mapping.
    async fn recreate_index(&self) -> Result<(), SearchError>;

    /// Bulk-load documents into the index in a single pass.
    async fn bulk_index(&self, documents: &[SearchDocument]) -> Result<(), SearchError>;

    /// Number of documents currently in the index.
    async fn document_count(&self) -> Result<u64, SearchError>;
}
