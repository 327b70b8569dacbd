//! Index stage: curated documents -> search documents -> search index.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use crate::errors::PipelineError;
use crate::projector::SearchProjector;
use crate::stages::PipelineStage;
use permits_etl_repository::{DocumentStore, SearchError, SearchIndexProvider};

/// Fetches the curated snapshot, projects it, and rebuilds the search
/// index with a single bulk load.
pub struct IndexStage {
    document_store: Arc<dyn DocumentStore>,
    search_index: Arc<dyn SearchIndexProvider>,
}

impl IndexStage {
    pub fn new(
        document_store: Arc<dyn DocumentStore>,
        search_index: Arc<dyn SearchIndexProvider>,
    ) -> Self {
        Self {
            document_store,
            search_index,
        }
    }
}

#[async_trait]
impl PipelineStage for IndexStage {
    fn name(&self) -> &'static str {
        "index"
    }

    async fn run(&self) -> Result<(), PipelineError> {
        let documents = self.document_store.fetch_all().await?;
        let projected = SearchProjector::project(documents);

        // Connectivity must be verified before any index operation.
        if !self.search_index.health_check().await? {
            return Err(SearchError::connection("search engine is unhealthy").into());
        }

        self.search_index.recreate_index().await?;
        self.search_index.bulk_index(&projected).await?;

        info!(documents = projected.len(), "Search index rebuilt");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stages::testing::{MockDocumentStore, MockSearchIndex};
    use permits_etl_shared::{ApplicationClass, CuratedDocument, GeoPoint, StagingRow};
    use std::sync::atomic::Ordering;

    fn curated(permit_id: &str) -> CuratedDocument {
        CuratedDocument {
            row: StagingRow::with_permit_id(permit_id),
            labels: vec![],
            application_class: ApplicationClass::Construction,
            value_category: None,
            geo_point: GeoPoint::new(-75.7, 45.4),
        }
    }

    #[tokio::test]
    async fn test_index_rebuilt_and_loaded() {
        let document_store = Arc::new(MockDocumentStore::default());
        *document_store.documents.lock().unwrap() = vec![curated("A1"), curated("B2")];
        let search_index = Arc::new(MockSearchIndex::healthy());

        let stage = IndexStage::new(document_store, search_index.clone());
        stage.run().await.unwrap();

        assert_eq!(search_index.recreate_calls.load(Ordering::SeqCst), 1);
        let documents = search_index.documents.lock().unwrap();
        assert_eq!(documents.len(), 2);
        let geo = documents[0].geo_point.unwrap();
        assert_eq!(geo.lat, 45.4);
        assert_eq!(geo.lon, -75.7);
    }

    #[tokio::test]
    async fn test_unhealthy_engine_is_fatal() {
        let document_store = Arc::new(MockDocumentStore::default());
        let search_index = Arc::new(MockSearchIndex::default());

        let stage = IndexStage::new(document_store, search_index.clone());
        let result = stage.run().await;

        assert!(result.is_err());
        // No index operation may happen after a failed health check.
        assert_eq!(search_index.recreate_calls.load(Ordering::SeqCst), 0);
    }
}
