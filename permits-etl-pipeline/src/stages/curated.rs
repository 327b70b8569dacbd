//! Curated stage: staging rows -> enriched documents -> document store.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use crate::enricher::RecordEnricher;
use crate::errors::PipelineError;
use crate::stages::PipelineStage;
use permits_etl_repository::{DocumentStore, StagingStore};

/// Fetches the staging snapshot, enriches it, and fully replaces the
/// curated collection.
pub struct CuratedStage {
    staging_store: Arc<dyn StagingStore>,
    document_store: Arc<dyn DocumentStore>,
}

impl CuratedStage {
    pub fn new(
        staging_store: Arc<dyn StagingStore>,
        document_store: Arc<dyn DocumentStore>,
    ) -> Self {
        Self {
            staging_store,
            document_store,
        }
    }
}

#[async_trait]
impl PipelineStage for CuratedStage {
    fn name(&self) -> &'static str {
        "curated"
    }

    async fn run(&self) -> Result<(), PipelineError> {
        let rows = self.staging_store.fetch_all().await?;
        let documents = RecordEnricher::enrich(rows);
        let written = self.document_store.replace_all(&documents).await?;

        info!(documents = written, "Curated collection loaded");
        Ok(())
    }
}
