//! Staging stage: raw records -> normalized rows -> relational table.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use crate::errors::PipelineError;
use crate::normalizer::RecordNormalizer;
use crate::stages::PipelineStage;
use permits_etl_repository::{RawStore, StagingStore};

/// Fetches the raw snapshot, normalizes it, and fully replaces the
/// staging table.
pub struct StagingStage {
    raw_store: Arc<dyn RawStore>,
    staging_store: Arc<dyn StagingStore>,
}

impl StagingStage {
    pub fn new(raw_store: Arc<dyn RawStore>, staging_store: Arc<dyn StagingStore>) -> Self {
        Self {
            raw_store,
            staging_store,
        }
    }
}

#[async_trait]
impl PipelineStage for StagingStage {
    fn name(&self) -> &'static str {
        "staging"
    }

    async fn run(&self) -> Result<(), PipelineError> {
        let records = self.raw_store.fetch_records().await?;
        let rows = RecordNormalizer::normalize(records);
        let written = self.staging_store.replace_all(&rows).await?;

        info!(rows = written, "Staging table loaded");
        Ok(())
    }
}
