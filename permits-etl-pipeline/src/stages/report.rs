//! Report stage: counts and analytics across all tiers -> JSON file.

use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tracing::info;

use crate::errors::PipelineError;
use crate::report::{summarize_curated, Analytics, DataZones, PipelineReport};
use crate::stages::PipelineStage;
use permits_etl_repository::{DocumentStore, RawStore, SearchIndexProvider, StagingStore};

/// Queries every storage tier and writes a JSON summary report.
pub struct ReportStage {
    raw_store: Arc<dyn RawStore>,
    staging_store: Arc<dyn StagingStore>,
    document_store: Arc<dyn DocumentStore>,
    search_index: Arc<dyn SearchIndexProvider>,
    report_path: PathBuf,
}

impl ReportStage {
    pub fn new(
        raw_store: Arc<dyn RawStore>,
        staging_store: Arc<dyn StagingStore>,
        document_store: Arc<dyn DocumentStore>,
        search_index: Arc<dyn SearchIndexProvider>,
        report_path: PathBuf,
    ) -> Self {
        Self {
            raw_store,
            staging_store,
            document_store,
            search_index,
            report_path,
        }
    }

    async fn build_report(&self) -> Result<PipelineReport, PipelineError> {
        let raw_objects = self.raw_store.object_count().await?;
        let staging = self.staging_store.stats().await?;
        let documents = self.document_store.fetch_all().await?;
        let curated_documents = self.document_store.count().await?;
        let indexed_documents = self.search_index.document_count().await?;

        let summary = summarize_curated(&documents);

        Ok(PipelineReport {
            timestamp: Utc::now().to_rfc3339(),
            data_zones: DataZones {
                raw_objects,
                staging_rows: staging.row_count,
                curated_documents,
                indexed_documents,
            },
            analytics: Analytics {
                avg_permit_value: staging.avg_value,
                value_category_distribution: summary.value_category_distribution,
                top_labels: summary.top_labels,
            },
        })
    }
}

#[async_trait]
impl PipelineStage for ReportStage {
    fn name(&self) -> &'static str {
        "report"
    }

    async fn run(&self) -> Result<(), PipelineError> {
        let report = self.build_report().await?;

        if let Some(parent) = self.report_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let body = serde_json::to_string_pretty(&report)
            .map_err(|e| PipelineError::stage(format!("failed to serialize report: {e}")))?;
        std::fs::write(&self.report_path, body)?;

        info!(path = %self.report_path.display(), "Report written");
        Ok(())
    }
}
