//! Dependency initialization and wiring for the pipeline.

use std::sync::Arc;

use tracing::info;

use crate::config::PipelineSettings;
use crate::EtlError;
use permits_etl_pipeline::orchestrator::Orchestrator;
use permits_etl_pipeline::stages::{
    CuratedStage, IndexStage, PipelineStage, RawUploadStage, ReportStage, StagingStage,
};
use permits_etl_repository::{
    MongoDocumentStore, MySqlStagingStore, OpenSearchIndex, S3RawStore, INDEX_NAME,
};

/// Container for all initialized dependencies.
pub struct Dependencies {
    /// The configured orchestrator ready to run.
    pub orchestrator: Orchestrator,
}

impl Dependencies {
    /// Initialize all storage clients and wire them into the five
    /// pipeline stages.
    pub async fn new(settings: &PipelineSettings) -> Result<Self, EtlError> {
        info!(
            localstack_url = %settings.localstack_url,
            mysql_host = %settings.mysql_host,
            mongo_host = %settings.mongo_host,
            search_url = %settings.search_url,
            "Initializing dependencies"
        );

        let raw_store = Arc::new(
            S3RawStore::new(settings.s3_config())
                .await
                .map_err(|e| EtlError::config(format!("Failed to create S3 client: {}", e)))?,
        );

        let staging_store = Arc::new(
            MySqlStagingStore::connect(&settings.mysql_config())
                .await
                .map_err(|e| EtlError::config(format!("Failed to connect to MySQL: {}", e)))?,
        );

        let document_store = Arc::new(
            MongoDocumentStore::connect(&settings.mongo_config())
                .await
                .map_err(|e| EtlError::config(format!("Failed to connect to MongoDB: {}", e)))?,
        );

        let search_index = Arc::new(
            OpenSearchIndex::new(&settings.search_url, INDEX_NAME)
                .await
                .map_err(|e| {
                    EtlError::config(format!("Failed to create search client: {}", e))
                })?,
        );

        info!("Storage clients created");

        let stages: Vec<Box<dyn PipelineStage>> = vec![
            Box::new(RawUploadStage::new(
                raw_store.clone(),
                settings.raw_file_path.clone(),
            )),
            Box::new(StagingStage::new(raw_store.clone(), staging_store.clone())),
            Box::new(CuratedStage::new(
                staging_store.clone(),
                document_store.clone(),
            )),
            Box::new(IndexStage::new(
                document_store.clone(),
                search_index.clone(),
            )),
            Box::new(ReportStage::new(
                raw_store,
                staging_store,
                document_store,
                search_index,
                settings.report_path.clone(),
            )),
        ];

        Ok(Self {
            orchestrator: Orchestrator::new(stages),
        })
    }
}
