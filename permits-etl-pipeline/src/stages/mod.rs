//! Pipeline stages.
//!
//! Each stage is a zero-argument callable that either completes or
//! fails; the orchestrator sequences them and halts the chain on the
//! first failure. Stages read their entire input, transform it
//! wholesale, and write it wholesale — there is no streaming and no
//! partial commit.

mod curated;
mod index;
mod report;
mod staging;
mod upload;

use async_trait::async_trait;

use crate::errors::PipelineError;

pub use curated::CuratedStage;
pub use index::IndexStage;
pub use report::ReportStage;
pub use staging::StagingStage;
pub use upload::RawUploadStage;

/// A single step of the pipeline.
#[async_trait]
pub trait PipelineStage: Send + Sync {
    /// Stage name used in logs.
    fn name(&self) -> &'static str;

    /// Run the stage to completion.
    async fn run(&self) -> Result<(), PipelineError>;
}

#[cfg(test)]
pub(crate) mod testing {
    //! In-memory store fakes shared by the stage tests.

    use std::path::Path;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    use async_trait::async_trait;

    use permits_etl_repository::{
        DocumentStore, RawStore, SearchError, SearchIndexProvider, StagingStats, StagingStore,
        StoreError,
    };
    use permits_etl_shared::{CuratedDocument, RawRecord, SearchDocument, StagingRow};

    #[derive(Default)]
    pub struct MockRawStore {
        pub records: Mutex<Vec<RawRecord>>,
        pub uploads: AtomicUsize,
        pub verify_result: Mutex<bool>,
    }

    impl MockRawStore {
        pub fn with_records(records: Vec<RawRecord>) -> Self {
            Self {
                records: Mutex::new(records),
                uploads: AtomicUsize::new(0),
                verify_result: Mutex::new(true),
            }
        }
    }

    #[async_trait]
    impl RawStore for MockRawStore {
        async fn upload(&self, path: &Path) -> Result<(), StoreError> {
            if !path.exists() {
                return Err(StoreError::missing_input(format!(
                    "raw file not found: {}",
                    path.display()
                )));
            }
            self.uploads.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }

        async fn verify_upload(&self) -> Result<bool, StoreError> {
            Ok(*self.verify_result.lock().unwrap())
        }

        async fn fetch_records(&self) -> Result<Vec<RawRecord>, StoreError> {
            Ok(self.records.lock().unwrap().clone())
        }

        async fn object_count(&self) -> Result<u64, StoreError> {
            Ok(1)
        }
    }

    #[derive(Default)]
    pub struct MockStagingStore {
        pub rows: Mutex<Vec<StagingRow>>,
        pub replace_calls: AtomicUsize,
    }

    #[async_trait]
    impl StagingStore for MockStagingStore {
        async fn replace_all(&self, rows: &[StagingRow]) -> Result<u64, StoreError> {
            self.replace_calls.fetch_add(1, Ordering::SeqCst);
            *self.rows.lock().unwrap() = rows.to_vec();
            Ok(rows.len() as u64)
        }

        async fn fetch_all(&self) -> Result<Vec<StagingRow>, StoreError> {
            Ok(self.rows.lock().unwrap().clone())
        }

        async fn stats(&self) -> Result<StagingStats, StoreError> {
            let rows = self.rows.lock().unwrap();
            let count = rows.len() as u64;
            let avg = if rows.is_empty() {
                0.0
            } else {
                rows.iter().map(|r| r.value).sum::<f64>() / rows.len() as f64
            };
            Ok(StagingStats {
                row_count: count,
                avg_value: avg,
            })
        }
    }

    #[derive(Default)]
    pub struct MockDocumentStore {
        pub documents: Mutex<Vec<CuratedDocument>>,
        pub replace_calls: AtomicUsize,
    }

    #[async_trait]
    impl DocumentStore for MockDocumentStore {
        async fn replace_all(&self, documents: &[CuratedDocument]) -> Result<u64, StoreError> {
            self.replace_calls.fetch_add(1, Ordering::SeqCst);
            *self.documents.lock().unwrap() = documents.to_vec();
            Ok(documents.len() as u64)
        }

        async fn fetch_all(&self) -> Result<Vec<CuratedDocument>, StoreError> {
            Ok(self.documents.lock().unwrap().clone())
        }

        async fn count(&self) -> Result<u64, StoreError> {
            Ok(self.documents.lock().unwrap().len() as u64)
        }
    }

    #[derive(Default)]
    pub struct MockSearchIndex {
        pub documents: Mutex<Vec<SearchDocument>>,
        pub healthy: Mutex<bool>,
        pub recreate_calls: AtomicUsize,
    }

    impl MockSearchIndex {
        pub fn healthy() -> Self {
            Self {
                documents: Mutex::new(Vec::new()),
                healthy: Mutex::new(true),
                recreate_calls: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl SearchIndexProvider for MockSearchIndex {
        async fn health_check(&self) -> Result<bool, SearchError> {
            Ok(*self.healthy.lock().unwrap())
        }

        async fn recreate_index(&self) -> Result<(), SearchError> {
            self.recreate_calls.fetch_add(1, Ordering::SeqCst);
            self.documents.lock().unwrap().clear();
            Ok(())
        }

        async fn bulk_index(&self, documents: &[SearchDocument]) -> Result<(), SearchError> {
            self.documents
                .lock()
                .unwrap()
                .extend_from_slice(documents);
            Ok(())
        }

        async fn document_count(&self) -> Result<u64, SearchError> {
            Ok(self.documents.lock().unwrap().len() as u64)
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::testing::{MockDocumentStore, MockRawStore, MockSearchIndex, MockStagingStore};
    use super::{CuratedStage, IndexStage, PipelineStage, StagingStage};
    use permits_etl_shared::{
        ApplicationClass, RawGeometry, RawPermit, RawRecord, ValueCategory,
    };
    use serde_json::json;

    #[tokio::test]
    async fn test_two_record_run_carries_one_document_through_all_tiers() {
        let complete = RawRecord {
            permits: RawPermit {
                permit: Some("A1".to_string()),
                appl_type: Some("New Construction".to_string()),
                value: Some(json!(75_000)),
                description: Some("new deck".to_string()),
                ..Default::default()
            },
            geometry: RawGeometry {
                geometry_type: Some("Point".to_string()),
                coordinates: Some(json!([-75.7, 45.4])),
            },
            ..Default::default()
        };
        let anonymous = RawRecord::default();

        let raw_store = Arc::new(MockRawStore::with_records(vec![complete, anonymous]));
        let staging_store = Arc::new(MockStagingStore::default());
        let document_store = Arc::new(MockDocumentStore::default());
        let search_index = Arc::new(MockSearchIndex::healthy());

        StagingStage::new(raw_store, staging_store.clone())
            .run()
            .await
            .unwrap();
        CuratedStage::new(staging_store.clone(), document_store.clone())
            .run()
            .await
            .unwrap();
        IndexStage::new(document_store.clone(), search_index.clone())
            .run()
            .await
            .unwrap();

        let rows = staging_store.rows.lock().unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].permit_id, "A1");

        let documents = document_store.documents.lock().unwrap();
        assert_eq!(documents.len(), 1);
        assert_eq!(documents[0].labels, vec!["deck".to_string()]);
        assert_eq!(
            documents[0].value_category,
            Some(ValueCategory::Medium)
        );
        assert_eq!(
            documents[0].application_class,
            ApplicationClass::Construction
        );

        let indexed = search_index.documents.lock().unwrap();
        assert_eq!(indexed.len(), 1);
        let geo = indexed[0].geo_point.unwrap();
        assert_eq!(geo.lat, 45.4);
        assert_eq!(geo.lon, -75.7);
    }
}
