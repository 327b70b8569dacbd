//! Raw upload stage: local file -> object store.

use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;
use tracing::{info, warn};

use crate::errors::PipelineError;
use crate::stages::PipelineStage;
use permits_etl_repository::RawStore;

/// Uploads the raw newline-delimited JSON dataset to object storage
/// and verifies the object afterwards.
pub struct RawUploadStage {
    raw_store: Arc<dyn RawStore>,
    file_path: PathBuf,
}

impl RawUploadStage {
    pub fn new(raw_store: Arc<dyn RawStore>, file_path: PathBuf) -> Self {
        Self {
            raw_store,
            file_path,
        }
    }
}

#[async_trait]
impl PipelineStage for RawUploadStage {
    fn name(&self) -> &'static str {
        "raw_upload"
    }

    async fn run(&self) -> Result<(), PipelineError> {
        self.raw_store.upload(&self.file_path).await?;

        // A verification miss is suspicious but not fatal; the next
        // stage will fail loudly if the object is truly absent.
        if self.raw_store.verify_upload().await? {
            info!(file = %self.file_path.display(), "Upload verified");
        } else {
            warn!(
                file = %self.file_path.display(),
                "Uploaded object not found during verification"
            );
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stages::testing::MockRawStore;
    use std::io::Write;
    use std::sync::atomic::Ordering;

    #[tokio::test]
    async fn test_upload_runs_and_verifies() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "{{}}").unwrap();

        let store = Arc::new(MockRawStore::with_records(vec![]));
        let stage = RawUploadStage::new(store.clone(), file.path().to_path_buf());

        stage.run().await.unwrap();

        assert_eq!(store.uploads.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_missing_file_is_fatal() {
        let store = Arc::new(MockRawStore::with_records(vec![]));
        let stage = RawUploadStage::new(store, PathBuf::from("/nonexistent/raw.json"));

        let result = stage.run().await;

        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_verification_miss_is_not_fatal() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "{{}}").unwrap();

        let store = Arc::new(MockRawStore::with_records(vec![]));
        *store.verify_result.lock().unwrap() = false;
        let stage = RawUploadStage::new(store, file.path().to_path_buf());

        stage.run().await.unwrap();
    }
}
