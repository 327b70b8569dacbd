//! Object storage interface for the raw zone.

use std::path::Path;

use async_trait::async_trait;

use crate::errors::StoreError;
use permits_etl_shared::RawRecord;

/// Object-storage operations for the raw permits dataset.
///
/// All implementations must be `Send + Sync` to allow use across
/// async tasks.
#[async_trait]
pub trait RawStore: Send + Sync {
    /// Upload a local newline-delimited JSON file as the raw object,
    /// creating the bucket first if it does not exist.
    ///
    /// A missing local file is a fatal [`StoreError::MissingInput`].
    async fn upload(&self, path: &Path) -> Result<(), StoreError>;

    /// Check whether the raw object is listed in the bucket.
    ///
    /// Used for post-write verification; a `false` result is reported
    /// by the caller as a warning, never an error.
    async fn verify_upload(&self) -> Result<bool, StoreError>;

    /// Download the raw object and parse it line by line.
    ///
    /// Blank lines are skipped. A line that is not valid JSON is a
    /// fatal [`StoreError::SerializationError`]; records with missing
    /// sub-objects deserialize defensively and are handled downstream.
    async fn fetch_records(&self) -> Result<Vec<RawRecord>, StoreError>;

    /// Number of objects currently in the raw bucket.
    async fn object_count(&self) -> Result<u64, StoreError>;
}
