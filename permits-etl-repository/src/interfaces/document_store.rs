//! Curated document store interface.

use async_trait::async_trait;

use crate::errors::StoreError;
use permits_etl_shared::CuratedDocument;

/// Document collection operations for the curated zone.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Empty the collection, bulk-insert the given documents, and
    /// ensure a 2-D spherical geo index exists on the geo-point field.
    ///
    /// Inserting an empty set is a no-op that is logged, not an error.
    /// Returns the number of documents written.
    async fn replace_all(&self, documents: &[CuratedDocument]) -> Result<u64, StoreError>;

    /// Read the full curated snapshot, with the store's internal
    /// identifier field stripped.
    async fn fetch_all(&self) -> Result<Vec<CuratedDocument>, StoreError>;

    /// Number of documents in the collection.
    async fn count(&self) -> Result<u64, StoreError>;
}
