//! Relational staging store interface.

use async_trait::async_trait;

use crate::errors::StoreError;
use permits_etl_shared::StagingRow;

/// Aggregates over the staging table, used by the reporting stage.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StagingStats {
    pub row_count: u64,
    pub avg_value: f64,
}

/// Relational staging table operations.
///
/// The staging table has full-replace semantics: every run drops and
/// recreates it, there is no upsert path.
#[async_trait]
pub trait StagingStore: Send + Sync {
    /// Replace the entire staging table with the given rows.
    ///
    /// Returns the number of rows written. Failures propagate to the
    /// caller; there is no retry.
    async fn replace_all(&self, rows: &[StagingRow]) -> Result<u64, StoreError>;

    /// Read the full staging snapshot.
    async fn fetch_all(&self) -> Result<Vec<StagingRow>, StoreError>;

    /// Row count and average permit value.
    async fn stats(&self) -> Result<StagingStats, StoreError>;
}
