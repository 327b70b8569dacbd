//! Error types for the pipeline stages.

use permits_etl_repository::{SearchError, StoreError};
use thiserror::Error;

/// Errors that can occur while running the pipeline.
#[derive(Error, Debug)]
pub enum PipelineError {
    /// Error from one of the backing stores.
    #[error("Store error: {0}")]
    StoreError(#[from] StoreError),

    /// Error from the search engine.
    #[error("Search error: {0}")]
    SearchError(#[from] SearchError),

    /// Filesystem error (report output, raw input file).
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// Failure local to a stage.
    #[error("Stage error: {0}")]
    StageError(String),
}

impl PipelineError {
    /// Create a stage error.
    pub fn stage(msg: impl Into<String>) -> Self {
        Self::StageError(msg.into())
    }
}
