//! # Permits ETL
//!
//! Main library for the Ottawa building-permits ETL pipeline.
//!
//! This crate provides the entry point and configuration for running
//! the pipeline end to end: raw upload, staging, curation, indexing,
//! and the summary report.

pub mod config;

pub use config::{Dependencies, PipelineSettings};

use thiserror::Error;

/// Errors that can occur during pipeline initialization or execution.
#[derive(Error, Debug)]
pub enum EtlError {
    /// Configuration error.
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Pipeline error.
    #[error("Pipeline error: {0}")]
    PipelineError(#[from] permits_etl_pipeline::PipelineError),

    /// Store error.
    #[error("Store error: {0}")]
    StoreError(#[from] permits_etl_repository::StoreError),

    /// Search error.
    #[error("Search error: {0}")]
    SearchError(#[from] permits_etl_repository::SearchError),

    /// IO error.
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl EtlError {
    /// Create a configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::ConfigError(msg.into())
    }
}
