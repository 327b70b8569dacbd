//! # Permits ETL Pipeline
//!
//! Stages of the building-permits ETL pipeline.
//!
//! ## Architecture
//!
//! The data moves through four storage tiers with a transform at each
//! hop:
//!
//! 1. **RawUploadStage**: local file -> object store (raw zone)
//! 2. **StagingStage**: raw records -> normalized rows -> MySQL
//! 3. **CuratedStage**: staging rows -> enriched documents -> MongoDB
//! 4. **IndexStage**: curated documents -> search documents -> OpenSearch
//! 5. **ReportStage**: read-only aggregation -> JSON summary
//!
//! The [`orchestrator::Orchestrator`] runs the stages strictly in
//! sequence and halts the chain on the first failure.

pub mod enricher;
pub mod errors;
pub mod normalizer;
pub mod orchestrator;
pub mod projector;
pub mod report;
pub mod stages;

pub use errors::PipelineError;
