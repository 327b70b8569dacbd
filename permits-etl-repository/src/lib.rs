//! # Permits ETL Repository
//!
//! Store interfaces and concrete client implementations for the four
//! storage tiers of the permits pipeline: object storage (raw),
//! MySQL (staging), MongoDB (curated), and OpenSearch (index).
//!
//! Every client sits behind a minimal async trait so the transform
//! logic can be exercised against in-memory fakes.

pub mod errors;
pub mod interfaces;
pub mod mongo;
pub mod mysql;
pub mod opensearch;
pub mod s3;

pub use errors::{SearchError, StoreError};
pub use interfaces::{DocumentStore, RawStore, SearchIndexProvider, StagingStats, StagingStore};
pub use mongo::{MongoConfig, MongoDocumentStore};
pub use mysql::{MySqlConfig, MySqlStagingStore};
pub use opensearch::{OpenSearchIndex, INDEX_NAME};
pub use s3::{S3Config, S3RawStore};
