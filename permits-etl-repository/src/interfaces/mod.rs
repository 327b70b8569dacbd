//! Abstract store interfaces.
//!
//! These traits define the minimal capabilities each pipeline stage
//! needs from its backing store, so stages can be tested against
//! in-memory implementations without live infrastructure.

mod document_store;
mod raw_store;
mod search_index_provider;
mod staging_store;

pub use document_store::DocumentStore;
pub use raw_store::RawStore;
pub use search_index_provider::SearchIndexProvider;
pub use staging_store::{StagingStats, StagingStore};
