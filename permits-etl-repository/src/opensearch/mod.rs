//! OpenSearch implementation of the search index provider.

mod client;
mod index_config;

pub use client::OpenSearchIndex;
pub use index_config::{get_index_settings, INDEX_NAME};
