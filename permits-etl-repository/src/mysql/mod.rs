//! MySQL client for the relational staging zone.

mod client;

pub use client::{MySqlConfig, MySqlStagingStore, STAGING_TABLE};
