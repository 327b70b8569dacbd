//! MongoDB client for the curated zone.

mod client;

pub use client::{MongoConfig, MongoDocumentStore, CURATED_COLLECTION};
