//! S3-compatible object store client for the raw zone.

mod client;

pub use client::{S3Config, S3RawStore};
