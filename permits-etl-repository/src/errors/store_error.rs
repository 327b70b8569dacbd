//! Errors for the object, relational, and document stores.

use thiserror::Error;

/// Errors that can occur while talking to a backing store.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Failed to reach the store.
    #[error("Connection error: {0}")]
    ConnectionError(String),

    /// An expected object, table, or collection was absent.
    #[error("Missing input: {0}")]
    MissingInput(String),

    /// Failed to read from the store.
    #[error("Read error: {0}")]
    ReadError(String),

    /// Failed to write to the store.
    #[error("Write error: {0}")]
    WriteError(String),

    /// Failed to serialize or deserialize store data.
    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl StoreError {
    /// Create a connection error.
    pub fn connection(msg: impl Into<String>) -> Self {
        Self::ConnectionError(msg.into())
    }

    /// Create a missing-input error.
    pub fn missing_input(msg: impl Into<String>) -> Self {
        Self::MissingInput(msg.into())
    }

    /// Create a read error.
    pub fn read(msg: impl Into<String>) -> Self {
        Self::ReadError(msg.into())
    }

    /// Create a write error.
    pub fn write(msg: impl Into<String>) -> Self {
        Self::WriteError(msg.into())
    }

    /// Create a serialization error.
    pub fn serialization(msg: impl Into<String>) -> Self {
        Self::SerializationError(msg.into())
    }
}
