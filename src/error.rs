//! Error types for psstore
//!
//! Provides a unified error type for all operations.

use thiserror::Error;

/// Result type alias using StoreError
pub type Result<T> = std::result::Result<T, StoreError>;

/// Unified error type for psstore operations
#[derive(Debug, Error)]
pub enum StoreError {
    // -------------------------------------------------------------------------
    // Store Errors
    // -------------------------------------------------------------------------
    #[error("key {key} does not exist in data store")]
    KeyNotFound { key: String },

    #[error("value for key {key} already exists, use update to change it")]
    KeyExists { key: String },

    #[error("nothing to clear, datastore is empty")]
    EmptyStore,

    #[error("unsupported argument supplied: {0}")]
    UnsupportedArgument(String),

    // -------------------------------------------------------------------------
    // I/O Errors
    // -------------------------------------------------------------------------
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // -------------------------------------------------------------------------
    // Serialization Errors
    // -------------------------------------------------------------------------
    #[error("Serialization error: {0}")]
    Serialization(String),

    // -------------------------------------------------------------------------
    // Network Errors
    // -------------------------------------------------------------------------
    #[error("Network error: {0}")]
    Network(String),

    #[error("Protocol error: {0}")]
    Protocol(String),

    // -------------------------------------------------------------------------
    // Configuration Errors
    // -------------------------------------------------------------------------
    #[error("Configuration error: {0}")]
    Config(String),
}

impl StoreError {
    /// Shorthand for a missing key
    pub fn not_found(key: impl Into<String>) -> Self {
        StoreError::KeyNotFound { key: key.into() }
    }

    /// Shorthand for a key that is already present
    pub fn exists(key: impl Into<String>) -> Self {
        StoreError::KeyExists { key: key.into() }
    }
}

impl From<bincode::Error> for StoreError {
    fn from(err: bincode::Error) -> Self {
        StoreError::Serialization(err.to_string())
    }
}
