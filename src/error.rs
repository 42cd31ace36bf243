//! Error types for hugearray
//!
//! Provides a unified error type for all operations.

use thiserror::Error;

/// Result type alias using HugeArrayError
pub type Result<T> = std::result::Result<T, HugeArrayError>;

/// Unified error type for hugearray operations
#[derive(Debug, Error)]
pub enum HugeArrayError {
    // -------------------------------------------------------------------------
    // I/O Errors
    // -------------------------------------------------------------------------
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // -------------------------------------------------------------------------
    // Storage Errors
    // -------------------------------------------------------------------------
    #[error("Storage error: {0}")]
    Storage(String),

    // -------------------------------------------------------------------------
    // Access Errors
    // -------------------------------------------------------------------------
    #[error("Index {index} out of range for array of length {len}")]
    IndexOutOfRange { index: u64, len: u64 },

    // -------------------------------------------------------------------------
    // Configuration Errors
    // -------------------------------------------------------------------------
    #[error("Configuration error: {0}")]
    Config(String),
}
