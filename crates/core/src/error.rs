//! Error types for the Cellarium server core
//!
//! This module defines all error types used throughout the system.
//! We use `thiserror` for automatic `Display` and `Error` trait implementations.

use std::io;
use thiserror::Error;

/// Result type alias for server-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for the server core
#[derive(Debug, Error)]
pub enum Error {
    /// I/O error (file operations)
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Failed to decode a pre-built lookup artifact
    #[error("decode error: {0}")]
    Decode(String),

    /// Candidate-space builder failure reported by the dataset accessor
    #[error("dataset error: {0}")]
    Dataset(String),

    /// Persisted session state could not be read or written
    #[error("session store error: {0}")]
    SessionStore(String),

    /// Invalid configuration
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}
