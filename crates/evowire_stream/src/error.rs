//! Error types for transport operations.

use std::io;
use thiserror::Error;

/// Result type for transport operations.
pub type StreamResult<T> = Result<T, StreamError>;

/// Errors that can occur during transport operations.
///
/// Transport failures are fatal to the read or write in progress: they are
/// propagated immediately and never retried at this layer.
#[derive(Debug, Error)]
pub enum StreamError {
    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The stream ended in the middle of a requested read.
    #[error("stream truncated: wanted {expected} bytes, got {got}")]
    Truncated {
        /// Number of bytes the caller asked for.
        expected: usize,
        /// Number of bytes actually available.
        got: usize,
    },
}
