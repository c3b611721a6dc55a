//! Error types for the protocol core.

use evowire_codec::CodecError;
use evowire_stream::StreamError;
use thiserror::Error;

/// Result type for protocol operations.
pub type ProtocolResult<T> = Result<T, ProtocolError>;

/// Errors that can occur while writing or reading a record stream.
///
/// All variants are fatal to the operation in progress: they abort the
/// current read or write and surface to the caller as a single error.
/// None are retried here.
#[derive(Debug, Error)]
pub enum ProtocolError {
    /// Transport failure from the underlying byte stream.
    #[error("transport error: {0}")]
    Stream(#[from] StreamError),

    /// A frame could not be encoded or decoded.
    #[error("codec error: {0}")]
    Codec(#[from] CodecError),

    /// The stream violated the protocol's shape.
    ///
    /// Raised when a skip block is opened but never terminated before the
    /// end of the stream, when the stream ends where a field was promised,
    /// when a terminator appears with no open block, or when the version
    /// frame is out of range.
    #[error("malformed stream: {message}")]
    MalformedStream {
        /// Description of the violation.
        message: String,
    },

    /// A field's wire type does not match the reader's schema.
    ///
    /// Indicates an incompatible (non-forward-compatible) stream.
    #[error("schema mismatch: expected {expected}, found {found}")]
    SchemaMismatch {
        /// The wire type the reader's schema declares at this position.
        expected: String,
        /// The wire type actually found.
        found: String,
    },

    /// A record was written in a way the protocol forbids.
    #[error("invalid record: {message}")]
    InvalidRecord {
        /// Description of the misuse.
        message: String,
    },
}

impl ProtocolError {
    /// Create a malformed stream error.
    pub fn malformed(message: impl Into<String>) -> Self {
        Self::MalformedStream {
            message: message.into(),
        }
    }

    /// Create a schema mismatch error.
    pub fn schema_mismatch(expected: impl Into<String>, found: impl Into<String>) -> Self {
        Self::SchemaMismatch {
            expected: expected.into(),
            found: found.into(),
        }
    }

    /// Create an invalid record error.
    pub fn invalid_record(message: impl Into<String>) -> Self {
        Self::InvalidRecord {
            message: message.into(),
        }
    }
}
