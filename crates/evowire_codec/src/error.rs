//! Error types for the codec crate.

use thiserror::Error;

/// Result type for codec operations.
pub type CodecResult<T> = Result<T, CodecError>;

/// Errors that can occur while encoding or decoding frames.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CodecError {
    /// The input ended in the middle of a frame.
    #[error("unexpected end of input")]
    UnexpectedEof,

    /// A frame carried a tag this codec does not declare.
    ///
    /// Unknown tags are still structurally skippable; this error is only
    /// raised when a caller asks for the frame's typed value.
    #[error("unknown frame tag 0x{tag:02x}")]
    UnknownTag {
        /// The undeclared tag byte.
        tag: u8,
    },

    /// A text payload was not valid UTF-8.
    #[error("invalid UTF-8 in text payload")]
    InvalidUtf8,

    /// A frame violated the format rules for its tag.
    #[error("invalid frame: {message}")]
    InvalidFrame {
        /// Description of the violation.
        message: String,
    },

    /// A frame claimed a payload larger than the allowed maximum.
    #[error("frame payload too large: {claimed} bytes exceeds maximum of {max_allowed}")]
    PayloadTooLarge {
        /// The length the frame header claimed.
        claimed: u64,
        /// The maximum the codec accepts.
        max_allowed: u64,
    },
}

impl CodecError {
    /// Create an invalid frame error.
    pub fn invalid_frame(message: impl Into<String>) -> Self {
        Self::InvalidFrame {
            message: message.into(),
        }
    }
}
