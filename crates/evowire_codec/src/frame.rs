//! Self-delimiting frame encoding and decoding.
//!
//! The wire unit is a frame:
//!
//! ```text
//! struct Frame {
//!     // Identifies how `payload` is interpreted. Sentinel tags carry
//!     // no payload at all.
//!     tag: u8,
//!
//!     // Payload byte length. Placed before the payload so that a reader
//!     // with no knowledge of `tag` can still find the frame boundary.
//!     len: u32,            // little-endian
//!
//!     payload: [u8; len],
//! }
//! ```
//!
//! Because the length precedes the payload, every frame is self-delimiting
//! independent of the reader's schema knowledge: an undeclared tag can be
//! stepped over without interpreting a single payload byte.

use crate::error::{CodecError, CodecResult};
use crate::tag::Tag;
use crate::value::Value;
use bytes::{BufMut, Bytes, BytesMut};

/// Size of the tag field in bytes.
pub const TAG_SIZE: usize = 1;

/// Size of the length field in bytes.
pub const LEN_SIZE: usize = 4;

/// Size of the header preceding every frame payload.
pub const HEADER_SIZE: usize = TAG_SIZE + LEN_SIZE;

/// Maximum allowed payload length.
/// This prevents allocation-based DoS from untrusted input.
/// 256 MB should cover any legitimate payload.
pub const MAX_PAYLOAD_LEN: u32 = 256 * 1024 * 1024;

/// A raw frame: a tag byte and an uninterpreted payload.
///
/// A `RawFrame` may carry a tag this codec does not declare. Its boundary
/// is always known; its typed value is only available for declared payload
/// tags via [`RawFrame::decode_value`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawFrame {
    tag: u8,
    payload: Bytes,
}

impl RawFrame {
    /// Creates a frame from a tag byte and payload.
    ///
    /// # Errors
    ///
    /// Returns an error if the payload exceeds [`MAX_PAYLOAD_LEN`] or if a
    /// sentinel tag carries a non-empty payload.
    pub fn new(tag: u8, payload: Bytes) -> CodecResult<Self> {
        if payload.len() as u64 > u64::from(MAX_PAYLOAD_LEN) {
            return Err(CodecError::PayloadTooLarge {
                claimed: payload.len() as u64,
                max_allowed: u64::from(MAX_PAYLOAD_LEN),
            });
        }
        if let Some(t) = Tag::from_byte(tag) {
            if t.is_sentinel() && !payload.is_empty() {
                return Err(CodecError::invalid_frame(format!(
                    "{t} frame must have an empty payload, got {} bytes",
                    payload.len()
                )));
            }
        }
        Ok(Self { tag, payload })
    }

    /// The skip-block opening sentinel.
    #[must_use]
    pub fn skip_start() -> Self {
        Self {
            tag: Tag::SkipStart.as_byte(),
            payload: Bytes::new(),
        }
    }

    /// The skip-block closing sentinel.
    #[must_use]
    pub fn skip_end() -> Self {
        Self {
            tag: Tag::SkipEnd.as_byte(),
            payload: Bytes::new(),
        }
    }

    /// Encodes a value into a frame.
    ///
    /// # Errors
    ///
    /// Returns an error if the value's payload exceeds [`MAX_PAYLOAD_LEN`].
    pub fn from_value(value: &Value) -> CodecResult<Self> {
        let payload = match value {
            Value::Null => Bytes::new(),
            Value::Bool(b) => Bytes::copy_from_slice(&[u8::from(*b)]),
            Value::Integer(n) => Bytes::copy_from_slice(&n.to_le_bytes()),
            Value::Text(s) => Bytes::copy_from_slice(s.as_bytes()),
            Value::Bytes(b) => Bytes::copy_from_slice(b),
        };
        Self::new(value.tag().as_byte(), payload)
    }

    /// The raw tag byte.
    #[must_use]
    pub const fn tag_byte(&self) -> u8 {
        self.tag
    }

    /// The declared tag, if this codec knows it.
    #[must_use]
    pub fn tag(&self) -> Option<Tag> {
        Tag::from_byte(self.tag)
    }

    /// The uninterpreted payload bytes.
    #[must_use]
    pub fn payload(&self) -> &[u8] {
        &self.payload
    }

    /// Whether this frame opens a skip block.
    #[must_use]
    pub fn is_skip_start(&self) -> bool {
        self.tag == Tag::SkipStart.as_byte()
    }

    /// Whether this frame closes a skip block.
    #[must_use]
    pub fn is_skip_end(&self) -> bool {
        self.tag == Tag::SkipEnd.as_byte()
    }

    /// Whether this frame is either sentinel.
    #[must_use]
    pub fn is_sentinel(&self) -> bool {
        self.is_skip_start() || self.is_skip_end()
    }

    /// Total encoded size of this frame, header included.
    #[must_use]
    pub fn encoded_len(&self) -> usize {
        HEADER_SIZE + self.payload.len()
    }

    /// Interprets the payload according to the tag.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::UnknownTag`] for undeclared tags,
    /// [`CodecError::InvalidFrame`] for sentinels (they carry no value) and
    /// for payloads that violate their tag's format, and
    /// [`CodecError::InvalidUtf8`] for malformed text.
    pub fn decode_value(&self) -> CodecResult<Value> {
        let tag = Tag::from_byte(self.tag).ok_or(CodecError::UnknownTag { tag: self.tag })?;
        match tag {
            Tag::Null => {
                if !self.payload.is_empty() {
                    return Err(CodecError::invalid_frame("null frame with payload bytes"));
                }
                Ok(Value::Null)
            }
            Tag::Bool => match self.payload.as_ref() {
                [0] => Ok(Value::Bool(false)),
                [1] => Ok(Value::Bool(true)),
                _ => Err(CodecError::invalid_frame(
                    "bool payload must be exactly one byte of 0 or 1",
                )),
            },
            Tag::Int => {
                let bytes: [u8; 8] = self
                    .payload
                    .as_ref()
                    .try_into()
                    .map_err(|_| CodecError::invalid_frame("int payload must be exactly 8 bytes"))?;
                Ok(Value::Integer(i64::from_le_bytes(bytes)))
            }
            Tag::Text => {
                let text =
                    std::str::from_utf8(&self.payload).map_err(|_| CodecError::InvalidUtf8)?;
                Ok(Value::Text(text.to_string()))
            }
            Tag::Bytes => Ok(Value::Bytes(self.payload.to_vec())),
            Tag::SkipStart | Tag::SkipEnd => Err(CodecError::invalid_frame(format!(
                "{tag} frame carries no value"
            ))),
        }
    }
}

/// Appends frames to a growable buffer.
pub struct FrameEncoder {
    buffer: BytesMut,
}

impl FrameEncoder {
    /// Creates a new encoder.
    #[must_use]
    pub fn new() -> Self {
        Self {
            buffer: BytesMut::new(),
        }
    }

    /// Creates a new encoder with the specified capacity.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buffer: BytesMut::with_capacity(capacity),
        }
    }

    /// Appends a raw frame.
    #[allow(clippy::cast_possible_truncation)]
    pub fn put_frame(&mut self, frame: &RawFrame) {
        self.buffer.reserve(frame.encoded_len());
        self.buffer.put_u8(frame.tag_byte());
        // Safe cast: RawFrame enforces payload length <= MAX_PAYLOAD_LEN
        self.buffer.put_u32_le(frame.payload().len() as u32);
        self.buffer.put_slice(frame.payload());
    }

    /// Encodes and appends a value frame.
    ///
    /// # Errors
    ///
    /// Returns an error if the value's payload exceeds [`MAX_PAYLOAD_LEN`].
    pub fn put_value(&mut self, value: &Value) -> CodecResult<()> {
        let frame = RawFrame::from_value(value)?;
        self.put_frame(&frame);
        Ok(())
    }

    /// Appends a skip-block opening sentinel.
    pub fn put_skip_start(&mut self) {
        self.put_frame(&RawFrame::skip_start());
    }

    /// Appends a skip-block closing sentinel.
    pub fn put_skip_end(&mut self) {
        self.put_frame(&RawFrame::skip_end());
    }

    /// Consume this encoder and return the encoded bytes.
    #[must_use]
    pub fn into_bytes(self) -> Bytes {
        self.buffer.freeze()
    }

    /// Get a reference to the encoded bytes.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.buffer
    }
}

impl Default for FrameEncoder {
    fn default() -> Self {
        Self::new()
    }
}

/// Decodes frames from an in-memory buffer.
///
/// Clean end of input at a frame boundary yields `Ok(None)`; input ending
/// inside a frame yields [`CodecError::UnexpectedEof`].
pub struct FrameDecoder<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> FrameDecoder<'a> {
    /// Creates a new decoder for the given bytes.
    #[must_use]
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    /// Decodes the next frame, or `None` at end of input.
    ///
    /// # Errors
    ///
    /// Returns an error if the input ends mid-frame, if the claimed payload
    /// length exceeds [`MAX_PAYLOAD_LEN`], or if a sentinel frame carries
    /// payload bytes.
    pub fn next_frame(&mut self) -> CodecResult<Option<RawFrame>> {
        if self.pos >= self.data.len() {
            return Ok(None);
        }
        let tag = self.data[self.pos];
        self.pos += 1;

        let len_bytes: [u8; LEN_SIZE] = self
            .take(LEN_SIZE)?
            .try_into()
            .map_err(|_| CodecError::UnexpectedEof)?;
        let len = u32::from_le_bytes(len_bytes);
        if len > MAX_PAYLOAD_LEN {
            return Err(CodecError::PayloadTooLarge {
                claimed: u64::from(len),
                max_allowed: u64::from(MAX_PAYLOAD_LEN),
            });
        }

        let payload = self.take(len as usize)?;
        RawFrame::new(tag, Bytes::copy_from_slice(payload)).map(Some)
    }

    /// Check if all bytes have been consumed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pos >= self.data.len()
    }

    /// Get remaining bytes.
    #[must_use]
    pub fn remaining(&self) -> &[u8] {
        &self.data[self.pos..]
    }

    #[inline]
    fn take(&mut self, len: usize) -> CodecResult<&'a [u8]> {
        if self.pos + len > self.data.len() {
            return Err(CodecError::UnexpectedEof);
        }
        let bytes = &self.data[self.pos..self.pos + len];
        self.pos += len;
        Ok(bytes)
    }
}
