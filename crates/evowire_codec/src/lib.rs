//! # evowire Codec
//!
//! Self-delimiting tagged frame codec for evowire.
//!
//! This crate defines the wire unit of the forward-compatibility protocol:
//! a frame carrying a one-byte tag, a length, and an uninterpreted payload.
//! The length precedes the payload, so any reader can find a frame's
//! boundary without understanding its tag. That property is what makes
//! newer-version data structurally skippable by older readers.
//!
//! Two tags, [`Tag::SkipStart`] and [`Tag::SkipEnd`], are content-free
//! sentinels. They bracket field groups introduced after a reader's schema
//! version; interpreting them is the job of `evowire_core`, not this crate.
//!
//! This is a pure codec crate with no I/O operations.
//!
//! ## Usage
//!
//! ```
//! use evowire_codec::{FrameDecoder, FrameEncoder, Value};
//!
//! let mut enc = FrameEncoder::new();
//! enc.put_value(&Value::Integer(42)).unwrap();
//! let bytes = enc.into_bytes();
//!
//! let mut dec = FrameDecoder::new(&bytes);
//! let frame = dec.next_frame().unwrap().unwrap();
//! assert_eq!(frame.decode_value().unwrap(), Value::Integer(42));
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod error;
mod frame;
mod tag;
mod value;

pub use error::{CodecError, CodecResult};
pub use frame::{
    FrameDecoder, FrameEncoder, RawFrame, HEADER_SIZE, LEN_SIZE, MAX_PAYLOAD_LEN, TAG_SIZE,
};
pub use tag::Tag;
pub use value::Value;
