//! # evowire Stream
//!
//! Sequential byte transports for evowire.
//!
//! This crate provides the lowest-level transport abstraction for the
//! protocol. Transports are **opaque byte pipes**: they deliver bytes in
//! order and do not interpret the frame format.
//!
//! ## Design Principles
//!
//! - One forward writing pass, one forward reading pass; no seeking
//! - No knowledge of frames, records, or skip blocks
//! - Each stream is consumed by exactly one reader and is not shared;
//!   transports take `&mut self` and carry no locks
//! - evowire_core owns all wire-format interpretation
//!
//! ## Available Transports
//!
//! - [`MemoryStream`] - For testing and ephemeral streams
//! - [`FileWriter`] / [`FileReader`] - For persisted streams
//!
//! ## Example
//!
//! ```rust
//! use evowire_stream::{ByteSink, ByteSource, MemoryStream};
//!
//! let mut stream = MemoryStream::new();
//! stream.write_all(b"hello world").unwrap();
//!
//! let mut buf = [0u8; 11];
//! stream.read_exact(&mut buf).unwrap();
//! assert_eq!(&buf, b"hello world");
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod error;
mod file;
mod memory;
mod transport;

pub use error::{StreamError, StreamResult};
pub use file::{FileReader, FileWriter};
pub use memory::MemoryStream;
pub use transport::{ByteSink, ByteSource};
