//! # evowire Core
//!
//! Forward-compatible record protocol for evowire.
//!
//! This crate provides:
//! - Streaming frame I/O over any `evowire_stream` transport
//! - [`RecordWriter`] for version-ordered field appends with skip-block
//!   wrapping
//! - [`TolerantReader`], the state machine that discards skip blocks a
//!   reader's schema does not know
//! - The [`Evolvable`] trait for versioned records
//!
//! A writer built against schema version N wraps every field group
//! introduced after version 0 between two content-free sentinel frames. A
//! reader built against any version M <= N consumes the same stream and
//! transparently discards the groups it has never heard of; the fields it
//! does know decode bit-identically.
//!
//! ## Example
//!
//! ```
//! use evowire_codec::Value;
//! use evowire_core::{RecordWriter, TolerantReader};
//! use evowire_stream::MemoryStream;
//!
//! // A version-1 writer: one new field wrapped in a skip block.
//! let mut writer = RecordWriter::new(MemoryStream::new());
//! writer.write_int(10).unwrap();
//! writer.write_group(|w| w.write_value(&Value::Text("X".into()))).unwrap();
//! writer.write_value(&Value::Text("praveen".into())).unwrap();
//!
//! // A version-0 reader: never sees the wrapped field.
//! let mut reader = TolerantReader::new(writer.into_inner());
//! assert_eq!(reader.read_int().unwrap(), 10);
//! assert_eq!(reader.read_value().unwrap(), Value::Text("praveen".into()));
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod error;
mod frames;
mod reader;
mod record;
mod version;
mod writer;

pub use config::ReadOptions;
pub use error::{ProtocolError, ProtocolResult};
pub use frames::{FrameReader, FrameWriter};
pub use reader::TolerantReader;
pub use record::{read_record, write_record, Evolvable};
pub use version::Version;
pub use writer::RecordWriter;
