//! Test fixtures and record helpers.
//!
//! Provides sample evolvable records at three schema versions and
//! convenience functions for building encoded streams.
//!
//! The three records model one lineage: version 1 inserts `extra` between
//! `number` and `name`, version 2 adds `active` and `weight` in a second
//! group at the same insertion point. A stream written at version 2 thus
//! carries two consecutive skip blocks for a version-0 reader.

use evowire_codec::Value;
use evowire_core::{
    read_record, write_record, Evolvable, ProtocolError, ProtocolResult, RecordWriter,
    TolerantReader, Version,
};
use evowire_stream::{ByteSink, ByteSource, FileWriter, MemoryStream};
use std::path::PathBuf;
use tempfile::TempDir;

fn expect_text<S: ByteSource>(reader: &mut TolerantReader<S>) -> ProtocolResult<String> {
    match reader.read_value()? {
        Value::Text(s) => Ok(s),
        other => Err(ProtocolError::schema_mismatch(
            "text",
            other.tag().to_string(),
        )),
    }
}

fn expect_bool<S: ByteSource>(reader: &mut TolerantReader<S>) -> ProtocolResult<bool> {
    match reader.read_value()? {
        Value::Bool(b) => Ok(b),
        other => Err(ProtocolError::schema_mismatch(
            "bool",
            other.tag().to_string(),
        )),
    }
}

/// The base schema: a number and a name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestRecordV0 {
    /// Base numeric field.
    pub number: i64,
    /// Base text field, written after any evolving groups.
    pub name: String,
}

impl TestRecordV0 {
    /// The canonical sample: `{number: 10, name: "praveen"}`.
    #[must_use]
    pub fn sample() -> Self {
        Self {
            number: 10,
            name: "praveen".into(),
        }
    }
}

impl Evolvable for TestRecordV0 {
    fn version() -> Version {
        Version::BASE
    }

    fn write_fields<S: ByteSink>(&self, writer: &mut RecordWriter<S>) -> ProtocolResult<()> {
        writer.write_int(self.number)?;
        writer.write_value(&Value::Text(self.name.clone()))
    }

    fn read_fields<S: ByteSource>(
        _wire_version: Version,
        reader: &mut TolerantReader<S>,
    ) -> ProtocolResult<Self> {
        let number = reader.read_int()?;
        let name = expect_text(reader)?;
        Ok(Self { number, name })
    }
}

/// Version 1 inserts `extra` before `name`, wrapped in a skip block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestRecordV1 {
    /// Base numeric field.
    pub number: i64,
    /// Added at version 1; `None` when reading an older stream.
    pub extra: Option<String>,
    /// Base text field.
    pub name: String,
}

impl TestRecordV1 {
    /// The canonical sample with `extra: "X"`.
    #[must_use]
    pub fn sample() -> Self {
        Self {
            number: 10,
            extra: Some("X".into()),
            name: "praveen".into(),
        }
    }
}

impl Evolvable for TestRecordV1 {
    fn version() -> Version {
        Version::new(1)
    }

    fn write_fields<S: ByteSink>(&self, writer: &mut RecordWriter<S>) -> ProtocolResult<()> {
        writer.write_int(self.number)?;
        writer.write_group(|w| {
            w.write_value(&Value::Text(self.extra.clone().unwrap_or_default()))
        })?;
        writer.write_value(&Value::Text(self.name.clone()))
    }

    fn read_fields<S: ByteSource>(
        wire_version: Version,
        reader: &mut TolerantReader<S>,
    ) -> ProtocolResult<Self> {
        let number = reader.read_int()?;
        let extra = if wire_version >= Version::new(1) {
            reader.begin_group()?;
            let value = expect_text(reader)?;
            reader.end_group()?;
            Some(value)
        } else {
            None
        };
        let name = expect_text(reader)?;
        Ok(Self {
            number,
            extra,
            name,
        })
    }
}

/// Version 2 adds `active` and `weight` in a second group before `name`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestRecordV2 {
    /// Base numeric field.
    pub number: i64,
    /// Added at version 1.
    pub extra: Option<String>,
    /// Added at version 2.
    pub active: Option<bool>,
    /// Added at version 2.
    pub weight: Option<i64>,
    /// Base text field.
    pub name: String,
}

impl TestRecordV2 {
    /// The canonical sample with all evolving fields present.
    #[must_use]
    pub fn sample() -> Self {
        Self {
            number: 10,
            extra: Some("X".into()),
            active: Some(true),
            weight: Some(42),
            name: "praveen".into(),
        }
    }
}

impl Evolvable for TestRecordV2 {
    fn version() -> Version {
        Version::new(2)
    }

    fn write_fields<S: ByteSink>(&self, writer: &mut RecordWriter<S>) -> ProtocolResult<()> {
        writer.write_int(self.number)?;
        writer.write_group(|w| {
            w.write_value(&Value::Text(self.extra.clone().unwrap_or_default()))
        })?;
        writer.write_group(|w| {
            w.write_value(&Value::Bool(self.active.unwrap_or_default()))?;
            w.write_int(self.weight.unwrap_or_default())
        })?;
        writer.write_value(&Value::Text(self.name.clone()))
    }

    fn read_fields<S: ByteSource>(
        wire_version: Version,
        reader: &mut TolerantReader<S>,
    ) -> ProtocolResult<Self> {
        let number = reader.read_int()?;
        let extra = if wire_version >= Version::new(1) {
            reader.begin_group()?;
            let value = expect_text(reader)?;
            reader.end_group()?;
            Some(value)
        } else {
            None
        };
        let (active, weight) = if wire_version >= Version::new(2) {
            reader.begin_group()?;
            let active = expect_bool(reader)?;
            let weight = reader.read_int()?;
            reader.end_group()?;
            (Some(active), Some(weight))
        } else {
            (None, None)
        };
        let name = expect_text(reader)?;
        Ok(Self {
            number,
            extra,
            active,
            weight,
            name,
        })
    }
}

/// Encodes a record into a fresh in-memory stream, ready for reading.
pub fn encode_to_memory<R: Evolvable>(record: &R) -> MemoryStream {
    write_record(MemoryStream::new(), record).expect("failed to encode record")
}

/// Encodes a record and returns the raw stream bytes.
pub fn encoded_bytes<R: Evolvable>(record: &R) -> Vec<u8> {
    encode_to_memory(record).data().to_vec()
}

/// Encodes a record into a file inside a fresh temp directory.
///
/// The directory handle must be kept alive for as long as the file is
/// needed.
pub fn encode_to_temp_file<R: Evolvable>(record: &R) -> (TempDir, PathBuf) {
    let dir = TempDir::new().expect("failed to create temp directory");
    let path = dir.path().join("record.evw");
    let mut writer = write_record(
        FileWriter::create(&path).expect("failed to create stream file"),
        record,
    )
    .expect("failed to encode record");
    writer.sync().expect("failed to sync stream file");
    (dir, path)
}

/// Decodes a record of type `R` from raw stream bytes.
pub fn decode_from_bytes<R: Evolvable>(bytes: Vec<u8>) -> ProtocolResult<R> {
    read_record(MemoryStream::with_data(bytes))
}
