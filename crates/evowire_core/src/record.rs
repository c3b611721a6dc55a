//! Versioned records.

use crate::error::ProtocolResult;
use crate::reader::TolerantReader;
use crate::version::Version;
use crate::writer::RecordWriter;
use evowire_stream::{ByteSink, ByteSource};

/// A record whose schema evolves across versions.
///
/// Implementors declare the schema version they were compiled against and
/// a fixed field order. Writing emits every field in that order, wrapping
/// each evolving-field group in one skip block; reading consumes the same
/// order, using the stream's version tag to decide which groups are
/// present. Groups newer than this schema are discarded transparently by
/// the tolerant reader, which is what lets an old build consume a stream
/// from a newer one.
///
/// The wire position of every field is fully determined by the writer's
/// version; readers never probe for fields.
pub trait Evolvable: Sized {
    /// The schema version this implementation writes.
    fn version() -> Version;

    /// Writes every field in its fixed slot, version groups ascending.
    ///
    /// # Errors
    ///
    /// Propagates transport failures; cannot otherwise fail for a
    /// well-formed record.
    fn write_fields<S: ByteSink>(&self, writer: &mut RecordWriter<S>) -> ProtocolResult<()>;

    /// Reads the fields this schema declares.
    ///
    /// `wire_version` is the version the writer recorded: groups
    /// introduced above it are absent from the stream and must not be
    /// read; groups above this schema's own version need no handling at
    /// all.
    ///
    /// # Errors
    ///
    /// Propagates any reader failure.
    fn read_fields<S: ByteSource>(
        wire_version: Version,
        reader: &mut TolerantReader<S>,
    ) -> ProtocolResult<Self>;
}

/// Writes one record to a sink, flushes, and returns the sink.
///
/// # Errors
///
/// Propagates any writer failure.
pub fn write_record<R: Evolvable, S: ByteSink>(sink: S, record: &R) -> ProtocolResult<S> {
    let mut writer = RecordWriter::new(sink);
    writer.write_record(record)?;
    writer.flush()?;
    Ok(writer.into_inner())
}

/// Reads one record from a source.
///
/// # Errors
///
/// Propagates any reader failure.
pub fn read_record<R: Evolvable, S: ByteSource>(source: S) -> ProtocolResult<R> {
    let mut reader = TolerantReader::new(source);
    reader.read_record()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ProtocolError;
    use evowire_codec::Value;
    use evowire_stream::{FileReader, FileWriter, MemoryStream};
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

    /// The base schema: a number and a name.
    #[derive(Debug, Clone, PartialEq, Eq)]
    struct ProfileV0 {
        number: i64,
        name: String,
    }

    impl Evolvable for ProfileV0 {
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

    /// Version 1 inserts `extra` between `number` and `name`.
    #[derive(Debug, Clone, PartialEq, Eq)]
    struct ProfileV1 {
        number: i64,
        extra: Option<String>,
        name: String,
    }

    impl Evolvable for ProfileV1 {
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

    #[test]
    fn base_version_roundtrip() {
        let record = ProfileV0 {
            number: 10,
            name: "praveen".into(),
        };
        let stream = write_record(MemoryStream::new(), &record).unwrap();
        let decoded: ProfileV0 = read_record(stream).unwrap();
        assert_eq!(decoded, record);
    }

    #[test]
    fn newer_writer_older_reader() {
        let record = ProfileV1 {
            number: 10,
            extra: Some("X".into()),
            name: "praveen".into(),
        };
        let stream = write_record(MemoryStream::new(), &record).unwrap();

        let decoded: ProfileV0 = read_record(stream).unwrap();
        assert_eq!(
            decoded,
            ProfileV0 {
                number: 10,
                name: "praveen".into(),
            }
        );
    }

    #[test]
    fn older_writer_newer_reader() {
        let record = ProfileV0 {
            number: 7,
            name: "n".into(),
        };
        let stream = write_record(MemoryStream::new(), &record).unwrap();

        let decoded: ProfileV1 = read_record(stream).unwrap();
        assert_eq!(
            decoded,
            ProfileV1 {
                number: 7,
                extra: None,
                name: "n".into(),
            }
        );
    }

    #[test]
    fn same_version_roundtrip() {
        let record = ProfileV1 {
            number: 1,
            extra: Some("present".into()),
            name: "n".into(),
        };
        let stream = write_record(MemoryStream::new(), &record).unwrap();
        let decoded: ProfileV1 = read_record(stream).unwrap();
        assert_eq!(decoded, record);
    }

    #[test]
    fn file_backed_roundtrip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("profile.evw");

        let record = ProfileV1 {
            number: 10,
            extra: Some("X".into()),
            name: "praveen".into(),
        };
        let mut writer = write_record(FileWriter::create(&path).unwrap(), &record).unwrap();
        writer.sync().unwrap();
        drop(writer);

        let decoded: ProfileV0 = read_record(FileReader::open(&path).unwrap()).unwrap();
        assert_eq!(decoded.number, 10);
        assert_eq!(decoded.name, "praveen");
    }

    #[test]
    fn every_strict_prefix_errors() {
        let record = ProfileV1 {
            number: 10,
            extra: Some("X".into()),
            name: "praveen".into(),
        };
        let stream = write_record(MemoryStream::new(), &record).unwrap();
        let bytes = stream.data().to_vec();

        for len in 0..bytes.len() {
            let prefix = MemoryStream::with_data(bytes[..len].to_vec());
            let result: ProtocolResult<ProfileV0> = read_record(prefix);
            assert!(result.is_err(), "prefix of {len} bytes decoded");
        }

        let full = MemoryStream::with_data(bytes);
        let decoded: ProfileV0 = read_record(full).unwrap();
        assert_eq!(decoded.name, "praveen");
    }
}
