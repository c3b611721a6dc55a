//! The record writer: version-ordered appends with skip-block wrapping.

use crate::error::{ProtocolError, ProtocolResult};
use crate::frames::FrameWriter;
use crate::version::Version;
use evowire_codec::{RawFrame, Value};
use evowire_stream::ByteSink;
use tracing::trace;

/// Appends a record's frames to a byte sink.
///
/// A record is written in one forward pass: the version tag first, then
/// every field in its fixed slot, with each evolving-field group wrapped
/// in exactly one skip block via [`RecordWriter::write_group`]. Writing
/// cannot fail for a well-formed record; transport failures propagate
/// unchanged.
pub struct RecordWriter<S> {
    frames: FrameWriter<S>,
    in_group: bool,
}

impl<S: ByteSink> RecordWriter<S> {
    /// Creates a writer over the given sink.
    pub fn new(sink: S) -> Self {
        Self {
            frames: FrameWriter::new(sink),
            in_group: false,
        }
    }

    /// Writes the record's version tag.
    ///
    /// # Errors
    ///
    /// Returns an error if the transport write fails.
    pub fn write_version(&mut self, version: Version) -> ProtocolResult<()> {
        self.write_int(version.as_wire())
    }

    /// Writes one integer field.
    ///
    /// # Errors
    ///
    /// Returns an error if the transport write fails.
    pub fn write_int(&mut self, n: i64) -> ProtocolResult<()> {
        self.write_value(&Value::Integer(n))
    }

    /// Writes one payload value.
    ///
    /// # Errors
    ///
    /// Returns an error if the value exceeds the codec's payload limit or
    /// the transport write fails.
    pub fn write_value(&mut self, value: &Value) -> ProtocolResult<()> {
        let frame = RawFrame::from_value(value)?;
        self.frames.put_frame(&frame)
    }

    /// Writes one evolving-field group wrapped in a skip block.
    ///
    /// Emits the opening sentinel, runs the closure to write the group's
    /// fields, then emits the terminator. Groups belong to exactly one
    /// version increment; write them in ascending version order.
    ///
    /// # Errors
    ///
    /// Returns [`ProtocolError::InvalidRecord`] if called from inside
    /// another group (skip blocks do not nest), or propagates any failure
    /// from the closure or the transport.
    pub fn write_group<F>(&mut self, f: F) -> ProtocolResult<()>
    where
        F: FnOnce(&mut Self) -> ProtocolResult<()>,
    {
        if self.in_group {
            return Err(ProtocolError::invalid_record("skip blocks do not nest"));
        }
        self.frames.put_frame(&RawFrame::skip_start())?;
        self.in_group = true;
        let result = f(self);
        self.in_group = false;
        result?;
        self.frames.put_frame(&RawFrame::skip_end())?;
        Ok(())
    }

    /// Writes a whole record: version tag first, then the record's fields.
    ///
    /// # Errors
    ///
    /// Propagates any failure from the version write or the record's
    /// [`crate::Evolvable::write_fields`].
    pub fn write_record<R: crate::record::Evolvable>(&mut self, record: &R) -> ProtocolResult<()> {
        let version = R::version();
        trace!(%version, "writing record");
        self.write_version(version)?;
        record.write_fields(self)
    }

    /// Flushes the underlying sink.
    ///
    /// # Errors
    ///
    /// Returns an error if the flush fails.
    pub fn flush(&mut self) -> ProtocolResult<()> {
        self.frames.flush()
    }

    /// Consumes the writer and returns the underlying sink.
    pub fn into_inner(self) -> S {
        self.frames.into_inner()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use evowire_codec::{FrameDecoder, Tag};
    use evowire_stream::MemoryStream;

    fn written_frames(stream: &MemoryStream) -> Vec<Option<Tag>> {
        let mut dec = FrameDecoder::new(stream.data());
        let mut tags = Vec::new();
        while let Some(frame) = dec.next_frame().unwrap() {
            tags.push(frame.tag());
        }
        tags
    }

    #[test]
    fn fields_are_written_in_call_order() {
        let mut writer = RecordWriter::new(MemoryStream::new());
        writer.write_version(Version::new(1)).unwrap();
        writer.write_int(10).unwrap();
        writer
            .write_group(|w| w.write_value(&Value::Text("X".into())))
            .unwrap();
        writer.write_value(&Value::Text("praveen".into())).unwrap();
        writer.flush().unwrap();

        let stream = writer.into_inner();
        assert_eq!(
            written_frames(&stream),
            vec![
                Some(Tag::Int),
                Some(Tag::Int),
                Some(Tag::SkipStart),
                Some(Tag::Text),
                Some(Tag::SkipEnd),
                Some(Tag::Text),
            ]
        );
    }

    #[test]
    fn empty_group_emits_adjacent_sentinels() {
        let mut writer = RecordWriter::new(MemoryStream::new());
        writer.write_group(|_| Ok(())).unwrap();

        let stream = writer.into_inner();
        assert_eq!(
            written_frames(&stream),
            vec![Some(Tag::SkipStart), Some(Tag::SkipEnd)]
        );
    }

    #[test]
    fn nested_groups_are_rejected() {
        let mut writer = RecordWriter::new(MemoryStream::new());
        let result = writer.write_group(|w| w.write_group(|_| Ok(())));
        assert!(matches!(result, Err(ProtocolError::InvalidRecord { .. })));
    }

    #[test]
    fn group_closure_error_propagates() {
        let mut writer = RecordWriter::new(MemoryStream::new());
        let result = writer.write_group(|_| Err(ProtocolError::invalid_record("boom")));
        assert!(matches!(result, Err(ProtocolError::InvalidRecord { .. })));
    }
}
