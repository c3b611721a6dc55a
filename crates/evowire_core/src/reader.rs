//! The tolerant reader: typed reads that survive newer-version streams.

use crate::config::ReadOptions;
use crate::error::{ProtocolError, ProtocolResult};
use crate::frames::FrameReader;
use crate::version::Version;
use evowire_codec::{RawFrame, Tag, Value};
use evowire_stream::ByteSource;
use tracing::trace;

/// A reader that transparently discards skip blocks.
///
/// The reader runs a two-state machine over the raw frame sequence:
/// *Normal*, expecting a payload frame, and *Skipping*, discarding frames
/// until a [`Tag::SkipEnd`] terminator. Every typed read starts in Normal;
/// a fetched [`Tag::SkipStart`] switches to Skipping, and finding the
/// terminator switches back and fetches one more frame to serve as the
/// real result. The loop repeats for any number of consecutive skip
/// blocks, so a reader two or more versions behind a writer still lands on
/// the first frame its own schema declares.
///
/// The tag probe is control flow, not an error path: a frame fetched while
/// testing for the terminator that turns out to be ordinary payload (even
/// payload with a tag this codec has never heard of) is the expected case
/// and is dropped silently. Only two end conditions are faulted: the
/// transport failing mid-frame, and the stream ending while a block is
/// still open.
///
/// One reader instance consumes one stream; it holds the source for its
/// whole lifetime and allocates nothing per read call.
pub struct TolerantReader<S> {
    frames: FrameReader<S>,
    options: ReadOptions,
}

impl<S: ByteSource> TolerantReader<S> {
    /// Creates a reader over the given source with default options.
    pub fn new(source: S) -> Self {
        Self::with_options(source, ReadOptions::default())
    }

    /// Creates a reader with explicit options.
    pub fn with_options(source: S, options: ReadOptions) -> Self {
        Self {
            frames: FrameReader::new(source),
            options,
        }
    }

    /// Reads the next payload value, discarding any skip blocks first.
    ///
    /// # Errors
    ///
    /// Fails with [`ProtocolError::MalformedStream`] if the stream ends
    /// where a value was promised or inside a skip block, and with the
    /// codec's error if the surviving frame cannot be interpreted.
    pub fn read_value(&mut self) -> ProtocolResult<Value> {
        let frame = self.next_payload()?;
        Ok(frame.decode_value()?)
    }

    /// Reads the next payload value and requires it to be an integer.
    ///
    /// Same algorithm as [`TolerantReader::read_value`], specialized to
    /// [`Tag::Int`] frames; it tolerates skip blocks in front of the field
    /// just the same.
    ///
    /// # Errors
    ///
    /// Fails with [`ProtocolError::SchemaMismatch`] if the surviving frame
    /// is not integer-tagged.
    pub fn read_int(&mut self) -> ProtocolResult<i64> {
        let frame = self.next_payload()?;
        match frame.tag() {
            Some(Tag::Int) => {
                let value = frame.decode_value()?;
                value
                    .as_integer()
                    .ok_or_else(|| ProtocolError::schema_mismatch("int", describe(&frame)))
            }
            _ => Err(ProtocolError::schema_mismatch("int", describe(&frame))),
        }
    }

    /// Reads the record's version tag.
    ///
    /// # Errors
    ///
    /// Fails with [`ProtocolError::MalformedStream`] if the decoded
    /// integer is negative or beyond `u32::MAX`.
    pub fn read_version(&mut self) -> ProtocolResult<Version> {
        let raw = self.read_int()?;
        Version::from_wire(raw)
            .ok_or_else(|| ProtocolError::malformed(format!("version {raw} out of range")))
    }

    /// Consumes the opening sentinel of a group this reader's schema knows.
    ///
    /// A reader whose version includes an evolving group reads the group
    /// explicitly: `begin_group`, typed reads for the group's fields, then
    /// [`TolerantReader::end_group`]. Whether the group is present on the
    /// wire at all is decided by the stream's version tag, not by probing.
    ///
    /// # Errors
    ///
    /// Fails with [`ProtocolError::SchemaMismatch`] if the next frame is
    /// not the opening sentinel.
    pub fn begin_group(&mut self) -> ProtocolResult<()> {
        let frame = self.fetch()?;
        if frame.is_skip_start() {
            Ok(())
        } else {
            Err(ProtocolError::schema_mismatch("skip-start", describe(&frame)))
        }
    }

    /// Consumes the closing sentinel of a group opened with
    /// [`TolerantReader::begin_group`].
    ///
    /// # Errors
    ///
    /// Fails with [`ProtocolError::SchemaMismatch`] if the next frame is
    /// not the closing sentinel.
    pub fn end_group(&mut self) -> ProtocolResult<()> {
        let frame = self.fetch()?;
        if frame.is_skip_end() {
            Ok(())
        } else {
            Err(ProtocolError::schema_mismatch("skip-end", describe(&frame)))
        }
    }

    /// Reads a whole record: version tag first, then the record's fields.
    ///
    /// # Errors
    ///
    /// Propagates any failure from the version read or the record's
    /// [`crate::Evolvable::read_fields`].
    pub fn read_record<R: crate::record::Evolvable>(&mut self) -> ProtocolResult<R> {
        let version = self.read_version()?;
        trace!(%version, "reading record");
        R::read_fields(version, self)
    }

    /// Consumes the reader and returns the underlying source.
    pub fn into_inner(self) -> S {
        self.frames.into_inner()
    }

    /// Fetches the next raw frame, faulting on a clean end of stream.
    fn fetch(&mut self) -> ProtocolResult<RawFrame> {
        self.frames
            .next_frame()?
            .ok_or_else(|| ProtocolError::malformed("end of stream where a value was expected"))
    }

    /// Normal-state fetch: lands on the first non-sentinel frame,
    /// discarding any number of complete skip blocks on the way.
    fn next_payload(&mut self) -> ProtocolResult<RawFrame> {
        let mut frame = self.fetch()?;
        loop {
            if frame.is_skip_start() {
                self.discard_block()?;
                frame = self.fetch()?;
            } else if frame.is_skip_end() {
                return Err(ProtocolError::malformed(
                    "skip terminator without an open skip block",
                ));
            } else {
                return Ok(frame);
            }
        }
    }

    /// Skipping state: drops frames until the block terminator.
    fn discard_block(&mut self) -> ProtocolResult<()> {
        let mut discarded: u64 = 0;
        loop {
            match self.frames.next_frame()? {
                None => {
                    return Err(ProtocolError::malformed(
                        "end of stream inside a skip block, no terminator found",
                    ))
                }
                Some(frame) if frame.is_skip_end() => {
                    trace!(discarded, "skip block discarded");
                    return Ok(());
                }
                Some(_) => {
                    // Blocks never nest, so anything else, unknown tags
                    // and stray skip-starts included, is payload to drop.
                    discarded += 1;
                    if discarded > self.options.max_skip_values {
                        return Err(ProtocolError::malformed(format!(
                            "skip block exceeded {} values without a terminator",
                            self.options.max_skip_values
                        )));
                    }
                }
            }
        }
    }
}

/// Human-readable description of a frame's wire type, for error messages.
fn describe(frame: &RawFrame) -> String {
    match frame.tag() {
        Some(tag) => tag.to_string(),
        None => format!("unknown tag 0x{:02x}", frame.tag_byte()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use evowire_codec::{CodecError, FrameEncoder};
    use evowire_stream::MemoryStream;

    fn reader_over(bytes: &[u8]) -> TolerantReader<MemoryStream> {
        TolerantReader::new(MemoryStream::with_data(bytes.to_vec()))
    }

    #[test]
    fn plain_values_pass_through() {
        let mut enc = FrameEncoder::new();
        enc.put_value(&Value::Integer(10)).unwrap();
        enc.put_value(&Value::Text("praveen".into())).unwrap();
        let mut reader = reader_over(&enc.into_bytes());

        assert_eq!(reader.read_int().unwrap(), 10);
        assert_eq!(reader.read_value().unwrap(), Value::Text("praveen".into()));
    }

    #[test]
    fn single_block_is_skipped() {
        let mut enc = FrameEncoder::new();
        enc.put_value(&Value::Integer(10)).unwrap();
        enc.put_skip_start();
        enc.put_value(&Value::Text("X".into())).unwrap();
        enc.put_skip_end();
        enc.put_value(&Value::Text("praveen".into())).unwrap();
        let mut reader = reader_over(&enc.into_bytes());

        assert_eq!(reader.read_int().unwrap(), 10);
        assert_eq!(reader.read_value().unwrap(), Value::Text("praveen".into()));
    }

    #[test]
    fn consecutive_blocks_are_skipped() {
        // A reader two versions behind: two blocks back to back.
        let mut enc = FrameEncoder::new();
        enc.put_skip_start();
        enc.put_value(&Value::Text("v1".into())).unwrap();
        enc.put_skip_end();
        enc.put_skip_start();
        enc.put_value(&Value::Integer(2)).unwrap();
        enc.put_value(&Value::Bool(true)).unwrap();
        enc.put_skip_end();
        enc.put_value(&Value::Text("real".into())).unwrap();
        let mut reader = reader_over(&enc.into_bytes());

        assert_eq!(reader.read_value().unwrap(), Value::Text("real".into()));
    }

    #[test]
    fn empty_block_is_skipped() {
        let mut enc = FrameEncoder::new();
        enc.put_skip_start();
        enc.put_skip_end();
        enc.put_value(&Value::Integer(5)).unwrap();
        let mut reader = reader_over(&enc.into_bytes());

        assert_eq!(reader.read_int().unwrap(), 5);
    }

    #[test]
    fn unterminated_block_is_malformed() {
        let mut enc = FrameEncoder::new();
        enc.put_skip_start();
        enc.put_value(&Value::Text("stranded".into())).unwrap();
        let mut reader = reader_over(&enc.into_bytes());

        assert!(matches!(
            reader.read_value(),
            Err(ProtocolError::MalformedStream { .. })
        ));
    }

    #[test]
    fn end_of_stream_where_value_expected_is_malformed() {
        let mut reader = reader_over(&[]);
        assert!(matches!(
            reader.read_value(),
            Err(ProtocolError::MalformedStream { .. })
        ));
    }

    #[test]
    fn end_of_stream_after_block_is_malformed() {
        let mut enc = FrameEncoder::new();
        enc.put_skip_start();
        enc.put_skip_end();
        let mut reader = reader_over(&enc.into_bytes());

        assert!(matches!(
            reader.read_value(),
            Err(ProtocolError::MalformedStream { .. })
        ));
    }

    #[test]
    fn orphan_terminator_is_malformed() {
        let mut enc = FrameEncoder::new();
        enc.put_skip_end();
        enc.put_value(&Value::Integer(1)).unwrap();
        let mut reader = reader_over(&enc.into_bytes());

        assert!(matches!(
            reader.read_value(),
            Err(ProtocolError::MalformedStream { .. })
        ));
    }

    #[test]
    fn read_int_rejects_other_tags() {
        let mut enc = FrameEncoder::new();
        enc.put_value(&Value::Text("not a number".into())).unwrap();
        let mut reader = reader_over(&enc.into_bytes());

        assert!(matches!(
            reader.read_int(),
            Err(ProtocolError::SchemaMismatch { .. })
        ));
    }

    #[test]
    fn unknown_tags_inside_block_are_discarded() {
        let mut enc = FrameEncoder::new();
        enc.put_skip_start();
        let mut bytes = enc.into_bytes().to_vec();
        // A frame from some future schema: tag 0x42, 3-byte payload.
        bytes.extend_from_slice(&[0x42, 3, 0, 0, 0, 0xaa, 0xbb, 0xcc]);
        let mut enc = FrameEncoder::new();
        enc.put_skip_end();
        enc.put_value(&Value::Integer(9)).unwrap();
        bytes.extend_from_slice(enc.as_bytes());
        let mut reader = reader_over(&bytes);

        assert_eq!(reader.read_int().unwrap(), 9);
    }

    #[test]
    fn unknown_tag_outside_block_fails_typed_read() {
        let bytes = [0x42, 1, 0, 0, 0, 0xaa];
        let mut reader = reader_over(&bytes);

        assert!(matches!(
            reader.read_value(),
            Err(ProtocolError::Codec(CodecError::UnknownTag { tag: 0x42 }))
        ));
    }

    #[test]
    fn stray_start_inside_block_is_discarded() {
        // Blocks never nest; an inner skip-start counts as dropped payload.
        let mut enc = FrameEncoder::new();
        enc.put_skip_start();
        enc.put_skip_start();
        enc.put_value(&Value::Integer(1)).unwrap();
        enc.put_skip_end();
        enc.put_value(&Value::Integer(2)).unwrap();
        let mut reader = reader_over(&enc.into_bytes());

        assert_eq!(reader.read_int().unwrap(), 2);
    }

    #[test]
    fn discard_bound_is_enforced() {
        let mut enc = FrameEncoder::new();
        enc.put_skip_start();
        for i in 0..8 {
            enc.put_value(&Value::Integer(i)).unwrap();
        }
        enc.put_skip_end();
        enc.put_value(&Value::Integer(99)).unwrap();
        let bytes = enc.into_bytes();

        let mut bounded = TolerantReader::with_options(
            MemoryStream::with_data(bytes.to_vec()),
            ReadOptions::new().max_skip_values(4),
        );
        assert!(matches!(
            bounded.read_int(),
            Err(ProtocolError::MalformedStream { .. })
        ));

        let mut unbounded = reader_over(&bytes);
        assert_eq!(unbounded.read_int().unwrap(), 99);
    }

    #[test]
    fn version_reads() {
        let mut enc = FrameEncoder::new();
        enc.put_value(&Value::Integer(3)).unwrap();
        let mut reader = reader_over(&enc.into_bytes());
        assert_eq!(reader.read_version().unwrap(), Version::new(3));
    }

    #[test]
    fn negative_version_is_malformed() {
        let mut enc = FrameEncoder::new();
        enc.put_value(&Value::Integer(-1)).unwrap();
        let mut reader = reader_over(&enc.into_bytes());
        assert!(matches!(
            reader.read_version(),
            Err(ProtocolError::MalformedStream { .. })
        ));
    }

    #[test]
    fn known_group_is_read_explicitly() {
        let mut enc = FrameEncoder::new();
        enc.put_skip_start();
        enc.put_value(&Value::Text("extra".into())).unwrap();
        enc.put_skip_end();
        enc.put_value(&Value::Integer(1)).unwrap();
        let mut reader = reader_over(&enc.into_bytes());

        reader.begin_group().unwrap();
        assert_eq!(reader.read_value().unwrap(), Value::Text("extra".into()));
        reader.end_group().unwrap();
        assert_eq!(reader.read_int().unwrap(), 1);
    }

    #[test]
    fn begin_group_on_payload_is_mismatch() {
        let mut enc = FrameEncoder::new();
        enc.put_value(&Value::Integer(1)).unwrap();
        let mut reader = reader_over(&enc.into_bytes());

        assert!(matches!(
            reader.begin_group(),
            Err(ProtocolError::SchemaMismatch { .. })
        ));
    }

    #[test]
    fn end_group_on_payload_is_mismatch() {
        let mut enc = FrameEncoder::new();
        enc.put_skip_start();
        enc.put_value(&Value::Text("a".into())).unwrap();
        enc.put_value(&Value::Text("b".into())).unwrap();
        enc.put_skip_end();
        let mut reader = reader_over(&enc.into_bytes());

        reader.begin_group().unwrap();
        reader.read_value().unwrap();
        // Schema expects the group to end here, but another field follows.
        assert!(matches!(
            reader.end_group(),
            Err(ProtocolError::SchemaMismatch { .. })
        ));
    }

    #[test]
    fn truncation_inside_skipped_frame_is_transport_error() {
        let mut enc = FrameEncoder::new();
        enc.put_skip_start();
        let mut bytes = enc.into_bytes().to_vec();
        // Frame inside the block claims 8 payload bytes but only 2 follow.
        bytes.extend_from_slice(&[0x03, 8, 0, 0, 0, 1, 2]);
        let mut reader = reader_over(&bytes);

        assert!(matches!(
            reader.read_value(),
            Err(ProtocolError::Stream(_))
        ));
    }
}
