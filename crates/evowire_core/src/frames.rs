//! Streaming frame I/O over byte transports.
//!
//! [`FrameReader`] and [`FrameWriter`] move whole frames across a
//! transport one at a time, keeping memory proportional to a single frame
//! regardless of stream length.

use crate::error::{ProtocolError, ProtocolResult};
use bytes::Bytes;
use evowire_codec::{CodecError, FrameEncoder, RawFrame, LEN_SIZE, MAX_PAYLOAD_LEN};
use evowire_stream::{ByteSink, ByteSource};

/// Reads frames one-by-one from a byte source.
///
/// A clean end of stream at a frame boundary yields `Ok(None)`. A stream
/// that ends inside a frame header or payload fails with the transport's
/// truncation error: the distinction matters to the tolerant reader, which
/// treats only the boundary case as a possible protocol-level condition.
pub struct FrameReader<S> {
    source: S,
    frames_read: u64,
}

impl<S: ByteSource> FrameReader<S> {
    /// Creates a reader over the given source.
    pub fn new(source: S) -> Self {
        Self {
            source,
            frames_read: 0,
        }
    }

    /// Fetches the next raw frame, or `None` at a clean end of stream.
    ///
    /// # Errors
    ///
    /// Returns an error if the stream ends mid-frame, if the claimed
    /// payload length exceeds the codec maximum, or if a sentinel frame
    /// carries payload bytes.
    pub fn next_frame(&mut self) -> ProtocolResult<Option<RawFrame>> {
        let Some(tag) = self.source.next_byte()? else {
            return Ok(None);
        };

        let mut len_buf = [0u8; LEN_SIZE];
        self.source.read_exact(&mut len_buf)?;
        let len = u32::from_le_bytes(len_buf);
        if len > MAX_PAYLOAD_LEN {
            return Err(CodecError::PayloadTooLarge {
                claimed: u64::from(len),
                max_allowed: u64::from(MAX_PAYLOAD_LEN),
            }
            .into());
        }

        let mut payload = vec![0u8; len as usize];
        self.source.read_exact(&mut payload)?;

        let frame = RawFrame::new(tag, Bytes::from(payload))?;
        self.frames_read += 1;
        Ok(Some(frame))
    }

    /// Number of frames fetched so far.
    #[must_use]
    pub fn frames_read(&self) -> u64 {
        self.frames_read
    }

    /// Consumes the reader and returns the underlying source.
    pub fn into_inner(self) -> S {
        self.source
    }
}

/// Writes frames one-by-one to a byte sink.
pub struct FrameWriter<S> {
    sink: S,
    frames_written: u64,
}

impl<S: ByteSink> FrameWriter<S> {
    /// Creates a writer over the given sink.
    pub fn new(sink: S) -> Self {
        Self {
            sink,
            frames_written: 0,
        }
    }

    /// Appends one frame to the stream.
    ///
    /// # Errors
    ///
    /// Returns an error if the transport write fails.
    pub fn put_frame(&mut self, frame: &RawFrame) -> ProtocolResult<()> {
        let mut encoder = FrameEncoder::with_capacity(frame.encoded_len());
        encoder.put_frame(frame);
        self.sink.write_all(encoder.as_bytes())?;
        self.frames_written += 1;
        Ok(())
    }

    /// Flushes the underlying sink.
    ///
    /// # Errors
    ///
    /// Returns an error if the flush fails.
    pub fn flush(&mut self) -> ProtocolResult<()> {
        self.sink.flush()?;
        Ok(())
    }

    /// Number of frames written so far.
    #[must_use]
    pub fn frames_written(&self) -> u64 {
        self.frames_written
    }

    /// Consumes the writer and returns the underlying sink.
    pub fn into_inner(self) -> S {
        self.sink
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use evowire_codec::Value;
    use evowire_stream::{MemoryStream, StreamError};

    #[test]
    fn frames_roundtrip_over_memory() {
        let mut writer = FrameWriter::new(MemoryStream::new());
        writer
            .put_frame(&RawFrame::from_value(&Value::Integer(10)).unwrap())
            .unwrap();
        writer.put_frame(&RawFrame::skip_start()).unwrap();
        writer
            .put_frame(&RawFrame::from_value(&Value::Text("x".into())).unwrap())
            .unwrap();
        writer.put_frame(&RawFrame::skip_end()).unwrap();
        assert_eq!(writer.frames_written(), 4);

        let mut reader = FrameReader::new(writer.into_inner());
        assert_eq!(
            reader.next_frame().unwrap().unwrap().decode_value().unwrap(),
            Value::Integer(10)
        );
        assert!(reader.next_frame().unwrap().unwrap().is_skip_start());
        assert_eq!(
            reader.next_frame().unwrap().unwrap().decode_value().unwrap(),
            Value::Text("x".into())
        );
        assert!(reader.next_frame().unwrap().unwrap().is_skip_end());
        assert!(reader.next_frame().unwrap().is_none());
        assert_eq!(reader.frames_read(), 4);
    }

    #[test]
    fn clean_end_is_none() {
        let mut reader = FrameReader::new(MemoryStream::new());
        assert!(reader.next_frame().unwrap().is_none());
    }

    #[test]
    fn header_truncation_is_transport_error() {
        // tag byte present, length field cut short
        let mut reader = FrameReader::new(MemoryStream::with_data(vec![0x03, 8, 0]));
        assert!(matches!(
            reader.next_frame(),
            Err(ProtocolError::Stream(StreamError::Truncated { .. }))
        ));
    }

    #[test]
    fn payload_truncation_is_transport_error() {
        let mut reader = FrameReader::new(MemoryStream::with_data(vec![0x03, 8, 0, 0, 0, 1, 2]));
        assert!(matches!(
            reader.next_frame(),
            Err(ProtocolError::Stream(StreamError::Truncated { .. }))
        ));
    }

    #[test]
    fn oversized_claim_is_codec_error() {
        let mut reader =
            FrameReader::new(MemoryStream::with_data(vec![0x05, 0xff, 0xff, 0xff, 0xff]));
        assert!(matches!(
            reader.next_frame(),
            Err(ProtocolError::Codec(CodecError::PayloadTooLarge { .. }))
        ));
    }
}
