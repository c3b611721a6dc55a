//! Transport trait definitions.

use crate::error::StreamResult;

/// A sequential source of bytes.
///
/// Sources are **opaque byte pipes**. They deliver bytes in order and know
/// nothing about frames, records, or skip blocks; all format
/// interpretation belongs to `evowire_core`.
///
/// # Invariants
///
/// - Bytes are delivered exactly once, in write order
/// - `next_byte` returns `None` only at a clean end of stream
/// - `read_exact` fails with `Truncated` if the stream ends mid-read
/// - Each source is consumed by exactly one reader; sources are not shared
///
/// # Implementors
///
/// - [`super::MemoryStream`] - For testing and ephemeral streams
/// - [`super::FileReader`] - For persisted streams
pub trait ByteSource {
    /// Reads exactly `buf.len()` bytes into `buf`.
    ///
    /// # Errors
    ///
    /// Returns [`crate::StreamError::Truncated`] if the stream ends before
    /// the buffer is filled, or an I/O error from the underlying transport.
    fn read_exact(&mut self, buf: &mut [u8]) -> StreamResult<()>;

    /// Reads the next byte, or `None` at a clean end of stream.
    ///
    /// # Errors
    ///
    /// Returns an I/O error from the underlying transport.
    fn next_byte(&mut self) -> StreamResult<Option<u8>>;
}

/// A sequential sink for bytes.
///
/// Sinks are append-only: a writer makes one forward pass and never seeks.
///
/// # Implementors
///
/// - [`super::MemoryStream`] - For testing and ephemeral streams
/// - [`super::FileWriter`] - For persisted streams
pub trait ByteSink {
    /// Appends all of `data` to the stream.
    ///
    /// # Errors
    ///
    /// Returns an I/O error from the underlying transport.
    fn write_all(&mut self, data: &[u8]) -> StreamResult<()>;

    /// Flushes all pending writes to the underlying transport.
    ///
    /// # Errors
    ///
    /// Returns an error if the flush operation fails.
    fn flush(&mut self) -> StreamResult<()>;
}
