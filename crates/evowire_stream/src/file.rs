//! File-backed transports for persisted streams.

use crate::error::{StreamError, StreamResult};
use crate::transport::{ByteSink, ByteSource};
use std::fs::{File, OpenOptions};
use std::io::{BufReader, BufWriter, ErrorKind, Read, Write};
use std::path::{Path, PathBuf};

/// The write side of a file-backed stream.
///
/// Writes are buffered; call [`FileWriter::sync`] after the final flush to
/// ensure the stream survives process termination.
///
/// # Example
///
/// ```no_run
/// use evowire_stream::{ByteSink, FileWriter};
/// use std::path::Path;
///
/// let mut writer = FileWriter::create(Path::new("record.evw")).unwrap();
/// writer.write_all(b"frame bytes").unwrap();
/// writer.flush().unwrap();
/// writer.sync().unwrap();
/// ```
#[derive(Debug)]
pub struct FileWriter {
    path: PathBuf,
    inner: BufWriter<File>,
}

impl FileWriter {
    /// Creates (or truncates) a file and opens it for appending a stream.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be created.
    pub fn create(path: &Path) -> StreamResult<Self> {
        let file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(path)?;
        Ok(Self {
            path: path.to_path_buf(),
            inner: BufWriter::new(file),
        })
    }

    /// Creates the file, creating parent directories if needed.
    ///
    /// # Errors
    ///
    /// Returns an error if directories cannot be created or the file cannot
    /// be opened.
    pub fn create_with_dirs(path: &Path) -> StreamResult<Self> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        Self::create(path)
    }

    /// Returns the path to the underlying file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Syncs file data and metadata to durable storage.
    ///
    /// This is a stronger guarantee than `flush`: after it returns, the
    /// stream is on disk.
    ///
    /// # Errors
    ///
    /// Returns an error if the sync operation fails.
    pub fn sync(&mut self) -> StreamResult<()> {
        self.inner.flush()?;
        self.inner.get_ref().sync_all()?;
        Ok(())
    }
}

impl ByteSink for FileWriter {
    fn write_all(&mut self, data: &[u8]) -> StreamResult<()> {
        self.inner.write_all(data)?;
        Ok(())
    }

    fn flush(&mut self) -> StreamResult<()> {
        self.inner.flush()?;
        Ok(())
    }
}

/// The read side of a file-backed stream.
#[derive(Debug)]
pub struct FileReader {
    path: PathBuf,
    inner: BufReader<File>,
}

impl FileReader {
    /// Opens an existing file for one sequential reading pass.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened.
    pub fn open(path: &Path) -> StreamResult<Self> {
        let file = File::open(path)?;
        Ok(Self {
            path: path.to_path_buf(),
            inner: BufReader::new(file),
        })
    }

    /// Returns the path to the underlying file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ByteSource for FileReader {
    fn read_exact(&mut self, buf: &mut [u8]) -> StreamResult<()> {
        let mut filled = 0;
        while filled < buf.len() {
            match self.inner.read(&mut buf[filled..]) {
                Ok(0) => {
                    return Err(StreamError::Truncated {
                        expected: buf.len(),
                        got: filled,
                    })
                }
                Ok(n) => filled += n,
                Err(e) if e.kind() == ErrorKind::Interrupted => {}
                Err(e) => return Err(e.into()),
            }
        }
        Ok(())
    }

    fn next_byte(&mut self) -> StreamResult<Option<u8>> {
        let mut byte = [0u8; 1];
        loop {
            match self.inner.read(&mut byte) {
                Ok(0) => return Ok(None),
                Ok(_) => return Ok(Some(byte[0])),
                Err(e) if e.kind() == ErrorKind::Interrupted => {}
                Err(e) => return Err(e.into()),
            }
        }
    }
}
