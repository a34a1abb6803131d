//! Bounded and safe I/O for module files.
//!
//! Provides a `SafeReader` that memory-maps the input and enforces the
//! configured size and read limits before any bytes cross the decode
//! boundary. All file access happens here, before the walk starts.

use crate::config::IOConfig;
use crate::error::{InspectError, Result};
use bytes::Bytes;
use memmap2::Mmap;
use std::fs::File;
use std::path::{Path, PathBuf};
use tracing::{debug, trace, warn};

/// A safe, bounded file reader backed by a read-only memory map.
pub struct SafeReader {
    path: PathBuf,
    // None when the file size is zero; memmap cannot map empty files.
    mmap: Option<Mmap>,
    limits: IOConfig,
    bytes_read: u64,
    file_size: u64,
}

impl SafeReader {
    /// Opens a file, memory-maps it, and wraps it in a `SafeReader`.
    ///
    /// Fails if the file size exceeds `limits.max_file_size`.
    pub fn open<P: AsRef<Path>>(path: P, limits: IOConfig) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)?;
        let file_size = file.metadata()?.len();

        debug!(
            path = %path.display(),
            size = file_size,
            limit = limits.max_file_size,
            "Opening module file"
        );

        if file_size > limits.max_file_size {
            warn!(
                path = %path.display(),
                size = file_size,
                limit = limits.max_file_size,
                "File is too large"
            );
            return Err(InspectError::FileTooLarge {
                limit: limits.max_file_size,
                found: file_size,
            });
        }

        let mmap = if file_size == 0 {
            None
        } else {
            // Safety: the file is backed by a real file on disk and the
            // map is requested read-only.
            Some(unsafe { Mmap::map(&file)? })
        };

        Ok(Self {
            path: path.to_path_buf(),
            mmap,
            limits,
            bytes_read: 0,
            file_size,
        })
    }

    /// Total size of the underlying file in bytes.
    pub fn size(&self) -> u64 {
        self.file_size
    }

    /// Total number of bytes read so far.
    pub fn bytes_read(&self) -> u64 {
        self.bytes_read
    }

    /// Reads a slice of the file at a given offset as a cheap,
    /// reference-counted `Bytes` buffer.
    ///
    /// Returns `InspectError::ReadLimitExceeded` when the read would push
    /// the running total past `limits.max_read_bytes`.
    pub fn read_at(&mut self, offset: u64, len: u64) -> Result<Bytes> {
        if self.bytes_read.saturating_add(len) > self.limits.max_read_bytes {
            warn!(
                path = %self.path.display(),
                current_read = self.bytes_read,
                requested = len,
                limit = self.limits.max_read_bytes,
                "Read limit exceeded"
            );
            return Err(InspectError::ReadLimitExceeded {
                limit: self.limits.max_read_bytes,
                current: self.bytes_read,
            });
        }

        let map = match &self.mmap {
            Some(m) => m,
            None => return Ok(Bytes::new()),
        };

        let offset = offset as usize;
        if offset >= map.len() {
            return Ok(Bytes::new()); // Read starts past EOF.
        }
        let end = std::cmp::min(offset.saturating_add(len as usize), map.len());
        let out = Bytes::copy_from_slice(&map[offset..end]);
        self.bytes_read += (end - offset) as u64;

        trace!(
            path = %self.path.display(),
            offset = offset,
            len = end - offset,
            total_read = self.bytes_read,
            "Performed read"
        );

        Ok(out)
    }

    /// Reads the whole file, subject to the read budget.
    pub fn read_all(&mut self) -> Result<Bytes> {
        self.read_at(0, self.file_size)
    }
}
