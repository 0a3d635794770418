//! Line and byte counting for a single file.
//!
//! A line is a run of bytes ended by `\n`. A trailing run with no
//! terminator still counts as a line, and an empty file has zero lines.
//! The byte count comes from file metadata rather than from the bytes
//! actually read, so a file that changes while it is being read still
//! reports the size it had when opened.

use std::fs::File;
use std::io::{self, ErrorKind, Read};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::PolylocError;
use crate::Result;

/// Size of the read buffer each counter owns.
pub const READ_BUFFER_SIZE: usize = 64 * 1024;

/// Counts for one file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileCount {
    pub lines: u64,
    pub bytes: u64,
}

/// Reusable file counter.
///
/// Owns its read buffer so a worker can count many files without
/// allocating per file.
#[derive(Debug)]
pub struct LineCounter {
    buf: Vec<u8>,
}

impl Default for LineCounter {
    fn default() -> Self {
        Self::new()
    }
}

impl LineCounter {
    /// Create a counter with the default buffer size.
    pub fn new() -> Self {
        Self::with_buffer_size(READ_BUFFER_SIZE)
    }

    /// Create a counter with a specific buffer size (at least one byte).
    pub fn with_buffer_size(size: usize) -> Self {
        Self {
            buf: vec![0; size.max(1)],
        }
    }

    /// Open `path`, read its size from metadata and count its lines.
    ///
    /// The file handle is dropped on every return path.
    pub fn count_path(&mut self, path: &Path) -> io::Result<FileCount> {
        let mut file = File::open(path)?;
        let bytes = file.metadata()?.len();
        let lines = self.count_lines(&mut file)?;
        Ok(FileCount { lines, bytes })
    }

    /// Count lines in any reader until EOF.
    pub fn count_lines<R: Read>(&mut self, reader: &mut R) -> io::Result<u64> {
        let mut lines = 0u64;
        let mut last_byte = None;

        loop {
            let n = match reader.read(&mut self.buf) {
                Ok(0) => break,
                Ok(n) => n,
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            };
            let chunk = &self.buf[..n];
            lines += chunk.iter().filter(|&&b| b == b'\n').count() as u64;
            last_byte = chunk.last().copied();
        }

        if matches!(last_byte, Some(b) if b != b'\n') {
            lines += 1;
        }

        Ok(lines)
    }
}

/// Count a single file.
///
/// # Example
///
/// ```rust
/// use polyloclib::count_file;
/// use std::fs;
/// use tempfile::tempdir;
///
/// let dir = tempdir().unwrap();
/// let path = dir.path().join("a.go");
/// fs::write(&path, "package main\n\nfunc main() {}").unwrap();
///
/// let count = count_file(&path).unwrap();
/// assert_eq!(count.lines, 3);
/// assert_eq!(count.bytes, 28);
/// ```
pub fn count_file(path: impl AsRef<Path>) -> Result<FileCount> {
    let path = path.as_ref();
    LineCounter::new()
        .count_path(path)
        .map_err(|source| PolylocError::FileRead {
            path: path.to_path_buf(),
            source,
        })
}
