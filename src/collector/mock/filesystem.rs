//! In-memory mock filesystem for testing samplers without real `/proc`.
//!
//! This module provides `MockFs` which simulates a filesystem in memory,
//! allowing tests to run on macOS and in CI environments without Linux.

use crate::collector::traits::FileSystem;
use std::collections::{HashMap, HashSet};
use std::io::{self, BufRead, BufReader, Cursor, Read};
use std::path::{Path, PathBuf};

/// How a mocked file behaves when opened.
#[derive(Debug, Clone)]
enum MockEntry {
    /// Readable file with the given content.
    File(String),
    /// Opening fails with `PermissionDenied`.
    Unreadable,
    /// Content is served, then the next read fails.
    Truncated(String),
}

/// In-memory filesystem for testing.
///
/// Stores files and directories in memory, allowing tests to simulate
/// various `/proc` states, including files that fail to open or break off
/// in the middle of a read.
#[derive(Debug, Clone, Default)]
pub struct MockFs {
    /// Map from path to file entry.
    files: HashMap<PathBuf, MockEntry>,
    /// Set of directories (for `exists` support).
    directories: HashSet<PathBuf>,
}

impl MockFs {
    /// Creates a new empty mock filesystem.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a file with the given content, replacing any previous entry.
    ///
    /// Parent directories are automatically created.
    pub fn add_file(&mut self, path: impl AsRef<Path>, content: impl Into<String>) {
        self.insert(path.as_ref(), MockEntry::File(content.into()));
    }

    /// Adds a file that exists but cannot be opened.
    pub fn add_unreadable(&mut self, path: impl AsRef<Path>) {
        self.insert(path.as_ref(), MockEntry::Unreadable);
    }

    /// Adds a file whose read fails after `content` has been served.
    pub fn add_truncated(&mut self, path: impl AsRef<Path>, content: impl Into<String>) {
        self.insert(path.as_ref(), MockEntry::Truncated(content.into()));
    }

    /// Removes a file, as if the kernel stopped exposing it.
    pub fn remove_file(&mut self, path: impl AsRef<Path>) {
        self.files.remove(path.as_ref());
    }

    fn insert(&mut self, path: &Path, entry: MockEntry) {
        let mut parent = path.parent();
        while let Some(p) = parent {
            if !p.as_os_str().is_empty() {
                self.directories.insert(p.to_path_buf());
            }
            parent = p.parent();
        }

        self.files.insert(path.to_path_buf(), entry);
    }
}

/// Reader that serves its content and then reports an I/O error.
struct FailingReader {
    content: Cursor<Vec<u8>>,
}

impl Read for FailingReader {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let n = self.content.read(buf)?;
        if n == 0 {
            return Err(io::Error::other("mock read failure"));
        }
        Ok(n)
    }
}

impl FileSystem for MockFs {
    fn open(&self, path: &Path) -> io::Result<Box<dyn BufRead + Send>> {
        match self.files.get(path) {
            Some(MockEntry::File(content)) => {
                Ok(Box::new(Cursor::new(content.clone().into_bytes())))
            }
            Some(MockEntry::Truncated(content)) => Ok(Box::new(BufReader::new(FailingReader {
                content: Cursor::new(content.clone().into_bytes()),
            }))),
            Some(MockEntry::Unreadable) => Err(io::Error::new(
                io::ErrorKind::PermissionDenied,
                format!("permission denied: {:?}", path),
            )),
            None => Err(io::Error::new(
                io::ErrorKind::NotFound,
                format!("file not found: {:?}", path),
            )),
        }
    }

    fn exists(&self, path: &Path) -> bool {
        self.files.contains_key(path) || self.directories.contains(path)
    }
}
