//! Abstractions for filesystem access to enable testing and mocking.
//!
//! The `FileSystem` trait allows the samplers to read the real `/proc`
//! filesystem on Linux and mock implementations for testing on macOS or in CI.

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

/// Abstraction for filesystem operations.
///
/// Counter files are consumed as streams so that a fault in the middle of a
/// file can be told apart from a file that simply ended.
pub trait FileSystem: Send + Sync {
    /// Opens a file for buffered, line-oriented reading.
    ///
    /// The returned reader owns the underlying handle; dropping it closes the file.
    fn open(&self, path: &Path) -> io::Result<Box<dyn BufRead + Send>>;

    /// Checks if a path exists.
    fn exists(&self, path: &Path) -> bool;
}

/// Real filesystem implementation that delegates to `std::fs`.
///
/// Use this in production to read from the actual `/proc` filesystem.
#[derive(Debug, Default, Clone, Copy)]
pub struct RealFs;

impl RealFs {
    /// Creates a new `RealFs` instance.
    pub fn new() -> Self {
        Self
    }
}

impl FileSystem for RealFs {
    fn open(&self, path: &Path) -> io::Result<Box<dyn BufRead + Send>> {
        let file = File::open(path)?;
        Ok(Box::new(BufReader::new(file)))
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_real_fs_open_reads_lines() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "MemTotal:       16384000 kB").unwrap();
        writeln!(file, "MemAvailable:   12000000 kB").unwrap();

        let fs = RealFs::new();
        let reader = fs.open(file.path()).unwrap();
        let lines: Vec<String> = reader.lines().map(|l| l.unwrap()).collect();

        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("MemTotal:"));
    }

    #[test]
    fn test_real_fs_exists() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("stat");
        std::fs::write(&path, "cpu  1 2 3 4\n").unwrap();

        let fs = RealFs::new();
        assert!(fs.exists(&path));
        assert!(!fs.exists(Path::new("/nonexistent/path/12345")));
    }

    #[test]
    fn test_real_fs_open_missing_file() {
        let fs = RealFs::new();
        let err = fs.open(Path::new("/nonexistent/path/12345")).err().unwrap();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }
}
