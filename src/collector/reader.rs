//! Line reader for kernel counter files.
//!
//! Pseudo-files under `/proc` are small and regenerated on every open, so each
//! sample re-opens the file and walks it once. Faults never escape as errors:
//! the iterator just ends, the fault is logged and kept for the caller to inspect.

use std::fmt;
use std::io::{self, BufRead};
use std::path::{Path, PathBuf};

use tracing::warn;

use crate::collector::traits::FileSystem;

/// Fault raised while reading a counter file.
#[derive(Debug)]
pub enum CollectError {
    /// The file could not be opened (missing, permission denied, ...).
    Open { path: PathBuf, source: io::Error },
    /// The file was opened but a later read failed.
    Read { path: PathBuf, source: io::Error },
}

impl fmt::Display for CollectError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CollectError::Open { path, source } => {
                write!(f, "cannot open {}: {}", path.display(), source)
            }
            CollectError::Read { path, source } => {
                write!(f, "read of {} failed: {}", path.display(), source)
            }
        }
    }
}

impl std::error::Error for CollectError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CollectError::Open { source, .. } | CollectError::Read { source, .. } => Some(source),
        }
    }
}

/// Lazy sequence of trimmed lines from one counter file.
///
/// Once a fault occurs the sequence is exhausted for good.
pub struct CounterLines {
    path: PathBuf,
    reader: Option<Box<dyn BufRead + Send>>,
    fault: Option<CollectError>,
}

impl CounterLines {
    /// Opens `path` through `fs`. An open failure yields an empty sequence.
    pub fn open<F: FileSystem + ?Sized>(fs: &F, path: &Path) -> Self {
        let path = path.to_path_buf();
        match fs.open(&path) {
            Ok(reader) => Self {
                path,
                reader: Some(reader),
                fault: None,
            },
            Err(source) => {
                let fault = CollectError::Open {
                    path: path.clone(),
                    source,
                };
                warn!("{}", fault);
                Self {
                    path,
                    reader: None,
                    fault: Some(fault),
                }
            }
        }
    }

    /// The fault that ended the sequence early, if any.
    pub fn fault(&self) -> Option<&CollectError> {
        self.fault.as_ref()
    }

    pub fn is_faulted(&self) -> bool {
        self.fault.is_some()
    }
}

impl Iterator for CounterLines {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        let reader = self.reader.as_mut()?;
        let mut buf = Vec::new();
        match reader.read_until(b'\n', &mut buf) {
            Ok(0) => {
                self.reader = None;
                None
            }
            // Interface names are raw bytes; a bad byte only spoils its own row.
            Ok(_) => Some(String::from_utf8_lossy(&buf).trim().to_string()),
            Err(source) => {
                // Drop the handle right away; the file is not read again this tick.
                self.reader = None;
                let fault = CollectError::Read {
                    path: self.path.clone(),
                    source,
                };
                warn!("{}", fault);
                self.fault = Some(fault);
                None
            }
        }
    }
}
