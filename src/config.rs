//! Sampling configuration.

use std::path::{Path, PathBuf};
use std::time::Duration;

/// Default sampling interval in seconds.
pub const DEFAULT_INTERVAL_SECS: u64 = 1;

/// Default mount point of the proc filesystem.
pub const DEFAULT_PROC_PATH: &str = "/proc";

/// Where to read counters from and how often.
///
/// `interval` is both the scheduler cadence and the denominator of every
/// derived rate; both read this one field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonitorConfig {
    pub proc_path: PathBuf,
    pub interval: Duration,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            proc_path: PathBuf::from(DEFAULT_PROC_PATH),
            interval: Duration::from_secs(DEFAULT_INTERVAL_SECS),
        }
    }
}

impl MonitorConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_proc_path(mut self, proc_path: impl AsRef<Path>) -> Self {
        self.proc_path = proc_path.as_ref().to_path_buf();
        self
    }

    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }
}
