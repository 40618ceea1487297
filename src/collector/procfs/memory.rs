//! Memory usage sampler over `/proc/meminfo`.

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::collector::procfs::parser::parse_meminfo;
use crate::collector::reader::CounterLines;
use crate::collector::traits::FileSystem;
use crate::models::Reading;

/// Reports the used fraction `(MemTotal - MemAvailable) / MemTotal`.
///
/// Stateless: every sample stands on its own.
#[derive(Debug, Clone)]
pub struct MemorySampler {
    path: PathBuf,
}

impl MemorySampler {
    /// Creates a sampler for `<proc_path>/meminfo`.
    pub fn new(proc_path: &Path) -> Self {
        Self {
            path: proc_path.join("meminfo"),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn sample<F: FileSystem + ?Sized>(&self, fs: &F) -> Reading<f64> {
        let mut lines = CounterLines::open(fs, &self.path);
        let info = parse_meminfo(lines.by_ref());
        if lines.is_faulted() {
            return Reading::Unavailable;
        }

        match (info.mem_total, info.mem_available) {
            (Some(total), Some(available)) if total > 0 => {
                let usage = (total as f64 - available as f64) / total as f64;
                debug!("mem: total={} available={} -> {:.3}", total, available, usage);
                Reading::Measured(usage)
            }
            _ => {
                debug!("mem: MemTotal/MemAvailable not found in {:?}", self.path);
                Reading::Unavailable
            }
        }
    }
}
