//! CPU utilization sampler over the aggregate row of `/proc/stat`.

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::collector::procfs::parser::{CpuTicks, parse_cpu_ticks};
use crate::collector::reader::CounterLines;
use crate::collector::traits::FileSystem;
use crate::models::Reading;
use crate::rates::delta_ratio;

/// Derives the busy fraction from successive `/proc/stat` tick counts.
///
/// Unlike the network sampler there is no bootstrap: the baseline starts at
/// zero, so the first sample reports the average since boot.
#[derive(Debug, Clone)]
pub struct CpuSampler {
    path: PathBuf,
    baseline: CpuTicks,
}

impl CpuSampler {
    /// Creates a sampler for `<proc_path>/stat`.
    pub fn new(proc_path: &Path) -> Self {
        Self {
            path: proc_path.join("stat"),
            baseline: CpuTicks::default(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn baseline(&self) -> CpuTicks {
        self.baseline
    }

    pub fn reset(&mut self) {
        self.baseline = CpuTicks::default();
    }

    /// Takes one sample.
    ///
    /// The baseline is replaced on every call. A file without an aggregate row
    /// counts as zero ticks, so the delta against the old baseline is still
    /// reported. A read fault also zeroes the baseline but reports `Unavailable`.
    pub fn sample<F: FileSystem + ?Sized>(&mut self, fs: &F) -> Reading<f64> {
        let mut lines = CounterLines::open(fs, &self.path);
        let parsed = parse_cpu_ticks(lines.by_ref());
        let faulted = lines.is_faulted();
        drop(lines);

        let current = parsed.unwrap_or_default();
        let usage = delta_ratio(
            i128::from(current.used) - i128::from(self.baseline.used),
            i128::from(current.total) - i128::from(self.baseline.total),
        );
        self.baseline = current;

        if faulted {
            return Reading::Unavailable;
        }
        if parsed.is_none() {
            debug!("cpu: no aggregate row in {:?}", self.path);
        }
        debug!(
            "cpu: used={} total={} -> {:.3}",
            current.used, current.total, usage
        );
        Reading::Measured(usage)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collector::mock::MockFs;

    const EPSILON: f64 = 1e-9;

    fn assert_nearly_equal(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < EPSILON,
            "expected {}, got {}",
            expected,
            actual
        );
    }

    fn measured(reading: Reading<f64>) -> f64 {
        reading.measured().expect("cpu reading should be available")
    }

    #[test]
    fn test_first_sample_is_since_boot_average() {
        let fs = MockFs::typical_system();
        let mut cpu = CpuSampler::new(Path::new("/proc"));

        // user 10000 + system 3000 over 93000 ticks.
        assert_nearly_equal(measured(cpu.sample(&fs)), 13000.0 / 93000.0);
        assert_eq!(cpu.baseline(), CpuTicks {
            used: 13000,
            total: 93000
        });
    }

    #[test]
    fn test_usage_from_delta() {
        let mut fs = MockFs::new();
        fs.set_cpu_ticks(1000, 0, 500, 8500);
        let mut cpu = CpuSampler::new(Path::new("/proc"));
        cpu.sample(&fs);

        // +30 user, +10 system, +60 idle.
        fs.set_cpu_ticks(1030, 0, 510, 8560);
        assert_nearly_equal(measured(cpu.sample(&fs)), 0.4);
    }

    #[test]
    fn test_nice_and_iowait_are_ignored() {
        let mut fs = MockFs::new();
        fs.set_cpu_ticks(1000, 0, 500, 8500);
        let mut cpu = CpuSampler::new(Path::new("/proc"));
        cpu.sample(&fs);

        fs.set_cpu_ticks(1000, 900, 500, 8600);
        assert_nearly_equal(measured(cpu.sample(&fs)), 0.0);
    }

    #[test]
    fn test_unchanged_counters_yield_zero() {
        let fs = MockFs::idle_system();
        let mut cpu = CpuSampler::new(Path::new("/proc"));
        cpu.sample(&fs);

        assert_eq!(measured(cpu.sample(&fs)), 0.0);
    }

    #[test]
    fn test_usage_stays_in_unit_range() {
        let mut fs = MockFs::new();
        let mut cpu = CpuSampler::new(Path::new("/proc"));
        let (mut user, mut system, mut idle) = (100u64, 50u64, 1000u64);

        for step in 0..20u64 {
            user += step * 7 % 13;
            system += step * 3 % 5;
            idle += step * 11 % 17;
            fs.set_cpu_ticks(user, 0, system, idle);
            let usage = measured(cpu.sample(&fs));
            assert!((0.0..=1.0).contains(&usage), "usage {} out of range", usage);
        }
    }

    #[test]
    fn test_read_failure_resets_baseline() {
        let mut fs = MockFs::new();
        fs.set_cpu_ticks(1000, 0, 500, 8500);
        let mut cpu = CpuSampler::new(Path::new("/proc"));
        cpu.sample(&fs);

        fs.add_unreadable("/proc/stat");
        assert_eq!(cpu.sample(&fs), Reading::Unavailable);
        // Unlike the network sampler, the baseline does not survive the fault.
        assert_eq!(cpu.baseline(), CpuTicks::default());

        // Next good read is measured against zero: the since-boot average.
        fs.set_cpu_ticks(1030, 0, 510, 8560);
        assert_nearly_equal(measured(cpu.sample(&fs)), 1540.0 / 10100.0);
    }

    #[test]
    fn test_missing_aggregate_row() {
        let mut fs = MockFs::new();
        fs.add_file("/proc/stat", "cpu0 1 2 3 4\nctxt 5\n");
        let mut cpu = CpuSampler::new(Path::new("/proc"));

        assert_eq!(cpu.sample(&fs), Reading::Measured(0.0));
        assert_eq!(cpu.baseline(), CpuTicks::default());
    }

    #[test]
    fn test_missing_aggregate_row_after_baseline() {
        let mut fs = MockFs::new();
        fs.set_cpu_ticks(1000, 0, 500, 8500);
        let mut cpu = CpuSampler::new(Path::new("/proc"));
        cpu.sample(&fs);

        // Zero ticks against the old baseline: (0 - 1500) / (0 - 10000).
        fs.add_file("/proc/stat", "cpu0 1 2 3 4\nctxt 5\n");
        assert_nearly_equal(measured(cpu.sample(&fs)), 0.15);
        assert_eq!(cpu.baseline(), CpuTicks::default());
    }

    #[test]
    fn test_reset() {
        let fs = MockFs::typical_system();
        let mut cpu = CpuSampler::new(Path::new("/proc"));
        cpu.sample(&fs);
        cpu.reset();

        assert_eq!(cpu.baseline(), CpuTicks::default());
    }
}
