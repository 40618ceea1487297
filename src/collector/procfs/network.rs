//! Network throughput sampler over `/proc/net/dev`.

use std::path::{Path, PathBuf};
use std::time::Duration;

use tracing::debug;

use crate::collector::procfs::parser::{NetTotals, parse_net_dev};
use crate::collector::reader::CounterLines;
use crate::collector::traits::FileSystem;
use crate::models::{NetSpeed, Reading};
use crate::rates::counter_rate;

/// Last byte totals seen; `None` until the first successful read after a reset.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NetBaseline {
    pub down: Option<u64>,
    pub up: Option<u64>,
}

/// Derives down/up throughput from successive `/proc/net/dev` totals.
#[derive(Debug, Clone)]
pub struct NetworkSampler {
    path: PathBuf,
    interval: Duration,
    baseline: NetBaseline,
}

impl NetworkSampler {
    /// Creates a sampler for `<proc_path>/net/dev`.
    ///
    /// `interval` is the time between two calls to `sample` and is used as the
    /// rate denominator.
    pub fn new(proc_path: &Path, interval: Duration) -> Self {
        Self {
            path: proc_path.join("net/dev"),
            interval,
            baseline: NetBaseline::default(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn baseline(&self) -> NetBaseline {
        self.baseline
    }

    /// Forgets the previous totals so the next sample is a fresh baseline.
    pub fn reset(&mut self) {
        self.baseline = NetBaseline::default();
    }

    /// Takes one sample.
    ///
    /// The first sample after a reset only records the baseline and reports a
    /// zero rate. A failed read reports `Unavailable` and leaves the baseline
    /// as it was.
    pub fn sample<F: FileSystem + ?Sized>(&mut self, fs: &F) -> Reading<NetSpeed> {
        let mut lines = CounterLines::open(fs, &self.path);
        let totals = parse_net_dev(lines.by_ref());
        if lines.is_faulted() {
            return Reading::Unavailable;
        }
        drop(lines);

        let speed = self.advance(totals);
        debug!(
            "net: down={} up={} -> {:.0} B/s down, {:.0} B/s up",
            totals.down, totals.up, speed.down, speed.up
        );
        Reading::Measured(speed)
    }

    fn advance(&mut self, totals: NetTotals) -> NetSpeed {
        let prev_down = *self.baseline.down.get_or_insert(totals.down);
        let prev_up = *self.baseline.up.get_or_insert(totals.up);

        let speed = NetSpeed {
            down: counter_rate(totals.down, prev_down, self.interval),
            up: counter_rate(totals.up, prev_up, self.interval),
        };

        self.baseline.down = Some(totals.down);
        self.baseline.up = Some(totals.up);
        speed
    }
}
