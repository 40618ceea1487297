//! Fixed-cadence sampling loop.
//!
//! The scheduler is the only writer of sampler state: one tick runs to
//! completion before the next one starts, and `&mut self` keeps it that way.

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use tracing::{error, info, warn};

use crate::collector::{Collector, FileSystem};
use crate::display::{DisplayError, DisplaySurface, PLACEHOLDER_TEXT};
use crate::models::Metrics;

/// Granularity of shutdown checks while waiting for the next tick.
const SLEEP_SLICE: Duration = Duration::from_millis(100);

/// Drives a `Collector` on a fixed interval and feeds a display surface.
pub struct SampleScheduler<F: FileSystem, D: DisplaySurface> {
    collector: Collector<F>,
    surface: D,
    enabled: bool,
    ticks: u64,
}

impl<F: FileSystem, D: DisplaySurface> SampleScheduler<F, D> {
    pub fn new(collector: Collector<F>, surface: D) -> Self {
        Self {
            collector,
            surface,
            enabled: false,
            ticks: 0,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Ticks completed since the last `enable`.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn collector(&self) -> &Collector<F> {
        &self.collector
    }

    pub fn collector_mut(&mut self) -> &mut Collector<F> {
        &mut self.collector
    }

    pub fn surface(&self) -> &D {
        &self.surface
    }

    /// Consumes the scheduler, handing back the surface and its output.
    pub fn into_surface(self) -> D {
        self.surface
    }

    /// Starts a fresh sampling session.
    ///
    /// Previous-sample state is dropped so no delta spans a disable/enable gap.
    pub fn enable(&mut self) -> Result<(), DisplayError> {
        self.collector.reset();
        self.ticks = 0;
        self.enabled = true;

        for path in self.collector.missing_sources() {
            warn!("counter source {} not found, it will read as 0", path.display());
        }
        info!(
            "sampling {} every {}s",
            self.collector.config().proc_path.display(),
            self.collector.config().interval.as_secs_f64()
        );
        self.surface.set_text(PLACEHOLDER_TEXT)
    }

    /// Runs one sample-and-display cycle.
    pub fn tick(&mut self) -> Result<Metrics, DisplayError> {
        let metrics = self.collector.collect();
        self.ticks += 1;
        self.surface.show(&metrics)?;
        Ok(metrics)
    }

    /// Stops sampling and drops previous-sample state.
    pub fn disable(&mut self) -> Result<(), DisplayError> {
        self.enabled = false;
        self.collector.reset();
        info!("sampling stopped after {} ticks", self.ticks);
        self.surface.clear()
    }

    /// Enables, ticks every interval until `running` turns false or `limit`
    /// ticks are done, then disables. Returns the number of ticks taken.
    ///
    /// A display failure is logged and the loop keeps going.
    pub fn run(&mut self, running: &AtomicBool, limit: Option<u64>) -> Result<u64, DisplayError> {
        self.enable()?;
        let interval = self.collector.config().interval;

        let limit_reached = |ticks: u64| limit.is_some_and(|limit| ticks >= limit);

        while running.load(Ordering::SeqCst) && !limit_reached(self.ticks) {
            if let Err(e) = self.tick() {
                error!("failed to update display: {}", e);
            }
            if limit_reached(self.ticks) {
                break;
            }

            let mut remaining = interval;
            while remaining > Duration::ZERO && running.load(Ordering::SeqCst) {
                let sleep_time = remaining.min(SLEEP_SLICE);
                std::thread::sleep(sleep_time);
                remaining = remaining.saturating_sub(sleep_time);
            }
        }

        let ticks = self.ticks;
        self.disable()?;
        Ok(ticks)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collector::MockFs;
    use crate::config::MonitorConfig;
    use crate::display::TextSurface;
    use crate::models::{NetSpeed, Reading};

    type TestScheduler = SampleScheduler<MockFs, TextSurface<Vec<u8>>>;

    fn scheduler(fs: MockFs, interval: Duration) -> TestScheduler {
        let config = MonitorConfig::default().with_interval(interval);
        SampleScheduler::new(Collector::new(fs, config), TextSurface::new(Vec::new()))
    }

    /// Surface that always fails, to check the loop survives it.
    struct BrokenSurface;

    impl DisplaySurface for BrokenSurface {
        fn set_text(&mut self, _text: &str) -> Result<(), DisplayError> {
            Err(DisplayError::Io(std::io::Error::other("closed")))
        }
    }

    #[test]
    fn test_enable_shows_placeholder() {
        let mut s = scheduler(MockFs::typical_system(), Duration::from_secs(1));
        s.enable().unwrap();

        assert!(s.is_enabled());
        assert_eq!(s.surface().text(), Some(PLACEHOLDER_TEXT));
    }

    #[test]
    fn test_tick_updates_surface() {
        let mut s = scheduler(MockFs::typical_system(), Duration::from_secs(1));
        s.enable().unwrap();
        s.tick().unwrap();

        // cpu 13000/93000, mem 4384000/16384000, first net tick is zero.
        assert_eq!(s.surface().text(), Some("U 14% M 27% ↓ 0 B/s ↑ 0 B/s"));
        assert_eq!(s.ticks(), 1);
    }

    #[test]
    fn test_reenable_does_not_span_gap() {
        let mut s = scheduler(MockFs::typical_system(), Duration::from_secs(1));
        s.enable().unwrap();
        s.tick().unwrap();
        s.disable().unwrap();
        assert!(!s.is_enabled());

        s.collector_mut()
            .fs_mut()
            .set_net_dev(&[("eth0", 5_000_000_000, 5_000_000_000)]);
        s.enable().unwrap();
        let metrics = s.tick().unwrap();

        assert_eq!(metrics.net, Reading::Measured(NetSpeed::default()));
    }

    #[test]
    fn test_run_stops_at_limit() {
        let mut s = scheduler(MockFs::typical_system(), Duration::ZERO);
        let running = AtomicBool::new(true);

        let ticks = s.run(&running, Some(3)).unwrap();

        assert_eq!(ticks, 3);
        assert!(!s.is_enabled());
        let out = String::from_utf8(s.into_surface().into_inner()).unwrap();
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0], PLACEHOLDER_TEXT);
        assert!(lines[1..].iter().all(|l| l.starts_with("U ")));
    }

    #[test]
    fn test_run_zero_limit_takes_no_ticks() {
        let mut s = scheduler(MockFs::typical_system(), Duration::ZERO);
        let running = AtomicBool::new(true);

        assert_eq!(s.run(&running, Some(0)).unwrap(), 0);
        let out = String::from_utf8(s.into_surface().into_inner()).unwrap();
        assert_eq!(out, format!("{}\n", PLACEHOLDER_TEXT));
    }

    #[test]
    fn test_run_not_running_takes_no_ticks() {
        let mut s = scheduler(MockFs::typical_system(), Duration::from_secs(1));
        let running = AtomicBool::new(false);

        assert_eq!(s.run(&running, None).unwrap(), 0);
    }

    #[test]
    fn test_tick_reports_display_failure() {
        let collector = Collector::new(MockFs::typical_system(), MonitorConfig::default());
        let mut s = SampleScheduler::new(collector, BrokenSurface);

        assert!(s.enable().is_err());
        assert!(s.tick().is_err());
        // The sample itself still happened.
        assert_eq!(s.ticks(), 1);
    }

    #[test]
    fn test_missing_proc_still_ticks() {
        let mut s = scheduler(MockFs::empty_proc(), Duration::from_secs(1));
        s.enable().unwrap();
        let metrics = s.tick().unwrap();

        assert_eq!(metrics.cpu, Reading::Unavailable);
        assert_eq!(metrics.memory, Reading::Unavailable);
        assert_eq!(metrics.net, Reading::Unavailable);
        assert_eq!(s.surface().text(), Some("U 0% M 0% ↓ 0 B/s ↑ 0 B/s"));
    }
}
