//! statline - one-line system monitor.
//!
//! Prints CPU, memory and network throughput as a single line per interval.
//!
//! Usage:
//!   statline               # text line every second
//!   statline 5             # every 5 seconds
//!   statline --format json # one JSON object per tick
//!   statline -n 10         # stop after 10 ticks

use std::io;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use clap::{Parser, ValueEnum};
use tracing::{Level, error, info, warn};
use tracing_subscriber::EnvFilter;

#[cfg(target_os = "linux")]
use statline::collector::RealFs;
#[cfg(not(target_os = "linux"))]
use statline::collector::mock::MockFs;
use statline::collector::{Collector, FileSystem};
use statline::config::{DEFAULT_INTERVAL_SECS, DEFAULT_PROC_PATH, MonitorConfig};
use statline::display::{DisplaySurface, JsonSurface, TextSurface};
use statline::scheduler::SampleScheduler;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    /// `U 12% M 50% ↓ 5.00 K/s ↑ 999 B/s`
    Text,
    /// One JSON object per tick.
    Json,
}

/// One-line system monitor.
#[derive(Parser)]
#[command(name = "statline", about = "One-line CPU, memory and network monitor", version)]
struct Args {
    /// Update interval in seconds.
    /// Also the time base for network rates.
    #[arg(value_name = "INTERVAL", default_value_t = DEFAULT_INTERVAL_SECS,
          value_parser = clap::value_parser!(u64).range(1..))]
    interval: u64,

    /// Path to /proc filesystem (for testing/mocking).
    #[arg(long, default_value = DEFAULT_PROC_PATH)]
    proc_path: String,

    /// Output format.
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Stop after this many ticks.
    #[arg(short = 'n', long, value_name = "TICKS")]
    count: Option<u64>,

    /// Increase logging verbosity (-v for debug, -vv for trace). Default is info level.
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Quiet mode - only show errors.
    #[arg(short, long)]
    quiet: bool,
}

/// Initializes the tracing subscriber with the appropriate log level.
/// Logs go to stderr; stdout carries only display output.
fn init_logging(verbose: u8, quiet: bool) {
    let level = if quiet {
        Level::ERROR
    } else {
        match verbose {
            0 => Level::INFO,
            1 => Level::DEBUG,
            _ => Level::TRACE,
        }
    };

    let filter = EnvFilter::from_default_env()
        .add_directive(format!("statline={}", level).parse().unwrap());

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .init();
}

fn run<F: FileSystem, D: DisplaySurface>(
    collector: Collector<F>,
    surface: D,
    running: &AtomicBool,
    count: Option<u64>,
) {
    let mut scheduler = SampleScheduler::new(collector, surface);
    match scheduler.run(running, count) {
        Ok(ticks) => info!("Shutdown complete ({} ticks)", ticks),
        Err(e) => error!("Display failed: {}", e),
    }
}

fn start<F: FileSystem>(fs: F, args: &Args, running: &AtomicBool) {
    let config = MonitorConfig::new()
        .with_proc_path(&args.proc_path)
        .with_interval(Duration::from_secs(args.interval));
    let collector = Collector::new(fs, config);

    match args.format {
        OutputFormat::Text => run(collector, TextSurface::new(io::stdout()), running, args.count),
        OutputFormat::Json => run(collector, JsonSurface::new(io::stdout()), running, args.count),
    }
}

fn main() {
    let args = Args::parse();

    init_logging(args.verbose, args.quiet);

    info!("statline {} starting", env!("CARGO_PKG_VERSION"));

    // Setup graceful shutdown
    let running = Arc::new(AtomicBool::new(true));
    let r = running.clone();

    if let Err(e) = ctrlc::set_handler(move || {
        info!("Received shutdown signal");
        r.store(false, Ordering::SeqCst);
    }) {
        warn!("Failed to set Ctrl-C handler: {}", e);
    }

    #[cfg(target_os = "linux")]
    start(RealFs::new(), &args, &running);
    #[cfg(not(target_os = "linux"))]
    {
        warn!("not running on Linux, showing mock counters");
        start(MockFs::typical_system(), &args, &running);
    }
}
