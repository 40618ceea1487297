//! Counter collection for Linux.
//!
//! This module reads `/proc` counter files and turns them into per-tick
//! readings, with support for mocking for testing on macOS.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                         Collector                           │
//! │  ┌────────────────┐ ┌────────────────┐ ┌────────────────┐   │
//! │  │ NetworkSampler │ │   CpuSampler   │ │ MemorySampler  │   │
//! │  │ /proc/net/dev  │ │   /proc/stat   │ │ /proc/meminfo  │   │
//! │  └───────┬────────┘ └───────┬────────┘ └───────┬────────┘   │
//! │          └──────────────────┼──────────────────┘            │
//! │                      ┌──────▼───────┐                       │
//! │                      │ CounterLines │                       │
//! │                      └──────┬───────┘                       │
//! │                      ┌──────▼──────┐                        │
//! │                      │  FileSystem │ (trait)                │
//! │                      └──────┬──────┘                        │
//! └─────────────────────────────┼───────────────────────────────┘
//!                               │
//!                ┌──────────────┼───────────────┐
//!                │              │               │
//!         ┌──────▼──────┐ ┌─────▼───────┐ ┌─────▼───────┐
//!         │   RealFs    │ │   MockFs    │ │  Scenarios  │
//!         │ (Linux)     │ │ (Testing)   │ │ (Fixtures)  │
//!         └─────────────┘ └─────────────┘ └─────────────┘
//! ```
//!
//! # Usage
//!
//! ## Production (Linux)
//!
//! ```ignore
//! use statline::collector::{Collector, RealFs};
//! use statline::config::MonitorConfig;
//!
//! let mut collector = Collector::new(RealFs::new(), MonitorConfig::default());
//! let metrics = collector.collect();
//! ```
//!
//! ## Testing (with MockFs)
//!
//! ```
//! use statline::collector::{Collector, MockFs};
//! use statline::config::MonitorConfig;
//!
//! let mut collector = Collector::new(MockFs::typical_system(), MonitorConfig::default());
//! let metrics = collector.collect();
//! assert!(metrics.memory.is_available());
//! ```

#[allow(clippy::module_inception)]
mod collector;
pub mod mock;
pub mod procfs;
pub mod reader;
pub mod traits;

pub use collector::Collector;
pub use mock::MockFs;
pub use reader::{CollectError, CounterLines};
pub use traits::{FileSystem, RealFs};
