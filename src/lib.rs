//! statline - one-line system monitor library.
//!
//! Samples network throughput, CPU utilization and memory usage from `/proc`
//! and renders them as a single status line:
//!
//! ```text
//! U 14% M 27% ↓ 5.00 K/s ↑ 999 B/s
//! ```
//!
//! - `collector`: counter readers, parsers and the three samplers
//! - `rates`: delta/rate arithmetic for cumulative counters
//! - `fmt`: rate scaling and display line composition
//! - `display`: output surfaces (text lines, JSON lines)
//! - `scheduler`: fixed-cadence sampling loop and enable/disable lifecycle

pub mod collector;
pub mod config;
pub mod display;
pub mod fmt;
pub mod models;
pub mod rates;
pub mod scheduler;
