//! Mock filesystem for testing.
//!
//! `MockFs` plus pre-built `/proc` scenarios, so samplers can be exercised
//! without a Linux host.

mod filesystem;
mod scenarios;

pub use filesystem::MockFs;
