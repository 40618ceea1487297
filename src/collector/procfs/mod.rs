//! Samplers for Linux `/proc` counter files.
//!
//! This module provides parsers and samplers for the three sources the
//! display line is built from.

pub mod cpu;
pub mod memory;
pub mod network;
pub mod parser;

pub use cpu::CpuSampler;
pub use memory::MemorySampler;
pub use network::{NetBaseline, NetworkSampler};
pub use parser::ParseError;
