//! Data models shared between the samplers, the formatter and the surfaces.

use serde::Serialize;

/// Outcome of one sampler for one tick.
///
/// A sampler whose counter file could not be read reports `Unavailable`
/// instead of an error; consumers render it as zero.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Reading<T> {
    Measured(T),
    Unavailable,
}

impl<T> Reading<T> {
    pub fn is_available(&self) -> bool {
        matches!(self, Reading::Measured(_))
    }

    pub fn measured(self) -> Option<T> {
        match self {
            Reading::Measured(value) => Some(value),
            Reading::Unavailable => None,
        }
    }
}

impl<T: Default> Reading<T> {
    /// The measured value, or `T::default()` (zero) when unavailable.
    pub fn or_zero(self) -> T {
        self.measured().unwrap_or_default()
    }
}

/// Network throughput in bytes per second.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct NetSpeed {
    pub down: f64,
    pub up: f64,
}

/// Result of one sampling tick.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Metrics {
    /// Unix timestamp (seconds) when the tick was taken.
    pub timestamp: i64,
    /// CPU busy fraction in `[0, 1]`.
    pub cpu: Reading<f64>,
    /// Memory used fraction in `[0, 1]`.
    pub memory: Reading<f64>,
    pub net: Reading<NetSpeed>,
}
