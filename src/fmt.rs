//! Formatting helpers for the display line.
//!
//! All functions here are pure. The display line is compared byte-for-byte by
//! consumers of the text surface, so rounding follows fixed decimal rules
//! rather than whatever `{:.N}` happens to do on a tie.

use crate::models::{Metrics, NetSpeed};

/// Rate units, one step per factor of 1000.
pub const RATE_UNITS: [&str; 9] = ["B/s", "K/s", "M/s", "G/s", "T/s", "P/s", "E/s", "Z/s", "Y/s"];

/// Formats `value` with `digits` fraction digits, rounding exact ties away
/// from zero.
///
/// `format!("{:.N}")` rounds the exact stored value and sends exact ties to
/// even (`100.5` -> `"100"`); the display line expects `"101"`. Only a true
/// tie is bumped: `1.045` is stored as `1.04499..` and stays `"1.04"`.
pub fn to_fixed(value: f64, digits: usize) -> String {
    if value < 0.0 {
        return format!("-{}", to_fixed(-value, digits));
    }
    let scale = 10f64.powi(digits as i32);
    let scaled = value * scale;
    // Rounding error of the product, computed exactly with a fused multiply-add.
    let product_is_exact = value.mul_add(scale, -scaled) == 0.0;
    if product_is_exact && scaled - scaled.floor() == 0.5 {
        return format!("{:.*}", digits, scaled.ceil() / scale);
    }
    format!("{:.*}", digits, value)
}

/// Rounds to the nearest integer, ties toward positive infinity.
pub fn round_half_up(value: f64) -> i64 {
    let floor = value.floor();
    if value - floor >= 0.5 {
        floor as i64 + 1
    } else {
        floor as i64
    }
}

/// Format bytes-per-second rate with a decimal unit.
///
/// `999` -> `"999 B/s"`, `5000` -> `"5.00 K/s"`, `12345` -> `"12.3 K/s"`,
/// `123456789` -> `"123 M/s"`. Anything below `0.01` after scaling prints as `"0"`.
pub fn scale_rate(amount: f64) -> String {
    let mut amount = amount;
    let mut unit = 0;
    while amount >= 1000.0 && unit < RATE_UNITS.len() - 1 {
        amount /= 1000.0;
        unit += 1;
    }

    let digits = if amount >= 100.0 || amount < 0.01 {
        0
    } else if amount >= 10.0 {
        1
    } else {
        2
    };

    format!("{} {}", to_fixed(amount, digits), RATE_UNITS[unit])
}

/// Fraction in `[0, 1]` as a whole percentage.
pub fn format_percent(fraction: f64) -> i64 {
    round_half_up(fraction * 100.0)
}

/// Builds the display line: `U <cpu>% M <mem>% ↓ <down> ↑ <up>`.
pub fn compose_display(cpu: f64, memory: f64, net: NetSpeed) -> String {
    format!(
        "U {}% M {}% ↓ {} ↑ {}",
        format_percent(cpu),
        format_percent(memory),
        scale_rate(net.down),
        scale_rate(net.up)
    )
}

/// Display line for one tick; unavailable readings show as zero.
pub fn format_metrics(metrics: &Metrics) -> String {
    compose_display(
        metrics.cpu.or_zero(),
        metrics.memory.or_zero(),
        metrics.net.or_zero(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Reading;

    #[test]
    fn test_scale_rate_reference_values() {
        assert_eq!(scale_rate(5000.0), "5.00 K/s");
        assert_eq!(scale_rate(999.0), "999 B/s");
        assert_eq!(scale_rate(123456789.0), "123 M/s");
        assert_eq!(scale_rate(0.0005), "0 B/s");
    }

    #[test]
    fn test_scale_rate_precision_bands() {
        assert_eq!(scale_rate(0.0), "0 B/s");
        assert_eq!(scale_rate(1.5), "1.50 B/s");
        assert_eq!(scale_rate(12345.0), "12.3 K/s");
        assert_eq!(scale_rate(100.0), "100 B/s");
        assert_eq!(scale_rate(1000.0), "1.00 K/s");
        assert_eq!(scale_rate(99_990.0), "100.0 K/s");
    }

    #[test]
    fn test_scale_rate_ties_round_up() {
        assert_eq!(scale_rate(100_500.0), "101 K/s");
        assert_eq!(scale_rate(2.125), "2.13 B/s");
        assert_eq!(scale_rate(12.25), "12.3 B/s");
    }

    #[test]
    fn test_scale_rate_near_ties_keep_stored_value() {
        // Scaled amounts like 1.045 are just below the tie once stored as f64.
        let cases = [
            (1045.0, "1.04 K/s"),
            (1055.0, "1.05 K/s"),
            (1115.0, "1.11 K/s"),
            (1285.0, "1.28 K/s"),
            (1125.0, "1.13 K/s"),
            (1005.0, "1.00 K/s"),
        ];
        for (rate, expected) in cases {
            assert_eq!(scale_rate(rate), expected, "rate {}", rate);
        }
    }

    #[test]
    fn test_scale_rate_top_unit() {
        assert_eq!(scale_rate(2.5e25), "25.0 Y/s");
        assert_eq!(scale_rate(5e27), "5000 Y/s");
    }

    #[test]
    fn test_to_fixed() {
        assert_eq!(to_fixed(0.5, 0), "1");
        assert_eq!(to_fixed(2.5, 0), "3");
        assert_eq!(to_fixed(1.234, 2), "1.23");
        assert_eq!(to_fixed(0.0049, 0), "0");
    }

    #[test]
    fn test_round_half_up() {
        assert_eq!(round_half_up(42.5), 43);
        assert_eq!(round_half_up(42.49), 42);
        assert_eq!(round_half_up(0.0), 0);
        assert_eq!(round_half_up(-0.2), 0);
    }

    #[test]
    fn test_compose_display() {
        let line = compose_display(
            0.123,
            0.5,
            NetSpeed {
                down: 5000.0,
                up: 999.0,
            },
        );
        assert_eq!(line, "U 12% M 50% ↓ 5.00 K/s ↑ 999 B/s");
    }

    #[test]
    fn test_compose_display_full_scale() {
        let line = compose_display(1.0, 0.0, NetSpeed::default());
        assert_eq!(line, "U 100% M 0% ↓ 0 B/s ↑ 0 B/s");
    }

    #[test]
    fn test_format_metrics_unavailable_is_zero() {
        let metrics = Metrics {
            timestamp: 0,
            cpu: Reading::Unavailable,
            memory: Reading::Measured(0.267),
            net: Reading::Unavailable,
        };
        assert_eq!(format_metrics(&metrics), "U 0% M 27% ↓ 0 B/s ↑ 0 B/s");
    }
}
