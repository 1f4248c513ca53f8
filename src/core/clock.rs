//! Monotonic high-resolution clock and rounding helpers

use std::sync::OnceLock;
use std::time::Instant;

static PROCESS_EPOCH: OnceLock<Instant> = OnceLock::new();

/// Milliseconds elapsed since the first clock read in this process.
///
/// Only meaningful for relative timing inside one process.
#[inline]
pub fn hrt_now() -> f64 {
    let epoch = PROCESS_EPOCH.get_or_init(Instant::now);
    epoch.elapsed().as_secs_f64() * 1000.0
}

/// Round `value` to `digits` significant digits.
///
/// Zero and non-finite values are returned unchanged.
pub fn round_to_significant(value: f64, digits: u32) -> f64 {
    if value == 0.0 || !value.is_finite() || digits == 0 {
        return value;
    }
    let magnitude = value.abs().log10().floor() as i32;
    let power = digits as i32 - 1 - magnitude;
    if power >= 0 {
        let factor = 10f64.powi(power);
        (value * factor).round() / factor
    } else {
        let divisor = 10f64.powi(-power);
        (value / divisor).round() * divisor
    }
}
