//! Cycle and sampling-rate arithmetic.

use std::time::Duration;

const MICROS_PER_SEC: u64 = 1_000_000;
const MILLIS_PER_SEC: u64 = 1_000;

/// Sampling period in microseconds for a rate in Hz, at least 1 µs.
/// A rate of 0 is treated as 1 Hz.
#[inline]
pub fn period_us(hz: u32) -> u64 {
    (MICROS_PER_SEC / u64::from(hz.max(1))).max(1)
}

/// Control-cycle period, never zero.
#[inline]
pub fn cycle_period(cycle_ms: u64) -> Duration {
    Duration::from_millis(cycle_ms.max(1))
}

/// Whole cycles per second for a control period, at least 1.
///
/// Used to pace a sampler at the control rate when the sensor does not
/// block on its own frame timing.
#[inline]
pub fn cycle_rate_hz(cycle_ms: u64) -> u32 {
    let hz = MILLIS_PER_SEC / cycle_ms.max(1);
    u32::try_from(hz).unwrap_or(u32::MAX).max(1)
}
