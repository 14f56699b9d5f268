use delta_core::util::{cycle_period, cycle_rate_hz, period_us};
use std::time::Duration;

#[test]
fn period_us_clamps_and_floors() {
    assert_eq!(period_us(1), 1_000_000);
    assert_eq!(period_us(40), 25_000);
    // Very high rates floor to 1 µs
    assert_eq!(period_us(u32::MAX), 1);
    // 0 Hz is treated as 1 Hz
    assert_eq!(period_us(0), 1_000_000);
}

#[test]
fn cycle_period_is_never_zero() {
    assert_eq!(cycle_period(100), Duration::from_millis(100));
    assert_eq!(cycle_period(0), Duration::from_millis(1));
}

#[test]
fn cycle_rate_rounds_down_and_stays_positive() {
    assert_eq!(cycle_rate_hz(100), 10);
    assert_eq!(cycle_rate_hz(1), 1000);
    assert_eq!(cycle_rate_hz(0), 1000);
    assert_eq!(cycle_rate_hz(3), 333);
    // Slower than 1 Hz still samples once a second.
    assert_eq!(cycle_rate_hz(60_000), 1);
}
