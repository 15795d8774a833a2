//! Microsecond clock backed by the embassy time driver

use echoline_core::MonotonicClock;
use embassy_time::Instant;

/// Reads the RP2040 timer through `embassy_time::Instant`
///
/// The 64-bit tick count is truncated to 32 bits; capture arithmetic wraps.
#[derive(Clone, Copy, Default)]
pub struct TimerClock;

impl MonotonicClock for TimerClock {
    fn now_micros(&self) -> u32 {
        Instant::now().as_micros() as u32
    }
}
