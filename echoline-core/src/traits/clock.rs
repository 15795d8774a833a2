//! Monotonic time source

/// Free-running microsecond counter
///
/// The counter wraps at `u32::MAX`; consumers must compare timestamps with
/// wrapping arithmetic. Reading it must be safe from interrupt priority.
pub trait MonotonicClock {
    /// Current time in microseconds
    fn now_micros(&self) -> u32;
}

impl<T: MonotonicClock + ?Sized> MonotonicClock for &T {
    fn now_micros(&self) -> u32 {
        (**self).now_micros()
    }
}
