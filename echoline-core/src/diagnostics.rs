//! Pipeline event counters
//!
//! Lock-free counters updated from every execution context, including the
//! capture handler. Uses `portable-atomic` so `fetch_add` is available on
//! cores without native atomic read-modify-write (Cortex-M0+).

use portable_atomic::{AtomicU32, Ordering};

/// Counters for pipeline events
pub struct Diagnostics {
    captured: AtomicU32,
    samples_lost: AtomicU32,
    malformed: AtomicU32,
    converted: AtomicU32,
    renders: AtomicU32,
    fallbacks: AtomicU32,
    stale_skipped: AtomicU32,
}

/// Point-in-time copy of [`Diagnostics`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Snapshot {
    /// Intervals queued by the capture handler
    pub captured: u32,
    /// Intervals dropped because the raw queue was full
    pub samples_lost: u32,
    /// Falling edges without a matching rising edge
    pub malformed: u32,
    /// Intervals converted to distances
    pub converted: u32,
    /// Display refreshes, measurement or fallback
    pub renders: u32,
    /// Refreshes that showed the fallback screen
    pub fallbacks: u32,
    /// Older distances discarded in favour of a newer one
    pub stale_skipped: u32,
}

impl Default for Diagnostics {
    fn default() -> Self {
        Self::new()
    }
}

impl Diagnostics {
    /// Create zeroed counters
    pub const fn new() -> Self {
        Self {
            captured: AtomicU32::new(0),
            samples_lost: AtomicU32::new(0),
            malformed: AtomicU32::new(0),
            converted: AtomicU32::new(0),
            renders: AtomicU32::new(0),
            fallbacks: AtomicU32::new(0),
            stale_skipped: AtomicU32::new(0),
        }
    }

    pub(crate) fn record_captured(&self) {
        self.captured.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_sample_lost(&self) {
        self.samples_lost.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_malformed(&self) {
        self.malformed.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_converted(&self) {
        self.converted.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_render(&self, fallback: bool) {
        self.renders.fetch_add(1, Ordering::Relaxed);
        if fallback {
            self.fallbacks.fetch_add(1, Ordering::Relaxed);
        }
    }

    pub(crate) fn record_stale(&self, count: u32) {
        if count > 0 {
            self.stale_skipped.fetch_add(count, Ordering::Relaxed);
        }
    }

    /// Read all counters
    ///
    /// Counters are read one at a time, so a snapshot taken while the
    /// pipeline runs may mix values from neighbouring events.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            captured: self.captured.load(Ordering::Relaxed),
            samples_lost: self.samples_lost.load(Ordering::Relaxed),
            malformed: self.malformed.load(Ordering::Relaxed),
            converted: self.converted.load(Ordering::Relaxed),
            renders: self.renders.load(Ordering::Relaxed),
            fallbacks: self.fallbacks.load(Ordering::Relaxed),
            stale_skipped: self.stale_skipped.load(Ordering::Relaxed),
        }
    }
}
