//! Measurement pipeline
//!
//! Owns the two bounded queues and the cadence token that connect the
//! capture handler, the conversion task and the display coordinator. One
//! instance is built at startup and every task borrows it; nothing else is
//! shared between execution contexts.
//!
//! ```text
//! capture ──▶ raw intervals ──▶ conversion ──▶ distances ──▶ display
//!                                                              ▲
//! trigger ─────────────────────── cadence token ───────────────┘
//! ```
//!
//! With a `CriticalSectionRawMutex` every method that does not await is safe
//! to call from interrupt priority.

use embassy_sync::blocking_mutex::raw::RawMutex;
use embassy_sync::channel::Channel;
use embassy_sync::signal::Signal;

use crate::capture::CaptureError;
use crate::conversion::{Distance, TimeInterval};
use crate::diagnostics::Diagnostics;

/// Queue depth used by the firmware for both queues
pub const DEFAULT_QUEUE_CAPACITY: usize = 100;

/// Queues, cadence token and counters shared by all measurement tasks
///
/// `N` is the capacity of each queue.
pub struct Pipeline<M: RawMutex, const N: usize> {
    raw: Channel<M, TimeInterval, N>,
    distances: Channel<M, Distance, N>,
    cadence: Signal<M, ()>,
    /// Event counters
    pub diagnostics: Diagnostics,
}

impl<M: RawMutex, const N: usize> Default for Pipeline<M, N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<M: RawMutex, const N: usize> Pipeline<M, N> {
    /// Create an empty pipeline with no cadence token pending
    pub const fn new() -> Self {
        Self {
            raw: Channel::new(),
            distances: Channel::new(),
            cadence: Signal::new(),
            diagnostics: Diagnostics::new(),
        }
    }

    // Raw interval queue

    /// Enqueue a captured interval without blocking
    ///
    /// Fails with [`CaptureError::SampleLost`] when the queue is full; the
    /// interval is dropped and no consumer is told about it.
    pub fn push_interval(&self, interval: TimeInterval) -> Result<(), CaptureError> {
        match self.raw.try_send(interval) {
            Ok(()) => {
                self.diagnostics.record_captured();
                Ok(())
            }
            Err(_) => {
                self.diagnostics.record_sample_lost();
                Err(CaptureError::SampleLost)
            }
        }
    }

    /// Wait for the next captured interval
    pub async fn receive_interval(&self) -> TimeInterval {
        self.raw.receive().await
    }

    /// Number of intervals waiting for conversion
    pub fn pending_intervals(&self) -> usize {
        self.raw.len()
    }

    // Distance queue

    /// Enqueue a distance, waiting for space if the queue is full
    pub async fn send_distance(&self, distance: Distance) {
        self.distances.send(distance).await;
    }

    /// Wait for the next converted distance
    pub async fn receive_distance(&self) -> Distance {
        self.distances.receive().await
    }

    /// Take the oldest queued distance, if any
    pub fn try_receive_distance(&self) -> Option<Distance> {
        self.distances.try_receive().ok()
    }

    /// Number of distances waiting for the display
    pub fn pending_distances(&self) -> usize {
        self.distances.len()
    }

    // Cadence token

    /// Release the cadence token
    ///
    /// Releasing while a token is already pending leaves exactly one token.
    pub fn release_cadence(&self) {
        self.cadence.signal(());
    }

    /// Wait for and consume the cadence token
    pub async fn acquire_cadence(&self) {
        self.cadence.wait().await;
    }

    /// Consume the cadence token if one is pending
    pub fn try_acquire_cadence(&self) -> bool {
        self.cadence.try_take().is_some()
    }

    /// Check whether a cadence token is pending
    pub fn cadence_pending(&self) -> bool {
        self.cadence.signaled()
    }
}
