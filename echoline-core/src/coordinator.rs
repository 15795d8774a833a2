//! Display coordinator
//!
//! Two-phase loop that decides what the display shows each cadence period:
//!
//! ```text
//! AwaitCadence ──token──▶ AwaitDistance ──distance──▶ Measurement ─┐
//!      ▲                        │                                  │
//!      │                        └──timeout──▶ Unavailable ─────────┤
//!      └───────────────────────────────────────────────────────────┘
//! ```
//!
//! Every acquired token yields exactly one [`RenderRequest`], so the refresh
//! rate follows the cadence while a missing echo costs at most one timeout.

use embassy_futures::select::{select, Either};
use embassy_sync::blocking_mutex::raw::RawMutex;
use embedded_hal_async::delay::DelayNs;

use crate::config::{SonarConfig, StalePolicy};
use crate::conversion::Distance;
use crate::pipeline::Pipeline;

/// Coordinator phase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Phase {
    /// Blocked on the cadence token
    AwaitCadence,
    /// Token taken, waiting (bounded) for a distance
    AwaitDistance,
}

/// What the display should show for one cadence period
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RenderRequest {
    /// A distance arrived in time
    Measurement(Distance),
    /// No distance within the timeout
    Unavailable,
}

impl RenderRequest {
    /// Whether this is the fallback screen
    pub fn is_fallback(&self) -> bool {
        matches!(self, RenderRequest::Unavailable)
    }

    /// Distance to show, if any
    pub fn distance(&self) -> Option<Distance> {
        match self {
            RenderRequest::Measurement(d) => Some(*d),
            RenderRequest::Unavailable => None,
        }
    }
}

/// Display side of the measurement cycle
#[derive(Debug)]
pub struct DisplayCoordinator {
    phase: Phase,
    timeout_ms: u32,
    stale_policy: StalePolicy,
}

impl DisplayCoordinator {
    /// Create a coordinator waiting for its first cadence token
    pub fn new(config: &SonarConfig) -> Self {
        Self {
            phase: Phase::AwaitCadence,
            timeout_ms: config.display_timeout_ms,
            stale_policy: config.stale_policy,
        }
    }

    /// Current phase
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Run one cycle and return what to render
    ///
    /// Blocks without limit on the cadence token, then waits at most the
    /// configured timeout for a distance.
    pub async fn next_render<M, D, const N: usize>(
        &mut self,
        pipeline: &Pipeline<M, N>,
        delay: &mut D,
    ) -> RenderRequest
    where
        M: RawMutex,
        D: DelayNs,
    {
        self.phase = Phase::AwaitCadence;
        pipeline.acquire_cadence().await;

        self.phase = Phase::AwaitDistance;
        let request = match self.take_queued(pipeline) {
            Some(distance) => RenderRequest::Measurement(distance),
            None => self.receive_within_timeout(pipeline, delay).await,
        };

        pipeline.diagnostics.record_render(request.is_fallback());
        self.phase = Phase::AwaitCadence;
        request
    }

    /// Distances already queued when the token arrived
    ///
    /// With [`StalePolicy::Latest`] the queue is drained and only the newest
    /// entry is kept. With [`StalePolicy::Fifo`] nothing is taken here and
    /// the timed receive picks up the oldest entry.
    fn take_queued<M: RawMutex, const N: usize>(
        &self,
        pipeline: &Pipeline<M, N>,
    ) -> Option<Distance> {
        if self.stale_policy == StalePolicy::Fifo {
            return None;
        }

        let mut newest = None;
        let mut skipped = 0;
        while let Some(distance) = pipeline.try_receive_distance() {
            if newest.replace(distance).is_some() {
                skipped += 1;
            }
        }
        pipeline.diagnostics.record_stale(skipped);
        newest
    }

    async fn receive_within_timeout<M, D, const N: usize>(
        &self,
        pipeline: &Pipeline<M, N>,
        delay: &mut D,
    ) -> RenderRequest
    where
        M: RawMutex,
        D: DelayNs,
    {
        match select(pipeline.receive_distance(), delay.delay_ms(self.timeout_ms)).await {
            Either::First(distance) => RenderRequest::Measurement(distance),
            Either::Second(()) => RenderRequest::Unavailable,
        }
    }
}
