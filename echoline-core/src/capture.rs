//! Echo edge capture
//!
//! Times the echo pulse from its rising to its falling edge. The capture
//! state is owned by the single context that observes edges; completed
//! intervals leave it only through [`Pipeline::push_interval`], which never
//! blocks.

use embassy_sync::blocking_mutex::raw::RawMutex;
use embedded_hal::digital::InputPin;
use embedded_hal_async::digital::Wait;

use crate::conversion::TimeInterval;
use crate::pipeline::Pipeline;
use crate::traits::MonotonicClock;

/// Echo signal transition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Edge {
    /// Low to high, echo pulse starts
    Rising,
    /// High to low, echo pulse ends
    Falling,
}

impl Edge {
    /// Classify an edge from the pin level sampled right after it
    pub fn from_level(is_high: bool) -> Self {
        if is_high {
            Edge::Rising
        } else {
            Edge::Falling
        }
    }
}

/// Capture failures
///
/// None of these reach the display: they are counted in
/// [`Diagnostics`](crate::diagnostics::Diagnostics) and the sample is dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CaptureError {
    /// Raw interval queue was full
    SampleLost,
    /// Falling edge with no rising edge recorded before it
    MalformedInterval,
}

/// Rising edge bookkeeping for one echo input
#[derive(Debug, Default)]
pub struct EdgeCapture {
    /// Timestamp of the last unmatched rising edge (µs)
    rise_us: Option<u32>,
}

impl EdgeCapture {
    /// Create a capture with no rising edge recorded
    pub const fn new() -> Self {
        Self { rise_us: None }
    }

    /// Whether a rising edge is waiting for its falling edge
    pub fn is_armed(&self) -> bool {
        self.rise_us.is_some()
    }

    /// Feed one edge observed at `now_us`
    ///
    /// A rising edge (re)arms the capture; a second rise replaces the first.
    /// A falling edge completes the interval, using wrapping arithmetic so
    /// pulses spanning a 32-bit timer rollover are timed correctly.
    pub fn on_edge(
        &mut self,
        edge: Edge,
        now_us: u32,
    ) -> Result<Option<TimeInterval>, CaptureError> {
        match edge {
            Edge::Rising => {
                self.rise_us = Some(now_us);
                Ok(None)
            }
            Edge::Falling => match self.rise_us.take() {
                Some(rise_us) => Ok(Some(TimeInterval::from_micros(now_us.wrapping_sub(rise_us)))),
                None => Err(CaptureError::MalformedInterval),
            },
        }
    }

    /// Feed one edge and push any completed interval onto the pipeline
    ///
    /// Returns the interval that was queued, if any.
    pub fn record<M: RawMutex, const N: usize>(
        &mut self,
        edge: Edge,
        now_us: u32,
        pipeline: &Pipeline<M, N>,
    ) -> Result<Option<TimeInterval>, CaptureError> {
        let interval = match self.on_edge(edge, now_us) {
            Ok(Some(interval)) => interval,
            Ok(None) => return Ok(None),
            Err(e) => {
                pipeline.diagnostics.record_malformed();
                return Err(e);
            }
        };

        pipeline.push_interval(interval)?;
        Ok(Some(interval))
    }
}

/// Echo input, timestamp source and capture state for one sensor
pub struct EchoListener<P, C> {
    pin: P,
    clock: C,
    capture: EdgeCapture,
}

impl<P, C> EchoListener<P, C>
where
    P: Wait + InputPin,
    C: MonotonicClock,
{
    /// Create a listener with no rising edge recorded
    pub fn new(pin: P, clock: C) -> Self {
        Self {
            pin,
            clock,
            capture: EdgeCapture::new(),
        }
    }

    /// Wait for one edge, timestamp it and feed it to the capture
    ///
    /// The timestamp is taken straight after the pin wakes us so the
    /// interval is not stretched by the work done on the previous edge.
    pub async fn listen<M: RawMutex, const N: usize>(
        &mut self,
        pipeline: &Pipeline<M, N>,
    ) -> Result<Result<Option<TimeInterval>, CaptureError>, P::Error> {
        self.pin.wait_for_any_edge().await?;
        let now_us = self.clock.now_micros();
        let edge = Edge::from_level(self.pin.is_high()?);
        Ok(self.capture.record(edge, now_us, pipeline))
    }
}
