//! Echo capture task
//!
//! Runs on the interrupt executor so edge timestamps are taken ahead of
//! anything running in thread mode.

use defmt::*;
use echoline_core::{CaptureError, EchoListener};
use embassy_rp::gpio::Input;

use super::SonarPipeline;
use crate::clock::TimerClock;

/// Capture task - timestamps echo edges and queues pulse widths
#[embassy_executor::task]
pub async fn capture_task(echo: Input<'static>, pipeline: &'static SonarPipeline) {
    info!("Capture task started");

    let mut listener = EchoListener::new(echo, TimerClock);

    loop {
        match listener.listen(pipeline).await {
            Ok(Ok(Some(interval))) => trace!("Echo pulse {} us", interval.as_micros()),
            Ok(Ok(None)) => {}
            Ok(Err(CaptureError::SampleLost)) => trace!("Raw queue full, sample dropped"),
            Ok(Err(CaptureError::MalformedInterval)) => {
                debug!("Falling edge without rising edge, ignored")
            }
            Err(e) => match e {},
        }
    }
}
