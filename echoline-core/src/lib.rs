//! Board-agnostic core logic for the Echoline range display
//!
//! This crate contains the measurement pipeline without any dependency on a
//! specific chip:
//!
//! - Edge capture (echo pulse timing, malformed edge rejection)
//! - Interval to distance conversion
//! - Trigger cadence cycle
//! - Display coordinator state machine (timed receive with fallback)
//! - The owned [`Pipeline`] of queues and cadence token shared by all tasks
//! - Diagnostics counters and configuration types
//!
//! Pins and delays are consumed through the `embedded-hal` traits so the same
//! logic runs on the RP2040 and in host tests.

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod cadence;
pub mod capture;
pub mod config;
pub mod conversion;
pub mod coordinator;
pub mod diagnostics;
pub mod pipeline;
pub mod traits;

pub use cadence::TriggerCadence;
pub use capture::{CaptureError, EchoListener, Edge, EdgeCapture};
pub use config::{ConfigError, SonarConfig, StalePolicy};
pub use conversion::{convert_next, Distance, TimeInterval};
pub use coordinator::{DisplayCoordinator, Phase, RenderRequest};
pub use diagnostics::{Diagnostics, Snapshot};
pub use pipeline::{Pipeline, DEFAULT_QUEUE_CAPACITY};
pub use traits::MonotonicClock;
