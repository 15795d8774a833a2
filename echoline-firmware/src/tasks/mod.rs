//! Embassy async tasks
//!
//! Each task runs independently and communicates only via the shared
//! [`Pipeline`].

use echoline_core::{Pipeline, DEFAULT_QUEUE_CAPACITY};
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;

pub mod capture;
pub mod conversion;
pub mod display;
pub mod trigger;

pub use capture::capture_task;
pub use conversion::conversion_task;
pub use display::{display_task, Oled};
pub use trigger::trigger_task;

/// Pipeline shared between the interrupt executor and thread-mode tasks
pub type SonarPipeline = Pipeline<CriticalSectionRawMutex, DEFAULT_QUEUE_CAPACITY>;
