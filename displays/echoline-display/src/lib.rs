//! Display abstraction and range screen rendering for Echoline
//!
//! This crate provides:
//! - `DisplaySurface` trait for pixel displays (text at a coordinate, lines)
//! - `Screen`, a description of one frame of the range display
//! - `Renderer`, which turns a `RenderRequest` into a `Screen` and draws it
//! - `Ssd1306`, an async I2C driver for 128x32 SSD1306 OLED modules
//!
//! # Architecture
//!
//! The display task owns the driver. Each cadence period the coordinator
//! yields a `RenderRequest`; the renderer clears the backbuffer, draws the
//! screen through `DisplaySurface`, and the task flushes the driver.

#![cfg_attr(not(test), no_std)]

pub mod backend;
pub mod renderer;
pub mod screen;
pub mod ssd1306;

// Re-export key types
pub use backend::{DisplayError, DisplaySurface};
pub use renderer::Renderer;
pub use screen::{Bar, Screen, TextItem};
pub use ssd1306::Ssd1306;
