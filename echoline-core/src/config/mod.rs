//! Configuration types
//!
//! The firmware parses `sonar.toml` into [`SonarConfig`] at build time and
//! embeds the validated result as a constant.

pub mod types;

pub use types::{ConfigError, SonarConfig, StalePolicy};
