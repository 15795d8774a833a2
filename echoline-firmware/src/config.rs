//! Measurement cycle configuration
//!
//! `SONAR_CONFIG` is generated by build.rs from sonar.toml after validation,
//! so an invalid timing never reaches the target.

use echoline_core::{SonarConfig, StalePolicy};

include!(concat!(env!("OUT_DIR"), "/sonar_config.rs"));
