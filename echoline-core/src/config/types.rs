//! Measurement cycle configuration

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Shortest accepted trigger pulse (µs)
pub const MIN_TRIGGER_PULSE_US: u32 = 1;

/// Longest accepted trigger pulse (µs)
pub const MAX_TRIGGER_PULSE_US: u32 = 100;

/// What the display does with distances that queued up between refreshes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum StalePolicy {
    /// Drain the queue and show the newest distance
    #[default]
    Latest,
    /// Show the oldest queued distance, one per refresh
    Fifo,
}

/// Timing of the trigger / display cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default, deny_unknown_fields))]
pub struct SonarConfig {
    /// Width of the trigger pulse (µs)
    pub trigger_pulse_us: u32,
    /// Time between trigger pulses and display refreshes (ms)
    pub cadence_period_ms: u32,
    /// How long the display waits for a distance after each cadence release (ms)
    pub display_timeout_ms: u32,
    /// Handling of distances left over from earlier cycles
    pub stale_policy: StalePolicy,
}

/// Configuration validation errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Trigger pulse outside 1..=100 µs
    TriggerPulseOutOfRange,
    /// Cadence period of zero
    ZeroCadencePeriod,
    /// Display timeout of zero
    ZeroDisplayTimeout,
    /// Display timeout longer than the cadence period
    TimeoutExceedsPeriod,
}

impl SonarConfig {
    /// Stock HC-SR04 timing: 10 µs trigger, one cycle per second
    pub const DEFAULT: Self = Self {
        trigger_pulse_us: 10,
        cadence_period_ms: 1000,
        display_timeout_ms: 1000,
        stale_policy: StalePolicy::Latest,
    };

    /// Check the timing for consistency
    ///
    /// The display timeout must fit inside one cadence period, otherwise a
    /// refresh could still be waiting when the next token is released.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(MIN_TRIGGER_PULSE_US..=MAX_TRIGGER_PULSE_US).contains(&self.trigger_pulse_us) {
            return Err(ConfigError::TriggerPulseOutOfRange);
        }
        if self.cadence_period_ms == 0 {
            return Err(ConfigError::ZeroCadencePeriod);
        }
        if self.display_timeout_ms == 0 {
            return Err(ConfigError::ZeroDisplayTimeout);
        }
        if self.display_timeout_ms > self.cadence_period_ms {
            return Err(ConfigError::TimeoutExceedsPeriod);
        }
        Ok(())
    }
}

impl Default for SonarConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}


#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;

    #[test]
    fn test_parse_partial_table_uses_defaults() {
        let config: SonarConfig = toml::from_str("cadence_period_ms = 500\n").unwrap();
        assert_eq!(config.cadence_period_ms, 500);
        assert_eq!(config.trigger_pulse_us, 10);
        assert_eq!(config.stale_policy, StalePolicy::Latest);
    }

    #[test]
    fn test_parse_stale_policy() {
        let config: SonarConfig = toml::from_str("stale_policy = \"fifo\"\n").unwrap();
        assert_eq!(config.stale_policy, StalePolicy::Fifo);
    }

    #[test]
    fn test_misspelled_key_rejected() {
        let parsed = toml::from_str::<SonarConfig>("cadence_perod_ms = 500\n");
        assert!(parsed.is_err());
    }
}
