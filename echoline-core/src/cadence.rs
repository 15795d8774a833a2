//! Trigger cadence
//!
//! Fires the sensor's trigger pulse, waits one cadence period, then hands
//! the display a cadence token. Both waits go through `DelayNs`, so on the
//! target the 10 µs pulse is timed by the hardware timer instead of a spin
//! loop holding the core.

use embassy_sync::blocking_mutex::raw::RawMutex;
use embedded_hal::digital::OutputPin;
use embedded_hal_async::delay::DelayNs;

use crate::config::SonarConfig;
use crate::pipeline::Pipeline;

/// Trigger output plus the delay used to time it
pub struct TriggerCadence<P, D> {
    pin: P,
    delay: D,
    pulse_us: u32,
    period_ms: u32,
}

impl<P, D> TriggerCadence<P, D>
where
    P: OutputPin,
    D: DelayNs,
{
    /// Create a cadence driver using the pulse width and period from `config`
    pub fn new(pin: P, delay: D, config: &SonarConfig) -> Self {
        Self {
            pin,
            delay,
            pulse_us: config.trigger_pulse_us,
            period_ms: config.cadence_period_ms,
        }
    }

    /// Drive the trigger high for the configured pulse width
    pub async fn pulse(&mut self) -> Result<(), P::Error> {
        self.pin.set_high()?;
        self.delay.delay_us(self.pulse_us).await;
        self.pin.set_low()
    }

    /// Run one cycle: pulse, wait one period, release the cadence token
    ///
    /// The token is released even when the pin reports an error, so the
    /// display keeps refreshing (it will show the fallback screen).
    pub async fn run_cycle<M: RawMutex, const N: usize>(
        &mut self,
        pipeline: &Pipeline<M, N>,
    ) -> Result<(), P::Error> {
        let pulsed = self.pulse().await;
        self.delay.delay_ms(self.period_ms).await;
        pipeline.release_cadence();
        pulsed
    }
}
