//! Trigger cadence task

use defmt::*;
use echoline_core::{SonarConfig, TriggerCadence};
use embassy_rp::gpio::Output;
use embassy_time::Delay;

use super::SonarPipeline;

/// Trigger task - pulses the sensor and releases one cadence token per period
#[embassy_executor::task]
pub async fn trigger_task(
    trigger: Output<'static>,
    pipeline: &'static SonarPipeline,
    config: SonarConfig,
) {
    info!(
        "Trigger task started ({} us pulse every {} ms)",
        config.trigger_pulse_us, config.cadence_period_ms
    );

    let mut cadence = TriggerCadence::new(trigger, Delay, &config);

    loop {
        match cadence.run_cycle(pipeline).await {
            Ok(()) => {}
            Err(e) => match e {},
        }
    }
}
