//! Echoline - Ultrasonic Range Display Firmware
//!
//! Main firmware binary for an RP2040 with an HC-SR04 sensor and an SSD1306
//! 128x32 OLED. The echo capture runs on a high priority interrupt
//! executor; trigger, conversion and display tasks share the thread-mode
//! executor.

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::{InterruptExecutor, Spawner};
use embassy_rp::bind_interrupts;
use embassy_rp::gpio::{Input, Level, Output, Pull};
use embassy_rp::i2c::{self, I2c};
use embassy_rp::interrupt;
use embassy_rp::interrupt::{InterruptExt, Priority};
use embassy_rp::peripherals::I2C1;
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

use echoline_core::Pipeline;
use echoline_display::Ssd1306;

use crate::config::SONAR_CONFIG;
use crate::tasks::SonarPipeline;

mod clock;
mod config;
mod tasks;

bind_interrupts!(struct Irqs {
    I2C1_IRQ => i2c::InterruptHandler<I2C1>;
});

/// I2C bus speed for the OLED
const I2C_FREQUENCY_HZ: u32 = 400_000;

/// Interval between diagnostics summaries
const DIAGNOSTICS_INTERVAL_SECS: u64 = 60;

/// Executor for the capture task
static EXECUTOR_HIGH: InterruptExecutor = InterruptExecutor::new();

// Queues and cadence token (must live forever for task references)
static PIPELINE: StaticCell<SonarPipeline> = StaticCell::new();

#[interrupt]
unsafe fn SWI_IRQ_1() {
    EXECUTOR_HIGH.on_interrupt()
}

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Echoline firmware starting...");

    // Initialize RP2040 peripherals
    let p = embassy_rp::init(Default::default());
    info!("Peripherals initialized");
    info!("Sonar config: {}", SONAR_CONFIG);

    let pipeline: &'static SonarPipeline = PIPELINE.init(Pipeline::new());

    // HC-SR04: TRIG on GPIO13, ECHO on GPIO12
    let trigger = Output::new(p.PIN_13, Level::Low);
    let echo = Input::new(p.PIN_12, Pull::None);

    // SSD1306 on I2C1: SDA GPIO2, SCL GPIO3
    let mut i2c_config = i2c::Config::default();
    i2c_config.frequency = I2C_FREQUENCY_HZ;
    let i2c = I2c::new_async(p.I2C1, p.PIN_3, p.PIN_2, Irqs, i2c_config);
    let oled = Ssd1306::new(i2c);

    info!("Sensor and OLED pins initialized");

    // Capture preempts everything in thread mode
    interrupt::SWI_IRQ_1.set_priority(Priority::P2);
    let high_spawner = EXECUTOR_HIGH.start(interrupt::SWI_IRQ_1);
    high_spawner
        .spawn(tasks::capture_task(echo, pipeline))
        .unwrap();

    // Spawn tasks
    spawner
        .spawn(tasks::trigger_task(trigger, pipeline, SONAR_CONFIG))
        .unwrap();
    spawner.spawn(tasks::conversion_task(pipeline)).unwrap();
    spawner
        .spawn(tasks::display_task(oled, pipeline, SONAR_CONFIG))
        .unwrap();

    info!("All tasks spawned, firmware running");

    // Main task only reports diagnostics
    loop {
        embassy_time::Timer::after_secs(DIAGNOSTICS_INTERVAL_SECS).await;
        let snapshot = pipeline.diagnostics.snapshot();
        info!("Diagnostics: {}", snapshot);
        if snapshot.samples_lost > 0 {
            warn!("{} samples lost to a full raw queue", snapshot.samples_lost);
        }
    }
}
