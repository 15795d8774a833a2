//! Display coordinator task
//!
//! Waits for each cadence token, then shows either the latest distance or
//! the fallback screen on the SSD1306.

use defmt::*;
use echoline_core::{DisplayCoordinator, RenderRequest, SonarConfig};
use echoline_display::{DisplayError, Renderer, Ssd1306};
use embassy_rp::i2c::{Async, I2c};
use embassy_rp::peripherals::I2C1;
use embassy_time::Delay;

use super::SonarPipeline;

/// OLED on the I2C1 bus
pub type Oled = Ssd1306<I2c<'static, I2C1, Async>>;

/// Display task - one screen refresh per cadence period
#[embassy_executor::task]
pub async fn display_task(mut oled: Oled, pipeline: &'static SonarPipeline, config: SonarConfig) {
    info!("Display task started");

    let mut renderer = Renderer::new();
    renderer.render_boot();
    show(&mut oled, &renderer).await;

    let mut coordinator = DisplayCoordinator::new(&config);
    let mut delay = Delay;

    loop {
        let request = coordinator.next_render(pipeline, &mut delay).await;
        match request {
            RenderRequest::Measurement(distance) => info!("{} cm", distance.as_cm()),
            RenderRequest::Unavailable => {
                warn!("No echo within {} ms", config.display_timeout_ms)
            }
        }

        renderer.render(&request);
        show(&mut oled, &renderer).await;
    }
}

/// Draw the renderer's screen and push it to the panel
///
/// Display errors are logged and skipped; the measurement cycle keeps
/// running and the next refresh tries again.
async fn show(oled: &mut Oled, renderer: &Renderer) {
    if !oled.is_initialized() {
        match oled.init().await {
            Ok(()) => info!("OLED initialized"),
            Err(e) => {
                warn!("OLED init failed: {}", e);
                return;
            }
        }
    }

    if let Err(e) = draw_and_flush(oled, renderer).await {
        warn!("Display update failed: {}", e);
    }
}

async fn draw_and_flush(oled: &mut Oled, renderer: &Renderer) -> Result<(), DisplayError> {
    renderer.draw(oled)?;
    oled.flush().await
}
