//! Distance conversion task

use defmt::*;
use echoline_core::convert_next;

use super::SonarPipeline;

/// Conversion task - turns pulse widths into distances
#[embassy_executor::task]
pub async fn conversion_task(pipeline: &'static SonarPipeline) {
    info!("Conversion task started");

    loop {
        let distance = convert_next(pipeline).await;
        debug!("Converted {} cm", distance.as_cm());
    }
}
