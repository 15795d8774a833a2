//! Time-of-flight conversion
//!
//! Turns an echo pulse width into a distance and a distance into the width
//! of the display bar graph.

use crate::pipeline::Pipeline;
use embassy_sync::blocking_mutex::raw::RawMutex;

/// Microseconds of echo per centimetre of distance (round trip at ~343 m/s)
pub const US_PER_CM: u32 = 58;

/// Widest bar the display can show, in pixels
pub const BAR_MAX_WIDTH: u32 = 128;

/// Echo pulse width between a rising and a falling edge
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TimeInterval {
    micros: u32,
}

impl TimeInterval {
    /// Create an interval from a duration in microseconds
    pub const fn from_micros(micros: u32) -> Self {
        Self { micros }
    }

    /// Duration in microseconds
    pub const fn as_micros(&self) -> u32 {
        self.micros
    }

    /// Distance travelled by the echo, truncated to whole centimetres
    pub const fn to_distance(&self) -> Distance {
        Distance::from_cm(self.micros / US_PER_CM)
    }
}

/// Measured distance in whole centimetres
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Distance {
    cm: u32,
}

impl Distance {
    /// Create a distance in centimetres
    pub const fn from_cm(cm: u32) -> Self {
        Self { cm }
    }

    /// Distance in centimetres
    pub const fn as_cm(&self) -> u32 {
        self.cm
    }

    /// Bar graph width: `min(128, floor(cm * 1.5))`
    pub const fn bar_width(&self) -> u32 {
        // cm * 1.5 computed as cm + cm / 2 so it cannot overflow
        let scaled = self.cm.saturating_add(self.cm / 2);
        if scaled > BAR_MAX_WIDTH {
            BAR_MAX_WIDTH
        } else {
            scaled
        }
    }
}

/// Wait for the next raw interval, convert it and queue the distance
///
/// Both waits are unbounded: intervals only arrive as fast as the trigger
/// cadence allows, and the distance queue only fills if the display stalls.
pub async fn convert_next<M: RawMutex, const N: usize>(pipeline: &Pipeline<M, N>) -> Distance {
    let interval = pipeline.receive_interval().await;
    let distance = interval.to_distance();
    pipeline.send_distance(distance).await;
    pipeline.diagnostics.record_converted();
    distance
}

#[cfg(test)]
mod tests {
    use super::*;
    use embassy_futures::block_on;
    use embassy_sync::blocking_mutex::raw::NoopRawMutex;
    use proptest::prelude::*;

    #[test]
    fn test_interval_5800us() {
        let distance = TimeInterval::from_micros(5800).to_distance();
        assert_eq!(distance.as_cm(), 100);
        // 150 exceeds the display width
        assert_eq!(distance.bar_width(), 128);
    }

    #[test]
    fn test_interval_580us() {
        let distance = TimeInterval::from_micros(580).to_distance();
        assert_eq!(distance.as_cm(), 10);
        assert_eq!(distance.bar_width(), 15);
    }

    #[test]
    fn test_truncating_division() {
        assert_eq!(TimeInterval::from_micros(57).to_distance().as_cm(), 0);
        assert_eq!(TimeInterval::from_micros(115).to_distance().as_cm(), 1);
        assert_eq!(TimeInterval::from_micros(116).to_distance().as_cm(), 2);
    }

    #[test]
    fn test_bar_width_odd_distance() {
        // 7 * 1.5 = 10.5, floored
        assert_eq!(Distance::from_cm(7).bar_width(), 10);
        assert_eq!(Distance::from_cm(0).bar_width(), 0);
        assert_eq!(Distance::from_cm(85).bar_width(), 127);
        assert_eq!(Distance::from_cm(86).bar_width(), 128);
    }

    #[test]
    fn test_bar_width_does_not_overflow() {
        assert_eq!(Distance::from_cm(u32::MAX).bar_width(), BAR_MAX_WIDTH);
    }

    #[test]
    fn test_convert_next_moves_one_sample() {
        let pipeline: Pipeline<NoopRawMutex, 4> = Pipeline::new();
        pipeline.push_interval(TimeInterval::from_micros(580)).unwrap();
        pipeline.push_interval(TimeInterval::from_micros(5800)).unwrap();

        let distance = block_on(convert_next(&pipeline));
        assert_eq!(distance.as_cm(), 10);
        assert_eq!(pipeline.try_receive_distance(), Some(Distance::from_cm(10)));
        assert_eq!(pipeline.try_receive_distance(), None);
        assert_eq!(pipeline.pending_intervals(), 1);
        assert_eq!(pipeline.diagnostics.snapshot().converted, 1);
    }

    proptest! {
        #[test]
        fn prop_distance_is_truncated_quotient(micros in any::<u32>()) {
            let distance = TimeInterval::from_micros(micros).to_distance();
            prop_assert_eq!(distance.as_cm(), micros / 58);
        }

        #[test]
        fn prop_bar_width_is_clamped_three_halves(cm in any::<u32>()) {
            let expected = (u64::from(cm) * 3 / 2).min(128) as u32;
            prop_assert_eq!(Distance::from_cm(cm).bar_width(), expected);
        }
    }
}
