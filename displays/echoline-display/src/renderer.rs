//! Screen rendering
//!
//! Builds the range display screens. The panel is 128x32:
//!
//! ```text
//! y=0   Distance:
//! y=10  123 cm
//! y=20  ████████████──────
//! ```
//!
//! The fallback screen shows a single line of text and no bar.

use core::fmt::Write;

use echoline_core::{Distance, RenderRequest};
use heapless::String;

use crate::backend::{DisplayError, DisplaySurface};
use crate::screen::{Screen, TEXT_LEN};

/// Label above the distance value
pub const DISTANCE_LABEL: &str = "Distance:";

/// Text shown when no distance arrived in time
pub const FALLBACK_TEXT: &str = "No echo";

const LABEL_Y: u16 = 0;
const VALUE_Y: u16 = 10;
const BAR_Y: u16 = 20;

/// Screen renderer for measurement results
pub struct Renderer {
    screen: Screen,
}

impl Renderer {
    /// Create a new renderer
    pub const fn new() -> Self {
        Self {
            screen: Screen::new(),
        }
    }

    /// Get the current screen buffer
    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    /// Render the boot screen shown before the first cadence period
    pub fn render_boot(&mut self) {
        self.screen.clear();
        self.screen.add_text(0, LABEL_Y, 1, "ECHOLINE");
        self.screen.add_text(0, VALUE_Y, 1, "Starting...");
    }

    /// Render a measured distance with its bar graph
    pub fn render_distance(&mut self, distance: Distance) {
        self.screen.clear();
        self.screen.add_text(0, LABEL_Y, 1, DISTANCE_LABEL);

        let mut value: String<TEXT_LEN> = String::new();
        let _ = write!(value, "{} cm", distance.as_cm());
        self.screen.add_text(0, VALUE_Y, 1, &value);

        // bar_width() is capped at the panel width
        self.screen.set_bar(BAR_Y, distance.bar_width() as u16);
    }

    /// Render the "measurement unavailable" screen
    pub fn render_unavailable(&mut self) {
        self.screen.clear();
        self.screen.add_text(0, VALUE_Y, 1, FALLBACK_TEXT);
    }

    /// Render whatever the coordinator asked for
    pub fn render(&mut self, request: &RenderRequest) {
        match request {
            RenderRequest::Measurement(distance) => self.render_distance(*distance),
            RenderRequest::Unavailable => self.render_unavailable(),
        }
    }

    /// Draw the current screen onto a surface
    pub fn draw<S: DisplaySurface>(&self, surface: &mut S) -> Result<(), DisplayError> {
        self.screen.draw(surface)
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use echoline_core::TimeInterval;

    #[derive(Debug, PartialEq)]
    enum Call {
        Clear,
        Text(u16, u16, u8, std::string::String),
        Line(u16, u16, u16, u16),
    }

    #[derive(Default)]
    struct RecordingSurface {
        calls: Vec<Call>,
    }

    impl DisplaySurface for RecordingSurface {
        fn clear(&mut self) {
            self.calls.push(Call::Clear);
        }

        fn draw_text(&mut self, x: u16, y: u16, scale: u8, text: &str) -> Result<(), DisplayError> {
            self.calls.push(Call::Text(x, y, scale, text.to_string()));
            Ok(())
        }

        fn draw_line(&mut self, x0: u16, y0: u16, x1: u16, y1: u16) -> Result<(), DisplayError> {
            self.calls.push(Call::Line(x0, y0, x1, y1));
            Ok(())
        }

        fn pixel_dimensions(&self) -> (u16, u16) {
            (128, 32)
        }
    }

    #[test]
    fn test_render_boot() {
        let mut renderer = Renderer::new();
        renderer.render_boot();
        assert!(renderer.screen().contains_text("ECHOLINE"));
    }

    #[test]
    fn test_render_10cm() {
        let mut renderer = Renderer::new();
        renderer.render(&RenderRequest::Measurement(
            TimeInterval::from_micros(580).to_distance(),
        ));

        assert!(renderer.screen().contains_text("Distance:"));
        assert!(renderer.screen().contains_text("10 cm"));
        assert_eq!(renderer.screen().bar().map(|b| b.width), Some(15));
    }

    #[test]
    fn test_render_100cm_bar_clamped() {
        let mut renderer = Renderer::new();
        renderer.render(&RenderRequest::Measurement(
            TimeInterval::from_micros(5800).to_distance(),
        ));

        assert!(renderer.screen().contains_text("100 cm"));
        assert_eq!(renderer.screen().bar().map(|b| b.width), Some(128));
    }

    #[test]
    fn test_render_fallback() {
        let mut renderer = Renderer::new();
        renderer.render_distance(Distance::from_cm(50));
        renderer.render(&RenderRequest::Unavailable);

        assert!(renderer.screen().contains_text(FALLBACK_TEXT));
        assert!(!renderer.screen().contains_text("cm"));
        assert!(!renderer.screen().contains_text(DISTANCE_LABEL));
        assert!(renderer.screen().bar().is_none());
    }

    #[test]
    fn test_draw_distance_calls() {
        let mut renderer = Renderer::new();
        let mut surface = RecordingSurface::default();
        renderer.render_distance(Distance::from_cm(10));
        renderer.draw(&mut surface).unwrap();

        assert_eq!(
            surface.calls,
            [
                Call::Clear,
                Call::Text(0, 0, 1, "Distance:".to_string()),
                Call::Text(0, 10, 1, "10 cm".to_string()),
                Call::Line(0, 20, 14, 20),
            ]
        );
    }

    #[test]
    fn test_draw_zero_distance_has_no_bar() {
        let mut renderer = Renderer::new();
        let mut surface = RecordingSurface::default();
        renderer.render_distance(Distance::from_cm(0));
        renderer.draw(&mut surface).unwrap();

        assert!(surface.calls.contains(&Call::Text(0, 10, 1, "0 cm".to_string())));
        assert!(!surface.calls.iter().any(|c| matches!(c, Call::Line(..))));
    }

    #[test]
    fn test_draw_fallback_calls() {
        let mut renderer = Renderer::new();
        let mut surface = RecordingSurface::default();
        renderer.render_unavailable();
        renderer.draw(&mut surface).unwrap();

        assert_eq!(
            surface.calls,
            [Call::Clear, Call::Text(0, 10, 1, FALLBACK_TEXT.to_string())]
        );
    }
}
