//! Display backend trait
//!
//! Defines the drawing interface the renderer needs from a display.

/// Display backend errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DisplayError {
    /// Communication error with display
    Communication,
    /// Invalid coordinates or dimensions
    InvalidCoordinates,
    /// Display not initialized
    NotInitialized,
}

/// Pixel display with a backbuffer
///
/// Drawing calls only touch the backbuffer; implementations push it to the
/// panel in their own flush step.
pub trait DisplaySurface {
    /// Clear the backbuffer
    fn clear(&mut self);

    /// Draw text with its top-left corner at (`x`, `y`)
    ///
    /// - `scale`: 1 for the small font, 2 or more for the large font
    fn draw_text(&mut self, x: u16, y: u16, scale: u8, text: &str) -> Result<(), DisplayError>;

    /// Draw a one pixel wide line between two points, both inclusive
    fn draw_line(&mut self, x0: u16, y0: u16, x1: u16, y1: u16) -> Result<(), DisplayError>;

    /// Get pixel dimensions as (width, height)
    fn pixel_dimensions(&self) -> (u16, u16);
}
