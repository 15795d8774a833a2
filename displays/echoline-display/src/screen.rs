//! Screen description
//!
//! A `Screen` lists what one frame of the range display contains. It is
//! built by the renderer and drawn onto any `DisplaySurface`.

use heapless::{String, Vec};

use crate::backend::{DisplayError, DisplaySurface};

/// Maximum text items on one screen
pub const MAX_TEXT_ITEMS: usize = 4;

/// Maximum characters per text item
pub const TEXT_LEN: usize = 21;

/// A run of text at a pixel position
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextItem {
    /// Left edge in pixels
    pub x: u16,
    /// Top edge in pixels
    pub y: u16,
    /// Font scale
    pub scale: u8,
    /// Text content
    pub text: String<TEXT_LEN>,
}

/// Horizontal bar starting at the left edge
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bar {
    /// Row in pixels
    pub y: u16,
    /// Width in pixels
    pub width: u16,
}

/// One frame of the range display
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Screen {
    texts: Vec<TextItem, MAX_TEXT_ITEMS>,
    bar: Option<Bar>,
}

impl Screen {
    /// Create an empty screen
    pub const fn new() -> Self {
        Self {
            texts: Vec::new(),
            bar: None,
        }
    }

    /// Remove all content
    pub fn clear(&mut self) {
        self.texts.clear();
        self.bar = None;
    }

    /// Add text at a position
    ///
    /// Text longer than [`TEXT_LEN`] is truncated; items beyond
    /// [`MAX_TEXT_ITEMS`] are ignored.
    pub fn add_text(&mut self, x: u16, y: u16, scale: u8, text: &str) {
        let mut line = String::new();
        for ch in text.chars() {
            if line.push(ch).is_err() {
                break;
            }
        }
        let _ = self.texts.push(TextItem {
            x,
            y,
            scale,
            text: line,
        });
    }

    /// Set the bar; a zero width removes it
    pub fn set_bar(&mut self, y: u16, width: u16) {
        self.bar = if width == 0 { None } else { Some(Bar { y, width }) };
    }

    /// Text items in drawing order
    pub fn texts(&self) -> &[TextItem] {
        &self.texts
    }

    /// Bar, if any
    pub fn bar(&self) -> Option<Bar> {
        self.bar
    }

    /// Check whether any text item contains `needle`
    pub fn contains_text(&self, needle: &str) -> bool {
        self.texts.iter().any(|t| t.text.contains(needle))
    }

    /// Clear the surface and draw this screen onto it
    ///
    /// The bar is cut at the surface width.
    pub fn draw<S: DisplaySurface>(&self, surface: &mut S) -> Result<(), DisplayError> {
        surface.clear();
        for item in &self.texts {
            surface.draw_text(item.x, item.y, item.scale, &item.text)?;
        }
        if let Some(bar) = self.bar {
            let (surface_width, _) = surface.pixel_dimensions();
            let width = bar.width.min(surface_width);
            if width > 0 {
                surface.draw_line(0, bar.y, width - 1, bar.y)?;
            }
        }
        Ok(())
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for Screen {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "Screen[");
        for (i, item) in self.texts.iter().enumerate() {
            if i > 0 {
                defmt::write!(f, ", ");
            }
            defmt::write!(f, "{}", item.text.as_str());
        }
        if let Some(bar) = self.bar {
            defmt::write!(f, ", bar={}", bar.width);
        }
        defmt::write!(f, "]");
    }
}
