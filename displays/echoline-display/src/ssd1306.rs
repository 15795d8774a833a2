//! SSD1306 OLED Display Driver
//!
//! Driver for 128x32 SSD1306-based OLED modules via I2C. Drawing goes to a
//! local frame buffer through embedded-graphics; `flush` sends it to the
//! panel one page (8 pixel rows) at a time.

use embedded_graphics::mono_font::ascii::{FONT_10X20, FONT_6X10};
use embedded_graphics::mono_font::{MonoFont, MonoTextStyle};
use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{Line, PrimitiveStyle};
use embedded_graphics::text::{Baseline, Text};
use embedded_hal_async::i2c::I2c;

use crate::backend::{DisplayError, DisplaySurface};

/// SSD1306 I2C address (typically 0x3C or 0x3D)
const SSD1306_ADDR: u8 = 0x3C;

/// Display dimensions
pub const WIDTH: usize = 128;
pub const HEIGHT: usize = 32;
const PAGES: usize = HEIGHT / 8;

/// SSD1306 commands
#[allow(dead_code)]
mod cmd {
    pub const DISPLAY_OFF: u8 = 0xAE;
    pub const DISPLAY_ON: u8 = 0xAF;
    pub const DISPLAY_RESUME: u8 = 0xA4;
    pub const SET_CONTRAST: u8 = 0x81;
    pub const SET_NORMAL: u8 = 0xA6;
    pub const SET_INVERSE: u8 = 0xA7;
    pub const SET_MEMORY_MODE: u8 = 0x20;
    pub const SET_COLUMN_ADDR: u8 = 0x21;
    pub const SET_PAGE_ADDR: u8 = 0x22;
    pub const SET_DISPLAY_OFFSET: u8 = 0xD3;
    pub const SET_COM_PINS: u8 = 0xDA;
    pub const SET_VCOM_DETECT: u8 = 0xDB;
    pub const SET_CLOCK_DIV: u8 = 0xD5;
    pub const SET_PRECHARGE: u8 = 0xD9;
    pub const SET_MUX_RATIO: u8 = 0xA8;
    pub const SET_START_LINE: u8 = 0x40;
    pub const SET_SEG_REMAP: u8 = 0xA1;
    pub const SET_COM_SCAN_DEC: u8 = 0xC8;
    pub const SET_CHARGE_PUMP: u8 = 0x8D;
}

/// Control byte announcing a command stream
const CONTROL_COMMAND: u8 = 0x00;

/// Control byte announcing display RAM data
const CONTROL_DATA: u8 = 0x40;

/// 1 bit per pixel frame buffer, organized as pages
pub struct FrameBuffer {
    pages: [[u8; WIDTH]; PAGES],
}

impl FrameBuffer {
    const fn new() -> Self {
        Self {
            pages: [[0; WIDTH]; PAGES],
        }
    }

    fn clear(&mut self) {
        for page in self.pages.iter_mut() {
            page.fill(0);
        }
    }

    fn set_pixel(&mut self, x: i32, y: i32, on: bool) {
        if x < 0 || y < 0 || x >= WIDTH as i32 || y >= HEIGHT as i32 {
            return;
        }
        let (x, y) = (x as usize, y as usize);
        let bit = 1 << (y % 8);
        if on {
            self.pages[y / 8][x] |= bit;
        } else {
            self.pages[y / 8][x] &= !bit;
        }
    }

    /// Read back one pixel
    pub fn pixel(&self, x: usize, y: usize) -> bool {
        x < WIDTH && y < HEIGHT && self.pages[y / 8][x] & (1 << (y % 8)) != 0
    }

    /// Raw contents of one page
    pub fn page(&self, page: usize) -> &[u8; WIDTH] {
        &self.pages[page]
    }
}

impl OriginDimensions for FrameBuffer {
    fn size(&self) -> Size {
        Size::new(WIDTH as u32, HEIGHT as u32)
    }
}

impl DrawTarget for FrameBuffer {
    type Color = BinaryColor;
    type Error = core::convert::Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, color) in pixels {
            self.set_pixel(point.x, point.y, color.is_on());
        }
        Ok(())
    }
}

/// SSD1306 OLED driver
pub struct Ssd1306<I2C> {
    i2c: I2C,
    buffer: FrameBuffer,
    initialized: bool,
}

impl<I2C> Ssd1306<I2C> {
    /// Create a new SSD1306 driver
    pub const fn new(i2c: I2C) -> Self {
        Self {
            i2c,
            buffer: FrameBuffer::new(),
            initialized: false,
        }
    }

    /// Frame buffer contents
    pub fn buffer(&self) -> &FrameBuffer {
        &self.buffer
    }

    /// Whether `init` has completed
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    fn font(scale: u8) -> &'static MonoFont<'static> {
        if scale <= 1 {
            &FONT_6X10
        } else {
            &FONT_10X20
        }
    }
}

impl<I2C: I2c> Ssd1306<I2C> {
    /// Initialize the display
    pub async fn init(&mut self) -> Result<(), DisplayError> {
        // Initialization sequence for a 128x32 panel
        let init_cmds: &[u8] = &[
            cmd::DISPLAY_OFF,
            cmd::SET_CLOCK_DIV,
            0x80, // Default clock
            cmd::SET_MUX_RATIO,
            0x1F, // 32 lines
            cmd::SET_DISPLAY_OFFSET,
            0x00,
            cmd::SET_START_LINE,
            cmd::SET_CHARGE_PUMP,
            0x14, // Enable charge pump
            cmd::SET_MEMORY_MODE,
            0x00,                  // Horizontal addressing
            cmd::SET_SEG_REMAP,    // Flip horizontally
            cmd::SET_COM_SCAN_DEC, // Flip vertically
            cmd::SET_COM_PINS,
            0x02, // Sequential COM config for 32 rows
            cmd::SET_CONTRAST,
            0x8F,
            cmd::SET_PRECHARGE,
            0xF1,
            cmd::SET_VCOM_DETECT,
            0x40,
            cmd::DISPLAY_RESUME,
            cmd::SET_NORMAL,
            cmd::DISPLAY_ON,
        ];

        for &c in init_cmds {
            self.command(c).await?;
        }

        self.initialized = true;
        Ok(())
    }

    /// Send a command to the display
    async fn command(&mut self, cmd: u8) -> Result<(), DisplayError> {
        self.i2c
            .write(SSD1306_ADDR, &[CONTROL_COMMAND, cmd])
            .await
            .map_err(|_| DisplayError::Communication)
    }

    /// Flush the frame buffer to the display
    pub async fn flush(&mut self) -> Result<(), DisplayError> {
        if !self.initialized {
            return Err(DisplayError::NotInitialized);
        }

        for page in 0..PAGES {
            self.command(cmd::SET_COLUMN_ADDR).await?;
            self.command(0).await?;
            self.command((WIDTH - 1) as u8).await?;
            self.command(cmd::SET_PAGE_ADDR).await?;
            self.command(page as u8).await?;
            self.command(page as u8).await?;

            // Send page data
            let mut data = [0u8; WIDTH + 1];
            data[0] = CONTROL_DATA;
            data[1..].copy_from_slice(&self.buffer.pages[page]);
            self.i2c
                .write(SSD1306_ADDR, &data)
                .await
                .map_err(|_| DisplayError::Communication)?;
        }

        Ok(())
    }
}

impl<I2C> DisplaySurface for Ssd1306<I2C> {
    fn clear(&mut self) {
        self.buffer.clear();
    }

    fn draw_text(&mut self, x: u16, y: u16, scale: u8, text: &str) -> Result<(), DisplayError> {
        if x as usize >= WIDTH || y as usize >= HEIGHT {
            return Err(DisplayError::InvalidCoordinates);
        }

        let style = MonoTextStyle::new(Self::font(scale), BinaryColor::On);
        // Drawing into the frame buffer cannot fail; glyphs past the edge are clipped
        Text::with_baseline(text, Point::new(x as i32, y as i32), style, Baseline::Top)
            .draw(&mut self.buffer)
            .ok();
        Ok(())
    }

    fn draw_line(&mut self, x0: u16, y0: u16, x1: u16, y1: u16) -> Result<(), DisplayError> {
        let in_bounds = |x: u16, y: u16| (x as usize) < WIDTH && (y as usize) < HEIGHT;
        if !in_bounds(x0, y0) || !in_bounds(x1, y1) {
            return Err(DisplayError::InvalidCoordinates);
        }

        Line::new(
            Point::new(x0 as i32, y0 as i32),
            Point::new(x1 as i32, y1 as i32),
        )
        .into_styled(PrimitiveStyle::with_stroke(BinaryColor::On, 1))
        .draw(&mut self.buffer)
        .ok();
        Ok(())
    }

    fn pixel_dimensions(&self) -> (u16, u16) {
        (WIDTH as u16, HEIGHT as u16)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embassy_futures::block_on;
    use embedded_hal_async::i2c::{ErrorKind, ErrorType, Operation};

    /// I2C bus that records every write
    #[derive(Default)]
    struct MockI2c {
        writes: Vec<(u8, Vec<u8>)>,
        fail: bool,
    }

    impl ErrorType for MockI2c {
        type Error = ErrorKind;
    }

    impl I2c for MockI2c {
        async fn transaction(
            &mut self,
            address: u8,
            operations: &mut [Operation<'_>],
        ) -> Result<(), Self::Error> {
            if self.fail {
                return Err(ErrorKind::Other);
            }
            for op in operations {
                if let Operation::Write(bytes) = op {
                    self.writes.push((address, bytes.to_vec()));
                }
            }
            Ok(())
        }
    }

    #[test]
    fn test_flush_requires_init() {
        let mut display = Ssd1306::new(MockI2c::default());
        assert_eq!(block_on(display.flush()), Err(DisplayError::NotInitialized));
    }

    #[test]
    fn test_init_sends_commands() {
        let mut display = Ssd1306::new(MockI2c::default());
        block_on(display.init()).unwrap();
        assert!(display.is_initialized());

        let writes = &display.i2c.writes;
        assert!(writes
            .iter()
            .all(|(addr, bytes)| *addr == SSD1306_ADDR && bytes[0] == CONTROL_COMMAND));
        assert_eq!(writes.first().map(|(_, b)| b[1]), Some(cmd::DISPLAY_OFF));
        assert_eq!(writes.last().map(|(_, b)| b[1]), Some(cmd::DISPLAY_ON));
    }

    #[test]
    fn test_flush_sends_every_page() {
        let mut display = Ssd1306::new(MockI2c::default());
        block_on(display.init()).unwrap();
        display.i2c.writes.clear();

        display.draw_line(0, 20, 14, 20).unwrap();
        block_on(display.flush()).unwrap();

        let data: Vec<_> = display
            .i2c
            .writes
            .iter()
            .filter(|(_, b)| b[0] == CONTROL_DATA)
            .collect();
        assert_eq!(data.len(), PAGES);
        assert!(data.iter().all(|(_, b)| b.len() == WIDTH + 1));

        // Row 20 is bit 4 of page 2
        assert_eq!(data[2].1[1], 1 << 4);
        assert_eq!(data[2].1[15], 1 << 4);
        assert_eq!(data[2].1[16], 0);
    }

    #[test]
    fn test_bus_error_maps_to_communication() {
        let mut display = Ssd1306::new(MockI2c {
            fail: true,
            ..Default::default()
        });
        assert_eq!(block_on(display.init()), Err(DisplayError::Communication));
        assert!(!display.is_initialized());
    }

    #[test]
    fn test_line_pixels() {
        let mut display = Ssd1306::new(MockI2c::default());
        display.draw_line(0, 20, 127, 20).unwrap();
        assert!(display.buffer().pixel(0, 20));
        assert!(display.buffer().pixel(127, 20));
        assert!(!display.buffer().pixel(0, 21));
    }

    #[test]
    fn test_text_sets_pixels_and_clear_resets() {
        let mut display = Ssd1306::new(MockI2c::default());
        display.draw_text(0, 10, 1, "10 cm").unwrap();
        let lit = |page: usize| display.buffer().page(page).iter().any(|&b| b != 0);
        assert!(lit(1) || lit(2));

        display.clear();
        assert!((0..PAGES).all(|p| display.buffer().page(p).iter().all(|&b| b == 0)));
    }

    #[test]
    fn test_out_of_bounds_rejected() {
        let mut display = Ssd1306::new(MockI2c::default());
        assert_eq!(display.draw_line(0, 32, 10, 32), Err(DisplayError::InvalidCoordinates));
        assert_eq!(display.draw_text(128, 0, 1, "x"), Err(DisplayError::InvalidCoordinates));
        assert_eq!(display.pixel_dimensions(), (128, 32));
    }
}
