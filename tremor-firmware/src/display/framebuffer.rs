//! Monochrome frame buffer
//!
//! 128x64 pixels stored as eight 8-pixel-high pages, the native SH1106
//! memory layout. Text is rasterized with an embedded-graphics mono font so
//! one font row fills exactly one page.

use core::convert::Infallible;

use embedded_graphics::mono_font::ascii::FONT_5X8;
use embedded_graphics::mono_font::MonoTextStyle;
use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;
use embedded_graphics::text::{Baseline, Text};
use tremor_display::{DisplayBackend, DisplayError, SCREEN_COLS, SCREEN_ROWS};

/// Panel width in pixels
pub const WIDTH: usize = 128;
/// Panel height in pixels
pub const HEIGHT: usize = 64;
/// Number of 8-pixel pages
pub const PAGES: usize = HEIGHT / 8;

/// Horizontal pitch of one text column in pixels
const CHAR_WIDTH: usize = 6;

/// Left margin centring `SCREEN_COLS` columns on the panel
const MARGIN: usize = (WIDTH - SCREEN_COLS * CHAR_WIDTH) / 2;

/// Frame buffer
pub struct FrameBuffer {
    pages: [[u8; WIDTH]; PAGES],
    /// Set once the panel has been initialized
    ready: bool,
    /// A finished frame is waiting to be sent
    pending: bool,
}

impl FrameBuffer {
    /// Create a blank frame buffer
    pub const fn new() -> Self {
        Self {
            pages: [[0; WIDTH]; PAGES],
            ready: false,
            pending: false,
        }
    }

    /// Mark the panel as initialized
    pub fn set_ready(&mut self, ready: bool) {
        self.ready = ready;
    }

    /// Take the pending-frame flag
    pub fn take_pending(&mut self) -> bool {
        core::mem::take(&mut self.pending)
    }

    /// Raw page data for the panel
    pub fn page(&self, page: usize) -> &[u8; WIDTH] {
        &self.pages[page]
    }

    fn column_x(col: u8) -> usize {
        MARGIN + usize::from(col) * CHAR_WIDTH
    }
}

impl Default for FrameBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl OriginDimensions for FrameBuffer {
    fn size(&self) -> Size {
        Size::new(WIDTH as u32, HEIGHT as u32)
    }
}

impl DrawTarget for FrameBuffer {
    type Color = BinaryColor;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, color) in pixels {
            let (Ok(x), Ok(y)) = (usize::try_from(point.x), usize::try_from(point.y)) else {
                continue;
            };
            if x >= WIDTH || y >= HEIGHT {
                continue;
            }

            let bit = 1u8 << (y % 8);
            let byte = &mut self.pages[y / 8][x];
            if color.is_on() {
                *byte |= bit;
            } else {
                *byte &= !bit;
            }
        }
        Ok(())
    }
}

impl DisplayBackend for FrameBuffer {
    fn clear(&mut self) -> Result<(), DisplayError> {
        for page in self.pages.iter_mut() {
            page.fill(0);
        }
        Ok(())
    }

    fn draw_text(&mut self, row: u8, col: u8, text: &str) -> Result<(), DisplayError> {
        if usize::from(row) >= SCREEN_ROWS || usize::from(col) >= SCREEN_COLS {
            return Err(DisplayError::InvalidCoordinates);
        }

        let style = MonoTextStyle::new(&FONT_5X8, BinaryColor::On);
        let y = usize::from(row) * 8;

        // Draw per character to keep the 6 px column pitch of the layout
        for (i, ch) in text.chars().enumerate() {
            let col = usize::from(col) + i;
            if col >= SCREEN_COLS {
                break;
            }
            let mut buf = [0u8; 4];
            let origin = Point::new(Self::column_x(col as u8) as i32, y as i32);
            let _ = Text::with_baseline(ch.encode_utf8(&mut buf), origin, style, Baseline::Top)
                .draw(self);
        }

        Ok(())
    }

    fn invert_region(&mut self, row: u8, start_col: u8, end_col: u8) -> Result<(), DisplayError> {
        if usize::from(row) >= SCREEN_ROWS {
            return Err(DisplayError::InvalidCoordinates);
        }

        let start = Self::column_x(start_col).min(WIDTH);
        let end = Self::column_x(end_col).min(WIDTH);
        for byte in &mut self.pages[usize::from(row)][start..end] {
            *byte ^= 0xFF;
        }
        Ok(())
    }

    fn flush(&mut self) -> Result<(), DisplayError> {
        // The panel transfer is async, see `Sh1106::write_frame`
        self.pending = true;
        Ok(())
    }

    fn dimensions(&self) -> (u8, u8) {
        (SCREEN_COLS as u8, SCREEN_ROWS as u8)
    }

    fn is_ready(&self) -> bool {
        self.ready
    }
}
