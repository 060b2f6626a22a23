//! In-memory pixel buffer shared by the liquid and the animations.
//!
//! Pixels are row-major, matching [`Grid`](crate::Grid). The host copies the
//! finished frame onto its LED chain with [`Frame::write_strip`].

use alloc::vec::Vec;
use core::convert::Infallible;

use embedded_graphics::{
    Pixel,
    mono_font::{
        MonoTextStyle,
        ascii::FONT_4X6,
    },
    pixelcolor::Rgb888,
    prelude::*,
    text::{
        Baseline,
        Text,
    },
};
use palette::Srgb;

use crate::{
    color::{
        self,
        BLACK,
    },
    error::Result,
    font,
    layout::PanelLayout,
};

/// A `width × height` RGB framebuffer.
pub struct Frame {
    width: usize,
    height: usize,
    pixels: Vec<Srgb<u8>>,
}

impl Frame {
    /// Allocate a black frame.
    pub fn new(width: usize, height: usize) -> Result<Self> {
        let len = crate::cell_count(width, height)?;
        Ok(Self {
            width,
            height,
            pixels: crate::try_filled(len, BLACK)?,
        })
    }

    pub const fn width(&self) -> usize {
        self.width
    }

    pub const fn height(&self) -> usize {
        self.height
    }

    /// Number of pixels.
    pub fn len(&self) -> usize {
        self.pixels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }

    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x as usize >= self.width || y as usize >= self.height {
            return None;
        }
        Some(y as usize * self.width + x as usize)
    }

    /// Color at `(x, y)`, black outside the frame.
    pub fn get(&self, x: i32, y: i32) -> Srgb<u8> {
        self.index(x, y)
            .and_then(|i| self.pixels.get(i).copied())
            .unwrap_or(BLACK)
    }

    /// Set a single pixel. Out of range is ignored.
    pub fn set(&mut self, x: i32, y: i32, color: Srgb<u8>) {
        if let Some(px) = self.index(x, y).and_then(|i| self.pixels.get_mut(i)) {
            *px = color;
        }
    }

    /// Fill the whole frame with one colour.
    pub fn fill(&mut self, color: Srgb<u8>) {
        self.pixels.fill(color);
    }

    /// Turn every pixel off.
    pub fn clear(&mut self) {
        self.fill(BLACK);
    }

    /// Darken every pixel by `amount` per channel.
    pub fn fade(&mut self, amount: u8) {
        for px in &mut self.pixels {
            *px = color::fade(*px, amount);
        }
    }

    pub fn pixels(&self) -> &[Srgb<u8>] {
        &self.pixels
    }

    /// Number of pixels that are not black.
    pub fn lit_count(&self) -> usize {
        self.pixels.iter().filter(|&&px| px != BLACK).count()
    }

    /// Draw `text` in the 5×5 font with its top-left corner at `(x, y)`.
    ///
    /// Advances [`font::BANNER_PITCH`] per character; scroll by moving `x`.
    pub fn draw_text(&mut self, x: i32, y: i32, text: &str, color: Srgb<u8>) {
        for (i, c) in text.chars().enumerate() {
            let left = x + (i * font::BANNER_PITCH) as i32;
            for (col, row) in font::lit_pixels(c) {
                self.set(left + col as i32, y + row as i32, color);
            }
        }
    }

    /// Draw a status label (e.g. a mode name) with the 4×6 ASCII font.
    ///
    /// Returns the x coordinate just past the last glyph.
    pub fn draw_label(&mut self, x: i32, text: &str, color: Srgb<u8>) -> i32 {
        let style = MonoTextStyle::new(&FONT_4X6, Rgb888::new(color.red, color.green, color.blue));
        let Ok(end) = Text::with_baseline(text, Point::new(x, 0), style, Baseline::Top).draw(self);
        end.x
    }

    /// Copy the frame onto an LED chain wired as `layout`.
    ///
    /// Pixels whose strip index falls past `strip` are dropped.
    pub fn write_strip(&self, layout: &PanelLayout, strip: &mut [Srgb<u8>]) {
        for (i, &color) in self.pixels.iter().enumerate() {
            let (x, y) = (i % self.width, i / self.width);
            if let Some(led) = layout
                .strip_index(x, y, self.width)
                .and_then(|idx| strip.get_mut(idx))
            {
                *led = color;
            }
        }
    }
}

impl DrawTarget for Frame {
    type Color = Rgb888;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> core::result::Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(Point { x, y }, color) in pixels {
            self.set(x, y, Srgb::new(color.r(), color.g(), color.b()));
        }
        Ok(())
    }
}

impl OriginDimensions for Frame {
    fn size(&self) -> Size {
        Size::new(self.width as u32, self.height as u32)
    }
}
