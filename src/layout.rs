//! Logical pixel coordinates → position on the physical LED chain.
//!
//! The reference matrix is five 8×6 panels chained left to right. Each panel
//! is wired in raster order, so pixel `(x, y)` lives at
//! `panel * 48 + y * 8 + x % 8` on the strip rather than at `y * 40 + x`.

/// Panels of `panel_width × panel_height` pixels chained left to right.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PanelLayout {
    pub panel_width: usize,
    pub panel_height: usize,
}

impl PanelLayout {
    /// 8×6 panels, as on the reference board.
    pub const REFERENCE: Self = Self::new(8, 6);

    pub const fn new(panel_width: usize, panel_height: usize) -> Self {
        Self {
            panel_width,
            panel_height,
        }
    }

    /// A single panel spanning the whole matrix, i.e. plain row-major order.
    pub const fn row_major(width: usize, height: usize) -> Self {
        Self::new(width, height)
    }

    pub const fn panel_len(&self) -> usize {
        self.panel_width * self.panel_height
    }

    /// Strip index of `(x, y)` in a chain `width` pixels wide, `None` when
    /// the pixel is outside the chain.
    pub const fn strip_index(&self, x: usize, y: usize, width: usize) -> Option<usize> {
        if self.panel_width == 0 || x >= width || y >= self.panel_height {
            return None;
        }
        let panel = x / self.panel_width;
        let local_x = x % self.panel_width;
        Some(panel * self.panel_len() + y * self.panel_width + local_x)
    }
}
