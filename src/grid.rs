//! Cell occupancy and per-particle state.
//!
//! Cells are stored row-major (`index = y * width + x`), the same mapping the
//! [`Frame`](crate::Frame) uses. Every coordinate accessor takes signed
//! coordinates and treats anything outside the grid as an empty cell, so the
//! stepper never has to check bounds before asking.

use alloc::vec::Vec;

use bitflags::bitflags;

use crate::{
    error::Result,
    font,
};

bitflags! {
    /// Per-frame bookkeeping carried by an occupied cell.
    #[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
    pub struct ParticleFlags: u8 {
        /// Failed to move on its last step.
        const STAGNANT = 0x01;
        /// Already moved during the current step.
        const ACTIVE = 0x02;
    }
}

/// A unit of liquid. Meaningful only while its cell is occupied.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Particle {
    pub vx: f32,
    pub vy: f32,
    pub flags: ParticleFlags,
}

impl Particle {
    /// A particle at rest with no flags set.
    pub const RESTING: Self = Self {
        vx: 0.0,
        vy: 0.0,
        flags: ParticleFlags::empty(),
    };

    pub const fn is_stagnant(&self) -> bool {
        self.flags.contains(ParticleFlags::STAGNANT)
    }
}

/// Fixed-size field of cells holding at most one particle each.
pub struct Grid {
    width: usize,
    height: usize,
    occupied: Vec<bool>,
    particles: Vec<Particle>,
}

impl Grid {
    /// Allocate an empty `width × height` grid.
    pub fn new(width: usize, height: usize) -> Result<Self> {
        let len = crate::cell_count(width, height)?;
        Ok(Self {
            width,
            height,
            occupied: crate::try_filled(len, false)?,
            particles: crate::try_filled(len, Particle::RESTING)?,
        })
    }

    pub const fn width(&self) -> usize {
        self.width
    }

    pub const fn height(&self) -> usize {
        self.height
    }

    pub const fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && (x as usize) < self.width && (y as usize) < self.height
    }

    /// Row-major index of `(x, y)`, `None` outside the grid.
    pub const fn index(&self, x: i32, y: i32) -> Option<usize> {
        if self.in_bounds(x, y) {
            Some(y as usize * self.width + x as usize)
        } else {
            None
        }
    }

    /// Whether a particle sits at `(x, y)`. Out of range reads as empty.
    pub fn get(&self, x: i32, y: i32) -> bool {
        self.index(x, y)
            .and_then(|i| self.occupied.get(i).copied())
            .unwrap_or(false)
    }

    /// Particle at `(x, y)`, if the cell is occupied.
    pub fn particle(&self, x: i32, y: i32) -> Option<&Particle> {
        let i = self.index(x, y)?;
        if self.occupied.get(i).copied().unwrap_or(false) {
            self.particles.get(i)
        } else {
            None
        }
    }

    /// Overwrite one cell. Out of range is a no-op.
    pub fn set(&mut self, x: i32, y: i32, occupied: bool, particle: Particle) {
        let Some(i) = self.index(x, y) else {
            return;
        };
        if let (Some(cell), Some(p)) = (self.occupied.get_mut(i), self.particles.get_mut(i)) {
            *cell = occupied;
            *p = if occupied { particle } else { Particle::RESTING };
        }
    }

    /// Empty every cell.
    pub fn clear(&mut self) {
        self.occupied.fill(false);
        self.particles.fill(Particle::RESTING);
    }

    /// Fill rows `y_from..y_to` with resting particles, clamped to the grid.
    pub fn fill_region(&mut self, y_from: i32, y_to: i32) {
        let height = self.height as i32;
        let (from, to) = (y_from.clamp(0, height), y_to.clamp(0, height));
        if from >= to {
            return;
        }
        let range = from as usize * self.width..to as usize * self.width;
        if let Some(cells) = self.occupied.get_mut(range.clone()) {
            cells.fill(true);
        }
        if let Some(particles) = self.particles.get_mut(range) {
            particles.fill(Particle::RESTING);
        }
    }

    /// Replace the contents with `text` drawn in the 5×5 font.
    ///
    /// Glyphs start at column 0, advance by `pitch` and are centered
    /// vertically. Pixels falling outside the grid are dropped.
    pub fn seed_text(&mut self, text: &str, pitch: usize) {
        self.clear();
        let top = (self.height as i32 - font::GLYPH_SIZE as i32) / 2;
        for (i, c) in text.chars().enumerate() {
            let Some(left) = i.checked_mul(pitch).and_then(|left| i32::try_from(left).ok()) else {
                break;
            };
            if left as usize >= self.width {
                break;
            }
            for (col, row) in font::lit_pixels(c) {
                self.set(left + col as i32, top + row as i32, true, Particle::RESTING);
            }
        }
    }

    pub fn occupied_count(&self) -> usize {
        self.occupied.iter().filter(|&&o| o).count()
    }

    /// Occupied `(x, y)` positions in row-major order.
    pub fn occupied_cells(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        let width = self.width;
        self.occupied
            .iter()
            .enumerate()
            .filter(|&(_, &o)| o)
            .map(move |(i, _)| (i % width, i / width))
    }

    /// Whether every particle failed to move on its last step.
    pub fn all_stagnant(&self) -> bool {
        self.occupied
            .iter()
            .zip(&self.particles)
            .all(|(&o, p)| !o || p.is_stagnant())
    }

    // ── Stepper internals ───────────────────────────────────────────────

    pub(crate) fn is_occupied_at(&self, i: usize) -> bool {
        self.occupied.get(i).copied().unwrap_or(false)
    }

    pub(crate) fn particle_at_mut(&mut self, i: usize) -> Option<&mut Particle> {
        self.particles.get_mut(i)
    }

    pub(crate) fn clear_active(&mut self) {
        for p in &mut self.particles {
            p.flags.remove(ParticleFlags::ACTIVE);
        }
    }

    /// Move the particle at `from` into the empty cell `to`.
    ///
    /// The destination inherits the particle state and is marked
    /// [`ParticleFlags::ACTIVE`]; the source is cleared. Returns `false` and
    /// changes nothing when `to` is occupied or either index is invalid.
    pub(crate) fn try_move(&mut self, from: usize, to: usize) -> bool {
        if from == to || !self.is_occupied_at(from) || self.occupied.get(to) != Some(&false) {
            return false;
        }
        let Some(mut particle) = self.particles.get(from).copied() else {
            return false;
        };
        particle.flags.insert(ParticleFlags::ACTIVE);
        self.occupied[to] = true;
        self.particles[to] = particle;
        self.occupied[from] = false;
        self.particles[from] = Particle::RESTING;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn try_move_refuses_occupied_target() {
        let mut grid = Grid::new(3, 1).unwrap();
        grid.set(0, 0, true, Particle::RESTING);
        grid.set(1, 0, true, Particle::RESTING);
        assert!(!grid.try_move(0, 1));
        assert!(grid.try_move(1, 2));
        assert!(grid.get(2, 0));
        assert!(!grid.get(1, 0));
        assert!(grid.particle(2, 0).unwrap().flags.contains(ParticleFlags::ACTIVE));
        assert_eq!(grid.occupied_count(), 2);
    }

    #[test]
    fn try_move_rejects_bad_indices() {
        let mut grid = Grid::new(2, 2).unwrap();
        grid.set(0, 0, true, Particle::RESTING);
        assert!(!grid.try_move(0, 99));
        assert!(!grid.try_move(3, 1));
        assert!(!grid.try_move(0, 0));
        assert_eq!(grid.occupied_count(), 1);
    }
}
