//! Cellular liquid stepper.
//!
//! Each tick every particle picks up gravity, tries to move along its
//! velocity, then tries to fall one cell, then searches sideways for a
//! supported empty cell. Particles that cannot move are marked stagnant and
//! lose energy, which is what lets a pool come to rest.
//!
//! Two alternations keep the pool from leaning: the row scan direction flips
//! every tick, and the first side searched when spreading depends on the
//! parity of the column.
//!
//! All constants are per tick. The firmware ticks as fast as the LED strip
//! can be flushed (~50 ms for 240 pixels), and the motion is tuned for that.

use alloc::string::{
    String,
    ToString as _,
};

use palette::Srgb;

use crate::{
    error::Result,
    font,
    frame::Frame,
    gravity::{
        GRAVITY,
        Gravity,
        Tilt,
    },
    grid::{
        Grid,
        ParticleFlags,
    },
};

/// Speed below which a velocity component does not displace the particle.
const MOVE_THRESHOLD: f32 = 0.3;

/// Vertical gravity needed before a blocked particle tries to drop a cell.
const FALL_THRESHOLD: f32 = 0.1;

/// Gravity or vertical speed above which a blocked particle spreads sideways.
const SPREAD_THRESHOLD: f32 = 0.5;

/// Sideways speed given to a particle that spread.
const SPREAD_KICK: f32 = 0.5;

/// Physics constants of the stepper.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LiquidConfig {
    /// Gravity magnitude, cells per tick².
    pub gravity: f32,
    /// Clamp applied to each velocity component.
    pub max_velocity: f32,
    /// Drag factor applied every tick.
    pub velocity_loss: f32,
    /// Damping applied when a particle is blocked.
    pub collision_loss: f32,
    /// Sideways search radius for a moving particle.
    pub spread_range: usize,
    /// Sideways search radius for a particle that was stagnant last tick.
    pub stagnant_spread_range: usize,
    /// Horizontal advance per glyph when seeding text.
    pub text_pitch: usize,
}

impl Default for LiquidConfig {
    fn default() -> Self {
        Self {
            gravity: GRAVITY,
            max_velocity: 4.0,
            velocity_loss: 0.95,
            collision_loss: 0.75,
            spread_range: 12,
            stagnant_spread_range: 3,
            text_pitch: font::SEED_PITCH,
        }
    }
}

impl LiquidConfig {
    #[must_use]
    pub const fn with_gravity(mut self, gravity: f32) -> Self {
        self.gravity = gravity;
        self
    }

    #[must_use]
    pub const fn with_max_velocity(mut self, max_velocity: f32) -> Self {
        self.max_velocity = max_velocity;
        self
    }

    #[must_use]
    pub const fn with_velocity_loss(mut self, velocity_loss: f32) -> Self {
        self.velocity_loss = velocity_loss;
        self
    }

    #[must_use]
    pub const fn with_collision_loss(mut self, collision_loss: f32) -> Self {
        self.collision_loss = collision_loss;
        self
    }

    #[must_use]
    pub const fn with_spread_range(mut self, full: usize, stagnant: usize) -> Self {
        self.spread_range = full;
        self.stagnant_spread_range = stagnant;
        self
    }

    #[must_use]
    pub const fn with_text_pitch(mut self, pitch: usize) -> Self {
        self.text_pitch = pitch;
        self
    }

    /// `max_velocity` as a usable clamp bound; negative or NaN reads as 0.
    fn velocity_limit(&self) -> f32 {
        if self.max_velocity >= 0.0 { self.max_velocity } else { 0.0 }
    }
}

/// What [`LiquidSim::reset`] restores.
#[derive(Debug, Clone, PartialEq)]
enum Seed {
    /// Bottom `rows` rows full.
    Pool { rows: usize },
    Text(String),
}

/// An owned liquid simulation over one grid.
pub struct LiquidSim {
    grid: Grid,
    config: LiquidConfig,
    tilt: Tilt,
    gravity: Gravity,
    bottom_up: bool,
    seed: Seed,
}

impl LiquidSim {
    /// A `width × height` sim with the bottom `fill_rows` rows full of liquid.
    pub fn new(width: usize, height: usize, fill_rows: usize) -> Result<Self> {
        Self::new_with_config(width, height, fill_rows, LiquidConfig::default())
    }

    pub fn new_with_config(
        width: usize,
        height: usize,
        fill_rows: usize,
        config: LiquidConfig,
    ) -> Result<Self> {
        Self::build(width, height, Seed::Pool { rows: fill_rows }, config)
    }

    /// A `width × height` sim whose liquid starts out spelling `text`.
    pub fn with_text(width: usize, height: usize, text: &str) -> Result<Self> {
        Self::with_text_and_config(width, height, text, LiquidConfig::default())
    }

    pub fn with_text_and_config(
        width: usize,
        height: usize,
        text: &str,
        config: LiquidConfig,
    ) -> Result<Self> {
        Self::build(width, height, Seed::Text(text.to_string()), config)
    }

    fn build(width: usize, height: usize, seed: Seed, config: LiquidConfig) -> Result<Self> {
        let mut sim = Self {
            grid: Grid::new(width, height)?,
            config,
            tilt: Tilt::LEVEL,
            gravity: Gravity::from_tilt(Tilt::LEVEL, config.gravity),
            bottom_up: false,
            seed,
        };
        sim.reset();
        info!(
            "liquid: {}x{} grid, {} particles",
            width,
            height,
            sim.grid.occupied_count()
        );
        Ok(sim)
    }

    /// Restore the initial pool or text and forget all velocities.
    pub fn reset(&mut self) {
        match &self.seed {
            Seed::Pool { rows } => {
                let height = self.grid.height() as i32;
                let rows = i32::try_from(*rows).unwrap_or(i32::MAX);
                self.grid.clear();
                self.grid.fill_region(height.saturating_sub(rows), height);
            }
            Seed::Text(text) => self.grid.seed_text(text, self.config.text_pitch),
        }
        debug!("liquid reset: {} particles", self.grid.occupied_count());
    }

    /// Point gravity along the current orientation.
    pub fn set_tilt(&mut self, tilt: Tilt) {
        self.tilt = tilt;
        self.gravity = Gravity::from_tilt(tilt, self.config.gravity);
    }

    /// Override the gravity vector directly, e.g. for a scripted pour.
    pub fn set_gravity(&mut self, gravity: Gravity) {
        self.gravity = gravity;
    }

    pub const fn tilt(&self) -> Tilt {
        self.tilt
    }

    pub const fn gravity(&self) -> Gravity {
        self.gravity
    }

    pub const fn config(&self) -> &LiquidConfig {
        &self.config
    }

    pub const fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn width(&self) -> usize {
        self.grid.width()
    }

    pub fn height(&self) -> usize {
        self.grid.height()
    }

    /// Whether `(x, y)` holds liquid. Out of range reads as empty.
    pub fn cell(&self, x: i32, y: i32) -> bool {
        self.grid.get(x, y)
    }

    pub fn occupied_count(&self) -> usize {
        self.grid.occupied_count()
    }

    /// Every particle failed to move on its last step.
    ///
    /// Pools of full rows get here; text poured on a level board keeps
    /// hopping along its surface and usually never does.
    pub fn is_settled(&self) -> bool {
        self.grid.all_stagnant()
    }

    /// Clear `frame` and draw every occupied cell in `color`.
    pub fn render(&self, frame: &mut Frame, color: Srgb<u8>) {
        frame.clear();
        for (x, y) in self.grid.occupied_cells() {
            frame.set(x as i32, y as i32, color);
        }
    }

    /// Advance the simulation by one tick.
    pub fn step(&mut self) {
        self.grid.clear_active();
        self.bottom_up = !self.bottom_up;

        let width = self.grid.width() as i32;
        let height = self.grid.height() as i32;
        for row in 0..height {
            let y = if self.bottom_up { height - 1 - row } else { row };
            for x in 0..width {
                self.step_particle(x, y);
            }
        }
    }

    fn step_particle(&mut self, x: i32, y: i32) {
        let Some(from) = self.grid.index(x, y) else {
            return;
        };
        if !self.grid.is_occupied_at(from) {
            return;
        }

        let cfg = self.config;
        let gravity = self.gravity;
        let Some(p) = self.grid.particle_at_mut(from) else {
            return;
        };
        if p.flags.contains(ParticleFlags::ACTIVE) {
            return;
        }

        let limit = cfg.velocity_limit();
        p.vx = (p.vx + gravity.x).clamp(-limit, limit) * cfg.velocity_loss;
        p.vy = (p.vy + gravity.y).clamp(-limit, limit) * cfg.velocity_loss;
        let (vx, vy) = (p.vx, p.vy);
        let stagnant = p.is_stagnant();

        let max_x = self.grid.width() as i32 - 1;
        let max_y = self.grid.height() as i32 - 1;
        let mut tx = x;
        let mut ty = y;
        if libm::fabsf(vx) > MOVE_THRESHOLD {
            tx = tx.saturating_add(libm::roundf(vx) as i32);
        }
        if libm::fabsf(vy) > MOVE_THRESHOLD {
            ty = ty.saturating_add(libm::roundf(vy) as i32);
        }
        let (tx, ty) = (tx.clamp(0, max_x), ty.clamp(0, max_y));

        if self.move_to(from, tx, ty) {
            return;
        }

        if tx == x && ty == y && libm::fabsf(gravity.y) > FALL_THRESHOLD {
            let down = if gravity.y > 0.0 { 1 } else { -1 };
            if self.move_to(from, x, y + down) {
                return;
            }
        }

        if libm::fabsf(gravity.y) > SPREAD_THRESHOLD || libm::fabsf(vy) > SPREAD_THRESHOLD {
            let range = if stagnant {
                cfg.stagnant_spread_range
            } else {
                cfg.spread_range
            };
            if !self.spread(from, x, y, range) {
                if let Some(p) = self.grid.particle_at_mut(from) {
                    p.flags.insert(ParticleFlags::STAGNANT);
                    p.vx *= 0.5;
                    p.vy *= 0.5;
                }
            }
        } else if let Some(p) = self.grid.particle_at_mut(from) {
            // Mostly sideways motion against a wall: bleed it off instead of
            // letting the particle bounce in place.
            p.vx *= cfg.collision_loss;
            p.vy *= cfg.collision_loss;
            p.flags.insert(ParticleFlags::STAGNANT);
        }
    }

    /// Move into `(x, y)` if it is inside the grid and empty.
    fn move_to(&mut self, from: usize, x: i32, y: i32) -> bool {
        let Some(to) = self.grid.index(x, y) else {
            return false;
        };
        if !self.grid.try_move(from, to) {
            return false;
        }
        if let Some(p) = self.grid.particle_at_mut(to) {
            p.flags.remove(ParticleFlags::STAGNANT);
        }
        true
    }

    /// Look left and right for an empty cell resting on liquid or the edge.
    fn spread(&mut self, from: usize, x: i32, y: i32, range: usize) -> bool {
        let first = if x & 1 == 1 { 1 } else { -1 };
        let below = y.saturating_add(libm::roundf(self.gravity.y) as i32);
        // Nothing lies further away than the grid is wide.
        let range = i32::try_from(range.min(self.grid.width())).unwrap_or(i32::MAX);

        for distance in 1..=range {
            for side in [first, -first] {
                let cx = x + distance * side;
                if !self.grid.in_bounds(cx, y) || self.grid.get(cx, y) {
                    continue;
                }
                let supported = !self.grid.in_bounds(cx, below) || self.grid.get(cx, below);
                if !supported {
                    continue;
                }
                let Some(to) = self.grid.index(cx, y) else {
                    continue;
                };
                if self.grid.try_move(from, to) {
                    let collision_loss = self.config.collision_loss;
                    if let Some(p) = self.grid.particle_at_mut(to) {
                        p.vx = side as f32 * SPREAD_KICK;
                        p.vy *= collision_loss;
                        p.flags.remove(ParticleFlags::STAGNANT);
                    }
                    return true;
                }
            }
        }
        false
    }
}
