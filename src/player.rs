//! Per-frame driver that switches between the liquid and the animations.
//!
//! The host owns the loop: it reads the latest sensor snapshots, calls
//! [`Player::render`] once per display frame and flushes the [`Frame`].
//! The single user button goes to [`Player::button_pressed`].

use palette::Srgb;

use crate::{
    BOOT_TEXT,
    animation::Animator,
    audio::AudioFeatures,
    error::Result,
    frame::Frame,
    gravity::Tilt,
    liquid::LiquidSim,
};

/// Default water color, kept dim for the current budget.
pub const WATER: Srgb<u8> = Srgb::new(0, 20, 40);

/// Which producer fills the frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum View {
    Liquid,
    #[default]
    Animation,
}

impl View {
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Liquid => Self::Animation,
            Self::Animation => Self::Liquid,
        }
    }
}

/// Owns one liquid sim and one animator for the same matrix.
pub struct Player {
    liquid: LiquidSim,
    animator: Animator,
    view: View,
    water: Srgb<u8>,
}

impl Player {
    /// A player whose liquid spells [`BOOT_TEXT`], starting in the animation view.
    pub fn new(width: usize, height: usize, seed: u64) -> Result<Self> {
        Self::with_liquid(LiquidSim::with_text(width, height, BOOT_TEXT)?, seed)
    }

    /// A player around an already configured liquid sim.
    pub fn with_liquid(liquid: LiquidSim, seed: u64) -> Result<Self> {
        let animator = Animator::new(liquid.width(), liquid.height(), seed)?;
        Ok(Self {
            liquid,
            animator,
            view: View::default(),
            water: WATER,
        })
    }

    #[must_use]
    pub fn with_water_color(mut self, water: Srgb<u8>) -> Self {
        self.water = water;
        self
    }

    #[must_use]
    pub fn with_view(mut self, view: View) -> Self {
        self.view = view;
        self
    }

    pub const fn view(&self) -> View {
        self.view
    }

    pub const fn liquid(&self) -> &LiquidSim {
        &self.liquid
    }

    pub fn liquid_mut(&mut self) -> &mut LiquidSim {
        &mut self.liquid
    }

    pub const fn animator(&self) -> &Animator {
        &self.animator
    }

    pub fn animator_mut(&mut self) -> &mut Animator {
        &mut self.animator
    }

    /// Produce one frame: one liquid step or one animation update.
    pub fn render(&mut self, frame: &mut Frame, tilt: Tilt, audio: &AudioFeatures, dt_ms: u32) {
        match self.view {
            View::Liquid => {
                self.liquid.set_tilt(tilt);
                self.liquid.step();
                self.liquid.render(frame, self.water);
            }
            View::Animation => self.animator.update(frame, tilt, audio, dt_ms),
        }
    }

    /// Switch between the liquid and the animations.
    pub fn toggle_view(&mut self) {
        self.view = self.view.toggled();
        info!("view: {}", self.status());
    }

    /// Next animation mode, or refill the liquid when it is on screen.
    pub fn button_pressed(&mut self) {
        match self.view {
            View::Liquid => self.liquid.reset(),
            View::Animation => self.animator.next_mode(),
        }
    }

    /// One-word description of what is on screen.
    pub fn status(&self) -> &'static str {
        match self.view {
            View::Liquid => "Liquid",
            View::Animation => self.animator.mode_name(),
        }
    }
}
