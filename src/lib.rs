//! # liquid-matrix
//!
//! Rendering core for a chained WS2812 LED matrix driven by an IMU and a
//! microphone feature extractor.
//!
//! Provides two mutually exclusive frame producers writing into the same
//! [`Frame`]:
//! - **Liquid**: a cellular liquid that flows toward whichever edge the
//!   board is tilted to, seeded as a resting pool or as text
//! - **Animations**: eleven audio/tilt reactive modes (spectrum bars, VU
//!   meter, ripples, spiral, ...) behind one [`Animator`]
//!
//! The LED driver, IMU poller and audio pipeline stay outside the crate:
//! they publish [`Tilt`] and [`AudioFeatures`] snapshots (see [`feed`]) and
//! flush the finished [`Frame`].
//!
//! ## Quick start
//!
//! ```rust,ignore
//! let mut frame = liquid_matrix::Frame::new(MATRIX_WIDTH, MATRIX_HEIGHT)?;
//! let mut player = liquid_matrix::Player::new(MATRIX_WIDTH, MATRIX_HEIGHT, 0xC0FFEE)?;
//! let mut clock = liquid_matrix::FrameClock::new();
//!
//! loop {
//!     let dt = clock.tick(embassy_time::Instant::now());
//!     player.render(&mut frame, TILT.get(), &AUDIO.get(), dt);
//!     frame.write_strip(&PanelLayout::REFERENCE, leds.framebuffer_mut());
//!     leds.update().await;
//! }
//! ```

#![no_std]

extern crate alloc;

#[macro_use]
mod fmt;

pub mod animation;
pub mod audio;
pub mod clock;
pub mod color;
mod error;
pub mod feed;
pub mod font;
pub mod frame;
pub mod gravity;
pub mod grid;
pub mod layout;
pub mod liquid;
pub mod player;
pub mod pool;

use alloc::vec::Vec;

pub use animation::{
    Animator,
    Mode,
};
pub use audio::{
    AudioFeatures,
    BAND_COUNT,
};
pub use clock::FrameClock;
pub use error::{
    Error,
    Result,
};
pub use frame::Frame;
pub use gravity::{
    Gravity,
    Tilt,
};
pub use grid::{
    Grid,
    Particle,
    ParticleFlags,
};
pub use layout::PanelLayout;
pub use liquid::{
    LiquidConfig,
    LiquidSim,
};
pub use palette::Srgb;
pub use player::{
    Player,
    View,
};

/// Columns of the reference matrix: five 8-wide panels side by side.
pub const MATRIX_WIDTH: usize = 40;

/// Rows of the reference matrix.
pub const MATRIX_HEIGHT: usize = 6;

/// Text poured into the liquid at boot. Override with `LIQUID_TEXT` at build time.
pub const BOOT_TEXT: &str = match option_env!("LIQUID_TEXT") {
    Some(text) => text,
    None => "HELLO",
};

// ── Allocation helpers ──────────────────────────────────────────────────────

/// `width * height`, rejecting empty and overflowing dimensions.
fn cell_count(width: usize, height: usize) -> Result<usize> {
    if width == 0 || height == 0 {
        return Err(Error::InvalidDimensions);
    }
    width.checked_mul(height).ok_or(Error::OutOfMemory)
}

/// A `len`-long vector of `value`, reporting allocation failure instead of aborting.
fn try_filled<T: Clone>(len: usize, value: T) -> Result<Vec<T>> {
    let mut v = Vec::new();
    if let Err(e) = v.try_reserve_exact(len) {
        error!("failed to allocate {} cells", len);
        return Err(e.into());
    }
    v.resize(len, value);
    Ok(v)
}
