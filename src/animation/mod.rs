//! Audio and tilt reactive animation modes.
//!
//! One [`Animator`] owns the active [`Mode`] and that mode's private state.
//! Changing mode throws the old state away and builds a fresh one, so
//! particles, ripples and timers never carry over between modes.

mod meters;
mod motion;
mod patterns;
mod ripple;

use rand::{
    SeedableRng as _,
    rngs::SmallRng,
};

use crate::{
    audio::AudioFeatures,
    error::{
        Error,
        Result,
    },
    frame::Frame,
    gravity::Tilt,
};

pub use motion::MAX_PARTICLES;
pub use ripple::MAX_RIPPLES;
pub use meters::WAVEFORM_HISTORY;

/// Selectable renderers, in button-cycling order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum Mode {
    /// Column markers plus dots tracking roll and pitch, for mounting checks.
    #[default]
    TestPattern,
    VuMeter,
    SpectrumBars,
    Pulse,
    Waveform,
    GravityParticles,
    TiltGradient,
    ShakeBurst,
    AudioRain,
    BassRipple,
    ReactiveSpiral,
}

impl Mode {
    pub const ALL: [Self; 11] = [
        Self::TestPattern,
        Self::VuMeter,
        Self::SpectrumBars,
        Self::Pulse,
        Self::Waveform,
        Self::GravityParticles,
        Self::TiltGradient,
        Self::ShakeBurst,
        Self::AudioRain,
        Self::BassRipple,
        Self::ReactiveSpiral,
    ];

    pub const COUNT: usize = Self::ALL.len();

    /// Short name for the on-device status line.
    pub const fn name(self) -> &'static str {
        match self {
            Self::TestPattern => "Test Mode",
            Self::VuMeter => "VU Meter",
            Self::SpectrumBars => "Spectrum Bars",
            Self::Pulse => "Pulse",
            Self::Waveform => "Waveform",
            Self::GravityParticles => "Gravity",
            Self::TiltGradient => "Tilt Gradient",
            Self::ShakeBurst => "Shake Burst",
            Self::AudioRain => "Audio Rain",
            Self::BassRipple => "Bass Ripple",
            Self::ReactiveSpiral => "Spiral",
        }
    }

    pub const fn index(self) -> u8 {
        self as u8
    }

    /// The following mode, wrapping after the last one.
    #[must_use]
    pub const fn next(self) -> Self {
        Self::ALL[(self as usize + 1) % Self::COUNT]
    }
}

impl TryFrom<u8> for Mode {
    type Error = Error;

    fn try_from(value: u8) -> Result<Self> {
        Self::ALL
            .get(usize::from(value))
            .copied()
            .ok_or(Error::InvalidMode(value))
    }
}

/// Everything a renderer may read for one frame.
pub(crate) struct Input<'a> {
    pub tilt: Tilt,
    pub audio: &'a AudioFeatures,
    pub dt_ms: u32,
}

impl Input<'_> {
    pub fn dt_secs(&self) -> f32 {
        self.dt_ms as f32 / 1000.0
    }
}

/// Private state of the active mode.
enum ModeState {
    TestPattern,
    VuMeter(meters::PeakHold),
    SpectrumBars,
    Pulse,
    Waveform(meters::Waveform),
    GravityParticles(motion::GravityField),
    TiltGradient,
    ShakeBurst(motion::ShakeBurst),
    AudioRain(motion::Rain),
    BassRipple(ripple::Ripples),
    ReactiveSpiral(patterns::Spiral),
}

impl ModeState {
    fn fresh(mode: Mode) -> Self {
        match mode {
            Mode::TestPattern => Self::TestPattern,
            Mode::VuMeter => Self::VuMeter(meters::PeakHold::new()),
            Mode::SpectrumBars => Self::SpectrumBars,
            Mode::Pulse => Self::Pulse,
            Mode::Waveform => Self::Waveform(meters::Waveform::new()),
            Mode::GravityParticles => Self::GravityParticles(motion::GravityField::new()),
            Mode::TiltGradient => Self::TiltGradient,
            Mode::ShakeBurst => Self::ShakeBurst(motion::ShakeBurst::new()),
            Mode::AudioRain => Self::AudioRain(motion::Rain::new()),
            Mode::BassRipple => Self::BassRipple(ripple::Ripples::new()),
            Mode::ReactiveSpiral => Self::ReactiveSpiral(patterns::Spiral::new()),
        }
    }
}

/// Mode-switchable renderer for the whole matrix.
pub struct Animator {
    width: usize,
    height: usize,
    mode: Mode,
    state: ModeState,
    rng: SmallRng,
}

impl Animator {
    /// An animator for a `width × height` frame, starting in [`Mode::TestPattern`].
    ///
    /// `seed` drives particle placement; a fixed seed replays identically.
    pub fn new(width: usize, height: usize, seed: u64) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimensions);
        }
        Ok(Self {
            width,
            height,
            mode: Mode::default(),
            state: ModeState::fresh(Mode::default()),
            rng: SmallRng::seed_from_u64(seed),
        })
    }

    pub const fn mode(&self) -> Mode {
        self.mode
    }

    pub const fn mode_name(&self) -> &'static str {
        self.mode.name()
    }

    /// Switch to `mode`, discarding all state of the previous one.
    pub fn set_mode(&mut self, mode: Mode) {
        self.mode = mode;
        self.state = ModeState::fresh(mode);
        info!("animation mode: {}", mode.name());
    }

    /// Switch by enumerator value, as sent by a remote control.
    pub fn set_mode_index(&mut self, index: u8) -> Result<()> {
        let mode = Mode::try_from(index).inspect_err(|_| {
            warn!("ignoring unknown animation mode {}", index);
        })?;
        self.set_mode(mode);
        Ok(())
    }

    /// Cycle to the following mode.
    pub fn next_mode(&mut self) {
        self.set_mode(self.mode.next());
    }

    /// Particles, drops and ripples alive in the current mode.
    pub fn live_particles(&self) -> usize {
        match &self.state {
            ModeState::GravityParticles(field) => field.live(),
            ModeState::ShakeBurst(burst) => burst.live(),
            ModeState::AudioRain(rain) => rain.live(),
            ModeState::BassRipple(ripples) => ripples.live(),
            _ => 0,
        }
    }

    /// Render one frame of the current mode into `frame`.
    ///
    /// `dt_ms` is the time since the previous call. Every mode but
    /// [`Mode::AudioRain`] redraws the frame from scratch; the rain fades
    /// what is already there to leave trails.
    pub fn update(&mut self, frame: &mut Frame, tilt: Tilt, audio: &AudioFeatures, dt_ms: u32) {
        if frame.width() != self.width || frame.height() != self.height {
            warn!(
                "frame is {}x{}, animator expects {}x{}",
                frame.width(),
                frame.height(),
                self.width,
                self.height
            );
        }

        let input = Input { tilt, audio, dt_ms };
        let rng = &mut self.rng;
        match &mut self.state {
            ModeState::TestPattern => patterns::test_pattern(frame, &input),
            ModeState::VuMeter(peaks) => peaks.render(frame, &input),
            ModeState::SpectrumBars => meters::spectrum_bars(frame, &input),
            ModeState::Pulse => meters::pulse(frame, &input),
            ModeState::Waveform(wave) => wave.render(frame, &input),
            ModeState::GravityParticles(field) => field.render(frame, &input, rng),
            ModeState::TiltGradient => patterns::tilt_gradient(frame, &input),
            ModeState::ShakeBurst(burst) => burst.render(frame, &input, rng),
            ModeState::AudioRain(rain) => rain.render(frame, &input, rng),
            ModeState::BassRipple(ripples) => ripples.render(frame, &input),
            ModeState::ReactiveSpiral(spiral) => spiral.render(frame, &input),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn next_wraps() {
        assert_eq!(Mode::TestPattern.next(), Mode::VuMeter);
        assert_eq!(Mode::ReactiveSpiral.next(), Mode::TestPattern);
    }

    #[test]
    fn index_round_trips_through_try_from() {
        for mode in Mode::ALL {
            assert_eq!(Mode::try_from(mode.index()), Ok(mode));
        }
        assert_eq!(Mode::try_from(11), Err(Error::InvalidMode(11)));
    }
}
