// Animation mode engine tests
// Mode switching, state isolation and the brightness cap

use liquid_matrix::{
    Animator,
    AudioFeatures,
    BAND_COUNT,
    Error,
    Frame,
    MATRIX_HEIGHT,
    MATRIX_WIDTH,
    Mode,
    Tilt,
    animation::{
        MAX_PARTICLES,
        MAX_RIPPLES,
    },
    color::BRIGHTNESS_CAP,
};

fn setup() -> (Animator, Frame) {
    (
        Animator::new(MATRIX_WIDTH, MATRIX_HEIGHT, 7).unwrap(),
        Frame::new(MATRIX_WIDTH, MATRIX_HEIGHT).unwrap(),
    )
}

/// Loud, beat-heavy audio with a rising spectrum.
fn loud(beat: bool) -> AudioFeatures {
    let mut bands = [0u8; BAND_COUNT];
    for (i, band) in bands.iter_mut().enumerate() {
        *band = 120 + (i * 3) as u8;
    }
    let mut audio = AudioFeatures::from_bands(bands, beat);
    audio.bass = 230;
    audio
}

#[test]
fn test_starts_in_test_pattern() {
    let (animator, _) = setup();
    assert_eq!(animator.mode(), Mode::TestPattern);
    assert_eq!(animator.mode_name(), "Test Mode");
    assert_eq!(animator.live_particles(), 0);
}

#[test]
fn test_next_mode_visits_every_mode_once() {
    let (mut animator, _) = setup();
    let mut seen = Vec::new();
    for _ in 0..Mode::COUNT {
        seen.push(animator.mode());
        animator.next_mode();
    }
    assert_eq!(seen, Mode::ALL);
    assert_eq!(animator.mode(), Mode::TestPattern, "Cycle should wrap");
}

#[test]
fn test_set_mode_by_index() {
    let (mut animator, _) = setup();
    animator.set_mode_index(9).unwrap();
    assert_eq!(animator.mode(), Mode::BassRipple);
    assert_eq!(animator.set_mode_index(42), Err(Error::InvalidMode(42)));
    assert_eq!(animator.mode(), Mode::BassRipple, "Bad index leaves the mode alone");
}

#[test]
fn test_zero_sized_animator_rejected() {
    assert!(matches!(Animator::new(0, 6, 1), Err(Error::InvalidDimensions)));
}

/// Particles from one mode never show up in another, nor on re-entry.
#[test]
fn test_mode_switch_discards_particles() {
    let (mut animator, mut frame) = setup();
    animator.set_mode(Mode::GravityParticles);
    for _ in 0..10 {
        animator.update(&mut frame, Tilt::LEVEL, &AudioFeatures::SILENT, 150);
    }
    assert_eq!(animator.live_particles(), 10);

    animator.set_mode(Mode::BassRipple);
    assert_eq!(animator.live_particles(), 0);
    animator.update(&mut frame, Tilt::LEVEL, &loud(true), 16);
    assert_eq!(animator.live_particles(), 1);

    animator.set_mode(Mode::GravityParticles);
    assert_eq!(animator.live_particles(), 0);
    animator.set_mode(Mode::BassRipple);
    assert_eq!(animator.live_particles(), 0);
}

#[test]
fn test_ripples_capped_with_oldest_dropped() {
    let (mut animator, mut frame) = setup();
    animator.set_mode(Mode::BassRipple);
    for i in 0..20 {
        animator.update(&mut frame, Tilt::LEVEL, &loud(i % 2 == 0), 16);
        assert!(animator.live_particles() <= MAX_RIPPLES);
    }
    assert_eq!(animator.live_particles(), MAX_RIPPLES);
}

#[test]
fn test_shake_burst_expires() {
    let (mut animator, mut frame) = setup();
    animator.set_mode(Mode::ShakeBurst);
    animator.update(&mut frame, Tilt::LEVEL, &AudioFeatures::SILENT, 16);
    assert_eq!(animator.live_particles(), 0);

    animator.update(&mut frame, Tilt::new(40.0, 0.0), &AudioFeatures::SILENT, 16);
    assert_eq!(animator.live_particles(), MAX_PARTICLES);
    assert!(frame.lit_count() > 0);

    // Hold still for just over two seconds.
    for _ in 0..21 {
        animator.update(&mut frame, Tilt::new(40.0, 0.0), &AudioFeatures::SILENT, 100);
    }
    assert_eq!(animator.live_particles(), 0);
    assert_eq!(frame.lit_count(), 0);
}

/// Small tilt changes are not a shake.
#[test]
fn test_gentle_tilt_does_not_burst() {
    let (mut animator, mut frame) = setup();
    animator.set_mode(Mode::ShakeBurst);
    for i in 0..50 {
        let tilt = Tilt::new(i as f32, -(i as f32) / 2.0);
        animator.update(&mut frame, tilt, &AudioFeatures::SILENT, 16);
    }
    assert_eq!(animator.live_particles(), 0);
}

/// No mode may push a channel above the current budget.
#[test]
fn test_every_mode_respects_brightness_cap() {
    for mode in Mode::ALL {
        let (mut animator, mut frame) = setup();
        animator.set_mode(mode);
        for i in 0..60 {
            let tilt = if i % 2 == 0 {
                Tilt::new(50.0, -30.0)
            } else {
                Tilt::new(-40.0, 30.0)
            };
            animator.update(&mut frame, tilt, &loud(i % 3 == 0), 33);
            for px in frame.pixels() {
                assert!(
                    px.red <= BRIGHTNESS_CAP && px.green <= BRIGHTNESS_CAP && px.blue <= BRIGHTNESS_CAP,
                    "{} drew {:?}",
                    mode.name(),
                    px
                );
            }
        }
    }
}

/// Every mode except the silent-audio ones draws something.
#[test]
fn test_loud_audio_lights_audio_modes() {
    for mode in [
        Mode::VuMeter,
        Mode::SpectrumBars,
        Mode::Pulse,
        Mode::Waveform,
        Mode::AudioRain,
        Mode::BassRipple,
        Mode::ReactiveSpiral,
    ] {
        let (mut animator, mut frame) = setup();
        animator.set_mode(mode);
        for i in 0..30 {
            animator.update(&mut frame, Tilt::LEVEL, &loud(i % 4 == 0), 16);
        }
        assert!(frame.lit_count() > 0, "{} stayed dark", mode.name());
    }
}

#[test]
fn test_same_seed_same_frames() {
    let (mut a, mut frame_a) = setup();
    let (mut b, mut frame_b) = setup();
    for animator in [&mut a, &mut b] {
        animator.set_mode(Mode::GravityParticles);
    }
    for i in 0..40 {
        let tilt = Tilt::new((i * 3) as f32 - 60.0, 20.0);
        a.update(&mut frame_a, tilt, &AudioFeatures::SILENT, 120);
        b.update(&mut frame_b, tilt, &AudioFeatures::SILENT, 120);
        assert_eq!(frame_a.pixels(), frame_b.pixels());
    }
}

/// A frame of the wrong size is drawn into as far as it goes.
#[test]
fn test_mismatched_frame_does_not_panic() {
    let (mut animator, _) = setup();
    let mut small = Frame::new(7, 3).unwrap();
    for mode in Mode::ALL {
        animator.set_mode(mode);
        for i in 0..10 {
            animator.update(&mut small, Tilt::new(30.0 * i as f32, 0.0), &loud(true), 200);
        }
    }
}
