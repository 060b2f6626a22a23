//! Rings that spread out from the center on every beat.

use crate::{
    animation::Input,
    color::hsv,
    frame::Frame,
    pool::{
        Lifetime,
        Pool,
    },
};

/// Concurrent ripples; a beat on a full pool replaces the oldest.
pub const MAX_RIPPLES: usize = 4;

/// Growth in pixels per second.
const RIPPLE_SPEED: f32 = 8.0;
const RIPPLE_FADE: u8 = 5;
const RING_HALF_WIDTH: f32 = 1.5;

#[derive(Debug, Clone, Copy, Default)]
struct Ripple {
    x: f32,
    y: f32,
    radius: f32,
    intensity: u8,
}

impl Lifetime for Ripple {
    fn is_alive(&self) -> bool {
        self.intensity > 0
    }
}

pub struct Ripples {
    pool: Pool<Ripple, MAX_RIPPLES>,
    was_beat: bool,
}

impl Ripples {
    pub fn new() -> Self {
        Self {
            pool: Pool::new(),
            was_beat: false,
        }
    }

    pub fn live(&self) -> usize {
        self.pool.live_count()
    }

    pub fn render(&mut self, frame: &mut Frame, input: &Input<'_>) {
        frame.clear();

        let beat = input.audio.beat;
        if beat && !self.was_beat {
            self.pool.spawn_evicting(Ripple {
                x: frame.width() as f32 / 2.0,
                y: frame.height() as f32 / 2.0,
                radius: 0.0,
                intensity: u8::MAX,
            });
        }
        self.was_beat = beat;

        let dt = input.dt_secs();
        for ripple in self.pool.iter_mut() {
            ripple.radius += RIPPLE_SPEED * dt;
            if ripple.intensity <= RIPPLE_FADE {
                ripple.intensity = 0;
                continue;
            }
            ripple.intensity -= RIPPLE_FADE;

            let color = hsv((ripple.radius * 10.0) as u32 as u8, 255, ripple.intensity);
            for y in 0..frame.height() {
                for x in 0..frame.width() {
                    let dx = x as f32 - ripple.x;
                    let dy = y as f32 - ripple.y;
                    let dist = libm::sqrtf(dx * dx + dy * dy);
                    if libm::fabsf(dist - ripple.radius) < RING_HALF_WIDTH {
                        frame.set(x as i32, y as i32, color);
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        audio::AudioFeatures,
        gravity::Tilt,
    };

    fn render(ripples: &mut Ripples, frame: &mut Frame, beat: bool) {
        let audio = AudioFeatures {
            beat,
            ..AudioFeatures::SILENT
        };
        ripples.render(
            frame,
            &Input {
                tilt: Tilt::LEVEL,
                audio: &audio,
                dt_ms: 16,
            },
        );
    }

    #[test]
    fn held_beat_spawns_once() {
        let mut frame = Frame::new(40, 6).unwrap();
        let mut ripples = Ripples::new();
        for _ in 0..5 {
            render(&mut ripples, &mut frame, true);
        }
        assert_eq!(ripples.live(), 1);
        assert!(frame.lit_count() > 0);
    }

    #[test]
    fn never_more_than_capacity() {
        let mut frame = Frame::new(40, 6).unwrap();
        let mut ripples = Ripples::new();
        for _ in 0..10 {
            render(&mut ripples, &mut frame, true);
            render(&mut ripples, &mut frame, false);
        }
        assert_eq!(ripples.live(), MAX_RIPPLES);
    }

    #[test]
    fn ripples_fade_out() {
        let mut frame = Frame::new(40, 6).unwrap();
        let mut ripples = Ripples::new();
        render(&mut ripples, &mut frame, true);
        for _ in 0..60 {
            render(&mut ripples, &mut frame, false);
        }
        assert_eq!(ripples.live(), 0);
        assert_eq!(frame.lit_count(), 0);
    }
}
