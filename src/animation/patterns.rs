//! Tilt driven patterns and the mounting test card.

use core::f32::consts::PI;

use palette::Srgb;

use crate::{
    animation::Input,
    color::{
        BRIGHTNESS_CAP,
        MARKER,
        hsv,
    },
    frame::Frame,
};

const TEST_RED: Srgb<u8> = Srgb::new(BRIGHTNESS_CAP, 0, 0);
const TEST_GREEN: Srgb<u8> = Srgb::new(0, BRIGHTNESS_CAP, 0);
const TEST_BLUE: Srgb<u8> = Srgb::new(0, 0, BRIGHTNESS_CAP);
const TEST_CYAN: Srgb<u8> = Srgb::new(0, BRIGHTNESS_CAP, BRIGHTNESS_CAP);
const TEST_MAGENTA: Srgb<u8> = Srgb::new(BRIGHTNESS_CAP, 0, BRIGHTNESS_CAP);

/// Tilt range mapped edge to edge by the test card, in degrees either way.
const TEST_TILT_RANGE: f32 = 45.0;

fn column(frame: &mut Frame, x: i32, color: Srgb<u8>) {
    for y in 0..frame.height() as i32 {
        frame.set(x, y, color);
    }
}

/// Markers every five columns, colored edges and center, plus a cyan dot
/// that follows roll along row 2 and a magenta dot that follows pitch up
/// the center column.
///
/// Used to check panel order and sensor orientation after assembly.
pub fn test_pattern(frame: &mut Frame, input: &Input<'_>) {
    frame.clear();
    let (w, h) = (frame.width() as i32, frame.height() as i32);

    for x in (0..w).step_by(5) {
        column(frame, x, MARKER);
    }
    column(frame, 0, TEST_RED);
    column(frame, w - 1, TEST_BLUE);
    column(frame, w / 2, TEST_GREEN);

    let roll = input.tilt.roll.clamp(-TEST_TILT_RANGE, TEST_TILT_RANGE);
    let span = (w - 10).max(0) as f32;
    let x = ((roll + TEST_TILT_RANGE) * span / (2.0 * TEST_TILT_RANGE)) as i32 + 5;
    frame.set(x, 2, TEST_CYAN);

    let pitch = input.tilt.pitch.clamp(-TEST_TILT_RANGE, TEST_TILT_RANGE);
    let y = ((TEST_TILT_RANGE - pitch) * (h - 1) as f32 / (2.0 * TEST_TILT_RANGE)) as i32;
    frame.set(w / 2, y, TEST_MAGENTA);
}

/// Rainbow brightest in the direction the board leans.
pub fn tilt_gradient(frame: &mut Frame, input: &Input<'_>) {
    let (w, h) = (frame.width() as f32, frame.height() as f32);
    let lean = libm::atan2f(input.tilt.pitch, input.tilt.roll);
    let base_hue = ((lean + PI) * 127.65 / PI) as u8;

    for y in 0..frame.height() {
        for x in 0..frame.width() {
            let dx = (x as f32 - w / 2.0) / w * 2.0;
            let dy = (y as f32 - h / 2.0) / h * 2.0;
            let mut diff = libm::fabsf(libm::atan2f(dy, dx) - lean);
            if diff > PI {
                diff = 2.0 * PI - diff;
            }

            let brightness = (255.0 - diff * 80.0) as u8;
            let hue = base_hue.wrapping_add((diff * 30.0) as u8);
            frame.set(x as i32, y as i32, hsv(hue, 255, brightness / 3));
        }
    }
}

/// Spiral rotating a little every frame; bass winds it tighter and tilt
/// pushes its center around.
pub struct Spiral {
    angle: f32,
}

impl Spiral {
    const STEPS: usize = 100;
    const STEP: f32 = 0.2;
    const SPIN: f32 = 0.1;

    pub const fn new() -> Self {
        Self { angle: 0.0 }
    }

    pub fn render(&mut self, frame: &mut Frame, input: &Input<'_>) {
        frame.clear();
        self.angle += Self::SPIN;

        let bass = input.audio.bass;
        let tightness = 0.3 + f32::from(bass) / 255.0 * 0.5;
        let cx = frame.width() as f32 / 2.0 + input.tilt.roll / 90.0 * 10.0;
        let cy = frame.height() as f32 / 2.0 + input.tilt.pitch / 90.0 * 3.0;

        for step in 0..Self::STEPS {
            let t = step as f32 * Self::STEP;
            let angle = t * tightness + self.angle;
            let x = cx + libm::cosf(angle) * t;
            let y = cy + libm::sinf(angle) * t / 1.5;
            let hue = (t * 12.0 + f32::from(bass)) as u32 as u8;
            frame.set(x as i32, y as i32, hsv(hue, 255, 80));
        }
    }
}
