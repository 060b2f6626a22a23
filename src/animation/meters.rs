//! Audio level displays: spectrum bars, VU meter, pulse ring and waveform.

use crate::{
    animation::Input,
    audio::BAND_COUNT,
    color::{
        MARKER,
        column_hue,
        hsv,
    },
    frame::Frame,
};

/// Volume samples kept for the waveform, one per column.
pub const WAVEFORM_HISTORY: usize = 40;

/// Milliseconds a peak is held before it starts to fall.
const PEAK_HOLD_MS: u32 = 100;

/// Energy a peak loses per hold period.
const PEAK_DECAY: u8 = 5;

/// Bass below this is treated as silence by the pulse.
const PULSE_FLOOR: u8 = 190;

/// Bass range above the floor stretched over the full pulse scale.
const PULSE_SPAN: u32 = 50;

/// Ring radius at full bass.
const PULSE_MAX_RADIUS: f32 = 20.0;

const BAR_VALUE: u8 = 40;

fn bar_height(energy: u8, height: usize) -> usize {
    usize::from(energy) * height / 255
}

fn draw_bar(frame: &mut Frame, x: usize, bar: usize) {
    let h = frame.height();
    let color = hsv(column_hue(x, frame.width()), 255, BAR_VALUE);
    for y in h.saturating_sub(bar)..h {
        frame.set(x as i32, y as i32, color);
    }
}

/// One band per column, drawn from the bottom up.
pub fn spectrum_bars(frame: &mut Frame, input: &Input<'_>) {
    frame.clear();
    for x in 0..frame.width() {
        let energy = input.audio.band(x);
        let bar = if energy == u8::MAX {
            frame.height()
        } else {
            bar_height(energy, frame.height())
        };
        draw_bar(frame, x, bar);
    }
}

/// Spectrum bars with a falling peak dot per column.
pub struct PeakHold {
    level: [u8; BAND_COUNT],
    held_ms: [u32; BAND_COUNT],
}

impl PeakHold {
    pub const fn new() -> Self {
        Self {
            level: [0; BAND_COUNT],
            held_ms: [0; BAND_COUNT],
        }
    }

    fn track(&mut self, band: usize, energy: u8, dt_ms: u32) -> u8 {
        let (Some(level), Some(held)) = (self.level.get_mut(band), self.held_ms.get_mut(band))
        else {
            return 0;
        };
        if energy > *level {
            *level = energy;
            *held = 0;
        } else {
            *held = held.saturating_add(dt_ms);
            if *held > PEAK_HOLD_MS {
                *held = 0;
                *level = level.saturating_sub(PEAK_DECAY);
            }
        }
        *level
    }

    pub fn render(&mut self, frame: &mut Frame, input: &Input<'_>) {
        frame.clear();
        let h = frame.height();
        for x in 0..frame.width() {
            let energy = input.audio.band(x);
            draw_bar(frame, x, bar_height(energy, h));

            let peak = self.track(x, energy, input.dt_ms);
            let peak_y = h - bar_height(peak, h);
            if peak_y < h {
                frame.set(x as i32, peak_y as i32, MARKER);
            }
        }
    }

    #[cfg(test)]
    fn peak(&self, band: usize) -> u8 {
        self.level[band]
    }
}

/// Bass-driven ring around the center, with a dot on every beat.
pub fn pulse(frame: &mut Frame, input: &Input<'_>) {
    frame.clear();

    let bass = input.audio.bass;
    let remapped = if bass > PULSE_FLOOR {
        (u32::from(bass - PULSE_FLOOR) * 255 / PULSE_SPAN).min(255) as u8
    } else {
        0
    };
    let radius = f32::from(remapped) * PULSE_MAX_RADIUS / 255.0;

    let cx = (frame.width() / 2) as i32;
    let cy = (frame.height() / 2) as i32;
    let ring = hsv(160, 255, remapped);
    for y in 0..frame.height() as i32 {
        for x in 0..frame.width() as i32 {
            let (dx, dy) = ((x - cx) as f32, (y - cy) as f32);
            let dist = libm::sqrtf(dx * dx + dy * dy);
            if dist < radius && dist > radius - 2.0 {
                frame.set(x, y, ring);
            }
        }
    }

    if input.audio.beat {
        for y in cy - 1..=cy + 1 {
            for x in cx - 1..=cx + 1 {
                frame.set(x, y, MARKER);
            }
        }
    }
}

/// Rolling volume history. The newest sample enters at the left edge and
/// the trace scrolls right; hue follows sample age.
pub struct Waveform {
    history: [u8; WAVEFORM_HISTORY],
    next: usize,
}

impl Waveform {
    pub const fn new() -> Self {
        Self {
            history: [0; WAVEFORM_HISTORY],
            next: 0,
        }
    }

    fn push(&mut self, sample: u8) {
        self.history[self.next] = sample;
        self.next = (self.next + 1) % WAVEFORM_HISTORY;
    }

    pub fn render(&mut self, frame: &mut Frame, input: &Input<'_>) {
        frame.clear();
        self.push(input.audio.volume);

        let (w, h) = (frame.width(), frame.height());
        // Offset 0 is the oldest sample and lands in the rightmost column.
        for offset in 0..w.min(WAVEFORM_HISTORY) {
            let sample = self.history[(self.next + offset) % WAVEFORM_HISTORY];
            let y = usize::from(sample) * h / 255;
            if y < h {
                let x = w - 1 - offset;
                frame.set(x as i32, (h - 1 - y) as i32, hsv(column_hue(offset, w), 255, 80));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        audio::AudioFeatures,
        color::BLACK,
        gravity::Tilt,
    };

    fn input(audio: &AudioFeatures, dt_ms: u32) -> Input<'_> {
        Input {
            tilt: Tilt::LEVEL,
            audio,
            dt_ms,
        }
    }

    #[test]
    fn full_band_fills_column() {
        let mut frame = Frame::new(40, 6).unwrap();
        let mut bands = [0; BAND_COUNT];
        bands[3] = 255;
        bands[4] = 128;
        let audio = AudioFeatures::from_bands(bands, false);
        spectrum_bars(&mut frame, &input(&audio, 16));
        assert!((0..6).all(|y| frame.get(3, y) != BLACK));
        assert_eq!((0..6).filter(|&y| frame.get(4, y) != BLACK).count(), 3);
        assert_eq!(frame.get(4, 2), BLACK);
        assert_eq!(frame.get(0, 5), BLACK);
    }

    #[test]
    fn peak_holds_then_decays() {
        let mut frame = Frame::new(40, 6).unwrap();
        let mut peaks = PeakHold::new();
        let mut bands = [0; BAND_COUNT];
        bands[0] = 200;
        peaks.render(&mut frame, &input(&AudioFeatures::from_bands(bands, false), 16));
        assert_eq!(peaks.peak(0), 200);

        let quiet = AudioFeatures::SILENT;
        peaks.render(&mut frame, &input(&quiet, 60));
        assert_eq!(peaks.peak(0), 200);
        peaks.render(&mut frame, &input(&quiet, 60));
        assert_eq!(peaks.peak(0), 195);
        // The dot is still drawn above an empty bar.
        assert_eq!(frame.get(0, 2), MARKER);
    }

    #[test]
    fn pulse_is_dark_below_floor() {
        let mut frame = Frame::new(40, 6).unwrap();
        let mut audio = AudioFeatures::SILENT;
        audio.bass = 150;
        pulse(&mut frame, &input(&audio, 16));
        assert_eq!(frame.lit_count(), 0);

        audio.beat = true;
        pulse(&mut frame, &input(&audio, 16));
        assert_eq!(frame.lit_count(), 9);
        assert_eq!(frame.get(20, 3), MARKER);
    }

    #[test]
    fn pulse_ring_grows_with_bass() {
        let mut frame = Frame::new(40, 6).unwrap();
        let mut audio = AudioFeatures::SILENT;
        audio.bass = 215;
        pulse(&mut frame, &input(&audio, 16));
        assert!(frame.lit_count() > 0);
        assert_eq!(frame.get(20, 3), BLACK);
    }

    #[test]
    fn newest_sample_enters_left_and_scrolls_right() {
        let mut frame = Frame::new(40, 6).unwrap();
        let mut wave = Waveform::new();
        let mut audio = AudioFeatures::SILENT;
        wave.render(&mut frame, &input(&audio, 16));
        audio.volume = 200;
        wave.render(&mut frame, &input(&audio, 16));

        // 200 * 6 / 255 = 4 rows up from the bottom.
        assert_ne!(frame.get(0, 1), BLACK);
        assert_eq!(frame.get(0, 5), BLACK);
        assert_ne!(frame.get(1, 5), BLACK);

        audio.volume = 100;
        wave.render(&mut frame, &input(&audio, 16));
        assert_ne!(frame.get(0, 3), BLACK);
        assert_ne!(frame.get(1, 1), BLACK);
        assert_eq!(frame.get(0, 1), BLACK);
    }
}
