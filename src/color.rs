//! Capped HSV→RGB conversion and small pixel helpers.
//!
//! The reference matrix is five 8×6 WS2812 panels on a 1.5 A supply. A full
//! white frame would pull several amps, so every animation color goes
//! through [`hsv`], which never emits a channel above [`BRIGHTNESS_CAP`].

use palette::Srgb;

/// Highest value any channel produced by [`hsv`] can reach.
pub const BRIGHTNESS_CAP: u8 = 60;

pub const BLACK: Srgb<u8> = palette::named::BLACK;

/// Dim white used for markers and peak dots.
pub const MARKER: Srgb<u8> = Srgb::new(BRIGHTNESS_CAP, BRIGHTNESS_CAP, BRIGHTNESS_CAP);

/// Integer HSV→RGB with hue, saturation and value on a 0..=255 scale.
///
/// `v` is clamped to [`BRIGHTNESS_CAP`] before conversion.
pub fn hsv(h: u8, s: u8, v: u8) -> Srgb<u8> {
    let v = v.min(BRIGHTNESS_CAP);
    if s == 0 {
        return Srgb::new(v, v, v);
    }

    let region = h / 43;
    let remainder = u16::from(h - region * 43) * 6;

    let (s, v16) = (u16::from(s), u16::from(v));
    let p = ((v16 * (255 - s)) >> 8) as u8;
    let q = ((v16 * (255 - ((s * remainder) >> 8))) >> 8) as u8;
    let t = ((v16 * (255 - ((s * (255 - remainder)) >> 8))) >> 8) as u8;

    match region {
        0 => Srgb::new(v, t, p),
        1 => Srgb::new(q, v, p),
        2 => Srgb::new(p, v, t),
        3 => Srgb::new(p, q, v),
        4 => Srgb::new(t, p, v),
        _ => Srgb::new(v, p, q),
    }
}

/// Hue for column `x` of a `width`-wide rainbow.
pub fn column_hue(x: usize, width: usize) -> u8 {
    if width == 0 {
        return 0;
    }
    (x * 255 / width) as u8
}

/// Scale every channel by `level / 255`.
pub fn scale(color: Srgb<u8>, level: u8) -> Srgb<u8> {
    let f = |c: u8| (u16::from(c) * u16::from(level) / 255) as u8;
    Srgb::new(f(color.red), f(color.green), f(color.blue))
}

/// Subtract `amount` from every channel, stopping at black.
pub fn fade(color: Srgb<u8>, amount: u8) -> Srgb<u8> {
    Srgb::new(
        color.red.saturating_sub(amount),
        color.green.saturating_sub(amount),
        color.blue.saturating_sub(amount),
    )
}
