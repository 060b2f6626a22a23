//! 5×5 bitmap font covering `' '..='Z'`.
//!
//! Each glyph is five rows; bit 4 of a row is the leftmost column. Lowercase
//! letters are drawn as uppercase and anything else outside the table is
//! blank.

/// Glyph edge length in pixels.
pub const GLYPH_SIZE: usize = 5;

/// Pitch used when seeding liquid text: one glyph per 8-pixel panel column.
pub const SEED_PITCH: usize = 8;

/// Pitch used for scrolling banners: 5 px glyph + 1 px gap.
pub const BANNER_PITCH: usize = 6;

pub type Glyph = [u8; GLYPH_SIZE];

const FIRST: char = ' ';
const LAST: char = 'Z';

#[rustfmt::skip]
const GLYPHS: [Glyph; 59] = [
    [0x00, 0x00, 0x00, 0x00, 0x00], // ' '
    [0x04, 0x04, 0x04, 0x00, 0x04], // '!'
    [0x0A, 0x0A, 0x00, 0x00, 0x00], // '"'
    [0x0A, 0x1F, 0x0A, 0x1F, 0x0A], // '#'
    [0x0F, 0x14, 0x0E, 0x05, 0x1E], // '$'
    [0x19, 0x1A, 0x04, 0x0B, 0x13], // '%'
    [0x0C, 0x12, 0x0D, 0x12, 0x0D], // '&'
    [0x04, 0x04, 0x00, 0x00, 0x00], // '\''
    [0x02, 0x04, 0x04, 0x04, 0x02], // '('
    [0x08, 0x04, 0x04, 0x04, 0x08], // ')'
    [0x00, 0x0A, 0x04, 0x0A, 0x00], // '*'
    [0x00, 0x04, 0x0E, 0x04, 0x00], // '+'
    [0x00, 0x00, 0x00, 0x04, 0x08], // ','
    [0x00, 0x00, 0x0E, 0x00, 0x00], // '-'
    [0x00, 0x00, 0x00, 0x00, 0x04], // '.'
    [0x01, 0x02, 0x04, 0x08, 0x10], // '/'
    [0x0E, 0x13, 0x15, 0x19, 0x0E], // '0'
    [0x04, 0x0C, 0x04, 0x04, 0x0E], // '1'
    [0x1E, 0x01, 0x0E, 0x10, 0x1F], // '2'
    [0x1E, 0x01, 0x0E, 0x01, 0x1E], // '3'
    [0x12, 0x12, 0x1F, 0x02, 0x02], // '4'
    [0x1F, 0x10, 0x1E, 0x01, 0x1E], // '5'
    [0x0E, 0x10, 0x1E, 0x11, 0x0E], // '6'
    [0x1F, 0x01, 0x02, 0x04, 0x04], // '7'
    [0x0E, 0x11, 0x0E, 0x11, 0x0E], // '8'
    [0x0E, 0x11, 0x0F, 0x01, 0x0E], // '9'
    [0x00, 0x04, 0x00, 0x04, 0x00], // ':'
    [0x00, 0x04, 0x00, 0x04, 0x08], // ';'
    [0x02, 0x04, 0x08, 0x04, 0x02], // '<'
    [0x00, 0x0E, 0x00, 0x0E, 0x00], // '='
    [0x08, 0x04, 0x02, 0x04, 0x08], // '>'
    [0x0E, 0x01, 0x06, 0x00, 0x04], // '?'
    [0x0E, 0x17, 0x17, 0x10, 0x0E], // '@'
    [0x0E, 0x11, 0x1F, 0x11, 0x11], // 'A'
    [0x1E, 0x11, 0x1E, 0x11, 0x1E], // 'B'
    [0x0F, 0x10, 0x10, 0x10, 0x0F], // 'C'
    [0x1E, 0x11, 0x11, 0x11, 0x1E], // 'D'
    [0x1F, 0x10, 0x1E, 0x10, 0x1F], // 'E'
    [0x1F, 0x10, 0x1E, 0x10, 0x10], // 'F'
    [0x0F, 0x10, 0x13, 0x11, 0x0F], // 'G'
    [0x11, 0x11, 0x1F, 0x11, 0x11], // 'H'
    [0x0E, 0x04, 0x04, 0x04, 0x0E], // 'I'
    [0x07, 0x02, 0x02, 0x12, 0x0C], // 'J'
    [0x11, 0x12, 0x1C, 0x12, 0x11], // 'K'
    [0x10, 0x10, 0x10, 0x10, 0x1F], // 'L'
    [0x11, 0x1B, 0x15, 0x11, 0x11], // 'M'
    [0x11, 0x19, 0x15, 0x13, 0x11], // 'N'
    [0x0E, 0x11, 0x11, 0x11, 0x0E], // 'O'
    [0x1E, 0x11, 0x1E, 0x10, 0x10], // 'P'
    [0x0E, 0x11, 0x15, 0x12, 0x0D], // 'Q'
    [0x1E, 0x11, 0x1E, 0x12, 0x11], // 'R'
    [0x0F, 0x10, 0x0E, 0x01, 0x1E], // 'S'
    [0x1F, 0x04, 0x04, 0x04, 0x04], // 'T'
    [0x11, 0x11, 0x11, 0x11, 0x0E], // 'U'
    [0x11, 0x11, 0x11, 0x0A, 0x04], // 'V'
    [0x11, 0x11, 0x15, 0x1B, 0x11], // 'W'
    [0x11, 0x0A, 0x04, 0x0A, 0x11], // 'X'
    [0x11, 0x0A, 0x04, 0x04, 0x04], // 'Y'
    [0x1F, 0x02, 0x04, 0x08, 0x1F], // 'Z'
];

/// Glyph for `c`, blank when the font has no shape for it.
pub fn glyph(c: char) -> Glyph {
    let c = c.to_ascii_uppercase();
    if !(FIRST..=LAST).contains(&c) {
        return GLYPHS[0];
    }
    GLYPHS
        .get(c as usize - FIRST as usize)
        .copied()
        .unwrap_or(GLYPHS[0])
}

/// Lit `(col, row)` positions of `c`, row-major.
pub fn lit_pixels(c: char) -> impl Iterator<Item = (usize, usize)> {
    let rows = glyph(c);
    (0..GLYPH_SIZE).flat_map(move |row| {
        (0..GLYPH_SIZE)
            .filter(move |&col| rows[row] & (1 << (GLYPH_SIZE - 1 - col)) != 0)
            .map(move |col| (col, row))
    })
}

/// Width in pixels of `text` drawn at `pitch`, without the trailing gap.
pub fn text_width(text: &str, pitch: usize) -> usize {
    match text.chars().count() {
        0 => 0,
        n => (n - 1) * pitch + GLYPH_SIZE,
    }
}
