//! Status text drawing
//!
//! The compositor only talks to [`TextRenderer`]; [`BitmapFont`] is the built-in
//! implementation with 3x5 pixel glyphs.

use quadview_core::Color;

use crate::framebuffer::FrameBuffer;

/// Draws a line of text into the frame buffer
pub trait TextRenderer {
    /// Draw `text` with its top-left corner at `(x, y)`
    fn draw_text(&self, fb: &mut FrameBuffer, x: i32, y: i32, text: &str, color: Color);

    /// Horizontal space `text` occupies, in pixels
    fn text_width(&self, text: &str) -> i32;
}

const GLYPH_WIDTH: i32 = 3;
const GLYPH_HEIGHT: i32 = 5;

/// Row-major 3x5 bitmap, most significant of the 15 bits is the top-left pixel
fn glyph(c: char) -> Option<u16> {
    let bits = match c.to_ascii_uppercase() {
        'A' => 0b010_101_111_101_101,
        'B' => 0b110_101_110_101_110,
        'C' => 0b011_100_100_100_011,
        'D' => 0b110_101_101_101_110,
        'E' => 0b111_100_110_100_111,
        'F' => 0b111_100_110_100_100,
        'G' => 0b011_100_101_101_011,
        'H' => 0b101_101_111_101_101,
        'I' => 0b111_010_010_010_111,
        'J' => 0b001_001_001_101_011,
        'K' => 0b101_110_100_110_101,
        'L' => 0b100_100_100_100_111,
        'M' => 0b101_111_101_101_101,
        'N' => 0b110_101_101_101_101,
        'O' => 0b010_101_101_101_010,
        'P' => 0b110_101_110_100_100,
        'Q' => 0b010_101_101_010_011,
        'R' => 0b110_101_110_110_101,
        'S' => 0b011_100_010_001_110,
        'T' => 0b111_010_010_010_010,
        'U' => 0b101_101_101_101_011,
        'V' => 0b101_101_101_101_010,
        'W' => 0b101_101_101_111_101,
        'X' => 0b101_010_010_010_101,
        'Y' => 0b101_101_010_010_010,
        'Z' => 0b111_001_010_100_111,
        '0' => 0b111_101_101_101_111,
        '1' => 0b010_110_010_010_111,
        '2' => 0b111_001_111_100_111,
        '3' => 0b111_001_011_001_111,
        '4' => 0b101_101_111_001_001,
        '5' => 0b111_100_111_001_111,
        '6' => 0b111_100_111_101_111,
        '7' => 0b111_001_010_010_010,
        '8' => 0b111_101_111_101_111,
        '9' => 0b111_101_111_001_111,
        ':' => 0b000_010_000_010_000,
        '/' => 0b001_001_010_100_100,
        '(' => 0b010_100_100_100_010,
        ')' => 0b010_001_001_001_010,
        '+' => 0b000_010_111_010_000,
        '-' => 0b000_000_111_000_000,
        '.' => 0b000_000_000_000_010,
        _ => return None,
    };
    Some(bits)
}

/// Blocky built-in font. Unknown characters (including space) only advance the cursor.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BitmapFont {
    /// Size of one glyph pixel in frame pixels
    pub scale: i32,
    /// Cursor advance per character
    pub advance: i32,
}

impl Default for BitmapFont {
    fn default() -> Self {
        Self { scale: 2, advance: 8 }
    }
}

impl BitmapFont {
    pub fn new(scale: i32, advance: i32) -> Self {
        Self { scale, advance }
    }

    /// Whether `c` has a glyph
    pub fn supports(c: char) -> bool {
        glyph(c).is_some()
    }

    fn draw_glyph(&self, fb: &mut FrameBuffer, x: i32, y: i32, bits: u16, color: Color) {
        for row in 0..GLYPH_HEIGHT {
            for col in 0..GLYPH_WIDTH {
                let bit = GLYPH_WIDTH * GLYPH_HEIGHT - 1 - (row * GLYPH_WIDTH + col);
                if bits & (1 << bit) == 0 {
                    continue;
                }
                for dy in 0..self.scale {
                    for dx in 0..self.scale {
                        fb.set_color(x + col * self.scale + dx, y + row * self.scale + dy, color);
                    }
                }
            }
        }
    }
}

impl TextRenderer for BitmapFont {
    fn draw_text(&self, fb: &mut FrameBuffer, x: i32, y: i32, text: &str, color: Color) {
        let mut cursor = x;
        for c in text.chars() {
            if let Some(bits) = glyph(c) {
                self.draw_glyph(fb, cursor, y, bits, color);
            }
            cursor += self.advance;
        }
    }

    fn text_width(&self, text: &str) -> i32 {
        text.chars().count() as i32 * self.advance
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lit(fb: &FrameBuffer) -> Vec<(i32, i32)> {
        let mut out = Vec::new();
        for y in 0..fb.height() as i32 {
            for x in 0..fb.width() as i32 {
                if fb.color_at(x, y) == Some(Color::WHITE) {
                    out.push((x, y));
                }
            }
        }
        out
    }

    #[test]
    fn test_letter_l_shape() {
        let mut fb = FrameBuffer::new(10, 10).unwrap();
        fb.clear(Color::BLACK);
        BitmapFont::new(1, 4).draw_text(&mut fb, 0, 0, "L", Color::WHITE);
        assert_eq!(lit(&fb), vec![(0, 0), (0, 1), (0, 2), (0, 3), (0, 4), (1, 4), (2, 4)]);
    }

    #[test]
    fn test_scale_doubles_pixels() {
        let mut fb = FrameBuffer::new(10, 12).unwrap();
        fb.clear(Color::BLACK);
        BitmapFont::default().draw_text(&mut fb, 0, 0, "I", Color::WHITE);
        // 'I' has 9 set bits, each a 2x2 block
        assert_eq!(lit(&fb).len(), 9 * 4);
    }

    #[test]
    fn test_lowercase_maps_to_uppercase() {
        let mut a = FrameBuffer::new(10, 10).unwrap();
        let mut b = FrameBuffer::new(10, 10).unwrap();
        a.clear(Color::BLACK);
        b.clear(Color::BLACK);
        let font = BitmapFont::new(1, 4);
        font.draw_text(&mut a, 0, 0, "k", Color::WHITE);
        font.draw_text(&mut b, 0, 0, "K", Color::WHITE);
        assert_eq!(lit(&a), lit(&b));
    }

    #[test]
    fn test_unknown_chars_advance_only() {
        let mut fb = FrameBuffer::new(40, 10).unwrap();
        fb.clear(Color::BLACK);
        let font = BitmapFont::default();
        font.draw_text(&mut fb, 0, 0, " #", Color::WHITE);
        assert!(lit(&fb).is_empty());
        assert_eq!(font.text_width(" #"), 16);
    }

    #[test]
    fn test_status_text_characters_supported() {
        for c in "MOUSE: ROTATE (L) / SEGMENTS (WHEEL) KEYS: +/- FOR ZOOM 0123456789".chars() {
            assert!(c == ' ' || BitmapFont::supports(c), "missing glyph for {:?}", c);
        }
    }

    #[test]
    fn test_clipped_at_buffer_edge() {
        let mut fb = FrameBuffer::new(4, 4).unwrap();
        fb.clear(Color::BLACK);
        BitmapFont::default().draw_text(&mut fb, 2, 2, "W", Color::WHITE);
        assert!(lit(&fb).iter().all(|&(x, y)| x >= 2 && y >= 2));
    }
}
