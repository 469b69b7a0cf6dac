//! 8-bit RGB color

use serde::{Deserialize, Serialize};

/// Displayable color, one byte per channel.
///
/// Serialized as an `[r, g, b]` array so config files stay compact.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "[u8; 3]", into = "[u8; 3]")]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const BLACK: Color = Color::new(0, 0, 0);
    pub const WHITE: Color = Color::new(255, 255, 255);
    pub const YELLOW: Color = Color::new(255, 255, 0);
    pub const GREEN: Color = Color::new(0, 255, 0);
    pub const GRAY: Color = Color::new(200, 200, 200);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Multiply every channel by `factor`, truncating and clamping to 0..=255
    pub fn scaled(self, factor: f32) -> Color {
        let channel = |c: u8| (c as f32 * factor).clamp(0.0, 255.0) as u8;
        Color::new(channel(self.r), channel(self.g), channel(self.b))
    }

    /// Pack as opaque `0xAARRGGBB`
    #[inline]
    pub fn to_argb(self) -> u32 {
        0xFF00_0000 | (self.r as u32) << 16 | (self.g as u32) << 8 | self.b as u32
    }
}

impl From<[u8; 3]> for Color {
    fn from(c: [u8; 3]) -> Self {
        Color::new(c[0], c[1], c[2])
    }
}

impl From<Color> for [u8; 3] {
    fn from(c: Color) -> Self {
        [c.r, c.g, c.b]
    }
}
