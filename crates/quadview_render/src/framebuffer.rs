//! Shared color + depth buffer
//!
//! One [`FrameBuffer`] holds all four viewports. Every write goes through a bounds-checked
//! accessor; writes outside the buffer are dropped.

use std::fmt;

use quadview_core::Color;

/// Color and depth of one pixel
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Pixel {
    pub color: Color,
    pub depth: f32,
}

impl Pixel {
    /// Background color at infinite depth
    pub const fn cleared(color: Color) -> Self {
        Self { color, depth: f32::INFINITY }
    }
}

/// Axis-aligned pixel rectangle. `max_x`/`max_y` are inclusive.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self { x, y, width, height }
    }

    #[inline]
    pub fn max_x(&self) -> i32 {
        self.x + self.width - 1
    }

    #[inline]
    pub fn max_y(&self) -> i32 {
        self.y + self.height - 1
    }

    pub fn is_empty(&self) -> bool {
        self.width <= 0 || self.height <= 0
    }

    #[inline]
    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= self.x && x <= self.max_x() && y >= self.y && y <= self.max_y()
    }

    /// Center in continuous screen coordinates
    pub fn center(&self) -> (f32, f32) {
        (
            self.x as f32 + self.width as f32 / 2.0,
            self.y as f32 + self.height as f32 / 2.0,
        )
    }

    /// Overlap of two rectangles; empty rectangles have zero width or height
    pub fn intersect(&self, other: &Rect) -> Rect {
        let x0 = self.x.max(other.x);
        let y0 = self.y.max(other.y);
        let x1 = self.max_x().min(other.max_x());
        let y1 = self.max_y().min(other.max_y());
        Rect::new(x0, y0, (x1 - x0 + 1).max(0), (y1 - y0 + 1).max(0))
    }

    pub fn overlaps(&self, other: &Rect) -> bool {
        !self.intersect(other).is_empty()
    }
}

/// Frame dimensions that cannot hold a single pixel, or a buffer of the wrong length
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FrameSizeError {
    Empty { width: u32, height: u32 },
    Mismatch { expected: usize, actual: usize },
}

impl fmt::Display for FrameSizeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FrameSizeError::Empty { width, height } => {
                write!(f, "Frame size {}x{} has no pixels", width, height)
            }
            FrameSizeError::Mismatch { expected, actual } => {
                write!(f, "Expected {} pixels, got {}", expected, actual)
            }
        }
    }
}

impl std::error::Error for FrameSizeError {}

/// Row-major grid of [`Pixel`]s
#[derive(Clone, Debug)]
pub struct FrameBuffer {
    width: u32,
    height: u32,
    pixels: Vec<Pixel>,
}

impl FrameBuffer {
    pub fn new(width: u32, height: u32) -> Result<Self, FrameSizeError> {
        if width == 0 || height == 0 {
            return Err(FrameSizeError::Empty { width, height });
        }
        Ok(Self {
            width,
            height,
            pixels: vec![Pixel::cleared(Color::BLACK); width as usize * height as usize],
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Whole buffer as a rectangle
    pub fn bounds(&self) -> Rect {
        Rect::new(0, 0, self.width as i32, self.height as i32)
    }

    /// Reallocate for a new size. Contents are reset.
    pub fn resize(&mut self, width: u32, height: u32) -> Result<(), FrameSizeError> {
        if width == 0 || height == 0 {
            return Err(FrameSizeError::Empty { width, height });
        }
        self.width = width;
        self.height = height;
        self.pixels.clear();
        self.pixels.resize(width as usize * height as usize, Pixel::cleared(Color::BLACK));
        Ok(())
    }

    /// Fill with `color` and reset depth to +infinity
    pub fn clear(&mut self, color: Color) {
        self.pixels.fill(Pixel::cleared(color));
    }

    #[inline]
    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return None;
        }
        Some(y as usize * self.width as usize + x as usize)
    }

    pub fn get(&self, x: i32, y: i32) -> Option<&Pixel> {
        self.index(x, y).map(|i| &self.pixels[i])
    }

    pub fn get_mut(&mut self, x: i32, y: i32) -> Option<&mut Pixel> {
        self.index(x, y).map(move |i| &mut self.pixels[i])
    }

    /// Color at a pixel, `None` outside the buffer
    pub fn color_at(&self, x: i32, y: i32) -> Option<Color> {
        self.get(x, y).map(|p| p.color)
    }

    /// Overwrite color without touching depth
    #[inline]
    pub fn set_color(&mut self, x: i32, y: i32, color: Color) {
        if let Some(p) = self.get_mut(x, y) {
            p.color = color;
        }
    }

    /// Depth-tested write: color and depth land together only when `depth` is strictly
    /// nearer than the stored value. Returns whether the pixel was written.
    #[inline]
    pub fn write_if_nearer(&mut self, x: i32, y: i32, depth: f32, color: Color) -> bool {
        match self.get_mut(x, y) {
            Some(p) if depth < p.depth => {
                *p = Pixel { color, depth };
                true
            }
            _ => false,
        }
    }

    pub fn pixels(&self) -> &[Pixel] {
        &self.pixels
    }

    /// Pack every pixel as opaque `0xAARRGGBB` into `out`, row-major
    pub fn to_argb(&self, out: &mut Vec<u32>) {
        out.clear();
        out.extend(self.pixels.iter().map(|p| p.color.to_argb()));
    }
}
