//! Software rasterization into a [`FrameBuffer`](crate::FrameBuffer)
//!
//! Both primitives take the owning viewport rectangle and never write outside it.

mod line;
mod triangle;

pub use line::{clip_line, draw_line, OutCode};
pub use triangle::{fill_triangle, signed_area, FillPolicy, DEGENERATE_AREA};

/// A projected vertex: screen position in pixels plus post-projection depth
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ScreenVertex {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl ScreenVertex {
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }
}
