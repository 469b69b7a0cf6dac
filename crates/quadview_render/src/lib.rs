//! Four-view software renderer
//!
//! This crate rasterizes the cup mesh on the CPU into one shared frame buffer split into
//! four viewports, then hands the packed pixels to wgpu for display.
//!
//! ## Key Components
//!
//! - [`framebuffer::FrameBuffer`] - color + depth grid with bounds-checked access
//! - [`raster`] - depth-tested triangle fill and Cohen-Sutherland line clipping
//! - [`lighting::Light`] - flat directional shading
//! - [`view::ViewBuilder`] - the three fixed orthographic views and the user view
//! - [`compositor::Compositor`] - per-frame orchestration and status overlay
//! - [`context::RenderContext`] / [`pipeline::BlitPipeline`] - GPU presentation

pub mod compositor;
pub mod context;
pub mod font;
pub mod framebuffer;
pub mod lighting;
pub mod pipeline;
pub mod raster;
pub mod view;

pub use compositor::{Compositor, CompositorSettings, FrameStats};
pub use font::{BitmapFont, TextRenderer};
pub use framebuffer::{FrameBuffer, FrameSizeError, Pixel, Rect};
pub use lighting::Light;
pub use raster::FillPolicy;
pub use view::{View, ViewBuilder, ViewKind, ViewParams};

// Re-export core types for convenience
pub use quadview_core::{Color, Mesh, MeshParams, MeshVariant, ProjectionMode, RenderMode, RenderState};
