//! Core types for quadview
//!
//! This crate provides the scene content and per-frame state the renderer consumes:
//!
//! - [`Color`] - 8-bit RGB color
//! - [`Triangle`] / [`Mesh`] - flat-shaded triangles of the procedural cup
//! - [`MeshVariant`] / [`MeshParams`] - which cup to build and its dimensions
//! - [`RenderState`] - orientation, zoom, segment count and mode selections
//! - [`InputSnapshot`] - input accumulated between two frames, applied once per frame

mod color;
mod mesh;
mod state;

pub use color::Color;
pub use mesh::{face_normal, Mesh, MeshParams, MeshParamsError, MeshVariant, Triangle, MIN_SEGMENTS};
pub use state::{InputSnapshot, ProjectionMode, RenderMode, RenderState};

// Re-export commonly used types from quadview_math for convenience
pub use quadview_math::{Mat4, Vec3, Vec4};
