//! Linear algebra for the quadview software renderer
//!
//! ## Core Types
//!
//! - [`Vec3`] - object/world-space point or direction
//! - [`Vec4`] - homogeneous result of a matrix transform
//! - [`Mat4`] - 4x4 matrix, row-vector convention (`p' = p * M`)
//!
//! Matrices compose left to right: `a * b` applies `a` first, then `b`.

mod vec3;
mod vec4;
pub mod mat4;

pub use vec3::Vec3;
pub use vec4::Vec4;
pub use mat4::Mat4;
