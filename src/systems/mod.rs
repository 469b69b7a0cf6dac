//! Application systems
//!
//! The pieces main.rs wires into the winit event loop.

mod frame;
mod render;
mod window;

pub use frame::{FrameSummary, FrameSystem};
pub use render::{RenderError, RenderSystem};
pub use window::{WindowError, WindowSystem};
