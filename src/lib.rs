//! Quadview - four-view software renderer
//!
//! Library half of the application: configuration, window-level input
//! mapping and the systems the binary drives from the winit event loop.

pub mod config;
pub mod input;
pub mod systems;
