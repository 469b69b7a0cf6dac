//! Input handling for the four-view viewer
//!
//! This crate turns winit events into the per-frame [`quadview_core::InputSnapshot`].

mod input_controller;

pub use input_controller::InputController;
