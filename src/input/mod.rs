//! Input handling module
//!
//! Maps window-level keys to application actions.

mod input_mapper;

pub use input_mapper::{InputMapper, InputAction};
