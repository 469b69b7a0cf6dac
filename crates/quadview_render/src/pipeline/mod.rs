//! GPU presentation of the software-rendered frame

pub mod blit_pipeline;

pub use blit_pipeline::{frame_bytes, BlitPipeline, FRAME_TEXTURE_FORMAT};
