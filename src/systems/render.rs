//! Rendering system
//!
//! Owns everything needed to turn a [`RenderState`] into pixels on screen:
//! - Render context and surface
//! - Software compositor producing the packed frame
//! - Blit pipeline presenting that frame

use std::sync::Arc;
use winit::window::Window;
use quadview_core::RenderState;
use quadview_render::{
    context::{ContextError, RenderContext},
    pipeline::BlitPipeline,
    Compositor, CompositorSettings, FrameSizeError, FrameStats,
};

/// Render error types
#[derive(Debug)]
pub enum RenderError {
    /// GPU setup failed
    Context(ContextError),
    /// Frame buffer could not be sized to the surface
    Frame(FrameSizeError),
    /// Surface was lost (window resized, minimized, etc.)
    SurfaceLost,
    /// GPU out of memory
    OutOfMemory,
    /// Other surface error
    Other(String),
}

impl std::fmt::Display for RenderError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RenderError::Context(e) => write!(f, "GPU setup failed: {}", e),
            RenderError::Frame(e) => write!(f, "Frame error: {}", e),
            RenderError::SurfaceLost => write!(f, "Surface lost"),
            RenderError::OutOfMemory => write!(f, "Out of memory"),
            RenderError::Other(msg) => write!(f, "Render error: {}", msg),
        }
    }
}

impl std::error::Error for RenderError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RenderError::Context(e) => Some(e),
            RenderError::Frame(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ContextError> for RenderError {
    fn from(e: ContextError) -> Self {
        RenderError::Context(e)
    }
}

impl From<FrameSizeError> for RenderError {
    fn from(e: FrameSizeError) -> Self {
        RenderError::Frame(e)
    }
}

/// Renders frames on the CPU and presents them through wgpu
pub struct RenderSystem {
    context: RenderContext,
    blit: BlitPipeline,
    compositor: Compositor,
}

impl RenderSystem {
    /// Create render system for `window`
    pub fn new(
        window: Arc<Window>,
        settings: CompositorSettings,
        vsync: bool,
    ) -> Result<Self, RenderError> {
        let context = pollster::block_on(RenderContext::with_vsync(window, vsync))?;
        let blit = BlitPipeline::new(&context.device, context.config.format);

        let size = context.size;
        let compositor = Compositor::new(size.width.max(1), size.height.max(1), settings)?;

        Ok(Self {
            context,
            blit,
            compositor,
        })
    }

    /// Handle window resize; zero-sized (minimized) windows keep the old frame
    pub fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        self.context
            .resize(winit::dpi::PhysicalSize::new(width, height));
        if let Err(e) = self.compositor.resize(width, height) {
            log::warn!("Failed to resize frame buffer: {}", e);
        }
    }

    /// Reconfigure the surface after it was lost or outdated
    pub fn recover_surface(&mut self) {
        self.context.reconfigure();
    }

    /// Render and present a single frame
    pub fn render_frame(&mut self, state: &RenderState) -> Result<FrameStats, RenderError> {
        let (width, height) = (self.compositor.width(), self.compositor.height());
        let pixels = self.compositor.render_frame(state);
        self.blit
            .upload(&self.context.device, &self.context.queue, pixels, width, height)?;

        // Get surface texture
        let output = match self.context.surface.get_current_texture() {
            Ok(output) => output,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                return Err(RenderError::SurfaceLost)
            }
            Err(wgpu::SurfaceError::OutOfMemory) => return Err(RenderError::OutOfMemory),
            Err(e) => return Err(RenderError::Other(format!("{:?}", e))),
        };

        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self
            .context
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Blit Encoder"),
            });

        self.blit.render(&mut encoder, &view);

        self.context.queue.submit(std::iter::once(encoder.finish()));
        output.present();

        Ok(self.compositor.stats())
    }

    /// Get current surface size
    pub fn size(&self) -> (u32, u32) {
        (self.context.size.width, self.context.size.height)
    }
}
