//! Per-frame orchestration across the four viewports
//!
//! Each call to [`Compositor::render_frame`]:
//! 1. regenerates the mesh from the state's segment count
//! 2. clears color to the background and depth to +infinity
//! 3. builds the four views
//! 4. projects, shades and rasterizes every triangle into every view
//! 5. draws the quadrant separators and the status text
//! 6. packs the result into `0xAARRGGBB` pixels for presentation

use quadview_core::{Color, Mesh, MeshParams, RenderState};

use crate::font::{BitmapFont, TextRenderer};
use crate::framebuffer::{FrameBuffer, FrameSizeError};
use crate::lighting::Light;
use crate::raster::{draw_line, fill_triangle, FillPolicy, ScreenVertex};
use crate::view::{View, ViewBuilder, ViewParams};

/// Everything that stays fixed between frames
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CompositorSettings {
    pub background: Color,
    pub line_color: Color,
    pub separator_color: Color,
    pub title_color: Color,
    pub hint_color: Color,
    pub fill_policy: FillPolicy,
    /// Fragments with |z| at or beyond this are discarded
    pub depth_limit: f32,
    pub show_status: bool,
    pub mesh: MeshParams,
    pub view: ViewParams,
    pub light: Light,
}

impl Default for CompositorSettings {
    fn default() -> Self {
        Self {
            background: Color::new(40, 40, 40),
            line_color: Color::WHITE,
            separator_color: Color::YELLOW,
            title_color: Color::GREEN,
            hint_color: Color::GRAY,
            fill_policy: FillPolicy::NoCull,
            depth_limit: 500.0,
            show_status: true,
            mesh: MeshParams::default(),
            view: ViewParams::default(),
            light: Light::default(),
        }
    }
}

/// Counters for the most recent frame
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FrameStats {
    pub triangles: usize,
    pub pixels_filled: usize,
    pub line_pixels: usize,
}

const STATUS_HINTS: [&str; 2] = ["MOUSE: ROTATE (L) / SEGMENTS (WHEEL)", "KEYS: +/- FOR ZOOM"];

/// Renders [`RenderState`]s into a shared frame buffer
pub struct Compositor<T: TextRenderer = BitmapFont> {
    settings: CompositorSettings,
    views: ViewBuilder,
    framebuffer: FrameBuffer,
    packed: Vec<u32>,
    text: T,
    stats: FrameStats,
}

impl Compositor<BitmapFont> {
    pub fn new(width: u32, height: u32, settings: CompositorSettings) -> Result<Self, FrameSizeError> {
        Self::with_text_renderer(width, height, settings, BitmapFont::default())
    }
}

impl<T: TextRenderer> Compositor<T> {
    pub fn with_text_renderer(
        width: u32,
        height: u32,
        settings: CompositorSettings,
        text: T,
    ) -> Result<Self, FrameSizeError> {
        let framebuffer = FrameBuffer::new(width, height)?;
        log::debug!(
            "Compositor {}x{}, fill policy {:?}, mesh {:?}",
            width,
            height,
            settings.fill_policy,
            settings.mesh.variant
        );
        Ok(Self {
            views: ViewBuilder::new(settings.view),
            settings,
            framebuffer,
            packed: Vec::with_capacity(width as usize * height as usize),
            text,
            stats: FrameStats::default(),
        })
    }

    pub fn settings(&self) -> &CompositorSettings {
        &self.settings
    }

    pub fn framebuffer(&self) -> &FrameBuffer {
        &self.framebuffer
    }

    pub fn width(&self) -> u32 {
        self.framebuffer.width()
    }

    pub fn height(&self) -> u32 {
        self.framebuffer.height()
    }

    pub fn stats(&self) -> FrameStats {
        self.stats
    }

    /// Change the output size. Takes effect on the next frame.
    pub fn resize(&mut self, width: u32, height: u32) -> Result<(), FrameSizeError> {
        self.framebuffer.resize(width, height)
    }

    /// Render one frame and return it packed as row-major `0xAARRGGBB`
    pub fn render_frame(&mut self, state: &RenderState) -> &[u32] {
        let mesh = Mesh::generate(state.segments(), &self.settings.mesh);
        self.framebuffer.clear(self.settings.background);
        self.stats = FrameStats::default();

        let views = self
            .views
            .build(state, self.framebuffer.width(), self.framebuffer.height());
        for view in &views {
            self.render_view(view, &mesh, state);
        }

        self.draw_separators();
        if self.settings.show_status {
            self.draw_status(state, &views[3]);
        }

        self.framebuffer.to_argb(&mut self.packed);
        &self.packed
    }

    fn render_view(&mut self, view: &View, mesh: &Mesh, state: &RenderState) {
        let s = &self.settings;
        let fills = state.render_mode.fills();
        let outlines = state.render_mode.outlines();

        for tri in mesh.triangles() {
            let [a, b, c] = tri.vertices.map(|v| view.project(v));

            if fills {
                let color = s.light.shade(tri.color, view.lighting_normal(tri.normal));
                self.stats.pixels_filled += fill_triangle(
                    &mut self.framebuffer,
                    view.rect,
                    [a, b, c],
                    color,
                    s.fill_policy,
                    s.depth_limit,
                );
            }

            if outlines {
                for (p, q) in [(a, b), (b, c), (c, a)] {
                    self.stats.line_pixels +=
                        draw_line(&mut self.framebuffer, view.rect, xy(p), xy(q), s.line_color);
                }
            }
        }
        self.stats.triangles += mesh.len();
    }

    fn draw_separators(&mut self) {
        let bounds = self.framebuffer.bounds();
        let (w, h) = (bounds.width as f32, bounds.height as f32);
        let (mid_x, mid_y) = ((bounds.width / 2) as f32, (bounds.height / 2) as f32);
        let color = self.settings.separator_color;
        draw_line(&mut self.framebuffer, bounds, (0.0, mid_y), (w - 1.0, mid_y), color);
        draw_line(&mut self.framebuffer, bounds, (mid_x, 0.0), (mid_x, h - 1.0), color);
    }

    fn draw_status(&mut self, state: &RenderState, user: &View) {
        let (x, y) = (user.rect.x + 20, user.rect.y + 20);
        let s = &self.settings;
        self.text
            .draw_text(&mut self.framebuffer, x, y, state.projection.name(), s.title_color);
        for (i, hint) in STATUS_HINTS.iter().enumerate() {
            let line_y = y + 20 * (i as i32 + 1);
            self.text.draw_text(&mut self.framebuffer, x, line_y, hint, s.hint_color);
        }
    }
}

#[inline]
fn xy(v: ScreenVertex) -> (f32, f32) {
    (v.x, v.y)
}

#[cfg(test)]
mod tests {
    use super::*;
    use quadview_core::{ProjectionMode, RenderMode};

    fn compositor() -> Compositor {
        Compositor::new(200, 160, CompositorSettings::default()).unwrap()
    }

    #[test]
    fn test_zero_size_rejected() {
        assert!(Compositor::new(0, 100, CompositorSettings::default()).is_err());
    }

    #[test]
    fn test_packed_has_one_entry_per_pixel() {
        let mut c = compositor();
        let packed = c.render_frame(&RenderState::default());
        assert_eq!(packed.len(), 200 * 160);
        assert!(packed.iter().all(|p| p >> 24 == 0xFF));
    }

    #[test]
    fn test_separators_drawn() {
        let mut c = compositor();
        c.render_frame(&RenderState::default());
        let fb = c.framebuffer();
        assert_eq!(fb.color_at(0, 80), Some(Color::YELLOW));
        assert_eq!(fb.color_at(199, 80), Some(Color::YELLOW));
        assert_eq!(fb.color_at(100, 0), Some(Color::YELLOW));
        assert_eq!(fb.color_at(100, 159), Some(Color::YELLOW));
    }

    #[test]
    fn test_stats_count_every_view() {
        let mut c = compositor();
        let state = RenderState::default().with_segments(10);
        c.render_frame(&state);
        assert_eq!(c.stats().triangles, 4 * 8 * 10);
        assert!(c.stats().pixels_filled > 0);
        assert!(c.stats().line_pixels > 0);
    }

    #[test]
    fn test_wireframe_fills_nothing_solid_draws_no_lines() {
        let mut c = compositor();
        c.render_frame(&RenderState::default().with_render_mode(RenderMode::Wireframe));
        assert_eq!(c.stats().pixels_filled, 0);

        c.render_frame(&RenderState::default().with_render_mode(RenderMode::Solid));
        assert_eq!(c.stats().line_pixels, 0);
    }

    #[test]
    fn test_status_text_can_be_disabled() {
        let settings = CompositorSettings { show_status: false, ..Default::default() };
        let mut c = Compositor::new(400, 400, settings).unwrap();
        c.render_frame(&RenderState::default().with_projection(ProjectionMode::Isometric));
        let fb = c.framebuffer();
        let green = (200..400)
            .flat_map(|y| (200..400).map(move |x| (x, y)))
            .filter(|&(x, y)| fb.color_at(x, y) == Some(Color::GREEN))
            .count();
        assert_eq!(green, 0);
    }

    #[test]
    fn test_status_title_drawn_in_user_quadrant() {
        let mut c = Compositor::new(400, 400, CompositorSettings::default()).unwrap();
        c.render_frame(&RenderState::default());
        // Top-left pixel of 'P' in "PERSPECTIVE"
        assert_eq!(c.framebuffer().color_at(220, 220), Some(Color::GREEN));
    }
}
