//! Per-frame render state and the input snapshot that mutates it
//!
//! The input side accumulates everything that happened since the last frame into an
//! [`InputSnapshot`]. The frame loop takes that snapshot once, applies it to the
//! [`RenderState`], and renders from the result. Nothing else mutates the state.

use serde::{Deserialize, Serialize};

use crate::mesh::MIN_SEGMENTS;

/// Which primitives to draw for each triangle
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RenderMode {
    Wireframe,
    Solid,
    #[default]
    Combined,
}

impl RenderMode {
    /// Whether filled triangles are rasterized
    pub fn fills(self) -> bool {
        self != RenderMode::Wireframe
    }

    /// Whether triangle edges are drawn
    pub fn outlines(self) -> bool {
        self != RenderMode::Solid
    }

    pub fn name(self) -> &'static str {
        match self {
            RenderMode::Wireframe => "WIREFRAME",
            RenderMode::Solid => "SOLID",
            RenderMode::Combined => "COMBINED",
        }
    }
}

/// Projection used by the user viewport
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectionMode {
    #[default]
    Perspective,
    Isometric,
    Dimetric,
    Trimetric,
}

impl ProjectionMode {
    pub const ALL: [ProjectionMode; 4] = [
        ProjectionMode::Perspective,
        ProjectionMode::Isometric,
        ProjectionMode::Dimetric,
        ProjectionMode::Trimetric,
    ];

    /// Label shown in the status text
    pub fn name(self) -> &'static str {
        match self {
            ProjectionMode::Perspective => "PERSPECTIVE",
            ProjectionMode::Isometric => "ISOMETRIC",
            ProjectionMode::Dimetric => "DIMETRIC",
            ProjectionMode::Trimetric => "TRIMETRIC",
        }
    }

    /// Following mode in cycling order, wrapping back to perspective
    pub fn next(self) -> Self {
        match self {
            ProjectionMode::Perspective => ProjectionMode::Isometric,
            ProjectionMode::Isometric => ProjectionMode::Dimetric,
            ProjectionMode::Dimetric => ProjectionMode::Trimetric,
            ProjectionMode::Trimetric => ProjectionMode::Perspective,
        }
    }

    pub fn is_projective(self) -> bool {
        self == ProjectionMode::Perspective
    }
}

/// Input gathered between two frames
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct InputSnapshot {
    /// Added to the X rotation angle (radians)
    pub rotate_x: f32,
    /// Added to the Y rotation angle (radians)
    pub rotate_y: f32,
    /// Multiplied into zoom; 1.0 means unchanged
    pub zoom_factor: f32,
    pub segment_delta: i32,
    pub render_mode: Option<RenderMode>,
    pub projection: Option<ProjectionMode>,
    /// Projection cycle requests, applied after any explicit selection
    pub projection_cycles: u32,
    pub quit: bool,
}

impl Default for InputSnapshot {
    fn default() -> Self {
        Self {
            rotate_x: 0.0,
            rotate_y: 0.0,
            zoom_factor: 1.0,
            segment_delta: 0,
            render_mode: None,
            projection: None,
            projection_cycles: 0,
            quit: false,
        }
    }
}

impl InputSnapshot {
    /// True when no input was recorded
    pub fn is_empty(&self) -> bool {
        *self == InputSnapshot::default()
    }
}

/// Everything the renderer reads at the top of a frame
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RenderState {
    pub angle_x: f32,
    pub angle_y: f32,
    zoom: f32,
    segments: u32,
    pub render_mode: RenderMode,
    pub projection: ProjectionMode,
}

impl Default for RenderState {
    fn default() -> Self {
        Self {
            angle_x: 0.8,
            angle_y: -0.5,
            zoom: 1.2,
            segments: 24,
            render_mode: RenderMode::Combined,
            projection: ProjectionMode::Perspective,
        }
    }
}

impl RenderState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_angles(mut self, angle_x: f32, angle_y: f32) -> Self {
        self.angle_x = angle_x;
        self.angle_y = angle_y;
        self
    }

    pub fn with_zoom(mut self, zoom: f32) -> Self {
        self.set_zoom(zoom);
        self
    }

    pub fn with_segments(mut self, segments: u32) -> Self {
        self.set_segments(segments);
        self
    }

    pub fn with_render_mode(mut self, mode: RenderMode) -> Self {
        self.render_mode = mode;
        self
    }

    pub fn with_projection(mut self, projection: ProjectionMode) -> Self {
        self.projection = projection;
        self
    }

    pub fn zoom(&self) -> f32 {
        self.zoom
    }

    pub fn segments(&self) -> u32 {
        self.segments
    }

    /// Set zoom. Zero, negative or non-finite values are ignored.
    pub fn set_zoom(&mut self, zoom: f32) {
        if zoom.is_finite() && zoom > 0.0 {
            self.zoom = zoom;
        } else {
            log::warn!("Ignoring invalid zoom {}", zoom);
        }
    }

    /// Set the segment count, clamped to at least [`MIN_SEGMENTS`]
    pub fn set_segments(&mut self, segments: u32) {
        self.segments = segments.max(MIN_SEGMENTS);
    }

    /// Apply one frame's worth of input
    pub fn apply(&mut self, input: &InputSnapshot) {
        self.angle_x += input.rotate_x;
        self.angle_y += input.rotate_y;

        if input.zoom_factor != 1.0 {
            self.set_zoom(self.zoom * input.zoom_factor);
        }

        if input.segment_delta != 0 {
            let target = (self.segments as i64 + input.segment_delta as i64)
                .clamp(MIN_SEGMENTS as i64, u32::MAX as i64) as u32;
            if target != self.segments {
                log::debug!("Segments: {} -> {}", self.segments, target);
            }
            self.segments = target;
        }

        if let Some(mode) = input.render_mode {
            if mode != self.render_mode {
                log::info!("Render mode: {}", mode.name());
            }
            self.render_mode = mode;
        }

        let before = self.projection;
        if let Some(projection) = input.projection {
            self.projection = projection;
        }
        for _ in 0..input.projection_cycles % ProjectionMode::ALL.len() as u32 {
            self.projection = self.projection.next();
        }
        if self.projection != before {
            log::info!("Projection: {}", self.projection.name());
        }
    }
}
