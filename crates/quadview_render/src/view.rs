//! The four per-frame views and how they are built from [`RenderState`]
//!
//! Layout of the shared frame buffer:
//!
//! ```text
//! +--------+--------+
//! | front  |  side  |
//! +--------+--------+
//! |  top   |  user  |
//! +--------+--------+
//! ```
//!
//! The three fixed views are orthographic and ignore the user orientation and the
//! projection mode; they still scale with zoom. The user view applies the orientation
//! followed by the selected projection.

use std::f32::consts::FRAC_PI_2;

use quadview_core::{ProjectionMode, RenderState};
use quadview_math::{Mat4, Vec3};

use crate::framebuffer::Rect;
use crate::raster::ScreenVertex;

/// Which quadrant a view occupies
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ViewKind {
    Front,
    Side,
    Top,
    User,
}

/// Projection constants shared by all views
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewParams {
    /// Pixels per model unit for orthographic and axonometric views (before zoom)
    pub ortho_scale: f32,
    /// Distance the model is pushed down -Z before perspective projection
    pub camera_distance: f32,
    /// Vertical field of view in degrees
    pub fov: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for ViewParams {
    fn default() -> Self {
        Self {
            ortho_scale: 40.0,
            camera_distance: 10.0,
            fov: 45.0,
            near: 0.1,
            far: 100.0,
        }
    }
}

/// One viewport's transform for the current frame
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct View {
    pub kind: ViewKind,
    pub rect: Rect,
    pub matrix: Mat4,
    /// Needs the homogeneous divide after transforming
    pub projective: bool,
    /// Light with normals rotated by `orientation` instead of model-space normals
    pub lighting_uses_rotation: bool,
    pub orientation: Mat4,
}

impl View {
    /// Pixels per projected unit: half the shorter side for perspective, 1 otherwise
    pub fn screen_scale(&self) -> f32 {
        if self.projective {
            self.rect.width.min(self.rect.height) as f32 / 2.0
        } else {
            1.0
        }
    }

    /// Transform a model-space point to screen coordinates (Y grows downward).
    ///
    /// Every view looks down -Z, so the returned depth grows away from the viewer and faces
    /// turned toward the viewer have non-positive screen-space signed area.
    pub fn project(&self, p: Vec3) -> ScreenVertex {
        let clip = self.matrix.transform_point(p);
        let (ndc, depth) = if self.projective {
            let ndc = clip.perspective_divide();
            (ndc, ndc.z)
        } else {
            let v = clip.xyz();
            (v, -v.z)
        };
        let (cx, cy) = self.rect.center();
        let sc = self.screen_scale();
        ScreenVertex::new(cx + ndc.x * sc, cy - ndc.y * sc, depth)
    }

    /// Normal to feed the lighting evaluator for this view
    pub fn lighting_normal(&self, normal: Vec3) -> Vec3 {
        if self.lighting_uses_rotation {
            self.orientation.transform_vector(normal).normalized()
        } else {
            normal
        }
    }
}

/// Builds the four views for a frame
#[derive(Clone, Copy, Debug, Default)]
pub struct ViewBuilder {
    pub params: ViewParams,
}

impl ViewBuilder {
    pub fn new(params: ViewParams) -> Self {
        Self { params }
    }

    /// Quadrant rectangles in front, side, top, user order.
    ///
    /// They are pairwise disjoint and tile the whole `width` x `height` frame; with odd
    /// sizes the right column and bottom row get the extra pixel.
    pub fn quadrants(width: u32, height: u32) -> [Rect; 4] {
        let (w, h) = (width as i32, height as i32);
        let (hw, hh) = (w / 2, h / 2);
        [
            Rect::new(0, 0, hw, hh),
            Rect::new(hw, 0, w - hw, hh),
            Rect::new(0, hh, hw, h - hh),
            Rect::new(hw, hh, w - hw, h - hh),
        ]
    }

    /// Projection matrix of the user view and whether it is projective
    pub fn projection_matrix(&self, projection: ProjectionMode, zoom: f32, aspect: f32) -> (Mat4, bool) {
        let p = &self.params;
        let axonometric = |preset: Mat4| preset * Mat4::scale(p.ortho_scale * zoom);
        match projection {
            ProjectionMode::Perspective => (
                Mat4::scale(zoom)
                    * Mat4::translation(0.0, 0.0, -p.camera_distance)
                    * Mat4::perspective(p.fov.to_radians(), aspect, p.near, p.far),
                true,
            ),
            ProjectionMode::Isometric => (axonometric(Mat4::isometric()), false),
            ProjectionMode::Dimetric => (axonometric(Mat4::dimetric()), false),
            ProjectionMode::Trimetric => (axonometric(Mat4::trimetric()), false),
        }
    }

    /// All four views for `state` on a `width` x `height` frame
    pub fn build(&self, state: &RenderState, width: u32, height: u32) -> [View; 4] {
        let [front_rect, side_rect, top_rect, user_rect] = Self::quadrants(width, height);
        let ortho = Mat4::scale(self.params.ortho_scale * state.zoom());

        let fixed = |kind, rect, matrix| View {
            kind,
            rect,
            matrix,
            projective: false,
            lighting_uses_rotation: false,
            orientation: Mat4::IDENTITY,
        };

        let orientation = Mat4::rotation_x(state.angle_x) * Mat4::rotation_y(state.angle_y);
        let aspect = if user_rect.height > 0 {
            user_rect.width as f32 / user_rect.height as f32
        } else {
            1.0
        };
        let (projection, projective) = self.projection_matrix(state.projection, state.zoom(), aspect);

        [
            fixed(ViewKind::Front, front_rect, ortho),
            fixed(ViewKind::Side, side_rect, Mat4::rotation_z(-FRAC_PI_2) * ortho),
            fixed(ViewKind::Top, top_rect, Mat4::rotation_x(FRAC_PI_2) * ortho),
            View {
                kind: ViewKind::User,
                rect: user_rect,
                matrix: orientation * projection,
                projective,
                lighting_uses_rotation: true,
                orientation,
            },
        ]
    }
}
