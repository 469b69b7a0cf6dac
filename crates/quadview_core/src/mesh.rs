//! Procedural cup mesh
//!
//! The cup is a surface of revolution around the Y axis, centered at the origin with
//! its base at `-height / 2` and its opening at `+height / 2`. Every triangle is
//! wound so that its geometric normal points out of the solid.
//!
//! Two variants are available:
//!
//! - [`MeshVariant::Simple`]: closed base and outer wall only (3 triangles per segment)
//! - [`MeshVariant::Hollow`]: adds a raised inner floor, an inner wall and the annular
//!   rim joining the two walls at the top (8 triangles per segment)

use std::f32::consts::TAU;
use std::fmt;

use quadview_math::Vec3;
use serde::{Deserialize, Serialize};

use crate::Color;

/// Lowest segment count that still produces a closed solid
pub const MIN_SEGMENTS: u32 = 3;

/// Geometric normal of the triangle `(a, b, c)`: `normalize((b - a) x (c - a))`
#[inline]
pub fn face_normal(a: Vec3, b: Vec3, c: Vec3) -> Vec3 {
    (b - a).cross(c - a).normalized()
}

/// A flat-shaded triangle in model space
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Triangle {
    pub vertices: [Vec3; 3],
    pub color: Color,
    /// Unit normal, derived from the winding at construction
    pub normal: Vec3,
}

impl Triangle {
    pub fn new(a: Vec3, b: Vec3, c: Vec3, color: Color) -> Self {
        Self {
            vertices: [a, b, c],
            color,
            normal: face_normal(a, b, c),
        }
    }
}

/// Which cup shape to build
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MeshVariant {
    Simple,
    #[default]
    Hollow,
}

impl MeshVariant {
    /// Triangles emitted for each angular segment
    pub const fn triangles_per_segment(self) -> usize {
        match self {
            MeshVariant::Simple => 3,
            MeshVariant::Hollow => 8,
        }
    }
}

/// Dimensions and colors of the cup
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MeshParams {
    pub variant: MeshVariant,
    pub radius: f32,
    pub height: f32,
    /// Radius of the inner wall (hollow only)
    pub inner_radius: f32,
    /// Height of the inner floor above the base (hollow only)
    pub floor_thickness: f32,
    pub outer_color: Color,
    pub inner_color: Color,
    pub bottom_color: Color,
}

impl Default for MeshParams {
    fn default() -> Self {
        Self {
            variant: MeshVariant::Hollow,
            radius: 1.5,
            height: 3.5,
            inner_radius: 1.2,
            floor_thickness: 0.3,
            outer_color: Color::new(100, 150, 240),
            inner_color: Color::new(60, 80, 160),
            bottom_color: Color::new(200, 200, 220),
        }
    }
}

impl MeshParams {
    pub fn with_variant(mut self, variant: MeshVariant) -> Self {
        self.variant = variant;
        self
    }

    /// Check that the dimensions describe a real solid
    pub fn validate(&self) -> Result<(), MeshParamsError> {
        if !(self.radius > 0.0) || !self.radius.is_finite() {
            return Err(MeshParamsError::InvalidRadius(self.radius));
        }
        if !(self.height > 0.0) || !self.height.is_finite() {
            return Err(MeshParamsError::InvalidHeight(self.height));
        }
        if self.variant == MeshVariant::Hollow {
            if !(self.inner_radius > 0.0 && self.inner_radius < self.radius) {
                return Err(MeshParamsError::InnerRadiusOutOfRange {
                    inner: self.inner_radius,
                    outer: self.radius,
                });
            }
            if !(self.floor_thickness >= 0.0 && self.floor_thickness < self.height) {
                return Err(MeshParamsError::FloorOutOfRange {
                    thickness: self.floor_thickness,
                    height: self.height,
                });
            }
        }
        Ok(())
    }
}

/// Rejected cup dimensions
#[derive(Debug, Clone, PartialEq)]
pub enum MeshParamsError {
    InvalidRadius(f32),
    InvalidHeight(f32),
    InnerRadiusOutOfRange { inner: f32, outer: f32 },
    FloorOutOfRange { thickness: f32, height: f32 },
}

impl fmt::Display for MeshParamsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MeshParamsError::InvalidRadius(r) => write!(f, "Cup radius must be positive, got {}", r),
            MeshParamsError::InvalidHeight(h) => write!(f, "Cup height must be positive, got {}", h),
            MeshParamsError::InnerRadiusOutOfRange { inner, outer } => write!(
                f,
                "Inner radius {} must lie strictly between 0 and the outer radius {}",
                inner, outer
            ),
            MeshParamsError::FloorOutOfRange { thickness, height } => write!(
                f,
                "Floor thickness {} must be non-negative and below the cup height {}",
                thickness, height
            ),
        }
    }
}

impl std::error::Error for MeshParamsError {}

/// Triangle list for one segment count
#[derive(Clone, Debug)]
pub struct Mesh {
    triangles: Vec<Triangle>,
    segments: u32,
    variant: MeshVariant,
}

impl Mesh {
    /// Build the cup with `segments` angular slices.
    ///
    /// Counts below [`MIN_SEGMENTS`] are raised to it. The output is a pure function of
    /// the arguments.
    pub fn generate(segments: u32, params: &MeshParams) -> Self {
        let segments = segments.max(MIN_SEGMENTS);
        let variant = params.variant;
        let mut triangles = Vec::with_capacity(segments as usize * variant.triangles_per_segment());

        let y_bottom = -params.height / 2.0;
        let y_top = params.height / 2.0;
        let y_floor = y_bottom + params.floor_thickness;
        let outer_r = params.radius;
        let inner_r = params.inner_radius;

        let ring = |radius: f32, y: f32, t: f32| Vec3::new(radius * t.cos(), y, radius * t.sin());
        let center_bottom = Vec3::new(0.0, y_bottom, 0.0);
        let center_floor = Vec3::new(0.0, y_floor, 0.0);

        for i in 0..segments {
            let t1 = TAU * i as f32 / segments as f32;
            let t2 = TAU * (i + 1) as f32 / segments as f32;

            // Outer surface: p1/p2 on the base ring, p3/p4 on the top ring
            let p1 = ring(outer_r, y_bottom, t1);
            let p2 = ring(outer_r, y_bottom, t2);
            let p3 = ring(outer_r, y_top, t2);
            let p4 = ring(outer_r, y_top, t1);

            triangles.push(Triangle::new(center_bottom, p1, p2, params.bottom_color));

            if variant == MeshVariant::Hollow {
                let q1 = ring(inner_r, y_floor, t1);
                let q2 = ring(inner_r, y_floor, t2);
                let q3 = ring(inner_r, y_top, t2);
                let q4 = ring(inner_r, y_top, t1);

                triangles.push(Triangle::new(center_floor, q2, q1, params.bottom_color));
                triangles.push(Triangle::new(p1, p3, p2, params.outer_color));
                triangles.push(Triangle::new(p1, p4, p3, params.outer_color));
                triangles.push(Triangle::new(q1, q2, q3, params.inner_color));
                triangles.push(Triangle::new(q1, q3, q4, params.inner_color));
                // Rim joins the outer top ring to the inner top ring
                triangles.push(Triangle::new(p4, q4, q3, params.outer_color));
                triangles.push(Triangle::new(p4, q3, p3, params.outer_color));
            } else {
                triangles.push(Triangle::new(p1, p3, p2, params.outer_color));
                triangles.push(Triangle::new(p1, p4, p3, params.outer_color));
            }
        }

        log::debug!(
            "Generated {:?} cup: {} segments, {} triangles",
            variant,
            segments,
            triangles.len()
        );

        Self { triangles, segments, variant }
    }

    pub fn triangles(&self) -> &[Triangle] {
        &self.triangles
    }

    pub fn len(&self) -> usize {
        self.triangles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.triangles.is_empty()
    }

    /// Effective segment count (after clamping)
    pub fn segments(&self) -> u32 {
        self.segments
    }

    pub fn variant(&self) -> MeshVariant {
        self.variant
    }
}
