//! Depth-tested triangle fill using edge functions

use quadview_core::Color;
use serde::{Deserialize, Serialize};

use super::ScreenVertex;
use crate::framebuffer::{FrameBuffer, Rect};

/// Triangles with a smaller absolute signed area are skipped
pub const DEGENERATE_AREA: f32 = 0.1;

/// Which screen-space windings are filled
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FillPolicy {
    /// Fill either winding
    #[default]
    NoCull,
    /// Fill only triangles facing the viewer (non-positive signed area)
    BackfaceCull,
}

impl FillPolicy {
    #[inline]
    pub fn accepts(self, area: f32) -> bool {
        match self {
            FillPolicy::NoCull => true,
            FillPolicy::BackfaceCull => area <= 0.0,
        }
    }
}

/// Edge-function signed area of the screen triangle
#[inline]
pub fn signed_area(v0: ScreenVertex, v1: ScreenVertex, v2: ScreenVertex) -> f32 {
    (v1.y - v2.y) * (v0.x - v2.x) + (v2.x - v1.x) * (v0.y - v2.y)
}

/// Fill a triangle into `fb`, restricted to `clip`.
///
/// Coverage is sampled at pixel centers. Depth is the barycentric blend of the vertex z
/// values and a fragment lands only if it is strictly nearer than what is stored. Depths
/// that are not finite or fall outside `(-depth_limit, depth_limit)` are discarded.
///
/// Returns the number of pixels written.
pub fn fill_triangle(
    fb: &mut FrameBuffer,
    clip: Rect,
    [v0, v1, v2]: [ScreenVertex; 3],
    color: Color,
    policy: FillPolicy,
    depth_limit: f32,
) -> usize {
    let area = signed_area(v0, v1, v2);
    if !area.is_finite() || area.abs() < DEGENERATE_AREA || !policy.accepts(area) {
        return 0;
    }

    let clip = clip.intersect(&fb.bounds());
    if clip.is_empty() {
        return 0;
    }

    let x_min = v0.x.min(v1.x).min(v2.x).floor().max(clip.x as f32) as i32;
    let x_max = v0.x.max(v1.x).max(v2.x).ceil().min(clip.max_x() as f32) as i32;
    let y_min = v0.y.min(v1.y).min(v2.y).floor().max(clip.y as f32) as i32;
    let y_max = v0.y.max(v1.y).max(v2.y).ceil().min(clip.max_y() as f32) as i32;

    let inv_area = 1.0 / area;
    let mut written = 0;

    for y in y_min..=y_max {
        let py = y as f32 + 0.5;
        for x in x_min..=x_max {
            let px = x as f32 + 0.5;

            let h0 = ((v1.y - v2.y) * (px - v2.x) + (v2.x - v1.x) * (py - v2.y)) * inv_area;
            let h1 = ((v2.y - v0.y) * (px - v2.x) + (v0.x - v2.x) * (py - v2.y)) * inv_area;
            let h2 = ((v0.y - v1.y) * (px - v1.x) + (v1.x - v0.x) * (py - v1.y)) * inv_area;
            if h0 < 0.0 || h1 < 0.0 || h2 < 0.0 {
                continue;
            }

            let z = h0 * v0.z + h1 * v1.z + h2 * v2.z;
            if !z.is_finite() || z <= -depth_limit || z >= depth_limit {
                continue;
            }
            if fb.write_if_nearer(x, y, z, color) {
                written += 1;
            }
        }
    }

    written
}
