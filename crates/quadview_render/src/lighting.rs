//! Flat directional lighting

use quadview_core::Color;
use quadview_math::Vec3;

/// A single directional light, fixed for the whole run
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Light {
    direction: Vec3,
    pub min_intensity: f32,
    pub ambient_boost: f32,
}

impl Default for Light {
    fn default() -> Self {
        Self::new(Vec3::new(0.0, 0.5, 1.0))
    }
}

impl Light {
    /// Light shining along `direction` (normalized here)
    pub fn new(direction: Vec3) -> Self {
        Self {
            direction: direction.normalized(),
            min_intensity: 0.1,
            ambient_boost: 0.3,
        }
    }

    pub fn with_intensity_range(mut self, min_intensity: f32, ambient_boost: f32) -> Self {
        self.min_intensity = min_intensity;
        self.ambient_boost = ambient_boost;
        self
    }

    pub fn direction(&self) -> Vec3 {
        self.direction
    }

    /// `min(1, max(min_intensity, n . l) + ambient_boost)`
    pub fn intensity(&self, normal: Vec3) -> f32 {
        (normal.dot(self.direction).max(self.min_intensity) + self.ambient_boost).min(1.0)
    }

    /// Base color scaled by the intensity for `normal`
    pub fn shade(&self, base: Color, normal: Vec3) -> Color {
        base.scaled(self.intensity(normal))
    }
}
