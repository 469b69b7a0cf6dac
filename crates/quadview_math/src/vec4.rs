//! Homogeneous 4D vector

use bytemuck::{Pod, Zeroable};
use serde::{Serialize, Deserialize};

use crate::Vec3;

/// Homogeneous coordinate produced by transforming a [`Vec3`] through a [`crate::Mat4`].
/// The w component carries the perspective denominator.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable, Serialize, Deserialize)]
pub struct Vec4 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub w: f32,
}

impl Vec4 {
    pub const ZERO: Self = Self { x: 0.0, y: 0.0, z: 0.0, w: 0.0 };

    /// Create a new Vec4
    #[inline]
    pub const fn new(x: f32, y: f32, z: f32, w: f32) -> Self {
        Self { x, y, z, w }
    }

    /// Promote a point (w = 1)
    #[inline]
    pub const fn from_point(p: Vec3) -> Self {
        Self::new(p.x, p.y, p.z, 1.0)
    }

    /// Promote a direction (w = 0, unaffected by translation)
    #[inline]
    pub const fn from_direction(d: Vec3) -> Self {
        Self::new(d.x, d.y, d.z, 0.0)
    }

    /// Drop w without dividing
    #[inline]
    pub fn xyz(self) -> Vec3 {
        Vec3::new(self.x, self.y, self.z)
    }

    /// Homogeneous divide. A zero w leaves the coordinates untouched.
    #[inline]
    pub fn perspective_divide(self) -> Vec3 {
        if self.w != 0.0 {
            Vec3::new(self.x / self.w, self.y / self.w, self.z / self.w)
        } else {
            self.xyz()
        }
    }
}

impl std::ops::Add for Vec4 {
    type Output = Self;
    #[inline]
    fn add(self, other: Self) -> Self {
        Self::new(
            self.x + other.x,
            self.y + other.y,
            self.z + other.z,
            self.w + other.w,
        )
    }
}

impl std::ops::Sub for Vec4 {
    type Output = Self;
    #[inline]
    fn sub(self, other: Self) -> Self {
        Self::new(
            self.x - other.x,
            self.y - other.y,
            self.z - other.z,
            self.w - other.w,
        )
    }
}

impl std::ops::Mul<f32> for Vec4 {
    type Output = Self;
    #[inline]
    fn mul(self, scalar: f32) -> Self {
        Self::new(
            self.x * scalar,
            self.y * scalar,
            self.z * scalar,
            self.w * scalar,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new() {
        let v = Vec4::new(1.0, 2.0, 3.0, 4.0);
        assert_eq!(v.x, 1.0);
        assert_eq!(v.y, 2.0);
        assert_eq!(v.z, 3.0);
        assert_eq!(v.w, 4.0);
    }

    #[test]
    fn test_perspective_divide() {
        let v = Vec4::new(2.0, 4.0, 6.0, 2.0);
        assert_eq!(v.perspective_divide(), Vec3::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn test_perspective_divide_zero_w() {
        let v = Vec4::new(2.0, 4.0, 6.0, 0.0);
        assert_eq!(v.perspective_divide(), Vec3::new(2.0, 4.0, 6.0));
    }

    #[test]
    fn test_point_and_direction() {
        let p = Vec3::new(1.0, 2.0, 3.0);
        assert_eq!(Vec4::from_point(p).w, 1.0);
        assert_eq!(Vec4::from_direction(p).w, 0.0);
        assert_eq!(Vec4::from_point(p).xyz(), p);
    }
}
