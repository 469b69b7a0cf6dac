//! 4x4 matrix with row-vector convention
//!
//! Points are row vectors multiplied on the left: `p' = p * M`. Translation lives in
//! the bottom row and the perspective denominator in the last column, so composing
//! `a * b` yields a matrix that applies `a` first and `b` second. A view transform is
//! therefore written in the order the operations happen, e.g.
//! `rotation_x(ax) * rotation_y(ay) * projection`.

use bytemuck::{Pod, Zeroable};

use crate::{Vec3, Vec4};

/// Tilt angles (degrees) of the axonometric presets: rotation about X, then about Y.
pub const ISOMETRIC_ANGLES: (f32, f32) = (35.264, 45.0);
pub const DIMETRIC_ANGLES: (f32, f32) = (20.0, 20.0);
pub const TRIMETRIC_ANGLES: (f32, f32) = (15.0, 30.0);

/// 4x4 matrix, stored row-major (`m[row][col]`)
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct Mat4 {
    pub m: [[f32; 4]; 4],
}

impl Default for Mat4 {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Mat4 {
    /// Identity matrix
    pub const IDENTITY: Self = Self {
        m: [
            [1.0, 0.0, 0.0, 0.0],
            [0.0, 1.0, 0.0, 0.0],
            [0.0, 0.0, 1.0, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ],
    };

    /// Build from explicit rows
    pub const fn from_rows(m: [[f32; 4]; 4]) -> Self {
        Self { m }
    }

    /// Rotation about the X axis. Positive angles turn +Y toward +Z.
    pub fn rotation_x(angle: f32) -> Self {
        let (s, c) = angle.sin_cos();
        let mut r = Self::IDENTITY;
        r.m[1][1] = c;
        r.m[1][2] = s;
        r.m[2][1] = -s;
        r.m[2][2] = c;
        r
    }

    /// Rotation about the Y axis. Positive angles turn +X toward -Z.
    pub fn rotation_y(angle: f32) -> Self {
        let (s, c) = angle.sin_cos();
        let mut r = Self::IDENTITY;
        r.m[0][0] = c;
        r.m[0][2] = -s;
        r.m[2][0] = s;
        r.m[2][2] = c;
        r
    }

    /// Rotation about the Z axis. Positive angles turn +X toward +Y.
    pub fn rotation_z(angle: f32) -> Self {
        let (s, c) = angle.sin_cos();
        let mut r = Self::IDENTITY;
        r.m[0][0] = c;
        r.m[0][1] = s;
        r.m[1][0] = -s;
        r.m[1][1] = c;
        r
    }

    /// Uniform scale
    pub fn scale(s: f32) -> Self {
        let mut r = Self::IDENTITY;
        r.m[0][0] = s;
        r.m[1][1] = s;
        r.m[2][2] = s;
        r
    }

    /// Translation
    pub fn translation(x: f32, y: f32, z: f32) -> Self {
        let mut r = Self::IDENTITY;
        r.m[3][0] = x;
        r.m[3][1] = y;
        r.m[3][2] = z;
        r
    }

    /// Perspective projection looking down -Z.
    ///
    /// The last column writes `-z` into w, so dividing by w maps the near plane
    /// to z = -1 and the far plane to z = +1.
    ///
    /// # Arguments
    /// * `fov_y` - Vertical field of view in radians
    /// * `aspect` - Width / height
    /// * `near`, `far` - Clip plane distances (positive)
    pub fn perspective(fov_y: f32, aspect: f32, near: f32, far: f32) -> Self {
        let t = (fov_y / 2.0).tan();
        let mut r = Self { m: [[0.0; 4]; 4] };
        r.m[0][0] = 1.0 / (aspect * t);
        r.m[1][1] = 1.0 / t;
        r.m[2][2] = -(far + near) / (far - near);
        r.m[2][3] = -1.0;
        r.m[3][2] = -(2.0 * far * near) / (far - near);
        r
    }

    /// Rotation about X by `tilt_x` degrees followed by rotation about Y by `tilt_y` degrees
    pub fn axonometric(tilt_x: f32, tilt_y: f32) -> Self {
        Self::rotation_x(tilt_x.to_radians()) * Self::rotation_y(tilt_y.to_radians())
    }

    /// Isometric preset (35.264°, 45°)
    pub fn isometric() -> Self {
        Self::axonometric(ISOMETRIC_ANGLES.0, ISOMETRIC_ANGLES.1)
    }

    /// Dimetric preset (20°, 20°)
    pub fn dimetric() -> Self {
        Self::axonometric(DIMETRIC_ANGLES.0, DIMETRIC_ANGLES.1)
    }

    /// Trimetric preset (15°, 30°)
    pub fn trimetric() -> Self {
        Self::axonometric(TRIMETRIC_ANGLES.0, TRIMETRIC_ANGLES.1)
    }

    /// Row vector times matrix
    #[inline]
    pub fn transform(&self, v: Vec4) -> Vec4 {
        let m = &self.m;
        let column = |j: usize| v.x * m[0][j] + v.y * m[1][j] + v.z * m[2][j] + v.w * m[3][j];
        Vec4::new(column(0), column(1), column(2), column(3))
    }

    /// Transform a point (implicit w = 1)
    #[inline]
    pub fn transform_point(&self, p: Vec3) -> Vec4 {
        self.transform(Vec4::from_point(p))
    }

    /// Transform a direction (implicit w = 0, translation ignored)
    #[inline]
    pub fn transform_vector(&self, d: Vec3) -> Vec3 {
        self.transform(Vec4::from_direction(d)).xyz()
    }
}

impl std::ops::Mul for Mat4 {
    type Output = Mat4;

    /// `self * rhs`: apply `self`, then `rhs`
    #[allow(clippy::needless_range_loop)]
    fn mul(self, rhs: Mat4) -> Mat4 {
        let mut r = Mat4 { m: [[0.0; 4]; 4] };
        for i in 0..4 {
            for j in 0..4 {
                for k in 0..4 {
                    r.m[i][j] += self.m[i][k] * rhs.m[k][j];
                }
            }
        }
        r
    }
}

impl std::ops::Mul<Mat4> for Vec3 {
    type Output = Vec4;

    #[inline]
    fn mul(self, m: Mat4) -> Vec4 {
        m.transform_point(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::{FRAC_PI_2, FRAC_PI_4};

    const EPSILON: f32 = 0.0001;

    fn approx_eq(a: f32, b: f32) -> bool {
        (a - b).abs() < EPSILON
    }

    fn vec_approx_eq(a: Vec3, b: Vec3) -> bool {
        approx_eq(a.x, b.x) && approx_eq(a.y, b.y) && approx_eq(a.z, b.z)
    }

    fn mat_approx_eq(a: Mat4, b: Mat4) -> bool {
        for i in 0..4 {
            for j in 0..4 {
                if !approx_eq(a.m[i][j], b.m[i][j]) {
                    return false;
                }
            }
        }
        true
    }

    #[test]
    fn test_identity() {
        let p = Vec3::new(1.0, 2.0, 3.0);
        let result = Mat4::IDENTITY.transform_point(p);
        assert_eq!(result, Vec4::new(1.0, 2.0, 3.0, 1.0));
    }

    #[test]
    fn test_rotation_x_turns_y_into_z() {
        let r = (Vec3::Y * Mat4::rotation_x(FRAC_PI_2)).xyz();
        assert!(vec_approx_eq(r, Vec3::Z), "got {:?}", r);
    }

    #[test]
    fn test_rotation_y_turns_x_into_minus_z() {
        let r = (Vec3::X * Mat4::rotation_y(FRAC_PI_2)).xyz();
        assert!(vec_approx_eq(r, -Vec3::Z), "got {:?}", r);
    }

    #[test]
    fn test_rotation_z_turns_x_into_y() {
        let r = (Vec3::X * Mat4::rotation_z(FRAC_PI_2)).xyz();
        assert!(vec_approx_eq(r, Vec3::Y), "got {:?}", r);
    }

    #[test]
    fn test_mul_applies_left_operand_first() {
        // Translate then scale: origin -> (1,0,0) -> (2,0,0)
        let ts = Mat4::translation(1.0, 0.0, 0.0) * Mat4::scale(2.0);
        assert!(vec_approx_eq((Vec3::ZERO * ts).xyz(), Vec3::new(2.0, 0.0, 0.0)));

        // Scale then translate: origin -> origin -> (1,0,0)
        let st = Mat4::scale(2.0) * Mat4::translation(1.0, 0.0, 0.0);
        assert!(vec_approx_eq((Vec3::ZERO * st).xyz(), Vec3::new(1.0, 0.0, 0.0)));
    }

    #[test]
    fn test_mul_identity() {
        let a = Mat4::rotation_x(0.5) * Mat4::translation(1.0, 2.0, 3.0);
        assert!(mat_approx_eq(Mat4::IDENTITY * a, a));
        assert!(mat_approx_eq(a * Mat4::IDENTITY, a));
    }

    #[test]
    fn test_rotation_composition() {
        let composed = Mat4::rotation_z(FRAC_PI_4) * Mat4::rotation_z(FRAC_PI_4);
        assert!(mat_approx_eq(composed, Mat4::rotation_z(FRAC_PI_2)));
    }

    #[test]
    fn test_translation_ignored_for_vectors() {
        let m = Mat4::translation(5.0, 6.0, 7.0);
        assert_eq!(m.transform_vector(Vec3::X), Vec3::X);
    }

    #[test]
    fn test_perspective_maps_near_and_far() {
        let (near, far) = (0.1, 100.0);
        let p = Mat4::perspective(FRAC_PI_4, 1.0, near, far);

        let at_near = p.transform_point(Vec3::new(0.0, 0.0, -near));
        assert!(approx_eq(at_near.w, near));
        assert!(approx_eq(at_near.perspective_divide().z, -1.0));

        let at_far = p.transform_point(Vec3::new(0.0, 0.0, -far));
        assert!(approx_eq(at_far.w, far));
        assert!((at_far.perspective_divide().z - 1.0).abs() < 0.001);
    }

    #[test]
    fn test_perspective_shrinks_with_distance() {
        let p = Mat4::perspective(FRAC_PI_4, 1.0, 0.1, 100.0);
        let close = p.transform_point(Vec3::new(1.0, 0.0, -2.0)).perspective_divide();
        let far = p.transform_point(Vec3::new(1.0, 0.0, -4.0)).perspective_divide();
        assert!(approx_eq(close.x, far.x * 2.0));
    }

    #[test]
    fn test_axonometric_presets_are_rotations() {
        for m in [Mat4::isometric(), Mat4::dimetric(), Mat4::trimetric()] {
            // Rotations preserve length and keep w = 1
            let v = Vec3::new(1.0, 2.0, 3.0) * m;
            assert!(approx_eq(v.xyz().length(), Vec3::new(1.0, 2.0, 3.0).length()));
            assert!(approx_eq(v.w, 1.0));
        }
    }

    #[test]
    fn test_isometric_composes_x_then_y() {
        let expected = Mat4::rotation_x(35.264f32.to_radians()) * Mat4::rotation_y(FRAC_PI_4);
        assert!(mat_approx_eq(Mat4::isometric(), expected));
        // The X axis only sees the Y rotation
        let x = Mat4::isometric().transform_vector(Vec3::X);
        assert!(vec_approx_eq(x, Vec3::new(FRAC_PI_4.cos(), 0.0, -FRAC_PI_4.sin())));
    }
}
