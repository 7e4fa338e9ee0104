//! 4x4 homogeneous matrices
//!
//! # Layout and multiply convention
//!
//! A `Matrix4` stores 16 floats. Elements 12, 13 and 14 hold the translation
//! and element 15 the homogeneous w; read column-major this is exactly the
//! layout WGSL expects for a `mat4x4<f32>`, so matrices upload without a
//! transpose.
//!
//! `a.multiply(&b)` computes `result[i*4+j] = sum_k b[i*4+k] * a[k*4+j]`,
//! i.e. B's rows are the left operand of every dot product. Applied to a
//! point, the product runs B first and A second, so transform chains are
//! written outermost first:
//!
//! ```
//! use cuboid_core::{Matrix4, Vector3};
//!
//! let m = Matrix4::translation(1.0, 0.0, 0.0).multiply(&Matrix4::scaling(2.0, 2.0, 2.0));
//! // scale, then translate
//! assert_eq!(m.transform_point(Vector3::ONE), Vector3::new(3.0, 2.0, 2.0));
//! ```
//!
//! Swapping the operands silently transposes every transform built from it.

use crate::{CuboidError, Result, Vector3};
use serde::{Deserialize, Serialize};
use std::f32::consts::FRAC_PI_2;
use std::ops::Index;

/// Determinants with a magnitude below this are reported as singular.
const SINGULAR_EPSILON: f32 = 1e-20;

/// A 4x4 matrix
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Matrix4([f32; 16]);

impl Default for Matrix4 {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Index<usize> for Matrix4 {
    type Output = f32;
    fn index(&self, index: usize) -> &f32 {
        &self.0[index]
    }
}

impl Matrix4 {
    #[rustfmt::skip]
    pub const IDENTITY: Self = Self([
        1.0, 0.0, 0.0, 0.0,
        0.0, 1.0, 0.0, 0.0,
        0.0, 0.0, 1.0, 0.0,
        0.0, 0.0, 0.0, 1.0,
    ]);

    pub const fn from_array(values: [f32; 16]) -> Self {
        Self(values)
    }

    pub fn as_array(&self) -> &[f32; 16] {
        &self.0
    }

    pub fn to_array(&self) -> [f32; 16] {
        self.0
    }

    /// Matrix as four 4-float columns, ready for a GPU uniform
    pub fn to_cols_array_2d(&self) -> [[f32; 4]; 4] {
        let m = &self.0;
        [
            [m[0], m[1], m[2], m[3]],
            [m[4], m[5], m[6], m[7]],
            [m[8], m[9], m[10], m[11]],
            [m[12], m[13], m[14], m[15]],
        ]
    }

    #[rustfmt::skip]
    pub fn translation(x: f32, y: f32, z: f32) -> Self {
        Self([
            1.0, 0.0, 0.0, 0.0,
            0.0, 1.0, 0.0, 0.0,
            0.0, 0.0, 1.0, 0.0,
            x,   y,   z,   1.0,
        ])
    }

    pub fn translation_vector(v: Vector3) -> Self {
        Self::translation(v.x, v.y, v.z)
    }

    #[rustfmt::skip]
    pub fn scaling(x: f32, y: f32, z: f32) -> Self {
        Self([
            x,   0.0, 0.0, 0.0,
            0.0, y,   0.0, 0.0,
            0.0, 0.0, z,   0.0,
            0.0, 0.0, 0.0, 1.0,
        ])
    }

    pub fn scaling_vector(v: Vector3) -> Self {
        Self::scaling(v.x, v.y, v.z)
    }

    /// Right-handed rotation about X (radians)
    #[rustfmt::skip]
    pub fn rotation_x(angle: f32) -> Self {
        let (s, c) = angle.sin_cos();
        Self([
            1.0, 0.0, 0.0, 0.0,
            0.0, c,   s,   0.0,
            0.0, -s,  c,   0.0,
            0.0, 0.0, 0.0, 1.0,
        ])
    }

    /// Right-handed rotation about Y (radians)
    #[rustfmt::skip]
    pub fn rotation_y(angle: f32) -> Self {
        let (s, c) = angle.sin_cos();
        Self([
            c,   0.0, -s,  0.0,
            0.0, 1.0, 0.0, 0.0,
            s,   0.0, c,   0.0,
            0.0, 0.0, 0.0, 1.0,
        ])
    }

    /// Right-handed rotation about Z (radians)
    #[rustfmt::skip]
    pub fn rotation_z(angle: f32) -> Self {
        let (s, c) = angle.sin_cos();
        Self([
            c,   s,   0.0, 0.0,
            -s,  c,   0.0, 0.0,
            0.0, 0.0, 1.0, 0.0,
            0.0, 0.0, 0.0, 1.0,
        ])
    }

    /// Basis matrix placed at `start` whose rows are (right, up, forward),
    /// with forward pointing from `start` towards `end`.
    ///
    /// This is an object-to-world matrix, not an inverted view matrix.
    #[rustfmt::skip]
    pub fn look_at(start: Vector3, end: Vector3, up: Vector3) -> Self {
        let z_axis = (end - start).unit();
        let x_axis = up.cross(&z_axis).unit();
        let y_axis = z_axis.cross(&x_axis).unit();

        Self([
            x_axis.x, x_axis.y, x_axis.z, 0.0,
            y_axis.x, y_axis.y, y_axis.z, 0.0,
            z_axis.x, z_axis.y, z_axis.z, 0.0,
            start.x,  start.y,  start.z,  1.0,
        ])
    }

    /// Perspective projection mapping view depth `-near..-far` to `0..1`.
    #[rustfmt::skip]
    pub fn perspective(fov_y_degrees: f32, width: f32, height: f32, near: f32, far: f32) -> Self {
        let fov = fov_y_degrees.to_radians();
        let f = (FRAC_PI_2 - 0.5 * fov).tan();
        let range_inv = 1.0 / (near - far);
        let aspect = width / height;

        Self([
            f / aspect, 0.0, 0.0,                     0.0,
            0.0,        f,   0.0,                     0.0,
            0.0,        0.0, far * range_inv,         -1.0,
            0.0,        0.0, near * far * range_inv,  0.0,
        ])
    }

    /// Orthographic projection mapping view depth `-near..-far` to `0..1`.
    #[rustfmt::skip]
    pub fn orthographic(left: f32, right: f32, bottom: f32, top: f32, near: f32, far: f32) -> Self {
        Self([
            2.0 / (right - left),            0.0,                             0.0,                 0.0,
            0.0,                             2.0 / (top - bottom),            0.0,                 0.0,
            0.0,                             0.0,                             1.0 / (near - far),  0.0,
            (right + left) / (left - right), (top + bottom) / (bottom - top), near / (near - far), 1.0,
        ])
    }

    /// Compose two matrices; the result applies `other` first, then `self`.
    pub fn multiply(&self, other: &Matrix4) -> Matrix4 {
        let a = &self.0;
        let b = &other.0;
        let mut out = [0.0f32; 16];
        for i in 0..4 {
            for j in 0..4 {
                out[i * 4 + j] = b[i * 4] * a[j]
                    + b[i * 4 + 1] * a[4 + j]
                    + b[i * 4 + 2] * a[8 + j]
                    + b[i * 4 + 3] * a[12 + j];
            }
        }
        Matrix4(out)
    }

    /// Transform `point` (w = 1), returning all four homogeneous components.
    pub fn transform_homogeneous(&self, point: Vector3) -> [f32; 4] {
        let m = &self.0;
        let mut out = [0.0f32; 4];
        for (j, value) in out.iter_mut().enumerate() {
            *value = point.x * m[j] + point.y * m[4 + j] + point.z * m[8 + j] + m[12 + j];
        }
        out
    }

    /// Transform a point and read the translation column, without a
    /// perspective divide. Equivalent to `self.multiply(&translation(p))`.
    pub fn transform_point(&self, point: Vector3) -> Vector3 {
        let [x, y, z, _] = self.transform_homogeneous(point);
        Vector3::new(x, y, z)
    }

    /// Transform a point and divide by the resulting w.
    pub fn project_point(&self, point: Vector3) -> Vector3 {
        let [x, y, z, w] = self.transform_homogeneous(point);
        Vector3::new(x, y, z) / w
    }

    /// Every element negated
    pub fn inverse_signs(&self) -> Matrix4 {
        Matrix4(self.0.map(|v| -v))
    }

    fn cofactor_inverse(&self) -> (Matrix4, f32) {
        let m = &self.0;
        let (m00, m01, m02, m03) = (m[0], m[1], m[2], m[3]);
        let (m10, m11, m12, m13) = (m[4], m[5], m[6], m[7]);
        let (m20, m21, m22, m23) = (m[8], m[9], m[10], m[11]);
        let (m30, m31, m32, m33) = (m[12], m[13], m[14], m[15]);

        let tmp0 = m22 * m33;
        let tmp1 = m32 * m23;
        let tmp2 = m12 * m33;
        let tmp3 = m32 * m13;
        let tmp4 = m12 * m23;
        let tmp5 = m22 * m13;
        let tmp6 = m02 * m33;
        let tmp7 = m32 * m03;
        let tmp8 = m02 * m23;
        let tmp9 = m22 * m03;
        let tmp10 = m02 * m13;
        let tmp11 = m12 * m03;
        let tmp12 = m20 * m31;
        let tmp13 = m30 * m21;
        let tmp14 = m10 * m31;
        let tmp15 = m30 * m11;
        let tmp16 = m10 * m21;
        let tmp17 = m20 * m11;
        let tmp18 = m00 * m31;
        let tmp19 = m30 * m01;
        let tmp20 = m00 * m21;
        let tmp21 = m20 * m01;
        let tmp22 = m00 * m11;
        let tmp23 = m10 * m01;

        let t0 = (tmp0 * m11 + tmp3 * m21 + tmp4 * m31) - (tmp1 * m11 + tmp2 * m21 + tmp5 * m31);
        let t1 = (tmp1 * m01 + tmp6 * m21 + tmp9 * m31) - (tmp0 * m01 + tmp7 * m21 + tmp8 * m31);
        let t2 = (tmp2 * m01 + tmp7 * m11 + tmp10 * m31) - (tmp3 * m01 + tmp6 * m11 + tmp11 * m31);
        let t3 = (tmp5 * m01 + tmp8 * m11 + tmp11 * m21) - (tmp4 * m01 + tmp9 * m11 + tmp10 * m21);

        let determinant = m00 * t0 + m10 * t1 + m20 * t2 + m30 * t3;
        let d = 1.0 / determinant;

        let inverse = Matrix4([
            d * t0,
            d * t1,
            d * t2,
            d * t3,
            d * ((tmp1 * m10 + tmp2 * m20 + tmp5 * m30) - (tmp0 * m10 + tmp3 * m20 + tmp4 * m30)),
            d * ((tmp0 * m00 + tmp7 * m20 + tmp8 * m30) - (tmp1 * m00 + tmp6 * m20 + tmp9 * m30)),
            d * ((tmp3 * m00 + tmp6 * m10 + tmp11 * m30) - (tmp2 * m00 + tmp7 * m10 + tmp10 * m30)),
            d * ((tmp4 * m00 + tmp9 * m10 + tmp10 * m20) - (tmp5 * m00 + tmp8 * m10 + tmp11 * m20)),
            d * ((tmp12 * m13 + tmp15 * m23 + tmp16 * m33) - (tmp13 * m13 + tmp14 * m23 + tmp17 * m33)),
            d * ((tmp13 * m03 + tmp18 * m23 + tmp21 * m33) - (tmp12 * m03 + tmp19 * m23 + tmp20 * m33)),
            d * ((tmp14 * m03 + tmp19 * m13 + tmp22 * m33) - (tmp15 * m03 + tmp18 * m13 + tmp23 * m33)),
            d * ((tmp17 * m03 + tmp20 * m13 + tmp23 * m23) - (tmp16 * m03 + tmp21 * m13 + tmp22 * m23)),
            d * ((tmp14 * m22 + tmp17 * m32 + tmp13 * m12) - (tmp16 * m32 + tmp12 * m12 + tmp15 * m22)),
            d * ((tmp20 * m32 + tmp12 * m02 + tmp19 * m22) - (tmp18 * m22 + tmp21 * m32 + tmp13 * m02)),
            d * ((tmp18 * m12 + tmp23 * m32 + tmp15 * m02) - (tmp22 * m32 + tmp14 * m02 + tmp19 * m12)),
            d * ((tmp22 * m22 + tmp16 * m02 + tmp21 * m12) - (tmp20 * m12 + tmp23 * m22 + tmp17 * m02)),
        ]);

        (inverse, determinant)
    }

    /// General 4x4 inverse by cofactor expansion.
    ///
    /// A singular matrix produces infinities/NaNs in the result; a warning is
    /// logged so the artifacts can be traced back. Use [`Matrix4::try_inverse`]
    /// when the caller can handle the failure.
    pub fn inverse(&self) -> Matrix4 {
        let (inverse, determinant) = self.cofactor_inverse();
        if is_singular(determinant) {
            tracing::warn!(determinant, "inverting a singular matrix");
        }
        inverse
    }

    /// Inverse, or `SingularMatrix` when the determinant is (near) zero.
    pub fn try_inverse(&self) -> Result<Matrix4> {
        let (inverse, determinant) = self.cofactor_inverse();
        if is_singular(determinant) {
            return Err(CuboidError::SingularMatrix { determinant });
        }
        Ok(inverse)
    }

    /// Recover Euler angles (x, y, z) from a pure rotation matrix built as
    /// `rotation_x(x) * rotation_y(y) * rotation_z(z)`.
    ///
    /// At the gimbal-lock poles (element 8 at +/-1) the z angle is folded
    /// into x and reported as 0.
    pub fn to_euler_angles(&self) -> Vector3 {
        let m = &self.0;
        if m[8] >= 1.0 {
            Vector3::new(m[1].atan2(m[5]), FRAC_PI_2, 0.0)
        } else if m[8] <= -1.0 {
            Vector3::new(-m[1].atan2(m[5]), -FRAC_PI_2, 0.0)
        } else {
            Vector3::new((-m[9]).atan2(m[10]), m[8].asin(), (-m[4]).atan2(m[0]))
        }
    }
}

fn is_singular(determinant: f32) -> bool {
    determinant.abs() < SINGULAR_EPSILON || !determinant.is_finite()
}

impl From<Matrix4> for glam::Mat4 {
    fn from(m: Matrix4) -> Self {
        glam::Mat4::from_cols_array(&m.0)
    }
}

impl From<glam::Mat4> for Matrix4 {
    fn from(m: glam::Mat4) -> Self {
        Matrix4(m.to_cols_array())
    }
}
