// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Defines the `Mat2`, `Mat3`, and `Mat4` types and associated operations.
//!
//! All matrices are stored column-major: the flat layout of a `Mat4` places
//! element `(row i, column j)` at index `i + 4*j`, which is the order modern
//! graphics APIs expect for uniform upload.

use super::vector::{Vec2, Vec3, Vec4};
use super::PI_360;
use std::ops::{Add, Index, Mul, Neg, Sub};

/// Determinant of a 3x3 matrix given as nine column-major floats.
///
/// Shared by `Mat3::determinant` and the `Mat4` cofactor expansion. The term
/// grouping is fixed; do not reorder it, downstream results depend on the
/// exact rounding.
#[inline]
fn det3(
    m00: f32,
    m01: f32,
    m02: f32,
    m10: f32,
    m11: f32,
    m12: f32,
    m20: f32,
    m21: f32,
    m22: f32,
) -> f32 {
    ((m00 * m11 * m22) + (m10 * m21 * m02) + (m20 * m01 * m12))
        - ((m02 * m11 * m20) + (m12 * m21 * m00) + (m22 * m01 * m10))
}

// --- Mat2 ---

/// A 2x2 column-major matrix.
///
/// Used standalone for 2D transforms, and as the building block of
/// [`Vec3::cross`], whose components are 2x2 determinants.
#[derive(Debug, Clone, Copy, PartialEq)]
#[repr(C)]
pub struct Mat2 {
    /// The columns of the matrix. `cols[0]` is the first column.
    pub cols: [Vec2; 2],
}

impl Mat2 {
    /// The 2x2 identity matrix.
    pub const IDENTITY: Self = Self {
        cols: [Vec2::X, Vec2::Y],
    };

    /// A 2x2 matrix with all elements set to 0.
    pub const ZERO: Self = Self {
        cols: [Vec2::ZERO; 2],
    };

    /// Creates a matrix from four column-major elements
    /// `[m00, m01, m10, m11]` (first column, then second).
    #[inline]
    pub const fn new(m00: f32, m01: f32, m10: f32, m11: f32) -> Self {
        Self {
            cols: [Vec2::new(m00, m01), Vec2::new(m10, m11)],
        }
    }

    /// Creates a new matrix from two column vectors.
    #[inline]
    pub const fn from_cols(c0: Vec2, c1: Vec2) -> Self {
        Self { cols: [c0, c1] }
    }

    /// Creates a `Mat2` from four consecutive column-major floats in `src`
    /// starting at `offset`.
    ///
    /// # Panics
    /// Panics if `offset + 4` exceeds `src.len()`.
    #[inline]
    pub fn from_slice(src: &[f32], offset: usize) -> Self {
        Self::from_cols(
            Vec2::from_slice(src, offset),
            Vec2::from_slice(src, offset + 2),
        )
    }

    /// Returns the elements as a column-major fixed array.
    #[inline]
    pub const fn to_array(&self) -> [f32; 4] {
        [
            self.cols[0].x,
            self.cols[0].y,
            self.cols[1].x,
            self.cols[1].y,
        ]
    }

    /// Appends the elements to `buf` in column-major order.
    #[inline]
    pub fn write_to(&self, buf: &mut Vec<f32>) {
        buf.extend_from_slice(&self.to_array());
    }

    /// Returns the transpose of the matrix.
    #[inline]
    pub fn transpose(&self) -> Self {
        Self::from_cols(
            Vec2::new(self.cols[0].x, self.cols[1].x),
            Vec2::new(self.cols[0].y, self.cols[1].y),
        )
    }

    /// Computes the determinant `m00*m11 - m01*m10`.
    #[inline]
    pub fn determinant(&self) -> f32 {
        (self.cols[0].x * self.cols[1].y) - (self.cols[0].y * self.cols[1].x)
    }
}

impl Default for Mat2 {
    /// Returns the 2x2 identity matrix.
    #[inline]
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Add for Mat2 {
    type Output = Self;
    /// Adds two matrices element-wise.
    #[inline]
    fn add(self, rhs: Self) -> Self::Output {
        Self::from_cols(self.cols[0] + rhs.cols[0], self.cols[1] + rhs.cols[1])
    }
}

impl Sub for Mat2 {
    type Output = Self;
    /// Subtracts two matrices element-wise.
    #[inline]
    fn sub(self, rhs: Self) -> Self::Output {
        Self::from_cols(self.cols[0] - rhs.cols[0], self.cols[1] - rhs.cols[1])
    }
}

impl Neg for Mat2 {
    type Output = Self;
    /// Negates every element of the matrix.
    #[inline]
    fn neg(self) -> Self::Output {
        Self::from_cols(-self.cols[0], -self.cols[1])
    }
}

impl Mul<Mat2> for Mat2 {
    type Output = Self;
    /// Multiplies this matrix by another `Mat2`.
    #[inline]
    fn mul(self, rhs: Mat2) -> Self::Output {
        Self::from_cols(self * rhs.cols[0], self * rhs.cols[1])
    }
}

impl Mul<Vec2> for Mat2 {
    type Output = Vec2;
    /// Transforms a `Vec2` by this matrix.
    #[inline]
    fn mul(self, v: Vec2) -> Self::Output {
        self.cols[0] * v.x + self.cols[1] * v.y
    }
}

impl Mul<f32> for Mat2 {
    type Output = Self;
    /// Multiplies every element of the matrix by a scalar.
    #[inline]
    fn mul(self, scalar: f32) -> Self::Output {
        Self::from_cols(self.cols[0] * scalar, self.cols[1] * scalar)
    }
}

impl Index<usize> for Mat2 {
    type Output = Vec2;
    /// Allows accessing a matrix column by index.
    #[inline]
    fn index(&self, index: usize) -> &Self::Output {
        &self.cols[index]
    }
}

// --- Mat3 ---

/// A 3x3 column-major matrix.
///
/// Its primary role is as the rotation and scale part of a [`Mat4`], most
/// notably as the normal matrix derived from a model transform.
#[derive(Debug, Clone, Copy, PartialEq)]
#[repr(C)]
pub struct Mat3 {
    /// The columns of the matrix. `cols[0]` is the first column.
    pub cols: [Vec3; 3],
}

impl Mat3 {
    /// The 3x3 identity matrix.
    pub const IDENTITY: Self = Self {
        cols: [Vec3::X, Vec3::Y, Vec3::Z],
    };

    /// A 3x3 matrix with all elements set to 0.
    pub const ZERO: Self = Self {
        cols: [Vec3::ZERO; 3],
    };

    /// Creates a new matrix from three column vectors.
    #[inline]
    pub const fn from_cols(c0: Vec3, c1: Vec3, c2: Vec3) -> Self {
        Self { cols: [c0, c1, c2] }
    }

    /// Creates a `Mat3` from nine consecutive column-major floats in `src`
    /// starting at `offset`.
    ///
    /// # Panics
    /// Panics if `offset + 9` exceeds `src.len()`.
    #[inline]
    pub fn from_slice(src: &[f32], offset: usize) -> Self {
        Self::from_cols(
            Vec3::from_slice(src, offset),
            Vec3::from_slice(src, offset + 3),
            Vec3::from_slice(src, offset + 6),
        )
    }

    /// Returns the elements as a column-major fixed array.
    #[inline]
    pub const fn to_array(&self) -> [f32; 9] {
        [
            self.cols[0].x,
            self.cols[0].y,
            self.cols[0].z,
            self.cols[1].x,
            self.cols[1].y,
            self.cols[1].z,
            self.cols[2].x,
            self.cols[2].y,
            self.cols[2].z,
        ]
    }

    /// Appends the elements to `buf` in column-major order.
    #[inline]
    pub fn write_to(&self, buf: &mut Vec<f32>) {
        buf.extend_from_slice(&self.to_array());
    }

    /// Creates a `Mat3` from the upper-left 3x3 corner of a [`Mat4`],
    /// discarding translation.
    #[inline]
    pub fn from_mat4(m4: &Mat4) -> Self {
        Self::from_cols(
            m4.cols[0].truncate(),
            m4.cols[1].truncate(),
            m4.cols[2].truncate(),
        )
    }

    /// Computes the determinant via the six-term expansion.
    #[inline]
    pub fn determinant(&self) -> f32 {
        let d = self.to_array();
        det3(d[0], d[1], d[2], d[3], d[4], d[5], d[6], d[7], d[8])
    }

    /// Returns the transpose of the matrix, where rows and columns are swapped.
    #[inline]
    pub fn transpose(&self) -> Self {
        Self::from_cols(
            Vec3::new(self.cols[0].x, self.cols[1].x, self.cols[2].x),
            Vec3::new(self.cols[0].y, self.cols[1].y, self.cols[2].y),
            Vec3::new(self.cols[0].z, self.cols[1].z, self.cols[2].z),
        )
    }

    /// Derives the normal matrix from a model matrix: the upper-left 3x3 of
    /// `transpose(inverse(model))`.
    ///
    /// This is the standard construction for transforming surface normals
    /// under non-uniform scaling. A singular model matrix falls back to the
    /// identity through [`Mat4::inverse`].
    #[inline]
    pub fn to_normal_matrix(model: &Mat4) -> Self {
        Self::from_mat4(&model.inverse().transpose())
    }
}

impl Default for Mat3 {
    /// Returns the 3x3 identity matrix.
    #[inline]
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Add for Mat3 {
    type Output = Self;
    /// Adds two matrices element-wise.
    #[inline]
    fn add(self, rhs: Self) -> Self::Output {
        Self::from_cols(
            self.cols[0] + rhs.cols[0],
            self.cols[1] + rhs.cols[1],
            self.cols[2] + rhs.cols[2],
        )
    }
}

impl Sub for Mat3 {
    type Output = Self;
    /// Subtracts two matrices element-wise.
    #[inline]
    fn sub(self, rhs: Self) -> Self::Output {
        Self::from_cols(
            self.cols[0] - rhs.cols[0],
            self.cols[1] - rhs.cols[1],
            self.cols[2] - rhs.cols[2],
        )
    }
}

impl Neg for Mat3 {
    type Output = Self;
    /// Negates every element of the matrix.
    #[inline]
    fn neg(self) -> Self::Output {
        Self::from_cols(-self.cols[0], -self.cols[1], -self.cols[2])
    }
}

impl Mul<Mat3> for Mat3 {
    type Output = Self;
    /// Multiplies this matrix by another `Mat3`.
    #[inline]
    fn mul(self, rhs: Mat3) -> Self::Output {
        Self::from_cols(self * rhs.cols[0], self * rhs.cols[1], self * rhs.cols[2])
    }
}

impl Mul<Vec3> for Mat3 {
    type Output = Vec3;
    /// Transforms a `Vec3` by this matrix.
    #[inline]
    fn mul(self, v: Vec3) -> Self::Output {
        self.cols[0] * v.x + self.cols[1] * v.y + self.cols[2] * v.z
    }
}

impl Mul<f32> for Mat3 {
    type Output = Self;
    /// Multiplies every element of the matrix by a scalar.
    #[inline]
    fn mul(self, scalar: f32) -> Self::Output {
        Self::from_cols(
            self.cols[0] * scalar,
            self.cols[1] * scalar,
            self.cols[2] * scalar,
        )
    }
}

impl Index<usize> for Mat3 {
    type Output = Vec3;
    /// Allows accessing a matrix column by index.
    #[inline]
    fn index(&self, index: usize) -> &Self::Output {
        &self.cols[index]
    }
}

// --- Mat4 ---

/// A 4x4 column-major matrix, used for 3D affine transformations and
/// projections.
///
/// This is the primary type for representing model, view, and projection
/// transforms. The composition builders ([`translate`](Self::translate),
/// [`scale`](Self::scale), [`rotate`](Self::rotate)) right-multiply an
/// elementary transform: each successive call applies its transform in
/// object space *before* the transforms already encoded in the matrix.
#[derive(Debug, Clone, Copy, PartialEq)]
#[repr(C)]
pub struct Mat4 {
    /// The columns of the matrix. `cols[0]` is the first column.
    pub cols: [Vec4; 4],
}

impl Mat4 {
    /// The 4x4 identity matrix.
    pub const IDENTITY: Self = Self {
        cols: [Vec4::X, Vec4::Y, Vec4::Z, Vec4::W],
    };

    /// A 4x4 matrix with all elements set to 0.
    pub const ZERO: Self = Self {
        cols: [Vec4::ZERO; 4],
    };

    /// Creates a new matrix from four column vectors.
    #[inline]
    pub const fn from_cols(c0: Vec4, c1: Vec4, c2: Vec4, c3: Vec4) -> Self {
        Self {
            cols: [c0, c1, c2, c3],
        }
    }

    /// Creates a `Mat4` from sixteen column-major floats.
    #[inline]
    pub fn from_array(d: [f32; 16]) -> Self {
        Self::from_cols(
            Vec4::new(d[0], d[1], d[2], d[3]),
            Vec4::new(d[4], d[5], d[6], d[7]),
            Vec4::new(d[8], d[9], d[10], d[11]),
            Vec4::new(d[12], d[13], d[14], d[15]),
        )
    }

    /// Creates a `Mat4` from sixteen consecutive column-major floats in `src`
    /// starting at `offset`.
    ///
    /// # Panics
    /// Panics if `offset + 16` exceeds `src.len()`.
    #[inline]
    pub fn from_slice(src: &[f32], offset: usize) -> Self {
        Self::from_cols(
            Vec4::from_slice(src, offset),
            Vec4::from_slice(src, offset + 4),
            Vec4::from_slice(src, offset + 8),
            Vec4::from_slice(src, offset + 12),
        )
    }

    /// Returns the elements as a column-major fixed array, where index
    /// `i + 4*j` holds row `i` of column `j`.
    #[inline]
    pub const fn to_array(&self) -> [f32; 16] {
        [
            self.cols[0].x,
            self.cols[0].y,
            self.cols[0].z,
            self.cols[0].w,
            self.cols[1].x,
            self.cols[1].y,
            self.cols[1].z,
            self.cols[1].w,
            self.cols[2].x,
            self.cols[2].y,
            self.cols[2].z,
            self.cols[2].w,
            self.cols[3].x,
            self.cols[3].y,
            self.cols[3].z,
            self.cols[3].w,
        ]
    }

    /// Appends the elements to `buf` in column-major order.
    #[inline]
    pub fn write_to(&self, buf: &mut Vec<f32>) {
        buf.extend_from_slice(&self.to_array());
    }

    /// Returns a row of the matrix as a `Vec4`.
    #[inline]
    pub fn get_row(&self, index: usize) -> Vec4 {
        Vec4 {
            x: self.cols[0].get(index),
            y: self.cols[1].get(index),
            z: self.cols[2].get(index),
            w: self.cols[3].get(index),
        }
    }

    /// Creates a translation matrix.
    #[inline]
    pub fn from_translation(v: Vec3) -> Self {
        Self::from_cols(Vec4::X, Vec4::Y, Vec4::Z, Vec4::new(v.x, v.y, v.z, 1.0))
    }

    /// Creates a non-uniform scaling matrix.
    #[inline]
    pub fn from_scale(scale: Vec3) -> Self {
        Self::from_cols(
            Vec4::new(scale.x, 0.0, 0.0, 0.0),
            Vec4::new(0.0, scale.y, 0.0, 0.0),
            Vec4::new(0.0, 0.0, scale.z, 0.0),
            Vec4::W,
        )
    }

    /// Creates a Rodrigues rotation matrix from an axis and an angle in
    /// radians. The axis is renormalized internally.
    #[inline]
    pub fn from_axis_angle(radians: f32, axis: Vec3) -> Self {
        let [c0, c1, c2] = rodrigues_columns(radians, axis);
        Self::from_cols(c0, c1, c2, Vec4::W)
    }

    /// Returns the transpose of the matrix, where rows and columns are swapped.
    #[inline]
    pub fn transpose(&self) -> Self {
        Self::from_cols(
            Vec4::new(
                self.cols[0].x,
                self.cols[1].x,
                self.cols[2].x,
                self.cols[3].x,
            ),
            Vec4::new(
                self.cols[0].y,
                self.cols[1].y,
                self.cols[2].y,
                self.cols[3].y,
            ),
            Vec4::new(
                self.cols[0].z,
                self.cols[1].z,
                self.cols[2].z,
                self.cols[3].z,
            ),
            Vec4::new(
                self.cols[0].w,
                self.cols[1].w,
                self.cols[2].w,
                self.cols[3].w,
            ),
        )
    }

    /// Computes the determinant by Laplace expansion along the first row,
    /// using four 3x3 minors with alternating signs.
    pub fn determinant(&self) -> f32 {
        let d = self.to_array();
        let mut det = det3(d[5], d[6], d[7], d[9], d[10], d[11], d[13], d[14], d[15]) * d[0];
        det += det3(d[1], d[2], d[3], d[9], d[10], d[11], d[13], d[14], d[15]) * -d[4];
        det += det3(d[1], d[2], d[3], d[5], d[6], d[7], d[13], d[14], d[15]) * d[8];
        det += det3(d[1], d[2], d[3], d[5], d[6], d[7], d[9], d[10], d[11]) * -d[12];
        det
    }

    /// Computes the inverse via the adjugate built from 3x3 cofactor minors.
    ///
    /// A singular matrix (determinant exactly `0.0`) returns
    /// [`Mat4::IDENTITY`] rather than failing. Callers that need to
    /// distinguish "no inverse" must check the determinant themselves.
    pub fn inverse(&self) -> Self {
        let det = self.determinant();
        if det == 0.0 {
            return Self::IDENTITY;
        }
        let inv_det = 1.0 / det;
        let d = self.to_array();
        let mut dest = [0.0f32; 16];
        // The adjugate transposes the cofactor matrix: the cofactors of the
        // first flat column land in the first row of the result, and so on.
        dest[0] = det3(d[5], d[6], d[7], d[9], d[10], d[11], d[13], d[14], d[15]);
        dest[4] = -det3(d[4], d[6], d[7], d[8], d[10], d[11], d[12], d[14], d[15]);
        dest[8] = det3(d[4], d[5], d[7], d[8], d[9], d[11], d[12], d[13], d[15]);
        dest[12] = -det3(d[4], d[5], d[6], d[8], d[9], d[10], d[12], d[13], d[14]);
        // cofactors of the second column
        dest[1] = -det3(d[1], d[2], d[3], d[9], d[10], d[11], d[13], d[14], d[15]);
        dest[5] = det3(d[0], d[2], d[3], d[8], d[10], d[11], d[12], d[14], d[15]);
        dest[9] = -det3(d[0], d[1], d[3], d[8], d[9], d[11], d[12], d[13], d[15]);
        dest[13] = det3(d[0], d[1], d[2], d[8], d[9], d[10], d[12], d[13], d[14]);
        // cofactors of the third column
        dest[2] = det3(d[1], d[2], d[3], d[5], d[6], d[7], d[13], d[14], d[15]);
        dest[6] = -det3(d[0], d[2], d[3], d[4], d[6], d[7], d[12], d[14], d[15]);
        dest[10] = det3(d[0], d[1], d[3], d[4], d[5], d[7], d[12], d[13], d[15]);
        dest[14] = -det3(d[0], d[1], d[2], d[4], d[5], d[6], d[12], d[13], d[14]);
        // cofactors of the fourth column
        dest[3] = -det3(d[1], d[2], d[3], d[5], d[6], d[7], d[9], d[10], d[11]);
        dest[7] = det3(d[0], d[2], d[3], d[4], d[6], d[7], d[8], d[10], d[11]);
        dest[11] = -det3(d[0], d[1], d[3], d[4], d[5], d[7], d[8], d[9], d[11]);
        dest[15] = det3(d[0], d[1], d[2], d[4], d[5], d[6], d[8], d[9], d[10]);
        Self::from_array(dest) * inv_det
    }

    /// Right-multiplies this matrix by an elementary translation, updating the
    /// translation column by this matrix's rotation/scale block times `dist`.
    pub fn translate(&self, dist: Vec3) -> Self {
        let [c0, c1, c2, c3] = self.cols;
        Self::from_cols(
            c0,
            c1,
            c2,
            Vec4::new(
                c3.x + (c0.x * dist.x + c1.x * dist.y + c2.x * dist.z),
                c3.y + (c0.y * dist.x + c1.y * dist.y + c2.y * dist.z),
                c3.z + (c0.z * dist.x + c1.z * dist.y + c2.z * dist.z),
                c3.w + (c0.w * dist.x + c1.w * dist.y + c2.w * dist.z),
            ),
        )
    }

    /// Right-multiplies this matrix by an elementary scale, scaling the three
    /// non-translation columns by `factor.x/y/z` respectively.
    pub fn scale(&self, factor: Vec3) -> Self {
        Self::from_cols(
            self.cols[0] * factor.x,
            self.cols[1] * factor.y,
            self.cols[2] * factor.z,
            self.cols[3],
        )
    }

    /// Right-multiplies this matrix by a Rodrigues rotation of `radians`
    /// around `axis`. The axis is renormalized internally.
    pub fn rotate(&self, radians: f32, axis: Vec3) -> Self {
        let [n0, n1, n2] = rodrigues_columns(radians, axis);
        let [c0, c1, c2, c3] = self.cols;
        Self::from_cols(
            c0 * n0.x + c1 * n0.y + c2 * n0.z,
            c0 * n1.x + c1 * n1.y + c2 * n1.z,
            c0 * n2.x + c1 * n2.y + c2 * n2.z,
            c3,
        )
    }

    /// Transforms a `Vec3` by the upper-left 3x3 block only, ignoring
    /// translation. Intended for direction vectors.
    pub fn transform_vec3(&self, v: Vec3) -> Vec3 {
        let d = self.to_array();
        Vec3::new(
            d[0] * v.x + d[4] * v.y + d[8] * v.z,
            d[1] * v.x + d[5] * v.y + d[9] * v.z,
            d[2] * v.x + d[6] * v.y + d[10] * v.z,
        )
    }

    /// Transforms a `Vec4` by the full matrix, including translation and `w`.
    #[inline]
    pub fn transform_vec4(&self, v: Vec4) -> Vec4 {
        *self * v
    }

    /// Generates an orthographic projection matrix over the given clip
    /// boundaries, with a `[-1, 1]` depth range.
    pub fn ortho(left: f32, right: f32, bottom: f32, top: f32, near: f32, far: f32) -> Self {
        let width = right - left;
        let height = top - bottom;
        let length = far - near;
        let mut dest = [0.0f32; 16];
        dest[0] = 2.0 / width;
        dest[5] = 2.0 / height;
        dest[10] = -2.0 / length;
        dest[12] = -(right + left) / width;
        dest[13] = -(top + bottom) / height;
        dest[14] = -(far + near) / length;
        dest[15] = 1.0;
        Self::from_array(dest)
    }

    /// Generates a perspective frustum projection matrix over the given clip
    /// boundaries, with a `[-1, 1]` depth range.
    pub fn frustum(left: f32, right: f32, bottom: f32, top: f32, near: f32, far: f32) -> Self {
        let width = right - left;
        let height = top - bottom;
        let length = far - near;
        let mut dest = [0.0f32; 16];
        dest[0] = (near * 2.0) / width;
        dest[5] = (near * 2.0) / height;
        dest[8] = (left + right) / width;
        dest[9] = (top + bottom) / height;
        dest[10] = -(far + near) / length;
        dest[11] = -1.0;
        dest[14] = -(far * near * 2.0) / length;
        Self::from_array(dest)
    }

    /// Generates a symmetric perspective projection matrix.
    ///
    /// `fov_degrees` is the vertical field of view in degrees: the frustum's
    /// top extent is `near * tan(fov_degrees * PI/360)` and the right extent
    /// is `top * aspect_ratio`.
    pub fn perspective(fov_degrees: f32, aspect_ratio: f32, near: f32, far: f32) -> Self {
        let top = near * (fov_degrees * PI_360).tan();
        let right = top * aspect_ratio;
        Self::frustum(-right, right, -top, top, near, far)
    }
}

/// The three rotation columns of a Rodrigues axis-angle matrix.
///
/// The axis is renormalized regardless of caller input.
fn rodrigues_columns(radians: f32, axis: Vec3) -> [Vec4; 3] {
    let axis = axis.normalize();
    let sin = radians.sin();
    let cos = radians.cos();
    let one_minus_cos = 1.0 - cos;
    let xx = axis.x * axis.x;
    let xy = axis.x * axis.y;
    let xz = axis.x * axis.z;
    let yy = axis.y * axis.y;
    let yz = axis.y * axis.z;
    let zz = axis.z * axis.z;

    [
        Vec4::new(
            xx + (1.0 - xx) * cos,
            xy * one_minus_cos + axis.z * sin,
            xz * one_minus_cos - axis.y * sin,
            0.0,
        ),
        Vec4::new(
            xy * one_minus_cos - axis.z * sin,
            yy + (1.0 - yy) * cos,
            yz * one_minus_cos + axis.x * sin,
            0.0,
        ),
        Vec4::new(
            xz * one_minus_cos + axis.y * sin,
            yz * one_minus_cos - axis.x * sin,
            zz + (1.0 - zz) * cos,
            0.0,
        ),
    ]
}

// --- Operator Overloads ---

impl Default for Mat4 {
    /// Returns the 4x4 identity matrix.
    #[inline]
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Add for Mat4 {
    type Output = Self;
    /// Adds two matrices element-wise.
    #[inline]
    fn add(self, rhs: Self) -> Self::Output {
        Self::from_cols(
            self.cols[0] + rhs.cols[0],
            self.cols[1] + rhs.cols[1],
            self.cols[2] + rhs.cols[2],
            self.cols[3] + rhs.cols[3],
        )
    }
}

impl Sub for Mat4 {
    type Output = Self;
    /// Subtracts two matrices element-wise.
    #[inline]
    fn sub(self, rhs: Self) -> Self::Output {
        Self::from_cols(
            self.cols[0] - rhs.cols[0],
            self.cols[1] - rhs.cols[1],
            self.cols[2] - rhs.cols[2],
            self.cols[3] - rhs.cols[3],
        )
    }
}

impl Neg for Mat4 {
    type Output = Self;
    /// Negates every element of the matrix.
    #[inline]
    fn neg(self) -> Self::Output {
        Self::from_cols(-self.cols[0], -self.cols[1], -self.cols[2], -self.cols[3])
    }
}

impl Mul<Mat4> for Mat4 {
    type Output = Self;
    /// Multiplies this matrix by another `Mat4`. Matrix multiplication is not
    /// commutative.
    #[inline]
    fn mul(self, rhs: Mat4) -> Self::Output {
        let mut result_cols = [Vec4::ZERO; 4];
        for (c_idx, target_col) in result_cols.iter_mut().enumerate() {
            let col_from_rhs = rhs.cols[c_idx];
            *target_col = Vec4 {
                x: self.get_row(0).dot(col_from_rhs),
                y: self.get_row(1).dot(col_from_rhs),
                z: self.get_row(2).dot(col_from_rhs),
                w: self.get_row(3).dot(col_from_rhs),
            };
        }
        Mat4 { cols: result_cols }
    }
}

impl Mul<Vec4> for Mat4 {
    type Output = Vec4;
    /// Transforms a `Vec4` by this matrix.
    #[inline]
    fn mul(self, rhs: Vec4) -> Self::Output {
        self.cols[0] * rhs.x + self.cols[1] * rhs.y + self.cols[2] * rhs.z + self.cols[3] * rhs.w
    }
}

impl Mul<f32> for Mat4 {
    type Output = Self;
    /// Multiplies every element of the matrix by a scalar.
    #[inline]
    fn mul(self, scalar: f32) -> Self::Output {
        Self::from_cols(
            self.cols[0] * scalar,
            self.cols[1] * scalar,
            self.cols[2] * scalar,
            self.cols[3] * scalar,
        )
    }
}

impl Index<usize> for Mat4 {
    type Output = Vec4;
    /// Allows accessing a matrix column by index.
    #[inline]
    fn index(&self, index: usize) -> &Self::Output {
        &self.cols[index]
    }
}

// --- Tests ---

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{approx_eq, approx_eq_eps, PI};

    fn vec3_approx_eq(a: Vec3, b: Vec3) -> bool {
        approx_eq(a.x, b.x) && approx_eq(a.y, b.y) && approx_eq(a.z, b.z)
    }

    fn vec4_approx_eq(a: Vec4, b: Vec4) -> bool {
        approx_eq(a.x, b.x) && approx_eq(a.y, b.y) && approx_eq(a.z, b.z) && approx_eq(a.w, b.w)
    }

    fn mat3_approx_eq(a: Mat3, b: Mat3) -> bool {
        vec3_approx_eq(a.cols[0], b.cols[0])
            && vec3_approx_eq(a.cols[1], b.cols[1])
            && vec3_approx_eq(a.cols[2], b.cols[2])
    }

    fn mat4_approx_eq_eps(a: Mat4, b: Mat4, eps: f32) -> bool {
        a.to_array()
            .iter()
            .zip(b.to_array().iter())
            .all(|(&x, &y)| approx_eq_eps(x, y, eps))
    }

    fn mat4_approx_eq(a: Mat4, b: Mat4) -> bool {
        mat4_approx_eq_eps(a, b, crate::EPSILON)
    }

    // --- Tests for Mat2 ---

    #[test]
    fn test_mat2_identity_determinant() {
        assert_eq!(Mat2::default(), Mat2::IDENTITY);
        assert_eq!(Mat2::IDENTITY.determinant(), 1.0);
        assert_eq!(Mat2::ZERO.determinant(), 0.0);
    }

    #[test]
    fn test_mat2_diag_determinant() {
        // [[2, 0], [0, 3]]
        let m = Mat2::new(2.0, 0.0, 0.0, 3.0);
        assert_eq!(m.determinant(), 6.0);
    }

    #[test]
    fn test_mat2_arithmetic() {
        let a = Mat2::new(1.0, 2.0, 3.0, 4.0);
        let b = Mat2::new(5.0, 6.0, 7.0, 8.0);
        assert_eq!(a + b, Mat2::new(6.0, 8.0, 10.0, 12.0));
        assert_eq!(b - a, Mat2::new(4.0, 4.0, 4.0, 4.0));
        assert_eq!(-a, Mat2::new(-1.0, -2.0, -3.0, -4.0));
        assert_eq!(a * 2.0, Mat2::new(2.0, 4.0, 6.0, 8.0));
    }

    #[test]
    fn test_mat2_mul() {
        let a = Mat2::new(1.0, 2.0, 3.0, 4.0);
        assert_eq!(a * Mat2::IDENTITY, a);
        assert_eq!(Mat2::IDENTITY * a, a);

        // Rotation by 90 degrees sends X to Y
        let rot = Mat2::new(0.0, 1.0, -1.0, 0.0);
        let v = rot * Vec2::X;
        assert!(approx_eq(v.x, 0.0) && approx_eq(v.y, 1.0));
    }

    #[test]
    fn test_mat2_transpose() {
        let m = Mat2::new(1.0, 2.0, 3.0, 4.0);
        assert_eq!(m.transpose(), Mat2::new(1.0, 3.0, 2.0, 4.0));
        assert_eq!(m.transpose().transpose(), m);
    }

    #[test]
    fn test_mat2_flat_roundtrip() {
        let m = Mat2::new(1.0, 2.0, 3.0, 4.0);
        let mut buf = Vec::new();
        m.write_to(&mut buf);
        assert_eq!(buf, vec![1.0, 2.0, 3.0, 4.0]);
        assert_eq!(Mat2::from_slice(&buf, 0), m);
    }

    // --- Tests for Mat3 ---

    #[test]
    fn test_mat3_determinant() {
        assert!(approx_eq(Mat3::IDENTITY.determinant(), 1.0));
        assert!(approx_eq(Mat3::ZERO.determinant(), 0.0));

        let m_scale = Mat3::from_cols(Vec3::X * 2.0, Vec3::Y * 3.0, Vec3::Z * 4.0);
        assert!(approx_eq(m_scale.determinant(), 24.0));
    }

    #[test]
    fn test_mat3_transpose() {
        let m = Mat3::from_cols(
            Vec3::new(1.0, 2.0, 3.0),
            Vec3::new(4.0, 5.0, 6.0),
            Vec3::new(7.0, 8.0, 9.0),
        );
        let expected = Mat3::from_cols(
            Vec3::new(1.0, 4.0, 7.0),
            Vec3::new(2.0, 5.0, 8.0),
            Vec3::new(3.0, 6.0, 9.0),
        );
        assert_eq!(m.transpose(), expected);
        assert_eq!(m.transpose().transpose(), m);
    }

    #[test]
    fn test_mat3_mul() {
        let m = Mat3::from_cols(
            Vec3::new(1.0, 2.0, 3.0),
            Vec3::new(4.0, 5.0, 6.0),
            Vec3::new(7.0, 8.0, 9.0),
        );
        assert!(mat3_approx_eq(m * Mat3::IDENTITY, m));
        assert!(mat3_approx_eq(Mat3::IDENTITY * m, m));

        let v = m * Vec3::new(1.0, 1.0, 1.0);
        assert!(vec3_approx_eq(v, Vec3::new(12.0, 15.0, 18.0)));
    }

    #[test]
    fn test_mat3_normal_matrix_identity() {
        let n = Mat3::to_normal_matrix(&Mat4::IDENTITY);
        assert!(mat3_approx_eq(n, Mat3::IDENTITY));
    }

    #[test]
    fn test_mat3_normal_matrix_non_uniform_scale() {
        // inverse of diag(2, 1, 1) is diag(0.5, 1, 1); transpose is the same
        let model = Mat4::from_scale(Vec3::new(2.0, 1.0, 1.0));
        let n = Mat3::to_normal_matrix(&model);
        let expected = Mat3::from_cols(Vec3::X * 0.5, Vec3::Y, Vec3::Z);
        assert!(mat3_approx_eq(n, expected));
    }

    #[test]
    fn test_mat3_normal_matrix_rotation_with_scale() {
        // model = R(60 deg about Z) * S(2, 1, 1); the normal matrix is
        // R * S^-1, which is not symmetric and so catches any transpose
        // mix-up in the inverse.
        let angle = PI / 3.0;
        let model = Mat4::from_axis_angle(angle, Vec3::Z).scale(Vec3::new(2.0, 1.0, 1.0));
        let n = Mat3::to_normal_matrix(&model);

        let (s, c) = angle.sin_cos();
        let expected = Mat3::from_cols(
            Vec3::new(0.5 * c, 0.5 * s, 0.0),
            Vec3::new(-s, c, 0.0),
            Vec3::Z,
        );
        assert!(mat3_approx_eq(n, expected));
    }

    #[test]
    fn test_mat3_flat_roundtrip() {
        let m = Mat3::from_cols(
            Vec3::new(1.0, 2.0, 3.0),
            Vec3::new(4.0, 5.0, 6.0),
            Vec3::new(7.0, 8.0, 9.0),
        );
        let mut buf = Vec::new();
        m.write_to(&mut buf);
        assert_eq!(buf.len(), 9);
        assert_eq!(Mat3::from_slice(&buf, 0), m);
    }

    // --- Tests for Mat4 ---

    #[test]
    fn test_mat4_identity() {
        assert_eq!(Mat4::default(), Mat4::IDENTITY);
        assert!(approx_eq(Mat4::IDENTITY.determinant(), 1.0));

        let m = Mat4::from_translation(Vec3::new(1.0, 2.0, 3.0));
        assert!(mat4_approx_eq(m * Mat4::IDENTITY, m));
        assert!(mat4_approx_eq(Mat4::IDENTITY * m, m));
    }

    #[test]
    fn test_mat4_translation() {
        let m = Mat4::from_translation(Vec3::new(1.0, 2.0, 3.0));
        let p = Vec4::new(1.0, 1.0, 1.0, 1.0);
        assert!(vec4_approx_eq(m * p, Vec4::new(2.0, 3.0, 4.0, 1.0)));
    }

    #[test]
    fn test_mat4_scale() {
        let m = Mat4::from_scale(Vec3::new(2.0, 3.0, 4.0));
        let p = Vec4::new(1.0, 1.0, 1.0, 1.0);
        assert!(vec4_approx_eq(m * p, Vec4::new(2.0, 3.0, 4.0, 1.0)));
    }

    #[test]
    fn test_mat4_axis_angle_rotation() {
        // 90 degrees around Z sends X to Y
        let m = Mat4::from_axis_angle(PI / 2.0, Vec3::Z);
        let p = Vec4::new(1.0, 0.0, 0.0, 1.0);
        assert!(vec4_approx_eq(m * p, Vec4::new(0.0, 1.0, 0.0, 1.0)));

        // Axis is renormalized internally
        let m_long_axis = Mat4::from_axis_angle(PI / 2.0, Vec3::new(0.0, 0.0, 5.0));
        assert!(mat4_approx_eq(m, m_long_axis));
    }

    #[test]
    fn test_mat4_transpose() {
        let m = Mat4::from_cols(
            Vec4::new(1., 2., 3., 4.),
            Vec4::new(5., 6., 7., 8.),
            Vec4::new(9., 10., 11., 12.),
            Vec4::new(13., 14., 15., 16.),
        );
        let expected = Mat4::from_cols(
            Vec4::new(1., 5., 9., 13.),
            Vec4::new(2., 6., 10., 14.),
            Vec4::new(3., 7., 11., 15.),
            Vec4::new(4., 8., 12., 16.),
        );
        assert_eq!(m.transpose(), expected);
        assert!(mat4_approx_eq(m.transpose().transpose(), m));
    }

    #[test]
    fn test_mat4_mul_order() {
        let t = Mat4::from_translation(Vec3::new(1.0, 0.0, 0.0));
        let r = Mat4::from_axis_angle(PI / 2.0, Vec3::Z);
        let p = Vec4::new(1.0, 0.0, 0.0, 1.0);

        // Translate then rotate: (1,0,0) -> (2,0,0) -> (0,2,0)
        assert!(vec4_approx_eq(r * t * p, Vec4::new(0.0, 2.0, 0.0, 1.0)));

        // Rotate then translate: (1,0,0) -> (0,1,0) -> (1,1,0)
        assert!(vec4_approx_eq(t * r * p, Vec4::new(1.0, 1.0, 0.0, 1.0)));
    }

    #[test]
    fn test_mat4_determinant() {
        let m = Mat4::from_scale(Vec3::new(2.0, 3.0, 4.0));
        assert!(approx_eq(m.determinant(), 24.0));

        let r = Mat4::from_axis_angle(PI / 5.0, Vec3::new(1.0, 1.0, 0.0));
        assert!(approx_eq(r.determinant(), 1.0));
    }

    #[test]
    fn test_mat4_inverse() {
        let m = Mat4::from_translation(Vec3::new(1., 2., 3.))
            .rotate(PI / 4.0, Vec3::Y)
            .scale(Vec3::new(1., 2., 1.));
        let inv = m.inverse();
        assert!(mat4_approx_eq_eps(m * inv, Mat4::IDENTITY, 1e-4));
        assert!(mat4_approx_eq_eps(inv * m, Mat4::IDENTITY, 1e-4));
    }

    #[test]
    fn test_mat4_inverse_of_rotation_is_transpose() {
        // For a pure rotation the inverse is exactly the transpose; this
        // distinguishes a correctly transposed adjugate from its mirror.
        let r = Mat4::from_axis_angle(1.1, Vec3::new(0.4, -1.0, 0.3));
        assert!(mat4_approx_eq_eps(r.inverse(), r.transpose(), 1e-5));

        let p = Vec4::new(0.7, -0.2, 1.3, 1.0);
        let back = r.inverse() * (r * p);
        assert!(vec4_approx_eq(back, p));
    }

    #[test]
    fn test_mat4_inverse_singular_is_identity() {
        let singular = Mat4::from_scale(Vec3::new(1.0, 0.0, 1.0));
        assert_eq!(singular.inverse(), Mat4::IDENTITY);
        assert_eq!(Mat4::ZERO.inverse(), Mat4::IDENTITY);
    }

    #[test]
    fn test_mat4_translate_builder() {
        let m = Mat4::IDENTITY.translate(Vec3::new(1.0, 2.0, 3.0));
        assert!(mat4_approx_eq(m, Mat4::from_translation(Vec3::new(1.0, 2.0, 3.0))));

        // Composition matches explicit right-multiplication
        let base = Mat4::from_axis_angle(0.7, Vec3::new(1.0, 2.0, 0.5));
        let composed = base.translate(Vec3::new(3.0, -1.0, 2.0));
        let reference = base * Mat4::from_translation(Vec3::new(3.0, -1.0, 2.0));
        assert!(mat4_approx_eq(composed, reference));
    }

    #[test]
    fn test_mat4_scale_builder() {
        let base = Mat4::from_axis_angle(1.1, Vec3::new(0.3, 1.0, -0.2));
        let composed = base.scale(Vec3::new(2.0, 0.5, 3.0));
        let reference = base * Mat4::from_scale(Vec3::new(2.0, 0.5, 3.0));
        assert!(mat4_approx_eq(composed, reference));
    }

    #[test]
    fn test_mat4_rotate_builder() {
        let base = Mat4::from_translation(Vec3::new(5.0, 0.0, -2.0));
        let composed = base.rotate(PI / 3.0, Vec3::new(1.0, 1.0, 1.0));
        let reference = base * Mat4::from_axis_angle(PI / 3.0, Vec3::new(1.0, 1.0, 1.0));
        assert!(mat4_approx_eq(composed, reference));
    }

    #[test]
    fn test_mat4_chained_composition() {
        // translate then scale: the scale applies in object space before the
        // translation, so the translated origin is unaffected by the scale.
        let m = Mat4::IDENTITY
            .translate(Vec3::new(10.0, 0.0, 0.0))
            .scale(Vec3::new(2.0, 1.0, 1.0));
        let p = m.transform_vec4(Vec4::new(1.0, 0.0, 0.0, 1.0));
        assert!(vec4_approx_eq(p, Vec4::new(12.0, 0.0, 0.0, 1.0)));
    }

    #[test]
    fn test_mat4_transform_vec3_ignores_translation() {
        let m = Mat4::from_translation(Vec3::new(100.0, 100.0, 100.0));
        let dir = m.transform_vec3(Vec3::new(0.0, 0.0, 1.0));
        assert!(vec3_approx_eq(dir, Vec3::Z));

        let s = Mat4::from_scale(Vec3::new(2.0, 3.0, 4.0));
        assert!(vec3_approx_eq(
            s.transform_vec3(Vec3::ONE),
            Vec3::new(2.0, 3.0, 4.0)
        ));
    }

    #[test]
    fn test_mat4_ortho() {
        let m = Mat4::ortho(-1.0, 1.0, -1.0, 1.0, 0.1, 100.0);
        let d = m.to_array();
        assert!(approx_eq(d[0], 1.0));
        assert!(approx_eq(d[5], 1.0));
        assert!(approx_eq(d[10], -2.0 / 99.9));
        assert!(approx_eq(d[14], -100.1 / 99.9));
        assert!(approx_eq(d[15], 1.0));
    }

    #[test]
    fn test_mat4_frustum_and_perspective() {
        let fov = 90.0f32;
        let near = 0.1;
        let far = 100.0;
        let m = Mat4::perspective(fov, 1.0, near, far);

        // For a 90 degree fov and square aspect, top == near
        let top = near * (fov * PI_360).tan();
        assert!(approx_eq(top, near));

        let reference = Mat4::frustum(-top, top, -top, top, near, far);
        assert!(mat4_approx_eq(m, reference));

        let d = m.to_array();
        assert!(approx_eq(d[11], -1.0));
        assert!(approx_eq(d[10], -(far + near) / (far - near)));
    }

    #[test]
    fn test_mat4_flat_roundtrip() {
        let m = Mat4::from_translation(Vec3::new(1.0, 2.0, 3.0));
        let mut buf = Vec::new();
        m.write_to(&mut buf);
        assert_eq!(buf.len(), 16);
        // Translation occupies indices 12..15 of the column-major layout
        assert_eq!(&buf[12..16], &[1.0, 2.0, 3.0, 1.0]);
        assert_eq!(Mat4::from_slice(&buf, 0), m);
    }

    #[test]
    #[should_panic]
    fn test_mat4_from_slice_out_of_bounds() {
        let data = [0.0f32; 16];
        let _ = Mat4::from_slice(&data, 1);
    }
}
