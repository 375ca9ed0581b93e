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

//! Provides a quaternion type for representing 3D rotations.

use serde::{Deserialize, Serialize};

use super::matrix::Mat4;
use super::vector::Vec3;
use super::RAD_TO_DEG;
use std::ops::{Mul, MulAssign};

/// A quaternion, stored as `(x, y, z, w)` where `[x, y, z]` is the vector
/// part and `w` is the scalar part.
///
/// Rotation-producing constructors yield unit quaternions; [`new`](Self::new)
/// does not. [`to_matrix`](Self::to_matrix) and the Hamilton product assume
/// unit input, so renormalize after long chains of multiplications.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[repr(C)]
pub struct Quat {
    /// The x component of the vector part.
    pub x: f32,
    /// The y component of the vector part.
    pub y: f32,
    /// The z component of the vector part.
    pub z: f32,
    /// The scalar (real) part.
    pub w: f32,
}

impl Quat {
    /// The identity quaternion, representing no rotation.
    pub const IDENTITY: Self = Self {
        x: 0.0,
        y: 0.0,
        z: 0.0,
        w: 1.0,
    };

    /// A pure quaternion along the x axis (a half-turn around x).
    pub const UNIT_X: Self = Self {
        x: 1.0,
        y: 0.0,
        z: 0.0,
        w: 0.0,
    };

    /// A pure quaternion along the y axis (a half-turn around y).
    pub const UNIT_Y: Self = Self {
        x: 0.0,
        y: 1.0,
        z: 0.0,
        w: 0.0,
    };

    /// A pure quaternion along the z axis (a half-turn around z).
    pub const UNIT_Z: Self = Self {
        x: 0.0,
        y: 0.0,
        z: 1.0,
        w: 0.0,
    };

    /// Creates a quaternion from its raw components.
    ///
    /// This does not guarantee a unit quaternion; prefer
    /// [`from_axis_angle`](Self::from_axis_angle) or
    /// [`from_euler`](Self::from_euler) when building rotations.
    #[inline]
    pub const fn new(x: f32, y: f32, z: f32, w: f32) -> Self {
        Self { x, y, z, w }
    }

    /// Creates a rotation of `radians` around `axis`.
    ///
    /// `axis` must be a unit vector; it is used as given.
    #[inline]
    pub fn from_axis_angle(radians: f32, axis: Vec3) -> Self {
        let half_angle = radians / 2.0;
        let s = half_angle.sin();
        Self {
            x: axis.x * s,
            y: axis.y * s,
            z: axis.z * s,
            w: half_angle.cos(),
        }
    }

    /// Creates a rotation from three Euler angles in radians, combined in
    /// z-y-x order.
    pub fn from_euler(yaw: f32, pitch: f32, roll: f32) -> Self {
        let c1 = (yaw / 2.0).cos();
        let c2 = (pitch / 2.0).cos();
        let c3 = (roll / 2.0).cos();
        let s1 = (yaw / 2.0).sin();
        let s2 = (pitch / 2.0).sin();
        let s3 = (roll / 2.0).sin();
        Self {
            w: c1 * c2 * c3 - s1 * s2 * s3,
            x: s1 * s2 * c3 + c1 * c2 * s3,
            y: s1 * c2 * c3 + c1 * s2 * s3,
            z: c1 * s2 * c3 + s1 * c2 * s3,
        }
    }

    /// Creates a `Quat` from four consecutive floats (`x, y, z, w`) in `src`
    /// starting at `offset`.
    ///
    /// # Panics
    /// Panics if `offset + 4` exceeds `src.len()`.
    #[inline]
    pub fn from_slice(src: &[f32], offset: usize) -> Self {
        Self::new(
            src[offset],
            src[offset + 1],
            src[offset + 2],
            src[offset + 3],
        )
    }

    /// Returns the components as a fixed array `[x, y, z, w]`.
    #[inline]
    pub const fn to_array(&self) -> [f32; 4] {
        [self.x, self.y, self.z, self.w]
    }

    /// Appends the components to `buf` as `x, y, z, w`.
    #[inline]
    pub fn write_to(&self, buf: &mut Vec<f32>) {
        buf.extend_from_slice(&self.to_array());
    }

    /// Calculates the squared length of the quaternion.
    #[inline]
    pub fn length_squared(&self) -> f32 {
        self.x * self.x + self.y * self.y + self.z * self.z + self.w * self.w
    }

    /// Calculates the length of the quaternion.
    #[inline]
    pub fn length(&self) -> f32 {
        self.length_squared().sqrt()
    }

    /// Returns the quaternion scaled to length 1.
    ///
    /// The division is unguarded: normalizing a zero quaternion yields NaN
    /// components rather than a fallback value.
    #[inline]
    pub fn normalize(&self) -> Self {
        let length = self.length();
        Self::new(
            self.x / length,
            self.y / length,
            self.z / length,
            self.w / length,
        )
    }

    /// Converts this quaternion into a 4x4 rotation matrix.
    ///
    /// Only valid for unit quaternions; non-unit input silently produces a
    /// scaled matrix.
    pub fn to_matrix(&self) -> Mat4 {
        let sqw = self.w * self.w;
        let sqx = self.x * self.x;
        let sqy = self.y * self.y;
        let sqz = self.z * self.z;

        let mut mat = [0.0f32; 16];
        mat[0] = sqx - sqy - sqz + sqw;
        mat[5] = -sqx + sqy - sqz + sqw;
        mat[10] = -sqx - sqy + sqz + sqw;

        let mut tmp1 = self.x * self.y;
        let mut tmp2 = self.z * self.w;
        mat[1] = 2.0 * (tmp1 + tmp2);
        mat[4] = 2.0 * (tmp1 - tmp2);

        tmp1 = self.x * self.z;
        tmp2 = self.y * self.w;
        mat[2] = 2.0 * (tmp1 - tmp2);
        mat[8] = 2.0 * (tmp1 + tmp2);

        tmp1 = self.y * self.z;
        tmp2 = self.x * self.w;
        mat[6] = 2.0 * (tmp1 + tmp2);
        mat[9] = 2.0 * (tmp1 - tmp2);
        mat[15] = 1.0;
        Mat4::from_array(mat)
    }

    /// Creates a quaternion from the rotation part of a 4x4 matrix.
    ///
    /// Branches on the trace or the dominant diagonal element to keep the
    /// square root well-conditioned, then normalizes the result. Only the
    /// upper 3x3 block is read.
    pub fn from_rotation_matrix(m: &Mat4) -> Self {
        let m00 = m.cols[0].x;
        let m10 = m.cols[0].y;
        let m20 = m.cols[0].z;
        let m01 = m.cols[1].x;
        let m11 = m.cols[1].y;
        let m21 = m.cols[1].z;
        let m02 = m.cols[2].x;
        let m12 = m.cols[2].y;
        let m22 = m.cols[2].z;

        let trace = m00 + m11 + m22;
        let mut q = Self::IDENTITY;

        if trace > 0.0 {
            let s = 2.0 * (trace + 1.0).sqrt();
            q.w = 0.25 * s;
            q.x = (m21 - m12) / s;
            q.y = (m02 - m20) / s;
            q.z = (m10 - m01) / s;
        } else if m00 > m11 && m00 > m22 {
            let s = 2.0 * (1.0 + m00 - m11 - m22).sqrt();
            q.w = (m21 - m12) / s;
            q.x = 0.25 * s;
            q.y = (m01 + m10) / s;
            q.z = (m02 + m20) / s;
        } else if m11 > m22 {
            let s = 2.0 * (1.0 + m11 - m00 - m22).sqrt();
            q.w = (m02 - m20) / s;
            q.x = (m01 + m10) / s;
            q.y = 0.25 * s;
            q.z = (m12 + m21) / s;
        } else {
            let s = 2.0 * (1.0 + m22 - m00 - m11).sqrt();
            q.w = (m10 - m01) / s;
            q.x = (m02 + m20) / s;
            q.y = (m12 + m21) / s;
            q.z = 0.25 * s;
        }
        q.normalize()
    }

    /// Decomposes this quaternion into per-axis angles in **degrees**,
    /// packed as `Vec3(pitch, yaw, roll)`.
    ///
    /// The decomposition is approximate near the poles: when
    /// `|w*x - y*z| >= 0.4999` the rotation is within a fraction of a degree
    /// of gimbal lock, and the roll angle is folded into yaw with pitch
    /// pinned to +-90. Yaw is wrapped into `[-180, 180]`.
    pub fn to_axis_angles(&self) -> Vec3 {
        let test = self.w * self.x - self.y * self.z;
        let (r1, r2, r3) = if test.abs() < 0.4999 {
            (
                (2.0 * (self.w * self.z + self.x * self.y))
                    .atan2(1.0 - 2.0 * (self.z * self.z + self.x * self.x)),
                (2.0 * test).asin(),
                (2.0 * (self.w * self.y + self.z * self.x))
                    .atan2(1.0 - 2.0 * (self.x * self.x + self.y * self.y)),
            )
        } else {
            let sign = if test < 0.0 { -1.0 } else { 1.0 };
            (
                0.0,
                sign * std::f32::consts::FRAC_PI_2,
                -sign * 2.0 * self.z.atan2(self.w),
            )
        };

        let roll = r1 * RAD_TO_DEG;
        let pitch = r2 * RAD_TO_DEG;
        let mut yaw = r3 * RAD_TO_DEG;
        if yaw > 180.0 {
            yaw -= 360.0;
        } else if yaw < -180.0 {
            yaw += 360.0;
        }
        Vec3::new(pitch, yaw, roll)
    }
}

// --- Operator Overloads ---

impl Default for Quat {
    /// Returns the identity quaternion, representing no rotation.
    #[inline]
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Mul<Quat> for Quat {
    type Output = Self;
    /// Combines two rotations using the Hamilton product. Quaternion
    /// multiplication is not commutative.
    #[inline]
    fn mul(self, rhs: Self) -> Self::Output {
        Self {
            x: self.w * rhs.x + self.x * rhs.w + self.y * rhs.z - self.z * rhs.y,
            y: self.w * rhs.y + self.y * rhs.w + self.z * rhs.x - self.x * rhs.z,
            z: self.w * rhs.z + self.z * rhs.w + self.x * rhs.y - self.y * rhs.x,
            w: self.w * rhs.w - self.x * rhs.x - self.y * rhs.y - self.z * rhs.z,
        }
    }
}

impl MulAssign<Quat> for Quat {
    /// Combines this rotation with another.
    #[inline]
    fn mul_assign(&mut self, rhs: Self) {
        *self = *self * rhs;
    }
}
