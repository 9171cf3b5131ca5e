use core::ops::Mul;

use crate::{Euler, Vec3};

/// 4x4 matrix in column-major order (`m[col * 4 + row]`), OpenGL layout.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Mat4 {
    pub m: [f64; 16],
}

impl Default for Mat4 {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Mat4 {
    pub const IDENTITY: Mat4 = Mat4 {
        m: [
            1.0, 0.0, 0.0, 0.0, //
            0.0, 1.0, 0.0, 0.0, //
            0.0, 0.0, 1.0, 0.0, //
            0.0, 0.0, 0.0, 1.0,
        ],
    };

    #[inline]
    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.m[col * 4 + row]
    }

    pub fn translation(t: Vec3) -> Self {
        let mut out = Self::IDENTITY;
        out.m[12] = t.x;
        out.m[13] = t.y;
        out.m[14] = t.z;
        out
    }

    pub fn rotation_x(deg: f64) -> Self {
        let (s, c) = deg.to_radians().sin_cos();
        let mut out = Self::IDENTITY;
        out.m[5] = c;
        out.m[6] = s;
        out.m[9] = -s;
        out.m[10] = c;
        out
    }

    pub fn rotation_y(deg: f64) -> Self {
        let (s, c) = deg.to_radians().sin_cos();
        let mut out = Self::IDENTITY;
        out.m[0] = c;
        out.m[2] = -s;
        out.m[8] = s;
        out.m[10] = c;
        out
    }

    pub fn rotation_z(deg: f64) -> Self {
        let (s, c) = deg.to_radians().sin_cos();
        let mut out = Self::IDENTITY;
        out.m[0] = c;
        out.m[1] = s;
        out.m[4] = -s;
        out.m[5] = c;
        out
    }

    /// `Rx(pitch) * Ry(yaw) * Rz(roll)`.
    pub fn rotation(angles: Euler) -> Self {
        Self::rotation_x(angles.pitch) * Self::rotation_y(angles.yaw) * Self::rotation_z(angles.roll)
    }

    /// Model matrix: rotate about the local origin, then place at `location`.
    pub fn model(location: Vec3, angles: Euler) -> Self {
        Self::translation(location) * Self::rotation(angles)
    }

    /// View matrix for an eye at `eye`: `Rz(roll) * Rx(pitch) * Ry(yaw) * T(-eye)`.
    ///
    /// Roll is applied last so it turns about the line of sight and never changes where the eye points.
    pub fn view(eye: Vec3, angles: Euler) -> Self {
        Self::rotation_z(angles.roll)
            * Self::rotation_x(angles.pitch)
            * Self::rotation_y(angles.yaw)
            * Self::translation(-eye)
    }

    /// Right-handed perspective projection with clip-space depth in `[-1, 1]`.
    pub fn perspective(fov_y_rad: f64, aspect: f64, znear: f64, zfar: f64) -> Self {
        let scale_y = 1.0 / (fov_y_rad * 0.5).tan();
        let scale_x = scale_y / aspect;
        let depth = znear - zfar;
        let mut m = [0.0; 16];
        m[0] = scale_x;
        m[5] = scale_y;
        m[10] = (znear + zfar) / depth;
        m[11] = -1.0;
        m[14] = (2.0 * znear * zfar) / depth;
        Self { m }
    }

    #[inline]
    pub fn transform_point(&self, p: Vec3) -> Vec3 {
        let m = &self.m;
        Vec3::new(
            m[0] * p.x + m[4] * p.y + m[8] * p.z + m[12],
            m[1] * p.x + m[5] * p.y + m[9] * p.z + m[13],
            m[2] * p.x + m[6] * p.y + m[10] * p.z + m[14],
        )
    }

    #[inline]
    pub fn transform_vector(&self, v: Vec3) -> Vec3 {
        let m = &self.m;
        Vec3::new(
            m[0] * v.x + m[4] * v.y + m[8] * v.z,
            m[1] * v.x + m[5] * v.y + m[9] * v.z,
            m[2] * v.x + m[6] * v.y + m[10] * v.z,
        )
    }

    /// Row `i` of the upper 3x3 block.
    #[inline]
    pub fn row3(&self, i: usize) -> Vec3 {
        Vec3::new(self.m[i], self.m[4 + i], self.m[8 + i])
    }

    pub fn to_cols_f32(&self) -> [f32; 16] {
        let mut out = [0.0f32; 16];
        for (dst, src) in out.iter_mut().zip(self.m.iter()) {
            *dst = *src as f32;
        }
        out
    }
}

impl Mul for Mat4 {
    type Output = Mat4;

    fn mul(self, rhs: Mat4) -> Mat4 {
        let mut out = [0.0; 16];
        for col in 0..4 {
            for row in 0..4 {
                let mut acc = 0.0;
                for k in 0..4 {
                    acc += self.m[k * 4 + row] * rhs.m[col * 4 + k];
                }
                out[col * 4 + row] = acc;
            }
        }
        Mat4 { m: out }
    }
}
