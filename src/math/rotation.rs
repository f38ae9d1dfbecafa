use crate::config::Tolerances;
use crate::math::{Matrix3, Matrix4, Vector3, AXIS_ANGLE_EPSILON, SLERP_LINEAR_THRESHOLD};
use std::fmt;
use std::ops::{Add, Index, IndexMut, Mul, MulAssign, Neg, Sub};

#[cfg(feature = "serialize")]
use serde::{Serialize, Deserialize};

/// Quaternion `w + xi + yj + zk` for representing rotations in 3D space.
///
/// Components are ordered `(x, y, z, w)` for indexing and array conversion.
/// Rotations are expected to be unit length; nothing enforces it.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(
    feature = "serialize",
    derive(Serialize, Deserialize),
    serde(from = "[f64; 4]", into = "[f64; 4]")
)]
pub struct Quaternion {
    /// First imaginary component
    pub x: f64,

    /// Second imaginary component
    pub y: f64,

    /// Third imaginary component
    pub z: f64,

    /// Real component
    pub w: f64,
}

/// Rotation trait for rotation representations
pub trait Rotation {
    /// Rotate a vector by this rotation
    fn rotate_vector(&self, v: Vector3) -> Vector3;

    /// Get the angle in radians of this rotation
    fn angle(&self) -> f64;

    /// Get the axis of this rotation
    fn axis(&self) -> Vector3;
}

impl Quaternion {
    /// Creates a new quaternion
    #[inline]
    pub fn new(x: f64, y: f64, z: f64, w: f64) -> Self {
        Self { x, y, z, w }
    }

    /// Creates an identity quaternion (no rotation)
    #[inline]
    pub fn identity() -> Self {
        Self::new(0.0, 0.0, 0.0, 1.0)
    }

    /// Creates a quaternion from an axis-angle representation (axis normalized internally)
    pub fn from_axis_angle(axis: Vector3, angle: f64) -> Self {
        let (s, c) = (angle * 0.5).sin_cos();
        let axis = axis.normalize();

        Self::new(axis.x * s, axis.y * s, axis.z * s, c)
    }

    /// Creates a quaternion from Euler angles in radians (x = roll, y = pitch, z = yaw)
    pub fn from_euler(x: f64, y: f64, z: f64) -> Self {
        let (sin_x, cos_x) = (x * 0.5).sin_cos();
        let (sin_y, cos_y) = (y * 0.5).sin_cos();
        let (sin_z, cos_z) = (z * 0.5).sin_cos();

        Self {
            x: sin_x * cos_y * cos_z - cos_x * sin_y * sin_z,
            y: cos_x * sin_y * cos_z + sin_x * cos_y * sin_z,
            z: cos_x * cos_y * sin_z - sin_x * sin_y * cos_z,
            w: cos_x * cos_y * cos_z + sin_x * sin_y * sin_z,
        }
    }

    /// Rotation whose local +Z points along `forward`, with `up` as the roll hint
    pub fn look_rotation(forward: Vector3, up: Vector3) -> Self {
        let forward = forward.normalize();
        let right = up.cross(&forward).normalize();
        let up = forward.cross(&right);

        Self::from_rotation_matrix(&Matrix3::from_columns(right, up, forward))
    }

    /// Creates a quaternion from an orthonormal rotation matrix.
    ///
    /// Uses the trace when it is positive; otherwise pivots on the largest
    /// diagonal element so the divisor stays away from zero near 180 degrees.
    pub fn from_rotation_matrix(m: &Matrix3) -> Self {
        let m00 = m.element(0, 0);
        let m01 = m.element(0, 1);
        let m02 = m.element(0, 2);
        let m10 = m.element(1, 0);
        let m11 = m.element(1, 1);
        let m12 = m.element(1, 2);
        let m20 = m.element(2, 0);
        let m21 = m.element(2, 1);
        let m22 = m.element(2, 2);

        let trace = m00 + m11 + m22;

        if trace > 0.0 {
            let s = 0.5 / (trace + 1.0).sqrt();
            Self {
                x: (m21 - m12) * s,
                y: (m02 - m20) * s,
                z: (m10 - m01) * s,
                w: 0.25 / s,
            }
        } else if m00 > m11 && m00 > m22 {
            let s = 2.0 * (1.0 + m00 - m11 - m22).sqrt();
            Self {
                x: 0.25 * s,
                y: (m01 + m10) / s,
                z: (m02 + m20) / s,
                w: (m21 - m12) / s,
            }
        } else if m11 > m22 {
            let s = 2.0 * (1.0 + m11 - m00 - m22).sqrt();
            Self {
                x: (m01 + m10) / s,
                y: 0.25 * s,
                z: (m12 + m21) / s,
                w: (m02 - m20) / s,
            }
        } else {
            let s = 2.0 * (1.0 + m22 - m00 - m11).sqrt();
            Self {
                x: (m02 + m20) / s,
                y: (m12 + m21) / s,
                z: 0.25 * s,
                w: (m10 - m01) / s,
            }
        }
    }

    /// Converts the quaternion to a 3x3 rotation matrix
    #[inline]
    pub fn to_matrix3(&self) -> Matrix3 {
        Matrix3::from_quaternion(self)
    }

    /// Converts the quaternion to a 4x4 rotation matrix
    #[inline]
    pub fn to_matrix4(&self) -> Matrix4 {
        Matrix4::from_quaternion(self)
    }

    /// Hamilton product `self * other`: applies `other` first, then `self`
    #[inline]
    pub fn multiply(&self, other: &Self) -> Self {
        Self {
            x: self.w * other.x + self.x * other.w + self.y * other.z - self.z * other.y,
            y: self.w * other.y - self.x * other.z + self.y * other.w + self.z * other.x,
            z: self.w * other.z + self.x * other.y - self.y * other.x + self.z * other.w,
            w: self.w * other.w - self.x * other.x - self.y * other.y - self.z * other.z,
        }
    }

    /// Multiplies every component by a scalar
    #[inline]
    pub fn scale_by(&self, scalar: f64) -> Self {
        Self::new(self.x * scalar, self.y * scalar, self.z * scalar, self.w * scalar)
    }

    /// Returns the conjugate of this quaternion
    #[inline]
    pub fn conjugate(&self) -> Self {
        Self::new(-self.x, -self.y, -self.z, self.w)
    }

    /// Returns the squared length of this quaternion
    #[inline]
    pub fn length_squared(&self) -> f64 {
        self.dot(self)
    }

    /// Returns the length of this quaternion
    #[inline]
    pub fn length(&self) -> f64 {
        self.length_squared().sqrt()
    }

    /// Returns a unit-length copy. A zero quaternion yields NaN components.
    #[inline]
    pub fn normalize(&self) -> Self {
        let len = self.length();
        Self::new(self.x / len, self.y / len, self.z / len, self.w / len)
    }

    /// Normalizes this quaternion in-place (mutates the receiver)
    #[inline]
    pub fn normalize_mut(&mut self) {
        *self = self.normalize();
    }

    /// Multiplicative inverse: conjugate divided by the squared length
    #[inline]
    pub fn inverse(&self) -> Self {
        self.conjugate().scale_by(1.0 / self.length_squared())
    }

    /// Computes the dot product of two quaternions
    #[inline]
    pub fn dot(&self, other: &Self) -> f64 {
        self.x * other.x + self.y * other.y + self.z * other.z + self.w * other.w
    }

    /// Componentwise linear interpolation, renormalized
    pub fn lerp(&self, other: &Self, t: f64) -> Self {
        Self {
            x: self.x + (other.x - self.x) * t,
            y: self.y + (other.y - self.y) * t,
            z: self.z + (other.z - self.z) * t,
            w: self.w + (other.w - self.w) * t,
        }
        .normalize()
    }

    /// Spherical linear interpolation along the shorter arc.
    ///
    /// Falls back to `lerp` when the inputs are nearly parallel.
    pub fn slerp(&self, other: &Self, t: f64) -> Self {
        let mut cos_theta = self.dot(other);

        let other = if cos_theta < 0.0 { -*other } else { *other };
        cos_theta = cos_theta.abs();

        if cos_theta > SLERP_LINEAR_THRESHOLD {
            tracing::trace!(cos_theta, "quaternion slerp falling back to lerp");
            return self.lerp(&other, t);
        }

        let theta_0 = cos_theta.clamp(-1.0, 1.0).acos();
        let theta = theta_0 * t;
        let sin_theta = theta.sin();
        let sin_theta_0 = theta_0.sin();

        let s0 = theta.cos() - cos_theta * sin_theta / sin_theta_0;
        let s1 = sin_theta / sin_theta_0;

        Self {
            x: self.x * s0 + other.x * s1,
            y: self.y * s0 + other.y * s1,
            z: self.z * s0 + other.z * s1,
            w: self.w * s0 + other.w * s1,
        }
    }

    /// Returns the axis and angle of this rotation.
    ///
    /// Near the identity the axis is undefined and `(1, 0, 0)` is returned.
    pub fn to_axis_angle(&self) -> (Vector3, f64) {
        let angle = 2.0 * self.w.clamp(-1.0, 1.0).acos();
        let s = (1.0 - self.w * self.w).max(0.0).sqrt();

        if s < AXIS_ANGLE_EPSILON {
            tracing::trace!(s, "rotation axis undefined, using +X");
            (Vector3::unit_x(), angle)
        } else {
            (Vector3::new(self.x / s, self.y / s, self.z / s), angle)
        }
    }

    /// Returns `(roll, pitch, yaw)` in radians; pitch saturates at +-PI/2
    pub fn to_euler(&self) -> Vector3 {
        let sinr_cosp = 2.0 * (self.w * self.x + self.y * self.z);
        let cosr_cosp = 1.0 - 2.0 * (self.x * self.x + self.y * self.y);
        let roll = sinr_cosp.atan2(cosr_cosp);

        let sinp = 2.0 * (self.w * self.y - self.z * self.x);
        let pitch = if sinp.abs() >= 1.0 {
            std::f64::consts::FRAC_PI_2.copysign(sinp)
        } else {
            sinp.asin()
        };

        let siny_cosp = 2.0 * (self.w * self.z + self.x * self.y);
        let cosy_cosp = 1.0 - 2.0 * (self.y * self.y + self.z * self.z);
        let yaw = siny_cosp.atan2(cosy_cosp);

        Vector3::new(roll, pitch, yaw)
    }

    /// Returns true if every component is within `EPSILON` of `other`
    #[inline]
    pub fn near(&self, other: &Self) -> bool {
        self.near_with(other, &Tolerances::default())
    }

    /// `near` with caller-supplied tolerances
    #[inline]
    pub fn near_with(&self, other: &Self, tolerances: &Tolerances) -> bool {
        tolerances.all_near(&self.to_array(), &other.to_array())
    }

    /// Returns `[x, y, z, w]`
    #[inline]
    pub fn to_array(&self) -> [f64; 4] {
        [self.x, self.y, self.z, self.w]
    }

    /// Convert to nalgebra Quaternion
    #[inline]
    pub fn to_nalgebra(&self) -> nalgebra::Quaternion<f64> {
        nalgebra::Quaternion::new(self.w, self.x, self.y, self.z)
    }

    /// Convert from nalgebra Quaternion
    #[inline]
    pub fn from_nalgebra(q: &nalgebra::Quaternion<f64>) -> Self {
        Self::new(q.i, q.j, q.k, q.w)
    }
}

impl Rotation for Quaternion {
    /// Rotates a vector by this quaternion: `v + 2 * (w * (q x v) + q x (q x v))`
    fn rotate_vector(&self, v: Vector3) -> Vector3 {
        let qv = Vector3::new(self.x, self.y, self.z);
        let uv = qv.cross(&v);
        let uuv = qv.cross(&uv);

        v + (uv * self.w + uuv) * 2.0
    }

    fn angle(&self) -> f64 {
        self.to_axis_angle().1
    }

    fn axis(&self) -> Vector3 {
        self.to_axis_angle().0
    }
}

impl Default for Quaternion {
    fn default() -> Self {
        Self::identity()
    }
}

impl From<[f64; 4]> for Quaternion {
    #[inline]
    fn from(array: [f64; 4]) -> Self {
        Self::new(array[0], array[1], array[2], array[3])
    }
}

impl From<Quaternion> for [f64; 4] {
    #[inline]
    fn from(q: Quaternion) -> Self {
        q.to_array()
    }
}

impl Index<usize> for Quaternion {
    type Output = f64;

    fn index(&self, index: usize) -> &f64 {
        match index {
            0 => &self.x,
            1 => &self.y,
            2 => &self.z,
            3 => &self.w,
            _ => panic!("Quaternion index out of range: {}", index),
        }
    }
}

impl IndexMut<usize> for Quaternion {
    fn index_mut(&mut self, index: usize) -> &mut f64 {
        match index {
            0 => &mut self.x,
            1 => &mut self.y,
            2 => &mut self.z,
            3 => &mut self.w,
            _ => panic!("Quaternion index out of range: {}", index),
        }
    }
}

impl fmt::Display for Quaternion {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Quaternion({}, {}, {}, {})", self.x, self.y, self.z, self.w)
    }
}

impl_approx_eq!(Quaternion);

// Quaternion multiplication
impl Mul for Quaternion {
    type Output = Self;

    #[inline]
    fn mul(self, rhs: Self) -> Self::Output {
        self.multiply(&rhs)
    }
}

impl MulAssign for Quaternion {
    #[inline]
    fn mul_assign(&mut self, rhs: Self) {
        *self = *self * rhs;
    }
}

impl Mul<Vector3> for Quaternion {
    type Output = Vector3;

    #[inline]
    fn mul(self, rhs: Vector3) -> Vector3 {
        self.rotate_vector(rhs)
    }
}

impl Mul<f64> for Quaternion {
    type Output = Self;

    #[inline]
    fn mul(self, rhs: f64) -> Self {
        self.scale_by(rhs)
    }
}

impl Add for Quaternion {
    type Output = Self;

    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z, self.w + rhs.w)
    }
}

impl Sub for Quaternion {
    type Output = Self;

    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z, self.w - rhs.w)
    }
}

impl Neg for Quaternion {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self {
        Self::new(-self.x, -self.y, -self.z, -self.w)
    }
}
