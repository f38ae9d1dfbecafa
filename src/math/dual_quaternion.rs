//! Dual quaternions for rigid (rotation + translation) transforms.
//!
//! A dual quaternion `real + ε dual` stores the rotation in `real` and
//! `0.5 * t * real` in `dual`, where `t` is the translation as a pure
//! quaternion. A rigid transform has a unit `real` part and
//! `dot(real, dual) == 0`; every operation here preserves that for valid input.

use crate::config::Tolerances;
use crate::math::{Matrix4, Quaternion, Rotation, Vector3};
use std::fmt;
use std::ops::{Add, Index, IndexMut, Mul, Sub};

#[cfg(feature = "serialize")]
use serde::{Serialize, Deserialize};

/// Below this real-part length a dual quaternion is left as is by `normalize`
const DEGENERATE_LENGTH: f64 = 1.0e-10;

/// A rigid transform as a pair of quaternions.
///
/// Components are indexed `0..4` for the real part and `4..8` for the dual part,
/// each ordered `(x, y, z, w)`.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(
    feature = "serialize",
    derive(Serialize, Deserialize),
    serde(from = "[f64; 8]", into = "[f64; 8]")
)]
pub struct DualQuaternion {
    /// Rotation part
    pub real: Quaternion,

    /// Translation-encoding part
    pub dual: Quaternion,
}

impl DualQuaternion {
    #[inline]
    pub fn new(real: Quaternion, dual: Quaternion) -> Self {
        Self { real, dual }
    }

    /// No rotation, no translation
    #[inline]
    pub fn identity() -> Self {
        Self {
            real: Quaternion::identity(),
            dual: Quaternion::new(0.0, 0.0, 0.0, 0.0),
        }
    }

    /// Rotation followed by translation.
    ///
    /// The dual part is `0.5 * (t.x, t.y, t.z, 0) * rotation`, expanded.
    pub fn from_rotation_translation(rotation: &Quaternion, translation: Vector3) -> Self {
        let Quaternion { x: rx, y: ry, z: rz, w: rw } = *rotation;
        let Vector3 { x: tx, y: ty, z: tz } = translation;

        Self {
            real: *rotation,
            dual: Quaternion::new(
                (tx * rw + ty * rz - tz * ry) * 0.5,
                (ty * rw + tz * rx - tx * rz) * 0.5,
                (tz * rw + tx * ry - ty * rx) * 0.5,
                (-tx * rx - ty * ry - tz * rz) * 0.5,
            ),
        }
    }

    #[inline]
    pub fn from_translation(translation: Vector3) -> Self {
        Self::from_rotation_translation(&Quaternion::identity(), translation)
    }

    #[inline]
    pub fn from_rotation(rotation: &Quaternion) -> Self {
        Self {
            real: *rotation,
            dual: Quaternion::new(0.0, 0.0, 0.0, 0.0),
        }
    }

    /// Rigid part of a 4x4 transform; any scale in `m` is discarded
    pub fn from_matrix4(m: &Matrix4) -> Self {
        Self::from_rotation_translation(&m.extract_rotation(), m.extract_translation())
    }

    /// Unit rotation (the normalized real part)
    #[inline]
    pub fn rotation(&self) -> Quaternion {
        self.real.normalize()
    }

    /// Vector part of `2 * dual * conjugate(real)`
    pub fn translation(&self) -> Vector3 {
        let Quaternion { x: ax, y: ay, z: az, w: aw } = self.real;
        let Quaternion { x: bx, y: by, z: bz, w: bw } = self.dual;

        Vector3::new(
            2.0 * (-bw * ax + bx * aw - by * az + bz * ay),
            2.0 * (-bw * ay + by * aw - bz * ax + bx * az),
            2.0 * (-bw * az + bz * aw - bx * ay + by * ax),
        )
    }

    /// Splits into `(rotation, translation)`
    #[inline]
    pub fn to_rotation_translation(&self) -> (Quaternion, Vector3) {
        (self.rotation(), self.translation())
    }

    /// Composition `self * other`: applies `other` first.
    ///
    /// `real = a.real * b.real`, `dual = a.real * b.dual + a.dual * b.real`.
    pub fn multiply(&self, other: &Self) -> Self {
        let Quaternion { x: ax0, y: ay0, z: az0, w: aw0 } = self.real;
        let Quaternion { x: bx1, y: by1, z: bz1, w: bw1 } = self.dual;
        let Quaternion { x: ax1, y: ay1, z: az1, w: aw1 } = other.real;
        let Quaternion { x: bx0, y: by0, z: bz0, w: bw0 } = other.dual;

        Self {
            real: Quaternion::new(
                ax0 * aw1 + aw0 * ax1 + ay0 * az1 - az0 * ay1,
                ay0 * aw1 + aw0 * ay1 + az0 * ax1 - ax0 * az1,
                az0 * aw1 + aw0 * az1 + ax0 * ay1 - ay0 * ax1,
                aw0 * aw1 - ax0 * ax1 - ay0 * ay1 - az0 * az1,
            ),
            dual: Quaternion::new(
                ax0 * bw0 + aw0 * bx0 + ay0 * bz0 - az0 * by0
                    + bx1 * aw1 + bw1 * ax1 + by1 * az1 - bz1 * ay1,
                ay0 * bw0 + aw0 * by0 + az0 * bx0 - ax0 * bz0
                    + by1 * aw1 + bw1 * ay1 + bz1 * ax1 - bx1 * az1,
                az0 * bw0 + aw0 * bz0 + ax0 * by0 - ay0 * bx0
                    + bz1 * aw1 + bw1 * az1 + bx1 * ay1 - by1 * ax1,
                aw0 * bw0 - ax0 * bx0 - ay0 * by0 - az0 * bz0
                    + bw1 * aw1 - bx1 * ax1 - by1 * ay1 - bz1 * az1,
            ),
        }
    }

    /// Rotates then translates a point
    #[inline]
    pub fn transform_point(&self, point: Vector3) -> Vector3 {
        self.rotation().rotate_vector(point) + self.translation()
    }

    /// Multiplies all eight components by a scalar
    #[inline]
    pub fn scale_by(&self, scalar: f64) -> Self {
        Self {
            real: self.real.scale_by(scalar),
            dual: self.dual.scale_by(scalar),
        }
    }

    /// Dot product of the real parts
    #[inline]
    pub fn dot(&self, other: &Self) -> f64 {
        self.real.dot(&other.real)
    }

    /// Squared length of the real part
    #[inline]
    pub fn length_squared(&self) -> f64 {
        self.real.length_squared()
    }

    /// Length of the real part
    #[inline]
    pub fn length(&self) -> f64 {
        self.real.length()
    }

    /// Scales both parts by `1 / |real|`; a degenerate real part is returned unchanged
    pub fn normalize(&self) -> Self {
        let len = self.length();
        if len < DEGENERATE_LENGTH {
            return *self;
        }

        self.scale_by(1.0 / len)
    }

    /// Normalizes in place (mutates the receiver)
    pub fn normalize_mut(&mut self) {
        *self = self.normalize();
    }

    /// Quaternion conjugate of both parts
    #[inline]
    pub fn conjugate(&self) -> Self {
        Self {
            real: self.real.conjugate(),
            dual: self.dual.conjugate(),
        }
    }

    /// Inverse rigid transform.
    ///
    /// Divides the conjugate by `|real|^2`; a degenerate real part returns the
    /// plain conjugate.
    pub fn inverse(&self) -> Self {
        let len_sq = self.length_squared();
        if len_sq < DEGENERATE_LENGTH {
            return self.conjugate();
        }

        self.conjugate().scale_by(1.0 / len_sq)
    }

    /// Componentwise interpolation of all eight components, renormalized
    pub fn lerp(&self, other: &Self, t: f64) -> Self {
        (*self + (*other - *self).scale_by(t)).normalize()
    }

    /// Equivalent 4x4 matrix: `T * R`, agreeing with `transform_point`
    pub fn to_matrix4(&self) -> Matrix4 {
        let mut m = Matrix4::from_quaternion(&self.rotation());
        let t = self.translation();
        m.data[12] = t.x;
        m.data[13] = t.y;
        m.data[14] = t.z;
        m
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

    /// Returns the real components followed by the dual components
    pub fn to_array(&self) -> [f64; 8] {
        let r = self.real;
        let d = self.dual;
        [r.x, r.y, r.z, r.w, d.x, d.y, d.z, d.w]
    }
}

impl Default for DualQuaternion {
    fn default() -> Self {
        Self::identity()
    }
}

impl From<[f64; 8]> for DualQuaternion {
    fn from(a: [f64; 8]) -> Self {
        Self {
            real: Quaternion::new(a[0], a[1], a[2], a[3]),
            dual: Quaternion::new(a[4], a[5], a[6], a[7]),
        }
    }
}

impl From<DualQuaternion> for [f64; 8] {
    #[inline]
    fn from(dq: DualQuaternion) -> Self {
        dq.to_array()
    }
}

impl Index<usize> for DualQuaternion {
    type Output = f64;

    fn index(&self, index: usize) -> &f64 {
        if index < 4 {
            &self.real[index]
        } else {
            &self.dual[index - 4]
        }
    }
}

impl IndexMut<usize> for DualQuaternion {
    fn index_mut(&mut self, index: usize) -> &mut f64 {
        if index < 4 {
            &mut self.real[index]
        } else {
            &mut self.dual[index - 4]
        }
    }
}

impl fmt::Display for DualQuaternion {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "DualQuaternion[real: {}, dual: {}]", self.real, self.dual)
    }
}

impl_approx_eq!(DualQuaternion);

impl Mul for DualQuaternion {
    type Output = Self;

    #[inline]
    fn mul(self, rhs: Self) -> Self {
        self.multiply(&rhs)
    }
}

impl Mul<Vector3> for DualQuaternion {
    type Output = Vector3;

    #[inline]
    fn mul(self, rhs: Vector3) -> Vector3 {
        self.transform_point(rhs)
    }
}

impl Mul<f64> for DualQuaternion {
    type Output = Self;

    #[inline]
    fn mul(self, rhs: f64) -> Self {
        self.scale_by(rhs)
    }
}

impl Add for DualQuaternion {
    type Output = Self;

    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self {
            real: self.real + rhs.real,
            dual: self.dual + rhs.dual,
        }
    }
}

impl Sub for DualQuaternion {
    type Output = Self;

    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Self {
            real: self.real - rhs.real,
            dual: self.dual - rhs.dual,
        }
    }
}
