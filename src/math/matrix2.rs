use nalgebra as na;
use std::fmt;
use std::ops::Mul;

use crate::config::Tolerances;
use crate::error::MathError;
use crate::math::{Matrix3, Vector2};

#[cfg(feature = "serialize")]
use serde::{Serialize, Deserialize};

/// A 2x2 matrix stored column-major as `[m00, m10, m01, m11]`
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(
    feature = "serialize",
    derive(Serialize, Deserialize),
    serde(from = "[f64; 4]", into = "[f64; 4]")
)]
pub struct Matrix2 {
    pub data: [f64; 4],
}

/// A 2D affine transform packed as `[a, b, c, d, tx, ty]`.
///
/// Represents the homogeneous matrix
///
/// ```text
/// | a  c  tx |
/// | b  d  ty |
/// | 0  0  1  |
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(
    feature = "serialize",
    derive(Serialize, Deserialize),
    serde(from = "[f64; 6]", into = "[f64; 6]")
)]
pub struct Matrix2Affine {
    pub data: [f64; 6],
}

impl_matrix_storage!(Matrix2, 4);
impl_matrix_storage!(Matrix2Affine, 6);

// === Matrix2 Implementation ===

impl Matrix2 {
    /// Creates a new 2x2 identity matrix
    #[inline]
    pub fn identity() -> Self {
        Self { data: [1.0, 0.0, 0.0, 1.0] }
    }

    /// Creates a new 2x2 zero matrix
    #[inline]
    pub fn zero() -> Self {
        Self { data: [0.0; 4] }
    }

    /// Counter-clockwise rotation by `radians`
    pub fn rotation(radians: f64) -> Self {
        let (s, c) = radians.sin_cos();
        Self { data: [c, s, -s, c] }
    }

    /// Creates a new 2x2 scaling matrix
    #[inline]
    pub fn scaling(x: f64, y: f64) -> Self {
        Self { data: [x, 0.0, 0.0, y] }
    }

    /// Builds a matrix from two column vectors
    #[inline]
    pub fn from_columns(c0: Vector2, c1: Vector2) -> Self {
        Self { data: [c0.x, c0.y, c1.x, c1.y] }
    }

    /// Returns the component at `row`, `col`
    #[inline]
    pub fn element(&self, row: usize, col: usize) -> f64 {
        self.data[col * 2 + row]
    }

    /// Multiplies the matrix by another matrix (`self * other`)
    pub fn multiply(&self, other: &Self) -> Self {
        let a = &self.data;
        let b = &other.data;
        Self {
            data: [
                a[0] * b[0] + a[2] * b[1],
                a[1] * b[0] + a[3] * b[1],
                a[0] * b[2] + a[2] * b[3],
                a[1] * b[2] + a[3] * b[3],
            ],
        }
    }

    /// Multiplies the matrix by a vector
    #[inline]
    pub fn transform_vector(&self, v: Vector2) -> Vector2 {
        let a = &self.data;
        Vector2::new(a[0] * v.x + a[2] * v.y, a[1] * v.x + a[3] * v.y)
    }

    /// Returns the determinant of the matrix
    #[inline]
    pub fn determinant(&self) -> f64 {
        self.data[0] * self.data[3] - self.data[2] * self.data[1]
    }

    /// Returns the adjugate (transposed cofactor matrix)
    #[inline]
    pub fn adjoint(&self) -> Self {
        let a = &self.data;
        Self { data: [a[3], -a[1], -a[2], a[0]] }
    }

    /// Returns the inverse, or `SingularMatrix` when `|det| < 1e-10`
    pub fn inverse(&self) -> crate::Result<Self> {
        self.inverse_with(&Tolerances::default())
    }

    /// `inverse` with a caller-supplied singularity threshold
    pub fn inverse_with(&self, tolerances: &Tolerances) -> crate::Result<Self> {
        let det = self.determinant();
        if tolerances.is_singular(det) {
            tracing::debug!(det, "Matrix2 is singular");
            return Err(MathError::SingularMatrix);
        }

        Ok(self.adjoint().scale_by(1.0 / det))
    }

    /// Returns the transpose of the matrix
    #[inline]
    pub fn transpose(&self) -> Self {
        let a = &self.data;
        Self { data: [a[0], a[2], a[1], a[3]] }
    }

    /// Convert to nalgebra Matrix2
    #[inline]
    pub fn to_nalgebra(&self) -> na::Matrix2<f64> {
        na::Matrix2::from_column_slice(&self.data)
    }

    /// Convert from nalgebra Matrix2
    #[inline]
    pub fn from_nalgebra(m: &na::Matrix2<f64>) -> Self {
        let mut data = [0.0; 4];
        data.copy_from_slice(m.as_slice());
        Self { data }
    }
}

impl Default for Matrix2 {
    fn default() -> Self {
        Self::identity()
    }
}

impl Mul for Matrix2 {
    type Output = Self;

    #[inline]
    fn mul(self, rhs: Self) -> Self {
        self.multiply(&rhs)
    }
}

impl Mul<Vector2> for Matrix2 {
    type Output = Vector2;

    #[inline]
    fn mul(self, rhs: Vector2) -> Vector2 {
        self.transform_vector(rhs)
    }
}

impl fmt::Display for Matrix2 {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let a = &self.data;
        write!(f, "Matrix2[{}, {}, {}, {}]", a[0], a[1], a[2], a[3])
    }
}

// === Matrix2Affine Implementation ===

impl Matrix2Affine {
    /// Creates the identity transform
    #[inline]
    pub fn identity() -> Self {
        Self { data: [1.0, 0.0, 0.0, 1.0, 0.0, 0.0] }
    }

    /// Creates an all-zero transform
    #[inline]
    pub fn zero() -> Self {
        Self { data: [0.0; 6] }
    }

    /// Pure translation
    #[inline]
    pub fn translation(x: f64, y: f64) -> Self {
        Self { data: [1.0, 0.0, 0.0, 1.0, x, y] }
    }

    /// Pure counter-clockwise rotation
    pub fn rotation(radians: f64) -> Self {
        let (s, c) = radians.sin_cos();
        Self { data: [c, s, -s, c, 0.0, 0.0] }
    }

    /// Pure scale
    #[inline]
    pub fn scaling(x: f64, y: f64) -> Self {
        Self { data: [x, 0.0, 0.0, y, 0.0, 0.0] }
    }

    /// Composes scale, then rotation, then translation
    pub fn from_rotation_translation_scale(rotation: f64, translation: Vector2, scale: Vector2) -> Self {
        let (s, c) = rotation.sin_cos();
        Self {
            data: [
                c * scale.x,
                s * scale.x,
                -s * scale.y,
                c * scale.y,
                translation.x,
                translation.y,
            ],
        }
    }

    /// Composes two affine transforms (`self * other`, `other` applied first)
    pub fn multiply(&self, other: &Self) -> Self {
        let a = &self.data;
        let b = &other.data;
        Self {
            data: [
                a[0] * b[0] + a[2] * b[1],
                a[1] * b[0] + a[3] * b[1],
                a[0] * b[2] + a[2] * b[3],
                a[1] * b[2] + a[3] * b[3],
                a[0] * b[4] + a[2] * b[5] + a[4],
                a[1] * b[4] + a[3] * b[5] + a[5],
            ],
        }
    }

    /// Transforms a point (translation applies)
    #[inline]
    pub fn transform_point(&self, p: Vector2) -> Vector2 {
        let a = &self.data;
        Vector2::new(
            a[0] * p.x + a[2] * p.y + a[4],
            a[1] * p.x + a[3] * p.y + a[5],
        )
    }

    /// Transforms a direction (translation ignored)
    #[inline]
    pub fn transform_vector(&self, v: Vector2) -> Vector2 {
        self.linear().transform_vector(v)
    }

    /// Returns the 2x2 linear part
    #[inline]
    pub fn linear(&self) -> Matrix2 {
        Matrix2::new([self.data[0], self.data[1], self.data[2], self.data[3]])
    }

    /// Determinant of the linear part
    #[inline]
    pub fn determinant(&self) -> f64 {
        self.data[0] * self.data[3] - self.data[1] * self.data[2]
    }

    /// Returns the inverse, or `SingularMatrix` when `|det| < 1e-10`
    pub fn inverse(&self) -> crate::Result<Self> {
        self.inverse_with(&Tolerances::default())
    }

    /// `inverse` with a caller-supplied singularity threshold
    pub fn inverse_with(&self, tolerances: &Tolerances) -> crate::Result<Self> {
        let det = self.determinant();
        if tolerances.is_singular(det) {
            tracing::debug!(det, "Matrix2Affine is singular");
            return Err(MathError::SingularMatrix);
        }

        let [a, b, c, d, tx, ty] = self.data;
        let inv_det = 1.0 / det;
        Ok(Self {
            data: [
                d * inv_det,
                -b * inv_det,
                -c * inv_det,
                a * inv_det,
                (c * ty - d * tx) * inv_det,
                (b * tx - a * ty) * inv_det,
            ],
        })
    }

    /// Applies a translation before this transform
    pub fn translate(&self, x: f64, y: f64) -> Self {
        let a = &self.data;
        Self {
            data: [
                a[0],
                a[1],
                a[2],
                a[3],
                a[0] * x + a[2] * y + a[4],
                a[1] * x + a[3] * y + a[5],
            ],
        }
    }

    /// Applies a rotation before this transform
    #[inline]
    pub fn rotate(&self, radians: f64) -> Self {
        self.multiply(&Self::rotation(radians))
    }

    /// Applies a scale before this transform
    pub fn scale(&self, x: f64, y: f64) -> Self {
        let a = &self.data;
        Self {
            data: [a[0] * x, a[1] * x, a[2] * y, a[3] * y, a[4], a[5]],
        }
    }

    #[inline]
    pub fn extract_translation(&self) -> Vector2 {
        Vector2::new(self.data[4], self.data[5])
    }

    /// Rotation angle of the first column, in radians
    #[inline]
    pub fn extract_rotation(&self) -> f64 {
        self.data[1].atan2(self.data[0])
    }

    /// Lengths of the two linear columns
    pub fn extract_scale(&self) -> Vector2 {
        let a = &self.data;
        Vector2::new(
            (a[0] * a[0] + a[1] * a[1]).sqrt(),
            (a[2] * a[2] + a[3] * a[3]).sqrt(),
        )
    }

    /// Expands to the equivalent homogeneous 3x3 matrix
    pub fn to_matrix3(&self) -> Matrix3 {
        Matrix3::from_affine(self)
    }

    /// Convert to the nalgebra 2x3 matrix `[a c tx; b d ty]`
    #[inline]
    pub fn to_nalgebra(&self) -> na::Matrix2x3<f64> {
        na::Matrix2x3::from_column_slice(&self.data)
    }

    /// Convert from a nalgebra 2x3 matrix
    #[inline]
    pub fn from_nalgebra(m: &na::Matrix2x3<f64>) -> Self {
        let mut data = [0.0; 6];
        data.copy_from_slice(m.as_slice());
        Self { data }
    }
}

impl Default for Matrix2Affine {
    fn default() -> Self {
        Self::identity()
    }
}

impl Mul for Matrix2Affine {
    type Output = Self;

    #[inline]
    fn mul(self, rhs: Self) -> Self {
        self.multiply(&rhs)
    }
}

impl Mul<Vector2> for Matrix2Affine {
    type Output = Vector2;

    /// Treats the vector as a point
    #[inline]
    fn mul(self, rhs: Vector2) -> Vector2 {
        self.transform_point(rhs)
    }
}

impl fmt::Display for Matrix2Affine {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let a = &self.data;
        write!(
            f,
            "Matrix2Affine[{:.4}, {:.4}, {:.4}, {:.4}, {:.4}, {:.4}]",
            a[0], a[1], a[2], a[3], a[4], a[5]
        )
    }
}
