use nalgebra as na;
use std::fmt;
use std::ops::Mul;

use crate::config::Tolerances;
use crate::error::MathError;
use crate::math::{Matrix2Affine, Quaternion, Vector3, Vector4};

#[cfg(feature = "serialize")]
use serde::{Serialize, Deserialize};

/// A 3x3 matrix stored column-major: component `col * 3 + row`
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(
    feature = "serialize",
    derive(Serialize, Deserialize),
    serde(from = "[f64; 9]", into = "[f64; 9]")
)]
pub struct Matrix3 {
    pub data: [f64; 9],
}

/// A 4x4 matrix stored column-major: component `col * 4 + row`.
///
/// The translation of an affine transform lives in components 12, 13 and 14.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(
    feature = "serialize",
    derive(Serialize, Deserialize),
    serde(from = "[f64; 16]", into = "[f64; 16]")
)]
pub struct Matrix4 {
    pub data: [f64; 16],
}

impl_matrix_storage!(Matrix3, 9);
impl_matrix_storage!(Matrix4, 16);

// === Matrix3 Implementation ===

impl Matrix3 {
    /// Creates a new 3x3 identity matrix
    #[inline]
    pub fn identity() -> Self {
        Self {
            data: [
                1.0, 0.0, 0.0,
                0.0, 1.0, 0.0,
                0.0, 0.0, 1.0,
            ],
        }
    }

    /// Creates a new 3x3 zero matrix
    #[inline]
    pub fn zero() -> Self {
        Self { data: [0.0; 9] }
    }

    /// Builds a matrix from three column vectors
    #[inline]
    pub fn from_columns(c0: Vector3, c1: Vector3, c2: Vector3) -> Self {
        Self {
            data: [c0.x, c0.y, c0.z, c1.x, c1.y, c1.z, c2.x, c2.y, c2.z],
        }
    }

    /// Upper-left 3x3 block of a 4x4 matrix
    pub fn from_matrix4(m: &Matrix4) -> Self {
        let a = &m.data;
        Self {
            data: [
                a[0], a[1], a[2],
                a[4], a[5], a[6],
                a[8], a[9], a[10],
            ],
        }
    }

    /// Homogeneous form of a 2D affine transform
    pub fn from_affine(m: &Matrix2Affine) -> Self {
        let a = &m.data;
        Self {
            data: [
                a[0], a[1], 0.0,
                a[2], a[3], 0.0,
                a[4], a[5], 1.0,
            ],
        }
    }

    /// Rotation matrix of a (unit) quaternion
    pub fn from_quaternion(q: &Quaternion) -> Self {
        let (x, y, z, w) = (q.x, q.y, q.z, q.w);
        let x2 = x + x;
        let y2 = y + y;
        let z2 = z + z;

        let xx = x * x2;
        let yx = y * x2;
        let yy = y * y2;
        let zx = z * x2;
        let zy = z * y2;
        let zz = z * z2;
        let wx = w * x2;
        let wy = w * y2;
        let wz = w * z2;

        Self {
            data: [
                1.0 - yy - zz, yx + wz, zx - wy,
                yx - wz, 1.0 - xx - zz, zy + wx,
                zx + wy, zy - wx, 1.0 - xx - yy,
            ],
        }
    }

    /// Inverse-transpose of the upper-left 3x3 block, for transforming normals
    pub fn normal_from_matrix4(m: &Matrix4) -> crate::Result<Self> {
        Ok(Self::from_matrix4(m).inverse()?.transpose())
    }

    /// Maps pixel coordinates (origin top-left, y down) to clip space
    pub fn projection(width: f64, height: f64) -> Self {
        Self {
            data: [
                2.0 / width, 0.0, 0.0,
                0.0, -2.0 / height, 0.0,
                -1.0, 1.0, 1.0,
            ],
        }
    }

    /// Homogeneous 2D translation
    #[inline]
    pub fn translation(x: f64, y: f64) -> Self {
        let mut m = Self::identity();
        m.data[6] = x;
        m.data[7] = y;
        m
    }

    /// Homogeneous 2D rotation
    pub fn rotation(radians: f64) -> Self {
        let (s, c) = radians.sin_cos();
        Self {
            data: [
                c, s, 0.0,
                -s, c, 0.0,
                0.0, 0.0, 1.0,
            ],
        }
    }

    /// Homogeneous 2D scale
    #[inline]
    pub fn scaling(x: f64, y: f64) -> Self {
        Self {
            data: [
                x, 0.0, 0.0,
                0.0, y, 0.0,
                0.0, 0.0, 1.0,
            ],
        }
    }

    /// Creates a new 3x3 scaling matrix along all three axes
    #[inline]
    pub fn from_scale(scale: Vector3) -> Self {
        Self {
            data: [
                scale.x, 0.0, 0.0,
                0.0, scale.y, 0.0,
                0.0, 0.0, scale.z,
            ],
        }
    }

    /// Returns the component at `row`, `col`
    #[inline]
    pub fn element(&self, row: usize, col: usize) -> f64 {
        self.data[col * 3 + row]
    }

    /// Returns column `col` as a vector
    #[inline]
    pub fn column(&self, col: usize) -> Vector3 {
        let i = col * 3;
        Vector3::new(self.data[i], self.data[i + 1], self.data[i + 2])
    }

    /// Returns the adjugate (transposed cofactor matrix)
    pub fn adjoint(&self) -> Self {
        let a = &self.data;
        Self {
            data: [
                a[4] * a[8] - a[5] * a[7],
                a[2] * a[7] - a[1] * a[8],
                a[1] * a[5] - a[2] * a[4],
                a[5] * a[6] - a[3] * a[8],
                a[0] * a[8] - a[2] * a[6],
                a[2] * a[3] - a[0] * a[5],
                a[3] * a[7] - a[4] * a[6],
                a[1] * a[6] - a[0] * a[7],
                a[0] * a[4] - a[1] * a[3],
            ],
        }
    }

    /// Returns the determinant of the matrix
    pub fn determinant(&self) -> f64 {
        Self::determinant_from_adjoint(&self.data, &self.adjoint().data)
    }

    // Expansion along the first row, reusing the adjugate's first column.
    #[inline]
    fn determinant_from_adjoint(a: &[f64; 9], adj: &[f64; 9]) -> f64 {
        a[0] * adj[0] + a[3] * adj[1] + a[6] * adj[2]
    }

    /// Returns the inverse, or `SingularMatrix` when `|det| < 1e-10`
    pub fn inverse(&self) -> crate::Result<Self> {
        self.inverse_with(&Tolerances::default())
    }

    /// `inverse` with a caller-supplied singularity threshold
    pub fn inverse_with(&self, tolerances: &Tolerances) -> crate::Result<Self> {
        let adj = self.adjoint();
        let det = Self::determinant_from_adjoint(&self.data, &adj.data);
        if tolerances.is_singular(det) {
            tracing::debug!(det, "Matrix3 is singular");
            return Err(MathError::SingularMatrix);
        }

        Ok(adj.scale_by(1.0 / det))
    }

    /// Returns the transpose of the matrix
    #[inline]
    pub fn transpose(&self) -> Self {
        let a = &self.data;
        Self {
            data: [
                a[0], a[3], a[6],
                a[1], a[4], a[7],
                a[2], a[5], a[8],
            ],
        }
    }

    /// Multiplies the matrix by a vector
    #[inline]
    pub fn transform_vector(&self, v: Vector3) -> Vector3 {
        let a = &self.data;
        Vector3::new(
            a[0] * v.x + a[3] * v.y + a[6] * v.z,
            a[1] * v.x + a[4] * v.y + a[7] * v.z,
            a[2] * v.x + a[5] * v.y + a[8] * v.z,
        )
    }

    /// Multiplies the matrix by another matrix (`self * other`)
    pub fn multiply(&self, other: &Self) -> Self {
        let mut result = Self::zero();

        for col in 0..3 {
            for row in 0..3 {
                let mut sum = 0.0;
                for k in 0..3 {
                    sum += self.data[k * 3 + row] * other.data[col * 3 + k];
                }
                result.data[col * 3 + row] = sum;
            }
        }

        result
    }

    /// Applies a 2D translation before this transform
    pub fn translate(&self, x: f64, y: f64) -> Self {
        let a = &self.data;
        Self {
            data: [
                a[0], a[1], a[2],
                a[3], a[4], a[5],
                x * a[0] + y * a[3] + a[6],
                x * a[1] + y * a[4] + a[7],
                x * a[2] + y * a[5] + a[8],
            ],
        }
    }

    /// Applies a 2D rotation before this transform
    #[inline]
    pub fn rotate(&self, radians: f64) -> Self {
        self.multiply(&Self::rotation(radians))
    }

    /// Applies a 2D scale before this transform
    pub fn scale(&self, x: f64, y: f64) -> Self {
        let a = &self.data;
        Self {
            data: [
                a[0] * x, a[1] * x, a[2] * x,
                a[3] * y, a[4] * y, a[5] * y,
                a[6], a[7], a[8],
            ],
        }
    }

    /// Convert to nalgebra Matrix3
    #[inline]
    pub fn to_nalgebra(&self) -> na::Matrix3<f64> {
        na::Matrix3::from_column_slice(&self.data)
    }

    /// Convert from nalgebra Matrix3
    #[inline]
    pub fn from_nalgebra(m: &na::Matrix3<f64>) -> Self {
        let mut data = [0.0; 9];
        data.copy_from_slice(m.as_slice());
        Self { data }
    }
}

impl Default for Matrix3 {
    fn default() -> Self {
        Self::identity()
    }
}

impl Mul for Matrix3 {
    type Output = Self;

    #[inline]
    fn mul(self, rhs: Self) -> Self {
        self.multiply(&rhs)
    }
}

impl Mul<Vector3> for Matrix3 {
    type Output = Vector3;

    #[inline]
    fn mul(self, rhs: Vector3) -> Vector3 {
        self.transform_vector(rhs)
    }
}

impl fmt::Display for Matrix3 {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "Matrix3[")?;
        for row in 0..3 {
            writeln!(
                f,
                "  {:8.4}, {:8.4}, {:8.4}",
                self.element(row, 0),
                self.element(row, 1),
                self.element(row, 2)
            )?;
        }
        write!(f, "]")
    }
}

// === Matrix4 Implementation ===

impl Matrix4 {
    /// Creates a new 4x4 identity matrix
    #[inline]
    pub fn identity() -> Self {
        Self {
            data: [
                1.0, 0.0, 0.0, 0.0,
                0.0, 1.0, 0.0, 0.0,
                0.0, 0.0, 1.0, 0.0,
                0.0, 0.0, 0.0, 1.0,
            ],
        }
    }

    /// Creates a new 4x4 zero matrix
    #[inline]
    pub fn zero() -> Self {
        Self { data: [0.0; 16] }
    }

    /// Creates a new 4x4 translation matrix
    #[inline]
    pub fn translation(x: f64, y: f64, z: f64) -> Self {
        let mut m = Self::identity();
        m.data[12] = x;
        m.data[13] = y;
        m.data[14] = z;
        m
    }

    /// `translation` from a vector
    #[inline]
    pub fn from_translation(translation: Vector3) -> Self {
        Self::translation(translation.x, translation.y, translation.z)
    }

    /// Creates a new 4x4 scaling matrix
    #[inline]
    pub fn scaling(x: f64, y: f64, z: f64) -> Self {
        let mut m = Self::zero();
        m.data[0] = x;
        m.data[5] = y;
        m.data[10] = z;
        m.data[15] = 1.0;
        m
    }

    /// `scaling` from a vector
    #[inline]
    pub fn from_scale(scale: Vector3) -> Self {
        Self::scaling(scale.x, scale.y, scale.z)
    }

    pub fn rotation_x(radians: f64) -> Self {
        let (s, c) = radians.sin_cos();
        let mut m = Self::identity();
        m.data[5] = c;
        m.data[6] = s;
        m.data[9] = -s;
        m.data[10] = c;
        m
    }

    pub fn rotation_y(radians: f64) -> Self {
        let (s, c) = radians.sin_cos();
        let mut m = Self::identity();
        m.data[0] = c;
        m.data[2] = -s;
        m.data[8] = s;
        m.data[10] = c;
        m
    }

    pub fn rotation_z(radians: f64) -> Self {
        let (s, c) = radians.sin_cos();
        let mut m = Self::identity();
        m.data[0] = c;
        m.data[1] = s;
        m.data[4] = -s;
        m.data[5] = c;
        m
    }

    /// Rotation of `radians` about `axis` (normalized internally)
    pub fn rotation(axis: Vector3, radians: f64) -> Self {
        let axis = axis.normalize();
        let (s, c) = radians.sin_cos();
        let t = 1.0 - c;
        let (x, y, z) = (axis.x, axis.y, axis.z);

        Self {
            data: [
                t * x * x + c, t * x * y + s * z, t * x * z - s * y, 0.0,
                t * x * y - s * z, t * y * y + c, t * y * z + s * x, 0.0,
                t * x * z + s * y, t * y * z - s * x, t * z * z + c, 0.0,
                0.0, 0.0, 0.0, 1.0,
            ],
        }
    }

    /// Rotation matrix of a (unit) quaternion
    pub fn from_quaternion(q: &Quaternion) -> Self {
        Self::from_matrix3(&Matrix3::from_quaternion(q))
    }

    /// Embeds a 3x3 linear block, with no translation
    pub fn from_matrix3(m: &Matrix3) -> Self {
        let a = &m.data;
        Self {
            data: [
                a[0], a[1], a[2], 0.0,
                a[3], a[4], a[5], 0.0,
                a[6], a[7], a[8], 0.0,
                0.0, 0.0, 0.0, 1.0,
            ],
        }
    }

    /// Builds `T * R * S`: scale first, then rotate, then translate.
    ///
    /// `extract_translation`, `extract_rotation` and `extract_scale` recover the
    /// inputs (rotation up to sign) for non-zero scale.
    pub fn trs(translation: Vector3, rotation: &Quaternion, scale: Vector3) -> Self {
        let r = Matrix3::from_quaternion(rotation);
        let c0 = r.column(0) * scale.x;
        let c1 = r.column(1) * scale.y;
        let c2 = r.column(2) * scale.z;

        Self {
            data: [
                c0.x, c0.y, c0.z, 0.0,
                c1.x, c1.y, c1.z, 0.0,
                c2.x, c2.y, c2.z, 0.0,
                translation.x, translation.y, translation.z, 1.0,
            ],
        }
    }

    /// Returns the component at `row`, `col`
    #[inline]
    pub fn element(&self, row: usize, col: usize) -> f64 {
        self.data[col * 4 + row]
    }

    /// Returns column `col` as a vector
    #[inline]
    pub fn column(&self, col: usize) -> Vector4 {
        let i = col * 4;
        Vector4::new(self.data[i], self.data[i + 1], self.data[i + 2], self.data[i + 3])
    }

    // The twelve 2x2 sub-determinants shared by `determinant` and `inverse`:
    // six from columns 0-1 and six from columns 2-3.
    fn sub_determinants(&self) -> ([f64; 6], [f64; 6]) {
        let m = &self.data;

        let s0 = m[0] * m[5] - m[1] * m[4];
        let s1 = m[0] * m[6] - m[2] * m[4];
        let s2 = m[0] * m[7] - m[3] * m[4];
        let s3 = m[1] * m[6] - m[2] * m[5];
        let s4 = m[1] * m[7] - m[3] * m[5];
        let s5 = m[2] * m[7] - m[3] * m[6];

        let c0 = m[8] * m[13] - m[9] * m[12];
        let c1 = m[8] * m[14] - m[10] * m[12];
        let c2 = m[8] * m[15] - m[11] * m[12];
        let c3 = m[9] * m[14] - m[10] * m[13];
        let c4 = m[9] * m[15] - m[11] * m[13];
        let c5 = m[10] * m[15] - m[11] * m[14];

        ([s0, s1, s2, s3, s4, s5], [c0, c1, c2, c3, c4, c5])
    }

    #[inline]
    fn determinant_from(s: &[f64; 6], c: &[f64; 6]) -> f64 {
        s[0] * c[5] - s[1] * c[4] + s[2] * c[3] + s[3] * c[2] - s[4] * c[1] + s[5] * c[0]
    }

    /// Returns the determinant of the matrix
    pub fn determinant(&self) -> f64 {
        let (s, c) = self.sub_determinants();
        Self::determinant_from(&s, &c)
    }

    /// Returns the inverse, or `SingularMatrix` when `|det| < 1e-10`
    pub fn inverse(&self) -> crate::Result<Self> {
        self.inverse_with(&Tolerances::default())
    }

    /// `inverse` with a caller-supplied singularity threshold
    pub fn inverse_with(&self, tolerances: &Tolerances) -> crate::Result<Self> {
        let (s, c) = self.sub_determinants();
        let det = Self::determinant_from(&s, &c);
        if tolerances.is_singular(det) {
            tracing::debug!(det, "Matrix4 is singular");
            return Err(MathError::SingularMatrix);
        }

        let m = &self.data;
        let inv_det = 1.0 / det;

        // Adjugate entries from the sub-determinants, column-major.
        let adj = [
            m[5] * c[5] - m[6] * c[4] + m[7] * c[3],
            -m[1] * c[5] + m[2] * c[4] - m[3] * c[3],
            m[13] * s[5] - m[14] * s[4] + m[15] * s[3],
            -m[9] * s[5] + m[10] * s[4] - m[11] * s[3],
            -m[4] * c[5] + m[6] * c[2] - m[7] * c[1],
            m[0] * c[5] - m[2] * c[2] + m[3] * c[1],
            -m[12] * s[5] + m[14] * s[2] - m[15] * s[1],
            m[8] * s[5] - m[10] * s[2] + m[11] * s[1],
            m[4] * c[4] - m[5] * c[2] + m[7] * c[0],
            -m[0] * c[4] + m[1] * c[2] - m[3] * c[0],
            m[12] * s[4] - m[13] * s[2] + m[15] * s[0],
            -m[8] * s[4] + m[9] * s[2] - m[11] * s[0],
            -m[4] * c[3] + m[5] * c[1] - m[6] * c[0],
            m[0] * c[3] - m[1] * c[1] + m[2] * c[0],
            -m[12] * s[3] + m[13] * s[1] - m[14] * s[0],
            m[8] * s[3] - m[9] * s[1] + m[10] * s[0],
        ];

        let mut result = Self { data: adj };
        result.data.iter_mut().for_each(|v| *v *= inv_det);
        Ok(result)
    }

    /// Returns the transpose of the matrix
    #[inline]
    pub fn transpose(&self) -> Self {
        let mut result = Self::zero();

        for col in 0..4 {
            for row in 0..4 {
                result.data[col * 4 + row] = self.data[row * 4 + col];
            }
        }

        result
    }

    /// Multiplies the matrix by a homogeneous vector
    #[inline]
    pub fn transform_vector(&self, v: Vector4) -> Vector4 {
        let m = &self.data;
        Vector4::new(
            m[0] * v.x + m[4] * v.y + m[8] * v.z + m[12] * v.w,
            m[1] * v.x + m[5] * v.y + m[9] * v.z + m[13] * v.w,
            m[2] * v.x + m[6] * v.y + m[10] * v.z + m[14] * v.w,
            m[3] * v.x + m[7] * v.y + m[11] * v.z + m[15] * v.w,
        )
    }

    /// Multiplies the matrix by a 3D point (as if w=1), dividing by the resulting w
    #[inline]
    pub fn transform_point(&self, p: Vector3) -> Vector3 {
        self.transform_vector(p.to_homogeneous()).perspective_divide()
    }

    /// Multiplies the matrix by a 3D direction vector (as if w=0)
    #[inline]
    pub fn transform_direction(&self, v: Vector3) -> Vector3 {
        self.transform_vector(v.extend(0.0)).xyz()
    }

    /// Multiplies the matrix by another matrix (`self * other`)
    pub fn multiply(&self, other: &Self) -> Self {
        let mut result = Self::zero();

        for col in 0..4 {
            for row in 0..4 {
                let mut sum = 0.0;
                for k in 0..4 {
                    sum += self.data[k * 4 + row] * other.data[col * 4 + k];
                }
                result.data[col * 4 + row] = sum;
            }
        }

        result
    }

    /// Extract the upper-left 3x3 matrix
    #[inline]
    pub fn to_matrix3(&self) -> Matrix3 {
        Matrix3::from_matrix4(self)
    }

    /// Reads the translation column
    #[inline]
    pub fn extract_translation(&self) -> Vector3 {
        Vector3::new(self.data[12], self.data[13], self.data[14])
    }

    /// Per-axis lengths of the three linear columns (shear is not separated)
    pub fn extract_scale(&self) -> Vector3 {
        Vector3::new(
            self.column(0).xyz().length(),
            self.column(1).xyz().length(),
            self.column(2).xyz().length(),
        )
    }

    /// Rotation of the linear block after dividing each column by its scale.
    ///
    /// A zero scale on any axis yields non-finite components.
    pub fn extract_rotation(&self) -> Quaternion {
        let scale = self.extract_scale();
        let rotation = Matrix3::from_columns(
            self.column(0).xyz() / scale.x,
            self.column(1).xyz() / scale.y,
            self.column(2).xyz() / scale.z,
        );
        Quaternion::from_rotation_matrix(&rotation)
    }

    /// Convert to nalgebra Matrix4
    #[inline]
    pub fn to_nalgebra(&self) -> na::Matrix4<f64> {
        na::Matrix4::from_column_slice(&self.data)
    }

    /// Convert from nalgebra Matrix4
    #[inline]
    pub fn from_nalgebra(m: &na::Matrix4<f64>) -> Self {
        let mut data = [0.0; 16];
        data.copy_from_slice(m.as_slice());
        Self { data }
    }
}

impl Default for Matrix4 {
    fn default() -> Self {
        Self::identity()
    }
}

impl Mul for Matrix4 {
    type Output = Self;

    #[inline]
    fn mul(self, rhs: Self) -> Self {
        self.multiply(&rhs)
    }
}

impl Mul<Vector4> for Matrix4 {
    type Output = Vector4;

    #[inline]
    fn mul(self, rhs: Vector4) -> Vector4 {
        self.transform_vector(rhs)
    }
}

impl Mul<Vector3> for Matrix4 {
    type Output = Vector4;

    /// Treats the vector as a homogeneous point (w = 1)
    #[inline]
    fn mul(self, rhs: Vector3) -> Vector4 {
        self.transform_vector(rhs.to_homogeneous())
    }
}

impl fmt::Display for Matrix4 {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "Matrix4[")?;
        for row in 0..4 {
            writeln!(
                f,
                "  {:8.4}, {:8.4}, {:8.4}, {:8.4}",
                self.element(row, 0),
                self.element(row, 1),
                self.element(row, 2),
                self.element(row, 3)
            )?;
        }
        write!(f, "]")
    }
}
