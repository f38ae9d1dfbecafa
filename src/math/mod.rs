/// Implements `approx::AbsDiffEq` and `approx::RelativeEq` componentwise over `to_array()`
macro_rules! impl_approx_eq {
    ($ty:ty) => {
        impl approx::AbsDiffEq for $ty {
            type Epsilon = f64;

            fn default_epsilon() -> f64 {
                crate::math::EPSILON
            }

            fn abs_diff_eq(&self, other: &Self, epsilon: f64) -> bool {
                self.to_array()
                    .iter()
                    .zip(other.to_array().iter())
                    .all(|(a, b)| approx::AbsDiffEq::abs_diff_eq(a, b, epsilon))
            }
        }

        impl approx::RelativeEq for $ty {
            fn default_max_relative() -> f64 {
                <f64 as approx::RelativeEq>::default_max_relative()
            }

            fn relative_eq(&self, other: &Self, epsilon: f64, max_relative: f64) -> bool {
                self.to_array()
                    .iter()
                    .zip(other.to_array().iter())
                    .all(|(a, b)| approx::RelativeEq::relative_eq(a, b, epsilon, max_relative))
            }
        }
    };
}

/// Flat column-major storage plumbing shared by the matrix types: component
/// access, array conversions, `near`, elementwise `+`/`-` and scalar `*`.
macro_rules! impl_matrix_storage {
    ($ty:ident, $n:literal) => {
        impl $ty {
            /// Creates a matrix from column-major components
            #[inline]
            pub fn new(data: [f64; $n]) -> Self {
                Self { data }
            }

            /// Returns a copy of the column-major components
            #[inline]
            pub fn to_array(&self) -> [f64; $n] {
                self.data
            }

            /// Borrows the column-major components
            #[inline]
            pub fn as_slice(&self) -> &[f64] {
                &self.data
            }

            /// Returns true if every component is within `EPSILON` of `other`
            #[inline]
            pub fn near(&self, other: &Self) -> bool {
                self.near_with(other, &crate::config::Tolerances::default())
            }

            /// `near` with caller-supplied tolerances
            #[inline]
            pub fn near_with(&self, other: &Self, tolerances: &crate::config::Tolerances) -> bool {
                tolerances.all_near(&self.data, &other.data)
            }

            /// Square root of the sum of squared components
            pub fn frobenius_norm(&self) -> f64 {
                self.data.iter().map(|v| v * v).sum::<f64>().sqrt()
            }

            /// Multiplies every component by a scalar
            pub fn scale_by(&self, scalar: f64) -> Self {
                let mut data = self.data;
                data.iter_mut().for_each(|v| *v *= scalar);
                Self { data }
            }
        }

        impl From<[f64; $n]> for $ty {
            #[inline]
            fn from(data: [f64; $n]) -> Self {
                Self { data }
            }
        }

        impl From<$ty> for [f64; $n] {
            #[inline]
            fn from(matrix: $ty) -> Self {
                matrix.data
            }
        }

        impl std::ops::Index<usize> for $ty {
            type Output = f64;

            #[inline]
            fn index(&self, index: usize) -> &f64 {
                &self.data[index]
            }
        }

        impl std::ops::IndexMut<usize> for $ty {
            #[inline]
            fn index_mut(&mut self, index: usize) -> &mut f64 {
                &mut self.data[index]
            }
        }

        impl std::ops::Add for $ty {
            type Output = Self;

            fn add(self, rhs: Self) -> Self {
                let mut data = self.data;
                data.iter_mut().zip(rhs.data.iter()).for_each(|(a, b)| *a += b);
                Self { data }
            }
        }

        impl std::ops::Sub for $ty {
            type Output = Self;

            fn sub(self, rhs: Self) -> Self {
                let mut data = self.data;
                data.iter_mut().zip(rhs.data.iter()).for_each(|(a, b)| *a -= b);
                Self { data }
            }
        }

        impl std::ops::Mul<f64> for $ty {
            type Output = Self;

            #[inline]
            fn mul(self, rhs: f64) -> Self {
                self.scale_by(rhs)
            }
        }

        impl_approx_eq!($ty);
    };
}

mod vector;
mod matrix2;
mod matrix;
mod projection;
mod rotation;
mod dual_quaternion;
mod transform;
mod color;

pub use vector::{Vector2, Vector3, Vector4};
pub use matrix2::{Matrix2, Matrix2Affine};
pub use matrix::{Matrix3, Matrix4};
pub use rotation::{Quaternion, Rotation};
pub use dual_quaternion::DualQuaternion;
pub use transform::Transform;
pub use color::Color;

/// Tolerance for "near" comparisons between values
pub const EPSILON: f64 = 1.0e-6;

/// Determinant magnitude below which `inverse()` reports a singular matrix
pub const SINGULAR_EPSILON: f64 = 1.0e-10;

/// Quaternion dot product above which slerp degrades to normalized lerp
pub const SLERP_LINEAR_THRESHOLD: f64 = 0.9995;

/// Scale magnitude treated as zero by `Transform::inverse`; shares the `near` tolerance
pub const MIN_SCALE: f64 = EPSILON;

/// Sine of the half angle below which the rotation axis is considered undefined
pub const AXIS_ANGLE_EPSILON: f64 = 0.001;

/// Returns true if the two floating point values are approximately equal
#[inline]
pub fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() < EPSILON
}

/// Returns true if the value is approximately zero
#[inline]
pub fn approx_zero(a: f64) -> bool {
    a.abs() < EPSILON
}

/// Clamps a value between a minimum and maximum value
#[inline]
pub fn clamp(value: f64, min: f64, max: f64) -> f64 {
    value.max(min).min(max)
}

/// Linearly interpolates between two values
#[inline]
pub fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

/// Converts degrees to radians
#[inline]
pub fn to_radians(degrees: f64) -> f64 {
    degrees * std::f64::consts::PI / 180.0
}

/// Converts radians to degrees
#[inline]
pub fn to_degrees(radians: f64) -> f64 {
    radians * 180.0 / std::f64::consts::PI
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scalar_helpers() {
        assert!(approx_eq(1.0, 1.0 + 5e-7));
        assert!(!approx_eq(1.0, 1.0 + 2e-6));
        assert!(approx_zero(-1e-7));
        assert_eq!(clamp(5.0, 0.0, 1.0), 1.0);
        assert_eq!(clamp(-5.0, 0.0, 1.0), 0.0);
        assert_eq!(lerp(2.0, 4.0, 0.25), 2.5);
        assert!(approx_eq(to_degrees(to_radians(90.0)), 90.0));
    }
}
