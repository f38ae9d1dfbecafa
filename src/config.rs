use crate::math::{EPSILON, SINGULAR_EPSILON};

#[cfg(feature = "serialize")]
use serde::{Serialize, Deserialize};

/// Numeric tolerances used by comparisons and inversion
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub struct Tolerances {
    /// Absolute per-component tolerance for `near` comparisons
    pub near: f64,

    /// Determinant magnitude below which a matrix is treated as singular
    pub singular: f64,
}

impl Tolerances {
    /// Returns true if the two values differ by less than the `near` tolerance
    #[inline]
    pub fn is_near(&self, a: f64, b: f64) -> bool {
        (a - b).abs() < self.near
    }

    /// Returns true if a determinant is too small to invert
    #[inline]
    pub fn is_singular(&self, determinant: f64) -> bool {
        determinant.abs() < self.singular
    }

    /// Componentwise `is_near` over two equally sized slices
    pub(crate) fn all_near(&self, a: &[f64], b: &[f64]) -> bool {
        a.len() == b.len() && a.iter().zip(b).all(|(x, y)| self.is_near(*x, *y))
    }
}

impl Default for Tolerances {
    fn default() -> Self {
        Self {
            near: EPSILON,
            singular: SINGULAR_EPSILON,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_matches_constants() {
        let tol = Tolerances::default();
        assert_eq!(tol.near, 1e-6);
        assert_eq!(tol.singular, 1e-10);
    }

    #[test]
    fn singular_threshold_is_strict() {
        let tol = Tolerances::default();
        assert!(tol.is_singular(0.0));
        assert!(tol.is_singular(-9.0e-11));
        assert!(!tol.is_singular(1e-10));
    }
}
