use crate::math::{DualQuaternion, Matrix4, Quaternion, Rotation, Vector3, MIN_SCALE};

#[cfg(feature = "serialize")]
use serde::{Serialize, Deserialize};

/// A decomposed transform: scale, then rotation, then translation
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub struct Transform {
    /// Translation
    pub position: Vector3,

    /// Rotation as a quaternion
    pub rotation: Quaternion,

    /// Scale in each axis
    pub scale: Vector3,
}

impl Transform {
    /// Creates a new transform with the given position, rotation, and scale
    #[inline]
    pub fn new(position: Vector3, rotation: Quaternion, scale: Vector3) -> Self {
        Self {
            position,
            rotation,
            scale,
        }
    }

    /// Creates a new identity transform (no translation, no rotation, unit scale)
    #[inline]
    pub fn identity() -> Self {
        Self::new(Vector3::zero(), Quaternion::identity(), Vector3::one())
    }

    /// Creates a new transform from just a position
    #[inline]
    pub fn from_position(position: Vector3) -> Self {
        Self::new(position, Quaternion::identity(), Vector3::one())
    }

    /// Creates a new transform from a position and rotation
    #[inline]
    pub fn from_position_rotation(position: Vector3, rotation: Quaternion) -> Self {
        Self::new(position, rotation, Vector3::one())
    }

    /// Decomposes a 4x4 matrix into translation, rotation and scale.
    ///
    /// Shear is folded into the rotation estimate; zero scale is undefined.
    pub fn from_matrix(matrix: &Matrix4) -> Self {
        Self {
            position: matrix.extract_translation(),
            rotation: matrix.extract_rotation(),
            scale: matrix.extract_scale(),
        }
    }

    /// Converts the transform to a 4x4 transformation matrix
    #[inline]
    pub fn to_matrix(&self) -> Matrix4 {
        Matrix4::trs(self.position, &self.rotation, self.scale)
    }

    /// Rigid part of the transform; scale is dropped
    #[inline]
    pub fn to_dual_quaternion(&self) -> DualQuaternion {
        DualQuaternion::from_rotation_translation(&self.rotation, self.position)
    }

    /// Transforms a point by this transform
    #[inline]
    pub fn transform_point(&self, point: Vector3) -> Vector3 {
        self.transform_direction(point) + self.position
    }

    /// Transforms a direction vector by this transform (ignoring translation)
    #[inline]
    pub fn transform_direction(&self, direction: Vector3) -> Vector3 {
        self.rotation.rotate_vector(direction.component_mul(&self.scale))
    }

    /// Inverts this transform.
    ///
    /// Exact for uniform scale. An axis whose scale magnitude is at most
    /// `MIN_SCALE` keeps a scale of one.
    pub fn inverse(&self) -> Self {
        let invert = |s: f64| if s.abs() > MIN_SCALE { 1.0 / s } else { 1.0 };
        let inv_scale = Vector3::new(invert(self.scale.x), invert(self.scale.y), invert(self.scale.z));
        let inv_rotation = self.rotation.conjugate();
        let inv_position = -inv_rotation.rotate_vector(self.position).component_mul(&inv_scale);

        Self {
            position: inv_position,
            rotation: inv_rotation,
            scale: inv_scale,
        }
    }

    /// Combines this transform with another, applying this one first.
    ///
    /// Exact when `other` has uniform scale. A non-uniform `other.scale` shears
    /// a rotated `self`, which a decomposed transform cannot hold; compose with
    /// `to_matrix()` products in that case.
    pub fn combine(&self, other: &Self) -> Self {
        Self {
            position: other.transform_point(self.position),
            rotation: other.rotation * self.rotation,
            scale: self.scale.component_mul(&other.scale),
        }
    }

    /// Interpolates position and scale linearly and rotation spherically
    pub fn lerp(&self, other: &Self, t: f64) -> Self {
        Self {
            position: self.position.lerp(&other.position, t),
            rotation: self.rotation.slerp(&other.rotation, t),
            scale: self.scale.lerp(&other.scale, t),
        }
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::identity()
    }
}

impl From<Transform> for Matrix4 {
    fn from(transform: Transform) -> Self {
        transform.to_matrix()
    }
}
