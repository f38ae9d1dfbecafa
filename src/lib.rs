pub mod math;
pub mod config;

/// Re-export common types for easier usage
pub use crate::config::Tolerances;
pub use crate::math::{
    Color, DualQuaternion, Matrix2, Matrix2Affine, Matrix3, Matrix4, Quaternion, Rotation,
    Transform, Vector2, Vector3, Vector4,
};

/// Error types for the transform algebra
pub mod error {
    use thiserror::Error;

    #[derive(Error, Debug, Clone, PartialEq, Eq)]
    pub enum MathError {
        #[error("Matrix is not invertible")]
        SingularMatrix,

        #[error("Invalid hex color: {0}")]
        InvalidHexColor(String),
    }
}

/// Result type for fallible transform operations
pub type Result<T> = std::result::Result<T, error::MathError>;

/// Library version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
