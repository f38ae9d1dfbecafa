//! Camera and projection matrix factories.
//!
//! Right-handed, camera looking down -Z, OpenGL clip space (z in [-1, 1]).

use crate::math::{Matrix4, Vector3};

impl Matrix4 {
    /// View matrix placing the camera at `eye` looking towards `target`
    pub fn look_at(eye: Vector3, target: Vector3, up: Vector3) -> Self {
        let f = (target - eye).normalize();
        let r = f.cross(&up).normalize();
        let u = r.cross(&f);

        Self::new([
            r.x, u.x, -f.x, 0.0,
            r.y, u.y, -f.y, 0.0,
            r.z, u.z, -f.z, 0.0,
            -r.dot(&eye), -u.dot(&eye), f.dot(&eye), 1.0,
        ])
    }

    /// Perspective projection from a vertical field of view in radians
    pub fn perspective(fov_y: f64, aspect: f64, near: f64, far: f64) -> Self {
        let f = 1.0 / (fov_y / 2.0).tan();
        let nf = 1.0 / (near - far);

        Self::new([
            f / aspect, 0.0, 0.0, 0.0,
            0.0, f, 0.0, 0.0,
            0.0, 0.0, (far + near) * nf, -1.0,
            0.0, 0.0, 2.0 * far * near * nf, 0.0,
        ])
    }

    pub fn orthographic(left: f64, right: f64, bottom: f64, top: f64, near: f64, far: f64) -> Self {
        let rl = 1.0 / (right - left);
        let tb = 1.0 / (top - bottom);
        let fnr = 1.0 / (far - near);

        Self::new([
            2.0 * rl, 0.0, 0.0, 0.0,
            0.0, 2.0 * tb, 0.0, 0.0,
            0.0, 0.0, -2.0 * fnr, 0.0,
            -(right + left) * rl, -(top + bottom) * tb, -(far + near) * fnr, 1.0,
        ])
    }

    pub fn frustum(left: f64, right: f64, bottom: f64, top: f64, near: f64, far: f64) -> Self {
        let rl = 1.0 / (right - left);
        let tb = 1.0 / (top - bottom);
        let nf = 1.0 / (near - far);

        Self::new([
            2.0 * near * rl, 0.0, 0.0, 0.0,
            0.0, 2.0 * near * tb, 0.0, 0.0,
            (right + left) * rl, (top + bottom) * tb, (far + near) * nf, -1.0,
            0.0, 0.0, 2.0 * far * near * nf, 0.0,
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn look_at_moves_eye_to_origin() {
        let m = Matrix4::look_at(Vector3::new(0.0, 0.0, 5.0), Vector3::zero(), Vector3::up());
        assert_abs_diff_eq!(m[14], -5.0, epsilon = 1e-12);
        let eye_in_view = m.transform_point(Vector3::new(0.0, 0.0, 5.0));
        assert_abs_diff_eq!(eye_in_view, Vector3::zero(), epsilon = 1e-12);
    }

    #[test]
    fn perspective_has_projective_row() {
        let m = Matrix4::perspective(std::f64::consts::FRAC_PI_4, 16.0 / 9.0, 0.1, 100.0);
        assert_eq!(m[11], -1.0);
        assert_eq!(m[15], 0.0);
    }

    #[test]
    fn orthographic_unit_cube() {
        let m = Matrix4::orthographic(-1.0, 1.0, -1.0, 1.0, 0.1, 100.0);
        assert_eq!(m[0], 1.0);
        assert_eq!(m[5], 1.0);
    }

    #[test]
    fn frustum_maps_near_plane_corner() {
        let m = Matrix4::frustum(-1.0, 1.0, -1.0, 1.0, 1.0, 10.0);
        let corner = m.transform_point(Vector3::new(1.0, 1.0, -1.0));
        assert_abs_diff_eq!(corner, Vector3::new(1.0, 1.0, -1.0), epsilon = 1e-12);
    }
}
