use trs_math::math::{self, Color, Transform, Vector2, Vector3, Vector4, Quaternion, Matrix4, Rotation};
use trs_math::error::MathError;
use trs_math::Tolerances;
use std::f64::consts::PI;
use approx::{assert_abs_diff_eq, assert_relative_eq};

#[test]
fn test_vector3_operations() {
    let v1 = Vector3::new(1.0, 2.0, 3.0);
    let v2 = Vector3::new(4.0, 5.0, 6.0);

    // Addition
    let sum = v1 + v2;
    assert_eq!(sum, Vector3::new(5.0, 7.0, 9.0));

    // Subtraction
    let diff = v2 - v1;
    assert_eq!(diff, Vector3::new(3.0, 3.0, 3.0));

    // Scalar multiplication, both sides
    assert_eq!(v1 * 2.0, Vector3::new(2.0, 4.0, 6.0));
    assert_eq!(2.0 * v1, v1 * 2.0);

    // Dot product
    assert_eq!(v1.dot(&v2), 32.0);

    // Cross product
    let cross = v1.cross(&v2);
    assert_eq!(cross, Vector3::new(-3.0, 6.0, -3.0));
    assert_eq!(cross.dot(&v1), 0.0);

    // Length
    let length = v1.length();
    assert_relative_eq!(length, 14.0f64.sqrt());

    // Normalize
    let normalized = v1.normalize();
    assert_relative_eq!(normalized.length(), 1.0);
    assert_relative_eq!(normalized, v1 / length);

    let mut m = v2;
    m.normalize_mut();
    assert_relative_eq!(m, v2.normalize());
}

#[test]
fn test_vector3_helpers() {
    let v = Vector3::new(3.0, 4.0, 0.0);

    assert_eq!(v.project(&Vector3::unit_x()), Vector3::new(3.0, 0.0, 0.0));
    assert_eq!(v.reject(&Vector3::unit_x()), Vector3::new(0.0, 4.0, 0.0));
    assert_eq!(
        Vector3::new(1.0, -1.0, 0.0).reflect(&Vector3::up()),
        Vector3::new(1.0, 1.0, 0.0)
    );
    assert_relative_eq!(Vector3::unit_x().angle_between(&Vector3::unit_y()), PI / 2.0);
    assert_relative_eq!(v.clamp_length(2.5).length(), 2.5);
    assert_eq!(v.clamp_length(10.0), v);
    assert_eq!(v.distance(&Vector3::zero()), 5.0);

    let a = Vector3::new(1.5, -2.5, 3.0);
    let b = Vector3::new(-1.0, 4.0, 2.0);
    assert_eq!(a.min(&b), Vector3::new(-1.0, -2.5, 2.0));
    assert_eq!(a.max(&b), Vector3::new(1.5, 4.0, 3.0));
    assert_eq!(a.abs(), Vector3::new(1.5, 2.5, 3.0));
    assert_eq!(a.floor(), Vector3::new(1.0, -3.0, 3.0));
    assert_eq!(a.ceil(), Vector3::new(2.0, -2.0, 3.0));
    assert_eq!(a.component_mul(&b), Vector3::new(-1.5, -10.0, 6.0));
    assert_eq!(a.xz(), Vector2::new(1.5, 3.0));
    assert_eq!(a.to_homogeneous(), Vector4::new(1.5, -2.5, 3.0, 1.0));

    assert_eq!(Vector3::forward(), Vector3::new(0.0, 0.0, -1.0));
    assert_eq!(Vector3::forward(), -Vector3::back());
    assert_eq!(Vector3::left(), -Vector3::right());
    assert_eq!(Vector3::default(), Vector3::ZERO);
}

#[test]
fn test_vector3_slerp() {
    let a = Vector3::unit_x();
    let b = Vector3::unit_y();

    let mid = a.slerp(&b, 0.5);
    let h = 0.5f64.sqrt();
    assert_abs_diff_eq!(mid, Vector3::new(h, h, 0.0), epsilon = 1e-12);
    assert_abs_diff_eq!(a.slerp(&b, 0.0), a, epsilon = 1e-12);
    assert_abs_diff_eq!(a.slerp(&b, 1.0), b, epsilon = 1e-12);

    // Parallel inputs degrade to lerp instead of producing NaN
    let c = a * 2.0;
    assert_eq!(a.slerp(&c, 0.5), Vector3::new(1.5, 0.0, 0.0));
}

#[test]
fn test_vector2_operations() {
    let v = Vector2::new(1.0, 0.0);

    assert_abs_diff_eq!(v.rotate(PI / 2.0), Vector2::new(0.0, 1.0), epsilon = 1e-12);
    assert_eq!(v.perpendicular(), Vector2::new(0.0, 1.0));
    assert_eq!(v.cross(&Vector2::new(0.0, 1.0)), 1.0);
    assert_relative_eq!(Vector2::new(0.0, 2.0).angle(), PI / 2.0);
    assert_relative_eq!(Vector2::zero().angle_to(&Vector2::new(-1.0, 0.0)), PI);
    assert_eq!(
        Vector2::new(1.0, -1.0).reflect(&Vector2::unit_y()),
        Vector2::new(1.0, 1.0)
    );
    assert_eq!(Vector2::new(3.0, 4.0).length(), 5.0);
    assert_eq!(Vector2::new(6.0, 8.0).clamp_length(5.0), Vector2::new(3.0, 4.0));
    assert_eq!(v.lerp(&Vector2::new(3.0, 2.0), 0.5), Vector2::new(2.0, 1.0));
    assert_eq!(v.extend(7.0), Vector3::new(1.0, 0.0, 7.0));
}

#[test]
fn test_vector4_operations() {
    let v = Vector4::new(2.0, 4.0, 6.0, 2.0);

    assert_eq!(v.perspective_divide(), Vector3::new(1.0, 2.0, 3.0));
    assert_eq!(Vector4::new(2.0, 4.0, 6.0, 0.0).perspective_divide(), Vector3::new(2.0, 4.0, 6.0));
    assert_eq!(v.xyz(), Vector3::new(2.0, 4.0, 6.0));
    assert_eq!(v.dot(&Vector4::one()), 14.0);
    assert_eq!(Vector4::zero().lerp(&v, 0.5), Vector4::new(1.0, 2.0, 3.0, 1.0));
    assert_relative_eq!(v.normalize().length(), 1.0);
}

#[test]
fn test_indexing_and_arrays() {
    let mut v = Vector3::new(1.0, 2.0, 3.0);
    v[1] = 5.0;
    assert_eq!(v[1], 5.0);
    assert_eq!(v.to_array(), [1.0, 5.0, 3.0]);
    assert_eq!(Vector3::from([1.0, 5.0, 3.0]), v);

    let arr: [f64; 4] = Vector4::new(1.0, 2.0, 3.0, 4.0).into();
    assert_eq!(arr, [1.0, 2.0, 3.0, 4.0]);
}

#[test]
#[should_panic]
fn test_vector_index_out_of_range() {
    let v = Vector3::zero();
    let _ = v[3];
}

#[test]
fn test_zero_vector_normalize_is_not_finite() {
    let n = Vector3::zero().normalize();
    assert!(!n.x.is_finite());
}

#[test]
fn test_near_uses_absolute_tolerance() {
    let a = Vector3::new(1.0, 1.0, 1.0);
    let b = Vector3::new(1.0 + 5e-7, 1.0, 1.0 - 5e-7);
    let c = Vector3::new(1.0 + 2e-6, 1.0, 1.0);

    assert!(a.near(&b));
    assert!(!a.near(&c));

    let loose = Tolerances { near: 1e-3, ..Tolerances::default() };
    assert!(a.near_with(&c, &loose));
}

#[test]
fn test_scalar_helpers() {
    assert!(math::approx_eq(0.1 + 0.2, 0.3));
    assert!(math::approx_zero(1e-9));
    assert_eq!(math::clamp(1.5, -1.0, 1.0), 1.0);
    assert_relative_eq!(math::lerp(0.0, 10.0, 0.3), 3.0);
    assert_relative_eq!(math::to_radians(180.0), PI);
    assert_relative_eq!(math::to_degrees(PI / 2.0), 90.0);
}

#[test]
fn test_display_formats() {
    assert_eq!(Vector3::new(1.0, 2.5, -3.0).to_string(), "Vector3(1, 2.5, -3)");
    assert_eq!(Quaternion::identity().to_string(), "Quaternion(0, 0, 0, 1)");
    assert_eq!(MathError::SingularMatrix.to_string(), "Matrix is not invertible");
}

#[test]
fn test_transform_operations() {
    let position = Vector3::new(1.0, 2.0, 3.0);
    let rotation = Quaternion::from_axis_angle(Vector3::new(0.0, 1.0, 0.0), PI / 2.0);
    let scale = Vector3::new(2.0, 2.0, 2.0);

    let transform = Transform::new(position, rotation, scale);

    // Scale by 2, rotate 90 degrees around Y, then translate:
    // (1, 0, 0) -> (2, 0, 0) -> (0, 0, -2) -> (1, 2, 1)
    let point = Vector3::new(1.0, 0.0, 0.0);
    let transformed_point = transform.transform_point(point);
    assert_abs_diff_eq!(transformed_point, Vector3::new(1.0, 2.0, 1.0), epsilon = 1e-12);

    // Matrix form agrees with the decomposed form
    let matrix = transform.to_matrix();
    assert_abs_diff_eq!(matrix.transform_point(point), transformed_point, epsilon = 1e-12);
    assert_eq!(Matrix4::from(transform), matrix);

    // Inverse transform
    let inverse = transform.inverse();
    let original = inverse.transform_point(transformed_point);
    assert_abs_diff_eq!(original, point, epsilon = 1e-12);

    // Directions ignore translation
    assert_abs_diff_eq!(
        transform.transform_direction(point),
        Vector3::new(0.0, 0.0, -2.0),
        epsilon = 1e-12
    );
}

#[test]
fn test_transform_from_matrix_recovers_components() {
    let rotation = Quaternion::from_axis_angle(Vector3::new(1.0, 2.0, 3.0), 0.8);
    let original = Transform::new(Vector3::new(-4.0, 0.5, 9.0), rotation, Vector3::new(1.0, 2.0, 3.0));

    let decomposed = Transform::from_matrix(&original.to_matrix());
    assert_abs_diff_eq!(decomposed.position, original.position, epsilon = 1e-9);
    assert_abs_diff_eq!(decomposed.scale, original.scale, epsilon = 1e-9);

    let r = decomposed.rotation;
    assert!(r.near(&rotation) || r.near(&-rotation));
}

#[test]
fn test_transform_combine_and_lerp() {
    let first = Transform::from_position(Vector3::new(1.0, 0.0, 0.0));
    let second = Transform::from_position_rotation(
        Vector3::new(0.0, 0.0, 5.0),
        Quaternion::from_axis_angle(Vector3::up(), PI / 2.0),
    );

    let combined = first.combine(&second);
    let p = Vector3::new(0.0, 1.0, 0.0);
    assert_abs_diff_eq!(
        combined.transform_point(p),
        second.transform_point(first.transform_point(p)),
        epsilon = 1e-12
    );

    let halfway = Transform::identity().lerp(&second, 0.5);
    assert_abs_diff_eq!(halfway.position, Vector3::new(0.0, 0.0, 2.5), epsilon = 1e-12);
    assert_relative_eq!(halfway.rotation.angle(), PI / 4.0, epsilon = 1e-9);
    assert_eq!(Transform::default(), Transform::identity());
}

#[test]
fn test_transform_combine_with_uniform_scale_is_exact() {
    let first = Transform::new(
        Vector3::new(1.0, -2.0, 0.5),
        Quaternion::from_axis_angle(Vector3::new(1.0, 1.0, 0.0), 0.9),
        Vector3::new(1.0, 2.0, 3.0),
    );
    let second = Transform::new(
        Vector3::new(0.0, 4.0, -1.0),
        Quaternion::from_axis_angle(Vector3::unit_z(), 0.4),
        Vector3::new(2.0, 2.0, 2.0),
    );
    let p = Vector3::new(0.3, -1.0, 2.0);

    let combined = first.combine(&second);
    assert_abs_diff_eq!(
        combined.transform_point(p),
        second.transform_point(first.transform_point(p)),
        epsilon = 1e-12
    );
    assert!(combined.to_matrix().near(&(second.to_matrix() * first.to_matrix())));
}

#[test]
fn test_transform_combine_with_non_uniform_scale_needs_matrices() {
    let rotated = Transform::from_position_rotation(
        Vector3::zero(),
        Quaternion::from_axis_angle(Vector3::unit_z(), 0.7),
    );
    let stretched = Transform::new(Vector3::zero(), Quaternion::identity(), Vector3::new(2.0, 1.0, 1.0));
    let p = Vector3::new(1.0, 1.0, 0.0);

    let sequential = stretched.transform_point(rotated.transform_point(p));
    let (s, c) = 0.7f64.sin_cos();
    assert_abs_diff_eq!(sequential, Vector3::new(2.0 * (c - s), s + c, 0.0), epsilon = 1e-12);

    // The stretch shears the rotated frame, so only the matrix product keeps it
    let product = stretched.to_matrix() * rotated.to_matrix();
    assert_abs_diff_eq!(product.transform_point(p), sequential, epsilon = 1e-12);
    assert!(!rotated.combine(&stretched).transform_point(p).near(&sequential));
}

#[test]
fn test_transform_inverse_keeps_unit_scale_on_zero_axes() {
    let flat = Transform::new(
        Vector3::new(1.0, 2.0, 3.0),
        Quaternion::identity(),
        Vector3::new(0.0, 2.0, math::MIN_SCALE / 10.0),
    );

    let inverse = flat.inverse();
    assert_eq!(inverse.scale, Vector3::new(1.0, 0.5, 1.0));
    assert_abs_diff_eq!(inverse.position, Vector3::new(-1.0, -1.0, -3.0), epsilon = 1e-12);
}

#[test]
fn test_transform_to_dual_quaternion_drops_scale() {
    let transform = Transform::new(
        Vector3::new(1.0, 2.0, 3.0),
        Quaternion::from_axis_angle(Vector3::unit_z(), PI / 3.0),
        Vector3::new(4.0, 4.0, 4.0),
    );
    let dq = transform.to_dual_quaternion();
    let p = Vector3::new(1.0, 1.0, 0.0);

    let rigid = Transform::from_position_rotation(transform.position, transform.rotation);
    assert_abs_diff_eq!(dq.transform_point(p), rigid.transform_point(p), epsilon = 1e-12);
}

#[test]
fn test_color_operations() {
    let c = Color::rgb(0.2, 0.4, 0.6);

    assert_eq!(c.a, 1.0);
    assert_eq!(Color::default(), Color::BLACK);
    assert_abs_diff_eq!(c + Color::rgba(0.1, 0.1, 0.1, 0.0), Color::rgb(0.3, 0.5, 0.7), epsilon = 1e-12);
    assert_abs_diff_eq!(c * 0.5, Color::rgba(0.1, 0.2, 0.3, 0.5), epsilon = 1e-12);
    assert_eq!(c * Color::WHITE, c);
    assert_eq!(Color::RED.modulate(&Color::GREEN), Color::BLACK);
    assert_eq!(Color::BLACK.lerp(&Color::WHITE, 0.5), Color::rgb(0.5, 0.5, 0.5));
    assert_eq!(Color::rgba(1.5, -0.5, 0.5, 2.0).clamp(), Color::rgba(1.0, 0.0, 0.5, 1.0));

    assert_eq!(c.to_vector3(), Vector3::new(0.2, 0.4, 0.6));
    assert_eq!(Color::from_vector4(Vector4::new(1.0, 0.0, 1.0, 0.5)), Color::rgba(1.0, 0.0, 1.0, 0.5));
    assert_eq!(Color::from_vector3(Vector3::one(), 1.0), Color::WHITE);
}

#[test]
fn test_color_hex() {
    assert_eq!(Color::from_hex("#ffffff").unwrap(), Color::WHITE);
    assert_eq!(Color::from_hex("FF00FF").unwrap(), Color::MAGENTA);
    assert_eq!(Color::CYAN.to_hex(), "#00ffffff");
    assert_eq!(Color::TRANSPARENT.to_hex(), "#00000000");
    assert_eq!(Color::from_bytes(10, 20, 30, 40).to_bytes(), [10, 20, 30, 40]);

    assert!(matches!(Color::from_hex("#fff"), Err(MathError::InvalidHexColor(_))));
    assert!(matches!(Color::from_hex("#gg0000"), Err(MathError::InvalidHexColor(_))));
}

#[test]
fn test_color_indexing() {
    let mut c = Color::rgba(0.1, 0.2, 0.3, 0.4);
    assert_eq!([c[0], c[1], c[2], c[3]], c.to_array());

    c[3] = 1.0;
    c[0] += 0.5;
    assert_abs_diff_eq!(c, Color::rgba(0.6, 0.2, 0.3, 1.0), epsilon = 1e-12);
}

#[test]
#[should_panic(expected = "Color index out of range: 4")]
fn test_color_index_out_of_range() {
    let _ = Color::WHITE[4];
}
