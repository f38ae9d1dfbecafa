use proptest::prelude::*;
use trs_math::math::{DualQuaternion, Matrix2, Matrix3, Matrix4, Quaternion, Vector3};
use std::f64::consts::PI;

prop_compose! {
    fn vector3(range: f64)(x in -range..range, y in -range..range, z in -range..range) -> Vector3 {
        Vector3::new(x, y, z)
    }
}

prop_compose! {
    fn unit_quaternion()(
        axis in vector3(1.0).prop_filter("axis must be non-zero", |a| a.length() > 1e-3),
        angle in -PI..PI
    ) -> Quaternion {
        Quaternion::from_axis_angle(axis, angle)
    }
}

prop_compose! {
    fn scale3()(x in 0.2f64..5.0, y in 0.2f64..5.0, z in 0.2f64..5.0) -> Vector3 {
        Vector3::new(x, y, z)
    }
}

fn sign_insensitive_near(a: &Quaternion, b: &Quaternion) -> bool {
    a.near(b) || a.near(&-*b)
}

proptest! {
    #[test]
    fn matrix4_times_inverse_is_identity(data in prop::array::uniform16(-10.0f64..10.0)) {
        let m = Matrix4::new(data);
        prop_assume!(m.determinant().abs() > 1e-2);

        let inv = m.inverse();
        prop_assert!(inv.is_ok());
        prop_assert!((m * inv.unwrap()).near(&Matrix4::identity()));
    }

    #[test]
    fn matrix3_times_inverse_is_identity(data in prop::array::uniform9(-10.0f64..10.0)) {
        let m = Matrix3::new(data);
        prop_assume!(m.determinant().abs() > 1e-2);

        let inv = m.inverse();
        prop_assert!(inv.is_ok());
        prop_assert!((m * inv.unwrap()).near(&Matrix3::identity()));
    }

    #[test]
    fn matrix2_times_inverse_is_identity(data in prop::array::uniform4(-10.0f64..10.0)) {
        let m = Matrix2::new(data);
        prop_assume!(m.determinant().abs() > 1e-2);

        let inv = m.inverse();
        prop_assert!(inv.is_ok());
        prop_assert!((m * inv.unwrap()).near(&Matrix2::identity()));
    }

    #[test]
    fn trs_matrix_inverts(t in vector3(100.0), r in unit_quaternion(), s in scale3()) {
        let m = Matrix4::trs(t, &r, s);
        let inv = m.inverse();
        prop_assert!(inv.is_ok());
        prop_assert!((m * inv.unwrap()).near(&Matrix4::identity()));
    }

    #[test]
    fn repeated_column_is_singular(data in prop::array::uniform16(-10.0f64..10.0)) {
        let mut m = Matrix4::new(data);
        for row in 0..4 {
            m.data[4 + row] = m.data[row];
        }

        prop_assert!(m.inverse().is_err());
        prop_assert!(m.to_matrix3().inverse().is_err());
    }

    #[test]
    fn unit_quaternion_times_conjugate_is_identity(q in unit_quaternion()) {
        prop_assert!((q.length() - 1.0).abs() < 1e-6);
        prop_assert!((q * q.conjugate()).near(&Quaternion::identity()));
    }

    #[test]
    fn slerp_hits_endpoints_and_stays_unit(a in unit_quaternion(), b in unit_quaternion(), t in 0.0f64..=1.0) {
        prop_assert!(a.slerp(&b, 0.0).near(&a));
        // The far endpoint may come back as -b, the same rotation
        prop_assert!(sign_insensitive_near(&a.slerp(&b, 1.0), &b));
        prop_assert!((a.slerp(&b, t).length() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn quaternion_matrix_round_trip(q in unit_quaternion()) {
        let extracted = Matrix4::from_quaternion(&q).extract_rotation();
        prop_assert!(sign_insensitive_near(&extracted, &q));
    }

    #[test]
    fn trs_decomposition_round_trip(t in vector3(100.0), r in unit_quaternion(), s in scale3()) {
        let m = Matrix4::trs(t, &r, s);

        prop_assert!(m.extract_translation().near(&t));
        prop_assert!(m.extract_scale().near(&s));
        prop_assert!(sign_insensitive_near(&m.extract_rotation(), &r));
    }

    #[test]
    fn dual_quaternion_round_trip(r in unit_quaternion(), t in vector3(100.0)) {
        let dq = DualQuaternion::from_rotation_translation(&r, t);

        prop_assert!(dq.rotation().near(&r));
        prop_assert!(dq.translation().near(&t));
    }

    #[test]
    fn dual_quaternion_product_composes(
        ra in unit_quaternion(),
        ta in vector3(10.0),
        rb in unit_quaternion(),
        tb in vector3(10.0),
        p in vector3(10.0)
    ) {
        let a = DualQuaternion::from_rotation_translation(&ra, ta);
        let b = DualQuaternion::from_rotation_translation(&rb, tb);

        let composed = (a * b).transform_point(p);
        prop_assert!(composed.near(&a.transform_point(b.transform_point(p))));
        prop_assert!((a * b).to_matrix4().near(&(a.to_matrix4() * b.to_matrix4())));
    }
}
