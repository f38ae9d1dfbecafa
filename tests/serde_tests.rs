#![cfg(feature = "serialize")]

use trs_math::math::{Color, DualQuaternion, Matrix2Affine, Matrix4, Quaternion, Transform, Vector3};
use trs_math::Tolerances;

#[test]
fn test_types_serialize_as_flat_arrays() {
    assert_eq!(serde_json::to_string(&Vector3::new(1.0, 2.0, 3.0)).unwrap(), "[1.0,2.0,3.0]");
    assert_eq!(serde_json::to_string(&Quaternion::identity()).unwrap(), "[0.0,0.0,0.0,1.0]");
    assert_eq!(
        serde_json::to_string(&Matrix2Affine::translation(4.0, 5.0)).unwrap(),
        "[1.0,0.0,0.0,1.0,4.0,5.0]"
    );
    assert_eq!(serde_json::to_string(&Color::RED).unwrap(), "[1.0,0.0,0.0,1.0]");
}

#[test]
fn test_matrix4_deserializes_column_major() {
    let json = "[1,0,0,0, 0,1,0,0, 0,0,1,0, 7,8,9,1]";
    let m: Matrix4 = serde_json::from_str(json).unwrap();
    assert_eq!(m, Matrix4::translation(7.0, 8.0, 9.0));
}

#[test]
fn test_dual_quaternion_and_transform_survive_json() {
    let dq = DualQuaternion::from_translation(Vector3::new(1.0, 2.0, 3.0));
    let json = serde_json::to_string(&dq).unwrap();
    assert_eq!(serde_json::from_str::<DualQuaternion>(&json).unwrap(), dq);

    let transform = Transform::from_position(Vector3::new(-1.0, 0.5, 2.0));
    let json = serde_json::to_string(&transform).unwrap();
    assert_eq!(serde_json::from_str::<Transform>(&json).unwrap(), transform);

    let tolerances: Tolerances = serde_json::from_str(r#"{"near":0.001,"singular":1e-12}"#).unwrap();
    assert_eq!(tolerances.near, 0.001);
}

#[test]
fn test_wrong_length_is_rejected() {
    assert!(serde_json::from_str::<Vector3>("[1.0, 2.0]").is_err());
}
