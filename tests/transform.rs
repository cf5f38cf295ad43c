use approx::assert_relative_eq;
use nalgebra::{Isometry3, Translation3, UnitQuaternion, Vector3};
use tumble::core::Transform;

#[test]
fn position_and_translation() {
    let mut t = Transform::new();
    assert_eq!(*t.position(), Vector3::new(0.0, 0.0, 0.0));
    t.set_position_vec(Vector3::new(1.0, 2.0, 3.0));
    assert_eq!(*t.position(), Vector3::new(1.0, 2.0, 3.0));
    t.translate(Vector3::new(1.0, -1.0, 0.5));
    assert_eq!(*t.position(), Vector3::new(2.0, 1.0, 3.5));
}

#[test]
fn rotation_and_scale() {
    let mut t = Transform::new();
    let rot = UnitQuaternion::from_euler_angles(0.0, 1.0, 0.0);
    t.set_rotation(rot);
    assert_eq!(t.rotation().coords, rot.coords);
    t.set_uniform_scale(2.0);
    assert_eq!(*t.scale(), Vector3::new(2.0, 2.0, 2.0));
}

#[test]
fn isometry_keeps_scale() {
    let mut t = Transform::new();
    t.set_uniform_scale(0.25);

    let rot = UnitQuaternion::from_euler_angles(0.3, 0.0, 1.2);
    let pose = Isometry3::from_parts(Translation3::new(4.0, 5.0, 6.0), rot);
    t.set_isometry(&pose);

    assert_eq!(*t.position(), Vector3::new(4.0, 5.0, 6.0));
    assert_eq!(*t.rotation(), rot);
    assert_eq!(*t.scale(), Vector3::new(0.25, 0.25, 0.25));

    let local = Vector3::new(1.0, 0.0, 0.0);
    let expected = pose * nalgebra::Point3::from(local * 0.25);
    let actual = t.full_matrix() * nalgebra::Point3::from(local);
    assert_relative_eq!(actual, expected, epsilon = 1e-5);
}

#[test]
fn directions_follow_rotation() {
    let mut t = Transform::new();
    assert_eq!(t.forward(), Vector3::new(0.0, 0.0, -1.0));

    t.set_rotation(UnitQuaternion::from_axis_angle(
        &Vector3::y_axis(),
        std::f32::consts::FRAC_PI_2,
    ));
    assert_relative_eq!(t.forward(), Vector3::new(-1.0, 0.0, 0.0), epsilon = 1e-6);
    assert_relative_eq!(t.right(), Vector3::new(0.0, 0.0, -1.0), epsilon = 1e-6);
    assert_relative_eq!(t.up(), Vector3::y(), epsilon = 1e-6);
}
