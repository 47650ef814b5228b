use super::*;

#[test]
fn depth_scale_shrinks_with_distance() {
    assert_eq!(depth_scale(0.0), 1.0);
    assert!(depth_scale(600.0) < 0.51 && depth_scale(600.0) > 0.49);
    assert!(depth_scale(-300.0) > 1.0);
    assert_eq!(depth_scale(-FOCAL), 0.0);
    assert_eq!(depth_scale(f64::NAN), 0.0);
}

#[test]
fn back_face_is_darker() {
    let c = Color::rgb(1.0, 1.0, 1.0);
    assert_eq!(face_shade(c, 0.2), c);
    let back = face_shade(c, std::f64::consts::PI);
    assert!(back.r < 0.6);
    assert_eq!(back.a, 1.0);
}
