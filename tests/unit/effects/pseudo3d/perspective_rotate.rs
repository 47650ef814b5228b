use super::*;

#[test]
fn unturned_line_is_unchanged() {
    assert_eq!(PerspectiveRotate::project(120.0, 0.0), (120.0, 1.0));
}

#[test]
fn turned_line_foreshortens_and_recedes_on_one_side() {
    let yaw = 0.6;
    let (right, sr) = PerspectiveRotate::project(100.0, yaw);
    let (left, sl) = PerspectiveRotate::project(-100.0, yaw);
    assert!(sr < 1.0 && sl > 1.0);
    assert!(right < 100.0);
    assert!(left < -100.0 * yaw.cos());
}
