use super::*;

#[test]
fn ring_slots_are_spread_evenly() {
    let a = OrbitAnimator::ring(0, 4, 0.0, 100.0, 0.0);
    let b = OrbitAnimator::ring(2, 4, 0.0, 100.0, 0.0);
    assert!((a - DVec3::new(100.0, 0.0, 0.0)).length() < 1e-9);
    assert!((b - DVec3::new(-100.0, 0.0, 0.0)).length() < 1e-9);
}

#[test]
fn tilt_lifts_the_far_side() {
    let far = OrbitAnimator::ring(1, 4, 0.0, 100.0, 0.5);
    assert!(far.y < 0.0);
    assert!((far.length() - 100.0).abs() < 1e-9);
}
