use super::*;

#[test]
fn fnv1a64_matches_known_vector() {
    let mut h = Fnv1a64::new(Fnv1a64::OFFSET_BASIS);
    h.write_bytes(b"a");
    assert_eq!(h.finish(), 0xaf63_dc4c_8601_ec8c);
}

#[test]
fn mul_div255_rounds() {
    assert_eq!(mul_div255_u8(255, 255), 255);
    assert_eq!(mul_div255_u8(128, 255), 128);
    assert_eq!(mul_div255_u8(0, 200), 0);
}

#[test]
fn clamp01_maps_nan_to_zero() {
    assert_eq!(clamp01(f64::NAN), 0.0);
    assert_eq!(clamp01(-2.0), 0.0);
    assert_eq!(clamp01(3.0), 1.0);
}

#[test]
fn safe_div_guards_zero_denominator() {
    assert_eq!(safe_div(1.0, 0.0, 7.0), 7.0);
    assert_eq!(safe_div(1.0, 4.0, 7.0), 0.25);
}

#[test]
fn noise_is_bounded_and_deterministic() {
    for i in 0..200 {
        let x = i as f64 * 0.173;
        let n = noise2(3, x, x * 0.5);
        assert!((-1.0..=1.0).contains(&n));
        assert_eq!(n, noise2(3, x, x * 0.5));
    }
    assert_eq!(noise1(3, f64::INFINITY), 0.0);
}

#[test]
fn noise_hits_lattice_values_at_integers() {
    let a = noise1(9, 4.0);
    let b = noise1(9, 4.0 + 1e-9);
    assert!((a - b).abs() < 1e-6);
}

#[test]
fn noise_survives_huge_coordinates() {
    for x in [1.0e19, -1.0e19, f64::MAX, f64::MIN] {
        assert!((-1.0..=1.0).contains(&noise1(0, x)));
        assert!((-1.0..=1.0).contains(&noise2(0, x, x)));
    }
}
