use super::*;

#[test]
fn line_has_expected_length_and_endpoints() {
    let p = BezierPath::preset(PathPreset::Line, Point::new(50.0, 10.0), 100.0, 0.0);
    assert!((p.length() - 100.0).abs() < 0.1);
    let start = p.sample(0.0).unwrap();
    let end = p.sample(1.0).unwrap();
    assert!((start.point.x - 0.0).abs() < 1e-6);
    assert!((end.point.x - 100.0).abs() < 1e-6);
    assert!(start.angle.abs() < 1e-9);
}

#[test]
fn uniform_samples_are_evenly_spaced() {
    let p = BezierPath::preset(PathPreset::Wave, Point::new(0.0, 0.0), 400.0, 60.0);
    let samples = p.sample_uniform(9);
    assert_eq!(samples.len(), 9);
    let step = p.length() / 8.0;
    for w in samples.windows(2) {
        let chord = (w[1].point - w[0].point).hypot();
        assert!(chord <= step + 0.5);
        assert!(chord >= step * 0.8);
    }
}

#[test]
fn circle_length_matches_circumference() {
    let p = BezierPath::preset(PathPreset::Circle, Point::new(0.0, 0.0), 200.0, 0.0);
    let expected = std::f64::consts::PI * 200.0;
    assert!((p.length() - expected).abs() / expected < 0.01);
}

#[test]
fn degenerate_paths_sample_nothing() {
    let p = BezierPath::preset(PathPreset::Line, Point::ORIGIN, 0.0, 0.0);
    assert!(p.is_empty());
    assert!(p.sample(0.5).is_none());
    assert!(p.sample_uniform(3).is_empty());
    assert!(BezierPath::default().sample(0.0).is_none());
}

#[test]
fn out_of_range_parameters_clamp() {
    let p = BezierPath::preset(PathPreset::Arc, Point::ORIGIN, 100.0, 0.0);
    let a = p.sample(-1.0).unwrap();
    let b = p.sample(2.0).unwrap();
    assert!((a.point.x + 50.0).abs() < 1e-6);
    assert!((b.point.x - 50.0).abs() < 1e-6);
    assert!(p.sample(f64::NAN).is_some());
}
