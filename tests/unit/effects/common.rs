use super::*;

#[test]
fn timeline_total_and_windows() {
    let t = StaggerTimeline::new(0.05, 0.5, 2);
    assert!((t.total() - 0.6).abs() < 1e-12);
    assert_eq!(t.local(0, 0.0), 0.0);
    assert_eq!(t.local(1, 0.0), 0.0);
    assert_eq!(t.local(0, 0.5 / 0.6), 1.0);
    assert_eq!(t.local(1, 1.0), 1.0);
    let mid = t.local(1, 0.5);
    assert!(mid > 0.0 && mid < 1.0);
}

#[test]
fn zero_duration_timeline_snaps() {
    let t = StaggerTimeline::new(0.1, 0.0, 3);
    assert_eq!(t.local(2, 0.0), 0.0);
    assert_eq!(t.local(0, 0.0), 1.0);
    assert_eq!(t.local(2, 1.0), 1.0);
}

#[test]
fn negative_or_nan_timings_are_sanitized() {
    let t = StaggerTimeline::new(f64::NAN, -1.0, 4);
    assert_eq!(t.total(), 0.0);
    assert_eq!(t.local(3, 0.5), 1.0);
}

#[test]
fn char_noise_is_stable_and_in_range() {
    let a = char_noise(1, 3, 7);
    assert_eq!(a, char_noise(1, 3, 7));
    assert!((0.0..1.0).contains(&a));
    assert_ne!(a, char_noise(1, 4, 7));
}

#[test]
fn layout_leaves_the_canvas_font_alone() {
    let mut input = crate::effects::fixture::Fixture::new("Hello");
    input.settings.font = input.settings.font.with_size(96.0);
    let mut c = crate::effects::fixture::canvas();
    let before = c.measure_text("Hello");
    let layout = CharacterLayer::new(4).layout(&mut c, &input.at_progress(0.5, 1.0 / 60.0));
    assert_eq!(layout.len(), 5);
    assert_eq!(c.measure_text("Hello"), before);
    assert_eq!(c.depth(), 0);
}
