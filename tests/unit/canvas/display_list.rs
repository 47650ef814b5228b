use super::*;
use crate::canvas::with_saved;
use crate::foundation::core::Point;
use kurbo::Shape as _;

#[test]
fn records_resolved_state() {
    let mut c = RecordingCanvas::new(100, 50);
    c.translate(10.0, 5.0);
    c.set_global_alpha(0.5);
    c.set_fill(Color::rgb(1.0, 0.0, 0.0));
    c.fill_rect(Rect::new(0.0, 0.0, 4.0, 4.0));

    let op = &c.list().ops[0];
    assert_eq!(op.transform, Affine::translate((10.0, 5.0)));
    assert_eq!(op.alpha, 0.5);
    assert_eq!(op.color, Color::rgb(1.0, 0.0, 0.0));
}

#[test]
fn restore_on_empty_stack_is_noop() {
    let mut c = RecordingCanvas::new(10, 10);
    c.restore();
    assert_eq!(c.depth(), 0);
    c.save();
    c.set_global_alpha(0.2);
    c.restore();
    assert_eq!(c.global_alpha(), 1.0);
}

#[test]
fn with_saved_keeps_depth_balanced() {
    let mut c = RecordingCanvas::new(10, 10);
    with_saved(&mut c, |c| {
        c.rotate(1.0);
        c.save();
    });
    assert_eq!(c.depth(), 1);
    c.restore();
    assert_eq!(c.current_transform(), Affine::IDENTITY);
}

#[test]
fn centered_text_is_shifted_by_half_width() {
    let mut c = RecordingCanvas::new(200, 100);
    c.set_text_align(TextAlign::Center);
    c.fill_text("abc", 100.0, 50.0);
    let w = c.measure_text("abc");
    match &c.list().ops[0].shape {
        DrawShape::Text { x, width, .. } => {
            assert!((x - (100.0 - w / 2.0)).abs() < 1e-9);
            assert_eq!(*width, w);
        }
        other => panic!("unexpected shape {other:?}"),
    }
}

#[test]
fn invisible_draws_are_dropped() {
    let mut c = RecordingCanvas::new(10, 10);
    c.set_global_alpha(0.0);
    c.fill_text("a", 0.0, 0.0);
    c.set_global_alpha(1.0);
    c.fill_text("", 0.0, 0.0);
    c.fill_text("a", f64::NAN, 0.0);
    assert!(c.list().is_empty());
}

#[test]
fn nested_clips_accumulate_in_device_space() {
    let mut c = RecordingCanvas::new(100, 100);
    c.translate(10.0, 0.0);
    c.clip(&Rect::new(0.0, 0.0, 50.0, 50.0).to_path(0.1));
    c.clip(&Rect::new(0.0, 0.0, 20.0, 20.0).to_path(0.1));
    c.fill_rect(Rect::new(0.0, 0.0, 5.0, 5.0));

    let op = &c.list().ops[0];
    let region = &c.list().clips[op.clip.unwrap_or(usize::MAX)];
    assert_eq!(region.len(), 2);
    let first = region[0].elements()[0];
    assert_eq!(first, kurbo::PathEl::MoveTo(Point::new(10.0, 0.0)));
}

#[test]
fn clip_does_not_outlive_restore() {
    let mut c = RecordingCanvas::new(100, 100);
    c.save();
    c.clip(&Rect::new(0.0, 0.0, 5.0, 5.0).to_path(0.1));
    c.restore();
    c.fill_rect(Rect::new(0.0, 0.0, 5.0, 5.0));
    assert_eq!(c.list().ops[0].clip, None);
}

#[test]
fn soft_mask_is_stored_in_device_space() {
    let mut c = RecordingCanvas::new(100, 100);
    c.translate(5.0, 5.0);
    c.set_soft_mask(SoftMask::Radial {
        center: Point::ORIGIN,
        inner: 1.0,
        outer: 2.0,
    });
    c.fill_rect(Rect::new(0.0, 0.0, 1.0, 1.0));
    let idx = c.list().ops[0].mask.unwrap_or(usize::MAX);
    assert_eq!(
        c.list().masks[idx].coverage(Point::new(5.0, 5.0)),
        1.0
    );
}

#[test]
fn clear_resets_state_and_ops() {
    let mut c = RecordingCanvas::new(10, 10);
    c.save();
    c.fill_rect(Rect::new(0.0, 0.0, 1.0, 1.0));
    let list = c.take_list();
    assert_eq!(list.ops.len(), 1);
    assert!(c.list().is_empty());
    assert_eq!(c.depth(), 0);
    assert_eq!(c.list().width, 10);
}
