use super::*;
use crate::effects::fixture::{Fixture, canvas};
use crate::params::ParamValue;

#[test]
fn nothing_is_drawn_before_the_iris_opens() {
    let input = Fixture::new("IRIS");
    let mut fx = CircleMask::new(&EngineConfig::default());
    fx.init();
    let mut c = canvas();
    fx.render_lyric(&mut c, &input.at_progress(0.0, 0.0));
    assert!(c.list().is_empty());
}

#[test]
fn hard_edge_uses_a_clip() {
    let input = Fixture::new("IRIS");
    let mut fx = CircleMask::new(&EngineConfig::default());
    fx.init();
    let mut c = canvas();
    fx.render_lyric(&mut c, &input.at_progress(0.2, 0.0));
    assert_eq!(c.list().clips.len(), 1);
    let clipped = c.list()
        .texts()
        .all(|(_, op)| op.clip == Some(0) && op.mask.is_none());
    assert!(clipped);
    assert_eq!(c.depth(), 0);
}

#[test]
fn feather_switches_to_a_soft_mask() {
    let input = Fixture::new("IRIS");
    let mut fx = CircleMask::new(&EngineConfig::default());
    fx.init();
    fx.set_parameter("feather", ParamValue::Number(20.0))
        .unwrap();
    let mut c = canvas();
    fx.render_lyric(&mut c, &input.at_progress(0.2, 0.0));
    assert!(c.list().clips.is_empty());
    assert_eq!(c.list().masks.len(), 1);
}

#[test]
fn fully_open_circle_covers_the_bounds() {
    let mut fx = CircleMask::new(&EngineConfig::default());
    fx.init();
    let bounds = kurbo::Rect::new(0.0, 0.0, 300.0, 40.0);
    let (c, r) = fx.circle(bounds, 1.0, 0.0);
    assert_eq!(c, Point::new(150.0, 20.0));
    assert!((r - (150.0f64.hypot(20.0))).abs() < 1e-9);
}
