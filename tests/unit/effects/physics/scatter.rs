use super::*;
use crate::effects::fixture::{Fixture, canvas};
use crate::params::ParamValue;

const DT: f64 = 1.0 / 60.0;

#[test]
fn springs_pull_characters_home() {
    let input = Fixture::new("HELLO");
    let mut fx = Scatter::new(&EngineConfig::default());
    fx.init();
    let mut c = canvas();
    fx.render_lyric(&mut c, &input.at_time(0.0, DT));
    let start: f64 = fx.bodies("line-1").iter().map(|b| b.offset.hypot()).sum();
    for k in 1..120 {
        fx.render_lyric(&mut c, &input.at_time(k as f64 * DT, DT));
    }
    let end: f64 = fx.bodies("line-1").iter().map(|b| b.offset.hypot()).sum();
    assert!(end < start * 0.2, "{end} vs {start}");
    assert_eq!(c.depth(), 0);
}

#[test]
fn exit_flings_characters_outward() {
    let input = Fixture::new("HELLO");
    let mut fx = Scatter::new(&EngineConfig::default());
    fx.init();
    let mut c = canvas();
    for k in 0..180 {
        fx.render_lyric(&mut c, &input.at_time(k as f64 * DT, DT));
    }
    let before: f64 = fx.bodies("line-1").iter().map(|b| b.offset.hypot()).sum();
    for k in 0..20 {
        fx.render_lyric(&mut c, &input.at_time(3.5 + k as f64 * DT, DT));
    }
    let after: f64 = fx.bodies("line-1").iter().map(|b| b.offset.hypot()).sum();
    assert!(after > before + 50.0);
}

#[test]
fn stiff_springs_settle_at_low_frame_rates() {
    let input = Fixture::new("HELLO");
    let mut fx = Scatter::new(&EngineConfig::default());
    fx.init();
    fx.set_parameter("stiffness", ParamValue::Number(400.0))
        .unwrap();
    fx.set_parameter("damping", ParamValue::Number(40.0))
        .unwrap();
    let mut c = canvas();
    fx.render_lyric(&mut c, &input.at_time(0.0, 0.1));
    let start: f64 = fx.bodies("line-1").iter().map(|b| b.offset.hypot()).sum();
    for k in 1..20 {
        fx.render_lyric(&mut c, &input.at_time(k as f64 * 0.1, 0.1));
    }
    let end: f64 = fx.bodies("line-1").iter().map(|b| b.offset.hypot()).sum();
    assert!(end.is_finite());
    assert!(end < start * 0.1, "{end} vs {start}");
}
