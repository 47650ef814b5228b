use super::*;
use crate::effects::fixture::{Fixture, canvas};
use crate::params::ParamValue;

const DT: f64 = 1.0 / 60.0;

fn explode() -> Explode {
    let mut fx = Explode::new(&EngineConfig::default());
    fx.init();
    fx.set_parameter("triggerPoint", ParamValue::Number(0.7))
        .unwrap();
    fx
}

#[test]
fn shakes_without_fragments_before_the_trigger() {
    let input = Fixture::new("BOOM");
    let mut fx = explode();
    let mut c = canvas();
    for k in 0..10 {
        fx.render_lyric(&mut c, &input.at_progress(0.1 + k as f64 * 0.05, DT));
        assert!(fx.fragments("line-1").is_empty());
        assert_eq!(fx.trigger_count("line-1"), 0);
    }
    let texts: Vec<_> = c.list().texts().map(|(t, _)| t.to_owned()).collect();
    assert_eq!(texts.len(), 40);
    assert_eq!(c.depth(), 0);
}

#[test]
fn fragments_spawn_once_then_fall_and_fade() {
    let input = Fixture::new("BOOM");
    let mut fx = explode();
    let mut c = canvas();

    fx.render_lyric(&mut c, &input.at_progress(0.7, DT));
    assert_eq!(fx.trigger_count("line-1"), 1);
    let first = fx.fragments("line-1").to_vec();
    assert_eq!(first.len(), 4);

    let mut prev = first;
    for k in 1..30 {
        fx.render_lyric(&mut c, &input.at_progress(0.7 + k as f64 * 0.005, DT));
        assert_eq!(fx.trigger_count("line-1"), 1);
        let now = fx.fragments("line-1").to_vec();
        for (a, b) in prev.iter().zip(&now) {
            assert!(b.opacity <= a.opacity);
            assert!(b.vel.y > a.vel.y * (1.0 - FRAGMENT_DRAG * DT) - 1e-9);
        }
        prev = now;
    }
    assert!(prev.iter().all(|f| f.opacity < 1.0));
}

#[test]
fn reset_allows_a_fresh_detonation_with_the_same_fragments() {
    let input = Fixture::new("BOOM");
    let mut fx = explode();
    let mut c = canvas();
    fx.render_lyric(&mut c, &input.at_progress(0.8, DT));
    let a = fx.fragments("line-1").to_vec();
    fx.reset();
    assert_eq!(fx.trigger_count("line-1"), 0);
    fx.render_lyric(&mut c, &input.at_progress(0.8, DT));
    assert_eq!(fx.fragments("line-1"), a.as_slice());
}
