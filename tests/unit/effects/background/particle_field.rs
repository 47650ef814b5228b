use super::*;
use crate::effects::fixture::{Fixture, canvas};
use crate::params::ParamValue;

#[test]
fn fills_to_target_count() {
    let input = Fixture::new("");
    let mut fx = ParticleField::new(&EngineConfig::default());
    fx.init();
    fx.set_parameter("count", ParamValue::Number(40.0)).unwrap();
    let mut c = canvas();
    fx.render(&mut c, &input.frame(0.0, 0.0));
    assert_eq!(fx.particles().len(), 40);

    for k in 1..120 {
        fx.render(&mut c, &input.frame(k as f64 / 60.0, 1.0 / 60.0));
    }
    assert_eq!(fx.particles().len(), 40);
    for p in fx.particles() {
        assert!((0.0..800.0).contains(&p.pos.x));
        assert!((0.0..400.0).contains(&p.pos.y));
    }
    assert_eq!(c.depth(), 0);
}

#[test]
fn beat_onset_bursts_once_then_fades() {
    let mut input = Fixture::new("");
    let mut fx = ParticleField::new(&EngineConfig::default());
    fx.init();
    fx.set_parameter("count", ParamValue::Number(10.0)).unwrap();
    fx.set_parameter("burstSize", ParamValue::Number(25.0))
        .unwrap();
    let mut c = canvas();
    fx.render(&mut c, &input.frame(0.0, 0.0));

    input.audio.beat = true;
    input.audio.beat_intensity = 1.0;
    fx.render(&mut c, &input.frame(0.1, 0.0));
    assert_eq!(fx.particles().len(), 35);
    fx.render(&mut c, &input.frame(0.12, 0.0));
    assert_eq!(fx.particles().len(), 35);

    input.audio.beat = false;
    for k in 0..240 {
        fx.render(&mut c, &input.frame(0.2 + k as f64 / 60.0, 1.0 / 60.0));
    }
    assert_eq!(fx.particles().len(), 10);
}

#[test]
fn reset_replays_the_same_field() {
    let input = Fixture::new("");
    let mut fx = ParticleField::new(&EngineConfig::default());
    fx.init();
    let mut c = canvas();
    fx.render(&mut c, &input.frame(0.0, 0.0));
    let first: Vec<_> = fx.particles().iter().map(|p| p.pos).collect();
    fx.render(&mut c, &input.frame(0.5, 0.5));
    fx.reset();
    fx.render(&mut c, &input.frame(0.0, 0.0));
    let again: Vec<_> = fx.particles().iter().map(|p| p.pos).collect();
    assert_eq!(first, again);
}
