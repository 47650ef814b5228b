use super::*;
use crate::effects::fixture::{Fixture, canvas};
use crate::params::ParamValue;

const DT: f64 = 1.0 / 60.0;

fn dissolve() -> WindDissolve {
    let mut fx = WindDissolve::new(&EngineConfig::default());
    fx.init();
    fx.set_parameter("dissolveStart", ParamValue::Number(0.5))
        .unwrap();
    fx
}

#[test]
fn full_opacity_and_no_particles_before_start() {
    let input = Fixture::new("blow away");
    let mut fx = dissolve();
    let mut c = canvas();
    for k in 0..=10 {
        let progress = k as f64 * 0.05;
        fx.render_lyric(&mut c, &input.at_progress(progress, DT));
        assert_eq!(fx.text_opacity(progress), 1.0);
        assert!(fx.particles("line-1").is_empty());
    }
    assert!(c.list().texts().all(|(_, op)| op.opacity() >= 0.99));
}

#[test]
fn opacity_strictly_decreases_after_start() {
    let fx = dissolve();
    let mut prev = fx.text_opacity(0.5);
    for k in 1..=10 {
        let o = fx.text_opacity(0.5 + k as f64 * 0.05);
        assert!(o < prev);
        prev = o;
    }
    assert_eq!(fx.text_opacity(1.0), 0.0);
}

#[test]
fn particle_life_stays_in_unit_range() {
    let input = Fixture::new("blow away");
    let mut fx = dissolve();
    let mut c = canvas();
    let mut seen = 0;
    for k in 0..120 {
        fx.render_lyric(&mut c, &input.at_progress(0.5 + k as f64 * 0.004, DT));
        let ps = fx.particles("line-1");
        seen = seen.max(ps.len());
        assert!(ps.iter().all(|p| (0.0..=1.0).contains(&p.life)));
    }
    assert!(seen > 0);
    assert_eq!(c.depth(), 0);
}
