use super::*;
use crate::effects::fixture::{Fixture, canvas};
use crate::params::ParamValue;

#[test]
fn particles_converge_on_their_targets() {
    let input = Fixture::new("AB");
    let mut fx = ParticleAssemble::new(&EngineConfig::default());
    fx.init();
    fx.set_parameter("particlesPerChar", ParamValue::Number(10.0))
        .unwrap();
    let mut c = canvas();

    fx.render_lyric(&mut c, &input.at_progress(0.0, 0.0));
    assert_eq!(fx.particle_count("line-1"), 20);
    let far = fx.mean_distance("line-1").unwrap();

    fx.render_lyric(&mut c, &input.at_progress(0.6, 0.0));
    let near = fx.mean_distance("line-1").unwrap();
    assert!(far > 100.0);
    assert!(near < 1e-6, "{near}");
    assert_eq!(c.depth(), 0);
}

#[test]
fn text_is_hidden_until_assembled() {
    let input = Fixture::new("AB");
    let mut fx = ParticleAssemble::new(&EngineConfig::default());
    fx.init();
    let mut c = canvas();
    fx.render_lyric(&mut c, &input.at_progress(0.0, 0.0));
    assert_eq!(c.list().texts().count(), 0);

    let mut c = canvas();
    fx.render_lyric(&mut c, &input.at_progress(1.0, 0.0));
    assert_eq!(c.list().texts().count(), 2);
}
