use super::*;
use crate::params::ParamValue;

fn flicker() -> NeonFlicker {
    let mut fx = NeonFlicker::new(&EngineConfig::default());
    fx.init();
    fx.set_parameter("flickerRate", ParamValue::Number(1.0))
        .unwrap();
    fx.set_parameter("bassStabilize", ParamValue::Number(1.0))
        .unwrap();
    fx
}

#[test]
fn full_bass_keeps_every_tube_lit() {
    let mut fx = flicker();
    for _ in 0..200 {
        fx.step("l", 8, 0.05, 1.0);
    }
    assert!(fx.tubes("l").unwrap().iter().all(|t| t.lit));
}

#[test]
fn silence_lets_tubes_drop_out() {
    let mut fx = flicker();
    let mut saw_dark = false;
    for _ in 0..200 {
        fx.step("l", 8, 0.05, 0.0);
        saw_dark |= fx.tubes("l").unwrap().iter().any(|t| !t.lit);
    }
    assert!(saw_dark);
}

#[test]
fn reset_replays_the_same_sequence() {
    let mut fx = flicker();
    let run = |fx: &mut NeonFlicker| {
        (0..50)
            .map(|_| {
                fx.step("l", 5, 0.05, 0.0);
                fx.tubes("l").unwrap().to_vec()
            })
            .collect::<Vec<_>>()
    };
    let a = run(&mut fx);
    fx.reset();
    assert!(fx.tubes("l").is_none());
    let b = run(&mut fx);
    assert_eq!(a, b);
}
