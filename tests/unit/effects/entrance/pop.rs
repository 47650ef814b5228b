use super::*;
use crate::params::ParamValue;

fn hi_params() -> PopParams {
    let mut fx = Pop::new(&EngineConfig::default());
    fx.init();
    fx.set_parameter("popScale", ParamValue::Number(1.5))
        .unwrap();
    fx.set_parameter("staggerDelay", ParamValue::Number(0.05))
        .unwrap();
    fx.set_parameter("duration", ParamValue::Number(0.5))
        .unwrap();
    fx.params_typed()
}

#[test]
fn both_characters_start_invisible() {
    let p = hi_params();
    assert_eq!(p.char_style(0, 2, 0.0).opacity, 0.0);
    assert_eq!(p.char_style(1, 2, 0.0).opacity, 0.0);
}

#[test]
fn characters_settle_once_their_window_completes() {
    let p = hi_params();
    // Window of character 1 ends at (0.05 + 0.5) / 0.6 of the line.
    let done = 0.55 / 0.6;
    let c1 = p.char_style(1, 2, done);
    assert!((c1.scale_x - 1.0).abs() < 1e-9);
    assert!((c1.opacity - 1.0).abs() < 1e-9);

    let c0 = p.char_style(0, 2, done);
    assert!((c0.scale_x - 1.0).abs() < 1e-9);
    assert!((c0.opacity - 1.0).abs() < 1e-9);
}

#[test]
fn first_character_settles_before_the_second() {
    let p = hi_params();
    let at = 0.5 / 0.6;
    assert!((p.char_style(0, 2, at).scale_x - 1.0).abs() < 1e-9);
    assert!(p.char_style(1, 2, at).scale_x > 1.0);
}

#[test]
fn overshoot_reaches_pop_scale() {
    let p = hi_params();
    // Local progress 0.6 for character 0: global = 0.3, progress = 0.3 / 0.6.
    let s = p.char_style(0, 2, 0.5).scale_x;
    assert!((s - 1.5).abs() < 1e-9);
}
