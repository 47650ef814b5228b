use super::*;

const ALL: [Ease; 12] = [
    Ease::Linear,
    Ease::InQuad,
    Ease::OutQuad,
    Ease::InOutQuad,
    Ease::InCubic,
    Ease::OutCubic,
    Ease::InOutCubic,
    Ease::InOutSine,
    Ease::OutExpo,
    Ease::OutBack,
    Ease::OutElastic,
    Ease::OutBounce,
];

#[test]
fn endpoints_are_fixed() {
    for e in ALL {
        assert!(e.apply(0.0).abs() < 1e-9, "{e:?} at 0");
        assert!((e.apply(1.0) - 1.0).abs() < 1e-9, "{e:?} at 1");
    }
}

#[test]
fn input_is_clamped() {
    for e in ALL {
        assert_eq!(e.apply(-3.0), e.apply(0.0));
        assert_eq!(e.apply(4.0), e.apply(1.0));
        assert_eq!(e.apply(f64::NAN), e.apply(0.0));
    }
}

#[test]
fn out_back_overshoots() {
    let peak = (1..100)
        .map(|i| Ease::OutBack.apply(i as f64 / 100.0))
        .fold(f64::MIN, f64::max);
    assert!(peak > 1.0);
}

#[test]
fn parses_camel_case_names() {
    let e: Ease = serde_json::from_str("\"outElastic\"").unwrap();
    assert_eq!(e, Ease::OutElastic);
}

#[test]
fn every_option_name_parses_to_its_variant() {
    for (name, e) in Ease::NAMES.iter().zip(ALL) {
        assert_eq!(Ease::from_name(name), e, "{name}");
    }
    assert_eq!(Ease::from_name("nope"), Ease::OutCubic);
}
