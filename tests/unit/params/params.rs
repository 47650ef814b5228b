use super::*;

const DEFS: &[ParamDef] = &[
    ParamDef::slider("speed", "Speed", 1.0, 0.0, 5.0, 0.1, "x"),
    ParamDef::choice("mode", "Mode", "trail", &["trail", "echo"]),
    ParamDef::toggle("glow", "Glow", true),
];

#[test]
fn default_values_has_one_entry_per_def() {
    let m = default_values(DEFS);
    assert_eq!(m.len(), DEFS.len());
    assert_eq!(m["speed"], ParamValue::Number(1.0));
    assert_eq!(m["mode"], ParamValue::Text("trail".into()));
    assert_eq!(m["glow"], ParamValue::Bool(true));
}

#[test]
fn reads_fall_back_to_defaults_before_seeding() {
    let s = ParamSet::new(DEFS);
    assert_eq!(s.number("speed"), 1.0);
    assert_eq!(s.choice("mode"), "trail");
    assert!(s.flag("glow"));
    assert_eq!(s.number("missing"), 0.0);
    assert_eq!(s.choice("missing"), "");
    assert!(!s.flag("missing"));
}

#[test]
fn slider_writes_are_clamped() {
    let mut s = ParamSet::with_defaults(DEFS);
    s.set("speed", ParamValue::Number(99.0)).unwrap();
    assert_eq!(s.number("speed"), 5.0);
    assert!(s.set("speed", ParamValue::Number(f64::NAN)).is_err());
    assert_eq!(s.number("speed"), 5.0);
}

#[test]
fn invalid_writes_are_rejected_and_leave_value_untouched() {
    let mut s = ParamSet::with_defaults(DEFS);
    assert!(s.set("mode", "smear".into()).is_err());
    assert!(s.set("mode", ParamValue::Number(1.0)).is_err());
    assert!(s.set("nope", ParamValue::Bool(true)).is_err());
    assert_eq!(s.choice("mode"), "trail");

    s.set("mode", "echo".into()).unwrap();
    assert_eq!(s.choice("mode"), "echo");
}

#[test]
fn apply_reports_each_rejection() {
    let mut s = ParamSet::with_defaults(DEFS);
    let mut overrides = ParamMap::new();
    overrides.insert("speed".into(), ParamValue::Number(2.0));
    overrides.insert("glow".into(), ParamValue::Text("yes".into()));
    overrides.insert("bogus".into(), ParamValue::Number(1.0));
    let errs = s.apply(&overrides);
    assert_eq!(errs.len(), 2);
    assert_eq!(s.number("speed"), 2.0);
    assert!(s.flag("glow"));
}

#[test]
fn wire_values_are_untagged() {
    let m: ParamMap = serde_json::from_str(r#"{"a": 1.5, "b": "x", "c": false}"#).unwrap();
    assert_eq!(m["a"], ParamValue::Number(1.5));
    assert_eq!(m["b"], ParamValue::Text("x".into()));
    assert_eq!(m["c"], ParamValue::Bool(false));
}

#[test]
fn to_map_fills_unset_ids() {
    let s = ParamSet::new(DEFS);
    assert_eq!(s.to_map(), default_values(DEFS));
}
