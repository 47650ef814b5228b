use super::*;
use crate::params::ParamValue;

#[test]
fn instance_config_uses_camel_case_and_defaults() {
    let cfg: EffectInstanceConfig =
        serde_json::from_str(r#"{"effectId":"pop","parameters":{"popScale":1.5}}"#).unwrap();
    assert_eq!(cfg.effect_id, "pop");
    assert!(cfg.enabled);
    assert_eq!(cfg.parameters["popScale"], ParamValue::Number(1.5));
    assert_eq!(cfg.resolved_instance_id(3), "pop#3");

    let json = serde_json::to_value(&cfg).unwrap();
    assert!(json.get("instanceId").is_none());
    assert_eq!(json["effectId"], "pop");
}

#[test]
fn explicit_instance_id_wins() {
    let mut cfg = EffectInstanceConfig::new("wave");
    cfg.instance_id = Some("lead-wave".into());
    assert_eq!(cfg.resolved_instance_id(0), "lead-wave");
    cfg.instance_id = Some(String::new());
    assert_eq!(cfg.resolved_instance_id(0), "wave#0");
}

#[test]
fn chain_config_parses_and_validates() {
    let cfg = ChainConfig::from_json(
        r#"{"engine":{"seed":7},"effects":[{"effectId":"wave","enabled":false}]}"#,
    )
    .unwrap();
    assert_eq!(cfg.engine.seed, 7);
    assert_eq!(cfg.engine.glyph_cache_capacity, 64);
    assert!(!cfg.effects[0].enabled);

    let zero_dt = ChainConfig::from_json(r#"{"engine":{"maxDeltaTime":0}}"#);
    assert!(zero_dt.is_err());
    let unknown = ChainConfig::from_json(r#"{"engine":{"bogus":1}}"#);
    assert!(unknown.is_err());
}

#[test]
fn delta_time_is_clamped() {
    let c = EngineConfig::default();
    assert_eq!(c.clamp_delta(5.0), 0.1);
    assert_eq!(c.clamp_delta(-1.0), 0.0);
    assert_eq!(c.clamp_delta(f64::NAN), 0.0);
    assert_eq!(c.clamp_delta(0.016), 0.016);
}
