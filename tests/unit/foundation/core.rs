use super::*;
use serde_json::json;

#[test]
fn parses_hex_rgb_and_rgba() {
    let c: Color = serde_json::from_value(json!("#ff0000")).unwrap();
    assert_eq!(c, Color::rgba(1.0, 0.0, 0.0, 1.0));

    let c: Color = serde_json::from_value(json!("#0000ff80")).unwrap();
    assert!((c.b - 1.0).abs() < 1e-9);
    assert!((c.a - (128.0 / 255.0)).abs() < 1e-9);
}

#[test]
fn rejects_malformed_hex() {
    assert!(Color::from_hex("#12345").is_err());
    assert!(Color::from_hex("#gg0000").is_err());
}

#[test]
fn parses_rgba_object_and_array() {
    let c: Color = serde_json::from_value(json!({"r": 0.25, "g": 0.5, "b": 0.75})).unwrap();
    assert_eq!(c, Color::rgba(0.25, 0.5, 0.75, 1.0));

    let c: Color = serde_json::from_value(json!([0.25, 0.5, 0.75, 0.9])).unwrap();
    assert_eq!(c, Color::rgba(0.25, 0.5, 0.75, 0.9));
}

#[test]
fn hsl_roundtrips_primary_hues() {
    let red = Color::from_hsl(0.0, 1.0, 0.5);
    assert!((red.r - 1.0).abs() < 1e-9);
    assert!(red.g.abs() < 1e-9);

    let (h, s, l) = Color::rgb(0.0, 1.0, 0.0).to_hsl();
    assert!((h - 120.0).abs() < 1e-9);
    assert!((s - 1.0).abs() < 1e-9);
    assert!((l - 0.5).abs() < 1e-9);
}

#[test]
fn hue_wraps_negative_and_non_finite() {
    let a = Color::from_hsl(-120.0, 1.0, 0.5);
    let b = Color::from_hsl(240.0, 1.0, 0.5);
    assert_eq!(a.to_rgba8(), b.to_rgba8());
    let fallback = Color::from_hsl(f64::NAN, 1.0, 0.5);
    assert_eq!(fallback.to_rgba8(), [255, 0, 0, 255]);
}

#[test]
fn premul_scales_channels_by_alpha() {
    let c = Color::rgba(1.0, 0.5, 0.0, 0.5);
    assert_eq!(c.to_rgba8_premul(), [128, 64, 0, 128]);
    assert_eq!(c.to_hex(), "#ff800080");
}
