use super::*;

#[test]
fn levels_normalize_byte_scale() {
    let a = AudioData {
        bass: 255.0,
        mid: 127.5,
        treble: 0.0,
        ..AudioData::default()
    };
    assert_eq!(a.bass_level(), 1.0);
    assert!((a.mid_level() - 0.5).abs() < 1e-9);
    assert_eq!(a.treble_level(), 0.0);
}

#[test]
fn non_finite_fields_read_as_silence() {
    let a = AudioData {
        bass: f64::NAN,
        energy: f64::INFINITY,
        beat: true,
        beat_intensity: f64::NAN,
        ..AudioData::default()
    };
    assert_eq!(a.bass_level(), 0.0);
    assert_eq!(a.energy_level(), 0.0);
    assert_eq!(a.beat_strength(), 0.0);
}

#[test]
fn spectrum_sampling_is_bounded() {
    let a = AudioData {
        spectrum: vec![0, 255],
        ..AudioData::default()
    };
    assert_eq!(a.sample(0.0), 0.0);
    assert_eq!(a.sample(1.0), 1.0);
    assert_eq!(a.sample(7.0), 1.0);
    assert_eq!(a.bin(5), 0.0);
    assert_eq!(AudioData::silent().sample(0.5), 0.0);
}

#[test]
fn missing_json_fields_default() {
    let a: AudioData = serde_json::from_str(r#"{"bass": 40, "beatIntensity": 0.5}"#).unwrap();
    assert_eq!(a.bass, 40.0);
    assert_eq!(a.beat_intensity, 0.5);
    assert!(a.spectrum.is_empty());
}
