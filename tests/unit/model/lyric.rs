use super::*;

#[test]
fn progress_is_clamped() {
    let l = LyricLine::new("a", "hello", 10.0, 12.0);
    assert_eq!(l.progress_at(9.0), 0.0);
    assert_eq!(l.progress_at(11.0), 0.5);
    assert_eq!(l.progress_at(30.0), 1.0);
}

#[test]
fn zero_duration_line_does_not_divide_by_zero() {
    let l = LyricLine::new("a", "x", 5.0, 5.0);
    assert_eq!(l.duration(), 0.0);
    assert_eq!(l.progress_at(4.0), 0.0);
    assert_eq!(l.progress_at(5.0), 1.0);

    let inverted = LyricLine::new("b", "x", 5.0, 3.0);
    assert_eq!(inverted.duration(), 0.0);
}

#[test]
fn word_lookup_uses_half_open_ranges() {
    let mut l = LyricLine::new("a", "hi there", 0.0, 2.0);
    l.words = vec![
        WordTiming {
            text: "hi".into(),
            start_time: 0.0,
            end_time: 0.5,
        },
        WordTiming {
            text: "there".into(),
            start_time: 0.5,
            end_time: 2.0,
        },
    ];
    assert_eq!(l.word_at(0.25), Some(0));
    assert_eq!(l.word_at(0.5), Some(1));
    assert_eq!(l.word_at(2.0), None);
}

#[test]
fn deserializes_camel_case() {
    let l: LyricLine = serde_json::from_str(
        r#"{"id":"l1","text":"x","startTime":1.0,"endTime":2.0}"#,
    )
    .unwrap();
    assert_eq!(l.start_time, 1.0);
    assert!(l.words.is_empty());
}
