use super::*;
use crate::canvas::display_list::DrawShape;
use crate::effects::fixture::{Fixture, canvas};
use crate::foundation::core::{BezPath, Color};
use crate::params::ParamValue;

#[test]
fn uniform_stations_are_evenly_spaced() {
    let layout = GlyphLayout {
        glyphs: (0..4)
            .map(|i| crate::glyph::GlyphPos {
                ch: 'x',
                index: i,
                x: i as f64 * 10.0,
                y: 0.0,
                width: 10.0,
            })
            .collect(),
        total_width: 40.0,
    };
    let s = TextPath::stations(&layout, 400.0, true, 0.0, false);
    assert_eq!(s, vec![50.0, 150.0, 250.0, 350.0]);

    let natural = TextPath::stations(&layout, 400.0, false, 0.0, false);
    assert_eq!(natural, vec![185.0, 195.0, 205.0, 215.0]);

    let wrapped = TextPath::stations(&layout, 400.0, true, 100.0, true);
    assert_eq!(wrapped, vec![150.0, 250.0, 350.0, 50.0]);
}

#[test]
fn glyphs_sit_on_the_path() {
    let input = Fixture::new("ALONG");
    let mut fx = TextPath::new(&EngineConfig::default());
    fx.init();
    fx.set_parameter("pathType", ParamValue::Text("line".to_owned()))
        .unwrap();
    fx.set_parameter("revealEnd", ParamValue::Number(0.0))
        .unwrap();
    let mut c = canvas();
    fx.render_lyric(&mut c, &input.at_progress(0.5, 0.0));

    let ys: Vec<f64> = c
        .list()
        .texts()
        .map(|(_, op)| op.transform.translation().y)
        .collect();
    assert_eq!(ys.len(), 5);
    assert!(ys.iter().all(|y| (y - 200.0).abs() < 1e-6));
    assert_eq!(c.depth(), 0);
}

#[test]
fn reveal_fades_characters_in_order() {
    let input = Fixture::new("ALONG");
    let mut fx = TextPath::new(&EngineConfig::default());
    fx.init();
    let mut c = canvas();
    fx.render_lyric(&mut c, &input.at_progress(0.15, 0.0));
    let ops: Vec<f64> = c.list().texts().map(|(_, op)| op.opacity()).collect();
    assert!(!ops.is_empty());
    assert!(ops.windows(2).all(|w| w[0] >= w[1]));
}

#[test]
fn path_stroke_does_not_leak_into_later_draws() {
    let input = Fixture::new("ALONG");
    let mut fx = TextPath::new(&EngineConfig::default());
    fx.init();
    fx.set_parameter("showPath", ParamValue::Bool(true))
        .unwrap();
    let mut c = canvas();
    fx.render_lyric(&mut c, &input.at_progress(0.5, 0.0));
    let strokes = c.list().ops.len();
    assert!(strokes > 0);

    let mut segment = BezPath::new();
    segment.move_to((0.0, 0.0));
    segment.line_to((10.0, 0.0));
    c.stroke_path(&segment);
    let last = &c.list().ops[strokes];
    assert_eq!(last.color, Color::BLACK);
    let DrawShape::Stroke { width, .. } = last.shape else {
        panic!("expected a stroke");
    };
    assert_eq!(width, 1.0);
    assert_eq!(c.depth(), 0);
}
