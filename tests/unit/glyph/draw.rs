use super::*;
use crate::canvas::display_list::{DrawShape, RecordingCanvas};

fn glyph(ch: char) -> GlyphPos {
    GlyphPos {
        ch,
        index: 0,
        x: 100.0,
        y: 50.0,
        width: 20.0,
    }
}

#[test]
fn draws_centred_on_glyph() {
    let mut c = RecordingCanvas::new(200, 100);
    let font = FontSpec::default();
    draw_character(
        &mut c,
        &glyph('A'),
        &CharStyle::default(),
        &font,
        Color::WHITE,
    );
    let op = &c.list().ops[0];
    assert_eq!(
        op.transform,
        Affine::translate((110.0, 50.0)) * Affine::scale(1.0)
    );
    assert_eq!(op.text(), Some("A"));
    assert_eq!(c.depth(), 0);
}

#[test]
fn zero_opacity_and_blank_glyphs_are_skipped() {
    let mut c = RecordingCanvas::new(200, 100);
    let font = FontSpec::default();
    let hidden = CharStyle::default().with_opacity(0.0);
    draw_character(&mut c, &glyph('A'), &hidden, &font, Color::WHITE);
    draw_character(
        &mut c,
        &glyph(' '),
        &CharStyle::default(),
        &font,
        Color::WHITE,
    );
    assert!(c.list().is_empty());
}

#[test]
fn opacity_and_scale_are_applied() {
    let mut c = RecordingCanvas::new(200, 100);
    c.set_global_alpha(0.5);
    let style = CharStyle::default().with_scale(2.0).with_opacity(0.5);
    draw_character(
        &mut c,
        &glyph('B'),
        &style,
        &FontSpec::default(),
        Color::WHITE,
    );
    let op = &c.list().ops[0];
    assert!((op.alpha - 0.25).abs() < 1e-9);
    assert!((op.scale() - 2.0).abs() < 1e-9);
    assert_eq!(c.global_alpha(), 0.5);
}

#[test]
fn glow_attaches_shadow_only_inside() {
    let mut c = RecordingCanvas::new(200, 100);
    draw_character_with_glow(
        &mut c,
        &glyph('C'),
        &CharStyle::default(),
        &FontSpec::default(),
        Color::WHITE,
        Color::rgb(1.0, 0.0, 0.0),
        8.0,
    );
    assert!(c.list().ops[0].shadow.is_some());
    c.fill_rect(crate::foundation::core::Rect::new(0.0, 0.0, 1.0, 1.0));
    assert!(c.list().ops[1].shadow.is_none());
}

#[test]
fn font_is_selected_inside_the_glyph_state() {
    let mut c = RecordingCanvas::new(200, 100);
    let font = FontSpec {
        size: 72.0,
        ..FontSpec::default()
    };
    draw_character(
        &mut c,
        &glyph('D'),
        &CharStyle::default(),
        &font,
        Color::WHITE,
    );
    let DrawShape::Text { font: drawn, .. } = &c.list().ops[0].shape else {
        panic!("expected a text draw");
    };
    assert_eq!(drawn.size, 72.0);
    assert_eq!(c.depth(), 0);
    let width = c.measure_text("DDDD");
    c.set_font(&font);
    assert!(c.measure_text("DDDD") > width);
}
