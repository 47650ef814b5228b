use super::*;
use crate::canvas::display_list::RecordingCanvas;

#[test]
fn layout_is_centred_on_anchor() {
    let mut c = RecordingCanvas::new(400, 200);
    let font = FontSpec::default();
    let l = layout_glyphs(&mut c, "HELLO", &font, 200.0, 100.0);
    assert_eq!(l.len(), 5);
    let right = l.glyphs[4].x + l.glyphs[4].width;
    assert!(((l.left() + right) / 2.0 - 200.0).abs() < 1e-6);
    assert!(l.glyphs.windows(2).all(|w| w[0].x < w[1].x));
    assert_eq!(c.depth(), 0);
}

#[test]
fn empty_text_has_no_glyphs() {
    let mut c = RecordingCanvas::new(10, 10);
    let l = layout_glyphs(&mut c, "", &FontSpec::default(), 5.0, 5.0);
    assert!(l.is_empty());
    assert_eq!(l.total_width, 0.0);
}

#[test]
fn unchanged_inputs_hit_the_cache() {
    let mut c = RecordingCanvas::new(400, 200);
    let mut cache = GlyphLayoutCache::default();
    let font = FontSpec::default();
    let a = cache
        .get_or_layout(&mut c, "abc", &font, 10.0, 20.0)
        .clone();
    let b = cache
        .get_or_layout(&mut c, "abc", &font, 10.0, 20.0)
        .clone();
    assert_eq!(a, b);
    assert_eq!(cache.len(), 1);

    cache.get_or_layout(&mut c, "abc", &font.with_size(12.0), 10.0, 20.0);
    assert_eq!(cache.len(), 2);
}

#[test]
fn fifo_eviction_respects_capacity() {
    let mut c = RecordingCanvas::new(400, 200);
    let mut cache = GlyphLayoutCache::new(3);
    let font = FontSpec::default();
    for i in 0..10 {
        cache.get_or_layout(&mut c, &format!("line {i}"), &font, 0.0, 0.0);
        assert!(cache.len() <= 3);
    }
    cache.clear();
    assert!(cache.is_empty());
}

#[test]
fn multibyte_text_is_split_by_char() {
    let mut c = RecordingCanvas::new(400, 200);
    let l = layout_glyphs(&mut c, "héllo wörld", &FontSpec::default(), 0.0, 0.0);
    assert_eq!(l.len(), 11);
    assert_eq!(l.glyphs[1].ch, 'é');
}
