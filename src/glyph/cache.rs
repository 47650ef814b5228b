use std::collections::{HashMap, VecDeque};

use super::{GlyphLayout, GlyphPos};
use crate::canvas::Canvas2D;
use crate::model::visual::FontSpec;

/// Measure each character of `text` with the canvas' current metrics and lay the line out
/// centred on `(x, y)`.
///
/// Character positions use prefix widths, so kerning between neighbours is respected.
pub fn layout_glyphs(
    canvas: &mut dyn Canvas2D,
    text: &str,
    font: &FontSpec,
    x: f64,
    y: f64,
) -> GlyphLayout {
    canvas.save();
    canvas.set_font(font);
    let total_width = canvas.measure_text(text);
    let left = x - total_width / 2.0;

    let mut glyphs = Vec::with_capacity(text.chars().count());
    let mut prefix = String::with_capacity(text.len());
    let mut prev = 0.0;
    for (index, ch) in text.chars().enumerate() {
        prefix.push(ch);
        let end = canvas.measure_text(&prefix);
        let mut buf = [0u8; 4];
        let width = canvas.measure_text(ch.encode_utf8(&mut buf));
        glyphs.push(GlyphPos {
            ch,
            index,
            x: left + prev,
            y,
            width,
        });
        prev = end;
    }
    canvas.restore();

    GlyphLayout {
        glyphs,
        total_width,
    }
}

fn cache_key(text: &str, font: &FontSpec, x: f64, y: f64) -> u64 {
    let mut bytes = Vec::with_capacity(text.len() + font.family.len() + 32);
    bytes.extend_from_slice(text.as_bytes());
    bytes.push(0);
    bytes.extend_from_slice(&font.size.to_bits().to_le_bytes());
    bytes.extend_from_slice(font.family.as_bytes());
    bytes.push(0);
    bytes.extend_from_slice(&x.to_bits().to_le_bytes());
    bytes.extend_from_slice(&y.to_bits().to_le_bytes());
    xxhash_rust::xxh3::xxh3_64(&bytes)
}

/// FIFO cache of glyph layouts keyed by text, font size, family and anchor.
#[derive(Clone, Debug)]
pub struct GlyphLayoutCache {
    capacity: usize,
    entries: HashMap<u64, GlyphLayout>,
    order: VecDeque<u64>,
}

impl Default for GlyphLayoutCache {
    fn default() -> Self {
        Self::new(Self::DEFAULT_CAPACITY)
    }
}

impl GlyphLayoutCache {
    /// Capacity used when none is configured.
    pub const DEFAULT_CAPACITY: usize = 64;

    /// Empty cache holding at most `capacity` layouts (at least one).
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity: capacity.max(1),
            entries: HashMap::new(),
            order: VecDeque::new(),
        }
    }

    /// Cached layout for the given inputs, measuring on a miss.
    pub fn get_or_layout(
        &mut self,
        canvas: &mut dyn Canvas2D,
        text: &str,
        font: &FontSpec,
        x: f64,
        y: f64,
    ) -> &GlyphLayout {
        let key = cache_key(text, font, x, y);
        if !self.entries.contains_key(&key) {
            while self.order.len() >= self.capacity {
                if let Some(old) = self.order.pop_front() {
                    self.entries.remove(&old);
                }
            }
            let layout = layout_glyphs(canvas, text, font, x, y);
            self.entries.insert(key, layout);
            self.order.push_back(key);
        }
        &self.entries[&key]
    }

    /// Number of cached layouts.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the cache is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Maximum number of cached layouts.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Drop every cached layout.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.order.clear();
    }
}

#[cfg(test)]
#[path = "../../tests/unit/glyph/cache.rs"]
mod tests;
