//! Per-character glyph positions and drawing primitives shared by text effects.

pub(crate) mod cache;
pub(crate) mod draw;

pub use cache::{GlyphLayoutCache, layout_glyphs};
pub use draw::{CharStyle, draw_character, draw_character_with_glow};

/// One character's measured placement.
#[derive(Clone, Debug, PartialEq)]
pub struct GlyphPos {
    /// The character.
    pub ch: char,
    /// Index of the character within the line.
    pub index: usize,
    /// Left edge.
    pub x: f64,
    /// Vertical centre.
    pub y: f64,
    /// Advance width.
    pub width: f64,
}

impl GlyphPos {
    /// Horizontal centre.
    pub fn cx(&self) -> f64 {
        self.x + self.width / 2.0
    }

    /// Whether this glyph draws nothing visible.
    pub fn is_blank(&self) -> bool {
        self.ch.is_whitespace()
    }
}

/// Positions of every character of a line, centred on the anchor.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GlyphLayout {
    /// Glyphs in text order.
    pub glyphs: Vec<GlyphPos>,
    /// Total advance of the line.
    pub total_width: f64,
}

impl GlyphLayout {
    /// Number of glyphs.
    pub fn len(&self) -> usize {
        self.glyphs.len()
    }

    /// Whether the layout has no glyphs.
    pub fn is_empty(&self) -> bool {
        self.glyphs.is_empty()
    }

    /// Left edge of the line.
    pub fn left(&self) -> f64 {
        self.glyphs.first().map_or(0.0, |g| g.x)
    }
}
