use crate::model::visual::FontSpec;

/// Text advance measurement, the only font service effects depend on.
pub trait TextMetrics {
    /// Advance width of `text` set in `font`.
    fn advance(&self, text: &str, font: &FontSpec) -> f64;
}

/// Deterministic font-free metrics with per-class em widths.
///
/// Used by the recording canvas when no real font is loaded.
#[derive(Clone, Copy, Debug)]
pub struct ApproxMetrics {
    /// Width of an average glyph in ems.
    pub em: f64,
}

impl Default for ApproxMetrics {
    fn default() -> Self {
        Self { em: 0.6 }
    }
}

impl ApproxMetrics {
    fn char_em(&self, c: char) -> f64 {
        match c {
            ' ' => self.em * 0.55,
            'i' | 'l' | 'j' | 'I' | '.' | ',' | '\'' | '!' | '|' | ':' | ';' => self.em * 0.5,
            'm' | 'w' | 'M' | 'W' => self.em * 1.5,
            c if c.is_uppercase() => self.em * 1.15,
            _ => self.em,
        }
    }
}

impl TextMetrics for ApproxMetrics {
    fn advance(&self, text: &str, font: &FontSpec) -> f64 {
        let size = font.safe_size();
        text.chars().map(|c| self.char_em(c) * size).sum()
    }
}
