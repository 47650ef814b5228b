use std::cell::RefCell;
use std::collections::HashMap;

use crate::canvas::metrics::{ApproxMetrics, TextMetrics};
use crate::foundation::error::{FxError, FxResult};
use crate::model::visual::FontSpec;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
/// RGBA8 brush color used by Parley text layout.
pub struct TextBrushRgba8 {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
    /// Alpha channel.
    pub a: u8,
}

/// Parley contexts bound to a single registered font.
pub struct TextLayoutEngine {
    font_ctx: parley::FontContext,
    layout_ctx: parley::LayoutContext<TextBrushRgba8>,
    family_name: String,
    font_bytes: Vec<u8>,
}

impl TextLayoutEngine {
    /// Register `font_bytes` (TTF/OTF) and bind layouts to its first family.
    pub fn from_font_bytes(font_bytes: &[u8]) -> FxResult<Self> {
        let mut font_ctx = parley::FontContext::default();
        let families = font_ctx
            .collection
            .register_fonts(parley::fontique::Blob::from(font_bytes.to_vec()), None);
        let family_id = families.first().map(|(id, _)| *id).ok_or_else(|| {
            FxError::validation("no font families registered from font bytes")
        })?;
        let family_name = font_ctx
            .collection
            .family_name(family_id)
            .ok_or_else(|| FxError::validation("registered font family has no name"))?
            .to_string();

        Ok(Self {
            font_ctx,
            layout_ctx: parley::LayoutContext::new(),
            family_name,
            font_bytes: font_bytes.to_vec(),
        })
    }

    /// Family name resolved from the font data.
    pub fn family_name(&self) -> &str {
        &self.family_name
    }

    /// Raw font bytes backing this engine.
    pub fn font_bytes(&self) -> &[u8] {
        &self.font_bytes
    }

    /// Shape `text` on a single unbroken line.
    pub fn layout_line(
        &mut self,
        text: &str,
        size_px: f32,
        brush: TextBrushRgba8,
    ) -> FxResult<parley::Layout<TextBrushRgba8>> {
        if !size_px.is_finite() || size_px <= 0.0 {
            return Err(FxError::validation("text size must be finite and > 0"));
        }

        let mut builder = self
            .layout_ctx
            .ranged_builder(&mut self.font_ctx, text, 1.0, true);
        builder.push_default(parley::style::StyleProperty::FontStack(
            parley::style::FontStack::Source(std::borrow::Cow::Owned(self.family_name.clone())),
        ));
        builder.push_default(parley::style::StyleProperty::FontSize(size_px));
        builder.push_default(parley::style::StyleProperty::Brush(brush));

        let mut layout: parley::Layout<TextBrushRgba8> = builder.build(text);
        layout.break_all_lines(None);
        Ok(layout)
    }
}

/// Sum of glyph advances across every run of `layout`.
pub(crate) fn layout_advance(layout: &parley::Layout<TextBrushRgba8>) -> f64 {
    let mut w = 0.0f64;
    for line in layout.lines() {
        for item in line.items() {
            if let parley::layout::PositionedLayoutItem::GlyphRun(run) = item {
                w += run
                    .positioned_glyphs()
                    .map(|g| f64::from(g.advance))
                    .sum::<f64>();
            }
        }
    }
    w
}

const ADVANCE_CACHE_CAP: usize = 512;

/// [`TextMetrics`] backed by real shaping.
///
/// Falls back to [`ApproxMetrics`] when shaping fails so measurement never errors.
pub struct ParleyMetrics {
    engine: RefCell<TextLayoutEngine>,
    cache: RefCell<HashMap<(String, u64), f64>>,
    fallback: ApproxMetrics,
}

impl ParleyMetrics {
    /// Metrics for a single font.
    pub fn from_font_bytes(font_bytes: &[u8]) -> FxResult<Self> {
        Ok(Self {
            engine: RefCell::new(TextLayoutEngine::from_font_bytes(font_bytes)?),
            cache: RefCell::new(HashMap::new()),
            fallback: ApproxMetrics::default(),
        })
    }
}

impl TextMetrics for ParleyMetrics {
    fn advance(&self, text: &str, font: &FontSpec) -> f64 {
        if text.is_empty() {
            return 0.0;
        }
        let size = font.safe_size();
        let key = (text.to_owned(), size.to_bits());
        if let Some(w) = self.cache.borrow().get(&key) {
            return *w;
        }
        let w = match self
            .engine
            .borrow_mut()
            .layout_line(text, size as f32, TextBrushRgba8::default())
        {
            Ok(layout) => layout_advance(&layout),
            Err(_) => self.fallback.advance(text, font),
        };
        let mut cache = self.cache.borrow_mut();
        if cache.len() >= ADVANCE_CACHE_CAP {
            cache.clear();
        }
        cache.insert(key, w);
        w
    }
}
