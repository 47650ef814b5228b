use super::LyricEffectContext;
use crate::canvas::Canvas2D;
use crate::foundation::core::Color;
use crate::foundation::math::{clamp01, hash_u32, safe_div};
use crate::glyph::{CharStyle, GlyphLayout, GlyphLayoutCache, GlyphPos};

/// Staggered per-character timeline: character `i` animates over
/// `[i * stagger, i * stagger + duration]` of a `stagger * count + duration` total.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StaggerTimeline {
    /// Delay between consecutive characters.
    pub stagger: f64,
    /// Length of one character's animation.
    pub duration: f64,
    /// Number of characters.
    pub count: usize,
}

impl StaggerTimeline {
    /// Timeline with non-negative timings.
    pub fn new(stagger: f64, duration: f64, count: usize) -> Self {
        let fix = |v: f64| if v.is_finite() { v.max(0.0) } else { 0.0 };
        Self {
            stagger: fix(stagger),
            duration: fix(duration),
            count,
        }
    }

    /// Total length.
    pub fn total(&self) -> f64 {
        self.stagger * self.count as f64 + self.duration
    }

    /// Local progress of character `i` at line progress `progress`, in `[0, 1]`.
    pub fn local(&self, i: usize, progress: f64) -> f64 {
        let global = clamp01(progress) * self.total();
        let start = i as f64 * self.stagger;
        if self.duration <= 0.0 {
            return if global >= start { 1.0 } else { 0.0 };
        }
        clamp01(safe_div(global - start, self.duration, 1.0))
    }
}

/// Glyph layout cache owned by a character effect.
#[derive(Clone, Debug)]
pub struct CharacterLayer {
    cache: GlyphLayoutCache,
}

impl CharacterLayer {
    /// Layer caching up to `capacity` layouts.
    pub fn new(capacity: usize) -> Self {
        Self {
            cache: GlyphLayoutCache::new(capacity),
        }
    }

    /// Layout of the context's line; leaves the canvas state untouched.
    pub fn layout(
        &mut self,
        canvas: &mut dyn Canvas2D,
        ctx: &LyricEffectContext<'_>,
    ) -> GlyphLayout {
        self.cache
            .get_or_layout(canvas, ctx.text, ctx.font, ctx.x, ctx.y)
            .clone()
    }

    /// Drop cached layouts.
    pub fn clear(&mut self) {
        self.cache.clear();
    }

    /// Cached layout count.
    pub fn cached(&self) -> usize {
        self.cache.len()
    }
}

/// Deterministic per-character value in `[0, 1)`.
pub fn char_noise(seed: u64, i: usize, salt: u32) -> f64 {
    f64::from(hash_u32(seed, i as u32, salt)) / (f64::from(u32::MAX) + 1.0)
}

/// Glow color and blur from settings, if glow is enabled.
pub fn settings_glow(ctx: &LyricEffectContext<'_>) -> Option<(Color, f64)> {
    let k = ctx.frame.settings.glow_intensity;
    if k.is_finite() && k > 0.0 {
        Some((ctx.frame.settings.glow_color, k.min(1.0) * 20.0))
    } else {
        None
    }
}

/// Draw one glyph with the settings glow when enabled.
pub fn draw_glyph(
    canvas: &mut dyn Canvas2D,
    ctx: &LyricEffectContext<'_>,
    glyph: &GlyphPos,
    style: &CharStyle,
    glow: bool,
) {
    match settings_glow(ctx).filter(|_| glow) {
        Some((color, blur)) => {
            crate::glyph::draw_character_with_glow(
                canvas,
                glyph,
                style,
                ctx.font,
                ctx.color,
                color,
                blur,
            )
        }
        None => crate::glyph::draw_character(canvas, glyph, style, ctx.font, ctx.color),
    }
}

/// Draw the whole line statically.
pub fn draw_plain(canvas: &mut dyn Canvas2D, ctx: &LyricEffectContext<'_>, layout: &GlyphLayout) {
    let style = CharStyle::default();
    for g in &layout.glyphs {
        crate::glyph::draw_character(canvas, g, &style, ctx.font, ctx.color);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/effects/common.rs"]
mod tests;
