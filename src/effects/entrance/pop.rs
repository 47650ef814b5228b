use super::{duration_param, stagger_param};
use crate::animation::ease::Ease;
use crate::canvas::Canvas2D;
use crate::config::EngineConfig;
use crate::effects::common::{CharacterLayer, StaggerTimeline, draw_glyph};
use crate::effects::{
    Effect, EffectBase, EffectCategory, EffectMeta, LyricEffectContext, effect_accessors,
};
use crate::foundation::math::{clamp01, lerp};
use crate::glyph::CharStyle;
use crate::params::{ParamDef, ParamSet};

const OVERSHOOT_AT: f64 = 0.6;

/// Characters pop in one after another, overshooting to `popScale` before settling.
pub struct Pop {
    base: EffectBase,
    layer: CharacterLayer,
}

/// Typed view of [`Pop`]'s parameters.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PopParams {
    /// Peak scale reached before settling.
    pub pop_scale: f64,
    /// Delay between characters.
    pub stagger: f64,
    /// Length of one character's pop.
    pub duration: f64,
    /// Curve for the grow phase.
    pub easing: Ease,
    /// Draw with the settings glow.
    pub glow: bool,
}

impl PopParams {
    /// Read from a parameter set.
    pub fn from_set(p: &ParamSet) -> Self {
        Self {
            pop_scale: p.number("popScale"),
            stagger: p.number("staggerDelay"),
            duration: p.number("duration"),
            easing: Ease::from_name(p.choice("easing")),
            glow: p.flag("glow"),
        }
    }

    /// Style of character `index` of `count` at line progress `progress`.
    pub fn char_style(&self, index: usize, count: usize, progress: f64) -> CharStyle {
        let local = StaggerTimeline::new(self.stagger, self.duration, count).local(index, progress);
        let scale = if local < OVERSHOOT_AT {
            lerp(0.0, self.pop_scale, self.easing.apply(local / OVERSHOOT_AT))
        } else {
            let t = (local - OVERSHOOT_AT) / (1.0 - OVERSHOOT_AT);
            lerp(self.pop_scale, 1.0, Ease::OutCubic.apply(t))
        };
        CharStyle::default()
            .with_scale(scale.max(0.0))
            .with_opacity(clamp01(local * 3.0))
    }
}

impl Pop {
    /// Registry metadata.
    pub const META: EffectMeta = EffectMeta {
        id: "pop",
        name: "Character Pop",
        category: EffectCategory::Lyric,
        description: "Characters pop in with a staggered overshoot",
        tags: &["entrance", "character", "scale"],
        params: &[
            ParamDef::slider("popScale", "Pop Scale", 1.5, 1.0, 3.0, 0.1, "x"),
            stagger_param(0.05),
            duration_param(0.5),
            ParamDef::choice("easing", "Easing", "outCubic", Ease::NAMES),
            ParamDef::toggle("glow", "Glow", true),
        ],
    };

    /// Unseeded instance.
    pub fn new(config: &EngineConfig) -> Self {
        Self {
            base: EffectBase::new(&Self::META),
            layer: CharacterLayer::new(config.glyph_cache_capacity),
        }
    }

    /// Typed parameters.
    pub fn params_typed(&self) -> PopParams {
        PopParams::from_set(&self.base.params)
    }
}

impl Effect for Pop {
    effect_accessors!();

    fn reset(&mut self) {
        self.layer.clear();
    }

    fn render_lyric(&mut self, canvas: &mut dyn Canvas2D, ctx: &LyricEffectContext<'_>) {
        if !ctx.is_drawable() {
            return;
        }
        let p = self.params_typed();
        let layout = self.layer.layout(canvas, ctx);
        let n = layout.len();
        for g in &layout.glyphs {
            let style = p.char_style(g.index, n, ctx.progress());
            draw_glyph(canvas, ctx, g, &style, p.glow);
        }
    }
}

#[cfg(test)]
#[path = "../../../tests/unit/effects/entrance/pop.rs"]
mod tests;
