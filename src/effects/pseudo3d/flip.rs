use std::f64::consts::{FRAC_PI_2, PI};

use super::face_shade;
use crate::animation::ease::Ease;
use crate::canvas::Canvas2D;
use crate::config::EngineConfig;
use crate::effects::common::{CharacterLayer, StaggerTimeline, draw_glyph};
use crate::effects::entrance::{duration_param, stagger_param};
use crate::effects::{
    Effect, EffectBase, EffectCategory, EffectMeta, LyricEffectContext, effect_accessors,
};
use crate::glyph::CharStyle;
use crate::params::ParamDef;

/// Card-flip entrance around the horizontal or vertical axis.
pub struct Flip {
    base: EffectBase,
    layer: CharacterLayer,
}

impl Flip {
    /// Registry metadata.
    pub const META: EffectMeta = EffectMeta {
        id: "flip",
        name: "Flip",
        category: EffectCategory::Lyric,
        description: "Characters flip over like cards to reveal themselves",
        tags: &["3d", "pseudo-3d", "character", "entrance"],
        params: &[
            ParamDef::choice("axis", "Axis", "x", &["x", "y"]),
            ParamDef::choice("from", "From", "back", &["back", "edge"]),
            stagger_param(0.05),
            duration_param(0.5),
            ParamDef::toggle("beatFlip", "Flip On Beat", false),
        ],
    };

    /// Unseeded instance.
    pub fn new(config: &EngineConfig) -> Self {
        Self {
            base: EffectBase::new(&Self::META),
            layer: CharacterLayer::new(config.glyph_cache_capacity),
        }
    }

    /// Flip angle of a character at local progress `local`, `start` radians before rest.
    pub fn angle(start: f64, local: f64) -> f64 {
        start * (1.0 - Ease::OutBack.apply(local))
    }
}

impl Effect for Flip {
    effect_accessors!();

    fn reset(&mut self) {
        self.layer.clear();
    }

    fn render_lyric(&mut self, canvas: &mut dyn Canvas2D, ctx: &LyricEffectContext<'_>) {
        if !ctx.is_drawable() {
            return;
        }
        let p = &self.base.params;
        let vertical_axis = p.choice("axis") == "y";
        let start = if p.choice("from") == "edge" {
            FRAC_PI_2
        } else {
            PI
        };
        let beat = if p.flag("beatFlip") {
            ctx.frame.beat() * 0.6
        } else {
            0.0
        };
        let layout = self.layer.layout(canvas, ctx);
        let timeline = StaggerTimeline::new(
            p.number("staggerDelay"),
            p.number("duration"),
            layout.len(),
        );

        for g in &layout.glyphs {
            let local = timeline.local(g.index, ctx.progress());
            if local <= 0.0 {
                continue;
            }
            let angle = Self::angle(start, local) + beat;
            let fold = angle.cos();
            let fold = if fold.abs() < 0.02 {
                0.02f64.copysign(fold)
            } else {
                fold
            };
            let mut style = CharStyle::default().with_color(face_shade(ctx.color, angle));
            if vertical_axis {
                style.scale_x = fold;
            } else {
                style.scale_y = fold;
            }
            draw_glyph(canvas, ctx, g, &style, true);
        }
    }
}

#[cfg(test)]
#[path = "../../../tests/unit/effects/pseudo3d/flip.rs"]
mod tests;
