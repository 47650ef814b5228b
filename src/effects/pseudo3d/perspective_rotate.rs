use std::f64::consts::TAU;

use super::{depth_scale, face_shade};
use crate::canvas::Canvas2D;
use crate::config::EngineConfig;
use crate::effects::common::{CharacterLayer, draw_glyph};
use crate::effects::{
    Effect, EffectBase, EffectCategory, EffectMeta, LyricEffectContext, effect_accessors,
};
use crate::foundation::math::clamp01;
use crate::glyph::CharStyle;
use crate::params::ParamDef;

/// The whole line swings around a vertical axis through its centre.
pub struct PerspectiveRotate {
    base: EffectBase,
    layer: CharacterLayer,
}

impl PerspectiveRotate {
    /// Registry metadata.
    pub const META: EffectMeta = EffectMeta {
        id: "perspective-rotate",
        name: "Perspective Rotate",
        category: EffectCategory::Lyric,
        description: "The line sways in depth like a sign turning on a pole",
        tags: &["3d", "pseudo-3d", "line", "audio"],
        params: &[
            ParamDef::slider("maxAngle", "Max Angle", 35.0, 0.0, 80.0, 1.0, "°"),
            ParamDef::slider("speed", "Speed", 0.25, 0.0, 2.0, 0.05, "Hz"),
            ParamDef::slider("tilt", "Tilt", 0.0, -30.0, 30.0, 1.0, "°"),
            ParamDef::toggle("audioReactive", "Audio Reactive", true),
        ],
    };

    /// Unseeded instance.
    pub fn new(config: &EngineConfig) -> Self {
        Self {
            base: EffectBase::new(&Self::META),
            layer: CharacterLayer::new(config.glyph_cache_capacity),
        }
    }

    /// Screen offset and scale of a point `dx` from the pivot when the line is turned `yaw`.
    pub fn project(dx: f64, yaw: f64) -> (f64, f64) {
        let z = dx * yaw.sin();
        let s = depth_scale(z);
        (dx * yaw.cos() * s, s)
    }
}

impl Effect for PerspectiveRotate {
    effect_accessors!();

    fn reset(&mut self) {
        self.layer.clear();
    }

    fn render_lyric(&mut self, canvas: &mut dyn Canvas2D, ctx: &LyricEffectContext<'_>) {
        if !ctx.is_drawable() {
            return;
        }
        let p = &self.base.params;
        let boost = if p.flag("audioReactive") {
            1.0 + 0.5 * ctx.frame.bass()
        } else {
            1.0
        };
        let max = p.number("maxAngle").to_radians() * boost;
        let yaw = max * (TAU * p.number("speed") * ctx.frame.time()).sin();
        let tilt = p.number("tilt").to_radians();
        let layout = self.layer.layout(canvas, ctx);
        let pivot = layout.left() + layout.total_width / 2.0;

        for g in &layout.glyphs {
            let dx = g.cx() - pivot;
            let (x, s) = Self::project(dx, yaw);
            if s <= 0.0 {
                continue;
            }
            let mut style = CharStyle::default()
                .with_offset(x - dx, dx * tilt.sin() * s * 0.3)
                .with_opacity(clamp01(0.35 + 0.65 * s))
                .with_color(face_shade(ctx.color, yaw));
            style.scale_x = s * yaw.cos().abs().max(0.05);
            style.scale_y = s;
            style.skew_x = -yaw.sin() * 0.2;
            draw_glyph(canvas, ctx, g, &style, true);
        }
    }
}

#[cfg(test)]
#[path = "../../../tests/unit/effects/pseudo3d/perspective_rotate.rs"]
mod tests;
