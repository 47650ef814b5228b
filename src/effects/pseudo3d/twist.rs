use super::face_shade;
use crate::animation::ease::Ease;
use crate::canvas::Canvas2D;
use crate::config::EngineConfig;
use crate::effects::common::{CharacterLayer, StaggerTimeline, draw_glyph};
use crate::effects::entrance::{duration_param, stagger_param};
use crate::effects::{
    Effect, EffectBase, EffectCategory, EffectMeta, LyricEffectContext, effect_accessors,
};
use crate::foundation::math::clamp01;
use crate::glyph::CharStyle;
use crate::params::ParamDef;

/// Characters untwist around their vertical axis, a `cos` squash standing in for rotation.
pub struct Twist {
    base: EffectBase,
    layer: CharacterLayer,
}

impl Twist {
    /// Registry metadata.
    pub const META: EffectMeta = EffectMeta {
        id: "twist",
        name: "Twist",
        category: EffectCategory::Lyric,
        description: "Characters spin around their vertical axis into place",
        tags: &["3d", "pseudo-3d", "character", "entrance"],
        params: &[
            ParamDef::slider("twistAmount", "Twist", 540.0, 0.0, 1440.0, 15.0, "°"),
            stagger_param(0.04),
            duration_param(0.7),
            ParamDef::slider("idleSpin", "Idle Spin", 0.0, 0.0, 360.0, 5.0, "°/s"),
            ParamDef::choice("easing", "Easing", "outCubic", Ease::NAMES),
        ],
    };

    /// Unseeded instance.
    pub fn new(config: &EngineConfig) -> Self {
        Self {
            base: EffectBase::new(&Self::META),
            layer: CharacterLayer::new(config.glyph_cache_capacity),
        }
    }
}

impl Effect for Twist {
    effect_accessors!();

    fn reset(&mut self) {
        self.layer.clear();
    }

    fn render_lyric(&mut self, canvas: &mut dyn Canvas2D, ctx: &LyricEffectContext<'_>) {
        if !ctx.is_drawable() {
            return;
        }
        let p = &self.base.params;
        let twist = p.number("twistAmount").to_radians();
        let idle_rate = p.number("idleSpin").to_radians();
        let idle = idle_rate * ctx.line_time();
        let ease = Ease::from_name(p.choice("easing"));
        let layout = self.layer.layout(canvas, ctx);
        let timeline = StaggerTimeline::new(
            p.number("staggerDelay"),
            p.number("duration"),
            layout.len(),
        );

        for g in &layout.glyphs {
            let local = timeline.local(g.index, ctx.progress());
            let phase = if idle_rate > 0.0 {
                g.index as f64 * 0.2
            } else {
                0.0
            };
            let angle = twist * (1.0 - ease.apply(local)) + idle + phase;
            // Keep a sliver visible when edge-on.
            let squash = angle.cos();
            let squash = if squash.abs() < 0.02 {
                0.02f64.copysign(squash)
            } else {
                squash
            };
            let mut style = CharStyle::default()
                .with_opacity(clamp01(local * 4.0))
                .with_color(face_shade(ctx.color, angle));
            style.scale_x = squash;
            style.skew_x = angle.sin() * 0.15;
            draw_glyph(canvas, ctx, g, &style, true);
        }
    }
}
