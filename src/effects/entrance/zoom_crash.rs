use super::{duration_param, stagger_param};
use crate::animation::ease::Ease;
use crate::canvas::Canvas2D;
use crate::config::EngineConfig;
use crate::effects::common::{CharacterLayer, StaggerTimeline, char_noise, draw_glyph};
use crate::effects::{
    Effect, EffectBase, EffectCategory, EffectMeta, LyricEffectContext, effect_accessors,
};
use crate::foundation::math::{clamp01, lerp};
use crate::glyph::CharStyle;
use crate::params::ParamDef;

const IMPACT: f64 = 0.8;

/// Characters fly in from a huge scale and slam into place with a shake.
pub struct ZoomCrash {
    base: EffectBase,
    layer: CharacterLayer,
    seed: u64,
}

impl ZoomCrash {
    /// Registry metadata.
    pub const META: EffectMeta = EffectMeta {
        id: "zoom-crash",
        name: "Zoom Crash",
        category: EffectCategory::Lyric,
        description: "Characters zoom in from the camera and crash into place",
        tags: &["entrance", "character", "scale", "impact"],
        params: &[
            ParamDef::slider("startScale", "Start Scale", 4.0, 1.0, 10.0, 0.1, "x"),
            stagger_param(0.04),
            duration_param(0.35),
            ParamDef::slider("shake", "Impact Shake", 8.0, 0.0, 30.0, 1.0, "px"),
        ],
    };

    /// Unseeded instance.
    pub fn new(config: &EngineConfig) -> Self {
        Self {
            base: EffectBase::new(&Self::META),
            layer: CharacterLayer::new(config.glyph_cache_capacity),
            seed: config.seed,
        }
    }
}

impl Effect for ZoomCrash {
    effect_accessors!();

    fn reset(&mut self) {
        self.layer.clear();
    }

    fn render_lyric(&mut self, canvas: &mut dyn Canvas2D, ctx: &LyricEffectContext<'_>) {
        if !ctx.is_drawable() {
            return;
        }
        let p = &self.base.params;
        let start = p.number("startScale");
        let shake = p.number("shake");
        let layout = self.layer.layout(canvas, ctx);
        let timeline = StaggerTimeline::new(
            p.number("staggerDelay"),
            p.number("duration"),
            layout.len(),
        );
        let tick = (ctx.frame.time() * 60.0).floor().max(0.0) as u32;

        // Beat-driven whole-line rumble.
        let rumble = ctx.frame.beat() * shake * 0.5;
        let rx = (char_noise(self.seed, 0, tick) - 0.5) * rumble;
        let ry = (char_noise(self.seed, 1, tick) - 0.5) * rumble;

        for g in &layout.glyphs {
            let local = timeline.local(g.index, ctx.progress());
            if local <= 0.0 {
                continue;
            }
            let approach = clamp01(local / IMPACT);
            let scale = lerp(start, 1.0, Ease::InCubic.apply(approach));
            let jolt = if local > IMPACT && local < 1.0 {
                shake * (1.0 - (local - IMPACT) / (1.0 - IMPACT))
            } else {
                0.0
            };
            let jx = (char_noise(self.seed, g.index, tick) - 0.5) * 2.0 * jolt + rx;
            let jy = (char_noise(self.seed, g.index, tick ^ 0xff) - 0.5) * 2.0 * jolt + ry;
            let style = CharStyle::default()
                .with_scale(scale)
                .with_opacity(clamp01(approach * 2.0))
                .with_offset(jx, jy);
            draw_glyph(canvas, ctx, g, &style, local >= 1.0);
        }
    }
}
