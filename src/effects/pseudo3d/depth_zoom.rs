use super::depth_scale;
use crate::animation::ease::Ease;
use crate::canvas::Canvas2D;
use crate::config::EngineConfig;
use crate::effects::common::{CharacterLayer, StaggerTimeline, draw_glyph};
use crate::effects::entrance::{duration_param, stagger_param};
use crate::effects::{
    Effect, EffectBase, EffectCategory, EffectMeta, LyricEffectContext, effect_accessors,
};
use crate::foundation::math::{clamp01, lerp};
use crate::glyph::CharStyle;
use crate::params::ParamDef;

/// Characters travel from deep behind the screen to the picture plane.
pub struct DepthZoom {
    base: EffectBase,
    layer: CharacterLayer,
}

impl DepthZoom {
    /// Registry metadata.
    pub const META: EffectMeta = EffectMeta {
        id: "depth-zoom",
        name: "Depth Zoom",
        category: EffectCategory::Lyric,
        description: "Characters fly forward out of the distance and pulse in depth with the bass",
        tags: &["3d", "pseudo-3d", "character", "entrance", "audio"],
        params: &[
            ParamDef::slider(
                "startDepth",
                "Start Depth",
                3000.0,
                0.0,
                10000.0,
                100.0,
                "px",
            ),
            stagger_param(0.05),
            duration_param(0.6),
            ParamDef::slider("bassPulse", "Bass Pulse", 120.0, 0.0, 500.0, 10.0, "px"),
            ParamDef::choice("easing", "Easing", "outExpo", Ease::NAMES),
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

impl Effect for DepthZoom {
    effect_accessors!();

    fn reset(&mut self) {
        self.layer.clear();
    }

    fn render_lyric(&mut self, canvas: &mut dyn Canvas2D, ctx: &LyricEffectContext<'_>) {
        if !ctx.is_drawable() {
            return;
        }
        let p = &self.base.params;
        let far = p.number("startDepth");
        let pulse = p.number("bassPulse") * ctx.frame.bass();
        let ease = Ease::from_name(p.choice("easing"));
        let layout = self.layer.layout(canvas, ctx);
        let timeline = StaggerTimeline::new(
            p.number("staggerDelay"),
            p.number("duration"),
            layout.len(),
        );
        let vanish_x = ctx.x;

        for g in &layout.glyphs {
            let local = timeline.local(g.index, ctx.progress());
            if local <= 0.0 {
                continue;
            }
            // Negative depth pushes towards the viewer.
            let z = lerp(far, 0.0, ease.apply(local)) - pulse;
            let s = depth_scale(z);
            if s <= 0.0 {
                continue;
            }
            let dx = g.cx() - vanish_x;
            let style = CharStyle::default()
                .with_scale(s)
                .with_offset(dx * s - dx, 0.0)
                .with_opacity(clamp01(local * 2.0) * clamp01(s * 1.5));
            draw_glyph(canvas, ctx, g, &style, true);
        }
    }
}
