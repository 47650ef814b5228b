use crate::canvas::Canvas2D;
use crate::config::EngineConfig;
use crate::effects::common::{CharacterLayer, draw_glyph};
use crate::effects::{
    Effect, EffectBase, EffectCategory, EffectMeta, LyricEffectContext, effect_accessors,
};
use crate::foundation::core::Color;
use crate::glyph::CharStyle;
use crate::params::ParamDef;

/// Hue rotating along the line over time.
pub struct RainbowCycle {
    base: EffectBase,
    layer: CharacterLayer,
}

impl RainbowCycle {
    /// Registry metadata.
    pub const META: EffectMeta = EffectMeta {
        id: "rainbow-cycle",
        name: "Rainbow Cycle",
        category: EffectCategory::Lyric,
        description: "Per-character hue cycling across the spectrum",
        tags: &["motion", "character", "color"],
        params: &[
            ParamDef::slider("speed", "Speed", 60.0, 0.0, 360.0, 5.0, "deg/s"),
            ParamDef::slider("spread", "Spread", 25.0, 0.0, 90.0, 1.0, "deg"),
            ParamDef::slider("saturation", "Saturation", 0.85, 0.0, 1.0, 0.05, ""),
            ParamDef::slider("lightness", "Lightness", 0.6, 0.2, 0.9, 0.05, ""),
            ParamDef::toggle("beatBoost", "Beat Boost", true),
        ],
    };

    /// Unseeded instance.
    pub fn new(config: &EngineConfig) -> Self {
        Self {
            base: EffectBase::new(&Self::META),
            layer: CharacterLayer::new(config.glyph_cache_capacity),
        }
    }

    /// Color of character `index` at `time`.
    pub fn hue_at(&self, index: usize, time: f64) -> f64 {
        let p = &self.base.params;
        let h = p.number("speed") * time + p.number("spread") * index as f64;
        if h.is_finite() {
            h.rem_euclid(360.0)
        } else {
            0.0
        }
    }
}

impl Effect for RainbowCycle {
    effect_accessors!();

    fn reset(&mut self) {
        self.layer.clear();
    }

    fn render_lyric(&mut self, canvas: &mut dyn Canvas2D, ctx: &LyricEffectContext<'_>) {
        if !ctx.is_drawable() {
            return;
        }
        let sat = self.base.params.number("saturation");
        let light = self.base.params.number("lightness");
        let pulse = if self.base.params.flag("beatBoost") {
            1.0 + ctx.frame.beat() * 0.15
        } else {
            1.0
        };
        let t = ctx.frame.time();
        let layout = self.layer.layout(canvas, ctx);

        for g in &layout.glyphs {
            let color = Color::from_hsla(self.hue_at(g.index, t), sat, light, ctx.color.a);
            let style = CharStyle::default().with_color(color).with_scale(pulse);
            draw_glyph(canvas, ctx, g, &style, true);
        }
    }
}
