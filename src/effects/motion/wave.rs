use std::f64::consts::TAU;

use crate::canvas::Canvas2D;
use crate::config::EngineConfig;
use crate::effects::common::{CharacterLayer, draw_glyph};
use crate::effects::{
    Effect, EffectBase, EffectCategory, EffectMeta, LyricEffectContext, effect_accessors,
};
use crate::glyph::CharStyle;
use crate::params::ParamDef;

/// Sine wave travelling through the line.
pub struct Wave {
    base: EffectBase,
    layer: CharacterLayer,
}

impl Wave {
    /// Registry metadata.
    pub const META: EffectMeta = EffectMeta {
        id: "wave",
        name: "Wave",
        category: EffectCategory::Lyric,
        description: "Characters ride a travelling sine wave",
        tags: &["motion", "character", "audio"],
        params: &[
            ParamDef::slider("amplitude", "Amplitude", 12.0, 0.0, 60.0, 1.0, "px"),
            ParamDef::slider("frequency", "Frequency", 1.5, 0.1, 5.0, 0.1, "Hz"),
            ParamDef::slider("phaseOffset", "Phase Offset", 0.5, 0.0, 2.0, 0.05, "rad"),
            ParamDef::choice("mode", "Mode", "vertical", &["vertical", "rotate", "scale"]),
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
}

impl Effect for Wave {
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
            1.0 + ctx.frame.bass()
        } else {
            1.0
        };
        let amp = p.number("amplitude") * boost;
        let freq = p.number("frequency");
        let phase = p.number("phaseOffset");
        let mode = p.choice("mode");
        let t = ctx.frame.time();
        let layout = self.layer.layout(canvas, ctx);

        for g in &layout.glyphs {
            let s = (TAU * freq * t + g.index as f64 * phase).sin();
            let style = match mode {
                "rotate" => CharStyle::default().with_rotation(s * amp.to_radians()),
                "scale" => CharStyle::default().with_scale(1.0 + s * amp / 100.0),
                _ => CharStyle::default().with_offset(0.0, s * amp),
            };
            draw_glyph(canvas, ctx, g, &style, true);
        }
    }
}
