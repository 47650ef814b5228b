use super::{duration_param, stagger_param};
use crate::canvas::Canvas2D;
use crate::config::EngineConfig;
use crate::effects::common::{CharacterLayer, StaggerTimeline, char_noise, draw_glyph};
use crate::effects::{
    Effect, EffectBase, EffectCategory, EffectMeta, LyricEffectContext, effect_accessors,
};
use crate::foundation::core::Color;
use crate::glyph::{CharStyle, GlyphPos, draw_character};
use crate::params::ParamDef;

const GLITCH_CHARS: &[char] = &[
    '#', '%', '&', '@', '$', '!', '?', '/', '\\', '|', '<', '>', '*', '+', '=', '0', '1',
];
const FRAME_RATE: f64 = 30.0;

/// Characters resolve out of flickering substitute glyphs with an RGB split.
pub struct GlitchReveal {
    base: EffectBase,
    layer: CharacterLayer,
    seed: u64,
}

impl GlitchReveal {
    /// Registry metadata.
    pub const META: EffectMeta = EffectMeta {
        id: "glitch-reveal",
        name: "Glitch Reveal",
        category: EffectCategory::Lyric,
        description: "Characters glitch through random symbols before locking in",
        tags: &["entrance", "character", "glitch"],
        params: &[
            ParamDef::slider("glitchIntensity", "Intensity", 0.6, 0.0, 1.0, 0.05, ""),
            stagger_param(0.03),
            duration_param(0.4),
            ParamDef::toggle("colorSplit", "Color Split", true),
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

impl Effect for GlitchReveal {
    effect_accessors!();

    fn reset(&mut self) {
        self.layer.clear();
    }

    fn render_lyric(&mut self, canvas: &mut dyn Canvas2D, ctx: &LyricEffectContext<'_>) {
        if !ctx.is_drawable() {
            return;
        }
        let p = &self.base.params;
        let intensity = p.number("glitchIntensity");
        let split = p.flag("colorSplit");
        let layout = self.layer.layout(canvas, ctx);
        let timeline = StaggerTimeline::new(
            p.number("staggerDelay"),
            p.number("duration"),
            layout.len(),
        );
        let tick = (ctx.frame.time() * FRAME_RATE).floor().max(0.0) as u32;
        let line_seed = self.seed ^ xxhash_rust::xxh3::xxh3_64(ctx.lyric_id().as_bytes());

        for g in &layout.glyphs {
            let local = timeline.local(g.index, ctx.progress());
            if local <= 0.0 {
                continue;
            }
            if local >= 1.0 {
                draw_glyph(canvas, ctx, g, &CharStyle::default(), true);
                continue;
            }

            let chaos = intensity * (1.0 - local);
            let pick = char_noise(line_seed, g.index, tick);
            let shown = if pick < 0.35 + 0.5 * local {
                g.clone()
            } else {
                let k = (char_noise(line_seed, g.index, tick ^ 0x5a5a) * GLITCH_CHARS.len() as f64)
                    as usize;
                GlyphPos {
                    ch: GLITCH_CHARS[k.min(GLITCH_CHARS.len() - 1)],
                    ..g.clone()
                }
            };
            let jx = (char_noise(line_seed, g.index, tick.wrapping_add(1)) - 0.5) * 20.0 * chaos;
            let jy = (char_noise(line_seed, g.index, tick.wrapping_add(2)) - 0.5) * 8.0 * chaos;
            let opacity = 0.3 + 0.7 * local;

            if split && chaos > 0.0 {
                let off = 6.0 * chaos;
                let ghost = CharStyle::default().with_opacity(opacity * 0.6);
                let red = ghost.with_offset(jx - off, jy);
                let cyan = ghost.with_offset(jx + off, jy);
                draw_character(canvas, &shown, &red, ctx.font, Color::rgb(1.0, 0.0, 0.3));
                draw_character(canvas, &shown, &cyan, ctx.font, Color::rgb(0.0, 1.0, 1.0));
            }
            let style = CharStyle::default()
                .with_opacity(opacity)
                .with_offset(jx, jy);
            draw_glyph(canvas, ctx, &shown, &style, false);
        }
    }
}
