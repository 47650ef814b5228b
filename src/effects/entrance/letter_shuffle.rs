use super::{duration_param, stagger_param};
use crate::canvas::Canvas2D;
use crate::config::EngineConfig;
use crate::effects::common::{CharacterLayer, StaggerTimeline, char_noise, draw_glyph};
use crate::effects::{
    Effect, EffectBase, EffectCategory, EffectMeta, LyricEffectContext, effect_accessors,
};
use crate::glyph::{CharStyle, GlyphPos};
use crate::params::ParamDef;

const ALPHA: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz";
const NUMERIC: &str = "0123456789";
const SYMBOLS: &str = "!@#$%^&*<>?/+=-_~";

/// Each character cycles through random letters until its slot resolves.
pub struct LetterShuffle {
    base: EffectBase,
    layer: CharacterLayer,
    seed: u64,
}

impl LetterShuffle {
    /// Registry metadata.
    pub const META: EffectMeta = EffectMeta {
        id: "letter-shuffle",
        name: "Letter Shuffle",
        category: EffectCategory::Lyric,
        description: "Slot-machine style shuffle that settles on each character",
        tags: &["entrance", "character", "random"],
        params: &[
            ParamDef::slider("shuffleSpeed", "Shuffle Speed", 20.0, 1.0, 60.0, 1.0, "/s"),
            stagger_param(0.04),
            duration_param(0.5),
            ParamDef::choice(
                "charset",
                "Character Set",
                "alpha",
                &["alpha", "numeric", "symbols"],
            ),
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

impl Effect for LetterShuffle {
    effect_accessors!();

    fn reset(&mut self) {
        self.layer.clear();
    }

    fn render_lyric(&mut self, canvas: &mut dyn Canvas2D, ctx: &LyricEffectContext<'_>) {
        if !ctx.is_drawable() {
            return;
        }
        let p = &self.base.params;
        let speed = p.number("shuffleSpeed");
        let pool: Vec<char> = match p.choice("charset") {
            "numeric" => NUMERIC.chars().collect(),
            "symbols" => SYMBOLS.chars().collect(),
            _ => ALPHA.chars().collect(),
        };
        let layout = self.layer.layout(canvas, ctx);
        let timeline = StaggerTimeline::new(
            p.number("staggerDelay"),
            p.number("duration"),
            layout.len(),
        );
        let tick = (ctx.line_time() * speed).floor() as u32;
        let line_seed = self.seed ^ xxhash_rust::xxh3::xxh3_64(ctx.lyric_id().as_bytes());

        for g in &layout.glyphs {
            let local = timeline.local(g.index, ctx.progress());
            if local <= 0.0 || g.is_blank() {
                continue;
            }
            if local >= 1.0 {
                draw_glyph(canvas, ctx, g, &CharStyle::default(), true);
                continue;
            }
            let k = (char_noise(line_seed, g.index, tick) * pool.len() as f64) as usize;
            let shown = GlyphPos {
                ch: pool[k.min(pool.len() - 1)],
                ..g.clone()
            };
            let style = CharStyle::default()
                .with_opacity(0.4 + 0.6 * local)
                .with_offset(0.0, -4.0 * (1.0 - local));
            draw_glyph(canvas, ctx, &shown, &style, false);
        }
    }
}
