use crate::canvas::Canvas2D;
use crate::config::EngineConfig;
use crate::effects::common::{CharacterLayer, draw_glyph};
use crate::effects::{
    Effect, EffectBase, EffectCategory, EffectMeta, LineSlot, LyricEffectContext, effect_accessors,
};
use crate::foundation::rng::FxRng;
use crate::glyph::CharStyle;
use crate::params::ParamDef;

const DIM_OPACITY: f64 = 0.15;

/// One tube's on/off state machine.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Tube {
    /// Lit or dark.
    pub lit: bool,
    /// Seconds until the next decision.
    pub timer: f64,
}

#[derive(Clone, Debug)]
struct FlickerState {
    rng: FxRng,
    tubes: Vec<Tube>,
}

/// Neon sign with characters randomly dropping out; bass keeps the tubes lit.
pub struct NeonFlicker {
    base: EffectBase,
    layer: CharacterLayer,
    seed: u64,
    state: LineSlot<FlickerState>,
}

impl NeonFlicker {
    /// Registry metadata.
    pub const META: EffectMeta = EffectMeta {
        id: "neon-flicker",
        name: "Neon Flicker",
        category: EffectCategory::Lyric,
        description: "Glowing characters flicker like failing neon tubes",
        tags: &["motion", "character", "glow", "random", "audio"],
        params: &[
            ParamDef::slider("flickerRate", "Flicker Rate", 0.3, 0.0, 1.0, 0.05, ""),
            ParamDef::slider("minOffTime", "Min Off Time", 0.05, 0.01, 0.5, 0.01, "s"),
            ParamDef::slider("maxOffTime", "Max Off Time", 0.2, 0.01, 1.0, 0.01, "s"),
            ParamDef::slider("bassStabilize", "Bass Stabilize", 0.7, 0.0, 1.0, 0.05, ""),
            ParamDef::slider("glowSize", "Glow Size", 18.0, 0.0, 60.0, 1.0, "px"),
        ],
    };

    /// Unseeded instance.
    pub fn new(config: &EngineConfig) -> Self {
        Self {
            base: EffectBase::new(&Self::META),
            layer: CharacterLayer::new(config.glyph_cache_capacity),
            seed: config.seed,
            state: LineSlot::new(),
        }
    }

    /// Tube states of `lyric_id`, if it is the current line.
    pub fn tubes(&self, lyric_id: &str) -> Option<&[Tube]> {
        self.state.get(lyric_id).map(|s| s.tubes.as_slice())
    }

    fn step(&mut self, lyric_id: &str, count: usize, dt: f64, bass: f64) {
        let p = &self.base.params;
        let rate = p.number("flickerRate");
        let min_off = p.number("minOffTime");
        let max_off = p.number("maxOffTime").max(min_off);
        let stabilize = p.number("bassStabilize");
        let seed = self.seed;

        let st = self.state.get_or_insert_with(lyric_id, || {
            let mut rng = FxRng::for_line(seed, lyric_id);
            let tubes = (0..count)
                .map(|_| Tube {
                    lit: true,
                    timer: rng.range(0.1, 1.0),
                })
                .collect();
            FlickerState { rng, tubes }
        });
        if st.tubes.len() != count {
            let fresh = Tube {
                lit: true,
                timer: 0.5,
            };
            st.tubes.resize(count, fresh);
        }

        let p_off = (rate * (1.0 - stabilize * bass.clamp(0.0, 1.0))).clamp(0.0, 1.0);
        for tube in &mut st.tubes {
            tube.timer -= dt;
            if tube.timer > 0.0 {
                continue;
            }
            if tube.lit && st.rng.chance(p_off) {
                tube.lit = false;
                tube.timer = st.rng.range(min_off, max_off);
            } else {
                tube.lit = true;
                tube.timer = st.rng.range(0.1, 1.0);
            }
        }
    }
}

impl Effect for NeonFlicker {
    effect_accessors!();

    fn reset(&mut self) {
        self.layer.clear();
        self.state.clear();
    }

    fn render_lyric(&mut self, canvas: &mut dyn Canvas2D, ctx: &LyricEffectContext<'_>) {
        if !ctx.is_drawable() {
            return;
        }
        let layout = self.layer.layout(canvas, ctx);
        self.step(
            ctx.lyric_id(),
            layout.len(),
            ctx.frame.dt(),
            ctx.frame.bass(),
        );
        let glow_size = self.base.params.number("glowSize");
        let glow = ctx.frame.settings.glow_color;
        let Some(state) = self.state.get(ctx.lyric_id()) else {
            return;
        };

        for (g, tube) in layout.glyphs.iter().zip(&state.tubes) {
            if tube.lit {
                crate::glyph::draw_character_with_glow(
                    canvas,
                    g,
                    &CharStyle::default(),
                    ctx.font,
                    ctx.color,
                    glow,
                    glow_size,
                );
            } else {
                let style = CharStyle::default().with_opacity(DIM_OPACITY);
                draw_glyph(canvas, ctx, g, &style, false);
            }
        }
    }
}

#[cfg(test)]
#[path = "../../../tests/unit/effects/motion/neon_flicker.rs"]
mod tests;
