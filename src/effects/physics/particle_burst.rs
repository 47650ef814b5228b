use super::{centre, draw_particle, draw_trail, polar, tint};
use crate::canvas::Canvas2D;
use crate::config::EngineConfig;
use crate::effects::common::{CharacterLayer, draw_glyph};
use crate::effects::{
    Effect, EffectBase, EffectCategory, EffectMeta, LineSlot, LyricEffectContext, effect_accessors,
};
use crate::foundation::core::Vec2;
use crate::foundation::math::smoothstep;
use crate::foundation::rng::FxRng;
use crate::glyph::{CharStyle, GlyphPos};
use crate::params::ParamDef;
use crate::particle::{Particle, ParticlePool};

const DRAG: f64 = 1.2;
const BEAT_SHARE: f64 = 0.35;

#[derive(Clone, Debug)]
struct Burst {
    rng: FxRng,
    opened: bool,
    was_beat: bool,
    pool: ParticlePool,
}

/// The line bursts into sparks when it appears, and again on every beat.
pub struct ParticleBurst {
    base: EffectBase,
    layer: CharacterLayer,
    seed: u64,
    pool_capacity: usize,
    burst: LineSlot<Burst>,
}

impl ParticleBurst {
    /// Registry metadata.
    pub const META: EffectMeta = EffectMeta {
        id: "particle-burst",
        name: "Particle Burst",
        category: EffectCategory::Lyric,
        description: "Sparks burst from every character at line start and on beats",
        tags: &["physics", "particle", "entrance", "audio", "beat"],
        params: &[
            ParamDef::slider("particleCount", "Particles", 12.0, 1.0, 60.0, 1.0, "/char"),
            ParamDef::slider("speed", "Speed", 260.0, 20.0, 1200.0, 10.0, "px/s"),
            ParamDef::slider("gravity", "Gravity", 320.0, -500.0, 2000.0, 10.0, "px/s²"),
            ParamDef::slider("particleSize", "Particle Size", 2.5, 0.5, 10.0, 0.5, "px"),
            ParamDef::slider("lifetime", "Lifetime", 1.2, 0.2, 4.0, 0.1, "s"),
            ParamDef::toggle("beatBurst", "Burst On Beat", true),
            ParamDef::toggle("trails", "Trails", true),
        ],
    };

    /// Unseeded instance.
    pub fn new(config: &EngineConfig) -> Self {
        Self {
            base: EffectBase::new(&Self::META),
            layer: CharacterLayer::new(config.glyph_cache_capacity),
            seed: config.seed,
            pool_capacity: config.particle_pool_capacity,
            burst: LineSlot::new(),
        }
    }

    /// Live sparks of `lyric_id`.
    pub fn particles(&self, lyric_id: &str) -> &[Particle] {
        self.burst
            .get(lyric_id)
            .map(|b| b.pool.active())
            .unwrap_or_default()
    }

    fn emit(
        burst: &mut Burst,
        glyphs: &[GlyphPos],
        per_char: usize,
        speed: f64,
        size: f64,
        lifetime: f64,
        ctx: &LyricEffectContext<'_>,
    ) {
        let decay = 1.0 / lifetime.max(0.05);
        for g in glyphs.iter().filter(|g| !g.is_blank()) {
            for _ in 0..per_char {
                let a = burst.rng.range(0.0, std::f64::consts::TAU);
                let v = polar(a, speed * burst.rng.range(0.4, 1.0));
                let color = tint(ctx.color, ctx.frame.settings.glow_color, burst.rng.unit());
                let r = size * burst.rng.range(0.5, 1.5);
                let k = burst.rng.range(0.8, 1.25);
                let spin = burst.rng.signed() * 4.0;
                let Some(p) = burst.pool.acquire() else {
                    return;
                };
                p.respawn(centre(g), v, r, color, decay * k);
                p.spin = spin;
            }
        }
    }
}

impl Effect for ParticleBurst {
    effect_accessors!();

    fn reset(&mut self) {
        self.layer.clear();
        self.burst.clear();
    }

    fn render_lyric(&mut self, canvas: &mut dyn Canvas2D, ctx: &LyricEffectContext<'_>) {
        if !ctx.is_drawable() {
            return;
        }
        let p = &self.base.params;
        let per_char = p.number("particleCount").round().max(1.0) as usize;
        let speed = p.number("speed");
        let gravity = p.number("gravity");
        let size = p.number("particleSize");
        let lifetime = p.number("lifetime");
        let on_beat = p.flag("beatBurst");
        let trails = p.flag("trails");
        let layout = self.layer.layout(canvas, ctx);
        let (seed, cap) = (self.seed, self.pool_capacity);

        let burst = self.burst.get_or_insert_with(ctx.lyric_id(), || Burst {
            rng: FxRng::for_line(seed, ctx.lyric_id()),
            opened: false,
            was_beat: false,
            pool: ParticlePool::new(cap),
        });

        for part in burst.pool.active_mut() {
            part.integrate(ctx.frame.dt(), Vec2::new(0.0, gravity), DRAG);
        }
        burst.pool.retain_alive(Particle::is_dead);

        if !burst.opened {
            burst.opened = true;
            Self::emit(burst, &layout.glyphs, per_char, speed, size, lifetime, ctx);
        }
        let beat = ctx.frame.beat() > 0.0;
        if on_beat && beat && !burst.was_beat {
            let n = ((per_char as f64) * BEAT_SHARE).ceil() as usize;
            let boost = 1.0 + ctx.frame.beat();
            Self::emit(
                burst,
                &layout.glyphs,
                n,
                speed * boost,
                size,
                lifetime * 0.6,
                ctx,
            );
        }
        burst.was_beat = beat;

        let entry = 1.0 - smoothstep(0.0, 0.08, ctx.progress());
        let pop = 1.0 + 0.15 * entry + 0.1 * ctx.frame.beat();
        for g in &layout.glyphs {
            draw_glyph(canvas, ctx, g, &CharStyle::default().with_scale(pop), true);
        }
        for part in burst.pool.active() {
            if trails {
                draw_trail(canvas, part, 1.0);
            }
            draw_particle(canvas, part, 1.0);
        }
    }
}

#[cfg(test)]
#[path = "../../../tests/unit/effects/physics/particle_burst.rs"]
mod tests;
