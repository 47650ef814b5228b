use super::{draw_particle, tint};
use crate::animation::ease::Ease;
use crate::canvas::Canvas2D;
use crate::config::EngineConfig;
use crate::effects::common::{CharacterLayer, StaggerTimeline, draw_glyph};
use crate::effects::{
    Effect, EffectBase, EffectCategory, EffectMeta, LineSlot, LyricEffectContext, effect_accessors,
};
use crate::foundation::core::{Point, Vec2};
use crate::foundation::math::{clamp01, smoothstep};
use crate::foundation::rng::FxRng;
use crate::glyph::CharStyle;
use crate::params::ParamDef;
use crate::particle::ParticlePool;

const CHAR_STAGGER: f64 = 0.04;
const SWIRL: f64 = 40.0;

#[derive(Clone, Copy, Debug)]
struct Route {
    owner: usize,
    from: Point,
    to: Point,
    phase: f64,
}

#[derive(Clone, Debug)]
struct Swarm {
    routes: Vec<Route>,
    pool: ParticlePool,
}

/// Particles fly in from afar and condense into the characters.
pub struct ParticleAssemble {
    base: EffectBase,
    layer: CharacterLayer,
    seed: u64,
    pool_capacity: usize,
    swarm: LineSlot<Swarm>,
}

impl ParticleAssemble {
    /// Registry metadata.
    pub const META: EffectMeta = EffectMeta {
        id: "particle-assemble",
        name: "Particle Assemble",
        category: EffectCategory::Lyric,
        description: "A cloud of particles converges to form the text",
        tags: &["physics", "particle", "entrance"],
        params: &[
            ParamDef::slider(
                "particlesPerChar",
                "Particles",
                24.0,
                4.0,
                80.0,
                1.0,
                "/char",
            ),
            ParamDef::slider("spread", "Spread", 420.0, 50.0, 1200.0, 10.0, "px"),
            ParamDef::slider("assembleEnd", "Assemble End", 0.5, 0.1, 1.0, 0.05, ""),
            ParamDef::slider("particleSize", "Particle Size", 1.8, 0.5, 6.0, 0.1, "px"),
            ParamDef::choice("easing", "Easing", "inOutCubic", Ease::NAMES),
        ],
    };

    /// Unseeded instance.
    pub fn new(config: &EngineConfig) -> Self {
        Self {
            base: EffectBase::new(&Self::META),
            layer: CharacterLayer::new(config.glyph_cache_capacity),
            seed: config.seed,
            pool_capacity: config.particle_pool_capacity,
            swarm: LineSlot::new(),
        }
    }

    /// Number of particles allocated for `lyric_id`.
    pub fn particle_count(&self, lyric_id: &str) -> usize {
        self.swarm.get(lyric_id).map_or(0, |s| s.pool.len())
    }

    /// Mean distance of `lyric_id`'s particles from their targets.
    pub fn mean_distance(&self, lyric_id: &str) -> Option<f64> {
        let s = self.swarm.get(lyric_id)?;
        let parts = s.pool.active();
        if parts.is_empty() {
            return None;
        }
        let sum: f64 = parts
            .iter()
            .zip(&s.routes)
            .map(|(p, r)| (p.pos - r.to).hypot())
            .sum();
        Some(sum / parts.len() as f64)
    }
}

impl Effect for ParticleAssemble {
    effect_accessors!();

    fn reset(&mut self) {
        self.layer.clear();
        self.swarm.clear();
    }

    fn render_lyric(&mut self, canvas: &mut dyn Canvas2D, ctx: &LyricEffectContext<'_>) {
        if !ctx.is_drawable() {
            return;
        }
        let p = &self.base.params;
        let per_char = p.number("particlesPerChar").round().max(1.0) as usize;
        let spread = p.number("spread");
        let end = p.number("assembleEnd");
        let size = p.number("particleSize");
        let ease = Ease::from_name(p.choice("easing"));
        let layout = self.layer.layout(canvas, ctx);
        let (seed, cap) = (self.seed, self.pool_capacity);
        let half_h = ctx.font.size * 0.35;

        let swarm = self.swarm.get_or_insert_with(ctx.lyric_id(), || {
            let mut rng = FxRng::for_line(seed, ctx.lyric_id());
            let mut pool = ParticlePool::new(cap);
            let mut routes = Vec::new();
            for g in layout.glyphs.iter().filter(|g| !g.is_blank()) {
                for _ in 0..per_char {
                    let to = Point::new(g.x + rng.unit() * g.width, g.y + rng.signed() * half_h);
                    let a = rng.range(0.0, std::f64::consts::TAU);
                    let r = spread * rng.range(0.4, 1.0);
                    let from = to + Vec2::new(a.cos() * r, a.sin() * r);
                    let color = tint(ctx.color, ctx.frame.settings.glow_color, rng.unit() * 0.7);
                    let Some(part) = pool.acquire() else {
                        break;
                    };
                    part.respawn(from, Vec2::ZERO, size * rng.range(0.6, 1.4), color, 0.0);
                    routes.push(Route {
                        owner: g.index,
                        from,
                        to,
                        phase: rng.unit() * std::f64::consts::TAU,
                    });
                }
            }
            Swarm { routes, pool }
        });

        let timeline = StaggerTimeline::new(CHAR_STAGGER, end, layout.len());
        let progress = ctx.progress();
        let global = clamp01(progress / end.max(f64::EPSILON));
        let t = ctx.frame.time();

        for (part, route) in swarm.pool.active_mut().iter_mut().zip(&swarm.routes) {
            let local = timeline.local(route.owner, global);
            let e = ease.apply(local);
            let swirl = (1.0 - e) * SWIRL;
            let phase = t * 2.0 + route.phase;
            let wobble = Vec2::new(phase.cos(), phase.sin()) * swirl;
            let next = route.from.lerp(route.to, e) + wobble;
            part.trail.push(part.pos);
            part.pos = next;
            // Particles give way to the glyph once it has formed.
            part.life = 1.0 - smoothstep(0.8, 1.0, local);
        }

        for g in &layout.glyphs {
            let local = timeline.local(g.index, global);
            let style = CharStyle::default().with_opacity(smoothstep(0.6, 1.0, local));
            draw_glyph(canvas, ctx, g, &style, true);
        }
        for part in swarm.pool.active() {
            if part.life > 0.0 {
                draw_particle(canvas, part, 1.0);
            }
        }
    }
}

#[cfg(test)]
#[path = "../../../tests/unit/effects/physics/particle_assemble.rs"]
mod tests;
