use super::{centre, draw_particle, polar, tint};
use crate::canvas::Canvas2D;
use crate::config::EngineConfig;
use crate::effects::common::{CharacterLayer, draw_glyph};
use crate::effects::{
    Effect, EffectBase, EffectCategory, EffectMeta, LineSlot, LyricEffectContext, effect_accessors,
};
use crate::foundation::core::{Point, Vec2};
use crate::foundation::math::noise1;
use crate::foundation::rng::FxRng;
use crate::glyph::{CharStyle, GlyphPos};
use crate::params::ParamDef;
use crate::particle::ParticlePool;

const SHAKE_HZ: f64 = 18.0;
const FRAGMENT_DRAG: f64 = 0.4;

/// One character flying apart after the trigger.
#[derive(Clone, Debug, PartialEq)]
pub struct Fragment {
    /// Source character index.
    pub index: usize,
    /// Centre position.
    pub pos: Point,
    /// Velocity in px/s.
    pub vel: Vec2,
    /// Rotation in radians.
    pub rotation: f64,
    /// Angular velocity in rad/s.
    pub spin: f64,
    /// Opacity, only ever decreasing.
    pub opacity: f64,
}

#[derive(Clone, Debug)]
struct Blast {
    rng: FxRng,
    triggered: u32,
    fragments: Vec<Fragment>,
    sparks: ParticlePool,
}

/// Text shakes with building tension, then bursts into falling fragments at `triggerPoint`.
pub struct Explode {
    base: EffectBase,
    layer: CharacterLayer,
    seed: u64,
    pool_capacity: usize,
    blast: LineSlot<Blast>,
}

impl Explode {
    /// Registry metadata.
    pub const META: EffectMeta = EffectMeta {
        id: "explode",
        name: "Explode",
        category: EffectCategory::Lyric,
        description: "Characters shake, then explode into fragments that fall under gravity",
        tags: &["physics", "particle", "character", "exit"],
        params: &[
            ParamDef::slider("triggerPoint", "Trigger Point", 0.7, 0.0, 1.0, 0.05, ""),
            ParamDef::slider("force", "Force", 450.0, 50.0, 1500.0, 10.0, "px/s"),
            ParamDef::slider("gravity", "Gravity", 900.0, 0.0, 3000.0, 10.0, "px/s²"),
            ParamDef::slider("shake", "Shake", 3.0, 0.0, 20.0, 0.5, "px"),
            ParamDef::slider("fadeRate", "Fade Rate", 0.8, 0.1, 4.0, 0.1, "/s"),
            ParamDef::slider("sparks", "Sparks", 6.0, 0.0, 30.0, 1.0, ""),
        ],
    };

    /// Unseeded instance.
    pub fn new(config: &EngineConfig) -> Self {
        Self {
            base: EffectBase::new(&Self::META),
            layer: CharacterLayer::new(config.glyph_cache_capacity),
            seed: config.seed,
            pool_capacity: config.particle_pool_capacity,
            blast: LineSlot::new(),
        }
    }

    /// Live fragments of `lyric_id`.
    pub fn fragments(&self, lyric_id: &str) -> &[Fragment] {
        self.blast
            .get(lyric_id)
            .map(|b| b.fragments.as_slice())
            .unwrap_or_default()
    }

    /// How many times `lyric_id` has detonated since the last reset.
    pub fn trigger_count(&self, lyric_id: &str) -> u32 {
        self.blast.get(lyric_id).map_or(0, |b| b.triggered)
    }

    fn detonate(
        blast: &mut Blast,
        glyphs: &[GlyphPos],
        force: f64,
        sparks: usize,
        ctx: &LyricEffectContext<'_>,
    ) {
        blast.triggered += 1;
        let origin_x = glyphs.iter().map(GlyphPos::cx).sum::<f64>() / glyphs.len().max(1) as f64;
        for g in glyphs.iter().filter(|g| !g.is_blank()) {
            let c = centre(g);
            // Push away from the line centre with an upward bias.
            let outward = (c.x - origin_x).signum();
            let angle = -std::f64::consts::FRAC_PI_2 + outward * blast.rng.range(0.2, 1.2);
            let speed = force * blast.rng.range(0.6, 1.2);
            blast.fragments.push(Fragment {
                index: g.index,
                pos: c,
                vel: polar(angle, speed),
                rotation: 0.0,
                spin: blast.rng.signed() * 8.0,
                opacity: 1.0,
            });
            for _ in 0..sparks {
                let a = blast.rng.range(0.0, std::f64::consts::TAU);
                let v = polar(a, force * blast.rng.range(0.3, 1.0));
                let size = blast.rng.range(1.0, 3.0);
                let decay = blast.rng.range(0.8, 1.6);
                let color = tint(ctx.color, ctx.frame.settings.glow_color, blast.rng.unit());
                if let Some(p) = blast.sparks.acquire() {
                    p.respawn(c, v, size, color, decay);
                }
            }
        }
    }

    fn step(blast: &mut Blast, dt: f64, gravity: f64, fade: f64) {
        let g = Vec2::new(0.0, gravity);
        for f in &mut blast.fragments {
            f.vel += g * dt;
            f.vel *= (1.0 - FRAGMENT_DRAG * dt).max(0.0);
            f.pos += f.vel * dt;
            f.rotation += f.spin * dt;
            f.opacity = (f.opacity - fade * dt).max(0.0);
        }
        blast.fragments.retain(|f| f.opacity > 0.0);
        for p in blast.sparks.active_mut() {
            p.integrate(dt, g, FRAGMENT_DRAG);
        }
        blast.sparks.retain_alive(|p| p.is_dead());
    }
}

impl Effect for Explode {
    effect_accessors!();

    fn reset(&mut self) {
        self.layer.clear();
        self.blast.clear();
    }

    fn render_lyric(&mut self, canvas: &mut dyn Canvas2D, ctx: &LyricEffectContext<'_>) {
        if !ctx.is_drawable() {
            return;
        }
        let p = &self.base.params;
        let trigger = p.number("triggerPoint");
        let force = p.number("force");
        let gravity = p.number("gravity");
        let shake = p.number("shake");
        let fade = p.number("fadeRate");
        let sparks = p.number("sparks").round().max(0.0) as usize;
        let progress = ctx.progress();
        let layout = self.layer.layout(canvas, ctx);

        let (seed, cap) = (self.seed, self.pool_capacity);
        let blast = self.blast.get_or_insert_with(ctx.lyric_id(), || Blast {
            rng: FxRng::for_line(seed, ctx.lyric_id()),
            triggered: 0,
            fragments: Vec::new(),
            sparks: ParticlePool::new(cap),
        });

        if progress < trigger {
            let tension = if trigger > 0.0 {
                progress / trigger
            } else {
                1.0
            };
            let t = ctx.frame.time() * SHAKE_HZ;
            for g in &layout.glyphs {
                let k = g.index as f64 * 7.31;
                let style = CharStyle::default().with_offset(
                    noise1(seed, t + k) * shake * tension,
                    noise1(seed ^ 1, t + k) * shake * tension,
                );
                draw_glyph(canvas, ctx, g, &style, true);
            }
            return;
        }

        if blast.triggered == 0 {
            Self::detonate(blast, &layout.glyphs, force, sparks, ctx);
        } else {
            Self::step(blast, ctx.frame.dt(), gravity, fade);
        }

        for p in blast.sparks.active() {
            draw_particle(canvas, p, 1.0);
        }
        for f in &blast.fragments {
            let Some(g) = layout.glyphs.get(f.index) else {
                continue;
            };
            let style = CharStyle::default()
                .with_offset(f.pos.x - g.cx(), f.pos.y - g.y)
                .with_rotation(f.rotation)
                .with_opacity(f.opacity);
            draw_glyph(canvas, ctx, g, &style, true);
        }
    }
}

#[cfg(test)]
#[path = "../../../tests/unit/effects/physics/explode.rs"]
mod tests;
