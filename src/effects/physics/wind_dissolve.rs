use super::{draw_particle, draw_trail, tint};
use crate::canvas::Canvas2D;
use crate::config::EngineConfig;
use crate::effects::common::{CharacterLayer, draw_glyph};
use crate::effects::{
    Effect, EffectBase, EffectCategory, EffectMeta, LineSlot, LyricEffectContext, effect_accessors,
};
use crate::foundation::core::{Point, Vec2};
use crate::foundation::math::{clamp01, noise2};
use crate::foundation::rng::FxRng;
use crate::glyph::CharStyle;
use crate::params::ParamDef;
use crate::particle::{Particle, ParticlePool};

const DRAG: f64 = 0.6;

#[derive(Clone, Debug)]
struct Dust {
    rng: FxRng,
    emitted: usize,
    pool: ParticlePool,
}

/// Text blows away as dust once the line passes `dissolveStart`.
pub struct WindDissolve {
    base: EffectBase,
    layer: CharacterLayer,
    seed: u64,
    pool_capacity: usize,
    dust: LineSlot<Dust>,
}

impl WindDissolve {
    /// Registry metadata.
    pub const META: EffectMeta = EffectMeta {
        id: "wind-dissolve",
        name: "Wind Dissolve",
        category: EffectCategory::Lyric,
        description: "Characters disintegrate into particles carried by the wind",
        tags: &["physics", "particle", "exit", "dissolve"],
        params: &[
            ParamDef::slider("dissolveStart", "Dissolve Start", 0.5, 0.0, 0.95, 0.05, ""),
            ParamDef::slider(
                "windStrength",
                "Wind Strength",
                220.0,
                0.0,
                800.0,
                10.0,
                "px/s",
            ),
            ParamDef::slider("windAngle", "Wind Angle", -15.0, -180.0, 180.0, 5.0, "°"),
            ParamDef::slider("turbulence", "Turbulence", 0.5, 0.0, 1.0, 0.05, ""),
            ParamDef::slider("density", "Density", 14.0, 1.0, 60.0, 1.0, "/char"),
            ParamDef::slider("particleSize", "Particle Size", 1.6, 0.5, 6.0, 0.1, "px"),
        ],
    };

    /// Unseeded instance.
    pub fn new(config: &EngineConfig) -> Self {
        Self {
            base: EffectBase::new(&Self::META),
            layer: CharacterLayer::new(config.glyph_cache_capacity),
            seed: config.seed,
            pool_capacity: config.particle_pool_capacity,
            dust: LineSlot::new(),
        }
    }

    /// Dissolve progress in `[0, 1]` for line progress `progress`.
    pub fn dissolve_progress(&self, progress: f64) -> f64 {
        let start = self.base.params.number("dissolveStart");
        if progress <= start {
            return 0.0;
        }
        clamp01((progress - start) / (1.0 - start).max(f64::EPSILON))
    }

    /// Opacity of the remaining text at line progress `progress`.
    pub fn text_opacity(&self, progress: f64) -> f64 {
        1.0 - self.dissolve_progress(progress)
    }

    /// Live dust particles of `lyric_id`.
    pub fn particles(&self, lyric_id: &str) -> &[Particle] {
        self.dust
            .get(lyric_id)
            .map(|d| d.pool.active())
            .unwrap_or_default()
    }
}

impl Effect for WindDissolve {
    effect_accessors!();

    fn reset(&mut self) {
        self.layer.clear();
        self.dust.clear();
    }

    fn render_lyric(&mut self, canvas: &mut dyn Canvas2D, ctx: &LyricEffectContext<'_>) {
        if !ctx.is_drawable() {
            return;
        }
        let d = self.dissolve_progress(ctx.progress());
        let opacity = 1.0 - d;
        let layout = self.layer.layout(canvas, ctx);

        if d <= 0.0 {
            for g in &layout.glyphs {
                draw_glyph(canvas, ctx, g, &CharStyle::default(), true);
            }
            return;
        }

        let p = &self.base.params;
        let strength = p.number("windStrength");
        let angle = p.number("windAngle").to_radians();
        let turbulence = p.number("turbulence");
        let density = p.number("density");
        let size = p.number("particleSize");
        let wind = Vec2::new(angle.cos(), angle.sin()) * strength;
        let dt = ctx.frame.dt();
        let t = ctx.frame.time();
        let (seed, cap) = (self.seed, self.pool_capacity);

        let dust = self.dust.get_or_insert_with(ctx.lyric_id(), || Dust {
            rng: FxRng::for_line(seed, ctx.lyric_id()),
            emitted: 0,
            pool: ParticlePool::new(cap),
        });

        let solid: Vec<_> = layout.glyphs.iter().filter(|g| !g.is_blank()).collect();
        let target = (d * density * solid.len() as f64).ceil() as usize;
        while dust.emitted < target && !solid.is_empty() {
            let g = solid[dust.rng.index(solid.len())];
            let h = ctx.font.size * 0.35;
            let pos = Point::new(
                g.x + dust.rng.unit() * g.width,
                g.y + dust.rng.signed() * h,
            );
            let vel = wind * dust.rng.range(0.2, 0.6) + Vec2::new(0.0, dust.rng.signed() * 30.0);
            let color = tint(
                ctx.color,
                ctx.frame.settings.glow_color,
                dust.rng.unit() * 0.5,
            );
            let r = size * dust.rng.range(0.6, 1.4);
            let decay = dust.rng.range(0.5, 1.1);
            dust.emitted += 1;
            match dust.pool.acquire() {
                Some(slot) => slot.respawn(pos, vel, r, color, decay),
                None => break,
            }
        }

        for (i, part) in dust.pool.active_mut().iter_mut().enumerate() {
            let gust = Vec2::new(
                noise2(seed, part.pos.x * 0.01, t + i as f64 * 0.1),
                noise2(seed ^ 7, part.pos.y * 0.01, t),
            ) * strength * turbulence * 2.0;
            part.integrate(dt, wind + gust, DRAG);
        }
        dust.pool.retain_alive(Particle::is_dead);

        for g in &layout.glyphs {
            // Characters lean downwind as they thin out.
            let drift = wind * (d * d * 0.15);
            let style = CharStyle::default()
                .with_offset(drift.x, drift.y)
                .with_opacity(opacity);
            draw_glyph(canvas, ctx, g, &style, false);
        }
        for part in dust.pool.active() {
            draw_trail(canvas, part, 1.0);
            draw_particle(canvas, part, 1.0);
        }
    }
}

#[cfg(test)]
#[path = "../../../tests/unit/effects/physics/wind_dissolve.rs"]
mod tests;
