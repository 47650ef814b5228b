use crate::canvas::Canvas2D;
use crate::config::EngineConfig;
use crate::effects::physics::{draw_particle, draw_trail, polar};
use crate::effects::{
    Effect, EffectBase, EffectCategory, EffectContext, EffectMeta, effect_accessors,
};
use crate::foundation::core::{Color, Point, Vec2};
use crate::foundation::math::noise2;
use crate::foundation::rng::FxRng;
use crate::params::ParamDef;
use crate::particle::{Particle, ParticlePool};

const FIELD_KEY: &str = "particle-field";
const FLOW_SCALE: f64 = 0.004;
const BURST_DECAY: f64 = 0.9;

/// Drifting dust that follows a noise flow field and bursts on beats.
pub struct ParticleField {
    base: EffectBase,
    seed: u64,
    pool: ParticlePool,
    rng: FxRng,
    size: (f64, f64),
    was_beat: bool,
}

impl ParticleField {
    /// Registry metadata.
    pub const META: EffectMeta = EffectMeta {
        id: "particle-field",
        name: "Particle Field",
        category: EffectCategory::Background,
        description: "Audio-reactive particles drift across the background and burst on beats",
        tags: &["background", "particle", "audio", "beat"],
        params: &[
            ParamDef::slider("count", "Count", 150.0, 0.0, 1000.0, 10.0, ""),
            ParamDef::slider("speed", "Speed", 30.0, 0.0, 300.0, 5.0, "px/s"),
            ParamDef::slider("particleSize", "Particle Size", 1.8, 0.5, 8.0, 0.1, "px"),
            ParamDef::slider("burstSize", "Burst Size", 40.0, 0.0, 300.0, 5.0, ""),
            ParamDef::choice(
                "colorSource",
                "Color",
                "palette",
                &["palette", "glow", "text"],
            ),
            ParamDef::toggle("trails", "Trails", true),
        ],
    };

    /// Empty field; particles are seeded on the first frame.
    pub fn new(config: &EngineConfig) -> Self {
        Self {
            base: EffectBase::new(&Self::META),
            seed: config.seed,
            pool: ParticlePool::new(config.particle_pool_capacity),
            rng: FxRng::for_line(config.seed, FIELD_KEY),
            size: (0.0, 0.0),
            was_beat: false,
        }
    }

    /// Live particles.
    pub fn particles(&self) -> &[Particle] {
        self.pool.active()
    }

    fn color(&mut self, ctx: &EffectContext<'_>) -> Color {
        let k = self.rng.unit();
        match self.base.params.choice("colorSource") {
            "glow" => ctx.settings.glow_color,
            "text" => ctx.settings.text_color,
            _ => ctx.palette.primary.lerp(ctx.palette.accent, k),
        }
    }

    fn spawn_ambient(&mut self, ctx: &EffectContext<'_>, n: usize) {
        let size = self.base.params.number("particleSize");
        for _ in 0..n {
            let pos = Point::new(self.rng.unit() * ctx.width, self.rng.unit() * ctx.height);
            let r = size * self.rng.range(0.5, 1.5);
            let color = self.color(ctx).fade(self.rng.range(0.3, 0.9));
            let Some(p) = self.pool.acquire() else {
                return;
            };
            p.respawn(pos, Vec2::ZERO, r, color, 0.0);
        }
    }

    fn burst(&mut self, ctx: &EffectContext<'_>, n: usize, strength: f64) {
        let size = self.base.params.number("particleSize");
        let centre = Point::new(ctx.width / 2.0, ctx.height / 2.0);
        for _ in 0..n {
            let a = self.rng.range(0.0, std::f64::consts::TAU);
            let v = polar(a, 200.0 * (0.5 + strength) * self.rng.range(0.5, 1.0));
            let r = size * self.rng.range(0.8, 2.0);
            let color = self.color(ctx);
            let decay = BURST_DECAY * self.rng.range(0.8, 1.2);
            let Some(p) = self.pool.acquire() else {
                return;
            };
            p.respawn(centre, v, r, color, decay);
        }
    }
}

impl Effect for ParticleField {
    effect_accessors!();

    fn reset(&mut self) {
        self.pool.clear();
        self.rng = FxRng::for_line(self.seed, FIELD_KEY);
        self.size = (0.0, 0.0);
        self.was_beat = false;
    }

    fn render(&mut self, canvas: &mut dyn Canvas2D, ctx: &EffectContext<'_>) {
        if !ctx.has_area() {
            return;
        }
        if self.size != (ctx.width, ctx.height) {
            self.pool.clear();
            self.size = (ctx.width, ctx.height);
        }

        let p = &self.base.params;
        let target = p.number("count").round().max(0.0) as usize;
        let speed = p.number("speed") * (1.0 + ctx.mid());
        let burst_n = p.number("burstSize").round().max(0.0) as usize;
        let trails = p.flag("trails");

        let ambient = self.pool.active().iter().filter(|q| q.decay == 0.0).count();
        if ambient < target {
            self.spawn_ambient(ctx, target - ambient);
        }
        let beat = ctx.beat() > 0.0;
        if beat && !self.was_beat && burst_n > 0 {
            self.burst(ctx, burst_n, ctx.beat());
        }
        self.was_beat = beat;

        let dt = ctx.dt();
        let t = ctx.time();
        let (w, h) = (ctx.width, ctx.height);
        for part in self.pool.active_mut() {
            let (fx, fy) = (part.pos.x * FLOW_SCALE, part.pos.y * FLOW_SCALE + t * 0.1);
            let angle = noise2(self.seed, fx, fy) * std::f64::consts::PI;
            if part.decay == 0.0 {
                part.vel = polar(angle, speed);
            }
            part.integrate(dt, Vec2::ZERO, if part.decay == 0.0 { 0.0 } else { 1.5 });
            let outside = !(0.0..w).contains(&part.pos.x) || !(0.0..h).contains(&part.pos.y);
            if part.decay == 0.0 && outside {
                part.pos = Point::new(wrap(part.pos.x, w), wrap(part.pos.y, h));
                part.trail.clear();
            }
        }
        self.pool.retain_alive(Particle::is_dead);

        let alpha = (0.6 + 0.4 * ctx.bass()).min(1.0);
        for part in self.pool.active() {
            if trails {
                draw_trail(canvas, part, alpha);
            }
            draw_particle(canvas, part, alpha);
        }
    }
}

fn wrap(v: f64, len: f64) -> f64 {
    let r = v.rem_euclid(len);
    if r.is_finite() && r < len { r } else { 0.0 }
}

#[cfg(test)]
#[path = "../../../tests/unit/effects/background/particle_field.rs"]
mod tests;
