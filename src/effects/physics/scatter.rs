use super::centre;
use crate::canvas::Canvas2D;
use crate::config::EngineConfig;
use crate::effects::common::{CharacterLayer, draw_glyph};
use crate::effects::{
    Effect, EffectBase, EffectCategory, EffectMeta, LineSlot, LyricEffectContext, effect_accessors,
};
use crate::foundation::core::{Point, Vec2};
use crate::foundation::math::clamp01;
use crate::foundation::rng::FxRng;
use crate::glyph::CharStyle;
use crate::params::ParamDef;

/// Longest spring integration step in seconds.
const SPRING_STEP: f64 = 1.0 / 120.0;
const MAX_SPRING_STEPS: f64 = 64.0;

/// Spring state of one character.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Body {
    /// Offset from the resting position.
    pub offset: Vec2,
    /// Velocity in px/s.
    pub vel: Vec2,
    /// Rotation in radians.
    pub angle: f64,
    /// Angular velocity.
    pub spin: f64,
}

#[derive(Clone, Debug)]
struct ScatterState {
    rng: FxRng,
    bodies: Vec<Body>,
    released: bool,
}

/// Characters spring in from random positions and are flung away again near the end.
pub struct Scatter {
    base: EffectBase,
    layer: CharacterLayer,
    seed: u64,
    state: LineSlot<ScatterState>,
}

impl Scatter {
    /// Registry metadata.
    pub const META: EffectMeta = EffectMeta {
        id: "scatter",
        name: "Scatter",
        category: EffectCategory::Lyric,
        description: "Characters gather on springs from scattered positions, then scatter away",
        tags: &["physics", "character", "entrance", "exit"],
        params: &[
            ParamDef::slider("spread", "Spread", 260.0, 0.0, 800.0, 10.0, "px"),
            ParamDef::slider("stiffness", "Stiffness", 80.0, 5.0, 400.0, 5.0, ""),
            ParamDef::slider("damping", "Damping", 9.0, 0.0, 40.0, 0.5, ""),
            ParamDef::slider("exitPoint", "Exit Point", 0.85, 0.5, 1.0, 0.05, ""),
            ParamDef::slider("exitForce", "Exit Force", 500.0, 0.0, 2000.0, 10.0, "px/s"),
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

    /// Spring bodies of `lyric_id`.
    pub fn bodies(&self, lyric_id: &str) -> &[Body] {
        self.state
            .get(lyric_id)
            .map(|s| s.bodies.as_slice())
            .unwrap_or_default()
    }
}

impl Effect for Scatter {
    effect_accessors!();

    fn reset(&mut self) {
        self.layer.clear();
        self.state.clear();
    }

    fn render_lyric(&mut self, canvas: &mut dyn Canvas2D, ctx: &LyricEffectContext<'_>) {
        if !ctx.is_drawable() {
            return;
        }
        let p = &self.base.params;
        let spread = p.number("spread");
        let k = p.number("stiffness");
        let c = p.number("damping");
        let exit_at = p.number("exitPoint");
        let exit_force = p.number("exitForce");
        let layout = self.layer.layout(canvas, ctx);
        let n = layout.len();
        let seed = self.seed;

        let st = self.state.get_or_insert_with(ctx.lyric_id(), || {
            let mut rng = FxRng::for_line(seed, ctx.lyric_id());
            let bodies = (0..n)
                .map(|_| Body {
                    offset: Vec2::new(rng.signed() * spread, rng.signed() * spread * 0.6),
                    vel: Vec2::ZERO,
                    angle: rng.signed() * std::f64::consts::PI,
                    spin: 0.0,
                })
                .collect();
            ScatterState {
                rng,
                bodies,
                released: false,
            }
        });
        st.bodies.resize(
            n,
            Body {
                offset: Vec2::ZERO,
                vel: Vec2::ZERO,
                angle: 0.0,
                spin: 0.0,
            },
        );

        let progress = ctx.progress();
        if progress >= exit_at && !st.released {
            st.released = true;
            let mid = layout.left() + layout.total_width / 2.0;
            for (b, g) in st.bodies.iter_mut().zip(&layout.glyphs) {
                let away = (centre(g) - Point::new(mid, g.y)).normalize();
                let away = if away.is_finite() {
                    away
                } else {
                    Vec2::new(0.0, -1.0)
                };
                let jitter = Vec2::new(st.rng.signed(), st.rng.signed()) * 0.5;
                b.vel += (away + jitter) * exit_force;
                b.spin = st.rng.signed() * 6.0;
            }
        }

        let dt = ctx.frame.dt();
        if st.released {
            for b in &mut st.bodies {
                b.offset += b.vel * dt;
                b.angle += b.spin * dt;
            }
        } else {
            // Damped spring towards rest, semi-implicit Euler in fixed sub-steps.
            let steps = (dt / SPRING_STEP).ceil().clamp(1.0, MAX_SPRING_STEPS) as usize;
            let h = dt / steps as f64;
            for b in &mut st.bodies {
                for _ in 0..steps {
                    b.vel += (-b.offset * k - b.vel * c) * h;
                    b.offset += b.vel * h;
                    b.spin += (-b.angle * k - b.spin * c) * h;
                    b.angle += b.spin * h;
                }
            }
        }

        let fade = if st.released {
            1.0 - clamp01((progress - exit_at) / (1.0 - exit_at).max(f64::EPSILON))
        } else {
            1.0
        };
        for (g, b) in layout.glyphs.iter().zip(&st.bodies) {
            let settle = 1.0 - clamp01(b.offset.hypot() / spread.max(1.0));
            let style = CharStyle::default()
                .with_offset(b.offset.x, b.offset.y)
                .with_rotation(b.angle)
                .with_opacity((0.3 + 0.7 * settle) * fade);
            draw_glyph(canvas, ctx, g, &style, true);
        }
    }
}

#[cfg(test)]
#[path = "../../../tests/unit/effects/physics/scatter.rs"]
mod tests;
