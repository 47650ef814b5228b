use crate::canvas::Canvas2D;
use crate::config::EngineConfig;
use crate::effects::common::{CharacterLayer, draw_glyph};
use crate::effects::{
    Effect, EffectBase, EffectCategory, EffectMeta, LineSlot, LyricEffectContext, effect_accessors,
};
use crate::foundation::core::{Point, Vec2};
use crate::foundation::math::{clamp01, safe_div};
use crate::glyph::{CharStyle, GlyphPos};
use crate::params::ParamDef;
use crate::particle::TrailBuffer;

const HISTORY: usize = 8;
const SWAY_HZ: f64 = 0.8;
const MAX_SPEED: f64 = 2000.0;

/// Per-character motion memory.
#[derive(Clone, Debug)]
struct Tracker {
    prev: Option<Point>,
    velocity: Vec2,
    history: TrailBuffer<Point>,
}

impl Tracker {
    fn new() -> Self {
        Self {
            prev: None,
            velocity: Vec2::ZERO,
            history: TrailBuffer::new(HISTORY),
        }
    }

    fn observe(&mut self, pos: Point, dt: f64) {
        if let Some(prev) = self.prev {
            if dt > 0.0 {
                let v = (pos - prev) / dt;
                self.velocity = if v.hypot() > MAX_SPEED {
                    v.normalize() * MAX_SPEED
                } else {
                    v
                };
                self.history.push(prev);
            }
        }
        self.prev = Some(pos);
    }
}

/// Characters sway with the music and leave motion copies proportional to their velocity.
pub struct MotionBlur {
    base: EffectBase,
    layer: CharacterLayer,
    trackers: LineSlot<Vec<Tracker>>,
}

impl MotionBlur {
    /// Registry metadata.
    pub const META: EffectMeta = EffectMeta {
        id: "motion-blur",
        name: "Motion Blur",
        category: EffectCategory::Lyric,
        description: "Velocity-scaled trails, stretches, echoes or smears behind moving characters",
        tags: &["motion", "character", "blur", "audio"],
        params: &[
            ParamDef::choice(
                "mode",
                "Mode",
                "trail",
                &["trail", "stretch", "echo", "smear"],
            ),
            ParamDef::slider("intensity", "Intensity", 0.6, 0.0, 1.0, 0.05, ""),
            ParamDef::slider("copies", "Copies", 5.0, 1.0, 8.0, 1.0, ""),
            ParamDef::slider("motionAmount", "Motion Amount", 30.0, 0.0, 120.0, 1.0, "px"),
        ],
    };

    /// Unseeded instance.
    pub fn new(config: &EngineConfig) -> Self {
        Self {
            base: EffectBase::new(&Self::META),
            layer: CharacterLayer::new(config.glyph_cache_capacity),
            trackers: LineSlot::new(),
        }
    }

    /// Last finite-difference velocity of character `index` on `lyric_id`.
    pub fn velocity(&self, lyric_id: &str, index: usize) -> Option<Vec2> {
        self.trackers
            .get(lyric_id)
            .and_then(|t| t.get(index))
            .map(|t| t.velocity)
    }

    fn displacement(&self, g: &GlyphPos, t: f64, energy: f64) -> Vec2 {
        let amount = self.base.params.number("motionAmount") * (0.5 + energy);
        let phase = std::f64::consts::TAU * SWAY_HZ * t + g.index as f64 * 0.35;
        Vec2::new(phase.sin() * amount, (phase * 0.5).cos() * amount * 0.25)
    }
}

impl Effect for MotionBlur {
    effect_accessors!();

    fn reset(&mut self) {
        self.layer.clear();
        self.trackers.clear();
    }

    fn render_lyric(&mut self, canvas: &mut dyn Canvas2D, ctx: &LyricEffectContext<'_>) {
        if !ctx.is_drawable() {
            return;
        }
        let layout = self.layer.layout(canvas, ctx);
        let t = ctx.frame.time();
        let dt = ctx.frame.dt();
        let energy = clamp01(ctx.frame.bass());
        let offsets: Vec<Vec2> = layout
            .glyphs
            .iter()
            .map(|g| self.displacement(g, t, energy))
            .collect();

        let p = &self.base.params;
        let mode = p.choice("mode").to_owned();
        let intensity = p.number("intensity");
        let copies = p.number("copies").round().max(1.0) as usize;

        let trackers = self
            .trackers
            .get_or_insert_with(ctx.lyric_id(), || vec![Tracker::new(); layout.len()]);
        trackers.resize_with(layout.len(), Tracker::new);

        for ((g, off), tracker) in layout.glyphs.iter().zip(&offsets).zip(trackers.iter_mut()) {
            let pos = Point::new(g.cx() + off.x, g.y + off.y);
            tracker.observe(pos, dt);
            let v = tracker.velocity;
            let speed = v.hypot();
            let dir = if speed > 0.0 { v / speed } else { Vec2::ZERO };
            // Pixels of blur per frame at 60 fps.
            let reach = speed / 60.0 * intensity * 4.0;

            match mode.as_str() {
                "stretch" => {
                    let stretch = 1.0 + clamp01(safe_div(reach, g.width.max(1.0) * 4.0, 0.0));
                    let mut style = CharStyle::default().with_offset(off.x, off.y);
                    style.rotation = dir.y.atan2(dir.x);
                    style.scale_x = stretch;
                    style.scale_y = 1.0 / stretch.sqrt();
                    // Stretch along the motion axis, then undo the rotation on the glyph.
                    draw_stretched(canvas, ctx, g, &style);
                }
                "echo" => {
                    for (k, past) in tracker.history.iter().enumerate() {
                        let age = (k + 1) as f64 / (HISTORY + 1) as f64;
                        let style = CharStyle::default()
                            .with_offset(past.x - g.cx(), past.y - g.y)
                            .with_opacity(intensity * age * 0.5);
                        draw_glyph(canvas, ctx, g, &style, false);
                    }
                }
                "smear" => {
                    for k in (1..=copies * 2).rev() {
                        let f = k as f64 / (copies * 2) as f64;
                        let style = CharStyle::default()
                            .with_offset(off.x - dir.x * reach * f, off.y - dir.y * reach * f)
                            .with_opacity(intensity * 0.15);
                        draw_glyph(canvas, ctx, g, &style, false);
                    }
                }
                _ => {
                    for k in (1..=copies).rev() {
                        let f = k as f64 / copies as f64;
                        let style = CharStyle::default()
                            .with_offset(off.x - dir.x * reach * f, off.y - dir.y * reach * f)
                            .with_opacity(intensity * (1.0 - f) * 0.6);
                        draw_glyph(canvas, ctx, g, &style, false);
                    }
                }
            }

            if mode != "stretch" {
                let style = CharStyle::default().with_offset(off.x, off.y);
                draw_glyph(canvas, ctx, g, &style, true);
            }
        }
    }
}

fn draw_stretched(
    canvas: &mut dyn Canvas2D,
    ctx: &LyricEffectContext<'_>,
    g: &GlyphPos,
    style: &CharStyle,
) {
    canvas.save();
    canvas.translate(g.cx() + style.offset.x, g.y + style.offset.y);
    canvas.rotate(style.rotation);
    canvas.scale(style.scale_x, style.scale_y);
    canvas.rotate(-style.rotation);
    let local = GlyphPos {
        x: -g.width / 2.0,
        y: 0.0,
        ..g.clone()
    };
    draw_glyph(canvas, ctx, &local, &CharStyle::default(), true);
    canvas.restore();
}

#[cfg(test)]
#[path = "../../../tests/unit/effects/motion/motion_blur.rs"]
mod tests;
