//! Particle and fragment effects.
//!
//! Everything here integrates explicit Euler steps with the frame's clamped `delta_time`, so a
//! paused host (`delta_time == 0`) freezes the simulation instead of jumping it.

mod explode;
mod particle_assemble;
mod particle_burst;
mod scatter;
mod wind_dissolve;

pub use explode::{Explode, Fragment};
pub use particle_assemble::ParticleAssemble;
pub use particle_burst::ParticleBurst;
pub use scatter::Scatter;
pub use wind_dissolve::WindDissolve;

use kurbo::Shape as _;

use crate::canvas::Canvas2D;
use crate::foundation::core::{BezPath, Color, Point};
use crate::particle::Particle;

const CIRCLE_TOLERANCE: f64 = 0.1;

/// Fill a round particle, faded by its remaining life.
pub(crate) fn draw_particle(canvas: &mut dyn Canvas2D, p: &Particle, alpha: f64) {
    if p.size <= 0.0 || !p.size.is_finite() || !p.pos.x.is_finite() || !p.pos.y.is_finite() {
        return;
    }
    canvas.save();
    canvas.set_fill(p.color.fade(p.life * alpha));
    canvas.fill_path(&kurbo::Circle::new(p.pos, p.size).to_path(CIRCLE_TOLERANCE));
    canvas.restore();
}

/// Stroke the particle's trail from its oldest point to its current position.
pub(crate) fn draw_trail(canvas: &mut dyn Canvas2D, p: &Particle, alpha: f64) {
    if p.trail.len() < 2 {
        return;
    }
    let mut path = BezPath::new();
    for (i, pt) in p.trail.iter().chain(std::iter::once(p.pos)).enumerate() {
        if i == 0 {
            path.move_to(pt);
        } else {
            path.line_to(pt);
        }
    }
    canvas.save();
    canvas.set_stroke(p.color.fade(p.life * alpha * 0.4), (p.size * 0.6).max(0.5));
    canvas.stroke_path(&path);
    canvas.restore();
}

/// Radial direction at `angle` scaled to `speed`.
pub(crate) fn polar(angle: f64, speed: f64) -> kurbo::Vec2 {
    kurbo::Vec2::new(angle.cos() * speed, angle.sin() * speed)
}

/// Glyph centre as a point.
pub(crate) fn centre(g: &crate::glyph::GlyphPos) -> Point {
    Point::new(g.cx(), g.y)
}

/// Particle tint: the line color shifted towards the glow color.
pub(crate) fn tint(base: Color, glow: Color, k: f64) -> Color {
    base.lerp(glow, k)
}
