use std::f64::consts::{FRAC_PI_2, PI, TAU};

use smallvec::SmallVec;

use super::{draw_line, exit_param, line_bounds, openness, reveal_param};
use crate::canvas::{Canvas2D, SoftMask};
use crate::config::EngineConfig;
use crate::effects::common::CharacterLayer;
use crate::effects::{
    Effect, EffectBase, EffectCategory, EffectMeta, LyricEffectContext, effect_accessors,
};
use crate::foundation::core::{Affine, BezPath, Point};
use crate::params::ParamDef;

const STAR_INNER: f64 = 0.45;

/// Outline used by [`ShapeMask`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ShapeKind {
    /// Five-pointed star.
    Star,
    /// Square rotated by 45°.
    Diamond,
    /// Regular hexagon.
    Hexagon,
    /// Upward triangle.
    Triangle,
    /// Heart built from two cubic lobes.
    Heart,
}

impl ShapeKind {
    /// Option names accepted by the `shape` parameter.
    pub const NAMES: &'static [&'static str] = &["star", "diamond", "hexagon", "triangle", "heart"];

    /// Parse an option name, defaulting to [`ShapeKind::Star`].
    pub fn from_name(name: &str) -> Self {
        match name {
            "diamond" => Self::Diamond,
            "hexagon" => Self::Hexagon,
            "triangle" => Self::Triangle,
            "heart" => Self::Heart,
            _ => Self::Star,
        }
    }

    /// Closed outline of unit circumradius centred on the origin.
    pub fn unit_path(self) -> BezPath {
        match self {
            Self::Star => {
                let pts: SmallVec<[Point; 10]> = (0..10)
                    .map(|i| {
                        let r = if i % 2 == 0 { 1.0 } else { STAR_INNER };
                        let a = -FRAC_PI_2 + i as f64 * PI / 5.0;
                        Point::new(a.cos() * r, a.sin() * r)
                    })
                    .collect();
                polygon(&pts)
            }
            Self::Diamond => regular(4, -FRAC_PI_2),
            Self::Hexagon => regular(6, 0.0),
            Self::Triangle => regular(3, -FRAC_PI_2),
            Self::Heart => {
                let mut p = BezPath::new();
                p.move_to((0.0, 1.0));
                p.curve_to((-0.4, 0.7), (-1.1, 0.2), (-1.0, -0.35));
                p.curve_to((-0.9, -0.95), (-0.2, -1.0), (0.0, -0.5));
                p.curve_to((0.2, -1.0), (0.9, -0.95), (1.0, -0.35));
                p.curve_to((1.1, 0.2), (0.4, 0.7), (0.0, 1.0));
                p.close_path();
                p
            }
        }
    }
}

fn regular(n: usize, phase: f64) -> BezPath {
    let pts: SmallVec<[Point; 8]> = (0..n)
        .map(|i| {
            let a = phase + i as f64 * TAU / n as f64;
            Point::new(a.cos(), a.sin())
        })
        .collect();
    polygon(&pts)
}

fn polygon(pts: &[Point]) -> BezPath {
    let mut p = BezPath::new();
    for (i, pt) in pts.iter().enumerate() {
        if i == 0 {
            p.move_to(*pt);
        } else {
            p.line_to(*pt);
        }
    }
    p.close_path();
    p
}

/// The line is revealed through a growing, spinning shape.
pub struct ShapeMask {
    base: EffectBase,
    layer: CharacterLayer,
}

impl ShapeMask {
    /// Registry metadata.
    pub const META: EffectMeta = EffectMeta {
        id: "shape-mask",
        name: "Shape Mask",
        category: EffectCategory::Lyric,
        description: "Text shows through a star, heart or polygon that grows and spins",
        tags: &["mask", "reveal", "shape"],
        params: &[
            ParamDef::choice("shape", "Shape", "star", ShapeKind::NAMES),
            reveal_param(0.45),
            exit_param(),
            ParamDef::slider(
                "rotationSpeed",
                "Rotation Speed",
                30.0,
                -360.0,
                360.0,
                5.0,
                "°/s",
            ),
            ParamDef::choice("edge", "Edge", "hard", &["hard", "soft"]),
            ParamDef::slider("softness", "Softness", 0.3, 0.05, 1.0, 0.05, ""),
        ],
    };

    /// Unseeded instance.
    pub fn new(config: &EngineConfig) -> Self {
        Self {
            base: EffectBase::new(&Self::META),
            layer: CharacterLayer::new(config.glyph_cache_capacity),
        }
    }
}

impl Effect for ShapeMask {
    effect_accessors!();

    fn reset(&mut self) {
        self.layer.clear();
    }

    fn render_lyric(&mut self, canvas: &mut dyn Canvas2D, ctx: &LyricEffectContext<'_>) {
        if !ctx.is_drawable() {
            return;
        }
        let layout = self.layer.layout(canvas, ctx);
        let p = &self.base.params;
        let open = openness(p, ctx.progress());
        if open <= 0.0 {
            return;
        }
        let kind = ShapeKind::from_name(p.choice("shape"));
        let spin = p.number("rotationSpeed").to_radians() * ctx.line_time();
        let soft = p.choice("edge") == "soft";
        let softness = p.number("softness");

        let b = line_bounds(&layout, ctx);
        let centre = b.center();
        // Circumradius large enough for the inscribed part of the shape to cover the line.
        let radius = (b.width().hypot(b.height()) / 2.0) / STAR_INNER * open;

        canvas.save();
        if soft {
            let outer = radius * STAR_INNER;
            canvas.set_soft_mask(SoftMask::Radial {
                center: centre,
                inner: outer * (1.0 - softness),
                outer: outer.max(f64::EPSILON),
            });
        }
        let xf = Affine::translate(centre.to_vec2()) * Affine::rotate(spin) * Affine::scale(radius);
        let mut outline = kind.unit_path();
        outline.apply_affine(xf);
        canvas.clip(&outline);
        draw_line(canvas, ctx, &layout);
        canvas.restore();
    }
}

#[cfg(test)]
#[path = "../../../tests/unit/effects/mask/shape_mask.rs"]
mod tests;
