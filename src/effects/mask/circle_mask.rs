use kurbo::Shape as _;

use super::{draw_line, exit_param, feather_param, line_bounds, openness, reveal_param};
use crate::canvas::{Canvas2D, SoftMask};
use crate::config::EngineConfig;
use crate::effects::common::CharacterLayer;
use crate::effects::{
    Effect, EffectBase, EffectCategory, EffectMeta, LyricEffectContext, effect_accessors,
};
use crate::foundation::core::Point;
use crate::params::ParamDef;

/// Iris reveal: the line shows through a growing circle.
pub struct CircleMask {
    base: EffectBase,
    layer: CharacterLayer,
}

impl CircleMask {
    /// Registry metadata.
    pub const META: EffectMeta = EffectMeta {
        id: "circle-mask",
        name: "Circle Mask",
        category: EffectCategory::Lyric,
        description: "Text is revealed through an expanding circle",
        tags: &["mask", "reveal", "audio"],
        params: &[
            reveal_param(0.35),
            exit_param(),
            feather_param(),
            ParamDef::slider("pulse", "Bass Pulse", 0.15, 0.0, 1.0, 0.05, ""),
            ParamDef::choice("origin", "Origin", "center", &["center", "left", "right"]),
        ],
    };

    /// Unseeded instance.
    pub fn new(config: &EngineConfig) -> Self {
        Self {
            base: EffectBase::new(&Self::META),
            layer: CharacterLayer::new(config.glyph_cache_capacity),
        }
    }

    /// Circle centre and radius for a line with `bounds` at `openness`.
    pub fn circle(&self, bounds: kurbo::Rect, openness: f64, bass: f64) -> (Point, f64) {
        let p = &self.base.params;
        let c = match p.choice("origin") {
            "left" => Point::new(bounds.x0, bounds.center().y),
            "right" => Point::new(bounds.x1, bounds.center().y),
            _ => bounds.center(),
        };
        // Farthest corner from the origin.
        let reach = [
            Point::new(bounds.x0, bounds.y0),
            Point::new(bounds.x1, bounds.y0),
            Point::new(bounds.x0, bounds.y1),
            Point::new(bounds.x1, bounds.y1),
        ]
        .iter()
        .map(|q| (*q - c).hypot())
        .fold(0.0, f64::max);
        let pulse = 1.0 + p.number("pulse") * bass;
        (c, reach * openness * pulse)
    }
}

impl Effect for CircleMask {
    effect_accessors!();

    fn reset(&mut self) {
        self.layer.clear();
    }

    fn render_lyric(&mut self, canvas: &mut dyn Canvas2D, ctx: &LyricEffectContext<'_>) {
        if !ctx.is_drawable() {
            return;
        }
        let layout = self.layer.layout(canvas, ctx);
        let open = openness(&self.base.params, ctx.progress());
        if open <= 0.0 {
            return;
        }
        let feather = self.base.params.number("feather");
        let (centre, radius) = self.circle(line_bounds(&layout, ctx), open, ctx.frame.bass());

        canvas.save();
        if feather > 0.0 {
            canvas.set_soft_mask(SoftMask::Radial {
                center: centre,
                inner: (radius - feather).max(0.0),
                outer: radius.max(f64::EPSILON),
            });
        } else {
            canvas.clip(&kurbo::Circle::new(centre, radius).to_path(0.1));
        }
        draw_line(canvas, ctx, &layout);
        canvas.restore();
    }
}

#[cfg(test)]
#[path = "../../../tests/unit/effects/mask/circle_mask.rs"]
mod tests;
