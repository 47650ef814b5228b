use kurbo::Shape as _;

use super::{draw_line, exit_param, feather_param, line_bounds, openness, reveal_param};
use crate::canvas::{Canvas2D, SoftMask};
use crate::config::EngineConfig;
use crate::effects::common::CharacterLayer;
use crate::effects::{
    Effect, EffectBase, EffectCategory, EffectMeta, LyricEffectContext, effect_accessors,
};
use crate::foundation::core::{Point, Rect};
use crate::params::ParamDef;

const PAD: f64 = 4.0;

/// Wipe direction of [`RectangleMask`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Wipe {
    /// Left edge towards the right.
    Right,
    /// Right edge towards the left.
    Left,
    /// Bottom edge upwards.
    Up,
    /// Top edge downwards.
    Down,
    /// Outwards from the vertical centre line.
    Center,
}

impl Wipe {
    fn from_name(name: &str) -> Self {
        match name {
            "left" => Self::Left,
            "up" => Self::Up,
            "down" => Self::Down,
            "center" => Self::Center,
            _ => Self::Right,
        }
    }

    /// Visible part of `b` at `open`.
    pub fn window(self, b: Rect, open: f64) -> Rect {
        let (w, h) = (b.width() * open, b.height() * open);
        match self {
            Self::Right => Rect::new(b.x0, b.y0, b.x0 + w, b.y1),
            Self::Left => Rect::new(b.x1 - w, b.y0, b.x1, b.y1),
            Self::Up => Rect::new(b.x0, b.y1 - h, b.x1, b.y1),
            Self::Down => Rect::new(b.x0, b.y0, b.x1, b.y0 + h),
            Self::Center => {
                let cx = b.center().x;
                Rect::new(cx - w / 2.0, b.y0, cx + w / 2.0, b.y1)
            }
        }
    }

    /// Leading edge of the wipe as a `(full, zero)` gradient pair over `feather` pixels.
    fn gradient(self, win: Rect, feather: f64) -> Option<(Point, Point)> {
        let cy = win.center().y;
        let cx = win.center().x;
        match self {
            Self::Right => Some((Point::new(win.x1 - feather, cy), Point::new(win.x1, cy))),
            Self::Left => Some((Point::new(win.x0 + feather, cy), Point::new(win.x0, cy))),
            Self::Up => Some((Point::new(cx, win.y0 + feather), Point::new(cx, win.y0))),
            Self::Down => Some((Point::new(cx, win.y1 - feather), Point::new(cx, win.y1))),
            Self::Center => None,
        }
    }
}

/// Directional wipe through a rectangular window.
pub struct RectangleMask {
    base: EffectBase,
    layer: CharacterLayer,
}

impl RectangleMask {
    /// Registry metadata.
    pub const META: EffectMeta = EffectMeta {
        id: "rectangle-mask",
        name: "Rectangle Mask",
        category: EffectCategory::Lyric,
        description: "Text is wiped in through a sliding rectangle",
        tags: &["mask", "reveal", "wipe"],
        params: &[
            reveal_param(0.4),
            exit_param(),
            feather_param(),
            ParamDef::choice(
                "direction",
                "Direction",
                "right",
                &["right", "left", "up", "down", "center"],
            ),
        ],
    };

    /// Unseeded instance.
    pub fn new(config: &EngineConfig) -> Self {
        Self {
            base: EffectBase::new(&Self::META),
            layer: CharacterLayer::new(config.glyph_cache_capacity),
        }
    }

    /// Configured wipe direction.
    pub fn direction(&self) -> Wipe {
        Wipe::from_name(self.base.params.choice("direction"))
    }
}

impl Effect for RectangleMask {
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
        let wipe = self.direction();
        let bounds = line_bounds(&layout, ctx).inflate(PAD, PAD);
        let win = wipe.window(bounds, open);

        canvas.save();
        canvas.clip(&win.to_path(0.1));
        if feather > 0.0 && open < 1.0 {
            if let Some((start, end)) = wipe.gradient(win, feather) {
                canvas.set_soft_mask(SoftMask::Linear { start, end });
            }
        }
        draw_line(canvas, ctx, &layout);
        canvas.restore();
    }
}

#[cfg(test)]
#[path = "../../../tests/unit/effects/mask/rectangle_mask.rs"]
mod tests;
