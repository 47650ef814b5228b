//! Reveal the line through an animated clip region or soft alpha mask.

mod circle_mask;
mod rectangle_mask;
mod shape_mask;
mod text_path;

pub use circle_mask::CircleMask;
pub use rectangle_mask::{RectangleMask, Wipe};
pub use shape_mask::{ShapeKind, ShapeMask};
pub use text_path::TextPath;

use crate::animation::ease::Ease;
use crate::canvas::Canvas2D;
use crate::effects::LyricEffectContext;
use crate::effects::common::draw_glyph;
use crate::foundation::core::Rect;
use crate::foundation::math::clamp01;
use crate::glyph::{CharStyle, GlyphLayout};
use crate::params::{ParamDef, ParamSet};

pub(crate) const fn reveal_param(default: f64) -> ParamDef {
    ParamDef::slider("revealEnd", "Reveal End", default, 0.05, 1.0, 0.05, "")
}

pub(crate) const fn exit_param() -> ParamDef {
    ParamDef::slider("exitStart", "Exit Start", 1.0, 0.5, 1.0, 0.05, "")
}

pub(crate) const fn feather_param() -> ParamDef {
    ParamDef::slider("feather", "Feather", 0.0, 0.0, 120.0, 1.0, "px")
}

/// Openness of the mask in `[0, 1]`: eased in until `revealEnd`, eased out after `exitStart`.
pub(crate) fn openness(p: &ParamSet, progress: f64) -> f64 {
    let end = p.number("revealEnd");
    let exit = p.number("exitStart");
    let opening = Ease::OutCubic.apply(clamp01(progress / end.max(f64::EPSILON)));
    let closing = if exit < 1.0 && progress > exit {
        Ease::InCubic.apply(clamp01((progress - exit) / (1.0 - exit)))
    } else {
        0.0
    };
    (opening - closing).max(0.0)
}

/// Ink bounds of the laid-out line.
pub(crate) fn line_bounds(layout: &GlyphLayout, ctx: &LyricEffectContext<'_>) -> Rect {
    let h = ctx.font.size * 0.6;
    Rect::new(
        layout.left(),
        ctx.y - h,
        layout.left() + layout.total_width,
        ctx.y + h,
    )
}

/// Draw every glyph unanimated under the current clip and mask.
pub(crate) fn draw_line(
    canvas: &mut dyn Canvas2D,
    ctx: &LyricEffectContext<'_>,
    layout: &GlyphLayout,
) {
    let style = CharStyle::default();
    for g in &layout.glyphs {
        draw_glyph(canvas, ctx, g, &style, true);
    }
}
