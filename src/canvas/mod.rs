//! 2D drawing surface shared by every effect in draw order.
//!
//! Effects talk to [`Canvas2D`] only. Any mutation of alpha, transform, clip, mask or shadow
//! must be bracketed by `save`/`restore` so it does not leak into the next effect.

use crate::foundation::core::{Affine, BezPath, Color, Point, Rect, Vec2};
use crate::model::visual::FontSpec;

pub(crate) mod display_list;
pub(crate) mod metrics;

pub use display_list::{DisplayList, DrawOp, DrawShape, RecordingCanvas};
pub use metrics::{ApproxMetrics, TextMetrics};

/// Horizontal anchoring for [`Canvas2D::fill_text`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TextAlign {
    /// `x` is the left edge.
    #[default]
    Left,
    /// `x` is the horizontal centre.
    Center,
    /// `x` is the right edge.
    Right,
}

impl TextAlign {
    /// Offset from the anchor to the left edge for text of `width`.
    pub fn left_offset(self, width: f64) -> f64 {
        match self {
            Self::Left => 0.0,
            Self::Center => -width / 2.0,
            Self::Right => -width,
        }
    }
}

/// Blurred drop shadow / glow attached to subsequent draws.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Shadow {
    /// Shadow color (alpha included).
    pub color: Color,
    /// Blur radius in pixels.
    pub blur: f64,
    /// Device-space offset.
    pub offset: Vec2,
}

impl Shadow {
    /// Centered glow.
    pub fn glow(color: Color, blur: f64) -> Self {
        Self {
            color,
            blur,
            offset: Vec2::ZERO,
        }
    }
}

/// Soft alpha mask, expressed in device space.
///
/// Content keeps full alpha inside the inner boundary and fades to zero at the outer one,
/// the equivalent of drawing a gradient with `destination-in` over an offscreen layer.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SoftMask {
    /// Radial falloff between two radii.
    Radial {
        /// Mask centre.
        center: Point,
        /// Radius of full coverage.
        inner: f64,
        /// Radius of zero coverage.
        outer: f64,
    },
    /// Linear falloff from `start` (full coverage) to `end` (zero coverage).
    Linear {
        /// Point of full coverage.
        start: Point,
        /// Point of zero coverage.
        end: Point,
    },
}

impl SoftMask {
    /// Coverage in `[0, 1]` at device point `p`.
    pub fn coverage(&self, p: Point) -> f64 {
        match *self {
            Self::Radial {
                center,
                inner,
                outer,
            } => {
                let d = (p - center).hypot();
                if d <= inner {
                    1.0
                } else if d >= outer || outer <= inner {
                    0.0
                } else {
                    1.0 - crate::foundation::math::smoothstep(inner, outer, d)
                }
            }
            Self::Linear { start, end } => {
                let axis = end - start;
                let len2 = axis.hypot2();
                if len2 <= f64::EPSILON {
                    return 1.0;
                }
                let t = (p - start).dot(axis) / len2;
                1.0 - crate::foundation::math::clamp01(t)
            }
        }
    }

    /// The same mask after mapping through `a`.
    pub fn transformed(&self, a: Affine) -> Self {
        match *self {
            Self::Radial {
                center,
                inner,
                outer,
            } => {
                let k = a.determinant().abs().sqrt();
                Self::Radial {
                    center: a * center,
                    inner: inner * k,
                    outer: outer * k,
                }
            }
            Self::Linear { start, end } => Self::Linear {
                start: a * start,
                end: a * end,
            },
        }
    }
}

/// Canvas2D-style immediate drawing surface.
pub trait Canvas2D {
    /// Surface width in pixels.
    fn width(&self) -> f64;
    /// Surface height in pixels.
    fn height(&self) -> f64;

    /// Push the drawing state.
    fn save(&mut self);
    /// Pop the drawing state; a no-op on an empty stack.
    fn restore(&mut self);

    /// Post-multiply the current transform.
    fn transform(&mut self, a: Affine);
    /// Replace the current transform.
    fn set_transform(&mut self, a: Affine);
    /// Current user-to-device transform.
    fn current_transform(&self) -> Affine;

    /// Translate user space.
    fn translate(&mut self, x: f64, y: f64) {
        self.transform(Affine::translate((x, y)));
    }
    /// Rotate user space by `rad` radians.
    fn rotate(&mut self, rad: f64) {
        self.transform(Affine::rotate(rad));
    }
    /// Scale user space.
    fn scale(&mut self, sx: f64, sy: f64) {
        self.transform(Affine::scale_non_uniform(sx, sy));
    }

    /// Current global alpha.
    fn global_alpha(&self) -> f64;
    /// Replace global alpha (clamped to `[0, 1]`).
    fn set_global_alpha(&mut self, alpha: f64);

    /// Fill color for text, rects and paths.
    fn set_fill(&mut self, color: Color);
    /// Stroke color and line width.
    fn set_stroke(&mut self, color: Color, width: f64);
    /// Font for text measurement and drawing.
    fn set_font(&mut self, font: &FontSpec);
    /// Horizontal text anchoring.
    fn set_text_align(&mut self, align: TextAlign);
    /// Shadow/glow for subsequent draws, `None` to disable.
    fn set_shadow(&mut self, shadow: Option<Shadow>);

    /// Advance width of `text` in the current font.
    fn measure_text(&self, text: &str) -> f64;

    /// Draw text anchored at `x` per alignment, vertically centred on `y`.
    fn fill_text(&mut self, text: &str, x: f64, y: f64);
    /// Fill an axis-aligned rectangle in user space.
    fn fill_rect(&mut self, rect: Rect);
    /// Fill a path in user space.
    fn fill_path(&mut self, path: &BezPath);
    /// Stroke a path in user space.
    fn stroke_path(&mut self, path: &BezPath);

    /// Intersect the clip region with `path`.
    fn clip(&mut self, path: &BezPath);
    /// Attach a soft alpha mask (given in user space) to subsequent draws.
    fn set_soft_mask(&mut self, mask: SoftMask);
}

/// Run `f` between `save` and `restore`.
pub fn with_saved<R>(canvas: &mut dyn Canvas2D, f: impl FnOnce(&mut dyn Canvas2D) -> R) -> R {
    canvas.save();
    let out = f(&mut *canvas);
    canvas.restore();
    out
}

#[cfg(test)]
#[path = "../../tests/unit/canvas/mask.rs"]
mod tests;
