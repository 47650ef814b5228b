use smallvec::SmallVec;

use super::metrics::{ApproxMetrics, TextMetrics};
use super::{Canvas2D, Shadow, SoftMask, TextAlign};
use crate::foundation::core::{Affine, BezPath, Color, Rect};
use crate::model::visual::FontSpec;

/// Geometry of one recorded draw, in user space (see [`DrawOp::transform`]).
#[derive(Clone, Debug, PartialEq)]
pub enum DrawShape {
    /// Text whose left edge sits at `x` and vertical centre at `y`.
    Text {
        /// Text content.
        text: String,
        /// Font at draw time.
        font: FontSpec,
        /// Left edge after alignment.
        x: f64,
        /// Vertical centre.
        y: f64,
        /// Measured advance.
        width: f64,
    },
    /// Filled rectangle.
    Rect(Rect),
    /// Filled path.
    Path(BezPath),
    /// Stroked path.
    Stroke {
        /// Path to stroke.
        path: BezPath,
        /// Line width in user units.
        width: f64,
    },
}

/// A draw with its fully resolved canvas state.
#[derive(Clone, Debug, PartialEq)]
pub struct DrawOp {
    /// What to draw.
    pub shape: DrawShape,
    /// User-to-device transform.
    pub transform: Affine,
    /// Paint color.
    pub color: Color,
    /// Global alpha at draw time.
    pub alpha: f64,
    /// Shadow/glow, if any.
    pub shadow: Option<Shadow>,
    /// Index into [`DisplayList::clips`].
    pub clip: Option<usize>,
    /// Index into [`DisplayList::masks`].
    pub mask: Option<usize>,
}

impl DrawOp {
    /// Text content for text draws.
    pub fn text(&self) -> Option<&str> {
        match &self.shape {
            DrawShape::Text { text, .. } => Some(text.as_str()),
            _ => None,
        }
    }

    /// Effective opacity (global alpha times paint alpha).
    pub fn opacity(&self) -> f64 {
        self.alpha * self.color.a
    }

    /// Uniform scale factor of the transform.
    pub fn scale(&self) -> f64 {
        self.transform.determinant().abs().sqrt()
    }
}

/// Recorded frame: ordered draws plus the clip and mask tables they reference.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DisplayList {
    /// Surface width in pixels.
    pub width: u32,
    /// Surface height in pixels.
    pub height: u32,
    /// Draws in submission order.
    pub ops: Vec<DrawOp>,
    /// Clip regions; each is the intersection of its device-space paths.
    pub clips: Vec<Vec<BezPath>>,
    /// Device-space soft masks.
    pub masks: Vec<SoftMask>,
}

impl DisplayList {
    /// Text draws in submission order.
    pub fn texts(&self) -> impl Iterator<Item = (&str, &DrawOp)> {
        self.ops.iter().filter_map(|op| op.text().map(|t| (t, op)))
    }

    /// Whether anything was drawn.
    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }
}

#[derive(Clone, Debug)]
struct State {
    transform: Affine,
    alpha: f64,
    fill: Color,
    stroke: Color,
    line_width: f64,
    font: FontSpec,
    align: TextAlign,
    shadow: Option<Shadow>,
    clip: Option<usize>,
    mask: Option<usize>,
}

impl Default for State {
    fn default() -> Self {
        Self {
            transform: Affine::IDENTITY,
            alpha: 1.0,
            fill: Color::BLACK,
            stroke: Color::BLACK,
            line_width: 1.0,
            font: FontSpec::default(),
            align: TextAlign::Left,
            shadow: None,
            clip: None,
            mask: None,
        }
    }
}

/// [`Canvas2D`] that records resolved draws into a [`DisplayList`].
pub struct RecordingCanvas {
    list: DisplayList,
    state: State,
    stack: SmallVec<[State; 8]>,
    metrics: Box<dyn TextMetrics>,
}

impl RecordingCanvas {
    /// Recorder with approximate, font-free metrics.
    pub fn new(width: u32, height: u32) -> Self {
        Self::with_metrics(width, height, Box::new(ApproxMetrics::default()))
    }

    /// Recorder with caller-provided metrics.
    pub fn with_metrics(width: u32, height: u32, metrics: Box<dyn TextMetrics>) -> Self {
        Self {
            list: DisplayList {
                width,
                height,
                ..DisplayList::default()
            },
            state: State::default(),
            stack: SmallVec::new(),
            metrics,
        }
    }

    /// Number of unmatched `save` calls.
    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    /// Recorded frame so far.
    pub fn list(&self) -> &DisplayList {
        &self.list
    }

    /// Consume the recorder.
    pub fn into_list(self) -> DisplayList {
        self.list
    }

    /// Drop recorded draws and state, keeping size and metrics.
    pub fn clear(&mut self) {
        let (w, h) = (self.list.width, self.list.height);
        self.list = DisplayList {
            width: w,
            height: h,
            ..DisplayList::default()
        };
        self.state = State::default();
        self.stack.clear();
    }

    /// Take the recorded frame, leaving an empty one behind.
    pub fn take_list(&mut self) -> DisplayList {
        let out = self.list.clone();
        self.clear();
        out
    }

    fn push(&mut self, shape: DrawShape, color: Color) {
        if self.state.alpha <= 0.0 || color.a <= 0.0 {
            return;
        }
        self.list.ops.push(DrawOp {
            shape,
            transform: self.state.transform,
            color,
            alpha: self.state.alpha,
            shadow: self.state.shadow,
            clip: self.state.clip,
            mask: self.state.mask,
        });
    }
}

fn finite_affine(a: Affine) -> bool {
    a.as_coeffs().iter().all(|c| c.is_finite())
}

impl Canvas2D for RecordingCanvas {
    fn width(&self) -> f64 {
        f64::from(self.list.width)
    }

    fn height(&self) -> f64 {
        f64::from(self.list.height)
    }

    fn save(&mut self) {
        self.stack.push(self.state.clone());
    }

    fn restore(&mut self) {
        if let Some(s) = self.stack.pop() {
            self.state = s;
        }
    }

    fn transform(&mut self, a: Affine) {
        if finite_affine(a) {
            self.state.transform *= a;
        }
    }

    fn set_transform(&mut self, a: Affine) {
        if finite_affine(a) {
            self.state.transform = a;
        }
    }

    fn current_transform(&self) -> Affine {
        self.state.transform
    }

    fn global_alpha(&self) -> f64 {
        self.state.alpha
    }

    fn set_global_alpha(&mut self, alpha: f64) {
        self.state.alpha = crate::foundation::math::clamp01(alpha);
    }

    fn set_fill(&mut self, color: Color) {
        self.state.fill = color;
    }

    fn set_stroke(&mut self, color: Color, width: f64) {
        self.state.stroke = color;
        self.state.line_width = if width.is_finite() {
            width.max(0.0)
        } else {
            1.0
        };
    }

    fn set_font(&mut self, font: &FontSpec) {
        self.state.font = font.clone();
    }

    fn set_text_align(&mut self, align: TextAlign) {
        self.state.align = align;
    }

    fn set_shadow(&mut self, shadow: Option<Shadow>) {
        self.state.shadow = shadow.filter(|s| s.blur.is_finite() && s.color.a > 0.0);
    }

    fn measure_text(&self, text: &str) -> f64 {
        self.metrics.advance(text, &self.state.font)
    }

    fn fill_text(&mut self, text: &str, x: f64, y: f64) {
        if text.is_empty() || !x.is_finite() || !y.is_finite() {
            return;
        }
        let width = self.measure_text(text);
        let shape = DrawShape::Text {
            text: text.to_owned(),
            font: self.state.font.clone(),
            x: x + self.state.align.left_offset(width),
            y,
            width,
        };
        self.push(shape, self.state.fill);
    }

    fn fill_rect(&mut self, rect: Rect) {
        if rect.width() == 0.0 || rect.height() == 0.0 || !rect.area().is_finite() {
            return;
        }
        self.push(DrawShape::Rect(rect.abs()), self.state.fill);
    }

    fn fill_path(&mut self, path: &BezPath) {
        if path.elements().is_empty() {
            return;
        }
        self.push(DrawShape::Path(path.clone()), self.state.fill);
    }

    fn stroke_path(&mut self, path: &BezPath) {
        if path.elements().is_empty() || self.state.line_width <= 0.0 {
            return;
        }
        let shape = DrawShape::Stroke {
            path: path.clone(),
            width: self.state.line_width,
        };
        self.push(shape, self.state.stroke);
    }

    fn clip(&mut self, path: &BezPath) {
        let mut device = path.clone();
        device.apply_affine(self.state.transform);
        let mut region = self
            .state
            .clip
            .and_then(|i| self.list.clips.get(i).cloned())
            .unwrap_or_default();
        region.push(device);
        self.list.clips.push(region);
        self.state.clip = Some(self.list.clips.len() - 1);
    }

    fn set_soft_mask(&mut self, mask: SoftMask) {
        self.list.masks.push(mask.transformed(self.state.transform));
        self.state.mask = Some(self.list.masks.len() - 1);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/canvas/display_list.rs"]
mod tests;
