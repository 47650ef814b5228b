//! Cubic Bezier paths sampled at uniform arc length.

use kurbo::{CubicBez, ParamCurve, ParamCurveArclen, ParamCurveDeriv};

use crate::foundation::core::{BezPath, Point, Vec2};

const ARCLEN_ACCURACY: f64 = 1e-3;

/// A position and unit tangent on a path.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PathSample {
    /// Point on the curve.
    pub point: Point,
    /// Tangent angle in radians.
    pub angle: f64,
}

/// Preset path shapes, sized relative to a bounding width.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PathPreset {
    /// One full sine-like period.
    Wave,
    /// Full circle, starting at the left and running clockwise over the top.
    Circle,
    /// Upper half circle.
    Arc,
    /// Straight horizontal line.
    Line,
}

impl PathPreset {
    /// Parse a parameter option name.
    pub fn from_name(name: &str) -> Self {
        match name {
            "wave" => Self::Wave,
            "circle" => Self::Circle,
            "arc" => Self::Arc,
            _ => Self::Line,
        }
    }
}

/// Sequence of cubic segments with cached arc lengths.
#[derive(Clone, Debug, Default)]
pub struct BezierPath {
    segments: Vec<CubicBez>,
    lengths: Vec<f64>,
    total: f64,
}

// Circle approximation constant for quarter arcs.
const KAPPA: f64 = 0.552_284_749_830_793_4;

impl BezierPath {
    /// Path from explicit segments.
    pub fn from_segments(segments: Vec<CubicBez>) -> Self {
        let lengths: Vec<f64> = segments
            .iter()
            .map(|s| {
                let l = s.arclen(ARCLEN_ACCURACY);
                if l.is_finite() { l } else { 0.0 }
            })
            .collect();
        let total = lengths.iter().sum();
        Self {
            segments,
            lengths,
            total,
        }
    }

    /// Preset `kind` centred on `center`, spanning `width` horizontally and `amplitude`
    /// vertically where applicable.
    pub fn preset(kind: PathPreset, center: Point, width: f64, amplitude: f64) -> Self {
        let w = if width.is_finite() { width.abs() } else { 0.0 };
        let a = if amplitude.is_finite() {
            amplitude
        } else {
            0.0
        };
        let (cx, cy) = (center.x, center.y);
        let left = cx - w / 2.0;
        match kind {
            PathPreset::Line => Self::from_segments(vec![CubicBez::new(
                (left, cy),
                (left + w / 3.0, cy),
                (left + 2.0 * w / 3.0, cy),
                (left + w, cy),
            )]),
            PathPreset::Wave => {
                let q = w / 4.0;
                Self::from_segments(vec![
                    CubicBez::new(
                        (left, cy),
                        (left + q * 0.5, cy - a),
                        (left + q * 1.5, cy - a),
                        (left + 2.0 * q, cy),
                    ),
                    CubicBez::new(
                        (left + 2.0 * q, cy),
                        (left + q * 2.5, cy + a),
                        (left + q * 3.5, cy + a),
                        (left + 4.0 * q, cy),
                    ),
                ])
            }
            PathPreset::Circle | PathPreset::Arc => {
                let r = w / 2.0;
                let k = r * KAPPA;
                let mut segs = vec![
                    CubicBez::new(
                        (cx - r, cy),
                        (cx - r, cy - k),
                        (cx - k, cy - r),
                        (cx, cy - r),
                    ),
                    CubicBez::new(
                        (cx, cy - r),
                        (cx + k, cy - r),
                        (cx + r, cy - k),
                        (cx + r, cy),
                    ),
                ];
                if kind == PathPreset::Circle {
                    segs.push(CubicBez::new(
                        (cx + r, cy),
                        (cx + r, cy + k),
                        (cx + k, cy + r),
                        (cx, cy + r),
                    ));
                    segs.push(CubicBez::new(
                        (cx, cy + r),
                        (cx - k, cy + r),
                        (cx - r, cy + k),
                        (cx - r, cy),
                    ));
                }
                Self::from_segments(segs)
            }
        }
    }

    /// Total arc length.
    pub fn length(&self) -> f64 {
        self.total
    }

    /// Whether the path has no measurable length.
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty() || self.total <= 0.0
    }

    /// Sample at arc-length distance `s`, clamped to the path.
    pub fn sample_at_length(&self, s: f64) -> Option<PathSample> {
        if self.is_empty() {
            return None;
        }
        let mut s = if s.is_finite() {
            s.clamp(0.0, self.total)
        } else {
            0.0
        };
        let last = self.segments.len() - 1;
        for (i, (seg, &len)) in self.segments.iter().zip(&self.lengths).enumerate() {
            if s <= len || i == last {
                let t = if len > 0.0 {
                    seg.inv_arclen(s.min(len), ARCLEN_ACCURACY)
                } else {
                    0.0
                };
                return Some(sample(seg, t));
            }
            s -= len;
        }
        None
    }

    /// Sample at normalized arc length `u` in `[0, 1]`.
    pub fn sample(&self, u: f64) -> Option<PathSample> {
        self.sample_at_length(u * self.total)
    }

    /// `n` samples evenly spaced by arc length from start to end.
    pub fn sample_uniform(&self, n: usize) -> Vec<PathSample> {
        match n {
            0 => Vec::new(),
            1 => self.sample(0.5).into_iter().collect(),
            _ => (0..n)
                .filter_map(|i| self.sample(i as f64 / (n - 1) as f64))
                .collect(),
        }
    }

    /// Flattened drawing path.
    pub fn to_bez_path(&self) -> BezPath {
        let mut p = BezPath::new();
        if let Some(first) = self.segments.first() {
            p.move_to(first.p0);
        }
        for s in &self.segments {
            p.curve_to(s.p1, s.p2, s.p3);
        }
        p
    }
}

fn sample(seg: &CubicBez, t: f64) -> PathSample {
    let point = seg.eval(t);
    let d: Vec2 = seg.deriv().eval(t).to_vec2();
    let d = if d.hypot2() > 1e-12 {
        d
    } else {
        seg.p3 - seg.p0
    };
    PathSample {
        point,
        angle: d.y.atan2(d.x),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/path/bezier.rs"]
mod tests;
