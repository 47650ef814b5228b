//! 3D-looking character motion faked with 2D scale, skew and opacity.
//!
//! None of these project through a camera; depth only drives heuristics such as
//! `scale = focal / (focal + z)` and a darker back face.

mod depth_zoom;
mod flip;
mod perspective_rotate;
mod twist;

pub use depth_zoom::DepthZoom;
pub use flip::Flip;
pub use perspective_rotate::PerspectiveRotate;
pub use twist::Twist;

use crate::foundation::core::Color;

/// Pseudo focal length in pixels.
pub(crate) const FOCAL: f64 = 600.0;

/// Apparent scale of something `z` pixels behind the picture plane.
pub(crate) fn depth_scale(z: f64) -> f64 {
    let d = FOCAL + z;
    if d <= 1.0 || !d.is_finite() {
        return 0.0;
    }
    FOCAL / d
}

/// Shade for a face turned `angle` radians away from the viewer; the back face is darker.
pub(crate) fn face_shade(color: Color, angle: f64) -> Color {
    if angle.cos() >= 0.0 {
        color
    } else {
        color.lerp(Color::BLACK.with_alpha(color.a), 0.45)
    }
}

#[cfg(test)]
#[path = "../../../tests/unit/effects/pseudo3d/depth.rs"]
mod tests;
