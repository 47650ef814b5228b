use std::f64::consts::TAU;

use glam::DVec3;

use super::{AnimInput, MeshAnimator};
use crate::animation::ease::Ease;
use crate::effects::{EffectCategory, EffectMeta};
use crate::foundation::math::{clamp01, smoothstep};
use crate::params::ParamDef;
use crate::scene3d::{MeshId, Scene3D};

/// Characters circle the line centre on a tilted ring, then settle into the text.
#[derive(Clone, Debug, Default)]
pub struct OrbitAnimator;

impl OrbitAnimator {
    /// Ring position of slot `i` of `n` at `angle`, on a ring of `radius` tilted by `tilt`.
    pub fn ring(i: usize, n: usize, angle: f64, radius: f64, tilt: f64) -> DVec3 {
        let a = angle + TAU * i as f64 / n.max(1) as f64;
        let flat = DVec3::new(a.cos() * radius, 0.0, a.sin() * radius);
        let (s, c) = tilt.sin_cos();
        DVec3::new(flat.x, flat.y * c - flat.z * s, flat.y * s + flat.z * c)
    }
}

impl MeshAnimator for OrbitAnimator {
    const META: EffectMeta = EffectMeta {
        id: "orbit-3d",
        name: "Orbit 3D",
        category: EffectCategory::Lyric,
        description: "Characters orbit in a ring before landing in place",
        tags: &["3d", "webgl", "character", "entrance"],
        params: &[
            ParamDef::slider("radius", "Radius", 260.0, 20.0, 1000.0, 10.0, "px"),
            ParamDef::slider("speed", "Speed", 0.25, -2.0, 2.0, 0.05, "rev/s"),
            ParamDef::slider("tilt", "Tilt", 20.0, -80.0, 80.0, 1.0, "°"),
            ParamDef::slider("settleStart", "Settle Start", 0.35, 0.0, 1.0, 0.05, ""),
            ParamDef::slider("settleEnd", "Settle End", 0.65, 0.0, 1.0, 0.05, ""),
        ],
    };

    fn animate(&mut self, scene: &mut dyn Scene3D, meshes: &[MeshId], input: &AnimInput<'_>) {
        let p = input.params;
        let radius = p.number("radius");
        let angle = TAU * p.number("speed") * input.time();
        let tilt = p.number("tilt").to_radians();
        let start = p.number("settleStart");
        let end = p.number("settleEnd").max(start);
        let settle = if end > start {
            Ease::InOutCubic.apply(smoothstep(start, end, input.progress()))
        } else if input.progress() >= start {
            1.0
        } else {
            0.0
        };
        let n = meshes.len();

        for (i, id) in meshes.iter().enumerate() {
            let Some(m) = scene.mesh_mut(*id) else {
                continue;
            };
            let ring = Self::ring(i, n, angle, radius, tilt);
            m.position = ring.lerp(m.original_position, settle);
            m.rotation = DVec3::ZERO;
            m.opacity = clamp01(input.progress() * 8.0);
        }
    }
}

#[cfg(test)]
#[path = "../../../tests/unit/effects/webgl3d/orbit.rs"]
mod tests;
