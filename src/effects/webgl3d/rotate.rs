use std::f64::consts::TAU;

use glam::DVec3;

use super::{AnimInput, MeshAnimator};
use crate::animation::ease::Ease;
use crate::effects::common::StaggerTimeline;
use crate::effects::entrance::{duration_param, stagger_param};
use crate::effects::{EffectCategory, EffectMeta};
use crate::params::ParamDef;
use crate::scene3d::{MeshId, Scene3D};

/// The line swings around its vertical axis while characters fly in from depth.
#[derive(Clone, Debug, Default)]
pub struct RotateAnimator;

impl MeshAnimator for RotateAnimator {
    const META: EffectMeta = EffectMeta {
        id: "perspective-rotate-3d",
        name: "Perspective Rotate 3D",
        category: EffectCategory::Lyric,
        description: "The line turns in true perspective as characters arrive from depth",
        tags: &["3d", "webgl", "line", "entrance", "audio"],
        params: &[
            ParamDef::slider("maxAngle", "Max Angle", 40.0, 0.0, 85.0, 1.0, "°"),
            ParamDef::slider("speed", "Speed", 0.2, 0.0, 2.0, 0.05, "Hz"),
            ParamDef::slider(
                "entranceDepth",
                "Entrance Depth",
                900.0,
                0.0,
                4000.0,
                50.0,
                "px",
            ),
            stagger_param(0.04),
            duration_param(0.6),
        ],
    };

    fn animate(&mut self, scene: &mut dyn Scene3D, meshes: &[MeshId], input: &AnimInput<'_>) {
        let p = input.params;
        let boost = 1.0 + 0.4 * input.ctx.frame.bass();
        let sway = (TAU * p.number("speed") * input.time()).sin();
        let yaw = p.number("maxAngle").to_radians() * boost * sway;
        let depth = p.number("entranceDepth");
        let timeline = StaggerTimeline::new(
            p.number("staggerDelay"),
            p.number("duration"),
            meshes.len(),
        );
        let (s, c) = yaw.sin_cos();

        for (i, id) in meshes.iter().enumerate() {
            let Some(m) = scene.mesh_mut(*id) else {
                continue;
            };
            let local = timeline.local(i, input.progress());
            let home = m.original_position;
            let z = home.z + depth * (1.0 - Ease::OutCubic.apply(local));
            // Yaw about the world Y axis through the canvas centre.
            m.position = DVec3::new(home.x * c + z * s, home.y, -home.x * s + z * c);
            m.rotation = DVec3::new(0.0, yaw, 0.0);
            m.opacity = local.min(1.0);
        }
    }
}
