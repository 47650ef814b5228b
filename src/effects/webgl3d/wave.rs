use std::f64::consts::TAU;

use glam::DVec3;

use super::{AnimInput, MeshAnimator};
use crate::effects::{EffectCategory, EffectMeta};
use crate::foundation::math::clamp01;
use crate::params::ParamDef;
use crate::scene3d::{MeshId, Scene3D};

/// Characters bob through depth on a travelling wave.
#[derive(Clone, Debug, Default)]
pub struct WaveAnimator;

impl MeshAnimator for WaveAnimator {
    const META: EffectMeta = EffectMeta {
        id: "wave-3d",
        name: "Wave 3D",
        category: EffectCategory::Lyric,
        description: "A wave rolls through the characters in depth",
        tags: &["3d", "webgl", "motion", "character", "audio"],
        params: &[
            ParamDef::slider(
                "amplitude",
                "Depth Amplitude",
                120.0,
                0.0,
                600.0,
                10.0,
                "px",
            ),
            ParamDef::slider("lift", "Lift", 12.0, 0.0, 80.0, 1.0, "px"),
            ParamDef::slider("frequency", "Frequency", 0.8, 0.05, 4.0, 0.05, "Hz"),
            ParamDef::slider("phaseOffset", "Phase Offset", 0.45, 0.0, 2.0, 0.05, "rad"),
            ParamDef::toggle("audioReactive", "Audio Reactive", true),
        ],
    };

    fn animate(&mut self, scene: &mut dyn Scene3D, meshes: &[MeshId], input: &AnimInput<'_>) {
        let p = input.params;
        let boost = if p.flag("audioReactive") {
            1.0 + input.ctx.frame.bass()
        } else {
            1.0
        };
        let amp = p.number("amplitude") * boost;
        let lift = p.number("lift");
        let freq = p.number("frequency");
        let phase = p.number("phaseOffset");
        let fade_in = clamp01(input.progress() * 10.0);

        for id in meshes {
            let Some(m) = scene.mesh_mut(*id) else {
                continue;
            };
            let a = TAU * freq * input.time() + m.index as f64 * phase;
            let home = m.original_position;
            m.position = home + DVec3::new(0.0, a.cos() * lift, a.sin() * amp);
            // Tilt along the wave slope.
            m.rotation = DVec3::new(-a.cos() * 0.5 * amp / (amp + 100.0), 0.0, 0.0);
            m.opacity = fade_in;
        }
    }
}
