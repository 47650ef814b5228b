use std::f64::consts::TAU;

use glam::{DQuat, DVec3, EulerRot};

use super::{AnimInput, MeshAnimator};
use crate::effects::{EffectCategory, EffectMeta};
use crate::foundation::core::Color;
use crate::foundation::math::clamp01;
use crate::params::ParamDef;
use crate::scene3d::{Mesh3D, MeshId, MeshStyle, Scene3D};

/// Depth copy of one character.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ExtrusionLayer {
    /// The character mesh this layer follows.
    pub owner: MeshId,
    /// The layer's own mesh.
    pub mesh: MeshId,
    /// Layer number, `1` directly behind the face.
    pub depth: usize,
}

/// Solid-looking letters built from stacked, darkening depth layers.
#[derive(Clone, Debug, Default)]
pub struct ExtrudeAnimator {
    layers: Vec<ExtrusionLayer>,
}

impl ExtrudeAnimator {
    /// Auxiliary layers currently alive.
    pub fn layers(&self) -> &[ExtrusionLayer] {
        &self.layers
    }
}

fn layer_color(face: Color, k: f64) -> Color {
    face.lerp(Color::BLACK.with_alpha(face.a), 0.35 + 0.45 * k)
}

impl MeshAnimator for ExtrudeAnimator {
    const META: EffectMeta = EffectMeta {
        id: "extrude-3d",
        name: "Extrude 3D",
        category: EffectCategory::Lyric,
        description: "Characters gain real depth and rock to show their sides",
        tags: &["3d", "webgl", "character", "depth"],
        params: &[
            ParamDef::slider("layers", "Layers", 8.0, 1.0, 24.0, 1.0, ""),
            ParamDef::slider("depthStep", "Layer Spacing", 3.0, 0.5, 12.0, 0.5, "px"),
            ParamDef::slider("rockAngle", "Rock Angle", 25.0, 0.0, 70.0, 1.0, "°"),
            ParamDef::slider("rockSpeed", "Rock Speed", 0.3, 0.0, 2.0, 0.05, "Hz"),
        ],
    };

    fn on_line(&mut self, scene: &mut dyn Scene3D, meshes: &[MeshId], input: &AnimInput<'_>) {
        let count = input.params.number("layers").round().max(1.0) as usize;
        for &owner in meshes {
            let Some(face) = scene.mesh(owner).cloned() else {
                continue;
            };
            let style = MeshStyle {
                font: face.font.clone(),
                color: face.color,
            };
            for depth in 1..=count {
                let layer = Mesh3D::new(
                    &face.lyric_id,
                    &face.glyph,
                    face.index,
                    face.original_position,
                    &style,
                );
                let mesh = scene.create_mesh(layer);
                self.layers.push(ExtrusionLayer { owner, mesh, depth });
            }
        }
    }

    fn animate(&mut self, scene: &mut dyn Scene3D, meshes: &[MeshId], input: &AnimInput<'_>) {
        let p = input.params;
        let step = p.number("depthStep");
        let count = p.number("layers").round().max(1.0);
        let rock = p.number("rockAngle").to_radians();
        let phase = TAU * p.number("rockSpeed") * input.time();
        let rotation = DVec3::new(rock * 0.4 * (phase * 0.7).cos(), rock * phase.sin(), 0.0);
        let q = DQuat::from_euler(EulerRot::YXZ, rotation.y, rotation.x, rotation.z);
        let fade = clamp01(input.progress() * 8.0);

        for id in meshes {
            if let Some(m) = scene.mesh_mut(*id) {
                m.position = m.original_position;
                m.rotation = rotation;
                m.opacity = fade;
            }
        }
        for layer in &self.layers {
            let Some(face) = scene.mesh(layer.owner) else {
                continue;
            };
            let (pos, color) = (face.position, face.color);
            let k = layer.depth as f64 / count;
            let back = q * DVec3::new(0.0, 0.0, step * layer.depth as f64);
            if let Some(m) = scene.mesh_mut(layer.mesh) {
                m.position = pos + back;
                m.rotation = rotation;
                m.color = layer_color(color, k);
                m.opacity = fade;
            }
        }
    }

    fn dispose(&mut self, scene: &mut dyn Scene3D) {
        for layer in self.layers.drain(..) {
            scene.dispose_mesh(layer.mesh);
        }
    }

    fn reset(&mut self) {
        self.layers.clear();
    }
}
