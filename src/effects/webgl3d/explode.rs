use glam::DVec3;

use super::{AnimInput, MeshAnimator};
use crate::effects::{EffectCategory, EffectMeta};
use crate::foundation::rng::FxRng;
use crate::params::ParamDef;
use crate::scene3d::{MeshId, Scene3D};

/// Ballistic state of one character after detonation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Shard {
    /// Linear velocity, px/s.
    pub vel: DVec3,
    /// Angular velocity per Euler axis, rad/s.
    pub spin: DVec3,
}

/// Characters blow apart through depth at `triggerPoint` and tumble away under gravity.
#[derive(Clone, Debug, Default)]
pub struct ExplodeAnimator {
    shards: Vec<Shard>,
    triggered: bool,
}

impl ExplodeAnimator {
    /// Whether the current line has detonated.
    pub fn triggered(&self) -> bool {
        self.triggered
    }

    /// Ballistic state per character mesh.
    pub fn shards(&self) -> &[Shard] {
        &self.shards
    }
}

impl MeshAnimator for ExplodeAnimator {
    const META: EffectMeta = EffectMeta {
        id: "explode-3d",
        name: "Explode 3D",
        category: EffectCategory::Lyric,
        description: "Characters burst apart in depth and tumble away",
        tags: &["3d", "webgl", "physics", "character", "exit"],
        params: &[
            ParamDef::slider("triggerPoint", "Trigger Point", 0.7, 0.0, 1.0, 0.05, ""),
            ParamDef::slider("force", "Force", 700.0, 50.0, 3000.0, 10.0, "px/s"),
            ParamDef::slider("gravity", "Gravity", 900.0, 0.0, 3000.0, 10.0, "px/s²"),
            ParamDef::slider("spin", "Spin", 6.0, 0.0, 30.0, 0.5, "rad/s"),
            ParamDef::slider("fadeRate", "Fade Rate", 0.9, 0.1, 4.0, 0.1, "/s"),
        ],
    };

    fn animate(&mut self, scene: &mut dyn Scene3D, meshes: &[MeshId], input: &AnimInput<'_>) {
        let p = input.params;
        if input.progress() < p.number("triggerPoint") {
            let breathe = (input.time() * 6.0).sin() * 8.0 * input.progress();
            for id in meshes {
                if let Some(m) = scene.mesh_mut(*id) {
                    m.reset_pose();
                    m.position.z += breathe;
                }
            }
            return;
        }

        if !self.triggered {
            self.triggered = true;
            let mut rng = FxRng::for_line(input.seed, input.lyric_id());
            let force = p.number("force");
            let spin = p.number("spin");
            self.shards = meshes
                .iter()
                .map(|_| {
                    let dir = DVec3::new(rng.signed(), rng.range(-1.0, 0.2), rng.signed());
                    Shard {
                        vel: dir.normalize_or_zero() * force * rng.range(0.5, 1.0),
                        spin: DVec3::new(rng.signed(), rng.signed(), rng.signed()) * spin,
                    }
                })
                .collect();
            return;
        }

        let dt = input.dt();
        let gravity = DVec3::new(0.0, p.number("gravity"), 0.0);
        let fade = p.number("fadeRate");
        for (id, shard) in meshes.iter().zip(&mut self.shards) {
            let Some(m) = scene.mesh_mut(*id) else {
                continue;
            };
            shard.vel += gravity * dt;
            m.position += shard.vel * dt;
            m.rotation += shard.spin * dt;
            m.opacity = (m.opacity - fade * dt).max(0.0);
        }
    }

    fn reset(&mut self) {
        self.shards.clear();
        self.triggered = false;
    }
}
