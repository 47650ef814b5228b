//! Character meshes animated in a real 3D scene and composited back onto the canvas.
//!
//! [`Glyph3dEffect`] owns the scene lifecycle; a [`MeshAnimator`] only poses meshes. The
//! scene is created lazily from a [`Scene3DFactory`], resized every frame, and emptied on
//! line change, `reset` and deactivation. A factory failure is logged once and disables every
//! 3D effect built on that factory for the rest of the process.

mod explode;
mod extrude;
mod orbit;
mod rotate;
mod wave;

use std::sync::{Mutex, PoisonError};

pub use explode::{ExplodeAnimator, Shard};
pub use extrude::{ExtrudeAnimator, ExtrusionLayer};
pub use orbit::OrbitAnimator;
pub use rotate::RotateAnimator;
pub use wave::WaveAnimator;

use crate::canvas::Canvas2D;
use crate::config::EngineConfig;
use crate::effects::common::CharacterLayer;
use crate::effects::{Effect, EffectBase, EffectMeta, LineSlot, LyricEffectContext};
use crate::params::ParamSet;
use crate::scene3d::{
    MeshId, MeshStyle, Scene3D, Scene3DFactory, composite_frame, software_scene_factory,
};

/// `perspective-rotate-3d`.
pub type PerspectiveRotate3d = Glyph3dEffect<RotateAnimator>;
/// `extrude-3d`.
pub type Extrude3d = Glyph3dEffect<ExtrudeAnimator>;
/// `orbit-3d`.
pub type Orbit3d = Glyph3dEffect<OrbitAnimator>;
/// `wave-3d`.
pub type Wave3d = Glyph3dEffect<WaveAnimator>;
/// `explode-3d`.
pub type Explode3d = Glyph3dEffect<ExplodeAnimator>;

/// Scene factories that failed once; effects built on them stay disabled.
static FAILED_FACTORIES: Mutex<Vec<Scene3DFactory>> = Mutex::new(Vec::new());

fn factory_failed(factory: Scene3DFactory) -> bool {
    let failed = FAILED_FACTORIES
        .lock()
        .unwrap_or_else(PoisonError::into_inner);
    failed.iter().any(|&f| std::ptr::fn_addr_eq(f, factory))
}

/// Latch `factory` as failed; `true` only for the first report.
fn mark_failed(factory: Scene3DFactory) -> bool {
    let mut failed = FAILED_FACTORIES
        .lock()
        .unwrap_or_else(PoisonError::into_inner);
    if failed.iter().any(|&f| std::ptr::fn_addr_eq(f, factory)) {
        return false;
    }
    failed.push(factory);
    true
}

/// Per-frame input handed to a [`MeshAnimator`].
#[derive(Clone, Copy)]
pub struct AnimInput<'a> {
    /// Lyric context of the frame.
    pub ctx: &'a LyricEffectContext<'a>,
    /// The effect's parameters.
    pub params: &'a ParamSet,
    /// Engine seed.
    pub seed: u64,
}

impl AnimInput<'_> {
    /// Line progress in `[0, 1]`.
    pub fn progress(&self) -> f64 {
        self.ctx.progress()
    }

    /// Seconds since the line started.
    pub fn time(&self) -> f64 {
        self.ctx.line_time()
    }

    /// Clamped frame delta.
    pub fn dt(&self) -> f64 {
        self.ctx.frame.dt()
    }

    /// Current lyric id.
    pub fn lyric_id(&self) -> &str {
        self.ctx.lyric_id()
    }
}

/// Poses character meshes each frame.
pub trait MeshAnimator: Default {
    /// Registry metadata of the effect built on this animator.
    const META: EffectMeta;

    /// Meshes for a new line were just created.
    fn on_line(&mut self, _scene: &mut dyn Scene3D, _meshes: &[MeshId], _input: &AnimInput<'_>) {}

    /// Set position, rotation, scale and opacity of every mesh.
    fn animate(&mut self, scene: &mut dyn Scene3D, meshes: &[MeshId], input: &AnimInput<'_>);

    /// Release auxiliary meshes owned by the animator.
    fn dispose(&mut self, _scene: &mut dyn Scene3D) {}

    /// Forget per-line state.
    fn reset(&mut self) {}
}

/// Effect driver shared by every true-3D effect.
pub struct Glyph3dEffect<A: MeshAnimator> {
    base: EffectBase,
    layer: CharacterLayer,
    seed: u64,
    factory: Scene3DFactory,
    scene: Option<Box<dyn Scene3D>>,
    failed: bool,
    meshes: LineSlot<Vec<MeshId>>,
    animator: A,
}

impl<A: MeshAnimator> Glyph3dEffect<A> {
    /// Registry metadata.
    pub const META: EffectMeta = A::META;

    /// Instance backed by the software scene.
    pub fn new(config: &EngineConfig) -> Self {
        Self::with_factory(config, software_scene_factory)
    }

    /// Instance backed by scenes from `factory`.
    pub fn with_factory(config: &EngineConfig, factory: Scene3DFactory) -> Self {
        Self {
            base: EffectBase::new(&A::META),
            layer: CharacterLayer::new(config.glyph_cache_capacity),
            seed: config.seed,
            factory,
            scene: None,
            failed: false,
            meshes: LineSlot::new(),
            animator: A::default(),
        }
    }

    /// Live scene, if one has been created.
    pub fn scene(&self) -> Option<&dyn Scene3D> {
        self.scene.as_deref()
    }

    /// The animator.
    pub fn animator(&self) -> &A {
        &self.animator
    }

    /// Whether scene creation failed for this effect's factory and the effect is disabled.
    pub fn is_disabled(&self) -> bool {
        self.failed
    }

    /// Character meshes of the current line.
    pub fn line_meshes(&self, lyric_id: &str) -> &[MeshId] {
        self.meshes
            .get(lyric_id)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    fn release(&mut self) {
        if let Some(scene) = self.scene.as_deref_mut() {
            self.animator.dispose(scene);
            scene.dispose_all();
        }
        self.meshes.clear();
        self.animator.reset();
    }
}

impl<A: MeshAnimator> Effect for Glyph3dEffect<A> {
    fn meta(&self) -> &'static EffectMeta {
        &A::META
    }

    fn base(&self) -> &EffectBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut EffectBase {
        &mut self.base
    }

    fn on_deactivate(&mut self) {
        self.base.active = false;
        self.reset();
        self.scene = None;
    }

    fn reset(&mut self) {
        self.layer.clear();
        self.release();
    }

    fn render_lyric(&mut self, canvas: &mut dyn Canvas2D, ctx: &LyricEffectContext<'_>) {
        if self.failed || !ctx.is_drawable() {
            return;
        }
        let (w, h) = (ctx.frame.width.round() as u32, ctx.frame.height.round() as u32);
        if w == 0 || h == 0 {
            return;
        }
        let layout = self.layer.layout(canvas, ctx);

        if self.scene.is_none() {
            if factory_failed(self.factory) {
                self.failed = true;
                return;
            }
            match (self.factory)(w, h) {
                Ok(scene) => self.scene = Some(scene),
                Err(err) => {
                    if mark_failed(self.factory) {
                        tracing::warn!(error = %err, "3D scene unavailable, disabling 3D effects");
                    }
                    self.failed = true;
                    return;
                }
            }
        }
        let Some(scene) = self.scene.as_deref_mut() else {
            return;
        };
        if scene.ensure_size(w, h) {
            tracing::debug!(
                effect = A::META.id,
                w,
                h,
                "scene resized, rebuilding meshes"
            );
            self.animator.dispose(scene);
            self.meshes.clear();
            self.animator.reset();
        }

        let input = AnimInput {
            ctx,
            params: &self.base.params,
            seed: self.seed,
        };
        let stale = self.meshes.key().is_some_and(|k| k != ctx.lyric_id());
        if stale {
            if let Some((old, _)) = self.meshes.take() {
                self.animator.dispose(scene);
                self.animator.reset();
                scene.dispose_lyric(&old);
            }
        }
        let animator = &mut self.animator;
        let ids = self.meshes.get_or_insert_with(ctx.lyric_id(), || {
            let style = MeshStyle {
                font: ctx.font.clone(),
                color: ctx.color,
            };
            let ids = scene.create_character_meshes(ctx.lyric_id(), &layout, &style);
            animator.on_line(scene, &ids, &input);
            ids
        });

        for id in ids.iter() {
            if let Some(m) = scene.mesh_mut(*id) {
                m.color = ctx.color;
            }
        }
        animator.animate(scene, ids.as_slice(), &input);
        composite_frame(canvas, &scene.render());
    }
}

#[cfg(test)]
#[path = "../../../tests/unit/effects/webgl3d/driver.rs"]
mod tests;
