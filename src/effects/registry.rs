use std::sync::OnceLock;

use super::{Effect, EffectCategory, EffectMeta};
use crate::config::EngineConfig;
use crate::foundation::error::{FxError, FxResult};
use crate::params::{ParamMap, default_values};

use super::background::ParticleField;
use super::entrance::{GlitchReveal, HandwrittenStroke, LetterShuffle, Pop, SplitReveal, ZoomCrash};
use super::mask::{CircleMask, RectangleMask, ShapeMask, TextPath};
use super::motion::{MotionBlur, NeonFlicker, RainbowCycle, Wave};
use super::physics::{Explode, ParticleAssemble, ParticleBurst, Scatter, WindDissolve};
use super::pseudo3d::{DepthZoom, Flip, PerspectiveRotate, Twist};
use super::webgl3d::{Explode3d, Extrude3d, Orbit3d, PerspectiveRotate3d, Wave3d};

/// Builds an uninitialized effect; [`EffectRegistry::create`] runs `init` afterwards.
pub type EffectConstructor = fn(&EngineConfig) -> Box<dyn Effect>;

/// One catalog entry.
#[derive(Clone, Copy)]
pub struct EffectEntry {
    /// Identity and parameter declarations.
    pub meta: &'static EffectMeta,
    /// Constructor.
    pub construct: EffectConstructor,
}

impl std::fmt::Debug for EffectEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EffectEntry")
            .field("id", &self.meta.id)
            .finish()
    }
}

/// Catalog mapping effect ids to constructors and metadata.
#[derive(Clone, Debug, Default)]
pub struct EffectRegistry {
    entries: Vec<EffectEntry>,
}

macro_rules! builtin {
    ($ty:ty) => {
        EffectEntry {
            meta: &<$ty>::META,
            construct: |c| Box::new(<$ty>::new(c)),
        }
    };
}

impl EffectRegistry {
    /// Empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Catalog with every built-in effect.
    pub fn with_builtins() -> Self {
        let entries = vec![
            builtin!(Pop),
            builtin!(GlitchReveal),
            builtin!(LetterShuffle),
            builtin!(SplitReveal),
            builtin!(ZoomCrash),
            builtin!(HandwrittenStroke),
            builtin!(Wave),
            builtin!(RainbowCycle),
            builtin!(NeonFlicker),
            builtin!(MotionBlur),
            builtin!(Scatter),
            builtin!(Explode),
            builtin!(ParticleBurst),
            builtin!(WindDissolve),
            builtin!(ParticleAssemble),
            builtin!(CircleMask),
            builtin!(RectangleMask),
            builtin!(ShapeMask),
            builtin!(TextPath),
            builtin!(Twist),
            builtin!(Flip),
            builtin!(PerspectiveRotate),
            builtin!(DepthZoom),
            builtin!(PerspectiveRotate3d),
            builtin!(Extrude3d),
            builtin!(Orbit3d),
            builtin!(Wave3d),
            builtin!(Explode3d),
            builtin!(ParticleField),
        ];
        Self { entries }
    }

    /// Process-wide catalog of built-ins, created on first use.
    pub fn global() -> &'static Self {
        static GLOBAL: OnceLock<EffectRegistry> = OnceLock::new();
        GLOBAL.get_or_init(Self::with_builtins)
    }

    /// Add an entry; ids must be unique.
    pub fn register(
        &mut self,
        meta: &'static EffectMeta,
        construct: EffectConstructor,
    ) -> FxResult<()> {
        if self.get(meta.id).is_some() {
            return Err(FxError::validation(format!(
                "effect '{}' is already registered",
                meta.id
            )));
        }
        self.entries.push(EffectEntry { meta, construct });
        Ok(())
    }

    /// Entry for `id`.
    pub fn get(&self, id: &str) -> Option<&EffectEntry> {
        self.entries.iter().find(|e| e.meta.id == id)
    }

    /// Build and initialize `id`; `None` when unknown.
    pub fn create(&self, id: &str, config: &EngineConfig) -> Option<Box<dyn Effect>> {
        let entry = self.get(id)?;
        let mut effect = (entry.construct)(config);
        effect.init();
        Some(effect)
    }

    /// All metadata in registration order.
    pub fn list(&self) -> impl Iterator<Item = &'static EffectMeta> + '_ {
        self.entries.iter().map(|e| e.meta)
    }

    /// Metadata of one category.
    pub fn by_category(
        &self,
        category: EffectCategory,
    ) -> impl Iterator<Item = &'static EffectMeta> + '_ {
        self.list().filter(move |m| m.category == category)
    }

    /// Metadata carrying `tag`.
    pub fn by_tag<'a>(&'a self, tag: &'a str) -> impl Iterator<Item = &'static EffectMeta> + 'a {
        self.list().filter(move |m| m.tags.contains(&tag))
    }

    /// Default parameter values of `id`.
    pub fn defaults(&self, id: &str) -> Option<ParamMap> {
        self.get(id).map(|e| default_values(e.meta.params))
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the catalog is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/effects/registry.rs"]
mod tests;
