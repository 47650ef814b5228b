//! Effect framework and the built-in effect library.
//!
//! Every effect is a `Box<dyn Effect>` built through the [`registry`]. The host (or
//! [`chain::EffectChain`]) builds an [`EffectContext`] once per frame and calls
//! [`Effect::render`] / [`Effect::render_lyric`] in configured order.

use serde::Serialize;

use crate::canvas::Canvas2D;
use crate::foundation::error::FxResult;
use crate::params::{ParamDef, ParamSet, ParamValue};

/// Implements the accessor trio of [`Effect`] for a struct with `base: EffectBase` and an
/// associated `META`.
macro_rules! effect_accessors {
    () => {
        fn meta(&self) -> &'static $crate::effects::EffectMeta {
            &Self::META
        }

        fn base(&self) -> &$crate::effects::EffectBase {
            &self.base
        }

        fn base_mut(&mut self) -> &mut $crate::effects::EffectBase {
            &mut self.base
        }
    };
}
pub(crate) use effect_accessors;

/// Ordered effect stack and the reference frame loop.
pub mod chain;
pub(crate) mod common;
/// Per-frame inputs.
pub mod context;
/// Effect catalog.
pub mod registry;
/// Per-line state slots.
pub mod slot;

pub mod background;
pub mod entrance;
pub mod mask;
pub mod motion;
pub mod physics;
pub mod pseudo3d;
pub mod webgl3d;

#[cfg(test)]
#[path = "../../tests/unit/effects/fixture.rs"]
pub(crate) mod fixture;

pub use context::{EffectContext, LyricEffectContext};
pub use slot::LineSlot;

/// Where an effect sits in the draw order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum EffectCategory {
    /// Drawn per lyric line through [`Effect::render_lyric`].
    Lyric,
    /// Drawn first, every frame.
    Background,
    /// Drawn last, every frame.
    Overlay,
}

impl EffectCategory {
    /// Parse `lyric|background|overlay`.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "lyric" => Some(Self::Lyric),
            "background" => Some(Self::Background),
            "overlay" => Some(Self::Overlay),
            _ => None,
        }
    }

    /// Lowercase name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Lyric => "lyric",
            Self::Background => "background",
            Self::Overlay => "overlay",
        }
    }
}

/// Immutable identity and parameter declarations of an effect.
#[derive(Debug, Serialize)]
pub struct EffectMeta {
    /// Registry id (kebab-case).
    pub id: &'static str,
    /// Display name.
    pub name: &'static str,
    /// Draw-order category.
    pub category: EffectCategory,
    /// One-line description.
    pub description: &'static str,
    /// Discovery tags.
    pub tags: &'static [&'static str],
    /// Declared parameters.
    #[serde(skip)]
    pub params: &'static [ParamDef],
}

/// State every effect carries: its validated parameters and the activation flag.
#[derive(Clone, Debug)]
pub struct EffectBase {
    /// Parameter values.
    pub params: ParamSet,
    /// Whether the host has activated the effect.
    pub active: bool,
}

impl EffectBase {
    /// Unseeded base for `meta`; [`Effect::init`] fills in defaults.
    pub fn new(meta: &'static EffectMeta) -> Self {
        Self {
            params: ParamSet::new(meta.params),
            active: false,
        }
    }
}

/// A renderable effect.
///
/// Construction is two-phase: build the value, then call [`Effect::init`] (the registry does
/// both). Render calls never fail; degenerate input draws nothing.
pub trait Effect {
    /// Identity and declarations.
    fn meta(&self) -> &'static EffectMeta;
    /// Shared state.
    fn base(&self) -> &EffectBase;
    /// Shared state, mutably.
    fn base_mut(&mut self) -> &mut EffectBase;

    /// Registry id.
    fn id(&self) -> &'static str {
        self.meta().id
    }

    /// Draw-order category.
    fn category(&self) -> EffectCategory {
        self.meta().category
    }

    /// Seed every declared parameter with its default.
    fn init(&mut self) {
        self.base_mut().params.seed_defaults();
    }

    /// Validated parameter write.
    fn set_parameter(&mut self, id: &str, value: ParamValue) -> FxResult<()> {
        self.base_mut().params.set(id, value)
    }

    /// Current value of a parameter.
    fn parameter(&self, id: &str) -> Option<&ParamValue> {
        self.base().params.get(id)
    }

    /// All parameter values.
    fn params(&self) -> &ParamSet {
        &self.base().params
    }

    /// Whether the effect is active.
    fn is_active(&self) -> bool {
        self.base().active
    }

    /// Mark active; effects owning external resources allocate them lazily after this.
    fn on_activate(&mut self) {
        self.base_mut().active = true;
    }

    /// Mark inactive and drop per-line state.
    fn on_deactivate(&mut self) {
        self.base_mut().active = false;
        self.reset();
    }

    /// Drop every per-line cache. Called on line change and removal.
    fn reset(&mut self) {}

    /// Frame-level draw for background and overlay effects.
    fn render(&mut self, _canvas: &mut dyn Canvas2D, _ctx: &EffectContext<'_>) {}

    /// Per-line draw for lyric effects.
    fn render_lyric(&mut self, _canvas: &mut dyn Canvas2D, _ctx: &LyricEffectContext<'_>) {}
}
