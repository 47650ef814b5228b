//! lyricfx is an audio-reactive lyric effects engine.
//!
//! Effects draw the current lyric line onto a [`Canvas2D`] once per frame, driven by playback
//! time, line progress and audio features:
//!
//! - Look effects up in the [`EffectRegistry`] and stack them in an [`EffectChain`]
//! - Feed each frame through [`EffectChain::render_frame`] with a [`FrameInput`]
//! - Record into a [`RecordingCanvas`] and rasterize with [`CpuRasterizer`], or implement
//!   [`Canvas2D`] over your own surface
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod foundation;
mod model;

/// Easing curves.
pub mod animation;
/// Drawing surface abstraction and the display-list recorder.
pub mod canvas;
/// Engine and chain configuration.
pub mod config;
/// Effect framework and built-in effects.
pub mod effects;
/// Per-character layout and drawing.
pub mod glyph;
/// Effect parameter descriptors and values.
pub mod params;
/// Pooled particles.
pub mod particle;
/// Arc-length sampled Bezier paths.
pub mod path;
/// CPU rasterization of display lists.
pub mod render;
/// Offscreen 3D glyph scenes.
pub mod scene3d;

pub use crate::animation::ease::Ease;
pub use crate::canvas::{Canvas2D, DisplayList, RecordingCanvas, Shadow, SoftMask, TextAlign};
pub use crate::config::{ChainConfig, EffectInstanceConfig, EngineConfig};
pub use crate::effects::chain::{EffectChain, EffectInstance, FrameInput};
pub use crate::effects::registry::EffectRegistry;
pub use crate::effects::{
    Effect, EffectCategory, EffectContext, EffectMeta, LyricEffectContext,
};
pub use crate::foundation::core::{Affine, BezPath, Color, Point, Rect, Vec2, Vec3};
pub use crate::foundation::error::{FxError, FxResult};
pub use crate::foundation::math::{clamp01, lerp, noise1, noise2, smoothstep};
pub use crate::foundation::rng::FxRng;
pub use crate::model::audio::AudioData;
pub use crate::model::lyric::{LyricLine, WordTiming};
pub use crate::model::visual::{ColorPalette, FontSpec, VisualSettings};
pub use crate::render::{CpuRasterizer, FrameRGBA};
