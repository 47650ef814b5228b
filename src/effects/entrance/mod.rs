//! Staggered entrance and reveal effects.
//!
//! All of them share one timeline: `total = stagger * count + duration`, and character `i`
//! animates while `progress * total` crosses `[i * stagger, i * stagger + duration]`.

mod glitch_reveal;
mod handwritten;
mod letter_shuffle;
mod pop;
mod split_reveal;
mod zoom_crash;

pub use glitch_reveal::GlitchReveal;
pub use handwritten::HandwrittenStroke;
pub use letter_shuffle::LetterShuffle;
pub use pop::{Pop, PopParams};
pub use split_reveal::SplitReveal;
pub use zoom_crash::ZoomCrash;

use crate::params::ParamDef;

pub(crate) const fn stagger_param(default: f64) -> ParamDef {
    ParamDef::slider("staggerDelay", "Stagger", default, 0.0, 0.5, 0.01, "s")
}

pub(crate) const fn duration_param(default: f64) -> ParamDef {
    ParamDef::slider("duration", "Duration", default, 0.05, 2.0, 0.05, "s")
}
