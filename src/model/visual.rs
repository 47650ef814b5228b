use crate::foundation::core::Color;
use serde::{Deserialize, Serialize};

/// Font selection used for measuring and drawing text.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FontSpec {
    /// Family name. Resolution is up to the canvas backend.
    pub family: String,
    /// Size in pixels.
    pub size: f64,
    /// CSS-style weight.
    pub weight: u16,
}

impl Default for FontSpec {
    fn default() -> Self {
        Self {
            family: "sans-serif".to_owned(),
            size: 48.0,
            weight: 700,
        }
    }
}

impl FontSpec {
    /// Same family and weight at another size.
    pub fn with_size(&self, size: f64) -> Self {
        Self {
            size,
            ..self.clone()
        }
    }

    /// Size guarded against zero, negative and non-finite values.
    pub fn safe_size(&self) -> f64 {
        if self.size.is_finite() && self.size > 0.0 {
            self.size
        } else {
            1.0
        }
    }
}

/// Host-controlled presentation settings, read-only for effects.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct VisualSettings {
    /// Lyric font.
    pub font: FontSpec,
    /// Default lyric fill color.
    pub text_color: Color,
    /// Glow color used by glow-capable effects.
    pub glow_color: Color,
    /// Glow strength, `0..=1`.
    pub glow_intensity: f64,
    /// Global multiplier on audio-driven motion, `0..=2`.
    pub audio_reactivity: f64,
    /// Vertical lyric anchor as a fraction of canvas height.
    pub text_position_y: f64,
}

impl Default for VisualSettings {
    fn default() -> Self {
        Self {
            font: FontSpec::default(),
            text_color: Color::WHITE,
            glow_color: Color::rgb(0.4, 0.8, 1.0),
            glow_intensity: 0.5,
            audio_reactivity: 1.0,
            text_position_y: 0.5,
        }
    }
}

impl VisualSettings {
    /// Audio reactivity guarded against non-finite values.
    pub fn reactivity(&self) -> f64 {
        if self.audio_reactivity.is_finite() {
            self.audio_reactivity.clamp(0.0, 2.0)
        } else {
            1.0
        }
    }
}

/// Theme colors available to effects.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ColorPalette {
    /// Primary accent.
    pub primary: Color,
    /// Secondary accent.
    pub secondary: Color,
    /// Highlight color.
    pub accent: Color,
    /// Background color.
    pub background: Color,
    /// Text color.
    pub text: Color,
}

impl Default for ColorPalette {
    fn default() -> Self {
        Self {
            primary: Color::rgb(0.55, 0.36, 0.96),
            secondary: Color::rgb(0.93, 0.28, 0.6),
            accent: Color::rgb(0.02, 0.71, 0.83),
            background: Color::rgb(0.04, 0.04, 0.08),
            text: Color::WHITE,
        }
    }
}
