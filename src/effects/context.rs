use crate::foundation::core::Color;
use crate::foundation::math::clamp01;
use crate::model::audio::AudioData;
use crate::model::lyric::LyricLine;
use crate::model::visual::{ColorPalette, FontSpec, VisualSettings};

/// Per-frame inputs shared by every effect.
#[derive(Clone, Copy, Debug)]
pub struct EffectContext<'a> {
    /// Canvas width in pixels.
    pub width: f64,
    /// Canvas height in pixels.
    pub height: f64,
    /// Playback time in seconds.
    pub current_time: f64,
    /// Seconds since the previous frame.
    pub delta_time: f64,
    /// Audio features for this frame.
    pub audio: &'a AudioData,
    /// Presentation settings.
    pub settings: &'a VisualSettings,
    /// Theme colors.
    pub palette: &'a ColorPalette,
}

impl EffectContext<'_> {
    /// Delta time guarded against negative and non-finite values.
    pub fn dt(&self) -> f64 {
        if self.delta_time.is_finite() && self.delta_time > 0.0 {
            self.delta_time
        } else {
            0.0
        }
    }

    /// Playback time guarded against non-finite values.
    pub fn time(&self) -> f64 {
        if self.current_time.is_finite() {
            self.current_time
        } else {
            0.0
        }
    }

    /// Whether there is any area to draw on.
    pub fn has_area(&self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0
    }

    /// Bass level scaled by the host's reactivity setting.
    pub fn bass(&self) -> f64 {
        self.audio.bass_level() * self.settings.reactivity()
    }

    /// Mid level scaled by reactivity.
    pub fn mid(&self) -> f64 {
        self.audio.mid_level() * self.settings.reactivity()
    }

    /// Treble level scaled by reactivity.
    pub fn treble(&self) -> f64 {
        self.audio.treble_level() * self.settings.reactivity()
    }

    /// Beat strength this frame (zero without a beat), scaled by reactivity.
    pub fn beat(&self) -> f64 {
        if self.audio.beat {
            self.audio.beat_strength() * self.settings.reactivity()
        } else {
            0.0
        }
    }
}

/// Inputs for drawing one lyric line.
#[derive(Clone, Copy, Debug)]
pub struct LyricEffectContext<'a> {
    /// Frame inputs.
    pub frame: EffectContext<'a>,
    /// Line being drawn.
    pub line: &'a LyricLine,
    /// Fraction of the line elapsed.
    pub progress: f64,
    /// Text to draw (usually `line.text`).
    pub text: &'a str,
    /// Horizontal anchor (line centre).
    pub x: f64,
    /// Vertical anchor (line centre).
    pub y: f64,
    /// Resolved font.
    pub font: &'a FontSpec,
    /// Resolved fill color.
    pub color: Color,
}

impl LyricEffectContext<'_> {
    /// Progress clamped to `[0, 1]`.
    pub fn progress(&self) -> f64 {
        clamp01(self.progress)
    }

    /// Lyric id keying per-line state.
    pub fn lyric_id(&self) -> &str {
        &self.line.id
    }

    /// Whether the line has anything to draw.
    pub fn is_drawable(&self) -> bool {
        !self.text.is_empty()
            && self.frame.has_area()
            && self.x.is_finite()
            && self.y.is_finite()
            && self.font.safe_size() == self.font.size
    }

    /// Seconds since the line started, never negative.
    pub fn line_time(&self) -> f64 {
        let t = self.frame.time() - self.line.start_time;
        if t.is_finite() { t.max(0.0) } else { 0.0 }
    }
}
