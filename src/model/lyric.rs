use serde::{Deserialize, Serialize};

/// Timing for one word inside a lyric line.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WordTiming {
    /// Word text.
    pub text: String,
    /// Start time in seconds.
    pub start_time: f64,
    /// End time in seconds.
    pub end_time: f64,
}

/// A timed text segment of a song.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LyricLine {
    /// Stable identity; effect state is keyed by it.
    pub id: String,
    /// Line text.
    pub text: String,
    /// Start time in seconds.
    pub start_time: f64,
    /// End time in seconds.
    pub end_time: f64,
    /// Optional per-word timing.
    #[serde(default)]
    pub words: Vec<WordTiming>,
}

impl LyricLine {
    /// Build a line without word timing.
    pub fn new(id: impl Into<String>, text: impl Into<String>, start: f64, end: f64) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
            start_time: start,
            end_time: end,
            words: Vec::new(),
        }
    }

    /// Duration in seconds, never negative.
    pub fn duration(&self) -> f64 {
        let d = self.end_time - self.start_time;
        if d.is_finite() { d.max(0.0) } else { 0.0 }
    }

    /// Fraction of the line elapsed at `time`, clamped to `[0, 1]`.
    ///
    /// Zero-duration lines report `1.0` once `time` reaches their start.
    pub fn progress_at(&self, time: f64) -> f64 {
        let d = self.duration();
        if d <= 0.0 {
            return if time >= self.start_time { 1.0 } else { 0.0 };
        }
        crate::foundation::math::clamp01((time - self.start_time) / d)
    }

    /// Whether `time` falls inside `[start, end)`.
    pub fn contains(&self, time: f64) -> bool {
        time >= self.start_time && time < self.end_time
    }

    /// Index of the word active at `time`, if word timing is present.
    pub fn word_at(&self, time: f64) -> Option<usize> {
        self.words
            .iter()
            .position(|w| time >= w.start_time && time < w.end_time)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/model/lyric.rs"]
mod tests;
