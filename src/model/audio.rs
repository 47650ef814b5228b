use serde::{Deserialize, Serialize};

/// Per-frame audio feature snapshot produced by an external analyzer.
///
/// Band levels use the analyzer's byte scale (`0..=255`). Effects read this through the
/// normalizing accessors, which tolerate missing or non-finite fields.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AudioData {
    /// Low band level, `0..=255`.
    pub bass: f64,
    /// Mid band level, `0..=255`.
    pub mid: f64,
    /// High band level, `0..=255`.
    pub treble: f64,
    /// Mean level across the spectrum, `0..=255`.
    pub average: f64,
    /// Full magnitude spectrum, `0..=255` per bin.
    pub spectrum: Vec<u8>,
    /// Beat detected this frame.
    pub beat: bool,
    /// Beat strength, `0..=1`.
    pub beat_intensity: f64,
    /// Position within the current beat, `0..1`.
    pub beat_phase: f64,
    /// Estimated tempo.
    pub bpm: f64,
    /// Overall energy, `0..=1`.
    pub energy: f64,
    /// Frame-to-frame energy change.
    pub energy_delta: f64,
    /// Spectral centroid in Hz.
    pub spectral_centroid: f64,
    /// Spectral flux.
    pub spectral_flux: f64,
}

fn level(v: f64) -> f64 {
    if v.is_finite() {
        (v / 255.0).clamp(0.0, 1.0)
    } else {
        0.0
    }
}

fn unit(v: f64) -> f64 {
    if v.is_finite() {
        v.clamp(0.0, 1.0)
    } else {
        0.0
    }
}

impl AudioData {
    /// Silent snapshot.
    pub fn silent() -> Self {
        Self::default()
    }

    /// Bass level in `[0, 1]`.
    pub fn bass_level(&self) -> f64 {
        level(self.bass)
    }

    /// Mid level in `[0, 1]`.
    pub fn mid_level(&self) -> f64 {
        level(self.mid)
    }

    /// Treble level in `[0, 1]`.
    pub fn treble_level(&self) -> f64 {
        level(self.treble)
    }

    /// Average level in `[0, 1]`.
    pub fn average_level(&self) -> f64 {
        level(self.average)
    }

    /// Energy in `[0, 1]`.
    pub fn energy_level(&self) -> f64 {
        unit(self.energy)
    }

    /// Beat strength in `[0, 1]`, zero when no beat fired this frame.
    pub fn beat_strength(&self) -> f64 {
        if self.beat {
            unit(self.beat_intensity)
        } else {
            0.0
        }
    }

    /// Spectrum bin `i` in `[0, 1]`, zero when out of range.
    pub fn bin(&self, i: usize) -> f64 {
        self.spectrum
            .get(i)
            .map(|&v| f64::from(v) / 255.0)
            .unwrap_or(0.0)
    }

    /// Spectrum sampled at normalized position `t` in `[0, 1]`.
    pub fn sample(&self, t: f64) -> f64 {
        if self.spectrum.is_empty() || !t.is_finite() {
            return 0.0;
        }
        let i = (t.clamp(0.0, 1.0) * (self.spectrum.len() - 1) as f64).round() as usize;
        self.bin(i)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/model/audio.rs"]
mod tests;
