use serde::{Deserialize, Serialize};

use crate::foundation::error::{FxError, FxResult};
use crate::params::ParamMap;

/// Engine-wide knobs shared by every effect instance.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default, deny_unknown_fields)]
pub struct EngineConfig {
    /// Seed mixed with lyric ids for every random choice.
    pub seed: u64,
    /// Glyph layouts kept per effect.
    pub glyph_cache_capacity: usize,
    /// Live particles per pooled effect.
    pub particle_pool_capacity: usize,
    /// Upper bound applied to frame delta time, in seconds.
    pub max_delta_time: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            seed: 0x6c79_7269_6366_7800,
            glyph_cache_capacity: 64,
            particle_pool_capacity: 2048,
            max_delta_time: 0.1,
        }
    }
}

impl EngineConfig {
    /// Apply `LYRICFX_*` environment overrides; invalid values are ignored.
    pub fn with_env_overrides(mut self) -> Self {
        if let Some(v) = env_parse::<u64>("LYRICFX_SEED") {
            self.seed = v;
        }
        if let Some(v) = env_parse::<usize>("LYRICFX_GLYPH_CACHE_CAPACITY").filter(|&n| n > 0) {
            self.glyph_cache_capacity = v;
        }
        if let Some(v) = env_parse::<usize>("LYRICFX_PARTICLE_POOL_CAPACITY").filter(|&n| n > 0) {
            self.particle_pool_capacity = v;
        }
        self
    }

    /// Clamp `dt` to `[0, max_delta_time]`, mapping non-finite input to `0`.
    pub fn clamp_delta(&self, dt: f64) -> f64 {
        if !dt.is_finite() || dt < 0.0 {
            return 0.0;
        }
        let max = if self.max_delta_time.is_finite() && self.max_delta_time > 0.0 {
            self.max_delta_time
        } else {
            0.1
        };
        dt.min(max)
    }

    /// Reject values no effect can work with.
    pub fn validate(&self) -> FxResult<()> {
        if self.glyph_cache_capacity == 0 {
            return Err(FxError::validation("glyphCacheCapacity must be > 0"));
        }
        if !self.max_delta_time.is_finite() || self.max_delta_time <= 0.0 {
            return Err(FxError::validation("maxDeltaTime must be finite and > 0"));
        }
        Ok(())
    }
}

fn env_parse<T: std::str::FromStr>(key: &str) -> Option<T> {
    std::env::var(key)
        .ok()
        .and_then(|v| v.trim().parse::<T>().ok())
}

/// Persisted reference to a registered effect with its own parameter overrides.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EffectInstanceConfig {
    /// Registry id of the effect.
    pub effect_id: String,
    /// Parameter overrides; missing ids keep their defaults.
    #[serde(default)]
    pub parameters: ParamMap,
    /// Disabled instances are built but never drawn.
    #[serde(default = "enabled_default")]
    pub enabled: bool,
    /// Stable identity for telling apart several instances of one effect.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instance_id: Option<String>,
}

fn enabled_default() -> bool {
    true
}

impl EffectInstanceConfig {
    /// Enabled instance with no overrides.
    pub fn new(effect_id: impl Into<String>) -> Self {
        Self {
            effect_id: effect_id.into(),
            parameters: ParamMap::new(),
            enabled: true,
            instance_id: None,
        }
    }

    /// Add one override.
    pub fn with_param(mut self, id: &str, value: impl Into<crate::params::ParamValue>) -> Self {
        self.parameters.insert(id.to_owned(), value.into());
        self
    }

    /// Identity used by the chain: explicit id, or `"{effectId}#{position}"`.
    pub fn resolved_instance_id(&self, position: usize) -> String {
        match &self.instance_id {
            Some(id) if !id.is_empty() => id.clone(),
            _ => format!("{}#{position}", self.effect_id),
        }
    }
}

/// On-disk preset: engine knobs plus the ordered effect stack.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChainConfig {
    /// Engine knobs.
    #[serde(default)]
    pub engine: EngineConfig,
    /// Effect instances in draw order.
    #[serde(default)]
    pub effects: Vec<EffectInstanceConfig>,
}

impl ChainConfig {
    /// Parse and validate a JSON preset.
    pub fn from_json(s: &str) -> FxResult<Self> {
        let cfg: Self = serde_json::from_str(s)?;
        cfg.engine.validate()?;
        Ok(cfg)
    }

    /// Serialize as pretty JSON.
    pub fn to_json(&self) -> FxResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[cfg(test)]
#[path = "../tests/unit/config/config.rs"]
mod tests;
