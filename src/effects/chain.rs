use super::registry::EffectRegistry;
use super::{Effect, EffectCategory, EffectContext, LyricEffectContext};
use crate::canvas::{Canvas2D, with_saved};
use crate::config::{ChainConfig, EffectInstanceConfig, EngineConfig};
use crate::model::audio::AudioData;
use crate::model::lyric::LyricLine;
use crate::model::visual::{ColorPalette, VisualSettings};

/// A configured effect in the chain.
pub struct EffectInstance {
    /// Stable identity (explicit or `"{effectId}#{position}"`).
    pub instance_id: String,
    /// Disabled instances are skipped when drawing.
    pub enabled: bool,
    /// The effect itself.
    pub effect: Box<dyn Effect>,
}

impl std::fmt::Debug for EffectInstance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EffectInstance")
            .field("instance_id", &self.instance_id)
            .field("effect", &self.effect.id())
            .field("enabled", &self.enabled)
            .finish()
    }
}

/// Inputs for one frame of the chain.
#[derive(Clone, Copy, Debug)]
pub struct FrameInput<'a> {
    /// Playback time in seconds.
    pub time: f64,
    /// Seconds since the previous frame (clamped by the engine config).
    pub delta_time: f64,
    /// Audio features.
    pub audio: &'a AudioData,
    /// Presentation settings.
    pub settings: &'a VisualSettings,
    /// Theme colors.
    pub palette: &'a ColorPalette,
    /// Current lyric line, if any.
    pub line: Option<&'a LyricLine>,
}

/// Ordered effect stack: backgrounds, then lyric effects, then overlays, each in configured
/// order.
#[derive(Debug)]
pub struct EffectChain {
    engine: EngineConfig,
    instances: Vec<EffectInstance>,
    current_line: Option<String>,
}

impl EffectChain {
    /// Empty chain.
    pub fn new(engine: EngineConfig) -> Self {
        Self {
            engine,
            instances: Vec::new(),
            current_line: None,
        }
    }

    /// Build from a preset using `registry`.
    pub fn from_config(config: &ChainConfig, registry: &EffectRegistry) -> Self {
        Self::from_instances(config.engine.clone(), &config.effects, registry)
    }

    /// Build from instance configs. Unknown ids are skipped; rejected overrides keep defaults.
    #[tracing::instrument(skip_all, fields(count = configs.len()))]
    pub fn from_instances(
        engine: EngineConfig,
        configs: &[EffectInstanceConfig],
        registry: &EffectRegistry,
    ) -> Self {
        let mut chain = Self::new(engine);
        for (position, cfg) in configs.iter().enumerate() {
            chain.push(cfg, position, registry);
        }
        chain
    }

    /// Append one instance; returns its id, or `None` if the effect id is unknown.
    pub fn push(
        &mut self,
        cfg: &EffectInstanceConfig,
        position: usize,
        registry: &EffectRegistry,
    ) -> Option<String> {
        let Some(mut effect) = registry.create(&cfg.effect_id, &self.engine) else {
            tracing::warn!(effect_id = %cfg.effect_id, "skipping unknown effect");
            return None;
        };
        for err in effect.base_mut().params.apply(&cfg.parameters) {
            tracing::warn!(effect_id = %cfg.effect_id, error = %err, "rejected parameter override");
        }
        let mut instance_id = cfg.resolved_instance_id(position);
        if self.instance(&instance_id).is_some() {
            tracing::warn!(%instance_id, "duplicate instance id, appending position");
            instance_id = format!("{instance_id}#{position}");
        }
        if cfg.enabled {
            effect.on_activate();
        }
        self.instances.push(EffectInstance {
            instance_id: instance_id.clone(),
            enabled: cfg.enabled,
            effect,
        });
        Some(instance_id)
    }

    /// Instance by id.
    pub fn instance(&self, id: &str) -> Option<&EffectInstance> {
        self.instances.iter().find(|i| i.instance_id == id)
    }

    /// Instance by id, mutably.
    pub fn instance_mut(&mut self, id: &str) -> Option<&mut EffectInstance> {
        self.instances.iter_mut().find(|i| i.instance_id == id)
    }

    /// All instances in configured order.
    pub fn instances(&self) -> &[EffectInstance] {
        &self.instances
    }

    /// Enable or disable an instance, activating or deactivating its effect.
    pub fn set_enabled(&mut self, id: &str, enabled: bool) -> bool {
        let Some(inst) = self.instance_mut(id) else {
            return false;
        };
        if inst.enabled != enabled {
            inst.enabled = enabled;
            if enabled {
                inst.effect.on_activate();
            } else {
                inst.effect.on_deactivate();
            }
        }
        true
    }

    /// Remove an instance, deactivating it first.
    pub fn remove(&mut self, id: &str) -> Option<EffectInstance> {
        let pos = self.instances.iter().position(|i| i.instance_id == id)?;
        let mut inst = self.instances.remove(pos);
        inst.effect.on_deactivate();
        Some(inst)
    }

    /// Lyric id the lyric effects are currently keyed to.
    pub fn current_line(&self) -> Option<&str> {
        self.current_line.as_deref()
    }

    /// Engine configuration.
    pub fn engine(&self) -> &EngineConfig {
        &self.engine
    }

    /// Draw one frame onto `canvas`.
    pub fn render_frame(&mut self, canvas: &mut dyn Canvas2D, input: &FrameInput<'_>) {
        let line_id = input.line.map(|l| l.id.as_str());
        if line_id != self.current_line.as_deref() {
            tracing::debug!(from = ?self.current_line, to = ?line_id, "lyric line changed");
            for inst in &mut self.instances {
                if inst.effect.category() == EffectCategory::Lyric {
                    inst.effect.reset();
                }
            }
            self.current_line = line_id.map(str::to_owned);
        }

        let frame = EffectContext {
            width: canvas.width(),
            height: canvas.height(),
            current_time: input.time,
            delta_time: self.engine.clamp_delta(input.delta_time),
            audio: input.audio,
            settings: input.settings,
            palette: input.palette,
        };

        self.draw_category(canvas, EffectCategory::Background, &frame);

        if let Some(line) = input.line {
            let lyric = LyricEffectContext {
                frame,
                line,
                progress: line.progress_at(input.time),
                text: &line.text,
                x: frame.width / 2.0,
                y: frame.height * input.settings.text_position_y,
                font: &input.settings.font,
                color: input.settings.text_color,
            };
            for inst in self.instances.iter_mut().filter(|i| i.enabled) {
                if inst.effect.category() == EffectCategory::Lyric {
                    with_saved(canvas, |c| inst.effect.render_lyric(c, &lyric));
                }
            }
        }

        self.draw_category(canvas, EffectCategory::Overlay, &frame);
    }

    fn draw_category(
        &mut self,
        canvas: &mut dyn Canvas2D,
        category: EffectCategory,
        frame: &EffectContext<'_>,
    ) {
        for inst in self.instances.iter_mut().filter(|i| i.enabled) {
            if inst.effect.category() == category {
                with_saved(canvas, |c| inst.effect.render(c, frame));
            }
        }
    }
}
