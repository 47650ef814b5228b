use kurbo::Shape;

use super::{duration_param, stagger_param};
use crate::canvas::Canvas2D;
use crate::config::EngineConfig;
use crate::effects::common::{CharacterLayer, StaggerTimeline};
use crate::effects::{
    Effect, EffectBase, EffectCategory, EffectMeta, LyricEffectContext, effect_accessors,
};
use crate::foundation::core::{BezPath, Point, Rect};
use crate::foundation::math::{clamp01, smoothstep};
use crate::glyph::{CharStyle, GlyphPos, draw_character};
use crate::params::ParamDef;

/// Characters are written left to right by a moving pen.
pub struct HandwrittenStroke {
    base: EffectBase,
    layer: CharacterLayer,
}

impl HandwrittenStroke {
    /// Registry metadata.
    pub const META: EffectMeta = EffectMeta {
        id: "handwritten-stroke",
        name: "Handwritten Stroke",
        category: EffectCategory::Lyric,
        description: "A pen stroke writes each character before it fills in",
        tags: &["entrance", "character", "stroke"],
        params: &[
            ParamDef::slider("strokeWidth", "Stroke Width", 2.0, 0.5, 8.0, 0.5, "px"),
            stagger_param(0.08),
            duration_param(0.6),
            ParamDef::slider("fillDelay", "Fill Delay", 0.6, 0.0, 1.0, 0.05, ""),
            ParamDef::toggle("showPen", "Show Pen", true),
        ],
    };

    /// Unseeded instance.
    pub fn new(config: &EngineConfig) -> Self {
        Self {
            base: EffectBase::new(&Self::META),
            layer: CharacterLayer::new(config.glyph_cache_capacity),
        }
    }
}

/// Cursive pen path across a glyph, truncated at `t`.
fn pen_path(g: &GlyphPos, size: f64, t: f64) -> (BezPath, Point) {
    const STEPS: usize = 16;
    let n = ((STEPS as f64) * t).ceil().max(1.0) as usize;
    let at = |u: f64| {
        let x = g.x + g.width * u;
        let y = g.y + size * 0.38 + (u * std::f64::consts::TAU * 1.5).sin() * size * 0.06;
        Point::new(x, y)
    };
    let mut path = BezPath::new();
    path.move_to(at(0.0));
    let mut tip = at(0.0);
    for i in 1..=n {
        tip = at((i as f64 / STEPS as f64).min(t));
        path.line_to(tip);
    }
    (path, tip)
}

impl Effect for HandwrittenStroke {
    effect_accessors!();

    fn reset(&mut self) {
        self.layer.clear();
    }

    fn render_lyric(&mut self, canvas: &mut dyn Canvas2D, ctx: &LyricEffectContext<'_>) {
        if !ctx.is_drawable() {
            return;
        }
        let p = &self.base.params;
        let width = p.number("strokeWidth");
        let fill_delay = p.number("fillDelay");
        let show_pen = p.flag("showPen");
        let layout = self.layer.layout(canvas, ctx);
        let timeline = StaggerTimeline::new(
            p.number("staggerDelay"),
            p.number("duration"),
            layout.len(),
        );
        let size = ctx.font.safe_size();

        for g in &layout.glyphs {
            let local = timeline.local(g.index, ctx.progress());
            if local <= 0.0 || g.is_blank() {
                continue;
            }
            let write = clamp01(local / fill_delay.max(0.05));
            let fill = if fill_delay >= 1.0 {
                if local >= 1.0 { 1.0 } else { 0.0 }
            } else {
                smoothstep(fill_delay, 1.0, local)
            };

            // Ink revealed behind the pen.
            canvas.save();
            let reveal = Rect::new(
                g.x - 1.0,
                g.y - size,
                g.x + g.width * write + 1.0,
                g.y + size,
            );
            canvas.clip(&reveal.to_path(0.1));
            let ink = CharStyle::default().with_opacity(0.35 + 0.65 * fill);
            draw_character(canvas, g, &ink, ctx.font, ctx.color);
            canvas.restore();

            if local < 1.0 {
                let (path, tip) = pen_path(g, size, write);
                canvas.save();
                canvas.set_stroke(ctx.color.fade(1.0 - fill), width);
                canvas.stroke_path(&path);
                if show_pen && write < 1.0 {
                    canvas.set_fill(ctx.frame.settings.glow_color);
                    canvas.fill_path(&kurbo::Circle::new(tip, width * 1.5).to_path(0.1));
                }
                canvas.restore();
            }
        }
    }
}
