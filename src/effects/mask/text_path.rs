use crate::canvas::Canvas2D;
use crate::config::EngineConfig;
use crate::effects::common::{CharacterLayer, StaggerTimeline, draw_glyph};
use crate::effects::{
    Effect, EffectBase, EffectCategory, EffectMeta, LyricEffectContext, effect_accessors,
};
use crate::foundation::core::{Point, Vec2};
use crate::glyph::{CharStyle, GlyphLayout};
use crate::params::ParamDef;
use crate::path::{BezierPath, PathPreset, PathSample};

type PathKey = (PathPreset, [u64; 4]);

/// Characters ride a wave, arc, circle or line at uniform arc-length spacing.
pub struct TextPath {
    base: EffectBase,
    layer: CharacterLayer,
    path: Option<(PathKey, BezierPath)>,
}

impl TextPath {
    /// Registry metadata.
    pub const META: EffectMeta = EffectMeta {
        id: "text-path",
        name: "Text On Path",
        category: EffectCategory::Lyric,
        description: "Characters are laid out along an animated Bezier path",
        tags: &["path", "character", "layout"],
        params: &[
            ParamDef::choice(
                "pathType",
                "Path",
                "wave",
                &["wave", "circle", "arc", "line"],
            ),
            ParamDef::slider("amplitude", "Amplitude", 50.0, 0.0, 300.0, 5.0, "px"),
            ParamDef::slider("pathWidth", "Path Width", 0.7, 0.1, 1.0, 0.05, ""),
            ParamDef::choice("spacing", "Spacing", "uniform", &["uniform", "natural"]),
            ParamDef::slider("flowSpeed", "Flow Speed", 0.0, -400.0, 400.0, 10.0, "px/s"),
            ParamDef::slider("revealEnd", "Reveal End", 0.3, 0.0, 1.0, 0.05, ""),
            ParamDef::toggle("showPath", "Show Path", false),
        ],
    };

    /// Unseeded instance.
    pub fn new(config: &EngineConfig) -> Self {
        Self {
            base: EffectBase::new(&Self::META),
            layer: CharacterLayer::new(config.glyph_cache_capacity),
            path: None,
        }
    }

    fn path_for(
        &mut self,
        kind: PathPreset,
        centre: Point,
        width: f64,
        amplitude: f64,
    ) -> &BezierPath {
        let key = (
            kind,
            [centre.x, centre.y, width, amplitude].map(f64::to_bits),
        );
        if self.path.as_ref().map(|(k, _)| *k) != Some(key) {
            self.path = None;
        }
        &self
            .path
            .get_or_insert_with(|| (key, BezierPath::preset(kind, centre, width, amplitude)))
            .1
    }

    /// Arc-length position of each glyph centre on a path of `length`.
    pub fn stations(
        layout: &GlyphLayout,
        length: f64,
        uniform: bool,
        flow: f64,
        closed: bool,
    ) -> Vec<f64> {
        let n = layout.len();
        if n == 0 || length <= 0.0 {
            return Vec::new();
        }
        let base: Vec<f64> = if uniform {
            (0..n).map(|i| length * (i as f64 + 0.5) / n as f64).collect()
        } else {
            let start = (length - layout.total_width) / 2.0;
            layout
                .glyphs
                .iter()
                .map(|g| start + (g.cx() - layout.left()))
                .collect()
        };
        base.into_iter()
            .map(|s| {
                let s = s + flow;
                if closed { s.rem_euclid(length) } else { s }
            })
            .collect()
    }
}

impl Effect for TextPath {
    effect_accessors!();

    fn reset(&mut self) {
        self.layer.clear();
    }

    fn render_lyric(&mut self, canvas: &mut dyn Canvas2D, ctx: &LyricEffectContext<'_>) {
        if !ctx.is_drawable() {
            return;
        }
        let p = &self.base.params;
        let kind = PathPreset::from_name(p.choice("pathType"));
        let amplitude = p.number("amplitude");
        let width = p.number("pathWidth") * ctx.frame.width;
        let uniform = p.choice("spacing") == "uniform";
        let flow = p.number("flowSpeed") * ctx.line_time();
        let reveal = p.number("revealEnd");
        let show = p.flag("showPath");
        let layout = self.layer.layout(canvas, ctx);

        let path = self.path_for(kind, Point::new(ctx.x, ctx.y), width, amplitude);
        let closed = kind == PathPreset::Circle;
        let stations = Self::stations(&layout, path.length(), uniform, flow, closed);
        let samples: Vec<Option<PathSample>> =
            stations.iter().map(|&s| path.sample_at_length(s)).collect();
        if show {
            canvas.save();
            canvas.set_stroke(ctx.color.fade(0.25), 1.5);
            canvas.stroke_path(&path.to_bez_path());
            canvas.restore();
        }

        let n = layout.len();
        for (g, s) in layout.glyphs.iter().zip(samples) {
            let Some(s) = s else {
                continue;
            };
            let local = if reveal > 0.0 {
                StaggerTimeline::new(1.0, 1.0, n).local(g.index, ctx.progress() / reveal)
            } else {
                1.0
            };
            let shift: Vec2 = s.point - Point::new(g.cx(), g.y);
            let style = CharStyle::default()
                .with_offset(shift.x, shift.y)
                .with_rotation(s.angle)
                .with_opacity(local);
            draw_glyph(canvas, ctx, g, &style, true);
        }
    }
}

#[cfg(test)]
#[path = "../../../tests/unit/effects/mask/text_path.rs"]
mod tests;
