use kurbo::Shape;

use super::{duration_param, stagger_param};
use crate::animation::ease::Ease;
use crate::canvas::Canvas2D;
use crate::config::EngineConfig;
use crate::effects::common::{CharacterLayer, StaggerTimeline};
use crate::effects::{
    Effect, EffectBase, EffectCategory, EffectMeta, LyricEffectContext, effect_accessors,
};
use crate::foundation::core::Rect;
use crate::glyph::{CharStyle, draw_character};
use crate::params::ParamDef;

/// Each character arrives as two halves sliding together.
pub struct SplitReveal {
    base: EffectBase,
    layer: CharacterLayer,
}

impl SplitReveal {
    /// Registry metadata.
    pub const META: EffectMeta = EffectMeta {
        id: "split-reveal",
        name: "Split Reveal",
        category: EffectCategory::Lyric,
        description: "Character halves slide in from opposite sides and join",
        tags: &["entrance", "character", "clip"],
        params: &[
            ParamDef::choice(
                "direction",
                "Direction",
                "horizontal",
                &["horizontal", "vertical"],
            ),
            ParamDef::slider("gap", "Split Distance", 40.0, 0.0, 200.0, 1.0, "px"),
            stagger_param(0.03),
            duration_param(0.6),
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

impl Effect for SplitReveal {
    effect_accessors!();

    fn reset(&mut self) {
        self.layer.clear();
    }

    fn render_lyric(&mut self, canvas: &mut dyn Canvas2D, ctx: &LyricEffectContext<'_>) {
        if !ctx.is_drawable() {
            return;
        }
        let p = &self.base.params;
        let horizontal = p.choice("direction") == "horizontal";
        let gap = p.number("gap");
        let layout = self.layer.layout(canvas, ctx);
        let timeline = StaggerTimeline::new(
            p.number("staggerDelay"),
            p.number("duration"),
            layout.len(),
        );
        let half_h = ctx.font.safe_size() * 0.75;

        for g in &layout.glyphs {
            let local = timeline.local(g.index, ctx.progress());
            if local <= 0.0 || g.is_blank() {
                continue;
            }
            let e = Ease::OutCubic.apply(local);
            let off = gap * (1.0 - e);
            let style = CharStyle::default().with_opacity(e);
            let (x0, x1) = (g.x - 2.0, g.x + g.width + 2.0);
            let (y0, y1) = (g.y - half_h, g.y + half_h);

            // Halves: (clip rect at rest, slide offset).
            let halves = if horizontal {
                [
                    (Rect::new(x0, y0, x1, g.y), (0.0, -off)),
                    (Rect::new(x0, g.y, x1, y1), (0.0, off)),
                ]
            } else {
                let mid = g.cx();
                [
                    (Rect::new(x0, y0, mid, y1), (-off, 0.0)),
                    (Rect::new(mid, y0, x1, y1), (off, 0.0)),
                ]
            };
            for (rect, (dx, dy)) in halves {
                canvas.save();
                canvas.clip(&(rect + kurbo::Vec2::new(dx, dy)).to_path(0.1));
                draw_character(canvas, g, &style.with_offset(dx, dy), ctx.font, ctx.color);
                canvas.restore();
            }
        }
    }
}
