use super::GlyphPos;
use crate::canvas::{Canvas2D, Shadow, TextAlign};
use crate::foundation::core::{Affine, Color, Vec2};
use crate::model::visual::FontSpec;

/// Per-character transform and paint applied around the glyph centre.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CharStyle {
    /// Horizontal scale.
    pub scale_x: f64,
    /// Vertical scale.
    pub scale_y: f64,
    /// Rotation in radians.
    pub rotation: f64,
    /// Horizontal skew factor.
    pub skew_x: f64,
    /// Opacity multiplier.
    pub opacity: f64,
    /// Offset from the glyph's resting position.
    pub offset: Vec2,
    /// Fill override; `None` uses the line color.
    pub color: Option<Color>,
}

impl Default for CharStyle {
    fn default() -> Self {
        Self {
            scale_x: 1.0,
            scale_y: 1.0,
            rotation: 0.0,
            skew_x: 0.0,
            opacity: 1.0,
            offset: Vec2::ZERO,
            color: None,
        }
    }
}

impl CharStyle {
    /// Uniform scale.
    pub fn with_scale(mut self, s: f64) -> Self {
        self.scale_x = s;
        self.scale_y = s;
        self
    }

    /// Replace opacity.
    pub fn with_opacity(mut self, opacity: f64) -> Self {
        self.opacity = opacity;
        self
    }

    /// Replace offset.
    pub fn with_offset(mut self, x: f64, y: f64) -> Self {
        self.offset = Vec2::new(x, y);
        self
    }

    /// Replace rotation.
    pub fn with_rotation(mut self, rad: f64) -> Self {
        self.rotation = rad;
        self
    }

    /// Replace color.
    pub fn with_color(mut self, color: Color) -> Self {
        self.color = Some(color);
        self
    }

    fn is_drawable(&self) -> bool {
        self.opacity > 0.0
            && self.opacity.is_finite()
            && self.scale_x.is_finite()
            && self.scale_y.is_finite()
            && self.rotation.is_finite()
            && self.offset.x.is_finite()
            && self.offset.y.is_finite()
            && self.scale_x != 0.0
            && self.scale_y != 0.0
    }
}

/// Draw one glyph in `font` with `style` applied around its centre.
pub fn draw_character(
    canvas: &mut dyn Canvas2D,
    glyph: &GlyphPos,
    style: &CharStyle,
    font: &FontSpec,
    color: Color,
) {
    draw_inner(canvas, glyph, style, font, color, None);
}

/// Like [`draw_character`] with a centred glow of `blur` pixels.
pub fn draw_character_with_glow(
    canvas: &mut dyn Canvas2D,
    glyph: &GlyphPos,
    style: &CharStyle,
    font: &FontSpec,
    color: Color,
    glow: Color,
    blur: f64,
) {
    let shadow = Shadow::glow(glow, blur);
    draw_inner(canvas, glyph, style, font, color, Some(shadow));
}

fn draw_inner(
    canvas: &mut dyn Canvas2D,
    glyph: &GlyphPos,
    style: &CharStyle,
    font: &FontSpec,
    color: Color,
    glow: Option<Shadow>,
) {
    if glyph.is_blank() || !style.is_drawable() {
        return;
    }
    canvas.save();
    canvas.translate(glyph.cx() + style.offset.x, glyph.y + style.offset.y);
    if style.rotation != 0.0 {
        canvas.rotate(style.rotation);
    }
    if style.skew_x != 0.0 && style.skew_x.is_finite() {
        canvas.transform(Affine::new([1.0, 0.0, style.skew_x, 1.0, 0.0, 0.0]));
    }
    canvas.scale(style.scale_x, style.scale_y);
    let alpha = canvas.global_alpha();
    canvas.set_global_alpha(alpha * style.opacity);
    canvas.set_font(font);
    canvas.set_fill(style.color.unwrap_or(color));
    canvas.set_text_align(TextAlign::Center);
    if glow.is_some() {
        canvas.set_shadow(glow);
    }
    let mut buf = [0u8; 4];
    canvas.fill_text(glyph.ch.encode_utf8(&mut buf), 0.0, 0.0);
    canvas.restore();
}

#[cfg(test)]
#[path = "../../tests/unit/glyph/draw.rs"]
mod tests;
