use std::collections::HashMap;

use super::FrameRGBA;
use super::blur::{blur_rgba8_premul, shadow_kernel};
use super::composite::{
    PixelWindow, clear, crop, mask_in_place, over_in_place, over_window, soft_mask_in_place,
};
use super::text::{TextBrushRgba8, TextLayoutEngine};
use crate::canvas::display_list::{DisplayList, DrawOp, DrawShape};
use crate::canvas::{Shadow, SoftMask};
use crate::foundation::core::{Affine, BezPath, Color, Point, Rect};
use kurbo::Shape;
use crate::foundation::error::{FxError, FxResult};

const LAYOUT_CACHE_CAP: usize = 256;

/// CPU rasterizer for [`DisplayList`]s built on `vello_cpu`.
///
/// Without a font, text is drawn as solid boxes of the measured advance so layouts stay visible
/// in headless runs.
pub struct CpuRasterizer {
    clear_color: Color,
    text: Option<TextLayoutEngine>,
    font: Option<vello_cpu::peniko::FontData>,
    layouts: HashMap<(String, u32), parley::Layout<TextBrushRgba8>>,
}

impl Default for CpuRasterizer {
    fn default() -> Self {
        Self::new()
    }
}

impl CpuRasterizer {
    /// Rasterizer with a transparent background and no font.
    pub fn new() -> Self {
        Self {
            clear_color: Color::TRANSPARENT,
            text: None,
            font: None,
            layouts: HashMap::new(),
        }
    }

    /// Use `font_bytes` for all text.
    pub fn with_font(mut self, font_bytes: &[u8]) -> FxResult<Self> {
        let engine = TextLayoutEngine::from_font_bytes(font_bytes)?;
        self.font = Some(vello_cpu::peniko::FontData::new(
            vello_cpu::peniko::Blob::from(engine.font_bytes().to_vec()),
            0,
        ));
        self.text = Some(engine);
        self.layouts.clear();
        Ok(self)
    }

    /// Background the frame is cleared to.
    pub fn with_clear_color(mut self, color: Color) -> Self {
        self.clear_color = color;
        self
    }

    /// Rasterize `list` into a premultiplied frame.
    #[tracing::instrument(skip_all, fields(width = list.width, height = list.height))]
    pub fn render(&mut self, list: &DisplayList) -> FxResult<FrameRGBA> {
        let (w, h) = (list.width, list.height);
        let len = (w as usize) * (h as usize) * 4;
        let mut data = vec![0u8; len];
        clear(&mut data, self.clear_color.to_rgba8_premul());
        if w == 0 || h == 0 {
            return Ok(FrameRGBA {
                width: w,
                height: h,
                data,
                premultiplied: true,
            });
        }
        let w16: u16 = w
            .try_into()
            .map_err(|_| FxError::render("frame width exceeds u16"))?;
        let h16: u16 = h
            .try_into()
            .map_err(|_| FxError::render("frame height exceeds u16"))?;

        let mut batch: Vec<&DrawOp> = Vec::new();
        for op in &list.ops {
            if is_plain(op) {
                batch.push(op);
                continue;
            }
            self.flush_batch(&mut batch, &mut data, w16, h16)?;
            self.draw_layered(op, list, &mut data, w16, h16)?;
        }
        self.flush_batch(&mut batch, &mut data, w16, h16)?;

        Ok(FrameRGBA {
            width: w,
            height: h,
            data,
            premultiplied: true,
        })
    }

    fn flush_batch(
        &mut self,
        batch: &mut Vec<&DrawOp>,
        dst: &mut [u8],
        w: u16,
        h: u16,
    ) -> FxResult<()> {
        if batch.is_empty() {
            return Ok(());
        }
        let mut ctx = vello_cpu::RenderContext::new(w, h);
        for op in batch.iter() {
            self.draw_op(&mut ctx, op, None, Affine::IDENTITY)?;
        }
        let layer = finish(&mut ctx, w, h);
        batch.clear();
        over_in_place(dst, layer.data_as_u8_slice(), 1.0)
    }

    fn draw_layered(
        &mut self,
        op: &DrawOp,
        list: &DisplayList,
        dst: &mut [u8],
        w: u16,
        h: u16,
    ) -> FxResult<()> {
        let clip = match op.clip {
            Some(i) => Some(clip_coverage(list.clips.get(i).map(Vec::as_slice), w, h)?),
            None => None,
        };
        let mask = op.mask.and_then(|i| list.masks.get(i));

        if let Some(shadow) = op.shadow {
            self.draw_shadow(op, shadow, clip.as_deref(), mask, dst, w, h)?;
        }

        let mut ctx = vello_cpu::RenderContext::new(w, h);
        self.draw_op(&mut ctx, op, None, Affine::IDENTITY)?;
        let layer = finish(&mut ctx, w, h);
        let mut bytes = layer.data_as_u8_slice().to_vec();
        if let Some(cov) = &clip {
            mask_in_place(&mut bytes, cov)?;
        }
        if let Some(m) = mask {
            soft_mask_in_place(&mut bytes, u32::from(w), Point::ORIGIN, m);
        }
        over_in_place(dst, &bytes, 1.0)
    }

    /// Blur the op's shadow inside its device bounds grown by the kernel radius.
    #[allow(clippy::too_many_arguments)]
    fn draw_shadow(
        &mut self,
        op: &DrawOp,
        shadow: Shadow,
        clip: Option<&[u8]>,
        mask: Option<&SoftMask>,
        dst: &mut [u8],
        w: u16,
        h: u16,
    ) -> FxResult<()> {
        let (radius, sigma) = shadow_kernel(shadow.blur);
        let offset = Affine::translate(shadow.offset);
        let reach = f64::from(radius) + 2.0;
        let Some(win) = device_bounds(op, offset)
            .map(|r| r.inflate(reach, reach))
            .and_then(|r| PixelWindow::covering(r, u32::from(w), u32::from(h)))
        else {
            return Ok(());
        };
        let tile_w = u16::try_from(win.w).map_err(|_| FxError::render("shadow tile too wide"))?;
        let tile_h = u16::try_from(win.h).map_err(|_| FxError::render("shadow tile too tall"))?;

        let mut ctx = vello_cpu::RenderContext::new(tile_w, tile_h);
        let tint = shadow.color.fade(op.color.a);
        let pre = Affine::translate(-win.origin().to_vec2()) * offset;
        self.draw_op(&mut ctx, op, Some(tint), pre)?;
        let layer = finish(&mut ctx, tile_w, tile_h);
        let mut blurred = blur_rgba8_premul(layer.data_as_u8_slice(), win.w, win.h, radius, sigma)?;
        if let Some(cov) = clip {
            mask_in_place(&mut blurred, &crop(cov, u32::from(w), win)?)?;
        }
        if let Some(m) = mask {
            soft_mask_in_place(&mut blurred, win.w, win.origin(), m);
        }
        over_window(dst, u32::from(w), &blurred, win)
    }

    fn draw_op(
        &mut self,
        ctx: &mut vello_cpu::RenderContext,
        op: &DrawOp,
        tint: Option<Color>,
        pre: Affine,
    ) -> FxResult<()> {
        let color = tint.unwrap_or(op.color);
        let [r, g, b, a] = color.fade(op.alpha).to_rgba8();
        if a == 0 {
            return Ok(());
        }
        ctx.set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);
        ctx.set_transform(affine_to_cpu(pre * op.transform));
        ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(r, g, b, a));

        match &op.shape {
            DrawShape::Rect(rect) => ctx.fill_rect(&rect_to_cpu(*rect)),
            DrawShape::Path(path) => ctx.fill_path(&bezpath_to_cpu(path)),
            DrawShape::Stroke { path, width } => {
                let outline = kurbo::stroke(
                    path.iter(),
                    &kurbo::Stroke::new(*width),
                    &kurbo::StrokeOpts::default(),
                    0.1,
                );
                ctx.fill_path(&bezpath_to_cpu(&outline));
            }
            DrawShape::Text {
                text,
                font,
                x,
                y,
                width,
            } => {
                let size = font.safe_size();
                let Some(font_data) = self.font.clone() else {
                    let half = size * 0.35;
                    ctx.fill_rect(&rect_to_cpu(Rect::new(*x, y - half, x + width, y + half)));
                    return Ok(());
                };
                let layout = self.layout_for(text, size as f32)?;
                let top = y - f64::from(layout.height()) / 2.0;
                ctx.set_transform(affine_to_cpu(
                    pre * op.transform * Affine::translate((*x, top)),
                ));
                for line in layout.lines() {
                    for item in line.items() {
                        let parley::layout::PositionedLayoutItem::GlyphRun(run) = item else {
                            continue;
                        };
                        let glyphs = run.positioned_glyphs().map(|g| vello_cpu::Glyph {
                            id: g.id,
                            x: g.x,
                            y: g.y,
                        });
                        ctx.glyph_run(&font_data)
                            .font_size(run.run().font_size())
                            .fill_glyphs(glyphs);
                    }
                }
            }
        }
        Ok(())
    }

    fn layout_for(
        &mut self,
        text: &str,
        size: f32,
    ) -> FxResult<&parley::Layout<TextBrushRgba8>> {
        let key = (text.to_owned(), size.to_bits());
        if !self.layouts.contains_key(&key) {
            let engine = self
                .text
                .as_mut()
                .ok_or_else(|| FxError::render("no font loaded"))?;
            let layout = engine.layout_line(text, size, TextBrushRgba8::default())?;
            if self.layouts.len() >= LAYOUT_CACHE_CAP {
                self.layouts.clear();
            }
            self.layouts.insert(key.clone(), layout);
        }
        self.layouts
            .get(&key)
            .ok_or_else(|| FxError::render("text layout cache miss"))
    }
}

fn is_plain(op: &DrawOp) -> bool {
    op.shadow.is_none() && op.clip.is_none() && op.mask.is_none()
}

fn finish(ctx: &mut vello_cpu::RenderContext, w: u16, h: u16) -> vello_cpu::Pixmap {
    let mut pixmap = vello_cpu::Pixmap::new(w, h);
    ctx.flush();
    ctx.render_to_pixmap(&mut pixmap);
    pixmap
}

/// Device-space bounds of what `op` paints once `pre` is applied, or `None` if unbounded.
fn device_bounds(op: &DrawOp, pre: Affine) -> Option<Rect> {
    let local = match &op.shape {
        DrawShape::Rect(rect) => *rect,
        DrawShape::Path(path) => path.bounding_box(),
        DrawShape::Stroke { path, width } => {
            let pad = width / 2.0 + 1.0;
            path.bounding_box().inflate(pad, pad)
        }
        DrawShape::Text {
            font,
            x,
            y,
            width,
            ..
        } => {
            let size = font.safe_size();
            Rect::new(x - size * 0.25, y - size, x + width + size * 0.25, y + size)
        }
    };
    let device = (pre * op.transform).transform_rect_bbox(local);
    device.is_finite().then_some(device)
}

/// Coverage of the intersection of device-space `paths`, as an RGBA8 buffer whose alpha is
/// the coverage.
fn clip_coverage(paths: Option<&[BezPath]>, w: u16, h: u16) -> FxResult<Vec<u8>> {
    let len = usize::from(w) * usize::from(h) * 4;
    let mut acc = vec![255u8; len];
    let Some(paths) = paths else {
        return Ok(acc);
    };
    for path in paths {
        let mut ctx = vello_cpu::RenderContext::new(w, h);
        ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
        ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(255, 255, 255, 255));
        ctx.fill_path(&bezpath_to_cpu(path));
        let layer = finish(&mut ctx, w, h);
        mask_in_place(&mut acc, layer.data_as_u8_slice())?;
    }
    Ok(acc)
}

fn affine_to_cpu(a: Affine) -> vello_cpu::kurbo::Affine {
    vello_cpu::kurbo::Affine::new(a.as_coeffs())
}

fn point_to_cpu(p: kurbo::Point) -> vello_cpu::kurbo::Point {
    vello_cpu::kurbo::Point::new(p.x, p.y)
}

fn rect_to_cpu(r: Rect) -> vello_cpu::kurbo::Rect {
    vello_cpu::kurbo::Rect::new(r.x0, r.y0, r.x1, r.y1)
}

fn bezpath_to_cpu(path: &BezPath) -> vello_cpu::kurbo::BezPath {
    use kurbo::PathEl;

    let mut out = vello_cpu::kurbo::BezPath::new();
    for &el in path.elements() {
        match el {
            PathEl::MoveTo(p) => out.move_to(point_to_cpu(p)),
            PathEl::LineTo(p) => out.line_to(point_to_cpu(p)),
            PathEl::QuadTo(p1, p2) => out.quad_to(point_to_cpu(p1), point_to_cpu(p2)),
            PathEl::CurveTo(p1, p2, p3) => {
                out.curve_to(point_to_cpu(p1), point_to_cpu(p2), point_to_cpu(p3));
            }
            PathEl::ClosePath => out.close_path(),
        }
    }
    out
}
