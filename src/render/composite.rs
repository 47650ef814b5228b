use std::ops::Range;

use crate::canvas::SoftMask;
use crate::foundation::core::{Point, Rect};
use crate::foundation::error::{FxError, FxResult};
use crate::foundation::math::mul_div255_u8;

pub(crate) type PremulRgba8 = [u8; 4];

/// Source-over for premultiplied pixels with an extra opacity factor.
pub(crate) fn over(dst: PremulRgba8, src: PremulRgba8, opacity: f32) -> PremulRgba8 {
    let opacity = opacity.clamp(0.0, 1.0);
    if opacity <= 0.0 || src[3] == 0 {
        return dst;
    }

    let op = ((opacity * 255.0).round() as i32).clamp(0, 255) as u16;
    let sa = mul_div255_u8(u16::from(src[3]), op);
    if sa == 0 {
        return dst;
    }
    let inv = 255u16 - u16::from(sa);

    let mut out = [0u8; 4];
    out[3] = sa.saturating_add(mul_div255_u8(u16::from(dst[3]), inv));
    for i in 0..3 {
        let sc = mul_div255_u8(u16::from(src[i]), op);
        let dc = mul_div255_u8(u16::from(dst[i]), inv);
        out[i] = sc.saturating_add(dc);
    }
    out
}

pub(crate) fn over_in_place(dst: &mut [u8], src: &[u8], opacity: f32) -> FxResult<()> {
    check_pair(dst, src)?;
    for (d, s) in dst.chunks_exact_mut(4).zip(src.chunks_exact(4)) {
        let out = over([d[0], d[1], d[2], d[3]], [s[0], s[1], s[2], s[3]], opacity);
        d.copy_from_slice(&out);
    }
    Ok(())
}

/// Scale every pixel of `dst` by the alpha of the matching `coverage` pixel (`destination-in`).
pub(crate) fn mask_in_place(dst: &mut [u8], coverage: &[u8]) -> FxResult<()> {
    check_pair(dst, coverage)?;
    for (d, m) in dst.chunks_exact_mut(4).zip(coverage.chunks_exact(4)) {
        let a = u16::from(m[3]);
        if a == 255 {
            continue;
        }
        for c in d.iter_mut() {
            *c = mul_div255_u8(u16::from(*c), a);
        }
    }
    Ok(())
}

/// Scale `dst` by a device-space soft mask sampled at pixel centres.
///
/// `dst` is a tile `width` pixels wide whose top-left pixel sits at `origin` in device space.
pub(crate) fn soft_mask_in_place(dst: &mut [u8], width: u32, origin: Point, mask: &SoftMask) {
    if width == 0 {
        return;
    }
    for (i, d) in dst.chunks_exact_mut(4).enumerate() {
        if d[3] == 0 {
            continue;
        }
        let x = origin.x + (i % width as usize) as f64 + 0.5;
        let y = origin.y + (i / width as usize) as f64 + 0.5;
        let k = (mask.coverage(Point::new(x, y)) * 255.0).round() as u16;
        for c in d.iter_mut() {
            *c = mul_div255_u8(u16::from(*c), k);
        }
    }
}

/// Pixel rectangle inside a frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct PixelWindow {
    pub x: u32,
    pub y: u32,
    pub w: u32,
    pub h: u32,
}

impl PixelWindow {
    /// Smallest window covering `rect`, cut to a `width` by `height` frame.
    ///
    /// `None` when nothing of `rect` lands on the frame.
    pub fn covering(rect: Rect, width: u32, height: u32) -> Option<Self> {
        if [rect.x0, rect.y0, rect.x1, rect.y1].iter().any(|v| v.is_nan()) {
            return None;
        }
        let (x0, y0) = (rect.x0.floor().max(0.0), rect.y0.floor().max(0.0));
        let x1 = rect.x1.ceil().min(f64::from(width));
        let y1 = rect.y1.ceil().min(f64::from(height));
        if !(x0 < x1 && y0 < y1) {
            return None;
        }
        Some(Self {
            x: x0 as u32,
            y: y0 as u32,
            w: (x1 - x0) as u32,
            h: (y1 - y0) as u32,
        })
    }

    /// Device position of the top-left pixel.
    pub fn origin(&self) -> Point {
        Point::new(f64::from(self.x), f64::from(self.y))
    }

    fn rows(self, width: u32) -> impl Iterator<Item = Range<usize>> {
        let row = self.w as usize * 4;
        (0..self.h as usize).map(move |j| {
            let start = ((self.y as usize + j) * width as usize + self.x as usize) * 4;
            start..start + row
        })
    }
}

/// Copy `win` out of a frame `width` pixels wide.
pub(crate) fn crop(src: &[u8], width: u32, win: PixelWindow) -> FxResult<Vec<u8>> {
    let mut out = Vec::with_capacity(win.w as usize * win.h as usize * 4);
    for range in win.rows(width) {
        let line = src
            .get(range)
            .ok_or_else(|| FxError::render("window outside frame"))?;
        out.extend_from_slice(line);
    }
    Ok(out)
}

/// Source-over a `win`-sized `tile` onto a frame `width` pixels wide.
pub(crate) fn over_window(
    dst: &mut [u8],
    width: u32,
    tile: &[u8],
    win: PixelWindow,
) -> FxResult<()> {
    let row = win.w as usize * 4;
    if tile.len() != row * win.h as usize {
        return Err(FxError::render("tile does not match its window"));
    }
    if row == 0 {
        return Ok(());
    }
    for (range, src) in win.rows(width).zip(tile.chunks_exact(row)) {
        let line = dst
            .get_mut(range)
            .ok_or_else(|| FxError::render("window outside frame"))?;
        over_in_place(line, src, 1.0)?;
    }
    Ok(())
}

pub(crate) fn clear(dst: &mut [u8], rgba: PremulRgba8) {
    for px in dst.chunks_exact_mut(4) {
        px.copy_from_slice(&rgba);
    }
}

fn check_pair(a: &[u8], b: &[u8]) -> FxResult<()> {
    if a.len() != b.len() || !a.len().is_multiple_of(4) {
        return Err(FxError::render("expected equal-length rgba8 buffers"));
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/render/composite.rs"]
mod tests;
