#[derive(Clone, Copy, Debug)]
pub(crate) struct Fnv1a64(u64);

impl Fnv1a64 {
    pub(crate) const OFFSET_BASIS: u64 = 0xcbf2_9ce4_8422_2325;
    const PRIME: u64 = 0x0000_0100_0000_01B3;

    pub(crate) fn new(seed: u64) -> Self {
        Self(seed)
    }

    pub(crate) fn write_u64(&mut self, v: u64) {
        self.write_bytes(&v.to_le_bytes());
    }

    pub(crate) fn write_bytes(&mut self, bytes: &[u8]) {
        let mut h = self.0;
        for &b in bytes {
            h ^= u64::from(b);
            h = h.wrapping_mul(Self::PRIME);
        }
        self.0 = h;
    }

    pub(crate) fn finish(self) -> u64 {
        self.0
    }
}

pub(crate) fn mul_div255_u8(x: u16, y: u16) -> u8 {
    (((u32::from(x) * u32::from(y)) + 127) / 255) as u8
}

/// Linear interpolation without clamping.
pub fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

/// Clamp to `[0, 1]`, mapping NaN to `0`.
pub fn clamp01(x: f64) -> f64 {
    if x.is_nan() { 0.0 } else { x.clamp(0.0, 1.0) }
}

/// Hermite smoothstep of `x` between edges `a` and `b`.
pub fn smoothstep(a: f64, b: f64, x: f64) -> f64 {
    if x <= a {
        return 0.0;
    }
    if x >= b {
        return 1.0;
    }
    let t = (x - a) / (b - a);
    t * t * (3.0 - 2.0 * t)
}

/// Divide, returning `fallback` when the denominator is zero or the result is not finite.
pub fn safe_div(num: f64, den: f64, fallback: f64) -> f64 {
    if den == 0.0 {
        return fallback;
    }
    let v = num / den;
    if v.is_finite() { v } else { fallback }
}

pub(crate) fn hash_u32(seed: u64, x: u32, y: u32) -> u32 {
    let mut h = Fnv1a64::new(seed ^ Fnv1a64::OFFSET_BASIS);
    h.write_u64(u64::from(x));
    h.write_u64(u64::from(y));
    (h.finish() & 0xFFFF_FFFF) as u32
}

fn lattice(seed: u64, x: i64, y: i64) -> f64 {
    let v = hash_u32(seed, x as u32, y as u32);
    (f64::from(v) / f64::from(u32::MAX)) * 2.0 - 1.0
}

/// Smooth 1D value noise in `[-1, 1]`.
pub fn noise1(seed: u64, x: f64) -> f64 {
    noise2(seed, x, 0.0)
}

/// Smooth 2D value noise in `[-1, 1]`.
pub fn noise2(seed: u64, x: f64, y: f64) -> f64 {
    if !x.is_finite() || !y.is_finite() {
        return 0.0;
    }
    let x0 = x.floor();
    let y0 = y.floor();
    let fx = x - x0;
    let fy = y - y0;
    let (ix, iy) = (x0 as i64, y0 as i64);

    let sx = fx * fx * (3.0 - 2.0 * fx);
    let sy = fy * fy * (3.0 - 2.0 * fy);

    let a = lattice(seed, ix, iy);
    let (jx, jy) = (ix.wrapping_add(1), iy.wrapping_add(1));
    let b = lattice(seed, jx, iy);
    let c = lattice(seed, ix, jy);
    let d = lattice(seed, jx, jy);

    lerp(lerp(a, b, sx), lerp(c, d, sx), sy)
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/math.rs"]
mod tests;
