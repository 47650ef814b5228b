/// Easing functions used to map normalized animation progress.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Ease {
    /// Linear interpolation.
    Linear,
    /// Quadratic ease-in.
    InQuad,
    /// Quadratic ease-out.
    OutQuad,
    /// Quadratic ease-in/out.
    InOutQuad,
    /// Cubic ease-in.
    InCubic,
    /// Cubic ease-out.
    OutCubic,
    /// Cubic ease-in/out.
    InOutCubic,
    /// Sinusoidal ease-in/out.
    InOutSine,
    /// Exponential ease-out.
    OutExpo,
    /// Ease-out that overshoots past 1 before settling.
    OutBack,
    /// Damped spring ease-out.
    OutElastic,
    /// Bouncing ease-out.
    OutBounce,
}

impl Ease {
    /// Option names accepted by easing parameters.
    pub const NAMES: &'static [&'static str] = &[
        "linear",
        "inQuad",
        "outQuad",
        "inOutQuad",
        "inCubic",
        "outCubic",
        "inOutCubic",
        "inOutSine",
        "outExpo",
        "outBack",
        "outElastic",
        "outBounce",
    ];

    /// Parse an option name, falling back to `OutCubic`.
    pub fn from_name(name: &str) -> Self {
        match name {
            "linear" => Self::Linear,
            "inQuad" => Self::InQuad,
            "outQuad" => Self::OutQuad,
            "inOutQuad" => Self::InOutQuad,
            "inCubic" => Self::InCubic,
            "inOutCubic" => Self::InOutCubic,
            "inOutSine" => Self::InOutSine,
            "outExpo" => Self::OutExpo,
            "outBack" => Self::OutBack,
            "outElastic" => Self::OutElastic,
            "outBounce" => Self::OutBounce,
            _ => Self::OutCubic,
        }
    }

    /// Apply this easing function to normalized progress `t` in `[0, 1]`.
    ///
    /// Every variant maps `0 -> 0` and `1 -> 1`; `OutBack` and `OutElastic` may leave `[0, 1]`
    /// in between.
    pub fn apply(self, t: f64) -> f64 {
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
        match self {
            Self::Linear => t,
            Self::InQuad => t * t,
            Self::OutQuad => 1.0 - (1.0 - t) * (1.0 - t),
            Self::InOutQuad => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    1.0 - ((-2.0 * t + 2.0).powi(2) / 2.0)
                }
            }
            Self::InCubic => t * t * t,
            Self::OutCubic => 1.0 - (1.0 - t).powi(3),
            Self::InOutCubic => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    1.0 - ((-2.0 * t + 2.0).powi(3) / 2.0)
                }
            }
            Self::InOutSine => -((std::f64::consts::PI * t).cos() - 1.0) / 2.0,
            Self::OutExpo => {
                if t >= 1.0 {
                    1.0
                } else {
                    1.0 - 2f64.powf(-10.0 * t)
                }
            }
            Self::OutBack => {
                const C1: f64 = 1.70158;
                const C3: f64 = C1 + 1.0;
                1.0 + C3 * (t - 1.0).powi(3) + C1 * (t - 1.0).powi(2)
            }
            Self::OutElastic => {
                if t <= 0.0 || t >= 1.0 {
                    return t;
                }
                let c4 = (2.0 * std::f64::consts::PI) / 3.0;
                2f64.powf(-10.0 * t) * ((t * 10.0 - 0.75) * c4).sin() + 1.0
            }
            Self::OutBounce => out_bounce(t),
        }
    }
}

fn out_bounce(t: f64) -> f64 {
    const N1: f64 = 7.5625;
    const D1: f64 = 2.75;
    if t < 1.0 / D1 {
        N1 * t * t
    } else if t < 2.0 / D1 {
        let t = t - 1.5 / D1;
        N1 * t * t + 0.75
    } else if t < 2.5 / D1 {
        let t = t - 2.25 / D1;
        N1 * t * t + 0.9375
    } else {
        let t = t - 2.625 / D1;
        N1 * t * t + 0.984375
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/ease.rs"]
mod tests;
