//! Continuous per-character motion driven by time, index and audio.

mod motion_blur;
mod neon_flicker;
mod rainbow_cycle;
mod wave;

pub use motion_blur::MotionBlur;
pub use neon_flicker::NeonFlicker;
pub use rainbow_cycle::RainbowCycle;
pub use wave::Wave;
