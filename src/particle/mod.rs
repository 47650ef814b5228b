//! Pooled particles with fixed-capacity trails.

pub(crate) mod pool;
pub(crate) mod trail;

pub use pool::{Particle, ParticlePool};
pub use trail::TrailBuffer;
