//! Full-canvas effects drawn behind the lyrics.

mod particle_field;

pub use particle_field::ParticleField;
