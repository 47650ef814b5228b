use super::TrailBuffer;
use crate::foundation::core::{Color, Point, Vec2};

/// Default trail length for pooled particles.
pub const TRAIL_LEN: usize = 8;

/// A simulated point sprite.
#[derive(Clone, Debug)]
pub struct Particle {
    /// Position.
    pub pos: Point,
    /// Velocity in pixels per second.
    pub vel: Vec2,
    /// Radius in pixels.
    pub size: f64,
    /// Paint color.
    pub color: Color,
    /// Remaining life in `[0, 1]`.
    pub life: f64,
    /// Life lost per second.
    pub decay: f64,
    /// Rotation in radians.
    pub rotation: f64,
    /// Angular velocity in radians per second.
    pub spin: f64,
    /// Recent positions.
    pub trail: TrailBuffer<Point>,
}

impl Default for Particle {
    fn default() -> Self {
        Self {
            pos: Point::ORIGIN,
            vel: Vec2::ZERO,
            size: 2.0,
            color: Color::WHITE,
            life: 1.0,
            decay: 1.0,
            rotation: 0.0,
            spin: 0.0,
            trail: TrailBuffer::new(TRAIL_LEN),
        }
    }
}

impl Particle {
    /// Explicit Euler step with constant acceleration, then life decay.
    pub fn integrate(&mut self, dt: f64, accel: Vec2, drag: f64) {
        if !(dt > 0.0) || !dt.is_finite() {
            return;
        }
        self.trail.push(self.pos);
        self.vel += accel * dt;
        if drag > 0.0 {
            self.vel *= (1.0 - drag * dt).max(0.0);
        }
        self.pos += self.vel * dt;
        self.rotation += self.spin * dt;
        self.life = (self.life - self.decay * dt).clamp(0.0, 1.0);
    }

    /// Whether the particle has expired.
    pub fn is_dead(&self) -> bool {
        self.life <= 0.0
    }

    /// Reinitialize for reuse, keeping the trail allocation.
    pub fn respawn(&mut self, pos: Point, vel: Vec2, size: f64, color: Color, decay: f64) {
        self.pos = pos;
        self.vel = vel;
        self.size = size;
        self.color = color;
        self.life = 1.0;
        self.decay = decay;
        self.rotation = 0.0;
        self.spin = 0.0;
        self.trail.clear();
    }
}

/// Bounded particle storage with the active set packed at the front.
#[derive(Clone, Debug)]
pub struct ParticlePool {
    slots: Vec<Particle>,
    active: usize,
    capacity: usize,
}

impl ParticlePool {
    /// Pool holding at most `capacity` live particles.
    pub fn new(capacity: usize) -> Self {
        Self {
            slots: Vec::new(),
            active: 0,
            capacity,
        }
    }

    /// Claim a slot; `None` when the pool is full. Reused slots keep stale data until respawned.
    pub fn acquire(&mut self) -> Option<&mut Particle> {
        if self.active >= self.capacity {
            return None;
        }
        if self.active == self.slots.len() {
            self.slots.push(Particle::default());
        }
        self.active += 1;
        self.slots.get_mut(self.active - 1)
    }

    /// Free slot `i` by swapping it with the last active slot.
    pub fn release(&mut self, i: usize) {
        if i >= self.active {
            return;
        }
        self.active -= 1;
        self.slots.swap(i, self.active);
    }

    /// Release every particle for which `dead` returns true.
    pub fn retain_alive(&mut self, mut dead: impl FnMut(&Particle) -> bool) {
        let mut i = 0;
        while i < self.active {
            if dead(&self.slots[i]) {
                self.release(i);
            } else {
                i += 1;
            }
        }
    }

    /// Live particles.
    pub fn active(&self) -> &[Particle] {
        &self.slots[..self.active]
    }

    /// Live particles, mutably.
    pub fn active_mut(&mut self) -> &mut [Particle] {
        &mut self.slots[..self.active]
    }

    /// Number of live particles.
    pub fn len(&self) -> usize {
        self.active
    }

    /// Whether no particle is live.
    pub fn is_empty(&self) -> bool {
        self.active == 0
    }

    /// Maximum number of live particles.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Slots allocated so far (live or free).
    pub fn allocated(&self) -> usize {
        self.slots.len()
    }

    /// Release everything, keeping allocations.
    pub fn clear(&mut self) {
        self.active = 0;
    }
}

#[cfg(test)]
#[path = "../../tests/unit/particle/pool.rs"]
mod tests;
