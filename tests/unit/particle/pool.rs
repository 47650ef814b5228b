use super::*;

#[test]
fn acquire_fails_at_capacity() {
    let mut pool = ParticlePool::new(2);
    assert!(pool.acquire().is_some());
    assert!(pool.acquire().is_some());
    assert!(pool.acquire().is_none());
    assert_eq!(pool.len(), 2);
}

#[test]
fn release_swaps_with_last_and_reuses_slot() {
    let mut pool = ParticlePool::new(3);
    for i in 0..3 {
        if let Some(p) = pool.acquire() {
            p.size = f64::from(i);
        }
    }
    pool.release(0);
    assert_eq!(pool.len(), 2);
    assert_eq!(pool.active()[0].size, 2.0);

    assert!(pool.acquire().is_some());
    assert_eq!(pool.allocated(), 3);
}

#[test]
fn retain_alive_drops_dead_particles() {
    let mut pool = ParticlePool::new(4);
    for i in 0..4 {
        if let Some(p) = pool.acquire() {
            p.life = if i % 2 == 0 { 0.0 } else { 0.5 };
        }
    }
    pool.retain_alive(Particle::is_dead);
    assert_eq!(pool.len(), 2);
    assert!(pool.active().iter().all(|p| p.life > 0.0));
}

#[test]
fn integrate_applies_gravity_and_decay() {
    let mut p = Particle::default();
    p.decay = 0.5;
    p.integrate(1.0, Vec2::new(0.0, 10.0), 0.0);
    assert_eq!(p.vel, Vec2::new(0.0, 10.0));
    assert_eq!(p.pos, Point::new(0.0, 10.0));
    assert!((p.life - 0.5).abs() < 1e-9);
    assert_eq!(p.trail.len(), 1);

    p.integrate(5.0, Vec2::ZERO, 0.0);
    assert_eq!(p.life, 0.0);
    assert!(p.is_dead());
}

#[test]
fn non_finite_dt_is_ignored() {
    let mut p = Particle::default();
    p.integrate(f64::NAN, Vec2::new(0.0, 10.0), 0.0);
    assert_eq!(p.pos, Point::ORIGIN);
}
