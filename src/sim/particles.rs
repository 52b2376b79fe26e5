//! Fire particles shown while the player burns (visual only)

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

/// Maximum live particles; emission stops when full
pub const MAX_PARTICLES: usize = 256;

/// Particles emitted per burn cue
pub const PARTICLES_PER_CUE: usize = 3;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Particle {
    pub pos: Vec2,
    /// Pixels per second
    pub vel: Vec2,
    pub radius: f32,
    /// Seconds since emission
    pub age: f32,
}

impl Particle {
    /// Colour stage for the renderer: 0 yellow, 1 red, 2 fading maroon
    pub fn stage(&self) -> u8 {
        if self.age > 0.15 {
            2
        } else if self.age > 0.05 {
            1
        } else {
            0
        }
    }
}

/// Seeded pool of fire particles
#[derive(Debug, Clone)]
pub struct FireParticles {
    pub particles: Vec<Particle>,
    rng: Pcg32,
}

impl FireParticles {
    pub fn new(seed: u64) -> Self {
        Self {
            particles: Vec::with_capacity(MAX_PARTICLES),
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    /// Puff a few embers upward from `at`
    pub fn emit(&mut self, at: Vec2) {
        for _ in 0..PARTICLES_PER_CUE {
            if self.particles.len() >= MAX_PARTICLES {
                return;
            }
            let vel = Vec2::new(
                self.rng.random_range(-7.5..7.5),
                -self.rng.random_range(18.0..33.0),
            );
            let radius = self.rng.random_range(1.0..3.0);
            self.particles.push(Particle {
                pos: at,
                vel,
                radius,
                age: 0.0,
            });
        }
    }

    /// Drift, shrink and cull
    pub fn update(&mut self, dt: f32) {
        for p in &mut self.particles {
            p.pos += p.vel * dt;
            p.radius -= 6.0 * dt;
            p.age += dt;
        }
        self.particles.retain(|p| p.radius > 0.2);
    }

    pub fn clear(&mut self) {
        self.particles.clear();
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_emit_rises_and_dies() {
        let mut fire = FireParticles::new(7);
        fire.emit(Vec2::new(100.0, 100.0));
        assert_eq!(fire.len(), PARTICLES_PER_CUE);
        fire.update(0.1);
        assert!(fire.particles.iter().all(|p| p.pos.y < 100.0));
        for _ in 0..60 {
            fire.update(1.0 / 60.0);
        }
        assert!(fire.is_empty());
    }

    #[test]
    fn test_pool_is_capped() {
        let mut fire = FireParticles::new(1);
        for _ in 0..200 {
            fire.emit(Vec2::ZERO);
        }
        assert_eq!(fire.len(), MAX_PARTICLES);
    }

    #[test]
    fn test_same_seed_same_embers() {
        let mut a = FireParticles::new(42);
        let mut b = FireParticles::new(42);
        a.emit(Vec2::ZERO);
        b.emit(Vec2::ZERO);
        for (x, y) in a.particles.iter().zip(&b.particles) {
            assert_eq!(x.vel, y.vel);
        }
    }

    #[test]
    fn test_stage_progresses_with_age() {
        let mut p = Particle {
            pos: Vec2::ZERO,
            vel: Vec2::ZERO,
            radius: 2.0,
            age: 0.0,
        };
        assert_eq!(p.stage(), 0);
        p.age = 0.1;
        assert_eq!(p.stage(), 1);
        p.age = 0.2;
        assert_eq!(p.stage(), 2);
    }
}
