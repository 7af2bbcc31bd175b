//! Burst particles
//!
//! Purely decorative: particles never touch score or nodes.

use glam::Vec2;

use super::state::{GameState, Particle};
use crate::consts::*;
use crate::random_in;

impl Particle {
    /// Advance one frame. Returns false once the particle has expired.
    pub fn step(&mut self) -> bool {
        self.pos += self.vel;
        self.radius *= PARTICLE_SHRINK;
        self.life -= 1;
        self.life > 0
    }
}

/// Spawn a burst of particles at `at`
pub fn burst(state: &mut GameState, at: Vec2) {
    state.particles.reserve(BURST_PARTICLES);
    for _ in 0..BURST_PARTICLES {
        let radius = random_in(&mut state.rng, PARTICLE_MIN_RADIUS, PARTICLE_MAX_RADIUS);
        let vel = Vec2::new(
            random_in(&mut state.rng, -PARTICLE_MAX_SPEED, PARTICLE_MAX_SPEED),
            random_in(&mut state.rng, -PARTICLE_MAX_SPEED, PARTICLE_MAX_SPEED),
        );
        state.particles.push(Particle {
            pos: at,
            vel,
            radius,
            life: PARTICLE_LIFE as i32,
        });
    }
}

/// Advance every particle one frame and drop the expired ones
pub fn update_particles(particles: &mut Vec<Particle>) {
    particles.retain_mut(Particle::step);
}
