//! Node Burst - a reflex game played on a canvas
//!
//! Core modules:
//! - `sim`: Deterministic simulation (spawning, hit tests, particles, game state)
//! - `renderer`: Draws a game state onto a 2D surface
//! - `tuning`: Data-driven game balance
//! - `settings`: Player preferences
//! - `ui`: Overlay and HUD mapping for the DOM shell

pub mod renderer;
pub mod settings;
pub mod sim;
pub mod tuning;
pub mod ui;

pub use settings::Settings;
pub use tuning::{MotionStyle, Tuning};

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep in milliseconds (one display frame at 60 Hz)
    pub const FRAME_MS: f64 = 1000.0 / 60.0;
    /// Maximum substeps per display frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Largest frame delta the shell feeds the accumulator (ms)
    pub const MAX_FRAME_DELTA_MS: f64 = 100.0;

    /// Node defaults
    pub const NODE_RADIUS: f32 = 20.0;
    /// Distance kept between a spawned node and each canvas edge
    pub const SPAWN_MARGIN: f32 = 50.0;

    /// Node lifetime before it escapes (ms)
    pub const NODE_LIFETIME_MS: f64 = 2000.0;
    /// Escaped nodes that end the session
    pub const MAX_ESCAPED: u32 = 5;

    /// Spawn interval at session start (ms)
    pub const INITIAL_SPAWN_INTERVAL_MS: f64 = 1000.0;
    /// Spawn interval floor (ms)
    pub const MIN_SPAWN_INTERVAL_MS: f64 = 500.0;
    /// Interval reduction per difficulty step (ms)
    pub const SPAWN_INTERVAL_STEP_MS: f64 = 5.0;
    /// Score multiple that triggers a difficulty step
    pub const DIFFICULTY_SCORE_STEP: u32 = 10;

    /// Score at which newly spawned nodes start moving
    pub const MOVEMENT_SCORE_THRESHOLD: u32 = 100;
    /// Max per-axis node speed (units per frame)
    pub const NODE_MAX_SPEED: f32 = 2.0;
    /// Max per-axis render jitter for glitch-style nodes
    pub const GLITCH_JITTER: f32 = 2.0;

    /// Particles created by one burst
    pub const BURST_PARTICLES: usize = 15;
    /// Particle lifetime in frames
    pub const PARTICLE_LIFE: u32 = 30;
    /// Max per-axis particle speed (units per frame)
    pub const PARTICLE_MAX_SPEED: f32 = 3.0;
    /// Per-frame radius multiplier
    pub const PARTICLE_SHRINK: f32 = 0.95;
    /// Starting particle radius range
    pub const PARTICLE_MIN_RADIUS: f32 = 2.0;
    pub const PARTICLE_MAX_RADIUS: f32 = 5.0;
}

/// Uniform sample in `[min, max]`, collapsing to `min` for empty or
/// unbounded ranges
#[inline]
pub fn random_in<R: rand::Rng>(rng: &mut R, min: f32, max: f32) -> f32 {
    if max <= min || !(max - min).is_finite() {
        return min;
    }
    rng.random_range(min..=max)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_random_in_degenerate_ranges() {
        let mut rng = Pcg32::seed_from_u64(1);
        assert_eq!(random_in(&mut rng, 3.0, 3.0), 3.0);
        assert_eq!(random_in(&mut rng, 5.0, 1.0), 5.0);
        assert_eq!(random_in(&mut rng, -f32::INFINITY, f32::INFINITY), -f32::INFINITY);
        let x = random_in(&mut rng, -2.0, 2.0);
        assert!((-2.0..=2.0).contains(&x));
    }
}
