//! Frame rendering
//!
//! The game only ever draws filled circles, so any surface that can clear
//! itself and fill a circle can host it. `CanvasSurface` is the browser one.

#[cfg(target_arch = "wasm32")]
pub mod canvas;

#[cfg(target_arch = "wasm32")]
pub use canvas::CanvasSurface;

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use crate::consts::GLITCH_JITTER;
use crate::random_in;
use crate::settings::Settings;
use crate::sim::GameState;
use crate::tuning::MotionStyle;

/// sRGB color
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// `#rrggbb` form for canvas fill styles
    pub fn to_css(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

pub const NODE_COLOR: Color = Color::rgb(0x00, 0xff, 0xcc);
pub const PARTICLE_COLOR: Color = Color::rgb(0xff, 0x00, 0x44);

/// A 2D drawing target
pub trait Surface {
    /// Current (width, height)
    fn size(&self) -> Vec2;
    /// Clear the whole surface
    fn clear(&mut self);
    /// Fill a circle
    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color);
}

/// Draws one frame of a session
///
/// Owns its own RNG for the glitch jitter so drawing never perturbs the
/// simulation's random stream.
#[derive(Debug, Clone)]
pub struct Painter {
    jitter_rng: Pcg32,
    settings: Settings,
}

impl Painter {
    pub fn new(seed: u64, settings: Settings) -> Self {
        Self {
            jitter_rng: Pcg32::seed_from_u64(seed),
            settings,
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn set_settings(&mut self, settings: Settings) {
        self.settings = settings;
    }

    /// Clear, then draw nodes and particles
    pub fn draw<S: Surface + ?Sized>(&mut self, state: &GameState, surface: &mut S) {
        surface.clear();

        let jitter = state.tuning.motion == MotionStyle::Glitch && self.settings.effective_jitter();
        for node in &state.nodes {
            let offset = if jitter {
                Vec2::new(
                    random_in(&mut self.jitter_rng, -GLITCH_JITTER, GLITCH_JITTER),
                    random_in(&mut self.jitter_rng, -GLITCH_JITTER, GLITCH_JITTER),
                )
            } else {
                Vec2::ZERO
            };
            surface.fill_circle(node.pos + offset, node.radius, NODE_COLOR);
        }

        if self.settings.particles {
            for particle in &state.particles {
                surface.fill_circle(particle.pos, particle.radius, PARTICLE_COLOR);
            }
        }
    }
}
