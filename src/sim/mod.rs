//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed frame step only
//! - Seeded RNG only
//! - Timers fire from one queue on the simulation clock
//! - No rendering or platform dependencies

pub mod input;
pub mod particles;
pub mod scheduler;
pub mod spawn;
pub mod state;
pub mod tick;

pub use input::{hit_test, pointer_down, to_canvas_coords};
pub use particles::{burst, update_particles};
pub use scheduler::{Scheduler, TimerKind};
pub use spawn::{expire_node, fire_spawn_timer, spawn_node};
pub use state::{GameEvent, GamePhase, GameState, Node, Particle};
pub use tick::{TickInput, tick};
