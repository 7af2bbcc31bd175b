//! Game state and core simulation types
//!
//! The session owns every piece of mutable gameplay state: counters, live
//! nodes, particles, the timer queue and the RNG.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::scheduler::{Scheduler, TimerKind};
use crate::tuning::Tuning;

/// Current phase of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Start screen, nothing spawns
    Ready,
    /// Active gameplay
    Running,
    /// Escape limit reached
    GameOver,
}

/// A clickable target
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub id: u32,
    pub pos: Vec2,
    /// Units per frame; zero for stationary nodes
    pub vel: Vec2,
    pub radius: f32,
    /// Simulation time of spawn (ms)
    pub created_at_ms: f64,
}

impl Node {
    /// Whether `point` lies strictly inside the node
    #[inline]
    pub fn contains(&self, point: Vec2) -> bool {
        self.pos.distance(point) < self.radius
    }

    /// Advance by velocity, reflecting off the `[0, bounds]` box
    pub fn step(&mut self, bounds: Vec2) {
        if self.vel == Vec2::ZERO {
            return;
        }
        self.pos += self.vel;
        if self.pos.x < 0.0 || self.pos.x > bounds.x {
            self.vel.x = -self.vel.x;
        }
        if self.pos.y < 0.0 || self.pos.y > bounds.y {
            self.vel.y = -self.vel.y;
        }
    }
}

/// A decaying burst fragment
#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    /// Frames left to live
    pub life: i32,
}

/// Signals for the presentation layer, drained once per frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GameEvent {
    Started,
    NodeSpawned { id: u32 },
    NodeHit { id: u32, pos: Vec2, score: u32 },
    NodeEscaped { id: u32, escaped: u32 },
    SpawnIntervalChanged { interval_ms: f64 },
    GameOver { score: u32 },
    Reset,
}

/// Complete session state (deterministic for a given seed and input stream)
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    /// Balance for this session
    pub tuning: Tuning,
    /// Current phase
    pub phase: GamePhase,
    /// Successful hits
    pub score: u32,
    /// Nodes that outlived their lifetime
    pub escaped: u32,
    /// Live nodes in spawn order (last is topmost)
    pub nodes: Vec<Node>,
    /// Live particles
    pub particles: Vec<Particle>,
    /// Current spawn period (ms)
    pub spawn_interval_ms: f64,
    /// Simulation clock (ms)
    pub now_ms: f64,
    /// Frames stepped since the session started
    pub frame: u64,
    /// Playfield size (canvas width, height)
    pub bounds: Vec2,
    /// Pending presentation events
    pub events: Vec<GameEvent>,
    pub(crate) rng: Pcg32,
    pub(crate) scheduler: Scheduler,
    /// Bumped to invalidate queued spawn timers
    pub(crate) spawn_generation: u32,
    /// Highest score multiple already applied to the spawn interval
    pub(crate) difficulty_level: u32,
    next_id: u32,
}

impl GameState {
    /// Create a session on the start screen
    pub fn new(seed: u64, tuning: Tuning, bounds: Vec2) -> Self {
        let tuning = tuning.validated();
        let spawn_interval_ms = tuning.initial_spawn_interval_ms;
        Self {
            seed,
            tuning,
            phase: GamePhase::Ready,
            score: 0,
            escaped: 0,
            nodes: Vec::new(),
            particles: Vec::new(),
            spawn_interval_ms,
            now_ms: 0.0,
            frame: 0,
            bounds,
            events: Vec::new(),
            rng: Pcg32::seed_from_u64(seed),
            scheduler: Scheduler::new(),
            spawn_generation: 0,
            difficulty_level: 0,
            next_id: 1,
        }
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        self.phase == GamePhase::Running
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Update the playfield size (canvas resized)
    pub fn set_bounds(&mut self, width: f32, height: f32) {
        self.bounds = Vec2::new(width.max(0.0), height.max(0.0));
    }

    /// Take all events raised since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Pending timers (spawn and expiry)
    pub fn pending_timers(&self) -> usize {
        self.scheduler.len()
    }

    /// Begin a fresh session and arm the spawn timer
    pub fn start(&mut self) {
        self.clear_session();
        self.phase = GamePhase::Running;
        self.schedule_spawn(self.now_ms + self.spawn_interval_ms);
        self.events.push(GameEvent::Started);
        log::info!("Session started (seed {})", self.seed);
    }

    /// End the session; pending expiry timers become no-ops
    pub fn game_over(&mut self) {
        if !self.is_running() {
            return;
        }
        self.phase = GamePhase::GameOver;
        self.cancel_spawn_timer();
        self.events.push(GameEvent::GameOver { score: self.score });
        log::info!("Game over: score {}, escaped {}", self.score, self.escaped);
    }

    /// Stop everything and return to the start screen
    pub fn reset(&mut self) {
        self.clear_session();
        self.phase = GamePhase::Ready;
        self.events.push(GameEvent::Reset);
        log::info!("Session reset");
    }

    /// Invalidate any queued spawn timer
    pub(crate) fn cancel_spawn_timer(&mut self) {
        self.spawn_generation = self.spawn_generation.wrapping_add(1);
    }

    /// Queue the next spawn under the current generation
    pub(crate) fn schedule_spawn(&mut self, due_ms: f64) {
        self.scheduler.schedule(
            due_ms,
            TimerKind::Spawn {
                generation: self.spawn_generation,
            },
        );
    }

    fn clear_session(&mut self) {
        self.cancel_spawn_timer();
        self.scheduler.clear();
        self.score = 0;
        self.escaped = 0;
        self.nodes.clear();
        self.particles.clear();
        self.spawn_interval_ms = self.tuning.initial_spawn_interval_ms;
        self.difficulty_level = 0;
        self.frame = 0;
    }
}
