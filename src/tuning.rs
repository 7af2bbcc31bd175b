//! Data-driven game balance
//!
//! Every gameplay rule that has a number in it reads it from here, so a
//! session can be replayed under different balance without code changes.

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// How nodes look alive on screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum MotionStyle {
    /// Nodes stay put in the simulation but are drawn with a small random jitter
    Glitch,
    /// Nodes spawned past the movement threshold drift and bounce off the walls
    #[default]
    Bounce,
}

impl MotionStyle {
    pub fn as_str(&self) -> &'static str {
        match self {
            MotionStyle::Glitch => "Glitch",
            MotionStyle::Bounce => "Bounce",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "glitch" => Some(MotionStyle::Glitch),
            "bounce" => Some(MotionStyle::Bounce),
            _ => None,
        }
    }
}

/// Balance knobs for one session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Time a node stays clickable before it escapes (ms)
    pub node_lifetime_ms: f64,
    /// Escaped nodes that end the session
    pub max_escaped: u32,
    /// Spawn interval at session start (ms)
    pub initial_spawn_interval_ms: f64,
    /// Spawn interval floor (ms)
    pub min_spawn_interval_ms: f64,
    /// Interval reduction per difficulty step (ms)
    pub spawn_interval_step_ms: f64,
    /// Score multiple that triggers a difficulty step
    pub difficulty_score_step: u32,
    /// Score at which newly spawned nodes get a velocity
    pub movement_score_threshold: u32,
    /// Max per-axis node speed (units per frame)
    pub node_max_speed: f32,
    /// Visual/motion variant
    pub motion: MotionStyle,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            node_lifetime_ms: NODE_LIFETIME_MS,
            max_escaped: MAX_ESCAPED,
            initial_spawn_interval_ms: INITIAL_SPAWN_INTERVAL_MS,
            min_spawn_interval_ms: MIN_SPAWN_INTERVAL_MS,
            spawn_interval_step_ms: SPAWN_INTERVAL_STEP_MS,
            difficulty_score_step: DIFFICULTY_SCORE_STEP,
            movement_score_threshold: MOVEMENT_SCORE_THRESHOLD,
            node_max_speed: NODE_MAX_SPEED,
            motion: MotionStyle::Bounce,
        }
    }
}

impl Tuning {
    /// Parse tuning from JSON; absent fields keep their defaults
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let tuning: Tuning = serde_json::from_str(json)?;
        Ok(tuning.validated())
    }

    /// Clamp values into ranges the simulation can run with
    ///
    /// Non-finite numbers (JSON like `1e39` overflows to `inf` in an `f32`)
    /// fall back to their defaults.
    pub fn validated(mut self) -> Self {
        let defaults = Self::default();

        if !(self.node_lifetime_ms.is_finite() && self.node_lifetime_ms > 0.0) {
            log::warn!("Invalid node lifetime {}, using default", self.node_lifetime_ms);
            self.node_lifetime_ms = defaults.node_lifetime_ms;
        }
        if !(self.min_spawn_interval_ms.is_finite() && self.min_spawn_interval_ms > 0.0) {
            log::warn!("Invalid minimum spawn interval {}, using default", self.min_spawn_interval_ms);
            self.min_spawn_interval_ms = defaults.min_spawn_interval_ms;
        }
        if !self.initial_spawn_interval_ms.is_finite() {
            log::warn!("Invalid initial spawn interval {}, using default", self.initial_spawn_interval_ms);
            self.initial_spawn_interval_ms = defaults.initial_spawn_interval_ms;
        }
        if !(self.initial_spawn_interval_ms >= self.min_spawn_interval_ms) {
            log::warn!(
                "Initial spawn interval {} below floor {}, raising it",
                self.initial_spawn_interval_ms,
                self.min_spawn_interval_ms
            );
            self.initial_spawn_interval_ms = self.min_spawn_interval_ms;
        }
        if !(self.spawn_interval_step_ms.is_finite() && self.spawn_interval_step_ms >= 0.0) {
            log::warn!("Invalid spawn interval step {}, using default", self.spawn_interval_step_ms);
            self.spawn_interval_step_ms = defaults.spawn_interval_step_ms;
        }
        self.max_escaped = self.max_escaped.max(1);
        self.difficulty_score_step = self.difficulty_score_step.max(1);
        if !(self.node_max_speed.is_finite() && self.node_max_speed >= 0.0) {
            log::warn!("Invalid node speed {}, using default", self.node_max_speed);
            self.node_max_speed = defaults.node_max_speed;
        }

        self
    }
}
