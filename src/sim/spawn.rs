//! Node spawning, lifetime expiry and difficulty scaling

use glam::Vec2;

use super::scheduler::TimerKind;
use super::state::{GameEvent, GameState, Node};
use crate::consts::*;
use crate::random_in;
use crate::tuning::MotionStyle;

/// Handle a spawn timer firing at `due_ms`
///
/// Stale generations and timers outliving the session are dropped. Otherwise
/// a node is spawned and the next spawn is queued one interval after `due_ms`
/// (or after the restart the difficulty step already queued).
pub fn fire_spawn_timer(state: &mut GameState, generation: u32, due_ms: f64) {
    if generation != state.spawn_generation || !state.is_running() {
        log::trace!("Dropping stale spawn timer (generation {})", generation);
        return;
    }

    let restarted = apply_difficulty(state, due_ms);
    spawn_node_at(state, due_ms);
    if !restarted {
        state.schedule_spawn(due_ms + state.spawn_interval_ms);
    }
}

/// Spawn one node at a random position inside the spawn margin
///
/// Returns the new node's ID, or `None` when the session is not running.
pub fn spawn_node(state: &mut GameState) -> Option<u32> {
    let now_ms = state.now_ms;
    spawn_node_at(state, now_ms)
}

/// Spawn a node whose lifetime starts at `created_at_ms`
fn spawn_node_at(state: &mut GameState, created_at_ms: f64) -> Option<u32> {
    if !state.is_running() {
        return None;
    }

    let bounds = state.bounds;
    let pos = Vec2::new(spawn_coord(state, bounds.x), spawn_coord(state, bounds.y));
    let vel = spawn_velocity(state);

    let id = state.next_entity_id();
    state.nodes.push(Node {
        id,
        pos,
        vel,
        radius: NODE_RADIUS,
        created_at_ms,
    });
    state.scheduler.schedule(
        created_at_ms + state.tuning.node_lifetime_ms,
        TimerKind::Expire { node_id: id },
    );
    state.events.push(GameEvent::NodeSpawned { id });
    log::debug!("Spawned node {} at ({:.0}, {:.0})", id, pos.x, pos.y);

    Some(id)
}

/// Remove a node whose lifetime elapsed and count it as escaped
///
/// No-op (returns false) if the node is already gone or the session is no
/// longer running; a node can only escape once.
pub fn expire_node(state: &mut GameState, node_id: u32) -> bool {
    if !state.is_running() {
        return false;
    }
    let Some(index) = state.nodes.iter().position(|n| n.id == node_id) else {
        return false;
    };

    state.nodes.remove(index);
    state.escaped += 1;
    state.events.push(GameEvent::NodeEscaped {
        id: node_id,
        escaped: state.escaped,
    });
    log::debug!("Node {} escaped ({}/{})", node_id, state.escaped, state.tuning.max_escaped);

    if state.escaped >= state.tuning.max_escaped {
        state.game_over();
    }
    true
}

/// Shorten the spawn interval once per newly reached score multiple
///
/// Returns true when the spawn timer was restarted at the new interval.
fn apply_difficulty(state: &mut GameState, now_ms: f64) -> bool {
    let level = state.score / state.tuning.difficulty_score_step;
    if level <= state.difficulty_level {
        return false;
    }
    let steps = level - state.difficulty_level;
    state.difficulty_level = level;

    let interval = (state.spawn_interval_ms - state.tuning.spawn_interval_step_ms * steps as f64)
        .max(state.tuning.min_spawn_interval_ms);
    if interval == state.spawn_interval_ms {
        return false;
    }

    state.spawn_interval_ms = interval;
    state.cancel_spawn_timer();
    state.schedule_spawn(now_ms + interval);
    state.events.push(GameEvent::SpawnIntervalChanged { interval_ms: interval });
    log::info!("Spawn interval now {} ms (score {})", interval, state.score);
    true
}

fn spawn_coord(state: &mut GameState, extent: f32) -> f32 {
    let (min, max) = (SPAWN_MARGIN, extent - SPAWN_MARGIN);
    if max < min {
        return extent / 2.0;
    }
    random_in(&mut state.rng, min, max)
}

fn spawn_velocity(state: &mut GameState) -> Vec2 {
    let speed = state.tuning.node_max_speed;
    if state.tuning.motion != MotionStyle::Bounce
        || state.score < state.tuning.movement_score_threshold
        || speed <= 0.0
    {
        return Vec2::ZERO;
    }
    loop {
        let vel = Vec2::new(
            random_in(&mut state.rng, -speed, speed),
            random_in(&mut state.rng, -speed, speed),
        );
        if vel != Vec2::ZERO {
            return vel;
        }
    }
}
