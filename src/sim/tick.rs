//! Fixed timestep simulation tick
//!
//! Core game loop that advances a session by one frame.

use glam::Vec2;

use super::input::pointer_down;
use super::particles::update_particles;
use super::scheduler::TimerKind;
use super::spawn::{expire_node, fire_spawn_timer};
use super::state::GameState;
use crate::consts::FRAME_MS;
use crate::tuning::MotionStyle;

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Canvas-local pointer/tap positions, in arrival order
    pub pointers: Vec<Vec2>,
    /// Start button pressed
    pub start: bool,
    /// Reset button pressed
    pub reset: bool,
}

impl TickInput {
    /// Clear one-shot inputs after they have been applied
    pub fn clear(&mut self) {
        self.pointers.clear();
        self.start = false;
        self.reset = false;
    }
}

/// Advance the session by one frame
///
/// Order: session commands, pointer events, clock advance and due timers,
/// then node motion and particle decay. While the session is not running
/// only leftover particles keep decaying; the clock, timers and nodes stay
/// frozen.
pub fn tick(state: &mut GameState, input: &TickInput) {
    if input.reset {
        state.reset();
    }
    if input.start && !state.is_running() {
        state.start();
    }
    if !state.is_running() {
        update_particles(&mut state.particles);
        return;
    }

    for &point in &input.pointers {
        pointer_down(state, point);
    }

    state.now_ms += FRAME_MS;
    state.frame += 1;
    fire_due_timers(state);

    // The last escape may have ended the session
    if !state.is_running() {
        update_particles(&mut state.particles);
        return;
    }

    if state.tuning.motion == MotionStyle::Bounce {
        let bounds = state.bounds;
        for node in state.nodes.iter_mut() {
            node.step(bounds);
        }
    }
    update_particles(&mut state.particles);
}

/// Fire every timer due at the current clock, earliest first
fn fire_due_timers(state: &mut GameState) {
    while let Some((due_ms, kind)) = state.scheduler.pop_due(state.now_ms) {
        match kind {
            TimerKind::Spawn { generation } => fire_spawn_timer(state, generation, due_ms),
            TimerKind::Expire { node_id } => {
                expire_node(state, node_id);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::{PARTICLE_LIFE, PARTICLE_MAX_RADIUS};
    use crate::sim::{GameEvent, GamePhase};
    use crate::tuning::Tuning;

    const FRAMES_PER_SECOND: usize = 60;

    fn started(seed: u64) -> GameState {
        let mut state = GameState::new(seed, Tuning::default(), Vec2::new(800.0, 600.0));
        tick(
            &mut state,
            &TickInput {
                start: true,
                ..Default::default()
            },
        );
        state
    }

    fn run_frames(state: &mut GameState, frames: usize) {
        let input = TickInput::default();
        for _ in 0..frames {
            tick(state, &input);
        }
    }

    #[test]
    fn test_idle_until_started() {
        let mut state = GameState::new(1, Tuning::default(), Vec2::new(800.0, 600.0));
        run_frames(&mut state, 120);
        assert_eq!(state.phase, GamePhase::Ready);
        assert_eq!(state.frame, 0);
        assert!(state.nodes.is_empty());
    }

    #[test]
    fn test_first_spawn_after_one_interval() {
        let mut state = started(1);
        // Start tick already advanced one frame
        run_frames(&mut state, FRAMES_PER_SECOND - 4);
        assert!(state.nodes.is_empty());
        run_frames(&mut state, 4);
        assert_eq!(state.nodes.len(), 1);
    }

    #[test]
    fn test_unclicked_nodes_escape_and_end_game() {
        let mut state = started(1);

        // Nodes spawn at 1s, 2s, ... and escape 2s later; the fifth escapes at 7s
        run_frames(&mut state, 6 * FRAMES_PER_SECOND);
        assert!(state.is_running());
        assert_eq!(state.escaped, 4);

        run_frames(&mut state, FRAMES_PER_SECOND + 1);
        assert_eq!(state.escaped, 5);
        assert_eq!(state.phase, GamePhase::GameOver);

        // Frozen afterwards
        let frame = state.frame;
        run_frames(&mut state, 10 * FRAMES_PER_SECOND);
        assert_eq!(state.escaped, 5);
        assert_eq!(state.score, 0);
        assert_eq!(state.frame, frame);
    }

    #[test]
    fn test_burst_fades_after_game_over() {
        let mut state = started(6);
        run_frames(&mut state, FRAMES_PER_SECOND);
        let pos = state.nodes[0].pos;
        tick(
            &mut state,
            &TickInput {
                pointers: vec![pos],
                ..Default::default()
            },
        );
        assert!(!state.particles.is_empty());

        state.game_over();
        let frame = state.frame;
        run_frames(&mut state, 5);
        assert!(!state.particles.is_empty());
        assert!(state.particles.iter().all(|p| p.radius < PARTICLE_MAX_RADIUS));

        run_frames(&mut state, PARTICLE_LIFE as usize);
        assert!(state.particles.is_empty());
        assert_eq!(state.frame, frame);
        assert_eq!(state.phase, GamePhase::GameOver);
    }

    #[test]
    fn test_spawn_cadence_tightens_at_score_ten() {
        let mut state = started(7);
        let mut spawned_at = Vec::new();
        let mut spawned_frame = Vec::new();
        for _ in 0..4 * FRAMES_PER_SECOND {
            tick(&mut state, &TickInput::default());
            for event in state.drain_events() {
                if let GameEvent::NodeSpawned { id } = event {
                    let node = state.nodes.iter().find(|n| n.id == id).unwrap();
                    spawned_at.push(node.created_at_ms);
                    spawned_frame.push(state.frame);
                    // Reach the first milestone right after the first spawn
                    state.score = 10;
                }
            }
        }

        assert_eq!(spawned_at, vec![1000.0, 2000.0, 2995.0, 3990.0]);
        let gaps: Vec<u64> = spawned_frame.windows(2).map(|w| w[1] - w[0]).collect();
        assert!((59..=61).contains(&gaps[0]));
        assert!(gaps[1..].iter().all(|g| (59..=60).contains(g)));
    }

    #[test]
    fn test_click_before_expiry_scores() {
        let mut state = started(2);
        run_frames(&mut state, FRAMES_PER_SECOND);
        assert_eq!(state.nodes.len(), 1);
        let pos = state.nodes[0].pos;

        tick(
            &mut state,
            &TickInput {
                pointers: vec![pos],
                ..Default::default()
            },
        );
        assert_eq!(state.score, 1);
        assert!(state.nodes.is_empty());

        // Its expiry timer still fires later, harmlessly
        run_frames(&mut state, 2 * FRAMES_PER_SECOND);
        assert_eq!(state.escaped, 0);
    }

    #[test]
    fn test_reset_then_start_is_fresh() {
        let mut state = started(3);
        run_frames(&mut state, 4 * FRAMES_PER_SECOND);
        let pos = state.nodes[0].pos;
        tick(
            &mut state,
            &TickInput {
                pointers: vec![pos],
                ..Default::default()
            },
        );
        assert!(state.score > 0 || state.escaped > 0);

        tick(
            &mut state,
            &TickInput {
                reset: true,
                ..Default::default()
            },
        );
        assert_eq!(state.phase, GamePhase::Ready);
        assert_eq!(state.pending_timers(), 0);

        tick(
            &mut state,
            &TickInput {
                start: true,
                ..Default::default()
            },
        );
        let fresh = started(99);
        assert_eq!(state.score, 0);
        assert_eq!(state.escaped, 0);
        assert!(state.nodes.is_empty());
        assert!(state.particles.is_empty());
        assert_eq!(state.spawn_interval_ms, fresh.spawn_interval_ms);
        assert_eq!(state.frame, fresh.frame);
        assert_eq!(state.pending_timers(), fresh.pending_timers());
    }

    #[test]
    fn test_moving_nodes_drift() {
        let mut state = started(4);
        state.score = 100;
        run_frames(&mut state, FRAMES_PER_SECOND);
        let before = state.nodes[0].pos;
        run_frames(&mut state, 5);
        assert_ne!(state.nodes[0].pos, before);
    }

    #[test]
    fn test_events_reach_presentation() {
        let mut state = started(5);
        run_frames(&mut state, 3 * FRAMES_PER_SECOND);
        let events = state.drain_events();
        assert_eq!(events[0], GameEvent::Started);
        assert!(events.iter().any(|e| matches!(e, GameEvent::NodeSpawned { .. })));
        assert!(events.iter().any(|e| matches!(e, GameEvent::NodeEscaped { escaped: 1, .. })));
    }

    #[test]
    fn test_determinism() {
        // Two states with same seed should produce identical results
        let mut state1 = started(99999);
        let mut state2 = started(99999);

        run_frames(&mut state1, 150);
        run_frames(&mut state2, 150);
        let pos = state1.nodes.last().map(|n| n.pos).unwrap_or(Vec2::ZERO);
        let input = TickInput {
            pointers: vec![pos],
            ..Default::default()
        };
        tick(&mut state1, &input);
        tick(&mut state2, &input);
        run_frames(&mut state1, 10);
        run_frames(&mut state2, 10);

        assert_eq!(state1.score, state2.score);
        assert_eq!(state1.nodes, state2.nodes);
        assert_eq!(state1.particles, state2.particles);
    }
}
