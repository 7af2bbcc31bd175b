//! Pointer hit testing

use glam::Vec2;

use super::particles::burst;
use super::state::{GameEvent, GameState, Node};

/// Map a client-space pointer position into canvas-local coordinates
#[inline]
pub fn to_canvas_coords(client: Vec2, canvas_origin: Vec2) -> Vec2 {
    client - canvas_origin
}

/// Index of the topmost node under `point`
///
/// Later nodes are drawn on top, so the scan runs newest first.
pub fn hit_test(nodes: &[Node], point: Vec2) -> Option<usize> {
    nodes.iter().rposition(|node| node.contains(point))
}

/// Handle a pointer-down or tap at canvas-local `point`
///
/// At most one node is hit per event. Returns the hit node's ID.
pub fn pointer_down(state: &mut GameState, point: Vec2) -> Option<u32> {
    if !state.is_running() {
        return None;
    }
    let index = hit_test(&state.nodes, point)?;

    let node = state.nodes.remove(index);
    burst(state, node.pos);
    state.score += 1;
    state.events.push(GameEvent::NodeHit {
        id: node.id,
        pos: node.pos,
        score: state.score,
    });
    log::debug!("Hit node {} (score {})", node.id, state.score);

    Some(node.id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::BURST_PARTICLES;
    use crate::tuning::Tuning;
    use proptest::prelude::*;

    fn node(id: u32, x: f32, y: f32) -> Node {
        Node {
            id,
            pos: Vec2::new(x, y),
            vel: Vec2::ZERO,
            radius: 20.0,
            created_at_ms: 0.0,
        }
    }

    fn running_with(nodes: Vec<Node>) -> GameState {
        let mut state = GameState::new(11, Tuning::default(), Vec2::new(800.0, 600.0));
        state.start();
        state.drain_events();
        state.nodes = nodes;
        state
    }

    #[test]
    fn test_hit_inside_radius() {
        let mut state = running_with(vec![node(1, 100.0, 100.0)]);

        assert_eq!(pointer_down(&mut state, Vec2::new(105.0, 105.0)), Some(1));
        assert_eq!(state.score, 1);
        assert!(state.nodes.is_empty());
        assert_eq!(state.particles.len(), BURST_PARTICLES);
    }

    #[test]
    fn test_miss_outside_radius() {
        let mut state = running_with(vec![node(1, 100.0, 100.0)]);

        assert_eq!(pointer_down(&mut state, Vec2::new(130.0, 100.0)), None);
        assert_eq!(state.score, 0);
        assert_eq!(state.nodes.len(), 1);
        assert!(state.particles.is_empty());
        assert!(state.events.is_empty());
    }

    #[test]
    fn test_topmost_node_wins() {
        let mut state = running_with(vec![node(1, 100.0, 100.0), node(2, 110.0, 100.0)]);

        assert_eq!(pointer_down(&mut state, Vec2::new(105.0, 100.0)), Some(2));
        assert_eq!(state.score, 1);
        assert_eq!(state.nodes.len(), 1);
        assert_eq!(state.nodes[0].id, 1);
    }

    #[test]
    fn test_ignored_when_not_running() {
        let mut state = running_with(vec![node(1, 100.0, 100.0)]);
        state.game_over();

        assert_eq!(pointer_down(&mut state, Vec2::new(100.0, 100.0)), None);
        assert_eq!(state.score, 0);
        assert_eq!(state.nodes.len(), 1);
    }

    #[test]
    fn test_hit_then_expiry_is_noop() {
        let mut state = running_with(Vec::new());
        let id = crate::sim::spawn_node(&mut state).unwrap();
        let pos = state.nodes[0].pos;

        assert_eq!(pointer_down(&mut state, pos), Some(id));
        assert!(!crate::sim::expire_node(&mut state, id));
        assert_eq!(state.score, 1);
        assert_eq!(state.escaped, 0);
    }

    #[test]
    fn test_canvas_coords() {
        let local = to_canvas_coords(Vec2::new(250.0, 180.0), Vec2::new(50.0, 30.0));
        assert_eq!(local, Vec2::new(200.0, 150.0));
    }

    proptest! {
        #[test]
        fn hit_iff_strictly_inside(
            cx in 50.0f32..750.0,
            cy in 50.0f32..550.0,
            dx in -40.0f32..40.0,
            dy in -40.0f32..40.0,
        ) {
            let nodes = [node(1, cx, cy)];
            let point = Vec2::new(cx + dx, cy + dy);
            let inside = nodes[0].pos.distance(point) < 20.0;
            prop_assert_eq!(hit_test(&nodes, point).is_some(), inside);
        }

        #[test]
        fn one_hit_per_event(offsets in prop::collection::vec(-5.0f32..5.0, 1..8)) {
            let nodes = offsets
                .iter()
                .enumerate()
                .map(|(i, off)| node(i as u32 + 1, 200.0 + off, 200.0))
                .collect();
            let mut state = running_with(nodes);
            let before = state.nodes.len();

            prop_assert!(pointer_down(&mut state, Vec2::new(200.0, 200.0)).is_some());
            prop_assert_eq!(state.score, 1);
            prop_assert_eq!(state.nodes.len(), before - 1);
        }
    }
}
