//! Keyboard hops
//!
//! A key press is a single grid hop applied to the frog right away; nothing is
//! queued for the next frame.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::state::{GameEvent, GameState};
use crate::clamp_to_hop_bounds;
use crate::consts::HOP_DISTANCE;

/// Hop direction. Up is away from the camera (towards the goal, -z).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Map a DOM `KeyboardEvent.key` value; anything else is ignored
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "ArrowUp" => Some(Direction::Up),
            "ArrowDown" => Some(Direction::Down),
            "ArrowLeft" => Some(Direction::Left),
            "ArrowRight" => Some(Direction::Right),
            _ => None,
        }
    }

    /// Unit offset on the ground plane
    pub fn offset(self) -> Vec3 {
        match self {
            Direction::Up => Vec3::new(0.0, 0.0, -HOP_DISTANCE),
            Direction::Down => Vec3::new(0.0, 0.0, HOP_DISTANCE),
            Direction::Left => Vec3::new(-HOP_DISTANCE, 0.0, 0.0),
            Direction::Right => Vec3::new(HOP_DISTANCE, 0.0, 0.0),
        }
    }
}

/// Where a hop from `from` lands, clamped to the hop bounds
#[inline]
pub fn hop_target(from: Vec3, direction: Direction) -> Vec3 {
    clamp_to_hop_bounds(from + direction.offset())
}

/// Move the frog one hop and tell the session about it.
///
/// Applies in every phase; a frozen world does not freeze the frog.
pub fn hop(state: &mut GameState, direction: Direction) -> Vec3 {
    let to = hop_target(state.player.pos, direction);
    state.player.pos = to;
    log::debug!("hop {:?} -> ({}, {})", direction, to.x, to.z);
    state.push_event(GameEvent::Hopped { direction, to });
    to
}

/// Key press entry point: unknown keys are a no-op
pub fn handle_key(state: &mut GameState, key: &str) -> Option<Vec3> {
    Direction::from_key(key).map(|direction| hop(state, direction))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::PLAYER_START;
    use crate::sim::state::GamePhase;
    use proptest::prelude::*;

    #[test]
    fn test_key_mapping() {
        assert_eq!(Direction::from_key("ArrowUp"), Some(Direction::Up));
        assert_eq!(Direction::from_key("ArrowDown"), Some(Direction::Down));
        assert_eq!(Direction::from_key("ArrowLeft"), Some(Direction::Left));
        assert_eq!(Direction::from_key("ArrowRight"), Some(Direction::Right));
        assert_eq!(Direction::from_key("w"), None);
        assert_eq!(Direction::from_key(" "), None);
    }

    #[test]
    fn test_up_moves_towards_goal() {
        let mut state = GameState::default();
        let to = hop(&mut state, Direction::Up);
        assert_eq!(to, Vec3::new(0.0, 0.5, 4.0));
        assert_eq!(state.player.pos, to);
    }

    #[test]
    fn test_down_at_start_is_clamped() {
        let mut state = GameState::default();
        hop(&mut state, Direction::Down);
        assert_eq!(state.player.pos, PLAYER_START);
    }

    #[test]
    fn test_side_hops_stop_at_edge() {
        let mut state = GameState::default();
        for _ in 0..10 {
            hop(&mut state, Direction::Right);
        }
        assert_eq!(state.player.pos.x, 4.0);
        for _ in 0..10 {
            hop(&mut state, Direction::Left);
        }
        assert_eq!(state.player.pos.x, -4.0);
    }

    #[test]
    fn test_hop_snaps_carried_frog_back_inside() {
        let mut state = GameState::default();
        state.player.pos = Vec3::new(4.7, 0.5, -3.0);
        hop(&mut state, Direction::Right);
        assert_eq!(state.player.pos, Vec3::new(4.0, 0.5, -3.0));
    }

    #[test]
    fn test_unknown_key_is_noop() {
        let mut state = GameState::default();
        assert_eq!(handle_key(&mut state, "Enter"), None);
        assert_eq!(state.player.pos, PLAYER_START);
        assert!(state.drain_events().is_empty());
    }

    #[test]
    fn test_hop_raises_event() {
        let mut state = GameState::default();
        handle_key(&mut state, "ArrowLeft");
        assert_eq!(
            state.drain_events(),
            vec![GameEvent::Hopped {
                direction: Direction::Left,
                to: Vec3::new(-1.0, 0.5, 5.0),
            }]
        );
    }

    #[test]
    fn test_hop_applies_while_game_over() {
        let mut state = GameState::default();
        state.phase = GamePhase::GameOver;
        hop(&mut state, Direction::Up);
        assert_eq!(state.player.pos.z, 4.0);
        assert_eq!(state.phase, GamePhase::GameOver);
    }

    fn direction_strategy() -> impl Strategy<Value = Direction> {
        prop_oneof![
            Just(Direction::Up),
            Just(Direction::Down),
            Just(Direction::Left),
            Just(Direction::Right),
        ]
    }

    proptest! {
        #[test]
        fn hops_stay_in_bounds(
            x in -20.0f32..20.0,
            z in -20.0f32..20.0,
            moves in proptest::collection::vec(direction_strategy(), 1..64)
        ) {
            let mut state = GameState::default();
            state.player.pos = Vec3::new(x, 0.5, z);
            for direction in moves {
                let to = hop(&mut state, direction);
                prop_assert!((-4.0..=4.0).contains(&to.x), "x={} out of bounds", to.x);
                prop_assert!((-5.0..=5.0).contains(&to.z), "z={} out of bounds", to.z);
                prop_assert_eq!(to.y, 0.5);
            }
        }
    }
}
