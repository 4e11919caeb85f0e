//! Lane motion: constant horizontal speed with wrap-around

use super::state::{GameState, Mover};
use crate::wrap_lane;

impl Mover {
    /// Advance along x by `speed * dt`, teleporting across the lane edge
    #[inline]
    pub fn advance(&mut self, dt: f32) {
        self.pos.x = wrap_lane(self.pos.x + self.speed * dt);
    }
}

/// Move every obstacle and platform for one frame
pub fn advance_movers(state: &mut GameState, dt: f32) {
    for mover in state.obstacles.iter_mut().chain(state.platforms.iter_mut()) {
        mover.advance(dt);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;
    use proptest::prelude::*;

    fn mover(x: f32, speed: f32) -> Mover {
        Mover {
            id: 1,
            pos: Vec3::new(x, 0.25, 2.0),
            speed,
        }
    }

    #[test]
    fn test_advance_uses_delta() {
        let mut m = mover(0.0, 2.0);
        m.advance(0.25);
        assert_eq!(m.pos.x, 0.5);
        assert_eq!(m.pos.z, 2.0);
    }

    #[test]
    fn test_wraps_right_edge_to_left() {
        let mut m = mover(4.9, 3.0);
        m.advance(0.1);
        assert_eq!(m.pos.x, -5.0);
    }

    #[test]
    fn test_wraps_left_edge_to_right() {
        let mut m = mover(-4.9, -3.0);
        m.advance(0.1);
        assert_eq!(m.pos.x, 5.0);
    }

    #[test]
    fn test_keeps_direction_after_wrap() {
        let mut m = mover(4.99, 1.0);
        m.advance(0.1);
        m.advance(0.1);
        assert!(m.pos.x > -5.0 && m.pos.x < -4.8);
    }

    #[test]
    fn test_advance_movers_moves_both_lanes() {
        let mut state = GameState::default();
        let before: Vec<f32> = state
            .obstacles
            .iter()
            .chain(&state.platforms)
            .map(|m| m.pos.x)
            .collect();
        advance_movers(&mut state, 0.1);
        for (m, x0) in state.obstacles.iter().chain(&state.platforms).zip(before) {
            assert!((m.pos.x - (x0 + m.speed * 0.1)).abs() < 1e-5);
        }
    }

    proptest! {
        #[test]
        fn wrap_invariant_holds(
            x in -5.0f32..=5.0,
            speed in -50.0f32..50.0,
            dts in proptest::collection::vec(0.0f32..0.5, 1..32)
        ) {
            let mut m = mover(x, speed);
            for dt in dts {
                m.advance(dt);
                prop_assert!(
                    (-5.0..=5.0).contains(&m.pos.x),
                    "x={} escaped the lane (speed={})",
                    m.pos.x,
                    speed
                );
            }
        }

        #[test]
        fn wrap_invariant_from_any_start(x in -1000.0f32..1000.0, speed in -50.0f32..50.0) {
            let mut m = mover(x, speed);
            m.advance(1.0 / 60.0);
            prop_assert!((-5.0..=5.0).contains(&m.pos.x));
        }
    }
}
