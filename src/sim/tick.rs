//! Per-frame update
//!
//! The render driver calls [`tick`] once per displayed frame with the elapsed
//! time. Key presses do not go through here; they hop the frog directly.

use super::collision::{Verdict, evaluate};
use super::motion::advance_movers;
use super::state::{GamePhase, GameState};

/// Advance the world by `dt` seconds and settle the frog's fate.
///
/// A finished run is frozen: nothing moves and nothing is evaluated until
/// [`GameState::reset`] is called.
pub fn tick(state: &mut GameState, dt: f32) -> Verdict {
    if state.phase == GamePhase::GameOver {
        return Verdict::Safe;
    }

    state.frames += 1;
    advance_movers(state, dt);
    evaluate(state, dt)
}
