//! Collision and zone checks
//!
//! Evaluated once per frame, in a fixed order:
//! 1. obstacle hit (ends the frame)
//! 2. platform ride (pushes the frog)
//! 3. river without a platform (drowned)
//! 4. far bank (score and respawn)
//!
//! The goal check is not exclusive with the ride check; whichever of them fires
//! last wins the frame's [`Verdict`].

use glam::Vec3;

use super::state::{GameEvent, GamePhase, GameState, Mover};
use crate::consts::*;
use crate::in_river_band;
use crate::tuning::OverlapPolicy;

/// Outcome of one frame's evaluation
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Verdict {
    /// Nothing happened
    Safe,
    /// Standing on at least one platform; `dx` is the total push applied
    Carried { dx: f32 },
    /// Water without a platform underneath
    Drowned,
    /// Run over by an obstacle
    Hit { obstacle_id: u32 },
    /// Far bank reached, score already incremented
    ReachedGoal { score: u64 },
}

impl Verdict {
    /// True for the two verdicts that end the run
    pub fn is_fatal(&self) -> bool {
        matches!(self, Verdict::Drowned | Verdict::Hit { .. })
    }
}

/// First obstacle within [`HIT_RADIUS`] of the frog (3D distance)
pub fn find_hit(player: Vec3, obstacles: &[Mover]) -> Option<&Mover> {
    obstacles
        .iter()
        .find(|obstacle| obstacle.pos.distance(player) < HIT_RADIUS)
}

/// Whether the frog stands inside a platform's ride band
#[inline]
pub fn in_ride_band(player: Vec3, platform: &Mover) -> bool {
    (platform.pos.z - player.z).abs() < RIDE_BAND_Z
        && (platform.pos.x - player.x).abs() < RIDE_BAND_X
}

/// Sum of pushes from the platforms carrying the frog, or `None` if none does
pub fn ride_push(
    player: Vec3,
    platforms: &[Mover],
    carry_factor: f32,
    overlap: OverlapPolicy,
) -> Option<f32> {
    let mut riding = platforms.iter().filter(|p| in_ride_band(player, p));
    match overlap {
        OverlapPolicy::Compound => riding
            .map(|p| p.speed * carry_factor)
            .fold(None, |acc, dx| Some(acc.unwrap_or(0.0) + dx)),
        OverlapPolicy::FirstMatch => riding.next().map(|p| p.speed * carry_factor),
    }
}

/// Far bank test
#[inline]
pub fn reached_goal(player: Vec3) -> bool {
    player.z <= GOAL_Z
}

/// Run all checks for one frame and apply their effects to `state`.
///
/// No-op (returns `Safe`) while the run is over.
pub fn evaluate(state: &mut GameState, dt: f32) -> Verdict {
    if state.phase == GamePhase::GameOver {
        return Verdict::Safe;
    }

    // 1. Hit takes priority over everything else this frame
    if let Some(obstacle_id) = find_hit(state.player.pos, &state.obstacles).map(|o| o.id) {
        state.phase = GamePhase::GameOver;
        log::info!("Squashed by obstacle {} at score {}", obstacle_id, state.score);
        state.push_event(GameEvent::Squashed { obstacle_id });
        return Verdict::Hit { obstacle_id };
    }

    let mut verdict = Verdict::Safe;

    // 2. Ride
    let carry_factor = state.carry.factor(dt);
    let push = ride_push(state.player.pos, &state.platforms, carry_factor, state.overlap);
    if let Some(dx) = push {
        state.player.pos.x += dx;
        verdict = Verdict::Carried { dx };
    }

    // 3. Water
    if in_river_band(state.player.pos.z) && push.is_none() {
        state.phase = GamePhase::GameOver;
        log::info!("Drowned at score {}", state.score);
        state.push_event(GameEvent::Drowned);
        verdict = Verdict::Drowned;
    }

    // 4. Goal (evaluated regardless of 2 and 3)
    if reached_goal(state.player.pos) {
        state.score += 1;
        state.player.respawn();
        log::info!("Crossing complete, score {}", state.score);
        state.push_event(GameEvent::ReachedGoal { score: state.score });
        if !verdict.is_fatal() {
            verdict = Verdict::ReachedGoal { score: state.score };
        }
    }

    verdict
}
