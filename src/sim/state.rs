//! Game state and core simulation types
//!
//! Everything the frame loop reads or writes lives in [`GameState`]; the
//! bindings hold one and pass it by `&mut` into [`super::tick`].

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::input::Direction;
use crate::consts::PLAYER_START;
use crate::tuning::{CarryStep, LaneSpawn, OverlapPolicy, Tuning};

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// World moving, frog alive
    Playing,
    /// Squashed or drowned; world frozen until reset
    GameOver,
}

/// Something the bindings may want to react to (log line, HUD pop)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    Hopped { direction: Direction, to: Vec3 },
    Squashed { obstacle_id: u32 },
    Drowned,
    ReachedGoal { score: u64 },
    Reset,
}

/// The frog
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub pos: Vec3,
}

impl Default for Player {
    fn default() -> Self {
        Self { pos: PLAYER_START }
    }
}

impl Player {
    /// Back to the near bank
    pub fn respawn(&mut self) {
        self.pos = PLAYER_START;
    }
}

/// An obstacle (car) or platform (log): same shape, different role
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Mover {
    pub id: u32,
    pub pos: Vec3,
    /// Signed units per second along x
    pub speed: f32,
}

impl Mover {
    pub fn from_spawn(id: u32, spawn: &LaneSpawn) -> Self {
        Self {
            id,
            pos: Vec3::from_array(spawn.position),
            speed: spawn.speed,
        }
    }
}

/// Complete game state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    pub player: Player,
    /// Road traffic (hit = game over)
    pub obstacles: Vec<Mover>,
    /// River logs (the only safe footing in the river band)
    pub platforms: Vec<Mover>,
    /// Successful crossings since the last reset
    pub score: u64,
    pub phase: GamePhase,
    /// Frames evaluated while playing
    pub frames: u64,
    /// Platform push rule
    pub carry: CarryStep,
    /// Stacked ride band rule
    pub overlap: OverlapPolicy,
    /// Pending events, drained by the bindings
    #[serde(skip)]
    events: Vec<GameEvent>,
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(&Tuning::default())
    }
}

impl GameState {
    /// Fresh session laid out from `tuning`
    pub fn new(tuning: &Tuning) -> Self {
        let mut next_id = 1u32;
        let mut spawn_all = |spawns: &[LaneSpawn]| -> Vec<Mover> {
            spawns
                .iter()
                .map(|spawn| {
                    let mover = Mover::from_spawn(next_id, spawn);
                    next_id += 1;
                    mover
                })
                .collect()
        };
        let obstacles = spawn_all(&tuning.obstacles);
        let platforms = spawn_all(&tuning.platforms);

        Self {
            player: Player::default(),
            obstacles,
            platforms,
            score: 0,
            phase: GamePhase::Playing,
            frames: 0,
            carry: tuning.carry,
            overlap: tuning.overlap,
            events: Vec::new(),
        }
    }

    #[inline]
    pub fn is_game_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    #[inline]
    pub fn score(&self) -> u64 {
        self.score
    }

    /// Restart: clear game over, zero the score, frog back to the start.
    ///
    /// Movers keep their current positions. Calling this twice is the same as
    /// calling it once (apart from the extra `Reset` event).
    pub fn reset(&mut self) {
        self.phase = GamePhase::Playing;
        self.score = 0;
        self.player.respawn();
        self.push_event(GameEvent::Reset);
    }

    pub(crate) fn push_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Take all events raised since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state_from_default_tuning() {
        let state = GameState::default();
        assert_eq!(state.player.pos, Vec3::new(0.0, 0.5, 5.0));
        assert_eq!(state.obstacles.len(), 5);
        assert_eq!(state.platforms.len(), 3);
        assert_eq!(state.score(), 0);
        assert!(!state.is_game_over());
    }

    #[test]
    fn test_mover_ids_are_unique() {
        let state = GameState::default();
        let mut ids: Vec<u32> = state
            .obstacles
            .iter()
            .chain(&state.platforms)
            .map(|m| m.id)
            .collect();
        ids.dedup();
        assert_eq!(ids, (1..=8).collect::<Vec<_>>());
    }

    #[test]
    fn test_reset_from_game_over() {
        let mut state = GameState::default();
        state.phase = GamePhase::GameOver;
        state.score = 7;
        state.player.pos = Vec3::new(3.0, 0.5, -3.0);

        state.reset();

        assert!(!state.is_game_over());
        assert_eq!(state.score(), 0);
        assert_eq!(state.player.pos, PLAYER_START);
        assert_eq!(state.drain_events(), vec![GameEvent::Reset]);
    }

    #[test]
    fn test_reset_is_idempotent() {
        let mut once = GameState::default();
        once.phase = GamePhase::GameOver;
        once.score = 3;
        let mut twice = once.clone();

        once.reset();
        twice.reset();
        twice.reset();

        assert_eq!(once.phase, twice.phase);
        assert_eq!(once.score, twice.score);
        assert_eq!(once.player.pos, twice.player.pos);
        for (a, b) in once.obstacles.iter().zip(&twice.obstacles) {
            assert_eq!(a.pos, b.pos);
        }
    }

    #[test]
    fn test_reset_leaves_movers_in_place() {
        let mut state = GameState::default();
        state.obstacles[0].pos.x = 4.2;
        state.reset();
        assert_eq!(state.obstacles[0].pos.x, 4.2);
    }

    #[test]
    fn test_drain_empties_queue() {
        let mut state = GameState::default();
        state.reset();
        assert_eq!(state.drain_events().len(), 1);
        assert!(state.drain_events().is_empty());
    }
}
