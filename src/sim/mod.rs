//! Frame simulation module
//!
//! All gameplay logic lives here. This module must stay pure:
//! - One explicit `GameState`, passed by `&mut`
//! - Stable iteration order (layout order of the tuning)
//! - No rendering or platform dependencies

pub mod collision;
pub mod input;
pub mod motion;
pub mod state;
pub mod tick;

pub use collision::{Verdict, evaluate, find_hit, in_ride_band, reached_goal, ride_push};
pub use input::{Direction, handle_key, hop, hop_target};
pub use motion::advance_movers;
pub use state::{GameEvent, GamePhase, GameState, Mover, Player};
pub use tick::tick;
