//! Frogger 3D - hop across a road and a river
//!
//! Core modules:
//! - `sim`: Frame simulation (motion, collision, scoring, game state)
//! - `tuning`: Data-driven lane layout and carry rules
//! - `renderer`: WebGPU rendering pipeline
//! - `platform`: Browser bindings (keyboard, focus, page config)

pub mod platform;
pub mod renderer;
pub mod sim;
pub mod tuning;

pub use tuning::{CarryStep, LaneSpawn, OverlapPolicy, Tuning, TuningError};

use glam::Vec3;

/// Game configuration constants
pub mod consts {
    use glam::Vec3;

    /// Where the frog starts and respawns after a crossing
    pub const PLAYER_START: Vec3 = Vec3::new(0.0, 0.5, 5.0);
    /// Frog sphere radius (render only)
    pub const PLAYER_RADIUS: f32 = 0.5;

    /// Movers wrap to the opposite side past this |x|
    pub const LANE_HALF_WIDTH: f32 = 5.0;

    /// Hop bounds (applied on every manual move)
    pub const HOP_MIN_X: f32 = -4.0;
    pub const HOP_MAX_X: f32 = 4.0;
    pub const HOP_MIN_Z: f32 = -5.0;
    pub const HOP_MAX_Z: f32 = 5.0;
    /// One hop = one grid unit
    pub const HOP_DISTANCE: f32 = 1.0;

    /// Obstacle closer than this (3D distance) squashes the frog
    pub const HIT_RADIUS: f32 = 0.75;
    /// Ride band half-extents around a platform
    pub const RIDE_BAND_Z: f32 = 0.25;
    pub const RIDE_BAND_X: f32 = 1.0;

    /// River occupies the open interval (RIVER_NEAR_Z, RIVER_FAR_Z) on z
    pub const RIVER_FAR_Z: f32 = -4.5;
    pub const RIVER_NEAR_Z: f32 = -1.5;
    /// Far bank: reaching z <= GOAL_Z scores a crossing
    pub const GOAL_Z: f32 = -5.0;

    /// Carry multiplier assumed by the platform push (~60 Hz)
    pub const FIXED_CARRY_STEP: f32 = 0.016;

    /// Render driver fallback delta for the very first frame
    pub const FIRST_FRAME_DT: f32 = 1.0 / 60.0;
    /// Largest delta handed to the simulation in one frame
    pub const MAX_FRAME_DT: f32 = 0.1;

    /// Mover box sizes (render only)
    pub const OBSTACLE_SIZE: Vec3 = Vec3::new(1.0, 0.5, 0.5);
    pub const PLATFORM_SIZE: Vec3 = Vec3::new(2.0, 0.5, 0.5);
}

/// Wrap a lane coordinate: past either edge, teleport to the opposite edge.
///
/// Not a modulo: anything beyond `+LANE_HALF_WIDTH` lands exactly on
/// `-LANE_HALF_WIDTH` and vice versa, so movers keep a single direction.
#[inline]
pub fn wrap_lane(x: f32) -> f32 {
    use consts::LANE_HALF_WIDTH;
    if x > LANE_HALF_WIDTH {
        -LANE_HALF_WIDTH
    } else if x < -LANE_HALF_WIDTH {
        LANE_HALF_WIDTH
    } else {
        x
    }
}

/// Clamp a position to the hop grid bounds (y untouched)
#[inline]
pub fn clamp_to_hop_bounds(pos: Vec3) -> Vec3 {
    use consts::*;
    Vec3::new(
        pos.x.clamp(HOP_MIN_X, HOP_MAX_X),
        pos.y,
        pos.z.clamp(HOP_MIN_Z, HOP_MAX_Z),
    )
}

/// True when `z` lies strictly inside the river band
#[inline]
pub fn in_river_band(z: f32) -> bool {
    z > consts::RIVER_FAR_Z && z < consts::RIVER_NEAR_Z
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrap_lane_teleports() {
        assert_eq!(wrap_lane(5.01), -5.0);
        assert_eq!(wrap_lane(-5.01), 5.0);
        assert_eq!(wrap_lane(5.0), 5.0);
        assert_eq!(wrap_lane(-2.5), -2.5);
    }

    #[test]
    fn test_clamp_keeps_y() {
        let p = clamp_to_hop_bounds(Vec3::new(7.0, 0.5, -9.0));
        assert_eq!(p, Vec3::new(4.0, 0.5, -5.0));
    }

    #[test]
    fn test_river_band_is_open_interval() {
        assert!(in_river_band(-3.0));
        assert!(in_river_band(-1.6));
        assert!(!in_river_band(-1.5));
        assert!(!in_river_band(-4.5));
        assert!(!in_river_band(-5.0));
        assert!(!in_river_band(0.0));
    }
}
