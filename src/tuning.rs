//! Data-driven game balance
//!
//! Lane layout plus the two carry rules that are still up for debate. The
//! browser build can override the defaults with JSON embedded in the host page.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::{FIXED_CARRY_STEP, LANE_HALF_WIDTH};

/// Errors raised while loading a tuning document
#[derive(Debug, Error)]
pub enum TuningError {
    #[error("tuning JSON is malformed: {0}")]
    Json(#[from] serde_json::Error),
    #[error("{lane} #{index}: {field} must be finite")]
    NotFinite {
        lane: &'static str,
        index: usize,
        field: &'static str,
    },
    #[error("{lane} #{index}: x = {x} is outside the lane (|x| <= 5)")]
    OutsideLane {
        lane: &'static str,
        index: usize,
        x: f32,
    },
    #[error("carry step must be finite and non-negative, got {0}")]
    BadCarryStep(f32),
}

/// How far a platform pushes the frog each frame
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum CarryStep {
    /// `speed * step`, independent of the frame delta (classic ~60 Hz feel)
    Fixed { step: f32 },
    /// `speed * dt`, same clock as the movers themselves
    FrameDelta,
}

impl Default for CarryStep {
    fn default() -> Self {
        CarryStep::Fixed {
            step: FIXED_CARRY_STEP,
        }
    }
}

impl CarryStep {
    /// Multiplier applied to a platform's speed for this frame
    #[inline]
    pub fn factor(&self, dt: f32) -> f32 {
        match *self {
            CarryStep::Fixed { step } => step,
            CarryStep::FrameDelta => dt,
        }
    }
}

/// What happens when the frog sits in more than one ride band
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OverlapPolicy {
    /// Every matching platform pushes (pushes add up)
    #[default]
    Compound,
    /// Only the first matching platform (layout order) pushes
    FirstMatch,
}

/// Spawn point and speed of one obstacle or platform
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LaneSpawn {
    pub position: [f32; 3],
    /// Signed units per second along x
    pub speed: f32,
}

impl LaneSpawn {
    pub const fn new(x: f32, y: f32, z: f32, speed: f32) -> Self {
        Self {
            position: [x, y, z],
            speed,
        }
    }
}

/// Road traffic of the classic layout
const DEFAULT_OBSTACLES: [LaneSpawn; 5] = [
    LaneSpawn::new(-3.0, 0.25, 3.0, 2.0),
    LaneSpawn::new(2.0, 0.25, 2.0, -3.0),
    LaneSpawn::new(-1.0, 0.25, 1.0, 2.5),
    LaneSpawn::new(3.0, 0.25, 0.0, -2.0),
    LaneSpawn::new(0.0, 0.25, -1.0, 3.0),
];

/// Logs of the classic layout
const DEFAULT_PLATFORMS: [LaneSpawn; 3] = [
    LaneSpawn::new(-2.0, 0.25, -2.0, 1.0),
    LaneSpawn::new(2.0, 0.25, -3.0, -1.5),
    LaneSpawn::new(-3.0, 0.25, -4.0, 1.2),
];

/// Full tuning document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub obstacles: Vec<LaneSpawn>,
    pub platforms: Vec<LaneSpawn>,
    pub carry: CarryStep,
    pub overlap: OverlapPolicy,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            obstacles: DEFAULT_OBSTACLES.to_vec(),
            platforms: DEFAULT_PLATFORMS.to_vec(),
            carry: CarryStep::default(),
            overlap: OverlapPolicy::default(),
        }
    }
}

impl Tuning {
    /// Parse and validate a tuning document. Missing fields keep their defaults.
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Check every number the simulation will trust blindly
    pub fn validate(&self) -> Result<(), TuningError> {
        for (lane, spawns) in [("obstacle", &self.obstacles), ("platform", &self.platforms)] {
            for (index, spawn) in spawns.iter().enumerate() {
                if !spawn.speed.is_finite() {
                    return Err(TuningError::NotFinite {
                        lane,
                        index,
                        field: "speed",
                    });
                }
                if spawn.position.iter().any(|c| !c.is_finite()) {
                    return Err(TuningError::NotFinite {
                        lane,
                        index,
                        field: "position",
                    });
                }
                let x = spawn.position[0];
                if x.abs() > LANE_HALF_WIDTH {
                    return Err(TuningError::OutsideLane { lane, index, x });
                }
            }
        }

        if let CarryStep::Fixed { step } = self.carry {
            if !step.is_finite() || step < 0.0 {
                return Err(TuningError::BadCarryStep(step));
            }
        }

        Ok(())
    }
}
