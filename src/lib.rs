//! Olympia - a two-team grid ball sport for reinforcement learning
//!
//! Core modules:
//! - `sim`: Deterministic field simulation (field, agents, ball flight, overlaps)
//! - `scheme`: Named starting placements per team
//! - `config`: Data-driven environment configuration
//! - `episode`: Policy seam and a simple episode driver
//! - `render`: Text rendering of field snapshots

pub mod config;
pub mod episode;
pub mod error;
pub mod render;
pub mod scheme;
pub mod sim;

pub use config::{EnvConfig, ObservationKind};
pub use error::{ConfigError, StepError};
pub use scheme::PlacementScheme;
pub use sim::{Action, FieldEnv, Observation, StepResult};

use glam::IVec2;

/// Game configuration constants
pub mod consts {
    /// Smallest allowed field edge (room for goals plus a playable area)
    pub const MIN_FIELD_DIM: i32 = 5;

    /// Default field shape
    pub const DEFAULT_WIDTH: i32 = 21;
    pub const DEFAULT_HEIGHT: i32 = 15;

    /// Number of bounce segments queued by a throw
    pub const THROW_SEGMENTS: usize = 3;
    /// Cells travelled per segment along each moving axis
    pub const THROW_STEP: i32 = 2;

    /// Moves an agent may make while carrying after gaining possession
    pub const CARRY_MOVES: i32 = 3;
    /// Carry counter value when not holding the ball
    pub const NOT_CARRYING: i32 = -1;

    /// Per-tick time penalty
    pub const TICK_REWARD: i32 = -1;
    /// Reward for every agent on the scoring side
    pub const WIN_REWARD: i32 = 100;
    /// Reward for every agent on the conceding side
    pub const LOSS_REWARD: i32 = -100;

    /// Maximum number of teams on a field
    pub const MAX_TEAMS: usize = 2;
}

/// Scale a fractional placement onto a field of the given shape
#[inline]
pub fn scale_fraction(fraction: (f32, f32), width: i32, height: i32) -> IVec2 {
    IVec2::new(
        (fraction.0 * width as f32) as i32,
        (fraction.1 * height as f32) as i32,
    )
}

/// Center cell of a field
#[inline]
pub fn field_center(width: i32, height: i32) -> IVec2 {
    IVec2::new(width / 2, height / 2)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scale_fraction_floors() {
        assert_eq!(scale_fraction((0.7, 0.5), 15, 9), IVec2::new(10, 4));
        assert_eq!(scale_fraction((0.3, 0.25), 21, 15), IVec2::new(6, 3));
    }

    #[test]
    fn test_field_center() {
        assert_eq!(field_center(15, 9), IVec2::new(7, 4));
        assert_eq!(field_center(21, 15), IVec2::new(10, 7));
    }
}
