//! Error types
//!
//! Configuration problems surface at construction time. A tick only fails on
//! caller contract violations, and does so before touching any state.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("field {width}x{height} is too small (minimum {min}x{min})", min = crate::consts::MIN_FIELD_DIM)]
    FieldTooSmall { width: i32, height: i32 },

    #[error("field {width}x{height} has more cells than can be indexed")]
    FieldTooLarge { width: i32, height: i32 },

    #[error("scheme has no teams")]
    NoTeams,

    #[error("scheme has {0} teams, at most 2 are supported")]
    TooManyTeams(usize),

    #[error("team {0} has no agents")]
    EmptyTeam(usize),

    #[error("teams should be the same size: team {team} has {found}, expected {expected}")]
    UnequalTeams {
        team: usize,
        found: usize,
        expected: usize,
    },

    #[error("team {team} agent {number} placement ({x}, {y}) is outside [0, 1]")]
    PositionOutOfRange {
        team: usize,
        number: usize,
        x: f32,
        y: f32,
    },

    #[error("team {team} agent {number} starts on a blocked cell ({x}, {y})")]
    BlockedStart {
        team: usize,
        number: usize,
        x: i32,
        y: i32,
    },

    #[error("team {team} agent {number} shares its start cell ({x}, {y})")]
    SharedStart {
        team: usize,
        number: usize,
        x: i32,
        y: i32,
    },

    #[error("unknown placement scheme: {0}")]
    UnknownScheme(String),

    #[error("config parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StepError {
    #[error("expected {expected} actions, got {got}")]
    ActionCount { expected: usize, got: usize },

    #[error("action index {0} is outside 0..17")]
    InvalidAction(usize),
}
