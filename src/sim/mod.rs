//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One tick per step, no wall-clock time
//! - Seeded RNG only (overlap tie-breaks)
//! - Stable iteration order (team-major, then agent number)
//! - No rendering or platform dependencies

pub mod action;
pub mod field;
pub mod flight;
pub mod overlap;
pub mod resolve;
pub mod snapshot;
pub mod state;
pub mod tick;

pub use action::{Action, Direction};
pub use field::{CellKind, Field, GoalSide};
pub use flight::{FlightOutcome, Reflection, WallContact, advance_ball};
pub use overlap::{Rollback, resolve_overlaps};
pub use resolve::{ActionEffect, resolve_action};
pub use snapshot::{GridSnapshot, Observation, ObservationKind, Tile};
pub use state::{Agent, AgentId, Ball, EntityState, RngState};
pub use tick::{FieldEnv, GamePhase, StepResult};
