//! Turn resolution
//!
//! `FieldEnv` owns one episode: the static field, every entity and the
//! overlap RNG. A step resolves all agent actions in team-major order, moves
//! an in-flight ball one segment, settles overlaps, rebuilds the snapshot and
//! checks for a goal.

use rand_pcg::Pcg32;

use super::action::Action;
use super::field::Field;
use super::flight::{FlightOutcome, advance_ball};
use super::overlap::{Rollback, resolve_overlaps};
use super::resolve::{ActionEffect, resolve_action};
use super::snapshot::{GridSnapshot, Observation, ObservationKind};
use super::state::{AgentId, EntityState, RngState};
use crate::consts::*;
use crate::error::{ConfigError, StepError};
use crate::field_center;
use crate::scheme::PlacementScheme;

/// Episode phase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    InPlay,
    /// Absorbing; the ball came to rest in a goal
    Terminal { winner: usize },
}

/// Everything a step hands back to the caller
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepResult {
    pub observation: Observation,
    /// One per agent, team-major
    pub rewards: Vec<i32>,
    pub done: bool,
    pub winner: Option<usize>,
    /// What each agent's action did, team-major
    pub effects: Vec<ActionEffect>,
    /// Agents sent back by the overlap pass this tick
    pub rollbacks: Vec<Rollback>,
}

/// A simulated field with two (or one) teams and a ball
#[derive(Debug, Clone)]
pub struct FieldEnv {
    field: Field,
    scheme: PlacementScheme,
    state: EntityState,
    snapshot: GridSnapshot,
    phase: GamePhase,
    observation_kind: ObservationKind,
    rng_state: RngState,
    rng: Pcg32,
    /// Ticks since the last reset
    time_ticks: u64,
}

impl FieldEnv {
    /// Build the field, place the scheme and seed the overlap RNG
    pub fn new(
        width: i32,
        height: i32,
        scheme: PlacementScheme,
        observation_kind: ObservationKind,
        seed: u64,
    ) -> Result<Self, ConfigError> {
        scheme.validate()?;
        let field = Field::build(width, height)?;
        let placements = scheme.scaled(width, height);

        let mut taken = Vec::with_capacity(scheme.n_agents());
        for (team, positions) in placements.iter().enumerate() {
            for (number, &pos) in positions.iter().enumerate() {
                if !field.is_open(pos) {
                    return Err(ConfigError::BlockedStart {
                        team,
                        number,
                        x: pos.x,
                        y: pos.y,
                    });
                }
                if taken.contains(&pos) {
                    return Err(ConfigError::SharedStart {
                        team,
                        number,
                        x: pos.x,
                        y: pos.y,
                    });
                }
                taken.push(pos);
            }
        }

        let state = EntityState::new(field_center(width, height), &placements);
        let snapshot = GridSnapshot::compose(&field, &state);
        let rng_state = RngState::new(seed);

        log::info!(
            "Field {}x{} with scheme {} ({} teams of {})",
            width,
            height,
            scheme.name,
            scheme.n_teams(),
            scheme.team_size()
        );

        Ok(Self {
            field,
            scheme,
            state,
            snapshot,
            phase: GamePhase::InPlay,
            observation_kind,
            rng: rng_state.to_rng(),
            rng_state,
            time_ticks: 0,
        })
    }

    /// Restore the starting placement and return the first observation
    ///
    /// The overlap RNG keeps running across episodes; use `reseed` to replay
    /// a run from the start.
    pub fn reset(&mut self) -> Observation {
        self.state.reset();
        self.phase = GamePhase::InPlay;
        self.time_ticks = 0;
        self.snapshot = GridSnapshot::compose(&self.field, &self.state);
        self.observe()
    }

    /// Restart the overlap RNG from a new seed
    pub fn reseed(&mut self, seed: u64) {
        self.rng_state = RngState::new(seed);
        self.rng = self.rng_state.to_rng();
    }

    /// Step with raw policy indices
    pub fn step_indices(&mut self, indices: &[usize]) -> Result<StepResult, StepError> {
        let actions = indices
            .iter()
            .map(|&i| Action::from_index(i))
            .collect::<Result<Vec<_>, _>>()?;
        self.step(&actions)
    }

    /// Advance one tick
    ///
    /// `actions` holds one action per agent, team-major. Stepping a finished
    /// episode changes nothing and yields zero rewards.
    pub fn step(&mut self, actions: &[Action]) -> Result<StepResult, StepError> {
        let n_agents = self.n_agents();
        if actions.len() != n_agents {
            return Err(StepError::ActionCount {
                expected: n_agents,
                got: actions.len(),
            });
        }

        if let GamePhase::Terminal { winner } = self.phase {
            return Ok(StepResult {
                observation: self.observe(),
                rewards: vec![0; n_agents],
                done: true,
                winner: Some(winner),
                effects: vec![ActionEffect::Idle; n_agents],
                rollbacks: Vec::new(),
            });
        }

        self.time_ticks += 1;

        let occupied: Vec<_> = self.state.agents.iter().map(|a| a.position).collect();
        let effects: Vec<_> = actions
            .iter()
            .enumerate()
            .map(|(i, &action)| resolve_action(&mut self.state, i, action, &self.field, &occupied))
            .collect();

        if self.state.ball.in_flight() {
            if let FlightOutcome::Intercepted(id) = advance_ball(&mut self.state, &self.field) {
                log::debug!("Tick {}: ball caught by {}/{}", self.time_ticks, id.team, id.number);
            }
        }

        let rollbacks = resolve_overlaps(&mut self.state, &mut self.rng);

        self.snapshot = GridSnapshot::compose(&self.field, &self.state);

        let winner = self
            .field
            .goal_side(self.state.ball.position)
            .map(|side| side.winning_team());

        let rewards = match winner {
            Some(winner) => {
                self.state.ball.stop();
                self.phase = GamePhase::Terminal { winner };
                log::info!(
                    "Goal after {} ticks at {}, team {} wins",
                    self.time_ticks,
                    self.state.ball.position,
                    winner
                );
                self.state
                    .agents
                    .iter()
                    .map(|a| {
                        if a.team() == winner {
                            WIN_REWARD
                        } else {
                            LOSS_REWARD
                        }
                    })
                    .collect()
            }
            None => vec![TICK_REWARD; n_agents],
        };

        Ok(StepResult {
            observation: self.observe(),
            rewards,
            done: winner.is_some(),
            winner,
            effects,
            rollbacks,
        })
    }

    /// Current observation in the configured flavour
    pub fn observe(&self) -> Observation {
        Observation::project(self.observation_kind, &self.snapshot, &self.state)
    }

    pub fn field(&self) -> &Field {
        &self.field
    }

    pub fn state(&self) -> &EntityState {
        &self.state
    }

    pub fn snapshot(&self) -> &GridSnapshot {
        &self.snapshot
    }

    pub fn scheme(&self) -> &PlacementScheme {
        &self.scheme
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn is_done(&self) -> bool {
        matches!(self.phase, GamePhase::Terminal { .. })
    }

    pub fn time_ticks(&self) -> u64 {
        self.time_ticks
    }

    pub fn seed(&self) -> u64 {
        self.rng_state.seed
    }

    pub fn n_agents(&self) -> usize {
        self.state.agents.len()
    }

    pub fn observation_kind(&self) -> ObservationKind {
        self.observation_kind
    }

    /// Length of a compact observation
    pub fn observation_len(&self) -> usize {
        2 + 2 * self.n_agents()
    }

    /// Agent ids in action order
    pub fn agent_ids(&self) -> Vec<AgentId> {
        self.state.agents.iter().map(|a| a.id).collect()
    }
}
