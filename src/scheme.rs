//! Placement schemes
//!
//! A scheme lists, per team, fractional (x, y) starting positions that are
//! scaled onto the field at construction time. Built-in schemes cover the
//! usual training curriculum: one player alone, then one and two per side.

use glam::IVec2;
use serde::{Deserialize, Serialize};

use crate::consts::MAX_TEAMS;
use crate::error::ConfigError;
use crate::scale_fraction;

/// Names of the built-in schemes
pub const BUILTIN_SCHEMES: [&str; 3] = ["one_player", "one_v_one", "two_v_two"];

/// Starting placements for every agent
///
/// Deserializing goes through the same checks as `new`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawScheme")]
pub struct PlacementScheme {
    pub name: String,
    /// Per team, per agent number
    teams: Vec<Vec<(f32, f32)>>,
}

/// Unchecked wire form of a scheme
#[derive(Deserialize)]
struct RawScheme {
    name: String,
    teams: Vec<Vec<(f32, f32)>>,
}

impl TryFrom<RawScheme> for PlacementScheme {
    type Error = ConfigError;

    fn try_from(raw: RawScheme) -> Result<Self, Self::Error> {
        Self::new(raw.name, raw.teams)
    }
}

impl PlacementScheme {
    /// Validate a custom scheme
    pub fn new(name: impl Into<String>, teams: Vec<Vec<(f32, f32)>>) -> Result<Self, ConfigError> {
        validate_teams(&teams)?;
        Ok(Self {
            name: name.into(),
            teams,
        })
    }

    /// Re-run the shape checks on an existing scheme
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_teams(&self.teams)
    }

    /// Look up a built-in scheme by name
    pub fn builtin(name: &str) -> Result<Self, ConfigError> {
        let teams = match name {
            "one_player" => vec![vec![(0.7, 0.5)]],
            "one_v_one" => vec![vec![(0.7, 0.5)], vec![(0.3, 0.5)]],
            "two_v_two" => vec![
                vec![(0.7, 0.25), (0.7, 0.75)],
                vec![(0.3, 0.25), (0.3, 0.75)],
            ],
            other => return Err(ConfigError::UnknownScheme(other.to_string())),
        };
        Self::new(name, teams)
    }

    pub fn n_teams(&self) -> usize {
        self.teams.len()
    }

    pub fn team_size(&self) -> usize {
        self.teams.first().map_or(0, Vec::len)
    }

    pub fn n_agents(&self) -> usize {
        self.n_teams() * self.team_size()
    }

    /// Grid positions for a field of the given shape
    pub fn scaled(&self, width: i32, height: i32) -> Vec<Vec<IVec2>> {
        self.teams
            .iter()
            .map(|team| {
                team.iter()
                    .map(|&f| scale_fraction(f, width, height))
                    .collect()
            })
            .collect()
    }
}

/// Team count, equal sizes and in-range fractions
fn validate_teams(teams: &[Vec<(f32, f32)>]) -> Result<(), ConfigError> {
    let Some(first) = teams.first() else {
        return Err(ConfigError::NoTeams);
    };
    if teams.len() > MAX_TEAMS {
        return Err(ConfigError::TooManyTeams(teams.len()));
    }
    let expected = first.len();

    for (team, members) in teams.iter().enumerate() {
        if members.is_empty() {
            return Err(ConfigError::EmptyTeam(team));
        }
        if members.len() != expected {
            return Err(ConfigError::UnequalTeams {
                team,
                found: members.len(),
                expected,
            });
        }
        for (number, &(x, y)) in members.iter().enumerate() {
            if !(0.0..=1.0).contains(&x) || !(0.0..=1.0).contains(&y) {
                return Err(ConfigError::PositionOutOfRange { team, number, x, y });
            }
        }
    }
    Ok(())
}
