//! Environment configuration
//!
//! Plain data loaded from JSON, validated when the environment is built.

use serde::{Deserialize, Serialize};

use crate::consts::{DEFAULT_HEIGHT, DEFAULT_WIDTH};
use crate::error::ConfigError;
use crate::scheme::PlacementScheme;
use crate::sim::FieldEnv;

pub use crate::sim::ObservationKind;

/// Environment settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnvConfig {
    pub width: i32,
    pub height: i32,
    /// Built-in scheme name
    pub scheme: String,
    /// Custom per-team placements; overrides `scheme` when present
    pub placements: Option<Vec<Vec<(f32, f32)>>>,
    /// Seed for the overlap tie-break RNG
    pub seed: u64,
    pub observation: ObservationKind,
}

impl Default for EnvConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            scheme: "one_player".to_string(),
            placements: None,
            seed: 0,
            observation: ObservationKind::Compact,
        }
    }
}

impl EnvConfig {
    /// Parse from JSON; missing fields take their defaults
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.placement_scheme()?;
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Resolve the configured placement scheme
    pub fn placement_scheme(&self) -> Result<PlacementScheme, ConfigError> {
        match &self.placements {
            Some(teams) => PlacementScheme::new(self.scheme.clone(), teams.clone()),
            None => PlacementScheme::builtin(&self.scheme),
        }
    }

    /// Build a ready environment
    pub fn build(&self) -> Result<FieldEnv, ConfigError> {
        FieldEnv::new(
            self.width,
            self.height,
            self.placement_scheme()?,
            self.observation,
            self.seed,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = EnvConfig::from_json("{}").unwrap();
        assert_eq!(config, EnvConfig::default());
        let env = config.build().unwrap();
        assert_eq!(env.field().width(), 21);
        assert_eq!(env.field().height(), 15);
        assert_eq!(env.n_agents(), 1);
    }

    #[test]
    fn test_partial_json() {
        let config = EnvConfig::from_json(
            r#"{"width": 15, "height": 9, "scheme": "one_v_one", "observation": "grid", "seed": 3}"#,
        )
        .unwrap();
        assert_eq!(config.observation, ObservationKind::Grid);
        let env = config.build().unwrap();
        assert_eq!(env.n_agents(), 2);
        assert_eq!(env.seed(), 3);
    }

    #[test]
    fn test_custom_placements() {
        let config = EnvConfig::from_json(
            r#"{"scheme": "wide", "placements": [[[0.8, 0.5]], [[0.2, 0.5]]]}"#,
        )
        .unwrap();
        let scheme = config.placement_scheme().unwrap();
        assert_eq!(scheme.name, "wide");
        assert_eq!(scheme.n_teams(), 2);
    }

    #[test]
    fn test_errors() {
        assert!(matches!(
            EnvConfig::from_json("{not json"),
            Err(ConfigError::Parse(_))
        ));
        assert!(matches!(
            EnvConfig::from_json(r#"{"scheme": "nope"}"#),
            Err(ConfigError::UnknownScheme(_))
        ));
        let config = EnvConfig {
            width: 3,
            ..Default::default()
        };
        assert!(matches!(
            config.build(),
            Err(ConfigError::FieldTooSmall { .. })
        ));
    }

    #[test]
    fn test_json_roundtrip() {
        let config = EnvConfig {
            scheme: "two_v_two".to_string(),
            seed: 9,
            ..Default::default()
        };
        let json = config.to_json().unwrap();
        assert_eq!(EnvConfig::from_json(&json).unwrap(), config);
    }
}
