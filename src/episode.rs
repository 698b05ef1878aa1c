//! Episode driver
//!
//! Policies pick actions; the driver feeds them observations, steps the
//! environment and stops at a goal or a timestep limit. The limit lives here,
//! not in the simulation, which happily runs forever.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::error::StepError;
use crate::sim::{Action, AgentId, FieldEnv, Observation};

/// Maximum number of results kept in `EpisodeStats`
pub const MAX_HISTORY: usize = 100;

/// Chooses one agent's action from an observation
pub trait Policy {
    fn choose_action(&mut self, agent: AgentId, observation: &Observation) -> Action;
}

/// Uniformly random actions from a seeded generator
#[derive(Debug, Clone)]
pub struct RandomPolicy {
    rng: Pcg32,
}

impl RandomPolicy {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(seed),
        }
    }
}

impl Policy for RandomPolicy {
    fn choose_action(&mut self, _agent: AgentId, _observation: &Observation) -> Action {
        let index = self.rng.random_range(0..Action::COUNT);
        Action::from_index(index).unwrap_or(Action::Stay)
    }
}

/// Outcome of one episode
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EpisodeResult {
    /// Ticks played
    pub ticks: u64,
    /// Summed reward per agent, team-major
    pub rewards: Vec<i64>,
    pub winner: Option<usize>,
    /// Stopped by the timestep limit rather than a goal
    pub cut_off: bool,
}

/// Reset `env` and play until a goal or `max_timesteps` ticks
///
/// `policies` holds one policy per agent, team-major.
pub fn run_episode(
    env: &mut FieldEnv,
    policies: &mut [Box<dyn Policy>],
    max_timesteps: u64,
) -> Result<EpisodeResult, StepError> {
    let n_agents = env.n_agents();
    if policies.len() != n_agents {
        return Err(StepError::ActionCount {
            expected: n_agents,
            got: policies.len(),
        });
    }

    let ids = env.agent_ids();
    let mut observation = env.reset();
    let mut totals = vec![0i64; n_agents];
    let mut winner = None;

    while env.time_ticks() < max_timesteps {
        let actions: Vec<Action> = policies
            .iter_mut()
            .zip(&ids)
            .map(|(policy, &id)| policy.choose_action(id, &observation))
            .collect();

        let result = env.step(&actions)?;
        for (total, reward) in totals.iter_mut().zip(&result.rewards) {
            *total += i64::from(*reward);
        }
        observation = result.observation;

        if result.done {
            winner = result.winner;
            break;
        }
    }

    let cut_off = winner.is_none();
    if cut_off {
        log::warn!("Episode cut off after {} ticks", env.time_ticks());
    }

    Ok(EpisodeResult {
        ticks: env.time_ticks(),
        rewards: totals,
        winner,
        cut_off,
    })
}

/// Rolling record of recent episodes (newest last)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EpisodeStats {
    pub entries: Vec<EpisodeResult>,
    /// Episodes recorded in total, including ones no longer kept
    pub total: u64,
}

impl EpisodeStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, result: EpisodeResult) {
        self.entries.push(result);
        if self.entries.len() > MAX_HISTORY {
            self.entries.remove(0);
        }
        self.total += 1;
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Mean episode length over kept entries
    pub fn mean_ticks(&self) -> f64 {
        if self.entries.is_empty() {
            return 0.0;
        }
        let sum: u64 = self.entries.iter().map(|e| e.ticks).sum();
        sum as f64 / self.entries.len() as f64
    }

    /// Goals scored per winning team over kept entries
    pub fn wins(&self, team: usize) -> usize {
        self.entries
            .iter()
            .filter(|e| e.winner == Some(team))
            .count()
    }

    pub fn cut_offs(&self) -> usize {
        self.entries.iter().filter(|e| e.cut_off).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{Direction, ObservationKind};
    use crate::PlacementScheme;

    /// Replays a fixed list, then stays
    struct Scripted(Vec<Action>);

    impl Policy for Scripted {
        fn choose_action(&mut self, _agent: AgentId, _observation: &Observation) -> Action {
            if self.0.is_empty() {
                Action::Stay
            } else {
                self.0.remove(0)
            }
        }
    }

    fn env(scheme: &str) -> FieldEnv {
        let scheme = PlacementScheme::builtin(scheme).unwrap();
        FieldEnv::new(15, 9, scheme, ObservationKind::Compact, 1).unwrap()
    }

    #[test]
    fn test_cut_off() {
        let mut env = env("one_player");
        let mut policies: Vec<Box<dyn Policy>> = vec![Box::new(Scripted(vec![]))];
        let result = run_episode(&mut env, &mut policies, 25).unwrap();
        assert!(result.cut_off);
        assert_eq!(result.ticks, 25);
        assert_eq!(result.rewards, vec![-25]);
    }

    #[test]
    fn test_scripted_goal() {
        let mut env = env("one_player");
        // From (10, 4): fetch the ball at (7, 4), carry two left, then shoot left
        let left = Action::Move(Direction::Left);
        let script = vec![left, left, left, left, left, Action::Throw(Direction::Left)];
        let mut policies: Vec<Box<dyn Policy>> = vec![Box::new(Scripted(script))];
        let result = run_episode(&mut env, &mut policies, 100).unwrap();
        assert!(!result.cut_off);
        assert_eq!(result.winner, Some(0));
        assert_eq!(result.ticks, 8);
        assert_eq!(result.rewards, vec![-7 + 100]);
    }

    #[test]
    fn test_policy_count_checked() {
        let mut env = env("one_v_one");
        let mut policies: Vec<Box<dyn Policy>> = vec![Box::new(RandomPolicy::new(0))];
        assert!(run_episode(&mut env, &mut policies, 10).is_err());
    }

    #[test]
    fn test_random_episodes_are_reproducible() {
        let play = || {
            let mut env = env("two_v_two");
            let mut policies: Vec<Box<dyn Policy>> = (0..4)
                .map(|i| Box::new(RandomPolicy::new(i)) as Box<dyn Policy>)
                .collect();
            run_episode(&mut env, &mut policies, 300).unwrap()
        };
        assert_eq!(play(), play());
    }

    #[test]
    fn test_stats_window() {
        let mut stats = EpisodeStats::new();
        assert!(stats.is_empty());
        assert_eq!(stats.mean_ticks(), 0.0);

        for i in 0..(MAX_HISTORY as u64 + 5) {
            stats.record(EpisodeResult {
                ticks: 10,
                rewards: vec![],
                winner: if i % 2 == 0 { Some(0) } else { None },
                cut_off: i % 2 == 1,
            });
        }
        assert_eq!(stats.len(), MAX_HISTORY);
        assert_eq!(stats.total, MAX_HISTORY as u64 + 5);
        assert_eq!(stats.mean_ticks(), 10.0);
        assert_eq!(stats.wins(0) + stats.cut_offs(), MAX_HISTORY);
        assert_eq!(stats.wins(1), 0);
    }
}
