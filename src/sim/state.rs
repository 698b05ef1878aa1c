//! Entity state and core simulation types
//!
//! Everything that changes during an episode lives here. Agents are stored
//! team-major (all of team 0 by number, then team 1), which is also the order
//! actions are resolved in and the order of the compact observation.

use std::collections::VecDeque;

use glam::IVec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::action::Direction;
use crate::consts::*;

/// Identifies an agent by team and number within the team
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AgentId {
    pub team: usize,
    pub number: usize,
}

impl AgentId {
    pub fn new(team: usize, number: usize) -> Self {
        Self { team, number }
    }
}

/// The ball
///
/// Held, in flight, or resting loose at `position`. In flight means not held
/// with segments still queued.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ball {
    pub position: IVec2,
    /// Agent currently possessing the ball
    pub holder: Option<AgentId>,
    /// Remaining movement vectors of the current throw, front first
    pub pending_segments: VecDeque<IVec2>,
    initial_position: IVec2,
}

impl Ball {
    pub fn new(initial_position: IVec2) -> Self {
        Self {
            position: initial_position,
            holder: None,
            pending_segments: VecDeque::with_capacity(THROW_SEGMENTS),
            initial_position,
        }
    }

    pub fn reset(&mut self) {
        self.position = self.initial_position;
        self.holder = None;
        self.pending_segments.clear();
    }

    #[inline]
    pub fn in_flight(&self) -> bool {
        self.holder.is_none() && !self.pending_segments.is_empty()
    }

    /// Neither held nor moving
    #[inline]
    pub fn is_loose(&self) -> bool {
        self.holder.is_none() && self.pending_segments.is_empty()
    }

    /// Arm the ball for flight with a full set of segments
    pub fn launch(&mut self, dir: Direction) {
        self.holder = None;
        self.pending_segments.clear();
        self.pending_segments
            .extend(std::iter::repeat_n(dir.throw_segment(), THROW_SEGMENTS));
    }

    /// End any flight and leave the ball where it is
    pub fn stop(&mut self) {
        self.pending_segments.clear();
    }
}

/// A player on the field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Agent {
    pub id: AgentId,
    pub position: IVec2,
    /// Position at the start of the current tick (overlap rollback target)
    pub previous_position: IVec2,
    pub has_ball: bool,
    /// Carried moves left, or `NOT_CARRYING`
    pub carry_counter: i32,
    initial_position: IVec2,
}

impl Agent {
    pub fn new(id: AgentId, initial_position: IVec2) -> Self {
        Self {
            id,
            position: initial_position,
            previous_position: initial_position,
            has_ball: false,
            carry_counter: NOT_CARRYING,
            initial_position,
        }
    }

    pub fn reset(&mut self) {
        self.position = self.initial_position;
        self.previous_position = self.initial_position;
        self.has_ball = false;
        self.carry_counter = NOT_CARRYING;
    }

    #[inline]
    pub fn team(&self) -> usize {
        self.id.team
    }
}

/// All mutable entities of one episode
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityState {
    pub ball: Ball,
    /// Team-major, number-minor
    pub agents: Vec<Agent>,
    team_size: usize,
}

impl EntityState {
    /// Placements are per team, already scaled to grid cells
    pub fn new(ball_start: IVec2, placements: &[Vec<IVec2>]) -> Self {
        let team_size = placements.first().map_or(0, Vec::len);
        let agents = placements
            .iter()
            .enumerate()
            .flat_map(|(team, positions)| {
                positions
                    .iter()
                    .enumerate()
                    .map(move |(number, &pos)| Agent::new(AgentId::new(team, number), pos))
            })
            .collect();

        Self {
            ball: Ball::new(ball_start),
            agents,
            team_size,
        }
    }

    pub fn reset(&mut self) {
        self.ball.reset();
        for agent in &mut self.agents {
            agent.reset();
        }
    }

    #[inline]
    pub fn team_size(&self) -> usize {
        self.team_size
    }

    /// Flat index of an agent in resolution order
    #[inline]
    pub fn index_of(&self, id: AgentId) -> usize {
        id.team * self.team_size + id.number
    }

    pub fn agent(&self, id: AgentId) -> &Agent {
        &self.agents[self.index_of(id)]
    }

    /// Index of the first agent (team-major) standing on `pos`
    pub fn agent_at(&self, pos: IVec2) -> Option<usize> {
        self.agents.iter().position(|a| a.position == pos)
    }

    /// Hand the ball to an agent: possession, fresh carry allowance, ball snapped
    pub fn give_ball(&mut self, index: usize) {
        if let Some(prev) = self.ball.holder {
            let prev = self.index_of(prev);
            self.agents[prev].has_ball = false;
            self.agents[prev].carry_counter = NOT_CARRYING;
        }
        let agent = &mut self.agents[index];
        agent.has_ball = true;
        agent.carry_counter = CARRY_MOVES;
        self.ball.holder = Some(agent.id);
        self.ball.position = agent.position;
        self.ball.pending_segments.clear();
    }

    /// Revoke possession, leaving the ball loose where it is
    pub fn drop_ball(&mut self, index: usize) {
        let agent = &mut self.agents[index];
        if agent.has_ball {
            agent.has_ball = false;
            agent.carry_counter = NOT_CARRYING;
            self.ball.holder = None;
        }
    }

    /// Ball plus agent coordinates, team-major
    pub fn compact(&self) -> Vec<i32> {
        let mut out = Vec::with_capacity(2 + 2 * self.agents.len());
        out.extend([self.ball.position.x, self.ball.position.y]);
        for agent in &self.agents {
            out.extend([agent.position.x, agent.position.y]);
        }
        out
    }
}

/// RNG state wrapper for serialization
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RngState {
    pub seed: u64,
}

impl RngState {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    pub fn to_rng(&self) -> Pcg32 {
        Pcg32::seed_from_u64(self.seed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_v_two() -> EntityState {
        EntityState::new(
            IVec2::new(7, 4),
            &[
                vec![IVec2::new(10, 2), IVec2::new(10, 6)],
                vec![IVec2::new(4, 2), IVec2::new(4, 6)],
            ],
        )
    }

    #[test]
    fn test_team_major_order() {
        let state = two_v_two();
        assert_eq!(state.team_size(), 2);
        let ids: Vec<_> = state.agents.iter().map(|a| a.id).collect();
        assert_eq!(
            ids,
            vec![
                AgentId::new(0, 0),
                AgentId::new(0, 1),
                AgentId::new(1, 0),
                AgentId::new(1, 1)
            ]
        );
        assert_eq!(state.index_of(AgentId::new(1, 1)), 3);
        assert_eq!(state.compact(), vec![7, 4, 10, 2, 10, 6, 4, 2, 4, 6]);
    }

    #[test]
    fn test_give_ball_is_exclusive() {
        let mut state = two_v_two();
        state.give_ball(0);
        assert!(state.agents[0].has_ball);
        assert_eq!(state.ball.position, IVec2::new(10, 2));

        state.give_ball(2);
        assert!(!state.agents[0].has_ball);
        assert_eq!(state.agents[0].carry_counter, NOT_CARRYING);
        assert!(state.agents[2].has_ball);
        assert_eq!(state.agents[2].carry_counter, CARRY_MOVES);
        assert_eq!(state.ball.holder, Some(AgentId::new(1, 0)));
        assert_eq!(state.ball.position, IVec2::new(4, 2));
    }

    #[test]
    fn test_ball_flight_flags() {
        let mut ball = Ball::new(IVec2::new(7, 4));
        assert!(ball.is_loose());
        assert!(!ball.in_flight());

        ball.launch(Direction::Right);
        assert!(ball.in_flight());
        assert_eq!(ball.pending_segments.len(), THROW_SEGMENTS);
        assert!(ball.pending_segments.iter().all(|&s| s == IVec2::new(2, 0)));

        ball.stop();
        assert!(ball.is_loose());
    }

    #[test]
    fn test_reset_restores_placement() {
        let mut state = two_v_two();
        state.agents[1].position = IVec2::new(3, 3);
        state.give_ball(1);
        state.ball.position = IVec2::new(1, 1);
        state.reset();
        assert_eq!(state, two_v_two());
    }
}
