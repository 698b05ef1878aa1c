//! Overlap resolution
//!
//! Agents are placed onto the field in team-major order. When an agent lands
//! on a cell that an earlier agent already holds, a coin flip picks one of
//! the two to step back to where it started the tick. One pass only; a
//! rolled-back agent is not re-checked against its old cell.

use std::collections::HashMap;

use glam::IVec2;
use rand::Rng;

use super::state::{AgentId, EntityState};

/// An agent sent back to its previous position
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rollback {
    pub agent: AgentId,
    /// The cell it lost
    pub contested: IVec2,
    /// Whether it was holding the ball
    pub dropped_ball: bool,
}

/// Resolve agents sharing a cell after all actions of a tick
///
/// A rolled-back carrier loses possession and the ball stays with it, loose,
/// at the cell it returns to.
pub fn resolve_overlaps<R: Rng>(state: &mut EntityState, rng: &mut R) -> Vec<Rollback> {
    let mut placed: HashMap<IVec2, usize> = HashMap::with_capacity(state.agents.len());
    let mut rollbacks = Vec::new();

    for i in 0..state.agents.len() {
        let pos = state.agents[i].position;
        let existing = placed.get(&pos).copied();
        let Some(j) = existing else {
            placed.insert(pos, i);
            continue;
        };

        let (loser, keeper) = if rng.random_bool(0.5) { (i, j) } else { (j, i) };

        let agent = &mut state.agents[loser];
        agent.position = agent.previous_position;
        let back_to = agent.position;
        let id = agent.id;
        let dropped_ball = agent.has_ball;
        if dropped_ball {
            state.drop_ball(loser);
            state.ball.position = back_to;
        }

        log::debug!(
            "Overlap at {}: agent {}/{} rolls back to {}",
            pos,
            id.team,
            id.number,
            back_to
        );

        placed.insert(pos, keeper);
        placed.entry(back_to).or_insert(loser);
        rollbacks.push(Rollback {
            agent: id,
            contested: pos,
            dropped_ball,
        });
    }

    rollbacks
}
