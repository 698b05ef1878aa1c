//! Per-agent action resolution
//!
//! Occupancy is judged against where agents stood when the tick began, so two
//! agents can step into the same cell in one tick; the overlap pass sorts
//! that out afterwards.

use glam::IVec2;

use super::action::Action;
use super::field::Field;
use super::state::EntityState;

/// What an action ended up doing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionEffect {
    /// Nothing changed (stay, or a throw without the ball)
    Idle,
    /// Target was a wall, goal or another agent
    Blocked,
    Moved,
    /// Moved onto the resting ball and took possession
    PickedUp,
    /// Moved while dragging the held ball
    Carried,
    /// Holding, but no carried moves remain
    CarryExhausted,
    Threw,
}

/// Apply one agent's action
///
/// `index` is the agent's team-major position in `state.agents`;
/// `occupied` holds every agent's position at the start of the tick in the
/// same order.
pub fn resolve_action(
    state: &mut EntityState,
    index: usize,
    action: Action,
    field: &Field,
    occupied: &[IVec2],
) -> ActionEffect {
    let agent = &mut state.agents[index];
    agent.previous_position = agent.position;

    match action {
        Action::Throw(dir) => {
            if !agent.has_ball {
                return ActionEffect::Idle;
            }
            agent.has_ball = false;
            agent.carry_counter = crate::consts::NOT_CARRYING;
            log::debug!(
                "Agent {}/{} throws {:?} from {}",
                agent.id.team,
                agent.id.number,
                dir,
                agent.position
            );
            state.ball.launch(dir);
            ActionEffect::Threw
        }
        Action::Stay | Action::Move(_) => {
            let step = action.displacement();
            let target = agent.position + step;

            if !field.is_open(target) {
                return ActionEffect::Blocked;
            }
            let taken = occupied
                .iter()
                .enumerate()
                .any(|(j, &p)| j != index && p == target);
            if taken {
                return ActionEffect::Blocked;
            }

            if agent.has_ball {
                if step == IVec2::ZERO {
                    return ActionEffect::Idle;
                }
                if agent.carry_counter <= 0 {
                    return ActionEffect::CarryExhausted;
                }
                agent.carry_counter -= 1;
                agent.position = target;
                state.ball.position = target;
                return ActionEffect::Carried;
            }

            agent.position = target;
            if state.ball.is_loose() && state.ball.position == target {
                state.give_ball(index);
                let id = state.agents[index].id;
                log::debug!("Agent {}/{} picks up the ball at {}", id.team, id.number, target);
                return ActionEffect::PickedUp;
            }

            if step == IVec2::ZERO {
                ActionEffect::Idle
            } else {
                ActionEffect::Moved
            }
        }
    }
}
