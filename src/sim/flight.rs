//! Ball flight and wall reflection
//!
//! A thrown ball advances one segment per tick. Each segment passes through
//! an intermediate half-step cell and lands on a target cell two steps away.
//! Walls are probed per axis around both cells; a reflection flips the
//! current segment and mirrors every queued segment the same way, so a
//! multi-segment throw keeps bending away from the wall it hit.

use glam::IVec2;

use super::field::Field;
use super::state::{AgentId, EntityState};

/// Result of advancing the ball by one segment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlightOutcome {
    /// Segments remain
    Continuing,
    /// Flight is over, ball rests loose
    Stopped,
    /// An agent caught the ball
    Intercepted(AgentId),
}

/// How a segment responds to nearby walls
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reflection {
    None,
    MirrorX,
    MirrorY,
    /// Both axes flipped (head-on corner or edge catch)
    Full,
    /// Ball stops where it is
    Dead,
}

impl Reflection {
    /// Apply to one segment vector
    pub fn apply(self, seg: IVec2) -> IVec2 {
        match self {
            Reflection::None => seg,
            Reflection::MirrorX => IVec2::new(-seg.x, seg.y),
            Reflection::MirrorY => IVec2::new(seg.x, -seg.y),
            Reflection::Full => -seg,
            Reflection::Dead => IVec2::ZERO,
        }
    }
}

/// Walls found around one segment
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WallContact {
    /// Half step along x (y held at the ball) is a wall
    pub beside_x: bool,
    /// Half step along y (x held at the ball) is a wall
    pub beside_y: bool,
    /// Full step along x is a wall
    pub far_x: bool,
    /// Full step along y is a wall
    pub far_y: bool,
    /// Diagonal segment clipping the goal mouth edge
    pub post: bool,
}

impl WallContact {
    /// Probe the field around a segment `mv` starting at `pos`
    ///
    /// Cells outside the grid are not walls: the only place the ball can
    /// look past the border is straight through a goal mouth.
    pub fn probe(field: &Field, pos: IVec2, mv: IVec2) -> Self {
        let inter = pos + mv / 2;
        let target = pos + mv;

        let beside_x = mv.x != 0 && field.is_wall(IVec2::new(inter.x, pos.y));
        let beside_y = mv.y != 0 && field.is_wall(IVec2::new(pos.x, inter.y));

        // A blocked half step keeps that axis at the ball
        let path_x = if beside_x { pos.x } else { inter.x };
        let path_y = if beside_y { pos.y } else { inter.y };

        let far_x = mv.x != 0 && !beside_x && field.is_wall(IVec2::new(target.x, path_y));
        let far_y = mv.y != 0 && !beside_y && field.is_wall(IVec2::new(path_x, target.y));

        let post = mv.x != 0
            && mv.y != 0
            && field.is_goal(IVec2::new(inter.x, pos.y))
            && field.is_goal(inter);

        Self {
            beside_x,
            beside_y,
            far_x,
            far_y,
            post,
        }
    }

    pub fn reflection(&self) -> Reflection {
        let x = self.beside_x || self.far_x;
        let y = self.beside_y || self.far_y;

        if self.post || (self.far_x && self.far_y) {
            Reflection::Dead
        } else if x && y {
            Reflection::Full
        } else if x {
            Reflection::MirrorX
        } else if y {
            Reflection::MirrorY
        } else {
            Reflection::None
        }
    }
}

/// Advance an in-flight ball by one segment
///
/// Interception looks at the intermediate cell before the target; on either
/// cell the first agent in team-major order wins. A ball that is not in
/// flight is left untouched.
pub fn advance_ball(state: &mut EntityState, field: &Field) -> FlightOutcome {
    if !state.ball.in_flight() {
        return FlightOutcome::Stopped;
    }
    let Some(segment) = state.ball.pending_segments.pop_front() else {
        return FlightOutcome::Stopped;
    };

    let pos = state.ball.position;
    let reflection = WallContact::probe(field, pos, segment).reflection();
    let mv = reflection.apply(segment);

    match reflection {
        Reflection::None => {}
        Reflection::Dead => {
            log::debug!("Ball dies at {}", pos);
            state.ball.stop();
        }
        _ => {
            log::debug!("Ball at {} reflects {:?}: {} -> {}", pos, reflection, segment, mv);
            for seg in state.ball.pending_segments.iter_mut() {
                *seg = reflection.apply(*seg);
            }
        }
    }

    // Only a shot through a goal mouth can point past the border
    let inter = field.clamp(pos + mv / 2);
    let mut target = field.clamp(pos + mv);

    // Narrow fields can bounce a segment onto the opposite wall
    if field.is_wall(target) {
        target = if field.is_wall(inter) { pos } else { inter };
        state.ball.stop();
    }

    let catcher = state
        .agent_at(inter)
        .or_else(|| state.agent_at(target));
    if let Some(index) = catcher {
        state.give_ball(index);
        let id = state.agents[index].id;
        log::debug!("Ball intercepted by {}/{} at {}", id.team, id.number, state.ball.position);
        return FlightOutcome::Intercepted(id);
    }

    state.ball.position = target;

    if state.ball.pending_segments.is_empty() {
        FlightOutcome::Stopped
    } else {
        FlightOutcome::Continuing
    }
}
