//! Agent actions
//!
//! 17 discrete symbols: STAY, 8 moves and 8 throws. Indices follow the
//! policy network's output layout:
//! `0` stay, `1..=8` move, `9..=16` throw, directions counter-clockwise from
//! east in both ranges.

use glam::IVec2;
use serde::{Deserialize, Serialize};

use crate::consts::THROW_STEP;
use crate::error::StepError;

/// Eight compass directions, counter-clockwise from east
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Right,
    UpRight,
    Up,
    UpLeft,
    Left,
    DownLeft,
    Down,
    DownRight,
}

impl Direction {
    pub const ALL: [Direction; 8] = [
        Direction::Right,
        Direction::UpRight,
        Direction::Up,
        Direction::UpLeft,
        Direction::Left,
        Direction::DownLeft,
        Direction::Down,
        Direction::DownRight,
    ];

    /// Unit grid step
    pub fn unit(self) -> IVec2 {
        match self {
            Direction::Right => IVec2::new(1, 0),
            Direction::UpRight => IVec2::new(1, 1),
            Direction::Up => IVec2::new(0, 1),
            Direction::UpLeft => IVec2::new(-1, 1),
            Direction::Left => IVec2::new(-1, 0),
            Direction::DownLeft => IVec2::new(-1, -1),
            Direction::Down => IVec2::new(0, -1),
            Direction::DownRight => IVec2::new(1, -1),
        }
    }

    /// Displacement of one throw segment
    pub fn throw_segment(self) -> IVec2 {
        self.unit() * THROW_STEP
    }
}

/// One agent's choice for a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    Stay,
    Move(Direction),
    Throw(Direction),
}

impl Action {
    /// Size of the action space
    pub const COUNT: usize = 17;

    /// Decode a policy output index
    pub fn from_index(index: usize) -> Result<Self, StepError> {
        match index {
            0 => Ok(Action::Stay),
            1..=8 => Ok(Action::Move(Direction::ALL[index - 1])),
            9..=16 => Ok(Action::Throw(Direction::ALL[index - 9])),
            _ => Err(StepError::InvalidAction(index)),
        }
    }

    pub fn index(self) -> usize {
        match self {
            Action::Stay => 0,
            Action::Move(dir) => 1 + dir as usize,
            Action::Throw(dir) => 9 + dir as usize,
        }
    }

    /// Agent displacement requested by this action (zero for stay and throws)
    pub fn displacement(self) -> IVec2 {
        match self {
            Action::Move(dir) => dir.unit(),
            Action::Stay | Action::Throw(_) => IVec2::ZERO,
        }
    }
}
