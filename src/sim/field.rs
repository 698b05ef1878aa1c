//! Static playing surface
//!
//! The field is a width x height grid of cell kinds. Walls run along every
//! border; a vertically centered band on each short edge is a goal mouth.
//! Built once per field shape and never mutated afterwards.

use glam::IVec2;
use serde::{Deserialize, Serialize};

use crate::consts::MIN_FIELD_DIM;
use crate::error::ConfigError;

/// Kind of a static field cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CellKind {
    #[default]
    Empty,
    Wall,
    Goal,
}

/// Which short edge a goal sits on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GoalSide {
    /// x = 0
    Left,
    /// x = width - 1
    Right,
}

impl GoalSide {
    /// Team credited when the ball comes to rest in this goal
    pub fn winning_team(self) -> usize {
        match self {
            GoalSide::Left => 0,
            GoalSide::Right => 1,
        }
    }
}

/// Immutable grid of walls, goals and open space (column-major, `x * height + y`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Field {
    width: i32,
    height: i32,
    cells: Vec<CellKind>,
}

impl Field {
    /// Build the field for a given shape
    pub fn build(width: i32, height: i32) -> Result<Self, ConfigError> {
        if width < MIN_FIELD_DIM || height < MIN_FIELD_DIM {
            return Err(ConfigError::FieldTooSmall { width, height });
        }
        // Every cell index must fit in an i32
        let Some(area) = width.checked_mul(height) else {
            return Err(ConfigError::FieldTooLarge { width, height });
        };

        let mut cells = vec![CellKind::Empty; area as usize];
        let idx = |x: i32, y: i32| (x * height + y) as usize;

        for x in 0..width {
            cells[idx(x, 0)] = CellKind::Wall;
            cells[idx(x, height - 1)] = CellKind::Wall;
        }
        for y in 0..height {
            cells[idx(0, y)] = CellKind::Wall;
            cells[idx(width - 1, y)] = CellKind::Wall;
        }

        let (start, end) = goal_span(height);
        for y in start..end {
            cells[idx(0, y)] = CellKind::Goal;
            cells[idx(width - 1, y)] = CellKind::Goal;
        }

        log::debug!("Built {}x{} field, goal rows {}..{}", width, height, start, end);

        Ok(Self {
            width,
            height,
            cells,
        })
    }

    #[inline]
    /// Number of cells
    pub fn area(&self) -> usize {
        self.cells.len()
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> i32 {
        self.height
    }

    #[inline]
    pub fn in_bounds(&self, pos: IVec2) -> bool {
        pos.x >= 0 && pos.x < self.width && pos.y >= 0 && pos.y < self.height
    }

    /// Cell kind at `pos`, or `None` outside the grid
    #[inline]
    pub fn get(&self, pos: IVec2) -> Option<CellKind> {
        if self.in_bounds(pos) {
            Some(self.cells[(pos.x * self.height + pos.y) as usize])
        } else {
            None
        }
    }

    /// True only for in-bounds wall cells
    #[inline]
    pub fn is_wall(&self, pos: IVec2) -> bool {
        matches!(self.get(pos), Some(CellKind::Wall))
    }

    #[inline]
    pub fn is_goal(&self, pos: IVec2) -> bool {
        matches!(self.get(pos), Some(CellKind::Goal))
    }

    /// Open cells are the only ones agents may stand on
    #[inline]
    pub fn is_open(&self, pos: IVec2) -> bool {
        matches!(self.get(pos), Some(CellKind::Empty))
    }

    /// Goal containing `pos`, if any
    pub fn goal_side(&self, pos: IVec2) -> Option<GoalSide> {
        if !self.is_goal(pos) {
            return None;
        }
        if pos.x == 0 {
            Some(GoalSide::Left)
        } else {
            Some(GoalSide::Right)
        }
    }

    /// Clamp a coordinate into the grid
    #[inline]
    pub fn clamp(&self, pos: IVec2) -> IVec2 {
        pos.clamp(IVec2::ZERO, IVec2::new(self.width - 1, self.height - 1))
    }
}

/// Half-open row range `[start, end)` of the goal mouths
pub fn goal_span(height: i32) -> (i32, i32) {
    let start = height / 4 + 1;
    (start, start + height / 2)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_too_small() {
        assert!(matches!(
            Field::build(4, 9),
            Err(ConfigError::FieldTooSmall { width: 4, height: 9 })
        ));
        assert!(Field::build(15, 4).is_err());
        assert!(Field::build(5, 5).is_ok());
    }

    #[test]
    fn test_too_large() {
        assert!(matches!(
            Field::build(100_000, 100_000),
            Err(ConfigError::FieldTooLarge {
                width: 100_000,
                height: 100_000
            })
        ));
        assert!(matches!(
            Field::build(i32::MAX, 5),
            Err(ConfigError::FieldTooLarge { .. })
        ));
        assert_eq!(Field::build(7, 5).unwrap().area(), 35);
    }

    #[test]
    fn test_borders_and_goals() {
        let field = Field::build(15, 9).unwrap();
        // goal rows 3..7
        for y in 0..9 {
            let expected = if (3..7).contains(&y) {
                CellKind::Goal
            } else {
                CellKind::Wall
            };
            assert_eq!(field.get(IVec2::new(0, y)), Some(expected));
            assert_eq!(field.get(IVec2::new(14, y)), Some(expected));
        }
        for x in 0..15 {
            assert!(field.is_wall(IVec2::new(x, 0)));
            assert!(field.is_wall(IVec2::new(x, 8)));
        }
        assert!(field.is_open(IVec2::new(7, 4)));
        assert_eq!(field.get(IVec2::new(-1, 4)), None);
        assert!(!field.is_wall(IVec2::new(15, 4)));
    }

    #[test]
    fn test_goal_never_reaches_corner_rows() {
        for height in 5..40 {
            let (start, end) = goal_span(height);
            assert!(start >= 1);
            assert!(end <= height - 1, "height {height}");
        }
    }

    #[test]
    fn test_goal_side() {
        let field = Field::build(15, 9).unwrap();
        assert_eq!(field.goal_side(IVec2::new(0, 4)), Some(GoalSide::Left));
        assert_eq!(field.goal_side(IVec2::new(14, 4)), Some(GoalSide::Right));
        assert_eq!(field.goal_side(IVec2::new(7, 4)), None);
        assert_eq!(GoalSide::Left.winning_team(), 0);
        assert_eq!(GoalSide::Right.winning_team(), 1);
    }
}
