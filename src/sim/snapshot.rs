//! Composite field snapshot and observations
//!
//! The snapshot is the static field with agents and the ball drawn on top.
//! It is rebuilt from entity state once per tick and is the only thing the
//! renderer and grid observations see.

use glam::IVec2;
use serde::{Deserialize, Serialize};

use super::field::{CellKind, Field};
use super::state::EntityState;

/// Contents of one snapshot cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Tile {
    Empty,
    Wall,
    Goal,
    /// An agent of the given team
    Team(usize),
    Ball,
}

impl From<CellKind> for Tile {
    fn from(kind: CellKind) -> Self {
        match kind {
            CellKind::Empty => Tile::Empty,
            CellKind::Wall => Tile::Wall,
            CellKind::Goal => Tile::Goal,
        }
    }
}

/// Read-only grid of tiles (column-major, `x * height + y`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridSnapshot {
    width: i32,
    height: i32,
    tiles: Vec<Tile>,
}

impl GridSnapshot {
    /// Compose the static field with the current entities
    ///
    /// The ball is only drawn on empty or goal cells, so an agent standing on
    /// it hides it.
    pub fn compose(field: &Field, state: &EntityState) -> Self {
        let (width, height) = (field.width(), field.height());
        let mut tiles = Vec::with_capacity(field.area());
        for x in 0..width {
            for y in 0..height {
                let kind = field.get(IVec2::new(x, y)).unwrap_or_default();
                tiles.push(Tile::from(kind));
            }
        }
        let mut snapshot = Self {
            width,
            height,
            tiles,
        };

        for agent in &state.agents {
            if let Some(tile) = snapshot.get_mut(agent.position) {
                *tile = Tile::Team(agent.team());
            }
        }
        if let Some(tile) = snapshot.get_mut(state.ball.position) {
            if matches!(*tile, Tile::Empty | Tile::Goal) {
                *tile = Tile::Ball;
            }
        }
        snapshot
    }

    #[inline]
    pub fn width(&self) -> i32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> i32 {
        self.height
    }

    pub fn get(&self, pos: IVec2) -> Option<Tile> {
        self.index(pos).map(|i| self.tiles[i])
    }

    fn get_mut(&mut self, pos: IVec2) -> Option<&mut Tile> {
        match self.index(pos) {
            Some(i) => Some(&mut self.tiles[i]),
            None => None,
        }
    }

    fn index(&self, pos: IVec2) -> Option<usize> {
        if pos.x >= 0 && pos.x < self.width && pos.y >= 0 && pos.y < self.height {
            Some((pos.x * self.height + pos.y) as usize)
        } else {
            None
        }
    }
}

/// Observation flavour handed to policies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ObservationKind {
    /// Full grid snapshot
    Grid,
    /// `[ball.x, ball.y, a0.x, a0.y, ...]`
    #[default]
    Compact,
}

impl ObservationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ObservationKind::Grid => "grid",
            ObservationKind::Compact => "compact",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "grid" | "rgb" => Some(ObservationKind::Grid),
            "compact" | "ram" => Some(ObservationKind::Compact),
            _ => None,
        }
    }
}

/// What a policy sees after reset or step
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Observation {
    Grid(GridSnapshot),
    Compact(Vec<i32>),
}

impl Observation {
    pub fn project(kind: ObservationKind, snapshot: &GridSnapshot, state: &EntityState) -> Self {
        match kind {
            ObservationKind::Grid => Observation::Grid(snapshot.clone()),
            ObservationKind::Compact => Observation::Compact(state.compact()),
        }
    }

    pub fn as_compact(&self) -> Option<&[i32]> {
        match self {
            Observation::Compact(v) => Some(v),
            Observation::Grid(_) => None,
        }
    }

    pub fn as_grid(&self) -> Option<&GridSnapshot> {
        match self {
            Observation::Grid(g) => Some(g),
            Observation::Compact(_) => None,
        }
    }
}
