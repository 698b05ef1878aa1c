//! Text rendering of field snapshots
//!
//! Rows are drawn top (y = height - 1) to bottom, three characters per cell.

use std::fmt;

use glam::IVec2;

use crate::sim::{GridSnapshot, Tile};

/// Three-character glyph for a tile
pub fn glyph(tile: Tile) -> &'static str {
    match tile {
        Tile::Empty => "   ",
        Tile::Team(0) => " 1 ",
        Tile::Team(_) => " 2 ",
        Tile::Ball => " o ",
        Tile::Wall => " x ",
        Tile::Goal => " | ",
    }
}

/// Draw the snapshot as text, one line per row
pub fn render_ascii(snapshot: &GridSnapshot) -> String {
    let (width, height) = (snapshot.width(), snapshot.height());
    let mut out = String::with_capacity(((width * 3 + 1) * height) as usize);
    for y in (0..height).rev() {
        for x in 0..width {
            let tile = snapshot.get(IVec2::new(x, y)).unwrap_or(Tile::Empty);
            out.push_str(glyph(tile));
        }
        out.push('\n');
    }
    out
}

/// A frame as shown between ticks, marked once the episode is over
pub fn render_frame(snapshot: &GridSnapshot, done: bool) -> String {
    let header = if done { "(Done)\n" } else { "\n" };
    format!("{header}{}\n", render_ascii(snapshot))
}

impl fmt::Display for GridSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&render_ascii(self))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{EntityState, Field};

    #[test]
    fn test_small_field() {
        let field = Field::build(5, 5).unwrap();
        let state = EntityState::new(
            IVec2::new(2, 2),
            &[vec![IVec2::new(3, 2)], vec![IVec2::new(1, 1)]],
        );
        let snap = GridSnapshot::compose(&field, &state);
        let text = render_ascii(&snap);
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(
            lines,
            vec![
                " x  x  x  x  x ",
                " |           | ",
                " |     o  1  | ",
                " x  2        x ",
                " x  x  x  x  x ",
            ]
        );
        assert_eq!(snap.to_string(), text);
    }

    #[test]
    fn test_done_frame_header() {
        let field = Field::build(5, 5).unwrap();
        let state = EntityState::new(IVec2::new(2, 2), &[vec![IVec2::new(1, 1)]]);
        let snap = GridSnapshot::compose(&field, &state);
        assert!(render_frame(&snap, true).starts_with("(Done)\n"));
        assert!(render_frame(&snap, false).starts_with("\n x "));
    }
}
