//! Scene buffer - the glyphs entities draw each frame, keyed by game position.
//!
//! Entities never talk to the terminal. They write into a [`SceneBuffer`]; the
//! terminal layer decides which part of it is visible.

use std::collections::HashMap;

use crate::types::{Position, Tint};

/// A glyph plus the class used to color it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SceneCell {
    pub glyph: char,
    pub tint: Tint,
}

/// Sparse game-space buffer. Later writes to a position replace earlier ones.
#[derive(Debug, Clone, Default)]
pub struct SceneBuffer {
    cells: HashMap<Position, SceneCell>,
}

impl SceneBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.cells.clear();
    }

    pub fn put(&mut self, pos: Position, glyph: char, tint: Tint) {
        self.cells.insert(pos, SceneCell { glyph, tint });
    }

    /// Write `s` upward from `base` so it reads top-down on screen.
    ///
    /// The first character lands on the highest row.
    pub fn put_vertical(&mut self, base: Position, s: &str, tint: Tint) {
        let len = s.chars().count() as i32;
        for (i, ch) in s.chars().enumerate() {
            self.put(base.offset(len - 1 - i as i32, 0), ch, tint);
        }
    }

    pub fn get(&self, pos: Position) -> Option<SceneCell> {
        self.cells.get(&pos).copied()
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Position, SceneCell)> + '_ {
        self.cells.iter().map(|(p, c)| (*p, *c))
    }

    /// Highest buffered row and rightmost buffered column.
    ///
    /// The two maxima are taken independently and may come from different cells.
    pub fn extent(&self) -> Option<(i32, i32)> {
        let max_row = self.cells.keys().map(|p| p.row).max()?;
        let max_col = self.cells.keys().map(|p| p.col).max()?;
        Some((max_row, max_col))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn put_vertical_reads_top_down() {
        let mut scene = SceneBuffer::new();
        scene.put_vertical(Position::new(0, 3), "WIN", Tint::Goal);

        assert_eq!(scene.get(Position::new(2, 3)).unwrap().glyph, 'W');
        assert_eq!(scene.get(Position::new(1, 3)).unwrap().glyph, 'I');
        assert_eq!(scene.get(Position::new(0, 3)).unwrap().glyph, 'N');
    }

    #[test]
    fn later_write_wins() {
        let mut scene = SceneBuffer::new();
        scene.put(Position::new(1, 1), 'a', Tint::Plain);
        scene.put(Position::new(1, 1), 'b', Tint::Hazard);
        assert_eq!(scene.len(), 1);
        assert_eq!(
            scene.get(Position::new(1, 1)),
            Some(SceneCell {
                glyph: 'b',
                tint: Tint::Hazard
            })
        );
    }

    #[test]
    fn extent_takes_independent_maxima() {
        let mut scene = SceneBuffer::new();
        assert_eq!(scene.extent(), None);
        scene.put(Position::new(7, 0), '=', Tint::Terrain);
        scene.put(Position::new(0, 40), '=', Tint::Terrain);
        assert_eq!(scene.extent(), Some((7, 40)));
    }
}
