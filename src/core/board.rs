//! Board module - manages the tile grid
//!
//! The board is a fixed `height x width` grid stored as a flat row-major
//! vector for cache locality. Every cell always holds a [`Tile`]; an empty
//! slot is a tile with `active = false`, never a missing entry. Gravity
//! pulls tiles toward row 0.
//!
//! The board knows nothing about matches, score or animation; it is pure
//! storage plus the grid mechanics (gravity, refill) that operate on it.

use crate::core::rng::ColorSource;
use crate::error::BoardError;
use crate::types::{Coord, Tile};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    height: usize,
    width: usize,
    /// Flat array of tiles, row-major order (row * width + col)
    cells: Vec<Tile>,
}

impl Board {
    /// Create a board with every cell inactive (color 0).
    ///
    /// Callers fill it via [`Board::randomize`] or [`Board::fill_empty`]
    /// before play.
    pub fn new(height: usize, width: usize) -> Self {
        Self {
            height,
            width,
            cells: vec![
                Tile {
                    color: 0,
                    active: false
                };
                height * width
            ],
        }
    }

    /// Build a fully-active board from literal color rows.
    ///
    /// Intended for scripted boards in tests and tools.
    ///
    /// # Panics
    /// Panics if `rows` is empty or ragged.
    pub fn from_rows(rows: &[&[u8]]) -> Self {
        assert!(!rows.is_empty(), "board needs at least one row");
        let width = rows[0].len();
        assert!(width > 0, "board needs at least one column");
        assert!(
            rows.iter().all(|r| r.len() == width),
            "all rows must have the same width"
        );

        let cells = rows
            .iter()
            .flat_map(|r| r.iter().map(|&color| Tile::new(color)))
            .collect();
        Self {
            height: rows.len(),
            width,
            cells,
        }
    }

    /// Calculate flat index from a coordinate, `None` when out of bounds
    #[inline(always)]
    fn index(&self, coord: Coord) -> Option<usize> {
        if coord.row < self.height && coord.col < self.width {
            Some(coord.row * self.width + coord.col)
        } else {
            None
        }
    }

    fn out_of_bounds(&self, coord: Coord) -> BoardError {
        BoardError::OutOfBounds {
            row: coord.row,
            col: coord.col,
            height: self.height,
            width: self.width,
        }
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn width(&self) -> usize {
        self.width
    }

    /// Check whether a coordinate lies on the board.
    pub fn contains(&self, coord: Coord) -> bool {
        self.index(coord).is_some()
    }

    /// Get the tile at a coordinate.
    pub fn get(&self, coord: Coord) -> Result<Tile, BoardError> {
        self.index(coord)
            .map(|idx| self.cells[idx])
            .ok_or_else(|| self.out_of_bounds(coord))
    }

    /// Overwrite the tile at a coordinate. No validation beyond bounds.
    pub fn set(&mut self, coord: Coord, tile: Tile) -> Result<(), BoardError> {
        match self.index(coord) {
            Some(idx) => {
                self.cells[idx] = tile;
                Ok(())
            }
            None => Err(self.out_of_bounds(coord)),
        }
    }

    /// True iff the two coordinates are orthogonal neighbors (no diagonals).
    pub fn is_adjacent(&self, a: Coord, b: Coord) -> bool {
        a.manhattan(b) == 1
    }

    /// Exchange the color indices of two tiles; active flags stay put.
    pub fn swap_colors(&mut self, a: Coord, b: Coord) -> Result<(), BoardError> {
        if !self.contains(a) {
            return Err(self.out_of_bounds(a));
        }
        if !self.contains(b) {
            return Err(self.out_of_bounds(b));
        }
        self.exchange_colors(a, b);
        Ok(())
    }

    /// Infallible color exchange for callers that already validated bounds.
    pub(crate) fn exchange_colors(&mut self, a: Coord, b: Coord) {
        let ai = a.row * self.width + a.col;
        let bi = b.row * self.width + b.col;
        let tmp = self.cells[ai].color;
        self.cells[ai].color = self.cells[bi].color;
        self.cells[bi].color = tmp;
    }

    /// Direct tile read for scan loops that iterate within bounds.
    #[inline(always)]
    pub(crate) fn tile(&self, row: usize, col: usize) -> Tile {
        self.cells[row * self.width + col]
    }

    /// Mark the tile at a validated coordinate as an empty slot.
    pub(crate) fn deactivate(&mut self, coord: Coord) {
        self.cells[coord.row * self.width + coord.col].active = false;
    }

    /// One gravity pass: each inactive cell takes the color of the nearest
    /// active cell above it in the same column (higher row index), which is
    /// deactivated in turn. Returns the `(from, to)` moves performed.
    ///
    /// This is a single pass, not a fixed point; the resolution loop runs
    /// it once per respawn step, so a column with stacked gaps compacts
    /// over successive steps rather than in one call.
    pub fn apply_gravity(&mut self) -> Vec<(Coord, Coord)> {
        let mut moves = Vec::new();
        for col in 0..self.width {
            for row in 0..self.height {
                if self.cells[row * self.width + col].active {
                    continue;
                }
                for src_row in row + 1..self.height {
                    let src = src_row * self.width + col;
                    if self.cells[src].active {
                        let color = self.cells[src].color;
                        self.cells[row * self.width + col] = Tile::new(color);
                        self.cells[src].active = false;
                        moves.push((Coord::new(src_row, col), Coord::new(row, col)));
                        break;
                    }
                }
            }
        }
        moves
    }

    /// Activate every empty slot with a fresh random color, row-major.
    /// Returns the coordinates that were spawned. Afterwards no inactive
    /// cell remains.
    pub fn fill_empty(&mut self, source: &mut dyn ColorSource, palette_size: u8) -> Vec<Coord> {
        let mut spawned = Vec::new();
        for row in 0..self.height {
            for col in 0..self.width {
                let idx = row * self.width + col;
                if !self.cells[idx].active {
                    self.cells[idx] = Tile::new(source.next_color_index(palette_size));
                    spawned.push(Coord::new(row, col));
                }
            }
        }
        spawned
    }

    /// Fresh independent random draw for every cell (initial fill, reshuffle).
    pub fn randomize(&mut self, source: &mut dyn ColorSource, palette_size: u8) {
        for cell in &mut self.cells {
            *cell = Tile::new(source.next_color_index(palette_size));
        }
    }

    /// True iff no cell is an empty slot.
    pub fn all_active(&self) -> bool {
        self.cells.iter().all(|t| t.active)
    }

    /// Color grid as nested vectors, ignoring active flags (for tests/display).
    pub fn color_rows(&self) -> Vec<Vec<u8>> {
        (0..self.height)
            .map(|row| {
                let start = row * self.width;
                self.cells[start..start + self.width]
                    .iter()
                    .map(|t| t.color)
                    .collect()
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    struct Fixed(u8);

    impl ColorSource for Fixed {
        fn next_color_index(&mut self, _palette_size: u8) -> u8 {
            self.0
        }
    }

    #[test]
    fn test_index_bounds() {
        let board = Board::new(4, 3);
        assert!(board.contains(Coord::new(0, 0)));
        assert!(board.contains(Coord::new(3, 2)));
        assert!(!board.contains(Coord::new(4, 0)));
        assert!(!board.contains(Coord::new(0, 3)));
    }

    #[test]
    fn test_from_rows_layout() {
        let board = Board::from_rows(&[&[0, 1, 2], &[3, 4, 5]]);
        assert_eq!(board.height(), 2);
        assert_eq!(board.width(), 3);
        assert_eq!(board.get(Coord::new(0, 0)).unwrap(), Tile::new(0));
        assert_eq!(board.get(Coord::new(1, 2)).unwrap(), Tile::new(5));
        assert!(board.all_active());
    }

    #[test]
    fn test_gravity_single_gap() {
        let mut board = Board::from_rows(&[&[1, 2], &[3, 4], &[5, 6]]);
        board.deactivate(Coord::new(0, 0));

        let moves = board.apply_gravity();
        // (1,0) drops into (0,0), (2,0) drops into (1,0)
        assert_eq!(
            moves,
            vec![
                (Coord::new(1, 0), Coord::new(0, 0)),
                (Coord::new(2, 0), Coord::new(1, 0)),
            ]
        );
        assert_eq!(board.get(Coord::new(0, 0)).unwrap(), Tile::new(3));
        assert_eq!(board.get(Coord::new(1, 0)).unwrap(), Tile::new(5));
        assert!(!board.get(Coord::new(2, 0)).unwrap().active);
        // untouched column
        assert_eq!(board.get(Coord::new(0, 1)).unwrap(), Tile::new(2));
    }

    #[test]
    fn test_gravity_gap_at_top_moves_nothing() {
        let mut board = Board::from_rows(&[&[1], &[2], &[3]]);
        board.deactivate(Coord::new(2, 0));
        assert!(board.apply_gravity().is_empty());
        assert!(!board.get(Coord::new(2, 0)).unwrap().active);
    }

    #[test]
    fn test_fill_empty_activates_all() {
        let mut board = Board::new(3, 3);
        let mut source = Fixed(4);
        let spawned = board.fill_empty(&mut source, 7);
        assert_eq!(spawned.len(), 9);
        assert!(board.all_active());
        assert_eq!(board.get(Coord::new(2, 2)).unwrap(), Tile::new(4));
        // second call is a no-op
        assert!(board.fill_empty(&mut source, 7).is_empty());
    }

    #[test]
    fn test_swap_colors_keeps_active_flags() {
        let mut board = Board::from_rows(&[&[1, 2]]);
        board.deactivate(Coord::new(0, 1));
        board
            .swap_colors(Coord::new(0, 0), Coord::new(0, 1))
            .unwrap();
        let a = board.get(Coord::new(0, 0)).unwrap();
        let b = board.get(Coord::new(0, 1)).unwrap();
        assert_eq!((a.color, a.active), (2, true));
        assert_eq!((b.color, b.active), (1, false));
    }
}
