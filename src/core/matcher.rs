//! Match detection - pure scans over the board
//!
//! A match is a run of three or more same-colored active tiles in one row
//! or column. Detection slides a 3-wide window over every row and column;
//! overlapping qualifying windows union into one set, so a run of length 4
//! contributes 4 coordinates, each once.

use crate::core::board::Board;
use crate::types::Coord;

/// Deduplicated coordinates found in one detection pass, row-major order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MatchSet {
    coords: Vec<Coord>,
}

impl MatchSet {
    pub fn len(&self) -> usize {
        self.coords.len()
    }

    pub fn is_empty(&self) -> bool {
        self.coords.is_empty()
    }

    pub fn contains(&self, coord: Coord) -> bool {
        self.coords.contains(&coord)
    }

    pub fn coords(&self) -> &[Coord] {
        &self.coords
    }
}

/// Find every matched coordinate on the board.
///
/// Pure: no mutation, and no ordering dependency between the horizontal
/// and vertical passes. Inactive tiles never participate.
pub fn find_matches(board: &Board) -> MatchSet {
    let (height, width) = (board.height(), board.width());
    let mut mask = vec![false; height * width];

    // horizontal triple windows
    for row in 0..height {
        for col in 0..width.saturating_sub(2) {
            let a = board.tile(row, col);
            let b = board.tile(row, col + 1);
            let c = board.tile(row, col + 2);
            if a.active && b.active && c.active && a.color == b.color && b.color == c.color {
                mask[row * width + col] = true;
                mask[row * width + col + 1] = true;
                mask[row * width + col + 2] = true;
            }
        }
    }

    // vertical triple windows
    for col in 0..width {
        for row in 0..height.saturating_sub(2) {
            let a = board.tile(row, col);
            let b = board.tile(row + 1, col);
            let c = board.tile(row + 2, col);
            if a.active && b.active && c.active && a.color == b.color && b.color == c.color {
                mask[row * width + col] = true;
                mask[(row + 1) * width + col] = true;
                mask[(row + 2) * width + col] = true;
            }
        }
    }

    let coords = mask
        .iter()
        .enumerate()
        .filter(|(_, &hit)| hit)
        .map(|(idx, _)| Coord::new(idx / width, idx % width))
        .collect();
    MatchSet { coords }
}

/// Tentatively swap two validated coordinates and report whether the swap
/// produces a match. The board is always restored before returning.
fn probe_swap(board: &mut Board, a: Coord, b: Coord) -> bool {
    board.exchange_colors(a, b);
    let hit = !find_matches(board).is_empty();
    board.exchange_colors(a, b);
    hit
}

/// First adjacent pair whose swap would produce a match.
///
/// Scan order: horizontally-adjacent pairs row-major, then
/// vertically-adjacent pairs column-major, matching the pair an auto-move
/// agent would replay. The board is bit-identical afterwards.
pub fn first_possible_swap(board: &mut Board) -> Option<(Coord, Coord)> {
    let (height, width) = (board.height(), board.width());

    for row in 0..height {
        for col in 0..width.saturating_sub(1) {
            let a = Coord::new(row, col);
            let b = Coord::new(row, col + 1);
            if probe_swap(board, a, b) {
                return Some((a, b));
            }
        }
    }

    for col in 0..width {
        for row in 0..height.saturating_sub(1) {
            let a = Coord::new(row, col);
            let b = Coord::new(row + 1, col);
            if probe_swap(board, a, b) {
                return Some((a, b));
            }
        }
    }

    None
}

/// False signals board deadlock: no legal swap anywhere can produce a match.
pub fn has_any_possible_swap(board: &mut Board) -> bool {
    first_possible_swap(board).is_some()
}
