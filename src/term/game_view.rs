//! GameView: maps engine state into styled terminal lines.
//!
//! This module is pure (no I/O). It can be unit-tested.

use crossterm::style::{Color, Stylize};

use crate::core::ResolutionEngine;
use crate::types::Coord;

/// One background color per palette index. Indices past the end wrap, so
/// oversized palettes still render.
const PALETTE: [Color; 7] = [
    Color::Red,
    Color::DarkYellow,
    Color::Yellow,
    Color::Green,
    Color::Blue,
    Color::DarkBlue,
    Color::Magenta,
];

fn palette_color(index: u8) -> Color {
    PALETTE[index as usize % PALETTE.len()]
}

/// Markers drawn inside a cell. Cursor wins over selection, selection over
/// hint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CellMark {
    None,
    Cursor,
    Selected,
    Hint,
}

pub struct GameView;

impl GameView {
    pub fn new() -> Self {
        Self
    }

    /// Render one frame. Row 0 is where tiles settle, so it is drawn at
    /// the bottom of the board area.
    pub fn render(
        &self,
        engine: &ResolutionEngine,
        cursor: Coord,
        selected: Option<Coord>,
        hint: Option<(Coord, Coord)>,
    ) -> Vec<String> {
        let board = engine.board();
        let mut lines = Vec::with_capacity(board.height() + 6);

        lines.push(format!("  {}", "tile-match".bold()));
        lines.push(String::new());

        for row in (0..board.height()).rev() {
            let mut line = String::from("  ");
            for col in 0..board.width() {
                let at = Coord::new(row, col);
                let mark = if at == cursor {
                    CellMark::Cursor
                } else if selected == Some(at) {
                    CellMark::Selected
                } else if hint.map_or(false, |(a, b)| at == a || at == b) {
                    CellMark::Hint
                } else {
                    CellMark::None
                };
                line.push_str(&self.cell(engine, at, mark));
            }
            lines.push(line);
        }

        lines.push(String::new());
        lines.push(format!("  score: {}", engine.score()));
        lines.push(format!("  state: {}", engine.state().as_str()));
        lines.push(format!(
            "  {}",
            "arrows/hjkl move  space select  n hint  r restart  q quit".dim()
        ));
        lines
    }

    fn cell(&self, engine: &ResolutionEngine, at: Coord, mark: CellMark) -> String {
        let glyph = match mark {
            CellMark::None => "  ",
            CellMark::Cursor => "[]",
            CellMark::Selected => "()",
            CellMark::Hint => "**",
        };
        match engine.board().get(at) {
            Ok(tile) if tile.active => {
                let styled = glyph.on(palette_color(tile.color));
                if mark == CellMark::None {
                    format!("{styled}")
                } else {
                    format!("{}", styled.bold())
                }
            }
            // popped (inactive) or out of bounds
            _ => format!("{}", glyph.dark_grey()),
        }
    }

}

impl Default for GameView {
    fn default() -> Self {
        Self::new()
    }
}
