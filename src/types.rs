//! Core types shared across the application
//! This module contains pure data types with no external dependencies

/// Default board dimensions
pub const DEFAULT_BOARD_HEIGHT: usize = 8;
pub const DEFAULT_BOARD_WIDTH: usize = 8;

/// Number of distinct tile colors in the default palette
pub const DEFAULT_PALETTE_SIZE: u8 = 7;

/// Game timing constants (in milliseconds)
pub const TICK_MS: u32 = 16;
/// Delay on entering a resolution pass, before the first pop check.
pub const SETTLE_DELAY_MS: u32 = 500;
/// Delay between popping matched tiles and the gravity step.
pub const POP_DELAY_MS: u32 = 500;
/// Delay after a gravity step that moved at least one tile.
pub const DROP_DELAY_MS: u32 = 500;
/// Delay after refilling empty cells, before re-checking for matches.
pub const REFILL_DELAY_MS: u32 = 500;
/// Delay before a matchless swap is undone.
pub const REVERT_DELAY_MS: u32 = 500;

/// A single grid cell: a palette color index plus an active flag.
/// `active == false` means "empty slot, pending refill"; the cell itself
/// never disappears from the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Tile {
    pub color: u8,
    pub active: bool,
}

impl Tile {
    /// A fresh, visible tile of the given color.
    pub const fn new(color: u8) -> Self {
        Self {
            color,
            active: true,
        }
    }
}

/// Grid position, 0-indexed. Gravity pulls tiles toward row 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Coord {
    pub row: usize,
    pub col: usize,
}

impl Coord {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Manhattan distance to another coordinate.
    pub fn manhattan(self, other: Coord) -> usize {
        self.row.abs_diff(other.row) + self.col.abs_diff(other.col)
    }
}

/// Engine lifecycle state exposed to collaborators.
///
/// `Resolving` covers both an in-flight swap and any cascade it triggers;
/// input is only accepted while `Playing`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineState {
    Playing,
    Resolving,
}

impl EngineState {
    pub fn as_str(&self) -> &'static str {
        match self {
            EngineState::Playing => "playing",
            EngineState::Resolving => "resolving",
        }
    }
}

/// Notifications surfaced to rendering / UI collaborators.
///
/// The engine never waits on a consumer; events accumulate in an internal
/// queue until drained. Per-tile effects (`TilePopped`, `TileMoved`,
/// `TileSpawned`) are fire-and-forget animation hooks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    ScoreChanged { score: u32 },
    StateChanged { state: EngineState },
    TilesSwapped { a: Coord, b: Coord },
    TilePopped { at: Coord },
    TileMoved { from: Coord, to: Coord },
    TileSpawned { at: Coord },
    BoardReshuffled,
}

/// Player actions for the terminal front-end
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameAction {
    CursorUp,
    CursorDown,
    CursorLeft,
    CursorRight,
    Select,
    Hint,
    Restart,
}

impl GameAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            GameAction::CursorUp => "cursorUp",
            GameAction::CursorDown => "cursorDown",
            GameAction::CursorLeft => "cursorLeft",
            GameAction::CursorRight => "cursorRight",
            GameAction::Select => "select",
            GameAction::Hint => "hint",
            GameAction::Restart => "restart",
        }
    }
}
