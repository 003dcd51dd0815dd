//! Terminal rendering layer.
//!
//! `game_view` maps engine state into styled text lines with no I/O, so it
//! stays unit-testable; `renderer` owns the terminal (raw mode, alternate
//! screen) and flushes those lines with crossterm.

pub mod game_view;
pub mod renderer;

pub use game_view::GameView;
pub use renderer::TerminalRenderer;
