//! Terminal match-3.
//!
//! `core` holds the deterministic game logic (board, matcher, resolution
//! engine); `term` renders it to a terminal; `input` maps key events to
//! game actions. The binary in `main.rs` wires the three together.

pub mod core;
pub mod error;
pub mod input;
pub mod term;
pub mod types;
