//! Core game logic: board storage, match detection and the resolution
//! engine. Pure state machines with no terminal or IO dependencies.

pub mod board;
pub mod engine;
pub mod matcher;
pub mod rng;

pub use board::Board;
pub use engine::{EngineConfig, ResolutionEngine};
pub use matcher::{find_matches, first_possible_swap, has_any_possible_swap, MatchSet};
pub use rng::{ColorSource, PaletteRng};
