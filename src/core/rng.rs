//! Color randomness for fills and reshuffles.
//!
//! The engine draws colors through the [`ColorSource`] trait so that tests
//! can inject scripted sequences; the real game uses a seeded `SmallRng`.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

/// Supplies palette color indices for initial fill, refill and reshuffle.
pub trait ColorSource {
    /// Next color index in `[0, palette_size)`.
    ///
    /// `palette_size` must be at least 1; boards need a palette of 3 or
    /// more colors for well-formed matches, but that is the caller's call.
    fn next_color_index(&mut self, palette_size: u8) -> u8;
}

/// Seeded color generator used by the real game.
///
/// Same seed, same board; reproducible setups for debugging and replay.
#[derive(Debug, Clone)]
pub struct PaletteRng {
    rng: SmallRng,
}

impl PaletteRng {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    pub fn from_entropy() -> Self {
        Self {
            rng: SmallRng::from_entropy(),
        }
    }
}

impl ColorSource for PaletteRng {
    fn next_color_index(&mut self, palette_size: u8) -> u8 {
        self.rng.gen_range(0..palette_size)
    }
}
