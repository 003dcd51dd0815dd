//! Error taxonomy.
//!
//! The engine has no I/O and no external failure modes. The only hard error
//! is an out-of-bounds coordinate, which is a programming error and fails
//! loud. Invalid swap requests (misclicks) are expected input and are
//! rejected as silent no-ops by the engine instead of surfacing here.

/// Errors raised by [`crate::core::Board`] accessors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum BoardError {
    #[error("coordinate ({row}, {col}) outside {height}x{width} board")]
    OutOfBounds {
        row: usize,
        col: usize,
        height: usize,
        width: usize,
    },
}
