use thiserror::Error;

use crate::Pos;

/// Error produced by the puzzle engine.
///
/// Every variant is recoverable by retrying with corrected input.
#[derive(Error, Debug, Clone, PartialEq, Eq, Hash)]
pub enum PuzzleError {
    /// Grid size, arrangement, or configuration document is invalid.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),
    /// Target cell is not movable or is the blank.
    #[error("illegal move at {0}")]
    IllegalMove(Pos),
    /// Coordinates are outside the grid.
    #[error("{pos} is out of bounds for a {size}x{size} grid")]
    OutOfBounds {
        /// Requested position.
        pos: Pos,
        /// Grid size.
        size: usize,
    },
}

impl PuzzleError {
    pub(crate) fn config(msg: impl ToString) -> Self {
        Self::InvalidConfiguration(msg.to_string())
    }
}
