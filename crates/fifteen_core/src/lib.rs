//! Sliding tile puzzle engine: grid state, legal moves, solved-state detection,
//! and reproducible scrambles.

mod config;
mod engine;
mod error;
mod event;
mod parity;
mod pos;
mod rule;
mod scramble;
mod timestamp;

/// Re-export of `chrono`.
pub use chrono;
pub use prelude::*;

pub use crate::timestamp::Timestamp;

/// Prelude of common imports.
pub mod prelude {
    pub use crate::config::{DEFAULT_CONFIG_STR, PuzzleConfig};
    pub use crate::engine::{GridSnapshot, MoveResult, PuzzleEngine};
    pub use crate::error::PuzzleError;
    pub use crate::event::{PuzzleEvent, TileMove};
    pub use crate::parity::Parity;
    pub use crate::pos::{Pos, Tile};
    pub use crate::rule::MoveRule;
    pub use crate::scramble::{ScrambleParams, ScrambleType, ScrambledPuzzle};
}

/// Version string such as `fifteen_core v1.2.3`.
pub const PUZZLE_ENGINE_VERSION_STRING: &str =
    concat!(env!("CARGO_PKG_NAME"), " v", env!("CARGO_PKG_VERSION"));

/// Grid size used when none is specified.
pub const DEFAULT_SIZE: usize = 4;

/// Smallest supported grid size.
pub const MIN_SIZE: usize = 2;

/// Largest supported grid size.
///
/// Tile numbers are stored as `u16`, so `MAX_SIZE * MAX_SIZE - 1` must fit.
pub const MAX_SIZE: usize = 255;

/// Default number of random moves in a full scramble.
///
/// **Changing this will break scramble compatibility with older log files.**
pub const FULL_SCRAMBLE_LENGTH: u32 = 300;

#[cfg(test)]
mod tests;
