use serde::{Deserialize, Serialize};

use crate::{Pos, Tile};

/// Single tile changing position as part of a move.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct TileMove {
    /// Tile that moved.
    pub tile: Tile,
    /// Position before the move.
    pub from: Pos,
    /// Position after the move.
    pub to: Pos,
}

/// Observable state transition that collaborators may react to.
///
/// Elapsed time and move count are tracked by collaborators, so
/// [`PuzzleEvent::Solved`] carries no payload.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PuzzleEvent {
    /// A tile moved.
    TileMoved(TileMove),
    /// The puzzle reached the solved state.
    Solved,
}
