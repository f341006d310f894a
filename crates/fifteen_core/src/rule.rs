use serde::{Deserialize, Serialize};

use crate::Pos;

/// Rule deciding which cells may move into the blank.
///
/// The same rule governs manual moves and scramble moves.
#[derive(
    Serialize,
    Deserialize,
    Debug,
    Default,
    Copy,
    Clone,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum MoveRule {
    /// Only a tile orthogonally adjacent to the blank may move, one step.
    #[default]
    Adjacent,
    /// Any tile in the blank's row or column may move, pushing every tile
    /// between it and the blank along with it.
    Slide,
}

impl MoveRule {
    /// Returns whether the tile at `target` may move when the blank is at
    /// `blank`. Does not check bounds.
    pub fn allows(self, target: Pos, blank: Pos) -> bool {
        match self {
            MoveRule::Adjacent => target.manhattan_distance(blank) == 1,
            MoveRule::Slide => target != blank && target.is_aligned_with(blank),
        }
    }

    /// Returns every in-bounds cell that may move, in row-major order.
    pub fn movable_cells(self, blank: Pos, size: usize) -> Vec<Pos> {
        let Pos { row, col } = blank;
        match self {
            MoveRule::Adjacent => {
                let mut ret = Vec::with_capacity(4);
                if row > 0 {
                    ret.push(Pos::new(row - 1, col));
                }
                if col > 0 {
                    ret.push(Pos::new(row, col - 1));
                }
                if col + 1 < size {
                    ret.push(Pos::new(row, col + 1));
                }
                if row + 1 < size {
                    ret.push(Pos::new(row + 1, col));
                }
                ret
            }
            MoveRule::Slide => {
                let above = (0..row).map(|r| Pos::new(r, col));
                let beside = (0..size).filter(|&c| c != col).map(|c| Pos::new(row, c));
                let below = (row + 1..size).map(|r| Pos::new(r, col));
                above.chain(beside).chain(below).collect()
            }
        }
    }
}
