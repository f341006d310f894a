use std::cmp::Ordering;
use std::fmt;
use std::num::NonZeroU16;

use serde::{Deserialize, Serialize};

/// Logical cell coordinate in the grid. `(0, 0)` is the top-left cell.
#[derive(
    Serialize, Deserialize, Debug, Default, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord,
)]
pub struct Pos {
    /// Row, counted from the top.
    pub row: usize,
    /// Column, counted from the left.
    pub col: usize,
}
impl fmt::Display for Pos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Self { row, col } = self;
        write!(f, "({row}, {col})")
    }
}
impl From<(usize, usize)> for Pos {
    fn from((row, col): (usize, usize)) -> Self {
        Self { row, col }
    }
}
impl Pos {
    /// Constructs a position from a row and column.
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Returns the number of orthogonal steps between two positions.
    pub fn manhattan_distance(self, other: Pos) -> usize {
        self.row.abs_diff(other.row) + self.col.abs_diff(other.col)
    }

    /// Returns whether the positions share a row or a column.
    pub fn is_aligned_with(self, other: Pos) -> bool {
        self.row == other.row || self.col == other.col
    }

    /// Returns the position one step closer to `target` along each axis.
    ///
    /// For aligned positions this walks along their shared row or column.
    #[must_use]
    pub fn step_toward(self, target: Pos) -> Pos {
        fn step(from: usize, to: usize) -> usize {
            match from.cmp(&to) {
                Ordering::Less => from + 1,
                Ordering::Equal => from,
                Ordering::Greater => from - 1,
            }
        }
        Pos {
            row: step(self.row, target.row),
            col: step(self.col, target.col),
        }
    }
}

/// Numbered tile. Its number never changes; only its position does.
///
/// Tile `n` belongs at row-major index `n - 1` in the solved grid.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(transparent)]
pub struct Tile(NonZeroU16);
impl fmt::Display for Tile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
impl Tile {
    /// Constructs a tile from its number, or returns `None` for `0`.
    pub fn new(number: u16) -> Option<Self> {
        NonZeroU16::new(number).map(Self)
    }

    /// Returns the tile that belongs at `pos` in a solved grid of the given
    /// size, or `None` if the number does not fit.
    pub fn for_home(pos: Pos, size: usize) -> Option<Self> {
        let number = u16::try_from(pos.row * size + pos.col + 1).ok()?;
        Self::new(number)
    }

    /// Returns the tile's number.
    pub fn number(self) -> u16 {
        self.0.get()
    }

    /// Returns the row-major index of the cell where this tile belongs.
    pub fn home_index(self) -> usize {
        usize::from(self.0.get()) - 1
    }

    /// Returns the cell where this tile belongs in a grid of the given size,
    /// or `None` if the tile does not fit in the grid.
    ///
    /// Renderers use this to pick the tile's slice of a background image.
    pub fn home(self, size: usize) -> Option<Pos> {
        let i = self.home_index();
        let row = i.checked_div(size)?;
        (row < size).then(|| Pos::new(row, i % size))
    }
}
