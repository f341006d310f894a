use std::fmt;

use rand::Rng;
use rand::seq::IndexedRandom;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::{
    MAX_SIZE, MIN_SIZE, MoveRule, Parity, Pos, PuzzleConfig, PuzzleError, PuzzleEvent, Tile,
    TileMove,
};

/// Sliding puzzle state: an `N`x`N` grid of tiles with exactly one blank cell.
///
/// Every mutation keeps the cached blank position in sync with the grid.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PuzzleEngine {
    size: usize,
    rule: MoveRule,
    /// Row-major cells. Exactly one is `None`.
    cells: Vec<Option<Tile>>,
    blank: Pos,
}

impl fmt::Display for PuzzleEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let width = (self.size * self.size - 1).to_string().len();
        for row in self.rows() {
            let mut first = true;
            for cell in row {
                if !first {
                    write!(f, " ")?;
                }
                first = false;
                match cell {
                    Some(tile) => write!(f, "{:>width$}", tile.number())?,
                    None => write!(f, "{:>width$}", ".")?,
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

impl PuzzleEngine {
    /// Constructs a solved puzzle of the given size.
    pub fn new(size: usize, rule: MoveRule) -> Result<Self, PuzzleError> {
        validate_size(size)?;
        let tile_count = size * size - 1;
        let mut cells = Vec::with_capacity(tile_count + 1);
        for i in 0..tile_count {
            let tile = Tile::for_home(Pos::new(i / size, i % size), size)
                .ok_or_else(|| PuzzleError::config(format!("grid size {size} is too large")))?;
            cells.push(Some(tile));
        }
        cells.push(None);
        Ok(Self {
            size,
            rule,
            cells,
            blank: Pos::new(size - 1, size - 1),
        })
    }

    /// Constructs a solved puzzle from a validated configuration.
    pub fn from_config(config: &PuzzleConfig) -> Result<Self, PuzzleError> {
        config.validate()?;
        Self::new(config.size, config.move_rule)
    }

    /// Constructs a puzzle from an arbitrary arrangement given as rows of tile
    /// numbers, with `None` for the blank.
    ///
    /// The arrangement must be square, contain exactly one blank, and contain
    /// each tile from `1` to `N*N - 1` exactly once. The arrangement does not
    /// need to be solvable; see [`PuzzleEngine::is_solvable()`].
    pub fn from_rows<R: AsRef<[Option<u16>]>>(
        rows: &[R],
        rule: MoveRule,
    ) -> Result<Self, PuzzleError> {
        let size = rows.len();
        validate_size(size)?;

        let mut cells = Vec::with_capacity(size * size);
        let mut seen = vec![false; size * size];
        let mut blank = None;
        for (row, cells_in_row) in rows.iter().enumerate() {
            let cells_in_row = cells_in_row.as_ref();
            if cells_in_row.len() != size {
                return Err(PuzzleError::config(format!(
                    "row {row} has {} cells; expected {size}",
                    cells_in_row.len(),
                )));
            }
            for (col, &cell) in cells_in_row.iter().enumerate() {
                let pos = Pos::new(row, col);
                let Some(number) = cell else {
                    if let Some(other) = blank.replace(pos) {
                        return Err(PuzzleError::config(format!(
                            "found blanks at both {other} and {pos}",
                        )));
                    }
                    cells.push(None);
                    continue;
                };
                let tile = Tile::new(number)
                    .filter(|t| t.home_index() < size * size - 1)
                    .ok_or_else(|| {
                        PuzzleError::config(format!("tile {number} at {pos} is out of range"))
                    })?;
                if std::mem::replace(&mut seen[tile.home_index()], true) {
                    return Err(PuzzleError::config(format!("tile {number} appears twice")));
                }
                cells.push(Some(tile));
            }
        }
        let blank = blank.ok_or_else(|| PuzzleError::config("grid has no blank cell"))?;

        Ok(Self {
            size,
            rule,
            cells,
            blank,
        })
    }

    /// Replaces the puzzle with a solved grid of the given size, keeping the
    /// move rule.
    ///
    /// On error, the puzzle is left unchanged.
    pub fn initialize(&mut self, size: usize) -> Result<(), PuzzleError> {
        *self = Self::new(size, self.rule)?;
        Ok(())
    }

    /// Returns the grid size `N`.
    pub fn size(&self) -> usize {
        self.size
    }
    /// Returns the move rule.
    pub fn move_rule(&self) -> MoveRule {
        self.rule
    }
    /// Returns the position of the blank cell.
    pub fn blank(&self) -> Pos {
        self.blank
    }

    /// Returns whether `pos` is inside the grid.
    pub fn contains(&self, pos: Pos) -> bool {
        pos.row < self.size && pos.col < self.size
    }

    fn index(&self, pos: Pos) -> usize {
        pos.row * self.size + pos.col
    }

    fn check_bounds(&self, pos: Pos) -> Result<(), PuzzleError> {
        if self.contains(pos) {
            Ok(())
        } else {
            Err(PuzzleError::OutOfBounds {
                pos,
                size: self.size,
            })
        }
    }

    /// Returns the tile at `pos`, or `None` for the blank.
    pub fn tile_at(&self, pos: Pos) -> Result<Option<Tile>, PuzzleError> {
        self.check_bounds(pos)?;
        Ok(self.cells[self.index(pos)])
    }

    /// Returns the current position of a tile, or `None` if the tile does not
    /// exist in this grid.
    pub fn position_of(&self, tile: Tile) -> Option<Pos> {
        let i = self.cells.iter().position(|&cell| cell == Some(tile))?;
        Some(Pos::new(i / self.size, i % self.size))
    }

    /// Returns an iterator over rows of cells, from top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[Option<Tile>]> {
        self.cells.chunks(self.size)
    }

    /// Returns whether the tile at `pos` may move under the configured rule.
    ///
    /// Out-of-bounds positions and the blank itself are never movable.
    pub fn is_movable(&self, pos: Pos) -> bool {
        self.contains(pos) && self.rule.allows(pos, self.blank)
    }

    /// Returns every movable cell, in row-major order.
    pub fn movable_cells(&self) -> Vec<Pos> {
        self.rule.movable_cells(self.blank, self.size)
    }

    /// Moves the tile at `pos` toward the blank.
    ///
    /// With [`MoveRule::Slide`], every tile between `pos` and the blank moves
    /// too. Afterwards `pos` is the blank, so moving the old blank position
    /// undoes the move. On error, the puzzle is left unchanged.
    pub fn do_move(&mut self, pos: Pos) -> Result<MoveResult, PuzzleError> {
        self.check_bounds(pos)?;
        if !self.is_movable(pos) {
            return Err(PuzzleError::IllegalMove(pos));
        }

        let previous_blank = self.blank;
        let mut moved = SmallVec::new();
        let mut gap = previous_blank;
        while gap != pos {
            let next = gap.step_toward(pos);
            let (gap_index, next_index) = (self.index(gap), self.index(next));
            self.cells.swap(gap_index, next_index);
            if let Some(tile) = self.cells[gap_index] {
                moved.push(TileMove {
                    tile,
                    from: next,
                    to: gap,
                });
            }
            gap = next;
        }
        self.blank = pos;

        Ok(MoveResult {
            moved,
            previous_blank,
            blank: pos,
        })
    }

    /// Returns whether every tile is in its home cell.
    ///
    /// The blank may be anywhere.
    pub fn is_solved(&self) -> bool {
        self.cells
            .iter()
            .enumerate()
            .all(|(i, cell)| cell.is_none_or(|tile| tile.home_index() == i))
    }

    /// Returns the parity of the tile permutation, read in row-major order
    /// skipping the blank.
    pub fn parity(&self) -> Parity {
        let perm: Vec<usize> = self.cells.iter().flatten().map(|t| t.home_index()).collect();
        // Constructors guarantee each tile appears exactly once.
        Parity::of_permutation(&perm).unwrap_or_else(|| {
            log::error!("grid does not hold a permutation of its tiles");
            Parity::Odd
        })
    }

    /// Returns whether some sequence of legal moves reaches the solved state.
    ///
    /// Every arrangement produced by moves from a solved grid is solvable. Only
    /// arrangements from [`PuzzleEngine::from_rows()`] may be unsolvable.
    pub fn is_solvable(&self) -> bool {
        let parity = if self.size % 2 == 1 {
            self.parity()
        } else {
            // A vertical move jumps an odd number of tiles and changes the
            // blank's row, so the sum is invariant.
            self.parity() + Parity::of(self.size - 1 - self.blank.row)
        };
        parity == Parity::Even
    }

    /// Applies `move_count` moves, each chosen uniformly from the movable
    /// cells using `rng`. Returns the target of each move applied.
    ///
    /// Only legal moves are applied, so the result is solvable. Returns
    /// [`PuzzleError::InvalidConfiguration`] and leaves the grid unchanged if
    /// it is not solvable to begin with.
    pub fn shuffle<R: Rng + ?Sized>(
        &mut self,
        move_count: u32,
        rng: &mut R,
    ) -> Result<Vec<Pos>, PuzzleError> {
        if !self.is_solvable() {
            return Err(PuzzleError::config("cannot shuffle an unsolvable grid"));
        }
        let mut applied = Vec::with_capacity(move_count as usize);
        for _ in 0..move_count {
            let candidates = self.movable_cells();
            let Some(&target) = candidates.choose(rng) else {
                break;
            };
            match self.do_move(target) {
                Ok(_) => applied.push(target),
                Err(e) => {
                    log::error!("error applying shuffle move: {e}");
                    break;
                }
            }
        }
        Ok(applied)
    }

    /// Returns a copy of the state for rendering.
    pub fn snapshot(&self) -> GridSnapshot {
        GridSnapshot {
            size: self.size,
            move_rule: self.rule,
            cells: self.cells.clone(),
            blank: self.blank,
            movable: self.movable_cells(),
            solved: self.is_solved(),
        }
    }
}

fn validate_size(size: usize) -> Result<(), PuzzleError> {
    if size < MIN_SIZE {
        Err(PuzzleError::config(format!(
            "grid size must be at least {MIN_SIZE}; got {size}",
        )))
    } else if size > MAX_SIZE {
        Err(PuzzleError::config(format!(
            "grid size must be at most {MAX_SIZE}; got {size}",
        )))
    } else {
        Ok(())
    }
}

/// Outcome of a successful move.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct MoveResult {
    /// Tiles whose position changed, starting with the one nearest the old
    /// blank.
    pub moved: SmallVec<[TileMove; 3]>,
    /// Blank position before the move. Moving this cell undoes the move.
    pub previous_blank: Pos,
    /// Blank position after the move.
    pub blank: Pos,
}
impl MoveResult {
    /// Returns the events raised by the move. `solved` is whether the puzzle
    /// is solved after the move.
    pub fn events(&self, solved: bool) -> impl Iterator<Item = PuzzleEvent> + '_ {
        let solved_event = solved.then_some(PuzzleEvent::Solved);
        self.moved
            .iter()
            .map(|&m| PuzzleEvent::TileMoved(m))
            .chain(solved_event)
    }
}

/// Read-only view of the grid for rendering.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct GridSnapshot {
    /// Grid size `N`.
    pub size: usize,
    /// Move rule in effect.
    pub move_rule: MoveRule,
    /// Row-major cells; `None` is the blank.
    pub cells: Vec<Option<Tile>>,
    /// Position of the blank.
    pub blank: Pos,
    /// Cells that may currently move, for highlighting.
    pub movable: Vec<Pos>,
    /// Whether the puzzle is solved.
    pub solved: bool,
}
