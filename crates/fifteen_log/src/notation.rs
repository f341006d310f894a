//! Functions for parsing and formatting move notation.
//!
//! A move is written as the cell that was clicked: a column name followed by a
//! 1-based row number, so `a1` is the top-left cell and `d4` is the
//! bottom-right cell of a 4x4 grid. Columns past `z` continue with `aa`, `ab`,
//! etc.

use fifteen_core::Pos;
use itertools::Itertools;
use regex::Regex;

/// Formats a sequence of moves as a string.
pub fn format_moves(moves: impl IntoIterator<Item = Pos>) -> String {
    moves.into_iter().map(format_move).join(" ")
}

/// Formats a single move.
pub fn format_move(pos: Pos) -> String {
    column_name(pos.col) + &(pos.row + 1).to_string()
}

/// Parses a whitespace-separated sequence of moves.
pub fn parse_moves(s: &str) -> impl '_ + Iterator<Item = Result<Pos, MoveParseError<'_>>> {
    s.split_whitespace().map(parse_move)
}

/// Parses a single move.
pub fn parse_move(s: &str) -> Result<Pos, MoveParseError<'_>> {
    const MOVE_PATTERN: &str = r"^([a-z]+)([1-9][0-9]*)$";

    lazy_static! {
        static ref MOVE_REGEX: Regex = Regex::new(MOVE_PATTERN).expect("bad regex");
    }

    let captures = MOVE_REGEX
        .captures(s)
        .ok_or(MoveParseError::BadMove(s))?;
    // need `.get()` for lifetime reasons
    let col_str = captures.get(1).ok_or(MoveParseError::BadMove(s))?.as_str();
    let row_str = captures.get(2).ok_or(MoveParseError::BadMove(s))?.as_str();

    let col = parse_column_name(col_str).ok_or(MoveParseError::BadColumn(col_str))?;
    let row = row_str
        .parse::<usize>()
        .map_err(|_| MoveParseError::BadRow(row_str))?
        - 1;
    Ok(Pos::new(row, col))
}

/// Returns the name of a 0-based column: `a`, `b`, ..., `z`, `aa`, `ab`, etc.
fn column_name(col: usize) -> String {
    let mut n = col + 1;
    let mut letters = vec![];
    while n > 0 {
        n -= 1;
        letters.push(b'a' + (n % 26) as u8);
        n /= 26;
    }
    letters.iter().rev().map(|&b| b as char).collect()
}

fn parse_column_name(s: &str) -> Option<usize> {
    let mut n: usize = 0;
    for b in s.bytes() {
        n = n.checked_mul(26)?.checked_add(usize::from(b - b'a') + 1)?;
    }
    n.checked_sub(1)
}

/// Error encountered while parsing a move.
#[allow(missing_docs)]
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum MoveParseError<'a> {
    #[error("bad move: {0:?}")]
    BadMove(&'a str),
    #[error("bad column: {0:?}")]
    BadColumn(&'a str),
    #[error("bad row: {0:?}")]
    BadRow(&'a str),
}
