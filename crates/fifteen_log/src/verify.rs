//! Functions for verifying solve logs.

use fifteen_core::{Pos, PuzzleConfig, PuzzleEngine, ScrambleParams, Timestamp};
use itertools::Itertools;
use serde::{Deserialize, Serialize};

use super::*;

/// Verifies a solve by regenerating its scramble and replaying its moves.
///
/// Returns `None` if the solve is not complete or does not end in the solved
/// state.
pub fn verify(solve: &Solve) -> Option<SolveVerification> {
    if !solve.solved {
        return None;
    }
    let scramble = solve.scramble.clone()?;
    let scramble_params = scramble.params()?;

    let scramble_moves: Vec<Pos> = notation::parse_moves(&scramble.moves).try_collect().ok()?;
    let expected = match PuzzleEngine::new_scrambled(&solve.puzzle, scramble_params.clone()) {
        Ok(scrambled) => scrambled,
        Err(e) => {
            log::error!("error building puzzle for verification: {e}");
            return None;
        }
    };
    let is_scramble_correct = expected.moves == scramble_moves;

    let mut log = solve.log.iter();

    let Some(LogEvent::Scramble) = log.next() else {
        return None; // didn't start by scrambling!
    };

    let mut solution: Vec<Pos> = vec![];
    let mut time_completed = None;
    let mut speedsolve_start = None;
    let mut speedsolve_end = None;
    let mut single_session = true;
    for event in log {
        match event {
            LogEvent::Scramble => return None, // don't scramble again!
            LogEvent::Moves { moves } => {
                for pos in notation::parse_moves(moves) {
                    solution.push(pos.ok()?);
                }
            }
            LogEvent::StartSolve { time: _, duration } => {
                speedsolve_start = *duration;
            }
            LogEvent::EndSolve { time, duration } => {
                time_completed = *time;
                speedsolve_end = *duration;
                break; // apparently we're done!
            }
            LogEvent::StartSession { .. } | LogEvent::EndSession { .. } => {
                single_session = false;
            }
        }
    }
    let time_completed = time_completed?; // must say when it was completed

    let mut engine = replay(&solve.puzzle, &scramble_moves)?;
    let mut move_count = 0;
    for pos in solution {
        if engine.do_move(pos).is_ok() {
            move_count += 1;
        }
    }
    if !engine.is_solved() {
        return None;
    }

    let speedsolve_duration = Option::zip(speedsolve_start, speedsolve_end)
        .and_then(|(start, end)| end.checked_sub(start));

    Some(SolveVerification {
        puzzle: solve.puzzle.clone(),
        scramble: scramble_params,
        is_scramble_correct,
        move_count,
        single_session,
        speedsolve_duration,
        time_completed,
    })
}

/// Applies a sequence of moves to a solved puzzle, skipping illegal moves.
pub fn replay(config: &PuzzleConfig, moves: &[Pos]) -> Option<PuzzleEngine> {
    let mut engine = PuzzleEngine::from_config(config).ok()?;
    for &pos in moves {
        if let Err(e) = engine.do_move(pos) {
            log::warn!("skipping move {} during replay: {e}", notation::format_move(pos));
        }
    }
    Some(engine)
}

/// Info about a scramble & solve of a puzzle.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct SolveVerification {
    /// Puzzle that was solved.
    pub puzzle: PuzzleConfig,
    /// Parameters used to determine the scramble.
    pub scramble: ScrambleParams,
    /// Whether the scramble matches the one specified by the parameters.
    pub is_scramble_correct: bool,
    /// Number of legal moves in the solution.
    pub move_count: u64,
    /// Whether the solve was completed within a single session.
    pub single_session: bool,
    /// Milliseconds from the first move to the solved state.
    pub speedsolve_duration: Option<i64>,
    /// Timestamp when the puzzle was solved.
    pub time_completed: Timestamp,
}
