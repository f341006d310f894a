use fifteen_core::{Pos, PuzzleConfig, PuzzleEngine, ScrambleParams, ScrambleType, Timestamp};
use pretty_assertions::assert_eq;

use crate::notation::{MoveParseError, format_move, format_moves, parse_move, parse_moves};
use crate::*;

fn test_params() -> ScrambleParams {
    let time = Timestamp::from_millis(1_700_000_000_000).expect("valid timestamp");
    ScrambleParams::from_random_u64(ScrambleType::Partial(20), time, 12345)
}

/// Builds a solve log that scrambles the puzzle and then undoes the scramble.
fn solved_log(config: &PuzzleConfig) -> Solve {
    let params = test_params();
    let scrambled = PuzzleEngine::new_scrambled(config, params.clone()).unwrap();
    let time = Some(params.time);
    Solve {
        puzzle: config.clone(),
        solved: true,
        duration: Some(5000),
        scramble: Some(Scramble::new(params, format_moves(scrambled.moves.clone()))),
        log: vec![
            LogEvent::Scramble,
            LogEvent::StartSolve {
                time,
                duration: Some(1000),
            },
            LogEvent::Moves {
                moves: format_moves(scrambled.inverse_moves()),
            },
            LogEvent::EndSolve {
                time,
                duration: Some(4000),
            },
        ],
    }
}

#[test]
fn test_move_notation() {
    assert_eq!(format_move(Pos::new(0, 0)), "a1");
    assert_eq!(format_move(Pos::new(3, 2)), "c4");
    assert_eq!(format_move(Pos::new(9, 25)), "z10");
    assert_eq!(format_move(Pos::new(0, 26)), "aa1");
    assert_eq!(format_move(Pos::new(0, 27)), "ab1");

    assert_eq!(parse_move("a1"), Ok(Pos::new(0, 0)));
    assert_eq!(parse_move("z10"), Ok(Pos::new(9, 25)));
    assert_eq!(parse_move("ab1"), Ok(Pos::new(0, 27)));
    assert_eq!(parse_move("a0"), Err(MoveParseError::BadMove("a0")));
    assert_eq!(parse_move("A1"), Err(MoveParseError::BadMove("A1")));
    assert_eq!(parse_move("1a"), Err(MoveParseError::BadMove("1a")));

    let moves = vec![Pos::new(2, 3), Pos::new(2, 2), Pos::new(3, 2)];
    let s = format_moves(moves.clone());
    assert_eq!(s, "d3 c3 c4");
    assert_eq!(parse_moves(&s).collect::<Result<Vec<_>, _>>(), Ok(moves));
    assert_eq!(parse_moves("   ").count(), 0);
}

#[test]
fn test_log_file_serialization() {
    let file = LogFile {
        program: Some(Program::this_program()),
        solves: vec![solved_log(&PuzzleConfig::default())],
    };
    let s = file.serialize().unwrap();
    assert!(s.contains(&format!("\"version\": {LOG_FILE_VERSION}")));
    let (deserialized, warnings) = LogFile::deserialize(&s).unwrap();
    assert_eq!(deserialized, file);
    assert!(warnings.is_empty());
}

#[test]
fn test_log_file_from_newer_version() {
    let s = r#"{"version": 999, "solves": []}"#;
    let (file, warnings) = LogFile::deserialize(s).unwrap();
    assert_eq!(file, LogFile::default());
    assert_eq!(warnings.len(), 1);

    assert!(LogFile::deserialize(r#"{"solves": []}"#).is_err()); // missing version
}

#[test]
fn test_verify_solve() {
    let config = PuzzleConfig::with_size(3);
    let solve = solved_log(&config);
    let verification = verify::verify(&solve).expect("solve should verify");
    assert!(verification.is_scramble_correct);
    assert_eq!(verification.move_count, 20);
    assert_eq!(verification.speedsolve_duration, Some(3000));
    assert!(verification.single_session);
    assert_eq!(verification.puzzle, config);
}

#[test]
fn test_verify_rejects_unsolved() {
    let config = PuzzleConfig::default();

    let mut solve = solved_log(&config);
    solve.log.remove(2); // drop the solution
    assert_eq!(verify::verify(&solve), None);

    let mut solve = solved_log(&config);
    solve.solved = false;
    assert_eq!(verify::verify(&solve), None);

    let mut solve = solved_log(&config);
    solve.log.remove(0); // no scramble event
    assert_eq!(verify::verify(&solve), None);
}

#[test]
fn test_verify_detects_tampered_scramble() {
    let config = PuzzleConfig::default();
    let mut solve = solved_log(&config);
    let scramble = solve.scramble.as_mut().unwrap();
    // An empty scramble is trivially solved by an empty solution.
    scramble.moves = String::new();
    solve.log[2] = LogEvent::Moves {
        moves: String::new(),
    };
    let verification = verify::verify(&solve).expect("solve should still end solved");
    assert!(!verification.is_scramble_correct);
}

#[test]
fn test_solve_digest_is_stable() {
    let solve = solved_log(&PuzzleConfig::default());
    assert_eq!(solve.digest_v1().unwrap(), solve.clone().digest_v1().unwrap());
    assert_eq!(solve.digest_v1().unwrap().len(), 32);
}
