use pretty_assertions::assert_eq;
use proptest::prelude::*;
use rand::SeedableRng;

use crate::*;

const SOLVED_4X4: [[Option<u16>; 4]; 4] = [
    [Some(1), Some(2), Some(3), Some(4)],
    [Some(5), Some(6), Some(7), Some(8)],
    [Some(9), Some(10), Some(11), Some(12)],
    [Some(13), Some(14), Some(15), None],
];

fn seeded_rng(seed: u64) -> rand_chacha::ChaCha12Rng {
    rand_chacha::ChaCha12Rng::seed_from_u64(seed)
}

fn empty_cell_count(engine: &PuzzleEngine) -> usize {
    engine.rows().flatten().filter(|cell| cell.is_none()).count()
}

#[test]
fn test_initialize_layout() {
    let engine = PuzzleEngine::new(3, MoveRule::Adjacent).unwrap();
    assert_eq!(engine.to_string(), "1 2 3\n4 5 6\n7 8 .\n");
    assert_eq!(engine.blank(), Pos::new(2, 2));
    assert_eq!(engine.tile_at(Pos::new(1, 0)).unwrap(), Tile::new(4));
    assert_eq!(engine.tile_at(Pos::new(2, 2)).unwrap(), None);
}

#[test]
fn test_initialize_rejects_bad_sizes() {
    for size in [0, 1, MAX_SIZE + 1] {
        assert!(matches!(
            PuzzleEngine::new(size, MoveRule::Adjacent),
            Err(PuzzleError::InvalidConfiguration(_)),
        ));
    }

    let mut engine = PuzzleEngine::new(4, MoveRule::Slide).unwrap();
    engine.do_move(Pos::new(3, 0)).unwrap();
    let before = engine.clone();
    assert!(engine.initialize(1).is_err());
    assert_eq!(engine, before);

    engine.initialize(5).unwrap();
    assert_eq!(engine.size(), 5);
    assert_eq!(engine.move_rule(), MoveRule::Slide);
    assert!(engine.is_solved());
}

#[test]
fn test_literal_solved_arrangement() {
    let engine = PuzzleEngine::from_rows(&SOLVED_4X4, MoveRule::Adjacent).unwrap();
    assert!(engine.is_solved());
    assert_eq!(engine, PuzzleEngine::new(4, MoveRule::Adjacent).unwrap());

    let mut flipped = SOLVED_4X4;
    flipped[3].swap(1, 2);
    let engine = PuzzleEngine::from_rows(&flipped, MoveRule::Adjacent).unwrap();
    assert!(!engine.is_solved());
    assert!(!engine.is_solvable());
}

#[test]
fn test_shuffle_rejects_unsolvable_grid() {
    let mut flipped = SOLVED_4X4;
    flipped[3].swap(1, 2);
    let mut engine = PuzzleEngine::from_rows(&flipped, MoveRule::Adjacent).unwrap();
    let before = engine.clone();
    assert!(matches!(
        engine.shuffle(300, &mut seeded_rng(1)),
        Err(PuzzleError::InvalidConfiguration(_)),
    ));
    assert_eq!(engine, before);

    // Solvable arrangements that are not solved may still be shuffled.
    let rows: [[Option<u16>; 2]; 2] = [[Some(1), None], [Some(3), Some(2)]];
    let mut engine = PuzzleEngine::from_rows(&rows, MoveRule::Adjacent).unwrap();
    assert!(engine.is_solvable());
    assert_eq!(engine.shuffle(10, &mut seeded_rng(1)).unwrap().len(), 10);
    assert!(engine.is_solvable());
}

#[test]
fn test_unsolved_arrangements() {
    // With the blank away from the corner, some tile must be out of place.
    let rows: [[Option<u16>; 2]; 2] = [[Some(1), None], [Some(3), Some(2)]];
    let engine = PuzzleEngine::from_rows(&rows, MoveRule::Adjacent).unwrap();
    assert!(!engine.is_solved());
    assert_eq!(engine.blank(), Pos::new(0, 1));

    let mut engine = PuzzleEngine::new(4, MoveRule::Adjacent).unwrap();
    engine.do_move(Pos::new(3, 2)).unwrap();
    assert!(!engine.is_solved());
    assert!(engine.is_solvable());
}

#[test]
fn test_from_rows_validation() {
    let two_blanks: [[Option<u16>; 2]; 2] = [[Some(1), None], [None, Some(3)]];
    let no_blank: [[Option<u16>; 2]; 2] = [[Some(1), Some(2)], [Some(3), Some(3)]];
    let duplicate: [[Option<u16>; 2]; 2] = [[Some(1), Some(1)], [Some(3), None]];
    let zero: [[Option<u16>; 2]; 2] = [[Some(0), Some(2)], [Some(3), None]];
    let too_big: [[Option<u16>; 2]; 2] = [[None, Some(2)], [Some(3), Some(4)]];
    let ragged: [&[Option<u16>]; 2] = [&[Some(1), Some(2)], &[None]];
    for err in [
        PuzzleEngine::from_rows(&two_blanks, MoveRule::Adjacent),
        PuzzleEngine::from_rows(&no_blank, MoveRule::Adjacent),
        PuzzleEngine::from_rows(&duplicate, MoveRule::Adjacent),
        PuzzleEngine::from_rows(&zero, MoveRule::Adjacent),
        PuzzleEngine::from_rows(&ragged, MoveRule::Adjacent),
        PuzzleEngine::from_rows(&too_big, MoveRule::Adjacent),
    ] {
        assert!(matches!(err, Err(PuzzleError::InvalidConfiguration(_))));
    }
}

#[test]
fn test_adjacent_movability() {
    let engine = PuzzleEngine::new(4, MoveRule::Adjacent).unwrap();
    assert!(engine.is_movable(Pos::new(2, 3)));
    assert!(engine.is_movable(Pos::new(3, 2)));
    assert!(!engine.is_movable(Pos::new(2, 2)));
    assert!(!engine.is_movable(Pos::new(3, 1)));
    assert!(!engine.is_movable(Pos::new(3, 3)));
    assert!(!engine.is_movable(Pos::new(4, 3)));
    assert_eq!(
        engine.movable_cells(),
        vec![Pos::new(2, 3), Pos::new(3, 2)],
    );
}

#[test]
fn test_slide_movability() {
    let engine = PuzzleEngine::new(3, MoveRule::Slide).unwrap();
    assert!(engine.is_movable(Pos::new(0, 2)));
    assert!(engine.is_movable(Pos::new(2, 0)));
    assert!(!engine.is_movable(Pos::new(1, 1)));
    assert!(!engine.is_movable(Pos::new(2, 2)));
    assert_eq!(
        engine.movable_cells(),
        vec![
            Pos::new(0, 2),
            Pos::new(1, 2),
            Pos::new(2, 0),
            Pos::new(2, 1),
        ],
    );
}

#[test]
fn test_movable_cells_match_is_movable() {
    for rule in [MoveRule::Adjacent, MoveRule::Slide] {
        let mut engine = PuzzleEngine::new(5, rule).unwrap();
        engine.shuffle(40, &mut seeded_rng(7)).unwrap();
        let expected: Vec<Pos> = (0..5)
            .flat_map(|row| (0..5).map(move |col| Pos::new(row, col)))
            .filter(|&pos| engine.is_movable(pos))
            .collect();
        assert_eq!(engine.movable_cells(), expected);
    }
}

#[test]
fn test_adjacent_move() {
    let mut engine = PuzzleEngine::new(4, MoveRule::Adjacent).unwrap();
    let result = engine.do_move(Pos::new(2, 3)).unwrap();
    let twelve = Tile::new(12).unwrap();
    assert_eq!(
        result.moved.as_slice(),
        [TileMove {
            tile: twelve,
            from: Pos::new(2, 3),
            to: Pos::new(3, 3),
        }],
    );
    assert_eq!(result.previous_blank, Pos::new(3, 3));
    assert_eq!(result.blank, Pos::new(2, 3));
    assert_eq!(engine.blank(), Pos::new(2, 3));
    assert_eq!(engine.position_of(twelve), Some(Pos::new(3, 3)));
    assert_eq!(
        result.events(false).collect::<Vec<_>>(),
        vec![PuzzleEvent::TileMoved(result.moved[0])],
    );
}

#[test]
fn test_slide_move() {
    let mut engine = PuzzleEngine::new(4, MoveRule::Slide).unwrap();
    let result = engine.do_move(Pos::new(3, 0)).unwrap();
    let tiles: Vec<u16> = result.moved.iter().map(|m| m.tile.number()).collect();
    assert_eq!(tiles, vec![15, 14, 13]);
    assert_eq!(
        engine.to_string(),
        " 1  2  3  4\n 5  6  7  8\n 9 10 11 12\n . 13 14 15\n",
    );
    assert_eq!(engine.blank(), Pos::new(3, 0));
    assert_eq!(empty_cell_count(&engine), 1);

    let result = engine.do_move(Pos::new(0, 0)).unwrap();
    let tiles: Vec<u16> = result.moved.iter().map(|m| m.tile.number()).collect();
    assert_eq!(tiles, vec![9, 5, 1]);
    assert_eq!(engine.tile_at(Pos::new(3, 0)).unwrap(), Tile::new(9));
}

#[test]
fn test_illegal_moves_leave_state_unchanged() {
    let mut engine = PuzzleEngine::new(4, MoveRule::Adjacent).unwrap();
    let before = engine.clone();
    assert_eq!(
        engine.do_move(Pos::new(0, 0)),
        Err(PuzzleError::IllegalMove(Pos::new(0, 0))),
    );
    assert_eq!(
        engine.do_move(Pos::new(3, 3)),
        Err(PuzzleError::IllegalMove(Pos::new(3, 3))),
    );
    assert_eq!(
        engine.do_move(Pos::new(3, 4)),
        Err(PuzzleError::OutOfBounds {
            pos: Pos::new(3, 4),
            size: 4,
        }),
    );
    assert!(engine.tile_at(Pos::new(9, 9)).is_err());
    assert_eq!(engine, before);
}

#[test]
fn test_solved_event() {
    let mut engine = PuzzleEngine::new(3, MoveRule::Adjacent).unwrap();
    engine.do_move(Pos::new(1, 2)).unwrap();
    let result = engine.do_move(Pos::new(2, 2)).unwrap();
    assert!(engine.is_solved());
    assert_eq!(result.events(true).last(), Some(PuzzleEvent::Solved));
}

#[test]
fn test_snapshot() {
    let engine = PuzzleEngine::new(2, MoveRule::Adjacent).unwrap();
    let snapshot = engine.snapshot();
    assert_eq!(snapshot.size, 2);
    assert_eq!(snapshot.cells, vec![Tile::new(1), Tile::new(2), Tile::new(3), None]);
    assert_eq!(snapshot.blank, Pos::new(1, 1));
    assert_eq!(snapshot.movable, vec![Pos::new(0, 1), Pos::new(1, 0)]);
    assert!(snapshot.solved);
}

#[test]
fn test_tile_home() {
    let tile = Tile::new(7).unwrap();
    assert_eq!(tile.home(4), Some(Pos::new(1, 2)));
    assert_eq!(tile.home(3), Some(Pos::new(2, 0)));
    assert_eq!(tile.home(2), None);
    assert_eq!(tile.home(0), None);
    assert_eq!(Tile::for_home(Pos::new(1, 2), 4), Some(tile));
    assert_eq!(Tile::new(0), None);
}

#[test]
fn test_parity() {
    assert_eq!(Parity::of_permutation(&[0, 1, 2]), Some(Parity::Even));
    assert_eq!(Parity::of_permutation(&[1, 0, 2]), Some(Parity::Odd));
    assert_eq!(Parity::of_permutation(&[1, 2, 0]), Some(Parity::Even));
    assert_eq!(Parity::of_permutation(&[1, 1, 0]), None);
    assert_eq!(Parity::of_permutation(&[0, 3]), None);
    assert_eq!(Parity::Odd + Parity::Odd, Parity::Even);
}

#[test]
fn test_seeded_scramble_is_deterministic() {
    let config = PuzzleConfig::default();
    let time = Timestamp::from_millis(1_700_000_000_000).unwrap();
    let params = ScrambleParams::from_random_u64(ScrambleType::Full, time, 42);
    let a = PuzzleEngine::new_scrambled(&config, params.clone()).unwrap();
    let b = PuzzleEngine::new_scrambled(&config, params).unwrap();
    assert_eq!(a.moves, b.moves);
    assert_eq!(a.engine, b.engine);
    assert_eq!(a.moves.len(), FULL_SCRAMBLE_LENGTH as usize);
    assert!(a.engine.is_solvable());

    let other = ScrambleParams::from_random_u64(ScrambleType::Full, time, 43);
    let c = PuzzleEngine::new_scrambled(&config, other).unwrap();
    assert_ne!(a.moves, c.moves);
}

#[test]
fn test_scramble_inverse() {
    for rule in [MoveRule::Adjacent, MoveRule::Slide] {
        let config = PuzzleConfig {
            move_rule: rule,
            ..PuzzleConfig::with_size(5)
        };
        let time = Timestamp::from_millis(0).unwrap();
        let params = ScrambleParams::from_random_u64(ScrambleType::Partial(50), time, 9);
        let scrambled = PuzzleEngine::new_scrambled(&config, params).unwrap();
        assert_eq!(scrambled.moves.len(), 50);

        let mut engine = scrambled.engine.clone();
        for pos in scrambled.inverse_moves() {
            engine.do_move(pos).unwrap();
        }
        assert_eq!(engine, PuzzleEngine::from_config(&config).unwrap());
    }
}

#[test]
fn test_default_config() {
    let from_yaml: PuzzleConfig = serde_norway::from_str(DEFAULT_CONFIG_STR).unwrap();
    assert_eq!(from_yaml, PuzzleConfig::default());
    assert_eq!(PuzzleConfig::from_yaml_str("").unwrap(), PuzzleConfig::default());
}

#[test]
fn test_config_layering() {
    let config = PuzzleConfig::from_json_str(r#"{"size": 3, "move_rule": "slide"}"#).unwrap();
    assert_eq!(
        config,
        PuzzleConfig {
            size: 3,
            move_rule: MoveRule::Slide,
            scramble_length: FULL_SCRAMBLE_LENGTH,
        },
    );

    let config = PuzzleConfig::from_yaml_str("scramble_length: 12").unwrap();
    assert_eq!(config.size, DEFAULT_SIZE);
    assert_eq!(config.scramble_length, 12);

    let yaml = config.to_yaml_string().unwrap();
    assert_eq!(PuzzleConfig::from_yaml_str(&yaml).unwrap(), config);
}

#[test]
fn test_config_rejects_bad_values() {
    for doc in [r#"{"size": 1}"#, r#"{"move_rule": "diagonal"}"#, "{"] {
        assert!(matches!(
            PuzzleConfig::from_json_str(doc),
            Err(PuzzleError::InvalidConfiguration(_)),
        ));
    }
}

#[test]
fn test_move_rule_names() {
    assert_eq!(MoveRule::Slide.to_string(), "slide");
    assert_eq!("adjacent".parse::<MoveRule>(), Ok(MoveRule::Adjacent));
}

fn arb_rule() -> impl Strategy<Value = MoveRule> {
    prop_oneof![Just(MoveRule::Adjacent), Just(MoveRule::Slide)]
}

proptest! {
    #[test]
    fn proptest_initialize_is_solved(size in MIN_SIZE..12_usize, rule in arb_rule()) {
        let engine = PuzzleEngine::new(size, rule).unwrap();
        prop_assert!(engine.is_solved());
        prop_assert!(engine.is_solvable());
        prop_assert_eq!(engine.blank(), Pos::new(size - 1, size - 1));
    }

    #[test]
    fn proptest_shuffle_invariants(
        size in MIN_SIZE..7_usize,
        rule in arb_rule(),
        moves in 0..200_u32,
        seed in any::<u64>(),
    ) {
        let mut engine = PuzzleEngine::new(size, rule).unwrap();
        let applied = engine.shuffle(moves, &mut seeded_rng(seed)).unwrap();
        prop_assert_eq!(applied.len(), moves as usize);
        prop_assert_eq!(empty_cell_count(&engine), 1);
        prop_assert_eq!(engine.tile_at(engine.blank()).unwrap(), None);
        prop_assert!(engine.is_solvable());
    }

    #[test]
    fn proptest_move_is_own_inverse(
        size in MIN_SIZE..7_usize,
        rule in arb_rule(),
        seed in any::<u64>(),
        choice in any::<prop::sample::Index>(),
    ) {
        let mut engine = PuzzleEngine::new(size, rule).unwrap();
        engine.shuffle(30, &mut seeded_rng(seed)).unwrap();
        let before = engine.clone();

        let target = *choice.get(&engine.movable_cells());
        let result = engine.do_move(target).unwrap();
        prop_assert_eq!(empty_cell_count(&engine), 1);
        prop_assert_eq!(engine.blank(), target);
        engine.do_move(result.previous_blank).unwrap();
        prop_assert_eq!(engine, before);
    }

    #[test]
    fn proptest_reversing_shuffle_restores_solved(
        size in MIN_SIZE..6_usize,
        rule in arb_rule(),
        moves in 0..100_u32,
        seed in any::<u64>(),
    ) {
        let mut engine = PuzzleEngine::new(size, rule).unwrap();
        let start_blank = engine.blank();
        let applied = engine.shuffle(moves, &mut seeded_rng(seed)).unwrap();
        let blanks_before = std::iter::once(start_blank).chain(applied.iter().copied());
        let mut undo: Vec<Pos> = blanks_before.take(applied.len()).collect();
        undo.reverse();
        for pos in undo {
            engine.do_move(pos).unwrap();
        }
        prop_assert!(engine.is_solved());
        prop_assert_eq!(engine.blank(), start_blank);
    }
}
