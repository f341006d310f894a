use fifteen_core::{
    GridSnapshot, MoveRule, Pos, PuzzleConfig, PuzzleEngine, PuzzleError, PuzzleEvent,
    ScrambleParams, ScrambleType, ScrambledPuzzle, Timestamp,
};
use fifteen_log::{LogEvent, Scramble, Solve, notation};
use web_time::{Duration, Instant};

use crate::{Action, ReplayEvent, UndoBehavior};

/// Puzzle simulation, which manages the puzzle state, undo stack, solve
/// tracking, and events for collaborators.
#[derive(Debug, Clone)]
pub struct PuzzleSimulation {
    /// Settings the puzzle was created with.
    config: PuzzleConfig,
    /// Latest puzzle state.
    engine: PuzzleEngine,

    /// Scramble applied to the puzzle initially.
    scramble: Option<Scramble>,
    /// Stack of actions to undo.
    undo_stack: Vec<Action>,
    /// Stack of actions to redo.
    redo_stack: Vec<Action>,
    /// List of events played on the puzzle since it was created.
    replay: Vec<ReplayEvent>,
    /// Events not yet drained by collaborators.
    events: Vec<PuzzleEvent>,
    /// Number of moves, not counting undone moves.
    move_count: u64,
    /// Whether the solve has been started.
    started: bool,
    /// Whether the puzzle has been solved.
    solved: bool,
    /// Whether the solved state has been handled by the UI.
    solved_state_handled: bool,
    /// Total duration from previous sessions.
    old_duration: Option<i64>,
    /// Time that the puzzle was loaded.
    load_time: Instant,
}
impl PuzzleSimulation {
    /// Constructs a new simulation with a solved puzzle.
    pub fn new(config: PuzzleConfig) -> Result<Self, PuzzleError> {
        let engine = PuzzleEngine::from_config(&config)?;
        log::info!(
            "new {0}x{0} game with {1} move rule",
            config.size,
            config.move_rule,
        );
        Ok(Self {
            config,
            engine,

            scramble: None,
            undo_stack: vec![],
            redo_stack: vec![],
            replay: vec![ReplayEvent::StartSession {
                time: Some(Timestamp::now()),
            }],
            events: vec![],
            move_count: 0,
            started: false,
            solved: false,
            solved_state_handled: true,
            old_duration: Some(0),
            load_time: Instant::now(),
        })
    }

    /// Returns the settings the puzzle was created with.
    pub fn config(&self) -> &PuzzleConfig {
        &self.config
    }
    /// Returns the latest puzzle state.
    pub fn puzzle(&self) -> &PuzzleEngine {
        &self.engine
    }
    /// Returns a copy of the latest puzzle state for rendering.
    pub fn snapshot(&self) -> GridSnapshot {
        self.engine.snapshot()
    }

    /// Returns the scramble, or `None` if the puzzle has not been scrambled.
    ///
    /// To scramble the puzzle, call [`Self::scramble()`].
    pub fn get_scramble(&self) -> &Option<Scramble> {
        &self.scramble
    }
    /// Returns whether the puzzle has been fully scrambled.
    pub fn has_been_fully_scrambled(&self) -> bool {
        self.scramble
            .as_ref()
            .is_some_and(|scramble| scramble.ty == ScrambleType::Full)
    }
    /// Returns every event played on the puzzle since it was created or last
    /// reset.
    pub fn replay_events(&self) -> &[ReplayEvent] {
        &self.replay
    }

    /// Resets the puzzle state and replay log, keeping the configuration.
    pub fn reset(&mut self) {
        match Self::new(self.config.clone()) {
            Ok(new) => *self = new,
            Err(e) => log::error!("error resetting puzzle: {e}"),
        }
    }
    /// Starts a new game with a different grid size.
    ///
    /// On error, the current game is left unchanged.
    pub fn resize(&mut self, size: usize) -> Result<(), PuzzleError> {
        self.new_game(PuzzleConfig {
            size,
            ..self.config.clone()
        })
    }
    /// Starts a new game with a different move rule.
    pub fn set_move_rule(&mut self, move_rule: MoveRule) -> Result<(), PuzzleError> {
        self.new_game(PuzzleConfig {
            move_rule,
            ..self.config.clone()
        })
    }
    fn new_game(&mut self, config: PuzzleConfig) -> Result<(), PuzzleError> {
        *self = Self::new(config)?;
        Ok(())
    }

    /// Resets and scrambles the puzzle.
    pub fn scramble(&mut self, params: ScrambleParams) -> Result<(), PuzzleError> {
        let scrambled = PuzzleEngine::new_scrambled(&self.config, params)?;
        self.recv_scramble(scrambled);
        Ok(())
    }
    fn recv_scramble(&mut self, scrambled: ScrambledPuzzle) {
        let ScrambledPuzzle {
            params,
            moves,
            engine,
        } = scrambled;

        self.reset();
        let scramble = Scramble::new(params, notation::format_moves(moves));
        self.scramble = Some(scramble);
        // We could use `do_action_internal()` but that would replay every
        // scramble move, which isn't necessary.
        let time = Some(Timestamp::now());
        self.undo_stack.push(Action::Scramble { time });
        self.replay.push(ReplayEvent::Scramble { time });
        self.engine = engine;
    }

    /// Clicks a cell, moving it toward the blank if the move is legal.
    /// Returns whether a tile moved.
    pub fn click(&mut self, pos: Pos) -> bool {
        self.do_event(ReplayEvent::Click {
            time: Some(Timestamp::now()),
            pos,
        })
    }
    /// Undoes the most recent move, if possible.
    pub fn undo(&mut self) {
        self.do_event(ReplayEvent::Undo {
            time: Some(Timestamp::now()),
        });
    }
    /// Redoes the most recently undone move, if possible.
    pub fn redo(&mut self) {
        self.do_event(ReplayEvent::Redo {
            time: Some(Timestamp::now()),
        });
    }

    /// Plays a replay event on the puzzle. Returns `false` if the event was
    /// ignored.
    ///
    /// Clicks on cells that cannot move are ignored and not recorded.
    pub fn do_event(&mut self, event: ReplayEvent) -> bool {
        if let ReplayEvent::Click { pos, .. } = event {
            if !self.engine.is_movable(pos) {
                log::debug!("ignoring click on {pos}: cell cannot move");
                return false;
            }
            if self.scramble.is_some() && !self.started {
                self.do_event(ReplayEvent::StartSolve {
                    time: Some(Timestamp::now()),
                    duration: self.file_duration(),
                });
            }
        }
        let may_solve = matches!(
            event,
            ReplayEvent::Click { .. } | ReplayEvent::Undo { .. } | ReplayEvent::Redo { .. },
        );
        self.replay_event(event);

        let newly_solved = self.started && !self.solved && self.engine.is_solved();
        if may_solve && newly_solved && self.scramble.is_some() {
            self.do_event(ReplayEvent::EndSolve {
                time: Some(Timestamp::now()),
                duration: self.file_duration(),
            });
        }
        true
    }
    /// Plays a replay event on the puzzle when deserializing.
    fn replay_event(&mut self, event: ReplayEvent) {
        self.replay.push(event.clone());
        match event {
            ReplayEvent::Undo { .. } => self.undo_action(),
            ReplayEvent::Redo { .. } => self.redo_action(),
            ReplayEvent::Scramble { time } => {
                self.do_action(Action::Scramble { time });
            }
            ReplayEvent::Click { pos, .. } => {
                self.do_action(Action::Move {
                    old_move_count: self.move_count,
                    target: pos,
                    previous_blank: self.engine.blank(),
                });
            }
            ReplayEvent::StartSolve { time, duration } => {
                self.do_action(Action::StartSolve { time, duration });
            }
            ReplayEvent::EndSolve { time, duration } => {
                self.do_action(Action::EndSolve { time, duration });
            }
            ReplayEvent::StartSession { .. } | ReplayEvent::EndSession { .. } => (),
        }
    }

    /// Returns whether there is an action available to undo.
    pub fn has_undo(&self) -> bool {
        for action in self.undo_stack.iter().rev() {
            match action.undo_behavior() {
                UndoBehavior::Action => return true,
                UndoBehavior::Marker => continue, // find the next action
                UndoBehavior::Boundary => return false, // cannot undo
            }
        }
        false
    }
    /// Returns whether there is an action available to redo.
    pub fn has_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    fn undo_action(&mut self) {
        // Keep undoing until we find an action that can be undone.
        while let Some(action) = self.undo_stack.pop() {
            match action.undo_behavior() {
                UndoBehavior::Action => {
                    if self.undo_action_internal(&action) {
                        self.redo_stack.push(action);
                    }
                    break;
                }
                UndoBehavior::Marker => {
                    // Markers are recreated when the action is redone.
                    self.undo_action_internal(&action);
                }
                UndoBehavior::Boundary => {
                    self.undo_stack.push(action); // oops, put it back!
                    break;
                }
            }
        }
    }
    fn redo_action(&mut self) {
        // Keep redoing until we find an action that can be redone.
        while let Some(action) = self.redo_stack.pop() {
            if self.do_action_internal(&action) {
                self.undo_stack.push(action);
                break;
            }
        }
    }

    /// Does an undoable action and saves it to the undo stack if it had any
    /// effect.
    ///
    /// Clears the redo stack if applicable.
    fn do_action(&mut self, action: Action) {
        if !self.do_action_internal(&action) {
            return;
        }
        match action.undo_behavior() {
            UndoBehavior::Action => self.redo_stack.clear(),
            UndoBehavior::Marker | UndoBehavior::Boundary => (),
        }
        self.undo_stack.push(action);
    }
    /// Does an undoable action. Returns whether the action should be saved to
    /// the undo stack.
    fn do_action_internal(&mut self, action: &Action) -> bool {
        match action {
            Action::Scramble { .. } => match &self.scramble {
                Some(scramble) => {
                    for pos in notation::parse_moves(&scramble.moves) {
                        match pos {
                            Ok(pos) => {
                                if let Err(e) = self.engine.do_move(pos) {
                                    log::error!("move blocked in scramble: {e}");
                                }
                            }
                            Err(e) => log::error!("error parsing move in scramble: {e}"),
                        }
                    }
                    true
                }
                None => false,
            },
            &Action::Move { target, .. } => self.apply_move(target),
            Action::StartSolve { .. } => {
                self.started = true;
                true
            }
            Action::EndSolve { .. } => {
                self.solved = true;
                self.solved_state_handled = false;
                log::info!("puzzle solved in {} moves", self.move_count);
                true
            }
        }
    }
    /// Undoes an action. Returns whether the action should be saved to the redo
    /// stack.
    fn undo_action_internal(&mut self, action: &Action) -> bool {
        match action {
            Action::Scramble { .. } => false, // shouldn't be possible
            &Action::Move {
                old_move_count,
                previous_blank,
                ..
            } => {
                let ok = self.apply_move(previous_blank);
                if ok {
                    self.move_count = old_move_count;
                }
                ok
            }
            Action::StartSolve { .. } => false, // shouldn't be possible
            Action::EndSolve { .. } => {
                self.solved = false;
                true
            }
        }
    }

    /// Executes a move on the puzzle and queues its events. Returns whether
    /// the move was successful.
    ///
    /// This does **not** affect the undo stack. Use [`Self::do_event()`]
    /// instead if that's desired.
    fn apply_move(&mut self, pos: Pos) -> bool {
        match self.engine.do_move(pos) {
            Ok(result) => {
                self.move_count += 1;
                let solved = self.engine.is_solved();
                self.events.extend(result.events(solved));
                true
            }
            Err(e) => {
                log::debug!("ignoring move: {e}");
                false
            }
        }
    }

    /// Returns the number of moves made, not counting undone moves.
    pub fn move_count(&self) -> u64 {
        self.move_count
    }

    /// Returns the combined session time of the file, in milliseconds.
    pub fn file_duration(&self) -> Option<i64> {
        let elapsed = i64::try_from(self.load_time.elapsed().as_millis()).ok()?;
        self.old_duration?.checked_add(elapsed)
    }
    /// Returns the time since the first move of the solve, stopping once the
    /// puzzle is solved.
    ///
    /// Returns `None` if the solve has not started.
    pub fn duration(&self) -> Option<Duration> {
        let mut start = None;
        let mut end = None;
        for action in &self.undo_stack {
            match action {
                Action::StartSolve { duration, .. } => start = *duration,
                Action::EndSolve { duration, .. } => end = *duration,
                Action::Scramble { .. } | Action::Move { .. } => (),
            }
        }
        let end = end.or_else(|| self.file_duration())?;
        let millis = end.checked_sub(start?)?;
        Some(Duration::from_millis(u64::try_from(millis).ok()?))
    }

    /// Returns and clears the events queued since the last call.
    pub fn drain_events(&mut self) -> Vec<PuzzleEvent> {
        std::mem::take(&mut self.events)
    }

    /// Returns whether the puzzle is _currently_ solved.
    pub fn is_solved(&self) -> bool {
        self.engine.is_solved()
    }
    /// Returns whether the puzzle was solved from a scramble and the solve has
    /// not been undone.
    pub fn is_solve_complete(&self) -> bool {
        self.solved
    }
    /// Returns whether the puzzle was _just_ solved.
    ///
    /// This returns `true` at most once per solve, so the caller can show its
    /// notification after its own animation settles.
    pub fn take_solved_notification(&mut self) -> bool {
        self.solved && !std::mem::replace(&mut self.solved_state_handled, true)
    }

    /// Returns a solve log, not including undone moves.
    pub fn to_solve_log(&self) -> Solve {
        let mut log = vec![];
        for action in &self.undo_stack {
            match action {
                Action::Scramble { .. } => log.push(LogEvent::Scramble),
                &Action::Move { target, .. } => {
                    let s = notation::format_move(target);
                    if let Some(LogEvent::Moves { moves }) = log.last_mut() {
                        *moves += " ";
                        *moves += &s;
                    } else {
                        log.push(LogEvent::Moves { moves: s });
                    }
                }
                &Action::StartSolve { time, duration } => {
                    log.push(LogEvent::StartSolve { time, duration });
                }
                &Action::EndSolve { time, duration } => {
                    log.push(LogEvent::EndSolve { time, duration });
                }
            }
        }

        Solve {
            puzzle: self.config.clone(),
            solved: self
                .undo_stack
                .iter()
                .any(|action| matches!(action, Action::EndSolve { .. })),
            duration: self.file_duration(),
            scramble: self.scramble.clone(),
            log,
        }
    }
    /// Loads a solve log, replaying its events on a new puzzle.
    ///
    /// Moves that cannot be parsed or applied are skipped.
    pub fn from_solve_log(solve: &Solve) -> Result<Self, PuzzleError> {
        log::trace!("Loading solve ...");

        let mut ret = Self::new(solve.puzzle.clone())?;

        for event in &solve.log {
            match event {
                LogEvent::Scramble => {
                    log::trace!("Applying scramble {:?}", solve.scramble);
                    ret.reset();
                    ret.scramble = solve.scramble.clone();
                    let time = solve.scramble.as_ref().and_then(|s| s.time);
                    ret.replay_event(ReplayEvent::Scramble { time });
                }
                LogEvent::Moves { moves } => {
                    for pos in notation::parse_moves(moves) {
                        match pos {
                            Ok(pos) => ret.replay_event(ReplayEvent::Click { time: None, pos }),
                            Err(e) => log::warn!("skipping move in solve log: {e}"),
                        }
                    }
                }
                &LogEvent::StartSolve { time, duration } => {
                    ret.replay_event(ReplayEvent::StartSolve { time, duration });
                }
                &LogEvent::EndSolve { time, duration } => {
                    ret.replay_event(ReplayEvent::EndSolve { time, duration });
                }
                &LogEvent::StartSession { time } => {
                    ret.replay_event(ReplayEvent::StartSession { time });
                }
                &LogEvent::EndSession { time } => {
                    ret.replay_event(ReplayEvent::EndSession { time });
                }
            }
        }

        ret.replay_event(ReplayEvent::StartSession {
            time: Some(Timestamp::now()),
        });

        ret.old_duration = solve.duration;
        ret.solved_state_handled = true;
        ret.events.clear();

        Ok(ret)
    }
}
