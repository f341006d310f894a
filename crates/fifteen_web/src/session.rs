use eyre::{OptionExt, Result};
use fifteen_core::{MoveRule, Pos, PuzzleConfig, ScrambleParams, ScrambleType, Timestamp};
use fifteen_log::{LogFile, Program};
use fifteen_view::PuzzleSimulation;

/// Puzzle session driven by a browser UI.
///
/// Grid state and events cross the boundary as JSON.
#[derive(Debug)]
pub struct WebSession {
    sim: PuzzleSimulation,
}
impl WebSession {
    /// Constructs a session from a JSON configuration document layered over
    /// the defaults. An empty string selects the default configuration.
    pub fn new(config_json: &str) -> Result<Self> {
        let config = PuzzleConfig::from_json_str(config_json)?;
        Ok(Self {
            sim: PuzzleSimulation::new(config)?,
        })
    }

    /// Returns the underlying simulation.
    pub fn simulation(&self) -> &PuzzleSimulation {
        &self.sim
    }

    /// Clicks a cell. Returns whether a tile moved.
    pub fn click(&mut self, row: usize, col: usize) -> bool {
        self.sim.click(Pos::new(row, col))
    }

    /// Starts a new game with a full scramble.
    ///
    /// With a seed, the scramble depends only on the seed and the
    /// configuration. Without one, `random_u64` and the current time are used.
    pub fn shuffle(&mut self, seed: Option<String>, random_u64: u64) -> Result<()> {
        let params = match seed {
            Some(seed) => ScrambleParams {
                ty: ScrambleType::Full,
                time: Timestamp::from_millis(0).ok_or_eyre("bad timestamp")?,
                seed,
            },
            None => {
                ScrambleParams::from_random_u64(ScrambleType::Full, Timestamp::now(), random_u64)
            }
        };
        self.sim.scramble(params)?;
        Ok(())
    }

    /// Undoes the most recent move.
    pub fn undo(&mut self) {
        self.sim.undo();
    }
    /// Redoes the most recently undone move.
    pub fn redo(&mut self) {
        self.sim.redo();
    }

    /// Starts a new game with a different grid size.
    pub fn resize(&mut self, size: usize) -> Result<()> {
        Ok(self.sim.resize(size)?)
    }
    /// Starts a new game with a different move rule, such as `"slide"`.
    pub fn set_move_rule(&mut self, move_rule: &str) -> Result<()> {
        let move_rule: MoveRule = move_rule.parse()?;
        Ok(self.sim.set_move_rule(move_rule)?)
    }

    /// Returns whether the cell may move.
    pub fn is_movable(&self, row: usize, col: usize) -> bool {
        self.sim.puzzle().is_movable(Pos::new(row, col))
    }
    /// Returns whether every tile is in its home cell.
    pub fn is_solved(&self) -> bool {
        self.sim.is_solved()
    }
    /// Returns whether the puzzle was just solved from a scramble. Returns
    /// `true` at most once per solve.
    pub fn take_solved_notification(&mut self) -> bool {
        self.sim.take_solved_notification()
    }
    /// Returns the number of moves made.
    pub fn move_count(&self) -> u64 {
        self.sim.move_count()
    }
    /// Returns milliseconds since the first move of the solve.
    pub fn duration_ms(&self) -> Option<u64> {
        self.sim
            .duration()
            .map(|d| u64::try_from(d.as_millis()).unwrap_or(u64::MAX))
    }

    /// Returns the grid state as JSON.
    pub fn snapshot_json(&self) -> Result<String> {
        Ok(serde_json::to_string(&self.sim.snapshot())?)
    }
    /// Returns the events since the last call as a JSON array.
    pub fn drain_events_json(&mut self) -> Result<String> {
        Ok(serde_json::to_string(&self.sim.drain_events())?)
    }

    /// Returns a log file containing the current solve.
    pub fn export_log(&self) -> Result<String> {
        LogFile {
            program: Some(Program::this_program()),
            solves: vec![self.sim.to_solve_log()],
        }
        .serialize()
    }
    /// Replaces the session with the first solve in a log file. Returns any
    /// warnings.
    pub fn import_log(&mut self, s: &str) -> Result<Vec<String>> {
        let (log_file, warnings) = LogFile::deserialize(s)?;
        let solve = log_file.solves.first().ok_or_eyre("log file has no solves")?;
        self.sim = PuzzleSimulation::from_solve_log(solve)?;
        Ok(warnings)
    }
}
