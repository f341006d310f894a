//! `wasm-bindgen` exports for [`WebSession`].

use wasm_bindgen::prelude::*;

use crate::WebSession;

#[wasm_bindgen(start)]
fn start() {
    console_error_panic_hook::set_once();
    wasm_logger::init(wasm_logger::Config::new(log::Level::Warn));
}

fn js_error(e: eyre::Report) -> JsError {
    JsError::new(&format!("{e:#}"))
}

/// Returns a random `u64` built from two draws of `Math.random()`.
fn js_random_u64() -> u64 {
    let hi = (js_sys::Math::random() * 4_294_967_296.0) as u64;
    let lo = (js_sys::Math::random() * 4_294_967_296.0) as u64;
    (hi << 32) | lo
}

/// Sliding tile puzzle exported to JavaScript.
#[wasm_bindgen]
pub struct WebPuzzle {
    inner: WebSession,
}

#[wasm_bindgen]
impl WebPuzzle {
    /// Creates a puzzle from a JSON configuration string, which may be empty.
    #[wasm_bindgen(constructor)]
    pub fn new(config_json: &str) -> Result<WebPuzzle, JsError> {
        Ok(Self {
            inner: WebSession::new(config_json).map_err(js_error)?,
        })
    }

    /// Clicks a cell. Returns whether a tile moved.
    pub fn click(&mut self, row: usize, col: usize) -> bool {
        self.inner.click(row, col)
    }

    /// Starts a new scrambled game, optionally from a seed.
    pub fn shuffle(&mut self, seed: Option<String>) -> Result<(), JsError> {
        self.inner.shuffle(seed, js_random_u64()).map_err(js_error)
    }

    /// Undoes the most recent move.
    pub fn undo(&mut self) {
        self.inner.undo();
    }

    /// Redoes the most recently undone move.
    pub fn redo(&mut self) {
        self.inner.redo();
    }

    /// Starts a new game with a different grid size.
    pub fn resize(&mut self, size: usize) -> Result<(), JsError> {
        self.inner.resize(size).map_err(js_error)
    }

    /// Starts a new game with a different move rule.
    #[wasm_bindgen(js_name = setMoveRule)]
    pub fn set_move_rule(&mut self, move_rule: &str) -> Result<(), JsError> {
        self.inner.set_move_rule(move_rule).map_err(js_error)
    }

    /// Whether the cell may move.
    #[wasm_bindgen(js_name = isMovable)]
    pub fn is_movable(&self, row: usize, col: usize) -> bool {
        self.inner.is_movable(row, col)
    }

    /// Whether every tile is home.
    #[wasm_bindgen(js_name = isSolved)]
    pub fn is_solved(&self) -> bool {
        self.inner.is_solved()
    }

    /// Returns `true` once after each solve, for showing a popup.
    #[wasm_bindgen(js_name = takeSolvedNotification)]
    pub fn take_solved_notification(&mut self) -> bool {
        self.inner.take_solved_notification()
    }

    /// Moves made, not counting undone moves.
    #[wasm_bindgen(js_name = moveCount)]
    pub fn move_count(&self) -> f64 {
        self.inner.move_count() as f64
    }

    /// Milliseconds since the first move of the solve, or `undefined`.
    #[wasm_bindgen(js_name = durationMs)]
    pub fn duration_ms(&self) -> Option<f64> {
        self.inner.duration_ms().map(|ms| ms as f64)
    }

    /// Grid state as JSON: size, cells, blank, movable cells, solved flag.
    #[wasm_bindgen(js_name = snapshotJson)]
    pub fn snapshot_json(&self) -> Result<String, JsError> {
        self.inner.snapshot_json().map_err(js_error)
    }

    /// Events since the last call, as a JSON array.
    #[wasm_bindgen(js_name = drainEventsJson)]
    pub fn drain_events_json(&mut self) -> Result<String, JsError> {
        self.inner.drain_events_json().map_err(js_error)
    }

    /// Solve log file as JSON.
    #[wasm_bindgen(js_name = exportLog)]
    pub fn export_log(&self) -> Result<String, JsError> {
        self.inner.export_log().map_err(js_error)
    }

    /// Loads a solve log file. Returns warnings, one per line.
    #[wasm_bindgen(js_name = importLog)]
    pub fn import_log(&mut self, s: &str) -> Result<String, JsError> {
        Ok(self.inner.import_log(s).map_err(js_error)?.join("\n"))
    }
}
