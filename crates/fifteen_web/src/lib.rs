//! Browser front end for sliding tile puzzles.
//!
//! [`WebSession`] exchanges plain values and JSON strings so that it can be
//! driven from any host. On `wasm32`, it is exported to JavaScript as
//! `WebPuzzle`.

mod session;
#[cfg(target_arch = "wasm32")]
mod wasm;

pub use session::WebSession;

#[cfg(test)]
mod tests;
