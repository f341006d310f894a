//! Puzzle session state manager, to ensure consistent feel across frontends.

mod action;
mod replay_event;
mod simulation;

pub use action::Action;
use action::UndoBehavior;
pub use replay_event::ReplayEvent;
pub use simulation::PuzzleSimulation;
