use fifteen_core::{Pos, Timestamp};

/// Action on a puzzle that is tracked in the undo/redo history.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Scramble moves. Cannot be undone.
    Scramble {
        /// Time that the scramble became visible to the user, which may be
        /// slightly different from the timestamp used to generate the scramble.
        time: Option<Timestamp>,
    },
    /// Single move.
    Move {
        /// Move counter before the move.
        old_move_count: u64,
        /// Cell that was clicked.
        target: Pos,
        /// Blank position before the move. Moving this cell undoes the move.
        previous_blank: Pos,
    },
    /// Start of solve. Cannot be undone.
    StartSolve {
        /// Event timestamp.
        time: Option<Timestamp>,
        /// Log file duration at the time.
        duration: Option<i64>,
    },
    /// End of solve. Undone automatically when undoing moves.
    EndSolve {
        /// Event timestamp.
        time: Option<Timestamp>,
        /// Log file duration at the time.
        duration: Option<i64>,
    },
}
impl Action {
    /// Returns the undo behavior for the action.
    pub(crate) fn undo_behavior(&self) -> UndoBehavior {
        match self {
            Action::Scramble { .. } => UndoBehavior::Boundary,
            Action::Move { .. } => UndoBehavior::Action,
            Action::StartSolve { .. } => UndoBehavior::Boundary,
            Action::EndSolve { .. } => UndoBehavior::Marker,
        }
    }
}

pub(crate) enum UndoBehavior {
    /// Action: can be undone and redone.
    Action,
    /// Marker: is automatically undone along with the preceding action, and is
    /// never part of the redo history.
    Marker,
    /// Boundary: cannot be undone.
    Boundary,
}
