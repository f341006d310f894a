use fifteen_core::{Pos, Timestamp};

/// Event that is part of a replay.
#[derive(Debug, Clone, PartialEq)]
pub enum ReplayEvent {
    /// Undo of the most recent undoable [`crate::Action`].
    Undo {
        /// Event timestamp.
        time: Option<Timestamp>,
    },
    /// Redo of the most recent redoable [`crate::Action`].
    Redo {
        /// Event timestamp.
        time: Option<Timestamp>,
    },
    /// Reset + scramble the puzzle
    Scramble {
        /// Time that the scramble became visible to the user.
        time: Option<Timestamp>,
    },
    /// Click on a cell, requesting a move toward the blank.
    Click {
        /// Event timestamp.
        time: Option<Timestamp>,
        /// Cell clicked.
        pos: Pos,
    },
    /// Start of a solve (first move after being scrambled).
    StartSolve {
        /// Event timestamp.
        time: Option<Timestamp>,
        /// Log file duration at the time.
        duration: Option<i64>,
    },
    /// End of a solve (fully solved after being scrambled).
    EndSolve {
        /// Event timestamp.
        time: Option<Timestamp>,
        /// Log file duration at the time.
        duration: Option<i64>,
    },
    /// Start of a session.
    StartSession {
        /// Event timestamp.
        time: Option<Timestamp>,
    },
    /// End of a session.
    EndSession {
        /// Event timestamp.
        time: Option<Timestamp>,
    },
}
