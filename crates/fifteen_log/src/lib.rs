//! Structures and serialization/deserialization for move notation and solve
//! log files.

#[macro_use]
extern crate lazy_static;

use fifteen_core::{PuzzleConfig, ScrambleParams, ScrambleType, Timestamp};
use serde::{Deserialize, Serialize};
use sha2::Digest;

pub mod notation;
pub mod verify;

#[cfg(test)]
mod tests;

/// Log file version. This **MUST** be incremented whenever breaking changes are
/// made to the log file format.
pub const LOG_FILE_VERSION: u32 = 1;

/// Top-level log file structure.
///
/// A single log file may contain multiple solves.
#[derive(Serialize, Deserialize, Debug, Default, Clone, PartialEq, Eq)]
pub struct LogFile {
    /// Information about the software that created the log file.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub program: Option<Program>,
    /// List of solves.
    #[serde(default)]
    pub solves: Vec<Solve>,
}

/// On-disk layout: the log file plus its format version.
#[derive(Serialize, Deserialize)]
struct VersionedLogFile<T> {
    version: u32,
    #[serde(flatten)]
    contents: T,
}

impl LogFile {
    /// Serializes the log file to a string.
    pub fn serialize(&self) -> eyre::Result<String> {
        Ok(serde_json::to_string_pretty(&VersionedLogFile {
            version: LOG_FILE_VERSION,
            contents: self,
        })?)
    }

    /// Deserializes a log file from a string. Also returns any warnings.
    pub fn deserialize(s: &str) -> eyre::Result<(Self, Vec<String>)> {
        let VersionedLogFile { version, contents } =
            serde_json::from_str::<VersionedLogFile<Self>>(s)?;

        let mut warnings = vec![];
        if version > LOG_FILE_VERSION {
            let msg = "this file was saved using a newer version, and might not load correctly";
            log::warn!("{msg} (version {version})");
            warnings.push(msg.to_owned());
        }

        Ok((contents, warnings))
    }
}

/// Information about the software that created the log file.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Program {
    /// Name of the program.
    pub name: Option<String>,
    /// Version number, with no leading `v`.
    pub version: Option<String>,
}
impl Program {
    /// Returns info about this build of the puzzle engine.
    pub fn this_program() -> Self {
        Self {
            name: Some("fifteen".to_owned()),
            version: Some(env!("CARGO_PKG_VERSION").to_owned()),
        }
    }
}

/// Solve of a puzzle.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Solve {
    /// Puzzle settings.
    ///
    /// This is the only part of a solve that is strictly required.
    pub puzzle: PuzzleConfig,
    /// Whether the puzzle has been solved from a scramble.
    ///
    /// This corresponds exactly to whether there is a [`LogEvent::EndSolve`]
    /// in `log` that has _not_ been undone.
    #[serde(default)]
    pub solved: bool,
    /// Number of milliseconds since the solve started, if it has.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<i64>,
    /// Scramble, applied with [`LogEvent::Scramble`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scramble: Option<Scramble>,
    /// List of events, not including undone moves.
    #[serde(default)]
    pub log: Vec<LogEvent>,
}
impl Solve {
    /// Returns a SHA-256 digest of the events of the solve, in JSON.
    pub fn digest_v1(&self) -> eyre::Result<Vec<u8>> {
        let serialized_log = serde_json::to_string(&self.log)?;
        Ok(sha2::Sha256::digest(&serialized_log).as_slice().to_vec())
    }
}

/// Scramble info.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Scramble {
    /// Scramble type selected by the user.
    pub ty: ScrambleType,
    /// Timestamp at which the scramble was generated.
    pub time: Option<Timestamp>,
    /// Random seed which, in conjunction with the timestamp,
    /// deterministically generates the move sequence.
    ///
    /// If this is not present, then the scramble is assumed to have been
    /// generated nondeterministically.
    pub seed: Option<String>,
    /// Move sequence to apply to the solved puzzle, using standard notation.
    pub moves: String,
}
impl Scramble {
    /// Constructs a scramble from scramble parameters and a move sequence.
    pub fn new(params: ScrambleParams, moves: String) -> Self {
        Self {
            ty: params.ty,
            time: Some(params.time),
            seed: Some(params.seed),
            moves,
        }
    }

    /// Returns the parameters used to deterministically generate the move
    /// sequence.
    ///
    /// Returns `None` if the scramble was generated nondeterministically.
    pub fn params(&self) -> Option<ScrambleParams> {
        Some(ScrambleParams {
            ty: self.ty,
            time: self.time?,
            seed: self.seed.clone()?,
        })
    }
}

/// Event in a solve log.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum LogEvent {
    /// Reset and scramble the puzzle using [`Solve::scramble`].
    Scramble,
    /// Sequence of moves, in standard notation.
    Moves {
        /// Moves applied.
        moves: String,
    },
    /// Start of the solve (first move after being scrambled).
    StartSolve {
        /// Event timestamp.
        time: Option<Timestamp>,
        /// Milliseconds since the solve was loaded.
        duration: Option<i64>,
    },
    /// End of the solve (fully solved after being scrambled).
    EndSolve {
        /// Event timestamp.
        time: Option<Timestamp>,
        /// Milliseconds since the solve was loaded.
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
