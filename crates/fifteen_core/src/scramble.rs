use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use sha2::Digest;

use crate::{Pos, PuzzleConfig, PuzzleEngine, PuzzleError, Timestamp};

/// Parameters to deterministically generate a move sequence to scramble a
/// puzzle.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ScrambleParams {
    /// Type of scramble to generate.
    pub ty: ScrambleType,
    /// Timestamp when the scramble was requested.
    pub time: Timestamp,
    /// Random seed, usually derived from the time and a random number.
    pub seed: String,
}
impl ScrambleParams {
    /// Generates new scramble parameters from the current time and a random
    /// number from the OS.
    #[cfg(feature = "os-rng")]
    pub fn new(ty: ScrambleType) -> Self {
        use rand::Rng;

        Self::from_random_u64(ty, Timestamp::now(), rand::rng().random())
    }

    /// Generates scramble parameters from a time and a random number supplied
    /// by the caller.
    ///
    /// Use this on hosts that have no OS random number generator, such as the
    /// browser.
    pub fn from_random_u64(ty: ScrambleType, time: Timestamp, random_u64: u64) -> Self {
        Self {
            ty,
            time,
            seed: format!("{time}_{random_u64}"),
        }
    }

    /// Returns the random number generator for this scramble.
    ///
    /// **Changing this will break scramble compatibility with older log
    /// files.**
    pub fn rng(&self) -> rand_chacha::ChaCha12Rng {
        let mut sha256 = sha2::Sha256::new();
        sha256.update(self.time.to_string().as_bytes());
        sha256.update(self.seed.len().to_le_bytes());
        sha256.update(self.seed.as_bytes());
        let digest: [u8; 32] = sha256.finalize().into();
        rand_chacha::ChaCha12Rng::from_seed(digest)
    }

    /// Returns the number of moves to generate.
    pub fn length(&self, config: &PuzzleConfig) -> u32 {
        match self.ty {
            ScrambleType::Full => config.scramble_length,
            ScrambleType::Partial(n) => n,
        }
    }
}

/// Type of scramble to generate.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ScrambleType {
    /// Full scramble, using the configured scramble length.
    Full,
    /// Partial scramble of a specific number of moves.
    Partial(u32),
}

/// Output of scrambling a puzzle.
#[derive(Debug, Clone)]
pub struct ScrambledPuzzle {
    /// Parameters used to generate the scramble.
    pub params: ScrambleParams,
    /// Target of each scramble move, in order.
    pub moves: Vec<Pos>,
    /// State of the puzzle after scrambling.
    pub engine: PuzzleEngine,
}
impl ScrambledPuzzle {
    /// Returns the moves that undo the scramble, in order.
    ///
    /// Each move's inverse is the position the blank had before it, so this is
    /// the blank's path walked backwards.
    pub fn inverse_moves(&self) -> Vec<Pos> {
        let size = self.engine.size();
        let solved_blank = Pos::new(size - 1, size - 1);
        let mut ret: Vec<Pos> = std::iter::once(solved_blank)
            .chain(self.moves.iter().copied())
            .take(self.moves.len())
            .collect();
        ret.reverse();
        ret
    }
}

impl PuzzleEngine {
    /// Constructs a solved puzzle and scrambles it with moves drawn from the
    /// seeded random number generator of `params`.
    ///
    /// The same config and params always produce the same scramble.
    pub fn new_scrambled(
        config: &PuzzleConfig,
        params: ScrambleParams,
    ) -> Result<ScrambledPuzzle, PuzzleError> {
        let mut engine = Self::from_config(config)?;
        let mut rng = params.rng();
        let moves = engine.shuffle(params.length(config), &mut rng)?;
        log::info!(
            "scrambled {0}x{0} puzzle with {1} moves",
            config.size,
            moves.len(),
        );
        Ok(ScrambledPuzzle {
            params,
            moves,
            engine,
        })
    }
}
