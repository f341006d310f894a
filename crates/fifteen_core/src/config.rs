use config::{Config, File, FileFormat};
use serde::{Deserialize, Serialize};

use crate::{DEFAULT_SIZE, FULL_SCRAMBLE_LENGTH, MAX_SIZE, MIN_SIZE, MoveRule, PuzzleError};

/// Default configuration document, in YAML.
pub const DEFAULT_CONFIG_STR: &str = include_str!("default.yaml");

/// Settings for a game: grid size, move rule, and scramble length.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Hash)]
pub struct PuzzleConfig {
    /// Grid size `N`; the grid has `N*N - 1` tiles.
    pub size: usize,
    /// Rule deciding which tiles may move.
    pub move_rule: MoveRule,
    /// Number of random moves in a full scramble.
    pub scramble_length: u32,
}
impl Default for PuzzleConfig {
    fn default() -> Self {
        Self {
            size: DEFAULT_SIZE,
            move_rule: MoveRule::default(),
            scramble_length: FULL_SCRAMBLE_LENGTH,
        }
    }
}
impl PuzzleConfig {
    /// Constructs a default configuration with a different grid size.
    pub fn with_size(size: usize) -> Self {
        Self {
            size,
            ..Self::default()
        }
    }

    /// Loads a configuration from a YAML document layered over the defaults.
    pub fn from_yaml_str(s: &str) -> Result<Self, PuzzleError> {
        Self::load(s, FileFormat::Yaml)
    }

    /// Loads a configuration from a JSON document layered over the defaults.
    pub fn from_json_str(s: &str) -> Result<Self, PuzzleError> {
        Self::load(s, FileFormat::Json)
    }

    fn load(user_config: &str, format: FileFormat) -> Result<Self, PuzzleError> {
        let mut builder =
            Config::builder().add_source(File::from_str(DEFAULT_CONFIG_STR, FileFormat::Yaml));
        if !user_config.trim().is_empty() {
            builder = builder.add_source(File::from_str(user_config, format));
        }
        let ret: Self = builder
            .build()
            .and_then(|c| c.try_deserialize())
            .map_err(PuzzleError::config)?;
        ret.validate()?;
        log::debug!("loaded puzzle config {ret:?}");
        Ok(ret)
    }

    /// Serializes the configuration to YAML.
    pub fn to_yaml_string(&self) -> Result<String, PuzzleError> {
        serde_norway::to_string(self).map_err(PuzzleError::config)
    }

    /// Returns an error if the engine cannot be built from this configuration.
    pub fn validate(&self) -> Result<(), PuzzleError> {
        if !(MIN_SIZE..=MAX_SIZE).contains(&self.size) {
            return Err(PuzzleError::config(format!(
                "grid size must be between {MIN_SIZE} and {MAX_SIZE}; got {}",
                self.size,
            )));
        }
        Ok(())
    }
}
