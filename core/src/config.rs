// SPDX-License-Identifier: MIT OR Apache-2.0

//! Game configuration

use crate::{GameError, MAX_BOARD_SIZE, MIN_BOARD_SIZE};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Parameters fixed for the lifetime of a game
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    /// Playable size of the board
    #[serde(default = "default_board_size")]
    pub board_size: u8,
    /// Seed of the fingerprint key table
    #[serde(default)]
    pub zobrist_seed: u64,
}

/// TOML integers are signed 64-bit
const MAX_SEED: u64 = i64::MAX as u64;

fn default_board_size() -> u8 {
    19
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            board_size: default_board_size(),
            zobrist_seed: 0,
        }
    }
}

impl GameConfig {
    /// Config for a given board size with the default seed
    pub fn with_board_size(board_size: u8) -> Self {
        Self {
            board_size,
            ..Self::default()
        }
    }

    /// Reject sizes outside `5..=25` and seeds above `i64::MAX`
    pub fn validate(&self) -> Result<(), GameError> {
        if !(MIN_BOARD_SIZE..=MAX_BOARD_SIZE).contains(&self.board_size) {
            return Err(GameError::InvalidBoardSize(self.board_size));
        }
        if self.zobrist_seed > MAX_SEED {
            return Err(GameError::InvalidSeed(self.zobrist_seed));
        }
        Ok(())
    }

    /// Parse and validate a TOML document
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: GameConfig =
            toml::from_str(content).context("Failed to parse game config")?;
        config.validate().context("Invalid game config")?;
        Ok(config)
    }

    /// Serialize to a TOML document
    pub fn to_toml_string(&self) -> Result<String> {
        self.validate().context("Invalid game config")?;
        toml::to_string_pretty(self).context("Failed to serialize game config")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = GameConfig::default();
        assert_eq!(config.board_size, 19);
        assert_eq!(config.zobrist_seed, 0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let config = GameConfig::from_toml_str("board_size = 9").unwrap();
        assert_eq!(config, GameConfig::with_board_size(9));

        let config = GameConfig::from_toml_str("").unwrap();
        assert_eq!(config, GameConfig::default());
    }

    #[test]
    fn test_config_serialization() {
        let config = GameConfig {
            board_size: 13,
            zobrist_seed: 42,
        };
        let toml_str = config.to_toml_string().unwrap();
        assert_eq!(GameConfig::from_toml_str(&toml_str).unwrap(), config);
    }

    #[test]
    fn test_invalid_size_rejected() {
        assert!(GameConfig::from_toml_str("board_size = 30").is_err());
        assert!(GameConfig::from_toml_str("board_size = \"nine\"").is_err());
        assert_eq!(
            GameConfig::with_board_size(4).validate(),
            Err(GameError::InvalidBoardSize(4))
        );
    }

    #[test]
    fn test_seed_range() {
        let config = GameConfig {
            board_size: 9,
            zobrist_seed: i64::MAX as u64,
        };
        let toml_str = config.to_toml_string().unwrap();
        assert_eq!(GameConfig::from_toml_str(&toml_str).unwrap(), config);

        let too_large = GameConfig {
            board_size: 9,
            zobrist_seed: u64::MAX,
        };
        assert_eq!(too_large.validate(), Err(GameError::InvalidSeed(u64::MAX)));
        assert!(too_large.to_toml_string().is_err());
        assert!(GameConfig::from_toml_str("zobrist_seed = -1").is_err());
    }
}
