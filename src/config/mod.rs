//! Configuration loading and validation.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

/// Tournament schedule configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleConfig {
    /// Maximum number of players per match
    #[serde(default = "default_players_per_match")]
    pub players_per_match: usize,

    /// Number of rounds each player will play
    #[serde(default = "default_rounds")]
    pub rounds: u32,

    /// Estimated match length in minutes
    #[serde(default = "default_match_length")]
    pub match_length_minutes: u32,

    /// Break between rounds in minutes
    #[serde(default = "default_break_length")]
    pub break_length_minutes: u32,

    /// Start of the first match; the CLI resolves this to "now" when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_time: Option<NaiveDateTime>,

    /// Whether to compute betting odds
    #[serde(default = "default_odds")]
    pub odds: bool,

    /// RNG seed for reproducible schedules
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

fn default_players_per_match() -> usize {
    4
}

fn default_rounds() -> u32 {
    3
}

fn default_match_length() -> u32 {
    15
}

fn default_break_length() -> u32 {
    5
}

fn default_odds() -> bool {
    true
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            players_per_match: default_players_per_match(),
            rounds: default_rounds(),
            match_length_minutes: default_match_length(),
            break_length_minutes: default_break_length(),
            start_time: None,
            odds: default_odds(),
            seed: None,
        }
    }
}

impl ScheduleConfig {
    /// Load configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let config: ScheduleConfig = toml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.players_per_match == 0 {
            return Err(ConfigError::ValidationError(
                "players per match must be greater than 0".to_string(),
            ));
        }

        if self.match_length_minutes == 0 {
            return Err(ConfigError::ValidationError(
                "match length must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ScheduleConfig::default();

        assert_eq!(config.players_per_match, 4);
        assert_eq!(config.rounds, 3);
        assert_eq!(config.match_length_minutes, 15);
        assert_eq!(config.break_length_minutes, 5);
        assert!(config.start_time.is_none());
        assert!(config.odds);
        assert!(config.seed.is_none());
    }

    #[test]
    fn test_config_validation_ok() {
        let config = ScheduleConfig::default();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validation_bad_match_size() {
        let mut config = ScheduleConfig::default();
        config.players_per_match = 0;

        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_validation_bad_match_length() {
        let mut config = ScheduleConfig::default();
        config.match_length_minutes = 0;

        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_serialization() {
        let config = ScheduleConfig::default();
        let toml_str = toml::to_string(&config).unwrap();

        // Should be parseable
        let parsed: ScheduleConfig = toml::from_str(&toml_str).unwrap();
        assert_eq!(config.players_per_match, parsed.players_per_match);
        assert_eq!(config.rounds, parsed.rounds);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let parsed: ScheduleConfig = toml::from_str("rounds = 7\nseed = 42\n").unwrap();

        assert_eq!(parsed.rounds, 7);
        assert_eq!(parsed.seed, Some(42));
        assert_eq!(parsed.players_per_match, 4);
        assert!(parsed.odds);
    }

    #[test]
    fn test_start_time_round_trips() {
        let toml_str = "start_time = \"2026-08-01T18:00:00\"\n";
        let parsed: ScheduleConfig = toml::from_str(toml_str).unwrap();

        let start = parsed.start_time.unwrap();
        assert_eq!(start.to_string(), "2026-08-01 18:00:00");
    }
}
