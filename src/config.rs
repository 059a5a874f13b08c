//! Match configuration loaded from JSON.
//!
//! ```json
//! {
//!   "width": 11,
//!   "height": 11,
//!   "max_turns": 500,
//!   "snakes": ["s1", "s2", "s3", "s4"],
//!   "teams": { "s1": "red", "s2": "red", "s3": "blue", "s4": "blue" },
//!   "team_rules": { "allow_body_collisions": true, "shared_health": true },
//!   "standard": { "food_spawn_chance": 15, "minimum_food": 1 }
//! }
//! ```
//!
//! Every field is optional; missing sections fall back to their defaults.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::board::{MAX_BOARD_SIZE, SnakeId};
use crate::rules::{StandardRuleset, StandardSettings, TeamMap, TeamRuleset, TeamSettings};

/// Errors raised while loading a configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("failed to read {}: {source}", path.display())]
    Io {
        /// Path of the configuration file.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },
    /// The file is not valid configuration JSON.
    #[error("invalid configuration JSON: {0}")]
    Json(#[from] serde_json::Error),
    /// The configuration parsed but is inconsistent.
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// Configuration of a match and the rules it is played under.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Board width (default: 11).
    pub width: u32,
    /// Board height (default: 11).
    pub height: u32,
    /// Maximum turns before the match ends undecided (default: 500).
    pub max_turns: u32,
    /// Snakes taking part, in stored order.
    pub snakes: Vec<SnakeId>,
    /// Team membership.
    pub teams: TeamMap,
    /// Enabled team features.
    pub team_rules: TeamSettings,
    /// Standard ruleset parameters.
    pub standard: StandardSettings,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            width: 11,
            height: 11,
            max_turns: 500,
            snakes: Vec::new(),
            teams: TeamMap::new(),
            team_rules: TeamSettings::default(),
            standard: StandardSettings::default(),
        }
    }
}

impl GameConfig {
    /// Load and validate a configuration file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, is not valid JSON, or
    /// fails validation.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&text)
    }

    /// Parse and validate a configuration from JSON text.
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not valid JSON or fails validation.
    pub fn parse(text: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Check the configuration for consistency.
    ///
    /// Team entries for snakes that are not listed are allowed, since the
    /// same team map may be reused for boards loaded from elsewhere, but
    /// they are logged.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] for a zero-sized or oversized board,
    /// or for empty or duplicated snake ids.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width == 0 || self.height == 0 {
            return Err(ConfigError::Invalid(format!(
                "board dimensions must be > 0, got {}x{}",
                self.width, self.height
            )));
        }
        if self.width > MAX_BOARD_SIZE || self.height > MAX_BOARD_SIZE {
            return Err(ConfigError::Invalid(format!(
                "board dimensions must be at most {MAX_BOARD_SIZE}, got {}x{}",
                self.width, self.height
            )));
        }

        let mut seen = HashSet::new();
        for id in &self.snakes {
            if id.is_empty() {
                return Err(ConfigError::Invalid("snake ids must not be empty".to_string()));
            }
            if !seen.insert(id.as_str()) {
                return Err(ConfigError::Invalid(format!("duplicate snake id {id}")));
            }
        }

        if !self.snakes.is_empty() {
            for (snake, team) in self.teams.iter() {
                if !seen.contains(snake.as_str()) {
                    tracing::warn!(snake = %snake, team = %team, "team entry for unknown snake");
                }
            }
        }

        Ok(())
    }

    /// Build the ruleset described by this configuration.
    #[must_use]
    pub fn ruleset(&self, seed: u64) -> TeamRuleset<StandardRuleset> {
        TeamRuleset::new(
            StandardRuleset::new(self.standard, seed),
            self.teams.clone(),
            self.team_rules,
        )
    }
}
