//! CLI command implementations for Coil.

pub(crate) mod advance;
pub(crate) mod run;
pub(crate) mod status;
pub(crate) mod tournament;

mod output;

use clap::ValueEnum;
use coil::board::MAX_BOARD_SIZE;
use coil::{BoardState, GameConfig};
use serde::de::DeserializeOwned;
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Output format for the `status` and `run` commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
    /// Human-readable text output.
    Text,
    /// Machine-readable JSON output.
    Json,
}

/// Output format for the `tournament` command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum TournamentFormat {
    /// Human-readable text output.
    Text,
    /// Machine-readable JSON output.
    Json,
    /// CSV format.
    Csv,
}

/// CLI error type.
#[derive(Debug, Error)]
#[error("{message}")]
pub(crate) struct CliError {
    message: String,
}

impl CliError {
    /// Create a new CLI error.
    pub(crate) fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl From<coil::config::ConfigError> for CliError {
    fn from(e: coil::config::ConfigError) -> Self {
        Self::new(e.to_string())
    }
}

impl From<coil::tournament::TournamentError> for CliError {
    fn from(e: coil::tournament::TournamentError) -> Self {
        Self::new(e.to_string())
    }
}

impl From<coil::RulesError> for CliError {
    fn from(e: coil::RulesError) -> Self {
        Self::new(format!("turn aborted: {e}"))
    }
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        Self::new(format!("JSON serialization failed: {e}"))
    }
}

/// Read and deserialize a JSON file.
fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, CliError> {
    let text = fs::read_to_string(path)
        .map_err(|e| CliError::new(format!("Failed to read {}: {e}", path.display())))?;
    serde_json::from_str(&text)
        .map_err(|e| CliError::new(format!("Failed to parse {}: {e}", path.display())))
}

/// Read a board state, rejecting boards too large to simulate.
fn read_board(path: &Path) -> Result<BoardState, CliError> {
    let board: BoardState = read_json(path)?;
    if !board.within_size_limit() {
        return Err(CliError::new(format!(
            "{}: board {}x{} exceeds the maximum of {MAX_BOARD_SIZE}",
            path.display(),
            board.width,
            board.height
        )));
    }
    Ok(board)
}

/// Load a configuration file, or the defaults when none is given.
fn load_config(path: Option<&Path>) -> Result<GameConfig, CliError> {
    match path {
        Some(path) => Ok(GameConfig::load(path)?),
        None => Ok(GameConfig::default()),
    }
}

/// Use the given seed or derive one from the clock.
fn resolve_seed(seed: Option<u64>) -> u64 {
    seed.unwrap_or_else(|| {
        use std::time::{SystemTime, UNIX_EPOCH};
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or(42)
    })
}
