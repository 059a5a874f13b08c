//! Advance command implementation.

use super::{CliError, load_config, read_board, read_json};
use coil::{Ruleset, SnakeMove};
use std::path::Path;

/// Execute the advance command.
///
/// # Errors
///
/// Returns an error if an input cannot be read or the turn is aborted.
pub(crate) fn execute(
    state: &Path,
    moves: &Path,
    config: Option<&Path>,
    seed: u64,
) -> Result<(), CliError> {
    let board = read_board(state)?;
    let moves: Vec<SnakeMove> = read_json(moves)?;
    for mv in &moves {
        if board.get_snake(&mv.id).is_none() {
            tracing::warn!(snake = %mv.id, "move for a snake not on the board");
        }
    }
    let config = load_config(config)?;

    let ruleset = config.ruleset(seed);
    let next = ruleset.create_next_board_state(&board, &moves)?;

    println!("{}", serde_json::to_string_pretty(&next)?);
    Ok(())
}
