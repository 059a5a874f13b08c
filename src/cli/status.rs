//! Status command implementation.

use super::output::{JsonStatus, format_status_text};
use super::{CliError, OutputFormat, load_config, read_board};
use std::path::Path;

/// Execute the status command.
///
/// # Errors
///
/// Returns an error if an input cannot be read.
pub(crate) fn execute(
    state: &Path,
    config: Option<&Path>,
    format: OutputFormat,
) -> Result<(), CliError> {
    let board = read_board(state)?;
    let config = load_config(config)?;
    let ruleset = config.ruleset(0);

    let status = JsonStatus::new(&board, &ruleset);
    match format {
        OutputFormat::Text => print!("{}", format_status_text(&status)),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&status)?),
    }

    Ok(())
}
