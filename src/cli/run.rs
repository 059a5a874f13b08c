//! Run command implementation.

use super::output::format_match_text;
use super::{CliError, OutputFormat, resolve_seed};
use coil::GameConfig;
use coil::tournament::run_match;
use std::path::Path;

/// Execute the run command.
///
/// # Errors
///
/// Returns an error if the configuration is invalid or the match fails.
pub(crate) fn execute(
    config: &Path,
    seed: Option<u64>,
    turns: Option<u32>,
    format: OutputFormat,
    quiet: bool,
) -> Result<(), CliError> {
    let mut config = GameConfig::load(config)?;
    if let Some(turns) = turns {
        config.max_turns = turns;
    }

    let seed = resolve_seed(seed);

    if !quiet && format == OutputFormat::Text {
        println!("Running match with seed {seed}...");
        println!("Snakes: {}", config.snakes.join(", "));
        println!();
    }

    let result = run_match(seed, &config)?;

    match format {
        OutputFormat::Text => print!("{}", format_match_text(&result)),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&result)?),
    }

    Ok(())
}
