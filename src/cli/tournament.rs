//! Tournament command implementation.

use super::output::{JsonTournamentResult, TournamentStats, format_tournament_csv, format_tournament_text};
use super::{CliError, TournamentFormat, resolve_seed};
use coil::GameConfig;
use coil::tournament::run_match;
use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;
use std::path::Path;
use std::time::Instant;

/// Execute the tournament command.
///
/// # Errors
///
/// Returns an error if the configuration is invalid.
pub(crate) fn execute(
    config: &Path,
    games: u64,
    seed: Option<u64>,
    threads: Option<usize>,
    format: TournamentFormat,
    progress: bool,
) -> Result<(), CliError> {
    let config = GameConfig::load(config)?;
    if config.snakes.is_empty() {
        return Err(CliError::new("configuration lists no snakes"));
    }

    // Set thread pool size if specified
    if let Some(num_threads) = threads {
        rayon::ThreadPoolBuilder::new()
            .num_threads(num_threads)
            .build_global()
            .ok(); // Ignore error if already initialized
    }

    let base_seed = resolve_seed(seed);

    let pb = if progress {
        let pb = ProgressBar::new(games);
        let style = ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} matches ({per_sec})")
            .map_err(|e| CliError::new(format!("Invalid progress template: {e}")))?
            .progress_chars("=>-");
        pb.set_style(style);
        Some(pb)
    } else {
        None
    };

    let start = Instant::now();

    // Each thread accumulates into its own TournamentStats, merged at the end
    let stats = (0..games)
        .into_par_iter()
        .fold(TournamentStats::default, |mut local_stats, i| {
            let match_seed = base_seed.wrapping_add(i);
            match run_match(match_seed, &config) {
                Ok(result) => local_stats.add_result(&result),
                Err(e) => {
                    tracing::warn!(seed = match_seed, error = %e, "match aborted");
                    local_stats.add_failure();
                }
            }
            if let Some(pb) = &pb {
                pb.inc(1);
            }
            local_stats
        })
        .reduce(TournamentStats::default, |mut a, b| {
            a.merge(&b);
            a
        });

    if let Some(pb) = pb {
        pb.finish_with_message("done");
    }

    let duration = start.elapsed();
    let games_per_sec = if duration.as_secs_f64() > 0.0 {
        stats.games_played as f64 / duration.as_secs_f64()
    } else {
        0.0
    };

    match format {
        TournamentFormat::Text => {
            println!();
            print!("{}", format_tournament_text(&stats));
            println!();
            println!(
                "Duration: {:.2}s ({:.0} matches/sec)",
                duration.as_secs_f64(),
                games_per_sec
            );
        }
        TournamentFormat::Json => {
            let json_result = JsonTournamentResult::from_stats(&stats);
            println!("{}", serde_json::to_string_pretty(&json_result)?);
        }
        TournamentFormat::Csv => {
            print!("{}", format_tournament_csv(&stats));
        }
    }

    Ok(())
}
