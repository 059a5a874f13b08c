//! Coil CLI - Command-line interface for advancing and simulating team snake games.

// Allow print in the CLI binary
#![allow(clippy::print_stdout, clippy::print_stderr)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

mod cli;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Coil - Deterministic team rules for snake games
#[derive(Parser, Debug)]
#[command(name = "coil")]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
enum Commands {
    /// Advance a board state by one turn and print the next state as JSON
    Advance {
        /// Board state JSON file
        #[arg(short, long)]
        state: PathBuf,

        /// Moves JSON file (list of {"id", "move"})
        #[arg(short, long)]
        moves: PathBuf,

        /// Match configuration with teams and rules (default: standard rules)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Seed for food placement (default: 0)
        #[arg(long, default_value = "0")]
        seed: u64,
    },

    /// Report whether a board state ends the match
    Status {
        /// Board state JSON file
        #[arg(short, long)]
        state: PathBuf,

        /// Match configuration with teams and rules (default: standard rules)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Output format: text or json
        #[arg(short, long, default_value = "text")]
        format: cli::OutputFormat,
    },

    /// Simulate a single match with random movers
    Run {
        /// Match configuration
        #[arg(short, long)]
        config: PathBuf,

        /// Random seed (default: random)
        #[arg(short, long)]
        seed: Option<u64>,

        /// Maximum turns (default: from configuration)
        #[arg(short, long)]
        turns: Option<u32>,

        /// Output format: text or json
        #[arg(short, long, default_value = "text")]
        format: cli::OutputFormat,

        /// Suppress the header
        #[arg(short, long)]
        quiet: bool,
    },

    /// Run many matches in parallel and aggregate wins per team
    Tournament {
        /// Match configuration
        #[arg(short, long)]
        config: PathBuf,

        /// Number of matches to run (default: 1000)
        #[arg(short, long, default_value = "1000")]
        games: u64,

        /// Starting seed (increments for each match)
        #[arg(short, long)]
        seed: Option<u64>,

        /// Parallel threads (default: CPU count)
        #[arg(short = 'j', long)]
        threads: Option<usize>,

        /// Output format: text, json, or csv
        #[arg(short, long, default_value = "text")]
        format: cli::TournamentFormat,

        /// Show progress bar
        #[arg(short, long)]
        progress: bool,
    },
}

fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "coil=warn".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args = Args::parse();

    let result = match args.command {
        Commands::Advance {
            state,
            moves,
            config,
            seed,
        } => cli::advance::execute(&state, &moves, config.as_deref(), seed),

        Commands::Status {
            state,
            config,
            format,
        } => cli::status::execute(&state, config.as_deref(), format),

        Commands::Run {
            config,
            seed,
            turns,
            format,
            quiet,
        } => cli::run::execute(&config, seed, turns, format, quiet),

        Commands::Tournament {
            config,
            games,
            seed,
            threads,
            format,
            progress,
        } => cli::tournament::execute(&config, games, seed, threads, format, progress),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
