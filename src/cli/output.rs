//! Output formatting utilities for CLI.

use coil::tournament::MatchResult;
use coil::{BoardState, Ruleset, TeamRuleset};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt::Write;

/// Label used for snakes without a team entry.
const NO_TEAM: &str = "<no team>";

/// JSON-serializable board status.
#[derive(Debug, Serialize)]
pub(super) struct JsonStatus {
    /// Turn of the inspected board.
    turn: u32,
    /// Whether the match is over.
    game_over: bool,
    /// Teams that still have living snakes.
    living_teams: Vec<JsonLivingTeam>,
}

/// A team with its living members.
#[derive(Debug, Serialize)]
struct JsonLivingTeam {
    /// Team name (null for snakes without a team).
    team: Option<String>,
    /// Living snakes on the team.
    snakes: Vec<String>,
}

impl JsonStatus {
    /// Inspect `board` under `ruleset`.
    pub(super) fn new(board: &BoardState, ruleset: &TeamRuleset) -> Self {
        let living_teams = ruleset
            .living_teams(board)
            .into_iter()
            .map(|team| JsonLivingTeam {
                team: team.cloned(),
                snakes: board
                    .living_snakes()
                    .filter(|s| ruleset.teams.team_of(&s.id) == team)
                    .map(|s| s.id.clone())
                    .collect(),
            })
            .collect();

        Self {
            turn: board.turn,
            game_over: ruleset.is_game_over(board),
            living_teams,
        }
    }
}

/// Format a board status as human-readable text.
pub(super) fn format_status_text(status: &JsonStatus) -> String {
    let mut output = String::new();

    let state = if status.game_over { "game over" } else { "in progress" };
    let _ = writeln!(output, "Turn {}: {state}", status.turn);

    if status.living_teams.is_empty() {
        output.push_str("  No living snakes\n");
    }
    for team in &status.living_teams {
        let name = team.team.as_deref().unwrap_or(NO_TEAM);
        let _ = writeln!(output, "  {name}: {}", team.snakes.join(", "));
    }

    output
}

/// Format a match result as human-readable text.
pub(super) fn format_match_text(result: &MatchResult) -> String {
    let mut output = String::new();

    let _ = writeln!(output, "Match Result (seed: {})", result.seed);
    match &result.winner {
        Some(winner) => {
            let _ = writeln!(output, "  Winner: {winner}");
        }
        None => output.push_str("  Winner: Draw\n"),
    }
    let _ = writeln!(output, "  Turns: {}", result.turns_played);
    let _ = writeln!(output, "  Survivors: {}\n", result.survivors.join(", "));

    for record in &result.eliminations {
        let _ = write!(
            output,
            "  Turn {}: {} eliminated ({:?})",
            record.turn, record.snake, record.cause
        );
        if let Some(by) = &record.by {
            let _ = write!(output, " by {by}");
        }
        output.push('\n');
    }

    output
}

/// Tournament statistics for aggregated results.
#[derive(Debug, Default)]
pub(super) struct TournamentStats {
    /// Total matches played to completion.
    pub(super) games_played: u64,
    /// Win count per team (or lone unteamed snake).
    wins: BTreeMap<String, u64>,
    /// Draw count.
    draws: u64,
    /// Matches aborted by a rules error.
    failures: u64,
    /// Total turns across all matches.
    total_turns: u64,
}

impl TournamentStats {
    /// Add a match result to the stats.
    pub(super) fn add_result(&mut self, result: &MatchResult) {
        self.games_played += 1;
        self.total_turns += u64::from(result.turns_played);

        match &result.winner {
            Some(winner) => *self.wins.entry(winner.clone()).or_default() += 1,
            None => self.draws += 1,
        }
    }

    /// Count a match that was aborted.
    pub(super) fn add_failure(&mut self) {
        self.failures += 1;
    }

    /// Merge another thread's stats into these.
    pub(super) fn merge(&mut self, other: &Self) {
        self.games_played += other.games_played;
        self.draws += other.draws;
        self.failures += other.failures;
        self.total_turns += other.total_turns;
        for (winner, wins) in &other.wins {
            *self.wins.entry(winner.clone()).or_default() += wins;
        }
    }

    /// Get win rate for a winner (0.0-1.0).
    fn win_rate(&self, wins: u64) -> f64 {
        if self.games_played == 0 {
            return 0.0;
        }
        wins as f64 / self.games_played as f64
    }

    /// Get average match length.
    fn avg_turns(&self) -> f64 {
        if self.games_played == 0 {
            return 0.0;
        }
        self.total_turns as f64 / self.games_played as f64
    }
}

/// JSON-serializable tournament result.
#[derive(Debug, Serialize)]
pub(super) struct JsonTournamentResult {
    /// Total matches played.
    games_played: u64,
    /// Per-winner statistics.
    winners: Vec<JsonTournamentWinner>,
    /// Number of draws.
    draws: u64,
    /// Number of aborted matches.
    failures: u64,
    /// Average match length in turns.
    avg_turns: f64,
}

/// JSON-serializable per-winner tournament stats.
#[derive(Debug, Serialize)]
struct JsonTournamentWinner {
    /// Team or snake name.
    winner: String,
    /// Number of wins.
    wins: u64,
    /// Win rate (0.0-1.0).
    win_rate: f64,
}

impl JsonTournamentResult {
    /// Create from stats.
    pub(super) fn from_stats(stats: &TournamentStats) -> Self {
        let winners = stats
            .wins
            .iter()
            .map(|(winner, &wins)| JsonTournamentWinner {
                winner: winner.clone(),
                wins,
                win_rate: stats.win_rate(wins),
            })
            .collect();

        Self {
            games_played: stats.games_played,
            winners,
            draws: stats.draws,
            failures: stats.failures,
            avg_turns: stats.avg_turns(),
        }
    }
}

/// Format tournament stats as human-readable text.
pub(super) fn format_tournament_text(stats: &TournamentStats) -> String {
    let mut output = String::new();

    let _ = writeln!(output, "Tournament Results ({} matches)", stats.games_played);
    output.push_str("========================================\n\n");

    output.push_str("Win Rates:\n");
    for (winner, &wins) in &stats.wins {
        let _ = writeln!(
            output,
            "  {winner}: {:.1}% ({wins} wins)",
            stats.win_rate(wins) * 100.0
        );
    }
    let _ = writeln!(
        output,
        "  Draws: {} ({:.1}%)",
        stats.draws,
        stats.win_rate(stats.draws) * 100.0
    );
    if stats.failures > 0 {
        let _ = writeln!(output, "  Aborted: {}", stats.failures);
    }

    let _ = writeln!(output, "\nAverage Match Length: {:.0} turns", stats.avg_turns());

    output
}

/// Format tournament stats as CSV.
pub(super) fn format_tournament_csv(stats: &TournamentStats) -> String {
    let mut output = String::new();

    output.push_str("winner,wins,win_rate\n");
    for (winner, &wins) in &stats.wins {
        let _ = writeln!(output, "{winner},{wins},{:.4}", stats.win_rate(wins));
    }
    let _ = writeln!(output, "draw,{},{:.4}", stats.draws, stats.win_rate(stats.draws));

    output
}
