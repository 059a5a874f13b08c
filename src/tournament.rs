//! Match runner for coil.
//!
//! Provides a pure function interface: `(seed, config) -> MatchResult`
//!
//! The runner handles:
//! - Deterministic board setup
//! - Move selection for every living snake
//! - Advancing the board with the configured team ruleset
//! - Recording eliminations until the match is decided or the turn limit hits

mod mover;
mod setup;

pub use mover::{MoveSource, RandomMover};
pub use setup::{STARTING_LENGTH, create_board};

use serde::Serialize;
use thiserror::Error;

use crate::board::{BoardState, EliminationCause, SnakeId};
use crate::config::GameConfig;
use crate::error::RulesError;
use crate::rules::{Ruleset, TeamMap};

/// Error type for match operations.
#[derive(Error, Debug)]
pub enum TournamentError {
    /// A match needs at least one snake.
    #[error("too few snakes: {0} (minimum 1)")]
    TooFewSnakes(usize),
    /// The board has no room for every snake and its food.
    #[error("board {width}x{height} is too small for {snakes} snakes")]
    BoardTooSmall {
        /// Board width.
        width: u32,
        /// Board height.
        height: u32,
        /// Number of snakes requested.
        snakes: usize,
    },
    /// The board exceeds the supported size.
    #[error("board {width}x{height} exceeds the maximum of {max}")]
    BoardTooLarge {
        /// Board width.
        width: u32,
        /// Board height.
        height: u32,
        /// Largest supported dimension.
        max: u32,
    },
    /// A turn was aborted by the ruleset.
    #[error("rules error: {0}")]
    Rules(#[from] RulesError),
}

/// One elimination observed during a match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EliminationRecord {
    /// The eliminated snake.
    pub snake: SnakeId,
    /// Turn on which it was eliminated.
    pub turn: u32,
    /// Why it was eliminated.
    pub cause: EliminationCause,
    /// Culprit, when attributable.
    pub by: Option<SnakeId>,
}

/// Final result of a match.
#[derive(Debug, Clone, Serialize)]
pub struct MatchResult {
    /// The seed used for this match.
    pub seed: u64,
    /// The winning team, or the lone survivor when it has no team. `None`
    /// for a draw, an undecided match, or several survivors without a team.
    pub winner: Option<String>,
    /// Snakes alive at the end, in stored order.
    pub survivors: Vec<SnakeId>,
    /// Total turns played.
    pub turns_played: u32,
    /// Eliminations in the order they happened.
    pub eliminations: Vec<EliminationRecord>,
    /// Board after the last turn.
    pub final_state: BoardState,
}

/// Run a complete match with random movers.
///
/// # Determinism
///
/// Given the same seed and configuration, this function always produces
/// the same `MatchResult`.
///
/// # Errors
///
/// Returns an error if the board cannot be set up or a turn is aborted by
/// the ruleset.
pub fn run_match(seed: u64, config: &GameConfig) -> Result<MatchResult, TournamentError> {
    let ruleset = config.ruleset(seed);
    let board = create_board(seed, config.width, config.height, &config.snakes)?;
    let mut mover = RandomMover::new(seed);

    run_match_with(
        seed,
        board,
        &ruleset,
        &config.teams,
        &mut mover,
        config.max_turns,
    )
}

/// Run a match from `board` with an arbitrary ruleset and move source.
///
/// `teams` is only used to name the winner.
///
/// # Errors
///
/// Returns an error if a turn is aborted by the ruleset.
pub fn run_match_with<R: Ruleset, M: MoveSource>(
    seed: u64,
    mut board: BoardState,
    ruleset: &R,
    teams: &TeamMap,
    mover: &mut M,
    max_turns: u32,
) -> Result<MatchResult, TournamentError> {
    let mut eliminations = Vec::new();
    let mut turns_played = 0;

    while turns_played < max_turns && !ruleset.is_game_over(&board) {
        let moves = mover.choose_moves(&board);
        let next = ruleset.create_next_board_state(&board, &moves)?;

        for (before, after) in board.snakes.iter().zip(&next.snakes) {
            if !before.is_eliminated() && after.is_eliminated() {
                tracing::debug!(
                    snake = %after.id,
                    turn = next.turn,
                    cause = ?after.eliminated_cause,
                    "snake eliminated"
                );
                eliminations.push(EliminationRecord {
                    snake: after.id.clone(),
                    turn: next.turn,
                    cause: after.eliminated_cause,
                    by: after.eliminated_by.clone(),
                });
            }
        }

        board = next;
        turns_played += 1;
    }

    let survivors: Vec<SnakeId> = board.living_snakes().map(|s| s.id.clone()).collect();
    let winner = if ruleset.is_game_over(&board) {
        match survivors.as_slice() {
            [only] => Some(teams.team_of(only).unwrap_or(only).clone()),
            [first, ..] => teams.team_of(first).cloned(),
            [] => None,
        }
    } else {
        None
    };

    tracing::info!(seed, turns_played, winner = ?winner, "match finished");

    Ok(MatchResult {
        seed,
        winner,
        survivors,
        turns_played,
        eliminations,
        final_state: board,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Every snake on its own team, so the match plays like free-for-all.
    fn config(snakes: &[&str]) -> GameConfig {
        GameConfig {
            snakes: snakes.iter().map(ToString::to_string).collect(),
            teams: snakes.iter().map(|&s| (s, s)).collect(),
            max_turns: 200,
            ..GameConfig::default()
        }
    }

    #[test]
    fn test_unteamed_snakes_end_match_immediately() {
        let config = GameConfig {
            snakes: vec!["a".to_string(), "b".to_string()],
            ..GameConfig::default()
        };
        let result = run_match(3, &config).unwrap();
        assert_eq!(result.turns_played, 0);
        assert_eq!(result.winner, None);
        assert_eq!(result.survivors.len(), 2);
    }

    #[test]
    fn test_lone_unteamed_survivor_is_named() {
        let config = GameConfig {
            snakes: vec!["a".to_string(), "b".to_string()],
            teams: [("b", "blue")].into_iter().collect(),
            ..GameConfig::default()
        };
        let mut board = create_board(3, 11, 11, &config.snakes).unwrap();
        board.snakes[1].eliminate(EliminationCause::OutOfHealth, None);

        let result = run_match_with(
            3,
            board,
            &config.ruleset(3),
            &config.teams,
            &mut RandomMover::new(3),
            10,
        )
        .unwrap();
        assert_eq!(result.turns_played, 0);
        assert_eq!(result.winner.as_deref(), Some("a"));
    }

    #[test]
    fn test_several_unteamed_survivors_share_no_win() {
        let config = GameConfig {
            snakes: vec!["a".to_string(), "b".to_string(), "c".to_string()],
            teams: [("a", ""), ("c", "red")].into_iter().collect(),
            ..GameConfig::default()
        };
        let mut board = create_board(9, 11, 11, &config.snakes).unwrap();
        board.snakes[2].eliminate(EliminationCause::OutOfHealth, None);

        let result = run_match_with(
            9,
            board,
            &config.ruleset(9),
            &config.teams,
            &mut RandomMover::new(9),
            10,
        )
        .unwrap();
        assert_eq!(result.turns_played, 0);
        assert_eq!(result.survivors, vec!["a", "b"]);
        assert_eq!(result.winner, None);
    }

    #[test]
    fn test_run_match_deterministic() {
        let config = config(&["a", "b", "c"]);
        let first = run_match(7, &config).unwrap();
        let second = run_match(7, &config).unwrap();

        assert_eq!(first.turns_played, second.turns_played);
        assert_eq!(first.winner, second.winner);
        assert_eq!(first.eliminations, second.eliminations);
        assert_eq!(first.final_state, second.final_state);
    }

    #[test]
    fn test_run_match_respects_turn_limit() {
        let mut config = config(&["a", "b"]);
        config.max_turns = 3;
        let result = run_match(11, &config).unwrap();
        assert!(result.turns_played <= 3);
    }

    #[test]
    fn test_single_snake_is_over_immediately() {
        let result = run_match(1, &config(&["solo"])).unwrap();
        assert_eq!(result.turns_played, 0);
        assert_eq!(result.winner.as_deref(), Some("solo"));
    }

    #[test]
    fn test_no_snakes_rejected() {
        let err = run_match(1, &config(&[])).unwrap_err();
        assert!(matches!(err, TournamentError::TooFewSnakes(0)));
    }

    #[test]
    fn test_eliminations_are_recorded() {
        let config = config(&["a", "b", "c", "d"]);
        let result = run_match(5, &config).unwrap();

        let eliminated = result
            .final_state
            .snakes
            .iter()
            .filter(|s| s.is_eliminated())
            .count();
        assert_eq!(result.eliminations.len(), eliminated);
        assert_eq!(result.survivors.len() + eliminated, 4);
    }
}
