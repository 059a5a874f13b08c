//! Rulesets for coil.
//!
//! A ruleset advances a board by one turn and decides when the match is over:
//! - [`StandardRuleset`]: movement, food, starvation and collisions
//! - [`TeamRuleset`]: wraps another ruleset and corrects its output for teams

mod standard;
mod team;

pub use standard::{StandardRuleset, StandardSettings};
pub use team::{TeamId, TeamMap, TeamRuleset, TeamSettings};

pub(crate) use standard::spawn_food;

use crate::board::{BoardState, Snake, SnakeMove};
use crate::error::RulesResult;

/// A set of rules that turns one board state into the next.
pub trait Ruleset {
    /// Short name of the ruleset.
    fn name(&self) -> &'static str;

    /// Produce the board for the next turn.
    ///
    /// `prev` is left untouched; the returned board is a fresh value owned by
    /// the caller.
    ///
    /// # Errors
    ///
    /// Returns an error if the previous board breaks an invariant the
    /// ruleset relies on (for example a living snake without a body).
    fn create_next_board_state(
        &self,
        prev: &BoardState,
        moves: &[SnakeMove],
    ) -> RulesResult<BoardState>;

    /// Grow `snake` by exactly one segment without touching its health.
    fn grow_snake(&self, snake: &mut Snake) {
        snake.grow();
    }

    /// Check if the match is over.
    fn is_game_over(&self, board: &BoardState) -> bool;
}
