//! Move selection for simulated matches.

use crate::board::{BoardState, Direction, Snake, SnakeMove};
use crate::rng::Rng;

/// Chooses the moves of every living snake for the next turn.
pub trait MoveSource {
    /// One move per living snake on `board`.
    fn choose_moves(&mut self, board: &BoardState) -> Vec<SnakeMove>;
}

/// Picks uniformly among moves that stay on the board and avoid bodies.
///
/// When no such move exists the snake moves up.
#[derive(Debug, Clone, Copy)]
pub struct RandomMover {
    rng: Rng,
}

impl RandomMover {
    /// Create a mover with its own seeded stream.
    #[must_use]
    pub const fn new(seed: u64) -> Self {
        Self {
            rng: Rng::new(seed ^ 0xA5A5_A5A5_A5A5_A5A5),
        }
    }

    fn choose(&mut self, board: &BoardState, snake: &Snake) -> Direction {
        let Some(head) = snake.head() else {
            return Direction::Up;
        };

        let safe: Vec<Direction> = Direction::ALL
            .into_iter()
            .filter(|&dir| {
                let next = head.step(dir);
                board.contains(next) && !board.is_occupied(next)
            })
            .collect();

        if safe.is_empty() {
            Direction::Up
        } else {
            safe[self.rng.next_index(safe.len())]
        }
    }
}

impl MoveSource for RandomMover {
    fn choose_moves(&mut self, board: &BoardState) -> Vec<SnakeMove> {
        board
            .living_snakes()
            .map(|snake| SnakeMove::new(snake.id.clone(), self.choose(board, snake)))
            .collect()
    }
}
