//! Board state management.

use serde::{Deserialize, Serialize};

use crate::board::{Direction, Point, Snake, SnakeId};

/// A move submitted by one snake for the next turn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnakeMove {
    /// The moving snake.
    pub id: SnakeId,
    /// Where it moves.
    #[serde(rename = "move")]
    pub direction: Direction,
}

impl SnakeMove {
    /// Create a new move.
    #[must_use]
    pub fn new(id: impl Into<SnakeId>, direction: Direction) -> Self {
        Self {
            id: id.into(),
            direction,
        }
    }
}

/// Largest supported board width or height.
///
/// Food placement and setup enumerate every cell, so larger boards are
/// rejected where they enter the crate.
pub const MAX_BOARD_SIZE: u32 = 1024;

/// Complete state of the board for one turn.
///
/// Snakes are kept in a fixed stored order; every ruleset iterates them in
/// that order so results are reproducible.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardState {
    /// Current turn number (0-indexed).
    #[serde(default)]
    pub turn: u32,
    /// Board width in cells.
    pub width: u32,
    /// Board height in cells.
    pub height: u32,
    /// Food on the board.
    #[serde(default)]
    pub food: Vec<Point>,
    /// All snakes, living or eliminated.
    pub snakes: Vec<Snake>,
}

impl BoardState {
    /// Create a board at turn 0 with no food.
    #[must_use]
    pub fn new(width: u32, height: u32, snakes: Vec<Snake>) -> Self {
        Self {
            turn: 0,
            width,
            height,
            food: Vec::new(),
            snakes,
        }
    }

    /// Whether both dimensions are within [`MAX_BOARD_SIZE`].
    #[must_use]
    pub const fn within_size_limit(&self) -> bool {
        self.width <= MAX_BOARD_SIZE && self.height <= MAX_BOARD_SIZE
    }

    /// Whether `point` lies on the board.
    #[must_use]
    pub fn contains(&self, point: Point) -> bool {
        u32::try_from(point.x).is_ok_and(|x| x < self.width)
            && u32::try_from(point.y).is_ok_and(|y| y < self.height)
    }

    /// Get a snake by ID.
    #[must_use]
    pub fn get_snake(&self, id: &str) -> Option<&Snake> {
        self.snakes.iter().find(|s| s.id == id)
    }

    /// Get all snakes that have not been eliminated.
    pub fn living_snakes(&self) -> impl Iterator<Item = &Snake> {
        self.snakes.iter().filter(|s| !s.is_eliminated())
    }

    /// Whether any living snake has a segment on `point`.
    #[must_use]
    pub fn is_occupied(&self, point: Point) -> bool {
        self.living_snakes().any(|s| s.body.contains(&point))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::EliminationCause;

    fn create_test_board() -> BoardState {
        BoardState::new(
            5,
            5,
            vec![
                Snake::new("a", vec![Point::new(0, 0), Point::new(0, 1)], 100),
                Snake::new("b", vec![Point::new(4, 4)], 100),
            ],
        )
    }

    #[test]
    fn test_size_limit() {
        assert!(BoardState::new(MAX_BOARD_SIZE, 1, Vec::new()).within_size_limit());
        assert!(!BoardState::new(1, MAX_BOARD_SIZE + 1, Vec::new()).within_size_limit());
        assert!(!BoardState::new(u32::MAX, u32::MAX, Vec::new()).within_size_limit());
    }

    #[test]
    fn test_contains() {
        let board = create_test_board();
        assert!(board.contains(Point::new(0, 0)));
        assert!(board.contains(Point::new(4, 4)));
        assert!(!board.contains(Point::new(5, 0)));
        assert!(!board.contains(Point::new(0, -1)));
    }

    #[test]
    fn test_living_snakes_and_occupancy() {
        let mut board = create_test_board();
        assert_eq!(board.living_snakes().count(), 2);
        assert!(board.is_occupied(Point::new(0, 1)));

        board.snakes[0].eliminate(EliminationCause::OutOfHealth, None);
        assert_eq!(board.living_snakes().count(), 1);
        assert!(!board.is_occupied(Point::new(0, 1)));
        assert_eq!(board.get_snake("b").map(|s| s.len()), Some(1));
    }

    #[test]
    fn test_move_wire_format() {
        let mv: SnakeMove = serde_json::from_str(r#"{"id":"a","move":"down"}"#).unwrap();
        assert_eq!(mv, SnakeMove::new("a", Direction::Down));
    }
}
