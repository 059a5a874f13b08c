//! Board layer for coil.
//!
//! Plain data describing a single turn of a snake match:
//! - Points and movement directions on the grid
//! - Snakes with their bodies, health and elimination status
//! - The board state that rulesets advance from turn to turn

mod point;
mod snake;
mod state;

pub use point::{Direction, Point};
pub use snake::{EliminationCause, SNAKE_MAX_HEALTH, Snake, SnakeId};
pub use state::{BoardState, MAX_BOARD_SIZE, SnakeMove};
