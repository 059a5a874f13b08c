//! Deterministic board setup for matches.

use crate::board::{BoardState, MAX_BOARD_SIZE, Point, SNAKE_MAX_HEALTH, Snake, SnakeId};
use crate::rng::Rng;
use crate::rules::spawn_food;
use crate::tournament::TournamentError;

/// Segments every snake starts with, stacked on one cell.
pub const STARTING_LENGTH: usize = 3;

/// Create the starting board for a match.
///
/// Each snake starts coiled on a distinct random cell with full health, and
/// one food is placed per snake on the remaining cells.
///
/// # Errors
///
/// Returns an error if there are no snakes, the board exceeds
/// [`MAX_BOARD_SIZE`], or there are not enough cells for every snake and its
/// food.
pub fn create_board(
    seed: u64,
    width: u32,
    height: u32,
    snakes: &[SnakeId],
) -> Result<BoardState, TournamentError> {
    if snakes.is_empty() {
        return Err(TournamentError::TooFewSnakes(0));
    }
    if width > MAX_BOARD_SIZE || height > MAX_BOARD_SIZE {
        return Err(TournamentError::BoardTooLarge {
            width,
            height,
            max: MAX_BOARD_SIZE,
        });
    }

    let cells = u64::from(width) * u64::from(height);
    if cells < 2 * snakes.len() as u64 {
        return Err(TournamentError::BoardTooSmall {
            width,
            height,
            snakes: snakes.len(),
        });
    }

    let mut rng = Rng::new(seed);
    let mut free: Vec<Point> = (0..height)
        .flat_map(|y| (0..width).map(move |x| (x, y)))
        .filter_map(|(x, y)| Some(Point::new(i32::try_from(x).ok()?, i32::try_from(y).ok()?)))
        .collect();

    let mut placed = Vec::with_capacity(snakes.len());
    for id in snakes {
        let start = free.swap_remove(rng.next_index(free.len()));
        placed.push(Snake::new(
            id.clone(),
            vec![start; STARTING_LENGTH],
            SNAKE_MAX_HEALTH,
        ));
    }

    let mut board = BoardState::new(width, height, placed);
    spawn_food(&mut board, snakes.len(), &mut rng);
    Ok(board)
}
