//! The standard single-snake ruleset.

// Board dimensions are converted to signed grid coordinates
#![allow(clippy::cast_possible_wrap)]

use serde::{Deserialize, Serialize};

use crate::board::{BoardState, EliminationCause, Point, SNAKE_MAX_HEALTH, Snake, SnakeId, SnakeMove};
use crate::error::{RulesError, RulesResult};
use crate::rng::Rng;
use crate::rules::Ruleset;

/// Tunable parameters of the standard ruleset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StandardSettings {
    /// Percent chance per turn of spawning one extra food (default: 15).
    pub food_spawn_chance: u32,
    /// Food is topped up to this amount every turn (default: 1).
    pub minimum_food: u32,
}

impl Default for StandardSettings {
    fn default() -> Self {
        Self {
            food_spawn_chance: 15,
            minimum_food: 1,
        }
    }
}

/// Movement, feeding, starvation and collision rules.
///
/// Food placement is driven by a seeded RNG, so the same seed, board and
/// moves always produce the same next board.
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardRuleset {
    /// Ruleset parameters.
    pub settings: StandardSettings,
    /// Seed for food placement.
    pub seed: u64,
}

impl StandardRuleset {
    /// Create a new standard ruleset.
    #[must_use]
    pub const fn new(settings: StandardSettings, seed: u64) -> Self {
        Self { settings, seed }
    }

    /// Move every living snake one step in its chosen direction.
    fn move_snakes(board: &mut BoardState, moves: &[SnakeMove]) -> RulesResult<()> {
        for snake in board.snakes.iter_mut().filter(|s| !s.is_eliminated()) {
            let Some(head) = snake.head() else {
                return Err(RulesError::ZeroLengthSnake {
                    snake: snake.id.clone(),
                });
            };
            let Some(mv) = moves.iter().find(|m| m.id == snake.id) else {
                return Err(RulesError::NoMoveFound {
                    snake: snake.id.clone(),
                });
            };

            snake.body.pop();
            snake.body.insert(0, head.step(mv.direction));
        }
        Ok(())
    }

    /// Every living snake loses one health per turn.
    fn reduce_snake_health(board: &mut BoardState) {
        for snake in board.snakes.iter_mut().filter(|s| !s.is_eliminated()) {
            snake.health -= 1;
        }
    }

    /// Feed snakes whose head landed on food and remove the eaten food.
    fn feed_snakes(&self, board: &mut BoardState) {
        let mut remaining = Vec::with_capacity(board.food.len());

        for food in std::mem::take(&mut board.food) {
            let mut eaten = false;
            for snake in board.snakes.iter_mut().filter(|s| !s.is_eliminated()) {
                if snake.head() == Some(food) {
                    snake.health = SNAKE_MAX_HEALTH;
                    self.grow_snake(snake);
                    eaten = true;
                }
            }
            if !eaten {
                remaining.push(food);
            }
        }

        board.food = remaining;
    }

    /// Top food up to the minimum, or roll for one extra piece.
    fn maybe_spawn_food(&self, board: &mut BoardState) {
        let mut rng = Rng::for_turn(self.seed, board.turn);
        let minimum = self.settings.minimum_food as usize;

        let count = if board.food.len() < minimum {
            minimum - board.food.len()
        } else if self.settings.food_spawn_chance > 0
            && rng.next_u32(100) < self.settings.food_spawn_chance
        {
            1
        } else {
            0
        };

        spawn_food(board, count, &mut rng);
    }

    /// Eliminate starved, out of bounds and colliding snakes.
    ///
    /// Collisions are only checked among snakes that survived starvation and
    /// walls, and are all collected before any of them is applied.
    fn eliminate_snakes(board: &mut BoardState) -> RulesResult<()> {
        let (width, height) = (board.width, board.height);

        for snake in board.snakes.iter_mut().filter(|s| !s.is_eliminated()) {
            let Some(head) = snake.head() else {
                return Err(RulesError::ZeroLengthSnake {
                    snake: snake.id.clone(),
                });
            };

            if snake.health <= 0 {
                snake.eliminate(EliminationCause::OutOfHealth, None);
            } else if !in_bounds(head, width, height) {
                snake.eliminate(EliminationCause::OutOfBounds, None);
            }
        }

        let mut eliminations: Vec<(usize, EliminationCause, SnakeId)> = Vec::new();

        for (idx, snake) in board.snakes.iter().enumerate() {
            if snake.is_eliminated() {
                continue;
            }
            let Some(head) = snake.head() else {
                continue;
            };

            if has_body_collided(head, snake) {
                eliminations.push((idx, EliminationCause::SelfCollision, snake.id.clone()));
                continue;
            }

            let mut others = board
                .snakes
                .iter()
                .filter(|other| !other.is_eliminated() && other.id != snake.id);

            if let Some(other) = others.clone().find(|other| has_body_collided(head, other)) {
                eliminations.push((idx, EliminationCause::Collision, other.id.clone()));
                continue;
            }

            if let Some(other) = others.find(|other| has_lost_head_to_head(snake, other)) {
                eliminations.push((idx, EliminationCause::HeadToHeadCollision, other.id.clone()));
            }
        }

        for (idx, cause, by) in eliminations {
            board.snakes[idx].eliminate(cause, Some(by));
        }

        Ok(())
    }
}

impl Ruleset for StandardRuleset {
    fn name(&self) -> &'static str {
        "standard"
    }

    fn create_next_board_state(
        &self,
        prev: &BoardState,
        moves: &[SnakeMove],
    ) -> RulesResult<BoardState> {
        let mut next = prev.clone();
        next.turn += 1;

        Self::move_snakes(&mut next, moves)?;
        Self::reduce_snake_health(&mut next);
        self.feed_snakes(&mut next);
        self.maybe_spawn_food(&mut next);
        Self::eliminate_snakes(&mut next)?;

        tracing::trace!(
            turn = next.turn,
            living = next.living_snakes().count(),
            "advanced standard turn"
        );

        Ok(next)
    }

    fn is_game_over(&self, board: &BoardState) -> bool {
        board.living_snakes().count() <= 1
    }
}

/// Place up to `count` food on free cells chosen by `rng`.
pub(crate) fn spawn_food(board: &mut BoardState, count: usize, rng: &mut Rng) {
    if count == 0 {
        return;
    }

    let mut free: Vec<Point> = (0..board.height as i32)
        .flat_map(|y| (0..board.width as i32).map(move |x| Point::new(x, y)))
        .filter(|&p| !board.is_occupied(p) && !board.food.contains(&p))
        .collect();

    for _ in 0..count {
        if free.is_empty() {
            break;
        }
        let idx = rng.next_index(free.len());
        board.food.push(free.swap_remove(idx));
    }
}

fn in_bounds(point: Point, width: u32, height: u32) -> bool {
    u32::try_from(point.x).is_ok_and(|x| x < width) && u32::try_from(point.y).is_ok_and(|y| y < height)
}

/// Whether `head` hits any segment of `other` except its head.
fn has_body_collided(head: Point, other: &Snake) -> bool {
    other.body.iter().skip(1).any(|&p| p == head)
}

/// Whether `snake` meets `other` head on and is not strictly longer.
fn has_lost_head_to_head(snake: &Snake, other: &Snake) -> bool {
    snake.head().is_some() && snake.head() == other.head() && snake.len() <= other.len()
}
