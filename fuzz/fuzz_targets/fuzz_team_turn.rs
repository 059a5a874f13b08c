#![no_main]

//! Team turn fuzzer.
//!
//! Builds an arbitrary board, team assignment and feature set, then runs a
//! few turns through the team ruleset. Checks that:
//! 1. No turn panics
//! 2. Every error is one the team passes are allowed to raise
//! 3. Teammates never stay eliminated by each other's bodies
//! 4. Living snakes never hold health above the maximum

use arbitrary::Arbitrary;
use coil::rules::StandardSettings;
use coil::{
    BoardState, Direction, EliminationCause, Point, RulesError, Ruleset, Snake, SnakeMove,
    StandardRuleset, TeamMap, TeamRuleset, TeamSettings,
};
use libfuzzer_sys::fuzz_target;

/// A fuzzer-generated snake.
#[derive(Arbitrary, Debug)]
struct FuzzSnake {
    /// Body segments as raw coordinates.
    body: Vec<(i8, i8)>,
    /// Starting health.
    health: i8,
    /// Team index (`None` for no team).
    team: Option<u8>,
    /// Whether the snake starts eliminated by collision.
    collided_with: Option<u8>,
}

/// Structured input for team turn fuzzing.
#[derive(Arbitrary, Debug)]
struct TeamTurnInput {
    /// Board width and height.
    size: (u8, u8),
    /// Snakes on the board.
    snakes: Vec<FuzzSnake>,
    /// Moves per turn, indexed by snake.
    moves: Vec<Vec<u8>>,
    /// Feature switches.
    flags: (bool, bool, bool, bool),
    /// RNG seed for food.
    seed: u64,
}

const DIRECTIONS: [Direction; 4] = Direction::ALL;

fuzz_target!(|input: TeamTurnInput| {
    let width = u32::from(input.size.0 % 20).max(1);
    let height = u32::from(input.size.1 % 20).max(1);

    let mut teams = TeamMap::new();
    let snakes: Vec<Snake> = input
        .snakes
        .iter()
        .take(8)
        .enumerate()
        .map(|(i, s)| {
            let id = format!("s{i}");
            if let Some(team) = s.team {
                teams.insert(id.clone(), format!("t{}", team % 3));
            }
            let body = s
                .body
                .iter()
                .take(12)
                .map(|&(x, y)| Point::new(i32::from(x), i32::from(y)))
                .collect();
            let mut snake = Snake::new(id, body, i32::from(s.health).min(100));
            if let Some(culprit) = s.collided_with {
                snake.eliminate(EliminationCause::Collision, Some(format!("s{}", culprit % 8)));
            }
            snake
        })
        .collect();
    let count = snakes.len();

    let settings = TeamSettings {
        allow_body_collisions: input.flags.0,
        shared_elimination: input.flags.1,
        shared_health: input.flags.2,
        shared_length: input.flags.3,
    };
    let standard = StandardRuleset::new(StandardSettings::default(), input.seed);
    let rules = TeamRuleset::new(standard, teams.clone(), settings);

    let mut board = BoardState::new(width, height, snakes);
    for turn_moves in input.moves.iter().take(10) {
        let moves: Vec<SnakeMove> = (0..count)
            .map(|i| {
                let pick = turn_moves.get(i).copied().unwrap_or(0);
                SnakeMove::new(format!("s{i}"), DIRECTIONS[usize::from(pick % 4)])
            })
            .collect();

        let next = match rules.create_next_board_state(&board, &moves) {
            Ok(next) => next,
            Err(RulesError::ZeroLengthSnake { .. } | RulesError::MissingCulprit { .. }) => return,
            Err(err) => panic!("unexpected error: {err}"),
        };

        for snake in next.living_snakes() {
            assert!(snake.health <= 100, "{} health {}", snake.id, snake.health);
        }
        if settings.allow_body_collisions {
            for snake in &next.snakes {
                if snake.eliminated_cause == EliminationCause::Collision {
                    let culprit = snake.culprit().unwrap_or_default();
                    assert!(
                        culprit == snake.id || !teams.same_team(&snake.id, culprit),
                        "{} left eliminated by teammate {culprit}",
                        snake.id
                    );
                }
            }
        }

        if rules.is_game_over(&next) {
            return;
        }
        board = next;
    }
});
