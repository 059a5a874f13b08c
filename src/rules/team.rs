//! Team rules layered on top of another ruleset.
//!
//! After the base ruleset advances the board, two passes correct it:
//! 1. Resurrection undoes body collisions between teammates
//! 2. Sharing spreads health, length and elimination across each team
//!
//! The match ends when at most one team still has living snakes.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::board::{BoardState, EliminationCause, Snake, SnakeId, SnakeMove};
use crate::error::{RulesError, RulesResult};
use crate::rules::{Ruleset, StandardRuleset};

/// Identifier of a team.
pub type TeamId = String;

/// Assignment of snakes to teams.
///
/// Membership is a total function: snakes without an entry belong to the
/// implicit "no team", and two such snakes count as teammates.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TeamMap(BTreeMap<SnakeId, TeamId>);

impl TeamMap {
    /// Create an empty team map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Assign `snake` to `team`, returning its previous team.
    pub fn insert(&mut self, snake: impl Into<SnakeId>, team: impl Into<TeamId>) -> Option<TeamId> {
        self.0.insert(snake.into(), team.into())
    }

    /// The team of `snake`, or `None` if it has no entry.
    ///
    /// An entry naming the empty team is the same as no entry.
    #[must_use]
    pub fn team_of(&self, snake: &str) -> Option<&TeamId> {
        self.0.get(snake).filter(|team| !team.is_empty())
    }

    /// Whether two snakes are on the same team.
    #[must_use]
    pub fn same_team(&self, snake: &str, other: &str) -> bool {
        self.team_of(snake) == self.team_of(other)
    }

    /// Iterate over `(snake, team)` entries in snake order.
    pub fn iter(&self) -> impl Iterator<Item = (&SnakeId, &TeamId)> {
        self.0.iter()
    }
}

impl<S: Into<SnakeId>, T: Into<TeamId>> FromIterator<(S, T)> for TeamMap {
    fn from_iter<I: IntoIterator<Item = (S, T)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(snake, team)| (snake.into(), team.into()))
                .collect(),
        )
    }
}

/// Feature switches for team play.
///
/// Everything defaults to off, which makes [`TeamRuleset`] behave exactly
/// like the ruleset it wraps.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TeamSettings {
    /// Teammates may run into each other's bodies without dying.
    pub allow_body_collisions: bool,
    /// When one teammate is eliminated, the whole team is.
    pub shared_elimination: bool,
    /// Teammates share the highest health on the team.
    pub shared_health: bool,
    /// Teammates grow to the longest length on the team.
    pub shared_length: bool,
}

impl TeamSettings {
    /// Whether any attribute is shared across teams.
    #[must_use]
    pub const fn shares_attributes(&self) -> bool {
        self.shared_elimination || self.shared_health || self.shared_length
    }
}

/// A ruleset that corrects another ruleset's turns for team play.
#[derive(Debug, Clone, Default)]
pub struct TeamRuleset<R = StandardRuleset> {
    /// The ruleset that moves snakes and detects collisions.
    pub base: R,
    /// Team membership for this match.
    pub teams: TeamMap,
    /// Enabled team features.
    pub settings: TeamSettings,
}

impl<R: Ruleset> TeamRuleset<R> {
    /// Create a new team ruleset around `base`.
    #[must_use]
    pub const fn new(base: R, teams: TeamMap, settings: TeamSettings) -> Self {
        Self {
            base,
            teams,
            settings,
        }
    }

    /// Undo body-collision eliminations caused by a teammate.
    ///
    /// Self-inflicted collisions are never undone, even when the culprit is
    /// trivially on the same team.
    ///
    /// # Errors
    ///
    /// Returns [`RulesError::MissingCulprit`] if a snake was eliminated by
    /// collision without a recorded culprit.
    pub fn resurrect_team_body_collisions(&self, board: &mut BoardState) -> RulesResult<()> {
        if !self.settings.allow_body_collisions {
            return Ok(());
        }

        for snake in &mut board.snakes {
            if snake.eliminated_cause != EliminationCause::Collision {
                continue;
            }
            let Some(culprit) = snake.culprit() else {
                return Err(RulesError::MissingCulprit {
                    snake: snake.id.clone(),
                });
            };

            if culprit != snake.id && self.teams.same_team(&snake.id, culprit) {
                tracing::debug!(snake = %snake.id, culprit, "resurrected teammate collision");
                snake.revive();
            }
        }

        Ok(())
    }

    /// Share health, length and elimination across each team.
    ///
    /// Subjects are visited in stored order. Whether a subject is skipped is
    /// decided once, when it is visited: a subject eliminated by its team
    /// during its own pass keeps receiving health and length from the
    /// remaining teammates.
    ///
    /// # Errors
    ///
    /// Returns [`RulesError::ZeroLengthSnake`] if length sharing meets a
    /// teammate without a body.
    pub fn share_team_attributes(&self, board: &mut BoardState) -> RulesResult<()> {
        if !self.settings.shares_attributes() {
            return Ok(());
        }

        for subject_idx in 0..board.snakes.len() {
            let eliminated_at_visit = board.snakes[subject_idx].is_eliminated();
            if eliminated_at_visit {
                continue;
            }

            for peer_idx in 0..board.snakes.len() {
                if !self
                    .teams
                    .same_team(&board.snakes[subject_idx].id, &board.snakes[peer_idx].id)
                {
                    continue;
                }
                self.share_with_peer(board, subject_idx, peer_idx)?;
            }
        }

        Ok(())
    }

    /// Apply every enabled sharing rule from one peer to one subject.
    ///
    /// The peer's fields are read before the subject is written, so a subject
    /// compared against itself is left unchanged.
    fn share_with_peer(
        &self,
        board: &mut BoardState,
        subject_idx: usize,
        peer_idx: usize,
    ) -> RulesResult<()> {
        let peer = &board.snakes[peer_idx];
        let (peer_health, peer_len, peer_eliminated) =
            (peer.health, peer.len(), peer.is_eliminated());

        if self.settings.shared_length {
            let empty = if board.snakes[subject_idx].is_empty() {
                Some(subject_idx)
            } else if peer_len == 0 {
                Some(peer_idx)
            } else {
                None
            };
            if let Some(idx) = empty {
                return Err(RulesError::ZeroLengthSnake {
                    snake: board.snakes[idx].id.clone(),
                });
            }
        }

        let subject: &mut Snake = &mut board.snakes[subject_idx];

        if self.settings.shared_health && subject.health < peer_health {
            subject.health = peer_health;
        }

        if self.settings.shared_length && subject.len() < peer_len {
            tracing::debug!(snake = %subject.id, from = subject.len(), to = peer_len, "shared length");
            for _ in subject.len()..peer_len {
                self.base.grow_snake(subject);
            }
        }

        if self.settings.shared_elimination && !subject.is_eliminated() && peer_eliminated {
            tracing::debug!(snake = %subject.id, "eliminated with team");
            // Several teammates may be responsible, so no culprit is recorded.
            subject.eliminate(EliminationCause::Team, None);
        }

        Ok(())
    }

    /// Teams with at least one living snake, in order of first appearance.
    ///
    /// Snakes without a team entry are reported as `None`.
    #[must_use]
    pub fn living_teams(&self, board: &BoardState) -> Vec<Option<&TeamId>> {
        let mut teams = Vec::new();
        for snake in board.living_snakes() {
            let team = self.teams.team_of(&snake.id);
            if !teams.contains(&team) {
                teams.push(team);
            }
        }
        teams
    }
}

impl<R: Ruleset> Ruleset for TeamRuleset<R> {
    fn name(&self) -> &'static str {
        "team"
    }

    fn create_next_board_state(
        &self,
        prev: &BoardState,
        moves: &[SnakeMove],
    ) -> RulesResult<BoardState> {
        let mut next = self.base.create_next_board_state(prev, moves)?;
        self.resurrect_team_body_collisions(&mut next)?;
        self.share_team_attributes(&mut next)?;
        Ok(next)
    }

    fn grow_snake(&self, snake: &mut Snake) {
        self.base.grow_snake(snake);
    }

    /// The match is over once zero or one team has living snakes.
    fn is_game_over(&self, board: &BoardState) -> bool {
        let mut living = board.living_snakes();
        let Some(first) = living.next() else {
            return true;
        };
        living.all(|snake| self.teams.same_team(&snake.id, &first.id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Point;

    fn snake(id: &str, len: i32, health: i32) -> Snake {
        Snake::new(id, (0..len).map(|y| Point::new(0, y)).collect(), health)
    }

    fn red_red_blue() -> TeamMap {
        [("s1", "red"), ("s2", "red"), ("s3", "blue")]
            .into_iter()
            .collect()
    }

    fn rules(settings: TeamSettings) -> TeamRuleset {
        TeamRuleset::new(StandardRuleset::default(), red_red_blue(), settings)
    }

    fn all_sharing() -> TeamSettings {
        TeamSettings {
            allow_body_collisions: false,
            shared_elimination: true,
            shared_health: true,
            shared_length: true,
        }
    }

    #[test]
    fn test_team_map_membership() {
        let teams = red_red_blue();
        assert!(teams.same_team("s1", "s2"));
        assert!(!teams.same_team("s1", "s3"));
        assert!(teams.same_team("x", "y"));
        assert!(!teams.same_team("x", "s1"));
        assert_eq!(teams.team_of("s3").map(String::as_str), Some("blue"));
        assert_eq!(teams.iter().count(), 3);
    }

    #[test]
    fn test_empty_team_name_is_no_team() {
        let teams: TeamMap = [("a", ""), ("c", "red")].into_iter().collect();
        assert_eq!(teams.team_of("a"), None);
        assert!(teams.same_team("a", "b"));
        assert!(!teams.same_team("a", "c"));

        let board = BoardState::new(11, 11, vec![snake("a", 3, 50), snake("b", 3, 50)]);
        let rules = TeamRuleset::new(StandardRuleset::default(), teams, TeamSettings::default());
        assert!(rules.is_game_over(&board));
        assert_eq!(rules.living_teams(&board), vec![None]);
    }

    #[test]
    fn test_resurrect_empty_team_name_with_unmapped_culprit() {
        let teams: TeamMap = [("s1", "")].into_iter().collect();
        let mut board = BoardState::new(11, 11, vec![snake("s1", 3, 50), snake("s2", 3, 50)]);
        board.snakes[0].eliminate(EliminationCause::Collision, Some("s2".to_string()));

        let settings = TeamSettings {
            allow_body_collisions: true,
            ..TeamSettings::default()
        };
        let rules = TeamRuleset::new(StandardRuleset::default(), teams, settings);
        rules.resurrect_team_body_collisions(&mut board).unwrap();
        assert!(!board.snakes[0].is_eliminated());
    }

    #[test]
    fn test_resurrect_teammate_collision() {
        let mut board = BoardState::new(11, 11, vec![snake("s1", 3, 50), snake("s2", 3, 50)]);
        board.snakes[0].eliminate(EliminationCause::Collision, Some("s2".to_string()));

        let rules = rules(TeamSettings {
            allow_body_collisions: true,
            ..TeamSettings::default()
        });
        rules.resurrect_team_body_collisions(&mut board).unwrap();

        assert!(board.snakes.iter().all(|s| !s.is_eliminated()));
        assert_eq!(board.snakes[0].eliminated_by, None);
    }

    #[test]
    fn test_resurrect_skips_other_teams_and_self() {
        let mut board = BoardState::new(
            11,
            11,
            vec![snake("s1", 3, 50), snake("s2", 3, 50), snake("s3", 3, 50)],
        );
        board.snakes[0].eliminate(EliminationCause::Collision, Some("s3".to_string()));
        board.snakes[1].eliminate(EliminationCause::Collision, Some("s2".to_string()));
        board.snakes[2].eliminate(EliminationCause::HeadToHeadCollision, Some("s1".to_string()));

        let rules = rules(TeamSettings {
            allow_body_collisions: true,
            ..TeamSettings::default()
        });
        let before = board.clone();
        rules.resurrect_team_body_collisions(&mut board).unwrap();
        assert_eq!(board, before);
    }

    #[test]
    fn test_resurrect_disabled_is_noop() {
        let mut board = BoardState::new(11, 11, vec![snake("s1", 3, 50), snake("s2", 3, 50)]);
        board.snakes[0].eliminate(EliminationCause::Collision, None);

        let rules = rules(TeamSettings::default());
        assert!(rules.resurrect_team_body_collisions(&mut board).is_ok());
        assert!(board.snakes[0].is_eliminated());
    }

    #[test]
    fn test_resurrect_missing_culprit_fails() {
        let mut board = BoardState::new(11, 11, vec![snake("s1", 3, 50)]);
        board.snakes[0].eliminate(EliminationCause::Collision, None);

        let rules = rules(TeamSettings {
            allow_body_collisions: true,
            ..TeamSettings::default()
        });
        let err = rules.resurrect_team_body_collisions(&mut board).unwrap_err();
        assert_eq!(err, RulesError::MissingCulprit { snake: "s1".to_string() });
    }

    #[test]
    fn test_share_health_and_length() {
        let mut board = BoardState::new(
            11,
            11,
            vec![snake("s1", 2, 90), snake("s2", 5, 40), snake("s3", 7, 99)],
        );
        rules(all_sharing()).share_team_attributes(&mut board).unwrap();

        assert_eq!(board.snakes[0].health, 90);
        assert_eq!(board.snakes[1].health, 90);
        assert_eq!(board.snakes[0].len(), 5);
        assert_eq!(board.snakes[1].len(), 5);
        // Blue is alone and untouched
        assert_eq!(board.snakes[2].len(), 7);
        assert_eq!(board.snakes[2].health, 99);
    }

    #[test]
    fn test_share_elimination() {
        let mut board = BoardState::new(
            11,
            11,
            vec![snake("s1", 3, 50), snake("s2", 3, 50), snake("s3", 3, 50)],
        );
        board.snakes[1].eliminate(EliminationCause::OutOfHealth, None);

        rules(TeamSettings {
            shared_elimination: true,
            ..TeamSettings::default()
        })
        .share_team_attributes(&mut board)
        .unwrap();

        assert_eq!(board.snakes[0].eliminated_cause, EliminationCause::Team);
        assert_eq!(board.snakes[0].eliminated_by, None);
        assert_eq!(board.snakes[1].eliminated_cause, EliminationCause::OutOfHealth);
        assert!(!board.snakes[2].is_eliminated());
    }

    #[test]
    fn test_team_eliminated_subject_still_shares() {
        // s1 is eliminated by its team while comparing against s2, then still
        // picks up s3's health and length later in the same pass.
        let teams: TeamMap = [("s1", "red"), ("s2", "red"), ("s3", "red")]
            .into_iter()
            .collect();
        let mut board = BoardState::new(
            11,
            11,
            vec![snake("s1", 2, 10), snake("s2", 3, 20), snake("s3", 6, 80)],
        );
        board.snakes[1].eliminate(EliminationCause::OutOfBounds, None);

        TeamRuleset::new(StandardRuleset::default(), teams, all_sharing())
            .share_team_attributes(&mut board)
            .unwrap();

        assert_eq!(board.snakes[0].eliminated_cause, EliminationCause::Team);
        assert_eq!(board.snakes[0].health, 80);
        assert_eq!(board.snakes[0].len(), 6);
        // s3 was alive when visited and is eliminated through s2
        assert_eq!(board.snakes[2].eliminated_cause, EliminationCause::Team);
        // s2 was already eliminated when visited and receives nothing
        assert_eq!(board.snakes[1].health, 20);
        assert_eq!(board.snakes[1].len(), 3);
    }

    #[test]
    fn test_self_comparison_is_noop() {
        let teams = TeamMap::new();
        let mut board = BoardState::new(11, 11, vec![snake("solo", 4, 33)]);
        let before = board.clone();

        TeamRuleset::new(StandardRuleset::default(), teams, all_sharing())
            .share_team_attributes(&mut board)
            .unwrap();
        assert_eq!(board, before);
    }

    #[test]
    fn test_share_length_zero_length_fails() {
        let mut board = BoardState::new(11, 11, vec![snake("s1", 3, 50), snake("s2", 0, 50)]);
        board.snakes[1].eliminate(EliminationCause::OutOfHealth, None);

        let err = rules(TeamSettings {
            shared_length: true,
            ..TeamSettings::default()
        })
        .share_team_attributes(&mut board)
        .unwrap_err();
        assert_eq!(err, RulesError::ZeroLengthSnake { snake: "s2".to_string() });
    }

    #[test]
    fn test_game_over_by_team() {
        let rules = rules(TeamSettings::default());
        let mut board = BoardState::new(
            11,
            11,
            vec![snake("s1", 3, 50), snake("s2", 3, 50), snake("s3", 3, 50)],
        );
        assert!(!rules.is_game_over(&board));
        assert_eq!(rules.living_teams(&board).len(), 2);

        board.snakes[2].eliminate(EliminationCause::OutOfHealth, None);
        assert!(rules.is_game_over(&board));
        assert_eq!(
            rules.living_teams(&board),
            vec![Some(&"red".to_string())]
        );

        board.snakes[0].eliminate(EliminationCause::OutOfHealth, None);
        board.snakes[1].eliminate(EliminationCause::OutOfHealth, None);
        assert!(rules.is_game_over(&board));
        assert!(rules.living_teams(&board).is_empty());
    }

    #[test]
    fn test_game_over_single_unteamed_snake() {
        let rules = TeamRuleset::new(StandardRuleset::default(), TeamMap::new(), TeamSettings::default());
        let board = BoardState::new(11, 11, vec![snake("solo", 3, 50)]);
        assert!(rules.is_game_over(&board));
    }
}
