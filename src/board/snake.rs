//! Snake state management.

use serde::{Deserialize, Serialize};

use crate::board::Point;

/// Unique identifier for a snake, stable across turns.
pub type SnakeId = String;

/// Health a snake is restored to when it eats.
pub const SNAKE_MAX_HEALTH: i32 = 100;

/// Why a snake is no longer alive.
///
/// Serialized with the names used on the wire by snake game servers, so
/// board states can be exchanged with other tools unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum EliminationCause {
    /// Still alive.
    #[default]
    #[serde(rename = "")]
    NotEliminated,
    /// Ran its head into another snake's body.
    #[serde(rename = "snake-collision")]
    Collision,
    /// Ran its head into its own body.
    #[serde(rename = "snake-self-collision")]
    SelfCollision,
    /// Lost a head-to-head collision.
    #[serde(rename = "head-collision")]
    HeadToHeadCollision,
    /// Health reached zero.
    #[serde(rename = "out-of-health")]
    OutOfHealth,
    /// Moved off the board.
    #[serde(rename = "wall-collision")]
    OutOfBounds,
    /// Eliminated because a teammate was eliminated.
    #[serde(rename = "team-eliminated")]
    Team,
}

/// State for a single snake.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snake {
    /// Unique identifier for this snake.
    pub id: SnakeId,
    /// Body segments, head first.
    pub body: Vec<Point>,
    /// Remaining health.
    pub health: i32,
    /// Why the snake was eliminated, if it was.
    #[serde(default)]
    pub eliminated_cause: EliminationCause,
    /// The snake responsible for the elimination, when attributable.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub eliminated_by: Option<SnakeId>,
}

impl Snake {
    /// Create a new living snake.
    #[must_use]
    pub fn new(id: impl Into<SnakeId>, body: Vec<Point>, health: i32) -> Self {
        Self {
            id: id.into(),
            body,
            health,
            eliminated_cause: EliminationCause::NotEliminated,
            eliminated_by: None,
        }
    }

    /// The head segment, if the snake has a body.
    #[must_use]
    pub fn head(&self) -> Option<Point> {
        self.body.first().copied()
    }

    /// Number of body segments.
    #[must_use]
    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Whether the snake has no body segments.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    /// Whether the snake has been eliminated for any reason.
    #[must_use]
    pub fn is_eliminated(&self) -> bool {
        self.eliminated_cause != EliminationCause::NotEliminated
    }

    /// The recorded culprit. An empty id counts as no culprit.
    #[must_use]
    pub fn culprit(&self) -> Option<&str> {
        self.eliminated_by.as_deref().filter(|id| !id.is_empty())
    }

    /// Eliminate this snake.
    pub fn eliminate(&mut self, cause: EliminationCause, by: Option<SnakeId>) {
        self.eliminated_cause = cause;
        self.eliminated_by = by;
    }

    /// Bring this snake back to life, clearing any culprit.
    pub fn revive(&mut self) {
        self.eliminated_cause = EliminationCause::NotEliminated;
        self.eliminated_by = None;
    }

    /// Grow by exactly one segment by duplicating the tail.
    ///
    /// The new segment separates from the tail on the next move. Health is
    /// left untouched. A snake without a body cannot grow.
    pub fn grow(&mut self) {
        if let Some(&tail) = self.body.last() {
            self.body.push(tail);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snake() -> Snake {
        Snake::new("s1", vec![Point::new(1, 1), Point::new(1, 0)], 50)
    }

    #[test]
    fn test_snake_creation() {
        let s = snake();
        assert_eq!(s.id, "s1");
        assert_eq!(s.head(), Some(Point::new(1, 1)));
        assert_eq!(s.len(), 2);
        assert!(!s.is_eliminated());
        assert_eq!(s.culprit(), None);
    }

    #[test]
    fn test_grow_duplicates_tail() {
        let mut s = snake();
        s.grow();
        assert_eq!(s.len(), 3);
        assert_eq!(s.body[2], Point::new(1, 0));
        assert_eq!(s.health, 50);
    }

    #[test]
    fn test_grow_empty_is_noop() {
        let mut s = Snake::new("s1", Vec::new(), 50);
        s.grow();
        assert!(s.is_empty());
    }

    #[test]
    fn test_eliminate_and_revive() {
        let mut s = snake();
        s.eliminate(EliminationCause::Collision, Some("s2".to_string()));
        assert!(s.is_eliminated());
        assert_eq!(s.culprit(), Some("s2"));

        s.revive();
        assert!(!s.is_eliminated());
        assert_eq!(s.eliminated_by, None);
    }

    #[test]
    fn test_empty_culprit_is_none() {
        let mut s = snake();
        s.eliminate(EliminationCause::Collision, Some(String::new()));
        assert_eq!(s.culprit(), None);
    }

    #[test]
    fn test_cause_wire_names() {
        let mut s = snake();
        s.eliminate(EliminationCause::Team, None);
        let json = serde_json::to_value(&s).unwrap();
        assert_eq!(json["eliminated_cause"], "team-eliminated");
        assert!(json.get("eliminated_by").is_none());

        let alive: Snake =
            serde_json::from_str(r#"{"id":"a","body":[{"x":0,"y":0}],"health":3}"#).unwrap();
        assert_eq!(alive.eliminated_cause, EliminationCause::NotEliminated);
    }
}
