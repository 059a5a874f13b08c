// Allow unwrap in tests (test code is not production)
#![cfg_attr(test, allow(clippy::unwrap_used))]
//! Coil: deterministic team rules for multiplayer snake games.
//!
//! This crate layers team play on top of a standard snake ruleset:
//! - Teammates may pass through each other's bodies
//! - Health, length and elimination can be shared across a team
//! - A match ends when at most one team is still alive
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────┐
//! │     Match runner / tournaments      │
//! ├─────────────────────────────────────┤
//! │  TeamRuleset (resurrect, share)     │
//! ├─────────────────────────────────────┤
//! │  StandardRuleset (move, feed, kill) │
//! └─────────────────────────────────────┘
//! ```

pub mod board;
pub mod config;
pub mod error;
pub mod rules;
pub mod tournament;

mod rng;

pub use error::{RulesError, RulesResult};

// Re-export key types at crate root for convenience
pub use board::{BoardState, Direction, EliminationCause, Point, Snake, SnakeId, SnakeMove};
pub use config::GameConfig;
pub use rules::{Ruleset, StandardRuleset, TeamMap, TeamRuleset, TeamSettings};
