//! Scoring: pure evaluation of a selected hand.
//!
//! - `ScoringEngine`: selection + modifiers -> score, heat, label
//! - `ScoringContext`: owned advisors and the live market event
//! - `modifiers`: per-card yield adjustment and the rounding policy

pub mod engine;
pub mod modifiers;

pub use engine::{
    HandLabel, ScoreResult, ScoringContext, ScoringEngine, RALLY_GROUP_SIZE, RALLY_MULTIPLIER,
};
pub use modifiers::{adjusted_yield, round_half_away};
