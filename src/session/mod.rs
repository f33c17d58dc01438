//! Run-level control loop.
//!
//! - `GameSession`: owns the run, catalog and RNG streams
//! - `GamePhase`: main menu, round, draft or shop

pub mod game;

pub use game::{GamePhase, GameSession};
