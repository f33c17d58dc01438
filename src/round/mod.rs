//! Round state machine.
//!
//! ## Key Types
//!
//! - `RoundController`: one round's deck, yield, charges and win/loss guard
//! - `RoundResolution`: terminal signal with final yield and next phase

pub mod controller;

pub use controller::{
    DiscardReport, LossCause, NextPhase, PlayReport, RoundController, RoundOutcome, RoundPhase,
    RoundResolution, RoundStatus,
};
