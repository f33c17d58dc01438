//! Round deck: piles, selection, play/discard and fusion.
//!
//! ## Key Types
//!
//! - `DeckState`: draw pile, hand, discard pile, selection for one round
//! - `Pile`: where an instance currently is
//! - `HandCharge` / `DiscardCharge`: tokens minted by the round controller
//! - `FusionRejection`: why a merge was refused

pub mod charge;
pub mod state;

pub use charge::{DiscardCharge, HandCharge};
pub use state::{
    DeckState, DeckView, DiscardedHand, DrawReport, Fusion, FusionRejection, Pile, PlayedHand,
    SelectOutcome,
};
