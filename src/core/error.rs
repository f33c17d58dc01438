//! Error types.
//!
//! Every rejected operation leaves the run exactly as it was. The `Display`
//! text of each variant is short enough to show as a status line.
//!
//! Saturated selections and stalled draws are not errors; see
//! `SelectOutcome` and `DrawReport`.

use thiserror::Error;

use crate::cards::{AdvisorId, CardId, EventId, InstanceId};
use crate::deck::FusionRejection;
use crate::session::GamePhase;

/// Per-round resource that can run out.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Resource {
    /// Plays left this round.
    Hands,
    /// Discards left this round.
    Discards,
}

impl std::fmt::Display for Resource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Resource::Hands => write!(f, "market hours"),
            Resource::Discards => write!(f, "shreds"),
        }
    }
}

/// Failure of a run, round or shop operation.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum EngineError {
    #[error("insufficient funds: need ${needed}, have ${available}")]
    InsufficientFunds { needed: i64, available: i64 },

    #[error("no {0} remaining")]
    ResourceExhausted(Resource),

    #[error("fusion rejected: {0}")]
    InvalidFusion(FusionRejection),

    #[error("no cards selected")]
    EmptySelection,

    #[error("{0} is not in hand")]
    CardNotInHand(InstanceId),

    #[error("{0} is not in the deck")]
    CardNotOwned(CardId),

    #[error("{0} is not in the catalog")]
    UnknownCard(CardId),

    #[error("{0} is not in the catalog")]
    UnknownEvent(EventId),

    #[error("offer {0} is sold or does not exist")]
    OfferUnavailable(usize),

    #[error("{0} is already on the payroll")]
    AdvisorAlreadyOwned(AdvisorId),

    #[error("no round is in progress")]
    NoActiveRound,

    #[error("the round is already over")]
    RoundOver,

    #[error("expected phase {expected:?}, currently {actual:?}")]
    WrongPhase { expected: GamePhase, actual: GamePhase },
}

impl EngineError {
    /// Shorthand for an affordability failure.
    #[must_use]
    pub fn insufficient(needed: i64, available: i64) -> Self {
        Self::InsufficientFunds { needed, available }
    }
}

/// Failure while building or loading a catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("catalog JSON is invalid: {0}")]
    Json(#[from] serde_json::Error),

    #[error("duplicate card id {0}")]
    DuplicateCard(CardId),

    #[error("duplicate advisor id {0}")]
    DuplicateAdvisor(AdvisorId),

    #[error("duplicate event id {0}")]
    DuplicateEvent(EventId),

    #[error("{card} evolves into {target}, which is not in the catalog")]
    DanglingEvolution { card: CardId, target: CardId },

    #[error("{card} (tier {tier}) evolves into {target} (tier {target_tier}); evolutions must climb in tier")]
    EvolutionNotForward {
        card: CardId,
        tier: u8,
        target: CardId,
        target_tier: u8,
    },
}
