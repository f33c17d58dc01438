//! # quantitative-easing
//!
//! Simulation core for a roguelike deck-building economy game. The player
//! builds a deck of financial-asset cards, plays hands to meet a rising
//! quota, manages a heat meter, and spends cash between rounds.
//!
//! ## Design Principles
//!
//! 1. **Explicit run context**: one `RunState` is owned by the controlling
//!    loop and passed by `&mut` into each operation. There is no global
//!    mutable state.
//!
//! 2. **Atomic operations**: every rejected operation returns an
//!    `EngineError` and leaves all state unchanged.
//!
//! 3. **Seeded randomness**: shuffles, shop stock and boss draws take a
//!    `&mut GameRng`, so a seed pins an entire run.
//!
//! 4. **Data, not assets**: cards, advisors and market events are plain
//!    definitions in an immutable `CardCatalog`, loaded once.
//!
//! ## Modules
//!
//! - `core`: RNG, configuration, errors
//! - `cards`: definitions, instances, the catalog
//! - `deck`: draw pile, hand, discard pile, selection, fusion
//! - `scoring`: pure hand evaluation
//! - `run`: cash, heat, owned deck, advisors, calendar and quota
//! - `shop`: inventory, purchases, services, post-win draft
//! - `round`: the per-round state machine
//! - `session`: the top-level phase loop
//!
//! ## Example
//!
//! ```
//! use quantitative_easing::{CardCatalog, CardDefinition, CardId, GameConfig, GamePhase, GameSession};
//!
//! let mut catalog = CardCatalog::new();
//! catalog.register_card(
//!     CardDefinition::new(CardId::new(1), "Index Fund", "Generic").with_yield(10),
//! );
//!
//! let mut session = GameSession::new(catalog, GameConfig::with_seed(1));
//! session.start_new_run().unwrap();
//! assert_eq!(session.phase(), GamePhase::Round);
//!
//! let hand: Vec<_> = session.round().unwrap().deck().hand().iter().map(|c| c.id).collect();
//! for id in &hand[..3] {
//!     session.select(*id).unwrap();
//! }
//! assert_eq!(session.preview().unwrap().score, 45);
//! ```

pub mod core;
pub mod cards;
pub mod deck;
pub mod scoring;
pub mod run;
pub mod shop;
pub mod round;
pub mod session;

// Re-export commonly used types
pub use crate::core::{CatalogError, EngineError, GameConfig, GameRng, Resource, RunConfig, ShopConfig};

pub use crate::cards::{
    AdvisorDefinition, AdvisorEffect, AdvisorId, CardCatalog, CardDefinition, CardId,
    CardInstance, EventEffect, EventId, InstanceId, MarketEventDefinition, Sector,
};

pub use crate::deck::{DeckState, DeckView, DrawReport, FusionRejection, Pile, SelectOutcome};

pub use crate::scoring::{HandLabel, ScoreResult, ScoringContext, ScoringEngine};

pub use crate::run::{Calendar, HeatStatus, LaunderOutcome, RunSnapshot, RunState};

pub use crate::shop::{DraftOffers, OfferItem, ShopEngine, ShopOffer};

pub use crate::round::{NextPhase, RoundController, RoundOutcome, RoundPhase, RoundResolution};

pub use crate::session::{GamePhase, GameSession};
