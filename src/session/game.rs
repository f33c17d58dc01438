//! The controlling loop for a run.
//!
//! `GameSession` owns the catalog, the configuration, the one `RunState`
//! and the RNG streams, and routes every input to the component that
//! handles it in the current `GamePhase`:
//!
//! ```text
//! MainMenu --start_new_run--> Round --win--> Draft --pick/skip--> Shop --leave--> Round
//!                               |
//!                               +--loss / abandon--> MainMenu
//! ```
//!
//! A presentation layer reads `phase()`, `snapshot()`, `round()` and
//! `shop()` to decide what to show; it never mutates state directly.

use serde::{Deserialize, Serialize};

use crate::cards::{CardCatalog, CardId, EventId, InstanceId};
use crate::core::config::GameConfig;
use crate::core::error::EngineError;
use crate::core::rng::GameRng;
use crate::deck::{Fusion, SelectOutcome};
use crate::round::{DiscardReport, NextPhase, PlayReport, RoundController, RoundResolution};
use crate::run::{LaunderOutcome, RunSnapshot, RunState};
use crate::scoring::ScoreResult;
use crate::shop::{DraftOffers, OfferItem, ShopEngine};

/// Top-level screen the session is in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GamePhase {
    MainMenu,
    Round,
    Draft,
    Shop,
}

/// A run from main menu to loss, with its RNG streams.
#[derive(Clone, Debug)]
pub struct GameSession {
    catalog: CardCatalog,
    config: GameConfig,
    run: RunState,
    phase: GamePhase,
    round: Option<RoundController>,
    draft: Option<DraftOffers>,
    shop: ShopEngine,
    last_resolution: Option<RoundResolution>,
    deck_rng: GameRng,
    shop_rng: GameRng,
    calendar_rng: GameRng,
}

impl GameSession {
    /// Create a session at the main menu.
    #[must_use]
    pub fn new(catalog: CardCatalog, config: GameConfig) -> Self {
        let master = GameRng::new(config.seed);
        Self {
            run: RunState::new(&config.run),
            shop: ShopEngine::new(config.shop.clone()),
            deck_rng: master.for_context("deck"),
            shop_rng: master.for_context("shop"),
            calendar_rng: master.for_context("calendar"),
            catalog,
            config,
            phase: GamePhase::MainMenu,
            round: None,
            draft: None,
            last_resolution: None,
        }
    }

    // === Views ===

    #[must_use]
    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    #[must_use]
    pub fn catalog(&self) -> &CardCatalog {
        &self.catalog
    }

    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    #[must_use]
    pub fn run(&self) -> &RunState {
        &self.run
    }

    #[must_use]
    pub fn snapshot(&self) -> RunSnapshot {
        self.run.snapshot()
    }

    /// The round in progress, if any.
    #[must_use]
    pub fn round(&self) -> Option<&RoundController> {
        self.round.as_ref()
    }

    #[must_use]
    pub fn draft(&self) -> Option<&DraftOffers> {
        self.draft.as_ref()
    }

    #[must_use]
    pub fn shop(&self) -> &ShopEngine {
        &self.shop
    }

    /// How the most recent round ended.
    #[must_use]
    pub fn last_resolution(&self) -> Option<&RoundResolution> {
        self.last_resolution.as_ref()
    }

    fn expect_phase(&self, expected: GamePhase) -> Result<(), EngineError> {
        if self.phase == expected {
            Ok(())
        } else {
            Err(EngineError::WrongPhase {
                expected,
                actual: self.phase,
            })
        }
    }

    // === Main menu ===

    /// Reset the run, deal a starter deck, draw the first boss and start
    /// round one.
    ///
    /// # Errors
    ///
    /// `WrongPhase` outside the main menu.
    pub fn start_new_run(&mut self) -> Result<(), EngineError> {
        self.expect_phase(GamePhase::MainMenu)?;

        let starter = self
            .catalog
            .starter_deck(self.config.run.starter_deck_size, &mut self.deck_rng);
        self.run = RunState::with_deck(&self.config.run, starter);
        self.run
            .calendar_mut()
            .draw_boss(&self.catalog, &mut self.calendar_rng);
        self.last_resolution = None;
        self.draft = None;

        tracing::info!(
            seed = self.config.seed,
            deck = self.run.deck_size(),
            cash = self.run.cash(),
            "new run"
        );
        self.begin_round();
        Ok(())
    }

    fn begin_round(&mut self) {
        let rng = self.deck_rng.fork();
        self.round = Some(RoundController::start(&self.config.run, &self.run, rng));
        self.phase = GamePhase::Round;
    }

    // === Round ===

    fn active_round(&mut self) -> Result<&mut RoundController, EngineError> {
        self.expect_phase(GamePhase::Round)?;
        self.round.as_mut().ok_or(EngineError::NoActiveRound)
    }

    /// # Errors
    ///
    /// `WrongPhase`, `CardNotInHand`.
    pub fn select(&mut self, id: InstanceId) -> Result<SelectOutcome, EngineError> {
        self.active_round()?.select(id)
    }

    /// # Errors
    ///
    /// `WrongPhase`.
    pub fn deselect(&mut self, id: InstanceId) -> Result<bool, EngineError> {
        self.active_round()?.deselect(id)
    }

    /// Score preview for the current selection.
    ///
    /// # Errors
    ///
    /// `WrongPhase` or `NoActiveRound`.
    pub fn preview(&self) -> Result<ScoreResult, EngineError> {
        self.expect_phase(GamePhase::Round)?;
        let round = self.round.as_ref().ok_or(EngineError::NoActiveRound)?;
        round.preview(&self.catalog, &self.run)
    }

    /// # Errors
    ///
    /// See `RoundController::play`.
    pub fn play(&mut self) -> Result<PlayReport, EngineError> {
        self.expect_phase(GamePhase::Round)?;
        let round = self.round.as_mut().ok_or(EngineError::NoActiveRound)?;
        let report = round.play(&self.catalog, &mut self.run, &mut self.calendar_rng)?;
        if let Some(resolution) = report.resolution {
            self.finish_round(resolution);
        }
        Ok(report)
    }

    /// # Errors
    ///
    /// See `RoundController::discard`.
    pub fn discard(&mut self) -> Result<DiscardReport, EngineError> {
        self.expect_phase(GamePhase::Round)?;
        let round = self.round.as_mut().ok_or(EngineError::NoActiveRound)?;
        let report = round.discard(&self.catalog, &mut self.run, &mut self.calendar_rng)?;
        if let Some(resolution) = report.resolution {
            self.finish_round(resolution);
        }
        Ok(report)
    }

    /// # Errors
    ///
    /// `WrongPhase` or `InvalidFusion`.
    pub fn fuse(&mut self, a: InstanceId, b: InstanceId) -> Result<Fusion, EngineError> {
        self.expect_phase(GamePhase::Round)?;
        let round = self.round.as_mut().ok_or(EngineError::NoActiveRound)?;
        round.fuse(a, b, &self.catalog, &mut self.run)
    }

    /// Add yield to the current round directly (debug).
    ///
    /// # Errors
    ///
    /// `WrongPhase`.
    pub fn add_score(&mut self, amount: i64) -> Result<Option<RoundResolution>, EngineError> {
        self.expect_phase(GamePhase::Round)?;
        let round = self.round.as_mut().ok_or(EngineError::NoActiveRound)?;
        let resolution = round.add_score(amount, &self.catalog, &mut self.run, &mut self.calendar_rng)?;
        if let Some(resolution) = resolution {
            self.finish_round(resolution);
        }
        Ok(resolution)
    }

    /// Drop the round in progress and return to the main menu.
    ///
    /// # Errors
    ///
    /// `WrongPhase` outside a round.
    pub fn abandon_round(&mut self) -> Result<(), EngineError> {
        self.expect_phase(GamePhase::Round)?;
        self.round = None;
        self.phase = GamePhase::MainMenu;
        tracing::info!("round abandoned");
        Ok(())
    }

    fn finish_round(&mut self, resolution: RoundResolution) {
        self.round = None;
        self.last_resolution = Some(resolution);
        match resolution.next {
            NextPhase::Draft => {
                let draft = DraftOffers::roll(
                    &self.catalog,
                    self.config.shop.draft_offer_count,
                    &mut self.shop_rng,
                );
                if draft.is_empty() {
                    self.open_shop();
                } else {
                    self.draft = Some(draft);
                    self.phase = GamePhase::Draft;
                }
            }
            NextPhase::MainMenu => {
                self.phase = GamePhase::MainMenu;
            }
        }
    }

    // === Draft ===

    /// Take the free card at `index`, then open the shop.
    ///
    /// # Errors
    ///
    /// `WrongPhase` or `OfferUnavailable`.
    pub fn draft_pick(&mut self, index: usize) -> Result<CardId, EngineError> {
        self.expect_phase(GamePhase::Draft)?;
        let draft = self.draft.as_ref().ok_or(EngineError::OfferUnavailable(index))?;
        let card = draft.claim(index, &mut self.run)?;
        self.open_shop();
        Ok(card)
    }

    /// Decline the draft and open the shop.
    ///
    /// # Errors
    ///
    /// `WrongPhase`.
    pub fn skip_draft(&mut self) -> Result<(), EngineError> {
        self.expect_phase(GamePhase::Draft)?;
        self.open_shop();
        Ok(())
    }

    fn open_shop(&mut self) {
        self.draft = None;
        self.shop
            .generate_inventory(&self.catalog, &self.run, &mut self.shop_rng);
        self.phase = GamePhase::Shop;
    }

    // === Shop ===

    /// # Errors
    ///
    /// `WrongPhase`, or see `ShopEngine::buy`.
    pub fn buy(&mut self, index: usize) -> Result<OfferItem, EngineError> {
        self.expect_phase(GamePhase::Shop)?;
        self.shop.buy(index, &mut self.run)
    }

    /// # Errors
    ///
    /// `WrongPhase` or `InsufficientFunds`.
    pub fn reroll(&mut self) -> Result<(), EngineError> {
        self.expect_phase(GamePhase::Shop)?;
        self.shop
            .reroll(&self.catalog, &mut self.run, &mut self.shop_rng)
    }

    /// # Errors
    ///
    /// `WrongPhase`, `CardNotOwned` or `InsufficientFunds`.
    pub fn remove_card(&mut self, card: CardId) -> Result<(), EngineError> {
        self.expect_phase(GamePhase::Shop)?;
        self.shop.remove_card(card, &mut self.run)
    }

    /// # Errors
    ///
    /// `WrongPhase` or `InsufficientFunds`.
    pub fn launder(&mut self) -> Result<LaunderOutcome, EngineError> {
        self.expect_phase(GamePhase::Shop)?;
        self.shop.launder(&mut self.run)
    }

    /// Close the shop and start the next round.
    ///
    /// # Errors
    ///
    /// `WrongPhase`.
    pub fn leave_shop(&mut self) -> Result<(), EngineError> {
        self.expect_phase(GamePhase::Shop)?;
        self.begin_round();
        Ok(())
    }

    // === Debug ===

    /// Lose the current round on the spot.
    ///
    /// # Errors
    ///
    /// `WrongPhase` outside a round.
    pub fn force_loss(&mut self) -> Result<RoundResolution, EngineError> {
        self.expect_phase(GamePhase::Round)?;
        let round = self.round.as_mut().ok_or(EngineError::NoActiveRound)?;
        let resolution = round.force_loss(&mut self.run)?;
        self.finish_round(resolution);
        Ok(resolution)
    }

    /// Replace the current quarter's boss.
    ///
    /// # Errors
    ///
    /// `UnknownEvent` if the catalog has no such event.
    pub fn force_boss(&mut self, event: EventId) -> Result<(), EngineError> {
        if self.catalog.event(event).is_none() {
            return Err(EngineError::UnknownEvent(event));
        }
        self.run.calendar_mut().force_boss(event);
        Ok(())
    }
}
