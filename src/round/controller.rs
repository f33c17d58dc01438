//! Round lifecycle.
//!
//! A round starts from a snapshot of the owned deck and runs in
//! `PlayerAction` until exactly one of `Won` or `Lost` fires:
//!
//! - heat at the cap loses immediately, even when the same play met quota
//! - otherwise `yield >= quota` after a play (or forced score) wins
//! - otherwise running out of hands below quota loses
//!
//! Concluding a round applies its consequences to the run exactly once: a
//! win banks the yield and advances the calendar, a loss resets the run.
//! Every action after that fails with `RoundOver`.

use serde::{Deserialize, Serialize};

use crate::cards::{CardCatalog, InstanceId};
use crate::core::config::RunConfig;
use crate::core::error::{EngineError, Resource};
use crate::core::rng::GameRng;
use crate::deck::{
    DeckState, DeckView, DiscardCharge, DiscardedHand, Fusion, HandCharge, PlayedHand,
    SelectOutcome,
};
use crate::run::{CalendarAdvance, RunState};
use crate::scoring::ScoreResult;

/// Where a round stands.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoundPhase {
    PlayerAction,
    Won,
    Lost,
}

/// Why a round was lost.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum LossCause {
    /// Heat reached the cap.
    Overheated,
    /// No hands left and the quota was not met.
    OutOfHands,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoundOutcome {
    Won,
    Lost(LossCause),
}

/// Where control goes after a round.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum NextPhase {
    /// Post-win draft, then the shop.
    Draft,
    MainMenu,
}

/// Terminal signal of a round, for end-of-round presentation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RoundResolution {
    pub outcome: RoundOutcome,
    pub final_yield: i64,
    pub quota: u64,
    /// Cash added to the run (zero on a loss or with banking off).
    pub banked: i64,
    /// Calendar movement on a win.
    pub calendar: Option<CalendarAdvance>,
    pub next: NextPhase,
}

impl RoundResolution {
    #[must_use]
    pub fn is_win(&self) -> bool {
        self.outcome == RoundOutcome::Won
    }
}

/// Result of a committed play.
#[derive(Clone, Debug, PartialEq)]
pub struct PlayReport {
    pub hand: PlayedHand,
    /// False when the circuit breaker voided the score.
    pub scored: bool,
    pub resolution: Option<RoundResolution>,
}

/// Result of a committed discard.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DiscardReport {
    pub discarded: DiscardedHand,
    pub resolution: Option<RoundResolution>,
}

/// Round counters for a status line.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundStatus {
    pub phase: RoundPhase,
    pub round_yield: i64,
    pub quota: u64,
    pub hands_remaining: u32,
    pub discards_remaining: u32,
}

/// Runs one round against a borrowed `RunState`.
#[derive(Clone, Debug)]
pub struct RoundController {
    config: RunConfig,
    deck: DeckState,
    rng: GameRng,
    round_yield: i64,
    quota: u64,
    hands_remaining: u32,
    discards_remaining: u32,
    phase: RoundPhase,
    resolution: Option<RoundResolution>,
}

impl RoundController {
    /// Deal a new round from the run's current deck.
    ///
    /// Yield and charges reset; heat carries over from the run. A round
    /// always gets at least one hand, so it can always reach an outcome.
    pub fn start(config: &RunConfig, run: &RunState, mut rng: GameRng) -> Self {
        let deck = DeckState::deal(config, run.deck_snapshot(), &mut rng);
        tracing::info!(
            quarter = run.calendar().quarter(),
            month = run.calendar().month(),
            quota = run.quota(),
            heat = run.heat(),
            deck = deck.total_cards(),
            "round started"
        );

        Self {
            config: config.clone(),
            deck,
            rng,
            round_yield: 0,
            quota: run.quota(),
            hands_remaining: config.max_hands.max(1),
            discards_remaining: config.max_discards,
            phase: RoundPhase::PlayerAction,
            resolution: None,
        }
    }

    // === Accessors ===

    #[must_use]
    pub fn deck(&self) -> &DeckState {
        &self.deck
    }

    #[must_use]
    pub fn view(&self) -> DeckView {
        self.deck.view()
    }

    #[must_use]
    pub fn phase(&self) -> RoundPhase {
        self.phase
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        self.phase == RoundPhase::PlayerAction
    }

    #[must_use]
    pub fn round_yield(&self) -> i64 {
        self.round_yield
    }

    #[must_use]
    pub fn quota(&self) -> u64 {
        self.quota
    }

    #[must_use]
    pub fn hands_remaining(&self) -> u32 {
        self.hands_remaining
    }

    #[must_use]
    pub fn discards_remaining(&self) -> u32 {
        self.discards_remaining
    }

    /// The terminal signal, once the round has ended.
    #[must_use]
    pub fn resolution(&self) -> Option<&RoundResolution> {
        self.resolution.as_ref()
    }

    #[must_use]
    pub fn status(&self) -> RoundStatus {
        RoundStatus {
            phase: self.phase,
            round_yield: self.round_yield,
            quota: self.quota,
            hands_remaining: self.hands_remaining,
            discards_remaining: self.discards_remaining,
        }
    }

    fn ensure_active(&self) -> Result<(), EngineError> {
        if self.is_active() {
            Ok(())
        } else {
            Err(EngineError::RoundOver)
        }
    }

    // === Selection ===

    /// # Errors
    ///
    /// `RoundOver`, or `CardNotInHand`.
    pub fn select(&mut self, id: InstanceId) -> Result<SelectOutcome, EngineError> {
        self.ensure_active()?;
        let outcome = self.deck.select(id)?;
        tracing::debug!(card = %id, ?outcome, "select");
        Ok(outcome)
    }

    /// # Errors
    ///
    /// `RoundOver`.
    pub fn deselect(&mut self, id: InstanceId) -> Result<bool, EngineError> {
        self.ensure_active()?;
        Ok(self.deck.deselect(id))
    }

    /// Projected score of the current selection under the run's modifiers.
    ///
    /// # Errors
    ///
    /// `UnknownCard` if a selected card is missing from the catalog.
    pub fn preview(&self, catalog: &CardCatalog, run: &RunState) -> Result<ScoreResult, EngineError> {
        let ctx = run.scoring_context(catalog);
        self.deck.preview(catalog, &ctx)
    }

    // === Actions ===

    /// Play the selection, spending one hand.
    ///
    /// `calendar_rng` is only used when the play wins the round and the
    /// calendar rolls into a new quarter.
    ///
    /// # Errors
    ///
    /// `RoundOver`, `ResourceExhausted(Hands)`, `EmptySelection` or
    /// `UnknownCard`. No hand is spent on error.
    pub fn play(
        &mut self,
        catalog: &CardCatalog,
        run: &mut RunState,
        calendar_rng: &mut GameRng,
    ) -> Result<PlayReport, EngineError> {
        self.ensure_active()?;
        if self.hands_remaining == 0 {
            return Err(EngineError::ResourceExhausted(Resource::Hands));
        }
        if !self.deck.has_selection() {
            return Err(EngineError::EmptySelection);
        }

        self.hands_remaining -= 1;
        let ctx = run.scoring_context(catalog);
        let hand = match self
            .deck
            .play_selection(HandCharge::mint(), catalog, &ctx, run, &mut self.rng)
        {
            Ok(hand) => hand,
            Err(err) => {
                self.hands_remaining += 1;
                return Err(err);
            }
        };

        let scored = self.credit(hand.result.score, run);
        let resolution = self.check_outcome(catalog, run, calendar_rng);
        Ok(PlayReport {
            hand,
            scored,
            resolution,
        })
    }

    /// Shred the selection, spending one discard.
    ///
    /// # Errors
    ///
    /// `RoundOver`, `ResourceExhausted(Discards)` or `EmptySelection`. No
    /// discard is spent on error.
    pub fn discard(
        &mut self,
        catalog: &CardCatalog,
        run: &mut RunState,
        calendar_rng: &mut GameRng,
    ) -> Result<DiscardReport, EngineError> {
        self.ensure_active()?;
        if self.discards_remaining == 0 {
            return Err(EngineError::ResourceExhausted(Resource::Discards));
        }
        if !self.deck.has_selection() {
            return Err(EngineError::EmptySelection);
        }

        self.discards_remaining -= 1;
        let discarded = match self.deck.discard_selection(
            DiscardCharge::mint(),
            self.config.discard_heat_per_card,
            run,
            &mut self.rng,
        ) {
            Ok(discarded) => discarded,
            Err(err) => {
                self.discards_remaining += 1;
                return Err(err);
            }
        };

        let resolution = self.check_outcome(catalog, run, calendar_rng);
        Ok(DiscardReport {
            discarded,
            resolution,
        })
    }

    /// Merge two identical hand cards; the run's deck is updated too.
    ///
    /// Costs no charge and does not refill the hand.
    ///
    /// # Errors
    ///
    /// `RoundOver` or `InvalidFusion`.
    pub fn fuse(
        &mut self,
        a: InstanceId,
        b: InstanceId,
        catalog: &CardCatalog,
        run: &mut RunState,
    ) -> Result<Fusion, EngineError> {
        self.ensure_active()?;
        let fusion = self.deck.attempt_fusion(a, b, catalog)?;
        if !run.record_fusion(fusion.consumed, fusion.produced.card_id) {
            tracing::warn!(card = %fusion.consumed, "fused card missing from the owned deck");
        }
        Ok(fusion)
    }

    /// Add yield directly, then check for a win or loss.
    ///
    /// Voided while the run is overheated.
    ///
    /// # Errors
    ///
    /// `RoundOver`.
    pub fn add_score(
        &mut self,
        amount: i64,
        catalog: &CardCatalog,
        run: &mut RunState,
        calendar_rng: &mut GameRng,
    ) -> Result<Option<RoundResolution>, EngineError> {
        self.ensure_active()?;
        self.credit(amount, run);
        Ok(self.check_outcome(catalog, run, calendar_rng))
    }

    /// End the round as lost for want of hands, whatever the yield (debug).
    ///
    /// # Errors
    ///
    /// `RoundOver`.
    pub fn force_loss(&mut self, run: &mut RunState) -> Result<RoundResolution, EngineError> {
        self.ensure_active()?;
        self.hands_remaining = 0;
        Ok(self.lose(LossCause::OutOfHands, run))
    }

    fn credit(&mut self, amount: i64, run: &RunState) -> bool {
        if run.is_overheated() {
            tracing::debug!(amount, "score voided by circuit breaker");
            return false;
        }
        self.round_yield = self.round_yield.saturating_add(amount);
        true
    }

    fn quota_met(&self) -> bool {
        u64::try_from(self.round_yield).is_ok_and(|y| y >= self.quota)
    }

    fn check_outcome(
        &mut self,
        catalog: &CardCatalog,
        run: &mut RunState,
        calendar_rng: &mut GameRng,
    ) -> Option<RoundResolution> {
        let outcome = if run.is_overheated() {
            RoundOutcome::Lost(LossCause::Overheated)
        } else if self.quota_met() {
            RoundOutcome::Won
        } else if self.hands_remaining == 0 {
            RoundOutcome::Lost(LossCause::OutOfHands)
        } else {
            return None;
        };
        Some(self.conclude(outcome, catalog, run, calendar_rng))
    }

    fn conclude(
        &mut self,
        outcome: RoundOutcome,
        catalog: &CardCatalog,
        run: &mut RunState,
        calendar_rng: &mut GameRng,
    ) -> RoundResolution {
        match outcome {
            RoundOutcome::Won => {
                let banked = if self.config.bank_yield {
                    self.round_yield.max(0)
                } else {
                    0
                };
                run.earn(banked);
                let advance = run.advance_calendar(catalog, calendar_rng);
                self.phase = RoundPhase::Won;
                self.record(RoundResolution {
                    outcome,
                    final_yield: self.round_yield,
                    quota: self.quota,
                    banked,
                    calendar: Some(advance),
                    next: NextPhase::Draft,
                })
            }
            RoundOutcome::Lost(cause) => self.lose(cause, run),
        }
    }

    fn lose(&mut self, cause: LossCause, run: &mut RunState) -> RoundResolution {
        run.reset(&self.config);
        self.phase = RoundPhase::Lost;
        self.record(RoundResolution {
            outcome: RoundOutcome::Lost(cause),
            final_yield: self.round_yield,
            quota: self.quota,
            banked: 0,
            calendar: None,
            next: NextPhase::MainMenu,
        })
    }

    fn record(&mut self, resolution: RoundResolution) -> RoundResolution {
        tracing::info!(
            outcome = ?resolution.outcome,
            final_yield = resolution.final_yield,
            quota = resolution.quota,
            banked = resolution.banked,
            "round over"
        );
        self.resolution = Some(resolution);
        resolution
    }
}
