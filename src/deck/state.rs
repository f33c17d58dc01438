//! Round deck: draw pile, hand, discard pile and selection.
//!
//! A `DeckState` lives for exactly one round. It is built from a snapshot of
//! the run's owned deck, and every copy receives an `InstanceId`. Each
//! instance sits in exactly one of the three piles. Shuffling, drawing and
//! discarding never change the total; a successful fusion lowers it by one.
//!
//! The draw pile is ordered with the top card last, the same convention as
//! an ordered zone. Hand and discard order carry no game meaning but are
//! kept stable for display.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use thiserror::Error;

use super::charge::{DiscardCharge, HandCharge};
use crate::cards::{CardCatalog, CardDefinition, CardId, CardInstance, InstanceId};
use crate::core::config::RunConfig;
use crate::core::error::EngineError;
use crate::core::rng::GameRng;
use crate::run::{HeatStatus, RunState};
use crate::scoring::{ScoreResult, ScoringContext, ScoringEngine};

/// The pile a card instance currently sits in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Pile {
    Draw,
    Hand,
    Discard,
}

/// What a draw request achieved.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DrawReport {
    pub requested: usize,
    pub drawn: usize,
    /// Times the discard pile was shuffled back into the draw pile.
    pub reshuffles: u32,
    /// Both piles ran dry before the request was filled.
    pub stalled: bool,
}

/// Result of `DeckState::select`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SelectOutcome {
    Selected,
    AlreadySelected,
    /// Selection is full; nothing changed.
    Saturated,
}

/// Why two cards could not be fused.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum FusionRejection {
    #[error("a card cannot fuse with itself")]
    SameInstance,
    #[error("{0} is not in hand")]
    NotInHand(InstanceId),
    #[error("only identical assets can merge")]
    DifferentCards,
    #[error("this asset has no higher tier")]
    NoEvolution,
}

/// A committed play.
#[derive(Clone, Debug, PartialEq)]
pub struct PlayedHand {
    pub result: ScoreResult,
    pub heat_status: HeatStatus,
    pub refill: DrawReport,
}

/// A committed discard.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DiscardedHand {
    pub cards: usize,
    pub heat: i64,
    pub heat_status: HeatStatus,
    pub refill: DrawReport,
}

/// A successful fusion.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Fusion {
    pub consumed: CardId,
    pub produced: CardInstance,
}

/// Pile contents for display.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeckView {
    pub draw_count: usize,
    pub hand: Vec<CardInstance>,
    pub discard: Vec<CardInstance>,
    pub selection: Vec<InstanceId>,
}

/// Piles and selection for one round.
#[derive(Clone, Debug)]
pub struct DeckState {
    draw_pile: Vec<CardInstance>,
    hand: Vec<CardInstance>,
    discard_pile: Vec<CardInstance>,
    selection: SmallVec<[InstanceId; 8]>,
    max_hand_size: usize,
    max_selection_size: usize,
    next_instance: u32,
}

impl DeckState {
    /// Create empty piles with the given limits.
    #[must_use]
    pub fn new(max_hand_size: usize, max_selection_size: usize) -> Self {
        Self {
            draw_pile: Vec::new(),
            hand: Vec::new(),
            discard_pile: Vec::new(),
            selection: SmallVec::new(),
            max_hand_size,
            max_selection_size,
            next_instance: 0,
        }
    }

    /// Build, shuffle and deal a round deck.
    pub fn deal(
        config: &RunConfig,
        owned_deck: impl IntoIterator<Item = CardId>,
        rng: &mut GameRng,
    ) -> Self {
        let mut deck = Self::new(config.max_hand_size, config.max_selection_size);
        deck.initialize(owned_deck, rng);
        deck
    }

    /// Clear everything, load `owned_deck` into the draw pile, shuffle and
    /// fill the hand.
    pub fn initialize(
        &mut self,
        owned_deck: impl IntoIterator<Item = CardId>,
        rng: &mut GameRng,
    ) -> DrawReport {
        self.draw_pile.clear();
        self.hand.clear();
        self.discard_pile.clear();
        self.selection.clear();
        self.next_instance = 0;

        for card_id in owned_deck {
            let instance = self.alloc(card_id);
            self.draw_pile.push(instance);
        }
        self.shuffle(rng);
        self.refill(rng)
    }

    fn alloc(&mut self, card_id: CardId) -> CardInstance {
        let id = InstanceId(self.next_instance);
        self.next_instance += 1;
        CardInstance::new(id, card_id)
    }

    // === Piles ===

    #[must_use]
    pub fn draw_pile(&self) -> &[CardInstance] {
        &self.draw_pile
    }

    #[must_use]
    pub fn hand(&self) -> &[CardInstance] {
        &self.hand
    }

    #[must_use]
    pub fn discard_pile(&self) -> &[CardInstance] {
        &self.discard_pile
    }

    /// Cards across all three piles.
    #[must_use]
    pub fn total_cards(&self) -> usize {
        self.draw_pile.len() + self.hand.len() + self.discard_pile.len()
    }

    #[must_use]
    pub fn max_hand_size(&self) -> usize {
        self.max_hand_size
    }

    #[must_use]
    pub fn max_selection_size(&self) -> usize {
        self.max_selection_size
    }

    /// Which pile holds `id`.
    #[must_use]
    pub fn location(&self, id: InstanceId) -> Option<Pile> {
        if self.hand.iter().any(|c| c.id == id) {
            Some(Pile::Hand)
        } else if self.draw_pile.iter().any(|c| c.id == id) {
            Some(Pile::Draw)
        } else if self.discard_pile.iter().any(|c| c.id == id) {
            Some(Pile::Discard)
        } else {
            None
        }
    }

    #[must_use]
    pub fn hand_card(&self, id: InstanceId) -> Option<CardInstance> {
        self.hand.iter().copied().find(|c| c.id == id)
    }

    #[must_use]
    pub fn view(&self) -> DeckView {
        DeckView {
            draw_count: self.draw_pile.len(),
            hand: self.hand.clone(),
            discard: self.discard_pile.clone(),
            selection: self.selection.to_vec(),
        }
    }

    // === Shuffle / draw ===

    /// Uniformly permute the draw pile.
    pub fn shuffle(&mut self, rng: &mut GameRng) {
        rng.shuffle(&mut self.draw_pile);
        tracing::debug!(cards = self.draw_pile.len(), "draw pile shuffled");
    }

    /// Move up to `n` cards from the draw pile into the hand, one at a time.
    ///
    /// An empty draw pile is replenished by shuffling the discard pile into
    /// it. When both are empty the draw stops early; that is reported, not
    /// an error.
    pub fn draw(&mut self, n: usize, rng: &mut GameRng) -> DrawReport {
        let mut report = DrawReport {
            requested: n,
            ..DrawReport::default()
        };

        while report.drawn < n {
            if self.draw_pile.is_empty() {
                if self.discard_pile.is_empty() {
                    report.stalled = true;
                    break;
                }
                self.reshuffle_discard(rng);
                report.reshuffles += 1;
            }
            if let Some(card) = self.draw_pile.pop() {
                self.hand.push(card);
                report.drawn += 1;
            }
        }

        if report.stalled {
            tracing::debug!(requested = n, drawn = report.drawn, "draw stalled");
        }
        report
    }

    /// Draw until the hand holds `max_hand_size` cards.
    pub fn refill(&mut self, rng: &mut GameRng) -> DrawReport {
        let needed = self.max_hand_size.saturating_sub(self.hand.len());
        self.draw(needed, rng)
    }

    fn reshuffle_discard(&mut self, rng: &mut GameRng) {
        self.draw_pile.append(&mut self.discard_pile);
        self.shuffle(rng);
    }

    // === Selection ===

    #[must_use]
    pub fn selection(&self) -> &[InstanceId] {
        &self.selection
    }

    #[must_use]
    pub fn has_selection(&self) -> bool {
        !self.selection.is_empty()
    }

    #[must_use]
    pub fn is_selected(&self, id: InstanceId) -> bool {
        self.selection.contains(&id)
    }

    /// Add a hand card to the selection.
    ///
    /// # Errors
    ///
    /// `CardNotInHand` if `id` is not in the hand.
    pub fn select(&mut self, id: InstanceId) -> Result<SelectOutcome, EngineError> {
        if self.hand_card(id).is_none() {
            return Err(EngineError::CardNotInHand(id));
        }
        if self.is_selected(id) {
            return Ok(SelectOutcome::AlreadySelected);
        }
        if self.selection.len() >= self.max_selection_size {
            return Ok(SelectOutcome::Saturated);
        }
        self.selection.push(id);
        Ok(SelectOutcome::Selected)
    }

    /// Remove a card from the selection. Returns whether it was selected.
    pub fn deselect(&mut self, id: InstanceId) -> bool {
        let before = self.selection.len();
        self.selection.retain(|s| *s != id);
        self.selection.len() != before
    }

    /// Selected cards' definitions, in selection order.
    ///
    /// # Errors
    ///
    /// `UnknownCard` if a selected card is missing from the catalog.
    pub fn selected_definitions<'c>(
        &self,
        catalog: &'c CardCatalog,
    ) -> Result<Vec<&'c CardDefinition>, EngineError> {
        self.selection
            .iter()
            .filter_map(|id| self.hand_card(*id))
            .map(|card| {
                catalog
                    .card(card.card_id)
                    .ok_or(EngineError::UnknownCard(card.card_id))
            })
            .collect()
    }

    /// Score the current selection without committing anything.
    ///
    /// # Errors
    ///
    /// `UnknownCard` if a selected card is missing from the catalog.
    pub fn preview(
        &self,
        catalog: &CardCatalog,
        ctx: &ScoringContext<'_>,
    ) -> Result<ScoreResult, EngineError> {
        let selected = self.selected_definitions(catalog)?;
        Ok(ScoringEngine::evaluate(&selected, ctx))
    }

    fn discard_selected(&mut self) -> usize {
        let selected = std::mem::take(&mut self.selection);
        let mut moved = 0;
        for id in selected {
            if let Some(index) = self.hand.iter().position(|c| c.id == id) {
                let card = self.hand.remove(index);
                self.discard_pile.push(card);
                moved += 1;
            }
        }
        moved
    }

    // === Actions ===

    /// Score the selection, apply its heat to the run, discard it and refill.
    ///
    /// The returned score is not added anywhere; the round controller owns
    /// the round's yield.
    ///
    /// # Errors
    ///
    /// `EmptySelection` or `UnknownCard`. Nothing is mutated on error.
    pub fn play_selection(
        &mut self,
        _charge: HandCharge,
        catalog: &CardCatalog,
        ctx: &ScoringContext<'_>,
        run: &mut RunState,
        rng: &mut GameRng,
    ) -> Result<PlayedHand, EngineError> {
        if !self.has_selection() {
            return Err(EngineError::EmptySelection);
        }
        let result = self.preview(catalog, ctx)?;

        let heat_status = run.add_heat(result.heat);
        let played = self.discard_selected();
        let refill = self.refill(rng);

        tracing::debug!(
            cards = played,
            score = result.score,
            heat = result.heat,
            label = %result.label,
            "selection played"
        );
        Ok(PlayedHand {
            result,
            heat_status,
            refill,
        })
    }

    /// Discard the selection for `heat_per_card` heat each, then refill.
    ///
    /// # Errors
    ///
    /// `EmptySelection`. Nothing is mutated on error.
    pub fn discard_selection(
        &mut self,
        _charge: DiscardCharge,
        heat_per_card: i64,
        run: &mut RunState,
        rng: &mut GameRng,
    ) -> Result<DiscardedHand, EngineError> {
        if !self.has_selection() {
            return Err(EngineError::EmptySelection);
        }

        let cards = self.discard_selected();
        let heat = heat_per_card * cards as i64;
        let heat_status = run.add_heat(heat);
        let refill = self.refill(rng);

        tracing::debug!(cards, heat, "selection shredded");
        Ok(DiscardedHand {
            cards,
            heat,
            heat_status,
            refill,
        })
    }

    /// Merge two identical hand cards into one copy of their evolution.
    ///
    /// All-or-nothing: on any rejection the piles and selection are
    /// untouched. The evolved copy joins the hand; the hand is not refilled.
    ///
    /// # Errors
    ///
    /// `InvalidFusion` with the reason.
    pub fn attempt_fusion(
        &mut self,
        a: InstanceId,
        b: InstanceId,
        catalog: &CardCatalog,
    ) -> Result<Fusion, EngineError> {
        let reject = |reason| Err(EngineError::InvalidFusion(reason));

        if a == b {
            return reject(FusionRejection::SameInstance);
        }
        let Some(card_a) = self.hand_card(a) else {
            return reject(FusionRejection::NotInHand(a));
        };
        let Some(card_b) = self.hand_card(b) else {
            return reject(FusionRejection::NotInHand(b));
        };
        if !card_a.same_card(&card_b) {
            return reject(FusionRejection::DifferentCards);
        }
        let Some(evolved) = catalog.evolution_of(card_a.card_id) else {
            return reject(FusionRejection::NoEvolution);
        };

        self.hand.retain(|c| c.id != a && c.id != b);
        self.selection.retain(|s| *s != a && *s != b);
        let produced = self.alloc(evolved.id);
        self.hand.push(produced);

        tracing::debug!(consumed = %card_a.card_id, produced = %evolved.id, "assets merged");
        Ok(Fusion {
            consumed: card_a.card_id,
            produced,
        })
    }
}
