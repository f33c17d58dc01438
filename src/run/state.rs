//! Persistent run economy.
//!
//! `RunState` is the single mutable source of truth for a run: cash, heat,
//! owned deck, owned advisors and the calendar. It is owned by the
//! controlling loop and passed by `&mut` into the round controller and the
//! shop; nothing else holds it.
//!
//! The owned deck is an `im::Vector` so a round can snapshot it in O(1).

use im::{OrdSet, Vector};
use serde::{Deserialize, Serialize};

use super::calendar::{Calendar, CalendarAdvance};
use crate::cards::{AdvisorId, CardCatalog, CardId, EventId};
use crate::core::config::RunConfig;
use crate::core::error::EngineError;
use crate::core::rng::GameRng;
use crate::scoring::ScoringContext;

/// Heat level after a change.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HeatStatus {
    /// Below the cap.
    Stable,
    /// At the cap: the round is lost.
    Saturated,
}

/// Result of a laundering request that did not fail.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LaunderOutcome {
    /// Heat was already zero. Nothing was charged.
    AlreadyClean,
    /// Cash was spent and heat reduced.
    Laundered { removed: i64, heat: i64 },
}

/// Read-only status for display.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunSnapshot {
    pub cash: i64,
    pub heat: i64,
    pub max_heat: i64,
    pub quarter: u32,
    pub month: u8,
    pub quota: u64,
    pub boss_forecast: Option<EventId>,
    pub boss_active: bool,
    pub deck_size: usize,
    pub advisors: Vec<AdvisorId>,
}

/// Run economy and calendar.
#[derive(Clone, Debug)]
pub struct RunState {
    cash: i64,
    heat: i64,
    max_heat: i64,
    owned_deck: Vector<CardId>,
    owned_advisors: OrdSet<AdvisorId>,
    calendar: Calendar,
}

impl RunState {
    /// New-run defaults: starting cash, no heat, empty deck, Q1 M1.
    #[must_use]
    pub fn new(config: &RunConfig) -> Self {
        Self {
            cash: config.starting_cash.max(0),
            heat: 0,
            max_heat: config.max_heat,
            owned_deck: Vector::new(),
            owned_advisors: OrdSet::new(),
            calendar: Calendar::new(config.base_quota),
        }
    }

    /// New-run defaults with a starting deck.
    #[must_use]
    pub fn with_deck(config: &RunConfig, deck: impl IntoIterator<Item = CardId>) -> Self {
        let mut run = Self::new(config);
        run.owned_deck = deck.into_iter().collect();
        run
    }

    /// Return every field to new-run defaults.
    pub fn reset(&mut self, config: &RunConfig) {
        tracing::info!(
            quarter = self.calendar.quarter(),
            month = self.calendar.month(),
            "run reset"
        );
        *self = Self::new(config);
    }

    // === Cash ===

    #[must_use]
    pub fn cash(&self) -> i64 {
        self.cash
    }

    /// Fail without mutation if `amount` is not affordable.
    ///
    /// # Errors
    ///
    /// `InsufficientFunds` when `cash < amount`.
    pub fn ensure_affordable(&self, amount: i64) -> Result<(), EngineError> {
        if self.cash < amount {
            Err(EngineError::insufficient(amount, self.cash))
        } else {
            Ok(())
        }
    }

    /// Deduct `amount`, or fail and leave cash untouched.
    ///
    /// # Errors
    ///
    /// `InsufficientFunds` when `cash < amount`.
    pub fn try_spend(&mut self, amount: i64) -> Result<(), EngineError> {
        self.ensure_affordable(amount)?;
        self.cash -= amount.max(0);
        Ok(())
    }

    /// Add cash (banked yield, refunds).
    pub fn earn(&mut self, amount: i64) {
        self.cash = self.cash.saturating_add(amount.max(0));
    }

    // === Heat ===

    #[must_use]
    pub fn heat(&self) -> i64 {
        self.heat
    }

    #[must_use]
    pub fn max_heat(&self) -> i64 {
        self.max_heat
    }

    #[must_use]
    pub fn is_overheated(&self) -> bool {
        self.heat >= self.max_heat
    }

    /// `heat = clamp(heat + amount, 0, max_heat)`.
    pub fn add_heat(&mut self, amount: i64) -> HeatStatus {
        self.heat = self.heat.saturating_add(amount).clamp(0, self.max_heat);
        if self.is_overheated() {
            tracing::info!(heat = self.heat, "heat saturated");
            HeatStatus::Saturated
        } else {
            HeatStatus::Stable
        }
    }

    /// Pay `cost` to remove `amount` heat.
    ///
    /// A clean record is reported before any funds check and costs nothing.
    ///
    /// # Errors
    ///
    /// `InsufficientFunds` when there is heat to clean but `cash < cost`.
    pub fn launder(&mut self, cost: i64, amount: i64) -> Result<LaunderOutcome, EngineError> {
        if self.heat <= 0 {
            return Ok(LaunderOutcome::AlreadyClean);
        }
        self.try_spend(cost)?;

        let before = self.heat;
        self.add_heat(-amount.max(0));
        let removed = before - self.heat;
        tracing::info!(cost, removed, heat = self.heat, "heat laundered");
        Ok(LaunderOutcome::Laundered {
            removed,
            heat: self.heat,
        })
    }

    // === Deck ===

    #[must_use]
    pub fn owned_deck(&self) -> &Vector<CardId> {
        &self.owned_deck
    }

    /// O(1) copy of the deck for a new round.
    #[must_use]
    pub fn deck_snapshot(&self) -> Vector<CardId> {
        self.owned_deck.clone()
    }

    #[must_use]
    pub fn deck_size(&self) -> usize {
        self.owned_deck.len()
    }

    /// Number of copies of `card` owned.
    #[must_use]
    pub fn copies_of(&self, card: CardId) -> usize {
        self.owned_deck.iter().filter(|&&c| c == card).count()
    }

    #[must_use]
    pub fn owns_card(&self, card: CardId) -> bool {
        self.owned_deck.contains(&card)
    }

    pub fn add_card(&mut self, card: CardId) {
        self.owned_deck.push_back(card);
    }

    /// Remove exactly one copy of `card`. Returns whether one was found.
    pub fn remove_card(&mut self, card: CardId) -> bool {
        match self.owned_deck.index_of(&card) {
            Some(index) => {
                self.owned_deck.remove(index);
                true
            }
            None => false,
        }
    }

    /// Replace two copies of `consumed` with one `produced`.
    ///
    /// Does nothing unless two copies are owned.
    pub fn record_fusion(&mut self, consumed: CardId, produced: CardId) -> bool {
        if self.copies_of(consumed) < 2 {
            return false;
        }
        self.remove_card(consumed);
        self.remove_card(consumed);
        self.add_card(produced);
        true
    }

    // === Advisors ===

    #[must_use]
    pub fn has_advisor(&self, advisor: AdvisorId) -> bool {
        self.owned_advisors.contains(&advisor)
    }

    /// Hire an advisor. Returns `false` if already owned.
    pub fn add_advisor(&mut self, advisor: AdvisorId) -> bool {
        self.owned_advisors.insert(advisor).is_none()
    }

    /// Owned advisors in id order.
    pub fn advisors(&self) -> impl Iterator<Item = AdvisorId> + '_ {
        self.owned_advisors.iter().copied()
    }

    // === Calendar ===

    #[must_use]
    pub fn calendar(&self) -> &Calendar {
        &self.calendar
    }

    pub fn calendar_mut(&mut self) -> &mut Calendar {
        &mut self.calendar
    }

    #[must_use]
    pub fn quota(&self) -> u64 {
        self.calendar.quota()
    }

    /// Next month; new quarter and boss draw after month 3.
    pub fn advance_calendar(&mut self, catalog: &CardCatalog, rng: &mut GameRng) -> CalendarAdvance {
        self.calendar.advance(catalog, rng)
    }

    // === Views ===

    /// Advisors and live event resolved for scoring.
    #[must_use]
    pub fn scoring_context<'a>(&self, catalog: &'a CardCatalog) -> ScoringContext<'a> {
        ScoringContext::resolve(catalog, self.advisors(), self.calendar.active_event())
    }

    #[must_use]
    pub fn snapshot(&self) -> RunSnapshot {
        RunSnapshot {
            cash: self.cash,
            heat: self.heat,
            max_heat: self.max_heat,
            quarter: self.calendar.quarter(),
            month: self.calendar.month(),
            quota: self.calendar.quota(),
            boss_forecast: self.calendar.boss_forecast(),
            boss_active: self.calendar.active_event().is_some(),
            deck_size: self.owned_deck.len(),
            advisors: self.advisors().collect(),
        }
    }
}
