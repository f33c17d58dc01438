//! Hand evaluation.
//!
//! `ScoringEngine::evaluate` is a pure function: the same selection and
//! modifiers always produce the same `ScoreResult`, and nothing is mutated.
//! The round controller uses it both to commit a play and to preview the
//! current selection.

use smallvec::SmallVec;

use super::modifiers::{adjusted_yield, round_half_away};
use crate::cards::{
    AdvisorDefinition, AdvisorId, CardCatalog, CardDefinition, EventId, MarketEventDefinition,
    Sector,
};

/// Multiplier for a sector rally (three or more of one sector).
pub const RALLY_MULTIPLIER: f64 = 1.5;

/// Smallest same-sector group that counts as a rally.
pub const RALLY_GROUP_SIZE: usize = 3;

/// Modifiers active for a play: owned advisors plus the live market event.
#[derive(Clone, Debug, Default)]
pub struct ScoringContext<'a> {
    pub advisors: Vec<&'a AdvisorDefinition>,
    pub event: Option<&'a MarketEventDefinition>,
}

impl<'a> ScoringContext<'a> {
    /// No advisors, no event.
    #[must_use]
    pub fn neutral() -> Self {
        Self::default()
    }

    /// Resolve advisor and event ids against the catalog.
    ///
    /// Ids missing from the catalog are skipped.
    pub fn resolve(
        catalog: &'a CardCatalog,
        advisors: impl IntoIterator<Item = AdvisorId>,
        event: Option<EventId>,
    ) -> Self {
        Self {
            advisors: advisors.into_iter().filter_map(|id| catalog.advisor(id)).collect(),
            event: event.and_then(|id| catalog.event(id)),
        }
    }

    #[must_use]
    pub fn with_advisor(mut self, advisor: &'a AdvisorDefinition) -> Self {
        self.advisors.push(advisor);
        self
    }

    #[must_use]
    pub fn with_event(mut self, event: &'a MarketEventDefinition) -> Self {
        self.event = Some(event);
        self
    }
}

/// Name of the pattern a selection forms.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum HandLabel {
    /// Three or more cards of one sector.
    Rally(Sector),
    /// Largest sector group is exactly two.
    Merger,
    /// One card.
    SingleAsset,
    /// Anything else.
    Diversified,
}

impl HandLabel {
    #[must_use]
    pub fn multiplier(&self) -> f64 {
        match self {
            HandLabel::Rally(_) => RALLY_MULTIPLIER,
            _ => 1.0,
        }
    }
}

impl std::fmt::Display for HandLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HandLabel::Rally(sector) => write!(f, "{sector} Rally"),
            HandLabel::Merger => write!(f, "Merger"),
            HandLabel::SingleAsset => write!(f, "Single Asset"),
            HandLabel::Diversified => write!(f, "Diversified"),
        }
    }
}

/// Outcome of evaluating a selection.
#[derive(Clone, Debug, PartialEq)]
pub struct ScoreResult {
    /// `round(total_yield * multiplier)`.
    pub score: i64,
    /// Sum of unmodified volatility.
    pub heat: i64,
    pub label: HandLabel,
    pub multiplier: f64,
    /// Sum of adjusted yields before the multiplier and rounding.
    pub total_yield: f64,
    /// Adjusted yield per card, in selection order.
    pub card_yields: SmallVec<[f64; 8]>,
}

impl ScoreResult {
    /// Result for an empty selection.
    #[must_use]
    pub fn empty() -> Self {
        ScoringEngine::evaluate(&[], &ScoringContext::neutral())
    }
}

/// Stateless hand evaluator.
pub struct ScoringEngine;

impl ScoringEngine {
    /// Score a selection under the given modifiers.
    ///
    /// ## Example
    ///
    /// ```
    /// use quantitative_easing::cards::{CardDefinition, CardId};
    /// use quantitative_easing::scoring::{ScoringContext, ScoringEngine};
    ///
    /// let card = CardDefinition::new(CardId::new(1), "Fab", "Tech").with_yield(10);
    /// let result = ScoringEngine::evaluate(&[&card, &card, &card], &ScoringContext::neutral());
    ///
    /// assert_eq!(result.label.to_string(), "Tech Rally");
    /// assert_eq!(result.score, 45);
    /// ```
    #[must_use]
    pub fn evaluate(selected: &[&CardDefinition], ctx: &ScoringContext<'_>) -> ScoreResult {
        let card_yields: SmallVec<[f64; 8]> = selected
            .iter()
            .map(|card| adjusted_yield(card, &ctx.advisors, ctx.event))
            .collect();
        let total_yield: f64 = card_yields.iter().sum();

        let label = Self::label(selected);
        let multiplier = label.multiplier();
        let heat = selected.iter().map(|card| card.volatility).sum();

        ScoreResult {
            score: round_half_away(total_yield * multiplier),
            heat,
            label,
            multiplier,
            total_yield,
            card_yields,
        }
    }

    /// Classify a selection by its largest sector group.
    ///
    /// Ties go to the sector encountered first in selection order.
    #[must_use]
    pub fn label(selected: &[&CardDefinition]) -> HandLabel {
        let mut groups: SmallVec<[(&Sector, usize); 8]> = SmallVec::new();
        for card in selected {
            match groups.iter_mut().find(|(sector, _)| **sector == card.sector) {
                Some((_, count)) => *count += 1,
                None => groups.push((&card.sector, 1)),
            }
        }

        let largest = groups
            .iter()
            .fold(None::<(&Sector, usize)>, |best, &(sector, count)| match best {
                Some((_, best_count)) if best_count >= count => best,
                _ => Some((sector, count)),
            });

        match largest {
            Some((sector, count)) if count >= RALLY_GROUP_SIZE => HandLabel::Rally(sector.clone()),
            Some((_, 2)) => HandLabel::Merger,
            _ if selected.len() == 1 => HandLabel::SingleAsset,
            _ => HandLabel::Diversified,
        }
    }
}
