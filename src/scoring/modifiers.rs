//! Yield modifiers and the rounding policy.
//!
//! Modifiers run in a fixed order per card:
//!
//! 1. start from `base_yield`
//! 2. every matching advisor multiplies (boosts stack multiplicatively)
//! 3. the active market event applies last and sees the boosted value
//!
//! Heat is never touched here.

use crate::cards::{AdvisorDefinition, AdvisorEffect, CardDefinition, EventEffect, MarketEventDefinition};

/// Yield of `card` after advisor boosts.
#[must_use]
pub fn apply_advisors(card: &CardDefinition, base: f64, advisors: &[&AdvisorDefinition]) -> f64 {
    advisors.iter().fold(base, |acc, advisor| match &advisor.effect {
        AdvisorEffect::SectorYieldBoost { sector, multiplier } if *sector == card.sector => {
            acc * multiplier
        }
        _ => acc,
    })
}

/// Yield of `card` after the market event. Overrides advisor boosts.
#[must_use]
pub fn apply_event(card: &CardDefinition, boosted: f64, event: Option<&MarketEventDefinition>) -> f64 {
    match event.map(|e| e.effect) {
        Some(EventEffect::HalveYields) => boosted * 0.5,
        Some(EventEffect::NullifyIllegal) if card.illegal => 0.0,
        _ => boosted,
    }
}

/// Fully adjusted yield of one card.
#[must_use]
pub fn adjusted_yield(
    card: &CardDefinition,
    advisors: &[&AdvisorDefinition],
    event: Option<&MarketEventDefinition>,
) -> f64 {
    let boosted = apply_advisors(card, card.base_yield as f64, advisors);
    apply_event(card, boosted, event)
}

/// Round half away from zero: 2.5 -> 3, -2.5 -> -3.
#[must_use]
pub fn round_half_away(value: f64) -> i64 {
    // f64::round already rounds halves away from zero; the cast saturates.
    value.round() as i64
}
