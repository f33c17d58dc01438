//! Advisor and market event definitions.
//!
//! Advisors are permanent run-wide buffs bought in the shop. Market events
//! are the quarter bosses: one is drawn per quarter and is active during
//! month 3 only. Both are immutable catalog data; their effects are
//! interpreted by the scoring engine.

use serde::{Deserialize, Serialize};

use super::definition::Sector;

/// Unique identifier for an advisor definition.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AdvisorId(pub u32);

impl AdvisorId {
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for AdvisorId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Advisor({})", self.0)
    }
}

/// What an advisor does to scoring.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AdvisorEffect {
    /// Multiply the yield of cards in `sector`.
    SectorYieldBoost { sector: Sector, multiplier: f64 },
    /// No scoring effect (flavor or not yet wired).
    None,
}

impl AdvisorEffect {
    /// The usual +50% boost for one sector.
    #[must_use]
    pub fn sector_boost(sector: impl Into<Sector>) -> Self {
        Self::SectorYieldBoost {
            sector: sector.into(),
            multiplier: 1.5,
        }
    }
}

/// Static advisor definition.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AdvisorDefinition {
    pub id: AdvisorId,
    pub name: String,
    /// Shop price. Advisors are expensive.
    #[serde(default = "default_advisor_price")]
    pub price: i64,
    pub effect: AdvisorEffect,
    #[serde(default)]
    pub description: String,
}

fn default_advisor_price() -> i64 {
    50
}

impl AdvisorDefinition {
    /// Create an advisor at the default price.
    #[must_use]
    pub fn new(id: AdvisorId, name: impl Into<String>, effect: AdvisorEffect) -> Self {
        Self {
            id,
            name: name.into(),
            price: default_advisor_price(),
            effect,
            description: String::new(),
        }
    }

    #[must_use]
    pub fn with_price(mut self, price: i64) -> Self {
        self.price = price;
        self
    }
}

/// Unique identifier for a market event definition.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventId(pub u32);

impl EventId {
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for EventId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Event({})", self.0)
    }
}

/// What a market event does to scoring.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventEffect {
    /// Bear market: every yield is halved, boosts included.
    HalveYields,
    /// Audit: illegal cards yield nothing.
    NullifyIllegal,
    /// No scoring effect.
    None,
}

/// Static market event definition.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MarketEventDefinition {
    pub id: EventId,
    pub name: String,
    pub effect: EventEffect,
    #[serde(default)]
    pub description: String,
}

impl MarketEventDefinition {
    #[must_use]
    pub fn new(id: EventId, name: impl Into<String>, effect: EventEffect) -> Self {
        Self {
            id,
            name: name.into(),
            effect,
            description: String::new(),
        }
    }
}
