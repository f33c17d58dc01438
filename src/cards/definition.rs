//! Card definitions - static card data.
//!
//! `CardDefinition` holds the immutable properties of an asset card.
//! For example, "Penny Stock" is a tier-1 Generic asset costing $8 that
//! yields 10 with volatility 4 - these are part of the definition.
//!
//! Which pile a copy currently sits in is tracked separately by
//! `CardInstance` and `DeckState`.

use serde::{Deserialize, Serialize};

/// Unique identifier for a card definition.
///
/// This identifies the "type" of card (e.g., "Penny Stock"),
/// not a specific copy in a deck.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CardId(pub u32);

impl CardId {
    /// Create a new card ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for CardId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Card({})", self.0)
    }
}

/// Market sector a card belongs to (Tech, Energy, Generic, ...).
///
/// Sectors are data, not an enum: catalogs may introduce new ones.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Sector(String);

impl Sector {
    /// Sector of the basic cards a run starts with.
    pub const GENERIC: &'static str = "Generic";

    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    #[must_use]
    pub fn generic() -> Self {
        Self::new(Self::GENERIC)
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn is_generic(&self) -> bool {
        self.0 == Self::GENERIC
    }
}

impl std::fmt::Display for Sector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Sector {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

/// Static card definition.
///
/// ## Example
///
/// ```
/// use quantitative_easing::cards::{CardDefinition, CardId};
///
/// let chip = CardDefinition::new(CardId::new(10), "Chip Fab", "Tech")
///     .with_tier(1)
///     .with_cost(12)
///     .with_yield(14)
///     .with_volatility(6)
///     .with_evolution(CardId::new(11));
///
/// assert_eq!(chip.sector.as_str(), "Tech");
/// assert_eq!(chip.evolves_into, Some(CardId::new(11)));
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CardDefinition {
    /// Unique identifier for this card definition.
    pub id: CardId,

    /// Card name (for display/debugging).
    pub name: String,

    /// Sector tag used for synergy grouping.
    pub sector: Sector,

    /// Tier, starting at 1. Fusion climbs one step.
    #[serde(default = "default_tier")]
    pub tier: u8,

    /// Nominal value of the asset. Shop offers are priced from `ShopConfig`.
    #[serde(default)]
    pub cost: i64,

    /// Score contributed before modifiers.
    #[serde(default)]
    pub base_yield: i64,

    /// Heat added when played. Never modified.
    #[serde(default)]
    pub volatility: i64,

    /// Illegal assets are voided by an audit.
    #[serde(default)]
    pub illegal: bool,

    /// Next-tier definition produced by fusing two copies.
    #[serde(default)]
    pub evolves_into: Option<CardId>,

    #[serde(default)]
    pub description: String,
}

fn default_tier() -> u8 {
    1
}

impl CardDefinition {
    /// Create a tier-1 definition with zero stats.
    #[must_use]
    pub fn new(id: CardId, name: impl Into<String>, sector: impl Into<Sector>) -> Self {
        Self {
            id,
            name: name.into(),
            sector: sector.into(),
            tier: 1,
            cost: 0,
            base_yield: 0,
            volatility: 0,
            illegal: false,
            evolves_into: None,
            description: String::new(),
        }
    }

    #[must_use]
    pub fn with_tier(mut self, tier: u8) -> Self {
        self.tier = tier;
        self
    }

    #[must_use]
    pub fn with_cost(mut self, cost: i64) -> Self {
        self.cost = cost;
        self
    }

    #[must_use]
    pub fn with_yield(mut self, base_yield: i64) -> Self {
        self.base_yield = base_yield;
        self
    }

    #[must_use]
    pub fn with_volatility(mut self, volatility: i64) -> Self {
        self.volatility = volatility;
        self
    }

    /// Mark the card as an illegal asset.
    #[must_use]
    pub fn illegal(mut self) -> Self {
        self.illegal = true;
        self
    }

    #[must_use]
    pub fn with_evolution(mut self, target: CardId) -> Self {
        self.evolves_into = Some(target);
        self
    }

    /// Whether two copies of this card can be fused.
    #[must_use]
    pub fn can_evolve(&self) -> bool {
        self.evolves_into.is_some()
    }
}
