//! Card catalog: every card, advisor and market event definition.
//!
//! The catalog is built once at startup (in code or from JSON) and never
//! mutated afterwards. Lookups are by id through `FxHashMap`s. Every pool
//! handed to a sampler is sorted by id first so that a seeded `GameRng`
//! picks the same entries on every platform.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use super::advisor::{AdvisorDefinition, AdvisorId, EventId, MarketEventDefinition};
use super::definition::{CardDefinition, CardId, Sector};
use crate::core::error::CatalogError;
use crate::core::rng::GameRng;

/// Serialized catalog layout.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct CatalogData {
    #[serde(default)]
    pub cards: Vec<CardDefinition>,
    #[serde(default)]
    pub advisors: Vec<AdvisorDefinition>,
    #[serde(default)]
    pub events: Vec<MarketEventDefinition>,
}

/// Immutable index of all definitions.
///
/// ## Example
///
/// ```
/// use quantitative_easing::cards::{CardCatalog, CardDefinition, CardId};
///
/// let mut catalog = CardCatalog::new();
/// catalog.register_card(
///     CardDefinition::new(CardId::new(1), "Penny Stock", "Generic").with_yield(10),
/// );
///
/// let found = catalog.card(CardId::new(1)).unwrap();
/// assert_eq!(found.name, "Penny Stock");
/// assert_eq!(catalog.draft_pool().len(), 1);
/// ```
#[derive(Clone, Debug, Default)]
pub struct CardCatalog {
    cards: FxHashMap<CardId, CardDefinition>,
    advisors: FxHashMap<AdvisorId, AdvisorDefinition>,
    events: FxHashMap<EventId, MarketEventDefinition>,
}

impl CardCatalog {
    /// Create a new empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Load and validate a catalog from JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON does not parse, an id is repeated, or an
    /// evolution reference is dangling or does not climb in tier.
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let data: CatalogData = serde_json::from_str(json)?;
        Self::from_data(data)
    }

    /// Build and validate a catalog from parsed data.
    ///
    /// # Errors
    ///
    /// Same as [`CardCatalog::from_json`], minus parsing.
    pub fn from_data(data: CatalogData) -> Result<Self, CatalogError> {
        let mut catalog = Self::new();

        for card in data.cards {
            if catalog.cards.contains_key(&card.id) {
                return Err(CatalogError::DuplicateCard(card.id));
            }
            catalog.cards.insert(card.id, card);
        }
        for advisor in data.advisors {
            if catalog.advisors.contains_key(&advisor.id) {
                return Err(CatalogError::DuplicateAdvisor(advisor.id));
            }
            catalog.advisors.insert(advisor.id, advisor);
        }
        for event in data.events {
            if catalog.events.contains_key(&event.id) {
                return Err(CatalogError::DuplicateEvent(event.id));
            }
            catalog.events.insert(event.id, event);
        }

        catalog.validate()?;
        tracing::info!(
            cards = catalog.cards.len(),
            advisors = catalog.advisors.len(),
            events = catalog.events.len(),
            "catalog loaded"
        );
        Ok(catalog)
    }

    /// Check that every evolution resolves and climbs in tier.
    ///
    /// Climbing tiers rules out cycles in the evolution chain.
    ///
    /// # Errors
    ///
    /// Returns the first offending evolution reference.
    pub fn validate(&self) -> Result<(), CatalogError> {
        for card in self.cards_sorted() {
            let Some(target_id) = card.evolves_into else {
                continue;
            };
            let target = self
                .cards
                .get(&target_id)
                .ok_or(CatalogError::DanglingEvolution {
                    card: card.id,
                    target: target_id,
                })?;
            if target.tier <= card.tier {
                return Err(CatalogError::EvolutionNotForward {
                    card: card.id,
                    tier: card.tier,
                    target: target_id,
                    target_tier: target.tier,
                });
            }
        }
        Ok(())
    }

    /// Register a card definition.
    ///
    /// Panics if a card with the same ID already exists.
    pub fn register_card(&mut self, card: CardDefinition) {
        if self.cards.contains_key(&card.id) {
            panic!("Card with ID {:?} already registered", card.id);
        }
        self.cards.insert(card.id, card);
    }

    /// Register an advisor definition.
    ///
    /// Panics if an advisor with the same ID already exists.
    pub fn register_advisor(&mut self, advisor: AdvisorDefinition) {
        if self.advisors.contains_key(&advisor.id) {
            panic!("Advisor with ID {:?} already registered", advisor.id);
        }
        self.advisors.insert(advisor.id, advisor);
    }

    /// Register a market event definition.
    ///
    /// Panics if an event with the same ID already exists.
    pub fn register_event(&mut self, event: MarketEventDefinition) {
        if self.events.contains_key(&event.id) {
            panic!("Event with ID {:?} already registered", event.id);
        }
        self.events.insert(event.id, event);
    }

    // === Lookup ===

    #[must_use]
    pub fn card(&self, id: CardId) -> Option<&CardDefinition> {
        self.cards.get(&id)
    }

    #[must_use]
    pub fn advisor(&self, id: AdvisorId) -> Option<&AdvisorDefinition> {
        self.advisors.get(&id)
    }

    #[must_use]
    pub fn event(&self, id: EventId) -> Option<&MarketEventDefinition> {
        self.events.get(&id)
    }

    /// Find an event by display name, ignoring case ("bear market").
    #[must_use]
    pub fn event_by_name(&self, name: &str) -> Option<&MarketEventDefinition> {
        self.events_sorted()
            .into_iter()
            .find(|e| e.name.eq_ignore_ascii_case(name))
    }

    /// The definition a card fuses into, if any.
    #[must_use]
    pub fn evolution_of(&self, id: CardId) -> Option<&CardDefinition> {
        self.cards.get(&id)?.evolves_into.and_then(|t| self.cards.get(&t))
    }

    #[must_use]
    pub fn card_count(&self) -> usize {
        self.cards.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty() && self.advisors.is_empty() && self.events.is_empty()
    }

    // === Filtered pools (sorted by id) ===

    /// All cards, sorted by id.
    #[must_use]
    pub fn cards_sorted(&self) -> Vec<&CardDefinition> {
        self.find(|_| true)
    }

    /// Cards matching a predicate, sorted by id.
    pub fn find<F>(&self, predicate: F) -> Vec<&CardDefinition>
    where
        F: Fn(&CardDefinition) -> bool,
    {
        let mut found: Vec<_> = self.cards.values().filter(|c| predicate(c)).collect();
        found.sort_by_key(|c| c.id);
        found
    }

    #[must_use]
    pub fn cards_by_tier(&self, tier: u8) -> Vec<&CardDefinition> {
        self.find(|c| c.tier == tier)
    }

    #[must_use]
    pub fn cards_by_sector(&self, sector: &Sector) -> Vec<&CardDefinition> {
        self.find(|c| &c.sector == sector)
    }

    /// Cards the shop and draft may offer: tier 1 only, never fused forms.
    #[must_use]
    pub fn draft_pool(&self) -> Vec<&CardDefinition> {
        self.cards_by_tier(1)
    }

    #[must_use]
    pub fn advisors_sorted(&self) -> Vec<&AdvisorDefinition> {
        let mut all: Vec<_> = self.advisors.values().collect();
        all.sort_by_key(|a| a.id);
        all
    }

    #[must_use]
    pub fn events_sorted(&self) -> Vec<&MarketEventDefinition> {
        let mut all: Vec<_> = self.events.values().collect();
        all.sort_by_key(|e| e.id);
        all
    }

    /// Deal a fresh run's deck.
    ///
    /// Samples `size` cards with replacement from the tier-1 Generic cards,
    /// or from every tier-1 card when the catalog has no Generic ones.
    /// Returns an empty deck when there is no tier-1 card at all.
    pub fn starter_deck(&self, size: usize, rng: &mut GameRng) -> Vec<CardId> {
        let mut pool: Vec<CardId> = self
            .find(|c| c.tier == 1 && c.sector.is_generic())
            .iter()
            .map(|c| c.id)
            .collect();
        if pool.is_empty() {
            pool = self.draft_pool().iter().map(|c| c.id).collect();
        }

        (0..size)
            .filter_map(|_| rng.choose(&pool).copied())
            .collect()
    }
}
