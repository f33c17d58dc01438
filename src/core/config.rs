//! Run and shop configuration.
//!
//! The engine never hardcodes hand sizes, prices or heat caps. Callers build
//! a `GameConfig` at startup (or deserialize one) and pass the relevant part
//! into each component:
//! - `RunConfig`: round resources, heat cap, starting economy, quota base
//! - `ShopConfig`: offer counts and service prices
//!
//! Defaults are the shipped balance values.

use serde::{Deserialize, Serialize};

/// Round and run tuning.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    /// Hand is refilled up to this many cards ("RAM limit").
    pub max_hand_size: usize,

    /// Maximum number of selected cards per play or discard.
    pub max_selection_size: usize,

    /// Plays ("market hours") available per round.
    pub max_hands: u32,

    /// Discards ("shreds") available per round.
    pub max_discards: u32,

    /// Flat heat added per card discarded.
    pub discard_heat_per_card: i64,

    /// Heat cap. Reaching it ends the round in a loss.
    pub max_heat: i64,

    /// Cash at the start of a new run.
    pub starting_cash: i64,

    /// Cards dealt into a fresh run's deck.
    pub starter_deck_size: usize,

    /// Quota for quarter 1, month 1.
    pub base_quota: u64,

    /// Add the final round yield to cash when a round is won.
    pub bank_yield: bool,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            max_hand_size: 8,
            max_selection_size: 5,
            max_hands: 4,
            max_discards: 3,
            discard_heat_per_card: 2,
            max_heat: 100,
            starting_cash: 10,
            starter_deck_size: 8,
            base_quota: 25,
            bank_yield: true,
        }
    }
}

impl RunConfig {
    /// Override the hand size.
    #[must_use]
    pub fn with_hand_size(mut self, size: usize) -> Self {
        self.max_hand_size = size;
        self
    }

    /// Override the selection cap.
    #[must_use]
    pub fn with_selection_size(mut self, size: usize) -> Self {
        self.max_selection_size = size;
        self
    }

    /// Override plays and discards per round.
    #[must_use]
    pub fn with_charges(mut self, hands: u32, discards: u32) -> Self {
        self.max_hands = hands;
        self.max_discards = discards;
        self
    }

    /// Override the starting cash.
    #[must_use]
    pub fn with_starting_cash(mut self, cash: i64) -> Self {
        self.starting_cash = cash;
        self
    }

    /// Override yield banking.
    #[must_use]
    pub fn with_banking(mut self, bank_yield: bool) -> Self {
        self.bank_yield = bank_yield;
        self
    }
}

/// Shop and service pricing.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShopConfig {
    /// Card offers per inventory.
    pub card_offer_count: usize,

    /// Price every card offer starts from before variance.
    pub card_base_price: i64,

    /// Card prices vary by up to this much either side of the base price.
    pub card_price_variance: i64,

    /// Floor for a card offer's price.
    pub min_card_price: i64,

    /// Cost of regenerating the inventory.
    pub reroll_cost: i64,

    /// Cost of removing one card from the deck.
    pub remove_card_cost: i64,

    /// Cost of one laundering.
    pub launder_cost: i64,

    /// Heat removed by one laundering.
    pub launder_amount: i64,

    /// Free cards offered after a won round.
    pub draft_offer_count: usize,
}

impl Default for ShopConfig {
    fn default() -> Self {
        Self {
            card_offer_count: 3,
            card_base_price: 10,
            card_price_variance: 3,
            min_card_price: 5,
            reroll_cost: 5,
            remove_card_cost: 15,
            launder_cost: 20,
            launder_amount: 15,
            draft_offer_count: 3,
        }
    }
}

impl ShopConfig {
    /// Override the card base price and its variance.
    #[must_use]
    pub fn with_card_pricing(mut self, base: i64, variance: i64) -> Self {
        self.card_base_price = base;
        self.card_price_variance = variance;
        self
    }

    /// Override the reroll cost.
    #[must_use]
    pub fn with_reroll_cost(mut self, cost: i64) -> Self {
        self.reroll_cost = cost;
        self
    }

    /// Override laundering cost and strength.
    #[must_use]
    pub fn with_laundering(mut self, cost: i64, amount: i64) -> Self {
        self.launder_cost = cost;
        self.launder_amount = amount;
        self
    }
}

/// Complete engine configuration.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub run: RunConfig,
    pub shop: ShopConfig,
    /// Master seed. Deck, shop and calendar streams derive from it.
    pub seed: u64,
}

impl GameConfig {
    /// Create a config with default tuning and the given seed.
    #[must_use]
    pub fn with_seed(seed: u64) -> Self {
        Self {
            seed,
            ..Self::default()
        }
    }

    /// Replace the run tuning.
    #[must_use]
    pub fn with_run(mut self, run: RunConfig) -> Self {
        self.run = run;
        self
    }

    /// Replace the shop tuning.
    #[must_use]
    pub fn with_shop(mut self, shop: ShopConfig) -> Self {
        self.shop = shop;
        self
    }
}
