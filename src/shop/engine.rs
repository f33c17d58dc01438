//! Between-round shop.
//!
//! Every transaction checks affordability before touching anything, so a
//! rejected purchase, reroll, removal or laundering leaves the run and the
//! inventory exactly as they were.

use crate::cards::{CardCatalog, CardId};
use crate::core::config::ShopConfig;
use crate::core::error::EngineError;
use crate::core::rng::GameRng;
use crate::run::{LaunderOutcome, RunState};

use super::offer::{OfferItem, ShopOffer};

/// Inventory plus the priced services.
#[derive(Clone, Debug)]
pub struct ShopEngine {
    config: ShopConfig,
    inventory: Vec<ShopOffer>,
}

impl ShopEngine {
    /// Create a shop with an empty inventory.
    #[must_use]
    pub fn new(config: ShopConfig) -> Self {
        Self {
            config,
            inventory: Vec::new(),
        }
    }

    #[must_use]
    pub fn config(&self) -> &ShopConfig {
        &self.config
    }

    /// Current offers, cards first then the advisor (if any).
    #[must_use]
    pub fn offers(&self) -> &[ShopOffer] {
        &self.inventory
    }

    /// Price of a card offer: `max(floor, base ± variance)`.
    ///
    /// Every card shares the same base; the definition's `cost` is not used.
    fn card_price(&self, rng: &mut GameRng) -> i64 {
        let variance = self.config.card_price_variance.abs();
        let swing = rng.gen_inclusive(-variance..=variance);
        (self.config.card_base_price + swing).max(self.config.min_card_price)
    }

    /// Replace the inventory.
    ///
    /// Card offers are drawn uniformly from the tier-1 pool. One advisor the
    /// run does not own yet is added when any remain.
    pub fn generate_inventory(&mut self, catalog: &CardCatalog, run: &RunState, rng: &mut GameRng) {
        let pool = catalog.draft_pool();
        let mut inventory = Vec::with_capacity(self.config.card_offer_count + 1);

        for _ in 0..self.config.card_offer_count {
            let Some(card) = rng.choose(&pool) else {
                break;
            };
            inventory.push(ShopOffer::card(card.id, self.card_price(rng)));
        }

        let hireable: Vec<_> = catalog
            .advisors_sorted()
            .into_iter()
            .filter(|a| !run.has_advisor(a.id))
            .collect();
        if let Some(advisor) = rng.choose(&hireable) {
            inventory.push(ShopOffer::advisor(advisor.id, advisor.price));
        }

        tracing::debug!(offers = inventory.len(), "shop stocked");
        self.inventory = inventory;
    }

    /// Pay the reroll cost and regenerate the inventory.
    ///
    /// # Errors
    ///
    /// `InsufficientFunds`; the inventory is kept.
    pub fn reroll(
        &mut self,
        catalog: &CardCatalog,
        run: &mut RunState,
        rng: &mut GameRng,
    ) -> Result<(), EngineError> {
        if let Err(err) = run.try_spend(self.config.reroll_cost) {
            tracing::warn!(%err, "reroll rejected");
            return Err(err);
        }
        self.generate_inventory(catalog, run, rng);
        tracing::info!(cost = self.config.reroll_cost, cash = run.cash(), "shop rerolled");
        Ok(())
    }

    /// Buy the offer at `index`.
    ///
    /// # Errors
    ///
    /// `OfferUnavailable` (sold or out of range), `AdvisorAlreadyOwned` or
    /// `InsufficientFunds`. Nothing changes on error.
    pub fn buy(&mut self, index: usize, run: &mut RunState) -> Result<OfferItem, EngineError> {
        let offer = self
            .inventory
            .get(index)
            .filter(|o| o.is_available())
            .copied()
            .ok_or(EngineError::OfferUnavailable(index))?;

        if let OfferItem::Advisor(advisor) = offer.item {
            if run.has_advisor(advisor) {
                return Err(EngineError::AdvisorAlreadyOwned(advisor));
            }
        }
        if let Err(err) = run.try_spend(offer.price) {
            tracing::warn!(%err, index, "purchase rejected");
            return Err(err);
        }

        match offer.item {
            OfferItem::Card(card) => run.add_card(card),
            OfferItem::Advisor(advisor) => {
                run.add_advisor(advisor);
            }
        }
        self.inventory[index].sold = true;

        tracing::info!(item = ?offer.item, price = offer.price, cash = run.cash(), "purchased");
        Ok(offer.item)
    }

    /// Pay to remove one copy of `card` from the owned deck.
    ///
    /// # Errors
    ///
    /// `CardNotOwned` or `InsufficientFunds`.
    pub fn remove_card(&self, card: CardId, run: &mut RunState) -> Result<(), EngineError> {
        if !run.owns_card(card) {
            return Err(EngineError::CardNotOwned(card));
        }
        if let Err(err) = run.try_spend(self.config.remove_card_cost) {
            tracing::warn!(%err, card = %card, "removal rejected");
            return Err(err);
        }
        run.remove_card(card);
        tracing::info!(card = %card, deck = run.deck_size(), "card removed");
        Ok(())
    }

    /// Pay to lower heat.
    ///
    /// # Errors
    ///
    /// `InsufficientFunds` when there is heat to clean.
    pub fn launder(&self, run: &mut RunState) -> Result<LaunderOutcome, EngineError> {
        run.launder(self.config.launder_cost, self.config.launder_amount)
            .inspect_err(|err| tracing::warn!(%err, "laundering rejected"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{AdvisorDefinition, AdvisorEffect, AdvisorId, CardDefinition};
    use crate::core::config::RunConfig;

    fn catalog() -> CardCatalog {
        let mut catalog = CardCatalog::new();
        catalog.register_card(
            CardDefinition::new(CardId::new(1), "Bond", "Generic").with_cost(10),
        );
        catalog.register_card(
            CardDefinition::new(CardId::new(2), "Sovereign Bond", "Generic")
                .with_tier(2)
                .with_cost(40),
        );
        catalog.register_card(CardDefinition::new(CardId::new(3), "Scrip", "Generic").with_cost(1));
        catalog.register_advisor(
            AdvisorDefinition::new(AdvisorId::new(1), "Quant", AdvisorEffect::sector_boost("Tech"))
                .with_price(50),
        );
        catalog
    }

    fn rich_run() -> RunState {
        let mut run = RunState::with_deck(&RunConfig::default(), [CardId::new(1), CardId::new(1)]);
        run.earn(200);
        run
    }

    #[test]
    fn test_inventory_shape_and_prices() {
        let catalog = catalog();
        let run = rich_run();
        let mut shop = ShopEngine::new(ShopConfig::default());
        let mut rng = GameRng::new(11);

        for _ in 0..50 {
            shop.generate_inventory(&catalog, &run, &mut rng);
            assert_eq!(shop.offers().len(), 4);
            for offer in &shop.offers()[..3] {
                assert!(matches!(offer.item, OfferItem::Card(_)));
                assert!((7..=13).contains(&offer.price));
            }
            assert_eq!(shop.offers()[3], ShopOffer::advisor(AdvisorId::new(1), 50));
        }
    }

    #[test]
    fn test_price_ignores_card_cost() {
        let mut catalog = CardCatalog::new();
        catalog.register_card(CardDefinition::new(CardId::new(1), "Penny", "Generic").with_cost(1));
        catalog.register_card(CardDefinition::new(CardId::new(2), "Bullion", "Generic").with_cost(60));
        let run = rich_run();
        let mut shop = ShopEngine::new(ShopConfig::default());
        let mut rng = GameRng::new(21);

        let mut seen = rustc_hash::FxHashSet::default();
        for _ in 0..50 {
            shop.generate_inventory(&catalog, &run, &mut rng);
            for offer in shop.offers() {
                assert!((7..=13).contains(&offer.price), "price {}", offer.price);
                seen.insert(offer.item);
            }
        }
        assert_eq!(seen.len(), 2);
    }

    #[test]
    fn test_price_floor() {
        let catalog = catalog();
        let run = rich_run();
        let config = ShopConfig::default().with_card_pricing(4, 3);
        let mut shop = ShopEngine::new(config);
        let mut rng = GameRng::new(8);

        for _ in 0..30 {
            shop.generate_inventory(&catalog, &run, &mut rng);
            for offer in &shop.offers()[..3] {
                assert!((5..=7).contains(&offer.price));
            }
        }
    }

    #[test]
    fn test_owned_advisor_not_offered() {
        let catalog = catalog();
        let mut run = rich_run();
        run.add_advisor(AdvisorId::new(1));
        let mut shop = ShopEngine::new(ShopConfig::default());

        shop.generate_inventory(&catalog, &run, &mut GameRng::new(1));
        assert_eq!(shop.offers().len(), 3);
    }

    #[test]
    fn test_buy_card_then_sold() {
        let catalog = catalog();
        let mut run = rich_run();
        let mut shop = ShopEngine::new(ShopConfig::default());
        shop.generate_inventory(&catalog, &run, &mut GameRng::new(2));
        let price = shop.offers()[0].price;

        let item = shop.buy(0, &mut run).unwrap();
        assert!(matches!(item, OfferItem::Card(_)));
        assert_eq!(run.cash(), 210 - price);
        assert_eq!(run.deck_size(), 3);

        assert_eq!(shop.buy(0, &mut run).unwrap_err(), EngineError::OfferUnavailable(0));
        assert_eq!(shop.buy(9, &mut run).unwrap_err(), EngineError::OfferUnavailable(9));
        assert_eq!(run.deck_size(), 3);
    }

    #[test]
    fn test_buy_unaffordable_is_noop() {
        let catalog = catalog();
        let mut run = RunState::new(&RunConfig::default());
        let mut shop = ShopEngine::new(ShopConfig::default());
        shop.generate_inventory(&catalog, &run, &mut GameRng::new(2));

        let err = shop.buy(3, &mut run).unwrap_err();
        assert_eq!(err, EngineError::insufficient(50, 10));
        assert_eq!(run.cash(), 10);
        assert!(!run.has_advisor(AdvisorId::new(1)));
        assert!(shop.offers()[3].is_available());
    }

    #[test]
    fn test_buy_advisor() {
        let catalog = catalog();
        let mut run = rich_run();
        let mut shop = ShopEngine::new(ShopConfig::default());
        shop.generate_inventory(&catalog, &run, &mut GameRng::new(2));

        assert_eq!(shop.buy(3, &mut run).unwrap(), OfferItem::Advisor(AdvisorId::new(1)));
        assert!(run.has_advisor(AdvisorId::new(1)));
        assert_eq!(run.cash(), 160);
    }

    #[test]
    fn test_reroll_restocks_and_charges() {
        let catalog = catalog();
        let mut run = rich_run();
        let mut shop = ShopEngine::new(ShopConfig::default());
        let mut rng = GameRng::new(4);
        shop.generate_inventory(&catalog, &run, &mut rng);
        shop.buy(0, &mut run).unwrap();
        let cash = run.cash();

        shop.reroll(&catalog, &mut run, &mut rng).unwrap();
        assert_eq!(run.cash(), cash - 5);
        assert_eq!(shop.offers().len(), 4);
        assert!(shop.offers().iter().all(ShopOffer::is_available));
    }

    #[test]
    fn test_reroll_insufficient_keeps_inventory() {
        let catalog = catalog();
        let mut run = RunState::new(&RunConfig::default().with_starting_cash(4));
        let mut shop = ShopEngine::new(ShopConfig::default());
        let mut rng = GameRng::new(4);
        shop.generate_inventory(&catalog, &run, &mut rng);
        let before = shop.offers().to_vec();

        let err = shop.reroll(&catalog, &mut run, &mut rng).unwrap_err();
        assert_eq!(err, EngineError::insufficient(5, 4));
        assert_eq!(shop.offers(), before.as_slice());
        assert_eq!(run.cash(), 4);
    }

    #[test]
    fn test_remove_card() {
        let mut run = rich_run();
        let shop = ShopEngine::new(ShopConfig::default());

        shop.remove_card(CardId::new(1), &mut run).unwrap();
        assert_eq!(run.deck_size(), 1);
        assert_eq!(run.cash(), 195);

        let err = shop.remove_card(CardId::new(3), &mut run).unwrap_err();
        assert_eq!(err, EngineError::CardNotOwned(CardId::new(3)));

        let mut poor = RunState::with_deck(&RunConfig::default(), [CardId::new(1)]);
        let err = shop.remove_card(CardId::new(1), &mut poor).unwrap_err();
        assert_eq!(err, EngineError::insufficient(15, 10));
        assert_eq!(poor.deck_size(), 1);
    }

    #[test]
    fn test_launder_through_shop() {
        let mut run = rich_run();
        let shop = ShopEngine::new(ShopConfig::default().with_laundering(20, 15));

        assert_eq!(shop.launder(&mut run).unwrap(), LaunderOutcome::AlreadyClean);
        run.add_heat(40);
        assert_eq!(
            shop.launder(&mut run).unwrap(),
            LaunderOutcome::Laundered { removed: 15, heat: 25 }
        );
        assert_eq!(run.cash(), 190);
    }
}
