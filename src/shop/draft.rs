//! Post-win draft: a handful of free tier-1 cards, pick one or skip.

use crate::cards::{CardCatalog, CardId};
use crate::core::error::EngineError;
use crate::core::rng::GameRng;
use crate::run::RunState;

/// Free card choices offered after a won round.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DraftOffers {
    choices: Vec<CardId>,
}

impl DraftOffers {
    /// Sample `count` cards uniformly (with replacement) from the draft pool.
    ///
    /// Fewer are offered only when the pool is empty.
    pub fn roll(catalog: &CardCatalog, count: usize, rng: &mut GameRng) -> Self {
        let pool: Vec<CardId> = catalog.draft_pool().iter().map(|c| c.id).collect();
        let choices: Vec<CardId> = (0..count)
            .filter_map(|_| rng.choose(&pool).copied())
            .collect();
        tracing::debug!(?choices, "draft rolled");
        Self { choices }
    }

    #[must_use]
    pub fn choices(&self) -> &[CardId] {
        &self.choices
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.choices.is_empty()
    }

    /// Add the chosen card to the run's deck.
    ///
    /// The caller drops the draft afterwards; only one pick is allowed.
    ///
    /// # Errors
    ///
    /// `OfferUnavailable` for an out-of-range index.
    pub fn claim(&self, index: usize, run: &mut RunState) -> Result<CardId, EngineError> {
        let card = self
            .choices
            .get(index)
            .copied()
            .ok_or(EngineError::OfferUnavailable(index))?;
        run.add_card(card);
        tracing::info!(card = %card, "drafted");
        Ok(card)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::CardDefinition;
    use crate::core::config::RunConfig;

    fn catalog() -> CardCatalog {
        let mut catalog = CardCatalog::new();
        catalog.register_card(CardDefinition::new(CardId::new(1), "Bond", "Generic"));
        catalog.register_card(CardDefinition::new(CardId::new(2), "Junk Bond", "Generic").with_tier(2));
        catalog
    }

    #[test]
    fn test_roll_uses_tier_one_only() {
        let mut rng = GameRng::new(8);
        let draft = DraftOffers::roll(&catalog(), 3, &mut rng);
        assert_eq!(draft.choices(), &[CardId::new(1); 3]);
    }

    #[test]
    fn test_roll_empty_pool() {
        let mut rng = GameRng::new(8);
        let draft = DraftOffers::roll(&CardCatalog::new(), 3, &mut rng);
        assert!(draft.is_empty());
    }

    #[test]
    fn test_claim() {
        let mut rng = GameRng::new(8);
        let mut run = RunState::new(&RunConfig::default());
        let draft = DraftOffers::roll(&catalog(), 3, &mut rng);

        let err = draft.claim(7, &mut run).unwrap_err();
        assert_eq!(err, EngineError::OfferUnavailable(7));
        assert_eq!(run.deck_size(), 0);

        assert_eq!(draft.claim(0, &mut run).unwrap(), CardId::new(1));
        assert_eq!(run.deck_size(), 1);
    }
}
