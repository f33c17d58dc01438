//! Shop offers.

use serde::{Deserialize, Serialize};

use crate::cards::{AdvisorId, CardId};

/// What an offer sells.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OfferItem {
    Card(CardId),
    Advisor(AdvisorId),
}

/// One slot in the shop. Each offer can be bought once.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShopOffer {
    pub item: OfferItem,
    pub price: i64,
    pub sold: bool,
}

impl ShopOffer {
    #[must_use]
    pub fn card(card: CardId, price: i64) -> Self {
        Self {
            item: OfferItem::Card(card),
            price,
            sold: false,
        }
    }

    #[must_use]
    pub fn advisor(advisor: AdvisorId, price: i64) -> Self {
        Self {
            item: OfferItem::Advisor(advisor),
            price,
            sold: false,
        }
    }

    #[must_use]
    pub fn is_available(&self) -> bool {
        !self.sold
    }
}
