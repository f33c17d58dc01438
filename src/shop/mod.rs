//! Shop and post-win draft.
//!
//! ## Key Types
//!
//! - `ShopEngine`: inventory generation, purchases, reroll, removal, laundering
//! - `ShopOffer` / `OfferItem`: one purchasable slot
//! - `DraftOffers`: free tier-1 picks after a win

pub mod draft;
pub mod engine;
pub mod offer;

pub use draft::DraftOffers;
pub use engine::ShopEngine;
pub use offer::{OfferItem, ShopOffer};
