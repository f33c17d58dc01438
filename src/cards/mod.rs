//! Card system: definitions, instances, and the catalog.
//!
//! ## Key Types
//!
//! - `CardId` / `CardDefinition`: static asset card data
//! - `AdvisorDefinition` / `MarketEventDefinition`: run modifiers
//! - `CardInstance`: one copy of a card inside a round
//! - `CardCatalog`: immutable id-indexed lookup built at startup

pub mod advisor;
pub mod catalog;
pub mod definition;
pub mod instance;

pub use advisor::{
    AdvisorDefinition, AdvisorEffect, AdvisorId, EventEffect, EventId, MarketEventDefinition,
};
pub use catalog::{CardCatalog, CatalogData};
pub use definition::{CardDefinition, CardId, Sector};
pub use instance::{CardInstance, InstanceId};
