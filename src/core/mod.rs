//! Core engine types: RNG, configuration, errors.
//!
//! These are the leaves every other module depends on.

pub mod config;
pub mod error;
pub mod rng;

pub use config::{GameConfig, RunConfig, ShopConfig};
pub use error::{CatalogError, EngineError, Resource};
pub use rng::GameRng;
