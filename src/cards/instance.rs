//! Card instances - one physical copy in a round's deck.
//!
//! A run owns a multiset of `CardId`s. When a round starts every entry is
//! turned into a `CardInstance` with its own `InstanceId`, so two copies of
//! the same definition can be told apart when selecting or fusing.

use serde::{Deserialize, Serialize};

use super::definition::CardId;

/// Identifier of one card copy within a round.
///
/// Only unique inside the `DeckState` that allocated it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct InstanceId(pub u32);

impl InstanceId {
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for InstanceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Instance({})", self.0)
    }
}

/// A card copy in play.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CardInstance {
    /// Unique id for this copy.
    pub id: InstanceId,

    /// Reference to the card definition.
    pub card_id: CardId,
}

impl CardInstance {
    #[must_use]
    pub const fn new(id: InstanceId, card_id: CardId) -> Self {
        Self { id, card_id }
    }

    /// Whether two copies share a definition.
    #[must_use]
    pub fn same_card(&self, other: &CardInstance) -> bool {
        self.card_id == other.card_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_card() {
        let a = CardInstance::new(InstanceId(1), CardId::new(7));
        let b = CardInstance::new(InstanceId(2), CardId::new(7));
        let c = CardInstance::new(InstanceId(3), CardId::new(8));

        assert!(a.same_card(&b));
        assert!(!a.same_card(&c));
        assert_ne!(a, b);
    }

    #[test]
    fn test_display() {
        assert_eq!(InstanceId(4).to_string(), "Instance(4)");
    }
}
