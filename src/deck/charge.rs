//! Charge tokens.
//!
//! Playing or discarding the selection costs one of the round's limited
//! hands or discards. `DeckState` does not track those counters itself; it
//! demands a token instead, and only the round controller can mint one after
//! decrementing its counter.

/// Proof that one hand ("market hour") was spent.
#[derive(Debug)]
#[must_use = "a spent charge should be used or refunded"]
pub struct HandCharge {
    _private: (),
}

/// Proof that one discard ("shred") was spent.
#[derive(Debug)]
#[must_use = "a spent charge should be used or refunded"]
pub struct DiscardCharge {
    _private: (),
}

impl HandCharge {
    pub(crate) fn mint() -> Self {
        Self { _private: () }
    }
}

impl DiscardCharge {
    pub(crate) fn mint() -> Self {
        Self { _private: () }
    }
}
