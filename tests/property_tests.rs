//! Property tests for the round invariants.
//!
//! - card count is conserved by play/discard/draw, and drops by one per fusion
//! - every selected card is in hand, within the selection limit
//! - rejected fusions leave the piles untouched
//! - heat stays within `[0, max_heat]`

use proptest::prelude::*;

use quantitative_easing::cards::{CardCatalog, CardId};
use quantitative_easing::core::{GameRng, RunConfig};
use quantitative_easing::round::RoundController;
use quantitative_easing::run::{quota_for, RunState};

const SAMPLE: &str = include_str!("../data/sample_catalog.json");

#[derive(Clone, Debug)]
enum Op {
    Select(usize),
    Deselect(usize),
    Play,
    Discard,
    Fuse(usize, usize),
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        4 => (0usize..8).prop_map(Op::Select),
        1 => (0usize..8).prop_map(Op::Deselect),
        1 => Just(Op::Play),
        1 => Just(Op::Discard),
        2 => (0usize..8, 0usize..8).prop_map(|(a, b)| Op::Fuse(a, b)),
    ]
}

fn deck() -> impl Strategy<Value = Vec<CardId>> {
    prop::collection::vec(prop::sample::select(vec![1u32, 1, 2, 10, 20, 31]), 0..20)
        .prop_map(|ids| ids.into_iter().map(CardId::new).collect())
}

/// A round that can neither be won nor lost within the test.
fn endless() -> RunConfig {
    RunConfig {
        base_quota: 1_000_000_000,
        max_heat: 1_000_000_000,
        ..RunConfig::default()
    }
    .with_charges(1_000, 1_000)
}

proptest! {
    #[test]
    fn prop_pile_invariants(cards in deck(), ops in prop::collection::vec(op(), 1..60), seed in any::<u64>()) {
        let catalog = CardCatalog::from_json(SAMPLE).unwrap();
        let config = endless();
        let mut run = RunState::with_deck(&config, cards.iter().copied());
        let mut round = RoundController::start(&config, &run, GameRng::new(seed));
        let mut calendar_rng = GameRng::new(seed ^ 1);
        let mut expected = cards.len();

        for step in ops {
            let hand: Vec<_> = round.deck().hand().iter().map(|c| c.id).collect();
            match step {
                Op::Select(i) => {
                    if let Some(&id) = hand.get(i) {
                        round.select(id).unwrap();
                    }
                }
                Op::Deselect(i) => {
                    if let Some(&id) = hand.get(i) {
                        round.deselect(id).unwrap();
                    }
                }
                Op::Play => {
                    let _ = round.play(&catalog, &mut run, &mut calendar_rng);
                }
                Op::Discard => {
                    let _ = round.discard(&catalog, &mut run, &mut calendar_rng);
                }
                Op::Fuse(a, b) => {
                    if let (Some(&a), Some(&b)) = (hand.get(a), hand.get(b)) {
                        let before = round.view();
                        match round.fuse(a, b, &catalog, &mut run) {
                            Ok(_) => expected -= 1,
                            Err(_) => {
                                prop_assert_eq!(round.view(), before);
                            }
                        }
                    }
                }
            }

            prop_assert!(round.is_active());
            let deck = round.deck();
            prop_assert_eq!(deck.total_cards(), expected);
            prop_assert_eq!(run.deck_size(), expected);
            prop_assert!(deck.hand().len() <= config.max_hand_size);
            prop_assert!(deck.selection().len() <= config.max_selection_size);
            for id in deck.selection() {
                prop_assert!(deck.hand_card(*id).is_some());
            }
        }
    }

    #[test]
    fn prop_heat_bounded(changes in prop::collection::vec(-300i64..300, 0..50)) {
        let config = RunConfig::default();
        let mut run = RunState::new(&config);
        for change in changes {
            run.add_heat(change);
            prop_assert!((0..=config.max_heat).contains(&run.heat()));
        }
    }

    #[test]
    fn prop_quota_rises_through_quarter(base in 1u64..1_000, quarter in 1u32..20) {
        let m1 = quota_for(base, quarter, 1);
        let m2 = quota_for(base, quarter, 2);
        let m3 = quota_for(base, quarter, 3);
        prop_assert!(m1 <= m2 && m2 <= m3);
        prop_assert_eq!(quota_for(base, quarter + 1, 1), m3);
    }
}
