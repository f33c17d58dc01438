//! Shop transactions against the fixture catalog.
//!
//! Every failure case checks that cash, deck, advisors and inventory are
//! left exactly as they were.

use quantitative_easing::cards::{AdvisorId, CardCatalog, CardId};
use quantitative_easing::core::{EngineError, GameConfig, GameRng, RunConfig, ShopConfig};
use quantitative_easing::run::{LaunderOutcome, RunState};
use quantitative_easing::session::{GamePhase, GameSession};
use quantitative_easing::shop::{OfferItem, ShopEngine, ShopOffer};

const SAMPLE: &str = include_str!("../data/sample_catalog.json");

fn catalog() -> CardCatalog {
    CardCatalog::from_json(SAMPLE).unwrap()
}

fn run_with_cash(cash: i64) -> RunState {
    let config = RunConfig::default().with_starting_cash(cash);
    RunState::with_deck(&config, [CardId::new(1), CardId::new(1), CardId::new(20)])
}

fn stocked(catalog: &CardCatalog, run: &RunState, seed: u64) -> ShopEngine {
    let mut shop = ShopEngine::new(ShopConfig::default());
    shop.generate_inventory(catalog, run, &mut GameRng::new(seed));
    shop
}

fn advisor_slot(shop: &ShopEngine) -> usize {
    shop.offers()
        .iter()
        .position(|o| matches!(o.item, OfferItem::Advisor(_)))
        .unwrap()
}

/// Three tier-1 cards priced around the shop base price, plus one advisor.
#[test]
fn test_inventory_from_draft_pool() {
    let catalog = catalog();
    let run = run_with_cash(0);
    let mut shop = ShopEngine::new(ShopConfig::default());
    let mut rng = GameRng::new(1);

    for _ in 0..30 {
        shop.generate_inventory(&catalog, &run, &mut rng);
        let offers = shop.offers();
        assert_eq!(offers.len(), 4);

        for offer in &offers[..3] {
            let OfferItem::Card(id) = offer.item else {
                panic!("expected a card offer");
            };
            let card = catalog.card(id).unwrap();
            assert_eq!(card.tier, 1);
            assert!((7..=13).contains(&offer.price));
        }

        let OfferItem::Advisor(id) = offers[3].item else {
            panic!("expected an advisor offer");
        };
        assert_eq!(offers[3].price, catalog.advisor(id).unwrap().price);
    }
}

/// The same seed stocks the same shop.
#[test]
fn test_inventory_is_seeded() {
    let catalog = catalog();
    let run = run_with_cash(0);
    assert_eq!(stocked(&catalog, &run, 9).offers(), stocked(&catalog, &run, 9).offers());
}

/// Owned advisors drop out of the pool until none remain.
#[test]
fn test_advisor_pool_shrinks() {
    let catalog = catalog();
    let mut run = run_with_cash(0);
    run.add_advisor(AdvisorId::new(1));

    let shop = stocked(&catalog, &run, 3);
    assert_eq!(shop.offers()[3].item, OfferItem::Advisor(AdvisorId::new(2)));

    run.add_advisor(AdvisorId::new(2));
    let shop = stocked(&catalog, &run, 3);
    assert_eq!(shop.offers().len(), 3);
}

/// Buying deducts exactly the price and adds the item once.
#[test]
fn test_buy_success_and_single_use() {
    let catalog = catalog();
    let mut run = run_with_cash(200);
    let mut shop = stocked(&catalog, &run, 5);

    let offer: ShopOffer = shop.offers()[1];
    let OfferItem::Card(card) = offer.item else {
        panic!("expected a card offer");
    };
    let copies = run.copies_of(card);

    assert_eq!(shop.buy(1, &mut run).unwrap(), offer.item);
    assert_eq!(run.cash(), 200 - offer.price);
    assert_eq!(run.copies_of(card), copies + 1);
    assert!(shop.offers()[1].sold);

    assert_eq!(shop.buy(1, &mut run).unwrap_err(), EngineError::OfferUnavailable(1));
    assert_eq!(run.cash(), 200 - offer.price);

    let slot = advisor_slot(&shop);
    let OfferItem::Advisor(advisor) = shop.offers()[slot].item else {
        unreachable!();
    };
    shop.buy(slot, &mut run).unwrap();
    assert!(run.has_advisor(advisor));
}

/// A purchase the run cannot afford changes nothing.
#[test]
fn test_buy_insufficient_funds() {
    let catalog = catalog();
    let mut run = run_with_cash(20);
    let mut shop = stocked(&catalog, &run, 5);
    let slot = advisor_slot(&shop);
    let price = shop.offers()[slot].price;
    let before = run.snapshot();

    assert_eq!(shop.buy(slot, &mut run).unwrap_err(), EngineError::insufficient(price, 20));
    assert_eq!(run.snapshot(), before);
    assert!(shop.offers()[slot].is_available());
}

/// Rerolling charges and restocks; without funds it keeps the stock.
#[test]
fn test_reroll() {
    let catalog = catalog();
    let mut rng = GameRng::new(12);

    let mut run = run_with_cash(5);
    let mut shop = stocked(&catalog, &run, 12);
    shop.reroll(&catalog, &mut run, &mut rng).unwrap();
    assert_eq!(run.cash(), 0);
    assert_eq!(shop.offers().len(), 4);

    let before = shop.offers().to_vec();
    let err = shop.reroll(&catalog, &mut run, &mut rng).unwrap_err();
    assert_eq!(err, EngineError::insufficient(5, 0));
    assert_eq!(shop.offers(), before.as_slice());
}

/// Removal takes exactly one copy for the service fee.
#[test]
fn test_remove_card() {
    let mut run = run_with_cash(30);
    let shop = ShopEngine::new(ShopConfig::default());

    shop.remove_card(CardId::new(1), &mut run).unwrap();
    assert_eq!(run.copies_of(CardId::new(1)), 1);
    assert_eq!(run.cash(), 15);

    shop.remove_card(CardId::new(1), &mut run).unwrap();
    assert_eq!(run.copies_of(CardId::new(1)), 0);
    assert_eq!(run.cash(), 0);

    assert_eq!(
        shop.remove_card(CardId::new(20), &mut run).unwrap_err(),
        EngineError::insufficient(15, 0)
    );
    assert_eq!(run.deck_size(), 1);
}

/// Laundering clamps at zero and reports a clean record for free.
#[test]
fn test_launder() {
    let mut run = run_with_cash(50);
    let shop = ShopEngine::new(ShopConfig::default());

    assert_eq!(shop.launder(&mut run).unwrap(), LaunderOutcome::AlreadyClean);
    assert_eq!(run.cash(), 50);

    run.add_heat(8);
    assert_eq!(
        shop.launder(&mut run).unwrap(),
        LaunderOutcome::Laundered { removed: 8, heat: 0 }
    );
    assert_eq!(run.cash(), 30);

    let mut broke = run_with_cash(0);
    broke.add_heat(40);
    assert!(matches!(shop.launder(&mut broke), Err(EngineError::InsufficientFunds { .. })));
    assert_eq!(broke.heat(), 40);
}

/// The session's shop phase routes to the same services.
#[test]
fn test_session_shop_phase() {
    let catalog = catalog();
    let mut session = GameSession::new(catalog, GameConfig::with_seed(31));
    session.start_new_run().unwrap();

    let hand: Vec<_> = session.round().unwrap().deck().hand().iter().map(|c| c.id).collect();
    session.select(hand[0]).unwrap();
    session.select(hand[1]).unwrap();
    session.discard().unwrap();
    session.add_score(100).unwrap();
    session.skip_draft().unwrap();
    assert_eq!(session.phase(), GamePhase::Shop);

    let cash = session.snapshot().cash;
    assert_eq!(cash, 110);
    assert_eq!(session.snapshot().heat, 4);

    assert_eq!(
        session.launder().unwrap(),
        LaunderOutcome::Laundered { removed: 4, heat: 0 }
    );
    session.remove_card(CardId::new(1)).unwrap();
    session.reroll().unwrap();
    assert_eq!(session.snapshot().cash, cash - 20 - 15 - 5);
    assert_eq!(session.snapshot().deck_size, 7);

    session.leave_shop().unwrap();
    assert_eq!(session.round().unwrap().deck().total_cards(), 7);
}
