//! Round-level scenarios driven through the public API.

mod common;

use common::{DrawAndKeep, Feeder, Idle, InvariantChecker};
use startups_engine::core::STARTING_CASH;
use startups_engine::rules::{majority, settlement};
use startups_engine::{
    Company, CompanyRegistry, EngineError, EventLog, GameBuilder, GameConfig, GameEvent,
    GameObserver, Player, PlayerId, PlayerMap, Share, ShareId, TableSnapshot, TableView,
};

fn players_owning(company: Company, counts: &[u32]) -> PlayerMap<Player> {
    let mut players = PlayerMap::new(counts.len(), |id| Player::new(id, format!("P{}", id.0)));
    for (i, &n) in counts.iter().enumerate() {
        for _ in 0..n {
            players[PlayerId::new(i as u8)].augment_portfolio(company);
        }
    }
    players
}

/// Keeps both observers fed.
struct Both<'a>(&'a mut InvariantChecker, &'a mut EventLog);

impl GameObserver for Both<'_> {
    fn on_event(&mut self, event: &GameEvent, view: &TableView<'_>) {
        self.0.on_event(event, view);
        self.1.on_event(event, view);
    }
}

/// Two players who only draw and keep: the market stays empty, every draw
/// is free and the round lasts exactly one turn per deck share.
#[test]
fn test_draw_only_round() {
    let game = GameBuilder::new()
        .seat("Ada", DrawAndKeep)
        .seat("Bo", DrawAndKeep)
        .seed(3)
        .build()
        .unwrap();

    let mut checker = InvariantChecker::new(40);
    let mut log = EventLog::new();
    let summary = game.play(&mut Both(&mut checker, &mut log)).unwrap();
    assert!(checker.violations.is_empty(), "{:#?}", checker.violations);

    let round = &summary.rounds[0];
    assert_eq!(round.turns, 34);
    assert_eq!(round.last_actor, PlayerId::new(1));

    // Nothing ever reaches the market, so drawing is free.
    assert!(log
        .filter(|e| matches!(e, GameEvent::Drew { .. }))
        .all(|e| matches!(e, GameEvent::Drew { cost: 0, .. })));
    assert_eq!(log.filter(|e| matches!(e, GameEvent::Claimed { .. })).count(), 0);
    assert_eq!(log.filter(|e| matches!(e, GameEvent::Returned { .. })).count(), 0);

    let net: i32 = round
        .dividends
        .iter()
        .map(|d| d.collected - d.payments.iter().map(|&(_, a)| a).sum::<i32>())
        .sum();
    let total_cash: i32 = round.ranking.iter().map(|&(_, cash)| cash).sum();
    assert_eq!(total_cash, 2 * STARTING_CASH + net);
}

/// Players who feed the market and claim back from it keep shares and
/// cash+market value constant, and the round still runs the deck out.
#[test]
fn test_market_round_conserves_cash_and_shares() {
    let game = GameBuilder::new()
        .seat("Ada", Feeder)
        .seat("Bo", Feeder)
        .seat("Cy", Feeder)
        .seed(21)
        .build()
        .unwrap();

    let mut checker = InvariantChecker::new(40);
    let mut log = EventLog::new();
    let summary = game.play(&mut Both(&mut checker, &mut log)).unwrap();

    assert!(checker.violations.is_empty(), "{:#?}", checker.violations);
    let draws = log.filter(|e| matches!(e, GameEvent::Drew { .. })).count();
    let claims = log.filter(|e| matches!(e, GameEvent::Claimed { .. })).count();
    let kept = log.filter(|e| matches!(e, GameEvent::Folded { .. })).count();
    assert_eq!(draws, 40 - 9);
    assert!(claims > 0);
    // Claimed shares are kept, drawn ones go back to the market.
    assert_eq!(kept, claims);
    assert_eq!(summary.rounds[0].turns as usize, draws + claims);
}

/// A claimed share pays out every unit deposited on it by later draws.
#[test]
fn test_first_claim_pays_accrued_value() {
    let game = GameBuilder::new()
        .seat("Ada", Feeder)
        .seat("Bo", Feeder)
        .build()
        .unwrap();
    let mut log = EventLog::new();
    game.play(&mut log).unwrap();

    // Seat 0 pays 0, 2, 4 for its first draws and cannot afford 6. Its
    // fourth turn claims the first share it fed, which took one unit from
    // each of the five draws since.
    let first_claim = log
        .filter(|e| matches!(e, GameEvent::Claimed { .. }))
        .next()
        .cloned();
    match first_claim {
        Some(GameEvent::Claimed { player, payout, .. }) => {
            assert_eq!(player, PlayerId::new(0));
            assert_eq!(payout, 5);
        }
        other => panic!("expected a claim, got {other:?}"),
    }
}

/// A policy that skips its turn stops the game.
#[test]
fn test_broken_policy_is_fatal() {
    let game = GameBuilder::new()
        .seat("Ada", Idle)
        .seat("Bo", DrawAndKeep)
        .build()
        .unwrap();

    let result = game.play(&mut EventLog::new());
    assert!(matches!(result, Err(EngineError::InvariantViolation(_))));
}

/// A single 5-share company is all removed before dealing.
#[test]
fn test_tiny_registry_cannot_deal() {
    let registry = CompanyRegistry::new(vec![(Company::GiraffeBeer, 5)]).unwrap();
    let game = GameBuilder::new()
        .config(GameConfig::default().with_players(2))
        .registry(registry)
        .build()
        .unwrap();

    let result = game.play(&mut EventLog::new());
    assert!(matches!(result, Err(EngineError::DeckTooSmall { .. })));
}

/// 4/2/1 holdings: the minority pays 2 and 3, the holder collects 15.
#[test]
fn test_three_player_dividend() {
    let registry = CompanyRegistry::new(vec![(Company::OctoCoffee, 8)]).unwrap();
    let mut players = players_owning(Company::OctoCoffee, &[4, 2, 1]);

    majority::finalize(&registry, &mut players);
    assert!(players[PlayerId::new(0)].holds_majority(Company::OctoCoffee));

    let (dividends, _) = settlement::pay_dividends(&registry, &mut players);
    assert_eq!(dividends[0].collected, 15);

    let cash: Vec<i32> = players.values().map(Player::cash).collect();
    assert_eq!(cash, vec![25, 8, 7]);
}

/// A majority held through the round is cleared when folding a hand ties
/// it 3/3, and nobody pays.
#[test]
fn test_tie_after_folding_clears_majority() {
    let registry = CompanyRegistry::new(vec![(Company::OctoCoffee, 8)]).unwrap();
    let mut players = players_owning(Company::OctoCoffee, &[0, 0]);
    players[PlayerId::new(1)].reset_for_round(vec![Share::new(ShareId(0), Company::OctoCoffee)]);
    for _ in 0..3 {
        players[PlayerId::new(0)].augment_portfolio(Company::OctoCoffee);
    }
    for _ in 0..2 {
        players[PlayerId::new(1)].augment_portfolio(Company::OctoCoffee);
    }
    majority::update_after_turn(&registry, &mut players, PlayerId::new(0));
    assert!(players[PlayerId::new(0)].holds_majority(Company::OctoCoffee));

    assert_eq!(settlement::fold_hands(&mut players), 1);
    assert_eq!(players[PlayerId::new(1)].shares_of(Company::OctoCoffee), 3);

    let cleared = majority::finalize(&registry, &mut players);
    assert_eq!(
        cleared,
        vec![GameEvent::MajorityCleared {
            company: Company::OctoCoffee,
            previous: PlayerId::new(0),
        }]
    );
    let (dividends, events) = settlement::pay_dividends(&registry, &mut players);

    assert!(dividends.is_empty());
    assert!(players.values().all(|p| p.majorities().is_empty()));
    let cash: Vec<i32> = players.values().map(Player::cash).collect();
    assert_eq!(cash, vec![STARTING_CASH, STARTING_CASH]);
    assert_eq!(events, vec![GameEvent::NoDividend { company: Company::OctoCoffee }]);
}

/// Settlement debits are applied in full even when they push a payer below
/// zero; only the turn loop requires non-negative cash.
#[test]
fn test_dividends_can_leave_negative_cash() {
    let registry = CompanyRegistry::standard();
    let mut players = PlayerMap::new(2, |id| Player::new(id, format!("P{}", id.0)));
    for _ in 0..9 {
        players[PlayerId::new(0)].augment_portfolio(Company::ElephantMarsTravel);
    }
    for _ in 0..8 {
        players[PlayerId::new(0)].augment_portfolio(Company::HippoPowertech);
    }
    players[PlayerId::new(1)].augment_portfolio(Company::ElephantMarsTravel);
    players[PlayerId::new(1)].augment_portfolio(Company::HippoPowertech);

    majority::finalize(&registry, &mut players);
    let (dividends, _) = settlement::pay_dividends(&registry, &mut players);

    assert_eq!(dividends.len(), 2);
    assert_eq!(players[PlayerId::new(1)].cash(), STARTING_CASH - 8 - 7);
    assert_eq!(players[PlayerId::new(0)].cash(), STARTING_CASH + 3 * (8 + 7));
    assert!(players[PlayerId::new(1)].cash() < 0);
}

/// The view at hand-folding shows an empty deck and empty hands, and its
/// snapshot survives a JSON round trip.
#[test]
fn test_settlement_snapshot_serializes() {
    #[derive(Default)]
    struct AtFold(Option<TableSnapshot>);

    impl GameObserver for AtFold {
        fn on_event(&mut self, event: &GameEvent, view: &TableView<'_>) {
            if matches!(event, GameEvent::HandsFolded { .. }) {
                self.0 = Some(view.snapshot());
            }
        }
    }

    let game = GameBuilder::new().seed(99).build().unwrap();
    let mut observer = AtFold::default();
    game.play(&mut observer).unwrap();

    let snapshot = observer.0.unwrap();
    assert_eq!(snapshot.deck_len, 0);
    assert_eq!(snapshot.active, None);
    assert!(snapshot.players.iter().all(|p| p.hand_size == 0));

    let json = serde_json::to_string(&snapshot).unwrap();
    let back: TableSnapshot = serde_json::from_str(&json).unwrap();
    assert_eq!(back, snapshot);
}
