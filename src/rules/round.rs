//! The round engine: setup, turn loop, settlement.
//!
//! ## Lifecycle
//!
//! 1. [`Round::begin_round`] builds the supply, removes five shares at
//!    random, shuffles, deals three shares per player in turn order and
//!    resets every player's cash, portfolio and majorities.
//! 2. [`Round::play_turn`] runs the active player's policy, applies the
//!    after-turn majority rule and audits the invariants. Repeat while the
//!    deck is non-empty.
//!
//! The acquire and dispose events of a turn are delivered with the table as
//! the turn left it, before the majority rule runs; majority events follow
//! with the updated table.
//! 3. [`Round::settle`] folds hands, decides majorities for good, pays
//!    dividends and awards victory points.
//!
//! [`Round::play_out`] chains the three.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::audit;
use super::majority;
use super::roster::Roster;
use super::settlement::{self, Dividend};
use crate::core::company::CompanyRegistry;
use crate::core::config::{HAND_SIZE, REMOVED_SHARES};
use crate::core::error::EngineError;
use crate::core::player::{Player, PlayerId, PlayerMap};
use crate::core::rng::GameRng;
use crate::core::share::{Share, ShareId};
use crate::core::state::TableView;
use crate::events::{GameEvent, GameObserver};
use crate::policy::Turn;
use crate::zones::Table;

/// Outcome of a settled round.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundResult {
    /// Round number (1-based).
    pub round: u32,
    pub turns: u32,
    /// Player who took the last turn.
    pub last_actor: PlayerId,
    pub dividends: Vec<Dividend>,
    /// Final cash, richest first.
    pub ranking: Vec<(PlayerId, i32)>,
    /// Victory points given this round, in ranking order.
    pub awards: Vec<(PlayerId, i32)>,
}

/// One round in progress.
#[derive(Debug)]
pub struct Round {
    index: u32,
    table: Table,
    turn_order: Vec<PlayerId>,
    position: usize,
    turns: u32,
    last_actor: Option<PlayerId>,
    circulation: usize,
}

impl Round {
    /// Deal a new round.
    ///
    /// `turn_order` must list every seat exactly once; its first entry plays
    /// first.
    pub fn begin_round(
        registry: &CompanyRegistry,
        players: &mut PlayerMap<Player>,
        turn_order: Vec<PlayerId>,
        index: u32,
        rng: &mut GameRng,
    ) -> Result<Self, EngineError> {
        check_turn_order(&turn_order, players.player_count())?;

        let mut supply = build_supply(registry);
        let removed = rng.remove_random(&mut supply, REMOVED_SHARES);
        rng.shuffle(&mut supply);

        let dealt = HAND_SIZE * turn_order.len();
        if supply.len() <= dealt {
            return Err(EngineError::DeckTooSmall {
                shares: supply.len(),
                dealt,
            });
        }
        let circulation = supply.len();

        let mut shares = supply.into_iter();
        for &id in &turn_order {
            players[id].reset_for_round(shares.by_ref().take(HAND_SIZE));
        }
        let table = Table::new(shares.collect());

        debug!(
            round = index,
            removed = removed.len(),
            circulation,
            deck = table.deck_len(),
            "round dealt"
        );
        audit::check_circulation(circulation, &table, players)?;

        Ok(Self {
            index,
            table,
            turn_order,
            position: 0,
            turns: 0,
            last_actor: None,
            circulation,
        })
    }

    /// Round number (1-based).
    #[must_use]
    pub fn index(&self) -> u32 {
        self.index
    }

    #[must_use]
    pub fn turn_order(&self) -> &[PlayerId] {
        &self.turn_order
    }

    /// Player due to act next.
    #[must_use]
    pub fn next_player(&self) -> PlayerId {
        self.turn_order[self.position]
    }

    /// Player who acted last, once a turn has been played.
    #[must_use]
    pub fn last_actor(&self) -> Option<PlayerId> {
        self.last_actor
    }

    #[must_use]
    pub fn turns_played(&self) -> u32 {
        self.turns
    }

    /// Shares in play this round (supply minus the removed ones).
    #[must_use]
    pub fn circulation(&self) -> usize {
        self.circulation
    }

    #[must_use]
    pub fn table(&self) -> &Table {
        &self.table
    }

    /// Whether the deck has run out.
    #[must_use]
    pub fn is_over(&self) -> bool {
        self.table.deck_is_empty()
    }

    /// Read-only view of the round for `players`.
    #[must_use]
    pub fn view<'a>(&'a self, players: &'a PlayerMap<Player>) -> TableView<'a> {
        self.view_for(players, None)
    }

    fn view_for<'a>(&'a self, players: &'a PlayerMap<Player>, active: Option<PlayerId>) -> TableView<'a> {
        TableView::new(self.index, self.turns, active, &self.turn_order, players, &self.table)
    }

    fn emit<O: GameObserver + ?Sized>(
        &self,
        observer: &mut O,
        players: &PlayerMap<Player>,
        active: Option<PlayerId>,
        events: &[GameEvent],
    ) {
        let view = self.view_for(players, active);
        for event in events {
            observer.on_event(event, &view);
        }
    }

    /// Play the next player's turn. Returns who played.
    pub fn play_turn<O: GameObserver + ?Sized>(
        &mut self,
        registry: &CompanyRegistry,
        roster: &mut Roster,
        rng: &mut GameRng,
        observer: &mut O,
    ) -> Result<PlayerId, EngineError> {
        if self.is_over() {
            return Err(EngineError::InvariantViolation(format!(
                "round {} has no turn left",
                self.index
            )));
        }

        let active = self.next_player();
        self.turns += 1;
        let started = GameEvent::TurnStarted {
            round: self.index,
            turn: self.turns,
            player: active,
        };
        self.emit(observer, roster.players(), Some(active), &[started]);

        let mut events = Vec::new();
        {
            let (players, policy) = roster.seat_mut(active);
            let mut turn = Turn::new(&mut players[active], &mut self.table, &mut events);
            policy.take_turn(&mut turn, rng)?;
            turn.finish()?;
        }
        self.emit(observer, roster.players(), Some(active), &events);

        let changes = majority::update_after_turn(registry, roster.players_mut(), active);
        self.emit(observer, roster.players(), Some(active), &changes);

        audit::check_circulation(self.circulation, &self.table, roster.players())?;
        audit::check_majorities(registry, roster.players())?;
        audit::check_cash(roster.players())?;

        self.last_actor = Some(active);
        self.position = (self.position + 1) % self.turn_order.len();
        Ok(active)
    }

    /// Settle an exhausted round.
    pub fn settle<O: GameObserver + ?Sized>(
        &mut self,
        registry: &CompanyRegistry,
        players: &mut PlayerMap<Player>,
        observer: &mut O,
    ) -> Result<RoundResult, EngineError> {
        if !self.is_over() {
            return Err(EngineError::InvariantViolation(format!(
                "round {} settled with {} shares left in the deck",
                self.index,
                self.table.deck_len()
            )));
        }
        let last_actor = self.last_actor.ok_or_else(|| {
            EngineError::InvariantViolation(format!("round {} settled before any turn", self.index))
        })?;

        let shares = settlement::fold_hands(players);
        self.emit(observer, players, None, &[GameEvent::HandsFolded { shares }]);

        let events = majority::finalize(registry, players);
        self.emit(observer, players, None, &events);

        let (dividends, events) = settlement::pay_dividends(registry, players);
        self.emit(observer, players, None, &events);

        audit::check_circulation(self.circulation, &self.table, players)?;
        audit::check_majorities(registry, players)?;

        let (ranking, awards) = settlement::award_victory_points(players);
        let mut events = vec![GameEvent::RoundEnded {
            round: self.index,
            ranking: ranking.clone(),
        }];
        events.extend(awards.iter().map(|&(player, points)| GameEvent::PointsAwarded {
            player,
            points,
            total: players[player].victory_points(),
        }));
        self.emit(observer, players, None, &events);

        Ok(RoundResult {
            round: self.index,
            turns: self.turns,
            last_actor,
            dividends,
            ranking,
            awards,
        })
    }

    /// Announce the round, play every turn, settle.
    pub fn play_out<O: GameObserver + ?Sized>(
        &mut self,
        registry: &CompanyRegistry,
        roster: &mut Roster,
        rng: &mut GameRng,
        observer: &mut O,
    ) -> Result<RoundResult, EngineError> {
        let started = GameEvent::RoundStarted {
            round: self.index,
            turn_order: self.turn_order.clone(),
            deck_len: self.table.deck_len(),
        };
        self.emit(observer, roster.players(), None, &[started]);

        while !self.is_over() {
            self.play_turn(registry, roster, rng, observer)?;
        }
        self.settle(registry, roster.players_mut(), observer)
    }
}

/// One fresh share per unit of every company's supply.
fn build_supply(registry: &CompanyRegistry) -> Vec<Share> {
    let mut next_id = 0;
    let mut supply = Vec::with_capacity(registry.total_shares() as usize);
    for (company, count) in registry.iter() {
        for _ in 0..count {
            supply.push(Share::new(ShareId(next_id), company));
            next_id += 1;
        }
    }
    supply
}

fn check_turn_order(turn_order: &[PlayerId], player_count: usize) -> Result<(), EngineError> {
    let mut sorted = turn_order.to_vec();
    sorted.sort_unstable();
    if sorted != PlayerId::all(player_count).collect::<Vec<_>>() {
        return Err(EngineError::InvalidConfig(format!(
            "turn order {turn_order:?} does not seat each of {player_count} players once"
        )));
    }
    Ok(())
}
