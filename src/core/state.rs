//! Read-only views of the table.
//!
//! ## TableView
//!
//! Borrowed view handed to observers with every event: per-player
//! portfolio, majorities, cash and hand size, and the ordered market with
//! each share's value. Hands stay private: only their size is exposed.
//!
//! ## TableSnapshot
//!
//! Owned, serializable copy of a view.

use serde::{Deserialize, Serialize};

use super::company::{Company, CompanyMap, CompanySet};
use super::player::{Player, PlayerId, PlayerMap};
use super::share::Share;
use crate::zones::Table;

/// Borrowed view of the players and the shared zones.
#[derive(Clone, Copy, Debug)]
pub struct TableView<'a> {
    round: u32,
    turn: u32,
    active: Option<PlayerId>,
    turn_order: &'a [PlayerId],
    players: &'a PlayerMap<Player>,
    table: &'a Table,
}

impl<'a> TableView<'a> {
    pub(crate) fn new(
        round: u32,
        turn: u32,
        active: Option<PlayerId>,
        turn_order: &'a [PlayerId],
        players: &'a PlayerMap<Player>,
        table: &'a Table,
    ) -> Self {
        Self {
            round,
            turn,
            active,
            turn_order,
            players,
            table,
        }
    }

    /// Round number (1-based).
    #[must_use]
    pub fn round(&self) -> u32 {
        self.round
    }

    /// Turns played so far in the round, including the current one.
    #[must_use]
    pub fn turn(&self) -> u32 {
        self.turn
    }

    /// Player whose turn it is, if a turn is in progress.
    #[must_use]
    pub fn active_player(&self) -> Option<PlayerId> {
        self.active
    }

    /// Seats in the order they play this round.
    #[must_use]
    pub fn turn_order(&self) -> &'a [PlayerId] {
        self.turn_order
    }

    /// Seats in id order.
    pub fn player_ids(&self) -> impl Iterator<Item = PlayerId> {
        self.players.player_ids()
    }

    #[must_use]
    pub fn player_count(&self) -> usize {
        self.players.player_count()
    }

    #[must_use]
    pub fn name(&self, id: PlayerId) -> &'a str {
        self.players[id].name()
    }

    #[must_use]
    pub fn portfolio(&self, id: PlayerId) -> &'a CompanyMap<u32> {
        self.players[id].portfolio()
    }

    #[must_use]
    pub fn majorities(&self, id: PlayerId) -> CompanySet {
        self.players[id].majorities()
    }

    #[must_use]
    pub fn cash(&self, id: PlayerId) -> i32 {
        self.players[id].cash()
    }

    #[must_use]
    pub fn hand_size(&self, id: PlayerId) -> usize {
        self.players[id].hand().len()
    }

    #[must_use]
    pub fn victory_points(&self, id: PlayerId) -> i32 {
        self.players[id].victory_points()
    }

    /// Current majority holder of a company.
    #[must_use]
    pub fn majority_holder(&self, company: Company) -> Option<PlayerId> {
        self.players
            .iter()
            .find(|(_, p)| p.holds_majority(company))
            .map(|(id, _)| id)
    }

    /// Market contents in order.
    #[must_use]
    pub fn market(&self) -> &'a [Share] {
        self.table.market()
    }

    #[must_use]
    pub fn deck_len(&self) -> usize {
        self.table.deck_len()
    }

    /// Owned copy of everything visible.
    #[must_use]
    pub fn snapshot(&self) -> TableSnapshot {
        TableSnapshot {
            round: self.round,
            turn: self.turn,
            active: self.active,
            deck_len: self.deck_len(),
            market: self
                .market()
                .iter()
                .map(|s| MarketEntry {
                    company: s.company(),
                    value: s.value(),
                })
                .collect(),
            players: self
                .players
                .values()
                .map(|p| PlayerSnapshot {
                    id: p.id(),
                    name: p.name().to_string(),
                    cash: p.cash(),
                    hand_size: p.hand().len(),
                    portfolio: *p.portfolio(),
                    majorities: p.majorities(),
                    victory_points: p.victory_points(),
                })
                .collect(),
        }
    }
}

/// A market slot as seen by everyone.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarketEntry {
    pub company: Company,
    pub value: u32,
}

/// Public state of one player.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerSnapshot {
    pub id: PlayerId,
    pub name: String,
    pub cash: i32,
    pub hand_size: usize,
    pub portfolio: CompanyMap<u32>,
    pub majorities: CompanySet,
    pub victory_points: i32,
}

/// Owned copy of a [`TableView`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableSnapshot {
    pub round: u32,
    pub turn: u32,
    pub active: Option<PlayerId>,
    pub deck_len: usize,
    pub market: Vec<MarketEntry>,
    pub players: Vec<PlayerSnapshot>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::share::ShareId;

    #[test]
    fn test_snapshot_reflects_view() {
        let mut players = PlayerMap::new(2, |id| Player::new(id, format!("P{}", id.0)));
        players[PlayerId::new(1)].augment_portfolio(Company::OctoCoffee);
        players[PlayerId::new(1)].gain_majority(Company::OctoCoffee);

        let mut table = Table::new(vec![Share::new(ShareId(0), Company::GiraffeBeer)]);
        let mut market_share = Share::new(ShareId(1), Company::FlamingoSoft);
        market_share.accrue();
        table.push_market(market_share);

        let order = [PlayerId::new(0), PlayerId::new(1)];
        let view = TableView::new(1, 4, Some(PlayerId::new(0)), &order, &players, &table);

        assert_eq!(view.majority_holder(Company::OctoCoffee), Some(PlayerId::new(1)));
        assert_eq!(view.majority_holder(Company::GiraffeBeer), None);

        let snapshot = view.snapshot();
        assert_eq!(snapshot.deck_len, 1);
        assert_eq!(
            snapshot.market,
            vec![MarketEntry {
                company: Company::FlamingoSoft,
                value: 1
            }]
        );
        assert_eq!(snapshot.players[1].portfolio[Company::OctoCoffee], 1);
        assert!(snapshot.players[1].majorities.contains(Company::OctoCoffee));

        let json = serde_json::to_string(&snapshot).unwrap();
        let back: TableSnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(snapshot, back);
    }

    #[test]
    fn test_view_exposes_only_hand_sizes() {
        let mut players = PlayerMap::new(3, |id| Player::new(id, format!("P{}", id.0)));
        players[PlayerId::new(2)].reset_for_round(vec![
            Share::new(ShareId(0), Company::OctoCoffee),
            Share::new(ShareId(1), Company::HippoPowertech),
        ]);
        players[PlayerId::new(2)].add_victory_points(3);
        let table = Table::default();
        let order = [PlayerId::new(0), PlayerId::new(1), PlayerId::new(2)];
        let view = TableView::new(1, 0, None, &order, &players, &table);

        assert_eq!(view.player_count(), 3);
        assert_eq!(view.player_ids().collect::<Vec<_>>(), order.to_vec());
        assert_eq!(view.hand_size(PlayerId::new(2)), 2);
        assert_eq!(view.hand_size(PlayerId::new(0)), 0);
        assert_eq!(view.victory_points(PlayerId::new(2)), 3);
        assert_eq!(view.snapshot().players[2].hand_size, 2);
    }
}
