//! Majority tracking.
//!
//! Two rules apply at different times:
//! - after each turn, only the active player can take a majority, and only
//!   by becoming the unique leader of a company they do not already hold;
//! - at settlement, every company is decided afresh: the unique leader
//!   holds it, a tie clears it.

use crate::core::company::{Company, CompanyRegistry};
use crate::core::player::{Player, PlayerId, PlayerMap};
use crate::events::GameEvent;

/// The single player with the highest non-zero portfolio count of
/// `company`, with that count. `None` on a tie or when nobody owns any.
#[must_use]
pub fn unique_leader(players: &PlayerMap<Player>, company: Company) -> Option<(PlayerId, u32)> {
    let mut leader: Option<(PlayerId, u32)> = None;
    let mut tied = false;

    for (id, player) in players.iter() {
        let count = player.shares_of(company);
        match leader {
            Some((_, best)) if count < best => {}
            Some((_, best)) if count == best => tied = true,
            _ => {
                leader = Some((id, count));
                tied = false;
            }
        }
    }

    match leader {
        Some((_, 0)) | None => None,
        Some(_) if tied => None,
        found => found,
    }
}

/// Current holder of `company`'s majority.
#[must_use]
pub fn holder(players: &PlayerMap<Player>, company: Company) -> Option<PlayerId> {
    players
        .iter()
        .find(|(_, p)| p.holds_majority(company))
        .map(|(id, _)| id)
}

fn transfer(players: &mut PlayerMap<Player>, company: Company, to: PlayerId) -> GameEvent {
    let previous = holder(players, company);
    if let Some(prev) = previous {
        players[prev].lose_majority(company);
    }
    players[to].gain_majority(company);
    GameEvent::MajorityGained {
        company,
        player: to,
        previous,
    }
}

/// Apply the after-turn rule for `active`.
///
/// A player who already holds a majority keeps it through ties; nothing
/// changes for companies where `active` is not the unique leader.
pub fn update_after_turn(
    registry: &CompanyRegistry,
    players: &mut PlayerMap<Player>,
    active: PlayerId,
) -> Vec<GameEvent> {
    let mut events = Vec::new();
    for company in registry.companies() {
        let Some((leader, _)) = unique_leader(players, company) else {
            continue;
        };
        if leader == active && !players[active].holds_majority(company) {
            events.push(transfer(players, company, active));
        }
    }
    events
}

/// Decide every company definitively at settlement.
pub fn finalize(registry: &CompanyRegistry, players: &mut PlayerMap<Player>) -> Vec<GameEvent> {
    let mut events = Vec::new();
    for company in registry.companies() {
        match unique_leader(players, company) {
            Some((leader, _)) => {
                if !players[leader].holds_majority(company) {
                    events.push(transfer(players, company, leader));
                }
            }
            None => {
                if let Some(previous) = holder(players, company) {
                    players[previous].lose_majority(company);
                    events.push(GameEvent::MajorityCleared { company, previous });
                }
            }
        }
    }
    events
}
