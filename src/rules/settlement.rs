//! End-of-round settlement: hands go public, dividends, victory points.

use serde::{Deserialize, Serialize};

use super::majority;
use crate::core::company::{Company, CompanyRegistry};
use crate::core::config::DIVIDEND_MULTIPLIER;
use crate::core::player::{Player, PlayerId, PlayerMap};
use crate::events::GameEvent;

/// Dividends paid for one company.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dividend {
    pub company: Company,
    pub holder: PlayerId,
    /// (payer, amount) for every other owner of the company.
    pub payments: Vec<(PlayerId, i32)>,
    /// Credited to the holder: the payments summed, times the multiplier.
    pub collected: i32,
}

/// Fold every hand into its portfolio. Returns how many shares moved.
///
/// No majority is re-evaluated here; [`majority::finalize`] does that next.
pub fn fold_hands(players: &mut PlayerMap<Player>) -> usize {
    players.values_mut().map(Player::fold_hand).sum()
}

/// Pay dividends for every company with a unique leader.
///
/// Each other player owning at least one share pays the difference between
/// the leader's count and their own; the leader collects the sum times
/// [`DIVIDEND_MULTIPLIER`].
///
/// Payments are debited in full even when the payer cannot cover them, so
/// a payer's cash can end the round negative.
pub fn pay_dividends(
    registry: &CompanyRegistry,
    players: &mut PlayerMap<Player>,
) -> (Vec<Dividend>, Vec<GameEvent>) {
    let mut dividends = Vec::new();
    let mut events = Vec::new();

    for company in registry.companies() {
        let Some((holder, majority_count)) = majority::unique_leader(players, company) else {
            events.push(GameEvent::NoDividend { company });
            continue;
        };

        let mut payments = Vec::new();
        for (id, player) in players.iter() {
            let owned = player.shares_of(company);
            if id != holder && owned > 0 {
                payments.push((id, (majority_count - owned) as i32));
            }
        }

        for &(payer, amount) in &payments {
            players[payer].adjust_cash(-amount);
            events.push(GameEvent::DividendPaid {
                company,
                payer,
                holder,
                amount,
            });
        }

        let collected = payments.iter().map(|&(_, amount)| amount).sum::<i32>() * DIVIDEND_MULTIPLIER;
        players[holder].adjust_cash(collected);
        events.push(GameEvent::DividendCollected {
            company,
            holder,
            amount: collected,
        });

        dividends.push(Dividend {
            company,
            holder,
            payments,
            collected,
        });
    }

    (dividends, events)
}

/// Players by cash, richest first; equal cash goes to the lower id.
#[must_use]
pub fn cash_ranking(players: &PlayerMap<Player>) -> Vec<(PlayerId, i32)> {
    let mut ranking: Vec<(PlayerId, i32)> = players.iter().map(|(id, p)| (id, p.cash())).collect();
    ranking.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));
    ranking
}

/// Award the round's victory points: +2 to the richest, +1 to the second,
/// -1 to the poorest.
///
/// Returns the cash ranking and the points given, in ranking order.
pub fn award_victory_points(
    players: &mut PlayerMap<Player>,
) -> (Vec<(PlayerId, i32)>, Vec<(PlayerId, i32)>) {
    let ranking = cash_ranking(players);
    let mut awards: Vec<(PlayerId, i32)> = ranking.iter().map(|&(id, _)| (id, 0)).collect();

    if let Some(first) = awards.first_mut() {
        first.1 += 2;
    }
    if let Some(second) = awards.get_mut(1) {
        second.1 += 1;
    }
    if awards.len() > 1 {
        if let Some(last) = awards.last_mut() {
            last.1 -= 1;
        }
    }

    for &(id, points) in &awards {
        players[id].add_victory_points(points);
    }
    (ranking, awards)
}
