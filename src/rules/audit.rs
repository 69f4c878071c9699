//! Invariant checks run by the round engine.
//!
//! A failure is a bug in the engine or in a policy, never a game outcome,
//! so every check returns [`EngineError::InvariantViolation`].

use std::collections::BTreeSet;

use crate::core::company::{CompanyRegistry, CompanySet};
use crate::core::error::EngineError;
use crate::core::player::{Player, PlayerMap};
use crate::zones::Table;

/// Every share dealt this round is in exactly one place.
pub fn check_circulation(
    expected: usize,
    table: &Table,
    players: &PlayerMap<Player>,
) -> Result<(), EngineError> {
    let mut ids = BTreeSet::new();
    let mut duplicated = None;
    let held = players.values().flat_map(|p| p.hand().iter().map(|s| s.id()));
    for id in table.share_ids().chain(held) {
        if !ids.insert(id) {
            duplicated = Some(id);
        }
    }
    if let Some(id) = duplicated {
        return Err(EngineError::InvariantViolation(format!(
            "share {id} is in two places"
        )));
    }

    let public: usize = players.values().map(|p| p.portfolio().total() as usize).sum();
    let found = ids.len() + public;
    if found != expected {
        return Err(EngineError::InvariantViolation(format!(
            "{found} shares accounted for, {expected} in circulation"
        )));
    }
    Ok(())
}

/// No company has two majority holders, and no one holds a company
/// outside the registry.
pub fn check_majorities(
    registry: &CompanyRegistry,
    players: &PlayerMap<Player>,
) -> Result<(), EngineError> {
    let mut seen = CompanySet::new();
    for player in players.values() {
        for company in player.majorities().iter() {
            if !registry.contains(company) {
                return Err(EngineError::InvariantViolation(format!(
                    "{} holds the majority of {company}, which is not in play",
                    player.id()
                )));
            }
            if !seen.insert(company) {
                return Err(EngineError::InvariantViolation(format!(
                    "{company} has more than one majority holder"
                )));
            }
        }
    }
    Ok(())
}

/// Cash never goes negative during the turn loop.
pub fn check_cash(players: &PlayerMap<Player>) -> Result<(), EngineError> {
    match players.values().find(|p| p.cash() < 0) {
        Some(p) => Err(EngineError::InvariantViolation(format!(
            "{} has negative cash ({})",
            p.id(),
            p.cash()
        ))),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::company::Company;
    use crate::core::player::PlayerId;
    use crate::core::share::{Share, ShareId};

    fn players() -> PlayerMap<Player> {
        PlayerMap::new(2, |id| Player::new(id, "p"))
    }

    #[test]
    fn test_circulation_counts_every_location() {
        let mut players = players();
        players[PlayerId::new(0)].reset_for_round(vec![Share::new(ShareId(0), Company::OctoCoffee)]);
        players[PlayerId::new(1)].augment_portfolio(Company::OctoCoffee);
        let mut table = Table::new(vec![Share::new(ShareId(1), Company::OctoCoffee)]);
        table.push_market(Share::new(ShareId(2), Company::OctoCoffee));

        assert!(check_circulation(4, &table, &players).is_ok());
        assert!(check_circulation(5, &table, &players).is_err());
    }

    #[test]
    fn test_duplicate_share_is_detected() {
        let mut players = players();
        players[PlayerId::new(0)].reset_for_round(vec![Share::new(ShareId(7), Company::OctoCoffee)]);
        let table = Table::new(vec![Share::new(ShareId(7), Company::OctoCoffee)]);

        assert!(check_circulation(2, &table, &players).is_err());
    }

    #[test]
    fn test_double_majority_is_detected() {
        let registry = CompanyRegistry::standard();
        let mut players = players();
        players[PlayerId::new(0)].gain_majority(Company::OctoCoffee);
        assert!(check_majorities(&registry, &players).is_ok());

        players[PlayerId::new(1)].gain_majority(Company::OctoCoffee);
        assert!(check_majorities(&registry, &players).is_err());
    }

    #[test]
    fn test_negative_cash_is_detected() {
        let mut players = players();
        assert!(check_cash(&players).is_ok());
        players[PlayerId::new(1)].adjust_cash(-11);
        assert!(check_cash(&players).is_err());
    }
}
