//! Shared helpers for the integration tests.

#![allow(dead_code)]

use startups_engine::core::STARTING_CASH;
use startups_engine::{
    Acquired, Company, CompanyMap, DecisionPolicy, EngineError, GameEvent, GameObserver, GameRng,
    Origin, TableView, Turn,
};

/// Checks table-wide invariants on every event and records violations.
///
/// Portfolios are compared with the previous event's; the baseline resets
/// when a round starts.
#[derive(Default)]
pub struct InvariantChecker {
    pub circulation: usize,
    pub events: usize,
    pub violations: Vec<String>,
    portfolios: Vec<CompanyMap<u32>>,
}

impl InvariantChecker {
    pub fn new(circulation: usize) -> Self {
        Self {
            circulation,
            ..Self::default()
        }
    }

    fn check_portfolios(&mut self, event: &GameEvent, view: &TableView<'_>) {
        let current: Vec<CompanyMap<u32>> = view.player_ids().map(|id| *view.portfolio(id)).collect();
        if matches!(event, GameEvent::RoundStarted { .. }) || self.portfolios.len() != current.len() {
            self.portfolios = current;
            return;
        }

        for (id, (before, after)) in view.player_ids().zip(self.portfolios.iter().zip(&current)) {
            for company in Company::ALL {
                if after[company] < before[company] {
                    self.violations.push(format!(
                        "{event:?}: {id} went from {} to {} {company}",
                        before[company], after[company]
                    ));
                }
            }
        }
        self.portfolios = current;
    }
}

impl GameObserver for InvariantChecker {
    fn on_event(&mut self, event: &GameEvent, view: &TableView<'_>) {
        self.events += 1;

        let held: usize = view
            .player_ids()
            .map(|id| view.hand_size(id) + view.portfolio(id).total() as usize)
            .sum();
        let found = view.deck_len() + view.market().len() + held;
        if found != self.circulation {
            self.violations.push(format!(
                "{event:?}: {found} shares on the table, expected {}",
                self.circulation
            ));
        }

        for company in Company::ALL {
            let holders = view
                .player_ids()
                .filter(|&id| view.majorities(id).contains(company))
                .count();
            if holders > 1 {
                self.violations
                    .push(format!("{event:?}: {holders} holders of {company}"));
            }
        }

        if view.active_player().is_some() {
            // Draw costs move cash onto market shares, claims move it back.
            let cash: i32 = view.player_ids().map(|id| view.cash(id)).sum();
            let deposited: u32 = view.market().iter().map(|s| s.value()).sum();
            let expected = STARTING_CASH * view.player_count() as i32;
            if cash + deposited as i32 != expected {
                self.violations.push(format!(
                    "{event:?}: {cash} cash + {deposited} on the market, expected {expected}"
                ));
            }
            if let Some(id) = view.player_ids().find(|&id| view.cash(id) < 0) {
                self.violations
                    .push(format!("{event:?}: {id} has {} cash mid-round", view.cash(id)));
            }
        }

        self.check_portfolios(event, view);
    }
}

/// Always draws and keeps the drawn share.
pub struct DrawAndKeep;

impl DecisionPolicy for DrawAndKeep {
    fn take_turn(&mut self, turn: &mut Turn<'_>, _rng: &mut GameRng) -> Result<(), EngineError> {
        let acquired = turn.draw()?;
        turn.retain(acquired)
    }

    fn kind(&self) -> &'static str {
        "draw-and-keep"
    }
}

/// Draws while it can afford to and puts the drawn share straight on the
/// market. Once drawing is unaffordable it claims the first claimable slot
/// and keeps it, which shrinks the market until drawing is possible again.
pub struct Feeder;

impl DecisionPolicy for Feeder {
    fn take_turn(&mut self, turn: &mut Turn<'_>, _rng: &mut GameRng) -> Result<(), EngineError> {
        let acquired: Acquired = if turn.can_draw() {
            turn.draw()?
        } else {
            let slot = turn.effective_market()[0];
            turn.claim(slot)?
        };
        match acquired.origin() {
            Origin::Deck => {
                let last = turn.returnable(&acquired) - 1;
                turn.return_share(acquired, last)
            }
            Origin::Market => turn.retain(acquired),
        }
    }

    fn kind(&self) -> &'static str {
        "feeder"
    }
}

/// Does nothing: a broken policy.
pub struct Idle;

impl DecisionPolicy for Idle {
    fn take_turn(&mut self, _turn: &mut Turn<'_>, _rng: &mut GameRng) -> Result<(), EngineError> {
        Ok(())
    }

    fn kind(&self) -> &'static str {
        "idle"
    }
}
