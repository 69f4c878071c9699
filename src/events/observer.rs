//! Observers receive every [`GameEvent`] with a view of the table.
//!
//! The engine never formats anything itself. `TracingObserver` narrates
//! through `tracing`, `EventLog` records for inspection, `NullObserver`
//! drops everything.

use tracing::{debug, info};

use super::event::GameEvent;
use crate::core::state::TableView;

/// Receiver of domain events.
pub trait GameObserver {
    /// Called once per event, in order.
    ///
    /// The view shows the table after the change the event describes. Events
    /// of the same step share one view: a turn's acquire and dispose events
    /// all see the table as the turn left it, before the majority rule runs.
    fn on_event(&mut self, event: &GameEvent, view: &TableView<'_>);
}

impl<O: GameObserver + ?Sized> GameObserver for &mut O {
    fn on_event(&mut self, event: &GameEvent, view: &TableView<'_>) {
        (**self).on_event(event, view);
    }
}

impl<O: GameObserver + ?Sized> GameObserver for Box<O> {
    fn on_event(&mut self, event: &GameEvent, view: &TableView<'_>) {
        (**self).on_event(event, view);
    }
}

/// Ignores every event.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullObserver;

impl GameObserver for NullObserver {
    fn on_event(&mut self, _event: &GameEvent, _view: &TableView<'_>) {}
}

/// Records every event in order.
#[derive(Clone, Debug, Default)]
pub struct EventLog {
    events: Vec<GameEvent>,
}

impl EventLog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn events(&self) -> &[GameEvent] {
        &self.events
    }

    #[must_use]
    pub fn into_events(self) -> Vec<GameEvent> {
        self.events
    }

    /// Events matching a predicate.
    pub fn filter<'a>(
        &'a self,
        predicate: impl Fn(&GameEvent) -> bool + 'a,
    ) -> impl Iterator<Item = &'a GameEvent> + 'a {
        self.events.iter().filter(move |&e| predicate(e))
    }
}

impl GameObserver for EventLog {
    fn on_event(&mut self, event: &GameEvent, _view: &TableView<'_>) {
        self.events.push(event.clone());
    }
}

/// Narrates the game through `tracing`.
///
/// Turn-level moves log at `info`, turn boundaries at `debug`.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingObserver;

impl GameObserver for TracingObserver {
    fn on_event(&mut self, event: &GameEvent, view: &TableView<'_>) {
        match event {
            GameEvent::RoundStarted {
                round,
                turn_order,
                deck_len,
            } => {
                let order: Vec<&str> = turn_order.iter().map(|&p| view.name(p)).collect();
                info!(round, deck_len, "round {round} starts, order: {}", order.join(", "));
            }
            GameEvent::TurnStarted { turn, player, .. } => {
                debug!(turn, cash = view.cash(*player), "{}'s turn", view.name(*player));
            }
            GameEvent::Drew { player, cost } => {
                info!("{} draws for {cost}", view.name(*player));
            }
            GameEvent::Claimed {
                player,
                company,
                payout,
            } => {
                info!("{} takes {company} from the market (+{payout})", view.name(*player));
            }
            GameEvent::Folded { player, company } => {
                info!("{} adds {company} to their portfolio", view.name(*player));
            }
            GameEvent::Returned { player, company } => {
                info!("{} returns {company} to the market", view.name(*player));
            }
            GameEvent::MajorityGained {
                company,
                player,
                previous,
            } => match previous {
                Some(prev) => info!(
                    "{} takes the {company} majority from {}",
                    view.name(*player),
                    view.name(*prev)
                ),
                None => info!("{} takes the {company} majority", view.name(*player)),
            },
            GameEvent::MajorityCleared { company, previous } => {
                info!("{} loses the {company} majority to a tie", view.name(*previous));
            }
            GameEvent::HandsFolded { shares } => {
                info!("deck exhausted, {shares} shares from hands go public");
            }
            GameEvent::DividendPaid {
                company,
                payer,
                amount,
                ..
            } => {
                info!("{} pays {amount} for {company}", view.name(*payer));
            }
            GameEvent::DividendCollected {
                company,
                holder,
                amount,
            } => {
                info!("{} collects {amount} for {company}", view.name(*holder));
            }
            GameEvent::NoDividend { company } => {
                info!("no majority in {company}, no payment");
            }
            GameEvent::RoundEnded { round, ranking } => {
                for (player, cash) in ranking {
                    info!(round, "{} ends the round with {cash}", view.name(*player));
                }
            }
            GameEvent::PointsAwarded {
                player,
                points,
                total,
            } => {
                info!("{} scores {points:+} ({total} total)", view.name(*player));
            }
            GameEvent::GameEnded { standings } => {
                for (player, points) in standings {
                    info!("{} finishes with {points} points", view.name(*player));
                }
            }
        }
    }
}
