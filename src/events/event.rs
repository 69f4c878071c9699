//! Domain events emitted by the round engine and the orchestrator.

use serde::{Deserialize, Serialize};

use crate::core::company::Company;
use crate::core::player::PlayerId;

/// Something that happened at the table.
///
/// Events carry ids only; observers resolve names and holdings through the
/// [`crate::core::TableView`] they receive alongside.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// A round has been dealt.
    RoundStarted {
        round: u32,
        turn_order: Vec<PlayerId>,
        deck_len: usize,
    },

    /// A player is about to decide.
    TurnStarted { round: u32, turn: u32, player: PlayerId },

    /// The player paid `cost` to draw the top of the deck.
    Drew { player: PlayerId, cost: u32 },

    /// The player took a share from the market and cashed its value.
    Claimed {
        player: PlayerId,
        company: Company,
        payout: u32,
    },

    /// A share became public in the player's portfolio.
    Folded { player: PlayerId, company: Company },

    /// The player put a share from hand back on the market.
    Returned { player: PlayerId, company: Company },

    /// `player` took the majority of `company`.
    MajorityGained {
        company: Company,
        player: PlayerId,
        previous: Option<PlayerId>,
    },

    /// Nobody holds `company` any more (tie at settlement).
    MajorityCleared { company: Company, previous: PlayerId },

    /// The deck ran out and every hand went into its portfolio.
    HandsFolded { shares: usize },

    /// `payer` paid its shortfall to the majority holder.
    DividendPaid {
        company: Company,
        payer: PlayerId,
        holder: PlayerId,
        amount: i32,
    },

    /// The majority holder collected the tripled shortfalls.
    DividendCollected {
        company: Company,
        holder: PlayerId,
        amount: i32,
    },

    /// No unique majority, so no payment for `company`.
    NoDividend { company: Company },

    /// Final cash of the round, richest first.
    RoundEnded {
        round: u32,
        ranking: Vec<(PlayerId, i32)>,
    },

    /// Victory points changed hands at round end.
    PointsAwarded {
        player: PlayerId,
        points: i32,
        total: i32,
    },

    /// Final victory points, winner first.
    GameEnded { standings: Vec<(PlayerId, i32)> },
}

impl GameEvent {
    /// Player the event is about, if exactly one.
    #[must_use]
    pub fn player(&self) -> Option<PlayerId> {
        match self {
            GameEvent::TurnStarted { player, .. }
            | GameEvent::Drew { player, .. }
            | GameEvent::Claimed { player, .. }
            | GameEvent::Folded { player, .. }
            | GameEvent::Returned { player, .. }
            | GameEvent::MajorityGained { player, .. }
            | GameEvent::PointsAwarded { player, .. } => Some(*player),
            GameEvent::DividendPaid { payer, .. } => Some(*payer),
            GameEvent::DividendCollected { holder, .. } => Some(*holder),
            GameEvent::MajorityCleared { previous, .. } => Some(*previous),
            GameEvent::RoundStarted { .. }
            | GameEvent::HandsFolded { .. }
            | GameEvent::NoDividend { .. }
            | GameEvent::RoundEnded { .. }
            | GameEvent::GameEnded { .. } => None,
        }
    }
}
