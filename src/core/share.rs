//! Shares: the cards of the game.
//!
//! A `Share` is one unit of a company's capital. It is deliberately not
//! `Clone`: moving a share between the deck, the market and a hand is a
//! Rust move, so a share can never sit in two places at once.

use serde::{Deserialize, Serialize};

use super::company::Company;

/// Identifier of a share within one round.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ShareId(pub u32);

impl std::fmt::Display for ShareId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// One share of one company, carrying the money deposited on it while it
/// sat in the market.
#[derive(Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Share {
    id: ShareId,
    company: Company,
    value: u32,
}

impl Share {
    /// Create a fresh share with no accrued value.
    #[must_use]
    pub fn new(id: ShareId, company: Company) -> Self {
        Self {
            id,
            company,
            value: 0,
        }
    }

    #[must_use]
    pub fn id(&self) -> ShareId {
        self.id
    }

    #[must_use]
    pub fn company(&self) -> Company {
        self.company
    }

    /// Money currently deposited on the share.
    #[must_use]
    pub fn value(&self) -> u32 {
        self.value
    }

    /// Deposit one unit on the share.
    pub fn accrue(&mut self) {
        self.value += 1;
    }

    /// Take the deposited money off the share, leaving it at zero.
    #[must_use = "the payout belongs to whoever claimed the share"]
    pub fn pay_out(&mut self) -> u32 {
        std::mem::take(&mut self.value)
    }
}

impl std::fmt::Display for Share {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.value == 0 {
            write!(f, "{}", self.company)
        } else {
            write!(f, "{} ({})", self.company, self.value)
        }
    }
}
