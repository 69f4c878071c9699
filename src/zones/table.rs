//! The shared zones of a round: the deck and the market.
//!
//! The deck is drawn from its top (the end of the vector). The market keeps
//! insertion order, which is also the order options are listed to players
//! and the tie-break order of the automated policy.

use crate::core::company::{Company, CompanySet};
use crate::core::share::{Share, ShareId};

/// Deck and market for one round.
#[derive(Debug, Default)]
pub struct Table {
    deck: Vec<Share>,
    market: Vec<Share>,
}

impl Table {
    /// Create a table with the given deck (top = last) and an empty market.
    #[must_use]
    pub fn new(deck: Vec<Share>) -> Self {
        Self {
            deck,
            market: Vec::new(),
        }
    }

    // === Deck ===

    #[must_use]
    pub fn deck_len(&self) -> usize {
        self.deck.len()
    }

    #[must_use]
    pub fn deck_is_empty(&self) -> bool {
        self.deck.is_empty()
    }

    /// Pop the top share of the deck.
    pub fn draw_top(&mut self) -> Option<Share> {
        self.deck.pop()
    }

    // === Market ===

    /// Market contents in order.
    #[must_use]
    pub fn market(&self) -> &[Share] {
        &self.market
    }

    /// Add a share at the end of the market.
    pub fn push_market(&mut self, share: Share) {
        self.market.push(share);
    }

    /// Remove the market share at `index`, keeping the order of the rest.
    pub fn take_market(&mut self, index: usize) -> Option<Share> {
        (index < self.market.len()).then(|| self.market.remove(index))
    }

    /// Whether a player holding `majorities` may claim this market slot.
    #[must_use]
    pub fn is_claimable(&self, index: usize, majorities: CompanySet) -> bool {
        self.market
            .get(index)
            .is_some_and(|s| !majorities.contains(s.company()))
    }

    /// Indices of the market shares of companies outside `majorities`.
    #[must_use]
    pub fn effective_market(&self, majorities: CompanySet) -> Vec<usize> {
        self.market
            .iter()
            .enumerate()
            .filter(|(_, s)| !majorities.contains(s.company()))
            .map(|(i, _)| i)
            .collect()
    }

    /// Deposit one unit on every share of the effective market.
    ///
    /// Returns the number of shares that gained value, which is also the
    /// price of drawing.
    pub fn accrue_effective(&mut self, majorities: CompanySet) -> usize {
        let mut paid = 0;
        for share in self
            .market
            .iter_mut()
            .filter(|s| !majorities.contains(s.company()))
        {
            share.accrue();
            paid += 1;
        }
        paid
    }

    /// Ids of every share in the deck and the market.
    pub fn share_ids(&self) -> impl Iterator<Item = ShareId> + '_ {
        self.deck.iter().chain(self.market.iter()).map(Share::id)
    }

    /// Market shares of one company.
    #[must_use]
    pub fn market_count(&self, company: Company) -> usize {
        self.market.iter().filter(|s| s.company() == company).count()
    }
}
