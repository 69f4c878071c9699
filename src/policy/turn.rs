//! The scoped handle a policy acts through.
//!
//! A [`Turn`] lends the active player's own holdings and the shared zones to
//! the policy. Every move checks its preconditions before touching state, so
//! a rejected move leaves the table unchanged.
//!
//! A turn is two steps:
//! 1. acquire a share, by [`Turn::draw`] or [`Turn::claim`];
//! 2. dispose of the [`Acquired`] share, by [`Turn::retain`] or
//!    [`Turn::return_share`].

use crate::core::company::{Company, CompanyMap, CompanySet};
use crate::core::error::EngineError;
use crate::core::player::{Player, PlayerId};
use crate::core::share::Share;
use crate::events::GameEvent;
use crate::zones::Table;

/// Where the acquired share came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Origin {
    /// Paid for and drawn from the top of the deck.
    Deck,
    /// Taken from the market.
    Market,
}

/// The share acquired in step 1, waiting to be retained or swapped for a
/// returned share.
#[derive(Debug)]
#[must_use = "an acquired share must be retained or returned"]
pub struct Acquired {
    share: Share,
    origin: Origin,
}

impl Acquired {
    #[must_use]
    pub fn share(&self) -> &Share {
        &self.share
    }

    #[must_use]
    pub fn company(&self) -> Company {
        self.share.company()
    }

    #[must_use]
    pub fn origin(&self) -> Origin {
        self.origin
    }
}

/// Step the turn has reached.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Step {
    Acquire,
    Dispose,
    Done,
}

/// Mutation rights of the active player for one turn.
pub struct Turn<'a> {
    player: &'a mut Player,
    table: &'a mut Table,
    events: &'a mut Vec<GameEvent>,
    step: Step,
}

impl<'a> Turn<'a> {
    pub(crate) fn new(
        player: &'a mut Player,
        table: &'a mut Table,
        events: &'a mut Vec<GameEvent>,
    ) -> Self {
        Self {
            player,
            table,
            events,
            step: Step::Acquire,
        }
    }

    // === Read access ===

    #[must_use]
    pub fn player_id(&self) -> PlayerId {
        self.player.id()
    }

    #[must_use]
    pub fn player_name(&self) -> &str {
        self.player.name()
    }

    #[must_use]
    pub fn cash(&self) -> i32 {
        self.player.cash()
    }

    #[must_use]
    pub fn hand(&self) -> &[Share] {
        self.player.hand()
    }

    #[must_use]
    pub fn portfolio(&self) -> &CompanyMap<u32> {
        self.player.portfolio()
    }

    #[must_use]
    pub fn majorities(&self) -> CompanySet {
        self.player.majorities()
    }

    /// Whether the player owns a share of `company`, in hand or portfolio.
    #[must_use]
    pub fn owns_any(&self, company: Company) -> bool {
        self.player.owns_any(company)
    }

    #[must_use]
    pub fn market(&self) -> &[Share] {
        self.table.market()
    }

    #[must_use]
    pub fn deck_len(&self) -> usize {
        self.table.deck_len()
    }

    /// Market indices the player may claim: companies without their majority.
    #[must_use]
    pub fn effective_market(&self) -> Vec<usize> {
        self.table.effective_market(self.player.majorities())
    }

    /// Cost of drawing: one unit per effective-market share.
    #[must_use]
    pub fn draw_cost(&self) -> usize {
        self.effective_market().len()
    }

    #[must_use]
    pub fn can_draw(&self) -> bool {
        !self.table.deck_is_empty() && i64::from(self.player.cash()) >= self.draw_cost() as i64
    }

    #[must_use]
    pub fn can_claim(&self, index: usize) -> bool {
        self.table.is_claimable(index, self.player.majorities())
    }

    #[must_use]
    pub fn can_claim_any(&self) -> bool {
        !self.effective_market().is_empty()
    }

    /// Shares that could be returned if `acquired` is not retained.
    ///
    /// After a draw the acquired share itself is returnable (it is the last
    /// index); after a claim only the shares already in hand are.
    #[must_use]
    pub fn returnable(&self, acquired: &Acquired) -> usize {
        match acquired.origin {
            Origin::Deck => self.player.hand().len() + 1,
            Origin::Market => self.player.hand().len(),
        }
    }

    // === Step 1: acquire ===

    /// Pay every effective-market share one unit and take the top of the deck.
    pub fn draw(&mut self) -> Result<Acquired, EngineError> {
        self.expect_step(Step::Acquire, "draw")?;
        if !self.can_draw() {
            return Err(EngineError::InvariantViolation(format!(
                "{} cannot draw: cash {} for a cost of {} with {} shares in the deck",
                self.player.id(),
                self.player.cash(),
                self.draw_cost(),
                self.table.deck_len()
            )));
        }

        let cost = self.table.accrue_effective(self.player.majorities());
        self.player.adjust_cash(-(cost as i32));
        let share = self
            .table
            .draw_top()
            .ok_or_else(|| EngineError::InvariantViolation("deck emptied mid-draw".to_string()))?;

        self.events.push(GameEvent::Drew {
            player: self.player.id(),
            cost: cost as u32,
        });
        self.step = Step::Dispose;
        Ok(Acquired {
            share,
            origin: Origin::Deck,
        })
    }

    /// Take the market share at `index` and cash the value deposited on it.
    pub fn claim(&mut self, index: usize) -> Result<Acquired, EngineError> {
        self.expect_step(Step::Acquire, "claim")?;
        if !self.can_claim(index) {
            return Err(EngineError::InvariantViolation(format!(
                "{} cannot claim market slot {index}",
                self.player.id()
            )));
        }

        let mut share = self
            .table
            .take_market(index)
            .ok_or_else(|| EngineError::InvariantViolation(format!("no market slot {index}")))?;
        let payout = share.pay_out();
        self.player.adjust_cash(payout as i32);

        self.events.push(GameEvent::Claimed {
            player: self.player.id(),
            company: share.company(),
            payout,
        });
        self.step = Step::Dispose;
        Ok(Acquired {
            share,
            origin: Origin::Market,
        })
    }

    // === Step 2: dispose ===

    /// Make the acquired share public in the portfolio.
    pub fn retain(&mut self, acquired: Acquired) -> Result<(), EngineError> {
        self.expect_step(Step::Dispose, "retain")?;
        let company = acquired.share.company();
        self.player.augment_portfolio(company);

        self.events.push(GameEvent::Folded {
            player: self.player.id(),
            company,
        });
        self.step = Step::Done;
        Ok(())
    }

    /// Keep the acquired share private and return a share to the market.
    ///
    /// `index` ranges over `0..self.returnable(&acquired)`. After a draw the
    /// acquired share joins the hand first, so its index is the last one;
    /// after a claim the returned share comes from the previous hand and the
    /// acquired share joins the hand afterwards.
    pub fn return_share(&mut self, acquired: Acquired, index: usize) -> Result<(), EngineError> {
        self.expect_step(Step::Dispose, "return")?;
        let limit = self.returnable(&acquired);
        if index >= limit {
            return Err(EngineError::InvariantViolation(format!(
                "{} cannot return share {index} of {limit}",
                self.player.id()
            )));
        }

        let Acquired { share, origin } = acquired;
        let hand = self.player.hand_mut();
        let returned = match origin {
            Origin::Deck => {
                hand.push(share);
                hand.remove(index)
            }
            Origin::Market => {
                let returned = hand.remove(index);
                hand.push(share);
                returned
            }
        };

        self.events.push(GameEvent::Returned {
            player: self.player.id(),
            company: returned.company(),
        });
        self.table.push_market(returned);
        self.step = Step::Done;
        Ok(())
    }

    /// Check that the policy went through both steps.
    pub(crate) fn finish(self) -> Result<(), EngineError> {
        if self.step == Step::Done {
            Ok(())
        } else {
            Err(EngineError::InvariantViolation(format!(
                "{} ended the turn at step {:?}",
                self.player.id(),
                self.step
            )))
        }
    }

    fn expect_step(&self, step: Step, action: &str) -> Result<(), EngineError> {
        if self.step == step {
            Ok(())
        } else {
            Err(EngineError::InvariantViolation(format!(
                "{} tried to {action} at step {:?}",
                self.player.id(),
                self.step
            )))
        }
    }
}
