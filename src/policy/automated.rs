//! Rule-based robot player.
//!
//! ## Draw or claim
//!
//! The effective market is the market minus companies the robot already
//! holds the majority in. Drawing costs one unit per effective-market share.
//! When both moves are legal the robot claims whenever a share is
//! "interesting" (a company it already owns) or "paying" (nonzero value),
//! and otherwise flips a coin.
//!
//! Claim priority: best interesting share, then best paying share, then a
//! random effective-market share. "Best" is the highest value, the earliest
//! market slot on ties.
//!
//! ## Retain or return
//!
//! A coin flip: retain makes the acquired share public, return sends a
//! uniformly chosen returnable share to the market.

use std::cmp::Reverse;

use tracing::trace;

use super::turn::Turn;
use super::DecisionPolicy;
use crate::core::error::EngineError;
use crate::core::rng::GameRng;

/// What the robot does in step 1.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Acquisition {
    Draw,
    /// Market index to claim.
    Claim(usize),
}

/// Robot policy. Stateless: every choice comes from the table and the RNG.
#[derive(Clone, Copy, Debug, Default)]
pub struct AutomatedPolicy;

impl AutomatedPolicy {
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Decide between drawing and claiming.
    pub fn choose_acquisition(
        &self,
        turn: &Turn<'_>,
        rng: &mut GameRng,
    ) -> Result<Acquisition, EngineError> {
        let effective = turn.effective_market();
        let can_draw = turn.can_draw();
        let can_claim = !effective.is_empty();

        match (can_draw, can_claim) {
            (false, false) => Err(EngineError::NoLegalOption {
                player: turn.player_id(),
            }),
            (true, false) => Ok(Acquisition::Draw),
            (false, true) => Ok(Acquisition::Claim(self.choose_claim(turn, &effective, rng))),
            (true, true) => {
                if self.has_target(turn, &effective) || !rng.coin_flip() {
                    Ok(Acquisition::Claim(self.choose_claim(turn, &effective, rng)))
                } else {
                    Ok(Acquisition::Draw)
                }
            }
        }
    }

    /// Pick the market index to claim among `effective` (non-empty).
    pub fn choose_claim(&self, turn: &Turn<'_>, effective: &[usize], rng: &mut GameRng) -> usize {
        let market = turn.market();
        let best = |keep: &dyn Fn(usize) -> bool| {
            effective
                .iter()
                .copied()
                .filter(|&i| keep(i))
                .min_by_key(|&i| Reverse(market[i].value()))
        };

        best(&|i| turn.owns_any(market[i].company()))
            .or_else(|| best(&|i| market[i].value() > 0))
            .unwrap_or_else(|| effective[rng.index(effective.len())])
    }

    fn has_target(&self, turn: &Turn<'_>, effective: &[usize]) -> bool {
        let market = turn.market();
        effective
            .iter()
            .any(|&i| market[i].value() > 0 || turn.owns_any(market[i].company()))
    }
}

impl DecisionPolicy for AutomatedPolicy {
    fn take_turn(&mut self, turn: &mut Turn<'_>, rng: &mut GameRng) -> Result<(), EngineError> {
        let acquired = match self.choose_acquisition(turn, rng)? {
            Acquisition::Draw => turn.draw()?,
            Acquisition::Claim(index) => turn.claim(index)?,
        };
        trace!(player = %turn.player_id(), company = %acquired.company(), "acquired");

        let wants_return = rng.coin_flip();
        let returnable = turn.returnable(&acquired);
        if wants_return && returnable > 0 {
            let index = rng.index(returnable);
            turn.return_share(acquired, index)
        } else {
            turn.retain(acquired)
        }
    }

    fn kind(&self) -> &'static str {
        "robot"
    }
}
