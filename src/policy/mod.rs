//! Decision policies: how a seat plays its turn.
//!
//! The round engine depends only on the [`DecisionPolicy`] trait. Two
//! implementations ship with the crate:
//! - [`AutomatedPolicy`]: rule-based robot driven by the game RNG
//! - [`InteractivePolicy`]: numbered menus on a line-based reader/writer

pub mod automated;
pub mod interactive;
pub mod turn;

pub use automated::AutomatedPolicy;
pub use interactive::InteractivePolicy;
pub use turn::{Acquired, Origin, Turn};

use crate::core::error::EngineError;
use crate::core::rng::GameRng;

/// A seat's per-turn decision.
///
/// Implementations must take the turn through both of its steps: acquire a
/// share (draw or claim), then retain it or return a share to the market.
/// The engine only invokes a policy when at least one acquisition is legal.
pub trait DecisionPolicy {
    /// Play one turn through `turn`.
    fn take_turn(&mut self, turn: &mut Turn<'_>, rng: &mut GameRng) -> Result<(), EngineError>;

    /// Short label for logs ("robot", "human").
    fn kind(&self) -> &'static str;
}

impl<P: DecisionPolicy + ?Sized> DecisionPolicy for Box<P> {
    fn take_turn(&mut self, turn: &mut Turn<'_>, rng: &mut GameRng) -> Result<(), EngineError> {
        (**self).take_turn(turn, rng)
    }

    fn kind(&self) -> &'static str {
        (**self).kind()
    }
}
