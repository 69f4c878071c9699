use thiserror::Error;

use super::player::PlayerId;

/// Everything that can stop a game.
///
/// Invalid interactive input never shows up here: it is reprompted locally.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("invalid company registry: {0}")]
    InvalidRegistry(String),

    #[error("{shares} shares cannot deal {dealt} and still leave a deck")]
    DeckTooSmall { shares: usize, dealt: usize },

    #[error("{player} has neither a draw nor a claim available")]
    NoLegalOption { player: PlayerId },

    #[error("invariant violated: {0}")]
    InvariantViolation(String),

    #[error("input closed while waiting for {player}'s choice")]
    InputClosed { player: PlayerId },

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}
