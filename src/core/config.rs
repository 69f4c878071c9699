//! Game configuration and rule constants.
//!
//! Only the player count, round count, seating of the human player and the
//! seed are configurable. The rules themselves are fixed.

use serde::{Deserialize, Serialize};

use super::error::EngineError;
use super::player::PlayerId;

/// Cash every player starts a round with.
pub const STARTING_CASH: i32 = 10;

/// Shares dealt face-down to each player at the start of a round.
pub const HAND_SIZE: usize = 3;

/// Shares removed at random from the supply before shuffling.
pub const REMOVED_SHARES: usize = 5;

/// Factor applied to the shortfalls collected by a majority holder.
pub const DIVIDEND_MULTIPLIER: i32 = 3;

/// Smallest table.
pub const MIN_PLAYERS: usize = 2;

/// Largest table.
pub const MAX_PLAYERS: usize = 8;

/// Game configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    /// Number of seats (2-8).
    pub player_count: usize,

    /// Number of rounds played (at least 1).
    pub round_count: u32,

    /// Seat driven by a human, if any.
    pub interactive_seat: Option<PlayerId>,

    /// Seed for every random decision of the game.
    pub seed: u64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            player_count: 4,
            round_count: 1,
            interactive_seat: None,
            seed: 1977,
        }
    }
}

impl GameConfig {
    /// Set the number of players.
    #[must_use]
    pub fn with_players(mut self, count: usize) -> Self {
        self.player_count = count;
        self
    }

    /// Set the number of rounds.
    #[must_use]
    pub fn with_rounds(mut self, rounds: u32) -> Self {
        self.round_count = rounds;
        self
    }

    /// Seat a human player.
    #[must_use]
    pub fn with_interactive_seat(mut self, seat: PlayerId) -> Self {
        self.interactive_seat = Some(seat);
        self
    }

    /// Set the seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Check the configuration before a game starts.
    pub fn validate(&self) -> Result<(), EngineError> {
        if !(MIN_PLAYERS..=MAX_PLAYERS).contains(&self.player_count) {
            return Err(EngineError::InvalidConfig(format!(
                "player count must be {MIN_PLAYERS}-{MAX_PLAYERS}, got {}",
                self.player_count
            )));
        }
        if self.round_count == 0 {
            return Err(EngineError::InvalidConfig(
                "at least one round must be played".to_string(),
            ));
        }
        if let Some(seat) = self.interactive_seat {
            if seat.index() >= self.player_count {
                return Err(EngineError::InvalidConfig(format!(
                    "interactive seat {} is outside a {}-player table",
                    seat.index(),
                    self.player_count
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert!(GameConfig::default().validate().is_ok());
    }

    #[test]
    fn test_builder() {
        let config = GameConfig::default()
            .with_players(3)
            .with_rounds(5)
            .with_interactive_seat(PlayerId::new(1))
            .with_seed(9);

        assert_eq!(config.player_count, 3);
        assert_eq!(config.round_count, 5);
        assert_eq!(config.interactive_seat, Some(PlayerId::new(1)));
        assert_eq!(config.seed, 9);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_rejects_bad_player_count() {
        assert!(GameConfig::default().with_players(1).validate().is_err());
        assert!(GameConfig::default().with_players(9).validate().is_err());
    }

    #[test]
    fn test_rejects_zero_rounds() {
        assert!(GameConfig::default().with_rounds(0).validate().is_err());
    }

    #[test]
    fn test_rejects_seat_outside_table() {
        let config = GameConfig::default()
            .with_players(2)
            .with_interactive_seat(PlayerId::new(2));
        assert!(matches!(config.validate(), Err(EngineError::InvalidConfig(_))));
    }

    #[test]
    fn test_config_serialization() {
        let config = GameConfig::default().with_interactive_seat(PlayerId::new(0));
        let json = serde_json::to_string(&config).unwrap();
        let back: GameConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(config, back);
    }
}
