//! Whole games: a roster, a seed and a number of rounds.
//!
//! ```
//! use startups_engine::{GameBuilder, GameConfig, NullObserver};
//!
//! let summary = GameBuilder::new()
//!     .config(GameConfig::default().with_players(3).with_rounds(2).with_seed(7))
//!     .build()
//!     .unwrap()
//!     .play(&mut NullObserver)
//!     .unwrap();
//!
//! assert_eq!(summary.rounds.len(), 2);
//! assert!(summary.winner().is_some());
//! ```

pub mod orchestrator;

pub use orchestrator::{
    final_standings, rotate_turn_order, Game, GameBuilder, GameSummary, Standing,
};
