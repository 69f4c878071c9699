//! Core types: companies, shares, players, configuration, errors, RNG.
//!
//! Nothing here knows about turns or rounds; the rule modules build on
//! these.

pub mod company;
pub mod config;
pub mod error;
pub mod player;
pub mod rng;
pub mod share;
pub mod state;

pub use company::{Company, CompanyMap, CompanyRegistry, CompanySet};
pub use config::{GameConfig, DIVIDEND_MULTIPLIER, HAND_SIZE, REMOVED_SHARES, STARTING_CASH};
pub use error::EngineError;
pub use player::{Hand, Player, PlayerId, PlayerMap};
pub use rng::GameRng;
pub use share::{Share, ShareId};
pub use state::{MarketEntry, PlayerSnapshot, TableSnapshot, TableView};
