//! # startups-engine
//!
//! Round engine for a stock-acquisition card game. Players collect shares
//! of six companies, race for majorities, and settle dividends when the
//! deck runs out.
//!
//! ## Design Principles
//!
//! 1. **Ownership is the rulebook**: a [`Share`] is never cloned. Drawing,
//!    claiming, folding and returning all move it, so a share can only be
//!    in one place.
//!
//! 2. **Turns are scoped**: the active player gets a [`Turn`] that borrows
//!    the deck and market mutably for exactly one acquisition and one
//!    disposal.
//!
//! 3. **Events over printing**: the engine emits [`GameEvent`]s to a
//!    [`GameObserver`]; rendering and logging live outside the rules.
//!
//! 4. **Seeded randomness**: every random choice goes through [`GameRng`],
//!    so a seed fully determines a game of robots.
//!
//! ## Modules
//!
//! - `core`: companies, shares, players, config, errors, RNG, table views
//! - `zones`: the deck and the market
//! - `policy`: the `DecisionPolicy` trait, robot and interactive seats
//! - `rules`: majorities, settlement, audits, the round engine
//! - `events`: game events and observers
//! - `game`: multi-round orchestration

pub mod core;
pub mod events;
pub mod game;
pub mod policy;
pub mod rules;
pub mod zones;

pub use crate::core::{
    Company, CompanyMap, CompanyRegistry, CompanySet, EngineError, GameConfig, GameRng, Player,
    PlayerId, PlayerMap, Share, ShareId, TableSnapshot, TableView,
};

pub use crate::events::{EventLog, GameEvent, GameObserver, NullObserver, TracingObserver};

pub use crate::game::{Game, GameBuilder, GameSummary, Standing};

pub use crate::policy::{Acquired, AutomatedPolicy, DecisionPolicy, InteractivePolicy, Origin, Turn};

pub use crate::rules::{Dividend, Round, RoundResult, Roster};

pub use crate::zones::Table;
