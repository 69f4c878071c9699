//! Shared zones: the deck and the market.
//!
//! Both are owned by the round and lent to the active player's turn through
//! [`crate::policy::Turn`]; nothing else mutates them.

pub mod table;

pub use table::Table;
