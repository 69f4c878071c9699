//! Game rules: majorities, settlement, the round engine.
//!
//! ## Layout
//!
//! - [`majority`]: the after-turn and settlement majority rules
//! - [`settlement`]: folding hands, dividends, victory points
//! - [`audit`]: invariant checks run after every turn
//! - [`roster`]: seats and their policies
//! - [`round`]: setup, turn loop and settlement of one round

pub mod audit;
pub mod majority;
pub mod roster;
pub mod round;
pub mod settlement;

pub use roster::Roster;
pub use round::{Round, RoundResult};
pub use settlement::Dividend;
