//! Players and per-player storage.
//!
//! ## PlayerId
//!
//! Fixed seat number. Turn order for the first round is ascending id, and
//! rotation between rounds is keyed on it.
//!
//! ## PlayerMap
//!
//! Per-player data backed by `Vec` for O(1) access, indexed by `PlayerId`.
//!
//! ## Player
//!
//! A seat's holdings: private hand, public portfolio, cash, majorities and
//! victory points. How the seat decides is kept apart, in
//! [`crate::policy::DecisionPolicy`].

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::ops::{Index, IndexMut};

use super::company::{Company, CompanyMap, CompanySet};
use super::config::{HAND_SIZE, STARTING_CASH};
use super::share::Share;

/// Seat identifier, 0-based.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PlayerId(pub u8);

impl PlayerId {
    #[must_use]
    pub const fn new(id: u8) -> Self {
        Self(id)
    }

    /// Raw seat index.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// All seats of a `player_count` table, in id order.
    ///
    /// ```
    /// use startups_engine::core::PlayerId;
    ///
    /// let seats: Vec<_> = PlayerId::all(3).collect();
    /// assert_eq!(seats, vec![PlayerId(0), PlayerId(1), PlayerId(2)]);
    /// ```
    pub fn all(player_count: usize) -> impl Iterator<Item = PlayerId> {
        (0..player_count as u8).map(PlayerId)
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Player {}", self.0)
    }
}

/// Per-player storage with one entry per seat.
///
/// ```
/// use startups_engine::core::{PlayerId, PlayerMap};
///
/// let mut cash: PlayerMap<i32> = PlayerMap::new(3, |_| 10);
/// cash[PlayerId::new(1)] -= 4;
/// assert_eq!(cash[PlayerId::new(1)], 6);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerMap<T> {
    data: Vec<T>,
}

impl<T> PlayerMap<T> {
    /// Create a map with values from a factory function.
    pub fn new(player_count: usize, factory: impl Fn(PlayerId) -> T) -> Self {
        assert!(player_count > 0, "Must have at least 1 player");
        assert!(player_count <= 255, "At most 255 players supported");

        Self {
            data: PlayerId::all(player_count).map(factory).collect(),
        }
    }

    #[must_use]
    pub fn player_count(&self) -> usize {
        self.data.len()
    }

    #[must_use]
    pub fn get(&self, player: PlayerId) -> &T {
        &self.data[player.index()]
    }

    pub fn get_mut(&mut self, player: PlayerId) -> &mut T {
        &mut self.data[player.index()]
    }

    /// Iterate over (PlayerId, &T) pairs in id order.
    pub fn iter(&self) -> impl Iterator<Item = (PlayerId, &T)> {
        self.data
            .iter()
            .enumerate()
            .map(|(i, v)| (PlayerId(i as u8), v))
    }

    /// Iterate over values in id order.
    pub fn values(&self) -> impl Iterator<Item = &T> {
        self.data.iter()
    }

    /// Iterate over mutable values in id order.
    pub fn values_mut(&mut self) -> impl Iterator<Item = &mut T> {
        self.data.iter_mut()
    }

    pub fn player_ids(&self) -> impl Iterator<Item = PlayerId> {
        PlayerId::all(self.data.len())
    }
}

impl<T> Index<PlayerId> for PlayerMap<T> {
    type Output = T;

    fn index(&self, player: PlayerId) -> &Self::Output {
        self.get(player)
    }
}

impl<T> IndexMut<PlayerId> for PlayerMap<T> {
    fn index_mut(&mut self, player: PlayerId) -> &mut Self::Output {
        self.get_mut(player)
    }
}

/// Hand storage: a hand never exceeds `HAND_SIZE + 1` shares mid-turn.
pub type Hand = SmallVec<[Share; HAND_SIZE + 1]>;

/// One seat at the table.
#[derive(Debug)]
pub struct Player {
    id: PlayerId,
    name: String,
    hand: Hand,
    portfolio: CompanyMap<u32>,
    cash: i32,
    majorities: CompanySet,
    victory_points: i32,
}

impl Player {
    /// Create a player with an empty hand and no points.
    pub fn new(id: PlayerId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            hand: Hand::new(),
            portfolio: CompanyMap::default(),
            cash: STARTING_CASH,
            majorities: CompanySet::new(),
            victory_points: 0,
        }
    }

    #[must_use]
    pub fn id(&self) -> PlayerId {
        self.id
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Private hand.
    #[must_use]
    pub fn hand(&self) -> &[Share] {
        &self.hand
    }

    /// Public holdings by company.
    #[must_use]
    pub fn portfolio(&self) -> &CompanyMap<u32> {
        &self.portfolio
    }

    /// Public holdings of one company.
    #[must_use]
    pub fn shares_of(&self, company: Company) -> u32 {
        self.portfolio[company]
    }

    /// Never negative during turns. Dividends at settlement are debited in
    /// full and may leave it below zero.
    #[must_use]
    pub fn cash(&self) -> i32 {
        self.cash
    }

    /// Companies this player currently holds the majority in.
    #[must_use]
    pub fn majorities(&self) -> CompanySet {
        self.majorities
    }

    #[must_use]
    pub fn holds_majority(&self, company: Company) -> bool {
        self.majorities.contains(company)
    }

    /// Whether the player owns at least one share of `company`, counting the
    /// private hand as well as the portfolio.
    #[must_use]
    pub fn owns_any(&self, company: Company) -> bool {
        self.portfolio[company] > 0 || self.hand.iter().any(|s| s.company() == company)
    }

    #[must_use]
    pub fn victory_points(&self) -> i32 {
        self.victory_points
    }

    /// Start a round with a freshly dealt hand: cash back to the stake,
    /// portfolio and majorities cleared. Victory points are kept.
    pub fn reset_for_round(&mut self, hand: impl IntoIterator<Item = Share>) {
        self.hand = hand.into_iter().collect();
        self.portfolio.clear();
        self.cash = STARTING_CASH;
        self.majorities.clear();
    }

    /// Make one share of `company` public by adding it to the portfolio.
    pub fn augment_portfolio(&mut self, company: Company) {
        self.portfolio[company] += 1;
    }

    /// Fold the whole hand into the portfolio. Returns how many shares moved.
    pub fn fold_hand(&mut self) -> usize {
        let folded = self.hand.len();
        for share in self.hand.drain(..) {
            self.portfolio[share.company()] += 1;
        }
        folded
    }

    pub(crate) fn hand_mut(&mut self) -> &mut Hand {
        &mut self.hand
    }

    pub(crate) fn adjust_cash(&mut self, delta: i32) {
        self.cash += delta;
    }

    pub(crate) fn gain_majority(&mut self, company: Company) -> bool {
        self.majorities.insert(company)
    }

    pub(crate) fn lose_majority(&mut self, company: Company) -> bool {
        self.majorities.remove(company)
    }

    pub(crate) fn add_victory_points(&mut self, points: i32) {
        self.victory_points += points;
    }
}
