//! Companies and per-company storage.
//!
//! ## Company
//!
//! The fixed set of investable companies. Used only as a key.
//!
//! ## CompanyMap / CompanySet
//!
//! Per-company data backed by a fixed array indexed by the company ordinal,
//! and a bitset of companies. The key domain is tiny, so neither hashes.
//!
//! ## CompanyRegistry
//!
//! The companies in play for a game and how many shares each one issues.

use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};

use super::error::EngineError;

/// An investable company.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Company {
    GiraffeBeer,
    BowwowGames,
    FlamingoSoft,
    OctoCoffee,
    HippoPowertech,
    ElephantMarsTravel,
}

impl Company {
    /// Number of companies.
    pub const COUNT: usize = 6;

    /// All companies in ordinal order.
    pub const ALL: [Company; Company::COUNT] = [
        Company::GiraffeBeer,
        Company::BowwowGames,
        Company::FlamingoSoft,
        Company::OctoCoffee,
        Company::HippoPowertech,
        Company::ElephantMarsTravel,
    ];

    /// Ordinal index (0-based).
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Shares issued in the standard game.
    #[must_use]
    pub const fn standard_share_count(self) -> u32 {
        self as u32 + 5
    }

    /// Human-readable name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Company::GiraffeBeer => "Giraffe Beer",
            Company::BowwowGames => "Bowwow Games",
            Company::FlamingoSoft => "Flamingo Soft",
            Company::OctoCoffee => "Octo Coffee",
            Company::HippoPowertech => "Hippo Powertech",
            Company::ElephantMarsTravel => "Elephant Mars Travel",
        }
    }
}

impl std::fmt::Display for Company {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Per-company storage with one slot per [`Company`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompanyMap<T> {
    data: [T; Company::COUNT],
}

impl<T> CompanyMap<T> {
    /// Create a map with values from a factory function.
    pub fn new(factory: impl Fn(Company) -> T) -> Self {
        Self {
            data: Company::ALL.map(factory),
        }
    }

    /// Iterate over (Company, &T) pairs in ordinal order.
    pub fn iter(&self) -> impl Iterator<Item = (Company, &T)> {
        Company::ALL.into_iter().zip(self.data.iter())
    }
}

impl CompanyMap<u32> {
    /// Sum of all counts.
    #[must_use]
    pub fn total(&self) -> u32 {
        self.data.iter().sum()
    }

    /// Reset every count to zero.
    pub fn clear(&mut self) {
        self.data = [0; Company::COUNT];
    }
}

impl<T> Index<Company> for CompanyMap<T> {
    type Output = T;

    fn index(&self, company: Company) -> &Self::Output {
        &self.data[company.index()]
    }
}

impl<T> IndexMut<Company> for CompanyMap<T> {
    fn index_mut(&mut self, company: Company) -> &mut Self::Output {
        &mut self.data[company.index()]
    }
}

/// A set of companies, stored as a bitmask.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CompanySet(u8);

impl CompanySet {
    /// Empty set.
    #[must_use]
    pub const fn new() -> Self {
        Self(0)
    }

    #[must_use]
    pub fn contains(self, company: Company) -> bool {
        self.0 & (1 << company.index()) != 0
    }

    /// Insert a company. Returns true if it was not already present.
    pub fn insert(&mut self, company: Company) -> bool {
        let was_absent = !self.contains(company);
        self.0 |= 1 << company.index();
        was_absent
    }

    /// Remove a company. Returns true if it was present.
    pub fn remove(&mut self, company: Company) -> bool {
        let was_present = self.contains(company);
        self.0 &= !(1 << company.index());
        was_present
    }

    pub fn clear(&mut self) {
        self.0 = 0;
    }

    #[must_use]
    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    #[must_use]
    pub fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    /// Iterate over members in ordinal order.
    pub fn iter(self) -> impl Iterator<Item = Company> {
        Company::ALL.into_iter().filter(move |&c| self.contains(c))
    }
}

impl FromIterator<Company> for CompanySet {
    fn from_iter<I: IntoIterator<Item = Company>>(iter: I) -> Self {
        let mut set = CompanySet::new();
        for company in iter {
            set.insert(company);
        }
        set
    }
}

/// Smallest number of shares a company may issue.
pub const MIN_SHARES_PER_COMPANY: u32 = 5;

/// Largest number of shares a company may issue.
pub const MAX_SHARES_PER_COMPANY: u32 = 10;

/// Companies in play and their share supply.
///
/// ## Example
///
/// ```
/// use startups_engine::core::{Company, CompanyRegistry};
///
/// let registry = CompanyRegistry::standard();
/// assert_eq!(registry.len(), 6);
/// assert_eq!(registry.share_count(Company::ElephantMarsTravel), 10);
/// assert_eq!(registry.total_shares(), 45);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompanyRegistry {
    entries: Vec<(Company, u32)>,
}

impl CompanyRegistry {
    /// Build a registry, rejecting duplicate companies and share counts
    /// outside 5..=10.
    pub fn new(entries: Vec<(Company, u32)>) -> Result<Self, EngineError> {
        if entries.is_empty() {
            return Err(EngineError::InvalidRegistry("no companies".to_string()));
        }

        let mut seen = CompanySet::new();
        for &(company, count) in &entries {
            if !seen.insert(company) {
                return Err(EngineError::InvalidRegistry(format!(
                    "{company} listed twice"
                )));
            }
            if !(MIN_SHARES_PER_COMPANY..=MAX_SHARES_PER_COMPANY).contains(&count) {
                return Err(EngineError::InvalidRegistry(format!(
                    "{company} issues {count} shares, expected {MIN_SHARES_PER_COMPANY}..={MAX_SHARES_PER_COMPANY}"
                )));
            }
        }

        Ok(Self { entries })
    }

    /// The six companies of the standard game.
    #[must_use]
    pub fn standard() -> Self {
        Self {
            entries: Company::ALL
                .iter()
                .map(|&c| (c, c.standard_share_count()))
                .collect(),
        }
    }

    /// Companies in registry order.
    pub fn companies(&self) -> impl Iterator<Item = Company> + '_ {
        self.entries.iter().map(|&(c, _)| c)
    }

    /// (company, share count) pairs in registry order.
    pub fn iter(&self) -> impl Iterator<Item = (Company, u32)> + '_ {
        self.entries.iter().copied()
    }

    /// Shares issued by a company; zero if it is not in play.
    #[must_use]
    pub fn share_count(&self, company: Company) -> u32 {
        self.entries
            .iter()
            .find(|&&(c, _)| c == company)
            .map_or(0, |&(_, n)| n)
    }

    #[must_use]
    pub fn contains(&self, company: Company) -> bool {
        self.entries.iter().any(|&(c, _)| c == company)
    }

    /// Total shares issued across all companies.
    #[must_use]
    pub fn total_shares(&self) -> u32 {
        self.entries.iter().map(|&(_, n)| n).sum()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for CompanyRegistry {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_counts_are_distinct() {
        let registry = CompanyRegistry::standard();
        let counts: Vec<u32> = registry.iter().map(|(_, n)| n).collect();
        assert_eq!(counts, vec![5, 6, 7, 8, 9, 10]);
    }

    #[test]
    fn test_registry_rejects_duplicates() {
        let result = CompanyRegistry::new(vec![
            (Company::OctoCoffee, 8),
            (Company::OctoCoffee, 8),
        ]);
        assert!(matches!(result, Err(EngineError::InvalidRegistry(_))));
    }

    #[test]
    fn test_registry_rejects_bad_counts() {
        assert!(CompanyRegistry::new(vec![(Company::GiraffeBeer, 4)]).is_err());
        assert!(CompanyRegistry::new(vec![(Company::GiraffeBeer, 11)]).is_err());
        assert!(CompanyRegistry::new(vec![]).is_err());
    }

    #[test]
    fn test_share_count_of_absent_company() {
        let registry = CompanyRegistry::new(vec![(Company::FlamingoSoft, 7)]).unwrap();
        assert_eq!(registry.share_count(Company::FlamingoSoft), 7);
        assert_eq!(registry.share_count(Company::GiraffeBeer), 0);
        assert!(!registry.contains(Company::GiraffeBeer));
    }

    #[test]
    fn test_company_map_index() {
        let mut map: CompanyMap<u32> = CompanyMap::default();
        map[Company::HippoPowertech] += 2;
        map[Company::GiraffeBeer] += 1;

        assert_eq!(map[Company::HippoPowertech], 2);
        assert_eq!(map.total(), 3);

        map.clear();
        assert_eq!(map.total(), 0);
    }

    #[test]
    fn test_company_set() {
        let mut set = CompanySet::new();
        assert!(set.insert(Company::OctoCoffee));
        assert!(!set.insert(Company::OctoCoffee));
        assert!(set.insert(Company::BowwowGames));

        assert_eq!(set.len(), 2);
        assert_eq!(
            set.iter().collect::<Vec<_>>(),
            vec![Company::BowwowGames, Company::OctoCoffee]
        );

        assert!(set.remove(Company::OctoCoffee));
        assert!(!set.remove(Company::OctoCoffee));
        assert!(!set.contains(Company::OctoCoffee));
    }

    #[test]
    fn test_company_set_serialization() {
        let set: CompanySet = [Company::GiraffeBeer, Company::ElephantMarsTravel]
            .into_iter()
            .collect();
        let json = serde_json::to_string(&set).unwrap();
        let back: CompanySet = serde_json::from_str(&json).unwrap();
        assert_eq!(set, back);
    }
}
