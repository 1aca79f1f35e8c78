//! The immutable, per-tier city catalog.
//!
//! Built once at startup by the loader and then only read. Catalog order is
//! authoring order and carries no meaning for selection.

use std::collections::BTreeMap;

use cityguess_types::{City, Difficulty};

/// Validated cities grouped by the tier they were authored under.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Catalog {
    /// Cities per tier, in authoring order.
    tiers: BTreeMap<Difficulty, Vec<City>>,
}

impl Catalog {
    /// Create an empty catalog.
    pub const fn new() -> Self {
        Self {
            tiers: BTreeMap::new(),
        }
    }

    /// Build a catalog from already validated cities.
    ///
    /// Each city is filed under its own [`City::difficulty`].
    pub fn from_cities(cities: impl IntoIterator<Item = City>) -> Self {
        let mut catalog = Self::new();
        for city in cities {
            catalog.tiers.entry(city.difficulty).or_default().push(city);
        }
        catalog
    }

    /// Replace the cities of one tier.
    pub(crate) fn set_tier(&mut self, tier: Difficulty, cities: Vec<City>) {
        self.tiers.insert(tier, cities);
    }

    /// The cities of a tier; empty when the tier has none.
    pub fn cities(&self, tier: Difficulty) -> &[City] {
        self.tiers.get(&tier).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Iterate every city across all tiers.
    pub fn iter(&self) -> impl Iterator<Item = &City> {
        self.tiers.values().flatten()
    }

    /// Total number of cities across all tiers.
    pub fn len(&self) -> usize {
        self.tiers.values().map(Vec::len).sum()
    }

    /// Whether the catalog holds no cities at all.
    pub fn is_empty(&self) -> bool {
        self.tiers.values().all(Vec::is_empty)
    }

    /// Look up a city by name, ignoring case, across every tier.
    pub fn find_by_name(&self, name: &str) -> Option<&City> {
        let wanted = name.trim().to_lowercase();
        self.iter().find(|city| city.name.to_lowercase() == wanted)
    }

    /// Number of cities in each tier. Tiers without cities report zero.
    pub fn tier_counts(&self) -> BTreeMap<Difficulty, usize> {
        Difficulty::ALL
            .into_iter()
            .map(|tier| (tier, self.cities(tier).len()))
            .collect()
    }

    /// Number of cities per continent across all tiers.
    pub fn continental_distribution(&self) -> BTreeMap<String, usize> {
        continent_counts(self.iter())
    }
}

/// Count cities per continent.
///
/// Used both for catalog statistics and to describe how spread out a
/// selection result is.
pub fn continent_counts<'a>(cities: impl IntoIterator<Item = &'a City>) -> BTreeMap<String, usize> {
    let mut counts: BTreeMap<String, usize> = BTreeMap::new();
    for city in cities {
        let count = counts.entry(city.continent.clone()).or_insert(0);
        *count = count.saturating_add(1);
    }
    counts
}
