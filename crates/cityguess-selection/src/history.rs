//! Recent-selection memory shared by consecutive requests.
//!
//! A bounded FIFO of past results. Scoring only reads it; a successful
//! selection pushes one entry and evicts the oldest once the window is full.
//! Nothing here is persisted.

use std::collections::{BTreeSet, VecDeque};

use cityguess_types::{City, CityKey};

/// Cities and countries used by one past selection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HistoryEntry {
    /// Identities of the selected cities.
    pub cities: BTreeSet<CityKey>,
    /// Countries of the selected cities.
    pub countries: BTreeSet<String>,
}

impl HistoryEntry {
    /// Record the cities of one result.
    pub fn from_cities<'a>(cities: impl IntoIterator<Item = &'a City>) -> Self {
        let mut entry = Self::default();
        for city in cities {
            entry.cities.insert(city.key());
            entry.countries.insert(city.country.clone());
        }
        entry
    }
}

/// Bounded window over the most recent selections.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionHistory {
    capacity: usize,
    entries: VecDeque<HistoryEntry>,
}

impl SelectionHistory {
    /// An empty history remembering at most `capacity` selections.
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            entries: VecDeque::with_capacity(capacity),
        }
    }

    /// Maximum number of remembered selections.
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of selections currently remembered.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing has been remembered yet.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Remember a selection, evicting the oldest beyond capacity.
    pub fn push(&mut self, entry: HistoryEntry) {
        if self.capacity == 0 {
            return;
        }
        while self.entries.len() >= self.capacity {
            self.entries.pop_front();
        }
        self.entries.push_back(entry);
    }

    /// Whether `key` appears in any remembered selection.
    pub fn contains_city(&self, key: &CityKey) -> bool {
        self.entries.iter().any(|e| e.cities.contains(key))
    }

    /// Whether `country` appears in any remembered selection.
    pub fn contains_country(&self, country: &str) -> bool {
        self.entries.iter().any(|e| e.countries.contains(country))
    }
}
