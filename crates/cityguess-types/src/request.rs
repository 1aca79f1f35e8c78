//! Selection request and response payloads.

use core::fmt;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::enums::{Difficulty, Relaxation};
use crate::structs::CityView;

/// Number of cities in a standard game (one per round).
pub const DEFAULT_ROUND_COUNT: usize = 5;

/// Opaque selection seed supplied by the caller.
///
/// Integers and strings are both accepted. Their canonical text form is what
/// gets hashed, so `42` and `"42"` are the same seed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(untagged)]
#[ts(export, export_to = "bindings/")]
pub enum SelectionSeed {
    /// Numeric seed.
    Number(u64),
    /// Free-form text seed.
    Text(String),
}

impl SelectionSeed {
    /// The canonical text form that seed derivation hashes.
    pub fn canonical(&self) -> String {
        match self {
            Self::Number(n) => n.to_string(),
            Self::Text(s) => s.clone(),
        }
    }
}

impl fmt::Display for SelectionSeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

impl From<u64> for SelectionSeed {
    fn from(n: u64) -> Self {
        Self::Number(n)
    }
}

impl From<&str> for SelectionSeed {
    fn from(s: &str) -> Self {
        Self::Text(s.to_owned())
    }
}

impl From<String> for SelectionSeed {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

const fn default_count() -> usize {
    DEFAULT_ROUND_COUNT
}

/// A request for `count` cities of one tier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "bindings/")]
pub struct SelectionRequest {
    /// Tier to draw from.
    pub difficulty: Difficulty,
    /// Number of distinct cities wanted.
    #[serde(default = "default_count")]
    pub count: usize,
    /// Seed that fully determines the draw for a given catalog and history.
    pub seed: SelectionSeed,
    /// Optional region, continent or country to favour.
    #[serde(default)]
    pub region_hint: Option<String>,
}

impl SelectionRequest {
    /// A standard five-round request with no region hint.
    pub fn new(difficulty: Difficulty, seed: impl Into<SelectionSeed>) -> Self {
        Self {
            difficulty,
            count: DEFAULT_ROUND_COUNT,
            seed: seed.into(),
            region_hint: None,
        }
    }

    /// Replace the requested count.
    #[must_use]
    pub fn with_count(mut self, count: usize) -> Self {
        self.count = count;
        self
    }

    /// Favour cities matching `hint`.
    #[must_use]
    pub fn with_region_hint(mut self, hint: impl Into<String>) -> Self {
        self.region_hint = Some(hint.into());
        self
    }
}

/// A successful selection as returned to the front end.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "bindings/")]
pub struct SelectionResponse {
    /// Selected cities in round order.
    pub cities: Vec<CityView>,
    /// Strongest diversity relaxation any slot needed.
    pub relaxation: Relaxation,
}
