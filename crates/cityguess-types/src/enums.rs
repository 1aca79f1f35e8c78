//! Enumeration types shared across the cityguess workspace.
//!
//! Difficulty tiers, the diversity relaxation levels a selection may need,
//! and the machine-readable identifiers for selection failures.

use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

// ---------------------------------------------------------------------------
// Difficulty
// ---------------------------------------------------------------------------

/// A difficulty tier governing which cities are eligible for a game.
///
/// The tier of a city is assigned when the catalog is authored and is
/// never recomputed at runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export, export_to = "bindings/")]
pub enum Difficulty {
    /// Capitals and the largest, most recognisable cities.
    Beginner,
    /// Well-known secondary cities (rank 3-10 within their country).
    Intermediate,
    /// Regional cities (rank 11-30 within their country).
    Advanced,
}

impl Difficulty {
    /// Every tier, in ascending order of difficulty.
    pub const ALL: [Self; 3] = [Self::Beginner, Self::Intermediate, Self::Advanced];

    /// The lowercase identifier used in data files and on the wire.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Beginner => "beginner",
            Self::Intermediate => "intermediate",
            Self::Advanced => "advanced",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a string does not name a difficulty tier.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid difficulty: {0} (expected beginner, intermediate or advanced)")]
pub struct ParseDifficultyError(pub String);

impl FromStr for Difficulty {
    type Err = ParseDifficultyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|tier| tier.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ParseDifficultyError(s.to_owned()))
    }
}

// ---------------------------------------------------------------------------
// Relaxation
// ---------------------------------------------------------------------------

/// How far the diversity constraints had to be loosened to fill a result.
///
/// Ordered from strictest to loosest so the strongest relaxation of a
/// selection is simply the maximum over its slots.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS,
)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "bindings/")]
pub enum Relaxation {
    /// Both the continent and the country caps held.
    #[default]
    None,
    /// The per-continent cap was raised for at least one slot.
    Continent,
    /// Both the per-continent and the per-country caps were raised.
    ContinentAndCountry,
}

impl Relaxation {
    /// The next looser level, or `None` once every constraint is relaxed.
    pub const fn loosen(self) -> Option<Self> {
        match self {
            Self::None => Some(Self::Continent),
            Self::Continent => Some(Self::ContinentAndCountry),
            Self::ContinentAndCountry => None,
        }
    }
}

// ---------------------------------------------------------------------------
// SelectionErrorKind
// ---------------------------------------------------------------------------

/// Machine-readable identifier for a failed selection.
///
/// The API layer maps these to status codes and user-facing messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "bindings/")]
pub enum SelectionErrorKind {
    /// Fewer eligible cities than requested.
    NoCitiesAvailable,
    /// Diversity caps could not be met even after relaxation.
    InsufficientDiversity,
}

impl SelectionErrorKind {
    /// The identifier as it appears in serialized error payloads.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::NoCitiesAvailable => "no_cities_available",
            Self::InsufficientDiversity => "insufficient_diversity",
        }
    }
}

impl fmt::Display for SelectionErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
