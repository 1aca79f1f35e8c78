//! City records and their projections.
//!
//! [`City`] is the immutable catalog record; [`CityKey`] is its identity;
//! [`CityView`] is the shape handed to the API layer and, through it, to the
//! clue generator.

use core::fmt;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::enums::Difficulty;

// ---------------------------------------------------------------------------
// CityKey
// ---------------------------------------------------------------------------

/// Identity of a city: its name together with its country.
///
/// Two records with the same key are the same city, whatever their other
/// fields say.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct CityKey {
    /// City name as authored.
    pub name: String,
    /// Country the city belongs to.
    pub country: String,
}

impl fmt::Display for CityKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {}", self.name, self.country)
    }
}

// ---------------------------------------------------------------------------
// City
// ---------------------------------------------------------------------------

/// A validated catalog city.
///
/// Constructed only by the catalog loader after validation, so every field
/// already satisfies its range constraints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct City {
    /// City name.
    pub name: String,
    /// Country name.
    pub country: String,
    /// Continent name (e.g. "Europe", "South America").
    pub continent: String,
    /// State, province or broader region within the country.
    pub region: String,
    /// Resident population.
    pub population: u32,
    /// Whether the city is its country's capital.
    pub is_capital: bool,
    /// Population rank within its own country (1 = largest).
    pub city_rank: u32,
    /// Latitude in degrees, within `[-90, 90]`.
    pub lat: f64,
    /// Longitude in degrees, within `[-180, 180]`.
    pub lon: f64,
    /// IATA codes of airports serving the city, as authored.
    pub airport_codes: Vec<String>,
    /// Notable landmarks, as authored.
    pub landmarks: Vec<String>,
    /// Tier the city was authored under.
    pub difficulty: Difficulty,
}

impl City {
    /// The identity of this city.
    pub fn key(&self) -> CityKey {
        CityKey {
            name: self.name.clone(),
            country: self.country.clone(),
        }
    }

    /// Whether `hint` names this city's region, continent or country.
    ///
    /// Matching is a case-insensitive substring test. A blank hint matches
    /// nothing.
    pub fn matches_region_hint(&self, hint: &str) -> bool {
        let hint = hint.trim().to_lowercase();
        if hint.is_empty() {
            return false;
        }
        [&self.region, &self.continent, &self.country]
            .into_iter()
            .any(|field| field.to_lowercase().contains(&hint))
    }

    /// Project this city into the response shape.
    pub fn view(&self) -> CityView {
        CityView {
            name: self.name.clone(),
            country: self.country.clone(),
            continent: self.continent.clone(),
            lat: self.lat,
            lon: self.lon,
            population: self.population,
            is_capital: self.is_capital,
            difficulty: self.difficulty,
            airport_codes: self.airport_codes.clone(),
            landmarks: self.landmarks.clone(),
        }
    }
}

// ---------------------------------------------------------------------------
// CityView
// ---------------------------------------------------------------------------

/// A selected city as serialized for the front end.
///
/// Airport codes and landmarks are passed through untouched so the clue
/// generator works from authored data rather than inventing its own.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "bindings/")]
pub struct CityView {
    /// City name.
    pub name: String,
    /// Country name.
    pub country: String,
    /// Continent name.
    pub continent: String,
    /// Latitude in degrees.
    pub lat: f64,
    /// Longitude in degrees.
    pub lon: f64,
    /// Resident population.
    pub population: u32,
    /// Whether the city is its country's capital.
    pub is_capital: bool,
    /// Tier the city was authored under.
    pub difficulty: Difficulty,
    /// Authored airport codes.
    pub airport_codes: Vec<String>,
    /// Authored landmarks.
    pub landmarks: Vec<String>,
}
