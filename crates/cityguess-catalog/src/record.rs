//! Raw catalog records and their validation.
//!
//! A [`CityRecord`] is one entry exactly as authored in a tier document.
//! Field-level rules are declared with `validator`; [`CityRecord::into_city`]
//! runs them, applies the width checks that only make sense once the
//! numbers are narrowed, and either produces a [`City`] or a
//! [`RecordRejection`] explaining why the record was dropped.

use cityguess_types::{City, Difficulty};
use serde::Deserialize;
use validator::Validate;

/// One city entry as it appears in a tier document.
///
/// Numeric fields are read wide and signed so that negative or oversized
/// values reach validation instead of failing deserialization.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CityRecord {
    /// City name.
    #[validate(length(min = 1))]
    pub name: String,
    /// Country name.
    #[validate(length(min = 1))]
    pub country: String,
    /// Continent name.
    #[validate(length(min = 1))]
    pub continent: String,
    /// State, province or broader region.
    #[serde(default)]
    pub region: String,
    /// Resident population.
    #[validate(range(min = 0))]
    pub population: i64,
    /// Whether the city is its country's capital.
    #[serde(default)]
    pub is_capital: bool,
    /// Population rank within the country, 1 = largest.
    #[validate(range(min = 1))]
    pub city_rank: i64,
    /// Latitude in degrees.
    #[validate(range(min = -90.0, max = 90.0))]
    pub lat: f64,
    /// Longitude in degrees.
    #[validate(range(min = -180.0, max = 180.0))]
    pub lon: f64,
    /// Airport codes serving the city.
    #[serde(default)]
    pub airport_codes: Vec<String>,
    /// Notable landmarks.
    #[serde(default)]
    pub landmarks: Vec<String>,
}

/// A record that was excluded from the catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordRejection {
    /// Tier document the record came from.
    pub tier: Difficulty,
    /// Zero-based position of the record within its tier array.
    pub index: usize,
    /// The record's name, when it could be read.
    pub name: Option<String>,
    /// Human-readable reason for the rejection.
    pub reason: String,
}

impl CityRecord {
    /// Validate the record and convert it into a catalog [`City`].
    ///
    /// `index` is only used to label a rejection.
    pub fn into_city(self, tier: Difficulty, index: usize) -> Result<City, RecordRejection> {
        let reject = |name: &str, reason: String| RecordRejection {
            tier,
            index,
            name: Some(name.to_owned()),
            reason,
        };

        if let Err(errors) = self.validate() {
            let mut fields: Vec<String> = errors
                .field_errors()
                .keys()
                .map(ToString::to_string)
                .collect();
            fields.sort();
            return Err(reject(
                &self.name,
                format!("invalid {}: {errors}", fields.join(", ")),
            ));
        }

        for (field, value) in [
            ("name", &self.name),
            ("country", &self.country),
            ("continent", &self.continent),
        ] {
            if value.trim().is_empty() {
                return Err(reject(&self.name, format!("{field}: must not be blank")));
            }
        }

        let population = u32::try_from(self.population).map_err(|_overflow| {
            reject(
                &self.name,
                format!("population: {} exceeds supported range", self.population),
            )
        })?;
        let city_rank = u32::try_from(self.city_rank).map_err(|_overflow| {
            reject(
                &self.name,
                format!("city_rank: {} exceeds supported range", self.city_rank),
            )
        })?;

        Ok(City {
            name: self.name,
            country: self.country,
            continent: self.continent,
            region: self.region,
            population,
            is_capital: self.is_capital,
            city_rank,
            lat: self.lat,
            lon: self.lon,
            airport_codes: self.airport_codes,
            landmarks: self.landmarks,
            difficulty: tier,
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::arithmetic_side_effects)]
mod tests {
    use super::*;

    fn record() -> CityRecord {
        CityRecord {
            name: String::from("Porto"),
            country: String::from("Portugal"),
            continent: String::from("Europe"),
            region: String::from("Norte"),
            population: 1_300_000,
            is_capital: false,
            city_rank: 2,
            lat: 41.15,
            lon: -8.61,
            airport_codes: vec![String::from("OPO")],
            landmarks: vec![String::from("Dom Luis I Bridge")],
        }
    }

    #[test]
    fn valid_record_converts() {
        let city = record().into_city(Difficulty::Intermediate, 0).unwrap();
        assert_eq!(city.name, "Porto");
        assert_eq!(city.population, 1_300_000);
        assert_eq!(city.city_rank, 2);
        assert_eq!(city.difficulty, Difficulty::Intermediate);
        assert_eq!(city.airport_codes, vec![String::from("OPO")]);
    }

    #[test]
    fn negative_population_is_rejected() {
        let mut bad = record();
        bad.population = -1;
        let rejection = bad.into_city(Difficulty::Beginner, 3).unwrap_err();
        assert_eq!(rejection.index, 3);
        assert_eq!(rejection.name.as_deref(), Some("Porto"));
        assert!(rejection.reason.contains("population"));
    }

    #[test]
    fn out_of_range_coordinates_are_rejected() {
        let mut bad_lat = record();
        bad_lat.lat = 91.0;
        assert!(bad_lat.into_city(Difficulty::Beginner, 0).is_err());

        let mut bad_lon = record();
        bad_lon.lon = -180.5;
        assert!(bad_lon.into_city(Difficulty::Beginner, 0).is_err());
    }

    #[test]
    fn boundary_coordinates_are_accepted() {
        let mut edge = record();
        edge.lat = -90.0;
        edge.lon = 180.0;
        assert!(edge.into_city(Difficulty::Beginner, 0).is_ok());
    }

    #[test]
    fn empty_or_blank_names_are_rejected() {
        let mut empty = record();
        empty.name = String::new();
        assert!(empty.into_city(Difficulty::Beginner, 0).is_err());

        let mut blank = record();
        blank.continent = String::from("   ");
        let rejection = blank.into_city(Difficulty::Beginner, 0).unwrap_err();
        assert!(rejection.reason.contains("continent"));
    }

    #[test]
    fn zero_rank_is_rejected() {
        let mut bad = record();
        bad.city_rank = 0;
        assert!(bad.into_city(Difficulty::Advanced, 0).is_err());
    }

    #[test]
    fn oversized_population_is_rejected() {
        let mut bad = record();
        bad.population = i64::from(u32::MAX) + 1;
        let rejection = bad.into_city(Difficulty::Beginner, 0).unwrap_err();
        assert!(rejection.reason.contains("exceeds"));
    }
}
