//! JSON documents printed on stdout.

use std::collections::BTreeMap;

use cityguess_selection::{Selection, SelectionEngine};
use cityguess_types::{CityView, Difficulty, SelectionResponse, SelectionSeed};
use serde::Serialize;

/// One drawn session.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoundReport {
    /// 1-based session number within this invocation.
    pub round: usize,
    /// Seed the session was drawn with.
    pub seed: SelectionSeed,
    /// Selected cities and the relaxation that was needed.
    #[serde(flatten)]
    pub response: SelectionResponse,
    /// Selected cities per continent.
    pub continents: BTreeMap<String, usize>,
}

impl RoundReport {
    /// Describe one successful selection.
    pub fn new(round: usize, seed: SelectionSeed, selection: Selection) -> Self {
        let continents = selection.continent_counts();
        Self {
            round,
            seed,
            response: selection.into_response(),
            continents,
        }
    }
}

/// Size of one tier.
#[derive(Debug, Serialize)]
pub struct TierStats {
    /// Cities loaded for the tier.
    pub total: usize,
    /// Cities the tier's rules allow to be drawn.
    pub eligible: usize,
}

/// Catalog overview.
#[derive(Debug, Serialize)]
pub struct StatsReport {
    /// Per-tier sizes.
    pub tiers: BTreeMap<Difficulty, TierStats>,
    /// Cities per continent across every tier.
    pub continents: BTreeMap<String, usize>,
}

impl StatsReport {
    /// Summarize the engine's catalog.
    pub fn new(engine: &SelectionEngine) -> Self {
        let catalog = engine.catalog();
        let tiers = catalog
            .tier_counts()
            .into_iter()
            .map(|(tier, total)| {
                let stats = TierStats {
                    total,
                    eligible: engine.eligible_count(tier),
                };
                (tier, stats)
            })
            .collect();
        Self {
            tiers,
            continents: catalog.continental_distribution(),
        }
    }
}

/// A single looked-up city.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LookupReport {
    /// The city as the front end sees it.
    #[serde(flatten)]
    pub city: CityView,
    /// State, province or broader region.
    pub region: String,
    /// Population rank within the country.
    pub city_rank: u32,
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use cityguess_catalog::Catalog;
    use cityguess_selection::SelectionConfig;
    use cityguess_types::{City, SelectionRequest};

    fn city(name: &str, country: &str, continent: &str) -> City {
        City {
            name: name.to_owned(),
            country: country.to_owned(),
            continent: continent.to_owned(),
            region: String::from("Somewhere"),
            population: 3_000_000,
            is_capital: true,
            city_rank: 1,
            lat: 1.0,
            lon: 2.0,
            airport_codes: Vec::new(),
            landmarks: Vec::new(),
            difficulty: Difficulty::Beginner,
        }
    }

    fn engine() -> SelectionEngine {
        SelectionEngine::new(
            Arc::new(Catalog::from_cities([
                city("Hanoi", "Vietnam", "Asia"),
                city("Accra", "Ghana", "Africa"),
                city("Quito", "Ecuador", "South America"),
            ])),
            SelectionConfig::default(),
        )
    }

    #[test]
    fn round_report_shape() {
        let engine = engine();
        let seed = SelectionSeed::from("2024-06-01T09");
        let request = SelectionRequest::new(Difficulty::Beginner, seed.clone()).with_count(3);
        let selection = engine.select(&request).unwrap();
        let json = serde_json::to_value(RoundReport::new(1, seed, selection)).unwrap();

        assert_eq!(json["round"], 1);
        assert_eq!(json["seed"], "2024-06-01T09");
        assert_eq!(json["relaxation"], "none");
        assert_eq!(json["cities"].as_array().unwrap().len(), 3);
        assert_eq!(json["continents"]["Asia"], 1);
    }

    #[test]
    fn stats_report_counts_every_tier() {
        let json = serde_json::to_value(StatsReport::new(&engine())).unwrap();
        assert_eq!(json["tiers"]["beginner"]["total"], 3);
        assert_eq!(json["tiers"]["beginner"]["eligible"], 3);
        assert_eq!(json["tiers"]["advanced"]["total"], 0);
        assert_eq!(json["continents"]["Africa"], 1);
    }
}
