//! Selection against the catalog shipped in the repository's `data/`.

#![allow(clippy::unwrap_used, clippy::indexing_slicing, clippy::missing_panics_doc)]

use std::collections::BTreeSet;
use std::path::PathBuf;
use std::sync::Arc;

use cityguess_catalog::load_dir;
use cityguess_selection::eligibility::eligible_pool;
use cityguess_selection::{SelectionConfig, SelectionEngine};
use cityguess_types::{Difficulty, Relaxation, SelectionRequest};

fn data_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../data")
}

fn shipped_engine() -> SelectionEngine {
    let (catalog, report) = load_dir(&data_dir());
    assert!(report.is_clean(), "shipped catalog has problems: {report:?}");
    SelectionEngine::new(Arc::new(catalog), SelectionConfig::default())
}

#[test]
fn every_tier_has_enough_eligible_cities() {
    let engine = shipped_engine();
    assert_eq!(engine.eligible_count(Difficulty::Beginner), 24);
    assert_eq!(engine.eligible_count(Difficulty::Intermediate), 18);
    assert_eq!(engine.eligible_count(Difficulty::Advanced), 18);
}

#[test]
fn tier_rules_hold_on_shipped_data() {
    let engine = shipped_engine();
    let config = SelectionConfig::default();

    let intermediate = engine.catalog().cities(Difficulty::Intermediate);
    let pool = eligible_pool(&config.eligibility, Difficulty::Intermediate, intermediate);
    let names: BTreeSet<&str> = pool.iter().map(|c| c.name.as_str()).collect();
    // The two most populous intermediate cities are too well known.
    assert!(!names.contains("Ibadan"));
    assert!(!names.contains("Pune"));

    let advanced = engine.catalog().cities(Difficulty::Advanced);
    let pool = eligible_pool(&config.eligibility, Difficulty::Advanced, advanced);
    for city in pool {
        assert!(!city.is_capital, "{} is a capital", city.name);
        assert!((100_000..=2_500_000).contains(&city.population));
        assert!((11..=30).contains(&city.city_rank));
    }
}

#[test]
fn a_game_of_rounds_per_tier() {
    let engine = shipped_engine();
    for tier in Difficulty::ALL {
        for round in 0..6_u64 {
            let selection = engine
                .select(&SelectionRequest::new(tier, format!("{tier}-{round}")))
                .unwrap();
            assert_eq!(selection.cities.len(), 5);
            assert!(selection.cities.iter().all(|c| c.difficulty == tier));

            let keys: BTreeSet<_> = selection.keys().into_iter().collect();
            assert_eq!(keys.len(), 5);

            if selection.relaxation == Relaxation::None {
                assert!(selection.continent_counts().values().all(|&n| n <= 2));
                let countries: BTreeSet<_> =
                    selection.cities.iter().map(|c| c.country.as_str()).collect();
                assert_eq!(countries.len(), 5);
            }
        }
    }
}

#[test]
fn response_serializes_for_the_front_end() {
    let engine = shipped_engine();
    let response = engine
        .select(&SelectionRequest::new(Difficulty::Beginner, 2024_u64))
        .unwrap()
        .into_response();
    let json = serde_json::to_value(&response).unwrap();
    assert_eq!(json["relaxation"], "none");
    let first = &json["cities"][0];
    assert!(first.get("isCapital").is_some());
    assert!(first.get("airportCodes").is_some());
    assert!(first.get("cityRank").is_none());
}
