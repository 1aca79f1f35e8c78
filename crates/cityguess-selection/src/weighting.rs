//! Draw weights for an eligible pool.
//!
//! Bigger cities are likelier, recently used cities and countries are
//! damped, and a region hint tilts the draw toward matching cities. No
//! weight is ever zero, so every eligible city stays reachable.

use cityguess_types::City;

use crate::config::WeightingConfig;
use crate::history::SelectionHistory;

/// Population-based weight before any adjustment, in `(0, 1]`.
///
/// `sqrt(population / max_population)`; a pool of zero-population cities
/// weighs every city at `1.0`.
pub fn base_weight(population: u32, max_population: u32) -> f64 {
    if max_population == 0 {
        return 1.0;
    }
    (f64::from(population) / f64::from(max_population)).sqrt()
}

/// Weight of every city in `pool`, index-aligned with it.
pub fn pool_weights(
    pool: &[&City],
    history: &SelectionHistory,
    config: &WeightingConfig,
    region_hint: Option<&str>,
) -> Vec<f64> {
    let max_population = pool.iter().map(|c| c.population).max().unwrap_or(0);
    let hint = region_hint.map(str::trim).filter(|h| !h.is_empty());

    pool.iter()
        .map(|city| {
            let mut weight = base_weight(city.population, max_population);
            if history.contains_city(&city.key()) {
                weight *= config.city_penalty;
            }
            if history.contains_country(&city.country) {
                weight *= config.country_penalty;
            }
            if hint.is_some_and(|h| city.matches_region_hint(h)) {
                weight *= config.region_hint_boost;
            }
            weight.max(config.weight_floor)
        })
        .collect()
}

#[cfg(test)]
#[allow(clippy::indexing_slicing)]
mod tests {
    use super::*;
    use crate::history::HistoryEntry;
    use cityguess_types::Difficulty;

    fn city(name: &str, country: &str, continent: &str, population: u32) -> City {
        City {
            name: name.to_owned(),
            country: country.to_owned(),
            continent: continent.to_owned(),
            region: String::new(),
            population,
            is_capital: true,
            city_rank: 1,
            lat: 0.0,
            lon: 0.0,
            airport_codes: Vec::new(),
            landmarks: Vec::new(),
            difficulty: Difficulty::Beginner,
        }
    }

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-12
    }

    #[test]
    fn base_weight_is_sqrt_of_share() {
        assert!(close(base_weight(4_000_000, 4_000_000), 1.0));
        assert!(close(base_weight(1_000_000, 4_000_000), 0.5));
        assert!(close(base_weight(5, 0), 1.0));
    }

    #[test]
    fn penalties_stack() {
        let paris = city("Paris", "France", "Europe", 4_000_000);
        let lyon = city("Lyon", "France", "Europe", 1_000_000);
        let rome = city("Rome", "Italy", "Europe", 1_000_000);
        let mut history = SelectionHistory::new(4);
        history.push(HistoryEntry::from_cities([&paris]));

        let pool = vec![&paris, &lyon, &rome];
        let weights = pool_weights(&pool, &history, &WeightingConfig::default(), None);

        assert!(close(weights[0], 0.15 * 0.5));
        assert!(close(weights[1], 0.5 * 0.5));
        assert!(close(weights[2], 0.5));
    }

    #[test]
    fn region_hint_boosts_matches() {
        let nairobi = city("Nairobi", "Kenya", "Africa", 1_000_000);
        let lima = city("Lima", "Peru", "South America", 1_000_000);
        let pool = vec![&nairobi, &lima];
        let history = SelectionHistory::new(4);
        let weights = pool_weights(&pool, &history, &WeightingConfig::default(), Some(" africa "));
        assert!(close(weights[0], 3.0));
        assert!(close(weights[1], 1.0));

        let blank = pool_weights(&pool, &history, &WeightingConfig::default(), Some("  "));
        assert!(close(blank[0], 1.0));
    }

    #[test]
    fn floor_keeps_every_city_reachable() {
        let big = city("Big", "A", "Asia", 4_000_000_000);
        let tiny = city("Tiny", "B", "Asia", 1);
        let pool = vec![&big, &tiny];
        let weights = pool_weights(&pool, &SelectionHistory::new(0), &WeightingConfig::default(), None);
        assert!(close(weights[1], 0.001));
    }
}
