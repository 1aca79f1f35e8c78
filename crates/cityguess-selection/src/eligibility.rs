//! Tier eligibility: which catalog cities a tier may draw from.
//!
//! Classification is a pure predicate over one city and the tier it was
//! authored under. The only pool-wide input is the "top cities" cut-off,
//! computed once per request from the tier's full list.

use cityguess_types::{City, Difficulty};

use crate::config::{EligibilityConfig, Prominence, TierRule};

/// Relative slack for float noise in `len * fraction` (e.g. `30 * 0.1`).
const TOP_FRACTION_SLACK: f64 = 1e-12;

/// Number of cities that count as the top slice of a tier of `len`.
///
/// This is `ceil(len * fraction)`, capped at `len`.
pub fn top_count(len: usize, fraction: f64) -> usize {
    if len == 0 || fraction <= 0.0 {
        return 0;
    }
    // Tier sizes are small; the conversions are exact.
    #[allow(
        clippy::cast_precision_loss,
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss
    )]
    let count = ((len as f64) * fraction * (1.0 - TOP_FRACTION_SLACK)).ceil() as usize;
    count.min(len)
}

/// Smallest population that still counts as a top city of the tier.
///
/// Cities tied with the last city inside the cut-off are top cities too.
/// Returns `None` when the tier is empty or the fraction selects nothing.
pub fn top_population_threshold(tier_cities: &[City], fraction: f64) -> Option<u32> {
    let count = top_count(tier_cities.len(), fraction);
    let last = count.checked_sub(1)?;
    let mut populations: Vec<u32> = tier_cities.iter().map(|c| c.population).collect();
    populations.sort_unstable_by(|a, b| b.cmp(a));
    populations.get(last).copied()
}

/// The classification rule of one tier, bound to that tier's cut-off.
#[derive(Debug, Clone, Copy)]
pub struct TierClassifier<'a> {
    rule: &'a TierRule,
    prominent_rank: u32,
    top_threshold: Option<u32>,
}

impl<'a> TierClassifier<'a> {
    /// Bind the configured rule for `tier` to that tier's city list.
    pub fn new(config: &'a EligibilityConfig, tier: Difficulty, tier_cities: &[City]) -> Self {
        Self {
            rule: config.rule(tier),
            prominent_rank: config.prominent_rank,
            top_threshold: top_population_threshold(tier_cities, config.top_fraction),
        }
    }

    /// Whether `city` is one of the tier's most populous cities.
    pub fn is_top(&self, city: &City) -> bool {
        self.top_threshold
            .is_some_and(|threshold| city.population >= threshold)
    }

    /// Capital, top city, or ranked within the country's leading few.
    pub fn is_prominent(&self, city: &City) -> bool {
        city.is_capital || city.city_rank <= self.prominent_rank || self.is_top(city)
    }

    /// Whether `city` may be drawn for this tier.
    pub fn accepts(&self, city: &City) -> bool {
        let rule = self.rule;
        if city.population < rule.min_population {
            return false;
        }
        if rule.max_population.is_some_and(|max| city.population > max) {
            return false;
        }
        if rule.min_rank.is_some_and(|min| city.city_rank < min) {
            return false;
        }
        if rule.max_rank.is_some_and(|max| city.city_rank > max) {
            return false;
        }
        match rule.prominence {
            Prominence::Required => self.is_prominent(city),
            Prominence::Excluded => !self.is_prominent(city),
        }
    }
}

/// The eligible cities of `tier`, in canonical `(name, country)` order.
///
/// Sorting removes any dependence on catalog authoring order, so a seed
/// always sees the same pool for the same set of cities.
pub fn eligible_pool<'c>(
    config: &EligibilityConfig,
    tier: Difficulty,
    tier_cities: &'c [City],
) -> Vec<&'c City> {
    let classifier = TierClassifier::new(config, tier, tier_cities);
    let mut pool: Vec<&City> = tier_cities
        .iter()
        .filter(|city| classifier.accepts(city))
        .collect();
    pool.sort_by_cached_key(|city| city.key());
    pool.dedup_by_key(|city| city.key());
    pool
}
