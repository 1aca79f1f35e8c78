//! The greedy, diversity-constrained weighted draw.
//!
//! Slots are filled one at a time from an index-based candidate list. A
//! candidate that would break a cap is set aside for the current slot only
//! and the slot is redrawn from what is left. When nothing left fits, the
//! caps are loosened for that slot (continent first, then country) and the
//! slot starts over. Past the loosest level the draw fails.

use std::collections::BTreeMap;

use cityguess_types::{City, Difficulty, Relaxation};
use rand::Rng;
use rand::seq::SliceRandom;
use tracing::debug;

use crate::config::DiversityConfig;
use crate::error::SelectionError;

/// Per-result caps in force at one relaxation level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DiversityCaps {
    /// Most cities sharing a continent.
    pub per_continent: usize,
    /// Most cities sharing a country.
    pub per_country: usize,
}

impl DiversityCaps {
    /// Caps for `level` under `config`.
    pub const fn at(config: &DiversityConfig, level: Relaxation) -> Self {
        match level {
            Relaxation::None => Self {
                per_continent: config.max_per_continent,
                per_country: config.max_per_country,
            },
            Relaxation::Continent => Self {
                per_continent: config.relaxed_max_per_continent,
                per_country: config.max_per_country,
            },
            Relaxation::ContinentAndCountry => Self {
                per_continent: config.relaxed_max_per_continent,
                per_country: config.relaxed_max_per_country,
            },
        }
    }
}

/// Continent and country usage of the slots filled so far.
#[derive(Debug, Default)]
struct Tally<'c> {
    continents: BTreeMap<&'c str, usize>,
    countries: BTreeMap<&'c str, usize>,
}

impl<'c> Tally<'c> {
    fn admits(&self, city: &City, caps: DiversityCaps) -> bool {
        let continent = self.continents.get(city.continent.as_str()).copied().unwrap_or(0);
        let country = self.countries.get(city.country.as_str()).copied().unwrap_or(0);
        continent < caps.per_continent && country < caps.per_country
    }

    fn add(&mut self, city: &'c City) {
        let continent = self.continents.entry(city.continent.as_str()).or_insert(0);
        *continent = continent.saturating_add(1);
        let country = self.countries.entry(city.country.as_str()).or_insert(0);
        *country = country.saturating_add(1);
    }
}

/// A filled result.
#[derive(Debug, Clone, PartialEq)]
pub struct Draw<'c> {
    /// Chosen cities in slot order.
    pub cities: Vec<&'c City>,
    /// Loosest caps any slot needed.
    pub relaxation: Relaxation,
}

/// Position in `open` of a weighted pick, or `None` when `open` is empty.
///
/// A cumulative walk over the weights of the open candidates.
fn weighted_pick<R: Rng + ?Sized>(open: &[usize], weights: &[f64], rng: &mut R) -> Option<usize> {
    if open.is_empty() {
        return None;
    }
    let weight_of = |idx: usize| weights.get(idx).copied().unwrap_or(0.0);
    let total: f64 = open.iter().map(|&idx| weight_of(idx)).sum();
    let target = rng.random::<f64>() * total;

    let mut cumulative = 0.0;
    for (pos, &idx) in open.iter().enumerate() {
        cumulative += weight_of(idx);
        if target < cumulative {
            return Some(pos);
        }
    }
    // Rounding can leave the target at the very top of the range.
    open.len().checked_sub(1)
}

/// Draw `count` distinct cities from `pool`.
///
/// `weights` is index-aligned with `pool`. The pool is shuffled by `rng`
/// before the first slot, so pool order only matters through the seed.
pub fn draw<'c, R: Rng + ?Sized>(
    difficulty: Difficulty,
    pool: &[&'c City],
    weights: &[f64],
    count: usize,
    diversity: &DiversityConfig,
    rng: &mut R,
) -> Result<Draw<'c>, SelectionError> {
    let mut remaining: Vec<usize> = (0..pool.len()).collect();
    remaining.shuffle(rng);

    let mut chosen: Vec<&'c City> = Vec::with_capacity(count);
    let mut tally = Tally::default();
    let mut strongest = Relaxation::None;

    while chosen.len() < count {
        let slot = chosen.len();
        let mut level = Relaxation::None;

        let picked = loop {
            let caps = DiversityCaps::at(diversity, level);
            let mut open = remaining.clone();
            let mut found = None;

            while let Some(pos) = weighted_pick(&open, weights, rng) {
                let idx = open.remove(pos);
                let Some(&city) = pool.get(idx) else {
                    continue;
                };
                if tally.admits(city, caps) {
                    found = Some(idx);
                    break;
                }
                debug!(
                    slot,
                    city = %city.name,
                    country = %city.country,
                    continent = %city.continent,
                    ?level,
                    "candidate breaks diversity caps, redrawing"
                );
            }

            if let Some(idx) = found {
                break idx;
            }
            level = level.loosen().ok_or(SelectionError::InsufficientDiversity {
                difficulty,
                selected: slot,
                requested: count,
            })?;
            debug!(slot, ?level, "no candidate fits, relaxing diversity caps");
        };

        remaining.retain(|&idx| idx != picked);
        if let Some(&city) = pool.get(picked) {
            tally.add(city);
            chosen.push(city);
        }
        strongest = strongest.max(level);
    }

    Ok(Draw {
        cities: chosen,
        relaxation: strongest,
    })
}
