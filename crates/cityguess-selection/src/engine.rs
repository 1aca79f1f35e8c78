//! The selection engine: eligibility, weighting, draw, history update.
//!
//! One [`SelectionEngine`] serves every request of a process. The catalog
//! is shared read-only; the history sits behind a mutex and the whole
//! request (score against history, draw, record) runs under that lock, so
//! concurrent requests are serialized and each sees the previous one's
//! entry.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use cityguess_catalog::{Catalog, continent_counts};
use cityguess_types::{City, CityKey, Difficulty, Relaxation, SelectionRequest, SelectionResponse};
use tracing::{debug, info};

use crate::config::SelectionConfig;
use crate::draw::draw;
use crate::eligibility::eligible_pool;
use crate::error::SelectionError;
use crate::history::{HistoryEntry, SelectionHistory};
use crate::seed::rng_for;
use crate::weighting::pool_weights;

/// A successful selection.
#[derive(Debug, Clone, PartialEq)]
pub struct Selection {
    /// Tier the cities were drawn from.
    pub difficulty: Difficulty,
    /// Distinct cities in round order.
    pub cities: Vec<City>,
    /// Loosest diversity caps any slot needed.
    pub relaxation: Relaxation,
}

impl Selection {
    /// Identities of the selected cities, in round order.
    pub fn keys(&self) -> Vec<CityKey> {
        self.cities.iter().map(City::key).collect()
    }

    /// How many selected cities each continent contributed.
    pub fn continent_counts(&self) -> BTreeMap<String, usize> {
        continent_counts(&self.cities)
    }

    /// The response payload for the front end.
    pub fn into_response(self) -> SelectionResponse {
        SelectionResponse {
            cities: self.cities.iter().map(City::view).collect(),
            relaxation: self.relaxation,
        }
    }
}

/// Seeded, diversity-constrained city selection over a fixed catalog.
#[derive(Debug)]
pub struct SelectionEngine {
    catalog: Arc<Catalog>,
    config: SelectionConfig,
    history: Mutex<SelectionHistory>,
}

impl SelectionEngine {
    /// An engine with an empty history sized from `config`.
    pub fn new(catalog: Arc<Catalog>, config: SelectionConfig) -> Self {
        let history = SelectionHistory::new(config.history.capacity);
        Self::with_history(catalog, config, history)
    }

    /// An engine starting from an existing history.
    pub const fn with_history(
        catalog: Arc<Catalog>,
        config: SelectionConfig,
        history: SelectionHistory,
    ) -> Self {
        Self {
            catalog,
            config,
            history: Mutex::new(history),
        }
    }

    /// The catalog being drawn from.
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// A copy of the current history.
    pub fn history(&self) -> SelectionHistory {
        self.lock_history().clone()
    }

    /// Number of eligible cities `difficulty` currently offers.
    pub fn eligible_count(&self, difficulty: Difficulty) -> usize {
        eligible_pool(
            &self.config.eligibility,
            difficulty,
            self.catalog.cities(difficulty),
        )
        .len()
    }

    /// Draw `request.count` distinct cities of `request.difficulty`.
    ///
    /// For a fixed catalog and history the result depends only on the
    /// request. On success the result is recorded in the history; on
    /// failure the history is untouched.
    pub fn select(&self, request: &SelectionRequest) -> Result<Selection, SelectionError> {
        let difficulty = request.difficulty;
        let count = request.count;
        let pool = eligible_pool(
            &self.config.eligibility,
            difficulty,
            self.catalog.cities(difficulty),
        );

        if pool.len() < count {
            return Err(SelectionError::NoCitiesAvailable {
                difficulty,
                eligible: pool.len(),
                requested: count,
            });
        }
        if count == 0 {
            return Ok(Selection {
                difficulty,
                cities: Vec::new(),
                relaxation: Relaxation::None,
            });
        }

        let mut history = self.lock_history();
        let weights = pool_weights(
            &pool,
            &history,
            &self.config.weighting,
            request.region_hint.as_deref(),
        );
        let mut rng = rng_for(&request.seed);
        debug!(
            %difficulty,
            eligible = pool.len(),
            count,
            seed = %request.seed,
            "Drawing cities"
        );

        let drawn = draw(
            difficulty,
            &pool,
            &weights,
            count,
            &self.config.diversity,
            &mut rng,
        )?;
        history.push(HistoryEntry::from_cities(drawn.cities.iter().copied()));
        drop(history);

        let selection = Selection {
            difficulty,
            cities: drawn.cities.into_iter().cloned().collect(),
            relaxation: drawn.relaxation,
        };
        info!(
            %difficulty,
            count,
            relaxation = ?selection.relaxation,
            cities = ?selection.cities.iter().map(|c| c.name.as_str()).collect::<Vec<_>>(),
            "Selection complete"
        );
        Ok(selection)
    }

    /// History is plain data, so a poisoned lock is still usable.
    fn lock_history(&self) -> MutexGuard<'_, SelectionHistory> {
        self.history.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
