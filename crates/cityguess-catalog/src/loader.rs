//! Loading tier documents from disk into a [`Catalog`].
//!
//! Each tier lives in its own JSON document, e.g. `beginner_cities.json`:
//!
//! ```json
//! { "beginner": [ { "name": "Tokyo", "country": "Japan", ... } ] }
//! ```
//!
//! Failures are contained at two levels. A record that does not deserialize
//! or does not validate is rejected and the rest of its tier still loads. A
//! tier document that cannot be read or parsed leaves that tier empty and the
//! other tiers still load. Both are logged and returned in a [`LoadReport`];
//! an empty tier only becomes a hard error later, when a selection asks for
//! it.

use std::collections::BTreeMap;
use std::path::Path;

use cityguess_types::{City, Difficulty};
use tracing::{info, warn};

use crate::catalog::Catalog;
use crate::error::CatalogError;
use crate::record::{CityRecord, RecordRejection};

/// File name of the document holding a tier's cities.
pub const fn tier_file_name(tier: Difficulty) -> &'static str {
    match tier {
        Difficulty::Beginner => "beginner_cities.json",
        Difficulty::Intermediate => "intermediate_cities.json",
        Difficulty::Advanced => "advanced_cities.json",
    }
}

/// Outcome of parsing one tier document.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TierLoad {
    /// Records that validated, in document order.
    pub cities: Vec<City>,
    /// Records that were excluded.
    pub rejections: Vec<RecordRejection>,
}

/// Everything that went wrong during a directory load.
#[derive(Debug, Default)]
pub struct LoadReport {
    /// Individual records excluded from the catalog.
    pub rejections: Vec<RecordRejection>,
    /// Tiers whose document could not be read or parsed at all.
    pub tier_errors: Vec<(Difficulty, CatalogError)>,
}

impl LoadReport {
    /// Whether every document loaded and every record validated.
    pub fn is_clean(&self) -> bool {
        self.rejections.is_empty() && self.tier_errors.is_empty()
    }
}

/// Parse a tier document held in memory.
///
/// Only the entry keyed by the tier's own name is read. A document without
/// that key yields an empty tier.
pub fn parse_tier_document(tier: Difficulty, json: &str) -> Result<TierLoad, CatalogError> {
    let mut document: BTreeMap<String, Vec<serde_json::Value>> =
        serde_json::from_str(json).map_err(|source| CatalogError::Json { tier, source })?;

    let Some(entries) = document.remove(tier.as_str()) else {
        warn!(tier = %tier, "tier document has no entry for its tier");
        return Ok(TierLoad::default());
    };

    let mut load = TierLoad::default();
    for (index, value) in entries.into_iter().enumerate() {
        let name = value
            .get("name")
            .and_then(serde_json::Value::as_str)
            .map(str::to_owned);

        let outcome = serde_json::from_value::<CityRecord>(value)
            .map_err(|e| RecordRejection {
                tier,
                index,
                name,
                reason: e.to_string(),
            })
            .and_then(|record| record.into_city(tier, index));

        match outcome {
            Ok(city) => load.cities.push(city),
            Err(rejection) => {
                warn!(
                    tier = %tier,
                    index = rejection.index,
                    name = rejection.name.as_deref().unwrap_or("<unnamed>"),
                    reason = %rejection.reason,
                    "rejected catalog record"
                );
                load.rejections.push(rejection);
            }
        }
    }
    Ok(load)
}

/// Read and parse one tier document from disk.
pub fn load_tier_file(tier: Difficulty, path: &Path) -> Result<TierLoad, CatalogError> {
    let contents = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_tier_document(tier, &contents)
}

/// Load every tier document found in `dir`.
///
/// Never fails as a whole: per-tier and per-record problems are collected
/// in the returned [`LoadReport`].
pub fn load_dir(dir: &Path) -> (Catalog, LoadReport) {
    let mut catalog = Catalog::new();
    let mut report = LoadReport::default();

    for tier in Difficulty::ALL {
        let path = dir.join(tier_file_name(tier));
        match load_tier_file(tier, &path) {
            Ok(load) => {
                info!(
                    tier = %tier,
                    loaded = load.cities.len(),
                    rejected = load.rejections.len(),
                    "Loaded tier cities"
                );
                catalog.set_tier(tier, load.cities);
                report.rejections.extend(load.rejections);
            }
            Err(e) => {
                warn!(tier = %tier, error = %e, "failed to load tier document");
                report.tier_errors.push((tier, e));
            }
        }
    }

    (catalog, report)
}
