//! Configuration loading and typed config structures for the selection engine.
//!
//! The canonical configuration lives in `cityguess-config.yaml` at the
//! project root. Every field has a default, so an empty or missing file
//! yields the stock tuning: five-round games, a four-session history
//! window, at most two cities per continent and one per country.

use std::path::{Path, PathBuf};

use cityguess_types::Difficulty;
use serde::Deserialize;
use validator::Validate;

/// Environment variable that overrides [`CatalogConfig::data_dir`].
pub const DATA_DIR_ENV: &str = "CITYGUESS_DATA_DIR";

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read config file: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Failed to parse YAML content.
    #[error("failed to parse config YAML: {source}")]
    Yaml {
        /// The underlying YAML parse error.
        source: serde_yml::Error,
    },

    /// The configuration parsed but holds values the engine cannot use.
    #[error("invalid config: {reason}")]
    Invalid {
        /// What is wrong with it.
        reason: String,
    },
}

impl From<serde_yml::Error> for ConfigError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}

impl From<validator::ValidationErrors> for ConfigError {
    fn from(errors: validator::ValidationErrors) -> Self {
        Self::Invalid {
            reason: errors.to_string(),
        }
    }
}

/// Top-level selection configuration.
///
/// Mirrors the structure of `cityguess-config.yaml`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Validate)]
pub struct SelectionConfig {
    /// Where the tier documents live.
    #[serde(default)]
    pub catalog: CatalogConfig,

    /// Recent-selection window.
    #[serde(default)]
    pub history: HistoryConfig,

    /// Base weights and penalties.
    #[serde(default)]
    #[validate(nested)]
    pub weighting: WeightingConfig,

    /// Per-result continent and country caps.
    #[serde(default)]
    #[validate(nested)]
    pub diversity: DiversityConfig,

    /// Tier classification rules.
    #[serde(default)]
    #[validate(nested)]
    pub eligibility: EligibilityConfig,
}

impl SelectionConfig {
    /// Load configuration from a YAML file at the given path.
    ///
    /// `CITYGUESS_DATA_DIR` overrides `catalog.data_dir`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read,
    /// [`ConfigError::Yaml`] if the content is not valid YAML, or
    /// [`ConfigError::Invalid`] if a value is out of range.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    /// Parse configuration from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Yaml`] if the string is not valid YAML, or
    /// [`ConfigError::Invalid`] if a value is out of range.
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        let mut config: Self = serde_yml::from_str(yaml)?;
        config
            .catalog
            .apply_data_dir_override(std::env::var(DATA_DIR_ENV).ok());
        config.check()?;
        Ok(config)
    }

    /// Validate field ranges and the relationships between fields.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] describing the first problem found.
    pub fn check(&self) -> Result<(), ConfigError> {
        self.validate()?;

        let w = &self.weighting;
        if w.country_penalty < w.city_penalty {
            return Err(invalid(
                "weighting.country_penalty must not be harsher than weighting.city_penalty",
            ));
        }

        let d = &self.diversity;
        if d.relaxed_max_per_continent < d.max_per_continent {
            return Err(invalid(
                "diversity.relaxed_max_per_continent must be at least max_per_continent",
            ));
        }
        if d.relaxed_max_per_country < d.max_per_country {
            return Err(invalid(
                "diversity.relaxed_max_per_country must be at least max_per_country",
            ));
        }

        for tier in Difficulty::ALL {
            let rule = self.eligibility.rule(tier);
            if rule.max_population.is_some_and(|max| max < rule.min_population) {
                return Err(invalid(&format!(
                    "eligibility.{tier}: max_population is below min_population"
                )));
            }
            if let (Some(min), Some(max)) = (rule.min_rank, rule.max_rank) {
                if max < min {
                    return Err(invalid(&format!(
                        "eligibility.{tier}: max_rank is below min_rank"
                    )));
                }
            }
        }
        Ok(())
    }
}

fn invalid(reason: &str) -> ConfigError {
    ConfigError::Invalid {
        reason: reason.to_owned(),
    }
}

// ---------------------------------------------------------------------------
// Catalog
// ---------------------------------------------------------------------------

/// Catalog location.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CatalogConfig {
    /// Directory holding `beginner_cities.json` and its siblings.
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
        }
    }
}

impl CatalogConfig {
    /// Replace `data_dir` when an override is present and non-empty.
    pub fn apply_data_dir_override(&mut self, value: Option<String>) {
        if let Some(dir) = value.filter(|v| !v.trim().is_empty()) {
            self.data_dir = PathBuf::from(dir);
        }
    }
}

// ---------------------------------------------------------------------------
// History
// ---------------------------------------------------------------------------

/// Recent-selection window.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct HistoryConfig {
    /// Number of past selections remembered. Zero disables the penalty.
    #[serde(default = "default_history_capacity")]
    pub capacity: usize,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            capacity: default_history_capacity(),
        }
    }
}

// ---------------------------------------------------------------------------
// Weighting
// ---------------------------------------------------------------------------

/// Base weights and the multipliers applied on top of them.
#[derive(Debug, Clone, PartialEq, Deserialize, Validate)]
pub struct WeightingConfig {
    /// Multiplier for a city used in a remembered selection.
    #[serde(default = "default_city_penalty")]
    #[validate(range(exclusive_min = 0.0, max = 1.0))]
    pub city_penalty: f64,

    /// Multiplier for a city whose country was used in a remembered selection.
    #[serde(default = "default_country_penalty")]
    #[validate(range(exclusive_min = 0.0, max = 1.0))]
    pub country_penalty: f64,

    /// Lowest weight any eligible city can end up with.
    #[serde(default = "default_weight_floor")]
    #[validate(range(exclusive_min = 0.0, max = 1.0))]
    pub weight_floor: f64,

    /// Multiplier for cities matching the request's region hint.
    #[serde(default = "default_region_hint_boost")]
    #[validate(range(min = 1.0, max = 100.0))]
    pub region_hint_boost: f64,
}

impl Default for WeightingConfig {
    fn default() -> Self {
        Self {
            city_penalty: default_city_penalty(),
            country_penalty: default_country_penalty(),
            weight_floor: default_weight_floor(),
            region_hint_boost: default_region_hint_boost(),
        }
    }
}

// ---------------------------------------------------------------------------
// Diversity
// ---------------------------------------------------------------------------

/// Caps on repeated continents and countries within one result.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Validate)]
pub struct DiversityConfig {
    /// Most cities one continent may contribute.
    #[serde(default = "default_max_per_continent")]
    #[validate(range(min = 1))]
    pub max_per_continent: usize,

    /// Most cities one country may contribute.
    #[serde(default = "default_max_per_country")]
    #[validate(range(min = 1))]
    pub max_per_country: usize,

    /// Continent cap once the continent constraint is relaxed.
    ///
    /// Relaxing raises the cap rather than lifting it, so a pool that is
    /// mostly one continent can still end in `InsufficientDiversity`.
    #[serde(default = "default_relaxed_max_per_continent")]
    pub relaxed_max_per_continent: usize,

    /// Country cap once the country constraint is relaxed.
    #[serde(default = "default_relaxed_max_per_country")]
    pub relaxed_max_per_country: usize,
}

impl Default for DiversityConfig {
    fn default() -> Self {
        Self {
            max_per_continent: default_max_per_continent(),
            max_per_country: default_max_per_country(),
            relaxed_max_per_continent: default_relaxed_max_per_continent(),
            relaxed_max_per_country: default_relaxed_max_per_country(),
        }
    }
}

// ---------------------------------------------------------------------------
// Eligibility
// ---------------------------------------------------------------------------

/// Whether a tier wants prominent cities or excludes them.
///
/// A city is prominent when it is a capital or in the top slice of its
/// tier by population. Beginner additionally counts low country ranks
/// (see [`EligibilityConfig::prominent_rank`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Prominence {
    /// Only prominent cities are eligible.
    Required,
    /// Prominent cities are never eligible.
    Excluded,
}

/// Population and rank window for one tier.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Validate)]
pub struct TierRule {
    /// Smallest eligible population (inclusive).
    #[serde(default)]
    pub min_population: u32,

    /// Largest eligible population (inclusive), if capped.
    #[serde(default)]
    pub max_population: Option<u32>,

    /// Lowest eligible country rank (inclusive), if bounded.
    #[serde(default)]
    #[validate(range(min = 1))]
    pub min_rank: Option<u32>,

    /// Highest eligible country rank (inclusive), if bounded.
    #[serde(default)]
    #[validate(range(min = 1))]
    pub max_rank: Option<u32>,

    /// Whether the tier wants or rejects prominent cities.
    pub prominence: Prominence,
}

/// Classification rules for all three tiers.
#[derive(Debug, Clone, PartialEq, Deserialize, Validate)]
pub struct EligibilityConfig {
    /// Fraction of a tier, by population, that counts as its top cities.
    #[serde(default = "default_top_fraction")]
    #[validate(range(min = 0.0, max = 1.0))]
    pub top_fraction: f64,

    /// Country rank at or below which a beginner city counts as prominent.
    #[serde(default = "default_prominent_rank")]
    #[validate(range(min = 1))]
    pub prominent_rank: u32,

    /// Beginner tier window.
    #[serde(default = "default_beginner_rule")]
    #[validate(nested)]
    pub beginner: TierRule,

    /// Intermediate tier window.
    #[serde(default = "default_intermediate_rule")]
    #[validate(nested)]
    pub intermediate: TierRule,

    /// Advanced tier window.
    #[serde(default = "default_advanced_rule")]
    #[validate(nested)]
    pub advanced: TierRule,
}

impl EligibilityConfig {
    /// The rule governing `tier`.
    pub const fn rule(&self, tier: Difficulty) -> &TierRule {
        match tier {
            Difficulty::Beginner => &self.beginner,
            Difficulty::Intermediate => &self.intermediate,
            Difficulty::Advanced => &self.advanced,
        }
    }
}

impl Default for EligibilityConfig {
    fn default() -> Self {
        Self {
            top_fraction: default_top_fraction(),
            prominent_rank: default_prominent_rank(),
            beginner: default_beginner_rule(),
            intermediate: default_intermediate_rule(),
            advanced: default_advanced_rule(),
        }
    }
}

// ---------------------------------------------------------------------------
// Defaults
// ---------------------------------------------------------------------------

fn default_data_dir() -> PathBuf {
    PathBuf::from("data")
}

const fn default_history_capacity() -> usize {
    4
}

const fn default_city_penalty() -> f64 {
    0.15
}

const fn default_country_penalty() -> f64 {
    0.5
}

const fn default_weight_floor() -> f64 {
    0.001
}

const fn default_region_hint_boost() -> f64 {
    3.0
}

const fn default_max_per_continent() -> usize {
    2
}

const fn default_max_per_country() -> usize {
    1
}

const fn default_relaxed_max_per_continent() -> usize {
    3
}

const fn default_relaxed_max_per_country() -> usize {
    2
}

const fn default_top_fraction() -> f64 {
    0.10
}

const fn default_prominent_rank() -> u32 {
    2
}

const fn default_beginner_rule() -> TierRule {
    TierRule {
        min_population: 700_000,
        max_population: None,
        min_rank: None,
        max_rank: None,
        prominence: Prominence::Required,
    }
}

const fn default_intermediate_rule() -> TierRule {
    TierRule {
        min_population: 500_000,
        max_population: Some(5_000_000),
        min_rank: Some(3),
        max_rank: Some(10),
        prominence: Prominence::Excluded,
    }
}

const fn default_advanced_rule() -> TierRule {
    TierRule {
        min_population: 100_000,
        max_population: Some(2_500_000),
        min_rank: Some(11),
        max_rank: Some(30),
        prominence: Prominence::Excluded,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = SelectionConfig::default();
        assert!(config.check().is_ok());
        assert_eq!(config.history.capacity, 4);
        assert_eq!(config.diversity.max_per_continent, 2);
        assert_eq!(config.diversity.max_per_country, 1);
        assert_eq!(config.eligibility.beginner.min_population, 700_000);
        assert_eq!(config.eligibility.advanced.min_rank, Some(11));
    }

    #[test]
    fn empty_yaml_uses_defaults() {
        let config = SelectionConfig::parse("{}").unwrap();
        let defaults = SelectionConfig::default();
        assert_eq!(config.weighting, defaults.weighting);
        assert_eq!(config.diversity, defaults.diversity);
        assert_eq!(config.eligibility, defaults.eligibility);
    }

    #[test]
    fn parse_partial_yaml() {
        let yaml = r"
history:
  capacity: 2
weighting:
  city_penalty: 0.05
diversity:
  max_per_continent: 1
  relaxed_max_per_continent: 2
eligibility:
  advanced:
    min_population: 50000
    max_population: 1000000
    min_rank: 5
    max_rank: 40
    prominence: excluded
";
        let config = SelectionConfig::parse(yaml).unwrap();
        assert_eq!(config.history.capacity, 2);
        assert_eq!(config.weighting.city_penalty, 0.05);
        assert_eq!(config.weighting.country_penalty, 0.5);
        assert_eq!(config.diversity.max_per_continent, 1);
        assert_eq!(config.eligibility.advanced.min_population, 50_000);
        assert_eq!(config.eligibility.advanced.max_rank, Some(40));
        assert_eq!(
            config.eligibility.beginner.prominence,
            Prominence::Required
        );
    }

    #[test]
    fn out_of_range_penalty_is_invalid() {
        let result = SelectionConfig::parse("weighting:\n  city_penalty: 1.5\n");
        assert!(matches!(result, Err(ConfigError::Invalid { .. })));

        let zero = SelectionConfig::parse("weighting:\n  weight_floor: 0.0\n");
        assert!(matches!(zero, Err(ConfigError::Invalid { .. })));
    }

    #[test]
    fn country_penalty_harsher_than_city_is_invalid() {
        let yaml = "weighting:\n  city_penalty: 0.6\n  country_penalty: 0.3\n";
        assert!(matches!(
            SelectionConfig::parse(yaml),
            Err(ConfigError::Invalid { .. })
        ));
    }

    #[test]
    fn relaxed_caps_below_strict_caps_are_invalid() {
        let yaml = "diversity:\n  max_per_country: 2\n  relaxed_max_per_country: 1\n";
        assert!(matches!(
            SelectionConfig::parse(yaml),
            Err(ConfigError::Invalid { .. })
        ));
    }

    #[test]
    fn inverted_population_window_is_invalid() {
        let yaml = r"
eligibility:
  intermediate:
    min_population: 600000
    max_population: 500000
    prominence: excluded
";
        assert!(matches!(
            SelectionConfig::parse(yaml),
            Err(ConfigError::Invalid { .. })
        ));
    }

    #[test]
    fn malformed_yaml_is_a_yaml_error() {
        let result = SelectionConfig::parse("history: [unclosed");
        assert!(matches!(result, Err(ConfigError::Yaml { .. })));
    }

    #[test]
    fn data_dir_override_ignores_blank_values() {
        let mut catalog = CatalogConfig::default();
        catalog.apply_data_dir_override(Some(String::from("  ")));
        assert_eq!(catalog.data_dir, PathBuf::from("data"));
        catalog.apply_data_dir_override(None);
        assert_eq!(catalog.data_dir, PathBuf::from("data"));
        catalog.apply_data_dir_override(Some(String::from("/srv/cities")));
        assert_eq!(catalog.data_dir, PathBuf::from("/srv/cities"));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let result = SelectionConfig::from_file(Path::new("/nonexistent/cityguess-config.yaml"));
        assert!(matches!(result, Err(ConfigError::Io { .. })));
    }
}
