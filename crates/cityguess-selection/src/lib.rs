//! Seeded, diversity-constrained city selection for cityguess.
//!
//! Given a tier, a count and a seed, the engine filters the tier's catalog
//! down to eligible cities, weights them by population and recent use, and
//! draws a result in which no continent or country dominates. Equal seeds
//! against equal catalog and history always give equal results.
//!
//! # Modules
//!
//! - [`config`] -- Configuration loading from `cityguess-config.yaml` into
//!   strongly-typed structs.
//! - [`draw`] -- The greedy weighted draw and its relaxation ladder.
//! - [`eligibility`] -- Per-tier classification of catalog cities.
//! - [`engine`] -- [`SelectionEngine`], tying the steps together.
//! - [`error`] -- [`SelectionError`].
//! - [`history`] -- The bounded window of recent selections.
//! - [`seed`] -- Seed hashing into a portable generator.
//! - [`weighting`] -- Population weights, penalties and the region boost.

pub mod config;
pub mod draw;
pub mod eligibility;
pub mod engine;
pub mod error;
pub mod history;
pub mod seed;
pub mod weighting;

pub use config::{ConfigError, SelectionConfig};
pub use engine::{Selection, SelectionEngine};
pub use error::SelectionError;
pub use history::{HistoryEntry, SelectionHistory};
