//! City catalog for the cityguess selection engine.
//!
//! This crate turns authored tier documents into an immutable [`Catalog`]:
//! records are deserialized, validated, and filed under the tier they were
//! authored for. Invalid records are dropped one at a time rather than
//! failing the load.
//!
//! # Modules
//!
//! - [`catalog`] -- The per-tier [`Catalog`] and its statistics and lookups.
//! - [`error`] -- Error types for document-level failures.
//! - [`loader`] -- Reading tier documents from a data directory.
//! - [`record`] -- Raw [`CityRecord`]s and their validation rules.

pub mod catalog;
pub mod error;
pub mod loader;
pub mod record;

// Re-export primary types at crate root.
pub use catalog::{Catalog, continent_counts};
pub use error::CatalogError;
pub use loader::{LoadReport, TierLoad, load_dir, load_tier_file, parse_tier_document, tier_file_name};
pub use record::{CityRecord, RecordRejection};
