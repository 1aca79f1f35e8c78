//! Error types for the `cityguess-catalog` crate.
//!
//! [`CatalogError`] covers whole-document failures. Individual bad records
//! are not errors; they become [`RecordRejection`]s and the load continues.
//!
//! [`RecordRejection`]: crate::record::RecordRejection

use std::path::PathBuf;

use cityguess_types::Difficulty;

/// Errors that can occur while reading a tier document.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    /// The tier file could not be read from disk.
    #[error("failed to read {path}: {source}")]
    Io {
        /// File that failed to read.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// The tier document is not a JSON object of record arrays.
    #[error("malformed {tier} document: {source}")]
    Json {
        /// Tier whose document failed to parse.
        tier: Difficulty,
        /// The underlying JSON error.
        source: serde_json::Error,
    },
}
