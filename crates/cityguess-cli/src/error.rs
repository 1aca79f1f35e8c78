//! Error types for the `cityguess` binary.
//!
//! [`CliError`] wraps every failure a command can hit so that each step
//! propagates with `?`; `main` adds context through `anyhow`.
//! Selection failures pass through untouched so their kind can be reported.

use std::path::PathBuf;

/// Top-level error for the `cityguess` binary.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// Configuration loading failed.
    #[error("config error: {source}")]
    Config {
        /// The underlying config error.
        #[from]
        source: cityguess_selection::ConfigError,
    },

    /// No tier document yielded a single city.
    #[error("no cities could be loaded from {}", data_dir.display())]
    EmptyCatalog {
        /// Directory that was searched.
        data_dir: PathBuf,
    },

    /// `lookup` found nothing by that name.
    #[error("no city named {name:?} in the catalog")]
    UnknownCity {
        /// The name that was looked up.
        name: String,
    },

    /// Writing JSON output failed.
    #[error("output error: {source}")]
    Output {
        /// The underlying serialization error.
        #[from]
        source: serde_json::Error,
    },
}
