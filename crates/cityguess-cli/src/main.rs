//! `cityguess`: command-line driver for the city selection engine.
//!
//! Stands in for the game's API layer: it loads the configuration and the
//! catalog once, builds a [`SelectionEngine`], and prints JSON on stdout.
//! Logs go to stderr so the output stays machine-readable.
//!
//! # Startup Sequence
//!
//! 1. Parse arguments
//! 2. Initialize structured logging (tracing)
//! 3. Load configuration from `cityguess-config.yaml`
//! 4. Load the catalog from the configured data directory
//! 5. Run the subcommand

mod args;
mod error;
mod report;

use std::io::Write;
use std::path::Path;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use cityguess_catalog::load_dir;
use cityguess_selection::config::DATA_DIR_ENV;
use cityguess_selection::{SelectionConfig, SelectionEngine, SelectionError};
use cityguess_types::{SelectionRequest, SelectionSeed};
use serde::Serialize;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::args::{Cli, Command, LogFormat};
use crate::error::CliError;
use crate::report::{LookupReport, RoundReport, StatsReport};

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.log_format);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            let kind = err
                .chain()
                .find_map(|cause| cause.downcast_ref::<SelectionError>())
                .map(SelectionError::kind);
            match kind {
                Some(kind) => eprintln!("error[{kind}]: {err:#}"),
                None => eprintln!("error: {err:#}"),
            }
            ExitCode::FAILURE
        }
    }
}

/// Install the global subscriber. `RUST_LOG` wins over the `info` default.
fn init_tracing(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr);
    match format {
        LogFormat::Text => builder.init(),
        LogFormat::Json => builder.json().init(),
    }
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    let mut config = load_config(&cli.config)
        .with_context(|| format!("loading {}", cli.config.display()))?;
    if let Some(dir) = &cli.data_dir {
        config.catalog.data_dir.clone_from(dir);
    }
    info!(
        data_dir = %config.catalog.data_dir.display(),
        history_capacity = config.history.capacity,
        "Configuration loaded"
    );

    let engine = build_engine(config)?;

    match &cli.command {
        Command::Select {
            difficulty,
            count,
            seed,
            region,
            rounds,
        } => {
            let seed = seed.as_deref().map_or_else(hourly_seed, parse_seed);
            let mut request = SelectionRequest::new(*difficulty, seed).with_count(*count);
            if let Some(region) = region {
                request = request.with_region_hint(region.clone());
            }
            for round in 1..=*rounds {
                let selection = engine
                    .select(&request)
                    .with_context(|| format!("round {round} of {rounds}"))?;
                print_json(&RoundReport::new(round, request.seed.clone(), selection))?;
            }
        }
        Command::Stats => print_json(&StatsReport::new(&engine))?,
        Command::Lookup { name } => {
            let city = engine
                .catalog()
                .find_by_name(name)
                .ok_or_else(|| CliError::UnknownCity { name: name.clone() })?;
            print_json(&LookupReport {
                city: city.view(),
                region: city.region.clone(),
                city_rank: city.city_rank,
            })?;
        }
    }
    Ok(())
}

/// Load configuration from `path`, or defaults when the file is absent.
///
/// `CITYGUESS_DATA_DIR` applies either way.
fn load_config(path: &Path) -> Result<SelectionConfig, CliError> {
    if path.exists() {
        Ok(SelectionConfig::from_file(path)?)
    } else {
        info!("Config file not found, using defaults");
        let mut config = SelectionConfig::default();
        config
            .catalog
            .apply_data_dir_override(std::env::var(DATA_DIR_ENV).ok());
        Ok(config)
    }
}

/// Load the catalog and wrap it in an engine.
fn build_engine(config: SelectionConfig) -> Result<SelectionEngine, CliError> {
    let data_dir = config.catalog.data_dir.clone();
    let (catalog, report) = load_dir(&data_dir);
    if !report.is_clean() {
        warn!(
            rejected_records = report.rejections.len(),
            failed_tiers = report.tier_errors.len(),
            "Catalog loaded with problems"
        );
    }
    if catalog.is_empty() {
        return Err(CliError::EmptyCatalog { data_dir });
    }
    info!(cities = catalog.len(), "Catalog loaded");
    Ok(SelectionEngine::new(Arc::new(catalog), config))
}

/// Seed for the current UTC hour, e.g. `2024-06-01T13`.
///
/// Everyone playing in the same hour gets the same cities.
fn hourly_seed() -> SelectionSeed {
    SelectionSeed::from(chrono::Utc::now().format("%Y-%m-%dT%H").to_string())
}

/// Numeric text becomes a numeric seed; anything else stays text.
///
/// Only canonical decimals count as numbers, so `042` keeps its leading zero.
fn parse_seed(raw: &str) -> SelectionSeed {
    let trimmed = raw.trim();
    match trimmed.parse::<u64>() {
        Ok(n) if n.to_string() == trimmed => SelectionSeed::from(n),
        _ => SelectionSeed::from(raw),
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<(), CliError> {
    let mut stdout = std::io::stdout().lock();
    serde_json::to_writer_pretty(&mut stdout, value)?;
    writeln!(stdout).map_err(serde_json::Error::io)?;
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn seeds_parse_as_numbers_when_they_can() {
        assert_eq!(parse_seed("42"), SelectionSeed::Number(42));
        assert_eq!(parse_seed("round-1"), SelectionSeed::Text(String::from("round-1")));
        assert_eq!(parse_seed("42").canonical(), parse_seed(" 42").canonical());
    }

    #[test]
    fn leading_zeros_keep_the_seed_textual() {
        assert_eq!(parse_seed("042"), SelectionSeed::Text(String::from("042")));
        assert_eq!(
            parse_seed("042").canonical(),
            SelectionSeed::from("042").canonical()
        );
        assert_eq!(parse_seed("+42"), SelectionSeed::Text(String::from("+42")));
    }

    #[test]
    fn hourly_seed_has_hour_precision() {
        let seed = hourly_seed().canonical();
        assert_eq!(seed.len(), "2024-06-01T13".len());
        assert_eq!(seed.chars().nth(10), Some('T'));
    }

    #[test]
    fn missing_config_file_means_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = load_config(&dir.path().join("absent.yaml")).unwrap();
        assert_eq!(config.history.capacity, 4);
    }

    #[test]
    fn config_file_is_read_when_present() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cityguess-config.yaml");
        std::fs::write(&path, "history:\n  capacity: 9\n").unwrap();
        let config = load_config(&path).unwrap();
        assert_eq!(config.history.capacity, 9);
    }

    #[test]
    fn empty_data_dir_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = SelectionConfig::default();
        config.catalog.data_dir = dir.path().to_path_buf();
        assert!(matches!(
            build_engine(config),
            Err(CliError::EmptyCatalog { .. })
        ));
    }

    #[test]
    fn shipped_catalog_builds_an_engine() {
        let mut config = SelectionConfig::default();
        config.catalog.data_dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("../../data");
        let engine = build_engine(config).unwrap();
        assert!(engine.catalog().find_by_name("Nairobi").is_some());
    }
}
