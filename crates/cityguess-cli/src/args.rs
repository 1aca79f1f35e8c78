//! Command-line arguments.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use cityguess_types::{DEFAULT_ROUND_COUNT, Difficulty};

/// Default location of the configuration file.
pub const DEFAULT_CONFIG_PATH: &str = "cityguess-config.yaml";

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    /// Human-readable lines.
    #[default]
    Text,
    /// One JSON object per event.
    Json,
}

/// Draw city sets for cityguess game sessions.
#[derive(Debug, Parser)]
#[command(name = "cityguess", version, about)]
pub struct Cli {
    /// Configuration file; defaults are used when it does not exist
    #[arg(long, global = true, default_value = DEFAULT_CONFIG_PATH)]
    pub config: PathBuf,

    /// Catalog directory, overriding the configuration
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    /// Log format on stderr
    #[arg(long, global = true, value_enum, default_value_t = LogFormat::Text)]
    pub log_format: LogFormat,

    /// What to do
    #[command(subcommand)]
    pub command: Command,
}

/// Subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Select cities for one or more game sessions
    Select {
        /// Tier to draw from (beginner, intermediate, advanced)
        #[arg(long, short)]
        difficulty: Difficulty,
        /// Cities per session
        #[arg(long, short, default_value_t = DEFAULT_ROUND_COUNT)]
        count: usize,
        /// Seed; defaults to the current UTC hour
        #[arg(long, short)]
        seed: Option<String>,
        /// Region, continent or country to favour
        #[arg(long, short)]
        region: Option<String>,
        /// Consecutive sessions to draw against one shared history
        #[arg(long, default_value_t = 1)]
        rounds: usize,
    },
    /// Show catalog counts per tier and per continent
    Stats,
    /// Show a single city by name
    Lookup {
        /// City name, case-insensitive
        name: String,
    },
}
