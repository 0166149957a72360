pub mod commands;
pub mod formatter;

use crate::core::config::{default_config, load_config, Config};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing::debug;

#[derive(Parser)]
#[command(
    name = "solubench",
    version,
    about = "Batch protein solubility prediction with benchmark-ready output",
    long_about = "Solubench encodes protein or peptide sequences from FASTA or CSV input into \
                  fixed-width integer vectors, scores them with a pretrained solubility classifier \
                  and writes the predictions as CSV, optionally in a unified benchmarking schema."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Verbosity level (can be repeated)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Configuration file (TOML)
    #[arg(short = 'c', long, global = true, env = "SOLUBENCH_CONFIG", value_name = "FILE")]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Predict solubility for every sequence in a CSV or FASTA file
    Predict(commands::predict::PredictArgs),

    /// Run a prediction and write the unified benchmarking table
    Benchmark(commands::benchmark::BenchmarkArgs),

    /// Show or create configuration files
    Config(commands::config::ConfigArgs),
}

/// Configuration from `path`, or the built-in defaults
pub fn load_effective_config(path: Option<&Path>) -> crate::Result<Config> {
    match path {
        Some(path) => {
            debug!("Loading configuration from {}", path.display());
            load_config(path)
        }
        None => Ok(default_config()),
    }
}
