use clap::Parser;
use colored::*;
use solubench::cli::{load_effective_config, Cli, Commands};
use solubench::SolubenchError;
use std::process;
use tracing_subscriber::EnvFilter;

fn main() {
    let cli = Cli::parse();

    // SOLUBENCH_LOG takes precedence over -v
    let default_level = match cli.verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_env("SOLUBENCH_LOG")
        .unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run(cli) {
        eprintln!("{} {:#}", "Error:".red().bold(), e);

        let exit_code = match e.downcast_ref::<SolubenchError>() {
            Some(SolubenchError::Config(_)) => 2,
            Some(SolubenchError::Io(_)) => 3,
            Some(SolubenchError::UnsupportedFormat(_))
            | Some(SolubenchError::Schema(_))
            | Some(SolubenchError::EmptyInput(_))
            | Some(SolubenchError::Parse(_))
            | Some(SolubenchError::Csv(_)) => 4,
            Some(SolubenchError::Scoring(_)) => 5,
            _ => 1,
        };
        process::exit(exit_code);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let config = load_effective_config(cli.config.as_deref())?;

    match cli.command {
        Commands::Predict(args) => solubench::cli::commands::predict::run(args, config),
        Commands::Benchmark(args) => solubench::cli::commands::benchmark::run(args, config),
        Commands::Config(args) => solubench::cli::commands::config::run(args, config),
    }
}
