use crate::bio::InputFormat;
use crate::cli::commands::resolve_model_path;
use crate::cli::formatter::{print_success, spinner};
use crate::core::benchmark::BenchmarkAdapter;
use crate::core::config::Config;
use crate::core::encoder::Encoder;
use crate::core::pipeline::SolubilityPredictor;
use crate::model::load_model;
use clap::Args;
use std::path::PathBuf;

#[derive(Args, Debug)]
pub struct BenchmarkArgs {
    /// Input FASTA file
    #[arg(long, value_name = "FILE")]
    pub fasta: PathBuf,

    /// Output CSV in the unified benchmarking schema
    #[arg(long, value_name = "FILE")]
    pub out: PathBuf,

    /// Trained model file (overrides [model] path)
    #[arg(short, long, value_name = "FILE")]
    pub model: Option<PathBuf>,
}

pub fn run(args: BenchmarkArgs, config: Config) -> anyhow::Result<()> {
    InputFormat::from_path(&args.fasta)?;
    let encoder = Encoder::from_config(&config.encoding)?;

    let model_path = resolve_model_path(args.model, &config)?;
    let model = load_model(&model_path, &config.model)?;
    let predictor = SolubilityPredictor::new(encoder, model, config.model.predictor_name);
    let name = predictor.predictor_name().to_string();

    let pb = spinner(&format!("Running {} on {}...", name, args.fasta.display()));
    let result = BenchmarkAdapter::new(name.as_str()).run(
        &predictor,
        &args.fasta,
        Some(args.out.as_path()),
    );
    pb.finish_and_clear();
    result?;

    print_success(&format!(
        "{} predictions completed. Results written to {}",
        name,
        args.out.display()
    ));
    Ok(())
}
