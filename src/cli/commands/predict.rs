use crate::bio;
use crate::cli::commands::resolve_model_path;
use crate::cli::formatter::{print_success, print_warning, spinner};
use crate::bio::SequenceRecord;
use crate::core::config::{Config, ModelConfig};
use crate::core::encoder::Encoder;
use crate::core::normalizer::{CanonicalPrediction, Score, SolubilityLabel};
use crate::core::pipeline::SolubilityPredictor;
use crate::core::scoring::SolubilityModel;
use crate::model::load_model;
use crate::report::{write_predictions_to, OutputSchema};
use crate::SolubenchError;
use clap::Args;
use std::collections::BTreeMap;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Args, Debug)]
pub struct PredictArgs {
    /// Input CSV (header column "Seq") or FASTA file
    #[arg(short, long, value_name = "FILE")]
    pub input: PathBuf,

    /// Output CSV for predictions (default: stdout)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Trained model file (overrides [model] path)
    #[arg(short, long, value_name = "FILE")]
    pub model: Option<PathBuf>,

    /// Output column layout (overrides [output] schema)
    #[arg(long, value_enum)]
    pub schema: Option<OutputSchema>,

    /// Encoded vector width; must match the model (overrides [encoding] pad_length)
    #[arg(long, value_name = "N")]
    pub pad_length: Option<usize>,
}

#[derive(Debug, Default, PartialEq)]
struct PredictionSummary {
    soluble: usize,
    insoluble: usize,
    classes: BTreeMap<usize, usize>,
}

fn summarize(predictions: &[CanonicalPrediction]) -> PredictionSummary {
    let mut summary = PredictionSummary::default();
    for prediction in predictions {
        match prediction.score {
            Score::Class(c) => *summary.classes.entry(c).or_insert(0) += 1,
            Score::Probability(_) => match prediction.label() {
                Some(SolubilityLabel::Soluble) => summary.soluble += 1,
                _ => summary.insoluble += 1,
            },
        }
    }
    summary
}

fn count_truncated(records: &[SequenceRecord], pad_length: usize) -> usize {
    records.iter().filter(|r| r.len() > pad_length).count()
}

pub fn run(args: PredictArgs, config: Config) -> anyhow::Result<()> {
    let stdout = std::io::stdout();
    run_with(args, config, load_model, &mut stdout.lock())
}

/// Run `predict` with the model built by `load` and CSV without `--output`
/// written to `stdout`
pub fn run_with<M, L, W>(
    args: PredictArgs,
    mut config: Config,
    load: L,
    stdout: &mut W,
) -> anyhow::Result<()>
where
    M: SolubilityModel,
    L: FnOnce(&Path, &ModelConfig) -> Result<M, SolubenchError>,
    W: Write,
{
    if let Some(pad_length) = args.pad_length {
        config.encoding.pad_length = pad_length;
    }
    let schema = args.schema.unwrap_or(config.output.schema);

    // Configuration and input problems are reported before the model is touched
    let encoder = Encoder::from_config(&config.encoding)?;
    let records = bio::load(&args.input)?;
    info!("Loaded {} sequences from {}", records.len(), args.input.display());

    let truncated = count_truncated(&records, encoder.pad_length());
    if truncated > 0 {
        print_warning(&format!(
            "{} sequences are longer than {} residues and will be truncated",
            truncated,
            encoder.pad_length()
        ));
    }

    let model_path = resolve_model_path(args.model, &config)?;
    let model = load(&model_path, &config.model)?;
    let predictor = SolubilityPredictor::new(encoder, model, config.model.predictor_name.clone());

    let pb = spinner(&format!("Scoring {} sequences...", records.len()));
    let result = predictor.predict_records(&records);
    pb.finish_and_clear();
    let predictions = result?;

    let summary = summarize(&predictions);
    if summary.classes.is_empty() {
        info!("{} soluble, {} insoluble", summary.soluble, summary.insoluble);
    } else {
        info!("Predicted class counts: {:?}", summary.classes);
    }

    write_predictions_to(&predictions, schema, args.output.as_deref(), stdout)?;

    if let Some(output) = &args.output {
        print_success(&format!("Predictions written to {}", output.display()));
    }
    Ok(())
}
