/// CSV rendering of prediction tables
///
/// Tables are rendered fully in memory before anything touches the target,
/// so a failed run never leaves a partial file behind.
use crate::core::benchmark::BenchmarkRow;
use crate::core::normalizer::{CanonicalPrediction, Score, SolubilityLabel};
use crate::report::OutputSchema;
use crate::SolubenchError;
use std::io::Write;
use std::path::Path;
use tracing::info;

/// Format a probability the way pandas writes floats: integral values keep a
/// trailing `.0`
fn format_float(value: f64) -> String {
    if value.fract() == 0.0 && value.is_finite() {
        format!("{:.1}", value)
    } else {
        value.to_string()
    }
}

fn format_score(score: &Score) -> String {
    match score {
        Score::Probability(p) => format_float(*p),
        Score::Class(c) => c.to_string(),
    }
}

fn require_probability(
    prediction: &CanonicalPrediction,
    schema: OutputSchema,
) -> Result<f64, SolubenchError> {
    prediction.soluble_probability().ok_or_else(|| {
        SolubenchError::Output(format!(
            "the {} schema needs a soluble probability but {} has a class index \
             from a multi-class model; use --schema minimal",
            schema, prediction.identifier
        ))
    })
}

fn finish(writer: csv::Writer<Vec<u8>>) -> Result<Vec<u8>, SolubenchError> {
    writer.into_inner().map_err(|e| SolubenchError::Io(e.into_error()))
}

/// Render predictions in the given schema
pub fn render_predictions(
    predictions: &[CanonicalPrediction],
    schema: OutputSchema,
) -> Result<Vec<u8>, SolubenchError> {
    if schema == OutputSchema::Benchmark {
        let rows = predictions
            .iter()
            .map(|p| {
                let score = require_probability(p, schema)?;
                Ok(BenchmarkRow::new(&p.identifier, &p.sequence, &p.predictor, score))
            })
            .collect::<Result<Vec<_>, SolubenchError>>()?;
        return render_benchmark(&rows);
    }

    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(schema.columns())?;

    for prediction in predictions {
        match schema {
            OutputSchema::Minimal => {
                let score = format_score(&prediction.score);
                writer.write_record([prediction.sequence.as_str(), score.as_str()])?;
            }
            OutputSchema::Normalized => {
                let soluble = require_probability(prediction, schema)?;
                let label = SolubilityLabel::from_probability(soluble);
                let solubility = format_float(soluble);
                writer.write_record([
                    prediction.identifier.as_str(),
                    prediction.sequence.as_str(),
                    solubility.as_str(),
                    label.as_str(),
                ])?;
            }
            OutputSchema::Benchmark => unreachable!("handled above"),
        }
    }

    finish(writer)
}

/// Render the unified benchmark table
pub fn render_benchmark(rows: &[BenchmarkRow]) -> Result<Vec<u8>, SolubenchError> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(OutputSchema::Benchmark.columns())?;

    for row in rows {
        writer.write_record(&[
            row.accession.clone(),
            row.sequence.clone(),
            row.predictor.clone(),
            format_float(row.solubility_score),
            format_float(row.probability_soluble),
            format_float(row.probability_insoluble),
        ])?;
    }

    finish(writer)
}

/// Write rendered bytes to `target`, or to `stdout` when absent
fn emit<W: Write>(
    bytes: &[u8],
    target: Option<&Path>,
    stdout: &mut W,
) -> Result<(), SolubenchError> {
    match target {
        Some(path) => {
            std::fs::write(path, bytes)?;
            info!("Predictions written to {}", path.display());
        }
        None => {
            stdout.write_all(bytes)?;
            stdout.flush()?;
        }
    }
    Ok(())
}

pub fn write_predictions(
    predictions: &[CanonicalPrediction],
    schema: OutputSchema,
    target: Option<&Path>,
) -> Result<(), SolubenchError> {
    write_predictions_to(predictions, schema, target, &mut std::io::stdout().lock())
}

/// Like [`write_predictions`], with `stdout` standing in for standard output
pub fn write_predictions_to<W: Write>(
    predictions: &[CanonicalPrediction],
    schema: OutputSchema,
    target: Option<&Path>,
    stdout: &mut W,
) -> Result<(), SolubenchError> {
    let bytes = render_predictions(predictions, schema)?;
    emit(&bytes, target, stdout)
}

pub fn write_benchmark(rows: &[BenchmarkRow], target: Option<&Path>) -> Result<(), SolubenchError> {
    let bytes = render_benchmark(rows)?;
    emit(&bytes, target, &mut std::io::stdout().lock())
}
