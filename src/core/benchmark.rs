/// Benchmark wrapper around a predictor
///
/// Runs the inner predictor into a scoped temporary CSV, joins the result
/// back onto the original input by accession and projects it into the
/// unified benchmarking schema.
use crate::bio::{self, SequenceRecord, UNKNOWN_IDENTIFIER};
use crate::core::pipeline::InnerPredictor;
use crate::report::write_benchmark;
use crate::SolubenchError;
use std::collections::HashMap;
use std::path::Path;
use tracing::{debug, info};

const NAME_COLUMNS: [&str; 2] = ["name", "Name"];
const SEQUENCE_COLUMNS: [&str; 4] = ["sequence", "Sequence", "Seq", "seq"];
const SCORE_COLUMN: &str = "solubility";

#[derive(Debug, Clone, PartialEq)]
pub struct BenchmarkRow {
    pub accession: String,
    pub sequence: String,
    pub predictor: String,
    pub solubility_score: f64,
    pub probability_soluble: f64,
    pub probability_insoluble: f64,
}

impl BenchmarkRow {
    pub fn new(accession: &str, sequence: &str, predictor: &str, score: f64) -> Self {
        Self {
            accession: accession.to_string(),
            sequence: sequence.to_string(),
            predictor: predictor.to_string(),
            solubility_score: score,
            probability_soluble: score,
            probability_insoluble: 1.0 - score,
        }
    }
}

pub struct BenchmarkAdapter {
    predictor_name: String,
}

impl BenchmarkAdapter {
    pub fn new(predictor_name: impl Into<String>) -> Self {
        Self {
            predictor_name: predictor_name.into(),
        }
    }

    /// Run `inner` on `input` and write the benchmark table to `output`
    /// (stdout when absent). The intermediate file is removed on every path.
    pub fn run<P: InnerPredictor + ?Sized>(
        &self,
        inner: &P,
        input: &Path,
        output: Option<&Path>,
    ) -> Result<Vec<BenchmarkRow>, SolubenchError> {
        let originals = bio::load(input)?;
        let lookup = sequence_lookup(&originals);

        let intermediate = tempfile::Builder::new()
            .prefix("solubench-")
            .suffix(".csv")
            .tempfile()?
            .into_temp_path();
        debug!("Intermediate predictions at {}", intermediate.display());

        let scored = inner.predict_to_csv(input, &intermediate)?;
        debug!("Inner predictor scored {} sequences", scored);

        let rows = self.standardize(&intermediate, &lookup)?;
        write_benchmark(&rows, output)?;

        info!("{} predictions completed for {} sequences", self.predictor_name, rows.len());
        Ok(rows)
    }

    /// Read a predictor table and remap it to benchmark rows
    pub fn standardize(
        &self,
        table: &Path,
        lookup: &HashMap<String, String>,
    ) -> Result<Vec<BenchmarkRow>, SolubenchError> {
        let mut reader = csv::ReaderBuilder::new().has_headers(true).from_path(table)?;
        let headers = reader.headers()?.clone();

        let find = |candidates: &[&str]| {
            headers.iter().position(|h| candidates.iter().any(|c| *c == h))
        };
        let name_idx = find(&NAME_COLUMNS[..]);
        let seq_idx = find(&SEQUENCE_COLUMNS[..]);
        let score_idx = find(&[SCORE_COLUMN][..]);

        let mut rows = Vec::new();
        for result in reader.records() {
            let record = result?;
            let cell = |idx: Option<usize>| {
                idx.and_then(|i| record.get(i))
                    .map(str::trim)
                    .filter(|v| !v.is_empty())
            };

            let accession = cell(name_idx).unwrap_or(UNKNOWN_IDENTIFIER);
            let sequence = lookup
                .get(accession)
                .map(String::as_str)
                .or_else(|| cell(seq_idx))
                .unwrap_or("");
            let score = match cell(score_idx) {
                Some(value) => value.parse::<f64>().map_err(|_| {
                    SolubenchError::Parse(format!(
                        "invalid {} value {:?} for {}",
                        SCORE_COLUMN, value, accession
                    ))
                })?,
                None => 0.0,
            };

            rows.push(BenchmarkRow::new(accession, sequence, &self.predictor_name, score));
        }

        Ok(rows)
    }
}

/// Identifier to sequence map; later duplicates replace earlier ones
fn sequence_lookup(records: &[SequenceRecord]) -> HashMap<String, String> {
    records
        .iter()
        .filter_map(|r| r.identifier.as_ref().map(|id| (id.clone(), r.sequence.clone())))
        .collect()
}
