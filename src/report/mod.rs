pub mod table;

pub use table::{
    render_benchmark, render_predictions, write_benchmark, write_predictions, write_predictions_to,
};

use serde::{Deserialize, Serialize};
use std::fmt;

/// Column layout of the prediction CSV
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputSchema {
    /// `Seq, PredictedSolubility`
    Minimal,
    /// `name, sequence, solubility, prediction`
    Normalized,
    /// `Accession, Sequence, Predictor, SolubilityScore, Probability_Soluble,
    /// Probability_Insoluble`
    Benchmark,
}

impl OutputSchema {
    pub fn columns(&self) -> &'static [&'static str] {
        match self {
            OutputSchema::Minimal => &["Seq", "PredictedSolubility"],
            OutputSchema::Normalized => &["name", "sequence", "solubility", "prediction"],
            OutputSchema::Benchmark => &[
                "Accession",
                "Sequence",
                "Predictor",
                "SolubilityScore",
                "Probability_Soluble",
                "Probability_Insoluble",
            ],
        }
    }
}

impl fmt::Display for OutputSchema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            OutputSchema::Minimal => "minimal",
            OutputSchema::Normalized => "normalized",
            OutputSchema::Benchmark => "benchmark",
        };
        f.write_str(name)
    }
}
