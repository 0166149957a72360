pub mod bio;
pub mod cli;
pub mod core;
pub mod model;
pub mod report;

pub use crate::core::{
    benchmark::BenchmarkAdapter,
    encoder::{AlphabetMap, EncodedBatch, Encoder},
    normalizer::{CanonicalPrediction, OutputHead, ResultNormalizer, Score, SolubilityLabel},
    pipeline::{InnerPredictor, SolubilityPredictor},
    scoring::{RawScores, ScoringAdapter, SolubilityModel},
};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SolubenchError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Unsupported input format: {0} (expected .csv, .fa, .fasta, .faa or gzipped FASTA)")]
    UnsupportedFormat(String),

    #[error("Schema error: {0}")]
    Schema(String),

    #[error("No sequences found in input: {0}")]
    EmptyInput(String),

    #[error("Scoring error: {0}")]
    Scoring(String),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Output error: {0}")]
    Output(String),
}

pub type Result<T> = std::result::Result<T, SolubenchError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let test_cases = vec![
            (SolubenchError::Schema("missing Seq".to_string()), "Schema error: missing Seq"),
            (
                SolubenchError::EmptyInput("a.fasta".to_string()),
                "No sequences found in input: a.fasta",
            ),
            (SolubenchError::Scoring("bad shape".to_string()), "Scoring error: bad shape"),
            (SolubenchError::Config("pad_length".to_string()), "Invalid configuration: pad_length"),
        ];

        for (error, expected) in test_cases {
            assert_eq!(error.to_string(), expected);
        }
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err: SolubenchError = io_err.into();
        assert!(matches!(err, SolubenchError::Io(_)));
    }
}
