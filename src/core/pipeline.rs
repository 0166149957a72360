/// End-to-end prediction: load, encode, score, normalize
use crate::bio::{self, SequenceRecord};
use crate::core::config::Config;
use crate::core::encoder::Encoder;
use crate::core::normalizer::{CanonicalPrediction, ResultNormalizer};
use crate::core::scoring::{ScoringAdapter, SolubilityModel};
use crate::report::{write_predictions, OutputSchema};
use crate::SolubenchError;
use std::path::Path;
use tracing::info;

/// A predictor that can be driven by the benchmark wrapper: it reads an
/// input file and leaves a normalized table (`name, sequence, solubility,
/// prediction`) at `output`.
pub trait InnerPredictor {
    fn predict_to_csv(&self, input: &Path, output: &Path) -> Result<usize, SolubenchError>;
}

pub struct SolubilityPredictor<M> {
    encoder: Encoder,
    adapter: ScoringAdapter<M>,
    normalizer: ResultNormalizer,
}

impl<M: SolubilityModel> SolubilityPredictor<M> {
    pub fn new(encoder: Encoder, model: M, predictor_name: impl Into<String>) -> Self {
        Self {
            encoder,
            adapter: ScoringAdapter::new(model),
            normalizer: ResultNormalizer::new(predictor_name),
        }
    }

    pub fn from_config(config: &Config, model: M) -> Result<Self, SolubenchError> {
        let encoder = Encoder::from_config(&config.encoding)?;
        Ok(Self::new(encoder, model, config.model.predictor_name.clone()))
    }

    pub fn encoder(&self) -> &Encoder {
        &self.encoder
    }

    pub fn model(&self) -> &M {
        self.adapter.model()
    }

    pub fn predictor_name(&self) -> &str {
        self.normalizer.predictor()
    }

    /// Score already-loaded records. One prediction per record, same order.
    pub fn predict_records(
        &self,
        records: &[SequenceRecord],
    ) -> Result<Vec<CanonicalPrediction>, SolubenchError> {
        if records.is_empty() {
            return Err(SolubenchError::EmptyInput("no records to score".to_string()));
        }

        let batch = self.encoder.encode(records);
        let raw = self.adapter.score(&batch)?;
        drop(batch);

        self.normalizer.normalize(records, &raw)
    }

    pub fn predict_file(&self, input: &Path) -> Result<Vec<CanonicalPrediction>, SolubenchError> {
        let records = bio::load(input)?;
        info!("Loaded {} sequences from {}", records.len(), input.display());
        self.predict_records(&records)
    }
}

impl<M: SolubilityModel> InnerPredictor for SolubilityPredictor<M> {
    fn predict_to_csv(&self, input: &Path, output: &Path) -> Result<usize, SolubenchError> {
        let predictions = self.predict_file(input)?;
        write_predictions(&predictions, OutputSchema::Normalized, Some(output))?;
        Ok(predictions.len())
    }
}
