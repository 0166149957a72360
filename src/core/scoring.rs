/// Invocation of the opaque solubility model
///
/// The model is an injectable capability: anything that maps a batch of
/// encoded vectors to a raw score tensor. The adapter passes the whole batch
/// in one call and checks that the result lines up with the input.
use crate::core::encoder::EncodedBatch;
use crate::SolubenchError;
use anyhow::Result;
use tracing::{debug, info};

/// Raw model output: tensor shape plus row-major values
#[derive(Debug, Clone, PartialEq)]
pub struct RawScores {
    pub shape: Vec<usize>,
    pub values: Vec<f32>,
}

impl RawScores {
    pub fn new(shape: Vec<usize>, values: Vec<f32>) -> Self {
        Self { shape, values }
    }

    /// One score per record, shape `[N]`
    pub fn scalar(values: Vec<f32>) -> Self {
        Self::new(vec![values.len()], values)
    }

    /// One row of class scores per record, shape `[N, C]`
    pub fn from_rows(rows: Vec<Vec<f32>>) -> Self {
        let columns = rows.first().map(|r| r.len()).unwrap_or(0);
        let shape = vec![rows.len(), columns];
        Self::new(shape, rows.into_iter().flatten().collect())
    }

    pub fn rows(&self) -> usize {
        self.shape.first().copied().unwrap_or(0)
    }

    /// Columns per row; 1 for a rank-1 tensor
    pub fn columns(&self) -> usize {
        match self.shape.as_slice() {
            [_] => 1,
            [_, c] => *c,
            _ => 0,
        }
    }

    pub fn row(&self, index: usize) -> &[f32] {
        let cols = self.columns();
        &self.values[index * cols..(index + 1) * cols]
    }
}

/// A trained solubility classifier
pub trait SolubilityModel {
    /// Model name for logging
    fn name(&self) -> &str;

    /// Score a full batch. Results must be in input order.
    fn predict(&self, batch: &EncodedBatch) -> Result<RawScores>;
}

impl<M: SolubilityModel + ?Sized> SolubilityModel for Box<M> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn predict(&self, batch: &EncodedBatch) -> Result<RawScores> {
        (**self).predict(batch)
    }
}

pub struct ScoringAdapter<M> {
    model: M,
}

impl<M: SolubilityModel> ScoringAdapter<M> {
    pub fn new(model: M) -> Self {
        Self { model }
    }

    pub fn model(&self) -> &M {
        &self.model
    }

    /// Score the batch in a single call. No retries; any failure aborts the run.
    pub fn score(&self, batch: &EncodedBatch) -> Result<RawScores, SolubenchError> {
        info!("Scoring {} sequences with {}", batch.len(), self.model.name());

        let raw = self
            .model
            .predict(batch)
            .map_err(|e| {
                SolubenchError::Scoring(format!("{} failed: {:#}", self.model.name(), e))
            })?;

        validate_shape(&raw, batch.len())?;
        debug!("Model returned shape {:?}", raw.shape);
        Ok(raw)
    }
}

/// Check rank, row count and that the values fill the shape
pub(crate) fn validate_shape(raw: &RawScores, expected_rows: usize) -> Result<(), SolubenchError> {
    if raw.shape.is_empty() || raw.shape.len() > 2 {
        return Err(SolubenchError::Scoring(format!(
            "unsupported output rank {} (shape {:?}); expected [N] or [N, C]",
            raw.shape.len(),
            raw.shape
        )));
    }

    if raw.rows() != expected_rows {
        return Err(SolubenchError::Scoring(format!(
            "model returned {} rows for {} sequences",
            raw.rows(),
            expected_rows
        )));
    }

    if raw.columns() == 0 {
        return Err(SolubenchError::Scoring(format!(
            "model output has no columns (shape {:?})",
            raw.shape
        )));
    }

    let expected_values: usize = raw.shape.iter().product();
    if raw.values.len() != expected_values {
        return Err(SolubenchError::Scoring(format!(
            "shape {:?} implies {} values but model returned {}",
            raw.shape,
            expected_values,
            raw.values.len()
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bio::SequenceRecord;
    use crate::core::config::EncodingConfig;
    use crate::core::encoder::Encoder;

    struct FixedModel(RawScores);

    impl SolubilityModel for FixedModel {
        fn name(&self) -> &str {
            "fixed"
        }

        fn predict(&self, _batch: &EncodedBatch) -> Result<RawScores> {
            Ok(self.0.clone())
        }
    }

    struct BrokenModel;

    impl SolubilityModel for BrokenModel {
        fn name(&self) -> &str {
            "broken"
        }

        fn predict(&self, _batch: &EncodedBatch) -> Result<RawScores> {
            anyhow::bail!("incompatible input width")
        }
    }

    fn batch(n: usize) -> EncodedBatch {
        let encoder = Encoder::from_config(&EncodingConfig {
            pad_length: 4,
            ..EncodingConfig::default()
        })
        .unwrap();
        let records: Vec<SequenceRecord> = (0..n)
            .map(|i| SequenceRecord::named(&format!("s{}", i), "MKT"))
            .collect();
        encoder.encode(&records)
    }

    #[test]
    fn test_raw_scores_rows() {
        let raw = RawScores::from_rows(vec![vec![0.1, 0.9], vec![0.7, 0.3]]);
        assert_eq!(raw.shape, vec![2, 2]);
        assert_eq!(raw.row(1), &[0.7, 0.3]);

        let scalar = RawScores::scalar(vec![0.2, 0.4]);
        assert_eq!(scalar.columns(), 1);
        assert_eq!(scalar.row(1), &[0.4]);
    }

    #[test]
    fn test_valid_shapes_pass_through() {
        let test_cases = vec![
            RawScores::scalar(vec![0.8, 0.1]),
            RawScores::new(vec![2, 1], vec![0.8, 0.1]),
            RawScores::from_rows(vec![vec![0.3, 0.7], vec![0.6, 0.4]]),
            RawScores::from_rows(vec![vec![0.1, 0.2, 0.7], vec![0.5, 0.2, 0.3]]),
        ];

        for raw in test_cases {
            let adapter = ScoringAdapter::new(FixedModel(raw.clone()));
            assert_eq!(adapter.score(&batch(2)).unwrap(), raw);
        }
    }

    #[test]
    fn test_invalid_shapes_are_scoring_errors() {
        let test_cases = vec![
            RawScores::scalar(vec![0.8]),
            RawScores::new(vec![], vec![]),
            RawScores::new(vec![2, 2, 1], vec![0.1; 4]),
            RawScores::new(vec![2, 0], vec![]),
            RawScores::new(vec![2, 2], vec![0.1, 0.2, 0.3]),
        ];

        for raw in test_cases {
            let adapter = ScoringAdapter::new(FixedModel(raw.clone()));
            let result = adapter.score(&batch(2));
            assert!(matches!(result, Err(SolubenchError::Scoring(_))), "shape {:?}", raw.shape);
        }
    }

    #[test]
    fn test_model_failure_propagates() {
        let adapter = ScoringAdapter::new(BrokenModel);
        match adapter.score(&batch(1)) {
            Err(SolubenchError::Scoring(msg)) => assert!(msg.contains("incompatible input width")),
            other => panic!("Expected Scoring error, got {:?}", other),
        }
    }
}
