//! Reconciliation of raw model output into canonical predictions.
//!
//! Models in circulation disagree on their output head. Three shapes are
//! supported and kept apart as an [`OutputHead`]:
//!
//! * `[N]` or `[N, 1]`: one soluble probability per record.
//! * `[N, 2]`: class probabilities, column 0 is the soluble class.
//! * `[N, C]` with `C > 2`: generic classifier, reduced by arg-max to a class
//!   index. No probability is derived for this head.
//!
//! The column 0 convention for two-class heads is not checked against the
//! model's label ordering. A model trained with the classes swapped produces
//! inverted probabilities without any error.

use crate::bio::SequenceRecord;
use crate::core::scoring::{validate_shape, RawScores};
use crate::SolubenchError;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

/// Probability at or above which a record is labelled soluble
pub const SOLUBILITY_THRESHOLD: f64 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputHead {
    Scalar,
    TwoClass,
    MultiClass(usize),
}

impl OutputHead {
    pub fn classify(raw: &RawScores) -> Result<Self, SolubenchError> {
        match raw.shape.as_slice() {
            [_] | [_, 1] => Ok(OutputHead::Scalar),
            [_, 2] => Ok(OutputHead::TwoClass),
            [_, c] if *c > 2 => Ok(OutputHead::MultiClass(*c)),
            shape => Err(SolubenchError::Scoring(format!("unsupported output shape {:?}", shape))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SolubilityLabel {
    Soluble,
    Insoluble,
}

impl SolubilityLabel {
    pub fn from_probability(soluble: f64) -> Self {
        if soluble >= SOLUBILITY_THRESHOLD {
            SolubilityLabel::Soluble
        } else {
            SolubilityLabel::Insoluble
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SolubilityLabel::Soluble => "soluble",
            SolubilityLabel::Insoluble => "insoluble",
        }
    }
}

impl fmt::Display for SolubilityLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Score {
    /// Probability of the soluble class, in [0, 1]
    Probability(f64),
    /// Arg-max class index from a multi-class head
    Class(usize),
}

#[derive(Debug, Clone, PartialEq)]
pub struct CanonicalPrediction {
    pub identifier: String,
    pub sequence: String,
    pub predictor: String,
    pub score: Score,
}

impl CanonicalPrediction {
    pub fn soluble_probability(&self) -> Option<f64> {
        match self.score {
            Score::Probability(p) => Some(p),
            Score::Class(_) => None,
        }
    }

    pub fn insoluble_probability(&self) -> Option<f64> {
        self.soluble_probability().map(|p| 1.0 - p)
    }

    pub fn label(&self) -> Option<SolubilityLabel> {
        self.soluble_probability().map(SolubilityLabel::from_probability)
    }

    pub fn class_index(&self) -> Option<usize> {
        match self.score {
            Score::Class(c) => Some(c),
            Score::Probability(_) => None,
        }
    }
}

pub struct ResultNormalizer {
    predictor: String,
}

impl ResultNormalizer {
    pub fn new(predictor: impl Into<String>) -> Self {
        Self {
            predictor: predictor.into(),
        }
    }

    pub fn predictor(&self) -> &str {
        &self.predictor
    }

    /// Pair every record with its score. Output order and length match `records`.
    pub fn normalize(
        &self,
        records: &[SequenceRecord],
        raw: &RawScores,
    ) -> Result<Vec<CanonicalPrediction>, SolubenchError> {
        validate_shape(raw, records.len())?;

        let head = OutputHead::classify(raw)?;
        match head {
            OutputHead::TwoClass => {
                debug!("Two-class output head: treating column 0 as the soluble class")
            }
            OutputHead::MultiClass(c) => {
                debug!("{}-class output head: reporting arg-max class index", c)
            }
            OutputHead::Scalar => debug!("Scalar output head"),
        }

        records
            .iter()
            .enumerate()
            .map(|(i, record)| {
                let score = score_row(head, raw.row(i))
                    .map_err(|msg| {
                        SolubenchError::Scoring(format!(
                            "record {} ({}): {}",
                            i + 1,
                            record.display_id(),
                            msg
                        ))
                    })?;

                Ok(CanonicalPrediction {
                    identifier: record.display_id().to_string(),
                    sequence: record.sequence.clone(),
                    predictor: self.predictor.clone(),
                    score,
                })
            })
            .collect()
    }
}

fn score_row(head: OutputHead, row: &[f32]) -> Result<Score, String> {
    match head {
        OutputHead::Scalar | OutputHead::TwoClass => {
            let p = widen(row[0]);
            if !p.is_finite() || !(0.0..=1.0).contains(&p) {
                return Err(format!("soluble probability {} is outside [0, 1]", p));
            }
            Ok(Score::Probability(p))
        }
        OutputHead::MultiClass(_) => argmax(row).map(Score::Class),
    }
}

/// f32 to f64 through the shortest decimal form, so 0.8f32 reports as 0.8
fn widen(value: f32) -> f64 {
    value.to_string().parse().unwrap_or(value as f64)
}

/// Index of the largest value; the first one wins ties
fn argmax(row: &[f32]) -> Result<usize, String> {
    if row.iter().any(|v| v.is_nan()) {
        return Err("class scores contain NaN".to_string());
    }

    let mut best = 0;
    for (i, &v) in row.iter().enumerate().skip(1) {
        if v > row[best] {
            best = i;
        }
    }
    Ok(best)
}
