//! ONNX Runtime backed solubility model.
//!
//! Expects a single `int64` input of shape `[batch, pad_length]` and reads
//! the first output as `f32`, either `[batch]`, `[batch, 1]` or
//! `[batch, classes]`.

use crate::core::encoder::EncodedBatch;
use crate::core::scoring::{RawScores, SolubilityModel};
use anyhow::{anyhow, Result};
use ndarray::Array2;
use ort::session::{builder::GraphOptimizationLevel, Session};
use std::path::Path;
use tracing::debug;

pub struct OnnxModel {
    session: Session,
    input_name: String,
    name: String,
}

impl OnnxModel {
    pub fn load(path: &Path, input_name: &str) -> Result<Self> {
        let session = Session::builder()?
            .with_optimization_level(GraphOptimizationLevel::Level1)?
            .with_intra_threads(1)?
            .commit_from_file(path)?;

        for input in &session.inputs {
            debug!("Model input {}: {:?}", input.name, input.input_type);
        }

        let name = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("onnx-model")
            .to_string();

        Ok(Self {
            session,
            input_name: input_name.to_string(),
            name,
        })
    }
}

impl SolubilityModel for OnnxModel {
    fn name(&self) -> &str {
        &self.name
    }

    fn predict(&self, batch: &EncodedBatch) -> Result<RawScores> {
        let shape = (batch.len(), batch.width());
        let input: Array2<i64> =
            Array2::from_shape_vec(shape, batch.flatten().into_iter().map(i64::from).collect())?;

        let outputs = self
            .session
            .run(ort::inputs![self.input_name.as_str() => input]?)?;

        let (output_name, value) = outputs
            .iter()
            .next()
            .ok_or_else(|| anyhow!("model produced no outputs"))?;
        let tensor = value.try_extract_tensor::<f32>()?;
        debug!("Output {} shape {:?}", output_name, tensor.shape());

        Ok(RawScores::new(
            tensor.shape().to_vec(),
            tensor.iter().copied().collect(),
        ))
    }
}
