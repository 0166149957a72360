//! Model backends implementing [`SolubilityModel`].
//!
//! The ONNX Runtime backend is compiled only with the `onnx` feature.

#[cfg(feature = "onnx")]
pub mod onnx;

#[cfg(feature = "onnx")]
pub use onnx::OnnxModel;

use crate::core::config::ModelConfig;
use crate::core::scoring::SolubilityModel;
use crate::SolubenchError;
use std::path::Path;

/// Load the model artifact at `path` with the backend compiled into this build
pub fn load_model(
    path: &Path,
    config: &ModelConfig,
) -> Result<Box<dyn SolubilityModel>, SolubenchError> {
    if !path.exists() {
        return Err(SolubenchError::Scoring(format!("model file not found: {}", path.display())));
    }

    #[cfg(feature = "onnx")]
    {
        let model = OnnxModel::load(path, &config.input_name)
            .map_err(|e| {
                SolubenchError::Scoring(format!("failed to load {}: {:#}", path.display(), e))
            })?;
        Ok(Box::new(model))
    }

    #[cfg(not(feature = "onnx"))]
    {
        let _ = config;
        Err(SolubenchError::Scoring(format!(
            "cannot load {}: this build has no model runtime (rebuild with --features onnx)",
            path.display()
        )))
    }
}
