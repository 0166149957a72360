pub mod benchmark;
pub mod config;
pub mod predict;

use crate::core::config::Config;
use crate::SolubenchError;
use std::path::PathBuf;

/// Model path from the command line, falling back to the configuration
pub(crate) fn resolve_model_path(
    arg: Option<PathBuf>,
    config: &Config,
) -> Result<PathBuf, SolubenchError> {
    arg.or_else(|| config.model.path.clone()).ok_or_else(|| {
        SolubenchError::Config(
            "no model given: pass --model or set [model] path in the config file".to_string(),
        )
    })
}
