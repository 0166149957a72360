use crate::report::OutputSchema;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub encoding: EncodingConfig,
    #[serde(default)]
    pub model: ModelConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

/// Encoding parameters. These are baked into the trained model and must be
/// kept in lock-step with it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EncodingConfig {
    /// Residue alphabet; each symbol is encoded as its 1-based position
    #[serde(default = "default_alphabet")]
    pub alphabet: String,
    /// Code for symbols outside the alphabet (must be non-zero)
    #[serde(default = "default_unknown_code")]
    pub unknown_code: u32,
    /// Fixed width of every encoded vector
    #[serde(default = "default_pad_length")]
    pub pad_length: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelConfig {
    /// Model artifact to load
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
    /// Name of the model's integer input tensor
    #[serde(default = "default_input_name")]
    pub input_name: String,
    /// Constant reported in the Predictor column of benchmark output
    #[serde(default = "default_predictor_name")]
    pub predictor_name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    #[serde(default = "default_schema")]
    pub schema: OutputSchema,
}

fn default_alphabet() -> String {
    "ACDEFGHIKLMNPQRSTVWY".to_string()
}

fn default_unknown_code() -> u32 {
    21
}

fn default_pad_length() -> usize {
    1200
}

fn default_input_name() -> String {
    "input".to_string()
}

fn default_predictor_name() -> String {
    "DSResSol".to_string()
}

fn default_schema() -> OutputSchema {
    OutputSchema::Minimal
}

impl Default for EncodingConfig {
    fn default() -> Self {
        Self {
            alphabet: default_alphabet(),
            unknown_code: default_unknown_code(),
            pad_length: default_pad_length(),
        }
    }
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            path: None,
            input_name: default_input_name(),
            predictor_name: default_predictor_name(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            schema: default_schema(),
        }
    }
}

pub fn default_config() -> Config {
    Config::default()
}

pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config, crate::SolubenchError> {
    let contents = std::fs::read_to_string(path)?;
    let config: Config = toml::from_str(&contents)
        .map_err(|e| crate::SolubenchError::Config(format!("Failed to parse config: {}", e)))?;
    Ok(config)
}

pub fn save_config<P: AsRef<Path>>(path: P, config: &Config) -> Result<(), crate::SolubenchError> {
    let contents = toml::to_string_pretty(config)
        .map_err(|e| crate::SolubenchError::Config(format!("Failed to serialize config: {}", e)))?;
    std::fs::write(path, contents)?;
    Ok(())
}
