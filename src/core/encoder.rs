//! Integer encoding of residue sequences into fixed-width vectors.
//!
//! Each residue is looked up in an [`AlphabetMap`]; the resulting vector is
//! post-padded with [`PADDING_CODE`] or post-truncated to the configured
//! width, so every vector in a batch has exactly `pad_length` entries.

use crate::bio::SequenceRecord;
use crate::core::config::EncodingConfig;
use crate::SolubenchError;
use std::collections::HashMap;
use tracing::debug;

/// Code written past the end of a sequence
pub const PADDING_CODE: u32 = 0;

/// Residue symbol to integer code mapping
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlphabetMap {
    codes: HashMap<u8, u32>,
    unknown_code: u32,
}

impl AlphabetMap {
    /// Build a map from explicit (symbol, code) pairs. Symbols are matched
    /// case-insensitively.
    pub fn from_pairs<I>(pairs: I, unknown_code: u32) -> Result<Self, SolubenchError>
    where
        I: IntoIterator<Item = (char, u32)>,
    {
        if unknown_code == PADDING_CODE {
            return Err(SolubenchError::Config(
                "unknown_code must be non-zero (0 is reserved for padding)".to_string(),
            ));
        }

        let mut codes = HashMap::new();
        let mut seen_codes = HashMap::new();
        for (symbol, code) in pairs {
            if !symbol.is_ascii_alphabetic() && symbol != '*' && symbol != '-' {
                return Err(SolubenchError::Config(format!("invalid alphabet symbol {:?}", symbol)));
            }
            if code == PADDING_CODE {
                return Err(SolubenchError::Config(format!(
                    "symbol {:?} maps to the padding code 0",
                    symbol
                )));
            }
            if code == unknown_code {
                return Err(SolubenchError::Config(format!(
                    "symbol {:?} shares code {} with unknown residues",
                    symbol, code
                )));
            }
            if let Some(other) = seen_codes.insert(code, symbol) {
                return Err(SolubenchError::Config(format!(
                    "symbols {:?} and {:?} both map to code {}",
                    other, symbol, code
                )));
            }

            let key = symbol.to_ascii_uppercase() as u8;
            if codes.insert(key, code).is_some() {
                return Err(SolubenchError::Config(format!(
                    "duplicate alphabet symbol {:?}",
                    symbol
                )));
            }
        }

        if codes.is_empty() {
            return Err(SolubenchError::Config("alphabet is empty".to_string()));
        }

        Ok(Self { codes, unknown_code })
    }

    /// Build a map where each symbol of `alphabet` is encoded as its 1-based position
    pub fn from_alphabet(alphabet: &str, unknown_code: u32) -> Result<Self, SolubenchError> {
        Self::from_pairs(
            alphabet.chars().enumerate().map(|(i, c)| (c, i as u32 + 1)),
            unknown_code,
        )
    }

    /// Code for one residue; anything outside the alphabet, including
    /// non-ASCII characters, maps to the unknown code
    pub fn code(&self, residue: char) -> u32 {
        if !residue.is_ascii() {
            return self.unknown_code;
        }
        self.codes
            .get(&(residue.to_ascii_uppercase() as u8))
            .copied()
            .unwrap_or(self.unknown_code)
    }

    pub fn unknown_code(&self) -> u32 {
        self.unknown_code
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }
}

/// A batch of equal-width encoded vectors, in input order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedBatch {
    width: usize,
    rows: Vec<Vec<u32>>,
}

impl EncodedBatch {
    pub fn width(&self) -> usize {
        self.width
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn rows(&self) -> &[Vec<u32>] {
        &self.rows
    }

    /// Row-major values, `len() * width()` entries
    pub fn flatten(&self) -> Vec<u32> {
        self.rows.iter().flatten().copied().collect()
    }
}

pub struct Encoder {
    alphabet: AlphabetMap,
    pad_length: usize,
}

impl Encoder {
    pub fn new(alphabet: AlphabetMap, pad_length: usize) -> Result<Self, SolubenchError> {
        if pad_length == 0 {
            return Err(SolubenchError::Config("pad_length must be greater than 0".to_string()));
        }
        Ok(Self { alphabet, pad_length })
    }

    pub fn from_config(config: &EncodingConfig) -> Result<Self, SolubenchError> {
        let alphabet = AlphabetMap::from_alphabet(&config.alphabet, config.unknown_code)?;
        debug!(
            "Encoding {} residue symbols (unknown code {}) to width {}",
            alphabet.len(),
            alphabet.unknown_code(),
            config.pad_length
        );
        Self::new(alphabet, config.pad_length)
    }

    pub fn pad_length(&self) -> usize {
        self.pad_length
    }

    /// Encode one sequence without padding
    pub fn encode_sequence(&self, sequence: &str) -> Vec<u32> {
        sequence.chars().map(|c| self.alphabet.code(c)).collect()
    }

    /// Encode one sequence and pad or truncate it to `pad_length`
    pub fn encode_padded(&self, sequence: &str) -> Vec<u32> {
        let mut codes = self.encode_sequence(sequence);
        codes.resize(self.pad_length, PADDING_CODE);
        codes
    }

    pub fn encode(&self, records: &[SequenceRecord]) -> EncodedBatch {
        let mut truncated = 0usize;
        let rows = records
            .iter()
            .map(|record| {
                if record.len() > self.pad_length {
                    truncated += 1;
                    debug!(
                        "Truncating {} from {} to {} residues",
                        record.display_id(),
                        record.len(),
                        self.pad_length
                    );
                }
                self.encode_padded(&record.sequence)
            })
            .collect();

        if truncated > 0 {
            debug!(
                "{} of {} sequences exceeded pad length {}",
                truncated,
                records.len(),
                self.pad_length
            );
        }

        EncodedBatch {
            width: self.pad_length,
            rows,
        }
    }
}
