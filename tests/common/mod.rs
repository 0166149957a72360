#![allow(dead_code)]

use anyhow::{anyhow, Result};
use assert_cmd::Command;
use solubench::core::encoder::EncodedBatch;
use solubench::core::scoring::{RawScores, SolubilityModel};
use std::cell::RefCell;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Write `content` to `dir/name`
pub fn create_test_file(dir: &Path, name: &str, content: &str) -> Result<PathBuf> {
    let path = dir.join(name);
    fs::write(&path, content)?;
    Ok(path)
}

/// FASTA with `n` short protein records named `P1..Pn`
pub fn create_simple_fasta(n: usize) -> String {
    let residues = ["MKTAYIAK", "GGHLVQ", "ACDEFGHIKLMNPQRSTVWY", "MXBZ", "PPGG"];
    let mut content = String::new();
    for i in 0..n {
        content.push_str(&format!(">P{} test protein {}\n", i + 1, i + 1));
        content.push_str(residues[i % residues.len()]);
        content.push('\n');
    }
    content
}

pub struct TestEnvironment {
    pub temp_dir: TempDir,
    pub input_dir: PathBuf,
    pub output_dir: PathBuf,
}

impl TestEnvironment {
    pub fn new() -> Result<Self> {
        let temp_dir = TempDir::new()?;
        let input_dir = temp_dir.path().join("input");
        let output_dir = temp_dir.path().join("output");

        fs::create_dir_all(&input_dir)?;
        fs::create_dir_all(&output_dir)?;

        Ok(TestEnvironment {
            temp_dir,
            input_dir,
            output_dir,
        })
    }

    pub fn create_input_file(&self, name: &str, content: &str) -> Result<PathBuf> {
        create_test_file(&self.input_dir, name, content)
    }

    pub fn output_path(&self, name: &str) -> PathBuf {
        self.output_dir.join(name)
    }
}

pub fn solubench_cmd() -> Command {
    Command::cargo_bin("solubench").unwrap()
}

/// Returns a fixed row of scores for every input row and records the
/// batches it was given
pub struct FixedScoresModel {
    row: Vec<f32>,
    seen: RefCell<Vec<EncodedBatch>>,
}

impl FixedScoresModel {
    pub fn new(row: Vec<f32>) -> Self {
        Self {
            row,
            seen: RefCell::new(Vec::new()),
        }
    }

    pub fn batches(&self) -> Vec<EncodedBatch> {
        self.seen.borrow().clone()
    }
}

impl SolubilityModel for FixedScoresModel {
    fn name(&self) -> &str {
        "fixed"
    }

    fn predict(&self, batch: &EncodedBatch) -> Result<RawScores> {
        self.seen.borrow_mut().push(batch.clone());
        if self.row.len() == 1 {
            return Ok(RawScores::scalar(vec![self.row[0]; batch.len()]));
        }
        Ok(RawScores::from_rows(vec![self.row.clone(); batch.len()]))
    }
}

/// Model whose runtime always fails
pub struct FailingModel;

impl SolubilityModel for FailingModel {
    fn name(&self) -> &str {
        "failing"
    }

    fn predict(&self, _batch: &EncodedBatch) -> Result<RawScores> {
        Err(anyhow!("runtime exploded"))
    }
}
