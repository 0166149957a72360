/// Input loading for the prediction pipeline
///
/// Accepts FASTA (plain or gzip) and CSV tables with a `Seq` column and
/// returns records in file order.
use crate::bio::fasta::parse_fasta;
use crate::bio::sequence::SequenceRecord;
use crate::SolubenchError;
use std::path::Path;
use tracing::{debug, warn};

/// Column that must be present in CSV input
pub const SEQUENCE_COLUMN: &str = "Seq";
/// Optional identifier columns in CSV input
pub const NAME_COLUMNS: [&str; 2] = ["Name", "name"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputFormat {
    Fasta,
    FastaGz,
    Csv,
}

impl InputFormat {
    /// Detect the input format from the file extension (case-insensitive)
    pub fn from_path(path: &Path) -> Result<Self, SolubenchError> {
        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .map(|n| n.to_lowercase())
            .unwrap_or_default();

        let fasta_exts = [".fa", ".fasta", ".faa"];

        if name.ends_with(".csv") {
            Ok(InputFormat::Csv)
        } else if fasta_exts.iter().any(|ext| name.ends_with(ext)) {
            Ok(InputFormat::Fasta)
        } else if fasta_exts.iter().any(|ext| name.ends_with(&format!("{}.gz", ext))) {
            Ok(InputFormat::FastaGz)
        } else {
            Err(SolubenchError::UnsupportedFormat(path.display().to_string()))
        }
    }
}

/// Load sequence records from a FASTA or CSV file
pub fn load<P: AsRef<Path>>(path: P) -> Result<Vec<SequenceRecord>, SolubenchError> {
    let path = path.as_ref();
    let format = InputFormat::from_path(path)?;
    debug!("Loading {:?} input from {}", format, path.display());

    let records = match format {
        InputFormat::Fasta | InputFormat::FastaGz => parse_fasta(path)?,
        InputFormat::Csv => read_csv(path)?,
    };

    if records.is_empty() {
        return Err(SolubenchError::EmptyInput(path.display().to_string()));
    }

    debug!("Loaded {} sequences from {}", records.len(), path.display());
    Ok(records)
}

fn read_csv(path: &Path) -> Result<Vec<SequenceRecord>, SolubenchError> {
    let mut reader = csv::ReaderBuilder::new().has_headers(true).from_path(path)?;
    read_csv_records(&mut reader)
}

/// Read records from any CSV reader with a header row
pub fn read_csv_records<R: std::io::Read>(
    reader: &mut csv::Reader<R>,
) -> Result<Vec<SequenceRecord>, SolubenchError> {
    let headers = reader.headers()?.clone();

    let seq_idx = headers.iter().position(|h| h == SEQUENCE_COLUMN).ok_or_else(|| {
        let found: Vec<&str> = headers.iter().collect();
        SolubenchError::Schema(format!(
            "input CSV must have a header column named \"{}\" (found: {})",
            SEQUENCE_COLUMN,
            if found.is_empty() { "none".to_string() } else { found.join(", ") }
        ))
    })?;
    let name_idx = headers.iter().position(|h| NAME_COLUMNS.contains(&h));

    let mut records = Vec::new();
    for (row, result) in reader.records().enumerate() {
        let row_data = result?;
        let sequence = row_data.get(seq_idx).unwrap_or("").trim();

        if sequence.is_empty() {
            // header is line 1
            warn!("Skipping CSV row {} with empty {} value", row + 2, SEQUENCE_COLUMN);
            continue;
        }

        let identifier = name_idx
            .and_then(|idx| row_data.get(idx))
            .map(|name| name.trim().to_string());
        records.push(SequenceRecord::new(identifier, sequence.to_string()));
    }

    Ok(records)
}
