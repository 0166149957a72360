use crate::bio::sequence::{SequenceRecord, UNKNOWN_IDENTIFIER};
use crate::SolubenchError;
use flate2::read::GzDecoder;
use memmap2::Mmap;
use nom::{
    bytes::complete::{tag, take_till, take_while, take_while1},
    character::complete::{line_ending, not_line_ending},
    combinator::opt,
    sequence::preceded,
    IResult,
};
use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

fn is_line_break(c: u8) -> bool {
    c == b'\n' || c == b'\r'
}

/// Parse a FASTA header line into its identifier token and optional description
fn parse_header(input: &[u8]) -> IResult<&[u8], (String, Option<String>)> {
    let (input, _) = tag(b">")(input)?;
    let (input, _) = take_while(|c: u8| c == b' ' || c == b'\t')(input)?;
    let (input, id) = take_till(|c: u8| c == b' ' || c == b'\t' || is_line_break(c))(input)?;
    let (input, description) = opt(preceded(
        take_while1(|c: u8| c == b' ' || c == b'\t'),
        not_line_ending,
    ))(input)?;
    let (input, _) = opt(line_ending)(input)?;

    let id = String::from_utf8_lossy(id).into_owned();
    let description = description
        .map(|d| String::from_utf8_lossy(d).trim().to_string())
        .filter(|d| !d.is_empty());
    Ok((input, (id, description)))
}

/// Parse sequence lines until the next header or EOF. Returns the raw
/// residue bytes with whitespace removed.
fn parse_sequence(input: &[u8]) -> IResult<&[u8], Vec<u8>> {
    let mut sequence = Vec::new();
    let mut remaining = input;

    while !remaining.is_empty() {
        let (rest, line) = take_till::<_, _, nom::error::Error<_>>(is_line_break)(remaining)?;

        let trimmed = line.trim_ascii();
        if trimmed.first() == Some(&b'>') {
            break;
        }

        let (rest, _) = opt(line_ending)(rest)?;
        // a lone carriage return is not a line ending nom recognises
        let rest = rest.strip_prefix(b"\r").unwrap_or(rest);

        sequence.extend(trimmed.iter().filter(|c| !c.is_ascii_whitespace()));

        remaining = rest;
    }

    Ok((remaining, sequence))
}

type RawRecord = (Option<(String, Option<String>)>, Vec<u8>);

/// Parse a single FASTA record. Input that does not start with a header
/// yields a record without identifier.
fn parse_record(input: &[u8]) -> IResult<&[u8], RawRecord> {
    let (input, header) = opt(parse_header)(input)?;
    let (input, sequence) = parse_sequence(input)?;
    Ok((input, (header, sequence)))
}

fn into_record((header, sequence): RawRecord) -> Result<SequenceRecord, SolubenchError> {
    let (id, description) = header.unzip();
    let sequence = String::from_utf8(sequence).map_err(|e| {
        SolubenchError::Parse(format!(
            "sequence of {} is not valid UTF-8: {}",
            id.as_deref().filter(|id| !id.is_empty()).unwrap_or(UNKNOWN_IDENTIFIER),
            e
        ))
    })?;

    let record = SequenceRecord::new(id, sequence);
    Ok(match description.flatten() {
        Some(desc) => record.with_description(desc),
        None => record,
    })
}

/// Parse FASTA from a byte buffer, dropping records with an empty sequence
pub fn parse_fasta_from_bytes(data: &[u8]) -> Result<Vec<SequenceRecord>, SolubenchError> {
    let mut input = data;
    let mut records = Vec::new();

    while !input.is_empty() {
        // Skip blank lines and leading whitespace
        while !input.is_empty() && input[0].is_ascii_whitespace() {
            input = &input[1..];
        }

        if input.is_empty() {
            break;
        }

        match parse_record(input) {
            Ok((remaining, raw)) => {
                let record = into_record(raw)?;
                if record.is_empty() {
                    tracing::debug!(
                        "Skipping FASTA record {} with empty sequence",
                        record.display_id()
                    );
                } else {
                    records.push(record);
                }
                if remaining.len() == input.len() {
                    return Err(SolubenchError::Parse("FASTA parser made no progress".to_string()));
                }
                input = remaining;
            }
            Err(e) => {
                return Err(SolubenchError::Parse(format!("Failed to parse FASTA: {:?}", e)));
            }
        }
    }

    Ok(records)
}

/// Parse a FASTA file into records (supports .gz compression)
pub fn parse_fasta<P: AsRef<Path>>(path: P) -> Result<Vec<SequenceRecord>, SolubenchError> {
    let path = path.as_ref();

    if is_gzip(path) {
        parse_fasta_gzip(path)
    } else {
        parse_fasta_uncompressed(path)
    }
}

fn is_gzip(path: &Path) -> bool {
    path.extension()
        .and_then(|s| s.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("gz"))
}

fn parse_fasta_uncompressed(path: &Path) -> Result<Vec<SequenceRecord>, SolubenchError> {
    let file = File::open(path)?;
    if file.metadata()?.len() == 0 {
        return Ok(Vec::new());
    }
    let mmap = unsafe { Mmap::map(&file)? };

    parse_fasta_from_bytes(&mmap[..])
}

fn parse_fasta_gzip(path: &Path) -> Result<Vec<SequenceRecord>, SolubenchError> {
    let file = File::open(path)?;
    let mut decoder = GzDecoder::new(BufReader::new(file));
    let mut buffer = Vec::new();
    decoder.read_to_end(&mut buffer)?;

    parse_fasta_from_bytes(&buffer)
}

/// Write records to a FASTA file (supports .gz compression)
pub fn write_fasta<P: AsRef<Path>>(
    path: P,
    records: &[SequenceRecord],
) -> Result<(), SolubenchError> {
    use flate2::write::GzEncoder;
    use flate2::Compression;

    let path = path.as_ref();
    let file = File::create(path)?;

    if is_gzip(path) {
        let encoder = GzEncoder::new(file, Compression::default());
        let mut writer = BufWriter::new(encoder);
        write_fasta_to_writer(&mut writer, records)?;
        writer.flush()?;
    } else {
        let mut writer = BufWriter::new(file);
        write_fasta_to_writer(&mut writer, records)?;
        writer.flush()?;
    }

    Ok(())
}

fn write_fasta_to_writer<W: Write>(
    writer: &mut W,
    records: &[SequenceRecord],
) -> Result<(), SolubenchError> {
    for record in records {
        writeln!(writer, "{}", record.header())?;

        // 80-character lines
        let residues: Vec<char> = record.sequence.chars().collect();
        for chunk in residues.chunks(80) {
            writeln!(writer, "{}", chunk.iter().collect::<String>())?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_header() {
        let input = b">sp|P12345|PROTEIN_HUMAN Description here\nMKT";
        let (remaining, (id, desc)) = parse_header(input).unwrap();
        assert_eq!(id, "sp|P12345|PROTEIN_HUMAN");
        assert_eq!(desc.as_deref(), Some("Description here"));
        assert_eq!(remaining, b"MKT");
    }

    #[test]
    fn test_parse_header_at_eof() {
        let (remaining, (id, desc)) = parse_header(b">P1").unwrap();
        assert_eq!(id, "P1");
        assert_eq!(desc, None);
        assert!(remaining.is_empty());
    }

    #[test]
    fn test_multiline_sequence_is_concatenated() {
        let input = b">P1\nMKT\n  AAV  \n\n>P2 second\nGG\r\nHH\r\n";
        let records = parse_fasta_from_bytes(input).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].identifier.as_deref(), Some("P1"));
        assert_eq!(records[0].sequence, "MKTAAV");
        assert_eq!(records[1].identifier.as_deref(), Some("P2"));
        assert_eq!(records[1].description.as_deref(), Some("second"));
        assert_eq!(records[1].sequence, "GGHH");
    }

    #[test]
    fn test_headerless_and_empty_records() {
        let test_cases: Vec<(&[u8], Vec<(Option<&str>, &str)>)> = vec![
            (b"MKT\nAAV\n>P1\nGG\n", vec![(None, "MKTAAV"), (Some("P1"), "GG")]),
            (b">\nMKT\n", vec![(None, "MKT")]),
            (b"> P1 desc\nMKT\n", vec![(Some("P1"), "MKT")]),
            (b">\tP2\nGG\n", vec![(Some("P2"), "GG")]),
            (b">P1\n>P2\nMKT\n", vec![(Some("P2"), "MKT")]),
            (b"", vec![]),
            (b"\n\n  \n", vec![]),
        ];

        for (input, expected) in test_cases {
            let records = parse_fasta_from_bytes(input).unwrap();
            let actual: Vec<(Option<&str>, &str)> = records
                .iter()
                .map(|r| (r.identifier.as_deref(), r.sequence.as_str()))
                .collect();
            assert_eq!(actual, expected, "input: {:?}", String::from_utf8_lossy(input));
        }
    }

    #[test]
    fn test_header_with_leading_space() {
        let records = parse_fasta_from_bytes(b"> P1 desc\nMKT\n").unwrap();
        assert_eq!(records[0].identifier.as_deref(), Some("P1"));
        assert_eq!(records[0].description.as_deref(), Some("desc"));
    }

    #[test]
    fn test_non_ascii_residues_kept_as_written() {
        let records = parse_fasta_from_bytes(">P1\nMKé\nAA\n".as_bytes()).unwrap();
        assert_eq!(records[0].sequence, "MKéAA");
        assert_eq!(records[0].len(), 5);

        let result = parse_fasta_from_bytes(b">P1\nMK\xff\n");
        assert!(matches!(result, Err(SolubenchError::Parse(_))));
    }
}
