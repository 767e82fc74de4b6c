//! FASTA reading and writing.
//!
//! Multi-line sequences are concatenated. The identifier is the header text
//! up to the first whitespace; the full header is kept as the record header.
//!
//! ## FASTA Format
//!
//! ```text
//! >sequence_identifier optional description
//! ACGTACGTACGT...
//! >another_sequence
//! TGCATGCATGCA...
//! ```

use std::fs::File;
use std::io::{BufRead, BufReader, Read, Write};
use std::path::Path;

use thiserror::Error;

use super::SequenceRecord;
use crate::model::Sequence;

/// Errors that can occur during FASTA parsing.
#[derive(Error, Debug)]
pub enum FastaError {
    #[error("Failed to read FASTA input: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Empty FASTA file")]
    EmptyFile,

    #[error("Invalid FASTA format: {0}")]
    InvalidFormat(String),

    #[error("Sequence without header at line {0}")]
    SequenceWithoutHeader(usize),
}

/// Result type for FASTA operations.
pub type FastaResult<T> = Result<T, FastaError>;

/// Accumulates records line by line.
#[derive(Default)]
struct FastaBuilder {
    records: Vec<SequenceRecord>,
    current: Option<SequenceRecord>,
}

impl FastaBuilder {
    fn push_line(&mut self, line: &str, line_number: usize) -> FastaResult<()> {
        let line = line.trim();

        // Skip empty lines
        if line.is_empty() {
            return Ok(());
        }

        if let Some(header) = line.strip_prefix('>') {
            self.flush();

            let header = header.trim();
            let id = header.split_whitespace().next().unwrap_or_default();
            if id.is_empty() {
                return Err(FastaError::InvalidFormat(format!(
                    "Empty sequence identifier at line {}",
                    line_number
                )));
            }

            self.current = Some(SequenceRecord {
                id: id.to_string(),
                header: header.to_string(),
                data: String::new(),
            });
        } else {
            let record = self
                .current
                .as_mut()
                .ok_or(FastaError::SequenceWithoutHeader(line_number))?;

            // Fast append: most FASTA lines don't have internal whitespace
            if line.bytes().all(|b| !b.is_ascii_whitespace()) {
                record.data.push_str(line);
            } else {
                record.data.extend(line.chars().filter(|c| !c.is_ascii_whitespace()));
            }
        }
        Ok(())
    }

    /// Saves the current record; header-only records are dropped.
    fn flush(&mut self) {
        if let Some(record) = self.current.take() {
            if !record.data.is_empty() {
                self.records.push(record);
            }
        }
    }

    fn finish(mut self) -> FastaResult<Vec<SequenceRecord>> {
        self.flush();
        if self.records.is_empty() {
            return Err(FastaError::EmptyFile);
        }
        Ok(self.records)
    }
}

/// Files above this size are read in one go instead of line by line.
const BULK_READ_THRESHOLD: u64 = 1_000_000;

/// Parses a FASTA file.
///
/// Large files are loaded whole and parsed from memory; smaller ones are
/// streamed line by line.
pub fn parse_fasta_file<P: AsRef<Path>>(path: P) -> FastaResult<Vec<SequenceRecord>> {
    let file = File::open(&path)?;
    let file_size = file.metadata()?.len();

    if file_size > BULK_READ_THRESHOLD {
        let mut reader = BufReader::with_capacity(1024 * 1024, file);
        let mut content = String::with_capacity(file_size as usize);
        reader.read_to_string(&mut content)?;
        parse_fasta_str(&content)
    } else {
        parse_fasta(BufReader::new(file))
    }
}

/// Parses FASTA content from a string.
pub fn parse_fasta_str(content: &str) -> FastaResult<Vec<SequenceRecord>> {
    let mut builder = FastaBuilder::default();
    for (index, line) in content.lines().enumerate() {
        builder.push_line(line, index + 1)?;
    }
    builder.finish()
}

/// Parses FASTA content from a reader.
pub fn parse_fasta<R: BufRead>(reader: R) -> FastaResult<Vec<SequenceRecord>> {
    let mut builder = FastaBuilder::default();
    for (index, line) in reader.lines().enumerate() {
        builder.push_line(&line?, index + 1)?;
    }
    builder.finish()
}

/// Writes one sequence as a FASTA record.
///
/// The label becomes the header. With `line_width` > 0 the sequence is
/// wrapped at that many symbols per line.
pub fn write_fasta<W: Write>(
    writer: &mut W,
    sequence: &Sequence,
    line_width: usize,
) -> std::io::Result<()> {
    writeln!(writer, ">{}", sequence.label())?;
    if line_width == 0 {
        writeln!(writer, "{}", sequence.as_str())?;
    } else {
        for chunk in sequence.as_bytes().chunks(line_width) {
            writer.write_all(chunk)?;
            writer.write_all(b"\n")?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;

    #[test]
    fn test_parse_simple_fasta() {
        let content = ">seq1\nACGT\n>seq2\nTGCA\n";
        let records = parse_fasta_str(content).unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].id, "seq1");
        assert_eq!(records[0].data, "ACGT");
        assert_eq!(records[1].id, "seq2");
        assert_eq!(records[1].data, "TGCA");
    }

    #[test]
    fn test_parse_multiline_sequence() {
        let content = ">seq1\nACGT\nTGCA\nAAAA\n";
        let records = parse_fasta_str(content).unwrap();

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].data, "ACGTTGCAAAAA");
    }

    #[test]
    fn test_parse_with_description() {
        let content = ">seq1 This is a description\nAC GT\n";
        let records = parse_fasta_str(content).unwrap();

        assert_eq!(records[0].id, "seq1");
        assert_eq!(records[0].header, "seq1 This is a description");
        assert_eq!(records[0].data, "ACGT");
    }

    #[test]
    fn test_parse_with_empty_lines() {
        let content = ">seq1\nACGT\n\n>seq2\n\nTGCA\n";
        let records = parse_fasta_str(content).unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].data, "ACGT");
        assert_eq!(records[1].data, "TGCA");
    }

    #[test]
    fn test_header_only_record_dropped() {
        let content = ">empty\n>seq1\nACGT\n";
        let records = parse_fasta_str(content).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].id, "seq1");
    }

    #[test]
    fn test_empty_file() {
        assert!(matches!(parse_fasta_str(""), Err(FastaError::EmptyFile)));
        assert!(matches!(parse_fasta_str(">only\n"), Err(FastaError::EmptyFile)));
    }

    #[test]
    fn test_sequence_without_header() {
        let content = "ACGT\n>seq1\nTGCA\n";
        let result = parse_fasta_str(content);
        assert!(matches!(result, Err(FastaError::SequenceWithoutHeader(1))));
    }

    #[test]
    fn test_empty_identifier() {
        let content = ">\nACGT\n";
        assert!(matches!(
            parse_fasta_str(content),
            Err(FastaError::InvalidFormat(_))
        ));
    }

    #[test]
    fn test_parse_from_reader() {
        let reader = Cursor::new(">a\nAC\nGT\n>b\nTT\n");
        let records = parse_fasta(reader).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].data, "ACGT");
        assert_eq!(records[1].data, "TT");
    }

    #[test]
    fn test_parse_fasta_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b">a desc\nAC\nGT\n").unwrap();
        let records = parse_fasta_file(file.path()).unwrap();
        assert_eq!(records[0].header, "a desc");
        assert_eq!(records[0].data, "ACGT");
    }

    #[test]
    fn test_parse_fasta_file_large() {
        let line = "ACGT".repeat(20);
        let mut content = String::from(">big\n");
        while content.len() <= BULK_READ_THRESHOLD as usize {
            content.push_str(&line);
            content.push('\n');
        }
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();

        let records = parse_fasta_file(file.path()).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].data.len() % 80, 0);
        assert!(records[0].data.len() > 900_000);
    }

    #[test]
    fn test_reader_rejects_invalid_utf8() {
        let reader = Cursor::new(b">a\nAC\xffGT\n".to_vec());
        assert!(matches!(parse_fasta(reader), Err(FastaError::IoError(_))));
    }

    #[test]
    fn test_write_fasta_wrapped() {
        let seq = Sequence::new("ACGTACGTAC", crate::model::SequenceKind::Dna, "demo").unwrap();
        let mut out = Vec::new();
        write_fasta(&mut out, &seq, 4).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), ">demo\nACGT\nACGT\nAC\n");

        let mut out = Vec::new();
        write_fasta(&mut out, &seq, 0).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), ">demo\nACGTACGTAC\n");
    }

    #[test]
    fn test_write_then_parse() {
        let seq = Sequence::new("ACGTTGCA", crate::model::SequenceKind::Dna, "x y").unwrap();
        let mut out = Vec::new();
        write_fasta(&mut out, &seq, 3).unwrap();
        let records = parse_fasta_str(&String::from_utf8(out).unwrap()).unwrap();
        assert_eq!(records[0].id, "x");
        assert_eq!(records[0].data, seq.as_str());
    }
}
