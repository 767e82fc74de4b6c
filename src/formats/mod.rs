//! Sequence file readers and writers.
//!
//! Supports:
//! - FASTA (.fasta, .fa, .fna, .fas, .ffn, .frn)
//! - Plain text (.txt, .seq), one sequence per file
//!
//! Format detection priority:
//! 1. Explicit format specification (-f option)
//! 2. File extension
//! 3. Content-based detection

pub mod fasta;
pub mod plain;

use std::ffi::OsStr;
use std::fs::{self, File};
use std::io::{BufReader, Read};
use std::path::Path;

use thiserror::Error;

use crate::error::SequenceError;
use crate::model::{Sequence, SequenceKind};

/// Detected file format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    Fasta,
    Plain,
}

impl std::fmt::Display for FileFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FileFormat::Fasta => write!(f, "FASTA"),
            FileFormat::Plain => write!(f, "plain text"),
        }
    }
}

/// Errors that can occur while reading sequence files.
#[derive(Error, Debug)]
pub enum ParseError {
    #[error("Failed to open file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Empty file")]
    EmptyFile,

    #[error("FASTA error: {0}")]
    FastaError(#[from] fasta::FastaError),

    #[error("Invalid sequence '{id}'")]
    InvalidSequence {
        id: String,
        #[source]
        source: SequenceError,
    },
}

/// Result type for parsing operations.
pub type ParseResult<T> = Result<T, ParseError>;

/// One raw sequence read from a file, not yet validated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SequenceRecord {
    /// Identifier (header up to the first whitespace)
    pub id: String,
    /// Full header line without the leading '>'
    pub header: String,
    /// Concatenated sequence data
    pub data: String,
}

impl SequenceRecord {
    /// Validates the record as a sequence of `kind`, labelled with its header.
    pub fn into_sequence(self, kind: SequenceKind) -> ParseResult<Sequence> {
        let SequenceRecord { id, header, data } = self;
        Sequence::new(data, kind, header)
            .map_err(|source| ParseError::InvalidSequence { id, source })
    }
}

/// Detects format from file extension.
pub fn detect_format_from_extension<P: AsRef<Path>>(path: P) -> Option<FileFormat> {
    let ext = path.as_ref().extension().and_then(OsStr::to_str)?;
    match ext.to_lowercase().as_str() {
        "fa" | "fas" | "fasta" | "fna" | "ffn" | "frn" => Some(FileFormat::Fasta),
        "txt" | "seq" => Some(FileFormat::Plain),
        _ => None,
    }
}

/// Detects the file format by examining the first non-empty line.
pub fn detect_format_from_content(content: &str) -> FileFormat {
    let first = content.lines().map(str::trim).find(|line| !line.is_empty());
    match first {
        Some(line) if line.starts_with('>') => FileFormat::Fasta,
        _ => FileFormat::Plain,
    }
}

/// Parses content with a specific format.
///
/// `fallback_id` names the record of a plain-text file.
pub fn parse_content(
    content: &str,
    format: FileFormat,
    fallback_id: &str,
) -> ParseResult<Vec<SequenceRecord>> {
    match format {
        FileFormat::Fasta => Ok(fasta::parse_fasta_str(content)?),
        FileFormat::Plain => Ok(vec![plain::parse_plain_str(content, fallback_id)?]),
    }
}

/// Parses a sequence file with optional format specification.
///
/// A file known to be FASTA (forced or by extension) goes straight to the
/// FASTA file reader; anything else is loaded and detected from content.
pub fn parse_file_with_options<P: AsRef<Path>>(
    path: P,
    forced_format: Option<FileFormat>,
) -> ParseResult<Vec<SequenceRecord>> {
    let path = path.as_ref();
    let file_size = fs::metadata(path)?.len() as usize;

    if file_size == 0 {
        return Err(ParseError::EmptyFile);
    }

    let known = forced_format.or_else(|| detect_format_from_extension(path));
    if known == Some(FileFormat::Fasta) {
        return Ok(fasta::parse_fasta_file(path)?);
    }

    let mut reader = BufReader::with_capacity(1024 * 1024, File::open(path)?);
    let mut content = String::with_capacity(file_size);
    reader.read_to_string(&mut content)?;

    let format = known.unwrap_or_else(|| detect_format_from_content(&content));

    let fallback_id = path
        .file_stem()
        .and_then(OsStr::to_str)
        .unwrap_or("sequence");

    parse_content(&content, format, fallback_id)
}

/// Parses a sequence file, automatically detecting the format.
pub fn parse_file<P: AsRef<Path>>(path: P) -> ParseResult<Vec<SequenceRecord>> {
    parse_file_with_options(path, None)
}
