//! Plain-text sequence files.
//!
//! The whole file is a single sequence; line breaks and other whitespace are
//! removed. Writing appends one sequence per line.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

use super::{ParseError, ParseResult, SequenceRecord};

/// Parses plain-text content into a single record named `id`.
pub fn parse_plain_str(content: &str, id: &str) -> ParseResult<SequenceRecord> {
    let data: String = content.chars().filter(|c| !c.is_whitespace()).collect();
    if data.is_empty() {
        return Err(ParseError::EmptyFile);
    }
    Ok(SequenceRecord {
        id: id.to_string(),
        header: id.to_string(),
        data,
    })
}

/// How [`write_text_file`] opens its target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WriteMode {
    /// Truncate the file first
    #[default]
    Write,
    /// Append after the existing content
    Append,
}

/// Writes `text` followed by a newline to `path`.
pub fn write_text_file<P: AsRef<Path>>(
    path: P,
    text: &str,
    mode: WriteMode,
) -> std::io::Result<()> {
    let mut file = match mode {
        WriteMode::Write => OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(path)?,
        WriteMode::Append => OpenOptions::new().append(true).create(true).open(path)?,
    };
    writeln!(file, "{}", text)
}
