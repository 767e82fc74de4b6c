//! Data model for nucleotide sequences.
//!
//! This module contains:
//! - Sequence kinds (DNA, RNA) and their alphabets
//! - The validated, immutable `Sequence` type
//! - The simple transforms: composition, transcription, reverse complement
//!   and GC statistics
//!
//! Translation and protein extraction live in `translation` and `protein`.

use std::collections::BTreeMap;
use std::fmt;
use std::ops::Range;

use log::warn;
use rand::Rng;

use crate::error::{SequenceError, SequenceResult};

/// Type of a nucleotide sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SequenceKind {
    #[default]
    Dna,
    Rna,
}

impl SequenceKind {
    /// The four valid uppercase symbols of this kind.
    pub fn alphabet(self) -> &'static [u8; 4] {
        match self {
            SequenceKind::Dna => b"ACGT",
            SequenceKind::Rna => b"ACGU",
        }
    }

    /// Checks whether a byte (assumed already uppercased) belongs to the alphabet.
    pub fn is_valid(self, symbol: u8) -> bool {
        self.alphabet().contains(&symbol)
    }

    /// Returns the pairing partner of a symbol, or `None` outside the alphabet.
    pub fn complement(self, symbol: u8) -> Option<u8> {
        match (self, symbol) {
            (_, b'C') => Some(b'G'),
            (_, b'G') => Some(b'C'),
            (SequenceKind::Dna, b'A') => Some(b'T'),
            (SequenceKind::Dna, b'T') => Some(b'A'),
            (SequenceKind::Rna, b'A') => Some(b'U'),
            (SequenceKind::Rna, b'U') => Some(b'A'),
            _ => None,
        }
    }
}

impl fmt::Display for SequenceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SequenceKind::Dna => write!(f, "DNA"),
            SequenceKind::Rna => write!(f, "RNA"),
        }
    }
}

/// Default label of sequences built without one.
pub const NO_LABEL: &str = "No label";

/// A validated nucleotide sequence with its kind and a free-text label.
///
/// Symbols are uppercase members of the kind's alphabet and never empty.
/// The value is immutable: every transform returns a new value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sequence {
    /// Free-text label (informational only)
    label: String,
    /// Uppercase symbols
    symbols: String,
    /// DNA or RNA
    kind: SequenceKind,
}

impl Sequence {
    /// Creates a validated sequence.
    ///
    /// Input is uppercased, then every symbol is checked against the
    /// alphabet of `kind`. Empty input is rejected.
    pub fn new(
        symbols: impl AsRef<str>,
        kind: SequenceKind,
        label: impl Into<String>,
    ) -> SequenceResult<Self> {
        let symbols = symbols.as_ref().to_ascii_uppercase();
        if symbols.is_empty() {
            return Err(SequenceError::EmptyInput(kind));
        }
        if let Some((position, symbol)) = symbols
            .char_indices()
            .find(|&(_, c)| !c.is_ascii() || !kind.is_valid(c as u8))
        {
            return Err(SequenceError::InvalidSymbol {
                kind,
                symbol,
                position,
            });
        }

        Ok(Self {
            label: label.into(),
            symbols,
            kind,
        })
    }

    /// Creates an unlabeled DNA sequence.
    pub fn dna(symbols: impl AsRef<str>) -> SequenceResult<Self> {
        Self::new(symbols, SequenceKind::Dna, NO_LABEL)
    }

    /// Creates an unlabeled RNA sequence.
    pub fn rna(symbols: impl AsRef<str>) -> SequenceResult<Self> {
        Self::new(symbols, SequenceKind::Rna, NO_LABEL)
    }

    /// Generates a uniformly random sequence of `length` symbols.
    pub fn random<R: Rng + ?Sized>(
        kind: SequenceKind,
        length: usize,
        rng: &mut R,
    ) -> SequenceResult<Self> {
        if length == 0 {
            return Err(SequenceError::InvalidArgument(
                "random sequence length must be at least 1".into(),
            ));
        }
        let alphabet = kind.alphabet();
        let symbols: String = (0..length)
            .map(|_| alphabet[rng.random_range(0..alphabet.len())] as char)
            .collect();
        Ok(Self {
            label: "Random".to_string(),
            symbols,
            kind,
        })
    }

    /// Builds a sequence from symbols already known to be valid for `kind`.
    fn from_validated(symbols: String, kind: SequenceKind, label: &str) -> Self {
        Self {
            label: label.to_string(),
            symbols,
            kind,
        }
    }

    /// Returns the label.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Returns the sequence kind.
    pub fn kind(&self) -> SequenceKind {
        self.kind
    }

    /// Returns the number of symbols.
    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    /// Always false for a constructed sequence.
    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// Returns the symbols as a string slice.
    pub fn as_str(&self) -> &str {
        &self.symbols
    }

    /// Returns the symbols as bytes.
    pub fn as_bytes(&self) -> &[u8] {
        self.symbols.as_bytes()
    }

    /// Returns the re-validated sub-sequence covering `range`.
    ///
    /// The range must be non-empty. Bounds past the end are clamped to the
    /// sequence length, so a range starting at or after the end yields an
    /// empty slice and fails validation with `EmptyInput`.
    pub fn subsequence(&self, range: Range<usize>) -> SequenceResult<Sequence> {
        if range.start >= range.end {
            return Err(SequenceError::InvalidArgument(format!(
                "range {}..{} is empty",
                range.start, range.end
            )));
        }
        let end = range.end.min(self.len());
        let start = range.start.min(end);
        Sequence::new(&self.symbols[start..end], self.kind, self.label.clone())
    }

    /// Multi-line summary of label, symbols and kind.
    pub fn info(&self) -> String {
        format!(
            "[Label]: {}\n[Sequence]: {}\n[Type]: {}",
            self.label, self.symbols, self.kind
        )
    }

    /// Counts the occurrences of each symbol present in the sequence.
    pub fn composition(&self) -> BTreeMap<char, usize> {
        let mut counts = BTreeMap::new();
        for c in self.symbols.chars() {
            *counts.entry(c).or_insert(0) += 1;
        }
        counts
    }

    /// Transcribes DNA into RNA (`T` becomes `U`).
    ///
    /// RNA cannot be transcribed again and yields `UnsupportedOperation`.
    pub fn transcribe(&self) -> SequenceResult<Sequence> {
        match self.kind {
            SequenceKind::Dna => Ok(Sequence::from_validated(
                self.symbols.replace('T', "U"),
                SequenceKind::Rna,
                &self.label,
            )),
            SequenceKind::Rna => Err(SequenceError::UnsupportedOperation {
                operation: "transcribe",
                kind: self.kind,
            }),
        }
    }

    /// Returns the reverse complement, of the same kind and label.
    pub fn reverse_complement(&self) -> Sequence {
        let kind = self.kind;
        let symbols: String = self
            .as_bytes()
            .iter()
            .rev()
            // Symbols are validated, the fallback is never taken.
            .map(|&b| kind.complement(b).unwrap_or(b) as char)
            .collect();
        Sequence::from_validated(symbols, kind, &self.label)
    }

    /// GC content of the whole sequence as a rounded percentage.
    pub fn gc_content(&self) -> SequenceResult<u8> {
        gc_percent(self.as_bytes())
    }

    /// GC content of consecutive, non-overlapping windows of `window_size`
    /// symbols. A trailing window shorter than `window_size` is dropped.
    pub fn gc_content_windows(&self, window_size: usize) -> SequenceResult<Vec<u8>> {
        if window_size == 0 {
            return Err(SequenceError::InvalidArgument(
                "window size must be at least 1".into(),
            ));
        }
        let remainder = self.len() % window_size;
        if remainder != 0 {
            warn!(
                "{}: dropping trailing {} symbol(s) shorter than window size {}",
                self.label, remainder, window_size
            );
        }
        self.as_bytes()
            .chunks_exact(window_size)
            .map(gc_percent)
            .collect()
    }
}

impl fmt::Display for Sequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.symbols)
    }
}

/// Percentage of `C`/`G` symbols, rounded half-up to the nearest integer.
pub fn gc_percent(symbols: &[u8]) -> SequenceResult<u8> {
    if symbols.is_empty() {
        return Err(SequenceError::EmptySequence);
    }
    let gc = symbols.iter().filter(|&&b| b == b'C' || b == b'G').count();
    let len = symbols.len();
    // round(100 * gc / len) with .5 rounded up, in integer arithmetic
    let percent = (200 * gc + len) / (2 * len);
    Ok(percent as u8)
}
