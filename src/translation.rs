//! Codon translation and six-frame reading frames.
//!
//! A reading frame is the amino-acid string obtained by walking a strand in
//! non-overlapping codons from an offset of 0, 1 or 2. Trailing symbols that
//! do not fill a codon are not translated.

use std::collections::BTreeMap;
use std::fmt;

use log::debug;

use crate::error::{SequenceError, SequenceResult};
use crate::genetic_code::CodonTable;
use crate::model::Sequence;

/// Strand a reading frame was read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Strand {
    Forward,
    ReverseComplement,
}

impl fmt::Display for Strand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Strand::Forward => write!(f, "+"),
            Strand::ReverseComplement => write!(f, "-"),
        }
    }
}

/// Amino-acid translation of one strand at one offset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReadingFrame {
    /// Strand the codons were read from
    pub strand: Strand,
    /// Offset of the first codon (0, 1 or 2)
    pub offset: usize,
    /// Amino acids, stop codons included as `_`
    residues: String,
}

impl ReadingFrame {
    /// Returns the amino acids as a string slice.
    pub fn as_str(&self) -> &str {
        &self.residues
    }

    /// Returns the number of translated codons.
    pub fn len(&self) -> usize {
        self.residues.len()
    }

    /// Returns true if no full codon fit after the offset.
    pub fn is_empty(&self) -> bool {
        self.residues.is_empty()
    }

    /// Frame name in the usual `+1..+3` / `-1..-3` notation.
    pub fn name(&self) -> String {
        format!("{}{}", self.strand, self.offset + 1)
    }
}

fn check_offset(offset: usize) -> SequenceResult<()> {
    if offset > 2 {
        return Err(SequenceError::InvalidArgument(format!(
            "reading frame offset must be 0, 1 or 2 (got {})",
            offset
        )));
    }
    Ok(())
}

/// Translates `sequence` from `offset` into a forward reading frame.
pub fn translate(sequence: &Sequence, offset: usize) -> SequenceResult<ReadingFrame> {
    translate_strand(sequence, offset, Strand::Forward)
}

/// Number of symbols after `offset` that do not fill a whole codon.
fn trailing_symbols(length: usize, offset: usize) -> usize {
    length.saturating_sub(offset) % 3
}

/// Translates a strand that has already been oriented by the caller.
fn translate_strand(
    sequence: &Sequence,
    offset: usize,
    strand: Strand,
) -> SequenceResult<ReadingFrame> {
    check_offset(offset)?;
    let table = CodonTable::for_kind(sequence.kind());
    let bytes = sequence.as_bytes();
    let start = offset.min(bytes.len());

    let dropped = trailing_symbols(bytes.len(), offset);
    if dropped != 0 {
        debug!(
            "{}: frame {}{} drops {} trailing symbol(s)",
            sequence.label(),
            strand,
            offset + 1,
            dropped
        );
    }

    let residues = bytes[start..]
        .chunks_exact(3)
        .map(|codon| table.translate_codon(codon))
        .collect::<SequenceResult<String>>()?;

    Ok(ReadingFrame {
        strand,
        offset,
        residues,
    })
}

/// Produces the six reading frames of `sequence`.
///
/// Order: forward offsets 0, 1, 2, then reverse-complement offsets 0, 1, 2.
pub fn six_frames(sequence: &Sequence) -> SequenceResult<Vec<ReadingFrame>> {
    let reverse = sequence.reverse_complement();
    let mut frames = Vec::with_capacity(6);

    for (strand, seq) in [
        (Strand::Forward, sequence),
        (Strand::ReverseComplement, &reverse),
    ] {
        for offset in 0..3 {
            frames.push(translate_strand(seq, offset, strand)?);
        }
    }

    debug!(
        "{}: translated six frames of {} symbols",
        sequence.label(),
        sequence.len()
    );
    Ok(frames)
}

/// Relative usage of the codons encoding `amino_acid` in frame 0.
///
/// Returns each codon found for `amino_acid` with its share of all such
/// codons, rounded to two decimals. Codons that do not occur are absent.
pub fn codon_usage(
    sequence: &Sequence,
    amino_acid: char,
) -> SequenceResult<BTreeMap<String, f64>> {
    let table = CodonTable::for_kind(sequence.kind());
    let mut counts: BTreeMap<String, usize> = BTreeMap::new();

    for codon in sequence.as_bytes().chunks_exact(3) {
        if table.translate_codon(codon)? == amino_acid {
            let codon = String::from_utf8_lossy(codon).into_owned();
            *counts.entry(codon).or_insert(0) += 1;
        }
    }

    let total: usize = counts.values().sum();
    Ok(counts
        .into_iter()
        .map(|(codon, count)| {
            let share = count as f64 / total as f64;
            (codon, (share * 100.0).round() / 100.0)
        })
        .collect())
}
