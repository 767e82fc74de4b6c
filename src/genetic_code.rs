//! Codon tables and codon translation.
//!
//! This module provides:
//! - The standard codon table for DNA and RNA codons
//! - Codon to amino acid translation with stop codons reported as `_`
//! - Reverse lookup of the codons encoding an amino acid
//!
//! Tables are built once per process and shared read-only afterwards.

use std::collections::HashMap;
use std::sync::OnceLock;

use crate::error::{SequenceError, SequenceResult};
use crate::model::SequenceKind;

/// Symbol emitted for stop codons.
pub const STOP: char = '_';

/// Symbol emitted for the start codon (methionine).
pub const START: char = 'M';

/// NCBI table 1 (Standard), `*` marks stop codons.
const STANDARD_NCBIEAA: &str =
    "FFLLSSSSYY**CC*WLLLLPPPPHHQQRRRRIIIMTTTTNNKKSSRRVVVVAAAADDEEGGGG";

static DNA_TABLE: OnceLock<CodonTable> = OnceLock::new();
static RNA_TABLE: OnceLock<CodonTable> = OnceLock::new();

/// A codon table for one sequence kind.
#[derive(Debug, Clone)]
pub struct CodonTable {
    /// Sequence kind whose alphabet the codons are spelled in
    kind: SequenceKind,
    /// Codon to amino acid mapping (64 entries)
    codon_table: HashMap<[u8; 3], char>,
}

impl CodonTable {
    /// Creates a codon table from an NCBI format string.
    ///
    /// # Arguments
    /// * `kind` - Sequence kind (decides whether the fourth base is `T` or `U`)
    /// * `ncbieaa` - 64-character string of amino acids (NCBI format)
    fn new(kind: SequenceKind, ncbieaa: &str) -> Self {
        let fourth = match kind {
            SequenceKind::Dna => b'T',
            SequenceKind::Rna => b'U',
        };
        let bases = [fourth, b'C', b'A', b'G'];
        let mut codon_table = HashMap::with_capacity(64);

        // NCBI order: TTT, TTC, TTA, TTG, TCT, TCC, ... (Base1, Base2, Base3)
        let mut residues = ncbieaa.chars();
        for &b1 in &bases {
            for &b2 in &bases {
                for &b3 in &bases {
                    let aa = match residues.next() {
                        Some('*') => STOP,
                        Some(aa) => aa,
                        None => 'X',
                    };
                    codon_table.insert([b1, b2, b3], aa);
                }
            }
        }

        Self { kind, codon_table }
    }

    /// Returns the process-wide table for a sequence kind.
    pub fn for_kind(kind: SequenceKind) -> &'static CodonTable {
        match kind {
            SequenceKind::Dna => {
                DNA_TABLE.get_or_init(|| CodonTable::new(SequenceKind::Dna, STANDARD_NCBIEAA))
            }
            SequenceKind::Rna => {
                RNA_TABLE.get_or_init(|| CodonTable::new(SequenceKind::Rna, STANDARD_NCBIEAA))
            }
        }
    }

    /// Sequence kind of this table.
    pub fn kind(&self) -> SequenceKind {
        self.kind
    }

    /// Number of codons in the table.
    pub fn len(&self) -> usize {
        self.codon_table.len()
    }

    /// Returns true if the table has no codons.
    pub fn is_empty(&self) -> bool {
        self.codon_table.is_empty()
    }

    /// Translates a single codon to an amino acid.
    ///
    /// The codon must be exactly three uppercase symbols of this table's
    /// alphabet. Anything else is an `InvalidCodon` error: validated
    /// sequences never produce such codons.
    pub fn translate_codon(&self, codon: &[u8]) -> SequenceResult<char> {
        let key: Option<[u8; 3]> = codon.try_into().ok();
        key.and_then(|key| self.codon_table.get(&key).copied())
            .ok_or_else(|| SequenceError::InvalidCodon {
                kind: self.kind,
                codon: String::from_utf8_lossy(codon).into_owned(),
            })
    }

    /// Returns all codons encoding `amino_acid`, in lexicographic order.
    pub fn codons_for(&self, amino_acid: char) -> Vec<[u8; 3]> {
        let mut codons: Vec<[u8; 3]> = self
            .codon_table
            .iter()
            .filter(|&(_, &aa)| aa == amino_acid)
            .map(|(&codon, _)| codon)
            .collect();
        codons.sort_unstable();
        codons
    }
}
