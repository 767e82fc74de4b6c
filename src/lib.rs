//! # nucleic - DNA/RNA sequence toolkit
//!
//! Derives the standard transformations of a single nucleotide sequence:
//! composition, transcription, reverse complement, GC content and windows,
//! six-frame translation and protein extraction from open reading frames.
//!
//! ## Architecture
//!
//! - `model`: validated `Sequence` type and the simple transforms
//! - `genetic_code`: codon tables shared process-wide
//! - `translation`: single-frame and six-frame translation, codon usage
//! - `protein`: protein candidates bounded by `M` and `_`
//! - `kmer`: k-mer counting
//! - `formats`: FASTA and plain-text readers/writers
//! - `report`: whole-sequence analysis for the command line
//!
//! ## Example
//!
//! ```
//! use nucleic::model::Sequence;
//! use nucleic::protein::{extract_all, ExtractOptions};
//!
//! let seq = Sequence::dna("CCCATGAAATAACCC").unwrap();
//! let proteins = extract_all(&seq, &ExtractOptions::default()).unwrap();
//! assert_eq!(proteins, vec!["MK"]);
//! ```

pub mod error;
pub mod formats;
pub mod genetic_code;
pub mod kmer;
pub mod model;
pub mod protein;
pub mod report;
pub mod translation;

pub use error::{SequenceError, SequenceResult};
pub use model::{Sequence, SequenceKind};
