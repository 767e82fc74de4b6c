//! Protein extraction from reading frames.
//!
//! A protein candidate starts at a methionine (`M`) and ends at the next
//! stop (`_`) in the same frame. Every `M` opens a new candidate, so an `M`
//! inside an open candidate yields a second, shorter, nested one that closes
//! on the same stop:
//!
//! ```text
//! frame:      A M K M L _
//! candidates: MKML, ML
//! ```
//!
//! Candidates still open when the frame ends have no stop codon and are
//! discarded.

use log::debug;

use crate::error::SequenceResult;
use crate::genetic_code::{START, STOP};
use crate::model::Sequence;
use crate::translation::six_frames;

/// Scan state over one reading frame.
///
/// Open candidates are owned buffers indexed by opening order; a symbol is
/// appended to each of them in turn.
#[derive(Debug, Default)]
pub struct ProteinScanner {
    /// Candidates opened by an `M` and not yet closed
    open: Vec<String>,
    /// Candidates closed by a stop, in closing order
    completed: Vec<String>,
}

impl ProteinScanner {
    /// Creates a scanner with no open candidate.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of candidates currently open.
    pub fn open_count(&self) -> usize {
        self.open.len()
    }

    /// Feeds one amino-acid symbol.
    pub fn push(&mut self, residue: char) {
        match residue {
            STOP => {
                // Emitted in opening order
                self.completed.append(&mut self.open);
            }
            _ => {
                if residue == START {
                    self.open.push(String::new());
                }
                for protein in &mut self.open {
                    protein.push(residue);
                }
            }
        }
    }

    /// Ends the scan and returns the completed candidates.
    pub fn finish(self) -> Vec<String> {
        if !self.open.is_empty() {
            debug!(
                "discarding {} candidate(s) without a stop codon",
                self.open.len()
            );
        }
        self.completed
    }
}

/// Extracts the protein candidates of one reading frame, in closing order.
pub fn extract_frame(frame: &str) -> Vec<String> {
    let mut scanner = ProteinScanner::new();
    for residue in frame.chars() {
        scanner.push(residue);
    }
    scanner.finish()
}

/// Options for [`extract_all`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ExtractOptions {
    /// Start of the restricted range (inclusive)
    pub range_start: usize,
    /// End of the restricted range (exclusive); the range is only used when
    /// `range_end > range_start`
    pub range_end: usize,
    /// Sort candidates by descending length
    pub ordered: bool,
}

impl ExtractOptions {
    /// Restricts extraction to `start..end`.
    pub fn with_range(mut self, start: usize, end: usize) -> Self {
        self.range_start = start;
        self.range_end = end;
        self
    }

    /// Sorts candidates by descending length.
    pub fn ordered(mut self, ordered: bool) -> Self {
        self.ordered = ordered;
        self
    }

    /// True if a sub-range was requested.
    pub fn has_range(&self) -> bool {
        self.range_end > self.range_start
    }
}

/// Extracts the protein candidates of all six reading frames.
///
/// Frames are scanned in the order of [`six_frames`] and their candidates
/// concatenated. With `ordered`, the list is then stably sorted by
/// descending length, so equal lengths keep frame-then-position order.
pub fn extract_all(sequence: &Sequence, options: &ExtractOptions) -> SequenceResult<Vec<String>> {
    let frames = if options.has_range() {
        let sub = sequence.subsequence(options.range_start..options.range_end)?;
        six_frames(&sub)?
    } else {
        six_frames(sequence)?
    };

    let mut proteins: Vec<String> = frames
        .iter()
        .flat_map(|frame| extract_frame(frame.as_str()))
        .collect();

    if options.ordered {
        proteins.sort_by(|a, b| b.len().cmp(&a.len()));
    }

    debug!(
        "{}: extracted {} protein candidate(s)",
        sequence.label(),
        proteins.len()
    );
    Ok(proteins)
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;
    use crate::error::SequenceError;
    use crate::model::SequenceKind;

    const SAMPLE: &str = "TTGTCAGTATTTGACCATCCCTTTACCATGGATGGCGAAAAATAAAGCAG";

    #[test]
    fn test_single_protein() {
        assert_eq!(extract_frame("AMKL_P"), vec!["MKL"]);
    }

    #[test]
    fn test_nested_starts() {
        assert_eq!(extract_frame("AMKML_"), vec!["MKML", "ML"]);
        assert_eq!(extract_frame("MMM_"), vec!["MMM", "MM", "M"]);
    }

    #[test]
    fn test_symbols_before_start_ignored() {
        assert_eq!(extract_frame("KLV_"), Vec::<String>::new());
        assert_eq!(extract_frame("_KLMV_"), vec!["MV"]);
    }

    #[test]
    fn test_stop_without_open_candidate() {
        assert_eq!(extract_frame("__M_"), vec!["M"]);
        assert!(extract_frame("").is_empty());
    }

    #[test]
    fn test_consecutive_proteins() {
        assert_eq!(extract_frame("MA_MB_KMC_"), vec!["MA", "MB", "MC"]);
    }

    #[test]
    fn test_unterminated_candidates_discarded() {
        assert!(extract_frame("MKLV").is_empty());
        // The closed candidate survives, the trailing open one does not
        assert_eq!(extract_frame("MK_MLV"), vec!["MK"]);
    }

    #[test]
    fn test_scanner_state() {
        let mut scanner = ProteinScanner::new();
        for residue in "AMKM".chars() {
            scanner.push(residue);
        }
        assert_eq!(scanner.open_count(), 2);
        scanner.push('_');
        assert_eq!(scanner.open_count(), 0);
        scanner.push('M');
        assert_eq!(scanner.open_count(), 1);
        assert_eq!(scanner.finish(), vec!["MKM", "M"]);
    }

    #[test]
    fn test_extract_all_sample() {
        let seq = Sequence::dna(SAMPLE).unwrap();
        let proteins = extract_all(&seq, &ExtractOptions::default()).unwrap();
        // +1: ...TMDGEK_S, -3: ...GKGMVKY_Q
        assert_eq!(proteins, vec!["MDGEK", "MVKY"]);
    }

    #[test]
    fn test_extract_all_frame_order() {
        // Reverse complement is ATGCCCTAATTATTTCAT
        let seq = Sequence::dna("ATGAAATAATTAGGGCAT").unwrap();
        let proteins = extract_all(&seq, &ExtractOptions::default()).unwrap();
        // +1: MK_LGH, -1: MP_LFH
        assert_eq!(proteins, vec!["MK", "MP"]);
    }

    #[test]
    fn test_extract_all_with_range() {
        let seq = Sequence::dna("CCCATGAAATAACCC").unwrap();
        let whole = extract_all(&seq, &ExtractOptions::default()).unwrap();
        assert_eq!(whole, vec!["MK"]);

        let inside = ExtractOptions::default().with_range(3, 12);
        assert_eq!(extract_all(&seq, &inside).unwrap(), vec!["MK"]);

        // Cutting the stop codon leaves nothing
        let cut = ExtractOptions::default().with_range(3, 11);
        assert!(extract_all(&seq, &cut).unwrap().is_empty());

        // end <= start means the whole sequence
        let ignored = ExtractOptions::default().with_range(9, 3);
        assert!(!ignored.has_range());
        assert_eq!(extract_all(&seq, &ignored).unwrap(), whole);
    }

    #[test]
    fn test_extract_all_range_past_end_is_clamped() {
        let seq = Sequence::dna("CCCATGAAATAACCC").unwrap();
        let past_end = ExtractOptions::default().with_range(3, 40);
        let to_end = ExtractOptions::default().with_range(3, 15);
        assert_eq!(extract_all(&seq, &past_end).unwrap(), vec!["MK"]);
        assert_eq!(
            extract_all(&seq, &past_end).unwrap(),
            extract_all(&seq, &to_end).unwrap()
        );

        // A start at or past the end leaves an empty, invalid sub-sequence
        let beyond = ExtractOptions::default().with_range(15, 40);
        let err = extract_all(&seq, &beyond).unwrap_err();
        assert_eq!(err, SequenceError::EmptyInput(SequenceKind::Dna));
    }

    #[test]
    fn test_ordered_is_stable() {
        // +1: MA_MNNN_MC_, no other frame has a terminated candidate
        let seq = Sequence::dna("ATGGCTTAAATGAATAATAATTAGATGTGCTGA").unwrap();
        let unordered = extract_all(&seq, &ExtractOptions::default()).unwrap();
        assert_eq!(unordered, vec!["MA", "MNNN", "MC"]);

        let by_length = ExtractOptions::default().ordered(true);
        let ordered = extract_all(&seq, &by_length).unwrap();
        assert_eq!(ordered, vec!["MNNN", "MA", "MC"]);
    }

    #[test]
    fn test_ordered_non_increasing() {
        let mut rng = StdRng::seed_from_u64(2024);
        let by_length = ExtractOptions::default().ordered(true);
        for _ in 0..20 {
            let seq = Sequence::random(SequenceKind::Dna, 600, &mut rng).unwrap();
            let unordered = extract_all(&seq, &ExtractOptions::default()).unwrap();
            let ordered = extract_all(&seq, &by_length).unwrap();
            assert_eq!(ordered.len(), unordered.len());
            assert!(ordered.windows(2).all(|w| w[0].len() >= w[1].len()));
            for protein in &ordered {
                assert!(protein.starts_with(START));
                assert!(!protein.contains(STOP));
            }
        }
    }
}
