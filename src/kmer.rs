//! k-mer counting over a single sequence.

use std::collections::HashMap;

use crate::error::{SequenceError, SequenceResult};
use crate::model::Sequence;

/// Counts the occurrences of `kmer` in `sequence`, overlaps included.
///
/// The k-mer is compared case-insensitively.
pub fn count_kmer(sequence: &Sequence, kmer: &str) -> SequenceResult<usize> {
    if kmer.is_empty() {
        return Err(SequenceError::InvalidArgument(
            "k-mer must not be empty".into(),
        ));
    }
    let kmer = kmer.to_ascii_uppercase();
    Ok(sequence
        .as_bytes()
        .windows(kmer.len())
        .filter(|window| *window == kmer.as_bytes())
        .count())
}

/// Returns every k-mer of length `k` that reaches the highest count.
///
/// Ties are listed in order of first occurrence.
pub fn most_frequent_kmers(sequence: &Sequence, k: usize) -> SequenceResult<Vec<String>> {
    if k == 0 || k > sequence.len() {
        return Err(SequenceError::InvalidArgument(format!(
            "k-mer size must be in 1..={} (got {})",
            sequence.len(),
            k
        )));
    }

    let mut counts: HashMap<&[u8], usize> = HashMap::new();
    let mut first_seen: Vec<&[u8]> = Vec::new();
    for window in sequence.as_bytes().windows(k) {
        let count = counts.entry(window).or_insert(0);
        if *count == 0 {
            first_seen.push(window);
        }
        *count += 1;
    }

    let highest = counts.values().copied().max().unwrap_or(0);
    Ok(first_seen
        .into_iter()
        .filter(|kmer| counts[kmer] == highest)
        .map(|kmer| String::from_utf8_lossy(kmer).into_owned())
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_count_overlapping() {
        let seq = Sequence::dna("AAAA").unwrap();
        assert_eq!(count_kmer(&seq, "AA"), Ok(3));
        assert_eq!(count_kmer(&seq, "aaa"), Ok(2));
        assert_eq!(count_kmer(&seq, "AAAAA"), Ok(0));
    }

    #[test]
    fn test_count_kmer() {
        let seq = Sequence::dna("ATGATCAAGATG").unwrap();
        assert_eq!(count_kmer(&seq, "ATG"), Ok(2));
        assert_eq!(count_kmer(&seq, "ATGATCAAGATG"), Ok(1));
        assert_eq!(count_kmer(&seq, "GGG"), Ok(0));
        assert!(count_kmer(&seq, "").is_err());
    }

    #[test]
    fn test_most_frequent_kmers() {
        let seq = Sequence::dna("ACGTTGCATGTCGCATGATGCATGAGAGCT").unwrap();
        assert_eq!(most_frequent_kmers(&seq, 4).unwrap(), vec!["GCAT", "CATG"]);
    }

    #[test]
    fn test_most_frequent_whole_sequence() {
        let seq = Sequence::dna("ACGT").unwrap();
        assert_eq!(most_frequent_kmers(&seq, 4).unwrap(), vec!["ACGT"]);
        // All 1-mers tie
        assert_eq!(
            most_frequent_kmers(&seq, 1).unwrap(),
            vec!["A", "C", "G", "T"]
        );
    }

    #[test]
    fn test_most_frequent_invalid_k() {
        let seq = Sequence::dna("ACGT").unwrap();
        assert!(most_frequent_kmers(&seq, 0).is_err());
        assert!(most_frequent_kmers(&seq, 5).is_err());
    }
}
