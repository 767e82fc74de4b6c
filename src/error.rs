//! Error types for sequence analysis.

use thiserror::Error;

use crate::model::SequenceKind;

/// Errors raised by sequence construction, transforms and translation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SequenceError {
    #[error("Empty {0} sequence")]
    EmptyInput(SequenceKind),

    #[error("Invalid {kind} symbol '{symbol}' at position {position}")]
    InvalidSymbol {
        kind: SequenceKind,
        symbol: char,
        position: usize,
    },

    #[error("Operation '{operation}' is not supported on {kind} sequences")]
    UnsupportedOperation {
        operation: &'static str,
        kind: SequenceKind,
    },

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Invalid {kind} codon '{codon}'")]
    InvalidCodon { kind: SequenceKind, codon: String },

    #[error("Cannot compute GC content of an empty sequence")]
    EmptySequence,
}

impl SequenceError {
    /// True for the errors raised by validated construction.
    pub fn is_invalid_sequence(&self) -> bool {
        matches!(
            self,
            SequenceError::EmptyInput(_) | SequenceError::InvalidSymbol { .. }
        )
    }
}

/// Result type for sequence operations.
pub type SequenceResult<T> = Result<T, SequenceError>;
