//! Crate-wide error type.
//!
//! Every fallible entry point returns `Result<T, SetSimError>`. Validation
//! errors (empty input, out-of-range threshold, unknown similarity function
//! name) are always returned synchronously from a constructor; there are no
//! panics on valid input anywhere in this crate.

use thiserror::Error;

/// Errors produced by the similarity-search core and its flat-file IO layer.
#[derive(Error, Debug)]
pub enum SetSimError {
    /// `sets` was empty at index or self-join construction.
    #[error("input sets must be a non-empty slice")]
    EmptyInput,

    /// A similarity threshold was not in `[0, 1]`.
    #[error("similarity threshold must be in the range [0, 1], got {0}")]
    ThresholdOutOfRange(f64),

    /// The requested similarity function name is not recognized.
    #[error("unknown similarity function: {0:?} (expected \"jaccard\" or \"containment\")")]
    UnknownSimilarityFunction(String),

    /// A non-comment input line did not split into exactly two fields, or an
    /// integer field failed to parse.
    #[error("malformed line {line_no}: {reason}")]
    MalformedLine { line_no: usize, reason: String },

    /// Underlying reader/writer error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV writer error (benchmark output).
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, SetSimError>;
