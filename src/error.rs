//! Error types for dataset construction and detection.
//!
//! The taxonomy is deliberately small: shape problems are caught at
//! construction, querying results before `detect()` is a state error, and
//! everything else is a wrapped engine failure. Numeric degeneracy (zero
//! variance, zero MAD) is *not* an error — those scores come out non-finite
//! and flow into the flag comparison.

use polars::prelude::PolarsError;
use thiserror::Error;

/// Errors produced by dataset construction and the detectors.
#[derive(Debug, Error)]
pub enum DetectError {
    /// `outliers()` / `without_outliers()` was called before `detect()`.
    #[error("outlier flags are not available yet; run detect() first")]
    NotComputed,

    /// Paired-column data with sequences of different lengths.
    #[error("paired columns must have equal length (left: {left}, right: {right})")]
    LengthMismatch {
        /// Length of the first sequence.
        left: usize,
        /// Length of the second sequence.
        right: usize,
    },

    /// A full-table dataset contained a column that cannot be scored.
    #[error("column '{column}' is not numeric (found {dtype})")]
    NonNumericColumn {
        /// Name of the offending column.
        column: String,
        /// Data type that was found.
        dtype: String,
    },

    /// A full-table dataset without any columns.
    #[error("table must contain at least one column")]
    EmptyTable,

    /// Too few records for the requested neighbor count.
    #[error("k-nearest-neighbor query with k={k} needs more than k records, got {records}")]
    NotEnoughRecords {
        /// Requested neighbor count.
        k: usize,
        /// Number of records in the dataset.
        records: usize,
    },

    /// Error bubbled up from the DataFrame engine.
    #[error(transparent)]
    Polars(#[from] PolarsError),
}
