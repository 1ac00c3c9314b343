//! Detector family: one computation pass over an owned dataset, then the
//! outlier / non-outlier partitions.

pub mod categorical;
pub mod categorical_pair;
pub mod histogram;
pub mod idr;
pub mod iqr;
pub mod kde;
pub mod knn;
pub mod mad;
pub mod multivariate;
pub mod z_score;

pub use categorical::{CategoryMass, CumulativeMass};
pub use categorical_pair::{MarginalPair, PairTables};
pub use histogram::Histogram;
pub use idr::Idr;
pub use iqr::Iqr;
pub use kde::Kde;
pub use knn::Knn;
pub use mad::Mad;
pub use multivariate::MadSum;
pub use z_score::ZScore;

use crate::error::DetectError;

/// Common capability set of every detector.
///
/// A detector owns its dataset. [`detect`](Detector::detect) runs the full
/// batch computation, writing derived columns and the flag column; it is
/// idempotent and must run before either partition accessor. The partition
/// type depends on the dataset shape: a polars `Series` for single-column
/// detectors, a `DataFrame` for paired and full-table detectors.
pub trait Detector {
    /// What a partition of the records looks like for this detector.
    type Partition;

    /// Compute derived columns and outlier flags in place.
    fn detect(&mut self) -> Result<(), DetectError>;

    /// The flagged records, in original order.
    fn outliers(&self) -> Result<Self::Partition, DetectError>;

    /// The unflagged records, in original order.
    fn without_outliers(&self) -> Result<Self::Partition, DetectError>;
}
