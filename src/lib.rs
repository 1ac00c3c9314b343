//! Outly: outlier detection for tabular data.
//!
//! A library of batch outlier-detection routines over single columns,
//! category pairs and full numeric tables. Each detector owns its data as
//! a polars `DataFrame`, computes derived score columns plus a Boolean
//! `is_outlier` column in one `detect()` pass, and then partitions the
//! records into [`outliers`](detect::Detector::outliers) and
//! [`without_outliers`](detect::Detector::without_outliers) in original
//! order. Derived columns stay on the dataset for downstream
//! visualization.
//!
//! ```no_run
//! use outly::{Detector, Iqr};
//!
//! # fn main() -> Result<(), outly::DetectError> {
//! let mut iqr = Iqr::new(vec![1.0, 2.0, 3.0, 4.0, 100.0])?;
//! iqr.detect()?;
//! let flagged = iqr.outliers()?;
//! assert_eq!(flagged.len(), 1);
//! # Ok(())
//! # }
//! ```

pub mod columns;
pub mod dataset;
pub mod detect;
pub mod error;
pub mod ingest;
pub mod report;
pub mod stats;

pub use dataset::{PairedDataset, SeriesDataset, TableDataset};
pub use detect::{
    CumulativeMass, Detector, Histogram, Idr, Iqr, Kde, Knn, Mad, MadSum, MarginalPair, ZScore,
};
pub use error::DetectError;
pub use report::DetectionSummary;
