//! Median-absolute-deviation detection.
//!
//! Each record's score is its absolute deviation from the median, divided
//! by the median of all absolute deviations. Scores at or above the
//! threshold are flagged.
//!
//! When more than half the values equal the median, the median absolute
//! deviation is zero and scores come out `NaN` or `+inf`. No policy is
//! imposed at this layer; the multivariate aggregator sanitizes those
//! values explicitly before combining columns.

use polars::prelude::Series;

use crate::columns;
use crate::dataset::SeriesDataset;
use crate::error::DetectError;
use crate::stats;

use super::Detector;

/// Outlier detection via the median absolute deviation.
#[derive(Debug, Clone)]
pub struct Mad {
    data: SeriesDataset,
    threshold: f64,
}

impl Mad {
    /// Score cutoff; 3.5 is another common choice.
    pub const DEFAULT_THRESHOLD: f64 = 4.0;

    /// Detector with the default score cutoff.
    pub fn new(values: Vec<f64>) -> Result<Self, DetectError> {
        Self::with_threshold(values, Self::DEFAULT_THRESHOLD)
    }

    /// Detector with an explicit score cutoff.
    pub fn with_threshold(values: Vec<f64>, threshold: f64) -> Result<Self, DetectError> {
        Ok(Self {
            data: SeriesDataset::numeric(values)?,
            threshold,
        })
    }

    /// The configured score cutoff.
    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// The owned dataset, with `median`, `abs_diff`, `median_abs_diff`
    /// and `mad` columns after detection.
    pub fn dataset(&self) -> &SeriesDataset {
        &self.data
    }

    /// The per-record MAD scores, in record order. State error before
    /// detection. Used by the multivariate aggregator.
    pub fn scores(&self) -> Result<Vec<f64>, DetectError> {
        if !self.data.is_computed() {
            return Err(DetectError::NotComputed);
        }
        self.data.numeric_column(columns::MAD)
    }
}

impl Detector for Mad {
    type Partition = Series;

    fn detect(&mut self) -> Result<(), DetectError> {
        let values = self.data.values()?;
        let n = values.len();

        let med = stats::median(&values);
        let deviations = stats::abs_diff(&values, med);
        let med_abs_diff = stats::median(&deviations);
        let scores: Vec<f64> = deviations.iter().map(|d| d / med_abs_diff).collect();

        let flags: Vec<bool> = scores.iter().map(|s| *s >= self.threshold).collect();
        let outliers = flags.iter().filter(|&&f| f).count();

        self.data.set_column(columns::MEDIAN, vec![med; n])?;
        self.data.set_column(columns::ABS_DIFF, deviations)?;
        self.data
            .set_column(columns::MEDIAN_ABS_DIFF, vec![med_abs_diff; n])?;
        self.data.set_column(columns::MAD, scores)?;
        self.data.set_flags(flags)?;

        tracing::debug!(
            threshold = self.threshold,
            outliers,
            records = n,
            "MAD detection finished"
        );
        Ok(())
    }

    fn outliers(&self) -> Result<Series, DetectError> {
        self.data.outliers()
    }

    fn without_outliers(&self) -> Result<Series, DetectError> {
        self.data.without_outliers()
    }
}
