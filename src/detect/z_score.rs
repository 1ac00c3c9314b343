//! Z-score detection: how many sample standard deviations a value sits
//! from the mean. Values with `|z| >= threshold` are flagged.
//!
//! Zero-variance data yields non-finite scores; those compare false
//! against the threshold, so nothing is flagged.

use polars::prelude::Series;

use crate::columns;
use crate::dataset::SeriesDataset;
use crate::error::DetectError;
use crate::stats;

use super::Detector;

/// Outlier detection via the z-score of each record.
#[derive(Debug, Clone)]
pub struct ZScore {
    data: SeriesDataset,
    threshold: f64,
}

impl ZScore {
    /// Common criterion: three standard deviations from the mean.
    pub const DEFAULT_THRESHOLD: f64 = 3.0;

    /// Detector with the default threshold.
    pub fn new(values: Vec<f64>) -> Result<Self, DetectError> {
        Self::with_threshold(values, Self::DEFAULT_THRESHOLD)
    }

    /// Detector with an explicit threshold. The value is taken as-is; a
    /// non-positive threshold simply flags everything with a finite score.
    pub fn with_threshold(values: Vec<f64>, threshold: f64) -> Result<Self, DetectError> {
        Ok(Self {
            data: SeriesDataset::numeric(values)?,
            threshold,
        })
    }

    /// The configured threshold.
    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// The owned dataset, with `mean`, `std_dev` and `z_score` columns
    /// after detection.
    pub fn dataset(&self) -> &SeriesDataset {
        &self.data
    }
}

impl Detector for ZScore {
    type Partition = Series;

    fn detect(&mut self) -> Result<(), DetectError> {
        let values = self.data.values()?;
        let n = values.len();
        let m = stats::mean(&values);
        let sd = stats::sample_std_dev(&values);

        let scores: Vec<f64> = values.iter().map(|x| (x - m) / sd).collect();
        let flags: Vec<bool> = scores
            .iter()
            .map(|z| *z >= self.threshold || *z <= -self.threshold)
            .collect();
        let outliers = flags.iter().filter(|&&f| f).count();

        self.data.set_column(columns::MEAN, vec![m; n])?;
        self.data.set_column(columns::STD_DEV, vec![sd; n])?;
        self.data.set_column(columns::Z_SCORE, scores)?;
        self.data.set_flags(flags)?;

        tracing::debug!(
            threshold = self.threshold,
            outliers,
            records = n,
            "z-score detection finished"
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
