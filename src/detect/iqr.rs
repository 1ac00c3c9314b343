//! Interquartile-range detection (Tukey fences).
//!
//! Values at or beyond `Q1 - threshold * (Q3 - Q1)` and
//! `Q3 + threshold * (Q3 - Q1)` are flagged. Both fences are inclusive.

use polars::prelude::Series;

use crate::dataset::SeriesDataset;
use crate::error::DetectError;
use crate::stats;

use super::Detector;

/// Outlier detection via the interquartile range.
#[derive(Debug, Clone)]
pub struct Iqr {
    data: SeriesDataset,
    threshold: f64,
    lower_limit: Option<f64>,
    upper_limit: Option<f64>,
}

impl Iqr {
    /// Fence multiplier; the classic Tukey value is 1.5, 2.2 is the more
    /// conservative variant used here by default.
    pub const DEFAULT_THRESHOLD: f64 = 2.2;

    /// Detector with the default fence multiplier.
    pub fn new(values: Vec<f64>) -> Result<Self, DetectError> {
        Self::with_threshold(values, Self::DEFAULT_THRESHOLD)
    }

    /// Detector with an explicit fence multiplier.
    pub fn with_threshold(values: Vec<f64>, threshold: f64) -> Result<Self, DetectError> {
        Ok(Self {
            data: SeriesDataset::numeric(values)?,
            threshold,
            lower_limit: None,
            upper_limit: None,
        })
    }

    /// The configured fence multiplier.
    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Lower fence; `None` before detection.
    pub fn lower_limit(&self) -> Option<f64> {
        self.lower_limit
    }

    /// Upper fence; `None` before detection.
    pub fn upper_limit(&self) -> Option<f64> {
        self.upper_limit
    }

    /// The owned dataset.
    pub fn dataset(&self) -> &SeriesDataset {
        &self.data
    }
}

impl Detector for Iqr {
    type Partition = Series;

    fn detect(&mut self) -> Result<(), DetectError> {
        let values = self.data.values()?;

        let q1 = stats::quantile(&values, 0.25);
        let q3 = stats::quantile(&values, 0.75);
        let span = q3 - q1;

        let lower = q1 - self.threshold * span;
        let upper = q3 + self.threshold * span;
        self.lower_limit = Some(lower);
        self.upper_limit = Some(upper);

        let flags: Vec<bool> = values.iter().map(|x| *x >= upper || *x <= lower).collect();
        let outliers = flags.iter().filter(|&&f| f).count();
        let records = flags.len();
        self.data.set_flags(flags)?;

        tracing::debug!(
            threshold = self.threshold,
            lower,
            upper,
            outliers,
            records,
            "IQR detection finished"
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
