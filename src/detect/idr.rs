//! Interdecile-range detection.
//!
//! The span is the distance between the 10th and 90th percentiles, a
//! wider and more sensitive base than the IQR. The fences shift the
//! quartiles by that span: `Q1 - threshold * (D9 - D1)` and
//! `Q3 + threshold * (D9 - D1)`, both inclusive.

use polars::prelude::Series;

use crate::dataset::SeriesDataset;
use crate::error::DetectError;
use crate::stats;

use super::Detector;

/// Outlier detection via the interdecile range.
#[derive(Debug, Clone)]
pub struct Idr {
    data: SeriesDataset,
    threshold: f64,
    lower_limit: Option<f64>,
    upper_limit: Option<f64>,
}

impl Idr {
    /// Span multiplier for the fences.
    pub const DEFAULT_THRESHOLD: f64 = 1.0;

    /// Detector with the default span multiplier.
    pub fn new(values: Vec<f64>) -> Result<Self, DetectError> {
        Self::with_threshold(values, Self::DEFAULT_THRESHOLD)
    }

    /// Detector with an explicit span multiplier.
    pub fn with_threshold(values: Vec<f64>, threshold: f64) -> Result<Self, DetectError> {
        Ok(Self {
            data: SeriesDataset::numeric(values)?,
            threshold,
            lower_limit: None,
            upper_limit: None,
        })
    }

    /// The configured span multiplier.
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

impl Detector for Idr {
    type Partition = Series;

    fn detect(&mut self) -> Result<(), DetectError> {
        let values = self.data.values()?;

        let d1 = stats::quantile(&values, 0.1);
        let d9 = stats::quantile(&values, 0.9);
        let q1 = stats::quantile(&values, 0.25);
        let q3 = stats::quantile(&values, 0.75);
        let span = d9 - d1;

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
            "IDR detection finished"
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
