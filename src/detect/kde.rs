//! Kernel-density detection.
//!
//! A Gaussian kernel density estimate is evaluated at every record's own
//! position; the log-density is the record's score. Flagging is delegated
//! entirely to an owned [`Iqr`] detector over those scores at the IQR
//! default threshold: a record is an outlier iff its log-density is an
//! IQR outlier. The composed instance stays accessible so its fences can
//! be drawn alongside the score distribution.

use polars::prelude::Series;

use crate::columns;
use crate::dataset::SeriesDataset;
use crate::error::DetectError;

use super::{Detector, Iqr};

/// Outlier detection via Gaussian kernel density, fenced by IQR.
#[derive(Debug, Clone)]
pub struct Kde {
    data: SeriesDataset,
    bandwidth: f64,
    iqr: Option<Iqr>,
}

impl Kde {
    /// Smoothing bandwidth of the Gaussian kernel.
    pub const DEFAULT_BANDWIDTH: f64 = 0.2;

    /// Detector with the default bandwidth.
    pub fn new(values: Vec<f64>) -> Result<Self, DetectError> {
        Self::with_bandwidth(values, Self::DEFAULT_BANDWIDTH)
    }

    /// Detector with an explicit bandwidth.
    pub fn with_bandwidth(values: Vec<f64>, bandwidth: f64) -> Result<Self, DetectError> {
        Ok(Self {
            data: SeriesDataset::numeric(values)?,
            bandwidth,
            iqr: None,
        })
    }

    /// The configured bandwidth.
    pub fn bandwidth(&self) -> f64 {
        self.bandwidth
    }

    /// The composed IQR detector over the log-density scores; `None`
    /// before detection.
    pub fn iqr(&self) -> Option<&Iqr> {
        self.iqr.as_ref()
    }

    /// The owned dataset, with a `kde` log-density column after detection.
    pub fn dataset(&self) -> &SeriesDataset {
        &self.data
    }
}

/// Log-density of a Gaussian KDE at each sample's own position, i.e. the
/// log of the mean of normalized kernels centered on every sample.
fn log_density(values: &[f64], bandwidth: f64) -> Vec<f64> {
    let n = values.len() as f64;
    let norm = bandwidth * (2.0 * std::f64::consts::PI).sqrt();
    values
        .iter()
        .map(|&x| {
            let kernel_sum: f64 = values
                .iter()
                .map(|&center| {
                    let d = (x - center) / bandwidth;
                    (-0.5 * d * d).exp()
                })
                .sum();
            (kernel_sum / (n * norm)).ln()
        })
        .collect()
}

impl Detector for Kde {
    type Partition = Series;

    fn detect(&mut self) -> Result<(), DetectError> {
        let values = self.data.values()?;
        let scores = log_density(&values, self.bandwidth);

        let mut iqr = Iqr::new(scores.clone())?;
        iqr.detect()?;
        let flags = iqr.dataset().flags()?;
        let outliers = flags.iter().filter(|&&f| f).count();

        self.data.set_column(columns::KDE, scores)?;
        self.data.set_flags(flags)?;
        self.iqr = Some(iqr);

        tracing::debug!(
            bandwidth = self.bandwidth,
            outliers,
            records = values.len(),
            "KDE detection finished"
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
