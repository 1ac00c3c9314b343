//! Histogram-binning detection.
//!
//! The value range is split into `bins` equal-width bins; every record in
//! a bin occupied by fewer than `bins` records is flagged. The bin count
//! doubling as the minimum-occupancy threshold is inherited behavior and
//! kept as-is.

use polars::prelude::{NamedFrom, Series};

use crate::columns;
use crate::dataset::SeriesDataset;
use crate::error::DetectError;

use super::Detector;

/// Outlier detection via sparsely occupied histogram bins.
#[derive(Debug, Clone)]
pub struct Histogram {
    data: SeriesDataset,
    bins: usize,
    counts: Option<Vec<u64>>,
    edges: Option<Vec<f64>>,
}

impl Histogram {
    /// Number of equal-width bins, and simultaneously the occupancy below
    /// which a bin counts as rare.
    pub const DEFAULT_BINS: usize = 10;

    /// Detector with the default bin count.
    pub fn new(values: Vec<f64>) -> Result<Self, DetectError> {
        Self::with_bins(values, Self::DEFAULT_BINS)
    }

    /// Detector with an explicit bin count.
    pub fn with_bins(values: Vec<f64>, bins: usize) -> Result<Self, DetectError> {
        Ok(Self {
            data: SeriesDataset::numeric(values)?,
            bins,
            counts: None,
            edges: None,
        })
    }

    /// The configured bin count.
    pub fn bins(&self) -> usize {
        self.bins
    }

    /// Occupancy per bin; `None` before detection.
    pub fn bin_counts(&self) -> Option<&[u64]> {
        self.counts.as_deref()
    }

    /// The `bins + 1` bin edges; `None` before detection.
    pub fn bin_edges(&self) -> Option<&[f64]> {
        self.edges.as_deref()
    }

    /// The owned dataset, with a `bin` index column after detection.
    pub fn dataset(&self) -> &SeriesDataset {
        &self.data
    }
}

impl Detector for Histogram {
    type Partition = Series;

    fn detect(&mut self) -> Result<(), DetectError> {
        let values = self.data.values()?;
        let n = values.len();

        if self.bins == 0 || n == 0 {
            // No bin can hold anything; nothing to flag.
            self.counts = Some(Vec::new());
            self.edges = Some(Vec::new());
            self.data
                .set_series(Series::new(columns::BIN.into(), vec![0u32; n]))?;
            self.data.set_flags(vec![false; n])?;
            return Ok(());
        }

        let min = values.iter().copied().fold(f64::INFINITY, f64::min);
        let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let width = (max - min) / self.bins as f64;

        let indices: Vec<u32> = values
            .iter()
            .map(|x| {
                if width > 0.0 {
                    (((x - min) / width) as usize).min(self.bins - 1) as u32
                } else {
                    0
                }
            })
            .collect();

        let mut counts = vec![0u64; self.bins];
        for &idx in &indices {
            counts[idx as usize] += 1;
        }
        let edges: Vec<f64> = (0..=self.bins).map(|i| min + i as f64 * width).collect();

        let rarity = self.bins as u64;
        let flags: Vec<bool> = indices
            .iter()
            .map(|&idx| counts[idx as usize] < rarity)
            .collect();
        let outliers = flags.iter().filter(|&&f| f).count();

        self.counts = Some(counts);
        self.edges = Some(edges);
        self.data
            .set_series(Series::new(columns::BIN.into(), indices))?;
        self.data.set_flags(flags)?;

        tracing::debug!(
            bins = self.bins,
            outliers,
            records = n,
            "histogram detection finished"
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
