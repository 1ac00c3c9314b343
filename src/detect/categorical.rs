//! Cumulative-mass detection over one categorical column.
//!
//! Categories are ranked ascending by occurrence count; each position in
//! that ranking carries the cumulative fraction of all records up to and
//! including it. Categories whose cumulative fraction stays below the
//! threshold are flagged, and every record of a flagged category is an
//! outlier — whole categories are removed, never single records.
//!
//! Equal-count categories are ordered by label so the ranking (and with
//! it the flag set) is deterministic.

use std::collections::BTreeMap;

use polars::prelude::Series;

use crate::columns;
use crate::dataset::SeriesDataset;
use crate::error::DetectError;

use super::Detector;

/// One row of the ascending frequency ranking.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryMass {
    /// Category label.
    pub label: String,
    /// Number of records with this label.
    pub count: u64,
    /// Cumulative fraction of records at this ranking position.
    pub cumulative: f64,
}

/// Outlier detection via the cumulative mass of rare categories.
#[derive(Debug, Clone)]
pub struct CumulativeMass {
    data: SeriesDataset,
    threshold: f64,
    ranking: Option<Vec<CategoryMass>>,
}

impl CumulativeMass {
    /// Cumulative-fraction cutoff below which a category is rare.
    pub const DEFAULT_THRESHOLD: f64 = 0.05;

    /// Detector with the default cutoff.
    pub fn new(values: Vec<String>) -> Result<Self, DetectError> {
        Self::with_threshold(values, Self::DEFAULT_THRESHOLD)
    }

    /// Detector with an explicit cutoff.
    pub fn with_threshold(values: Vec<String>, threshold: f64) -> Result<Self, DetectError> {
        Ok(Self {
            data: SeriesDataset::categorical(values)?,
            threshold,
            ranking: None,
        })
    }

    /// The configured cutoff.
    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// The ascending frequency ranking; `None` before detection.
    pub fn ranking(&self) -> Option<&[CategoryMass]> {
        self.ranking.as_deref()
    }

    /// The owned dataset, with a `cum_sum` column after detection.
    pub fn dataset(&self) -> &SeriesDataset {
        &self.data
    }
}

impl Detector for CumulativeMass {
    type Partition = Series;

    fn detect(&mut self) -> Result<(), DetectError> {
        let labels = self.data.labels()?;
        let n = labels.len();

        let mut counts: BTreeMap<&str, u64> = BTreeMap::new();
        for label in &labels {
            *counts.entry(label.as_str()).or_insert(0) += 1;
        }

        let mut ranked: Vec<(String, u64)> = counts
            .into_iter()
            .map(|(label, count)| (label.to_string(), count))
            .collect();
        ranked.sort_by(|a, b| a.1.cmp(&b.1).then_with(|| a.0.cmp(&b.0)));

        let mut running = 0u64;
        let mut ranking = Vec::with_capacity(ranked.len());
        let mut cumulative_by_label: BTreeMap<String, f64> = BTreeMap::new();
        for (label, count) in ranked {
            running += count;
            let cumulative = running as f64 / n as f64;
            cumulative_by_label.insert(label.clone(), cumulative);
            ranking.push(CategoryMass {
                label,
                count,
                cumulative,
            });
        }

        let fractions: Vec<f64> = labels
            .iter()
            .map(|label| cumulative_by_label[label])
            .collect();
        let flags: Vec<bool> = fractions.iter().map(|c| *c < self.threshold).collect();
        let outliers = flags.iter().filter(|&&f| f).count();

        self.data.set_column(columns::CUM_SUM, fractions)?;
        self.data.set_flags(flags)?;
        self.ranking = Some(ranking);

        tracing::debug!(
            threshold = self.threshold,
            outliers,
            records = n,
            "cumulative-mass detection finished"
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
