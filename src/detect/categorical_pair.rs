//! Marginal-probability detection over two categorical columns.
//!
//! A contingency table counts every combination of the two categories,
//! including combinations absent from the data (count zero). Under the
//! independence assumption the expected count of a combination is
//! `rowSum * colSum / N`; the ratio of observed to expected count is its
//! deviation factor (below 1 means under-represented). A combination is
//! an outlier combination iff its count is below `threshold_count` AND
//! its ratio is below `threshold_expectation` — both together, one alone
//! is not enough. All records carrying an outlier combination are
//! flagged; expansion goes through each record's own pair, so no record
//! is duplicated.

use std::collections::{BTreeMap, BTreeSet};

use polars::prelude::DataFrame;

use crate::columns;
use crate::dataset::PairedDataset;
use crate::error::DetectError;

use super::Detector;

/// Contingency, expectation and deviation tables over the observed
/// category labels. Rows index the `data` column's categories, columns
/// the `other` column's.
#[derive(Debug, Clone)]
pub struct PairTables {
    row_labels: Vec<String>,
    col_labels: Vec<String>,
    counts: Vec<u64>,
    expected: Vec<f64>,
    ratios: Vec<f64>,
}

impl PairTables {
    /// Observed categories of the `data` column, sorted.
    pub fn row_labels(&self) -> &[String] {
        &self.row_labels
    }

    /// Observed categories of the `other` column, sorted.
    pub fn col_labels(&self) -> &[String] {
        &self.col_labels
    }

    fn position(&self, row: &str, col: &str) -> Option<usize> {
        let r = self.row_labels.iter().position(|l| l == row)?;
        let c = self.col_labels.iter().position(|l| l == col)?;
        Some(r * self.col_labels.len() + c)
    }

    /// Observed count of a combination; zero-count combinations are
    /// present, unknown labels are `None`.
    pub fn count(&self, row: &str, col: &str) -> Option<u64> {
        self.position(row, col).map(|i| self.counts[i])
    }

    /// Expected count under independence.
    pub fn expected(&self, row: &str, col: &str) -> Option<f64> {
        self.position(row, col).map(|i| self.expected[i])
    }

    /// Deviation factor observed / expected.
    pub fn ratio(&self, row: &str, col: &str) -> Option<f64> {
        self.position(row, col).map(|i| self.ratios[i])
    }
}

/// Outlier detection for category combinations that are both rare and
/// far under their independence expectation.
#[derive(Debug, Clone)]
pub struct MarginalPair {
    data: PairedDataset,
    threshold_count: u64,
    threshold_expectation: f64,
    tables: Option<PairTables>,
}

impl MarginalPair {
    /// Count cutoff; meant to be set by hand after inspecting the data.
    pub const DEFAULT_THRESHOLD_COUNT: u64 = 1000;
    /// Deviation-factor cutoff; should sit well below 1.0.
    pub const DEFAULT_THRESHOLD_EXPECTATION: f64 = 0.5;

    /// Detector with the default cutoffs.
    pub fn new(data: Vec<String>, other: Vec<String>) -> Result<Self, DetectError> {
        Self::with_thresholds(
            data,
            other,
            Self::DEFAULT_THRESHOLD_COUNT,
            Self::DEFAULT_THRESHOLD_EXPECTATION,
        )
    }

    /// Detector with explicit count and deviation cutoffs.
    pub fn with_thresholds(
        data: Vec<String>,
        other: Vec<String>,
        threshold_count: u64,
        threshold_expectation: f64,
    ) -> Result<Self, DetectError> {
        Ok(Self {
            data: PairedDataset::categorical(data, other)?,
            threshold_count,
            threshold_expectation,
            tables: None,
        })
    }

    /// The configured count cutoff.
    pub fn threshold_count(&self) -> u64 {
        self.threshold_count
    }

    /// The configured deviation cutoff.
    pub fn threshold_expectation(&self) -> f64 {
        self.threshold_expectation
    }

    /// The contingency tables; `None` before detection.
    pub fn tables(&self) -> Option<&PairTables> {
        self.tables.as_ref()
    }

    /// The owned dataset, with per-record `count` and `expectation`
    /// columns after detection.
    pub fn dataset(&self) -> &PairedDataset {
        &self.data
    }
}

impl Detector for MarginalPair {
    type Partition = DataFrame;

    fn detect(&mut self) -> Result<(), DetectError> {
        let (rows, cols) = self.data.pairs()?;
        let n = rows.len();

        let row_labels: Vec<String> = rows.iter().cloned().collect::<BTreeSet<_>>().into_iter().collect();
        let col_labels: Vec<String> = cols.iter().cloned().collect::<BTreeSet<_>>().into_iter().collect();
        let width = col_labels.len();

        let row_index: BTreeMap<&str, usize> = row_labels
            .iter()
            .enumerate()
            .map(|(i, l)| (l.as_str(), i))
            .collect();
        let col_index: BTreeMap<&str, usize> = col_labels
            .iter()
            .enumerate()
            .map(|(i, l)| (l.as_str(), i))
            .collect();

        // Full cartesian product; combinations never seen stay at zero.
        let mut counts = vec![0u64; row_labels.len() * width];
        for (row, col) in rows.iter().zip(cols.iter()) {
            counts[row_index[row.as_str()] * width + col_index[col.as_str()]] += 1;
        }

        let row_sums: Vec<u64> = row_labels
            .iter()
            .enumerate()
            .map(|(r, _)| counts[r * width..(r + 1) * width].iter().sum())
            .collect();
        let col_sums: Vec<u64> = col_labels
            .iter()
            .enumerate()
            .map(|(c, _)| (0..row_labels.len()).map(|r| counts[r * width + c]).sum())
            .collect();

        let mut expected = vec![0.0f64; counts.len()];
        let mut ratios = vec![0.0f64; counts.len()];
        for r in 0..row_labels.len() {
            for c in 0..width {
                let i = r * width + c;
                expected[i] = row_sums[r] as f64 * col_sums[c] as f64 / n as f64;
                ratios[i] = counts[i] as f64 / expected[i];
            }
        }

        let tables = PairTables {
            row_labels,
            col_labels,
            counts,
            expected,
            ratios,
        };

        // Expand combination flags back to records through each record's
        // own pair.
        let mut record_counts = Vec::with_capacity(n);
        let mut record_ratios = Vec::with_capacity(n);
        let mut flags = Vec::with_capacity(n);
        for (row, col) in rows.iter().zip(cols.iter()) {
            let count = tables.count(row, col).unwrap_or(0);
            let ratio = tables.ratio(row, col).unwrap_or(0.0);
            record_counts.push(count as f64);
            record_ratios.push(ratio);
            flags.push(count < self.threshold_count && ratio < self.threshold_expectation);
        }
        let outliers = flags.iter().filter(|&&f| f).count();

        self.data.set_column(columns::COUNT, record_counts)?;
        self.data.set_column(columns::EXPECTATION, record_ratios)?;
        self.data.set_flags(flags)?;
        self.tables = Some(tables);

        tracing::debug!(
            threshold_count = self.threshold_count,
            threshold_expectation = self.threshold_expectation,
            outliers,
            records = n,
            "marginal-probability detection finished"
        );
        Ok(())
    }

    fn outliers(&self) -> Result<DataFrame, DetectError> {
        self.data.outliers()
    }

    fn without_outliers(&self) -> Result<DataFrame, DetectError> {
        self.data.without_outliers()
    }
}
