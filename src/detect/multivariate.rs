//! Multivariate row aggregation over a full numeric table.
//!
//! Every column is scored independently with the univariate MAD detector;
//! non-finite scores are replaced (`NaN` -> 0.0, `+inf` -> 1.0,
//! `-inf` -> 0.0), each column is min-max scaled to `[0, 1]`, and the
//! scaled scores are summed per row. Rows whose sum exceeds the threshold
//! are flagged, so whole rows are removed. Columns are independent units
//! of work and are scored in parallel.

use polars::prelude::*;
use rayon::prelude::*;

use crate::columns;
use crate::dataset::TableDataset;
use crate::error::DetectError;
use crate::stats;

use super::{Detector, Mad};

/// Outlier detection via the row sum of normalized per-column MAD scores.
#[derive(Debug, Clone)]
pub struct MadSum {
    data: TableDataset,
    threshold: f64,
    scores: Option<DataFrame>,
}

impl MadSum {
    /// Row-sum cutoff; meant to be set by hand after inspecting the data.
    pub const DEFAULT_THRESHOLD: f64 = 8.0;

    /// Detector with the default cutoff.
    pub fn new(frame: DataFrame) -> Result<Self, DetectError> {
        Self::with_threshold(frame, Self::DEFAULT_THRESHOLD)
    }

    /// Detector with an explicit cutoff.
    pub fn with_threshold(frame: DataFrame, threshold: f64) -> Result<Self, DetectError> {
        Ok(Self {
            data: TableDataset::from_frame(frame)?,
            threshold,
            scores: None,
        })
    }

    /// The configured cutoff.
    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Score table (`mad_0` .. `mad_{k-1}` plus `mad_sum`, one row per
    /// record); `None` before detection.
    pub fn scores(&self) -> Option<&DataFrame> {
        self.scores.as_ref()
    }

    /// The owned dataset.
    pub fn dataset(&self) -> &TableDataset {
        &self.data
    }
}

/// Replacement policy for non-finite MAD scores.
fn sanitize(score: f64) -> f64 {
    if score.is_nan() {
        0.0
    } else if score == f64::INFINITY {
        1.0
    } else if score == f64::NEG_INFINITY {
        0.0
    } else {
        score
    }
}

impl Detector for MadSum {
    type Partition = DataFrame;

    fn detect(&mut self) -> Result<(), DetectError> {
        let n = self.data.height();
        let data = &self.data;

        let per_column: Result<Vec<Vec<f64>>, DetectError> = data
            .feature_names()
            .par_iter()
            .map(|name| {
                let mut mad = Mad::new(data.column_values(name)?)?;
                mad.detect()?;
                let mut scores = mad.scores()?;
                for score in scores.iter_mut() {
                    *score = sanitize(*score);
                }
                stats::min_max_scale(&mut scores);
                Ok(scores)
            })
            .collect();
        let per_column = per_column?;

        let mut sums = vec![0.0f64; n];
        let mut score_columns: Vec<Column> = Vec::with_capacity(per_column.len() + 1);
        for (index, scores) in per_column.into_iter().enumerate() {
            for (sum, score) in sums.iter_mut().zip(scores.iter()) {
                *sum += score;
            }
            score_columns.push(Column::new(
                format!("{}_{index}", columns::MAD).into(),
                scores,
            ));
        }
        score_columns.push(Column::new(columns::MAD_SUM.into(), sums.clone()));
        let score_frame = DataFrame::new(score_columns)?;

        let flags: Vec<bool> = sums.iter().map(|s| *s > self.threshold).collect();
        let outliers = flags.iter().filter(|&&f| f).count();

        self.data.set_flags(flags)?;
        self.scores = Some(score_frame);

        tracing::debug!(
            threshold = self.threshold,
            outliers,
            records = n,
            "MAD-sum detection finished"
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

#[cfg(test)]
mod tests {
    use super::sanitize;

    #[test]
    fn test_sanitize_replacement_policy() {
        assert_eq!(sanitize(f64::NAN), 0.0);
        assert_eq!(sanitize(f64::INFINITY), 1.0);
        assert_eq!(sanitize(f64::NEG_INFINITY), 0.0);
        assert_eq!(sanitize(2.5), 2.5);
    }
}
