//! k-nearest-neighbor distance detection.
//!
//! Each record's score is the distance to its k-th nearest neighbor (the
//! maximum over its k+1 nearest including itself at distance zero).
//! Scores strictly above the threshold are flagged. The threshold is a
//! manual, visually chosen cutoff: the score histogram typically shows a
//! tail where isolated points begin, and the cutoff is placed at its
//! start. No automatic derivation is attempted.

use polars::prelude::Series;

use crate::columns;
use crate::dataset::SeriesDataset;
use crate::error::DetectError;

use super::Detector;

/// Outlier detection via the distance to the k-th nearest neighbor.
#[derive(Debug, Clone)]
pub struct Knn {
    data: SeriesDataset,
    k: usize,
    threshold: f64,
}

impl Knn {
    /// Neighbor count.
    pub const DEFAULT_K: usize = 25;
    /// Distance cutoff; meant to be read off the score histogram.
    pub const DEFAULT_THRESHOLD: f64 = 0.2;

    /// Detector with the default neighbor count and cutoff.
    pub fn new(values: Vec<f64>) -> Result<Self, DetectError> {
        Self::with_parameters(values, Self::DEFAULT_K, Self::DEFAULT_THRESHOLD)
    }

    /// Detector with an explicit neighbor count and distance cutoff.
    pub fn with_parameters(
        values: Vec<f64>,
        k: usize,
        threshold: f64,
    ) -> Result<Self, DetectError> {
        Ok(Self {
            data: SeriesDataset::numeric(values)?,
            k,
            threshold,
        })
    }

    /// The configured neighbor count.
    pub fn k(&self) -> usize {
        self.k
    }

    /// The configured distance cutoff.
    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// The owned dataset, with a `knn` distance column after detection.
    pub fn dataset(&self) -> &SeriesDataset {
        &self.data
    }
}

/// Distance from `sorted[pos]` to its k-th nearest neighbor, found by
/// expanding a window over the sorted values one nearer side at a time.
fn kth_neighbor_distance(sorted: &[f64], pos: usize, k: usize) -> f64 {
    let mut lo = pos;
    let mut hi = pos;
    let mut max_dist = 0.0f64;
    for _ in 0..k {
        let left = if lo > 0 {
            sorted[pos] - sorted[lo - 1]
        } else {
            f64::INFINITY
        };
        let right = if hi + 1 < sorted.len() {
            sorted[hi + 1] - sorted[pos]
        } else {
            f64::INFINITY
        };
        if left <= right {
            lo -= 1;
            max_dist = max_dist.max(left);
        } else {
            hi += 1;
            max_dist = max_dist.max(right);
        }
    }
    max_dist
}

impl Detector for Knn {
    type Partition = Series;

    fn detect(&mut self) -> Result<(), DetectError> {
        let values = self.data.values()?;
        let n = values.len();
        if n <= self.k {
            return Err(DetectError::NotEnoughRecords {
                k: self.k,
                records: n,
            });
        }

        let mut order: Vec<usize> = (0..n).collect();
        order.sort_by(|&a, &b| {
            values[a]
                .partial_cmp(&values[b])
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        let sorted: Vec<f64> = order.iter().map(|&i| values[i]).collect();

        let mut scores = vec![0.0f64; n];
        for (pos, &original) in order.iter().enumerate() {
            scores[original] = kth_neighbor_distance(&sorted, pos, self.k);
        }

        let flags: Vec<bool> = scores.iter().map(|s| *s > self.threshold).collect();
        let outliers = flags.iter().filter(|&&f| f).count();

        self.data.set_column(columns::KNN, scores)?;
        self.data.set_flags(flags)?;

        tracing::debug!(
            k = self.k,
            threshold = self.threshold,
            outliers,
            records = n,
            "KNN detection finished"
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

#[cfg(test)]
mod tests {
    use super::kth_neighbor_distance;

    #[test]
    fn test_kth_neighbor_interior_point() {
        let sorted = [1.0, 2.0, 3.0, 10.0];
        // 2 nearest of 2.0 are 1.0 and 3.0, both at distance 1
        assert!((kth_neighbor_distance(&sorted, 1, 2) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_kth_neighbor_edge_point() {
        let sorted = [1.0, 2.0, 3.0, 10.0];
        // 2 nearest of 10.0 are 3.0 (dist 7) and 2.0 (dist 8)
        assert!((kth_neighbor_distance(&sorted, 3, 2) - 8.0).abs() < 1e-12);
    }

    #[test]
    fn test_kth_neighbor_duplicates() {
        let sorted = [5.0, 5.0, 5.0, 6.0];
        assert!((kth_neighbor_distance(&sorted, 0, 2) - 0.0).abs() < 1e-12);
    }
}
