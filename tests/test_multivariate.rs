//! Multivariate row aggregation (MAD-sum over a full numeric table).

use outly::{Detector, MadSum};
use polars::prelude::*;

#[path = "common/mod.rs"]
mod common;

#[test]
fn test_mad_sum_flags_spiked_row() {
    // both columns spike in the last row; its normalized score sum is 2.0
    let mut mad_sum = MadSum::with_threshold(common::spiky_table(), 1.5).unwrap();
    mad_sum.detect().unwrap();

    let outliers = mad_sum.outliers().unwrap();
    assert_eq!(outliers.height(), 1);
    assert_eq!(outliers.column("a").unwrap().f64().unwrap().get(0), Some(100.0));
    assert_eq!(outliers.column("b").unwrap().f64().unwrap().get(0), Some(200.0));
    assert_eq!(mad_sum.without_outliers().unwrap().height(), 4);
}

#[test]
fn test_mad_sum_score_table() {
    let mut mad_sum = MadSum::with_threshold(common::spiky_table(), 1.5).unwrap();
    mad_sum.detect().unwrap();

    let scores = mad_sum.scores().unwrap();
    for name in ["mad_0", "mad_1", "mad_sum"] {
        assert!(
            scores.get_column_index(name).is_some(),
            "expected score column '{name}'"
        );
    }

    let sums: Vec<f64> = scores
        .column("mad_sum")
        .unwrap()
        .f64()
        .unwrap()
        .into_no_null_iter()
        .collect();
    assert!((sums[4] - 2.0).abs() < 1e-9, "spiked row sums both maxima");
    assert!(sums.iter().take(4).all(|s| *s < 0.1));
}

#[test]
fn test_mad_sum_sanitizes_zero_deviation_column() {
    // more than half the values equal the median: MAD is zero, scores are
    // NaN for values on the median and +inf off it. The policy maps those
    // to 0.0 and 1.0 before scaling.
    let df = df! {
        "flat" => [5.0f64, 5.0, 5.0, 5.0, 9.0],
    }
    .unwrap();
    let mut mad_sum = MadSum::with_threshold(df, 0.5).unwrap();
    mad_sum.detect().unwrap();

    let sums: Vec<f64> = mad_sum
        .scores()
        .unwrap()
        .column("mad_sum")
        .unwrap()
        .f64()
        .unwrap()
        .into_no_null_iter()
        .collect();
    assert_eq!(sums, vec![0.0, 0.0, 0.0, 0.0, 1.0]);
    assert_eq!(mad_sum.outliers().unwrap().height(), 1);
}

#[test]
fn test_mad_sum_integer_columns_are_cast() {
    let df = df! {
        "a" => [1i64, 2, 3, 4, 100],
    }
    .unwrap();
    let mut mad_sum = MadSum::with_threshold(df, 0.5).unwrap();
    mad_sum.detect().unwrap();
    assert_eq!(mad_sum.outliers().unwrap().height(), 1);
}

#[test]
fn test_mad_sum_partitions_cover_all_rows_in_order() {
    let mut mad_sum = MadSum::with_threshold(common::spiky_table(), 1.5).unwrap();
    mad_sum.detect().unwrap();

    let flags = mad_sum.dataset().flags().unwrap();
    let outliers = mad_sum.outliers().unwrap();
    let without = mad_sum.without_outliers().unwrap();
    assert_eq!(outliers.height() + without.height(), flags.len());

    // partitions keep only the original feature columns
    assert_eq!(outliers.get_column_names().len(), 2);
    assert!(outliers.get_column_index("is_outlier").is_none());
}

#[test]
fn test_mad_sum_is_idempotent() {
    let mut mad_sum = MadSum::with_threshold(common::spiky_table(), 1.5).unwrap();
    mad_sum.detect().unwrap();
    let first = mad_sum.dataset().flags().unwrap();
    mad_sum.detect().unwrap();
    assert_eq!(mad_sum.dataset().flags().unwrap(), first);
}
