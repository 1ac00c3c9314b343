//! Univariate numeric detectors: z-score, IQR, IDR, MAD, histogram.

use outly::{Detector, Histogram, Idr, Iqr, Mad, ZScore};
use polars::prelude::*;

#[path = "common/mod.rs"]
mod common;

fn to_vec(series: &Series) -> Vec<f64> {
    series.f64().unwrap().into_no_null_iter().collect()
}

#[test]
fn test_iqr_scenario() {
    let mut iqr = Iqr::new(common::spiky_values()).unwrap();
    iqr.detect().unwrap();

    assert!((iqr.lower_limit().unwrap() - (-2.4)).abs() < 1e-9);
    assert!((iqr.upper_limit().unwrap() - 8.4).abs() < 1e-9);
    assert_eq!(to_vec(&iqr.outliers().unwrap()), vec![100.0]);
    assert_eq!(
        to_vec(&iqr.without_outliers().unwrap()),
        vec![1.0, 2.0, 3.0, 4.0]
    );
}

#[test]
fn test_iqr_fences_are_inclusive() {
    // upper fence of [0,0,0,0,4] with threshold 1.0: q3=0, span=0 -> fence 0
    let mut iqr = Iqr::with_threshold(vec![0.0, 0.0, 0.0, 0.0, 4.0], 1.0).unwrap();
    iqr.detect().unwrap();
    // everything sits on a fence, so everything is flagged
    assert_eq!(iqr.outliers().unwrap().len(), 5);
}

#[test]
fn test_mad_scenario() {
    let mut mad = Mad::new(common::spiky_values()).unwrap();
    mad.detect().unwrap();

    assert_eq!(mad.scores().unwrap(), vec![2.0, 1.0, 0.0, 1.0, 97.0]);
    assert_eq!(to_vec(&mad.outliers().unwrap()), vec![100.0]);
}

#[test]
fn test_mad_zero_deviation_flags_nothing() {
    // median deviation is zero; all scores are NaN and NaN >= t is false
    let mut mad = Mad::new(vec![5.0, 5.0, 5.0, 5.0]).unwrap();
    mad.detect().unwrap();
    assert!(mad.outliers().unwrap().is_empty());
    assert!(mad.scores().unwrap().iter().all(|s| s.is_nan()));
}

#[test]
fn test_z_score_flags_far_point_at_low_threshold() {
    // spike z-score is ~1.79, below the 3.0 default
    let mut z = ZScore::new(common::spiky_values()).unwrap();
    z.detect().unwrap();
    assert!(z.outliers().unwrap().is_empty());

    let mut z = ZScore::with_threshold(common::spiky_values(), 1.5).unwrap();
    z.detect().unwrap();
    assert_eq!(to_vec(&z.outliers().unwrap()), vec![100.0]);
}

#[test]
fn test_z_score_zero_variance_flags_nothing() {
    let mut z = ZScore::new(vec![2.0, 2.0, 2.0]).unwrap();
    z.detect().unwrap();
    assert!(z.outliers().unwrap().is_empty());
}

#[test]
fn test_idr_bounds_shift_quartiles_by_decile_span() {
    // [1,2,3,4,100]: D1=1.4, D9=61.6, span=60.2, Q1=2, Q3=4
    let mut idr = Idr::new(common::spiky_values()).unwrap();
    idr.detect().unwrap();

    assert!((idr.lower_limit().unwrap() - (2.0 - 60.2)).abs() < 1e-9);
    assert!((idr.upper_limit().unwrap() - (4.0 + 60.2)).abs() < 1e-9);
    assert_eq!(to_vec(&idr.outliers().unwrap()), vec![100.0]);
}

#[test]
fn test_histogram_scenario() {
    let mut histogram =
        Histogram::with_bins(vec![1.0, 1.0, 1.0, 1.0, 1.0, 100.0], 2).unwrap();
    histogram.detect().unwrap();

    assert_eq!(histogram.bin_counts().unwrap(), &[5, 1]);
    assert_eq!(to_vec(&histogram.outliers().unwrap()), vec![100.0]);
}

#[test]
fn test_histogram_constant_data_flags_nothing() {
    let mut histogram = Histogram::with_bins(vec![5.0; 6], 2).unwrap();
    histogram.detect().unwrap();
    assert!(histogram.outliers().unwrap().is_empty());
}

#[test]
fn test_histogram_maximum_lands_in_last_bin() {
    let mut histogram = Histogram::with_bins(vec![0.0, 5.0, 10.0], 2).unwrap();
    histogram.detect().unwrap();
    let bins: Vec<u32> = histogram
        .dataset()
        .frame()
        .column("bin")
        .unwrap()
        .u32()
        .unwrap()
        .into_no_null_iter()
        .collect();
    assert_eq!(bins, vec![0, 1, 1]);
}

#[test]
fn test_threshold_monotonicity() {
    let values = common::random_values(300);

    let mut previous = usize::MAX;
    for threshold in [0.5, 1.0, 2.0, 3.0, 4.0] {
        let mut z = ZScore::with_threshold(values.clone(), threshold).unwrap();
        z.detect().unwrap();
        let count = z.outliers().unwrap().len();
        assert!(count <= previous, "outlier count must not grow with threshold");
        previous = count;
    }

    let mut previous = usize::MAX;
    for threshold in [0.0, 0.5, 1.5, 2.2, 5.0] {
        let mut iqr = Iqr::with_threshold(values.clone(), threshold).unwrap();
        iqr.detect().unwrap();
        let count = iqr.outliers().unwrap().len();
        assert!(count <= previous);
        previous = count;
    }

    let mut previous = usize::MAX;
    for threshold in [0.0, 0.5, 1.0, 2.0] {
        let mut idr = Idr::with_threshold(values.clone(), threshold).unwrap();
        idr.detect().unwrap();
        let count = idr.outliers().unwrap().len();
        assert!(count <= previous);
        previous = count;
    }

    let mut previous = usize::MAX;
    for threshold in [0.5, 1.0, 2.0, 4.0, 8.0] {
        let mut mad = Mad::with_threshold(values.clone(), threshold).unwrap();
        mad.detect().unwrap();
        let count = mad.outliers().unwrap().len();
        assert!(count <= previous);
        previous = count;
    }
}
