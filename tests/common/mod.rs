//! Shared test fixtures.

use polars::prelude::*;

/// Small numeric sequence with one obvious spike at the end.
///
/// Known statistics: Q1=2, Q3=4, median=3, MAD scores [2, 1, 0, 1, 97].
pub fn spiky_values() -> Vec<f64> {
    vec![1.0, 2.0, 3.0, 4.0, 100.0]
}

/// Eleven points evenly spaced between 1.0 and 2.0 plus one stray point
/// far outside the cluster. Useful for density-based detectors, where the
/// stray point is the only one without neighbors inside the bandwidth.
pub fn cluster_with_stray() -> Vec<f64> {
    let mut values: Vec<f64> = (0..=10).map(|i| 1.0 + 0.1 * i as f64).collect();
    values.push(10.0);
    values
}

/// The category-pair scenario: (X,P) x10, (X,Q) x5, (Y,P) x1, (Y,Q) x100.
///
/// N=116; the single (Y,P) record has expected count 101*11/116 ~ 9.58
/// and deviation ratio ~ 0.104.
pub fn pair_scenario() -> (Vec<String>, Vec<String>) {
    let mut rows = Vec::new();
    let mut cols = Vec::new();
    let mut push = |row: &str, col: &str, times: usize| {
        for _ in 0..times {
            rows.push(row.to_string());
            cols.push(col.to_string());
        }
    };
    push("X", "P", 10);
    push("X", "Q", 5);
    push("Y", "P", 1);
    push("Y", "Q", 100);
    (rows, cols)
}

/// Two-column numeric table with a single spiked row (the last one).
pub fn spiky_table() -> DataFrame {
    df! {
        "a" => [1.0f64, 2.0, 3.0, 4.0, 100.0],
        "b" => [2.0f64, 3.0, 4.0, 5.0, 200.0],
    }
    .unwrap()
}

/// Uniform noise for property tests.
pub fn random_values(n: usize) -> Vec<f64> {
    use rand::Rng;
    let mut rng = rand::thread_rng();
    (0..n).map(|_| rng.gen::<f64>() * 10.0).collect()
}
