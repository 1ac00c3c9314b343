//! Shared statistics primitives.
//!
//! All helpers operate on plain `&[f64]` slices extracted from the dataset
//! columns. Empty input yields `NaN` rather than an error, matching the
//! behavior of the corresponding DataFrame aggregations.

/// Arithmetic mean.
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return f64::NAN;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Sample standard deviation (Bessel-corrected, divisor n-1).
///
/// Returns `NaN` for fewer than two values.
pub fn sample_std_dev(values: &[f64]) -> f64 {
    if values.len() < 2 {
        return f64::NAN;
    }
    let m = mean(values);
    let sum_sq: f64 = values.iter().map(|v| (v - m) * (v - m)).sum();
    (sum_sq / (values.len() - 1) as f64).sqrt()
}

/// Quantile with linear interpolation between order statistics.
///
/// `q` is a fraction in `[0, 1]`; the position is `q * (n - 1)` on the
/// sorted values, interpolating between the two surrounding entries.
pub fn quantile(values: &[f64], q: f64) -> f64 {
    if values.is_empty() {
        return f64::NAN;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

    let position = q * (sorted.len() - 1) as f64;
    let lower = position.floor() as usize;
    let upper = position.ceil() as usize;
    if lower == upper {
        return sorted[lower];
    }
    let fraction = position - lower as f64;
    sorted[lower] + fraction * (sorted[upper] - sorted[lower])
}

/// Median, i.e. the 0.5 quantile.
pub fn median(values: &[f64]) -> f64 {
    quantile(values, 0.5)
}

/// Absolute difference of every value from a center point.
pub fn abs_diff(values: &[f64], center: f64) -> Vec<f64> {
    values.iter().map(|v| (v - center).abs()).collect()
}

/// Min-max scaling to `[0, 1]` in place.
///
/// A constant sequence scales to all zeros (the observed range is empty,
/// so every value sits at the minimum).
pub fn min_max_scale(values: &mut [f64]) {
    if values.is_empty() {
        return;
    }
    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let range = max - min;
    if range == 0.0 {
        for v in values.iter_mut() {
            *v = 0.0;
        }
        return;
    }
    for v in values.iter_mut() {
        *v = (*v - min) / range;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mean() {
        assert!((mean(&[1.0, 2.0, 3.0, 4.0, 5.0]) - 3.0).abs() < 1e-12);
        assert!(mean(&[]).is_nan());
    }

    #[test]
    fn test_sample_std_dev() {
        // sample variance of [1..5] is 2.5
        let sd = sample_std_dev(&[1.0, 2.0, 3.0, 4.0, 5.0]);
        assert!((sd - 2.5f64.sqrt()).abs() < 1e-12);
        assert!(sample_std_dev(&[7.0]).is_nan());
    }

    #[test]
    fn test_quantile_linear_interpolation() {
        let values = [1.0, 2.0, 3.0, 4.0, 100.0];
        assert!((quantile(&values, 0.25) - 2.0).abs() < 1e-12);
        assert!((quantile(&values, 0.75) - 4.0).abs() < 1e-12);
        // Between order statistics: position 0.5 * 3 = 1.5 on [1,2,3,4]
        assert!((quantile(&[1.0, 2.0, 3.0, 4.0], 0.5) - 2.5).abs() < 1e-12);
    }

    #[test]
    fn test_quantile_unsorted_input() {
        let values = [4.0, 1.0, 100.0, 3.0, 2.0];
        assert!((quantile(&values, 0.25) - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_median_even_and_odd() {
        assert!((median(&[1.0, 2.0, 3.0]) - 2.0).abs() < 1e-12);
        assert!((median(&[1.0, 2.0, 3.0, 4.0]) - 2.5).abs() < 1e-12);
    }

    #[test]
    fn test_abs_diff() {
        assert_eq!(abs_diff(&[1.0, 3.0, 5.0], 3.0), vec![2.0, 0.0, 2.0]);
    }

    #[test]
    fn test_min_max_scale() {
        let mut values = vec![2.0, 4.0, 6.0];
        min_max_scale(&mut values);
        assert_eq!(values, vec![0.0, 0.5, 1.0]);
    }

    #[test]
    fn test_min_max_scale_constant() {
        let mut values = vec![5.0, 5.0, 5.0];
        min_max_scale(&mut values);
        assert_eq!(values, vec![0.0, 0.0, 0.0]);
    }
}
