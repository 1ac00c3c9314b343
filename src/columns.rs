//! Canonical column names shared by datasets, detectors and downstream
//! visualization collaborators.
//!
//! Detectors write their derived values into the owned dataset under these
//! names, so anything that wants to plot scores or bounds can read them off
//! the `DataFrame` without knowing which detector produced them.

/// The analysed value column of single- and paired-column datasets.
pub const DATA: &str = "data";
/// The second category column of paired datasets.
pub const OTHER: &str = "other";
/// Boolean flag column; absent until `detect()` has run.
pub const IS_OUTLIER: &str = "is_outlier";

/// Broadcast mean of the value column (z-score).
pub const MEAN: &str = "mean";
/// Broadcast sample standard deviation (z-score).
pub const STD_DEV: &str = "std_dev";
/// Per-record z-score.
pub const Z_SCORE: &str = "z_score";

/// Broadcast median of the value column (MAD).
pub const MEDIAN: &str = "median";
/// Absolute deviation from the median (MAD).
pub const ABS_DIFF: &str = "abs_diff";
/// Broadcast median of the absolute deviations (MAD).
pub const MEDIAN_ABS_DIFF: &str = "median_abs_diff";
/// Per-record MAD score; also the per-column score prefix of the
/// multivariate aggregator (`mad_0`, `mad_1`, ...).
pub const MAD: &str = "mad";
/// Row sum of normalized per-column MAD scores.
pub const MAD_SUM: &str = "mad_sum";

/// Zero-based histogram bin index.
pub const BIN: &str = "bin";
/// Log-density score of the kernel density detector.
pub const KDE: &str = "kde";
/// Distance to the k-th nearest neighbor.
pub const KNN: &str = "knn";

/// Contingency count of a record's category combination.
pub const COUNT: &str = "count";
/// Deviation factor from the independence expectation.
pub const EXPECTATION: &str = "expectation";
/// Cumulative fraction of records up to a record's category in the
/// ascending frequency ranking.
pub const CUM_SUM: &str = "cum_sum";
