//! Table loading and column extraction.
//!
//! Detectors take plain vectors (or a full `DataFrame`); these helpers
//! produce them from CSV/Parquet files. Nothing here is required by the
//! detection core — it only turns files into one of the three ingestion
//! shapes.

use anyhow::{Context, Result};
use polars::prelude::*;
use std::path::Path;

/// Load a table from a file (CSV or Parquet based on extension).
pub fn load_table(path: &Path) -> Result<DataFrame> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();

    let lf = match extension.as_str() {
        "csv" => LazyCsvReader::new(path)
            .finish()
            .with_context(|| format!("Failed to load CSV file: {}", path.display()))?,
        "parquet" => LazyFrame::scan_parquet(path, Default::default())
            .with_context(|| format!("Failed to load Parquet file: {}", path.display()))?,
        _ => anyhow::bail!(
            "Unsupported file format: {}. Supported formats: csv, parquet",
            extension
        ),
    };

    lf.collect()
        .with_context(|| format!("Failed to materialize table: {}", path.display()))
}

/// Extract a numeric column as `Vec<f64>`; missing values become `NaN`.
pub fn numeric_column(df: &DataFrame, name: &str) -> Result<Vec<f64>> {
    let column = df
        .column(name)
        .with_context(|| format!("Column '{name}' not found"))?;
    if !column.dtype().is_primitive_numeric() {
        anyhow::bail!("Column '{}' is not numeric (found {})", name, column.dtype());
    }
    let cast = column.cast(&DataType::Float64)?;
    let ca = cast.f64()?;
    Ok(ca.iter().map(|v| v.unwrap_or(f64::NAN)).collect())
}

/// Extract a categorical column as `Vec<String>`; missing values are an
/// error since a null category has no meaningful count.
pub fn string_column(df: &DataFrame, name: &str) -> Result<Vec<String>> {
    let column = df
        .column(name)
        .with_context(|| format!("Column '{name}' not found"))?;
    let cast = column
        .cast(&DataType::String)
        .with_context(|| format!("Column '{name}' cannot be read as categories"))?;
    let ca = cast.str()?;
    ca.iter()
        .enumerate()
        .map(|(row, value)| {
            value
                .map(str::to_string)
                .ok_or_else(|| anyhow::anyhow!("Column '{}' has a missing value at row {}", name, row))
        })
        .collect()
}
