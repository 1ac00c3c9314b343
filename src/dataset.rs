//! Dataset shapes shared by all detectors.
//!
//! A dataset is a polars `DataFrame` owned exclusively by one detector
//! instance. The detector writes its derived columns and finally the
//! Boolean [`columns::IS_OUTLIER`] flag column into it; the partition
//! accessors refuse to answer until that column exists. Because derived
//! columns are written with `with_column` (which replaces by name),
//! re-running a detection rewrites them instead of appending duplicates.

use polars::prelude::*;

use crate::columns;
use crate::error::DetectError;

/// Single-column dataset: one numeric or categorical value per record.
#[derive(Debug, Clone)]
pub struct SeriesDataset {
    df: DataFrame,
}

impl SeriesDataset {
    /// Build from an ordered sequence of numeric values.
    pub(crate) fn numeric(values: Vec<f64>) -> Result<Self, DetectError> {
        let df = DataFrame::new(vec![Column::new(columns::DATA.into(), values)])?;
        Ok(Self { df })
    }

    /// Build from an ordered sequence of category labels.
    pub(crate) fn categorical(values: Vec<String>) -> Result<Self, DetectError> {
        let df = DataFrame::new(vec![Column::new(columns::DATA.into(), values)])?;
        Ok(Self { df })
    }

    /// Number of records.
    pub fn height(&self) -> usize {
        self.df.height()
    }

    /// Read-only view of the underlying frame, including all derived
    /// columns. Meant for visualization collaborators.
    pub fn frame(&self) -> &DataFrame {
        &self.df
    }

    /// True once the flag column has been written.
    pub fn is_computed(&self) -> bool {
        self.df.get_column_index(columns::IS_OUTLIER).is_some()
    }

    /// Extract a numeric column as a plain vector.
    pub(crate) fn numeric_column(&self, name: &str) -> Result<Vec<f64>, DetectError> {
        let ca = self.df.column(name)?.f64()?;
        Ok(ca.iter().map(|v| v.unwrap_or(f64::NAN)).collect())
    }

    /// The raw numeric values, in record order.
    pub(crate) fn values(&self) -> Result<Vec<f64>, DetectError> {
        self.numeric_column(columns::DATA)
    }

    /// The raw category labels, in record order.
    pub(crate) fn labels(&self) -> Result<Vec<String>, DetectError> {
        let ca = self.df.column(columns::DATA)?.str()?;
        Ok(ca.into_no_null_iter().map(str::to_string).collect())
    }

    /// Write (or overwrite) a derived numeric column.
    pub(crate) fn set_column(&mut self, name: &str, values: Vec<f64>) -> Result<(), DetectError> {
        self.set_series(Series::new(name.into(), values))
    }

    /// Write (or overwrite) an arbitrary derived column.
    pub(crate) fn set_series(&mut self, series: Series) -> Result<(), DetectError> {
        self.df.with_column(series)?;
        Ok(())
    }

    /// Write (or overwrite) the flag column.
    pub(crate) fn set_flags(&mut self, flags: Vec<bool>) -> Result<(), DetectError> {
        self.set_series(Series::new(columns::IS_OUTLIER.into(), flags))
    }

    /// The per-record flags, in record order.
    pub fn flags(&self) -> Result<Vec<bool>, DetectError> {
        if !self.is_computed() {
            return Err(DetectError::NotComputed);
        }
        let ca = self.df.column(columns::IS_OUTLIER)?.bool()?;
        Ok(ca.into_no_null_iter().collect())
    }

    fn partition(&self, keep_flagged: bool) -> Result<Series, DetectError> {
        if !self.is_computed() {
            return Err(DetectError::NotComputed);
        }
        let mask = self.df.column(columns::IS_OUTLIER)?.bool()?;
        let mask = if keep_flagged { mask.clone() } else { !mask };
        let filtered = self.df.filter(&mask)?;
        Ok(filtered
            .column(columns::DATA)?
            .as_materialized_series()
            .clone())
    }

    /// The flagged records, in original order.
    pub fn outliers(&self) -> Result<Series, DetectError> {
        self.partition(true)
    }

    /// The unflagged records, in original order.
    pub fn without_outliers(&self) -> Result<Series, DetectError> {
        self.partition(false)
    }
}

/// Paired-column dataset: two parallel category sequences per record.
#[derive(Debug, Clone)]
pub struct PairedDataset {
    df: DataFrame,
}

impl PairedDataset {
    /// Build from two parallel label sequences of equal length.
    pub(crate) fn categorical(
        data: Vec<String>,
        other: Vec<String>,
    ) -> Result<Self, DetectError> {
        if data.len() != other.len() {
            return Err(DetectError::LengthMismatch {
                left: data.len(),
                right: other.len(),
            });
        }
        let df = DataFrame::new(vec![
            Column::new(columns::DATA.into(), data),
            Column::new(columns::OTHER.into(), other),
        ])?;
        Ok(Self { df })
    }

    /// Number of records.
    pub fn height(&self) -> usize {
        self.df.height()
    }

    /// Read-only view of the underlying frame.
    pub fn frame(&self) -> &DataFrame {
        &self.df
    }

    /// True once the flag column has been written.
    pub fn is_computed(&self) -> bool {
        self.df.get_column_index(columns::IS_OUTLIER).is_some()
    }

    /// Both label sequences, in record order.
    pub(crate) fn pairs(&self) -> Result<(Vec<String>, Vec<String>), DetectError> {
        let data = self.df.column(columns::DATA)?.str()?;
        let other = self.df.column(columns::OTHER)?.str()?;
        Ok((
            data.into_no_null_iter().map(str::to_string).collect(),
            other.into_no_null_iter().map(str::to_string).collect(),
        ))
    }

    /// Write (or overwrite) a derived numeric column.
    pub(crate) fn set_column(&mut self, name: &str, values: Vec<f64>) -> Result<(), DetectError> {
        self.df.with_column(Series::new(name.into(), values))?;
        Ok(())
    }

    /// Write (or overwrite) the flag column.
    pub(crate) fn set_flags(&mut self, flags: Vec<bool>) -> Result<(), DetectError> {
        self.df
            .with_column(Series::new(columns::IS_OUTLIER.into(), flags))?;
        Ok(())
    }

    /// The per-record flags, in record order.
    pub fn flags(&self) -> Result<Vec<bool>, DetectError> {
        if !self.is_computed() {
            return Err(DetectError::NotComputed);
        }
        let ca = self.df.column(columns::IS_OUTLIER)?.bool()?;
        Ok(ca.into_no_null_iter().collect())
    }

    fn partition(&self, keep_flagged: bool) -> Result<DataFrame, DetectError> {
        if !self.is_computed() {
            return Err(DetectError::NotComputed);
        }
        let mask = self.df.column(columns::IS_OUTLIER)?.bool()?;
        let mask = if keep_flagged { mask.clone() } else { !mask };
        let filtered = self.df.filter(&mask)?;
        Ok(filtered.select([columns::DATA, columns::OTHER])?)
    }

    /// The flagged record pairs, in original order.
    pub fn outliers(&self) -> Result<DataFrame, DetectError> {
        self.partition(true)
    }

    /// The unflagged record pairs, in original order.
    pub fn without_outliers(&self) -> Result<DataFrame, DetectError> {
        self.partition(false)
    }
}

/// Full-table dataset: named numeric columns of equal length.
#[derive(Debug, Clone)]
pub struct TableDataset {
    df: DataFrame,
    feature_names: Vec<String>,
}

impl TableDataset {
    /// Build from a caller-supplied frame, casting every column to
    /// `Float64`. Fails on an empty table or a non-numeric column.
    pub(crate) fn from_frame(frame: DataFrame) -> Result<Self, DetectError> {
        if frame.width() == 0 {
            return Err(DetectError::EmptyTable);
        }
        let mut cast_columns = Vec::with_capacity(frame.width());
        for column in frame.get_columns() {
            if !column.dtype().is_primitive_numeric() {
                return Err(DetectError::NonNumericColumn {
                    column: column.name().to_string(),
                    dtype: column.dtype().to_string(),
                });
            }
            cast_columns.push(column.cast(&DataType::Float64)?);
        }
        let df = DataFrame::new(cast_columns)?;
        let feature_names = df
            .get_column_names()
            .iter()
            .map(|name| name.to_string())
            .collect();
        Ok(Self { df, feature_names })
    }

    /// Number of records (rows).
    pub fn height(&self) -> usize {
        self.df.height()
    }

    /// Names of the scored columns, in table order.
    pub fn feature_names(&self) -> &[String] {
        &self.feature_names
    }

    /// Read-only view of the underlying frame.
    pub fn frame(&self) -> &DataFrame {
        &self.df
    }

    /// True once the flag column has been written.
    pub fn is_computed(&self) -> bool {
        self.df.get_column_index(columns::IS_OUTLIER).is_some()
    }

    /// One column as a plain vector; nulls come out as `NaN`.
    pub(crate) fn column_values(&self, name: &str) -> Result<Vec<f64>, DetectError> {
        let ca = self.df.column(name)?.f64()?;
        Ok(ca.iter().map(|v| v.unwrap_or(f64::NAN)).collect())
    }

    /// Write (or overwrite) the flag column.
    pub(crate) fn set_flags(&mut self, flags: Vec<bool>) -> Result<(), DetectError> {
        self.df
            .with_column(Series::new(columns::IS_OUTLIER.into(), flags))?;
        Ok(())
    }

    /// The per-record flags, in record order.
    pub fn flags(&self) -> Result<Vec<bool>, DetectError> {
        if !self.is_computed() {
            return Err(DetectError::NotComputed);
        }
        let ca = self.df.column(columns::IS_OUTLIER)?.bool()?;
        Ok(ca.into_no_null_iter().collect())
    }

    fn partition(&self, keep_flagged: bool) -> Result<DataFrame, DetectError> {
        if !self.is_computed() {
            return Err(DetectError::NotComputed);
        }
        let mask = self.df.column(columns::IS_OUTLIER)?.bool()?;
        let mask = if keep_flagged { mask.clone() } else { !mask };
        let filtered = self.df.filter(&mask)?;
        Ok(filtered.select(self.feature_names.iter().map(String::as_str))?)
    }

    /// The flagged rows as a sub-table, in original order.
    pub fn outliers(&self) -> Result<DataFrame, DetectError> {
        self.partition(true)
    }

    /// The unflagged rows as a sub-table, in original order.
    pub fn without_outliers(&self) -> Result<DataFrame, DetectError> {
        self.partition(false)
    }
}
