//! Serializable summary of one detection run.

use anyhow::{Context, Result};
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::Path;

/// What a detection run found, in exportable form.
///
/// Pure data: which detector ran, with which parameters, over how many
/// records, and how many it flagged. Rendering is left to downstream
/// consumers.
#[derive(Debug, Clone, Serialize)]
pub struct DetectionSummary {
    /// Detector name, e.g. `"iqr"`.
    pub detector: String,
    /// Number of records scored.
    pub records: usize,
    /// Number of records flagged.
    pub outliers: usize,
    /// Configured numeric parameters by name.
    pub parameters: BTreeMap<String, f64>,
}

impl DetectionSummary {
    pub fn new(detector: impl Into<String>, records: usize, outliers: usize) -> Self {
        Self {
            detector: detector.into(),
            records,
            outliers,
            parameters: BTreeMap::new(),
        }
    }

    /// Attach a configured parameter.
    pub fn with_parameter(mut self, name: &str, value: f64) -> Self {
        self.parameters.insert(name.to_string(), value);
        self
    }

    /// Pretty-printed JSON.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).context("Failed to serialize detection summary")
    }

    /// Write the JSON form to a file.
    pub fn write_json(&self, path: &Path) -> Result<()> {
        std::fs::write(path, self.to_json()?)
            .with_context(|| format!("Failed to write summary to {}", path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_json_round_trip_fields() {
        let summary = DetectionSummary::new("iqr", 100, 3).with_parameter("threshold", 2.2);
        let json = summary.to_json().unwrap();
        assert!(json.contains("\"detector\": \"iqr\""));
        assert!(json.contains("\"records\": 100"));
        assert!(json.contains("\"outliers\": 3"));
        assert!(json.contains("\"threshold\": 2.2"));
    }
}
