//! Detection result export.

pub mod summary;

pub use summary::DetectionSummary;
