//! Time-of-day aggregation and round-trip derivation.
//!
//! This module buckets cleaned commute records by departure clock time,
//! computes per-bucket duration statistics, pairs morning departures
//! with their evening returns, and extracts a summary report.

pub mod aggregate;
pub mod analyzer;
pub mod daily;
pub mod merge;
pub mod report;
pub mod types;
pub mod utility;
