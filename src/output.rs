//! Output formatting and persistence for analysis results.
//!
//! The charting collaborators consume these exports; nothing here
//! renders a figure.

use anyhow::{Context, Result};
use serde::Serialize;
use std::fs::File;
use std::path::Path;
use tracing::debug;

use crate::analyzers::types::{BucketAggregate, CommuteAnalysis, DailyAverage, RoundTripPairing};

/// Writes the complete analysis as pretty-printed JSON.
pub fn write_json(path: impl AsRef<Path>, analysis: &CommuteAnalysis) -> Result<()> {
    let path = path.as_ref();
    let file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
    serde_json::to_writer_pretty(file, analysis)
        .with_context(|| format!("writing {}", path.display()))?;

    debug!(path = %path.display(), "Analysis JSON written");
    Ok(())
}

/// Writes one CSV row per departure-time bucket.
pub fn write_bucket_csv(path: impl AsRef<Path>, table: &[BucketAggregate]) -> Result<()> {
    write_csv(path.as_ref(), table)
}

/// Writes one CSV row per matched round-trip pairing.
pub fn write_round_trip_csv(path: impl AsRef<Path>, table: &[RoundTripPairing]) -> Result<()> {
    write_csv(path.as_ref(), table)
}

/// Writes one CSV row per observed commute date.
pub fn write_daily_csv(path: impl AsRef<Path>, table: &[DailyAverage]) -> Result<()> {
    write_csv(path.as_ref(), table)
}

fn write_csv<T: Serialize>(path: &Path, rows: &[T]) -> Result<()> {
    let mut writer =
        csv::Writer::from_path(path).with_context(|| format!("creating {}", path.display()))?;

    for row in rows {
        writer
            .serialize(row)
            .with_context(|| format!("writing {}", path.display()))?;
    }
    writer.flush()?;

    debug!(rows = rows.len(), path = %path.display(), "CSV table written");
    Ok(())
}
