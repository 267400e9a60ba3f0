//! Groups weekday records by departure clock time and computes
//! per-bucket duration statistics.

use std::collections::{BTreeMap, BTreeSet};

use chrono::NaiveTime;
use tracing::debug;

use crate::analyzers::types::{BucketAggregate, Partition, PartitionedAggregates};
use crate::analyzers::utility::{mean, median, quantile};
use crate::error::PipelineError;
use crate::record::ParsedRecord;

/// Buckets records by morning/evening partition and clock time.
///
/// Buckets exist only for clock times actually observed; each table is
/// sorted by bucket ascending.
///
/// # Errors
///
/// Returns [`PipelineError::MixedOrigin`] if a partition holds records
/// from more than one origin, before any statistic is computed.
pub fn aggregate_partitions(
    records: &[ParsedRecord],
) -> Result<PartitionedAggregates, PipelineError> {
    let morning: Vec<&ParsedRecord> = records.iter().filter(|r| r.is_morning).collect();
    let evening: Vec<&ParsedRecord> = records.iter().filter(|r| !r.is_morning).collect();

    Ok(PartitionedAggregates {
        morning: aggregate_partition(&morning, Partition::Morning)?,
        evening: aggregate_partition(&evening, Partition::Evening)?,
    })
}

fn aggregate_partition(
    records: &[&ParsedRecord],
    partition: Partition,
) -> Result<Vec<BucketAggregate>, PipelineError> {
    let origins: BTreeSet<&str> = records.iter().map(|r| r.origin.as_str()).collect();
    if origins.len() > 1 {
        return Err(PipelineError::MixedOrigin {
            partition,
            origins: origins.into_iter().map(str::to_string).collect(),
        });
    }

    let mut groups: BTreeMap<NaiveTime, Vec<&ParsedRecord>> = BTreeMap::new();
    for &record in records {
        groups.entry(record.time.time()).or_default().push(record);
    }

    let table: Vec<BucketAggregate> = groups
        .into_iter()
        .map(|(bucket, group)| aggregate_bucket(bucket, &group))
        .collect();

    debug!(%partition, buckets = table.len(), samples = records.len(), "Partition aggregated");
    Ok(table)
}

fn aggregate_bucket(bucket: NaiveTime, group: &[&ParsedRecord]) -> BucketAggregate {
    let durations: Vec<f64> = group.iter().map(|r| r.duration_minutes as f64).collect();

    // Distinct usable distances at the parser's tenth-mile resolution;
    // unusable distances are excluded rather than counted as a route.
    let routes: BTreeSet<i64> = group
        .iter()
        .filter_map(|r| r.distance_miles)
        .map(|miles| (miles * 10.0).round() as i64)
        .collect();

    BucketAggregate {
        bucket,
        route_count: routes.len(),
        sample_count: group.len(),
        mean: mean(&durations),
        min: durations.iter().copied().fold(f64::INFINITY, f64::min),
        max: durations.iter().copied().fold(f64::NEG_INFINITY, f64::max),
        median: median(&durations),
        perc_95: quantile(&durations, 0.95),
        perc_5: quantile(&durations, 0.05),
    }
}
