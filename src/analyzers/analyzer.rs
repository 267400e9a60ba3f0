//! End-to-end orchestration of the cleaning and aggregation pipeline.

use tracing::info;

use crate::analyzers::aggregate::aggregate_partitions;
use crate::analyzers::daily::daily_averages;
use crate::analyzers::merge::merge_round_trips;
use crate::analyzers::report::summarize;
use crate::analyzers::types::{CommuteAnalysis, Metric};
use crate::error::PipelineError;
use crate::normalize::{NormalizerConfig, filter_weekdays, normalize};
use crate::parser::parse_records;
use crate::record::RawRecord;

/// Runs the full pipeline over one input snapshot: normalize, parse,
/// drop weekends, aggregate per departure time, merge round trips, and
/// summarize.
///
/// # Errors
///
/// Propagates the fatal conditions: an unparseable duration
/// ([`PipelineError::MalformedDuration`]) or a partition with mixed
/// origins ([`PipelineError::MixedOrigin`]).
pub fn analyze(
    records: &[RawRecord],
    config: &NormalizerConfig,
    metric: Metric,
) -> Result<CommuteAnalysis, PipelineError> {
    info!(records = records.len(), "Starting commute analysis");

    let normalized = normalize(records, config);
    let parsed = parse_records(normalized)?;
    let weekdays = filter_weekdays(parsed);

    let aggregates = aggregate_partitions(&weekdays)?;
    let daily = daily_averages(&weekdays);
    let round_trips = merge_round_trips(&aggregates);
    let summary = summarize(&aggregates, &round_trips, metric);

    info!(
        morning_buckets = aggregates.morning.len(),
        evening_buckets = aggregates.evening.len(),
        days = daily.len(),
        round_trips = round_trips.len(),
        "Commute analysis complete"
    );

    Ok(CommuteAnalysis {
        aggregates,
        daily,
        round_trips,
        summary,
    })
}
