//! Extracts best/worst departure times and best pairings from the
//! aggregated tables.

use crate::analyzers::types::{
    BucketAggregate, BucketExtreme, Metric, PairingExtreme, PartitionedAggregates,
    RoundTripPairing, SummaryReport,
};

/// Note attached to the report when the merge produced no pairs.
const NO_PAIRING_NOTE: &str =
    "no morning/evening departure pair matched the eight hour spread; \
     round-trip statistics unavailable";

enum Extreme {
    Minimum,
    Maximum,
}

/// Builds the summary over both aggregate tables and the round-trip
/// table. Ties are all reported, never an arbitrary winner.
///
/// The two pairing selections are optimized independently: best by
/// combined median and best by combined average can name different
/// departure pairs.
pub fn summarize(
    aggregates: &PartitionedAggregates,
    round_trips: &[RoundTripPairing],
    metric: Metric,
) -> SummaryReport {
    let mut notes = Vec::new();
    if round_trips.is_empty() {
        notes.push(NO_PAIRING_NOTE.to_string());
    }

    SummaryReport {
        metric,
        best_morning: bucket_extremes(&aggregates.morning, metric, Extreme::Minimum),
        worst_morning: bucket_extremes(&aggregates.morning, metric, Extreme::Maximum),
        best_evening: bucket_extremes(&aggregates.evening, metric, Extreme::Minimum),
        worst_evening: bucket_extremes(&aggregates.evening, metric, Extreme::Maximum),
        best_pairing_by_median: pairing_minimums(round_trips, |p| p.total_median),
        best_pairing_by_average: pairing_minimums(round_trips, |p| p.total_avg),
        notes,
    }
}

fn bucket_extremes(
    table: &[BucketAggregate],
    metric: Metric,
    extreme: Extreme,
) -> Vec<BucketExtreme> {
    let values = table.iter().map(|b| b.metric(metric));
    let target = match extreme {
        Extreme::Minimum => values.fold(f64::INFINITY, f64::min),
        Extreme::Maximum => values.fold(f64::NEG_INFINITY, f64::max),
    };

    table
        .iter()
        .filter(|b| b.metric(metric) == target)
        .map(|b| BucketExtreme {
            bucket: b.bucket,
            value: b.metric(metric),
        })
        .collect()
}

fn pairing_minimums(
    round_trips: &[RoundTripPairing],
    value: impl Fn(&RoundTripPairing) -> f64,
) -> Vec<PairingExtreme> {
    let target = round_trips.iter().map(&value).fold(f64::INFINITY, f64::min);

    round_trips
        .iter()
        .filter(|p| value(p) == target)
        .map(|p| PairingExtreme {
            label: p.label.clone(),
            value: value(p),
        })
        .collect()
}
