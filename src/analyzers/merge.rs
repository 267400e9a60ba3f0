//! Pairs each morning departure with the evening departure eight hours
//! later and derives round-trip totals and loss-versus-best.

use chrono::Duration;
use tracing::{debug, warn};

use crate::analyzers::types::{PartitionedAggregates, RoundTripPairing};

/// Clock-time spread between a morning departure and its paired return.
const ROUND_TRIP_SPREAD_HOURS: i64 = 8;

/// Inner-joins the morning table against the evening table on the eight
/// hour departure spread and computes combined statistics plus the loss
/// columns. Output is sorted by the morning departure.
///
/// An empty result means no departure pair matched; single-leg
/// statistics stay valid, so this is logged rather than raised.
pub fn merge_round_trips(aggregates: &PartitionedAggregates) -> Vec<RoundTripPairing> {
    let mut pairs = Vec::new();

    for morning in &aggregates.morning {
        let return_time = morning.bucket + Duration::hours(ROUND_TRIP_SPREAD_HOURS);
        let Some(evening) = aggregates.evening.iter().find(|e| e.bucket == return_time) else {
            continue;
        };

        pairs.push(RoundTripPairing {
            label: format!(
                "{}-{}",
                morning.bucket.format("%H:%M"),
                evening.bucket.format("%H:%M")
            ),
            morning_departure: morning.bucket,
            evening_departure: evening.bucket,
            total_avg: morning.mean + evening.mean,
            total_95: morning.perc_95 + evening.perc_95,
            total_5: morning.perc_5 + evening.perc_5,
            total_median: morning.median + evening.median,
            minutes_lost: 0.0,
            days_lost_per_year: 0.0,
        });
    }

    if pairs.is_empty() {
        warn!("No morning/evening departure pair matched the eight hour spread");
        return pairs;
    }

    let minimum = pairs
        .iter()
        .map(|p| p.total_avg)
        .fold(f64::INFINITY, f64::min);

    for pair in &mut pairs {
        pair.minutes_lost = pair.total_avg - minimum;
        pair.days_lost_per_year = pair.minutes_lost / (60.0 * 24.0) * 5.0 * 52.0;
    }

    debug!(pairs = pairs.len(), best_total_avg = minimum, "Round trips merged");
    pairs
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzers::types::BucketAggregate;

    fn bucket(clock: &str, mean: f64) -> BucketAggregate {
        BucketAggregate {
            bucket: clock.parse().unwrap(),
            route_count: 1,
            sample_count: 5,
            mean,
            min: mean - 5.0,
            max: mean + 5.0,
            median: mean - 1.0,
            perc_95: mean + 4.0,
            perc_5: mean - 4.0,
        }
    }

    fn tables(morning: Vec<BucketAggregate>, evening: Vec<BucketAggregate>) -> PartitionedAggregates {
        PartitionedAggregates { morning, evening }
    }

    #[test]
    fn test_join_on_eight_hour_spread() {
        let aggregates = tables(
            vec![bucket("07:00:00", 25.0), bucket("07:30:00", 22.0)],
            vec![bucket("15:00:00", 30.0), bucket("16:00:00", 35.0)],
        );

        let pairs = merge_round_trips(&aggregates);
        assert_eq!(pairs.len(), 1);
        assert_eq!(pairs[0].label, "07:00-15:00");
        assert_eq!(
            pairs[0].evening_departure,
            pairs[0].morning_departure + Duration::hours(8)
        );
        assert_eq!(pairs[0].total_avg, 55.0);
        assert_eq!(pairs[0].total_median, 53.0);
        assert_eq!(pairs[0].total_95, 63.0);
        assert_eq!(pairs[0].total_5, 47.0);
    }

    #[test]
    fn test_loss_relative_to_best_pair() {
        let aggregates = tables(
            vec![bucket("07:00:00", 25.0), bucket("08:00:00", 30.0)],
            vec![bucket("15:00:00", 30.0), bucket("16:00:00", 37.0)],
        );

        let pairs = merge_round_trips(&aggregates);
        assert_eq!(pairs.len(), 2);

        // 07:00-15:00 totals 55, 08:00-16:00 totals 67
        assert_eq!(pairs[0].minutes_lost, 0.0);
        assert_eq!(pairs[1].minutes_lost, 12.0);
        assert!(pairs.iter().all(|p| p.minutes_lost >= 0.0));

        let annual = 12.0 / (60.0 * 24.0) * 5.0 * 52.0;
        assert_eq!(pairs[1].days_lost_per_year, annual);
        assert_eq!(pairs[0].days_lost_per_year, 0.0);
    }

    #[test]
    fn test_sorted_by_morning_departure() {
        let aggregates = tables(
            vec![bucket("06:30:00", 21.0), bucket("07:00:00", 25.0)],
            vec![bucket("14:30:00", 28.0), bucket("15:00:00", 30.0)],
        );

        let pairs = merge_round_trips(&aggregates);
        let labels: Vec<&str> = pairs.iter().map(|p| p.label.as_str()).collect();
        assert_eq!(labels, vec!["06:30-14:30", "07:00-15:00"]);
    }

    #[test]
    fn test_disjoint_departure_sets_yield_empty_table() {
        let aggregates = tables(
            vec![bucket("07:00:00", 25.0)],
            vec![bucket("16:00:00", 30.0)],
        );

        assert!(merge_round_trips(&aggregates).is_empty());
    }

    #[test]
    fn test_empty_tables_yield_empty_table() {
        assert!(merge_round_trips(&tables(vec![], vec![])).is_empty());
    }
}
