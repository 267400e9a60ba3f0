//! Data types produced by the aggregation pipeline.

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

/// Morning/evening half of the commute day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Partition {
    Morning,
    Evening,
}

impl std::fmt::Display for Partition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Partition::Morning => write!(f, "morning"),
            Partition::Evening => write!(f, "evening"),
        }
    }
}

/// Duration statistic selectable for summary reporting.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Metric {
    #[default]
    Mean,
    Median,
    Min,
    Max,
    Perc95,
    Perc5,
}

/// Descriptive duration statistics for one departure clock time within
/// one partition.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BucketAggregate {
    /// Departure clock time at minute resolution, no date component.
    pub bucket: NaiveTime,
    /// Distinct usable distance values observed for this departure time.
    pub route_count: usize,
    /// Number of observations feeding this bucket.
    pub sample_count: usize,
    pub mean: f64,
    pub min: f64,
    pub max: f64,
    pub median: f64,
    pub perc_95: f64,
    pub perc_5: f64,
}

impl BucketAggregate {
    /// Reads the duration statistic selected by `metric`.
    pub fn metric(&self, metric: Metric) -> f64 {
        match metric {
            Metric::Mean => self.mean,
            Metric::Median => self.median,
            Metric::Min => self.min,
            Metric::Max => self.max,
            Metric::Perc95 => self.perc_95,
            Metric::Perc5 => self.perc_5,
        }
    }
}

/// The two aggregate tables, each internally sorted by bucket.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PartitionedAggregates {
    pub morning: Vec<BucketAggregate>,
    pub evening: Vec<BucketAggregate>,
}

/// One matched morning/evening departure pair with combined statistics
/// and its loss relative to the best pair.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoundTripPairing {
    /// Display label "<morning>-<evening>", e.g. "07:00-15:00".
    pub label: String,
    pub morning_departure: NaiveTime,
    pub evening_departure: NaiveTime,
    /// Sum of the two bucket means.
    pub total_avg: f64,
    /// Sum of the two 95th percentiles.
    pub total_95: f64,
    /// Sum of the two 5th percentiles.
    pub total_5: f64,
    /// Sum of the two medians.
    pub total_median: f64,
    /// Excess of `total_avg` over the best pairing's `total_avg`.
    pub minutes_lost: f64,
    /// `minutes_lost` annualized: five round trips a week, 52 weeks.
    pub days_lost_per_year: f64,
}

/// Mean durations for one observed commute date.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DailyAverage {
    pub date: NaiveDate,
    /// Mean morning duration, absent when no morning leg was observed.
    pub morning_mean: Option<f64>,
    /// Mean evening duration, absent when no evening leg was observed.
    pub evening_mean: Option<f64>,
    /// Sum of the observed leg means.
    pub total: f64,
    /// Rolling mean of `total` over the trailing observed dates, absent
    /// until the window fills.
    pub rolling_total: Option<f64>,
}

/// A bucket together with the metric value that made it an extreme.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BucketExtreme {
    pub bucket: NaiveTime,
    pub value: f64,
}

/// A pairing label together with its extreme combined value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PairingExtreme {
    pub label: String,
    pub value: f64,
}

/// Best and worst departure times per partition plus the best
/// round-trip pairings. Extremes are lists so ties are all reported.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummaryReport {
    /// Statistic the single-leg extremes were selected by.
    pub metric: Metric,
    pub best_morning: Vec<BucketExtreme>,
    pub worst_morning: Vec<BucketExtreme>,
    pub best_evening: Vec<BucketExtreme>,
    pub worst_evening: Vec<BucketExtreme>,
    pub best_pairing_by_median: Vec<PairingExtreme>,
    pub best_pairing_by_average: Vec<PairingExtreme>,
    /// Diagnostics such as the insufficient-pairing-data notice.
    pub notes: Vec<String>,
}

/// Complete result of one pipeline run, handed to the presentation
/// collaborators as plain data.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommuteAnalysis {
    pub aggregates: PartitionedAggregates,
    pub daily: Vec<DailyAverage>,
    pub round_trips: Vec<RoundTripPairing>,
    pub summary: SummaryReport,
}
