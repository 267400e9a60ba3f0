//! Per-date commute averages and the rolling total, the calendar-axis
//! companion to the clock-time aggregates.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use tracing::debug;

use crate::analyzers::types::DailyAverage;
use crate::analyzers::utility::mean;
use crate::record::ParsedRecord;

/// Observed dates needed before a rolling total is reported.
const ROLLING_WINDOW: usize = 5;

/// Computes per-date mean durations for each leg and a rolling mean of
/// the daily total over the last [`ROLLING_WINDOW`] observed dates.
///
/// Weekends and holidays never reach this stage, so the window spans
/// observed commute days, not calendar days. Output is sorted by date.
pub fn daily_averages(records: &[ParsedRecord]) -> Vec<DailyAverage> {
    let mut by_date: BTreeMap<NaiveDate, (Vec<f64>, Vec<f64>)> = BTreeMap::new();
    for record in records {
        let (morning, evening) = by_date.entry(record.time.date()).or_default();
        if record.is_morning {
            morning.push(record.duration_minutes as f64);
        } else {
            evening.push(record.duration_minutes as f64);
        }
    }

    let mut table: Vec<DailyAverage> = by_date
        .into_iter()
        .map(|(date, (morning, evening))| {
            let morning_mean = (!morning.is_empty()).then(|| mean(&morning));
            let evening_mean = (!evening.is_empty()).then(|| mean(&evening));
            DailyAverage {
                date,
                morning_mean,
                evening_mean,
                total: morning_mean.unwrap_or(0.0) + evening_mean.unwrap_or(0.0),
                rolling_total: None,
            }
        })
        .collect();

    for i in (ROLLING_WINDOW - 1)..table.len() {
        let window: Vec<f64> = table[i + 1 - ROLLING_WINDOW..=i]
            .iter()
            .map(|d| d.total)
            .collect();
        table[i].rolling_total = Some(mean(&window));
    }

    debug!(days = table.len(), "Daily averages computed");
    table
}
