//! Temporal normalization: timezone shift, daylight saving correction,
//! hours-of-interest and holiday filtering, plus the weekday filter.

use std::collections::{BTreeSet, HashSet};

use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, Timelike, Weekday};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::record::{NormalizedRecord, ParsedRecord, RawRecord};

/// Local hour below which a departure counts as a morning commute.
const MORNING_CUTOFF_HOUR: u32 = 11;

/// A half-open window `[start, end)` of offset-adjusted local time whose
/// timestamps need an extra shift, typically to undo a daylight saving
/// transition the collector did not account for.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DstCorrection {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    pub shift_hours: i64,
}

impl DstCorrection {
    /// Window covering everything before midnight of `cutover`.
    pub fn until(cutover: NaiveDate, shift_hours: i64) -> Self {
        Self {
            start: NaiveDateTime::MIN,
            end: cutover.and_time(chrono::NaiveTime::MIN),
            shift_hours,
        }
    }

    fn contains(&self, time: NaiveDateTime) -> bool {
        self.start <= time && time < self.end
    }
}

/// Run parameters for the temporal normalizer.
///
/// Passed in explicitly so the pipeline can be re-parameterized per
/// deployment period and tested with synthetic calendars.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NormalizerConfig {
    /// Hours subtracted from each source timestamp to reach local time.
    pub utc_offset_hours: i64,
    /// Correction windows applied after the offset shift.
    pub dst_corrections: Vec<DstCorrection>,
    /// Local hours during which commute samples are considered valid.
    pub hours_of_interest: BTreeSet<u32>,
    /// Dates excluded from the analysis entirely.
    pub holidays: HashSet<NaiveDate>,
}

/// Shifts raw timestamps into canonical local time at minute resolution
/// and drops records outside the configured hours of interest or on
/// holidays. Survivors keep their input order.
pub fn normalize(records: &[RawRecord], config: &NormalizerConfig) -> Vec<NormalizedRecord> {
    let input = records.len();
    let mut survivors = Vec::with_capacity(records.len());

    for record in records {
        let mut local = round_to_minute(record.time - Duration::hours(config.utc_offset_hours));

        if let Some(window) = config.dst_corrections.iter().find(|w| w.contains(local)) {
            local += Duration::hours(window.shift_hours);
        }

        if !config.hours_of_interest.contains(&local.hour()) {
            continue;
        }

        if config.holidays.contains(&local.date()) {
            continue;
        }

        survivors.push(NormalizedRecord {
            time: local,
            is_morning: local.hour() < MORNING_CUTOFF_HOUR,
            duration_in_traffic: record.duration_in_traffic.clone(),
            distance: record.distance.clone(),
            origin: record.origin.clone(),
            destination: record.destination.clone(),
        });
    }

    info!(input, survivors = survivors.len(), "Temporal normalization complete");
    survivors
}

/// Drops Saturday and Sunday records. Idempotent; order preserved.
pub fn filter_weekdays(records: Vec<ParsedRecord>) -> Vec<ParsedRecord> {
    let input = records.len();
    let weekdays: Vec<ParsedRecord> = records
        .into_iter()
        .filter(|r| !matches!(r.time.weekday(), Weekday::Sat | Weekday::Sun))
        .collect();

    debug!(input, survivors = weekdays.len(), "Weekend records removed");
    weekdays
}

/// Rounds to the nearest whole minute.
fn round_to_minute(time: NaiveDateTime) -> NaiveDateTime {
    let into_minute =
        Duration::seconds(time.second() as i64) + Duration::nanoseconds(time.nanosecond() as i64);
    let floored = time - into_minute;
    if time.second() >= 30 {
        floored + Duration::minutes(1)
    } else {
        floored
    }
}
