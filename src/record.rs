//! Record types flowing through the pipeline.
//!
//! Each stage produces a richer record type from the previous one
//! instead of mutating in place: raw, then normalized, then parsed.

use chrono::NaiveDateTime;
use serde::{Deserialize, Deserializer, Serialize};

/// Timestamp layouts the collector is known to emit.
const COLLECTOR_TIME_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"];

/// A single observed trip as reported by the collector.
///
/// `time` is the source-reported instant, offset from UTC by a fixed
/// amount. `duration_in_traffic` and `distance` are free text exactly
/// as the routing API returned them, e.g. "23 mins" and "19.4 km".
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawRecord {
    pub distance: String,
    pub duration_in_traffic: String,
    pub destination: String,
    pub origin: String,
    #[serde(deserialize_with = "collector_time")]
    pub time: NaiveDateTime,
}

/// A [`RawRecord`] whose timestamp has been shifted to canonical local
/// time at minute resolution, with the morning/evening tag derived.
#[derive(Debug, Clone, Serialize)]
pub struct NormalizedRecord {
    pub time: NaiveDateTime,
    pub is_morning: bool,
    pub duration_in_traffic: String,
    pub distance: String,
    pub origin: String,
    pub destination: String,
}

/// A [`NormalizedRecord`] with both free-text measurements parsed.
///
/// `distance_miles` is `None` when the distance text was unusable; the
/// record still participates in duration aggregates.
#[derive(Debug, Clone, Serialize)]
pub struct ParsedRecord {
    pub time: NaiveDateTime,
    pub is_morning: bool,
    pub duration_minutes: u32,
    pub distance_miles: Option<f64>,
    pub origin: String,
    pub destination: String,
}

fn collector_time<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
where
    D: Deserializer<'de>,
{
    let text = String::deserialize(deserializer)?;
    COLLECTOR_TIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(&text, format).ok())
        .ok_or_else(|| serde::de::Error::custom(format!("unrecognized timestamp {:?}", text)))
}
