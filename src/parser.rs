//! Free-text field parsing for the duration and distance columns.

use regex::Regex;
use tracing::warn;

use crate::error::PipelineError;
use crate::record::{NormalizedRecord, ParsedRecord};

/// Kilometres per mile, for converting the collector's metric distances.
const KM_PER_MILE: f64 = 1.609;

/// Parses a free-text traffic duration into whole minutes.
///
/// The routing API reports durations as "42 mins" or "1 hour 5 mins":
/// with an hour unit present the first two numerals are hours and
/// minutes (a bare "1 hour" means zero minutes), otherwise the single
/// numeral is minutes. Returns `None` when no numeral is embedded.
pub fn duration_minutes(text: &str) -> Option<u32> {
    let numerals = Regex::new(r"\d+").unwrap();
    let mut values = numerals
        .find_iter(text)
        .filter_map(|m| m.as_str().parse::<u32>().ok());

    let first = values.next()?;
    if text.contains('h') {
        Some(first * 60 + values.next().unwrap_or(0))
    } else {
        Some(first)
    }
}

/// Converts a kilometre distance text to miles, rounded to one decimal.
///
/// # Errors
///
/// Returns [`PipelineError::MalformedDistance`] when the text is not a
/// non-negative number with an optional `km` suffix.
pub fn distance_miles(text: &str) -> Result<f64, PipelineError> {
    let malformed = || PipelineError::MalformedDistance {
        text: text.to_string(),
    };

    let trimmed = text.trim();
    let value: f64 = trimmed
        .strip_suffix("km")
        .unwrap_or(trimmed)
        .trim()
        .parse()
        .map_err(|_| malformed())?;

    if !value.is_finite() || value < 0.0 {
        return Err(malformed());
    }

    Ok((value / KM_PER_MILE * 10.0).round() / 10.0)
}

/// Replaces both free-text measurements on every record.
///
/// A bad distance is recovered per record: a diagnostic is logged and
/// the distance stored as `None`, keeping the record usable for
/// duration statistics.
///
/// # Errors
///
/// Returns [`PipelineError::MalformedDuration`] naming the offending
/// record when a duration has no embedded numeral.
pub fn parse_records(records: Vec<NormalizedRecord>) -> Result<Vec<ParsedRecord>, PipelineError> {
    let mut parsed = Vec::with_capacity(records.len());

    for record in records {
        let duration_minutes = duration_minutes(&record.duration_in_traffic).ok_or_else(|| {
            PipelineError::MalformedDuration {
                time: record.time,
                text: record.duration_in_traffic.clone(),
            }
        })?;

        let distance_miles = match distance_miles(&record.distance) {
            Ok(miles) => Some(miles),
            Err(error) => {
                warn!(time = %record.time, %error, "Distance unusable, record kept for duration statistics");
                None
            }
        };

        parsed.push(ParsedRecord {
            time: record.time,
            is_morning: record.is_morning,
            duration_minutes,
            distance_miles,
            origin: record.origin,
            destination: record.destination,
        });
    }

    Ok(parsed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duration_minutes_only() {
        assert_eq!(duration_minutes("42 mins"), Some(42));
        assert_eq!(duration_minutes("1 min"), Some(1));
    }

    #[test]
    fn test_duration_with_hours() {
        assert_eq!(duration_minutes("1 hour 5 mins"), Some(65));
        assert_eq!(duration_minutes("2 hours 30 mins"), Some(150));
        assert_eq!(duration_minutes("1 hour"), Some(60));
    }

    #[test]
    fn test_duration_without_numeral() {
        assert_eq!(duration_minutes("soon"), None);
        assert_eq!(duration_minutes(""), None);
    }

    #[test]
    fn test_distance_conversion() {
        assert_eq!(distance_miles("19.308km").unwrap(), 12.0);
        assert_eq!(distance_miles("19.4 km").unwrap(), 12.1);
        assert_eq!(distance_miles("0 km").unwrap(), 0.0);
    }

    #[test]
    fn test_distance_malformed() {
        assert!(distance_miles("abc").is_err());
        assert!(distance_miles("").is_err());
        assert!(distance_miles("-3 km").is_err());
        assert!(distance_miles("NaN km").is_err());
    }

    fn normalized(duration: &str, distance: &str) -> NormalizedRecord {
        NormalizedRecord {
            time: "2018-11-05T07:00:00".parse().unwrap(),
            is_morning: true,
            duration_in_traffic: duration.to_string(),
            distance: distance.to_string(),
            origin: "Home Ave".to_string(),
            destination: "Work St".to_string(),
        }
    }

    #[test]
    fn test_parse_records_recovers_bad_distance() {
        let parsed = parse_records(vec![normalized("23 mins", "abc")]).unwrap();

        assert_eq!(parsed.len(), 1);
        assert_eq!(parsed[0].duration_minutes, 23);
        assert_eq!(parsed[0].distance_miles, None);
    }

    #[test]
    fn test_parse_records_fails_on_bad_duration() {
        let error = parse_records(vec![normalized("unknown", "19.4 km")]).unwrap_err();

        match error {
            PipelineError::MalformedDuration { time, text } => {
                assert_eq!(time.to_string(), "2018-11-05 07:00:00");
                assert_eq!(text, "unknown");
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
