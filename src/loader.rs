//! CSV snapshot loading for collector output.

use anyhow::{Context, Result};
use std::fs::File;
use std::path::Path;
use tracing::debug;

use crate::record::RawRecord;

/// Reads every raw record from a collector CSV snapshot, in file order.
///
/// The snapshot carries the collector's headers (`distance`,
/// `duration_in_traffic`, `destination`, `origin`, `time`); column
/// order does not matter.
pub fn load_records(path: impl AsRef<Path>) -> Result<Vec<RawRecord>> {
    let path = path.as_ref();
    let file = File::open(path).with_context(|| format!("opening snapshot {}", path.display()))?;
    let mut rdr = csv::Reader::from_reader(file);

    let mut records = Vec::new();
    for result in rdr.deserialize() {
        let record: RawRecord =
            result.with_context(|| format!("reading snapshot {}", path.display()))?;
        records.push(record);
    }

    debug!(records = records.len(), path = %path.display(), "Snapshot loaded");
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::fs;

    fn temp_path(name: &str) -> String {
        format!("{}/{}", env::temp_dir().display(), name)
    }

    #[test]
    fn test_load_records_in_file_order() {
        let path = temp_path("commute_analyzer_test_load.csv");
        fs::write(
            &path,
            "distance,duration_in_traffic,destination,origin,time\n\
             19.4 km,23 mins,Work St,Home Ave,2018-11-05 12:00:10.521\n\
             19.7 km,1 hour 5 mins,Work St,Home Ave,2018-11-06 12:00:05\n",
        )
        .unwrap();

        let records = load_records(&path).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].duration_in_traffic, "23 mins");
        assert_eq!(records[1].distance, "19.7 km");
        assert_eq!(records[1].time.to_string(), "2018-11-06 12:00:05");

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_load_records_reordered_columns() {
        let path = temp_path("commute_analyzer_test_columns.csv");
        fs::write(
            &path,
            "time,origin,destination,duration_in_traffic,distance\n\
             2018-11-05 12:00:10,Home Ave,Work St,23 mins,19.4 km\n",
        )
        .unwrap();

        let records = load_records(&path).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].origin, "Home Ave");

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_load_records_missing_file() {
        let result = load_records(temp_path("commute_analyzer_does_not_exist.csv"));
        assert!(result.is_err());
    }

    #[test]
    fn test_load_records_bad_row() {
        let path = temp_path("commute_analyzer_test_bad_row.csv");
        fs::write(
            &path,
            "distance,duration_in_traffic,destination,origin,time\n\
             19.4 km,23 mins,Work St,Home Ave,not-a-timestamp\n",
        )
        .unwrap();

        assert!(load_records(&path).is_err());

        fs::remove_file(&path).unwrap();
    }
}
