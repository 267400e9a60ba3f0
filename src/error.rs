//! Error taxonomy for the cleaning and aggregation pipeline.

use chrono::NaiveDateTime;
use thiserror::Error;

use crate::analyzers::types::Partition;

/// Failures raised while cleaning and aggregating commute records.
///
/// `MalformedDuration` and `MixedOrigin` are fatal for the run.
/// `MalformedDistance` is recovered per record by the parse stage, which
/// marks the distance unusable and continues.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// Duration text with no embedded numeral. Duration is the primary
    /// measured quantity, so an unparseable value aborts the run.
    #[error("unparseable duration {text:?} in record observed at {time}")]
    MalformedDuration { time: NaiveDateTime, text: String },

    /// Distance text that does not match the unit-suffixed numeric
    /// pattern.
    #[error("unparseable distance {text:?}")]
    MalformedDistance { text: String },

    /// More than one distinct origin observed within a single partition,
    /// which breaks the single-fixed-route assumption of the aggregates.
    #[error("multiple origins in {partition} partition: {origins:?}")]
    MixedOrigin {
        partition: Partition,
        origins: Vec<String>,
    },
}
